//! Source Queries - 来源站代理查询

/// 抓取小说信息 + 章节列表
#[derive(Debug, Clone)]
pub struct GetNovelInfo {
    pub novel_url: String,
}

/// 抓取单章正文
#[derive(Debug, Clone)]
pub struct GetChapterContent {
    pub chapter_url: String,
}

/// 按关键字搜索
#[derive(Debug, Clone)]
pub struct SearchNovels {
    pub keyword: String,
}
