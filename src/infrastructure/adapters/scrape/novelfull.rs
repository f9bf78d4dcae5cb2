//! Novelfull Scrape Adapter
//!
//! NovelSourcePort 的 novelfull.net 实现。HTML 解析集中在同步的
//! parse_* 函数里（Html 不是 Send，不能跨 await 持有），
//! 选择器与原站页面结构一一对应。

use async_trait::async_trait;
use scraper::{Html, Selector};
use std::time::Duration;

use crate::application::ports::{
    CompletedNovelRecord, NovelSourcePort, SearchHit, SourceError, SourceNovelInfo,
};
use crate::config::SourceConfig;
use crate::domain::library::ChapterStub;

/// Novelfull 抓取客户端
pub struct NovelfullClient {
    http: reqwest::Client,
    base_url: String,
}

impl NovelfullClient {
    pub fn new(config: &SourceConfig) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent("Mozilla/5.0 (compatible; shujia/0.1.0)")
            .build()
            .map_err(|e| SourceError::Http(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_text(&self, url: &str) -> Result<String, SourceError> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Http(format!(
                "{} returned status {}",
                url,
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))
    }

    fn absolute(&self, suffix: &str) -> String {
        if suffix.starts_with("http") {
            suffix.to_string()
        } else {
            format!("{}{}", self.base_url, suffix)
        }
    }
}

fn selector(css: &str) -> Result<Selector, SourceError> {
    Selector::parse(css).map_err(|e| SourceError::Parse(e.to_string()))
}

/// 小说主页的标题/作者/简介/封面
fn parse_novel_header(html: &str, base_url: &str) -> Result<SourceNovelInfo, SourceError> {
    let document = Html::parse_document(html);

    let title_sel = selector("h3.title")?;
    let author_sel = selector("div.info > div:first-child a")?;
    let desc_sel = selector("div.desc-text")?;
    let cover_sel = selector("div.book img")?;

    let title = document
        .select(&title_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let author = document
        .select(&author_sel)
        .map(|el| el.text().collect::<String>().trim().to_string())
        .collect::<Vec<_>>()
        .join(", ");

    let description = document
        .select(&desc_sel)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .unwrap_or_default();

    let cover_url = document
        .select(&cover_sel)
        .next()
        .and_then(|el| el.value().attr("src"))
        .map(|src| format!("{}{}", base_url, src))
        .unwrap_or_default();

    Ok(SourceNovelInfo {
        title,
        author,
        description,
        cover_url,
        chapters: Vec::new(),
    })
}

/// 章节列表页: 返回本页章节和下一页链接
fn parse_chapter_page(
    html: &str,
    base_url: &str,
) -> Result<(Vec<ChapterStub>, Option<String>), SourceError> {
    let document = Html::parse_document(html);

    let item_sel = selector("ul.list-chapter li a")?;
    let next_sel = selector(".pagination.pagination-sm li.next a")?;

    let chapters = document
        .select(&item_sel)
        .filter_map(|el| {
            let href = el.value().attr("href")?;
            let title = el
                .value()
                .attr("title")
                .map(|t| t.to_string())
                .unwrap_or_else(|| el.text().collect::<String>().trim().to_string());
            Some(ChapterStub {
                title,
                link: format!("{}{}", base_url, href),
            })
        })
        .collect();

    let next = document
        .select(&next_sel)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|href| format!("{}{}", base_url, href));

    Ok((chapters, next))
}

/// 正文页: 只保留非空段落文本，丢弃脚本与广告节点
fn parse_chapter_content(html: &str) -> Result<String, SourceError> {
    let document = Html::parse_document(html);
    let paragraph_sel = selector("#chapter-content p")?;

    let paragraphs: Vec<String> = document
        .select(&paragraph_sel)
        .map(|el| {
            el.text()
                .collect::<String>()
                .replace('\t', "")
                .trim()
                .to_string()
        })
        .filter(|p| !p.is_empty())
        .collect();

    if paragraphs.is_empty() {
        return Err(SourceError::Parse(
            "No chapter content found on page".to_string(),
        ));
    }

    Ok(paragraphs.join("\n\n"))
}

/// 搜索结果页
fn parse_search_results(html: &str, base_url: &str) -> Result<Vec<SearchHit>, SourceError> {
    let document = Html::parse_document(html);

    let row_sel = selector(".list-truyen .row")?;
    let cover_sel = selector("img.cover")?;
    let title_sel = selector("h3.truyen-title a")?;

    let mut hits = Vec::new();
    for row in document.select(&row_sel) {
        let image = row
            .select(&cover_sel)
            .next()
            .and_then(|el| el.value().attr("src"))
            .unwrap_or_default();
        let link = match row.select(&title_sel).next() {
            Some(el) => el,
            None => continue,
        };
        let title = link.text().collect::<String>().trim().to_string();
        let href = link.value().attr("href").unwrap_or_default();

        // 缺关键字段的行直接跳过
        if image.is_empty() || title.is_empty() || href.is_empty() {
            continue;
        }

        hits.push(SearchHit {
            title,
            novel_url: format!("{}{}", base_url, href),
            image_url: format!("{}{}", base_url, image),
        });
    }

    Ok(hits)
}

/// 已完结目录页: 返回本页条目和下一页链接
fn parse_completed_page(
    html: &str,
    base_url: &str,
) -> Result<(Vec<CompletedNovelRecord>, Option<String>), SourceError> {
    let document = Html::parse_document(html);

    let row_sel = selector(".list.list-truyen.col-xs-12 .row")?;
    let cover_sel = selector(".col-xs-3 img.cover")?;
    let title_sel = selector(".col-xs-7 h3.truyen-title a")?;
    let count_sel = selector(".col-xs-2.text-info .chapter-text b")?;
    let next_sel = selector(".pagination.pagination-sm li.next a")?;

    let mut novels = Vec::new();
    for row in document.select(&row_sel) {
        let image = row
            .select(&cover_sel)
            .next()
            .and_then(|el| el.value().attr("src"))
            .unwrap_or_default();
        let link = match row.select(&title_sel).next() {
            Some(el) => el,
            None => continue,
        };
        let title = link.text().collect::<String>().trim().to_string();
        let href = link.value().attr("href").unwrap_or_default();
        let chapter_count = row
            .select(&count_sel)
            .next()
            .map(|el| el.text().collect::<String>())
            .and_then(|t| t.trim().parse::<u32>().ok())
            .unwrap_or(0);

        if image.is_empty() || title.is_empty() || href.is_empty() {
            continue;
        }

        novels.push(CompletedNovelRecord {
            title,
            novel_url: format!("{}{}", base_url, href),
            chapter_count,
            image_url: format!("{}{}", base_url, image),
        });
    }

    let next = document
        .select(&next_sel)
        .next()
        .and_then(|el| el.value().attr("href"))
        .map(|href| format!("{}{}", base_url, href));

    Ok((novels, next))
}

#[async_trait]
impl NovelSourcePort for NovelfullClient {
    async fn fetch_novel_info(&self, novel_url: &str) -> Result<SourceNovelInfo, SourceError> {
        let first_page = self.get_text(novel_url).await?;
        let mut info = parse_novel_header(&first_page, &self.base_url)?;

        // 跟随分页收集完整章节列表
        let (mut chapters, mut next) = parse_chapter_page(&first_page, &self.base_url)?;
        info.chapters.append(&mut chapters);

        while let Some(url) = next {
            let page = self.get_text(&url).await?;
            let (mut page_chapters, page_next) = parse_chapter_page(&page, &self.base_url)?;
            info.chapters.append(&mut page_chapters);
            next = page_next;
        }

        tracing::debug!(
            novel_url,
            chapters = info.chapters.len(),
            "Fetched novel info"
        );

        Ok(info)
    }

    async fn fetch_chapter_content(&self, chapter_url: &str) -> Result<String, SourceError> {
        let page = self.get_text(chapter_url).await?;
        parse_chapter_content(&page)
    }

    async fn search(&self, keyword: &str) -> Result<Vec<SearchHit>, SourceError> {
        let response = self
            .http
            .get(format!("{}/search", self.base_url))
            .query(&[("keyword", keyword)])
            .send()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;

        if !response.status().is_success() {
            return Err(SourceError::Http(format!(
                "search returned status {}",
                response.status()
            )));
        }

        let page = response
            .text()
            .await
            .map_err(|e| SourceError::Http(e.to_string()))?;
        parse_search_results(&page, &self.base_url)
    }

    async fn fetch_completed_novels(&self) -> Result<Vec<CompletedNovelRecord>, SourceError> {
        let mut novels = Vec::new();
        let mut next = Some(self.absolute("/completed-novel"));

        while let Some(url) = next {
            let page = self.get_text(&url).await?;
            let (mut page_novels, page_next) = parse_completed_page(&page, &self.base_url)?;
            novels.append(&mut page_novels);
            next = page_next;
        }

        tracing::debug!(count = novels.len(), "Fetched completed novels catalog");

        Ok(novels)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://novelfull.net";

    #[test]
    fn test_parse_novel_header() {
        let html = r#"
            <div class="book"><img src="/media/cover.jpg"></div>
            <h3 class="title">Example Novel</h3>
            <div class="info"><div><a>Author One</a><a>Author Two</a></div></div>
            <div class="desc-text"> A story. </div>
        "#;

        let info = parse_novel_header(html, BASE).unwrap();
        assert_eq!(info.title, "Example Novel");
        assert_eq!(info.author, "Author One, Author Two");
        assert_eq!(info.description, "A story.");
        assert_eq!(info.cover_url, "https://novelfull.net/media/cover.jpg");
    }

    #[test]
    fn test_parse_chapter_page_with_next() {
        let html = r#"
            <ul class="list-chapter">
                <li><a href="/n/ch-1" title="Chapter 1"></a></li>
                <li><a href="/n/ch-2" title="Chapter 2"></a></li>
            </ul>
            <ul class="pagination pagination-sm">
                <li class="next"><a href="/n?page=2"></a></li>
            </ul>
        "#;

        let (chapters, next) = parse_chapter_page(html, BASE).unwrap();
        assert_eq!(chapters.len(), 2);
        assert_eq!(chapters[0].title, "Chapter 1");
        assert_eq!(chapters[0].link, "https://novelfull.net/n/ch-1");
        assert_eq!(next.as_deref(), Some("https://novelfull.net/n?page=2"));
    }

    #[test]
    fn test_parse_chapter_content_skips_empty_paragraphs() {
        let html = r#"
            <div id="chapter-content">
                <script>ads()</script>
                <p>First paragraph.</p>
                <p>   </p>
                <p>Second paragraph.</p>
            </div>
        "#;

        let content = parse_chapter_content(html).unwrap();
        assert_eq!(content, "First paragraph.\n\nSecond paragraph.");
    }

    #[test]
    fn test_parse_search_skips_incomplete_rows() {
        let html = r#"
            <div class="list-truyen">
                <div class="row">
                    <img class="cover" src="/media/a.jpg">
                    <h3 class="truyen-title"><a href="/novel-a">Novel A</a></h3>
                </div>
                <div class="row">
                    <h3 class="truyen-title"><a href="/novel-b">Novel B</a></h3>
                </div>
            </div>
        "#;

        let hits = parse_search_results(html, BASE).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "Novel A");
        assert_eq!(hits[0].novel_url, "https://novelfull.net/novel-a");
    }

    #[test]
    fn test_parse_completed_page() {
        let html = r#"
            <div class="list list-truyen col-xs-12">
                <div class="row">
                    <div class="col-xs-3"><img class="cover" src="/media/a.jpg"></div>
                    <div class="col-xs-7"><h3 class="truyen-title"><a href="/novel-a">Novel A</a></h3></div>
                    <div class="col-xs-2 text-info"><span class="chapter-text"><b>812</b></span></div>
                </div>
            </div>
        "#;

        let (novels, next) = parse_completed_page(html, BASE).unwrap();
        assert_eq!(novels.len(), 1);
        assert_eq!(novels[0].chapter_count, 812);
        assert!(next.is_none());
    }
}
