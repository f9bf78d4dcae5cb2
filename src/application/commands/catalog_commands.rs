//! Catalog Commands

/// 刷新已完结小说目录命令（由定时任务触发）
#[derive(Debug, Clone)]
pub struct RefreshCompletedNovels;
