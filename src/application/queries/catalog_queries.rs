//! Catalog Queries

/// 列出已完结小说目录查询
#[derive(Debug, Clone)]
pub struct ListCompletedNovels;
