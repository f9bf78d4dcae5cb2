//! User Queries

use uuid::Uuid;

/// 获取用户详情查询（资料 + 好友公开资料 + 书架 + 历史）
#[derive(Debug, Clone)]
pub struct GetUserDetails {
    pub user_id: Uuid,
}

/// 按公开别名查找用户是否存在
#[derive(Debug, Clone)]
pub struct LookupUser {
    pub public_id: String,
}
