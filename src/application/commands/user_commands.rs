//! User Commands

use uuid::Uuid;

/// 添加好友命令（集合成员语义，去重）
#[derive(Debug, Clone)]
pub struct AddFriend {
    pub user_id: Uuid,
    pub friend_id: String,
}

/// 更新主题设置命令
#[derive(Debug, Clone)]
pub struct UpdateTheme {
    pub user_id: Uuid,
    pub theme: String,
}
