//! Auth Commands

/// 注册命令
#[derive(Debug, Clone)]
pub struct SignUp {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// 登录命令
#[derive(Debug, Clone)]
pub struct LogIn {
    pub username: String,
    pub password: String,
}

/// 令牌校验命令
#[derive(Debug, Clone)]
pub struct ValidateToken {
    pub token: String,
}

/// 请求密码重置码命令
#[derive(Debug, Clone)]
pub struct RequestPasswordReset {
    pub email: String,
}

/// 校验重置码命令
#[derive(Debug, Clone)]
pub struct VerifyResetCode {
    pub email: String,
    pub code: String,
}

/// 用重置码设置新密码命令
#[derive(Debug, Clone)]
pub struct ResetPassword {
    pub email: String,
    pub code: String,
    pub password: String,
}
