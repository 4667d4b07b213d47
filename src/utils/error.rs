//! 统一错误处理
//!
//! 提供应用级错误类型 [`AppError`]，在 handler 边界统一转换为 HTTP 响应。
//!
//! # 错误分类
//!
//! | 分类 | 状态码 | 说明 |
//! |------|--------|------|
//! | Unauthorized | 401 | 凭证缺失或错误，附带 Basic 质询 |
//! | NotFound | 404 | 引用了不存在的订单或菜品 |
//! | Validation | 400 | 请求体结构不合法 |
//! | Persistence | 500 | 落盘写入失败 |
//! | Internal | 500 | 其他内部错误 |
//!
//! 后台任务 (归档周期) 的错误不经过本类型返回给调用方，只记录日志。

use axum::{
    Json,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Authentication required")]
    /// 未授权 (401)
    Unauthorized,

    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Validation failed: {0}")]
    /// 验证失败 (400)
    Validation(String),

    #[error("Persistence error: {0}")]
    /// 落盘失败 (500)
    Persistence(String),

    #[error("Internal server error: {0}")]
    /// 内部错误 (500)
    Internal(String),
}

/// 错误响应体
///
/// ```json
/// { "error": "not_found", "message": "Order PED-042 not found" }
/// ```
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, kind, message) = match &self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "unauthorized",
                self.to_string(),
            ),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "not_found", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "validation_error", msg.clone()),
            AppError::Persistence(msg) => {
                error!(target: "persistence", error = %msg, "Persistence error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "persistence_error",
                    "Failed to persist data".to_string(),
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorBody {
            error: kind.to_string(),
            message,
        });

        if status == StatusCode::UNAUTHORIZED {
            // 401 携带 Basic 质询，提示客户端重新认证
            return (
                status,
                [(header::WWW_AUTHENTICATE, "Basic realm=\"comanda\"")],
                body,
            )
                .into_response();
        }

        (status, body).into_response()
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Persistence(e.to_string())
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn persistence(msg: impl Into<String>) -> Self {
        Self::Persistence(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
