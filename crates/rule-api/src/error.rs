//! 规则服务错误类型定义
//!
//! 将引擎的类型化错误翻译为 HTTP 状态码和统一响应体。

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use rule_engine::RuleError;
use serde_json::json;

/// 规则服务错误类型
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    // 请求错误
    #[error("参数验证失败: {0}")]
    Validation(String),

    /// 规则文本/结构无法解析或无法表示
    #[error("规则无效: {0}")]
    InvalidRule(#[source] RuleError),

    /// 规则结构合法但对给定数据记录求值失败
    #[error("规则求值失败: {0}")]
    EvaluationFailed(#[source] RuleError),

    // 资源不存在
    #[error("规则不存在: {0}")]
    RuleNotFound(i64),

    // 系统错误
    #[error("数据库错误: {0}")]
    Database(#[from] sqlx::Error),

    #[error("内部错误: {0}")]
    Internal(String),
}

impl ApiError {
    /// 返回对应的 HTTP 状态码
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) | Self::InvalidRule(_) => StatusCode::BAD_REQUEST,
            Self::EvaluationFailed(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::RuleNotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// 返回错误码（API 契约的一部分，客户端据此做条件分支）
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::InvalidRule(_) => "INVALID_RULE",
            Self::EvaluationFailed(_) => "EVALUATION_FAILED",
            Self::RuleNotFound(_) => "RULE_NOT_FOUND",
            Self::Database(_) => "DATABASE_ERROR",
            Self::Internal(_) => "INTERNAL_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // 系统级错误只返回通用提示，详细信息仅记录日志，防止信息泄露
        let message = match &self {
            Self::Database(e) => {
                tracing::error!(error = %e, "数据库操作失败");
                "服务内部错误，请稍后重试".to_string()
            }
            Self::Internal(e) => {
                tracing::error!(error = %e, "内部错误");
                "服务内部错误，请稍后重试".to_string()
            }
            other => other.to_string(),
        };

        let body = json!({
            "success": false,
            "code": self.error_code(),
            "message": message,
            "data": serde_json::Value::Null
        });

        (status, axum::Json(body)).into_response()
    }
}

/// 从 validator 错误转换
impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        Self::Validation(errors.to_string())
    }
}

/// 从 JSON 序列化错误转换
impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        Self::Internal(format!("JSON 处理错误: {err}"))
    }
}

/// 服务层 Result 类型别名
pub type Result<T> = std::result::Result<T, ApiError>;
