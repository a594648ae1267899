//! 统一错误处理
//!
//! - [`AppError`] - 请求路径上的错误，转换为 `{ "error": "..." }` 响应
//! - [`I18nError`] - 翻译表加载错误
//! - [`ConfigError`] - 环境变量配置错误

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use tracing::error;

use crate::models::ReportKind;

/// 错误响应体
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 参数校验失败 (400)
    #[error("{0}")]
    Validation(String),

    /// 报表生成失败 (500)，细节只写日志
    #[error("Failed to fetch {kind} data: {message}")]
    Report { kind: ReportKind, message: String },

    /// 其他内部错误 (500)
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn report(kind: ReportKind, message: impl ToString) -> Self {
        Self::Report {
            kind,
            message: message.to_string(),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Report { .. } | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Validation(msg) => msg.clone(),
            AppError::Report { kind, message } => {
                error!(target: "report", kind = %kind, error = %message, "报表生成失败");
                format!("Failed to fetch {} data", kind.display_name())
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "内部错误");
                "Internal server error".to_string()
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// 翻译表加载错误
#[derive(Debug, thiserror::Error)]
pub enum I18nError {
    #[error("语言包文件读取失败 {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("语言包解析失败 {locale}: {source}")]
    Parse {
        locale: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("语言包 {locale} 中存在未知报表类型: {kind}")]
    UnknownKind { locale: String, kind: String },
}

/// 配置错误
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{name} 必须是一个有效的{expected}: {value}")]
    Invalid {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    #[tokio::test]
    async fn validation_error_is_bad_request_with_message() {
        let response = AppError::validation("page must be a positive integer").into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "page must be a positive integer");
    }

    #[tokio::test]
    async fn report_error_hides_internal_details() {
        let response = AppError::report(ReportKind::LowStock, "boom at line 42").into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Failed to fetch low stock data");
    }
}
