//! 翻译模块统一错误处理
//!
//! 提供结构化错误类型和错误处理机制。
//!
//! 这里的错误都不会传递给最终用户：翻译失败时调用方统一退化为"不翻译"，
//! 宿主界面照常渲染。

use std::fmt;

use thiserror::Error;

/// 翻译错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    /// 翻译后端调用失败
    #[error("翻译后端错误: {0}")]
    BackendFailure(String),

    /// 内容格式不符合注入要求
    #[error("内容格式错误: {0}")]
    MalformedContent(String),

    /// 宿主集成失败（例如无法注册内容钩子）
    #[error("宿主集成错误: {0}")]
    HostIntegration(String),

    /// 配置错误
    #[error("配置错误: {0}")]
    ConfigError(String),

    /// 序列化错误
    #[error("序列化错误: {0}")]
    SerializationError(String),
}

impl TranslationError {
    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TranslationError::BackendFailure(_) => ErrorSeverity::Warning,
            TranslationError::MalformedContent(_) => ErrorSeverity::Info,
            TranslationError::HostIntegration(_) => ErrorSeverity::Warning,
            TranslationError::ConfigError(_) => ErrorSeverity::Critical,
            TranslationError::SerializationError(_) => ErrorSeverity::Error,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            TranslationError::BackendFailure(_) => ErrorCategory::Backend,
            TranslationError::MalformedContent(_) => ErrorCategory::Content,
            TranslationError::HostIntegration(_) => ErrorCategory::Host,
            TranslationError::ConfigError(_) => ErrorCategory::Configuration,
            TranslationError::SerializationError(_) => ErrorCategory::Serialization,
        }
    }

    /// 创建带上下文的错误
    pub fn with_context<T: fmt::Display>(mut self, context: T) -> Self {
        let new_msg = format!("{} (上下文: {})", self.message(), context);

        match &mut self {
            TranslationError::BackendFailure(msg)
            | TranslationError::MalformedContent(msg)
            | TranslationError::HostIntegration(msg)
            | TranslationError::ConfigError(msg)
            | TranslationError::SerializationError(msg) => *msg = new_msg,
        }

        self
    }

    fn message(&self) -> &str {
        match self {
            TranslationError::BackendFailure(msg)
            | TranslationError::MalformedContent(msg)
            | TranslationError::HostIntegration(msg)
            | TranslationError::ConfigError(msg)
            | TranslationError::SerializationError(msg) => msg,
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Backend,
    Content,
    Host,
    Configuration,
    Serialization,
}

impl From<serde_json::Error> for TranslationError {
    fn from(error: serde_json::Error) -> Self {
        TranslationError::SerializationError(format!("JSON序列化错误: {}", error))
    }
}

/// 错误结果类型别名
pub type TranslationResult<T> = Result<T, TranslationError>;

/// 错误处理助手函数
pub mod helpers {
    use super::*;

    /// 按严重程度记录错误
    pub fn log_error(error: &TranslationError) {
        let category = error.category();
        match error.severity() {
            ErrorSeverity::Info => tracing::info!(?category, "{}", error),
            ErrorSeverity::Warning => tracing::warn!(?category, "{}", error),
            ErrorSeverity::Error => tracing::error!(?category, "{}", error),
            ErrorSeverity::Critical => tracing::error!(?category, "严重: {}", error),
        }
    }

    /// 创建配置错误
    pub fn config_error<T: fmt::Display>(msg: T) -> TranslationError {
        TranslationError::ConfigError(msg.to_string())
    }
}
