//! 翻译模块
//!
//! - **config**: 配置管理
//! - **core**: 翻译后端与协调器
//! - **error**: 错误处理
//! - **pipeline**: 文本分类与收集
//! - **storage**: 翻译缓存
//! - **processor**: 向 HTML 注入翻译覆盖脚本
//!
//! # 基本用法
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use haas_translator::translation::{ContentRewriter, DictionaryBackend, TranslationCoordinator};
//!
//! # async fn example() {
//! let coordinator = Arc::new(TranslationCoordinator::new(Arc::new(DictionaryBackend::new())));
//! assert_eq!(coordinator.translate_text("配置").await, "Configuration");
//!
//! let rewriter = ContentRewriter::new(Arc::clone(&coordinator));
//! let html = rewriter.augment_content("<html><body>编译</body></html>");
//! # let _ = html;
//! # }
//! ```

pub mod config;
pub mod core;
pub mod error;
pub mod pipeline;
pub mod processor;
pub mod storage;

pub use config::{constants, ConfigManager, TranslatorConfig};
pub use self::core::{
    CoordinatorStats, DictionaryBackend, StatsSnapshot, TranslationBackend,
    TranslationCoordinator,
};
pub use error::{ErrorCategory, ErrorSeverity, TranslationError, TranslationResult};
pub use pipeline::{
    is_destination_language_only, is_script_native, TextAnalysis, TextCollector, TextItem,
};
pub use processor::ContentRewriter;
pub use storage::{CacheConfig, CacheStats, TranslationCache, TranslationEntry};
