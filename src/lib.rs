//! # HAAS Translator
//!
//! 面向 HAAS Studio webview 的中译英覆盖层：识别界面中的中文文本，
//! 查询缓存或翻译后端得到英文，再通过注入脚本替换回界面。
//!
//! ## 模块组织
//!
//! - `translation` - 文本分类、缓存、翻译后端、协调器和内容改写
//! - `host` - 宿主接口与事件分发
//! - `env` - 环境变量管理

pub mod env;
pub mod host;
pub mod translation;

pub use host::{ContentTransform, HostBridge, SurfaceMessage, TranslatorHost};
pub use translation::{
    ContentRewriter, DictionaryBackend, TranslationBackend, TranslationCoordinator,
    TranslationError, TranslationResult, TranslatorConfig,
};
