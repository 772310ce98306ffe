//! 翻译系统核心模块
//!
//! - **后端层** (`backend.rs`): 可替换的翻译能力和默认的词典后端
//! - **协调层** (`coordinator.rs`): 分类、缓存、后端调用的编排与启用开关
//!
//! ```text
//! TranslationCoordinator (coordinator.rs)
//!     ├── is_destination_language_only / is_script_native (pipeline/filters.rs)
//!     ├── TranslationCache (storage/cache.rs)
//!     └── TranslationBackend (backend.rs)
//!             └── DictionaryBackend
//! ```

pub mod backend;
pub mod coordinator;

pub use backend::{DictionaryBackend, TranslationBackend};
pub use coordinator::{CoordinatorStats, StatsSnapshot, TranslationCoordinator};
