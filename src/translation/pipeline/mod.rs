//! 文本处理管道：分类与收集

pub mod collector;
pub mod filters;

pub use collector::{TextCollector, TextItem};
pub use filters::{is_destination_language_only, is_script_native, TextAnalysis};
