//! 翻译配置管理模块
//!
//! 提供简化的配置管理，支持环境变量、配置文件和默认值

pub mod manager;

// 重新导出主要类型
pub use manager::{ConfigManager, TranslatorConfig};

/// 配置常量
pub mod constants {
    // 文字分类相关（中日韩统一表意文字基本区）
    pub const SCRIPT_RANGE_START: char = '\u{4e00}';
    pub const SCRIPT_RANGE_END: char = '\u{9fff}';

    /// 目标语言允许出现的标点符号
    pub const DESTINATION_PUNCTUATION: &str = ".,!?;:'\"()-_@#$%^&*+=<>{}[]|\\/`~";

    // 翻译相关
    pub const DEFAULT_TARGET_LANG: &str = "en";
    pub const DEFAULT_FALLBACK_MARKER: &str = "[EN] ";

    // 注入脚本相关
    pub const DEFAULT_SETTLE_DELAY_MS: u64 = 1000;
    pub const MAX_SETTLE_DELAY_MS: u64 = 60_000;
    pub const INJECTION_ANCHOR: &str = "</body>";

    // 缓存设置（0 表示不限制）
    pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 0;

    // 宿主集成相关
    pub const SETTINGS_SECTION: &str = "haasStudioTranslator";
    pub const ENABLED_SETTING_KEY: &str = "enabled";
    pub const PRODUCT_MARKERS: &[&str] = &["haas", "HAAS", "HaaS"];

    // 收集时跳过的元素
    pub const SKIP_ELEMENTS: &[&str] = &["script", "style", "noscript", "template"];

    // 配置文件搜索路径
    pub const CONFIG_PATHS: &[&str] = &[
        "haas-translator.toml",
        ".haas-translator.toml",
        "haas-translator.json",
        "~/.config/haas-translator/config.toml",
    ];
}
