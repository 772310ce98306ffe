//! 翻译后端
//!
//! `TranslationBackend` 是可替换的翻译能力。协调器只依赖这个 trait，
//! 生产环境可以换成真正调用翻译服务的实现。
//!
//! 约定：
//! - 不修改输入文本
//! - 在有限时间内返回成功或失败
//! - 失败由调用方处理为"没有可用翻译"，不会展示给用户

use std::collections::HashMap;

use async_trait::async_trait;

use crate::translation::config::constants;
use crate::translation::error::TranslationResult;
use crate::translation::pipeline::filters::is_script_native;

/// 翻译后端能力
#[async_trait]
pub trait TranslationBackend: Send + Sync {
    /// 后端名称，用于日志
    fn name(&self) -> &str;

    /// 将 `text` 翻译为 `target_lang`
    async fn translate(&self, text: &str, target_lang: &str) -> TranslationResult<String>;
}

/// HAAS Studio 界面术语表
const GLOSSARY: &[(&str, &str)] = &[
    ("配置", "Configuration"),
    ("编译", "Compile"),
    ("烧录", "Flash/Burn"),
    ("串口监视器", "Serial Monitor"),
    ("清理", "Clean"),
    ("项目", "Project"),
    ("文件", "File"),
    ("编辑", "Edit"),
    ("查看", "View"),
    ("帮助", "Help"),
    ("工具", "Tools"),
    ("调试", "Debug"),
    ("运行", "Run"),
    ("设置", "Settings"),
    ("保存", "Save"),
    ("打开", "Open"),
    ("新建", "New"),
    ("删除", "Delete"),
    ("复制", "Copy"),
    ("粘贴", "Paste"),
    ("搜索", "Search"),
    ("替换", "Replace"),
];

/// 词典查找 + 前缀标记兜底的默认后端
///
/// 1. 修剪输入
/// 2. 命中术语表则返回对应译文
/// 3. 否则若包含中文，返回 `marker + 修剪后文本`
/// 4. 否则原样返回输入
///
/// 从不失败，也不进行网络访问。
#[derive(Debug, Clone)]
pub struct DictionaryBackend {
    dictionary: HashMap<String, String>,
    marker: String,
}

impl DictionaryBackend {
    pub fn new() -> Self {
        Self::with_marker(constants::DEFAULT_FALLBACK_MARKER)
    }

    pub fn with_marker(marker: &str) -> Self {
        let dictionary = GLOSSARY
            .iter()
            .map(|(zh, en)| (zh.to_string(), en.to_string()))
            .collect();

        Self {
            dictionary,
            marker: marker.to_string(),
        }
    }

    /// 追加或覆盖术语
    pub fn with_entries<I, K, V>(mut self, entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.dictionary
            .extend(entries.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn len(&self) -> usize {
        self.dictionary.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dictionary.is_empty()
    }

    /// 同步查找，供非异步场景复用
    pub fn lookup(&self, text: &str) -> String {
        let trimmed = text.trim();

        if let Some(mapped) = self.dictionary.get(trimmed) {
            return mapped.clone();
        }

        if is_script_native(trimmed) {
            return format!("{}{}", self.marker, trimmed);
        }

        text.to_string()
    }
}

impl Default for DictionaryBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TranslationBackend for DictionaryBackend {
    fn name(&self) -> &str {
        "dictionary"
    }

    async fn translate(&self, text: &str, _target_lang: &str) -> TranslationResult<String> {
        Ok(self.lookup(text))
    }
}
