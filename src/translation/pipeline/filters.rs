//! 文本分类模块
//!
//! 判断一段文本是否需要翻译。两个判定相互独立，并不互补：
//! 同时含有中文与英文字符的文本既是"待翻译文本"，也不会被"仅目标语言"快速路径跳过。

use std::sync::OnceLock;

use regex::Regex;

use crate::translation::config::constants;

/// 文本是否包含源文字（中日韩统一表意文字 U+4E00–U+9FFF）
///
/// 空串与纯空白返回 false。不做任何规范化。
pub fn is_script_native(text: &str) -> bool {
    text.chars()
        .any(|c| (constants::SCRIPT_RANGE_START..=constants::SCRIPT_RANGE_END).contains(&c))
}

/// 去除首尾空白后，文本是否只由基本拉丁字母、数字、空白和固定标点组成
///
/// 用作快速路径：满足该条件的内容永远不会送往翻译后端。
pub fn is_destination_language_only(text: &str) -> bool {
    destination_regex().is_match(text.trim())
}

fn destination_regex() -> &'static Regex {
    static DESTINATION_REGEX: OnceLock<Regex> = OnceLock::new();
    DESTINATION_REGEX.get_or_init(|| {
        let pattern = format!(
            r"^[a-zA-Z0-9\s{}]*$",
            regex::escape(constants::DESTINATION_PUNCTUATION)
        );
        Regex::new(&pattern).unwrap_or_else(|_| Regex::new(r"^$").expect("static pattern"))
    })
}

/// 单段文本的分类结果，按需计算，不做存储
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextAnalysis {
    pub script_native: bool,
    pub destination_only: bool,
}

impl TextAnalysis {
    pub fn of(text: &str) -> Self {
        Self {
            script_native: is_script_native(text),
            destination_only: is_destination_language_only(text),
        }
    }

    /// 是否应该交给协调器翻译
    pub fn is_candidate(&self) -> bool {
        self.script_native && !self.destination_only
    }
}
