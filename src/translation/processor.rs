//! 内容改写模块
//!
//! 在宿主设置界面内容之前，把翻译覆盖脚本注入到 HTML 中。
//! 只做字符串级别的插入，不在宿主侧解析 DOM。
//!
//! 注入点是文档结尾 `</html>` 之前的最后一个 `</body>`。缺少任一标签时内容原样返回。

use std::sync::Arc;

use crate::translation::config::{constants, TranslatorConfig};
use crate::translation::core::TranslationCoordinator;
use crate::translation::error::{TranslationError, TranslationResult};

const OVERLAY_TEMPLATE: &str = include_str!("../../templates/overlay.js");
const SETTLE_DELAY_PLACEHOLDER: &str = "__SETTLE_DELAY_MS__";
const ROOT_CLOSE_TAG: &str = "</html>";

/// 内容改写器
pub struct ContentRewriter {
    coordinator: Arc<TranslationCoordinator>,
    fragment: String,
}

impl ContentRewriter {
    pub fn new(coordinator: Arc<TranslationCoordinator>) -> Self {
        Self::with_settle_delay(coordinator, constants::DEFAULT_SETTLE_DELAY_MS)
    }

    pub fn from_config(coordinator: Arc<TranslationCoordinator>, config: &TranslatorConfig) -> Self {
        Self::with_settle_delay(coordinator, config.settle_delay_ms)
    }

    pub fn with_settle_delay(coordinator: Arc<TranslationCoordinator>, settle_delay_ms: u64) -> Self {
        Self {
            coordinator,
            fragment: render_fragment(settle_delay_ms),
        }
    }

    /// 注入的脚本片段
    pub fn fragment(&self) -> &str {
        &self.fragment
    }

    /// 注入覆盖脚本；禁用时或找不到注入点时原样返回
    pub fn augment_content(&self, markup: &str) -> String {
        if !self.coordinator.is_enabled() {
            return markup.to_string();
        }

        match self.try_augment(markup) {
            Ok(augmented) => augmented,
            Err(e) => {
                tracing::info!("跳过脚本注入: {}", e);
                markup.to_string()
            }
        }
    }

    /// 注入覆盖脚本，找不到注入点时返回 `MalformedContent`（不检查启用状态）
    pub fn try_augment(&self, markup: &str) -> TranslationResult<String> {
        let at = injection_point(markup).ok_or_else(|| {
            TranslationError::MalformedContent(format!(
                "缺少 {} 或 {}",
                constants::INJECTION_ANCHOR,
                ROOT_CLOSE_TAG
            ))
        })?;

        let mut augmented = String::with_capacity(markup.len() + self.fragment.len());
        augmented.push_str(&markup[..at]);
        augmented.push_str(&self.fragment);
        augmented.push_str(&markup[at..]);
        Ok(augmented)
    }
}

fn render_fragment(settle_delay_ms: u64) -> String {
    let script = OVERLAY_TEMPLATE.replace(SETTLE_DELAY_PLACEHOLDER, &settle_delay_ms.to_string());
    format!("<script>\n{}</script>", script)
}

/// `</html>` 之前最后一个 `</body>` 的字节偏移（忽略 ASCII 大小写）
fn injection_point(markup: &str) -> Option<usize> {
    // ASCII 小写化不改变字节偏移
    let lowered = markup.to_ascii_lowercase();
    let root_close = lowered.rfind(ROOT_CLOSE_TAG)?;
    lowered[..root_close].rfind(constants::INJECTION_ANCHOR)
}
