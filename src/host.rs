//! 宿主集成
//!
//! `HostBridge` 是渲染宿主（编辑器里的 webview）暴露给翻译核心的窄接口；
//! `TranslatorHost` 把宿主事件接到协调器和内容改写器上。
//!
//! 核心不修改宿主内部实现：需要拦截界面内容时，通过
//! `HostBridge::before_set_content` 注册一个转换函数。

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::translation::config::{constants, TranslatorConfig};
use crate::translation::core::{DictionaryBackend, TranslationBackend, TranslationCoordinator};
use crate::translation::error::{helpers, TranslationResult};
use crate::translation::pipeline::collector::TextCollector;
use crate::translation::processor::ContentRewriter;

/// 设置界面内容前执行的转换
pub type ContentTransform = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// 渲染宿主提供的能力
pub trait HostBridge: Send + Sync {
    /// 设置界面内容；已注册的转换函数由宿主在真正渲染前执行
    fn set_surface_content(&self, surface_id: &str, html: &str) -> TranslationResult<()>;

    /// 向界面发送消息
    fn post_message(&self, surface_id: &str, payload: serde_json::Value) -> TranslationResult<()>;

    /// 显示通知
    fn show_notification(&self, text: &str);

    /// 注册内容转换钩子
    fn before_set_content(&self, surface_id: &str, transform: ContentTransform) -> TranslationResult<()>;

    /// 持久化一个布尔设置
    fn persist_setting(&self, key: &str, value: bool) -> TranslationResult<()>;
}

/// 界面与核心之间的消息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command")]
pub enum SurfaceMessage {
    /// 界面请求翻译
    #[serde(rename = "translate", rename_all = "camelCase")]
    Translate {
        text: String,
        #[serde(default)]
        node_id: String,
    },
    /// 核心返回翻译结果
    #[serde(rename = "translationResult", rename_all = "camelCase")]
    TranslationResult {
        original_text: String,
        translated_text: String,
        node_id: String,
    },
}

impl SurfaceMessage {
    pub fn to_value(&self) -> TranslationResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }

    pub fn from_value(value: serde_json::Value) -> TranslationResult<Self> {
        Ok(serde_json::from_value(value)?)
    }
}

/// 已接管的界面；`content` 是最近一次设置的原始内容（注入前）
type SurfaceTable = Arc<Mutex<HashMap<String, Option<String>>>>;

/// 宿主侧胶水：事件分发、命令实现
pub struct TranslatorHost {
    bridge: Arc<dyn HostBridge>,
    coordinator: Arc<TranslationCoordinator>,
    rewriter: Arc<ContentRewriter>,
    collector: TextCollector,
    config: TranslatorConfig,
    surfaces: SurfaceTable,
    /// 创建时所在的运行时；宿主从运行时之外投递消息时使用
    runtime: Option<Handle>,
}

impl TranslatorHost {
    /// 使用词典后端创建
    pub fn new(bridge: Arc<dyn HostBridge>, config: TranslatorConfig) -> Self {
        let backend = Arc::new(DictionaryBackend::with_marker(&config.fallback_marker));
        Self::with_backend(bridge, backend, config)
    }

    pub fn with_backend(
        bridge: Arc<dyn HostBridge>,
        backend: Arc<dyn TranslationBackend>,
        config: TranslatorConfig,
    ) -> Self {
        let coordinator = Arc::new(TranslationCoordinator::with_backend_and_config(backend, &config));
        let rewriter = Arc::new(ContentRewriter::from_config(Arc::clone(&coordinator), &config));

        Self {
            bridge,
            coordinator,
            rewriter,
            collector: TextCollector::new(),
            config,
            surfaces: Arc::new(Mutex::new(HashMap::new())),
            runtime: Handle::try_current().ok(),
        }
    }

    pub fn coordinator(&self) -> &Arc<TranslationCoordinator> {
        &self.coordinator
    }

    pub fn rewriter(&self) -> &Arc<ContentRewriter> {
        &self.rewriter
    }

    pub fn activate(&self) {
        tracing::info!("翻译覆盖层已激活");
        self.bridge.show_notification("HAAS Studio Auto Translator activated!");
    }

    /// 宿主配置变化；只处理启用开关，返回是否处理
    pub fn on_configuration_changed(&self, key: &str, new_value: &serde_json::Value) -> bool {
        let qualified = format!("{}.{}", constants::SETTINGS_SECTION, self.config.setting_key);
        if key != self.config.setting_key && key != qualified {
            return false;
        }

        match new_value.as_bool() {
            Some(enabled) => {
                self.coordinator.set_enabled(enabled);
                true
            }
            None => {
                tracing::warn!("忽略非布尔的启用设置: {} = {}", key, new_value);
                false
            }
        }
    }

    /// 界面类型或标题包含产品标识时才接管
    pub fn should_instrument(&self, view_type: &str, title: &str) -> bool {
        self.config
            .product_markers
            .iter()
            .filter(|marker| !marker.is_empty())
            .any(|marker| view_type.contains(marker.as_str()) || title.contains(marker.as_str()))
    }

    /// 新界面创建；返回是否已接管
    pub fn on_webview_created(&self, surface_id: &str, view_type: &str, title: &str) -> bool {
        if !self.should_instrument(view_type, title) {
            return false;
        }

        let rewriter = Arc::clone(&self.rewriter);
        let surfaces = Arc::clone(&self.surfaces);
        let id = surface_id.to_string();
        let transform: ContentTransform = Arc::new(move |markup: &str| {
            if let Some(slot) = surfaces
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .get_mut(&id)
            {
                *slot = Some(markup.to_string());
            }
            rewriter.augment_content(markup)
        });

        // 先登记再注册钩子，保证钩子第一次执行时就能记录内容
        self.surfaces_lock().insert(surface_id.to_string(), None);

        if let Err(e) = self.bridge.before_set_content(surface_id, transform) {
            self.surfaces_lock().remove(surface_id);
            helpers::log_error(&e.with_context(format!("界面 {} 未接管", surface_id)));
            return false;
        }

        tracing::info!("已接管界面 {} ({}: {})", surface_id, view_type, title);
        true
    }

    pub fn on_surface_disposed(&self, surface_id: &str) {
        if self.surfaces_lock().remove(surface_id).is_some() {
            tracing::debug!("界面 {} 已释放", surface_id);
        }
    }

    pub fn is_instrumented(&self, surface_id: &str) -> bool {
        self.surfaces_lock().contains_key(surface_id)
    }

    /// 处理界面发来的消息；翻译请求在独立任务中完成并回发结果
    ///
    /// 任务优先提交到当前运行时，否则提交到创建时的运行时；两者都没有时丢弃请求。
    pub fn handle_message(&self, surface_id: &str, payload: serde_json::Value) -> Option<JoinHandle<()>> {
        if !self.is_instrumented(surface_id) {
            tracing::debug!("忽略未接管界面 {} 的消息", surface_id);
            return None;
        }

        let (text, node_id) = match SurfaceMessage::from_value(payload) {
            Ok(SurfaceMessage::Translate { text, node_id }) => (text, node_id),
            Ok(other) => {
                tracing::debug!("忽略界面 {} 的消息: {:?}", surface_id, other);
                return None;
            }
            Err(e) => {
                tracing::debug!("无法解析界面 {} 的消息: {}", surface_id, e);
                return None;
            }
        };

        let Some(runtime) = Handle::try_current().ok().or_else(|| self.runtime.clone()) else {
            tracing::warn!("没有可用的 tokio 运行时，丢弃界面 {} 的翻译请求", surface_id);
            return None;
        };

        let coordinator = Arc::clone(&self.coordinator);
        let bridge = Arc::clone(&self.bridge);
        let surface_id = surface_id.to_string();

        Some(runtime.spawn(async move {
            let translated_text = coordinator.translate_text(&text).await;
            let reply = SurfaceMessage::TranslationResult {
                original_text: text,
                translated_text,
                node_id,
            };

            let posted = reply
                .to_value()
                .and_then(|payload| bridge.post_message(&surface_id, payload));
            if let Err(e) = posted {
                helpers::log_error(&e.with_context(format!("回发界面 {}", surface_id)));
            }
        }))
    }

    /// 持续处理一个界面的消息通道，直到发送端关闭
    pub async fn run_surface(&self, surface_id: &str, mut rx: mpsc::Receiver<serde_json::Value>) {
        while let Some(payload) = rx.recv().await {
            self.handle_message(surface_id, payload);
        }
        tracing::debug!("界面 {} 的消息通道已关闭", surface_id);
    }

    /// 立即翻译所有已接管界面的当前内容
    ///
    /// 预先翻译每个界面中的中文文本并写入缓存，然后重新设置有译文的界面内容，
    /// 让注入脚本重新扫描，请求直接命中缓存。返回得到译文的文本数；
    /// 未启用时不做任何事并返回 0。
    pub async fn translate_all(&self) -> usize {
        if !self.coordinator.is_enabled() {
            tracing::info!("自动翻译已禁用，跳过全部翻译");
            return 0;
        }

        self.bridge.show_notification("Translating HAAS Studio content...");

        let snapshot: Vec<(String, String)> = self
            .surfaces_lock()
            .iter()
            .filter_map(|(id, content)| content.clone().map(|c| (id.clone(), c)))
            .collect();

        let mut translated = 0;
        for (surface_id, content) in snapshot {
            let items = match self.collector.collect(&content) {
                Ok(items) => items,
                Err(e) => {
                    helpers::log_error(&e.with_context(format!("界面 {}", surface_id)));
                    continue;
                }
            };

            let mut surface_translated = 0;
            for item in &items {
                if self.coordinator.translate_text(&item.text).await != item.text {
                    surface_translated += 1;
                }
            }
            if surface_translated == 0 {
                continue;
            }
            translated += surface_translated;

            if let Err(e) = self.bridge.set_surface_content(&surface_id, &content) {
                helpers::log_error(&e.with_context(format!("刷新界面 {}", surface_id)));
            }
        }

        tracing::info!("全部翻译完成，共 {} 个文本", translated);
        self.bridge.show_notification(if translated > 0 {
            "Translation completed!"
        } else {
            "No HAAS Studio content could be translated"
        });
        translated
    }

    /// 切换自动翻译，同时更新持久化设置和运行时状态；返回新状态
    pub fn toggle_auto_translate(&self) -> bool {
        let enabled = !self.coordinator.is_enabled();

        if let Err(e) = self.bridge.persist_setting(&self.config.setting_key, enabled) {
            tracing::warn!("保存启用设置失败: {}", e);
        }
        self.coordinator.set_enabled(enabled);

        self.bridge.show_notification(if enabled {
            "Auto-translation enabled"
        } else {
            "Auto-translation disabled"
        });
        enabled
    }

    fn surfaces_lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, Option<String>>> {
        self.surfaces.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_wire_format() {
        let request: SurfaceMessage =
            serde_json::from_value(json!({"command": "translate", "text": "配置", "nodeId": "a#1"}))
                .unwrap();
        assert_eq!(
            request,
            SurfaceMessage::Translate {
                text: "配置".to_string(),
                node_id: "a#1".to_string()
            }
        );

        let reply = SurfaceMessage::TranslationResult {
            original_text: "配置".to_string(),
            translated_text: "Configuration".to_string(),
            node_id: "a#1".to_string(),
        };
        assert_eq!(
            reply.to_value().unwrap(),
            json!({
                "command": "translationResult",
                "originalText": "配置",
                "translatedText": "Configuration",
                "nodeId": "a#1"
            })
        );
    }

    #[test]
    fn test_missing_node_id_defaults_to_empty() {
        let request = SurfaceMessage::from_value(json!({"command": "translate", "text": "编译"})).unwrap();
        assert!(matches!(request, SurfaceMessage::Translate { node_id, .. } if node_id.is_empty()));
    }

    #[test]
    fn test_unknown_command_is_error() {
        assert!(SurfaceMessage::from_value(json!({"command": "reload"})).is_err());
    }
}
