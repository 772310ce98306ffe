// 集成测试公共模块
//
// 提供测试用的翻译后端和宿主实现

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use haas_translator::host::{ContentTransform, HostBridge};
use haas_translator::translation::{
    DictionaryBackend, TranslationBackend, TranslationError, TranslationResult,
};

/// 记录调用次数的词典后端，可选延迟
pub struct CountingBackend {
    inner: DictionaryBackend,
    calls: AtomicUsize,
    delay: Duration,
}

impl CountingBackend {
    pub fn new() -> Arc<Self> {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            inner: DictionaryBackend::new(),
            calls: AtomicUsize::new(0),
            delay,
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TranslationBackend for CountingBackend {
    fn name(&self) -> &str {
        "counting"
    }

    async fn translate(&self, text: &str, target_lang: &str) -> TranslationResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.inner.translate(text, target_lang).await
    }
}

/// 总是失败的后端
pub struct FailingBackend {
    pub calls: AtomicUsize,
}

impl FailingBackend {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl TranslationBackend for FailingBackend {
    fn name(&self) -> &str {
        "failing"
    }

    async fn translate(&self, _text: &str, _target_lang: &str) -> TranslationResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TranslationError::BackendFailure("connection refused".to_string()))
    }
}

/// 记录所有交互的宿主
#[derive(Default)]
pub struct RecordingBridge {
    pub transforms: Mutex<HashMap<String, ContentTransform>>,
    pub rendered: Mutex<HashMap<String, String>>,
    pub posted: Mutex<Vec<(String, Value)>>,
    pub notifications: Mutex<Vec<String>>,
    pub settings: Mutex<HashMap<String, bool>>,
    pub refuse_hooks: AtomicBool,
    pub refuse_settings: AtomicBool,
}

impl RecordingBridge {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn rendered(&self, surface_id: &str) -> Option<String> {
        self.rendered.lock().unwrap().get(surface_id).cloned()
    }

    pub fn posted(&self) -> Vec<(String, Value)> {
        self.posted.lock().unwrap().clone()
    }

    pub fn notifications(&self) -> Vec<String> {
        self.notifications.lock().unwrap().clone()
    }

    pub fn setting(&self, key: &str) -> Option<bool> {
        self.settings.lock().unwrap().get(key).copied()
    }
}

impl HostBridge for RecordingBridge {
    fn set_surface_content(&self, surface_id: &str, html: &str) -> TranslationResult<()> {
        let transform = self.transforms.lock().unwrap().get(surface_id).cloned();
        let rendered = match transform {
            Some(transform) => transform(html),
            None => html.to_string(),
        };
        self.rendered
            .lock()
            .unwrap()
            .insert(surface_id.to_string(), rendered);
        Ok(())
    }

    fn post_message(&self, surface_id: &str, payload: Value) -> TranslationResult<()> {
        self.posted
            .lock()
            .unwrap()
            .push((surface_id.to_string(), payload));
        Ok(())
    }

    fn show_notification(&self, text: &str) {
        self.notifications.lock().unwrap().push(text.to_string());
    }

    fn before_set_content(&self, surface_id: &str, transform: ContentTransform) -> TranslationResult<()> {
        if self.refuse_hooks.load(Ordering::SeqCst) {
            return Err(TranslationError::HostIntegration(
                "html property is not configurable".to_string(),
            ));
        }
        self.transforms
            .lock()
            .unwrap()
            .insert(surface_id.to_string(), transform);
        Ok(())
    }

    fn persist_setting(&self, key: &str, value: bool) -> TranslationResult<()> {
        if self.refuse_settings.load(Ordering::SeqCst) {
            return Err(TranslationError::HostIntegration("settings are read-only".to_string()));
        }
        self.settings.lock().unwrap().insert(key.to_string(), value);
        Ok(())
    }
}
