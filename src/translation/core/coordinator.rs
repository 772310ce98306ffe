//! 翻译协调器
//!
//! 串联 分类 -> 缓存查询 -> 后端调用 -> 缓存写入，并持有启用开关。
//! 缓存和启用状态只由协调器修改；外部通过共享的 `Arc<TranslationCoordinator>` 使用它。
//!
//! `translate_text` 的步骤：
//!
//! 1. 未启用或修剪后为空：原样返回，不访问缓存和后端
//! 2. 仅包含目标语言字符：原样返回（快速路径，不写缓存）
//! 3. 原文（未修剪）已在缓存中：返回缓存值
//! 4. 含中文：调用后端；成功则写缓存并返回，失败则记录日志并返回原文
//! 5. 其他情况原样返回
//!
//! 同一段未缓存文本的并发请求共享同一次后端调用。

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{BoxFuture, FutureExt, Shared};

use super::backend::{DictionaryBackend, TranslationBackend};
use crate::translation::config::{constants, TranslatorConfig};
use crate::translation::error::TranslationResult;
use crate::translation::pipeline::filters::{is_destination_language_only, is_script_native};
use crate::translation::storage::cache::{CacheConfig, TranslationCache};

type InFlight = Shared<BoxFuture<'static, TranslationResult<String>>>;

/// 翻译协调器
pub struct TranslationCoordinator {
    enabled: AtomicBool,
    cache: TranslationCache,
    backend: Arc<dyn TranslationBackend>,
    target_lang: String,
    in_flight: Mutex<HashMap<String, InFlight>>,
    stats: CoordinatorStats,
}

impl TranslationCoordinator {
    /// 使用给定后端和默认设置创建协调器（启用、缓存不限容量、目标语言 en）
    pub fn new(backend: Arc<dyn TranslationBackend>) -> Self {
        Self::with_parts(
            backend,
            TranslationCache::new(),
            constants::DEFAULT_TARGET_LANG,
            true,
        )
    }

    /// 按配置创建，后端使用词典后端
    pub fn from_config(config: &TranslatorConfig) -> Self {
        let backend = Arc::new(DictionaryBackend::with_marker(&config.fallback_marker));
        Self::with_backend_and_config(backend, config)
    }

    /// 按配置创建，使用自定义后端
    pub fn with_backend_and_config(
        backend: Arc<dyn TranslationBackend>,
        config: &TranslatorConfig,
    ) -> Self {
        let cache = TranslationCache::with_config(CacheConfig {
            max_entries: config.cache_max_entries,
        });
        Self::with_parts(backend, cache, &config.target_lang, config.enabled)
    }

    fn with_parts(
        backend: Arc<dyn TranslationBackend>,
        cache: TranslationCache,
        target_lang: &str,
        enabled: bool,
    ) -> Self {
        tracing::info!(
            "创建翻译协调器: 后端={}, 目标语言={}, 启用={}",
            backend.name(),
            target_lang,
            enabled
        );

        Self {
            enabled: AtomicBool::new(enabled),
            cache,
            backend,
            target_lang: target_lang.to_string(),
            in_flight: Mutex::new(HashMap::new()),
            stats: CoordinatorStats::default(),
        }
    }

    /// 设置启用状态，幂等
    pub fn set_enabled(&self, enabled: bool) {
        let previous = self.enabled.swap(enabled, Ordering::SeqCst);
        if previous != enabled {
            tracing::info!("自动翻译已{}", if enabled { "启用" } else { "禁用" });
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::SeqCst)
    }

    /// 翻译一段文本；任何失败都退化为返回原文
    pub async fn translate_text(&self, text: &str) -> String {
        if !self.is_enabled() || text.trim().is_empty() {
            return text.to_string();
        }

        self.stats.requests.fetch_add(1, Ordering::Relaxed);

        if is_destination_language_only(text) {
            self.stats.fast_path_skips.fetch_add(1, Ordering::Relaxed);
            return text.to_string();
        }

        if let Some(cached) = self.cache.get(text) {
            self.stats.cache_hits.fetch_add(1, Ordering::Relaxed);
            tracing::debug!("缓存命中: {}", text);
            return cached;
        }

        if is_script_native(text) {
            return self.translate_uncached(text).await;
        }

        text.to_string()
    }

    async fn translate_uncached(&self, text: &str) -> String {
        let flight = self.join_or_start_flight(text);

        match flight.await {
            Ok(translated) => {
                // 先写缓存再移除在途记录，之后的请求直接命中缓存
                self.cache.insert(text.to_string(), translated.clone());
                self.finish_flight(text);
                translated
            }
            Err(e) => {
                self.finish_flight(text);
                tracing::warn!("翻译失败，保留原文: {} ({})", text, e);
                text.to_string()
            }
        }
    }

    fn join_or_start_flight(&self, text: &str) -> InFlight {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(existing) = in_flight.get(text) {
            self.stats.coalesced.fetch_add(1, Ordering::Relaxed);
            return existing.clone();
        }

        self.stats.backend_calls.fetch_add(1, Ordering::Relaxed);

        let backend = Arc::clone(&self.backend);
        let owned_text = text.to_string();
        let target_lang = self.target_lang.clone();
        let failures = self.stats.backend_failures.clone();

        let flight = async move {
            let result = backend.translate(&owned_text, &target_lang).await;
            if result.is_err() {
                failures.fetch_add(1, Ordering::Relaxed);
            }
            result
        }
        .boxed()
        .shared();

        in_flight.insert(text.to_string(), flight.clone());
        flight
    }

    fn finish_flight(&self, text: &str) {
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);
        in_flight.remove(text);
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }

    pub fn target_lang(&self) -> &str {
        &self.target_lang
    }

    pub fn stats(&self) -> &CoordinatorStats {
        &self.stats
    }
}

/// 协调器统计信息（原子计数）
#[derive(Debug, Default)]
pub struct CoordinatorStats {
    /// 进入分类流程的请求数（不含禁用和空白输入）
    pub requests: AtomicU64,
    pub fast_path_skips: AtomicU64,
    pub cache_hits: AtomicU64,
    pub backend_calls: AtomicU64,
    /// 加入已有在途调用的请求数
    pub coalesced: AtomicU64,
    pub backend_failures: Arc<AtomicU64>,
}

/// 统计信息快照
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub requests: u64,
    pub fast_path_skips: u64,
    pub cache_hits: u64,
    pub backend_calls: u64,
    pub coalesced: u64,
    pub backend_failures: u64,
}

impl CoordinatorStats {
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            requests: self.requests.load(Ordering::Relaxed),
            fast_path_skips: self.fast_path_skips.load(Ordering::Relaxed),
            cache_hits: self.cache_hits.load(Ordering::Relaxed),
            backend_calls: self.backend_calls.load(Ordering::Relaxed),
            coalesced: self.coalesced.load(Ordering::Relaxed),
            backend_failures: self.backend_failures.load(Ordering::Relaxed),
        }
    }
}
