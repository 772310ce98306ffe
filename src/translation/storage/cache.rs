//! 翻译缓存模块
//!
//! 原文到译文的精确匹配缓存。键不做任何修剪或规范化，
//! 默认容量不限、生命周期与进程相同；配置了上限时按最久未访问淘汰。

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use std::time::Instant;

// ============================================================================
// 核心类型
// ============================================================================

/// 缓存中的一条翻译记录，创建后不可变
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationEntry {
    pub original_text: String,
    pub translated_text: String,
}

/// 缓存配置
#[derive(Debug, Clone, Default)]
pub struct CacheConfig {
    /// 最大条目数，0 表示不限制
    pub max_entries: usize,
}

impl CacheConfig {
    pub fn unbounded() -> Self {
        Self { max_entries: 0 }
    }

    pub fn bounded(max_entries: usize) -> Self {
        Self { max_entries }
    }

    pub fn is_bounded(&self) -> bool {
        self.max_entries > 0
    }
}

/// 缓存统计信息
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CacheStats {
    pub total_requests: u64,
    pub cache_hits: u64,
    pub cache_misses: u64,
    pub total_entries: usize,
    pub evictions: u64,
}

struct Slot {
    entry: TranslationEntry,
    last_accessed: Instant,
}

#[derive(Default)]
struct Inner {
    slots: HashMap<String, Slot>,
    stats: CacheStats,
}

/// 翻译缓存
pub struct TranslationCache {
    inner: RwLock<Inner>,
    config: CacheConfig,
}

// ============================================================================
// 实现
// ============================================================================

impl TranslationCache {
    /// 创建不限容量的缓存
    pub fn new() -> Self {
        Self::with_config(CacheConfig::unbounded())
    }

    /// 使用指定配置创建缓存
    pub fn with_config(config: CacheConfig) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            config,
        }
    }

    /// 获取缓存条目
    pub fn get(&self, text: &str) -> Option<String> {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.stats.total_requests += 1;

        let hit = inner.slots.get_mut(text).map(|slot| {
            slot.last_accessed = Instant::now();
            slot.entry.translated_text.clone()
        });

        if hit.is_some() {
            inner.stats.cache_hits += 1;
        } else {
            inner.stats.cache_misses += 1;
        }
        hit
    }

    /// 插入缓存条目；键已存在时保留旧值，保证同一键多次查询结果一致
    pub fn insert(&self, original: String, translated: String) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);

        if inner.slots.contains_key(&original) {
            return;
        }

        if self.config.is_bounded() && inner.slots.len() >= self.config.max_entries {
            Self::evict_lru(&mut inner);
        }

        let slot = Slot {
            entry: TranslationEntry {
                original_text: original.clone(),
                translated_text: translated,
            },
            last_accessed: Instant::now(),
        };
        inner.slots.insert(original, slot);
        inner.stats.total_entries = inner.slots.len();
    }

    /// 检查是否包含指定键（不计入统计）
    pub fn contains_key(&self, key: &str) -> bool {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.slots.contains_key(key)
    }

    pub fn len(&self) -> usize {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 清空缓存
    pub fn clear(&self) {
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        inner.slots.clear();
        inner.stats.total_entries = 0;
    }

    /// 获取统计信息
    pub fn stats(&self) -> CacheStats {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        let mut result = inner.stats.clone();
        result.total_entries = inner.slots.len();
        result
    }

    /// 所有条目的快照
    pub fn entries(&self) -> Vec<TranslationEntry> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.slots.values().map(|slot| slot.entry.clone()).collect()
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// LRU驱逐算法
    fn evict_lru(inner: &mut Inner) {
        let oldest_key = inner
            .slots
            .iter()
            .min_by_key(|(_, slot)| slot.last_accessed)
            .map(|(key, _)| key.clone());

        if let Some(key) = oldest_key {
            inner.slots.remove(&key);
            inner.stats.evictions += 1;
            tracing::debug!("缓存已满，淘汰条目: {}", key);
        }
    }
}

impl Default for TranslationCache {
    fn default() -> Self {
        Self::new()
    }
}

impl CacheStats {
    /// 计算缓存命中率
    pub fn hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            self.cache_hits as f64 / self.total_requests as f64
        }
    }
}
