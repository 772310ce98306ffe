//! 简化的配置管理器
//!
//! 提供统一的配置接口，支持文件配置、环境变量和默认值

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::constants;
use crate::translation::error::{helpers, TranslationResult};

/// 翻译覆盖层配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct TranslatorConfig {
    // 基础配置
    pub enabled: bool,
    pub target_lang: String,
    pub fallback_marker: String,

    // 注入脚本配置
    pub settle_delay_ms: u64,

    // 缓存配置
    pub cache_max_entries: usize,

    // 宿主集成
    pub product_markers: Vec<String>,
    pub setting_key: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            target_lang: constants::DEFAULT_TARGET_LANG.to_string(),
            fallback_marker: constants::DEFAULT_FALLBACK_MARKER.to_string(),

            settle_delay_ms: constants::DEFAULT_SETTLE_DELAY_MS,

            cache_max_entries: constants::DEFAULT_CACHE_MAX_ENTRIES,

            product_markers: constants::PRODUCT_MARKERS
                .iter()
                .map(|s| s.to_string())
                .collect(),
            setting_key: constants::ENABLED_SETTING_KEY.to_string(),
        }
    }
}

impl TranslatorConfig {
    /// 验证配置
    pub fn validate(&self) -> TranslationResult<()> {
        if self.target_lang.trim().is_empty() {
            return Err(helpers::config_error("目标语言不能为空"));
        }

        if self.settle_delay_ms > constants::MAX_SETTLE_DELAY_MS {
            return Err(helpers::config_error(format!(
                "首次扫描延迟过长: {}ms (最大 {}ms)",
                self.settle_delay_ms,
                constants::MAX_SETTLE_DELAY_MS
            )));
        }

        if self.product_markers.iter().all(|m| m.trim().is_empty()) {
            return Err(helpers::config_error("产品标识不能为空"));
        }

        Ok(())
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) {
        use crate::env::{cache, translation, EnvVar};

        if let Some(enabled) = translation::Enabled::get_explicit() {
            self.enabled = enabled;
        }

        if let Some(target_lang) = translation::TargetLang::get_explicit() {
            self.target_lang = target_lang;
        }

        if let Some(marker) = translation::FallbackMarker::get_explicit() {
            self.fallback_marker = marker;
        }

        if let Some(delay) = translation::SettleDelay::get_explicit() {
            self.settle_delay_ms = delay.as_millis() as u64;
        }

        if let Some(max_entries) = cache::MaxEntries::get_explicit() {
            self.cache_max_entries = max_entries;
        }
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

/// 简化的配置管理器
pub struct ConfigManager {
    config: TranslatorConfig,
}

impl ConfigManager {
    /// 创建新的配置管理器：.env -> 配置文件 -> 环境变量
    pub fn new() -> TranslationResult<Self> {
        let mut config = Self::load_config()?;
        config.apply_env_overrides();
        config.validate()?;

        Ok(Self { config })
    }

    /// 直接使用给定配置，不访问文件系统和环境变量
    pub fn from_config(config: TranslatorConfig) -> TranslationResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 从指定路径加载
    pub fn from_path(path: &str) -> TranslationResult<Self> {
        let mut config = Self::load_from_file(path)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(Self { config })
    }

    /// 获取配置
    pub fn get_config(&self) -> &TranslatorConfig {
        &self.config
    }

    pub fn into_config(self) -> TranslatorConfig {
        self.config
    }

    /// 从文件加载配置
    fn load_config() -> TranslationResult<TranslatorConfig> {
        Self::load_dotenv();

        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            if Path::new(expanded_path.as_ref()).exists() {
                tracing::info!("加载配置文件: {}", expanded_path);
                return Self::load_from_file(&expanded_path);
            }
        }

        tracing::info!("未找到配置文件，使用默认配置");
        Ok(TranslatorConfig::default())
    }

    /// 从指定文件加载配置
    fn load_from_file(path: &str) -> TranslationResult<TranslatorConfig> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| helpers::config_error(format!("读取配置文件失败: {}", e)))?;

        if path.ends_with(".toml") {
            toml::from_str(&content)
                .map_err(|e| helpers::config_error(format!("解析TOML配置失败: {}", e)))
        } else {
            serde_json::from_str(&content)
                .map_err(|e| helpers::config_error(format!("解析JSON配置失败: {}", e)))
        }
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        let env_files = [".env.local", ".env"];

        for env_file in &env_files {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::info!("已加载环境变量文件: {}", env_file);
                break;
            }
        }
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: &str) -> TranslationResult<()> {
        let config = TranslatorConfig::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| helpers::config_error(format!("序列化配置失败: {}", e)))?;

        std::fs::write(path, content)
            .map_err(|e| helpers::config_error(format!("写入配置文件失败: {}", e)))?;

        Ok(())
    }
}
