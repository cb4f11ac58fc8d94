use serde::Deserialize;
use std::path::Path;

use crate::error::ConfigError;

/// 程序配置
///
/// 加载顺序：默认值 → `CONFIG_FILE` 指向的 TOML 文件 → 环境变量
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP 监听地址
    pub bind_addr: String,
    /// 单次上传大小上限（MB）
    pub max_upload_mb: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- OCR 配置 ---
    pub ocr_api_base_url: String,
    pub ocr_app_id: String,
    pub ocr_app_key: String,
    /// 状态轮询间隔（秒）
    pub ocr_poll_interval_secs: u64,
    /// 最大轮询次数
    pub ocr_max_polls: usize,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:5000".to_string(),
            max_upload_mb: 50,
            verbose_logging: false,
            ocr_api_base_url: "https://api.mathpix.com".to_string(),
            ocr_app_id: String::new(),
            ocr_app_key: String::new(),
            ocr_poll_interval_secs: 13,
            ocr_max_polls: 10,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4".to_string(),
        }
    }
}

impl Config {
    /// 从 TOML 文件加载，缺少的字段使用默认值
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_toml_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// 从环境变量加载
    ///
    /// 设置了 `CONFIG_FILE` 时先读取该文件作为基础配置，读取失败则报错。
    pub fn load() -> Result<Self, ConfigError> {
        let base = match std::env::var("CONFIG_FILE") {
            Ok(path) => Self::from_toml_file(path)?,
            Err(_) => Self::default(),
        };
        Ok(base.with_env_overrides())
    }

    /// 只用默认值 + 环境变量
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    fn with_env_overrides(self) -> Self {
        let default = self;
        Self {
            bind_addr: std::env::var("BIND_ADDR").unwrap_or(default.bind_addr),
            max_upload_mb: std::env::var("MAX_UPLOAD_MB").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_upload_mb),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            ocr_api_base_url: std::env::var("MATHPIX_API_BASE_URL").unwrap_or(default.ocr_api_base_url),
            ocr_app_id: std::env::var("MATHPIX_APP_ID").unwrap_or(default.ocr_app_id),
            ocr_app_key: std::env::var("MATHPIX_API_KEY").unwrap_or(default.ocr_app_key),
            ocr_poll_interval_secs: std::env::var("OCR_POLL_INTERVAL_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.ocr_poll_interval_secs),
            ocr_max_polls: std::env::var("OCR_MAX_POLLS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.ocr_max_polls),
            llm_api_key: std::env::var("OPENAI_API_KEY").unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }
}
