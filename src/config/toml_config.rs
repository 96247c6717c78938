use crate::utils::error::{Result, SiteError};
use crate::utils::validation::{validate_positive_number, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_AUTO_DELAY_MS: u64 = 5000;
pub const DEFAULT_MANUAL_PAUSE_MS: u64 = 10000;
pub const DEFAULT_REVEAL_THRESHOLD: f64 = 0.2;
pub const DEFAULT_CONTACT_ENDPOINT: &str = "https://httpbin.org/post";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub slider: SliderConfig,
    pub reveal: RevealConfig,
    pub contact: ContactConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SliderConfig {
    pub auto_delay_ms: u64,
    pub manual_pause_ms: u64,
}

impl Default for SliderConfig {
    fn default() -> Self {
        Self {
            auto_delay_ms: DEFAULT_AUTO_DELAY_MS,
            manual_pause_ms: DEFAULT_MANUAL_PAUSE_MS,
        }
    }
}

impl SliderConfig {
    pub fn auto_delay(&self) -> Duration {
        Duration::from_millis(self.auto_delay_ms)
    }

    pub fn manual_pause(&self) -> Duration {
        Duration::from_millis(self.manual_pause_ms)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// 元素面積進入視窗的最低比例
    pub threshold: f64,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_REVEAL_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContactConfig {
    pub endpoint: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_CONTACT_ENDPOINT.to_string(),
        }
    }
}

impl SiteConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(SiteError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置；缺少的段落使用預設值
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| SiteError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 驗證配置的合理性
    pub fn validate_config(&self) -> Result<()> {
        validate_url("contact.endpoint", &self.contact.endpoint)?;
        validate_positive_number("slider.auto_delay_ms", self.slider.auto_delay_ms, 1)?;
        validate_positive_number("slider.manual_pause_ms", self.slider.manual_pause_ms, 1)?;
        validate_range("reveal.threshold", self.reveal.threshold, 0.0, 1.0)?;
        Ok(())
    }
}

impl Validate for SiteConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
