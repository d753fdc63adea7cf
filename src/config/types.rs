//! Configuration Types
//!
//! 定义所有配置结构体

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

/// 应用主配置
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// 文化配置
    #[serde(default)]
    pub cultures: CulturesConfig,

    /// 授权数据配置
    #[serde(default)]
    pub data: DataConfig,

    /// 日志配置
    #[serde(default)]
    pub log: LogConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            cultures: CulturesConfig::default(),
            data: DataConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// 文化配置
///
/// 注册表内容与初始文化在启动时一次性载入。
#[derive(Debug, Clone, Deserialize)]
pub struct CulturesConfig {
    /// 默认文化（根回退），未在 fallbacks 中显式出现时自动注册为根文化
    #[serde(default = "default_culture")]
    pub default_culture: String,

    /// 启动时的当前文化；未设置或为空则使用默认文化
    #[serde(default)]
    pub active_culture: Option<String>,

    /// 文化 -> 自身之后的回退尾部（最具体在前）
    ///
    /// 例: `fr-ca = ["fr", "en"]` 表示完整回退链 fr-ca -> fr -> en
    #[serde(default)]
    pub fallbacks: BTreeMap<String, Vec<String>>,
}

fn default_culture() -> String {
    "en".to_string()
}

impl Default for CulturesConfig {
    fn default() -> Self {
        Self {
            default_culture: default_culture(),
            active_culture: None,
            fallbacks: BTreeMap::new(),
        }
    }
}

/// 授权数据配置
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// 授权语音数据快照路径
    #[serde(default = "default_voice_data_path")]
    pub voice_data_path: PathBuf,

    /// 启动时是否自动载入快照
    #[serde(default = "default_autoload")]
    pub autoload: bool,
}

fn default_voice_data_path() -> PathBuf {
    PathBuf::from("data/voice_lines.json")
}

fn default_autoload() -> bool {
    true
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            voice_data_path: default_voice_data_path(),
            autoload: default_autoload(),
        }
    }
}

/// 日志配置
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// 日志级别
    #[serde(default = "default_log_level")]
    pub level: String,

    /// 是否启用 JSON 格式
    #[serde(default)]
    pub json: bool,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.cultures.default_culture, "en");
        assert!(config.cultures.active_culture.is_none());
        assert!(config.cultures.fallbacks.is_empty());
        assert_eq!(
            config.data.voice_data_path,
            PathBuf::from("data/voice_lines.json")
        );
        assert!(config.data.autoload);
        assert_eq!(config.log.level, "info");
    }
}
