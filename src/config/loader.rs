//! Configuration Loader
//!
//! 实现多源配置加载与合并逻辑
//!
//! 优先级（从高到低）：
//! 1. 环境变量
//! 2. 配置文件（config.toml）
//! 3. 默认值

use config::{Config, ConfigError as ConfigCrateError, Environment, File};
use std::path::Path;
use thiserror::Error;

use super::types::AppConfig;

/// 配置加载错误
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    LoadError(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Configuration validation failed: {0}")]
    ValidationError(String),
}

impl From<ConfigCrateError> for ConfigError {
    fn from(err: ConfigCrateError) -> Self {
        ConfigError::LoadError(err.to_string())
    }
}

/// 配置文件搜索路径
const CONFIG_FILE_NAMES: &[&str] = &["config", "config.local"];

/// 加载应用配置
///
/// 按优先级从高到低合并配置：
/// 1. 环境变量（前缀 `VOXLOC_`，层级分隔符 `__`）
/// 2. 配置文件（config.toml 或 config.local.toml）
/// 3. 默认值
///
/// # 环境变量示例
/// - `VOXLOC_CULTURES__DEFAULT_CULTURE=en`
/// - `VOXLOC_CULTURES__ACTIVE_CULTURE=fr`
/// - `VOXLOC_DATA__VOICE_DATA_PATH=/data/voice_lines.json`
/// - `VOXLOC_LOG__LEVEL=debug`
pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from_path(None)
}

/// 从指定路径加载配置
///
/// # 参数
/// - `config_path` - 可选的配置文件路径，如果为 None 则使用默认搜索路径
pub fn load_config_from_path(config_path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let mut builder = Config::builder();

    // 1. 首先设置默认值（最低优先级）
    builder = builder
        .set_default("cultures.default_culture", "en")?
        .set_default("data.voice_data_path", "data/voice_lines.json")?
        .set_default("data.autoload", true)?
        .set_default("log.level", "info")?
        .set_default("log.json", false)?;

    // 2. 添加配置文件（如果存在）
    if let Some(path) = config_path {
        builder = builder.add_source(File::from(path).required(true));
    } else {
        // 搜索默认配置文件
        for name in CONFIG_FILE_NAMES {
            builder = builder.add_source(File::with_name(name).required(false));
        }
    }

    // 3. 添加环境变量（最高优先级）
    // 前缀: VOXLOC_
    // 层级分隔符: __ (双下划线)
    // 例如: VOXLOC_CULTURES__ACTIVE_CULTURE=fr
    builder = builder.add_source(
        Environment::with_prefix("VOXLOC")
            .prefix_separator("_")
            .separator("__")
            .try_parsing(true),
    );

    // 4. 构建配置
    let config = builder.build()?;

    // 5. 反序列化为 AppConfig
    let app_config: AppConfig = config
        .try_deserialize()
        .map_err(|e| ConfigError::ParseError(format!("Failed to deserialize config: {}", e)))?;

    // 6. 验证配置
    validate_config(&app_config)?;

    Ok(app_config)
}

/// 验证配置有效性
fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    // 验证默认文化
    if config.cultures.default_culture.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Default culture cannot be empty".to_string(),
        ));
    }

    // 验证回退表键
    if config.cultures.fallbacks.keys().any(|k| k.trim().is_empty()) {
        return Err(ConfigError::ValidationError(
            "Fallback table contains an empty culture code".to_string(),
        ));
    }

    // 验证数据路径
    if config.data.voice_data_path.as_os_str().is_empty() {
        return Err(ConfigError::ValidationError(
            "Voice data path cannot be empty".to_string(),
        ));
    }

    // 验证日志级别
    if config.log.level.trim().is_empty() {
        return Err(ConfigError::ValidationError(
            "Log level cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// 打印配置信息（用于启动时日志）
pub fn print_config(config: &AppConfig) {
    tracing::info!("=== Application Configuration ===");
    tracing::info!("Default Culture: {}", config.cultures.default_culture);
    if let Some(active) = &config.cultures.active_culture {
        tracing::info!("Active Culture: {}", active);
    }
    tracing::info!("Registered Fallbacks: {}", config.cultures.fallbacks.len());
    for (culture, tail) in &config.cultures.fallbacks {
        tracing::info!("  {} -> {:?}", culture, tail);
    }
    tracing::info!("Voice Data Path: {:?}", config.data.voice_data_path);
    tracing::info!("Autoload: {}", config.data.autoload);
    tracing::info!("Log Level: {}", config.log.level);
    tracing::info!("=================================");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config_passes_validation() {
        let config = AppConfig::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validation_error_for_empty_default_culture() {
        let mut config = AppConfig::default();
        config.cultures.default_culture = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_fallback_key() {
        let mut config = AppConfig::default();
        config
            .cultures
            .fallbacks
            .insert(String::new(), vec!["en".to_string()]);
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validation_error_for_empty_data_path() {
        let mut config = AppConfig::default();
        config.data.voice_data_path = std::path::PathBuf::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_load_config_from_toml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(
            file,
            r#"
[cultures]
default_culture = "en"
active_culture = "fr"

[cultures.fallbacks]
fr = ["en"]
"fr-ca" = ["fr", "en"]

[data]
voice_data_path = "authored/voices.json"
autoload = false

[log]
level = "debug"
"#
        )
        .unwrap();

        let config = load_config_from_path(Some(&path)).unwrap();
        assert_eq!(config.cultures.default_culture, "en");
        assert_eq!(config.cultures.active_culture.as_deref(), Some("fr"));
        assert_eq!(
            config.cultures.fallbacks["fr-ca"],
            vec!["fr".to_string(), "en".to_string()]
        );
        assert_eq!(
            config.data.voice_data_path,
            std::path::PathBuf::from("authored/voices.json")
        );
        assert!(!config.data.autoload);
        assert_eq!(config.log.level, "debug");
    }
}
