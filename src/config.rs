use std::env;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

/// 服务配置，来自环境变量（启动时先加载 `.env`）
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub port: u16,
    /// 覆盖内嵌语言包的目录
    pub locales_path: Option<String>,
    pub default_page_size: u32,
    /// 页大小上限，未设置时不限制
    pub max_page_size: Option<u32>,
    pub cache_enabled: bool,
    pub cache_expire: Duration,
    /// 固定库存数据的随机种子
    pub stock_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8000,
            locales_path: None,
            default_page_size: 10,
            max_page_size: None,
            cache_enabled: true,
            cache_expire: Duration::from_secs(300),
            stock_seed: None,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// 通过任意取值函数构造，便于测试
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        let config = Self {
            port: parse_var(&get, "PORT", "端口号")?.unwrap_or(defaults.port),
            locales_path: get("LOCALES_PATH"),
            default_page_size: parse_var(&get, "DEFAULT_PAGE_SIZE", "正整数")?
                .unwrap_or(defaults.default_page_size),
            max_page_size: parse_var(&get, "MAX_PAGE_SIZE", "正整数")?,
            cache_enabled: parse_var(&get, "CACHE_RESPONSES", "布尔值")?
                .unwrap_or(defaults.cache_enabled),
            cache_expire: parse_var::<u64, _>(&get, "CACHE_EXPIRE_SECONDS", "秒数")?
                .map(Duration::from_secs)
                .unwrap_or(defaults.cache_expire),
            stock_seed: parse_var(&get, "STOCK_SEED", "整数")?,
        };

        if config.default_page_size == 0 {
            return Err(invalid("DEFAULT_PAGE_SIZE", "正整数", "0"));
        }
        if let Some(max) = config.max_page_size.filter(|max| *max < config.default_page_size) {
            return Err(invalid(
                "MAX_PAGE_SIZE",
                "不小于 DEFAULT_PAGE_SIZE 的整数",
                &max.to_string(),
            ));
        }

        Ok(config)
    }
}

fn parse_var<T, G>(get: &G, name: &'static str, expected: &'static str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
    G: Fn(&str) -> Option<String>,
{
    match get(name) {
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| invalid(name, expected, &raw)),
        None => Ok(None),
    }
}

fn invalid(name: &'static str, expected: &'static str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        name,
        expected,
        value: value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|name| vars.get(name).cloned())
    }

    #[test]
    fn defaults_when_unset() {
        let config = config_from(&[]).unwrap();
        assert_eq!(config.port, 8000);
        assert_eq!(config.default_page_size, 10);
        assert_eq!(config.max_page_size, None);
        assert!(config.cache_enabled);
        assert_eq!(config.stock_seed, None);
    }

    #[test]
    fn reads_overrides() {
        let config = config_from(&[
            ("PORT", "3000"),
            ("CACHE_RESPONSES", "false"),
            ("CACHE_EXPIRE_SECONDS", "30"),
            ("STOCK_SEED", "99"),
            ("LOCALES_PATH", "./locales"),
            ("MAX_PAGE_SIZE", "200"),
        ])
        .unwrap();
        assert_eq!(config.port, 3000);
        assert!(!config.cache_enabled);
        assert_eq!(config.cache_expire, Duration::from_secs(30));
        assert_eq!(config.stock_seed, Some(99));
        assert_eq!(config.locales_path.as_deref(), Some("./locales"));
        assert_eq!(config.max_page_size, Some(200));
    }

    #[test]
    fn rejects_invalid_numbers() {
        assert!(config_from(&[("PORT", "eighty")]).is_err());
        assert!(config_from(&[("DEFAULT_PAGE_SIZE", "0")]).is_err());
        assert!(config_from(&[("DEFAULT_PAGE_SIZE", "50"), ("MAX_PAGE_SIZE", "20")]).is_err());
    }
}
