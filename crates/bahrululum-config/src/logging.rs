use std::env;

use crate::string_or;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct LogConfig {
    pub level: String,
    pub format: LogFormat,
    pub dir: String,
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let format = match string_or(&lookup, "LOG_FORMAT", "text").to_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            level: string_or(&lookup, "LOG_LEVEL", "info").to_lowercase(),
            format,
            dir: string_or(&lookup, "LOG_DIR", "storage/logs"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lookup_from;

    #[test]
    fn test_defaults() {
        let config = LogConfig::from_lookup(lookup_from(&[]));
        assert_eq!(config.level, "info");
        assert_eq!(config.format, LogFormat::Text);
        assert_eq!(config.dir, "storage/logs");
    }

    #[test]
    fn test_json_format_case_insensitive() {
        let config = LogConfig::from_lookup(lookup_from(&[("LOG_FORMAT", "JSON"), ("LOG_LEVEL", "DEBUG")]));
        assert_eq!(config.format, LogFormat::Json);
        assert_eq!(config.level, "debug");
    }
}
