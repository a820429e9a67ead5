use crate::error::{AppError, AppResult, ConfigError};
use crate::services::assembler::LayoutMode;
use crate::services::distributor::{DEFAULT_TARGET_COUNT, MAX_TARGET_COUNT};
use crate::services::selection::MAX_SELECTION;
use crate::services::serializer::OutputFormat;
use std::path::PathBuf;

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 数据集 JSON 文件所在目录
    pub dataset_folder: String,
    /// 数据集目录文件（TOML），相对于 dataset_folder
    pub catalog_file: String,
    /// 指定数据集文件名，不指定时使用目录中的第一项
    pub dataset_file: Option<String>,
    /// 每个分区的题数
    pub target_count: usize,
    /// 最多可同时选择的模式数
    pub max_selection: usize,
    /// 版式
    pub layout_mode: LayoutMode,
    /// 输出格式
    pub output_format: OutputFormat,
    /// 练习卷输出目录
    pub output_folder: String,
    /// 选中的模式编号，例如 "2,5"
    pub selected_patterns: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 输出日志文件
    pub output_log_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_folder: "data".to_string(),
            catalog_file: "datasets.toml".to_string(),
            dataset_file: None,
            target_count: DEFAULT_TARGET_COUNT,
            max_selection: MAX_SELECTION,
            layout_mode: LayoutMode::CombinedSheet,
            output_format: OutputFormat::Text,
            output_folder: "output".to_string(),
            selected_patterns: String::new(),
            verbose_logging: false,
            output_log_file: "worksheet.log".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            dataset_folder: std::env::var("DATASET_FOLDER").unwrap_or(default.dataset_folder),
            catalog_file: std::env::var("CATALOG_FILE").unwrap_or(default.catalog_file),
            dataset_file: std::env::var("DATASET_FILE").ok().filter(|v| !v.trim().is_empty()).or(default.dataset_file),
            target_count: std::env::var("TARGET_COUNT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.target_count),
            max_selection: std::env::var("MAX_SELECTION").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_selection),
            layout_mode: std::env::var("LAYOUT_MODE").ok().and_then(|v| v.parse().ok()).unwrap_or(default.layout_mode),
            output_format: std::env::var("OUTPUT_FORMAT").ok().and_then(|v| v.parse().ok()).unwrap_or(default.output_format),
            output_folder: std::env::var("OUTPUT_FOLDER").unwrap_or(default.output_folder),
            selected_patterns: std::env::var("SELECTED_PATTERNS").unwrap_or(default.selected_patterns),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            output_log_file: std::env::var("OUTPUT_LOG_FILE").unwrap_or(default.output_log_file),
        }
    }

    /// 命令行参数中的模式编号优先于环境变量
    pub fn with_selected_patterns(mut self, selected: impl Into<String>) -> Self {
        let selected = selected.into();
        if !selected.trim().is_empty() {
            self.selected_patterns = selected;
        }
        self
    }

    /// 检查配置值，题数和选择上限都必须是正整数，题数不能超过 `MAX_TARGET_COUNT`
    pub fn validate(&self) -> AppResult<()> {
        if self.target_count > MAX_TARGET_COUNT {
            return Err(AppError::Config(ConfigError::InvalidValue {
                name: "TARGET_COUNT".to_string(),
                value: self.target_count.to_string(),
                reason: format!("不能超过 {}", MAX_TARGET_COUNT),
            }));
        }

        for (name, value) in [
            ("TARGET_COUNT", self.target_count),
            ("MAX_SELECTION", self.max_selection),
        ] {
            if value == 0 {
                return Err(AppError::Config(ConfigError::InvalidValue {
                    name: name.to_string(),
                    value: value.to_string(),
                    reason: "必须大于 0".to_string(),
                }));
            }
        }
        Ok(())
    }

    pub fn catalog_path(&self) -> PathBuf {
        PathBuf::from(&self.dataset_folder).join(&self.catalog_file)
    }

    pub fn dataset_path(&self, file: &str) -> PathBuf {
        PathBuf::from(&self.dataset_folder).join(file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.target_count, 5);
        assert_eq!(config.max_selection, 5);
        assert_eq!(config.layout_mode, LayoutMode::CombinedSheet);
        assert_eq!(config.catalog_path(), PathBuf::from("data").join("datasets.toml"));
    }

    #[test]
    fn test_validate_rejects_zero_counts() {
        assert!(Config::default().validate().is_ok());

        let config = Config {
            target_count: 0,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert_eq!(
            err.to_string(),
            "配置错误: 配置项 TARGET_COUNT 的值 '0' 不合法: 必须大于 0"
        );
    }

    #[test]
    fn test_validate_rejects_oversized_target_count() {
        let at_limit = Config {
            target_count: MAX_TARGET_COUNT,
            ..Config::default()
        };
        assert!(at_limit.validate().is_ok());

        let config = Config {
            target_count: usize::MAX,
            ..Config::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("不能超过 100"));
    }

    #[test]
    fn test_cli_selection_overrides_only_when_present() {
        let config = Config {
            selected_patterns: "1,2".to_string(),
            ..Config::default()
        };
        assert_eq!(config.clone().with_selected_patterns("  ").selected_patterns, "1,2");
        assert_eq!(config.with_selected_patterns("3 4").selected_patterns, "3 4");
    }
}
