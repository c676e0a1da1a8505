use crate::core::sales::ReportFormat;
use crate::core::ConfigProvider;
use crate::utils::error::{ReservationError, Result};
use crate::utils::validation::{validate_non_empty_string, validate_one_of, validate_path, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TomlConfig {
    pub chart: ChartConfig,
    pub report: Option<ReportConfig>,
    pub logging: Option<LoggingConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChartConfig {
    pub input_path: String,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    pub format: Option<String>,
    pub output_path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub json: Option<bool>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReservationError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReservationError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${CHART_DIR})，未設定的變數保持原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ReservationError::ConfigError {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        validate_path("chart.input_path", &self.chart.input_path)?;
        if let Some(output) = &self.chart.output_path {
            validate_path("chart.output_path", output)?;
        }

        if let Some(report) = &self.report {
            if let Some(format) = &report.format {
                validate_one_of("report.format", format, &ReportFormat::NAMES)?;
            }
            if let Some(path) = &report.output_path {
                validate_path("report.output_path", path)?;
            }
        }

        if let Some(level) = self.log_level() {
            validate_non_empty_string("logging.level", level)?;
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }

        Ok(())
    }

    pub fn log_level(&self) -> Option<&str> {
        self.logging.as_ref().and_then(|l| l.level.as_deref())
    }

    pub fn json_logs(&self) -> bool {
        self.logging.as_ref().and_then(|l| l.json).unwrap_or(false)
    }
}

impl ConfigProvider for TomlConfig {
    fn chart_path(&self) -> &str {
        &self.chart.input_path
    }

    /// 未指定輸出檔時覆寫原座位表
    fn output_path(&self) -> &str {
        self.chart
            .output_path
            .as_deref()
            .unwrap_or(&self.chart.input_path)
    }

    fn report_format(&self) -> ReportFormat {
        self.report
            .as_ref()
            .and_then(|r| r.format.as_deref())
            .and_then(|f| f.parse().ok())
            .unwrap_or_default()
    }

    fn report_path(&self) -> Option<&str> {
        self.report.as_ref().and_then(|r| r.output_path.as_deref())
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_basic_toml_config() {
        let toml_content = r#"
[chart]
input_path = "A1.txt"

[report]
format = "json"
output_path = "sales.json"

[logging]
level = "debug"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();

        assert_eq!(config.chart_path(), "A1.txt");
        assert_eq!(config.output_path(), "A1.txt");
        assert_eq!(config.report_format(), ReportFormat::Json);
        assert_eq!(config.report_path(), Some("sales.json"));
        assert_eq!(config.log_level(), Some("debug"));
        assert!(!config.json_logs());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_env_var_substitution() {
        std::env::set_var("SEAT_RESERVE_TEST_DIR", "/srv/theater");

        let toml_content = r#"
[chart]
input_path = "${SEAT_RESERVE_TEST_DIR}/A1.txt"
output_path = "${SEAT_RESERVE_UNSET_VAR}/out.txt"
"#;

        let config = TomlConfig::from_toml_str(toml_content).unwrap();
        assert_eq!(config.chart.input_path, "/srv/theater/A1.txt");
        assert_eq!(config.output_path(), "${SEAT_RESERVE_UNSET_VAR}/out.txt");

        std::env::remove_var("SEAT_RESERVE_TEST_DIR");
    }

    #[test]
    fn test_config_validation() {
        let bad_format = r#"
[chart]
input_path = "A1.txt"

[report]
format = "xml"
"#;
        assert!(TomlConfig::from_toml_str(bad_format).unwrap().validate().is_err());

        let bad_level = r#"
[chart]
input_path = "A1.txt"

[logging]
level = "loud"
"#;
        assert!(TomlConfig::from_toml_str(bad_level).unwrap().validate().is_err());

        let empty_path = r#"
[chart]
input_path = ""
"#;
        assert!(TomlConfig::from_toml_str(empty_path).unwrap().validate().is_err());
    }

    #[test]
    fn test_missing_chart_section_fails_to_parse() {
        assert!(matches!(
            TomlConfig::from_toml_str("[report]\nformat = \"text\"\n"),
            Err(ReservationError::ConfigValidationError { .. })
        ));
    }

    #[test]
    fn test_config_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();

        let toml_content = r#"
[chart]
input_path = "hall.txt"
output_path = "hall-final.txt"
"#;

        temp_file.write_all(toml_content.as_bytes()).unwrap();

        let config = TomlConfig::from_file(temp_file.path()).unwrap();
        assert_eq!(config.output_path(), "hall-final.txt");
    }
}
