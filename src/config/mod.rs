pub mod cli;
pub mod toml_config;

use crate::core::sales::ReportFormat;
use crate::core::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_one_of, validate_path, Validate};
use toml_config::LOG_LEVELS;

#[cfg(feature = "cli")]
use crate::utils::error::ReservationError;
#[cfg(feature = "cli")]
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "cli")]
use toml_config::TomlConfig;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "seat-reserve")]
#[command(about = "Theater ticket reservation system")]
pub struct CliConfig {
    /// Seating chart to load
    #[arg(short = 'f', long, global = true)]
    pub chart: Option<String>,

    /// Where the final chart is written (defaults to the loaded chart)
    #[arg(short, long, global = true)]
    pub output: Option<String>,

    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Sales report format: text, json or csv
    #[arg(long, global = true)]
    pub report_format: Option<ReportFormat>,

    /// Also write the sales report to this file
    #[arg(long, global = true)]
    pub report_path: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Menu-driven session on the terminal (default)
    Interactive,
    /// Reserve one block of seats and save the chart
    Reserve(ReserveArgs),
    /// Print the sales report for the chart
    Report,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Args)]
pub struct ReserveArgs {
    /// Row number, starting at 1
    #[arg(long)]
    pub row: usize,

    /// Starting seat letter; omit to take the best available block
    #[arg(long)]
    pub seat: Option<char>,

    #[arg(long, default_value_t = 0)]
    pub adults: usize,

    #[arg(long, default_value_t = 0)]
    pub children: usize,

    #[arg(long, default_value_t = 0)]
    pub seniors: usize,

    /// Accept a best-available offer without asking
    #[arg(short, long)]
    pub yes: bool,
}

/// Settings after merging the TOML file with command-line overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub chart_path: String,
    pub output_path: String,
    pub report_format: ReportFormat,
    pub report_path: Option<String>,
    pub log_level: Option<String>,
    pub json_logs: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    pub fn resolve(&self) -> Result<Settings> {
        let file = match &self.config {
            Some(path) => Some(TomlConfig::from_file(path)?),
            None => None,
        };
        if let Some(file) = &file {
            file.validate()?;
        }
        self.merge(file.as_ref())
    }

    /// 命令列參數優先於設定檔
    pub fn merge(&self, file: Option<&TomlConfig>) -> Result<Settings> {
        let chart_path = self
            .chart
            .clone()
            .or_else(|| file.map(|f| f.chart_path().to_string()))
            .ok_or_else(|| ReservationError::MissingConfigError {
                field: "chart".to_string(),
            })?;

        let output_path = self
            .output
            .clone()
            .or_else(|| {
                // 只有在座位表也來自設定檔時，才沿用設定檔的輸出路徑
                file.filter(|_| self.chart.is_none())
                    .map(|f| f.output_path().to_string())
            })
            .unwrap_or_else(|| chart_path.clone());

        let settings = Settings {
            chart_path,
            output_path,
            report_format: self
                .report_format
                .or_else(|| file.map(|f| f.report_format()))
                .unwrap_or_default(),
            report_path: self
                .report_path
                .clone()
                .or_else(|| file.and_then(|f| f.report_path().map(str::to_string))),
            log_level: file.and_then(|f| f.log_level().map(str::to_string)),
            json_logs: self.json_logs || file.map(|f| f.json_logs()).unwrap_or(false),
        };
        settings.validate()?;
        Ok(settings)
    }
}

impl ConfigProvider for Settings {
    fn chart_path(&self) -> &str {
        &self.chart_path
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn report_format(&self) -> ReportFormat {
        self.report_format
    }

    fn report_path(&self) -> Option<&str> {
        self.report_path.as_deref()
    }
}

impl Validate for Settings {
    fn validate(&self) -> Result<()> {
        validate_path("chart", &self.chart_path)?;
        validate_path("output", &self.output_path)?;
        if let Some(path) = &self.report_path {
            validate_path("report_path", path)?;
        }
        if let Some(level) = &self.log_level {
            validate_one_of("logging.level", level, &LOG_LEVELS)?;
        }
        Ok(())
    }
}
