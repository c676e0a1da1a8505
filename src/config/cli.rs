use crate::core::chart::{parse_chart, serialize_chart};
use crate::core::{Auditorium, ChartStore};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// Reads and writes seating charts on the local filesystem, relative to
/// `base_path` (absolute paths are used as given).
#[derive(Debug, Clone)]
pub struct FileChartStore {
    base_path: PathBuf,
}

impl FileChartStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Default for FileChartStore {
    fn default() -> Self {
        Self::new(".")
    }
}

impl ChartStore for FileChartStore {
    async fn read_chart(&self, path: &str) -> Result<Auditorium> {
        let full_path = self.resolve(path);
        tracing::debug!("Reading seating chart from {}", full_path.display());
        let content = tokio::fs::read_to_string(&full_path).await?;
        parse_chart(&content)
    }

    async fn write_chart(&self, path: &str, auditorium: &Auditorium) -> Result<()> {
        let full_path = self.resolve(path);

        if let Some(parent) = full_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        tokio::fs::write(&full_path, serialize_chart(auditorium)).await?;
        tracing::debug!("Seating chart written to {}", full_path.display());
        Ok(())
    }
}

/// 寫出報表檔（text/json/csv 由呼叫端先行轉換）
pub async fn write_report(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(path, content).await?;
    Ok(())
}
