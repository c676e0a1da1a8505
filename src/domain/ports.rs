use crate::core::box_office::Proposal;
use crate::core::sales::ReportFormat;
use crate::domain::model::Auditorium;
use crate::utils::error::Result;

pub trait ChartStore: Send + Sync {
    fn read_chart(&self, path: &str) -> impl std::future::Future<Output = Result<Auditorium>> + Send;
    fn write_chart(
        &self,
        path: &str,
        auditorium: &Auditorium,
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn chart_path(&self) -> &str;
    fn output_path(&self) -> &str;
    fn report_format(&self) -> ReportFormat;
    fn report_path(&self) -> Option<&str>;
}

/// Decides whether a best-available offer is accepted.
pub trait Confirm {
    fn confirm(&mut self, proposal: &Proposal) -> bool;
}

/// Accepts or declines every offer without asking.
#[derive(Debug, Clone, Copy)]
pub struct AutoConfirm(pub bool);

impl Confirm for AutoConfirm {
    fn confirm(&mut self, _proposal: &Proposal) -> bool {
        self.0
    }
}
