use crate::domain::model::PeriodReport;

pub struct MessageFormatter;

impl MessageFormatter {
    pub fn format(report: &PeriodReport) -> String {
        format!("Estás en {}.", report.period.label())
    }
}
