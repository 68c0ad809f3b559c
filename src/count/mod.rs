mod mapping;
mod report;

pub use mapping::CountMapping;
pub use report::{CountReport, ReportRow};
