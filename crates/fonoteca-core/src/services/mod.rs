pub mod report;
pub mod session;

pub use report::{
  CategoriesInit, DataInit, FilterOutcome, ReportInit, ReportService, ALL_CATEGORIES,
  REPORT_COLUMNS, SALES_SERIES,
};
pub use session::{ReportSession, SessionEvent};
