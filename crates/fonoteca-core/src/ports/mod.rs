pub mod catalog;
pub mod presenter;

pub use catalog::{CatalogSource, SourceError, Table, TableModel};
pub use presenter::ReportPresenter;
