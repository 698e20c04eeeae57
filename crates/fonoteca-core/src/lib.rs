pub mod domain;
pub mod errors;
pub mod ports;
pub mod projections;
pub mod services;

pub use errors::ReportError;
