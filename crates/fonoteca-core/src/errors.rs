// crates/fonoteca-core/src/errors.rs
use thiserror::Error;

/// Error del pipeline de informes.
///
/// Las capas superiores (CLI, UI) no reciben este error directamente:
/// las operaciones públicas del pipeline lo absorben y lo convierten en
/// una nota de diagnóstico legible.
#[derive(Debug, Error)]
pub enum ReportError {
  #[error("source error: {0}")]
  Source(String),

  #[error("missing field `{0}` in record")]
  MissingField(String),

  #[error("cannot coerce field `{field}` from value {value}")]
  Coercion { field: String, value: String },

  #[error("series `{series}` has {len} values for {x_len} x-axis labels")]
  RaggedChart { series: String, len: usize, x_len: usize },
}

impl From<crate::ports::SourceError> for ReportError {
  fn from(e: crate::ports::SourceError) -> Self {
    ReportError::Source(e.to_string())
  }
}
