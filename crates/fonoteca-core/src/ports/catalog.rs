use std::fmt;

use crate::domain::Record;

/// Tablas que el pipeline conoce de la fuente de datos.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
  Songs,
  Genres,
}

impl Table {
  /// Nombre de la tabla en el esquema original.
  pub fn as_str(&self) -> &'static str {
    match self {
      Table::Songs => "canciones",
      Table::Genres => "generos",
    }
  }
}

impl fmt::Display for Table {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

#[derive(Debug, thiserror::Error)]
pub enum SourceError {
  #[error("unknown table: {0}")]
  UnknownTable(String),
  #[error("storage error: {0}")]
  Storage(String),
}

/// Proyección cruda de una tabla tal como la entrega la fuente:
/// lista ordenada de columnas más las filas como registros planos.
#[derive(Debug, Clone, PartialEq)]
pub struct TableModel {
  pub columns: Vec<String>,
  pub data: Vec<Record>,
}

/// Puerto de entrada de datos del informe.
///
/// Un resultado vacío (`vec![]`, `None`) es un desenlace válido, no un
/// error; `SourceError` queda para fallos reales del almacenamiento.
pub trait CatalogSource {
  fn fetch_all(&self, table: Table) -> Result<Vec<Record>, SourceError>;
  fn get_projection(&self, table: Table) -> Result<Option<TableModel>, SourceError>;
}
