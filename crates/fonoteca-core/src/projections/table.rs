use crate::domain::record::{cell_text, Record};

/// Vista tabular lista para pintar: columnas ordenadas y filas de celdas
/// ya convertidas a texto, en el mismo orden que las columnas.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableProjection {
  pub columns: Vec<String>,
  pub rows: Vec<Vec<String>>,
}

impl TableProjection {
  /// Tabla activamente vacía: sin columnas y sin filas.
  pub fn empty() -> Self {
    TableProjection::default()
  }

  pub fn is_empty(&self) -> bool {
    self.columns.is_empty() && self.rows.is_empty()
  }
}

/// Proyección tabular pura.
///
/// Para cada fila, para cada columna en el orden dado, la celda se
/// convierte a texto; una celda ausente queda como cadena vacía. No hay
/// ruta de fallo y el orden de las filas de entrada se conserva tal cual.
pub fn project_table(columns: &[String], rows: &[Record]) -> TableProjection {
  let rows = rows
    .iter()
    .map(|row| columns.iter().map(|column| cell_text(row, column)).collect())
    .collect();

  TableProjection { columns: columns.to_vec(), rows }
}
