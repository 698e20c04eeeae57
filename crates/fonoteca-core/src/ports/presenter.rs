use crate::projections::{ChartProjection, TableProjection};

// La capa de presentación (consola, GUI) implementa esto para recibir
// las proyecciones y los diagnósticos del pipeline.
pub trait ReportPresenter {
  fn set_table(&mut self, table: &TableProjection);

  /// Deja la tabla activamente vacía (sin columnas ni filas). Distinto de
  /// no tocarla: véase la asimetría entre inicialización y filtrado.
  fn reset_table(&mut self);

  fn set_chart(&mut self, chart: &ChartProjection);
  fn clear_chart(&mut self);

  /// Categorías disponibles para el control de filtrado. El centinela
  /// "Todas" lo antepone la propia presentación.
  fn set_categories(&mut self, categories: &[String]);

  /// Diagnóstico legible, no bloqueante. Nunca llega como error.
  fn notify(&mut self, message: &str);
}
