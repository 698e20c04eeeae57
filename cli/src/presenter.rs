use fonoteca_core::ports::ReportPresenter;
use fonoteca_core::projections::{ChartProjection, TableProjection};
use tracing::warn;

/// Longest bar drawn for the largest series value.
const MAX_BAR_WIDTH: usize = 40;

/// A `ReportPresenter` that renders the report to stdout and routes
/// diagnostics through `tracing`.
#[derive(Debug, Default)]
pub struct ConsolePresenter;

impl ReportPresenter for ConsolePresenter {
  fn set_table(&mut self, table: &TableProjection) {
    println!();
    println!("{}", table.columns.join(" | "));
    println!("{}", "-".repeat(table.columns.join(" | ").len().max(8)));
    for row in &table.rows {
      println!("{}", row.join(" | "));
    }
    if table.rows.is_empty() {
      println!("(sin filas)");
    }
  }

  fn reset_table(&mut self) {
    println!();
    println!("(tabla vacía)");
  }

  fn set_chart(&mut self, chart: &ChartProjection) {
    let width = chart.x_axis.iter().map(String::len).max().unwrap_or(0);

    for (name, values) in &chart.series {
      println!();
      println!("{name}:");
      let top = values.iter().copied().max().unwrap_or(0).max(1);
      for (label, value) in chart.x_axis.iter().zip(values) {
        let bar = (*value).max(0) as usize * MAX_BAR_WIDTH / top as usize;
        println!("  {label:<width$}  {} {value}", "#".repeat(bar));
      }
    }
  }

  fn clear_chart(&mut self) {
    println!();
    println!("(gráfica vacía)");
  }

  fn set_categories(&mut self, categories: &[String]) {
    println!("Categorías: Todas, {}", categories.join(", "));
  }

  fn notify(&mut self, message: &str) {
    warn!("{message}");
  }
}
