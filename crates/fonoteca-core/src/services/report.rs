use serde_json::Value;
use tracing::debug;

use crate::domain::record::{field_i64, field_str, Record};
use crate::errors::ReportError;
use crate::ports::{CatalogSource, Table};
use crate::projections::{
  project_chart, project_table, ChartProjection, TableProjection, AXIS_X_KEY, AXIS_Y_KEY,
};

/// Centinela de categoría que desactiva el filtro por categoría.
///
/// Literal fijo por compatibilidad con el estado de filtro ya almacenado
/// en instalaciones existentes.
pub const ALL_CATEGORIES: &str = "Todas";

/// Orden fijo de columnas de la tabla filtrada, independiente de las
/// columnas que exponga la fuente.
pub const REPORT_COLUMNS: [&str; 5] = ["producto", "descripcion", "precio", "stock", "ventas"];

/// Nombre de la única serie de la gráfica de barras.
pub const SALES_SERIES: &str = "Ventas";

const PRODUCT_COLUMN: &str = "producto";
const CATEGORY_COLUMN: &str = "categoria";
const SALES_COLUMN: &str = "ventas";
const GENRE_NAME_COLUMN: &str = "nombre_genero";

/// Desenlace de la carga inicial de datos.
#[derive(Debug, Clone, PartialEq)]
pub enum DataInit {
  /// Hay datos: tabla y gráfica listas.
  Ready { table: TableProjection, chart: ChartProjection },
  /// La fuente no tiene nada. La presentación limpia la gráfica pero deja
  /// la tabla como esté (no la vacía).
  Missing { note: String },
  /// Fallo absorbido; la causa viaja dentro de la nota.
  Failed { note: String },
}

/// Desenlace de la carga de categorías, independiente del de datos.
#[derive(Debug, Clone, PartialEq)]
pub enum CategoriesInit {
  Ready(Vec<String>),
  Missing { note: String },
  Failed { note: String },
}

/// Resultado completo de la inicialización: dos mitades independientes,
/// un fallo en una no impide la otra.
#[derive(Debug, Clone, PartialEq)]
pub struct ReportInit {
  pub data: DataInit,
  pub categories: CategoriesInit,
}

/// Desenlace de una aplicación de filtro.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterOutcome {
  /// Tabla y gráfica recalculadas. Un conjunto filtrado vacío también
  /// llega por aquí: es un resultado válido y silencioso.
  Updated { table: TableProjection, chart: ChartProjection },
  /// La fuente no devolvió filas. A diferencia de la inicialización, la
  /// presentación debe VACIAR la tabla (cero columnas, cero filas) además
  /// de limpiar la gráfica.
  NoData { note: String },
  /// Fallo absorbido; la presentación conserva el estado anterior.
  Failed { note: String },
}

/// El pipeline del informe: transforma registros crudos de la fuente en la
/// proyección tabular y la proyección de gráfica, según el filtro.
///
/// Las dos operaciones públicas nunca devuelven `Err`: todo fallo queda
/// absorbido en la variante correspondiente con una nota de diagnóstico.
pub struct ReportService<S: CatalogSource> {
  source: S,
}

impl<S: CatalogSource> ReportService<S> {
  pub fn new(source: S) -> Self {
    Self { source }
  }

  /// Carga inicial: proyección completa de `canciones` y lista de géneros.
  pub fn initialize(&self) -> ReportInit {
    let data = self.load_initial_data().unwrap_or_else(|e| DataInit::Failed {
      note: format!("Error al inicializar el informe: {e}"),
    });

    let categories = self.load_categories().unwrap_or_else(|e| CategoriesInit::Failed {
      note: format!("Error al cargar los géneros: {e}"),
    });

    ReportInit { data, categories }
  }

  fn load_initial_data(&self) -> Result<DataInit, ReportError> {
    let Some(model) = self.source.get_projection(Table::Songs)? else {
      return Ok(DataInit::Missing {
        note: "No se encontraron datos en la tabla 'canciones'.".to_string(),
      });
    };

    if model.data.is_empty() {
      return Ok(DataInit::Missing {
        note: "No se encontraron datos en la tabla 'canciones'.".to_string(),
      });
    }

    let table = project_table(&model.columns, &model.data);
    let chart = self.sales_chart(&model.data)?;
    Ok(DataInit::Ready { table, chart })
  }

  fn load_categories(&self) -> Result<CategoriesInit, ReportError> {
    let rows = self.source.fetch_all(Table::Genres)?;
    if rows.is_empty() {
      return Ok(CategoriesInit::Missing { note: "No se encontraron géneros.".to_string() });
    }

    let names = rows
      .iter()
      .map(|row| field_str(row, GENRE_NAME_COLUMN).map(str::to_string))
      .collect::<Result<Vec<_>, _>>()?;

    Ok(CategoriesInit::Ready(names))
  }

  /// Aplica el filtro partiendo SIEMPRE del conjunto completo de filas:
  /// los filtros no se apilan entre llamadas.
  pub fn apply_filter(&self, search_text: &str, category: &str) -> FilterOutcome {
    self.filter_report(search_text, category).unwrap_or_else(|e| FilterOutcome::Failed {
      note: format!("Error al aplicar filtros: {e}"),
    })
  }

  fn filter_report(&self, search_text: &str, category: &str) -> Result<FilterOutcome, ReportError> {
    let rows = self.source.fetch_all(Table::Songs)?;
    if rows.is_empty() {
      return Ok(FilterOutcome::NoData {
        note: "No se encontraron datos para aplicar filtros.".to_string(),
      });
    }

    let needle = search_text.to_lowercase();
    let mut retained: Vec<Record> = Vec::new();
    for row in rows {
      if retains(&row, &needle, category)? {
        retained.push(row);
      }
    }

    debug!(search_text, category, retained = retained.len(), "filtro aplicado");

    let columns: Vec<String> = REPORT_COLUMNS.iter().map(|c| c.to_string()).collect();
    let table = project_table(&columns, &retained);
    let chart = self.sales_chart(&retained)?;

    Ok(FilterOutcome::Updated { table, chart })
  }

  /// Gráfica de ventas por producto para las filas dadas.
  ///
  /// Se construye pasando por la estructura cruda de ejes y se comprueba la
  /// paridad al final: una gráfica desparejada se RECHAZA con diagnóstico,
  /// nunca se trunca ni se rellena.
  fn sales_chart(&self, rows: &[Record]) -> Result<ChartProjection, ReportError> {
    let mut labels: Vec<Value> = Vec::with_capacity(rows.len());
    let mut counts: Vec<Value> = Vec::with_capacity(rows.len());
    for row in rows {
      labels.push(Value::from(field_str(row, PRODUCT_COLUMN)?));
      counts.push(Value::from(field_i64(row, SALES_COLUMN)?));
    }

    let mut series = Record::new();
    series.insert(SALES_SERIES.to_string(), Value::from(counts));

    let mut raw = Record::new();
    raw.insert(AXIS_X_KEY.to_string(), Value::from(labels));
    raw.insert(AXIS_Y_KEY.to_string(), Value::from(series));

    let chart = project_chart(&raw);
    if let Some((name, len)) = chart.first_ragged() {
      return Err(ReportError::RaggedChart {
        series: name.to_string(),
        len,
        x_len: chart.x_axis.len(),
      });
    }

    Ok(chart)
  }
}

/// Predicado de retención: subcadena sin distinción de mayúsculas sobre el
/// producto Y categoría exacta (o el centinela). La categoría sólo se lee
/// si hizo falta, igual que el cortocircuito original.
fn retains(row: &Record, needle: &str, category: &str) -> Result<bool, ReportError> {
  let product = field_str(row, PRODUCT_COLUMN)?;
  if !product.to_lowercase().contains(needle) {
    return Ok(false);
  }
  if category == ALL_CATEGORIES {
    return Ok(true);
  }
  Ok(field_str(row, CATEGORY_COLUMN)? == category)
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::ports::{SourceError, TableModel};
  use serde_json::json;

  /// Doble de la fuente de datos con fallos inyectables por tabla.
  #[derive(Default)]
  struct StubSource {
    songs: Vec<Record>,
    genres: Vec<Record>,
    projection: Option<TableModel>,
    fail_songs: bool,
    fail_genres: bool,
  }

  impl CatalogSource for StubSource {
    fn fetch_all(&self, table: Table) -> Result<Vec<Record>, SourceError> {
      match table {
        Table::Songs if self.fail_songs => {
          Err(SourceError::Storage("disco no disponible".to_string()))
        }
        Table::Genres if self.fail_genres => {
          Err(SourceError::Storage("disco no disponible".to_string()))
        }
        Table::Songs => Ok(self.songs.clone()),
        Table::Genres => Ok(self.genres.clone()),
      }
    }

    fn get_projection(&self, table: Table) -> Result<Option<TableModel>, SourceError> {
      if table == Table::Songs && self.fail_songs {
        return Err(SourceError::Storage("disco no disponible".to_string()));
      }
      Ok(if table == Table::Songs { self.projection.clone() } else { None })
    }
  }

  fn row(value: serde_json::Value) -> Record {
    value.as_object().expect("test row must be an object").clone()
  }

  fn two_songs() -> Vec<Record> {
    vec![
      row(json!({ "producto": "Song A", "categoria": "Rock", "ventas": "10" })),
      row(json!({ "producto": "Song B", "categoria": "Pop", "ventas": "5" })),
    ]
  }

  fn service_with_songs(songs: Vec<Record>) -> ReportService<StubSource> {
    ReportService::new(StubSource { songs, ..StubSource::default() })
  }

  fn expect_updated(outcome: FilterOutcome) -> (TableProjection, ChartProjection) {
    match outcome {
      FilterOutcome::Updated { table, chart } => (table, chart),
      other => panic!("expected Updated, got {other:?}"),
    }
  }

  #[test]
  fn identity_filter_keeps_every_row() {
    let service = service_with_songs(two_songs());
    let (table, chart) = expect_updated(service.apply_filter("", ALL_CATEGORIES));

    assert_eq!(table.rows.len(), 2);
    assert_eq!(chart.x_axis.len(), 2);
  }

  #[test]
  fn filtering_is_idempotent() {
    let service = service_with_songs(two_songs());

    let first = service.apply_filter("song", "Pop");
    let second = service.apply_filter("song", "Pop");

    assert_eq!(first, second);
  }

  #[test]
  fn substring_match_ignores_case() {
    let songs = vec![row(json!({ "producto": "rock ballad", "categoria": "Rock", "ventas": 1 }))];
    let service = service_with_songs(songs);

    let (table, _) = expect_updated(service.apply_filter("ROCK", ALL_CATEGORIES));
    assert_eq!(table.rows.len(), 1);
  }

  #[test]
  fn category_match_is_exact_not_substring() {
    let songs = vec![
      row(json!({ "producto": "Song A", "categoria": "Popular", "ventas": 1 })),
      row(json!({ "producto": "Song B", "categoria": "Pop", "ventas": 2 })),
    ];
    let service = service_with_songs(songs);

    let (table, chart) = expect_updated(service.apply_filter("", "Pop"));
    assert_eq!(table.rows.len(), 1);
    assert_eq!(chart.x_axis, vec!["Song B"]);
  }

  #[test]
  fn scenario_all_categories_matches_both_songs() {
    let service = service_with_songs(two_songs());
    let (table, chart) = expect_updated(service.apply_filter("song", ALL_CATEGORIES));

    assert_eq!(table.columns, REPORT_COLUMNS.map(str::to_string).to_vec());
    assert_eq!(table.rows.len(), 2);
    assert_eq!(chart.x_axis, vec!["Song A", "Song B"]);
    assert_eq!(chart.series[SALES_SERIES], vec![10, 5]);
  }

  #[test]
  fn scenario_single_category_keeps_one_song() {
    let service = service_with_songs(two_songs());
    let (table, chart) = expect_updated(service.apply_filter("song", "Pop"));

    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.rows[0][0], "Song B");
    assert_eq!(chart.x_axis, vec!["Song B"]);
    assert_eq!(chart.series[SALES_SERIES], vec![5]);
  }

  #[test]
  fn scenario_no_match_is_a_valid_empty_result() {
    let service = service_with_songs(two_songs());
    let (table, chart) = expect_updated(service.apply_filter("zzz", ALL_CATEGORIES));

    assert_eq!(table.columns.len(), REPORT_COLUMNS.len());
    assert!(table.rows.is_empty());
    assert!(chart.x_axis.is_empty());
    assert_eq!(chart.series[SALES_SERIES], Vec::<i64>::new());
    assert!(chart.is_balanced());
  }

  #[test]
  fn empty_fetch_during_filter_reports_no_data() {
    let service = service_with_songs(Vec::new());

    match service.apply_filter("", ALL_CATEGORIES) {
      FilterOutcome::NoData { note } => assert!(note.contains("No se encontraron datos")),
      other => panic!("expected NoData, got {other:?}"),
    }
  }

  #[test]
  fn chart_series_length_always_matches_axis() {
    let service = service_with_songs(two_songs());

    for (search, category) in [("", ALL_CATEGORIES), ("song", "Pop"), ("zzz", ALL_CATEGORIES)] {
      let (_, chart) = expect_updated(service.apply_filter(search, category));
      assert!(chart.is_balanced());
    }
  }

  #[test]
  fn non_numeric_sales_aborts_the_whole_filter() {
    let songs = vec![
      row(json!({ "producto": "Song A", "categoria": "Rock", "ventas": 3 })),
      row(json!({ "producto": "Song B", "categoria": "Pop", "ventas": "muchas" })),
    ];
    let service = service_with_songs(songs);

    match service.apply_filter("", ALL_CATEGORIES) {
      FilterOutcome::Failed { note } => {
        assert!(note.contains("Error al aplicar filtros"));
        assert!(note.contains("ventas"));
      }
      other => panic!("expected Failed, got {other:?}"),
    }
  }

  #[test]
  fn missing_product_field_aborts_the_filter() {
    let songs = vec![row(json!({ "categoria": "Rock", "ventas": 1 }))];
    let service = service_with_songs(songs);

    assert!(matches!(
      service.apply_filter("", ALL_CATEGORIES),
      FilterOutcome::Failed { .. }
    ));
  }

  #[test]
  fn missing_category_is_harmless_under_the_sentinel() {
    // Con "Todas" la categoría nunca se lee, como en el cortocircuito
    // original.
    let songs = vec![row(json!({ "producto": "Song A", "ventas": 1 }))];
    let service = service_with_songs(songs);

    let (table, _) = expect_updated(service.apply_filter("", ALL_CATEGORIES));
    assert_eq!(table.rows.len(), 1);
  }

  #[test]
  fn source_failure_is_absorbed_with_its_cause() {
    let service =
      ReportService::new(StubSource { fail_songs: true, ..StubSource::default() });

    match service.apply_filter("", ALL_CATEGORIES) {
      FilterOutcome::Failed { note } => assert!(note.contains("disco no disponible")),
      other => panic!("expected Failed, got {other:?}"),
    }
  }

  #[test]
  fn initialize_with_projection_yields_table_and_chart() {
    let model = TableModel {
      columns: vec!["producto".to_string(), "ventas".to_string()],
      data: two_songs(),
    };
    let service = ReportService::new(StubSource {
      projection: Some(model),
      genres: vec![row(json!({ "id_genero": 1, "nombre_genero": "Rock" }))],
      ..StubSource::default()
    });

    let init = service.initialize();
    match init.data {
      DataInit::Ready { table, chart } => {
        assert_eq!(table.rows.len(), 2);
        assert_eq!(chart.series[SALES_SERIES], vec![10, 5]);
      }
      other => panic!("expected Ready, got {other:?}"),
    }
    assert_eq!(init.categories, CategoriesInit::Ready(vec!["Rock".to_string()]));
  }

  #[test]
  fn initialize_halves_are_independent() {
    // Sin proyección de canciones pero con géneros: la mitad de datos
    // queda en Missing y la de categorías en Ready.
    let service = ReportService::new(StubSource {
      genres: vec![
        row(json!({ "id_genero": 1, "nombre_genero": "Rock" })),
        row(json!({ "id_genero": 2, "nombre_genero": "Pop" })),
      ],
      ..StubSource::default()
    });

    let init = service.initialize();
    assert!(matches!(init.data, DataInit::Missing { .. }));
    assert_eq!(
      init.categories,
      CategoriesInit::Ready(vec!["Rock".to_string(), "Pop".to_string()])
    );
  }

  #[test]
  fn initialize_songs_failure_does_not_block_categories() {
    let service = ReportService::new(StubSource {
      fail_songs: true,
      genres: vec![row(json!({ "id_genero": 1, "nombre_genero": "Rock" }))],
      ..StubSource::default()
    });

    let init = service.initialize();
    assert!(matches!(init.data, DataInit::Failed { .. }));
    assert!(matches!(init.categories, CategoriesInit::Ready(_)));
  }

  #[test]
  fn initialize_genres_failure_does_not_block_data() {
    let model = TableModel {
      columns: vec!["producto".to_string(), "ventas".to_string()],
      data: two_songs(),
    };
    let service = ReportService::new(StubSource {
      projection: Some(model),
      fail_genres: true,
      ..StubSource::default()
    });

    let init = service.initialize();
    assert!(matches!(init.data, DataInit::Ready { .. }));
    match init.categories {
      CategoriesInit::Failed { note } => assert!(note.contains("disco no disponible")),
      other => panic!("expected Failed, got {other:?}"),
    }
  }

  #[test]
  fn initialize_empty_projection_counts_as_missing() {
    let model = TableModel { columns: vec!["producto".to_string()], data: Vec::new() };
    let service =
      ReportService::new(StubSource { projection: Some(model), ..StubSource::default() });

    let init = service.initialize();
    assert!(matches!(init.data, DataInit::Missing { .. }));
    assert!(matches!(init.categories, CategoriesInit::Missing { .. }));
  }
}
