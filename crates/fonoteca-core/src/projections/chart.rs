use std::collections::BTreeMap;

use serde_json::Value;

use crate::domain::Record;

/// Clave del eje de etiquetas en la estructura cruda de gráfica.
pub const AXIS_X_KEY: &str = "eje_x";
/// Clave del mapa de series en la estructura cruda de gráfica.
pub const AXIS_Y_KEY: &str = "eje_y";

/// Serie de barras lista para pintar: etiquetas del eje X y series
/// numéricas con nombre.
///
/// Invariante del pipeline: cada serie tiene tantos valores como etiquetas
/// hay en `x_axis`. Este tipo no lo impone; quien construye la gráfica lo
/// comprueba con [`ChartProjection::is_balanced`] antes de entregarla.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartProjection {
  pub x_axis: Vec<String>,
  pub series: BTreeMap<String, Vec<i64>>,
}

impl ChartProjection {
  pub fn empty() -> Self {
    ChartProjection::default()
  }

  /// `true` si todas las series tienen la longitud del eje X.
  pub fn is_balanced(&self) -> bool {
    self.series.values().all(|values| values.len() == self.x_axis.len())
  }

  /// Primera serie cuya longitud no cuadra con el eje X, si la hay.
  pub fn first_ragged(&self) -> Option<(&str, usize)> {
    self
      .series
      .iter()
      .find(|(_, values)| values.len() != self.x_axis.len())
      .map(|(name, values)| (name.as_str(), values.len()))
  }
}

/// Proyección de gráfica pura.
///
/// Extrae el eje X y las series de una estructura con claves genéricas
/// ([`AXIS_X_KEY`], [`AXIS_Y_KEY`]); una clave ausente o con el tipo
/// equivocado se sustituye por secuencia/mapa vacío. Los valores de serie
/// no numéricos se descartan, lo que deja la serie desparejada y la hace
/// visible en la comprobación de paridad del llamador. Aquí no se valida
/// paridad.
pub fn project_chart(raw: &Record) -> ChartProjection {
  let x_axis = match raw.get(AXIS_X_KEY) {
    Some(Value::Array(items)) => items.iter().map(label).collect(),
    _ => Vec::new(),
  };

  let series = match raw.get(AXIS_Y_KEY) {
    Some(Value::Object(entries)) => entries
      .iter()
      .map(|(name, values)| (name.clone(), numeric_values(values)))
      .collect(),
    _ => BTreeMap::new(),
  };

  ChartProjection { x_axis, series }
}

fn label(value: &Value) -> String {
  match value {
    Value::String(s) => s.clone(),
    other => other.to_string(),
  }
}

fn numeric_values(values: &Value) -> Vec<i64> {
  match values {
    Value::Array(items) => items.iter().filter_map(Value::as_i64).collect(),
    _ => Vec::new(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn raw(value: serde_json::Value) -> Record {
    value.as_object().expect("raw chart input must be an object").clone()
  }

  #[test]
  fn extracts_axis_and_series() {
    let chart = project_chart(&raw(json!({
      "eje_x": ["Song A", "Song B"],
      "eje_y": { "Ventas": [10, 5] },
    })));

    assert_eq!(chart.x_axis, vec!["Song A", "Song B"]);
    assert_eq!(chart.series["Ventas"], vec![10, 5]);
    assert!(chart.is_balanced());
  }

  #[test]
  fn missing_keys_default_to_empty() {
    let chart = project_chart(&Record::new());

    assert!(chart.x_axis.is_empty());
    assert!(chart.series.is_empty());
    assert!(chart.is_balanced());
  }

  #[test]
  fn mistyped_keys_default_to_empty() {
    let chart = project_chart(&raw(json!({ "eje_x": "no-es-lista", "eje_y": 3 })));

    assert!(chart.x_axis.is_empty());
    assert!(chart.series.is_empty());
  }

  #[test]
  fn ragged_series_is_detectable() {
    let chart = project_chart(&raw(json!({
      "eje_x": ["Song A", "Song B"],
      "eje_y": { "Ventas": [10] },
    })));

    assert!(!chart.is_balanced());
    assert_eq!(chart.first_ragged(), Some(("Ventas", 1)));
  }
}
