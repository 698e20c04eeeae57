use serde_json::{Map, Value};

use crate::errors::ReportError;

/// Un registro plano: asociación de nombre de columna a valor (texto o
/// número), tal como lo entrega la fuente de datos.
///
/// El orden de columnas nunca viaja dentro del registro; siempre lo aporta
/// quien proyecta (lista de columnas de la proyección).
pub type Record = Map<String, Value>;

/// Representación textual de una celda para la vista tabular.
///
/// Una celda ausente o nula se muestra como cadena vacía; los números se
/// formatean con su `Display` JSON. Nunca falla.
pub fn cell_text(record: &Record, column: &str) -> String {
  match record.get(column) {
    None | Some(Value::Null) => String::new(),
    Some(Value::String(s)) => s.clone(),
    Some(other) => other.to_string(),
  }
}

/// Acceso estricto a un campo de texto.
///
/// A diferencia de [`cell_text`], aquí la ausencia del campo sí es un error:
/// el predicado de filtrado no puede evaluar una fila sin su producto o su
/// categoría.
pub fn field_str<'a>(record: &'a Record, column: &str) -> Result<&'a str, ReportError> {
  match record.get(column) {
    None | Some(Value::Null) => Err(ReportError::MissingField(column.to_string())),
    Some(Value::String(s)) => Ok(s.as_str()),
    Some(other) => {
      Err(ReportError::Coercion { field: column.to_string(), value: other.to_string() })
    }
  }
}

/// Coerción estricta a entero, aceptando números JSON y cadenas numéricas.
pub fn field_i64(record: &Record, column: &str) -> Result<i64, ReportError> {
  let value =
    record.get(column).ok_or_else(|| ReportError::MissingField(column.to_string()))?;

  let coercion =
    || ReportError::Coercion { field: column.to_string(), value: value.to_string() };

  match value {
    Value::Number(n) => n.as_i64().ok_or_else(coercion),
    Value::String(s) => s.trim().parse::<i64>().map_err(|_| coercion()),
    _ => Err(coercion()),
  }
}
