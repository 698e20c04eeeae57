use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::record::Record;

/// Un género musical del catálogo; alimenta la lista de categorías del
/// control de filtrado.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
  /// Identificador único del género; única clave de identidad.
  pub id_genero: i64,
  pub nombre_genero: String,
}

impl Genre {
  pub fn to_record(&self) -> Record {
    let mut record = Record::new();
    record.insert("id_genero".to_string(), Value::from(self.id_genero));
    record.insert("nombre_genero".to_string(), Value::from(self.nombre_genero.clone()));
    record
  }

  /// Función total: campos ausentes se sustituyen por defecto.
  pub fn from_record(record: &Record) -> Self {
    Genre {
      id_genero: record.get("id_genero").and_then(Value::as_i64).unwrap_or_default(),
      nombre_genero: record
        .get("nombre_genero")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string(),
    }
  }
}

/// Igualdad y hash sólo por `id_genero`, igual que [`crate::domain::Song`].
impl PartialEq for Genre {
  fn eq(&self, other: &Self) -> bool {
    self.id_genero == other.id_genero
  }
}

impl Eq for Genre {}

impl Hash for Genre {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.id_genero.hash(state);
  }
}
