use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::record::Record;

/// Una canción del catálogo: la fila de la tabla `canciones` como objeto de
/// valor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Song {
  /// Código único de la canción; es la única clave de identidad.
  pub codigo: String,
  pub titulo: String,
  pub artista: String,
  pub album: String,
  /// Duración en formato "mm:ss".
  pub duracion: String,
  pub precio: f64,
  pub ventas: u32,
  /// Clave foránea hacia [`crate::domain::Genre`].
  pub id_genero: i64,
  /// Fecha de alta, como texto "AAAA-MM-DD".
  pub fecha_agregado: String,
}

impl Song {
  /// Convierte la canción en un registro plano, listo para la fuente de
  /// datos o para serializar.
  pub fn to_record(&self) -> Record {
    let mut record = Record::new();
    record.insert("codigo".to_string(), Value::from(self.codigo.clone()));
    record.insert("titulo".to_string(), Value::from(self.titulo.clone()));
    record.insert("artista".to_string(), Value::from(self.artista.clone()));
    record.insert("album".to_string(), Value::from(self.album.clone()));
    record.insert("duracion".to_string(), Value::from(self.duracion.clone()));
    record.insert("precio".to_string(), Value::from(self.precio));
    record.insert("ventas".to_string(), Value::from(self.ventas));
    record.insert("id_genero".to_string(), Value::from(self.id_genero));
    record.insert("fecha_agregado".to_string(), Value::from(self.fecha_agregado.clone()));
    record
  }

  /// Reconstruye una canción desde un registro plano.
  ///
  /// Función total: un campo ausente o con el tipo equivocado se sustituye
  /// por su valor por defecto (cadena vacía, cero). Nunca falla.
  pub fn from_record(record: &Record) -> Self {
    Song {
      codigo: text(record, "codigo"),
      titulo: text(record, "titulo"),
      artista: text(record, "artista"),
      album: text(record, "album"),
      duracion: text(record, "duracion"),
      precio: record.get("precio").and_then(Value::as_f64).unwrap_or_default(),
      ventas: record.get("ventas").and_then(Value::as_u64).unwrap_or_default() as u32,
      id_genero: record.get("id_genero").and_then(Value::as_i64).unwrap_or_default(),
      fecha_agregado: text(record, "fecha_agregado"),
    }
  }
}

fn text(record: &Record, column: &str) -> String {
  record.get(column).and_then(Value::as_str).unwrap_or_default().to_string()
}

/// La identidad de una canción es su `codigo`: dos instancias con el mismo
/// código son la misma canción aunque el resto de campos difieran (por
/// ejemplo, un duplicado desfasado leído dos veces). Intencionado; no
/// derivar campo a campo.
impl PartialEq for Song {
  fn eq(&self, other: &Self) -> bool {
    self.codigo == other.codigo
  }
}

impl Eq for Song {}

impl Hash for Song {
  fn hash<H: Hasher>(&self, state: &mut H) {
    self.codigo.hash(state);
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use std::collections::HashSet;

  fn sample() -> Song {
    Song {
      codigo: "C-001".to_string(),
      titulo: "Rock Ballad".to_string(),
      artista: "Los Ejemplares".to_string(),
      album: "Primeras Tomas".to_string(),
      duracion: "03:42".to_string(),
      precio: 1.29,
      ventas: 10,
      id_genero: 1,
      fecha_agregado: "2024-03-01".to_string(),
    }
  }

  #[test]
  fn equality_and_hash_use_only_the_code() {
    let a = sample();
    let mut b = sample();
    b.titulo = "Otro título".to_string();
    b.ventas = 999;

    assert_eq!(a, b);

    let set: HashSet<Song> = [a, b].into_iter().collect();
    assert_eq!(set.len(), 1);
  }

  #[test]
  fn record_round_trip_preserves_fields() {
    let song = sample();
    let rebuilt = Song::from_record(&song.to_record());

    assert_eq!(rebuilt.codigo, song.codigo);
    assert_eq!(rebuilt.titulo, song.titulo);
    assert_eq!(rebuilt.ventas, song.ventas);
    assert_eq!(rebuilt.id_genero, song.id_genero);
  }

  #[test]
  fn from_record_substitutes_defaults_for_missing_fields() {
    let song = Song::from_record(&Record::new());

    assert_eq!(song.codigo, "");
    assert_eq!(song.precio, 0.0);
    assert_eq!(song.ventas, 0);
  }
}
