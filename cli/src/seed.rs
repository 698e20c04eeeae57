use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use fonoteca_core::domain::Genre;
use fonoteca_core::ports::Table;
use fonoteca_store::MemoryCatalog;

/// Small built-in catalog used when no seed file is given.
const DEFAULT_SEED: &str = r#"
[[canciones]]
codigo = "C-001"
producto = "Song A"
descripcion = "Balada de guitarras"
precio = 1.29
stock = 12
ventas = 10
categoria = "Rock"

[[canciones]]
codigo = "C-002"
producto = "Song B"
descripcion = "Sencillo de verano"
precio = 0.99
stock = 7
ventas = 5
categoria = "Pop"

[[canciones]]
codigo = "C-003"
producto = "Nocturno"
descripcion = "Pieza instrumental"
precio = 1.49
stock = 3
ventas = 2
categoria = "Clásica"

[[generos]]
id_genero = 1
nombre_genero = "Rock"

[[generos]]
id_genero = 2
nombre_genero = "Pop"

[[generos]]
id_genero = 3
nombre_genero = "Clásica"
"#;

#[derive(Debug, Deserialize)]
struct SeedFile {
  #[serde(default)]
  canciones: Vec<SeedSong>,
  #[serde(default)]
  generos: Vec<SeedGenre>,
}

/// One row of the report table, as stored: identity code plus the report
/// columns the pipeline consumes.
#[derive(Debug, Serialize, Deserialize)]
struct SeedSong {
  codigo: String,
  producto: String,
  descripcion: String,
  precio: f64,
  stock: u32,
  ventas: u32,
  categoria: String,
}

#[derive(Debug, Deserialize)]
struct SeedGenre {
  id_genero: i64,
  nombre_genero: String,
}

/// Loads the catalog from a TOML seed file, or the built-in default.
pub fn load(path: Option<&Path>) -> Result<MemoryCatalog> {
  let text = match path {
    Some(p) => {
      fs::read_to_string(p).with_context(|| format!("no se pudo leer la semilla {p:?}"))?
    }
    None => DEFAULT_SEED.to_string(),
  };

  let seed: SeedFile = toml::from_str(&text).context("semilla TOML inválida")?;

  let mut catalog = MemoryCatalog::new();
  catalog.create_table(
    Table::Songs,
    &["codigo", "producto", "descripcion", "precio", "stock", "ventas", "categoria"],
  );

  for song in &seed.canciones {
    let record = serde_json::to_value(song)
      .context("canción de semilla no serializable")?
      .as_object()
      .cloned()
      .context("canción de semilla no es un objeto")?;
    catalog.insert(Table::Songs, record)?;
  }

  for genero in seed.generos {
    catalog.insert_genre(&Genre { id_genero: genero.id_genero, nombre_genero: genero.nombre_genero });
  }

  Ok(catalog)
}

#[cfg(test)]
mod tests {
  use super::*;
  use fonoteca_core::ports::CatalogSource;

  #[test]
  fn default_seed_parses_and_fills_both_tables() {
    let catalog = load(None).unwrap();

    assert_eq!(catalog.row_count(Table::Songs), 3);
    assert_eq!(catalog.row_count(Table::Genres), 3);

    let model = catalog.get_projection(Table::Songs).unwrap().unwrap();
    assert_eq!(model.columns[1], "producto");
  }
}
