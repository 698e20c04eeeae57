use std::collections::HashMap;

use serde_json::Value;

use fonoteca_core::domain::{Genre, Record, Song};
use fonoteca_core::ports::{CatalogSource, SourceError, Table, TableModel};

/// Columnas del esquema de canciones, en el orden del esquema original.
const SONG_COLUMNS: [&str; 9] = [
  "codigo",
  "titulo",
  "artista",
  "album",
  "duracion",
  "precio",
  "ventas",
  "id_genero",
  "fecha_agregado",
];

/// Catálogo en memoria: el adaptador del puerto de datos para pruebas y
/// para la demo de consola. Cada tabla declara sus columnas y guarda sus
/// filas como registros planos.
#[derive(Debug, Default)]
pub struct MemoryCatalog {
  tables: HashMap<Table, StoredTable>,
}

#[derive(Debug)]
struct StoredTable {
  columns: Vec<String>,
  rows: Vec<Record>,
}

impl MemoryCatalog {
  pub fn new() -> Self {
    MemoryCatalog::default()
  }

  /// Declara una tabla con su lista ordenada de columnas. Redeclararla
  /// sustituye columnas y filas.
  pub fn create_table(&mut self, table: Table, columns: &[&str]) {
    let columns = columns.iter().map(|c| c.to_string()).collect();
    self.tables.insert(table, StoredTable { columns, rows: Vec::new() });
  }

  /// Inserta un registro en una tabla ya declarada.
  pub fn insert(&mut self, table: Table, record: Record) -> Result<(), SourceError> {
    let stored = self
      .tables
      .get_mut(&table)
      .ok_or_else(|| SourceError::UnknownTable(table.to_string()))?;
    stored.rows.push(record);
    Ok(())
  }

  /// Alta de género. La tabla `generos` se declara sola la primera vez.
  pub fn insert_genre(&mut self, genre: &Genre) {
    self
      .tables
      .entry(Table::Genres)
      .or_insert_with(|| StoredTable {
        columns: vec!["id_genero".to_string(), "nombre_genero".to_string()],
        rows: Vec::new(),
      })
      .rows
      .push(genre.to_record());
  }

  /// Alta o reemplazo de canción por identidad: una segunda inserción con
  /// el mismo `codigo` sustituye a la primera (el contrato de igualdad de
  /// la entidad, hecho operación).
  pub fn upsert_song(&mut self, song: &Song) {
    let stored = self.tables.entry(Table::Songs).or_insert_with(|| StoredTable {
      columns: SONG_COLUMNS.iter().map(|c| c.to_string()).collect(),
      rows: Vec::new(),
    });

    let code = Value::from(song.codigo.clone());
    match stored.rows.iter_mut().find(|row| row.get("codigo") == Some(&code)) {
      Some(row) => *row = song.to_record(),
      None => stored.rows.push(song.to_record()),
    }
  }

  pub fn row_count(&self, table: Table) -> usize {
    self.tables.get(&table).map_or(0, |t| t.rows.len())
  }
}

impl CatalogSource for MemoryCatalog {
  /// Una tabla nunca declarada se comporta como vacía: para el pipeline
  /// es el mismo desenlace que una tabla sin filas.
  fn fetch_all(&self, table: Table) -> Result<Vec<Record>, SourceError> {
    Ok(self.tables.get(&table).map_or_else(Vec::new, |t| t.rows.clone()))
  }

  fn get_projection(&self, table: Table) -> Result<Option<TableModel>, SourceError> {
    Ok(
      self
        .tables
        .get(&table)
        .map(|t| TableModel { columns: t.columns.clone(), data: t.rows.clone() }),
    )
  }
}
