//! Persistence for trained Q-tables
//!
//! A trained table is written as two files: the flat value array itself and a
//! JSON metadata sidecar describing its shape and the encoder it belongs to,
//! so an evaluation run can rebuild the exact same indexing.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::encoder::EncoderKind;
use super::qtable::QTable;
use crate::error::PersistenceError;

/// Metadata saved next to the value array
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableMetadata {
    /// Sizes of the state feature axes
    pub dims: Vec<usize>,

    /// Number of actions per state
    pub action_count: usize,

    /// Encoder variant the table was trained with
    pub encoder: EncoderKind,

    /// Grid size the encoder was built for
    pub grid_size: usize,

    /// Number of episodes trained
    pub episodes_trained: usize,

    /// Version identifier for compatibility checking
    pub version: String,
}

impl TableMetadata {
    pub fn new(
        table: &QTable,
        encoder: EncoderKind,
        grid_size: usize,
        episodes_trained: usize,
    ) -> Self {
        Self {
            dims: table.dims().to_vec(),
            action_count: table.action_count(),
            encoder,
            grid_size,
            episodes_trained,
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

fn meta_path(path: &Path) -> std::path::PathBuf {
    path.with_extension("meta.json")
}

/// Save a Q-table to `path`, with metadata at `<path stem>.meta.json`
///
/// The value file holds the flat numeric array; its logical shape is the
/// state dims concatenated with the action count. Parent directories are
/// created if missing.
pub fn save_table(table: &QTable, meta: &TableMetadata, path: &Path) -> Result<(), PersistenceError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|source| PersistenceError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
    }

    let values = serde_json::to_string(table.values()).map_err(|source| PersistenceError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    std::fs::write(path, values).map_err(|source| PersistenceError::Write {
        path: path.to_path_buf(),
        source,
    })?;

    let meta_path = meta_path(path);
    let meta_json =
        serde_json::to_string_pretty(meta).map_err(|source| PersistenceError::Parse {
            path: meta_path.clone(),
            source,
        })?;
    std::fs::write(&meta_path, meta_json).map_err(|source| PersistenceError::Write {
        path: meta_path,
        source,
    })
}

/// Load a Q-table previously written by [`save_table`]
///
/// The value count is checked against the shape the metadata declares.
pub fn load_table(path: &Path) -> Result<(QTable, TableMetadata), PersistenceError> {
    let meta_path = meta_path(path);
    let meta_json =
        std::fs::read_to_string(&meta_path).map_err(|source| PersistenceError::Read {
            path: meta_path.clone(),
            source,
        })?;
    let meta: TableMetadata =
        serde_json::from_str(&meta_json).map_err(|source| PersistenceError::Parse {
            path: meta_path,
            source,
        })?;

    let values_json = std::fs::read_to_string(path).map_err(|source| PersistenceError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let values: Vec<f32> =
        serde_json::from_str(&values_json).map_err(|source| PersistenceError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

    let expected = meta.dims.iter().product::<usize>() * meta.action_count;
    if values.len() != expected {
        return Err(PersistenceError::LengthMismatch {
            values: values.len(),
            expected,
        });
    }

    let table = QTable::from_parts(meta.dims.clone(), meta.action_count, values);
    Ok((table, meta))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rl::encoder::StateId;
    use tempfile::TempDir;

    #[test]
    fn test_save_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("models").join("qtable.json");

        let mut table = QTable::new(vec![4, 4], 4);
        table.update(StateId(7), 2, 5.0, StateId(1), 0.5, 0.9);
        let meta = TableMetadata::new(&table, EncoderKind::Raw, 10, 1000);

        save_table(&table, &meta, &path).unwrap();
        let (loaded, loaded_meta) = load_table(&path).unwrap();

        assert_eq!(loaded.values(), table.values());
        assert_eq!(loaded.dims(), table.dims());
        assert_eq!(loaded_meta.encoder, EncoderKind::Raw);
        assert_eq!(loaded_meta.episodes_trained, 1000);
    }

    #[test]
    fn test_load_rejects_truncated_values() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("qtable.json");

        let table = QTable::new(vec![2, 2], 4);
        let meta = TableMetadata::new(&table, EncoderKind::Raw, 10, 0);
        save_table(&table, &meta, &path).unwrap();

        // Overwrite the value file with too few entries.
        std::fs::write(&path, "[0.0, 0.0]").unwrap();

        assert!(matches!(
            load_table(&path),
            Err(PersistenceError::LengthMismatch {
                values: 2,
                expected: 16
            })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.json");
        assert!(matches!(
            load_table(&path),
            Err(PersistenceError::Read { .. })
        ));
    }
}
