//! Persistence for the running chant total.
//!
//! The total survives utterances, sessions, and application restarts. It is
//! written after every mutation, so a crash loses at most the increment in
//! flight.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokio::{
    fs::{OpenOptions, create_dir_all, read_to_string},
    io::AsyncWriteExt,
};

const COUNTER_FILE: &str = "counter.toml";

/// Errors that can occur while reading or writing the persisted total.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to access counter file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("failed to deserialize counter file: {0}")]
    DeserializeError(#[from] toml::de::Error),
    #[error("failed to serialize counter file: {0}")]
    SerializeError(#[from] toml::ser::Error),
}

#[derive(Debug, Default, Deserialize, Serialize)]
struct PersistedCounter {
    chant_total: u64,
}

/// Reads the persisted chant total from the data directory. A missing file
/// means the user has never chanted: the total starts at zero.
pub async fn load_total(data_dir: &Path) -> Result<u64, StoreError> {
    let counter_path = data_dir.join(COUNTER_FILE);
    if !counter_path.exists() {
        return Ok(0);
    }

    let contents = read_to_string(counter_path).await?;
    let persisted: PersistedCounter = toml::from_str(&contents)?;
    Ok(persisted.chant_total)
}

/// Writes the chant total to the data directory, overwriting any previous
/// value.
pub async fn save_total(data_dir: &Path, total: u64) -> Result<(), StoreError> {
    create_dir_all(data_dir).await?;

    let counter_path = data_dir.join(COUNTER_FILE);
    let contents = toml::to_string_pretty(&PersistedCounter { chant_total: total })?;

    let mut file = OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .open(counter_path)
        .await?;
    file.write_all(contents.as_bytes()).await?;
    file.sync_all().await?;

    Ok(())
}
