//! JSON file helpers shared by the stores.
//!
//! Reads treat a missing file as "no records yet" so a fresh install works
//! without a seeding step. Writes go through a temp file and a rename so a
//! crash mid-write cannot leave a half-encoded store behind.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::fs;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};

/// Reads and decodes a JSON file; a missing file yields `T::default()`.
pub(crate) async fn read_json_or_default<T>(path: &Path) -> StoreResult<T>
where
    T: DeserializeOwned + Default,
{
    let bytes = match fs::read(path).await {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
        Err(err) => return Err(StoreError::io(path, err)),
    };

    serde_json::from_slice(&bytes).map_err(|err| StoreError::encoding(path, err))
}

/// Encodes a value and writes it atomically (temp file + rename).
pub(crate) async fn write_json<T>(path: &Path, value: &T) -> StoreResult<()>
where
    T: Serialize,
{
    let bytes =
        serde_json::to_vec_pretty(value).map_err(|err| StoreError::encoding(path, err))?;

    let tmp = path.with_extension(format!("tmp-{}", Uuid::new_v4()));
    fs::write(&tmp, &bytes)
        .await
        .map_err(|err| StoreError::io(&tmp, err))?;
    fs::rename(&tmp, path)
        .await
        .map_err(|err| StoreError::io(path, err))?;

    Ok(())
}
