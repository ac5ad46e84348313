use std::{
    fmt,
    path::{Path, PathBuf},
};

use async_trait::async_trait;

use crate::{
    error::{Result, SetteeError},
    ports::KeyValueStore,
};

/// Root directory for the on-disk store.
///
/// `cacache` manages the directory internally (index + content-addressed
/// blobs); nothing else should write into it.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct StoreRoot(PathBuf);

impl StoreRoot {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

impl fmt::Debug for StoreRoot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("StoreRoot").field(&self.0).finish()
    }
}

/// Durable key-value store backed by `cacache`.
#[derive(Clone, Debug)]
pub struct DiskStore {
    root: StoreRoot,
}

impl DiskStore {
    pub fn new(root: StoreRoot) -> Self {
        Self { root }
    }

    pub fn root(&self) -> &StoreRoot {
        &self.root
    }
}

#[async_trait]
impl KeyValueStore for DiskStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let bytes = match cacache::read(self.root.as_path(), key).await {
            Ok(bytes) => bytes,
            Err(cacache::Error::EntryNotFound(_, _)) => return Ok(None),
            Err(cacache::Error::IntegrityError(err)) => {
                return Err(SetteeError::read(
                    key,
                    format!("entry failed integrity check ({err})"),
                ));
            }
            Err(err) => return Err(SetteeError::read(key, err)),
        };

        String::from_utf8(bytes)
            .map(Some)
            .map_err(|err| SetteeError::read(key, err))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        cacache::write(self.root.as_path(), key, value.as_bytes())
            .await
            .map(|_| ())
            .map_err(|err| SetteeError::write(key, err))
    }
}
