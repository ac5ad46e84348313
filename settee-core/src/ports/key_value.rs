use std::fmt;

use async_trait::async_trait;

use crate::error::Result;

/// String-keyed durable storage holding JSON text values.
///
/// `get` distinguishes an absent key (`Ok(None)`) from a failed read.
#[async_trait]
pub trait KeyValueStore: Send + Sync + fmt::Debug {
    async fn get(&self, key: &str) -> Result<Option<String>>;
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}
