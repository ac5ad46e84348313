use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use settee_core::{KeyValueStore, MemoryStore, Result, SetteeError};

/// Memory-backed store whose reads and writes can be made to fail, and
/// which records every successful write in order.
#[derive(Debug, Clone, Default)]
pub struct FlakyStore {
    inner: MemoryStore,
    fail_reads: Arc<AtomicBool>,
    fail_writes: Arc<AtomicBool>,
    write_delay: Arc<Mutex<Option<Duration>>>,
    writes: Arc<Mutex<Vec<(String, String)>>>,
}

impl FlakyStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(key: &str, value: &str) -> Self {
        Self {
            inner: MemoryStore::with_entries([(key, value)]),
            ..Self::default()
        }
    }

    pub fn shared(&self) -> Arc<dyn KeyValueStore> {
        Arc::new(self.clone())
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Suspend every write for `delay` before applying it.
    pub fn delay_writes(&self, delay: Duration) {
        *self.write_delay.lock().unwrap() = Some(delay);
    }

    pub fn raw(&self, key: &str) -> Option<String> {
        self.inner.raw(key)
    }

    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }

    pub fn writes_to(&self, key: &str) -> usize {
        self.writes
            .lock()
            .unwrap()
            .iter()
            .filter(|(written, _)| written == key)
            .count()
    }
}

#[async_trait]
impl KeyValueStore for FlakyStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(SetteeError::read(key, "injected read failure"));
        }
        self.inner.get(key).await
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let delay = *self.write_delay.lock().unwrap();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(SetteeError::write(key, "injected write failure"));
        }
        self.inner.set(key, value).await?;
        self.writes
            .lock()
            .unwrap()
            .push((key.to_string(), value.to_string()));
        Ok(())
    }
}
