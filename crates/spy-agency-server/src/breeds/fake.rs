// SPDX-License-Identifier: Apache-2.0

use super::{BreedCatalogBackend, CatalogError};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::Mutex;

/// In-memory catalog for tests and offline runs.
pub struct FakeBreedCatalog {
    pub breeds: Mutex<Vec<String>>,
    pub fetch_calls: AtomicU64,
    pub fail: AtomicBool,
    pub delay: Duration,
}

impl Default for FakeBreedCatalog {
    fn default() -> Self {
        Self {
            breeds: Mutex::new(Vec::new()),
            fetch_calls: AtomicU64::new(0),
            fail: AtomicBool::new(false),
            delay: Duration::from_millis(0),
        }
    }
}

impl FakeBreedCatalog {
    #[must_use]
    pub fn with_breeds(names: &[&str]) -> Self {
        Self {
            breeds: Mutex::new(names.iter().map(|n| (*n).to_string()).collect()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }
}

#[async_trait]
impl BreedCatalogBackend for FakeBreedCatalog {
    fn backend_tag(&self) -> &'static str {
        "fake"
    }

    async fn fetch_breed_names(&self) -> Result<Vec<String>, CatalogError> {
        self.fetch_calls.fetch_add(1, Ordering::Relaxed);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail.load(Ordering::Relaxed) {
            return Err(CatalogError("fake catalog outage".to_string()));
        }
        Ok(self.breeds.lock().await.clone())
    }
}
