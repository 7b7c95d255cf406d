// SPDX-License-Identifier: Apache-2.0

//! Breed lookup cache in front of the external cat breed catalog.
//!
//! The list is cached for a fixed TTL. Concurrent misses share one outbound
//! fetch. A failed fetch is reported as `DependencyUnavailable` and is not
//! cached; there is no stale fallback.

use async_trait::async_trait;
use spy_agency_model::AgencyError;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, info, warn};

mod fake;
mod http;

pub use fake::FakeBreedCatalog;
pub use http::{TheCatApiCatalog, DEFAULT_BREED_CATALOG_URL};

#[derive(Debug)]
pub struct CatalogError(pub String);

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for CatalogError {}

#[async_trait]
pub trait BreedCatalogBackend: Send + Sync + 'static {
    fn backend_tag(&self) -> &'static str {
        "unknown"
    }

    async fn fetch_breed_names(&self) -> Result<Vec<String>, CatalogError>;
}

struct CachedBreeds {
    names: Arc<Vec<String>>,
    fetched_at: Instant,
}

pub struct BreedCache {
    backend: Arc<dyn BreedCatalogBackend>,
    ttl: Duration,
    entry: Mutex<Option<CachedBreeds>>,
    refresh: Mutex<()>,
}

impl BreedCache {
    #[must_use]
    pub fn new(backend: Arc<dyn BreedCatalogBackend>, ttl: Duration) -> Self {
        Self {
            backend,
            ttl,
            entry: Mutex::new(None),
            refresh: Mutex::new(()),
        }
    }

    async fn fresh(&self) -> Option<Arc<Vec<String>>> {
        let entry = self.entry.lock().await;
        entry
            .as_ref()
            .filter(|cached| cached.fetched_at.elapsed() < self.ttl)
            .map(|cached| Arc::clone(&cached.names))
    }

    pub async fn fetch_breeds(&self) -> Result<Arc<Vec<String>>, AgencyError> {
        if let Some(names) = self.fresh().await {
            return Ok(names);
        }
        let _flight = self.refresh.lock().await;
        // A concurrent miss may have refreshed while we waited.
        if let Some(names) = self.fresh().await {
            debug!("breed catalog served by concurrent refresh");
            return Ok(names);
        }

        let names = self.backend.fetch_breed_names().await.map_err(|e| {
            warn!(backend = self.backend.backend_tag(), error = %e, "breed catalog fetch failed");
            AgencyError::dependency_unavailable(format!("failed to fetch breed catalog: {e}"))
        })?;
        let names = Arc::new(names);
        *self.entry.lock().await = Some(CachedBreeds {
            names: Arc::clone(&names),
            fetched_at: Instant::now(),
        });
        info!(
            backend = self.backend.backend_tag(),
            breeds = names.len(),
            ttl_secs = self.ttl.as_secs(),
            "breed catalog refreshed"
        );
        Ok(names)
    }

    /// Exact, case-sensitive membership check against the catalog.
    pub async fn validate_breed(&self, breed: &str) -> Result<(), AgencyError> {
        let breeds = self.fetch_breeds().await?;
        if breeds.iter().any(|known| known == breed) {
            return Ok(());
        }
        Err(
            AgencyError::invalid_input(format!("breed '{breed}' is not valid"))
                .with_detail("breed", breed)
                .with_detail("available_breeds", &breeds.join(", ")),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use spy_agency_model::ErrorKind;
    use std::sync::atomic::Ordering;

    fn cache_with(fake: &Arc<FakeBreedCatalog>, ttl: Duration) -> Arc<BreedCache> {
        let backend: Arc<dyn BreedCatalogBackend> = fake.clone();
        Arc::new(BreedCache::new(backend, ttl))
    }

    #[tokio::test(start_paused = true)]
    async fn cached_list_is_reused_until_ttl_expires() {
        let fake = Arc::new(FakeBreedCatalog::with_breeds(&["Abyssinian", "Bengal"]));
        let cache = cache_with(&fake, Duration::from_secs(3600));

        cache.validate_breed("Bengal").await.expect("known breed");
        cache.fetch_breeds().await.expect("cached");
        assert_eq!(fake.fetch_calls.load(Ordering::Relaxed), 1);

        tokio::time::advance(Duration::from_secs(3599)).await;
        cache.fetch_breeds().await.expect("still cached");
        assert_eq!(fake.fetch_calls.load(Ordering::Relaxed), 1);

        tokio::time::advance(Duration::from_secs(2)).await;
        cache.fetch_breeds().await.expect("refetched");
        assert_eq!(fake.fetch_calls.load(Ordering::Relaxed), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn concurrent_misses_share_one_fetch() {
        let fake = Arc::new(
            FakeBreedCatalog::with_breeds(&["Bengal"]).with_delay(Duration::from_millis(250)),
        );
        let cache = cache_with(&fake, Duration::from_secs(60));

        let mut set = tokio::task::JoinSet::new();
        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            set.spawn(async move { cache.fetch_breeds().await });
        }
        while let Some(joined) = set.join_next().await {
            let names = joined.expect("join").expect("breeds");
            assert_eq!(names.as_slice(), ["Bengal".to_string()]);
        }
        assert_eq!(fake.fetch_calls.load(Ordering::Relaxed), 1);
    }

    #[tokio::test]
    async fn failures_are_reported_and_not_cached() {
        let fake = Arc::new(FakeBreedCatalog::with_breeds(&["Bengal"]));
        fake.fail.store(true, Ordering::Relaxed);
        let cache = cache_with(&fake, Duration::from_secs(60));

        let err = cache.validate_breed("Bengal").await.expect_err("outage");
        assert_eq!(err.kind, ErrorKind::DependencyUnavailable);

        fake.fail.store(false, Ordering::Relaxed);
        cache.validate_breed("Bengal").await.expect("recovered");
        assert_eq!(fake.fetch_calls.load(Ordering::Relaxed), 2);
    }

    #[tokio::test]
    async fn unknown_breed_lists_available_names() {
        let fake = Arc::new(FakeBreedCatalog::with_breeds(&["Abyssinian", "Bengal"]));
        let cache = cache_with(&fake, Duration::from_secs(60));

        let err = cache.validate_breed("bengal").await.expect_err("case sensitive");
        assert_eq!(err.kind, ErrorKind::InvalidInput);
        assert_eq!(
            err.details.get("available_breeds").map(String::as_str),
            Some("Abyssinian, Bengal")
        );
    }
}
