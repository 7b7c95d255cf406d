// SPDX-License-Identifier: Apache-2.0

use crate::breeds::DEFAULT_BREED_CATALOG_URL;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub max_body_bytes: usize,
    pub request_timeout: Duration,
    pub cors_allowed_origins: Vec<String>,
    pub enable_audit_log: bool,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            max_body_bytes: 64 * 1024,
            request_timeout: Duration::from_secs(10),
            cors_allowed_origins: vec!["http://localhost".to_string()],
            enable_audit_log: true,
        }
    }
}

#[derive(Debug, Clone)]
pub struct BreedCatalogConfig {
    pub url: String,
    pub cache_ttl: Duration,
    pub fetch_timeout: Duration,
}

impl Default for BreedCatalogConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_BREED_CATALOG_URL.to_string(),
            cache_ttl: Duration::from_secs(3600),
            fetch_timeout: Duration::from_secs(10),
        }
    }
}
