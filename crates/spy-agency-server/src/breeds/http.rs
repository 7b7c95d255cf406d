// SPDX-License-Identifier: Apache-2.0

use super::{BreedCatalogBackend, CatalogError};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

pub const DEFAULT_BREED_CATALOG_URL: &str = "https://api.thecatapi.com/v1/breeds";

#[derive(Debug, Deserialize)]
struct BreedRecord {
    name: String,
}

/// TheCatAPI breed listing: a JSON array of objects carrying `name`.
pub struct TheCatApiCatalog {
    url: String,
    client: reqwest::Client,
}

impl TheCatApiCatalog {
    #[must_use]
    pub fn new(url: impl Into<String>, timeout: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .redirect(reqwest::redirect::Policy::limited(3))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());
        Self {
            url: url.into(),
            client,
        }
    }

    #[instrument(name = "breed_catalog_fetch", skip(self), fields(url = %self.url))]
    async fn get_breed_names(&self) -> Result<Vec<String>, CatalogError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError(format!("breed catalog unreachable: {e}")))?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CatalogError(format!(
                "breed catalog returned HTTP {}",
                status.as_u16()
            )));
        }
        let records: Vec<BreedRecord> = resp
            .json()
            .await
            .map_err(|e| CatalogError(format!("breed catalog payload invalid: {e}")))?;
        Ok(records.into_iter().map(|r| r.name).collect())
    }
}

#[async_trait]
impl BreedCatalogBackend for TheCatApiCatalog {
    fn backend_tag(&self) -> &'static str {
        "thecatapi"
    }

    async fn fetch_breed_names(&self) -> Result<Vec<String>, CatalogError> {
        self.get_breed_names().await
    }
}
