//! Header-image search backed by the Pexels API.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};
use uuid::Uuid;

const PEXELS_SEARCH_URL: &str = "https://api.pexels.com/v1/search";
const PER_PAGE: u32 = 12;

/// Generic queries tried once when a search comes back empty.
pub const FALLBACK_QUERIES: &[&str] = &[
    "technology",
    "business",
    "office",
    "abstract",
    "work",
    "code",
    "minimal",
];

#[async_trait]
pub trait ImageSearch: Send + Sync {
    /// Up to twelve landscape image URLs for `query`; empty on failure.
    async fn search_images(&self, query: &str) -> Vec<String>;
}

#[derive(Debug, Deserialize)]
struct PexelsResponse {
    #[serde(default)]
    photos: Vec<PexelsPhoto>,
}

#[derive(Debug, Deserialize)]
struct PexelsPhoto {
    src: PexelsSource,
}

#[derive(Debug, Deserialize)]
struct PexelsSource {
    large2x: String,
}

#[derive(Clone)]
pub struct PexelsClient {
    client: Client,
    api_key: Option<String>,
}

impl PexelsClient {
    pub fn new(api_key: Option<String>, timeout: std::time::Duration) -> Self {
        Self {
            client: Client::builder().timeout(timeout).build().unwrap_or_default(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    async fn search_once(&self, api_key: &str, query: &str) -> Option<Vec<String>> {
        let url = format!(
            "{PEXELS_SEARCH_URL}?query={}&per_page={PER_PAGE}&orientation=landscape",
            urlencoding::encode(query)
        );
        let response = match self
            .client
            .get(&url)
            .header("Authorization", api_key)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                warn!("Image search request failed: {e}");
                return None;
            }
        };
        if !response.status().is_success() {
            warn!("Image search returned {}", response.status());
            return None;
        }
        match response.json::<PexelsResponse>().await {
            Ok(body) => Some(body.photos.into_iter().map(|p| p.src.large2x).collect()),
            Err(e) => {
                warn!("Image search reply could not be parsed: {e}");
                None
            }
        }
    }
}

/// Picks one of [`FALLBACK_QUERIES`] at random.
pub fn fallback_query() -> &'static str {
    let index = Uuid::new_v4().as_bytes()[0] as usize % FALLBACK_QUERIES.len();
    FALLBACK_QUERIES[index]
}

#[async_trait]
impl ImageSearch for PexelsClient {
    async fn search_images(&self, query: &str) -> Vec<String> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }
        let Some(api_key) = self.api_key.as_deref() else {
            warn!("PEXELS_API_KEY is not set; image search disabled");
            return Vec::new();
        };

        match self.search_once(api_key, query).await {
            Some(urls) if !urls.is_empty() => urls,
            _ => {
                let fallback = fallback_query();
                info!("No images for {query:?}, falling back to {fallback:?}");
                self.search_once(api_key, fallback).await.unwrap_or_default()
            }
        }
    }
}
