use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Instant;

use crate::config::NewsQuery;
use crate::models::Article;
use crate::pipeline::ArticleSource;

const GNEWS_BASE_URL: &str = "https://gnews.io/api/v4";

#[derive(Debug, Deserialize)]
struct GNewsResponse {
    #[serde(default, rename = "totalArticles")]
    #[allow(dead_code)]
    total_articles: Option<u64>,
    #[serde(default)]
    articles: Option<Vec<Article>>,
}

/// GNews search client. Requests time out after 30 seconds, which surfaces a
/// stalled search as a fetch error.
pub struct GNewsClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GNewsClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            api_key,
            base_url: GNEWS_BASE_URL.to_string(),
        })
    }

    /// Point the client at another host (used by tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub async fn search(&self, query: &NewsQuery) -> Result<Vec<Article>> {
        let url = format!(
            "{}/search?q={}&lang={}&max={}&token={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&query.query),
            urlencoding::encode(&query.lang),
            query.max,
            urlencoding::encode(&self.api_key)
        );

        let t0 = Instant::now();
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to reach GNews")?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| String::from("unknown error"));
            anyhow::bail!("GNews API returned error: {} - {}", status, error_text);
        }

        let gnews_response = response
            .json::<GNewsResponse>()
            .await
            .context("Failed to parse GNews API response")?;

        let articles = gnews_response.articles.unwrap_or_default();
        tracing::debug!(
            count = articles.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            query = %query.query,
            "GNews search finished"
        );

        Ok(articles)
    }
}

#[async_trait]
impl ArticleSource for GNewsClient {
    async fn fetch_articles(&self, query: &NewsQuery) -> Result<Vec<Article>> {
        self.search(query).await
    }
}
