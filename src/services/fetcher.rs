// src/services/fetcher.rs

//! HTTP fetcher with single-hop redirect handling.

use async_trait::async_trait;
use reqwest::header::LOCATION;
use reqwest::{Client, StatusCode};
use url::Url;

use crate::error::{AppError, Result};
use crate::models::CrawlerConfig;
use crate::utils::{build_url, http, resolve_url};

/// A fetched response: the URL that produced the body, its status and text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchedPage {
    pub url: String,
    pub status: u16,
    pub body: String,
}

/// Performs a single GET request.
///
/// Implementations return [`AppError::InvalidUrl`] for URLs that cannot be
/// parsed and [`AppError::Transport`] for network failures.
#[async_trait]
pub trait Fetcher: Send + Sync {
    async fn fetch(&self, url: &str, params: &[(&str, String)]) -> Result<FetchedPage>;
}

/// [`Fetcher`] backed by a `reqwest` client.
#[derive(Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Create a fetcher with a client built from the crawler settings.
    pub fn new(config: &CrawlerConfig) -> Result<Self> {
        Ok(Self::with_client(http::create_async_client(config)?))
    }

    /// Wrap an existing client. The client should not follow redirects.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }

    async fn send(&self, url: &Url) -> Result<reqwest::Response> {
        self.client.get(url.clone()).send().await.map_err(|e| {
            if e.is_builder() {
                AppError::invalid_url(url.as_str(), e)
            } else {
                AppError::transport(url.as_str(), e)
            }
        })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn fetch(&self, url: &str, params: &[(&str, String)]) -> Result<FetchedPage> {
        let url = build_url(url, params)?;
        log::debug!("Processing page request ({url})");

        let mut response = self.send(&url).await?;

        if matches!(
            response.status(),
            StatusCode::MOVED_PERMANENTLY | StatusCode::FOUND
        ) {
            let location = response
                .headers()
                .get(LOCATION)
                .and_then(|value| value.to_str().ok())
                .ok_or_else(|| AppError::invalid_url(url.as_str(), "redirect without Location"))?;
            let target = resolve_url(&url, location)?;
            log::debug!("Following redirect {url} -> {target}");
            response = self.send(&target).await?;
        }

        let final_url = response.url().to_string();
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| AppError::transport(&final_url, e))?;

        Ok(FetchedPage {
            url: final_url,
            status,
            body,
        })
    }
}
