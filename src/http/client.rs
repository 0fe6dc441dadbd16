//! Low-level HTTP client: `MarketDataHttp`.
//!
//! One method per upstream endpoint. Returns wire types (conversion to domain
//! types happens in the sub-clients). Every request is bounded by a single
//! client-level timeout.

use crate::domain::coin::wire::{CoinDetailResponse, CoinMarketResponse};
use crate::domain::market::wire::{GlobalResponse, TrendingResponse};
use crate::domain::price_history::wire::MarketChartResponse;
use crate::error::HttpError;
use crate::network::{API_KEY_HEADER, DEFAULT_REQUEST_TIMEOUT_MS};

use futures_util::future::{self, Either};
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Duration;

/// Low-level HTTP client for a CoinGecko-compatible market data API.
pub struct MarketDataHttp {
    base_url: String,
    client: Client,
    api_key: Option<String>,
    timeout: Duration,
}

impl MarketDataHttp {
    pub fn new(base_url: &str) -> Result<Self, HttpError> {
        Self::with_options(
            base_url,
            None,
            Duration::from_millis(DEFAULT_REQUEST_TIMEOUT_MS),
        )
    }

    pub fn with_options(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, HttpError> {
        #[allow(unused_mut)]
        let mut builder = Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        {
            builder = builder.pool_max_idle_per_host(4);
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: builder.build()?,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    // ── Coins ────────────────────────────────────────────────────────────

    /// First page of coins ordered by market cap, with sparkline and
    /// 1h/24h/7d change.
    pub async fn get_coin_markets(
        &self,
        vs_currency: &str,
        per_page: u32,
    ) -> Result<Vec<CoinMarketResponse>, HttpError> {
        let url = format!(
            "{}/coins/markets?vs_currency={}&order=market_cap_desc&per_page={}&page=1&sparkline=true&price_change_percentage=1h,24h,7d",
            self.base_url,
            urlencoding::encode(vs_currency),
            per_page
        );
        self.get(&url).await
    }

    pub async fn get_coin_detail(&self, id: &str) -> Result<CoinDetailResponse, HttpError> {
        let url = format!(
            "{}/coins/{}?localization=false&tickers=false&market_data=true&community_data=false&developer_data=false",
            self.base_url,
            urlencoding::encode(id)
        );
        self.get(&url).await
    }

    pub async fn get_market_chart(
        &self,
        id: &str,
        vs_currency: &str,
        days: u32,
    ) -> Result<MarketChartResponse, HttpError> {
        let url = format!(
            "{}/coins/{}/market_chart?vs_currency={}&days={}",
            self.base_url,
            urlencoding::encode(id),
            urlencoding::encode(vs_currency),
            days
        );
        self.get(&url).await
    }

    // ── Market ───────────────────────────────────────────────────────────

    pub async fn get_global(&self) -> Result<GlobalResponse, HttpError> {
        let url = format!("{}/global", self.base_url);
        self.get(&url).await
    }

    pub async fn get_trending(&self) -> Result<TrendingResponse, HttpError> {
        let url = format!("{}/search/trending", self.base_url);
        self.get(&url).await
    }

    // ── Internal ─────────────────────────────────────────────────────────

    async fn get<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        tracing::debug!(url, "GET");
        let request = std::pin::pin!(self.do_request(url));
        let deadline = futures_timer::Delay::new(self.timeout);

        match future::select(request, deadline).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => {
                tracing::debug!(url, timeout_ms = self.timeout.as_millis() as u64, "Request timed out");
                Err(HttpError::Timeout)
            }
        }
    }

    async fn do_request<T: DeserializeOwned>(&self, url: &str) -> Result<T, HttpError> {
        let mut req = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json");
        if let Some(key) = &self.api_key {
            req = req.header(API_KEY_HEADER, key);
        }

        let resp = req.send().await?;
        let status = resp.status();

        if status.is_success() {
            let parsed = resp.json::<T>().await?;
            return Ok(parsed);
        }

        let retry_after_ms = resp
            .headers()
            .get(reqwest::header::RETRY_AFTER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse::<u64>().ok())
            .map(|secs| secs * 1000);
        let status_code = status.as_u16();
        let body_text = resp.text().await.unwrap_or_default();

        match status_code {
            401 | 403 => Err(HttpError::Unauthorized),
            404 => Err(HttpError::NotFound(body_text)),
            429 => Err(HttpError::RateLimited { retry_after_ms }),
            400..=499 => Err(HttpError::BadRequest(body_text)),
            _ => Err(HttpError::ServerError {
                status: status_code,
                body: body_text,
            }),
        }
    }
}

impl Clone for MarketDataHttp {
    fn clone(&self) -> Self {
        Self {
            base_url: self.base_url.clone(),
            client: self.client.clone(),
            api_key: self.api_key.clone(),
            timeout: self.timeout,
        }
    }
}

impl std::fmt::Debug for MarketDataHttp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MarketDataHttp")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}
