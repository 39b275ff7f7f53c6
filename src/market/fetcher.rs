use crate::market::asset::{Asset, AssetList};
use crate::market::error::MarketFetchError;
use reqwest::header;
use serde::Deserialize;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, warn};

pub trait AssetSource {
    fn fetch_assets(
        &self,
        limit: u32,
    ) -> impl Future<Output = Result<Vec<Asset>, MarketFetchError>> + Send;
}

#[derive(Debug, Deserialize)]
struct AssetsResponse {
    data: Vec<Asset>,
}

#[derive(Clone, Debug)]
pub struct CoinCapClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl CoinCapClient {
    pub fn new(
        base_url: &str,
        api_key: Option<String>,
        timeout: Duration,
    ) -> Result<Self, MarketFetchError> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.filter(|key| !key.trim().is_empty()),
        })
    }

    fn assets_url(&self) -> String {
        format!("{}/assets", self.base_url)
    }

    fn assets_request(&self, limit: u32) -> reqwest::RequestBuilder {
        let http_req_build = self
            .http_client
            .get(self.assets_url())
            .query(&[("limit", limit)])
            .header(header::ACCEPT, "application/json");

        match &self.api_key {
            Some(api_key) => http_req_build.bearer_auth(api_key),
            None => http_req_build,
        }
    }
}

impl AssetSource for CoinCapClient {
    async fn fetch_assets(&self, limit: u32) -> Result<Vec<Asset>, MarketFetchError> {
        debug!("Sending request for {} assets to {}", limit, self.base_url);
        let response = self.assets_request(limit).send().await?;
        check_status(response.status())?;

        parse_assets_body(&response.text().await?)
    }
}

fn check_status(status: reqwest::StatusCode) -> Result<(), MarketFetchError> {
    if !status.is_success() {
        return Err(MarketFetchError::HttpStatus(status));
    }
    Ok(())
}

/// Parses `{"data": [...]}`. An empty `data` array counts as a failure.
pub fn parse_assets_body(body: &str) -> Result<Vec<Asset>, MarketFetchError> {
    let response: AssetsResponse = serde_json::from_str(body)?;
    if response.data.is_empty() {
        return Err(MarketFetchError::EmptyBody);
    }
    Ok(response.data)
}

pub async fn fetch_or_fallback<S: AssetSource>(source: &S, limit: u32) -> AssetList {
    match source.fetch_assets(limit).await {
        Ok(assets) => AssetList::live(assets),
        Err(error) => {
            warn!("Failed to fetch market data, using fallback: {}", error);
            AssetList::fallback()
        }
    }
}
