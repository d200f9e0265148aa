//! Passive search source.
//!
//! The engine treats the search index as a black box behind the
//! [`PassiveSource`] trait: it only ever asks for account info and walks
//! result pages in order. The shipped implementation talks to the Shodan
//! REST API with the key taken from the process environment.

use async_trait::async_trait;
use serde::Deserialize;

use credsweep_common::error::StartupError;

const API_BASE: &str = "https://api.shodan.io";
pub const API_KEY_VAR: &str = "SHODAN_API_KEY";

/// One match returned by the passive index.
#[derive(Debug, Clone, Deserialize)]
pub struct PassiveMatch {
    #[serde(rename = "ip_str")]
    pub ip: String,
    #[serde(default)]
    pub location: Location,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Location {
    #[serde(default)]
    pub country_name: String,
}

/// One page of search results.
#[derive(Debug, Clone, Deserialize)]
pub struct PassivePage {
    pub matches: Vec<PassiveMatch>,
}

impl PassivePage {
    pub fn is_exhausted(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Account and credit information shown before a passive run.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiInfo {
    pub query_credits: i64,
    pub scan_credits: i64,
}

/// A paginated passive-search index.
#[async_trait]
pub trait PassiveSource: Send + Sync {
    async fn api_info(&self) -> anyhow::Result<ApiInfo>;

    /// Fetches one page (1-based) of matches for `query`.
    async fn host_search(&self, query: &str, page: u32) -> anyhow::Result<PassivePage>;
}

/// Shodan-backed implementation.
pub struct ShodanClient {
    api_key: String,
    client: reqwest::Client,
}

impl ShodanClient {
    /// Reads the API key from the environment. A missing key is fatal for
    /// passive and search modes only; the other modes never construct a
    /// client.
    pub fn from_env() -> Result<Self, StartupError> {
        let api_key = std::env::var(API_KEY_VAR).unwrap_or_default();
        if api_key.is_empty() {
            return Err(StartupError::MissingApiKey);
        }
        Ok(Self {
            api_key,
            client: reqwest::Client::new(),
        })
    }
}

#[async_trait]
impl PassiveSource for ShodanClient {
    async fn api_info(&self) -> anyhow::Result<ApiInfo> {
        let url = format!("{API_BASE}/api-info");
        let info = self
            .client
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(info)
    }

    async fn host_search(&self, query: &str, page: u32) -> anyhow::Result<PassivePage> {
        let url = format!("{API_BASE}/shodan/host/search");
        let page_number = page.to_string();
        let results = self
            .client
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("query", query),
                ("page", page_number.as_str()),
            ])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_pages_deserialize() {
        let raw = r#"{
            "matches": [
                {"ip_str": "203.0.113.7", "location": {"country_name": "Norway"}},
                {"ip_str": "203.0.113.8", "location": {}}
            ],
            "total": 2
        }"#;
        let page: PassivePage = serde_json::from_str(raw).unwrap();
        assert_eq!(page.matches.len(), 2);
        assert_eq!(page.matches[0].ip, "203.0.113.7");
        assert_eq!(page.matches[0].location.country_name, "Norway");
        assert_eq!(page.matches[1].location.country_name, "");
        assert!(!page.is_exhausted());
    }

    #[test]
    fn api_info_deserializes() {
        let raw = r#"{"query_credits": 10, "scan_credits": 7, "plan": "dev"}"#;
        let info: ApiInfo = serde_json::from_str(raw).unwrap();
        assert_eq!(info.query_credits, 10);
        assert_eq!(info.scan_credits, 7);
    }
}
