use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde_json::{json, Value};
use url::Url;

use super::PrayerStore;
use crate::config::BackendConfig;
use crate::prayer::{prayer_from_record, PrayerData};
use crate::version::VersionRequirement;
use crate::{Error, Result};

/// PostgREST-style backend client (`<base>/rest/v1/<table>`)
pub struct RestStore {
    client: Client,
    base: Url,
    api_key: Option<String>,
    author_token: Option<String>,
    prayer_table: String,
    config_table: String,
    timeout_secs: u64,
}

impl RestStore {
    pub fn new(config: &BackendConfig) -> Result<Self> {
        let base_url = config
            .base_url
            .as_deref()
            .ok_or_else(|| Error::NotConfigured("backend.base_url".to_string()))?;

        // Url::join drops the last segment unless the base ends with '/'
        let mut base = Url::parse(base_url)?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .user_agent(concat!("prayerboard/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base,
            api_key: config.api_key.clone(),
            author_token: config.author_token.clone(),
            prayer_table: config.prayer_table.clone(),
            config_table: config.config_table.clone(),
            timeout_secs: config.request_timeout_secs,
        })
    }

    fn endpoint(&self, table: &str) -> Result<Url> {
        Ok(self.base.join("rest/v1/")?.join(table)?)
    }

    fn authorize(&self, request: RequestBuilder, token: Option<&str>) -> RequestBuilder {
        let mut request = request;
        if let Some(key) = &self.api_key {
            request = request.header("apikey", key);
        }
        match token.or(self.api_key.as_deref()) {
            Some(bearer) => request.bearer_auth(bearer),
            None => request,
        }
    }

    fn map_send_error(&self, err: reqwest::Error) -> Error {
        if err.is_timeout() {
            Error::Timeout(self.timeout_secs)
        } else {
            Error::Http(err)
        }
    }

    async fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(Error::Backend {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl PrayerStore for RestStore {
    async fn fetch_latest(&self) -> Result<Option<PrayerData>> {
        let url = self.endpoint(&self.prayer_table)?;
        let request = self.client.get(url).query(&[
            ("select", "*"),
            ("order", "created_at.desc"),
            ("limit", "1"),
        ]);

        let response = self
            .authorize(request, None)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let rows: Vec<Value> = Self::check(response).await?.json().await?;

        tracing::debug!(rows = rows.len(), "Fetched latest prayer list");
        Ok(rows.first().and_then(prayer_from_record))
    }

    async fn upload(&self, data: &PrayerData) -> Result<()> {
        let token = self
            .author_token
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| Error::NotConfigured("backend.author_token".to_string()))?;

        let url = self.endpoint(&self.prayer_table)?;
        let body = json!({
            "title": data.title,
            "content": {
                "sections": data.sections,
                "verse": data.verse,
            },
        });
        let request = self
            .client
            .post(url)
            .header("Prefer", "return=minimal")
            .json(&body);

        let response = self
            .authorize(request, Some(token))
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        Self::check(response).await?;

        tracing::info!(title = %data.title, "Published prayer list");
        Ok(())
    }

    async fn min_version(&self, platform: &str) -> Result<Option<VersionRequirement>> {
        let url = self.endpoint(&self.config_table)?;
        let platform_filter = format!("eq.{}", platform);
        let request = self.client.get(url).query(&[
            ("select", "min_version,min_version_code"),
            ("platform", platform_filter.as_str()),
        ]);

        let response = self
            .authorize(request, None)
            .send()
            .await
            .map_err(|e| self.map_send_error(e))?;
        let rows: Vec<VersionRequirement> = Self::check(response).await?.json().await?;
        Ok(rows.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(base: &str) -> BackendConfig {
        BackendConfig {
            base_url: Some(base.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_missing_base_url_is_not_configured() {
        let err = RestStore::new(&BackendConfig::default()).err().unwrap();
        assert!(matches!(err, Error::NotConfigured(_)));
    }

    #[test]
    fn test_endpoint_keeps_base_path() {
        let store = RestStore::new(&config("https://example.com/api")).unwrap();
        assert_eq!(
            store.endpoint("prayers").unwrap().as_str(),
            "https://example.com/api/rest/v1/prayers"
        );

        let store = RestStore::new(&config("https://example.com")).unwrap();
        assert_eq!(
            store.endpoint("app_config").unwrap().as_str(),
            "https://example.com/rest/v1/app_config"
        );
    }

    #[tokio::test]
    async fn test_upload_without_author_token_fails_fast() {
        let store = RestStore::new(&config("https://example.invalid")).unwrap();
        let err = store.upload(&PrayerData::default()).await.unwrap_err();
        assert!(matches!(err, Error::NotConfigured(_)));
    }
}
