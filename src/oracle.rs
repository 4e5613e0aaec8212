use async_trait::async_trait;
use log::debug;
use reqwest::{header, Client};

use crate::config::ProbeConfig;
use crate::error::ProbeFailure;
use crate::models::ProbeResponse;

pub const ACCEPT: &str = "application/json, text/javascript, */*; q=0.01";
pub const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";
pub const AJAX_MARKER: &str = "XMLHttpRequest";

/// One request per candidate against the login oracle.
#[async_trait]
pub trait Prober {
    async fn probe(&self, candidate: &str) -> Result<ProbeResponse, ProbeFailure>;
}

/// reqwest-backed prober.
///
/// Owns a single `Client` for the whole run so the connection pool and any
/// cookies the target hands out are reused between probes.
pub struct OracleClient {
    client: Client,
    config: ProbeConfig,
}

impl OracleClient {
    pub fn new(config: ProbeConfig) -> Result<Self, anyhow::Error> {
        let client = Client::builder()
            .default_headers(Self::build_headers(&config)?)
            .cookie_store(true)
            .timeout(config.timeout)
            .build()?;

        Ok(OracleClient { client, config })
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// The fixed header set sent with every probe.
    pub fn build_headers(config: &ProbeConfig) -> Result<header::HeaderMap, anyhow::Error> {
        let mut headers = header::HeaderMap::new();
        headers.insert(header::USER_AGENT, header::HeaderValue::from_str(&config.user_agent)?);
        headers.insert(header::ACCEPT, header::HeaderValue::from_static(ACCEPT));
        headers.insert(header::CONTENT_TYPE, header::HeaderValue::from_static(FORM_CONTENT_TYPE));
        headers.insert("x-requested-with", header::HeaderValue::from_static(AJAX_MARKER));
        headers.insert(header::REFERER, header::HeaderValue::from_str(&config.referer)?);
        if let Some(host) = &config.host {
            headers.insert(header::HOST, header::HeaderValue::from_str(host)?);
        }
        Ok(headers)
    }
}

#[async_trait]
impl Prober for OracleClient {
    async fn probe(&self, candidate: &str) -> Result<ProbeResponse, ProbeFailure> {
        let timeout = self.config.timeout;

        let resp = self.client
            .post(self.config.target.clone())
            .body(self.config.encode_form(candidate))
            .send()
            .await
            .map_err(|e| ProbeFailure::from_reqwest(e, timeout))?;

        let status = resp.status();
        let body = resp.text().await.map_err(|e| ProbeFailure::from_reqwest(e, timeout))?;
        debug!("{} -> HTTP {} ({} bytes)", candidate, status, body.len());

        let value: serde_json::Value = serde_json::from_str(&body)
            .map_err(|e| ProbeFailure::MalformedBody(e.to_string()))?;

        ProbeResponse::from_value(value).ok_or(ProbeFailure::NotAnObject)
    }
}
