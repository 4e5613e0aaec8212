//! Resolved probe parameters.
//!
//! Everything the oracle client needs to build its request lives here, so
//! the command-line layer stays a plain clap struct.

use anyhow::{bail, Context, Result};
use std::time::Duration;
use url::{form_urlencoded, Url};

use crate::cli::Args;

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_DECOY_PASSWORD: &str = "password";
pub const DEFAULT_FUNCTION: &str = "login";
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux aarch64; rv:102.0) Gecko/20100101 Firefox/102.0";

#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub target: Url,
    pub timeout: Duration,
    pub decoy_password: String,
    pub function: String,
    pub user_agent: String,
    pub referer: String,
    pub host: Option<String>,
}

impl ProbeConfig {
    /// Defaults for every field except the endpoint.
    pub fn new(target: Url) -> Self {
        let referer = derive_referer(&target);
        ProbeConfig {
            target,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            decoy_password: DEFAULT_DECOY_PASSWORD.to_string(),
            function: DEFAULT_FUNCTION.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            referer,
            host: None,
        }
    }

    pub fn from_args(args: &Args) -> Result<Self> {
        let target = parse_target(&args.target_url)?;
        let mut config = ProbeConfig::new(target)
            .with_timeout(Duration::from_secs(args.timeout));

        config.decoy_password = args.password.clone();
        config.function = args.function.clone();
        config.user_agent = args.user_agent.clone();
        if let Some(referer) = &args.referer {
            config.referer = referer.clone();
        }
        config.host = args.host.clone();

        Ok(config)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Form fields in wire order.
    pub fn form_fields<'a>(&'a self, candidate: &'a str) -> [(&'static str, &'a str); 3] {
        [
            ("username", candidate),
            ("password", self.decoy_password.as_str()),
            ("function", self.function.as_str()),
        ]
    }

    /// `application/x-www-form-urlencoded` body for one candidate.
    pub fn encode_form(&self, candidate: &str) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.form_fields(candidate))
            .finish()
    }
}

pub fn parse_target(raw: &str) -> Result<Url> {
    let url = Url::parse(raw.trim()).with_context(|| format!("Invalid target URL: {}", raw))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => bail!("Unsupported scheme '{}' in target URL {}", other, raw),
    }
}

/// Directory of the endpoint: `http://h/a/b/functions.php?x=1` -> `http://h/a/b/`.
pub fn derive_referer(target: &Url) -> String {
    let mut url = target.clone();
    url.set_query(None);
    url.set_fragment(None);

    let dir = match url.path().rfind('/') {
        Some(idx) => url.path()[..=idx].to_string(),
        None => "/".to_string(),
    };
    url.set_path(&dir);
    url.to_string()
}
