use std::time::Duration;

use log::debug;
use serde::Serialize;

use hiscore_shared::ScoreRecord;

use super::{parse_top_scores, AuthorityError, RemoteAuthority};

/// Contains Config properties which will be used by the [`HttpAuthority`]
#[derive(Clone, Debug)]
pub struct HttpAuthorityConfig {
    /// Scheme, host and port of the score server, without a trailing path
    pub base_url: String,
    /// Path that accepts a POSTed `{"name", "score"}` JSON body
    pub submit_path: String,
    /// Path that answers a GET with the top scores as a JSON array
    pub fetch_path: String,
    /// Per-request timeout. Ignored on wasm, where the browser owns timeouts
    pub timeout: Duration,
}

impl Default for HttpAuthorityConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8080".to_string(),
            submit_path: "/api/save_high_score".to_string(),
            fetch_path: "/api/load_high_scores".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

impl HttpAuthorityConfig {
    /// Default config with `base_url` taken from `HISCORE_BASE_URL` if set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(base_url) = std::env::var("HISCORE_BASE_URL") {
            config.base_url = base_url;
        }
        config
    }

    pub fn submit_url(&self) -> String {
        join_url(&self.base_url, &self.submit_path)
    }

    pub fn fetch_url(&self) -> String {
        join_url(&self.base_url, &self.fetch_path)
    }
}

fn join_url(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[derive(Serialize)]
struct SubmitBody<'a> {
    score: u32,
    name: &'a str,
}

/// Talks to the score server over HTTP with JSON bodies.
#[derive(Clone, Debug)]
pub struct HttpAuthority {
    config: HttpAuthorityConfig,
    http: reqwest::Client,
}

impl HttpAuthority {
    pub fn new(config: HttpAuthorityConfig) -> Result<Self, AuthorityError> {
        let http = build_client(&config)?;
        Ok(Self { config, http })
    }

    pub fn config(&self) -> &HttpAuthorityConfig {
        &self.config
    }
}

cfg_if! {
    if #[cfg(target_arch = "wasm32")] {
        fn build_client(_config: &HttpAuthorityConfig) -> Result<reqwest::Client, AuthorityError> {
            Ok(reqwest::Client::new())
        }
    } else {
        fn build_client(config: &HttpAuthorityConfig) -> Result<reqwest::Client, AuthorityError> {
            reqwest::Client::builder()
                .timeout(config.timeout)
                .build()
                .map_err(transport_error)
        }
    }
}

fn transport_error(error: reqwest::Error) -> AuthorityError {
    if error.is_timeout() {
        return AuthorityError::Timeout;
    }
    AuthorityError::Transport {
        message: error.to_string(),
    }
}

fn check_status(response: &reqwest::Response) -> Result<(), AuthorityError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        Err(AuthorityError::Status {
            status: status.as_u16(),
        })
    }
}

impl RemoteAuthority for HttpAuthority {
    async fn submit_score(&self, record: &ScoreRecord) -> Result<(), AuthorityError> {
        let response = self
            .http
            .post(self.config.submit_url())
            .json(&SubmitBody {
                score: record.score,
                name: &record.name,
            })
            .send()
            .await
            .map_err(transport_error)?;
        check_status(&response)?;

        // the body is informational only
        let body = response.text().await.unwrap_or_default();
        debug!("High score saved: {}", body);
        Ok(())
    }

    async fn fetch_top_scores(&self) -> Result<Vec<ScoreRecord>, AuthorityError> {
        let response = self
            .http
            .get(self.config.fetch_url())
            .send()
            .await
            .map_err(transport_error)?;
        check_status(&response)?;

        let body = response.text().await.map_err(transport_error)?;
        let records = parse_top_scores(&body)?;
        debug!("High scores loaded: {:?}", records);
        Ok(records)
    }
}
