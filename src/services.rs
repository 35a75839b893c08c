//! REST provider adapters.
//!
//! Each adapter wraps one public CEP lookup API: it validates the CEP,
//! performs a single GET, translates the provider's "not found" convention
//! into `Ok(None)` and maps the provider-specific schema to [`CepAddress`].
//!
//! All adapters share one `reqwest::Client` (internally pooled and safe for
//! concurrent use) and accept a base URL override so tests can point them
//! at a mock server.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;

use crate::errors::CepError;
use crate::messages;
use crate::models::{AwesomeApiResponse, BrasilApiResponse, CepAddress, ViaCepResponse};
use crate::provider::CepProvider;
use crate::validation;

const BRASIL_API_BASE_URL: &str = "https://brasilapi.com.br/api/cep/v1";
const VIA_CEP_BASE_URL: &str = "https://viacep.com.br/ws";
const AWESOME_API_BASE_URL: &str = "https://cep.awesomeapi.com.br/json";
const OPEN_CEP_BASE_URL: &str = "https://opencep.com/v1";

/// Per-request timeout applied when an adapter is used standalone. The
/// orchestrator additionally enforces its own chain-wide deadline.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Executes a GET and applies the error mapping shared by every REST
/// adapter: 404 is "not found", other non-success statuses are service
/// errors, empty bodies and undecodable bodies are service errors.
async fn fetch_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    timeout: Duration,
) -> Result<Option<T>, CepError> {
    tracing::debug!("Consultando {}", url);

    let response = client.get(url).timeout(timeout).send().await?;

    let status = response.status();
    if status == StatusCode::NOT_FOUND {
        return Ok(None);
    }
    if !status.is_success() {
        tracing::warn!("{} retornou status {}", url, status);
        return Err(CepError::Service(format!(
            "{} (status {})",
            messages::EXCEPTION_SERVICE_ERROR,
            status
        )));
    }

    let body = response.text().await?;
    if body.trim().is_empty() {
        return Err(CepError::Service(
            messages::EXCEPTION_EMPTY_RESPONSE.to_string(),
        ));
    }

    let parsed = serde_json::from_str(&body).map_err(|e| {
        tracing::warn!("Falha ao interpretar resposta de {}: {}", url, e);
        CepError::Service(format!("Failed to deserialize response: {}", e))
    })?;

    Ok(Some(parsed))
}

/// Adapter for BrasilAPI (https://brasilapi.com.br/docs).
///
/// First provider in the canonical fallback chain.
pub struct BrasilApiService {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl BrasilApiService {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, BRASIL_API_BASE_URL)
    }

    /// Uses a custom endpoint. Intended for tests against a mock server.
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl CepProvider for BrasilApiService {
    fn name(&self) -> &str {
        "BrasilAPI"
    }

    async fn find(&self, cep: &str) -> Result<Option<CepAddress>, CepError> {
        validation::validate(cep)?;

        let url = format!("{}/{}", self.base_url, validation::remove_mask(cep));
        let response: Option<BrasilApiResponse> =
            fetch_json(&self.client, &url, self.timeout).await?;

        Ok(response.map(BrasilApiResponse::into_address))
    }
}

/// Adapter for ViaCEP (https://viacep.com.br/).
///
/// ViaCEP reports unknown CEPs with an HTTP 200 and `{"erro": true}` in the
/// payload, which this adapter translates into `Ok(None)`.
pub struct ViaCepService {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl ViaCepService {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, VIA_CEP_BASE_URL)
    }

    /// Uses a custom endpoint. Intended for tests against a mock server.
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl CepProvider for ViaCepService {
    fn name(&self) -> &str {
        "ViaCEP"
    }

    async fn find(&self, cep: &str) -> Result<Option<CepAddress>, CepError> {
        validation::validate(cep)?;

        let url = format!("{}/{}/json", self.base_url, validation::remove_mask(cep));
        let response: Option<ViaCepResponse> =
            fetch_json(&self.client, &url, self.timeout).await?;

        Ok(response.and_then(|body| {
            if body.erro {
                None
            } else {
                Some(body.into_address())
            }
        }))
    }
}

/// Adapter for AwesomeAPI (https://cep.awesomeapi.com.br/).
pub struct AwesomeApiService {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl AwesomeApiService {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, AWESOME_API_BASE_URL)
    }

    /// Uses a custom endpoint. Intended for tests against a mock server.
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl CepProvider for AwesomeApiService {
    fn name(&self) -> &str {
        "AwesomeAPI"
    }

    async fn find(&self, cep: &str) -> Result<Option<CepAddress>, CepError> {
        validation::validate(cep)?;

        let url = format!("{}/{}", self.base_url, validation::remove_mask(cep));
        let response: Option<AwesomeApiResponse> =
            fetch_json(&self.client, &url, self.timeout).await?;

        Ok(response.map(AwesomeApiResponse::into_address))
    }
}

/// Adapter for OpenCEP (https://opencep.com/), which mirrors the ViaCEP
/// response schema.
pub struct OpenCepService {
    client: Client,
    base_url: String,
    timeout: Duration,
}

impl OpenCepService {
    pub fn new(client: Client) -> Self {
        Self::with_base_url(client, OPEN_CEP_BASE_URL)
    }

    /// Uses a custom endpoint. Intended for tests against a mock server.
    pub fn with_base_url(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

#[async_trait]
impl CepProvider for OpenCepService {
    fn name(&self) -> &str {
        "OpenCEP"
    }

    async fn find(&self, cep: &str) -> Result<Option<CepAddress>, CepError> {
        validation::validate(cep)?;

        let url = format!("{}/{}", self.base_url, validation::remove_mask(cep));
        let response: Option<ViaCepResponse> =
            fetch_json(&self.client, &url, self.timeout).await?;

        Ok(response.and_then(|body| {
            if body.erro {
                None
            } else {
                Some(body.into_address())
            }
        }))
    }
}
