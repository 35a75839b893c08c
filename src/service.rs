//! The fallback orchestrator.

use std::time::Duration;

use reqwest::Client;
use tokio::time::Instant;

use crate::errors::CepError;
use crate::messages;
use crate::models::{CepResult, ProviderFailure};
use crate::provider::CepProvider;
use crate::services::{AwesomeApiService, BrasilApiService, OpenCepService, ViaCepService};
use crate::validation;

/// Deadline applied to a whole `find` call when the caller supplies none.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Orchestrates ordered fallback across CEP providers.
///
/// Providers are fixed at construction time; their insertion order is the
/// fallback priority. Each `find` call tries them strictly one at a time,
/// never concurrently and never more than once, returning the first
/// successful address or a consolidated failure.
///
/// The service holds no per-call state, so one instance can serve
/// concurrent `find` calls; the shared `reqwest::Client` is internally
/// pooled and thread safe. Because the client is a shared handle, dropping
/// a service built with [`CepService::with_client`] never invalidates the
/// caller's client.
///
/// # Example
///
/// ```no_run
/// use cep_brasil::CepService;
///
/// # async fn example() {
/// let service = CepService::new();
/// let result = service.find("01310-100").await;
/// if result.success {
///     let address = result.address.unwrap();
///     println!("{}/{}", address.cidade.unwrap(), address.uf.unwrap());
/// }
/// # }
/// ```
pub struct CepService {
    providers: Vec<Box<dyn CepProvider>>,
    timeout: Duration,
}

impl CepService {
    /// Builds the service with its own HTTP client and the canonical
    /// provider chain: BrasilAPI, ViaCEP, AwesomeAPI, OpenCEP.
    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Builds the canonical provider chain on a caller-supplied client.
    ///
    /// The client stays usable by the caller after this service is dropped.
    pub fn with_client(client: Client) -> Self {
        let providers: Vec<Box<dyn CepProvider>> = vec![
            Box::new(BrasilApiService::new(client.clone())),
            Box::new(ViaCepService::new(client.clone())),
            Box::new(AwesomeApiService::new(client.clone())),
            Box::new(OpenCepService::new(client)),
        ];

        Self::with_providers(providers)
    }

    /// Builds the service over a custom ordered provider list.
    ///
    /// Insertion order is the fallback priority. This is also the seam for
    /// injecting mock providers in tests or adding `CorreiosService`.
    pub fn with_providers(providers: Vec<Box<dyn CepProvider>>) -> Self {
        Self {
            providers,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the default per-call deadline.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Looks up a CEP with the default deadline.
    ///
    /// Equivalent to `find_with_timeout(cep, None)`.
    pub async fn find(&self, cep: &str) -> CepResult {
        self.find_with_timeout(cep, None).await
    }

    /// Looks up a CEP, trying each provider in order until one returns an
    /// address.
    ///
    /// The deadline (the supplied `timeout`, or the service default of 30
    /// seconds) is established once and shared by the entire fallback
    /// chain: a slow first provider can exhaust the budget before later
    /// providers are tried. Lookup failures never surface as errors; they
    /// are reported through `CepResult.success` and its failure trail.
    pub async fn find_with_timeout(&self, cep: &str, timeout: Option<Duration>) -> CepResult {
        if let Err(error) = validation::validate(cep) {
            tracing::warn!("CEP inválido: {:?}", cep);
            return CepResult::exhausted(vec![ProviderFailure {
                provider: "CepValidation".to_string(),
                message: error.to_string(),
            }]);
        }

        let budget = timeout.unwrap_or(self.timeout);
        let deadline = Instant::now() + budget;

        let mut failures = Vec::new();
        for provider in &self.providers {
            let remaining = deadline.saturating_duration_since(Instant::now());
            let outcome = match tokio::time::timeout(remaining, provider.find(cep)).await {
                Ok(outcome) => outcome,
                Err(_) => Err(CepError::Cancelled(format!(
                    "Tempo limite de {:?} excedido",
                    budget
                ))),
            };

            match outcome {
                Ok(Some(address)) => {
                    tracing::info!("CEP {} resolvido por {}", cep, provider.name());
                    return CepResult::found(address, failures);
                }
                Ok(None) => {
                    tracing::debug!("{} não encontrou o CEP {}", provider.name(), cep);
                    failures.push(ProviderFailure {
                        provider: provider.name().to_string(),
                        message: messages::no_result_for(cep),
                    });
                }
                Err(error) => {
                    tracing::warn!("{} falhou para o CEP {}: {}", provider.name(), cep, error);
                    failures.push(ProviderFailure {
                        provider: provider.name().to_string(),
                        message: error.to_string(),
                    });
                }
            }
        }

        CepResult::exhausted(failures)
    }
}

impl Default for CepService {
    fn default() -> Self {
        Self::new()
    }
}
