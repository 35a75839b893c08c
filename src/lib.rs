//! Brazilian postal code (CEP) lookup with ordered provider fallback.
//!
//! Given a CEP string, the crate normalizes and validates it, then queries
//! public lookup providers in a fixed order — BrasilAPI, ViaCEP, AwesomeAPI,
//! OpenCEP — returning the first successful address or a consolidated
//! failure. A legacy Correios SOAP adapter is available for custom chains.
//!
//! # Modules
//!
//! - `service`: the fallback orchestrator (`CepService`).
//! - `provider`: the `CepProvider` trait every backend implements.
//! - `services`: REST provider adapters (BrasilAPI, ViaCEP, AwesomeAPI, OpenCEP).
//! - `correios`: legacy Correios SOAP adapter.
//! - `models`: address and result types.
//! - `errors`: error taxonomy (`CepError`).
//! - `validation`: CEP normalization and validation helpers.
//! - `messages`: user-facing diagnostic messages (Brazilian Portuguese).
//!
//! # Example
//!
//! ```no_run
//! use cep_brasil::CepService;
//!
//! # async fn example() {
//! let service = CepService::new();
//! let result = service.find("01310-100").await;
//! match result.address {
//!     Some(address) => println!("{:?}", address.logradouro),
//!     None => eprintln!("{}", result.message.unwrap_or_default()),
//! }
//! # }
//! ```

pub mod correios;
pub mod errors;
pub mod messages;
pub mod models;
pub mod provider;
pub mod service;
pub mod services;
pub mod validation;

pub use correios::CorreiosService;
pub use errors::CepError;
pub use models::{CepAddress, CepResult, ProviderFailure};
pub use provider::CepProvider;
pub use service::{CepService, DEFAULT_TIMEOUT};
pub use services::{AwesomeApiService, BrasilApiService, OpenCepService, ViaCepService};
