//! The provider seam.
//!
//! Every lookup backend (REST or SOAP) implements [`CepProvider`], which
//! lets the orchestrator hold an ordered `Vec<Box<dyn CepProvider>>` and
//! lets tests substitute mock implementations.

use async_trait::async_trait;

use crate::errors::CepError;
use crate::models::CepAddress;

/// One CEP lookup backend.
#[async_trait]
pub trait CepProvider: Send + Sync {
    /// Provider name used in logs and in the failure trail.
    fn name(&self) -> &str;

    /// Looks up the CEP against this backend.
    ///
    /// Returns `Ok(None)` when the provider answered but has no record for
    /// the CEP (its "not found" convention), and `Err` for validation,
    /// transport, deserialization and timeout failures.
    async fn find(&self, cep: &str) -> Result<Option<CepAddress>, CepError>;
}
