//! Legacy Correios SOAP adapter.
//!
//! The SigepMaster endpoint speaks SOAP/XML. The request is a fixed
//! envelope with the CEP templated in, and the response is scraped by tag
//! (`bairro`, `cep`, `cidade`, `complemento2`, `end`, `uf`) rather than run
//! through a full XML parser. Unknown CEPs come back as a SOAP fault whose
//! `faultstring` becomes the service error message.
//!
//! Not part of the default fallback chain; add it via
//! `CepService::with_providers` when needed.

use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use reqwest::Client;

use crate::errors::CepError;
use crate::messages;
use crate::models::CepAddress;
use crate::provider::CepProvider;
use crate::validation;

const CORREIOS_URL: &str =
    "https://apphom.correios.com.br/SigepMasterJPA/AtendeClienteService/AtendeCliente";
const MEDIA_TYPE: &str = "application/xml";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Adapter for the legacy Correios SigepMaster SOAP service.
pub struct CorreiosService {
    client: Client,
    url: String,
    timeout: Duration,
}

impl CorreiosService {
    pub fn new(client: Client) -> Self {
        Self::with_url(client, CORREIOS_URL)
    }

    /// Uses a custom endpoint. Intended for tests against a mock server.
    pub fn with_url(client: Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    async fn fetch(&self, cep: &str) -> Result<String, CepError> {
        tracing::debug!("Consultando Correios para o CEP {}", cep);

        let response = self
            .client
            .post(&self.url)
            .header(reqwest::header::CONTENT_TYPE, MEDIA_TYPE)
            .body(soap_body(cep))
            .timeout(self.timeout)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let fault = fault_string(&body);
            tracing::warn!("Correios retornou status {}: {}", status, fault);
            return Err(CepError::Service(fault));
        }

        if body.trim().is_empty() {
            return Err(CepError::Service(
                messages::EXCEPTION_EMPTY_RESPONSE.to_string(),
            ));
        }

        Ok(body)
    }
}

#[async_trait]
impl CepProvider for CorreiosService {
    fn name(&self) -> &str {
        "Correios"
    }

    async fn find(&self, cep: &str) -> Result<Option<CepAddress>, CepError> {
        validation::validate(cep)?;

        let body = self.fetch(&validation::remove_mask(cep)).await?;

        match convert_result(&body) {
            Some(address) => Ok(Some(address)),
            None => Err(CepError::Service(
                messages::EXCEPTION_EMPTY_RESPONSE.to_string(),
            )),
        }
    }
}

fn soap_body(cep: &str) -> String {
    format!(
        concat!(
            "<soapenv:Envelope xmlns:soapenv=\"http://schemas.xmlsoap.org/soap/envelope/\" ",
            "xmlns:cli=\"http://cliente.bean.master.sigep.bsb.correios.com.br/\">",
            "<soapenv:Header/>",
            "<soapenv:Body>",
            "<cli:consultaCEP>",
            "<cep>{}</cep>",
            "</cli:consultaCEP>",
            "</soapenv:Body>",
            "</soapenv:Envelope>"
        ),
        cep
    )
}

/// Extracts the text content of the first `<tag>...</tag>` occurrence.
fn tag_value(raw: &str, tag: &str) -> Option<String> {
    let pattern = format!("<{0}>(.*?)</{0}>", regex::escape(tag));
    let regex = Regex::new(&pattern).ok()?;

    regex
        .captures(raw)
        .and_then(|captures| captures.get(1))
        .map(|matched| matched.as_str().to_string())
        .filter(|value| !value.is_empty())
}

fn fault_string(body: &str) -> String {
    tag_value(body, "faultstring")
        .unwrap_or_else(|| messages::EXCEPTION_SERVICE_ERROR.to_string())
}

/// Scrapes the address tags from the SOAP response. Returns `None` when the
/// body carries no address at all.
fn convert_result(body: &str) -> Option<CepAddress> {
    let cep = tag_value(body, "cep");
    let logradouro = tag_value(body, "end");

    if cep.is_none() && logradouro.is_none() {
        return None;
    }

    Some(CepAddress {
        uf: tag_value(body, "uf"),
        cidade: tag_value(body, "cidade"),
        bairro: tag_value(body, "bairro"),
        complemento: tag_value(body, "complemento2"),
        logradouro,
        cep,
        ibge: None,
    })
}
