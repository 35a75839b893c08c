use serde::{Deserialize, Serialize};

/// Normalized address data for one CEP, regardless of which provider
/// resolved it.
///
/// Providers that do not supply a field leave it as `None`; no field is ever
/// an empty-string sentinel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CepAddress {
    /// State abbreviation (UF), e.g. `SP`.
    pub uf: Option<String>,
    /// City name.
    pub cidade: Option<String>,
    /// Neighborhood name.
    pub bairro: Option<String>,
    /// Extra address information.
    pub complemento: Option<String>,
    /// Street name.
    pub logradouro: Option<String>,
    /// Zip code, usually in the masked `00000-000` form.
    pub cep: Option<String>,
    /// IBGE municipality code, when the provider supplies one.
    pub ibge: Option<String>,
}

/// One failed provider attempt, recorded in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    /// Name of the provider that failed (e.g. `ViaCEP`).
    pub provider: String,
    /// The provider's error message.
    pub message: String,
}

/// Outcome of one orchestrated CEP lookup.
///
/// Immutable once returned: the fallback loop accumulates failures locally
/// and constructs this exactly once per call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CepResult {
    /// Whether any provider resolved the CEP.
    pub success: bool,
    /// The first successful provider's address, if any.
    pub address: Option<CepAddress>,
    /// Concatenated failure messages, `None` on success.
    pub message: Option<String>,
    /// Per-provider failure trail, in attempt order.
    pub failures: Vec<ProviderFailure>,
}

impl CepResult {
    /// Successful lookup; earlier failed attempts are kept as the trail.
    pub(crate) fn found(address: CepAddress, failures: Vec<ProviderFailure>) -> Self {
        Self {
            success: true,
            address: Some(address),
            message: None,
            failures,
        }
    }

    /// Every provider failed or none was configured.
    pub(crate) fn exhausted(failures: Vec<ProviderFailure>) -> Self {
        let joined = failures
            .iter()
            .map(|f| f.message.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let trimmed = joined.trim();

        Self {
            success: false,
            address: None,
            message: if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            },
            failures,
        }
    }
}

// Wire formats. Each provider names fields differently; these structs do
// the serde mapping and are converted to `CepAddress` by the adapters.

/// ViaCEP (and OpenCEP, which mirrors its schema) response body.
///
/// ViaCEP signals "not found" with `{"erro": true}` on an HTTP 200.
#[derive(Debug, Deserialize)]
pub(crate) struct ViaCepResponse {
    pub uf: Option<String>,
    pub localidade: Option<String>,
    pub bairro: Option<String>,
    pub complemento: Option<String>,
    pub logradouro: Option<String>,
    pub cep: Option<String>,
    pub ibge: Option<String>,
    #[serde(default)]
    pub erro: bool,
}

impl ViaCepResponse {
    pub(crate) fn into_address(self) -> CepAddress {
        CepAddress {
            uf: self.uf,
            cidade: self.localidade,
            bairro: self.bairro,
            complemento: self.complemento,
            logradouro: self.logradouro,
            cep: self.cep,
            ibge: self.ibge,
        }
    }
}

/// BrasilAPI response body (`https://brasilapi.com.br/api/cep/v1/{cep}`).
#[derive(Debug, Deserialize)]
pub(crate) struct BrasilApiResponse {
    pub cep: Option<String>,
    #[serde(rename = "state")]
    pub uf: Option<String>,
    #[serde(rename = "city")]
    pub cidade: Option<String>,
    #[serde(rename = "neighborhood")]
    pub bairro: Option<String>,
    #[serde(rename = "street")]
    pub logradouro: Option<String>,
}

impl BrasilApiResponse {
    pub(crate) fn into_address(self) -> CepAddress {
        CepAddress {
            uf: self.uf,
            cidade: self.cidade,
            bairro: self.bairro,
            complemento: None,
            logradouro: self.logradouro,
            cep: self.cep,
            ibge: None,
        }
    }
}

/// AwesomeAPI response body (`https://cep.awesomeapi.com.br/json/{cep}`).
#[derive(Debug, Deserialize)]
pub(crate) struct AwesomeApiResponse {
    pub cep: Option<String>,
    #[serde(rename = "state")]
    pub uf: Option<String>,
    #[serde(rename = "city")]
    pub cidade: Option<String>,
    #[serde(rename = "district")]
    pub bairro: Option<String>,
    #[serde(rename = "address")]
    pub logradouro: Option<String>,
}

impl AwesomeApiResponse {
    pub(crate) fn into_address(self) -> CepAddress {
        CepAddress {
            uf: self.uf,
            cidade: self.cidade,
            bairro: self.bairro,
            complemento: None,
            logradouro: self.logradouro,
            cep: self.cep,
            ibge: None,
        }
    }
}
