//! User-facing diagnostic messages.
//!
//! Kept in Brazilian Portuguese: these strings end up in `CepResult.message`
//! and are shown to Brazilian end users alongside whatever the lookup
//! services themselves return.

/// The service answered, but the body was empty or carried no data.
pub const EXCEPTION_EMPTY_RESPONSE: &str = "Não foi possível encontrar o dado pesquisado.";

/// Generic request failure (non-success HTTP status, connection error).
pub const EXCEPTION_SERVICE_ERROR: &str = "Houve um erro na requisição.";

/// The CEP did not have 8 digits after stripping the mask.
pub const ZIP_CODE_INVALID: &str = "CEP com tamanho inválido.";

/// Message recorded when a provider reports no record for the given CEP.
pub fn no_result_for(cep: &str) -> String {
    format!("Nenhum resultado para o {}", cep)
}
