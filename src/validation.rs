//! CEP normalization and validation helpers.

use crate::errors::CepError;
use crate::messages;

const ZIP_CODE_LENGTH: usize = 8;

/// Strips mask characters, keeping only digits.
///
/// `"01310-100"` becomes `"01310100"`. Anything that is not an ASCII digit
/// is dropped.
pub fn remove_mask(value: &str) -> String {
    value.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// Applies the canonical Brazilian zip code mask (`00000-000`).
///
/// Input is normalized first, so masked and unmasked forms are both
/// accepted. Values without exactly 8 digits are returned normalized but
/// unmasked.
pub fn cep_mask(value: &str) -> String {
    let digits = remove_mask(value);
    if digits.len() == ZIP_CODE_LENGTH {
        format!("{}-{}", &digits[..5], &digits[5..])
    } else {
        digits
    }
}

/// Validates a Brazilian zip code to its minimum standard: 8 digits after
/// stripping the mask.
pub fn validate(cep: &str) -> Result<(), CepError> {
    if remove_mask(cep).len() != ZIP_CODE_LENGTH {
        return Err(CepError::Validation(messages::ZIP_CODE_INVALID.to_string()));
    }

    Ok(())
}
