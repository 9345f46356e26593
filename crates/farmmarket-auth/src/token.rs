//! Opaque random tokens for CSRF cookies and session identifiers.

use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use rand::{RngCore, rngs::OsRng};

use crate::error::RandomSourceError;

/// Number of random bytes behind every token.
pub const TOKEN_BYTES: usize = 32;

/// Generates a token from [`TOKEN_BYTES`] bytes of OS randomness, encoded
/// as unpadded URL-safe base64 so it needs no escaping in cookies, form
/// bodies or HTML attributes.
///
/// Fails instead of falling back to a weaker generator when the OS source
/// is unavailable.
pub fn generate_token() -> Result<String, RandomSourceError> {
    let mut bytes = [0u8; TOKEN_BYTES];
    OsRng.try_fill_bytes(&mut bytes)?;
    Ok(URL_SAFE_NO_PAD.encode(bytes))
}
