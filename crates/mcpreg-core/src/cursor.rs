//! Opaque pagination cursors
//!
//! A cursor records the last server name a page returned. It is a URL-safe
//! base64 token over a small tagged payload, so it survives being pasted into
//! a query string and decodes the same way in every process.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;

use crate::error::CursorError;

/// Payload tag; bump when the token layout changes.
const CURSOR_PREFIX: &str = "n1:";

/// Stateless encoder/decoder for listing cursors.
pub struct CursorCodec;

impl CursorCodec {
    /// Encode the last name included in a page.
    pub fn encode(last_name: &str) -> String {
        URL_SAFE_NO_PAD.encode(format!("{CURSOR_PREFIX}{last_name}"))
    }

    /// Decode a token back into the name it was built from.
    pub fn decode(token: &str) -> Result<String, CursorError> {
        let token = token.trim();
        if token.is_empty() {
            return Err(CursorError::malformed("cursor is empty"));
        }

        let bytes = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| CursorError::malformed(format!("base64 decode failed: {e}")))?;
        let payload = String::from_utf8(bytes)
            .map_err(|_| CursorError::malformed("cursor payload is not UTF-8"))?;

        let name = payload
            .strip_prefix(CURSOR_PREFIX)
            .ok_or_else(|| CursorError::malformed("unrecognized cursor format"))?;
        if name.is_empty() {
            return Err(CursorError::malformed("cursor carries no position"));
        }

        Ok(name.to_string())
    }
}
