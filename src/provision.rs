//! Key provisioning for the daemon pair.
//!
//! A node's long-lived identity is generated once at install time and handed
//! to the operator as base64: the private half goes into the receiver's
//! configuration, the public half into every sender's. Roles built from that
//! configuration are constructed here, before the daemons start their
//! worker pools.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;

use crate::crypto::ecdh::KeyPair;
use crate::crypto::memory;
use crate::envelope::{Opener, Sealer};
use crate::error::CryptoError;

/// A freshly generated long-lived identity, base64-encoded for operator
/// configuration. The private half is surfaced exactly once, here.
pub struct Identity {
    pub private_b64: String,
    pub public_b64: String,
}

/// Generate a long-lived X25519 identity for node provisioning.
pub fn generate_identity() -> Result<Identity, CryptoError> {
    let pair = KeyPair::generate()?;

    let mut private_raw = pair.secret.to_bytes();
    let private_b64 = BASE64.encode(private_raw);
    memory::wipe(&mut private_raw);

    Ok(Identity {
        private_b64,
        public_b64: BASE64.encode(pair.public.as_bytes()),
    })
}

/// Build a sealer from a provisioned base64 public key.
///
/// An empty string yields an unbound sealer, so an absent configuration
/// value surfaces as `UnboundKey` at first use rather than here.
pub fn sealer_from_base64(encoded: &str) -> Result<Sealer, CryptoError> {
    if encoded.is_empty() {
        return Ok(Sealer::unbound());
    }
    let bytes = BASE64
        .decode(encoded)
        .map_err(|_| CryptoError::KeyEncoding)?;
    Sealer::from_key_bytes(&bytes)
}

/// Build an opener from a provisioned base64 private key.
pub fn opener_from_base64(encoded: &str) -> Result<Opener, CryptoError> {
    if encoded.is_empty() {
        return Ok(Opener::unbound());
    }
    let mut bytes = BASE64
        .decode(encoded)
        .map_err(|_| CryptoError::KeyEncoding)?;
    let opener = Opener::from_key_bytes(&bytes);
    memory::wipe(&mut bytes);
    opener
}
