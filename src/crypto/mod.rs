pub mod aead;
pub mod ecdh;
pub mod hash;
pub mod kdf;
pub mod memory;
pub mod random;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Byte length of the suite id field on the wire.
pub const SUITE_ID_LEN: usize = 1;

/// Parameters of one cipher suite.
///
/// `key_size` and `nonce_size` match the suite's AEAD and KDF algorithms
/// exactly; `tag_overhead` is the authentication tag appended to every
/// ciphertext. `name` doubles as the HKDF domain-separation context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuiteInfo {
    pub id: u8,
    pub name: &'static str,
    pub key_size: usize,
    pub nonce_size: usize,
    pub tag_overhead: usize,
}

// Suite 0 is reserved for tests; it never carries real traffic.
const SUITES: [SuiteInfo; 2] = [
    SuiteInfo {
        id: 0,
        name: "testing",
        key_size: 0,
        nonce_size: 0,
        tag_overhead: 0,
    },
    SuiteInfo {
        id: 1,
        name: "x25519-hkdf-chacha20poly1305",
        key_size: aead::KEY_LEN,
        nonce_size: aead::NONCE_LEN,
        tag_overhead: aead::TAG_LEN,
    },
];

/// Look up a suite by wire id.
///
/// The table is fixed at compile time, so concurrent lookups need no
/// synchronization. `None` for an unlisted id is an authentication-relevant
/// failure: an attacker may be claiming an unsupported or downgraded suite.
pub fn lookup(id: u8) -> Option<&'static SuiteInfo> {
    SUITES.iter().find(|suite| suite.id == id)
}

/// Shared secret from an X25519 exchange.
///
/// Owned and fixed-size so no implicit copies are made by growth, and zeroed
/// on drop. A secret feeds exactly one key derivation, which wipes it.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct SharedSecret(pub(crate) [u8; 32]);

impl SharedSecret {
    /// Wrap raw input keying material. Ownership of the bytes moves into the
    /// secret; the caller's copy should not outlive this call.
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }
}
