/// Errors from cryptographic primitives and envelope seal/open.
#[derive(Debug, thiserror::Error)]
pub enum CryptoError {
    #[error("OS entropy source failed")]
    Entropy,

    #[error("invalid range: min {min} is greater than max {max}")]
    InvalidRange { min: i64, max: i64 },

    #[error("key pair generation failed")]
    KeyGeneration,

    #[error("key exchange failed: peer point is low-order or invalid")]
    KeyExchange,

    #[error("key derivation cannot produce {requested} bytes")]
    Derivation { requested: usize },

    #[error("invalid key length: expected {expected}, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("invalid nonce length: expected {expected}, got {actual}")]
    InvalidNonceLength { expected: usize, actual: usize },

    #[error("provisioned key material is not valid base64")]
    KeyEncoding,

    #[error("AEAD encryption failed")]
    Seal,

    #[error("AEAD authentication failed: ciphertext is invalid or tampered")]
    Authentication,

    #[error("unsupported cipher suite id: {0}")]
    UnknownSuite(u8),

    #[error("no key material bound: role used before provisioning")]
    UnboundKey,
}

/// Errors from the envelope wire codec.
#[derive(Debug, thiserror::Error)]
pub enum EnvelopeError {
    #[error("empty datagram")]
    Empty,

    #[error("unsupported cipher suite id in datagram: {0}")]
    UnknownSuite(u8),

    #[error("datagram too short: {len} bytes (suite {suite_id} needs at least {min})")]
    Truncated { suite_id: u8, len: usize, min: usize },
}

/// Top-level error type for the crate.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

pub type Result<T> = std::result::Result<T, Error>;
