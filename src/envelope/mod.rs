pub mod codec;

use x25519_dalek::{PublicKey, StaticSecret};

use crate::crypto::{aead, ecdh, hash, kdf, lookup, memory, random, SUITE_ID_LEN};
use crate::error::CryptoError;

/// Suite every production deployment runs today. Suite 0 is reserved and
/// never selectable for real traffic.
pub const DEFAULT_SUITE_ID: u8 = 1;

/// The wire-visible envelope tuple.
///
/// `ciphertext` includes the trailing authentication tag, so its length is
/// always at least the suite's tag overhead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Envelope {
    pub suite_id: u8,
    pub ephemeral_public: [u8; ecdh::KEY_LEN],
    pub nonce: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

/// Per-message AAD: `suite_id || ephemeral_public`, no delimiter.
///
/// Binding both fields prevents an active attacker from downgrading the
/// declared suite or substituting the ephemeral key without breaking AEAD
/// verification.
fn build_aad(suite_id: u8, ephemeral_public: &[u8; ecdh::KEY_LEN]) -> Vec<u8> {
    let mut aad = Vec::with_capacity(SUITE_ID_LEN + ephemeral_public.len());
    aad.push(suite_id);
    aad.extend_from_slice(ephemeral_public);
    aad
}

/// Seals messages to a single recipient's static public key.
///
/// Bound once at startup from provisioned key material and shared by
/// reference afterwards: every call allocates its own ephemeral and derived
/// key material and zeroes it before returning, so concurrent sealing from
/// many workers needs no locking.
pub struct Sealer {
    recipient_public: Option<PublicKey>,
}

impl Sealer {
    pub fn new(recipient_public: PublicKey) -> Self {
        Self {
            recipient_public: Some(recipient_public),
        }
    }

    /// A sealer with no bound key. Every seal fails with `UnboundKey`, so a
    /// provisioning gap surfaces at first use instead of silently degrading.
    pub fn unbound() -> Self {
        Self {
            recipient_public: None,
        }
    }

    /// Bind from raw key bytes. Empty input yields an unbound sealer.
    pub fn from_key_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.is_empty() {
            return Ok(Self::unbound());
        }
        let raw: [u8; ecdh::KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: ecdh::KEY_LEN,
                    actual: bytes.len(),
                })?;
        Ok(Self::new(PublicKey::from(raw)))
    }

    pub fn is_bound(&self) -> bool {
        self.recipient_public.is_some()
    }

    /// Seal `plaintext` into an envelope under `suite_id`.
    ///
    /// Pipeline: ephemeral exchange against the bound recipient key, fresh
    /// random nonce, salt = SHA-512(ephemeral_public || nonce), key =
    /// HKDF(shared secret, salt, suite name), AEAD seal with
    /// AAD = suite_id || ephemeral_public.
    pub fn seal(&self, plaintext: &[u8], suite_id: u8) -> Result<Envelope, CryptoError> {
        let recipient = self
            .recipient_public
            .as_ref()
            .ok_or(CryptoError::UnboundKey)?;
        let suite = lookup(suite_id).ok_or(CryptoError::UnknownSuite(suite_id))?;
        if suite.key_size == 0 {
            // Reserved null suite: inspectable, never sealable.
            return Err(CryptoError::UnknownSuite(suite_id));
        }

        let (mut shared, ephemeral_public) = ecdh::derive_shared_secret_as_sender(recipient)?;
        let nonce = random::secure_bytes(suite.nonce_size)?;

        let mut salt = hash::digest_parts(&[ephemeral_public.as_bytes(), &nonce]);
        let mut key = kdf::derive_key(&mut shared, &mut salt, suite.name, suite.key_size)?;

        let aad = build_aad(suite_id, ephemeral_public.as_bytes());
        let ciphertext = aead::seal(plaintext, &mut key, &nonce, &aad)?;

        Ok(Envelope {
            suite_id,
            ephemeral_public: *ephemeral_public.as_bytes(),
            nonce,
            ciphertext,
        })
    }
}

/// Opens envelopes addressed to the local static private key.
///
/// Same sharing model as [`Sealer`]: immutable after construction, safe for
/// unbounded concurrent callers, per-call key material only.
pub struct Opener {
    local_secret: Option<StaticSecret>,
}

impl Opener {
    pub fn new(local_secret: StaticSecret) -> Self {
        Self {
            local_secret: Some(local_secret),
        }
    }

    /// An opener with no bound key; every open fails with `UnboundKey`.
    pub fn unbound() -> Self {
        Self { local_secret: None }
    }

    /// Bind from raw key bytes. Empty input yields an unbound opener.
    pub fn from_key_bytes(bytes: &[u8]) -> Result<Self, CryptoError> {
        if bytes.is_empty() {
            return Ok(Self::unbound());
        }
        let mut raw: [u8; ecdh::KEY_LEN] =
            bytes
                .try_into()
                .map_err(|_| CryptoError::InvalidKeyLength {
                    expected: ecdh::KEY_LEN,
                    actual: bytes.len(),
                })?;
        let secret = StaticSecret::from(raw);
        memory::wipe(&mut raw);
        Ok(Self::new(secret))
    }

    pub fn is_bound(&self) -> bool {
        self.local_secret.is_some()
    }

    /// Open an envelope, reversing the sealer's pipeline from the
    /// transmitted ephemeral public key, nonce, and suite id.
    pub fn open(&self, envelope: &Envelope) -> Result<Vec<u8>, CryptoError> {
        let secret = self.local_secret.as_ref().ok_or(CryptoError::UnboundKey)?;
        let suite =
            lookup(envelope.suite_id).ok_or(CryptoError::UnknownSuite(envelope.suite_id))?;
        if suite.key_size == 0 {
            return Err(CryptoError::UnknownSuite(envelope.suite_id));
        }

        let ephemeral = PublicKey::from(envelope.ephemeral_public);
        let mut shared = ecdh::derive_shared_secret_as_receiver(secret, &ephemeral)?;

        // Working copy: the envelope stays intact for the caller's metrics,
        // the copy is what the open attempt consumes and wipes.
        let mut nonce = envelope.nonce.clone();
        let mut salt = hash::digest_parts(&[&envelope.ephemeral_public, &nonce]);
        let mut key = kdf::derive_key(&mut shared, &mut salt, suite.name, suite.key_size)?;

        let aad = build_aad(envelope.suite_id, &envelope.ephemeral_public);
        aead::open(&envelope.ciphertext, &mut key, &mut nonce, &aad).map_err(|err| {
            tracing::debug!(suite_id = envelope.suite_id, "envelope rejected");
            err
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::crypto::ecdh::KeyPair;

    fn role_pair() -> (Sealer, Opener) {
        let identity = KeyPair::generate().unwrap();
        (Sealer::new(identity.public), Opener::new(identity.secret))
    }

    #[test]
    fn seal_then_open() {
        let (sealer, opener) = role_pair();

        let envelope = sealer.seal(b"log line", DEFAULT_SUITE_ID).unwrap();
        assert_eq!(envelope.suite_id, DEFAULT_SUITE_ID);
        assert_eq!(envelope.nonce.len(), 12);
        assert_eq!(envelope.ciphertext.len(), b"log line".len() + 16);

        let recovered = opener.open(&envelope).unwrap();
        assert_eq!(&recovered, b"log line");
    }

    #[test]
    fn envelopes_are_unlinkable() {
        let (sealer, _) = role_pair();

        let a = sealer.seal(b"same plaintext", DEFAULT_SUITE_ID).unwrap();
        let b = sealer.seal(b"same plaintext", DEFAULT_SUITE_ID).unwrap();

        assert_ne!(a.ephemeral_public, b.ephemeral_public);
        assert_ne!(a.nonce, b.nonce);
        assert_ne!(a.ciphertext, b.ciphertext);
    }

    #[test]
    fn wrong_recipient_cannot_open() {
        let (sealer, _) = role_pair();
        let (_, other_opener) = role_pair();

        let envelope = sealer.seal(b"addressed elsewhere", DEFAULT_SUITE_ID).unwrap();
        let result = other_opener.open(&envelope);
        assert!(matches!(result, Err(CryptoError::Authentication)));
    }

    #[test]
    fn unbound_roles_fail_every_call() {
        let sealer = Sealer::unbound();
        assert!(!sealer.is_bound());
        let result = sealer.seal(b"payload", DEFAULT_SUITE_ID);
        assert!(matches!(result, Err(CryptoError::UnboundKey)));

        let (bound_sealer, _) = role_pair();
        let envelope = bound_sealer.seal(b"payload", DEFAULT_SUITE_ID).unwrap();

        let opener = Opener::unbound();
        assert!(!opener.is_bound());
        let result = opener.open(&envelope);
        assert!(matches!(result, Err(CryptoError::UnboundKey)));
    }

    #[test]
    fn empty_key_bytes_yield_unbound_roles() {
        assert!(!Sealer::from_key_bytes(b"").unwrap().is_bound());
        assert!(!Opener::from_key_bytes(b"").unwrap().is_bound());
    }

    #[test]
    fn truncated_key_bytes_rejected() {
        let result = Sealer::from_key_bytes(&[0xAB; 31]);
        assert!(matches!(
            result,
            Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 31
            })
        ));

        let result = Opener::from_key_bytes(&[0xAB; 33]);
        assert!(matches!(
            result,
            Err(CryptoError::InvalidKeyLength {
                expected: 32,
                actual: 33
            })
        ));
    }

    #[test]
    fn reserved_suite_never_seals_or_opens() {
        let (sealer, opener) = role_pair();

        let result = sealer.seal(b"payload", 0);
        assert!(matches!(result, Err(CryptoError::UnknownSuite(0))));

        let mut envelope = sealer.seal(b"payload", DEFAULT_SUITE_ID).unwrap();
        envelope.suite_id = 0;
        let result = opener.open(&envelope);
        assert!(matches!(result, Err(CryptoError::UnknownSuite(0))));
    }

    #[test]
    fn unlisted_suite_rejected() {
        let (sealer, opener) = role_pair();

        let result = sealer.seal(b"payload", 7);
        assert!(matches!(result, Err(CryptoError::UnknownSuite(7))));

        let mut envelope = sealer.seal(b"payload", DEFAULT_SUITE_ID).unwrap();
        envelope.suite_id = 7;
        let result = opener.open(&envelope);
        assert!(matches!(result, Err(CryptoError::UnknownSuite(7))));
    }
}
