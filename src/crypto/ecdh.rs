use x25519_dalek::{PublicKey, StaticSecret};

use super::{memory, random, SharedSecret};
use crate::error::CryptoError;

/// Fixed byte length of X25519 private scalars and public points.
pub const KEY_LEN: usize = 32;

/// An X25519 key pair.
///
/// The long-lived identity pair is created once at node provisioning;
/// ephemeral pairs live for a single message.
pub struct KeyPair {
    pub secret: StaticSecret,
    pub public: PublicKey,
}

impl KeyPair {
    /// Generate a fresh key pair.
    ///
    /// The private scalar comes from the OS entropy source; the public point
    /// is base-point scalar multiplication.
    pub fn generate() -> Result<Self, CryptoError> {
        let mut bytes =
            random::secure_array::<KEY_LEN>().map_err(|_| CryptoError::KeyGeneration)?;
        let secret = StaticSecret::from(bytes);
        memory::wipe(&mut bytes);

        let public = PublicKey::from(&secret);
        Ok(Self { secret, public })
    }
}

/// Sender side: generate an ephemeral pair and compute the shared secret
/// against the recipient's static public key.
///
/// The ephemeral private scalar never escapes this function; it is consumed
/// and zeroed before returning. The ephemeral public key is returned for
/// transmission in the clear.
pub fn derive_shared_secret_as_sender(
    recipient_public: &PublicKey,
) -> Result<(SharedSecret, PublicKey), CryptoError> {
    let ephemeral = KeyPair::generate()?;
    let shared = ephemeral.secret.diffie_hellman(recipient_public);
    if !shared.was_contributory() {
        return Err(CryptoError::KeyExchange);
    }
    Ok((SharedSecret(shared.to_bytes()), ephemeral.public))
}

/// Receiver side: recompute the shared secret from the local static private
/// key and the transmitted ephemeral public key.
pub fn derive_shared_secret_as_receiver(
    local_secret: &StaticSecret,
    ephemeral_public: &PublicKey,
) -> Result<SharedSecret, CryptoError> {
    let shared = local_secret.diffie_hellman(ephemeral_public);
    if !shared.was_contributory() {
        return Err(CryptoError::KeyExchange);
    }
    Ok(SharedSecret(shared.to_bytes()))
}
