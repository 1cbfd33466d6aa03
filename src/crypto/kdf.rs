use hkdf::Hkdf;
use sha2::Sha512;
use zeroize::{Zeroize, Zeroizing};

use super::{memory, SharedSecret};
use crate::error::CryptoError;

/// Derive `key_size` bytes from a shared secret and salt via HKDF-SHA512.
///
/// `namespace` is the suite's human-readable name, fed to HKDF as the info
/// context for domain separation. Both `secret` and `salt` are zeroed before
/// returning, on every path; callers must not reuse them. Fails only when
/// `key_size` exceeds the HKDF expansion limit (255 hash blocks).
pub fn derive_key(
    secret: &mut SharedSecret,
    salt: &mut [u8],
    namespace: &str,
    key_size: usize,
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let deriver = Hkdf::<Sha512>::new(Some(salt), secret.as_bytes());

    let mut key = Zeroizing::new(vec![0u8; key_size]);
    let expanded = deriver.expand(namespace.as_bytes(), &mut key);

    secret.zeroize();
    memory::wipe(salt);

    expanded.map_err(|_| CryptoError::Derivation {
        requested: key_size,
    })?;
    Ok(key)
}
