use sha2::{Digest, Sha512};

/// SHA-512 digest length in bytes.
pub const DIGEST_LEN: usize = 64;

/// SHA-512 over the concatenation of `parts` in input order.
///
/// Empty parts contribute no bytes; no parts at all yields the fixed
/// empty-input digest. Used to build the key-derivation salt from
/// `ephemeral_public || nonce`.
pub fn digest_parts(parts: &[&[u8]]) -> [u8; DIGEST_LEN] {
    let mut hasher = Sha512::new();
    for part in parts {
        hasher.update(part);
    }
    hasher.finalize().into()
}
