use chacha20poly1305::aead::{Aead, KeyInit, Payload};
use chacha20poly1305::{ChaCha20Poly1305, Key, Nonce};

use super::memory;
use crate::error::CryptoError;

/// ChaCha20-Poly1305 key length in bytes.
pub const KEY_LEN: usize = 32;

/// ChaCha20-Poly1305 nonce length in bytes.
pub const NONCE_LEN: usize = 12;

/// Poly1305 tag length appended to every ciphertext.
pub const TAG_LEN: usize = 16;

/// Seal `plaintext` under `key` and `nonce`, authenticating `aad` alongside.
///
/// Sizes are validated before any cryptographic work. The key is wiped as
/// soon as the cipher instance exists, on every path, because key material
/// must not outlive its single use. The nonce is left intact: the caller
/// still needs it for the envelope metadata. The returned ciphertext carries
/// the authentication tag appended.
pub fn seal(
    plaintext: &[u8],
    key: &mut [u8],
    nonce: &[u8],
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if key.len() != KEY_LEN {
        let actual = key.len();
        memory::wipe(key);
        return Err(CryptoError::InvalidKeyLength {
            expected: KEY_LEN,
            actual,
        });
    }
    if nonce.len() != NONCE_LEN {
        memory::wipe(key);
        return Err(CryptoError::InvalidNonceLength {
            expected: NONCE_LEN,
            actual: nonce.len(),
        });
    }

    let mut cipher = ChaCha20Poly1305::new(Key::from_slice(key));
    memory::wipe(key);

    let sealed = cipher.encrypt(
        Nonce::from_slice(nonce),
        Payload {
            msg: plaintext,
            aad,
        },
    );
    memory::clear_cipher(&mut cipher);

    sealed.map_err(|_| CryptoError::Seal)
}

/// Open `ciphertext` under `key` and `nonce`, verifying `aad` alongside.
///
/// The key is wiped at cipher construction and the nonce after the open
/// attempt, success or failure: at that point the nonce has served its one
/// legitimate purpose. A tag mismatch is a single opaque `Authentication`
/// error, indistinguishable from a wrong key or mismatched associated data.
pub fn open(
    ciphertext: &[u8],
    key: &mut [u8],
    nonce: &mut [u8],
    aad: &[u8],
) -> Result<Vec<u8>, CryptoError> {
    if key.len() != KEY_LEN {
        let actual = key.len();
        memory::wipe(key);
        memory::wipe(nonce);
        return Err(CryptoError::InvalidKeyLength {
            expected: KEY_LEN,
            actual,
        });
    }
    if nonce.len() != NONCE_LEN {
        let actual = nonce.len();
        memory::wipe(key);
        memory::wipe(nonce);
        return Err(CryptoError::InvalidNonceLength {
            expected: NONCE_LEN,
            actual,
        });
    }

    let mut cipher = ChaCha20Poly1305::new(Key::from_slice(key));
    memory::wipe(key);

    let opened = cipher.decrypt(
        Nonce::from_slice(nonce),
        Payload {
            msg: ciphertext,
            aad,
        },
    );
    memory::clear_cipher(&mut cipher);
    memory::wipe(nonce);

    opened.map_err(|_| CryptoError::Authentication)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_key() -> Vec<u8> {
        vec![0x42; KEY_LEN]
    }

    fn test_nonce() -> Vec<u8> {
        (0..NONCE_LEN as u8).collect()
    }

    #[test]
    fn seal_then_open() {
        let plaintext = b"hello unreliable world";
        let aad = b"context";

        let ciphertext = seal(plaintext, &mut test_key(), &test_nonce(), aad).unwrap();
        assert_eq!(ciphertext.len(), plaintext.len() + TAG_LEN);

        let recovered = open(&ciphertext, &mut test_key(), &mut test_nonce(), aad).unwrap();
        assert_eq!(&recovered, plaintext);
    }

    #[test]
    fn empty_plaintext_round_trips() {
        let ciphertext = seal(b"", &mut test_key(), &test_nonce(), b"").unwrap();
        assert_eq!(ciphertext.len(), TAG_LEN);

        let recovered = open(&ciphertext, &mut test_key(), &mut test_nonce(), b"").unwrap();
        assert!(recovered.is_empty());
    }

    #[test]
    fn tampered_ciphertext_fails() {
        let mut ciphertext = seal(b"secret", &mut test_key(), &test_nonce(), b"").unwrap();
        ciphertext[0] ^= 0x01;

        let result = open(&ciphertext, &mut test_key(), &mut test_nonce(), b"");
        assert!(matches!(result, Err(CryptoError::Authentication)));
    }

    #[test]
    fn mismatched_aad_fails() {
        let ciphertext = seal(b"secret", &mut test_key(), &test_nonce(), b"one").unwrap();

        let result = open(&ciphertext, &mut test_key(), &mut test_nonce(), b"two");
        assert!(matches!(result, Err(CryptoError::Authentication)));
    }

    #[test]
    fn wrong_key_is_indistinguishable_from_tampering() {
        let ciphertext = seal(b"secret", &mut test_key(), &test_nonce(), b"").unwrap();

        let mut wrong_key = vec![0x43; KEY_LEN];
        let result = open(&ciphertext, &mut wrong_key, &mut test_nonce(), b"");
        assert!(matches!(result, Err(CryptoError::Authentication)));
    }

    #[test]
    fn invalid_sizes_rejected_before_any_work() {
        let mut short_key = vec![0x42; 16];
        let result = seal(b"x", &mut short_key, &test_nonce(), b"");
        assert!(matches!(
            result,
            Err(CryptoError::InvalidKeyLength {
                expected: KEY_LEN,
                actual: 16
            })
        ));

        let result = seal(b"x", &mut test_key(), &[0u8; 8], b"");
        assert!(matches!(
            result,
            Err(CryptoError::InvalidNonceLength {
                expected: NONCE_LEN,
                actual: 8
            })
        ));

        let mut nonce = vec![0u8; 13];
        let result = open(b"ciphertext", &mut test_key(), &mut nonce, b"");
        assert!(matches!(
            result,
            Err(CryptoError::InvalidNonceLength {
                expected: NONCE_LEN,
                actual: 13
            })
        ));
    }

    #[test]
    fn seal_wipes_key_but_not_nonce() {
        let mut key = test_key();
        let nonce = test_nonce();

        seal(b"payload", &mut key, &nonce, b"").unwrap();

        assert_eq!(key, vec![0u8; KEY_LEN]);
        assert_eq!(nonce, test_nonce());
    }

    #[test]
    fn open_wipes_key_and_nonce() {
        let ciphertext = seal(b"payload", &mut test_key(), &test_nonce(), b"").unwrap();

        let mut key = test_key();
        let mut nonce = test_nonce();
        open(&ciphertext, &mut key, &mut nonce, b"").unwrap();

        assert_eq!(key, vec![0u8; KEY_LEN]);
        assert_eq!(nonce, vec![0u8; NONCE_LEN]);
    }

    #[test]
    fn open_wipes_inputs_on_failure_too() {
        let mut key = test_key();
        let mut nonce = test_nonce();
        let result = open(b"not a real ciphertext", &mut key, &mut nonce, b"");

        assert!(result.is_err());
        assert_eq!(key, vec![0u8; KEY_LEN]);
        assert_eq!(nonce, vec![0u8; NONCE_LEN]);
    }

    #[test]
    fn seal_wipes_key_on_invalid_nonce() {
        let mut key = test_key();
        let _ = seal(b"x", &mut key, &[0u8; 3], b"");
        assert_eq!(key, vec![0u8; KEY_LEN]);
    }
}
