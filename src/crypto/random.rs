use rand::rngs::OsRng;
use rand::RngCore;

use crate::error::CryptoError;

/// `n` fresh cryptographically secure random bytes.
pub fn secure_bytes(n: usize) -> Result<Vec<u8>, CryptoError> {
    let mut buf = vec![0u8; n];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|_| CryptoError::Entropy)?;
    Ok(buf)
}

/// Fixed-size variant of [`secure_bytes`].
pub fn secure_array<const N: usize>() -> Result<[u8; N], CryptoError> {
    let mut buf = [0u8; N];
    OsRng
        .try_fill_bytes(&mut buf)
        .map_err(|_| CryptoError::Entropy)?;
    Ok(buf)
}

/// Four secure random bytes interpreted as a big-endian unsigned 32-bit.
pub fn secure_u32() -> Result<u32, CryptoError> {
    Ok(u32::from_be_bytes(secure_array::<4>()?))
}

/// Uniform secure random integer over the closed interval `[min, max]`.
///
/// `min == max` returns `min` without drawing entropy.
pub fn int_in_range(min: i64, max: i64) -> Result<i64, CryptoError> {
    if min > max {
        return Err(CryptoError::InvalidRange { min, max });
    }
    if min == max {
        return Ok(min);
    }

    // Interval width as u64; overflows only when the interval is the whole
    // i64 domain, where any 64-bit draw is already uniform.
    let width = match min.abs_diff(max).checked_add(1) {
        Some(width) => width,
        None => return Ok(i64::from_be_bytes(secure_array::<8>()?)),
    };

    // Rejection sampling: accept draws below the largest multiple of width.
    let limit = u64::MAX - (u64::MAX % width);
    loop {
        let draw = u64::from_be_bytes(secure_array::<8>()?);
        if draw < limit {
            return Ok(min.wrapping_add((draw % width) as i64));
        }
    }
}

/// Defensive fallback for a buffer supplied by an untrusted or buggy caller.
///
/// An absent/empty buffer is replaced by `target_size` fresh random bytes. A
/// buffer whose bytes are all identical (which subsumes all-zero) is judged
/// insecure and overwritten in place; any buffer containing at least two
/// distinct byte values is accepted unchanged. This is not a randomness
/// source: internal nonce generation always draws directly from
/// [`secure_bytes`].
pub fn repair_insecure_buffer(buf: &mut Vec<u8>, target_size: usize) -> Result<(), CryptoError> {
    if buf.is_empty() {
        *buf = vec![0u8; target_size];
    }

    if is_all_identical(buf) {
        tracing::warn!(
            len = buf.len(),
            "caller-supplied buffer judged insecure, replacing with fresh random bytes"
        );
        OsRng
            .try_fill_bytes(buf)
            .map_err(|_| CryptoError::Entropy)?;
    }

    Ok(())
}

fn is_all_identical(buf: &[u8]) -> bool {
    match buf.split_first() {
        None => true,
        Some((first, rest)) => rest.iter().all(|b| b == first),
    }
}
