use zeroize::Zeroize;

/// Overwrite every byte of `buf` with zero, in place.
///
/// A no-op on an empty buffer; never panics, never reallocates. The same
/// storage is referenced before and after. The write goes through `zeroize`'s
/// volatile path, so dead-store elimination cannot remove it even though the
/// buffer is typically never read again.
pub fn wipe(buf: &mut [u8]) {
    buf.zeroize();
}

/// Volatile clear of a cipher struct that does not implement `Zeroize`.
///
/// The AEAD cipher holds its key schedule internally; this clears the whole
/// struct before it goes out of scope. Only valid for types without a `Drop`
/// impl that reads the cleared state.
pub(crate) fn clear_cipher<T>(cipher: &mut T) {
    unsafe {
        let ptr = cipher as *mut T as *mut u8;
        core::ptr::write_bytes(ptr, 0, core::mem::size_of::<T>());
        core::sync::atomic::compiler_fence(core::sync::atomic::Ordering::SeqCst);
    }
}
