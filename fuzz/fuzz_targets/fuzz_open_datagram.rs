#![no_main]

use libfuzzer_sys::fuzz_target;

use sealed_datagram::Opener;

// Fixed private key: the target is "open never panics on hostile input",
// not key generation.
fn opener() -> Opener {
    Opener::from_key_bytes(&[0x42u8; 32]).unwrap()
}

fuzz_target!(|data: &[u8]| {
    // Every outcome short of a panic is acceptable; hostile datagrams must
    // come back as clean per-message rejections.
    let _ = opener().open_datagram(data);
});
