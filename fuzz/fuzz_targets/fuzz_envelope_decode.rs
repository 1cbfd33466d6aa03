#![no_main]

use libfuzzer_sys::fuzz_target;

use sealed_datagram::Envelope;

// Arbitrary network bytes must decode to an envelope or a clean error,
// never a panic.
fuzz_target!(|data: &[u8]| {
    if let Ok(envelope) = Envelope::decode(data) {
        // A decoded envelope must re-encode to the exact input.
        assert_eq!(&envelope.encode()[..], data);
    }
    let _ = Envelope::peek_suite(data);
});
