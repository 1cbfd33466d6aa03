pub mod crypto;
pub mod envelope;
pub mod error;
pub mod provision;

// Re-export key types at crate root for convenience.
pub use crypto::{lookup, SuiteInfo};
pub use envelope::{Envelope, Opener, Sealer, DEFAULT_SUITE_ID};
pub use error::{Error, Result};
