//! Record identifiers drawn from the injected RNG.
//!
//! Ids come from the engine's random source rather than the OS so that a
//! seeded run reproduces the exact same records.

use rand::Rng;
use uuid::{Builder, Uuid};

/// A random (version 4) UUID built from `rng`.
pub fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    Builder::from_random_bytes(rng.gen()).into_uuid()
}

/// `"<prefix>-<uuid>"`, e.g. `quest-5f0c…`.
pub fn record_id<R: Rng + ?Sized>(prefix: &str, rng: &mut R) -> String {
    format!("{prefix}-{}", random_uuid(rng))
}

/// Hunter id: `USER-` followed by eight upper-case hex digits.
pub fn hunter_id<R: Rng + ?Sized>(rng: &mut R) -> String {
    format!("USER-{:08X}", rng.gen::<u32>())
}
