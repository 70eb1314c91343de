//! Randomized field and record generation for logsynth.
//!
//! All entropy flows through an explicitly passed [`rand::Rng`] handle, so
//! a run seeded with the same value produces the same records every time.
//! Identifier-shaped values (UUIDs, hex tokens) are derived from that RNG
//! rather than from the system entropy source for the same reason.
//!
//! Two payload variants exist, selected by [`FieldPolicy`]:
//!
//! - `RandomSubset` attaches a random subset of the simple optional fields
//!   (`userId`, `errorCode`, `requestId`, `sessionId`, `region`).
//! - `OperationalMetadata` always attaches the full operational metadata
//!   object (API type, client, document metadata, timing metrics, trace
//!   identifiers).

pub mod builder;
pub mod fields;
pub mod operational;

pub use builder::{FieldPolicy, RecordBuilder};
pub use fields::OptionalField;

use rand::Rng;
use uuid::Uuid;

/// Generate a v4-shaped UUID from the injected RNG.
///
/// `Uuid::new_v4` would consume OS entropy and break seeded reproducibility.
pub fn random_uuid<R: Rng + ?Sized>(rng: &mut R) -> Uuid {
    uuid::Builder::from_random_bytes(rng.random()).into_uuid()
}
