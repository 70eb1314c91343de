//! Optional-field generators (the simple payload variant).
//!
//! Each field samples one value of its own shape: templated identifier
//! strings, fixed-width codes, region tags, or RNG-derived unique ids.

use crate::random_uuid;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::{Map, Value};

/// Candidate region tags.
pub const REGIONS: [&str; 4] = ["EU", "US", "APAC", "CH"];

/// The enumerated set of optional fields a record's `data` payload can
/// carry under the random-subset policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionalField {
    UserId,
    ErrorCode,
    RequestId,
    SessionId,
    Region,
}

impl OptionalField {
    /// Every optional field, in declaration order.
    pub const ALL: [OptionalField; 5] = [
        OptionalField::UserId,
        OptionalField::ErrorCode,
        OptionalField::RequestId,
        OptionalField::SessionId,
        OptionalField::Region,
    ];

    /// JSON key for this field.
    pub fn name(&self) -> &'static str {
        match self {
            OptionalField::UserId => "userId",
            OptionalField::ErrorCode => "errorCode",
            OptionalField::RequestId => "requestId",
            OptionalField::SessionId => "sessionId",
            OptionalField::Region => "region",
        }
    }

    /// Look a field up by its JSON key.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().find(|f| f.name() == name).copied()
    }

    /// Sample one value for this field.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Value {
        match self {
            OptionalField::UserId => {
                Value::from(format!("user_{}", rng.random_range(1000..=9999)))
            }
            // ERR001 to ERR005
            OptionalField::ErrorCode => {
                Value::from(format!("ERR{:03}", rng.random_range(1..=5)))
            }
            OptionalField::RequestId => Value::from(random_uuid(rng).to_string()),
            // shorter unique session id
            OptionalField::SessionId => {
                Value::from(random_uuid(rng).simple().to_string()[..16].to_string())
            }
            OptionalField::Region => {
                Value::from(REGIONS.choose(rng).copied().unwrap_or_default())
            }
        }
    }
}

/// Sample a value for a field named at runtime; `None` for unrecognized
/// names.
pub fn sample_by_name<R: Rng + ?Sized>(name: &str, rng: &mut R) -> Option<Value> {
    OptionalField::from_name(name).map(|field| field.sample(rng))
}

/// Attach a uniformly sized random subset of `fields`, each with a freshly
/// sampled value.
pub fn random_subset<R: Rng + ?Sized>(
    fields: &[OptionalField],
    rng: &mut R,
) -> Map<String, Value> {
    let count = rng.random_range(0..=fields.len());
    let mut data = Map::new();
    for field in fields.choose_multiple(rng, count) {
        data.insert(field.name().to_string(), field.sample(rng));
    }
    data
}
