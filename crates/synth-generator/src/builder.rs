//! Record builder: template + randomized identity whitelist + data payload.

use crate::{fields, operational, OptionalField};
use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use synth_core::{format_event_timestamp, EventRecord, EventTemplate};

/// Namespaces the identity whitelist draws from.
pub const NAMESPACES: [&str; 4] = ["int", "prd", "dev", "stg"];

/// Pod names the identity whitelist draws from.
pub const PODS: [&str; 4] = [
    "fabrikam-orders-api-7d8c9fbbcc-9k2lm",
    "fabrikam-orders-api-7d8c9fbbcc-abc12",
    "fabrikam-orders-worker-7f8d9c-xyz99",
    "fabrikam-orders-scheduler-3e4f5g-def45",
];

/// Severities the identity whitelist draws from.
pub const SEVERITIES: [&str; 4] = ["info", "warning", "debug", "error"];

/// Which data payload is attached to each generated record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldPolicy {
    /// Attach a uniformly sized random subset of the given optional fields.
    RandomSubset(Vec<OptionalField>),
    /// Always attach the full operational metadata object.
    OperationalMetadata,
}

impl FieldPolicy {
    /// The random-subset policy over the full optional-field set.
    pub fn subset() -> Self {
        FieldPolicy::RandomSubset(OptionalField::ALL.to_vec())
    }
}

impl Default for FieldPolicy {
    fn default() -> Self {
        FieldPolicy::OperationalMetadata
    }
}

/// Builds event records from an immutable template.
///
/// Per record, a fixed whitelist of identity fields (namespace, pod,
/// severity, pod IP, host) is overwritten with fresh random values; all
/// other template fields are immutable across a run. Pure with respect to
/// its inputs apart from consuming entropy from the passed RNG.
#[derive(Debug, Clone)]
pub struct RecordBuilder {
    template: EventTemplate,
    policy: FieldPolicy,
}

impl RecordBuilder {
    pub fn new(template: EventTemplate, policy: FieldPolicy) -> Self {
        Self { template, policy }
    }

    pub fn template(&self) -> &EventTemplate {
        &self.template
    }

    pub fn policy(&self) -> &FieldPolicy {
        &self.policy
    }

    /// Build one record with the given logical timestamp.
    pub fn build<R: Rng + ?Sized>(&self, rng: &mut R, timestamp: DateTime<Utc>) -> EventRecord {
        let mut identity = self.template.clone();
        identity.namespace = pick(&NAMESPACES, rng);
        identity.pod = pick(&PODS, rng);
        identity.severity = pick(&SEVERITIES, rng);
        identity.pod_ip = format!(
            "10.{}.{}.{}",
            rng.random_range(1..=255),
            rng.random_range(1..=255),
            rng.random_range(1..=255)
        );
        identity.host = format!(
            "aks-applications-{}-vmss{}",
            rng.random_range(10_000_000..=99_999_999),
            rng.random_range(1000..=9999)
        );

        let data = match &self.policy {
            FieldPolicy::RandomSubset(optional) => fields::random_subset(optional, rng),
            FieldPolicy::OperationalMetadata => operational::generate(rng, &timestamp),
        };

        EventRecord {
            identity,
            timestamp: format_event_timestamp(&timestamp),
            data,
        }
    }
}

fn pick<R: Rng + ?Sized>(pool: &[&str], rng: &mut R) -> String {
    pool.choose(rng).copied().unwrap_or_default().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn ts() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 2, 3, 4, 5, 6).unwrap()
    }

    #[test]
    fn test_whitelist_fields_drawn_from_pools() {
        let builder = RecordBuilder::new(EventTemplate::default(), FieldPolicy::default());
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..20 {
            let record = builder.build(&mut rng, ts());
            assert!(NAMESPACES.contains(&record.identity.namespace.as_str()));
            assert!(PODS.contains(&record.identity.pod.as_str()));
            assert!(SEVERITIES.contains(&record.identity.severity.as_str()));

            let octets: Vec<u32> = record
                .identity
                .pod_ip
                .split('.')
                .map(|o| o.parse().unwrap())
                .collect();
            assert_eq!(octets[0], 10);
            assert!(octets[1..].iter().all(|o| (1..=255).contains(o)));

            assert!(record.identity.host.starts_with("aks-applications-"));
            assert!(record.identity.host.contains("-vmss"));
        }
    }

    #[test]
    fn test_non_whitelist_fields_are_template_verbatim() {
        let template = EventTemplate::default();
        let builder = RecordBuilder::new(template.clone(), FieldPolicy::default());
        let mut rng = StdRng::seed_from_u64(42);

        let record = builder.build(&mut rng, ts());
        assert_eq!(record.identity.container, template.container);
        assert_eq!(record.identity.container_id, template.container_id);
        assert_eq!(record.identity.pod_owner, template.pod_owner);
        assert_eq!(record.identity.resource_group, template.resource_group);
        assert_eq!(record.identity.subscription, template.subscription);
        assert_eq!(record.identity.record_type, template.record_type);
    }

    #[test]
    fn test_timestamp_is_logical_not_wall_clock() {
        let builder = RecordBuilder::new(EventTemplate::default(), FieldPolicy::default());
        let mut rng = StdRng::seed_from_u64(42);
        let record = builder.build(&mut rng, ts());
        assert_eq!(record.timestamp, "2026-02-03T04:05:06.0000000Z");
    }

    #[test]
    fn test_operational_policy_attaches_full_payload() {
        let builder =
            RecordBuilder::new(EventTemplate::default(), FieldPolicy::OperationalMetadata);
        let mut rng = StdRng::seed_from_u64(42);
        let record = builder.build(&mut rng, ts());
        assert_eq!(record.data.len(), operational::OPERATIONAL_KEYS.len());
    }

    #[test]
    fn test_subset_policy_attaches_subset() {
        let builder = RecordBuilder::new(EventTemplate::default(), FieldPolicy::subset());
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let record = builder.build(&mut rng, ts());
            assert!(record.data.len() <= OptionalField::ALL.len());
            for key in record.data.keys() {
                assert!(OptionalField::from_name(key).is_some());
            }
        }
    }

    #[test]
    fn test_build_is_seed_deterministic() {
        let builder = RecordBuilder::new(EventTemplate::default(), FieldPolicy::default());
        let mut rng1 = StdRng::seed_from_u64(42);
        let mut rng2 = StdRng::seed_from_u64(42);

        for _ in 0..10 {
            assert_eq!(builder.build(&mut rng1, ts()), builder.build(&mut rng2, ts()));
        }
    }
}
