//! Operational metadata payload (the full variant).
//!
//! Every field is sampled independently per record, with three deliberate
//! couplings carried over from the system being simulated: `templateCode`
//! and `templateName` share one index, the template dates are the record
//! timestamp back-dated by whole days, and the three sub-timings are
//! fractions of `timeTotal` (proportional ranges only -- they are not
//! forced to sum to it).

use crate::random_uuid;
use chrono::{DateTime, Utc};
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::{Map, Value};

pub const CLIENTS: [&str; 5] = [
    "contoso Standard PIB",
    "contoso Premium Client",
    "Enterprise Solutions GmbH",
    "Financial Services AG",
    "Insurance Corp",
];

pub const DOCUMENT_DEFINITIONS: [&str; 5] = [
    "contoso_standard_pib",
    "annual_report",
    "quarterly_statement",
    "fund_factsheet",
    "portfolio_summary",
];

pub const TEMPLATE_CODES: [&str; 5] = [
    "aktie_stammaktie",
    "bond_certificate",
    "fund_report",
    "etf_factsheet",
    "derivative_notice",
];

pub const TEMPLATE_NAMES: [&str; 5] = [
    "Aktie - Stammaktie",
    "Bond Certificate",
    "Fund Report",
    "ETF Factsheet",
    "Derivative Notice",
];

pub const LOCALES: [&str; 5] = ["de_DE", "en_US", "fr_FR", "it_IT", "es_ES"];

pub const LOG_TYPES: [&str; 5] = [
    "DocGeneration",
    "TemplateLoad",
    "DataFetch",
    "PDFRender",
    "CacheHit",
];

pub const IDENTIFIERS: [&str; 7] = [
    "DE0007100000",
    "DE0008404005",
    "DE0005140008",
    "DE0007164600",
    "DE0005552004",
    "LU0378449770",
    "IE00B4L5Y983",
];

const API_TYPES: [&str; 3] = ["REST", "SOAP", "GraphQL"];
const AUTHORIZATION_MODES: [&str; 3] = ["AuthorizedOnly", "Anonymous", "Token"];
const DATA_CLASSIFICATIONS: [&str; 3] = ["Public", "Internal", "Confidential"];
const EXTERNAL_SOURCES: [&str; 4] = ["", "bloomberg", "refinitiv", "internal"];
const MEDIA_TYPES: [&str; 3] = ["PDF", "HTML", "DOCX"];
const SOURCE_ACTIONS: [&str; 3] = ["DocumentGeneration", "TemplatePreview", "BatchProcess"];
const SOURCE_CATEGORIES: [&str; 3] = ["API", "Scheduler", "Manual"];

/// Date format used for the back-dated template dates (fixed 7-digit
/// fractional part).
const TEMPLATE_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S.0000000Z";

/// The full key set of the operational payload, for validation in tests and
/// by downstream tooling.
pub const OPERATIONAL_KEYS: [&str; 32] = [
    "apiType",
    "authorizationMode",
    "backendGui",
    "client",
    "contentClient",
    "dataClassification",
    "documentContentLength",
    "documentDefinition",
    "documentName",
    "externalSource",
    "generationEngine",
    "identifier",
    "infondsVersion",
    "locale",
    "logType",
    "mediaType",
    "pageConfigurationCode",
    "serialNumber",
    "sourceAction",
    "sourceCategory",
    "templateAuthorizationDate",
    "templateCode",
    "templateName",
    "templateVersion",
    "templateVersionDate",
    "timeCalculation",
    "timeDocCreator",
    "timeGC",
    "timeTotal",
    "traceId",
    "traceParentId",
    "uploadToDocRepository",
];

fn choose<'a, R: Rng + ?Sized>(pool: &[&'a str], rng: &mut R) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

/// The record timestamp back-dated by 1-30 whole days.
fn back_dated<R: Rng + ?Sized>(timestamp: &DateTime<Utc>, rng: &mut R) -> String {
    let days = rng.random_range(1..=30);
    (*timestamp - chrono::Duration::days(days))
        .format(TEMPLATE_DATE_FORMAT)
        .to_string()
}

/// Build the full operational metadata object for one record.
pub fn generate<R: Rng + ?Sized>(rng: &mut R, timestamp: &DateTime<Utc>) -> Map<String, Value> {
    let time_total: i64 = rng.random_range(200..=5000);
    let time_doc_creator = (time_total as f64 * rng.random_range(0.70..0.95)) as i64;
    let time_calculation = (time_total as f64 * rng.random_range(0.02..0.10)) as i64;
    let time_gc = (time_total as f64 * rng.random_range(0.01..0.05)) as i64;

    let template_idx = rng.random_range(0..TEMPLATE_CODES.len());

    let mut data = Map::new();
    data.insert("apiType".into(), choose(&API_TYPES, rng).into());
    data.insert(
        "authorizationMode".into(),
        choose(&AUTHORIZATION_MODES, rng).into(),
    );
    data.insert("backendGui".into(), rng.random_bool(0.5).into());
    data.insert("client".into(), choose(&CLIENTS, rng).into());
    data.insert("contentClient".into(), choose(&CLIENTS, rng).into());
    data.insert(
        "dataClassification".into(),
        choose(&DATA_CLASSIFICATIONS, rng).into(),
    );
    data.insert(
        "documentContentLength".into(),
        rng.random_range(10_000..=500_000i64).into(),
    );
    data.insert(
        "documentDefinition".into(),
        choose(&DOCUMENT_DEFINITIONS, rng).into(),
    );
    data.insert(
        "documentName".into(),
        format!(
            "document-{}.pdf",
            &random_uuid(rng).simple().to_string()[..8]
        )
        .into(),
    );
    data.insert(
        "externalSource".into(),
        choose(&EXTERNAL_SOURCES, rng).into(),
    );
    data.insert("generationEngine".into(), "docCreator".into());
    data.insert("identifier".into(), choose(&IDENTIFIERS, rng).into());
    data.insert(
        "infondsVersion".into(),
        format!(
            "4.{}.{}",
            rng.random_range(1..=5),
            rng.random_range(1000..=4000)
        )
        .into(),
    );
    data.insert("locale".into(), choose(&LOCALES, rng).into());
    data.insert("logType".into(), choose(&LOG_TYPES, rng).into());
    data.insert("mediaType".into(), choose(&MEDIA_TYPES, rng).into());
    data.insert("pageConfigurationCode".into(), "contoso".into());
    data.insert("serialNumber".into(), random_uuid(rng).to_string().into());
    data.insert("sourceAction".into(), choose(&SOURCE_ACTIONS, rng).into());
    data.insert(
        "sourceCategory".into(),
        choose(&SOURCE_CATEGORIES, rng).into(),
    );
    data.insert(
        "templateAuthorizationDate".into(),
        back_dated(timestamp, rng).into(),
    );
    data.insert("templateCode".into(), TEMPLATE_CODES[template_idx].into());
    data.insert("templateName".into(), TEMPLATE_NAMES[template_idx].into());
    data.insert(
        "templateVersion".into(),
        rng.random_range(1..=50i64).into(),
    );
    data.insert(
        "templateVersionDate".into(),
        back_dated(timestamp, rng).into(),
    );
    data.insert("timeCalculation".into(), time_calculation.into());
    data.insert("timeDocCreator".into(), time_doc_creator.into());
    data.insert("timeGC".into(), time_gc.into());
    data.insert("timeTotal".into(), time_total.into());
    data.insert(
        "traceId".into(),
        random_uuid(rng).simple().to_string().into(),
    );
    data.insert(
        "traceParentId".into(),
        random_uuid(rng).simple().to_string()[..16].to_string().into(),
    );
    data.insert(
        "uploadToDocRepository".into(),
        rng.random_bool(0.5).into(),
    );

    data
}
