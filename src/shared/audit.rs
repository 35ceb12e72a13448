use chrono::NaiveDateTime;

/// Creation/update metadata stamped onto every record. Each entity embeds the
/// same five columns (`created_at`/`created_by`, `updated_at`/`updated_by`,
/// `deleted`); services build stamps here instead of hand-rolling timestamps.
#[derive(Debug, Clone)]
pub struct Stamp {
    pub at: NaiveDateTime,
    pub by: String,
}

pub fn stamp(actor: &str) -> Stamp {
    Stamp {
        at: chrono::Utc::now().naive_utc(),
        by: actor.to_string(),
    }
}

/// Actor recorded on rows written outside of a user request (seeds, internal
/// transitions such as shipment initialization).
pub const SYSTEM_ACTOR: &str = "system";
