use chrono::Local;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::domain::{ApplicationRecord, InterviewStatus};
use super::evaluation::RiskTier;
use super::repository::{LedgerStore, PersistenceError};

/// Logical key the ledger is stored under.
pub const LEDGER_KEY: &str = "admission_audit_log";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Immutable record of one accepted submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub id: String,
    pub full_name: String,
    pub email: String,
    #[serde(with = "status_label")]
    pub interview_status: Option<InterviewStatus>,
    pub exception_count: usize,
    pub risk_level: RiskTier,
    pub timestamp: String,
}

impl AuditEntry {
    /// Snapshot the candidate with a fresh random id and the local submission time.
    pub fn new(record: &ApplicationRecord, exception_count: usize, risk_level: RiskTier) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            full_name: record.full_name.trim().to_string(),
            email: record.email.trim().to_string(),
            interview_status: record.interview_status,
            exception_count,
            risk_level,
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
        }
    }
}

/// Interview status travels as its label, with an empty string for "not set".
mod status_label {
    use serde::{Deserialize, Deserializer, Serializer};

    use super::InterviewStatus;

    pub(super) fn serialize<S>(value: &Option<InterviewStatus>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(value.map(InterviewStatus::label).unwrap_or(""))
    }

    pub(super) fn deserialize<'de, D>(deserializer: D) -> Result<Option<InterviewStatus>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        if raw.is_empty() {
            return Ok(None);
        }
        InterviewStatus::from_label(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown interview status '{raw}'")))
    }
}

/// Newest-first history of accepted submissions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuditLedger {
    entries: Vec<AuditEntry>,
}

impl AuditLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[AuditEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn latest(&self) -> Option<&AuditEntry> {
        self.entries.first()
    }

    /// Return a ledger with `entry` at index 0.
    pub fn append(&self, entry: AuditEntry) -> Self {
        let mut entries = Vec::with_capacity(self.entries.len() + 1);
        entries.push(entry);
        entries.extend(self.entries.iter().cloned());
        Self { entries }
    }

    /// Drop every entry. Confirmation is the caller's responsibility.
    pub fn clear(&self) -> Self {
        Self::default()
    }

    /// Hydrate from the store; a missing or blank value is an empty ledger.
    pub fn load<S>(store: &S) -> Result<Self, PersistenceError>
    where
        S: LedgerStore + ?Sized,
    {
        let entries = match store.read(LEDGER_KEY)? {
            Some(raw) if !raw.trim().is_empty() => {
                serde_json::from_str(&raw).map_err(PersistenceError::Deserialization)?
            }
            _ => Vec::new(),
        };
        Ok(Self { entries })
    }

    pub fn save<S>(&self, store: &S) -> Result<(), PersistenceError>
    where
        S: LedgerStore + ?Sized,
    {
        let payload =
            serde_json::to_string(&self.entries).map_err(PersistenceError::Serialization)?;
        store.write(LEDGER_KEY, &payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::screening::repository::InMemoryLedgerStore;
    use serde_json::json;

    fn entry(name: &str) -> AuditEntry {
        let record = ApplicationRecord {
            full_name: name.to_string(),
            email: format!("{}@example.com", name.to_lowercase()),
            interview_status: Some(InterviewStatus::Cleared),
            ..ApplicationRecord::default()
        };
        AuditEntry::new(&record, 1, RiskTier::Medium)
    }

    #[test]
    fn append_places_newest_first_without_touching_prior_snapshot() {
        let first = AuditLedger::new().append(entry("Asha"));
        let second = first.append(entry("Ravi"));

        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 2);
        assert_eq!(second.entries()[0].full_name, "Ravi");
        assert_eq!(second.entries()[1].full_name, "Asha");
    }

    #[test]
    fn entry_ids_are_unique() {
        let a = entry("Asha");
        let b = entry("Asha");
        assert_ne!(a.id, b.id);
        assert!(Uuid::parse_str(&a.id).is_ok());
    }

    #[test]
    fn entries_serialize_with_stored_wire_format() {
        let mut entry = entry("Asha");
        entry.interview_status = None;
        let value = serde_json::to_value(&entry).expect("serializes");

        assert_eq!(value["fullName"], "Asha");
        assert_eq!(value["interviewStatus"], "");
        assert_eq!(value["exceptionCount"], 1);
        assert_eq!(value["riskLevel"], "Medium");
        assert!(value["timestamp"].is_string());
    }

    #[test]
    fn load_treats_blank_store_as_empty() {
        let store = InMemoryLedgerStore::with_value(LEDGER_KEY, "  ");
        assert!(AuditLedger::load(&store).expect("loads").is_empty());
        assert!(AuditLedger::load(&InMemoryLedgerStore::default())
            .expect("loads")
            .is_empty());
    }

    #[test]
    fn load_rejects_malformed_data() {
        let store = InMemoryLedgerStore::with_value(LEDGER_KEY, "{not json");
        match AuditLedger::load(&store) {
            Err(PersistenceError::Deserialization(_)) => {}
            other => panic!("expected deserialization error, got {other:?}"),
        }
    }

    #[test]
    fn load_rejects_unknown_risk_levels() {
        let payload = json!([{
            "id": "a",
            "fullName": "Asha",
            "email": "asha@example.com",
            "interviewStatus": "Cleared",
            "exceptionCount": 0,
            "riskLevel": "Severe",
            "timestamp": "2026-01-01 10:00:00"
        }]);
        let store = InMemoryLedgerStore::with_value(LEDGER_KEY, &payload.to_string());
        assert!(matches!(
            AuditLedger::load(&store),
            Err(PersistenceError::Deserialization(_))
        ));
    }

    #[test]
    fn save_then_load_preserves_order() {
        let store = InMemoryLedgerStore::default();
        let ledger = AuditLedger::new().append(entry("Asha")).append(entry("Ravi"));

        ledger.save(&store).expect("saves");
        let loaded = AuditLedger::load(&store).expect("loads");

        assert_eq!(loaded, ledger);
        assert_eq!(loaded.latest().map(|e| e.full_name.as_str()), Some("Ravi"));
    }

    #[test]
    fn clear_then_load_is_empty() {
        let store = InMemoryLedgerStore::default();
        let ledger = AuditLedger::new().append(entry("Asha"));
        ledger.save(&store).expect("saves");

        ledger.clear().save(&store).expect("saves cleared");

        assert!(AuditLedger::load(&store).expect("loads").is_empty());
    }
}
