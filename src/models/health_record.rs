use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum HealthRecordType {
    #[default]
    #[display("vaccination")]
    Vaccination,
    #[display("checkup")]
    Checkup,
    #[display("medication")]
    Medication,
    #[display("surgery")]
    Surgery,
    #[display("dental")]
    Dental,
    #[display("laboratory")]
    Laboratory,
    #[display("emergency")]
    Emergency,
    #[display("other")]
    Other,
}

/// A medical history entry for one pet; read-only after creation apart from
/// explicit edits.
#[derive(Debug, Default, Clone, PartialEq, sqlx::FromRow)]
pub struct HealthRecord {
    pub id: i64,
    pub pet_id: i64,
    pub record_type: HealthRecordType,
    pub title: String,
    pub record_date: DateTime<Utc>,
    pub veterinarian_name: String,
    pub clinic_name: String,
    pub diagnosis: String,
    pub treatment: String,
    pub notes: String,
    pub cost: f64,
    pub next_appointment: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
