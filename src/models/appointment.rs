use chrono::{DateTime, Datelike, Days, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AppointmentType {
    #[default]
    #[display("veterinary")]
    Veterinary,
    #[display("grooming")]
    Grooming,
    #[display("vaccination")]
    Vaccination,
    #[display("checkup")]
    Checkup,
    #[display("surgery")]
    Surgery,
    #[display("dental")]
    Dental,
    #[display("other")]
    Other,
}

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    #[display("upcoming")]
    Upcoming,
    #[display("completed")]
    Completed,
    #[display("cancelled")]
    Cancelled,
    #[display("missed")]
    Missed,
}

/// A veterinary or care appointment for one pet.
///
/// Status only moves forward: upcoming to completed, cancelled or missed.
/// `Missed` is not monitored continuously; it is applied lazily through
/// [`Appointment::update_status_if_needed`] when a collection is loaded.
#[derive(Debug, Default, Clone, PartialEq, sqlx::FromRow)]
pub struct Appointment {
    pub id: i64,
    pub pet_id: i64,
    pub appointment_type: AppointmentType,
    pub title: String,
    pub date: DateTime<Utc>,
    pub duration_min: i64,
    pub location: String,
    pub veterinarian_name: String,
    pub notes: String,
    pub status: AppointmentStatus,
    pub reminder_minutes_before: i64,
    pub cost: f64,
    pub created_at: DateTime<Utc>,
}

impl Appointment {
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.date < now
    }

    pub fn is_today(&self, now: DateTime<Utc>) -> bool {
        self.date.date_naive() == now.date_naive()
    }

    /// Whether the appointment falls in the current ISO week (Monday start).
    pub fn is_this_week(&self, now: DateTime<Utc>) -> bool {
        let week_start = now.date_naive() - Days::new(u64::from(now.weekday().num_days_from_monday()));
        let date = self.date.date_naive();
        date >= week_start && date < week_start + Days::new(7)
    }

    pub fn complete(&mut self) {
        if self.status == AppointmentStatus::Upcoming {
            self.status = AppointmentStatus::Completed;
        }
    }

    pub fn cancel(&mut self) {
        if self.status == AppointmentStatus::Upcoming {
            self.status = AppointmentStatus::Cancelled;
        }
    }

    /// Lazy missed-check; the only transition not driven by a user action.
    /// Returns true when the status actually changed.
    pub fn update_status_if_needed(&mut self, now: DateTime<Utc>) -> bool {
        if self.status == AppointmentStatus::Upcoming && self.is_past(now) {
            self.status = AppointmentStatus::Missed;
            return true;
        }
        false
    }
}
