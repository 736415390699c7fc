use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoutineType {
    #[default]
    #[display("feeding")]
    Feeding,
    #[display("water")]
    Water,
    #[display("bathroom")]
    Bathroom,
    #[display("exercise")]
    Exercise,
    #[display("medication")]
    Medication,
    #[display("grooming")]
    Grooming,
    #[display("playtime")]
    Playtime,
    #[display("training")]
    Training,
}

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum RoutineStatus {
    #[default]
    #[display("pending")]
    Pending,
    #[display("completed")]
    Completed,
    #[display("skipped")]
    Skipped,
    #[display("late")]
    Late,
}

/// A scheduled daily-care task for one pet.
///
/// `Late` is never stored: it is derived on every read from the scheduled
/// time, so a missed background tick can never leave a stale status behind.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DailyRoutine {
    pub id: i64,
    pub pet_id: i64,
    pub title: String,
    pub routine_type: RoutineType,
    pub scheduled_time: DateTime<Utc>,
    pub duration_min: i64,
    pub is_completed: bool,
    pub completed_at: Option<DateTime<Utc>>,
    pub status: RoutineStatus,
    pub notes: String,
    pub is_active: bool,
    pub is_recurring: bool,
    /// Weekday numbers 1 (Monday) through 7 (Sunday); empty means every day.
    pub recurring_days: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DailyRoutine {
    pub fn is_late(&self, now: DateTime<Utc>) -> bool {
        !self.is_completed && now > self.scheduled_time
    }

    /// Effective status as of `now`; `Late` is computed, never persisted.
    pub fn current_status(&self, now: DateTime<Utc>) -> RoutineStatus {
        if self.is_completed {
            RoutineStatus::Completed
        } else if self.status == RoutineStatus::Skipped {
            RoutineStatus::Skipped
        } else if self.is_late(now) {
            RoutineStatus::Late
        } else {
            RoutineStatus::Pending
        }
    }

    /// Marks the routine done. Not guarded: calling it again refreshes
    /// `completed_at`.
    pub fn complete(&mut self, now: DateTime<Utc>) {
        self.is_completed = true;
        self.completed_at = Some(now);
        self.status = RoutineStatus::Completed;
        self.updated_at = now;
    }

    pub fn skip(&mut self, now: DateTime<Utc>) {
        self.status = RoutineStatus::Skipped;
        self.updated_at = now;
    }

    /// Returns a completed or skipped routine to pending.
    pub fn reset(&mut self, now: DateTime<Utc>) {
        self.is_completed = false;
        self.completed_at = None;
        self.status = RoutineStatus::Pending;
        self.updated_at = now;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    fn routine_scheduled_at(scheduled_time: DateTime<Utc>) -> DailyRoutine {
        DailyRoutine {
            id: 1,
            pet_id: 1,
            title: "Morning walk".to_string(),
            routine_type: RoutineType::Exercise,
            scheduled_time,
            duration_min: 30,
            is_active: true,
            ..Default::default()
        }
    }

    #[test]
    fn late_is_derived_and_implies_not_completed() {
        let now = Utc::now();
        let mut routine = routine_scheduled_at(now - TimeDelta::hours(2));

        assert!(routine.is_late(now));
        assert_eq!(routine.current_status(now), RoutineStatus::Late);
        // stored status never became late
        assert_eq!(routine.status, RoutineStatus::Pending);

        routine.complete(now);
        assert!(!routine.is_late(now));
        assert_eq!(routine.current_status(now), RoutineStatus::Completed);
    }

    #[test]
    fn complete_sets_timestamp_and_is_not_idempotent() {
        let now = Utc::now();
        let mut routine = routine_scheduled_at(now);

        routine.complete(now);
        assert!(routine.is_completed);
        assert_eq!(routine.completed_at, Some(now));

        // re-invocation refreshes completed_at (documented current behavior)
        let later = now + TimeDelta::minutes(5);
        routine.complete(later);
        assert_eq!(routine.status, RoutineStatus::Completed);
        assert_eq!(routine.completed_at, Some(later));
    }

    #[test]
    fn skipped_survives_the_derived_status() {
        let now = Utc::now();
        let mut routine = routine_scheduled_at(now - TimeDelta::hours(1));

        routine.skip(now);
        assert_eq!(routine.current_status(now), RoutineStatus::Skipped);
    }

    #[test]
    fn reset_returns_to_pending() {
        let now = Utc::now();
        let mut routine = routine_scheduled_at(now + TimeDelta::hours(1));

        routine.complete(now);
        routine.reset(now);

        assert!(!routine.is_completed);
        assert_eq!(routine.completed_at, None);
        assert_eq!(routine.current_status(now), RoutineStatus::Pending);
    }
}
