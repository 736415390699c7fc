use chrono::{DateTime, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

use crate::consts;

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    #[default]
    #[display("walk")]
    Walk,
    #[display("run")]
    Run,
    #[display("play")]
    Play,
    #[display("training")]
    Training,
    #[display("swimming")]
    Swimming,
    #[display("fetch")]
    Fetch,
    #[display("other")]
    Other,
}

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ExerciseIntensity {
    #[display("low")]
    Low,
    #[default]
    #[display("moderate")]
    Moderate,
    #[display("high")]
    High,
}

impl ExerciseIntensity {
    pub fn calories_per_minute(&self) -> f64 {
        match self {
            ExerciseIntensity::Low => 3.0,
            ExerciseIntensity::Moderate => 5.0,
            ExerciseIntensity::High => 8.0,
        }
    }
}

/// One recorded exercise session for a pet.
///
/// `duration_min` and `average_speed_kmh` are derived from the timestamps and
/// distance; callers mutate the source fields and call
/// [`Exercise::recompute_derived`].
#[derive(Debug, Default, Clone, PartialEq, sqlx::FromRow)]
pub struct Exercise {
    pub id: i64,
    pub pet_id: i64,
    pub exercise_type: ExerciseType,
    pub title: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub duration_min: i64,
    pub distance_km: f64,
    pub calories: i64,
    pub intensity: ExerciseIntensity,
    pub notes: String,
    pub average_speed_kmh: f64,
    pub created_at: DateTime<Utc>,
}

impl Exercise {
    /// Whole minutes between two timestamps, truncated.
    pub fn duration_between(start: DateTime<Utc>, end: DateTime<Utc>) -> i64 {
        (end - start).num_seconds() / 60
    }

    /// Average speed in km/h for the given distance and duration; 0 when the
    /// session lasted less than a minute.
    pub fn average_speed(distance_km: f64, duration_min: i64) -> f64 {
        if duration_min > 0 {
            (distance_km / duration_min as f64) * 60.0
        } else {
            0.0
        }
    }

    pub fn recompute_derived(&mut self) {
        self.duration_min = Self::duration_between(self.start_date, self.end_date);
        self.average_speed_kmh = Self::average_speed(self.distance_km, self.duration_min);
    }

    /// Estimated calories burned, linear in duration and the pet's weight
    /// normalized against the reference weight.
    pub fn estimated_calories(&self, pet_weight_kg: f64) -> i64 {
        let weight_factor = pet_weight_kg / consts::CALORIE_REFERENCE_WEIGHT_KG;
        (self.intensity.calories_per_minute() * self.duration_min as f64 * weight_factor) as i64
    }
}
