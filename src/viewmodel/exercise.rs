use chrono::{DateTime, Datelike, Days, Utc};
use log::error;
use serde::{Deserialize, Serialize};

use super::ChangeListener;
use crate::{
    models::{
        exercise::{Exercise, ExerciseIntensity, ExerciseType},
        pet::Pet,
    },
    repo,
};

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseFilter {
    #[default]
    All,
    Walk,
    Run,
    Play,
    Training,
    Swimming,
    Fetch,
    Other,
}

impl ExerciseFilter {
    fn exercise_type(&self) -> Option<ExerciseType> {
        match self {
            ExerciseFilter::All => None,
            ExerciseFilter::Walk => Some(ExerciseType::Walk),
            ExerciseFilter::Run => Some(ExerciseType::Run),
            ExerciseFilter::Play => Some(ExerciseType::Play),
            ExerciseFilter::Training => Some(ExerciseType::Training),
            ExerciseFilter::Swimming => Some(ExerciseType::Swimming),
            ExerciseFilter::Fetch => Some(ExerciseType::Fetch),
            ExerciseFilter::Other => Some(ExerciseType::Other),
        }
    }
}

/// A session being tracked right now. The wall clock is sampled by the caller
/// and passed in, so elapsed time is derived from a fixed reference instead of
/// an accumulating timer that drifts across pauses.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSession {
    pub exercise_id: i64,
    pub exercise_type: ExerciseType,
    pub started_at: DateTime<Utc>,
    /// Start of the current running stretch, shifted on resume so that
    /// `now - reference` always equals the accumulated running time.
    reference: DateTime<Utc>,
    pub elapsed_secs: i64,
    pub is_paused: bool,
}

impl ActiveSession {
    pub fn elapsed_minutes(&self) -> i64 {
        self.elapsed_secs / 60
    }
}

/// Exercise history and live-session tracking for the selected pet.
pub struct ExerciseViewModel {
    repo: repo::ImplPetRepo,
    pub exercises: Vec<Exercise>,
    pub filtered_exercises: Vec<Exercise>,
    pub selected_filter: ExerciseFilter,
    pub is_loading: bool,
    pub active_session: Option<ActiveSession>,
    current_pet: Option<Pet>,
    on_change: Option<ChangeListener>,
}

impl ExerciseViewModel {
    pub fn new(repo: repo::ImplPetRepo) -> Self {
        Self {
            repo,
            exercises: Vec::new(),
            filtered_exercises: Vec::new(),
            selected_filter: ExerciseFilter::default(),
            is_loading: false,
            active_session: None,
            current_pet: None,
            on_change: None,
        }
    }

    pub fn set_on_change(&mut self, listener: ChangeListener) {
        self.on_change = Some(listener);
    }

    fn notify(&self) {
        if let Some(listener) = &self.on_change {
            listener();
        }
    }

    pub async fn load_exercises(&mut self, pet: &Pet) {
        self.is_loading = true;
        self.current_pet = Some(pet.clone());

        match self.repo.get_pet_exercises(pet.id).await {
            Ok(exercises) => self.exercises = exercises,
            Err(err) => error!("failed to load exercises for pet {}: {err:#}", pet.id),
        }

        self.apply_filter();
        self.is_loading = false;
        self.notify();
    }

    pub fn apply_filter(&mut self) {
        let mut filtered: Vec<Exercise> = self
            .exercises
            .iter()
            .filter(|exercise| match self.selected_filter.exercise_type() {
                None => true,
                Some(exercise_type) => exercise.exercise_type == exercise_type,
            })
            .cloned()
            .collect();

        // newest first; id breaks ties so the order is stable across loads
        filtered.sort_by(|a, b| b.start_date.cmp(&a.start_date).then(b.id.cmp(&a.id)));
        self.filtered_exercises = filtered;
    }

    pub fn set_filter(&mut self, filter: ExerciseFilter) {
        self.selected_filter = filter;
        self.apply_filter();
        self.notify();
    }

    /// Starts tracking a session. The entity is inserted up front so a crash
    /// mid-session leaves a row instead of losing the workout; the session is
    /// only armed when that insert succeeds.
    pub async fn start_exercise(&mut self, exercise_type: ExerciseType, now: DateTime<Utc>) {
        let Some(pet) = self.current_pet.clone() else {
            return;
        };

        let exercise = Exercise {
            pet_id: pet.id,
            exercise_type,
            title: exercise_type.to_string(),
            start_date: now,
            end_date: now,
            created_at: now,
            ..Default::default()
        };

        match self.repo.insert_exercise(&exercise).await {
            Ok(exercise_id) => {
                self.active_session = Some(ActiveSession {
                    exercise_id,
                    exercise_type,
                    started_at: now,
                    reference: now,
                    elapsed_secs: 0,
                    is_paused: false,
                });
                self.notify();
            }
            Err(err) => error!("failed to start exercise session: {err:#}"),
        }
    }

    /// Refreshes `elapsed_secs` from the reference instant. No-op while paused.
    pub fn tick(&mut self, now: DateTime<Utc>) {
        if let Some(session) = &mut self.active_session {
            if !session.is_paused {
                session.elapsed_secs = (now - session.reference).num_seconds();
                self.notify();
            }
        }
    }

    pub fn pause_exercise(&mut self, now: DateTime<Utc>) {
        if let Some(session) = &mut self.active_session {
            if !session.is_paused {
                session.elapsed_secs = (now - session.reference).num_seconds();
                session.is_paused = true;
                self.notify();
            }
        }
    }

    pub fn resume_exercise(&mut self, now: DateTime<Utc>) {
        if let Some(session) = &mut self.active_session {
            if session.is_paused {
                session.reference = now - chrono::TimeDelta::seconds(session.elapsed_secs);
                session.is_paused = false;
                self.notify();
            }
        }
    }

    /// Finalizes the active session: derives duration, speed and calories and
    /// writes them back to the row inserted at start.
    pub async fn stop_exercise(
        &mut self,
        distance_km: f64,
        notes: String,
        intensity: ExerciseIntensity,
        now: DateTime<Utc>,
    ) {
        let (Some(session), Some(pet)) = (self.active_session.take(), self.current_pet.clone())
        else {
            return;
        };

        // a paused session keeps its frozen elapsed time
        let elapsed_secs = if session.is_paused {
            session.elapsed_secs
        } else {
            (now - session.reference).num_seconds()
        };

        let mut exercise = Exercise {
            id: session.exercise_id,
            pet_id: pet.id,
            exercise_type: session.exercise_type,
            title: session.exercise_type.to_string(),
            start_date: session.started_at,
            end_date: now,
            duration_min: elapsed_secs / 60,
            distance_km,
            intensity,
            notes,
            average_speed_kmh: 0.0,
            calories: 0,
            created_at: session.started_at,
        };
        exercise.average_speed_kmh = Exercise::average_speed(distance_km, exercise.duration_min);
        exercise.calories = exercise.estimated_calories(pet.weight_kg);

        if let Err(err) = self.repo.update_exercise(&exercise).await {
            error!("failed to save exercise {}: {err:#}", exercise.id);
        }

        self.load_exercises(&pet).await;
    }

    /// Discards the active session and the row created when it started.
    pub async fn cancel_exercise(&mut self) {
        let (Some(session), Some(pet)) = (self.active_session.take(), self.current_pet.clone())
        else {
            return;
        };

        if let Err(err) = self.repo.delete_exercise(session.exercise_id, pet.id).await {
            error!("failed to discard exercise {}: {err:#}", session.exercise_id);
        }
        self.notify();
    }

    pub async fn update_exercise(&mut self, mut updated: Exercise) {
        let Some(pet) = self.current_pet.clone() else {
            return;
        };

        updated.recompute_derived();
        if let Err(err) = self.repo.update_exercise(&updated).await {
            error!("failed to save exercise {}: {err:#}", updated.id);
        }

        self.load_exercises(&pet).await;
    }

    pub async fn delete_exercise(&mut self, exercise_id: i64) {
        let Some(pet) = self.current_pet.clone() else {
            return;
        };

        if let Err(err) = self.repo.delete_exercise(exercise_id, pet.id).await {
            error!("failed to delete exercise {exercise_id}: {err:#}");
        }

        self.load_exercises(&pet).await;
    }

    pub fn total_duration_min(&self) -> i64 {
        self.exercises.iter().map(|e| e.duration_min).sum()
    }

    pub fn total_distance_km(&self) -> f64 {
        self.exercises.iter().map(|e| e.distance_km).sum()
    }

    pub fn total_calories(&self) -> i64 {
        self.exercises.iter().map(|e| e.calories).sum()
    }

    pub fn average_duration_min(&self) -> f64 {
        if self.exercises.is_empty() {
            0.0
        } else {
            self.total_duration_min() as f64 / self.exercises.len() as f64
        }
    }

    /// Sessions started in the current ISO week (Monday start).
    pub fn this_week_count(&self, now: DateTime<Utc>) -> usize {
        let week_start =
            now.date_naive() - Days::new(u64::from(now.weekday().num_days_from_monday()));
        self.exercises
            .iter()
            .filter(|e| {
                let date = e.start_date.date_naive();
                date >= week_start && date < week_start + Days::new(7)
            })
            .count()
    }
}
