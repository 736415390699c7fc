use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};

use super::ChangeListener;
use crate::{
    consts,
    models::{
        pet::Pet,
        routine::{DailyRoutine, RoutineStatus, RoutineType},
    },
    repo,
};

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RoutineFilter {
    #[default]
    All,
    Pending,
    Completed,
    Late,
}

/// User-submitted data for a new routine; numeric and optional fields fall
/// back to defaults instead of rejecting the form.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateRoutineRequest {
    pub title: String,
    pub routine_type: RoutineType,
    pub scheduled_time: DateTime<Utc>,
    #[serde(default = "default_routine_duration")]
    pub duration_min: i64,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub is_recurring: bool,
    #[serde(default)]
    pub recurring_days: Vec<u8>,
}

fn default_routine_duration() -> i64 {
    consts::DEFAULT_ROUTINE_DURATION_MIN
}

impl CreateRoutineRequest {
    fn into_routine(self, pet_id: i64, now: DateTime<Utc>) -> DailyRoutine {
        DailyRoutine {
            id: 0,
            pet_id,
            title: self.title,
            routine_type: self.routine_type,
            scheduled_time: self.scheduled_time,
            duration_min: self.duration_min,
            is_completed: false,
            completed_at: None,
            status: RoutineStatus::Pending,
            notes: self.notes,
            is_active: true,
            is_recurring: self.is_recurring,
            recurring_days: self.recurring_days,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Daily-routine list for the selected pet.
pub struct RoutineViewModel {
    repo: repo::ImplPetRepo,
    pub routines: Vec<DailyRoutine>,
    pub filtered_routines: Vec<DailyRoutine>,
    pub selected_filter: RoutineFilter,
    pub search_text: String,
    pub is_loading: bool,
    current_pet: Option<Pet>,
    on_change: Option<ChangeListener>,
}

impl RoutineViewModel {
    pub fn new(repo: repo::ImplPetRepo) -> Self {
        Self {
            repo,
            routines: Vec::new(),
            filtered_routines: Vec::new(),
            selected_filter: RoutineFilter::default(),
            search_text: String::new(),
            is_loading: false,
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

    /// Loads the pet's active routines and rebuilds the displayed list.
    pub async fn load_routines(&mut self, pet: &Pet) {
        self.is_loading = true;
        self.current_pet = Some(pet.clone());

        match self.repo.get_active_pet_routines(pet.id).await {
            Ok(routines) => self.routines = routines,
            Err(err) => error!("failed to load routines for pet {}: {err:#}", pet.id),
        }

        self.apply_filter();
        self.is_loading = false;
        self.notify();
    }

    /// Rebuilds `filtered_routines` from the raw collection. Pure over the
    /// current state: calling it twice yields the same ordered list.
    pub fn apply_filter(&mut self) {
        let now = Utc::now();
        let needle = self.search_text.trim().to_lowercase();

        let mut filtered: Vec<DailyRoutine> = self
            .routines
            .iter()
            .filter(|routine| match self.selected_filter {
                RoutineFilter::All => true,
                RoutineFilter::Pending => routine.current_status(now) == RoutineStatus::Pending,
                RoutineFilter::Completed => routine.is_completed,
                RoutineFilter::Late => routine.is_late(now),
            })
            .filter(|routine| {
                needle.is_empty()
                    || routine.title.to_lowercase().contains(&needle)
                    || routine.notes.to_lowercase().contains(&needle)
                    || routine.routine_type.to_string().contains(&needle)
            })
            .cloned()
            .collect();

        // soonest first; id breaks ties so the order is stable across loads
        filtered.sort_by(|a, b| {
            a.scheduled_time
                .cmp(&b.scheduled_time)
                .then(a.id.cmp(&b.id))
        });

        self.filtered_routines = filtered;
    }

    pub fn set_filter(&mut self, filter: RoutineFilter) {
        self.selected_filter = filter;
        self.apply_filter();
        self.notify();
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.apply_filter();
        self.notify();
    }

    pub async fn add_routine(&mut self, request: CreateRoutineRequest) {
        let Some(pet) = self.current_pet.clone() else {
            return;
        };

        let mut routine = request.into_routine(pet.id, Utc::now());
        match self.repo.insert_routine(&routine).await {
            Ok(id) => {
                routine.id = id;
                self.routines.push(routine);
            }
            Err(err) => error!("failed to save routine: {err:#}"),
        }

        self.apply_filter();
        self.notify();
    }

    pub async fn complete_routine(&mut self, routine_id: i64) {
        let now = Utc::now();
        let Some(routine) = self.routines.iter_mut().find(|r| r.id == routine_id) else {
            return;
        };
        routine.complete(now);
        let snapshot = routine.clone();

        self.persist(&snapshot).await;
        self.apply_filter();
        self.notify();
    }

    pub async fn skip_routine(&mut self, routine_id: i64) {
        let now = Utc::now();
        let Some(routine) = self.routines.iter_mut().find(|r| r.id == routine_id) else {
            return;
        };
        routine.skip(now);
        let snapshot = routine.clone();

        self.persist(&snapshot).await;
        self.apply_filter();
        self.notify();
    }

    pub async fn reset_routine(&mut self, routine_id: i64) {
        let now = Utc::now();
        let Some(routine) = self.routines.iter_mut().find(|r| r.id == routine_id) else {
            return;
        };
        routine.reset(now);
        let snapshot = routine.clone();

        self.persist(&snapshot).await;
        self.apply_filter();
        self.notify();
    }

    pub async fn delete_routine(&mut self, routine_id: i64) {
        let Some(pet) = self.current_pet.clone() else {
            return;
        };

        if let Err(err) = self.repo.delete_routine(routine_id, pet.id).await {
            error!("failed to delete routine {routine_id}: {err:#}");
        }

        self.load_routines(&pet).await;
    }

    pub fn completed_count(&self) -> usize {
        self.routines.iter().filter(|r| r.is_completed).count()
    }

    pub fn pending_count(&self) -> usize {
        let now = Utc::now();
        self.routines
            .iter()
            .filter(|r| r.current_status(now) == RoutineStatus::Pending)
            .count()
    }

    pub fn late_count(&self) -> usize {
        let now = Utc::now();
        self.routines.iter().filter(|r| r.is_late(now)).count()
    }

    /// Share of loaded routines already completed, in `0.0..=1.0`.
    pub fn today_progress(&self) -> f64 {
        if self.routines.is_empty() {
            return 0.0;
        }
        self.completed_count() as f64 / self.routines.len() as f64
    }

    async fn persist(&self, routine: &DailyRoutine) {
        if let Err(err) = self.repo.update_routine(routine).await {
            error!("failed to save routine {}: {err:#}", routine.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MockPetCareRepo;
    use chrono::TimeDelta;
    use std::sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    };

    fn test_pet() -> Pet {
        Pet {
            id: 1,
            name: "Max".to_string(),
            is_active: true,
            ..Default::default()
        }
    }

    fn routine(id: i64, title: &str, scheduled_time: DateTime<Utc>) -> DailyRoutine {
        DailyRoutine {
            id,
            pet_id: 1,
            title: title.to_string(),
            routine_type: RoutineType::Feeding,
            scheduled_time,
            duration_min: 15,
            is_active: true,
            ..Default::default()
        }
    }

    fn vm_with_routines(routines: Vec<DailyRoutine>) -> RoutineViewModel {
        let mut mock_repo = MockPetCareRepo::new();
        mock_repo
            .expect_get_active_pet_routines()
            .returning(move |_| {
                let routines = routines.clone();
                Ok(routines)
            });
        mock_repo
            .expect_update_routine()
            .returning(|_| Ok(()));
        RoutineViewModel::new(Box::new(mock_repo))
    }

    #[tokio::test]
    async fn load_sorts_soonest_first() {
        let now = Utc::now();
        let mut vm = vm_with_routines(vec![
            routine(1, "Dinner", now + TimeDelta::hours(10)),
            routine(2, "Breakfast", now + TimeDelta::hours(1)),
            routine(3, "Lunch", now + TimeDelta::hours(5)),
        ]);

        vm.load_routines(&test_pet()).await;

        let titles: Vec<&str> = vm
            .filtered_routines
            .iter()
            .map(|r| r.title.as_str())
            .collect();
        assert_eq!(titles, ["Breakfast", "Lunch", "Dinner"]);
    }

    #[tokio::test]
    async fn apply_filter_is_deterministic() {
        let now = Utc::now();
        let mut vm = vm_with_routines(vec![
            routine(1, "Walk", now + TimeDelta::hours(2)),
            routine(2, "Meds", now + TimeDelta::hours(2)),
        ]);
        vm.load_routines(&test_pet()).await;

        let first = vm.filtered_routines.clone();
        vm.apply_filter();
        assert_eq!(vm.filtered_routines, first);
    }

    #[tokio::test]
    async fn late_filter_matches_only_overdue_routines() {
        let now = Utc::now();
        let mut vm = vm_with_routines(vec![
            routine(1, "Overdue walk", now - TimeDelta::hours(2)),
            routine(2, "Later walk", now + TimeDelta::hours(2)),
        ]);
        vm.load_routines(&test_pet()).await;

        vm.set_filter(RoutineFilter::Late);
        assert_eq!(vm.filtered_routines.len(), 1);
        assert_eq!(vm.filtered_routines[0].title, "Overdue walk");
        assert_eq!(vm.late_count(), 1);
        assert_eq!(vm.pending_count(), 1);
    }

    #[tokio::test]
    async fn search_matches_notes_case_insensitively() {
        let now = Utc::now();
        let mut with_notes = routine(1, "Evening meal", now + TimeDelta::hours(1));
        with_notes.notes = "Dry food with Vitamins".to_string();
        let mut vm = vm_with_routines(vec![
            with_notes,
            routine(2, "Morning walk", now + TimeDelta::hours(2)),
        ]);
        vm.load_routines(&test_pet()).await;

        vm.set_search_text("vitamin");
        assert_eq!(vm.filtered_routines.len(), 1);
        assert_eq!(vm.filtered_routines[0].title, "Evening meal");
    }

    #[tokio::test]
    async fn complete_persists_and_moves_to_completed_filter() {
        let now = Utc::now();
        let mut mock_repo = MockPetCareRepo::new();
        let loaded = vec![routine(7, "Walk", now + TimeDelta::hours(1))];
        mock_repo
            .expect_get_active_pet_routines()
            .returning(move |_| {
                let routines = loaded.clone();
                Ok(routines)
            });
        mock_repo
            .expect_update_routine()
            .withf(|r| r.id == 7 && r.is_completed && r.completed_at.is_some())
            .times(1)
            .returning(|_| Ok(()));

        let mut vm = RoutineViewModel::new(Box::new(mock_repo));
        vm.load_routines(&test_pet()).await;

        vm.complete_routine(7).await;

        assert_eq!(vm.completed_count(), 1);
        vm.set_filter(RoutineFilter::Completed);
        assert_eq!(vm.filtered_routines.len(), 1);
    }

    #[tokio::test]
    async fn save_failure_is_swallowed_and_state_kept() {
        let now = Utc::now();
        let mut mock_repo = MockPetCareRepo::new();
        let loaded = vec![routine(3, "Meds", now + TimeDelta::hours(1))];
        mock_repo
            .expect_get_active_pet_routines()
            .returning(move |_| {
                let routines = loaded.clone();
                Ok(routines)
            });
        mock_repo
            .expect_update_routine()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("disk full")));

        let mut vm = RoutineViewModel::new(Box::new(mock_repo));
        vm.load_routines(&test_pet()).await;

        vm.complete_routine(3).await;

        // in-memory state keeps the change, the store stays stale
        assert!(vm.routines[0].is_completed);
    }

    #[tokio::test]
    async fn change_listener_fires_on_mutations() {
        let now = Utc::now();
        let mut vm = vm_with_routines(vec![routine(1, "Walk", now + TimeDelta::hours(1))]);

        let fired = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&fired);
        vm.set_on_change(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        vm.load_routines(&test_pet()).await;
        vm.set_filter(RoutineFilter::Completed);
        vm.complete_routine(1).await;

        assert!(fired.load(Ordering::SeqCst) >= 3);
    }
}
