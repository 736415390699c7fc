use chrono::{DateTime, Utc};
use log::error;
use serde::{Deserialize, Serialize};

use super::ChangeListener;
use crate::{
    consts,
    models::{
        appointment::{Appointment, AppointmentStatus, AppointmentType},
        pet::Pet,
    },
    repo, utils,
};

#[derive(Debug, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentFilter {
    All,
    #[default]
    Upcoming,
    Today,
    ThisWeek,
    Completed,
}

impl AppointmentFilter {
    /// Upcoming-like filters are shown soonest first, history newest first.
    fn sorts_ascending(&self) -> bool {
        matches!(
            self,
            AppointmentFilter::Upcoming | AppointmentFilter::Today | AppointmentFilter::ThisWeek
        )
    }
}

/// User-submitted appointment data. `cost` arrives as raw text and falls back
/// to zero when it does not parse; an empty title falls back to the type name.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateAppointmentRequest {
    pub appointment_type: AppointmentType,
    #[serde(default)]
    pub title: String,
    pub date: DateTime<Utc>,
    #[serde(default = "default_appointment_duration")]
    pub duration_min: i64,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub veterinarian_name: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default = "default_reminder_lead")]
    pub reminder_minutes_before: i64,
    #[serde(default)]
    pub cost: String,
}

fn default_appointment_duration() -> i64 {
    consts::DEFAULT_APPOINTMENT_DURATION_MIN
}

fn default_reminder_lead() -> i64 {
    consts::DEFAULT_REMINDER_LEAD_MIN
}

impl CreateAppointmentRequest {
    fn into_appointment(self, pet_id: i64, now: DateTime<Utc>) -> Appointment {
        let title = if self.title.trim().is_empty() {
            self.appointment_type.to_string()
        } else {
            self.title
        };

        Appointment {
            id: 0,
            pet_id,
            appointment_type: self.appointment_type,
            title,
            date: self.date,
            duration_min: self.duration_min,
            location: self.location,
            veterinarian_name: self.veterinarian_name,
            notes: self.notes,
            status: AppointmentStatus::Upcoming,
            reminder_minutes_before: self.reminder_minutes_before,
            cost: utils::parse_amount_or_zero(&self.cost),
            created_at: now,
        }
    }
}

/// Appointment list for the selected pet.
///
/// `load_appointments` runs the lazy missed-check over the collection before
/// anything is displayed; that is the only place the missed status appears.
pub struct AppointmentViewModel {
    repo: repo::ImplPetRepo,
    pub appointments: Vec<Appointment>,
    pub filtered_appointments: Vec<Appointment>,
    pub selected_filter: AppointmentFilter,
    pub search_text: String,
    pub is_loading: bool,
    current_pet: Option<Pet>,
    on_change: Option<ChangeListener>,
}

impl AppointmentViewModel {
    pub fn new(repo: repo::ImplPetRepo) -> Self {
        Self {
            repo,
            appointments: Vec::new(),
            filtered_appointments: Vec::new(),
            selected_filter: AppointmentFilter::default(),
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

    /// Loads the pet's appointments, applies the lazy missed-check and
    /// rebuilds the displayed list.
    pub async fn load_appointments(&mut self, pet: &Pet) {
        self.is_loading = true;
        self.current_pet = Some(pet.clone());

        match self.repo.get_pet_appointments(pet.id).await {
            Ok(mut appointments) => {
                let now = Utc::now();
                let turned_missed: Vec<Appointment> = appointments
                    .iter_mut()
                    .filter_map(|appointment| {
                        appointment
                            .update_status_if_needed(now)
                            .then(|| appointment.clone())
                    })
                    .collect();

                let saves = turned_missed
                    .iter()
                    .map(|appointment| self.repo.update_appointment(appointment));
                for (appointment, result) in
                    turned_missed.iter().zip(futures::future::join_all(saves).await)
                {
                    if let Err(err) = result {
                        error!(
                            "failed to persist missed appointment {}: {err:#}",
                            appointment.id
                        );
                    }
                }

                self.appointments = appointments;
            }
            Err(err) => error!("failed to load appointments for pet {}: {err:#}", pet.id),
        }

        self.apply_filter();
        self.is_loading = false;
        self.notify();
    }

    /// Rebuilds `filtered_appointments`; idempotent over unchanged state.
    pub fn apply_filter(&mut self) {
        let now = Utc::now();
        let needle = self.search_text.trim().to_lowercase();

        let mut filtered: Vec<Appointment> = self
            .appointments
            .iter()
            .filter(|appointment| match self.selected_filter {
                AppointmentFilter::All => true,
                AppointmentFilter::Upcoming => {
                    appointment.status == AppointmentStatus::Upcoming && !appointment.is_past(now)
                }
                AppointmentFilter::Today => {
                    appointment.is_today(now) && appointment.status == AppointmentStatus::Upcoming
                }
                AppointmentFilter::ThisWeek => {
                    appointment.is_this_week(now)
                        && appointment.status == AppointmentStatus::Upcoming
                }
                AppointmentFilter::Completed => {
                    appointment.status == AppointmentStatus::Completed
                }
            })
            .filter(|appointment| {
                needle.is_empty()
                    || appointment.title.to_lowercase().contains(&needle)
                    || appointment.location.to_lowercase().contains(&needle)
                    || appointment.veterinarian_name.to_lowercase().contains(&needle)
                    || appointment.notes.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();

        if self.selected_filter.sorts_ascending() {
            filtered.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id)));
        } else {
            filtered.sort_by(|a, b| b.date.cmp(&a.date).then(b.id.cmp(&a.id)));
        }

        self.filtered_appointments = filtered;
    }

    pub fn set_filter(&mut self, filter: AppointmentFilter) {
        self.selected_filter = filter;
        self.apply_filter();
        self.notify();
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.apply_filter();
        self.notify();
    }

    /// Upcoming appointments, soonest first.
    pub fn upcoming_appointments(&self) -> Vec<&Appointment> {
        let now = Utc::now();
        let mut upcoming: Vec<&Appointment> = self
            .appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Upcoming && !a.is_past(now))
            .collect();
        upcoming.sort_by(|a, b| a.date.cmp(&b.date));
        upcoming
    }

    pub fn next_appointment(&self) -> Option<&Appointment> {
        self.upcoming_appointments().first().copied()
    }

    /// Completed history, newest first.
    pub fn completed_appointments(&self) -> Vec<&Appointment> {
        let mut completed: Vec<&Appointment> = self
            .appointments
            .iter()
            .filter(|a| a.status == AppointmentStatus::Completed)
            .collect();
        completed.sort_by(|a, b| b.date.cmp(&a.date));
        completed
    }

    pub async fn add_appointment(&mut self, request: CreateAppointmentRequest) {
        let Some(pet) = self.current_pet.clone() else {
            return;
        };

        let appointment = request.into_appointment(pet.id, Utc::now());
        if let Err(err) = self.repo.insert_appointment(&appointment).await {
            error!("failed to save appointment: {err:#}");
        }

        self.load_appointments(&pet).await;
    }

    pub async fn update_appointment(&mut self, updated: Appointment) {
        let Some(appointment) = self.appointments.iter_mut().find(|a| a.id == updated.id) else {
            return;
        };
        *appointment = updated;
        let snapshot = appointment.clone();

        self.persist(&snapshot).await;
        self.apply_filter();
        self.notify();
    }

    pub async fn complete_appointment(&mut self, appointment_id: i64) {
        let Some(appointment) = self.appointments.iter_mut().find(|a| a.id == appointment_id)
        else {
            return;
        };
        appointment.complete();
        let snapshot = appointment.clone();

        self.persist(&snapshot).await;
        self.apply_filter();
        self.notify();
    }

    pub async fn cancel_appointment(&mut self, appointment_id: i64) {
        let Some(appointment) = self.appointments.iter_mut().find(|a| a.id == appointment_id)
        else {
            return;
        };
        appointment.cancel();
        let snapshot = appointment.clone();

        self.persist(&snapshot).await;
        self.apply_filter();
        self.notify();
    }

    pub async fn delete_appointment(&mut self, appointment_id: i64) {
        let Some(pet) = self.current_pet.clone() else {
            return;
        };

        if let Err(err) = self.repo.delete_appointment(appointment_id, pet.id).await {
            error!("failed to delete appointment {appointment_id}: {err:#}");
        }

        self.load_appointments(&pet).await;
    }

    async fn persist(&self, appointment: &Appointment) {
        if let Err(err) = self.repo.update_appointment(appointment).await {
            error!("failed to save appointment {}: {err:#}", appointment.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repo::MockPetCareRepo;
    use chrono::TimeDelta;

    fn test_pet() -> Pet {
        Pet {
            id: 1,
            name: "Karamel".to_string(),
            is_active: true,
            ..Default::default()
        }
    }

    fn appointment(id: i64, date: DateTime<Utc>, status: AppointmentStatus) -> Appointment {
        Appointment {
            id,
            pet_id: 1,
            appointment_type: AppointmentType::Veterinary,
            title: "Checkup".to_string(),
            date,
            duration_min: 30,
            status,
            reminder_minutes_before: 60,
            ..Default::default()
        }
    }

    fn vm_with_appointments(appointments: Vec<Appointment>) -> AppointmentViewModel {
        let mut mock_repo = MockPetCareRepo::new();
        mock_repo.expect_get_pet_appointments().returning(move |_| {
            let appointments = appointments.clone();
            Ok(appointments)
        });
        mock_repo
            .expect_update_appointment()
            .returning(|_| Ok(()));
        AppointmentViewModel::new(Box::new(mock_repo))
    }

    #[tokio::test]
    async fn load_marks_past_upcoming_as_missed_and_persists_it() {
        let now = Utc::now();
        let mut mock_repo = MockPetCareRepo::new();
        let loaded = vec![
            appointment(1, now - TimeDelta::days(1), AppointmentStatus::Upcoming),
            appointment(2, now + TimeDelta::days(1), AppointmentStatus::Upcoming),
        ];
        mock_repo.expect_get_pet_appointments().returning(move |_| {
            let appointments = loaded.clone();
            Ok(appointments)
        });
        mock_repo
            .expect_update_appointment()
            .withf(|a| a.id == 1 && a.status == AppointmentStatus::Missed)
            .times(1)
            .returning(|_| Ok(()));

        let mut vm = AppointmentViewModel::new(Box::new(mock_repo));
        vm.load_appointments(&test_pet()).await;

        assert_eq!(vm.appointments[0].status, AppointmentStatus::Missed);
        assert_eq!(vm.appointments[1].status, AppointmentStatus::Upcoming);
    }

    #[tokio::test]
    async fn terminal_statuses_survive_reload() {
        let now = Utc::now();
        let mut vm = vm_with_appointments(vec![
            appointment(1, now - TimeDelta::days(3), AppointmentStatus::Completed),
            appointment(2, now - TimeDelta::days(2), AppointmentStatus::Cancelled),
        ]);

        vm.load_appointments(&test_pet()).await;

        assert_eq!(vm.appointments[0].status, AppointmentStatus::Completed);
        assert_eq!(vm.appointments[1].status, AppointmentStatus::Cancelled);
    }

    #[tokio::test]
    async fn upcoming_sorts_ascending_completed_descending() {
        let now = Utc::now();
        let mut vm = vm_with_appointments(vec![
            appointment(1, now + TimeDelta::days(5), AppointmentStatus::Upcoming),
            appointment(2, now + TimeDelta::days(1), AppointmentStatus::Upcoming),
            appointment(3, now - TimeDelta::days(1), AppointmentStatus::Completed),
            appointment(4, now - TimeDelta::days(5), AppointmentStatus::Completed),
        ]);
        vm.load_appointments(&test_pet()).await;

        // default filter is upcoming: soonest first
        let ids: Vec<i64> = vm.filtered_appointments.iter().map(|a| a.id).collect();
        assert_eq!(ids, [2, 1]);

        vm.set_filter(AppointmentFilter::Completed);
        let ids: Vec<i64> = vm.filtered_appointments.iter().map(|a| a.id).collect();
        assert_eq!(ids, [3, 4]);
    }

    #[tokio::test]
    async fn search_matches_location_case_insensitively() {
        let now = Utc::now();
        let mut at_clinic = appointment(1, now + TimeDelta::days(2), AppointmentStatus::Upcoming);
        at_clinic.location = "Pati Veteriner Kliniği".to_string();
        let mut vm = vm_with_appointments(vec![
            at_clinic,
            appointment(2, now + TimeDelta::days(3), AppointmentStatus::Upcoming),
        ]);
        vm.load_appointments(&test_pet()).await;

        vm.set_search_text("vet");
        assert_eq!(vm.filtered_appointments.len(), 1);
        assert_eq!(vm.filtered_appointments[0].id, 1);
    }

    #[tokio::test]
    async fn next_appointment_is_soonest_upcoming() {
        let now = Utc::now();
        let mut vm = vm_with_appointments(vec![
            appointment(1, now + TimeDelta::days(7), AppointmentStatus::Upcoming),
            appointment(2, now + TimeDelta::days(2), AppointmentStatus::Upcoming),
            appointment(3, now - TimeDelta::days(2), AppointmentStatus::Completed),
        ]);
        vm.load_appointments(&test_pet()).await;

        assert_eq!(vm.next_appointment().map(|a| a.id), Some(2));
    }

    #[tokio::test]
    async fn malformed_cost_defaults_to_zero() {
        let now = Utc::now();
        let request = CreateAppointmentRequest {
            appointment_type: AppointmentType::Vaccination,
            title: String::new(),
            date: now + TimeDelta::days(2),
            duration_min: 15,
            location: "Clinic".to_string(),
            veterinarian_name: String::new(),
            notes: String::new(),
            reminder_minutes_before: 60,
            cost: "not-a-number".to_string(),
        };

        let appointment = request.into_appointment(1, now);
        assert_eq!(appointment.cost, 0.0);
        // empty title falls back to the type name
        assert_eq!(appointment.title, "vaccination");
    }
}
