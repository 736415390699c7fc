pub mod sqlite;
pub mod sqlite_queries;

use crate::models;
use async_trait::async_trait;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PetCareRepo {
    async fn save_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<i64>;

    async fn update_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<()>;

    /// Hard delete; children go with it through the cascade.
    async fn delete_pet(&self, pet_id: i64) -> anyhow::Result<()>;

    async fn get_all_pets(&self) -> anyhow::Result<Vec<models::pet::Pet>>;

    async fn get_pet_by_id(&self, pet_id: i64) -> anyhow::Result<models::pet::Pet>;

    async fn insert_routine(&self, routine: &models::routine::DailyRoutine) -> anyhow::Result<i64>;

    async fn update_routine(&self, routine: &models::routine::DailyRoutine) -> anyhow::Result<()>;

    async fn delete_routine(&self, routine_id: i64, pet_id: i64) -> anyhow::Result<()>;

    async fn get_active_pet_routines(
        &self,
        pet_id: i64,
    ) -> anyhow::Result<Vec<models::routine::DailyRoutine>>;

    async fn insert_appointment(
        &self,
        appointment: &models::appointment::Appointment,
    ) -> anyhow::Result<i64>;

    async fn update_appointment(
        &self,
        appointment: &models::appointment::Appointment,
    ) -> anyhow::Result<()>;

    async fn delete_appointment(&self, appointment_id: i64, pet_id: i64) -> anyhow::Result<()>;

    async fn get_pet_appointments(
        &self,
        pet_id: i64,
    ) -> anyhow::Result<Vec<models::appointment::Appointment>>;

    async fn insert_exercise(&self, exercise: &models::exercise::Exercise) -> anyhow::Result<i64>;

    async fn update_exercise(&self, exercise: &models::exercise::Exercise) -> anyhow::Result<()>;

    async fn delete_exercise(&self, exercise_id: i64, pet_id: i64) -> anyhow::Result<()>;

    async fn get_pet_exercises(
        &self,
        pet_id: i64,
    ) -> anyhow::Result<Vec<models::exercise::Exercise>>;

    async fn insert_health_record(
        &self,
        record: &models::health_record::HealthRecord,
    ) -> anyhow::Result<i64>;

    async fn update_health_record(
        &self,
        record: &models::health_record::HealthRecord,
    ) -> anyhow::Result<()>;

    async fn delete_health_record(&self, record_id: i64, pet_id: i64) -> anyhow::Result<()>;

    async fn get_pet_health_records(
        &self,
        pet_id: i64,
    ) -> anyhow::Result<Vec<models::health_record::HealthRecord>>;
}

pub type ImplPetRepo = Box<dyn PetCareRepo + Send + Sync>;
