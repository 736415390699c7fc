use crate::models;
use async_trait::async_trait;
use serde_json::from_str;
use sqlx::{FromRow, Row, SqlitePool, sqlite::SqliteRow};

use super::{PetCareRepo, sqlite_queries};

#[derive(Clone)]
pub struct SqlxSqliteRepo {
    pub db_pool: SqlitePool,
}

impl SqlxSqliteRepo {
    /// Creates the tables on first run. Cascade deletes rely on the pool
    /// having `foreign_keys=ON`.
    pub async fn init_schema(pool: &SqlitePool) -> anyhow::Result<()> {
        sqlx::raw_sql(sqlite_queries::QUERY_CREATE_SCHEMA)
            .execute(pool)
            .await?;
        Ok(())
    }
}

impl FromRow<'_, SqliteRow> for models::routine::DailyRoutine {
    fn from_row(row: &SqliteRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: row.try_get("id")?,
            pet_id: row.try_get("pet_id")?,
            title: row.try_get("title")?,
            routine_type: row.try_get("routine_type")?,
            scheduled_time: row.try_get("scheduled_time")?,
            duration_min: row.try_get("duration_min")?,
            is_completed: row.try_get("is_completed")?,
            completed_at: row.try_get("completed_at")?,
            status: row.try_get("status")?,
            notes: row.try_get("notes")?,
            is_active: row.try_get("is_active")?,
            is_recurring: row.try_get("is_recurring")?,
            recurring_days: from_str::<Vec<u8>>(row.try_get::<&str, &str>("recurring_days")?)
                .unwrap_or_default(),
            created_at: row.try_get("created_at")?,
            updated_at: row.try_get("updated_at")?,
        })
    }
}

#[async_trait]
impl PetCareRepo for SqlxSqliteRepo {
    async fn save_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_PET)
            .bind(&pet.name)
            .bind(pet.species)
            .bind(&pet.breed)
            .bind(pet.gender)
            .bind(pet.birth_date)
            .bind(pet.weight_kg)
            .bind(&pet.notes)
            .bind(pet.is_active)
            .bind(pet.created_at)
            .bind(pet.updated_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn update_pet(&self, pet: &models::pet::Pet) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_UPDATE_PET)
            .bind(pet.id)
            .bind(&pet.name)
            .bind(pet.species)
            .bind(&pet.breed)
            .bind(pet.gender)
            .bind(pet.birth_date)
            .bind(pet.weight_kg)
            .bind(&pet.notes)
            .bind(pet.is_active)
            .bind(pet.updated_at)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn delete_pet(&self, pet_id: i64) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_PET)
            .bind(pet_id)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_all_pets(&self) -> anyhow::Result<Vec<models::pet::Pet>> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_ALL_PETS)
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn get_pet_by_id(&self, pet_id: i64) -> anyhow::Result<models::pet::Pet> {
        Ok(
            sqlx::query_as::<_, models::pet::Pet>(sqlite_queries::QUERY_GET_PET_BY_ID)
                .bind(pet_id)
                .fetch_one(&self.db_pool)
                .await?,
        )
    }

    async fn insert_routine(&self, routine: &models::routine::DailyRoutine) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_ROUTINE)
            .bind(routine.pet_id)
            .bind(&routine.title)
            .bind(routine.routine_type)
            .bind(routine.scheduled_time)
            .bind(routine.duration_min)
            .bind(routine.is_completed)
            .bind(routine.completed_at)
            .bind(routine.status)
            .bind(&routine.notes)
            .bind(routine.is_active)
            .bind(routine.is_recurring)
            .bind(serde_json::to_string(&routine.recurring_days)?)
            .bind(routine.created_at)
            .bind(routine.updated_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn update_routine(&self, routine: &models::routine::DailyRoutine) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_UPDATE_ROUTINE)
            .bind(routine.id)
            .bind(routine.pet_id)
            .bind(&routine.title)
            .bind(routine.routine_type)
            .bind(routine.scheduled_time)
            .bind(routine.duration_min)
            .bind(routine.is_completed)
            .bind(routine.completed_at)
            .bind(routine.status)
            .bind(&routine.notes)
            .bind(routine.is_active)
            .bind(routine.is_recurring)
            .bind(serde_json::to_string(&routine.recurring_days)?)
            .bind(routine.updated_at)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn delete_routine(&self, routine_id: i64, pet_id: i64) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_ROUTINE)
            .bind(routine_id)
            .bind(pet_id)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_active_pet_routines(
        &self,
        pet_id: i64,
    ) -> anyhow::Result<Vec<models::routine::DailyRoutine>> {
        Ok(sqlx::query_as::<_, models::routine::DailyRoutine>(
            sqlite_queries::QUERY_GET_ACTIVE_PET_ROUTINES,
        )
        .bind(pet_id)
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn insert_appointment(
        &self,
        appointment: &models::appointment::Appointment,
    ) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_APPOINTMENT)
            .bind(appointment.pet_id)
            .bind(appointment.appointment_type)
            .bind(&appointment.title)
            .bind(appointment.date)
            .bind(appointment.duration_min)
            .bind(&appointment.location)
            .bind(&appointment.veterinarian_name)
            .bind(&appointment.notes)
            .bind(appointment.status)
            .bind(appointment.reminder_minutes_before)
            .bind(appointment.cost)
            .bind(appointment.created_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn update_appointment(
        &self,
        appointment: &models::appointment::Appointment,
    ) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_UPDATE_APPOINTMENT)
            .bind(appointment.id)
            .bind(appointment.pet_id)
            .bind(appointment.appointment_type)
            .bind(&appointment.title)
            .bind(appointment.date)
            .bind(appointment.duration_min)
            .bind(&appointment.location)
            .bind(&appointment.veterinarian_name)
            .bind(&appointment.notes)
            .bind(appointment.status)
            .bind(appointment.reminder_minutes_before)
            .bind(appointment.cost)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn delete_appointment(&self, appointment_id: i64, pet_id: i64) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_APPOINTMENT)
            .bind(appointment_id)
            .bind(pet_id)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_pet_appointments(
        &self,
        pet_id: i64,
    ) -> anyhow::Result<Vec<models::appointment::Appointment>> {
        Ok(sqlx::query_as::<_, models::appointment::Appointment>(
            sqlite_queries::QUERY_GET_PET_APPOINTMENTS,
        )
        .bind(pet_id)
        .fetch_all(&self.db_pool)
        .await?)
    }

    async fn insert_exercise(&self, exercise: &models::exercise::Exercise) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_EXERCISE)
            .bind(exercise.pet_id)
            .bind(exercise.exercise_type)
            .bind(&exercise.title)
            .bind(exercise.start_date)
            .bind(exercise.end_date)
            .bind(exercise.duration_min)
            .bind(exercise.distance_km)
            .bind(exercise.calories)
            .bind(exercise.intensity)
            .bind(&exercise.notes)
            .bind(exercise.average_speed_kmh)
            .bind(exercise.created_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn update_exercise(&self, exercise: &models::exercise::Exercise) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_UPDATE_EXERCISE)
            .bind(exercise.id)
            .bind(exercise.pet_id)
            .bind(exercise.exercise_type)
            .bind(&exercise.title)
            .bind(exercise.start_date)
            .bind(exercise.end_date)
            .bind(exercise.duration_min)
            .bind(exercise.distance_km)
            .bind(exercise.calories)
            .bind(exercise.intensity)
            .bind(&exercise.notes)
            .bind(exercise.average_speed_kmh)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn delete_exercise(&self, exercise_id: i64, pet_id: i64) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_EXERCISE)
            .bind(exercise_id)
            .bind(pet_id)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_pet_exercises(
        &self,
        pet_id: i64,
    ) -> anyhow::Result<Vec<models::exercise::Exercise>> {
        Ok(
            sqlx::query_as::<_, models::exercise::Exercise>(sqlite_queries::QUERY_GET_PET_EXERCISES)
                .bind(pet_id)
                .fetch_all(&self.db_pool)
                .await?,
        )
    }

    async fn insert_health_record(
        &self,
        record: &models::health_record::HealthRecord,
    ) -> anyhow::Result<i64> {
        Ok(sqlx::query(sqlite_queries::QUERY_INSERT_HEALTH_RECORD)
            .bind(record.pet_id)
            .bind(record.record_type)
            .bind(&record.title)
            .bind(record.record_date)
            .bind(&record.veterinarian_name)
            .bind(&record.clinic_name)
            .bind(&record.diagnosis)
            .bind(&record.treatment)
            .bind(&record.notes)
            .bind(record.cost)
            .bind(record.next_appointment)
            .bind(record.created_at)
            .bind(record.updated_at)
            .execute(&self.db_pool)
            .await?
            .last_insert_rowid())
    }

    async fn update_health_record(
        &self,
        record: &models::health_record::HealthRecord,
    ) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_UPDATE_HEALTH_RECORD)
            .bind(record.id)
            .bind(record.pet_id)
            .bind(record.record_type)
            .bind(&record.title)
            .bind(record.record_date)
            .bind(&record.veterinarian_name)
            .bind(&record.clinic_name)
            .bind(&record.diagnosis)
            .bind(&record.treatment)
            .bind(&record.notes)
            .bind(record.cost)
            .bind(record.next_appointment)
            .bind(record.updated_at)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn delete_health_record(&self, record_id: i64, pet_id: i64) -> anyhow::Result<()> {
        Ok(sqlx::query(sqlite_queries::QUERY_DELETE_HEALTH_RECORD)
            .bind(record_id)
            .bind(pet_id)
            .execute(&self.db_pool)
            .await
            .map(|_| ())?)
    }

    async fn get_pet_health_records(
        &self,
        pet_id: i64,
    ) -> anyhow::Result<Vec<models::health_record::HealthRecord>> {
        Ok(sqlx::query_as::<_, models::health_record::HealthRecord>(
            sqlite_queries::QUERY_GET_PET_HEALTH_RECORDS,
        )
        .bind(pet_id)
        .fetch_all(&self.db_pool)
        .await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, Utc};
    use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
    use std::str::FromStr;

    // single connection: every pooled connection would otherwise get its own
    // private in-memory database
    async fn test_repo() -> SqlxSqliteRepo {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(
                SqliteConnectOptions::from_str("sqlite::memory:")
                    .expect("options")
                    .pragma("foreign_keys", "ON"),
            )
            .await
            .expect("in-memory pool");
        SqlxSqliteRepo::init_schema(&pool).await.expect("schema");
        SqlxSqliteRepo { db_pool: pool }
    }

    fn test_pet(name: &str) -> models::pet::Pet {
        models::pet::Pet {
            id: 0,
            name: name.to_string(),
            species: models::pet::PetSpecies::Dog,
            breed: "Golden Retriever".to_string(),
            gender: models::pet::PetGender::Male,
            birth_date: NaiveDate::from_ymd_opt(2022, 3, 1).unwrap(),
            weight_kg: 30.0,
            notes: String::new(),
            is_active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn pet_round_trips_through_sqlite() {
        let repo = test_repo().await;

        let pet_id = repo.save_pet(&test_pet("Max")).await.expect("insert");
        let stored = repo.get_pet_by_id(pet_id).await.expect("fetch");

        assert_eq!(stored.name, "Max");
        assert_eq!(stored.species, models::pet::PetSpecies::Dog);
        assert_eq!(stored.gender, models::pet::PetGender::Male);
        assert!(stored.is_active);
    }

    #[tokio::test]
    async fn routine_day_set_survives_storage() {
        let repo = test_repo().await;
        let pet_id = repo.save_pet(&test_pet("Luna")).await.expect("insert pet");

        let routine = models::routine::DailyRoutine {
            pet_id,
            title: "Nail trim".to_string(),
            routine_type: models::routine::RoutineType::Grooming,
            scheduled_time: Utc::now(),
            duration_min: 10,
            is_active: true,
            is_recurring: true,
            recurring_days: vec![1, 4, 7],
            created_at: Utc::now(),
            updated_at: Utc::now(),
            ..Default::default()
        };
        repo.insert_routine(&routine).await.expect("insert routine");

        let stored = repo
            .get_active_pet_routines(pet_id)
            .await
            .expect("fetch routines");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].recurring_days, vec![1, 4, 7]);
        assert_eq!(stored[0].status, models::routine::RoutineStatus::Pending);
    }

    #[tokio::test]
    async fn deleting_a_pet_cascades_to_children() {
        let repo = test_repo().await;
        let pet_id = repo.save_pet(&test_pet("Rex")).await.expect("insert pet");

        let appointment = models::appointment::Appointment {
            pet_id,
            title: "Rabies shot".to_string(),
            date: Utc::now(),
            duration_min: 15,
            reminder_minutes_before: 60,
            created_at: Utc::now(),
            ..Default::default()
        };
        repo.insert_appointment(&appointment)
            .await
            .expect("insert appointment");

        repo.delete_pet(pet_id).await.expect("delete pet");

        let orphans = repo
            .get_pet_appointments(pet_id)
            .await
            .expect("fetch appointments");
        assert!(orphans.is_empty());
    }

    #[tokio::test]
    async fn inactive_routines_are_filtered_out() {
        let repo = test_repo().await;
        let pet_id = repo.save_pet(&test_pet("Mia")).await.expect("insert pet");

        let mut routine = models::routine::DailyRoutine {
            pet_id,
            title: "Old routine".to_string(),
            scheduled_time: Utc::now(),
            is_active: false,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            ..Default::default()
        };
        repo.insert_routine(&routine).await.expect("insert inactive");

        routine.title = "Breakfast".to_string();
        routine.is_active = true;
        repo.insert_routine(&routine).await.expect("insert active");

        let stored = repo
            .get_active_pet_routines(pet_id)
            .await
            .expect("fetch routines");
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].title, "Breakfast");
    }
}
