use chrono::{DateTime, NaiveDate, Utc};
use derive_more::Display;
use serde::{Deserialize, Serialize};

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PetSpecies {
    #[default]
    #[display("dog")]
    Dog,
    #[display("cat")]
    Cat,
    #[display("bird")]
    Bird,
    #[display("rabbit")]
    Rabbit,
    #[display("hamster")]
    Hamster,
    #[display("fish")]
    Fish,
    #[display("reptile")]
    Reptile,
    #[display("other")]
    Other,
}

#[derive(Debug, Display, Clone, Copy, Default, Deserialize, Serialize, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum PetGender {
    #[display("male")]
    Male,
    #[display("female")]
    Female,
    #[default]
    #[display("unknown")]
    Unknown,
}

#[derive(Debug, Default, Clone, PartialEq, sqlx::FromRow)]
pub struct Pet {
    pub id: i64,
    pub name: String,
    pub species: PetSpecies,
    pub breed: String,
    pub gender: PetGender,
    pub birth_date: NaiveDate,
    pub weight_kg: f64,
    pub notes: String,
    /// Soft deactivation flag; children are kept until the pet is hard-deleted.
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Pet {
    /// Age in whole years as of `today`.
    pub fn age_years(&self, today: NaiveDate) -> u32 {
        today.years_since(self.birth_date).unwrap_or(0)
    }
}
