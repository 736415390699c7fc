use chrono::{NaiveDate, Utc};
use log::error;
use serde::Deserialize;

use super::ChangeListener;
use crate::{
    models::pet::{Pet, PetGender, PetSpecies},
    repo, utils,
};

/// User-submitted pet data. `weight` arrives as raw text and falls back to
/// zero when it does not parse.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePetRequest {
    pub name: String,
    pub species: PetSpecies,
    #[serde(default)]
    pub breed: String,
    #[serde(default)]
    pub gender: PetGender,
    pub birth_date: NaiveDate,
    #[serde(default)]
    pub weight: String,
    #[serde(default)]
    pub notes: String,
}

impl CreatePetRequest {
    fn into_pet(self) -> Pet {
        let now = Utc::now();
        Pet {
            id: 0,
            name: self.name,
            species: self.species,
            breed: self.breed,
            gender: self.gender,
            birth_date: self.birth_date,
            weight_kg: utils::parse_amount_or_zero(&self.weight),
            notes: self.notes,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }
}

/// The pet roster. Selecting a pet here drives what the other screens show.
pub struct ProfileViewModel {
    repo: repo::ImplPetRepo,
    pub pets: Vec<Pet>,
    pub selected_pet: Option<Pet>,
    pub is_loading: bool,
    on_change: Option<ChangeListener>,
}

impl ProfileViewModel {
    pub fn new(repo: repo::ImplPetRepo) -> Self {
        Self {
            repo,
            pets: Vec::new(),
            selected_pet: None,
            is_loading: false,
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

    /// Loads the roster, newest first. A previously selected pet keeps the
    /// selection when it is still present; otherwise the first pet takes over.
    pub async fn load_pets(&mut self) {
        self.is_loading = true;

        match self.repo.get_all_pets().await {
            Ok(pets) => {
                self.selected_pet = self
                    .selected_pet
                    .as_ref()
                    .and_then(|selected| pets.iter().find(|p| p.id == selected.id))
                    .or_else(|| pets.first())
                    .cloned();
                self.pets = pets;
            }
            Err(err) => error!("failed to load pets: {err:#}"),
        }

        self.is_loading = false;
        self.notify();
    }

    pub fn select_pet(&mut self, pet_id: i64) {
        if let Some(pet) = self.pets.iter().find(|p| p.id == pet_id) {
            self.selected_pet = Some(pet.clone());
            self.notify();
        }
    }

    pub fn active_pets(&self) -> Vec<&Pet> {
        self.pets.iter().filter(|p| p.is_active).collect()
    }

    pub async fn add_pet(&mut self, request: CreatePetRequest) {
        let pet = request.into_pet();
        if let Err(err) = self.repo.save_pet(&pet).await {
            error!("failed to save pet: {err:#}");
        }

        self.load_pets().await;
    }

    pub async fn update_pet(&mut self, mut updated: Pet) {
        updated.updated_at = Utc::now();
        if let Err(err) = self.repo.update_pet(&updated).await {
            error!("failed to save pet {}: {err:#}", updated.id);
        }

        self.load_pets().await;
    }

    /// Removes the pet and, through the cascade, everything recorded for it.
    pub async fn delete_pet(&mut self, pet_id: i64) {
        if let Err(err) = self.repo.delete_pet(pet_id).await {
            error!("failed to delete pet {pet_id}: {err:#}");
        }

        if self.selected_pet.as_ref().is_some_and(|p| p.id == pet_id) {
            self.selected_pet = None;
        }
        self.load_pets().await;
    }

    pub async fn toggle_pet_active(&mut self, pet_id: i64) {
        let Some(mut pet) = self.pets.iter().find(|p| p.id == pet_id).cloned() else {
            return;
        };

        pet.is_active = !pet.is_active;
        self.update_pet(pet).await;
    }
}
