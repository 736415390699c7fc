//! # Pet Care
//!
//! Companion backend for a pet-care app: pet profiles, daily routines,
//! exercise tracking, vet appointments, health records and an AI assistant.
//!
//! The crate is layered the same way throughout:
//! - [`models`]: plain domain types and their lifecycle rules
//! - [`repo`]: SQLite persistence behind the [`repo::PetCareRepo`] trait
//! - [`services`]: outbound integrations (the Gemini assistant)
//! - [`viewmodel`]: per-screen state containers a UI host can drive

pub mod config;
pub mod consts;
pub mod logger;
pub mod models;
pub mod repo;
pub mod services;
pub mod utils;
pub mod viewmodel;

/// Wired-up application roots: one repository handle and one assistant.
pub struct App {
    pub repo: repo::ImplPetRepo,
    pub assistant: services::ImplAiAssistant,
}

impl App {
    /// Sets up logging, opens the configured database, runs the schema and
    /// returns the wired application. Fails fast; nothing here is recoverable
    /// at runtime.
    pub async fn bootstrap() -> anyhow::Result<Self> {
        logger::setup_simple_logger()?;

        let db_pool = utils::setup_sqlite_db_pool().await?;
        repo::sqlite::SqlxSqliteRepo::init_schema(&db_pool).await?;

        Ok(Self {
            repo: Box::new(repo::sqlite::SqlxSqliteRepo { db_pool }),
            assistant: Box::new(services::gemini::GeminiClient::new()),
        })
    }
}
