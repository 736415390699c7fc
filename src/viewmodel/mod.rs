//! # Feature View-Models
//!
//! Host-framework independent state containers behind the UI. Each view-model
//! loads a per-pet collection from the repository, filters and sorts it into
//! a displayed list and exposes the mutation entry points. State changes are
//! announced through an explicit on-change callback instead of implicit
//! reactive bindings.
//!
//! Persistence failures inside mutations are logged and swallowed; the
//! in-memory state keeps the change and the store stays stale until the next
//! successful save.

pub mod appointment;
pub mod chat;
pub mod exercise;
pub mod profile;
pub mod routine;

/// Callback fired after every published state change.
pub type ChangeListener = Box<dyn Fn() + Send + Sync>;
