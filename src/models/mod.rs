pub mod appointment;
pub mod chat;
pub mod exercise;
pub mod health_record;
pub mod pet;
pub mod routine;
