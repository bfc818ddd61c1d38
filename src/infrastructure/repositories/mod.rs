// src/infrastructure/repositories/mod.rs
mod error;
pub mod memory;
pub mod postgres;

pub use error::map_sqlx;
