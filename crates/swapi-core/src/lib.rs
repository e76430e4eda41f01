//! SWAPI mirror core library.
//!
//! Domain models, authoring services, relay-style global ids and the
//! SWAPI importer.

pub mod character;
pub mod config;
pub mod error;
pub mod film;
pub mod global_id;
pub mod importer;
pub mod node;
pub mod planet;
pub mod validation;

pub use error::{SwapiError, SwapiResult};
