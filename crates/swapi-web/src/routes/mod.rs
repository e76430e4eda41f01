//! Route handlers.

pub mod characters;
pub mod films;
pub mod health;
pub mod node;
pub mod planets;
