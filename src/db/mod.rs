// src/db/mod.rs
// DOCUMENTATION: Database module organization
// PURPOSE: Re-export the store trait and its backends

pub mod memory;
pub mod postgres;
pub mod store;

pub use memory::MemoryStore;
pub use postgres::PgStore;
pub use store::EntityStore;
