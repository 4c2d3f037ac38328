// src/services/mod.rs
// DOCUMENTATION: Services module organization
// PURPOSE: Re-export service components

pub mod catalog_service;
pub mod place_search;

pub use catalog_service::*;
pub use place_search::*;
