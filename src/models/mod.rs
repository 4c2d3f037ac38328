// src/models/mod.rs
// DOCUMENTATION: Models module organization
// PURPOSE: Re-export model components

pub mod amenity;
pub mod city;
pub mod entity;
pub mod place;
pub mod search;
pub mod state;
pub mod user;

pub use amenity::*;
pub use city::*;
pub use entity::*;
pub use place::*;
pub use search::*;
pub use state::*;
pub use user::*;
