// src/models/state.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::entity::{new_id, now, required, Entity, EntityKind, FieldUpdate};
use crate::errors::PlacesError;

/// A state; owns its cities
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct State {
    pub id: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl State {
    pub fn new(name: impl Into<String>) -> Self {
        let created_at = now();
        State {
            id: new_id(),
            name: name.into(),
            created_at,
            updated_at: created_at,
        }
    }
}

impl Entity for State {
    const KIND: EntityKind = EntityKind::State;

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = now();
    }
}

/// Body of POST /states
#[derive(Debug, Deserialize, Validate)]
pub struct CreateStateRequest {
    #[validate(length(max = 128))]
    pub name: Option<String>,
}

impl CreateStateRequest {
    pub fn into_state(self) -> Result<State, PlacesError> {
        self.validate()?;
        Ok(State::new(required(self.name, "name")?))
    }
}

/// Body of PUT /states/{id}
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStateRequest {
    #[validate(length(max = 128))]
    pub name: Option<String>,
}

impl FieldUpdate<State> for UpdateStateRequest {
    fn apply(self, state: &mut State) {
        if let Some(name) = self.name {
            state.name = name;
        }
    }
}
