// src/models/user.rs
// DOCUMENTATION: Users own places
// PURPOSE: Stored record, request DTOs and the public response shape

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use validator::Validate;

use super::entity::{new_id, now, required, Entity, EntityKind, FieldUpdate};
use crate::errors::PlacesError;

/// Stored user record
/// DOCUMENTATION: `password` holds a SHA-256 hex digest and is part of the
/// stored document only. API responses go through `to_response()`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub email: String,
    pub password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User as returned by the API (no password)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

pub fn hash_password(raw: &str) -> String {
    format!("{:x}", Sha256::digest(raw.as_bytes()))
}

impl User {
    pub fn new(email: impl Into<String>, password: &str) -> Self {
        let created_at = now();
        User {
            id: new_id(),
            email: email.into(),
            password: hash_password(password),
            first_name: None,
            last_name: None,
            created_at,
            updated_at: created_at,
        }
    }

    pub fn to_response(&self) -> UserResponse {
        UserResponse {
            id: self.id.clone(),
            email: self.email.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

impl Entity for User {
    const KIND: EntityKind = EntityKind::User;

    fn id(&self) -> &str {
        &self.id
    }

    fn touch(&mut self) {
        self.updated_at = now();
    }
}

/// Body of POST /users
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[validate(length(max = 128))]
    pub email: Option<String>,

    #[validate(length(max = 128))]
    pub password: Option<String>,

    #[validate(length(max = 128))]
    pub first_name: Option<String>,

    #[validate(length(max = 128))]
    pub last_name: Option<String>,
}

impl CreateUserRequest {
    pub fn into_user(self) -> Result<User, PlacesError> {
        self.validate()?;
        let email = required(self.email, "email")?;
        let password = required(self.password, "password")?;

        let mut user = User::new(email, &password);
        user.first_name = self.first_name;
        user.last_name = self.last_name;
        Ok(user)
    }
}

/// Body of PUT /users/{id}
/// DOCUMENTATION: `email` is the login key and cannot be changed here
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(max = 128))]
    pub password: Option<String>,

    #[validate(length(max = 128))]
    pub first_name: Option<String>,

    #[validate(length(max = 128))]
    pub last_name: Option<String>,
}

impl FieldUpdate<User> for UpdateUserRequest {
    fn apply(self, user: &mut User) {
        if let Some(password) = self.password {
            user.password = hash_password(&password);
        }
        if let Some(first_name) = self.first_name {
            user.first_name = Some(first_name);
        }
        if let Some(last_name) = self.last_name {
            user.last_name = Some(last_name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_hashed() {
        let user = User::new("bob@hbnb.io", "pwd");

        assert_ne!(user.password, "pwd");
        assert_eq!(user.password.len(), 64);
        assert_eq!(user.password, hash_password("pwd"));
        assert_ne!(user.password, hash_password("other"));
    }

    #[test]
    fn test_response_has_no_password() {
        let user = User::new("bob@hbnb.io", "pwd");
        let body = serde_json::to_value(user.to_response()).unwrap();

        assert!(body.get("password").is_none());
        assert_eq!(body["email"], "bob@hbnb.io");
    }

    #[test]
    fn test_create_requires_email_then_password() {
        let req: CreateUserRequest = serde_json::from_str(r#"{"password": "x"}"#).unwrap();
        match req.into_user() {
            Err(PlacesError::BadRequest(msg)) => assert_eq!(msg, "Missing email"),
            other => panic!("unexpected result: {:?}", other),
        }

        let req: CreateUserRequest = serde_json::from_str(r#"{"email": "a@b.c"}"#).unwrap();
        match req.into_user() {
            Err(PlacesError::BadRequest(msg)) => assert_eq!(msg, "Missing password"),
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn test_update_ignores_email() {
        let mut user = User::new("bob@hbnb.io", "pwd");
        let update: UpdateUserRequest = serde_json::from_str(
            r#"{"email": "evil@hbnb.io", "first_name": "Bob", "password": "new"}"#,
        )
        .unwrap();

        update.apply(&mut user);

        assert_eq!(user.email, "bob@hbnb.io");
        assert_eq!(user.first_name.as_deref(), Some("Bob"));
        assert_eq!(user.password, hash_password("new"));
    }
}
