// src/db/memory.rs
// DOCUMENTATION: In-memory object store with optional JSON file persistence
// PURPOSE: Default backend (HBNB_TYPE_STORAGE=file) and the test double for services

use indexmap::IndexMap;
use serde_json::Value;
use std::io;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use super::store::EntityStore;
use crate::errors::PlacesError;
use crate::models::{Entity, EntityKind};

type ObjectKey = (EntityKind, String);

/// Insertion-ordered map of JSON documents
/// DOCUMENTATION: When opened with a path, every write rewrites the whole file
/// as `{"Kind.id": {...}}` while still holding the write lock, so the file
/// always reflects one consistent map.
pub struct MemoryStore {
    objects: RwLock<IndexMap<ObjectKey, Value>>,
    path: Option<PathBuf>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Store without persistence
    pub fn new() -> Self {
        Self {
            objects: RwLock::new(IndexMap::new()),
            path: None,
        }
    }

    /// Load `path` if it exists; later writes go back to it
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, PlacesError> {
        let path = path.into();

        let objects = match tokio::fs::read(&path).await {
            Ok(bytes) => decode_objects(&bytes)?,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("Storage file {} not found, starting empty", path.display());
                IndexMap::new()
            }
            Err(e) => {
                log::error!("Failed to read storage file {}: {}", path.display(), e);
                return Err(PlacesError::Storage(e.to_string()));
            }
        };

        log::info!("Loaded {} objects from {}", objects.len(), path.display());

        Ok(Self {
            objects: RwLock::new(objects),
            path: Some(path),
        })
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    async fn persist(&self, objects: &IndexMap<ObjectKey, Value>) -> Result<(), PlacesError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let bytes = encode_objects(objects)?;
        let tmp = path.with_extension("tmp");

        tokio::fs::write(&tmp, bytes).await.map_err(|e| {
            log::error!("Failed to write storage file {}: {}", tmp.display(), e);
            PlacesError::Storage(e.to_string())
        })?;
        tokio::fs::rename(&tmp, path).await.map_err(|e| {
            log::error!("Failed to replace storage file {}: {}", path.display(), e);
            PlacesError::Storage(e.to_string())
        })?;

        Ok(())
    }

    /// Insert under an already held write lock; the map is left untouched
    /// when the file cannot be written
    async fn put_locked(
        &self,
        objects: &mut IndexMap<ObjectKey, Value>,
        key: ObjectKey,
        value: Value,
    ) -> Result<(), PlacesError> {
        let previous = objects.insert(key.clone(), value);

        if let Err(e) = self.persist(objects).await {
            match previous {
                Some(previous) => {
                    objects.insert(key, previous);
                }
                None => {
                    objects.shift_remove(&key);
                }
            }
            return Err(e);
        }
        Ok(())
    }
}

fn decode_objects(bytes: &[u8]) -> Result<IndexMap<ObjectKey, Value>, PlacesError> {
    let raw: IndexMap<String, Value> = serde_json::from_slice(bytes).map_err(|e| {
        log::error!("Storage file is not a JSON object map: {}", e);
        PlacesError::Storage(e.to_string())
    })?;

    raw.into_iter()
        .map(|(key, value)| {
            let (kind, id) = key
                .split_once('.')
                .ok_or_else(|| PlacesError::Storage(format!("malformed object key: {}", key)))?;
            let kind = kind.parse::<EntityKind>().map_err(PlacesError::Storage)?;
            Ok(((kind, id.to_string()), value))
        })
        .collect()
}

fn encode_objects(objects: &IndexMap<ObjectKey, Value>) -> Result<Vec<u8>, PlacesError> {
    let raw: IndexMap<String, &Value> = objects
        .iter()
        .map(|((kind, id), value)| (format!("{}.{}", kind, id), value))
        .collect();

    serde_json::to_vec_pretty(&raw).map_err(|e| PlacesError::Storage(e.to_string()))
}

fn encode<E: Entity>(entity: &E) -> Result<Value, PlacesError> {
    serde_json::to_value(entity).map_err(|e| PlacesError::Storage(e.to_string()))
}

fn decode<E: Entity>(value: &Value) -> Result<E, PlacesError> {
    serde_json::from_value(value.clone()).map_err(|e| {
        log::error!("Corrupt {} document: {}", E::KIND, e);
        PlacesError::Storage(e.to_string())
    })
}

impl EntityStore for MemoryStore {
    async fn get<E: Entity>(&self, id: &str) -> Result<Option<E>, PlacesError> {
        let objects = self.objects.read().await;
        objects
            .get(&(E::KIND, id.to_string()))
            .map(decode::<E>)
            .transpose()
    }

    async fn all<E: Entity>(&self) -> Result<Vec<E>, PlacesError> {
        let objects = self.objects.read().await;
        objects
            .iter()
            .filter(|((kind, _), _)| *kind == E::KIND)
            .map(|(_, value)| decode::<E>(value))
            .collect()
    }

    async fn save<E: Entity>(&self, entity: &E) -> Result<(), PlacesError> {
        let value = encode::<E>(entity)?;

        let mut objects = self.objects.write().await;
        self.put_locked(&mut objects, (E::KIND, entity.id().to_string()), value)
            .await
    }

    async fn delete<E: Entity>(&self, id: &str) -> Result<bool, PlacesError> {
        let mut objects = self.objects.write().await;
        let Some((index, key, value)) = objects.shift_remove_full(&(E::KIND, id.to_string()))
        else {
            return Ok(false);
        };

        if let Err(e) = self.persist(&objects).await {
            objects.shift_insert(index, key, value);
            return Err(e);
        }
        Ok(true)
    }

    async fn modify<E, F>(&self, id: &str, f: F) -> Result<Option<E>, PlacesError>
    where
        E: Entity,
        F: FnOnce(&mut E) -> bool + Send,
    {
        let key = (E::KIND, id.to_string());
        let mut objects = self.objects.write().await;

        let mut entity = match objects.get(&key) {
            Some(value) => decode::<E>(value)?,
            None => return Ok(None),
        };
        if !f(&mut entity) {
            return Ok(Some(entity));
        }

        let value = encode::<E>(&entity)?;
        self.put_locked(&mut objects, key, value).await?;
        Ok(Some(entity))
    }

    async fn count(&self, kind: EntityKind) -> Result<usize, PlacesError> {
        let objects = self.objects.read().await;
        Ok(objects.keys().filter(|(k, _)| *k == kind).count())
    }
}
