//! Keyed-record storage.
//!
//! A [`RecordStore`] holds JSON documents addressed by id inside named
//! collections. Listing returns the newest insert first; rewriting an
//! existing id keeps its position.

use std::collections::HashMap;
use std::marker::PhantomData;

use async_trait::async_trait;
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::RwLock;
use tracing::warn;

use crate::error::StudioError;

/// Storage backend for studio documents.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Fetch one record.
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StudioError>;

    /// Insert or replace one record.
    async fn put(&self, collection: &str, id: &str, record: Value) -> Result<(), StudioError>;

    /// Delete one record. Returns whether it existed.
    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StudioError>;

    /// All records in a collection, newest insert first.
    async fn list(&self, collection: &str) -> Result<Vec<Value>, StudioError>;

    /// Remove every record in a collection.
    async fn clear(&self, collection: &str) -> Result<(), StudioError>;
}

/// Typed view over one collection of a [`RecordStore`].
#[derive(Debug)]
pub struct Collection<T> {
    name: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Collection<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Collection<T> {}

impl<T> Collection<T>
where
    T: Serialize + DeserializeOwned,
{
    pub const fn new(name: &'static str) -> Self {
        Self {
            name,
            _marker: PhantomData,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub async fn get(&self, store: &dyn RecordStore, id: &str) -> Result<Option<T>, StudioError> {
        match store.get(self.name, id).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    pub async fn put(&self, store: &dyn RecordStore, id: &str, record: &T) -> Result<(), StudioError> {
        let value = serde_json::to_value(record)?;
        store.put(self.name, id, value).await
    }

    pub async fn delete(&self, store: &dyn RecordStore, id: &str) -> Result<bool, StudioError> {
        store.delete(self.name, id).await
    }

    /// All records, newest first. Documents that no longer deserialize are
    /// skipped.
    pub async fn list(&self, store: &dyn RecordStore) -> Result<Vec<T>, StudioError> {
        let values = store.list(self.name).await?;
        let mut records = Vec::with_capacity(values.len());

        for value in values {
            match serde_json::from_value(value) {
                Ok(record) => records.push(record),
                Err(e) => warn!("Skipping unreadable record in '{}': {}", self.name, e),
            }
        }

        Ok(records)
    }

    pub async fn clear(&self, store: &dyn RecordStore) -> Result<(), StudioError> {
        store.clear(self.name).await
    }
}

/// In-process store, one insertion-ordered map per collection.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<String, IndexMap<String, Value>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn get(&self, collection: &str, id: &str) -> Result<Option<Value>, StudioError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .and_then(|records| records.get(id))
            .cloned())
    }

    async fn put(&self, collection: &str, id: &str, record: Value) -> Result<(), StudioError> {
        let mut collections = self.collections.write().await;
        collections
            .entry(collection.to_string())
            .or_default()
            .insert(id.to_string(), record);
        Ok(())
    }

    async fn delete(&self, collection: &str, id: &str) -> Result<bool, StudioError> {
        let mut collections = self.collections.write().await;
        Ok(collections
            .get_mut(collection)
            .and_then(|records| records.shift_remove(id))
            .is_some())
    }

    async fn list(&self, collection: &str) -> Result<Vec<Value>, StudioError> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|records| records.values().rev().cloned().collect())
            .unwrap_or_default())
    }

    async fn clear(&self, collection: &str) -> Result<(), StudioError> {
        let mut collections = self.collections.write().await;
        collections.remove(collection);
        Ok(())
    }
}
