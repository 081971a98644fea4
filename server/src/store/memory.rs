use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{parse_id, ExerciseStore, StoreError};
use crate::model::{Exercise, ExerciseFields};

/// In-process exercise collection. Records keep insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    docs: RwLock<Vec<Exercise>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ExerciseStore for MemoryStore {
    async fn insert(&self, fields: ExerciseFields) -> Result<Exercise, StoreError> {
        let exercise = Exercise::new(Uuid::new_v4(), fields, 0);
        self.docs.write().await.push(exercise.clone());
        Ok(exercise)
    }

    async fn find_all(&self) -> Result<Vec<Exercise>, StoreError> {
        Ok(self.docs.read().await.clone())
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Exercise>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|e| e.id == id).cloned())
    }

    async fn replace_fields(
        &self,
        id: &str,
        fields: ExerciseFields,
    ) -> Result<Option<Exercise>, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(None);
        };
        let mut docs = self.docs.write().await;
        Ok(docs.iter_mut().find(|e| e.id == id).map(|exercise| {
            exercise.replace_fields(fields);
            exercise.clone()
        }))
    }

    async fn delete_by_id(&self, id: &str) -> Result<u64, StoreError> {
        let Some(id) = parse_id(id) else {
            return Ok(0);
        };
        let mut docs = self.docs.write().await;
        let before = docs.len();
        docs.retain(|e| e.id != id);
        Ok((before - docs.len()) as u64)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.docs.write().await.clear();
        Ok(())
    }
}
