//! The CRUD surface shared by every entity service.
//!
//! List views only need `list`, `create` and `delete`, but every entity
//! exposes the full set so callers can be written once and reused across
//! professors, students and users.

use crate::{ResponsePayload, Result};
use async_trait::async_trait;
use std::fmt::Display;

/// CRUD operations over one remote resource collection.
#[async_trait]
pub trait CrudService: Send + Sync {
    /// Identifier type.
    type Id: Copy + Display + Send + Sync;
    /// Entity returned by the API.
    type Entity: Send;
    /// Payload for creating an entity.
    type Create: Send + Sync;
    /// Payload for updating an entity.
    type Update: Send + Sync;

    /// List all entities, normalized to a plain sequence.
    async fn list(&self) -> Result<Vec<Self::Entity>>;

    /// Fetch one entity.
    async fn get(&self, id: Self::Id) -> Result<Self::Entity>;

    /// Create an entity and return it as stored.
    async fn create(&self, request: &Self::Create) -> Result<Self::Entity>;

    /// Update an entity and return it as stored.
    async fn update(&self, id: Self::Id, request: &Self::Update) -> Result<Self::Entity>;

    /// Delete an entity, returning whatever body the server sent (usually none).
    async fn delete(&self, id: Self::Id) -> Result<ResponsePayload>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    struct InMemory {
        items: Mutex<Vec<(u32, String)>>,
    }

    #[async_trait]
    impl CrudService for InMemory {
        type Id = u32;
        type Entity = String;
        type Create = String;
        type Update = String;

        async fn list(&self) -> Result<Vec<String>> {
            Ok(self
                .items
                .lock()
                .unwrap()
                .iter()
                .map(|(_, v)| v.clone())
                .collect())
        }

        async fn get(&self, id: u32) -> Result<String> {
            self.items
                .lock()
                .unwrap()
                .iter()
                .find(|(k, _)| *k == id)
                .map(|(_, v)| v.clone())
                .ok_or(crate::Error::Http {
                    status: 404,
                    message: String::new(),
                })
        }

        async fn create(&self, request: &String) -> Result<String> {
            let mut items = self.items.lock().unwrap();
            let id = u32::try_from(items.len()).unwrap() + 1;
            items.push((id, request.clone()));
            Ok(request.clone())
        }

        async fn update(&self, id: u32, request: &String) -> Result<String> {
            let mut items = self.items.lock().unwrap();
            if let Some(item) = items.iter_mut().find(|(k, _)| *k == id) {
                item.1 = request.clone();
            }
            Ok(request.clone())
        }

        async fn delete(&self, id: u32) -> Result<ResponsePayload> {
            self.items.lock().unwrap().retain(|(k, _)| *k != id);
            Ok(None)
        }
    }

    async fn create_then_list<S: CrudService>(service: &S, item: &S::Create) -> usize {
        service.create(item).await.unwrap();
        service.list().await.unwrap().len()
    }

    #[tokio::test]
    async fn generic_callers_work_over_the_trait() {
        let service = InMemory {
            items: Mutex::new(Vec::new()),
        };
        assert_eq!(create_then_list(&service, &"Ana".to_string()).await, 1);

        assert!(service.delete(1).await.unwrap().is_none());
        assert!(service.get(1).await.unwrap_err().is_not_found());
    }
}
