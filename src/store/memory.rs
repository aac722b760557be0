use anyhow::{bail, Result};
use parking_lot::RwLock;
use std::collections::HashMap;

use crate::model::{Collection, Id};
use crate::store::traits::{DocQuery, Document, DocumentStore, Filter};

/// In-process document store. Collections keep insertion order.
#[derive(Debug, Default)]
pub struct MemoryStore {
    collections: RwLock<HashMap<Collection, Vec<Document>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl DocumentStore for MemoryStore {
    async fn find(&self, collection: Collection, query: &DocQuery) -> Result<Vec<Document>> {
        let collections = self.collections.read();
        let mut documents: Vec<Document> = collections
            .get(&collection)
            .map(|docs| {
                docs.iter()
                    .filter(|doc| doc.matches(&query.filter))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        drop(collections);

        if let Some(field) = query.sort {
            // Stable, so ties stay in insertion order.
            documents.sort_by(|a, b| a.sort_key(field).cmp(&b.sort_key(field)));
        }

        if let Some(fields) = &query.projection {
            documents = documents
                .into_iter()
                .map(|doc| doc.project(fields))
                .collect();
        }

        Ok(documents)
    }

    async fn find_by_id(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        Ok(self
            .collections
            .read()
            .get(&collection)
            .and_then(|docs| docs.iter().find(|doc| doc.id == id).cloned()))
    }

    async fn insert(&self, collection: Collection, document: Document) -> Result<Id> {
        let mut collections = self.collections.write();
        let docs = collections.entry(collection).or_default();
        if docs.iter().any(|doc| doc.id == document.id) {
            bail!(
                "Document '{}' already exists in {}",
                document.id,
                collection.name()
            );
        }
        let id = document.id.clone();
        docs.push(document);
        Ok(id)
    }

    async fn update_by_id(&self, collection: Collection, id: &str, document: Document) -> Result<bool> {
        let mut collections = self.collections.write();
        let Some(existing) = collections
            .get_mut(&collection)
            .and_then(|docs| docs.iter_mut().find(|doc| doc.id == id))
        else {
            return Ok(false);
        };
        existing.data = document.data;
        Ok(true)
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<bool> {
        let mut collections = self.collections.write();
        let Some(docs) = collections.get_mut(&collection) else {
            return Ok(false);
        };
        let before = docs.len();
        docs.retain(|doc| doc.id != id);
        Ok(docs.len() < before)
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        Ok(self
            .collections
            .read()
            .get(&collection)
            .map(|docs| docs.iter().filter(|doc| doc.matches(filter)).count() as u64)
            .unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn doc(id: &str, body: Value) -> Document {
        let Value::Object(data) = body else {
            panic!("test body must be an object");
        };
        Document::new(id.to_string(), data)
    }

    #[tokio::test]
    async fn test_find_sorts_by_field_and_keeps_insertion_order_otherwise() {
        let store = MemoryStore::new();
        store.insert(Collection::Types, doc("1", json!({"name": "Trainer"}))).await.unwrap();
        store.insert(Collection::Types, doc("2", json!({"name": "Football boot"}))).await.unwrap();
        store.insert(Collection::Types, doc("3", json!({"name": "Slider"}))).await.unwrap();

        let natural = store.find(Collection::Types, &DocQuery::all()).await.unwrap();
        let ids: Vec<&str> = natural.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);

        let sorted = store
            .find(Collection::Types, &DocQuery::all().sorted_by("name"))
            .await
            .unwrap();
        let ids: Vec<&str> = sorted.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["2", "3", "1"]);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_ids() {
        let store = MemoryStore::new();
        store.insert(Collection::Brands, doc("b", json!({"name": "Nike"}))).await.unwrap();
        let result = store.insert(Collection::Brands, doc("b", json!({"name": "Vans"}))).await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_update_replaces_whole_body() {
        let store = MemoryStore::new();
        store
            .insert(Collection::Brands, doc("b", json!({"name": "Nike", "established": "1964-01-25"})))
            .await
            .unwrap();

        let updated = store
            .update_by_id(Collection::Brands, "b", doc("b", json!({"name": "Nike", "country": "USA"})))
            .await
            .unwrap();
        assert!(updated);

        let stored = store.find_by_id(Collection::Brands, "b").await.unwrap().unwrap();
        assert!(stored.data.get("established").is_none());
        assert_eq!(stored.data["country"], "USA");

        let missing = store
            .update_by_id(Collection::Brands, "nope", doc("nope", json!({})))
            .await
            .unwrap();
        assert!(!missing);
    }

    #[tokio::test]
    async fn test_delete_and_count() {
        let store = MemoryStore::new();
        store.insert(Collection::Shoes, doc("a", json!({"brand": "x"}))).await.unwrap();
        store.insert(Collection::Shoes, doc("b", json!({"brand": "y"}))).await.unwrap();

        assert_eq!(store.count(Collection::Shoes, &Filter::all()).await.unwrap(), 2);
        assert_eq!(store.count(Collection::Shoes, &Filter::eq("brand", "x")).await.unwrap(), 1);

        assert!(store.delete_by_id(Collection::Shoes, "a").await.unwrap());
        assert!(!store.delete_by_id(Collection::Shoes, "a").await.unwrap());
        assert_eq!(store.count(Collection::Shoes, &Filter::all()).await.unwrap(), 1);
        assert_eq!(store.count(Collection::Brands, &Filter::all()).await.unwrap(), 0);
        assert_eq!(
            store.find(Collection::Brands, &DocQuery::filtered(Filter::all())).await.unwrap(),
            Vec::new()
        );
    }
}
