//! Typed access to the document store through the [`Record`] trait.

use anyhow::Result;

use crate::model::{Id, Record};
use crate::store::traits::{DocQuery, Document, DocumentStore, Filter};

pub async fn fetch_all<R: Record, S: DocumentStore + ?Sized>(
    store: &S,
    query: &DocQuery,
) -> Result<Vec<R>> {
    store
        .find(R::COLLECTION, query)
        .await?
        .into_iter()
        .map(Document::into_record)
        .collect()
}

pub async fn fetch_by_id<R: Record, S: DocumentStore + ?Sized>(
    store: &S,
    id: &str,
) -> Result<Option<R>> {
    store
        .find_by_id(R::COLLECTION, id)
        .await?
        .map(Document::into_record)
        .transpose()
}

/// Resolves a list of references, skipping ids that no longer exist.
pub async fn fetch_referenced<R: Record, S: DocumentStore + ?Sized>(
    store: &S,
    ids: &[Id],
) -> Result<Vec<R>> {
    let mut records = Vec::with_capacity(ids.len());
    for id in ids {
        if let Some(record) = fetch_by_id::<R, S>(store, id).await? {
            records.push(record);
        }
    }
    Ok(records)
}

pub async fn insert_record<R: Record, S: DocumentStore + ?Sized>(store: &S, record: &R) -> Result<Id> {
    store
        .insert(R::COLLECTION, Document::from_record(record)?)
        .await
}

/// Replaces the stored record that has the same id.
pub async fn replace_record<R: Record, S: DocumentStore + ?Sized>(store: &S, record: &R) -> Result<bool> {
    store
        .update_by_id(R::COLLECTION, record.id(), Document::from_record(record)?)
        .await
}

pub async fn delete_record<R: Record, S: DocumentStore + ?Sized>(store: &S, id: &str) -> Result<bool> {
    store.delete_by_id(R::COLLECTION, id).await
}

pub async fn count_records<R: Record, S: DocumentStore + ?Sized>(store: &S, filter: &Filter) -> Result<u64> {
    store.count(R::COLLECTION, filter).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Shoe, ShoeSummary, ShoeType};
    use crate::store::MemoryStore;

    fn shoe_type(id: &str, name: &str) -> ShoeType {
        ShoeType {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn test_typed_round_trip_through_store() {
        let store = MemoryStore::new();
        insert_record(&store, &shoe_type("t1", "Trainer")).await.unwrap();
        insert_record(&store, &shoe_type("t2", "Slider")).await.unwrap();

        let fetched: Option<ShoeType> = fetch_by_id(&store, "t2").await.unwrap();
        assert_eq!(fetched, Some(shoe_type("t2", "Slider")));

        let resolved: Vec<ShoeType> =
            fetch_referenced(&store, &["t2".to_string(), "gone".to_string(), "t1".to_string()])
                .await
                .unwrap();
        let names: Vec<&str> = resolved.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Slider", "Trainer"]);

        assert!(replace_record(&store, &shoe_type("t1", "Runner")).await.unwrap());
        assert!(delete_record::<ShoeType, _>(&store, "t2").await.unwrap());
        assert_eq!(count_records::<ShoeType, _>(&store, &Filter::all()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_projection_deserializes_into_summary() {
        let store = MemoryStore::new();
        let shoe = Shoe {
            id: "s1".to_string(),
            name: "1461".to_string(),
            brand: "b1".to_string(),
            description: "Suede".to_string(),
            price: 109.0,
            types: vec!["t1".to_string()],
        };
        insert_record(&store, &shoe).await.unwrap();

        let summaries: Vec<ShoeSummary> = fetch_all(
            &store,
            &DocQuery::filtered(Filter::eq("type", "t1")).project(&ShoeSummary::FIELDS),
        )
        .await
        .unwrap();

        assert_eq!(
            summaries,
            vec![ShoeSummary {
                id: "s1".to_string(),
                name: "1461".to_string(),
                description: "Suede".to_string(),
                price: 109.0,
            }]
        );
    }
}
