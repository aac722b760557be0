use anyhow::{anyhow, Context, Result};
use serde_json::{Map, Value};

use crate::model::{Collection, Id, Record};

/// One stored document: the identifier plus the record body without it.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub id: Id,
    pub data: Map<String, Value>,
}

impl Document {
    pub fn new(id: Id, data: Map<String, Value>) -> Self {
        Self { id, data }
    }

    pub fn from_record<R: Record>(record: &R) -> Result<Self> {
        let value = serde_json::to_value(record)
            .with_context(|| format!("Failed to serialize {} record", R::SLUG))?;
        let Value::Object(mut data) = value else {
            return Err(anyhow!("{} record did not serialize to an object", R::SLUG));
        };
        data.remove("id");

        Ok(Self {
            id: record.id().clone(),
            data,
        })
    }

    pub fn into_record<R: Record>(self) -> Result<R> {
        let Document { id, mut data } = self;
        data.insert("id".to_string(), Value::String(id.clone()));
        serde_json::from_value(Value::Object(data))
            .with_context(|| format!("Malformed {} document '{}'", R::SLUG, id))
    }

    /// Keeps only the listed fields. The identifier is always kept.
    pub fn project(mut self, fields: &[&str]) -> Self {
        self.data.retain(|key, _| fields.contains(&key.as_str()));
        self
    }

    /// Equality on every condition; an array field matches when it contains the value.
    pub fn matches(&self, filter: &Filter) -> bool {
        filter.conditions.iter().all(|(field, expected)| {
            match self.data.get(field) {
                Some(Value::Array(items)) => {
                    items.contains(expected) || matches!(expected, Value::Array(e) if e == items)
                }
                Some(actual) => actual == expected,
                None => false,
            }
        })
    }

    pub fn sort_key(&self, field: &str) -> Option<&str> {
        self.data.get(field).and_then(Value::as_str)
    }
}

/// Conjunction of field equality conditions. Empty matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn eq(field: &str, value: impl Into<Value>) -> Self {
        Self::all().and(field, value)
    }

    pub fn and(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push((field.to_string(), value.into()));
        self
    }
}

/// Arguments of a `find`: filter, optional projection and ascending sort field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocQuery {
    pub filter: Filter,
    pub projection: Option<Vec<&'static str>>,
    pub sort: Option<&'static str>,
}

impl DocQuery {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn filtered(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn sorted_by(mut self, field: &'static str) -> Self {
        self.sort = Some(field);
        self
    }

    pub fn project(mut self, fields: &[&'static str]) -> Self {
        self.projection = Some(fields.to_vec());
        self
    }
}

/// Storage collaborator: find / find-by-id / insert / replace / delete / count per collection.
///
/// Each call is a single round trip and each single-document write is atomic.
/// Nothing spans documents.
#[async_trait::async_trait]
pub trait DocumentStore: Send + Sync {
    /// All matching documents, sorted by `query.sort` (byte order, missing first) or in insertion order.
    async fn find(&self, collection: Collection, query: &DocQuery) -> Result<Vec<Document>>;
    async fn find_by_id(&self, collection: Collection, id: &str) -> Result<Option<Document>>;
    async fn insert(&self, collection: Collection, document: Document) -> Result<Id>;
    /// Full replacement of the document body. Returns false when no document has `id`.
    async fn update_by_id(&self, collection: Collection, id: &str, document: Document) -> Result<bool>;
    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<bool>;
    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64>;
}
