use anyhow::{Context, Result};
use serde_json::{Map, Value};
use sqlx::{
    postgres::{PgArguments, PgPoolOptions, PgRow},
    query::Query,
    types::Json,
    PgPool, Postgres, Row,
};

use crate::model::{Collection, Id};
use crate::store::traits::{DocQuery, Document, DocumentStore, Filter};

/// Document store on a single JSONB table keyed by (collection, id).
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Create a new PostgreSQL store with the given database URL
    pub async fn new(database_url: &str, max_connections: u32) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(database_url)
            .await
            .context("Failed to create PostgreSQL connection pool")?;

        Ok(Self { pool })
    }

    /// Create the documents table if it does not exist yet
    pub async fn migrate(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS documents (
                seq BIGSERIAL NOT NULL,
                collection TEXT NOT NULL,
                id TEXT NOT NULL,
                data JSONB NOT NULL,
                PRIMARY KEY (collection, id)
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create documents table")?;

        Ok(())
    }

    /// Close all pooled connections.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

/// `AND data -> $n @> $n+1` per condition, numbering from `first_param`.
fn filter_sql(filter: &Filter, first_param: usize) -> String {
    (0..filter.conditions.len())
        .map(|i| {
            let field = first_param + 2 * i;
            format!(" AND data -> ${} @> ${}", field, field + 1)
        })
        .collect()
}

fn bind_filter<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    filter: &Filter,
) -> Query<'q, Postgres, PgArguments> {
    for (field, value) in &filter.conditions {
        query = query.bind(field.clone()).bind(Json(value.clone()));
    }
    query
}

fn row_to_document(row: &PgRow) -> Result<Document> {
    let id: Id = row.try_get("id").context("Missing document id")?;
    let Json(data): Json<Map<String, Value>> =
        row.try_get("data").context("Malformed document body")?;
    Ok(Document::new(id, data))
}

#[async_trait::async_trait]
impl DocumentStore for PostgresStore {
    async fn find(&self, collection: Collection, query: &DocQuery) -> Result<Vec<Document>> {
        let mut sql = format!(
            "SELECT id, data FROM documents WHERE collection = $1{}",
            filter_sql(&query.filter, 2)
        );
        let sort_param = 2 + 2 * query.filter.conditions.len();
        match query.sort {
            Some(_) => sql.push_str(&format!(
                " ORDER BY (data ->> ${}) COLLATE \"C\" ASC NULLS FIRST, seq",
                sort_param
            )),
            None => sql.push_str(" ORDER BY seq"),
        }

        let mut statement = bind_filter(sqlx::query(&sql).bind(collection.name()), &query.filter);
        if let Some(field) = query.sort {
            statement = statement.bind(field);
        }

        let rows = statement
            .fetch_all(&self.pool)
            .await
            .with_context(|| format!("Failed to query {}", collection.name()))?;

        rows.iter()
            .map(|row| {
                let document = row_to_document(row)?;
                Ok(match &query.projection {
                    Some(fields) => document.project(fields),
                    None => document,
                })
            })
            .collect()
    }

    async fn find_by_id(&self, collection: Collection, id: &str) -> Result<Option<Document>> {
        let row = sqlx::query("SELECT id, data FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.name())
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .with_context(|| format!("Failed to fetch {} '{}'", collection.name(), id))?;

        let Some(row) = row else {
            return Ok(None);
        };

        row_to_document(&row).map(Some)
    }

    async fn insert(&self, collection: Collection, document: Document) -> Result<Id> {
        sqlx::query("INSERT INTO documents (collection, id, data) VALUES ($1, $2, $3)")
            .bind(collection.name())
            .bind(&document.id)
            .bind(Json(&document.data))
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to insert into {}", collection.name()))?;

        Ok(document.id)
    }

    async fn update_by_id(&self, collection: Collection, id: &str, document: Document) -> Result<bool> {
        let result = sqlx::query("UPDATE documents SET data = $3 WHERE collection = $1 AND id = $2")
            .bind(collection.name())
            .bind(id)
            .bind(Json(&document.data))
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to update {} '{}'", collection.name(), id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete_by_id(&self, collection: Collection, id: &str) -> Result<bool> {
        let result = sqlx::query("DELETE FROM documents WHERE collection = $1 AND id = $2")
            .bind(collection.name())
            .bind(id)
            .execute(&self.pool)
            .await
            .with_context(|| format!("Failed to delete {} '{}'", collection.name(), id))?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self, collection: Collection, filter: &Filter) -> Result<u64> {
        let sql = format!(
            "SELECT COUNT(*) FROM documents WHERE collection = $1{}",
            filter_sql(filter, 2)
        );
        let row = bind_filter(sqlx::query(&sql).bind(collection.name()), filter)
            .fetch_one(&self.pool)
            .await
            .with_context(|| format!("Failed to count {}", collection.name()))?;

        let count: i64 = row.try_get(0)?;
        Ok(count as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_sql_numbers_parameters_in_pairs() {
        let filter = Filter::eq("brand", "b1").and("type", "t1");
        assert_eq!(
            filter_sql(&filter, 2),
            " AND data -> $2 @> $3 AND data -> $4 @> $5"
        );
        assert_eq!(filter_sql(&Filter::all(), 2), "");
    }
}
