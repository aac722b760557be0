use anyhow::Result;

use crate::logic::entity::{CatalogEntity, DeleteTarget, FormMode, Submission};
use crate::logic::form::{escape, unescape, FieldErrors, FormFields};
use crate::model::{Id, Record, ShoeSummary, ShoeType};
use crate::store::records::fetch_all;
use crate::store::traits::{DocQuery, DocumentStore, Filter};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoeTypeInput {
    pub name: String,
}

#[async_trait::async_trait]
impl CatalogEntity for ShoeType {
    type Input = ShoeTypeInput;
    type Listing = ShoeType;
    type Detail = ShoeType;
    type Dependent = ShoeSummary;
    type Choices = ();

    const LABEL: &'static str = "Type";
    const LIST_TITLE: &'static str = "Type List";
    const DELETE_TARGET: DeleteTarget = DeleteTarget::BodyField("typeid");

    fn input_from_fields(fields: &FormFields) -> ShoeTypeInput {
        ShoeTypeInput {
            name: fields.text("name"),
        }
    }

    fn to_input(&self) -> ShoeTypeInput {
        ShoeTypeInput {
            name: unescape(&self.name),
        }
    }

    fn validate(id: Id, input: ShoeTypeInput, _mode: FormMode) -> Submission<Self> {
        let mut errors = FieldErrors::new();

        let trimmed = input.name.trim();
        let length = trimmed.chars().count();
        errors.check(length >= 3, "Type name must contain at least 3 characters");
        errors.check(length <= 100, "Type name must not exceed 100 characters");
        let name = escape(trimmed);

        let sanitized = ShoeTypeInput { name: name.clone() };
        if !errors.is_empty() {
            return Submission::rejected(sanitized, errors.into_messages());
        }
        Submission::accepted(sanitized, ShoeType { id, name })
    }

    fn detail_record(detail: &ShoeType) -> &ShoeType {
        detail
    }

    async fn list<S: DocumentStore + ?Sized>(store: &S) -> Result<Vec<ShoeType>> {
        fetch_all(store, &DocQuery::all().sorted_by("name")).await
    }

    async fn resolve<S: DocumentStore + ?Sized>(_store: &S, record: ShoeType) -> Result<ShoeType> {
        Ok(record)
    }

    async fn dependents<S: DocumentStore + ?Sized>(store: &S, id: &str) -> Result<Vec<ShoeSummary>> {
        fetch_all(
            store,
            &DocQuery::filtered(Filter::eq("type", id)).project(&ShoeSummary::FIELDS),
        )
        .await
    }

    /// Types are unique by name. Check-then-insert is not atomic.
    async fn find_duplicate<S: DocumentStore + ?Sized>(store: &S, candidate: &ShoeType) -> Result<Option<Id>> {
        let existing: Vec<ShoeType> = fetch_all(
            store,
            &DocQuery::filtered(Filter::eq("name", candidate.name.as_str())),
        )
        .await?;
        Ok(existing.into_iter().next().map(|found| found.id().clone()))
    }
}
