use anyhow::Result;

use crate::logic::form::FormFields;
use crate::model::{Id, Record};
use crate::store::traits::DocumentStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Update,
}

/// Where delete-POST takes the identifier of the record to remove from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteTarget {
    /// A hidden field of the submitted confirmation form. Falls back to the path id when absent.
    BodyField(&'static str),
    Path,
}

/// Result of sanitizing and validating one submitted form.
///
/// `record` is only built when `errors` is empty.
pub struct Submission<E: CatalogEntity> {
    pub input: E::Input,
    pub record: Option<E>,
    pub errors: Vec<String>,
}

impl<E: CatalogEntity> Submission<E> {
    pub fn rejected(input: E::Input, errors: Vec<String>) -> Self {
        Self {
            input,
            record: None,
            errors,
        }
    }

    pub fn accepted(input: E::Input, record: E) -> Self {
        Self {
            input,
            record: Some(record),
            errors: Vec::new(),
        }
    }
}

/// Everything the generic CRUD controller needs to know about one entity kind.
#[async_trait::async_trait]
pub trait CatalogEntity: Record {
    /// Typed form values, as submitted or as derived from a stored record.
    type Input: Clone + Default + Send + Sync;
    /// One row of the list page.
    type Listing: Send + Sync;
    /// The record with its references resolved.
    type Detail: Send + Sync;
    /// Records that reference this one and block its deletion.
    type Dependent: Send + Sync;
    /// Reference-selection lists of the create/update form.
    type Choices: Default + Send + Sync;

    /// Human-readable kind, e.g. `Brand`.
    const LABEL: &'static str;
    const LIST_TITLE: &'static str;
    const DELETE_TARGET: DeleteTarget = DeleteTarget::Path;
    /// Whether delete-POST checks for dependents before deleting.
    const GUARDED_DELETE: bool = true;

    fn input_from_fields(fields: &FormFields) -> Self::Input;

    /// Form values of a stored record, with submission escaping undone.
    fn to_input(&self) -> Self::Input;

    /// Sanitizes every field and runs every rule, then builds the candidate under `id`.
    fn validate(id: Id, input: Self::Input, mode: FormMode) -> Submission<Self>;

    fn detail_record(detail: &Self::Detail) -> &Self;

    fn detail_title(_detail: &Self::Detail) -> String {
        format!("{} Detail", Self::LABEL)
    }

    async fn list<S: DocumentStore + ?Sized>(store: &S) -> Result<Vec<Self::Listing>>;

    async fn resolve<S: DocumentStore + ?Sized>(store: &S, record: Self) -> Result<Self::Detail>;

    async fn dependents<S: DocumentStore + ?Sized>(store: &S, id: &str) -> Result<Vec<Self::Dependent>>;

    async fn selection_lists<S: DocumentStore + ?Sized>(_store: &S) -> Result<Self::Choices> {
        Ok(Self::Choices::default())
    }

    /// Flags the entries of `choices` that `input` refers to.
    fn mark_selected(_choices: &mut Self::Choices, _input: &Self::Input) {}

    /// An existing record that makes `candidate` redundant on create.
    async fn find_duplicate<S: DocumentStore + ?Sized>(_store: &S, _candidate: &Self) -> Result<Option<Id>> {
        Ok(None)
    }
}
