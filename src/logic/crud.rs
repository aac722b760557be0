//! The list / detail / create / update / delete controller shared by every entity.

use crate::error::CatalogError;
use crate::logic::entity::{CatalogEntity, DeleteTarget, FormMode, Submission};
use crate::logic::form::FormFields;
use crate::model::{detail_path, detail_path_for, generate_id, list_path, Id};
use crate::store::records::{delete_record, fetch_by_id, insert_record, replace_record};
use crate::store::traits::DocumentStore;

pub enum Page<E: CatalogEntity> {
    List {
        title: String,
        items: Vec<E::Listing>,
    },
    Detail {
        title: String,
        detail: E::Detail,
        dependents: Vec<E::Dependent>,
    },
    Form {
        title: String,
        input: E::Input,
        choices: E::Choices,
        errors: Vec<String>,
    },
    ConfirmDelete {
        title: String,
        detail: E::Detail,
        dependents: Vec<E::Dependent>,
    },
}

pub enum Outcome<E: CatalogEntity> {
    Render(Page<E>),
    Redirect(String),
}

impl<E: CatalogEntity> Outcome<E> {
    pub fn redirect_target(&self) -> Option<&str> {
        match self {
            Outcome::Redirect(to) => Some(to),
            Outcome::Render(_) => None,
        }
    }
}

pub async fn list<E: CatalogEntity, S: DocumentStore + ?Sized>(
    store: &S,
) -> Result<Page<E>, CatalogError> {
    let items = E::list(store).await?;
    Ok(Page::List {
        title: E::LIST_TITLE.to_string(),
        items,
    })
}

/// Record and dependents fetched concurrently; resolves the record's references.
async fn fetch_with_dependents<E: CatalogEntity, S: DocumentStore + ?Sized>(
    store: &S,
    id: &str,
) -> Result<Option<(E::Detail, Vec<E::Dependent>)>, CatalogError> {
    let (record, dependents) =
        tokio::try_join!(fetch_by_id::<E, S>(store, id), E::dependents(store, id))?;

    let Some(record) = record else {
        return Ok(None);
    };
    let detail = E::resolve(store, record).await?;
    Ok(Some((detail, dependents)))
}

pub async fn detail<E: CatalogEntity, S: DocumentStore + ?Sized>(
    store: &S,
    id: &str,
) -> Result<Page<E>, CatalogError> {
    let Some((detail, dependents)) = fetch_with_dependents::<E, S>(store, id).await? else {
        return Err(CatalogError::not_found(E::LABEL));
    };

    Ok(Page::Detail {
        title: E::detail_title(&detail),
        detail,
        dependents,
    })
}

pub async fn create_form<E: CatalogEntity, S: DocumentStore + ?Sized>(
    store: &S,
) -> Result<Page<E>, CatalogError> {
    let choices = E::selection_lists(store).await?;
    Ok(Page::Form {
        title: format!("Create {}", E::LABEL),
        input: E::Input::default(),
        choices,
        errors: Vec::new(),
    })
}

/// Re-renders a rejected submission with fresh selection lists.
async fn rejected_form<E: CatalogEntity, S: DocumentStore + ?Sized>(
    store: &S,
    title: String,
    submission: Submission<E>,
) -> Result<Outcome<E>, CatalogError> {
    let mut choices = E::selection_lists(store).await?;
    E::mark_selected(&mut choices, &submission.input);

    Ok(Outcome::Render(Page::Form {
        title,
        input: submission.input,
        choices,
        errors: submission.errors,
    }))
}

pub async fn create<E: CatalogEntity, S: DocumentStore + ?Sized>(
    store: &S,
    fields: &FormFields,
) -> Result<Outcome<E>, CatalogError> {
    let input = E::input_from_fields(fields);
    let submission = E::validate(generate_id(), input, FormMode::Create);

    let Some(record) = submission.record.clone() else {
        log::debug!("Rejected {} create: {:?}", E::LABEL, submission.errors);
        return rejected_form(store, format!("Create {}", E::LABEL), submission).await;
    };

    if let Some(existing) = E::find_duplicate(store, &record).await? {
        return Ok(Outcome::Redirect(detail_path_for::<E>(&existing)));
    }

    insert_record(store, &record).await?;
    log::info!("Created {} {}", E::LABEL, record.id());
    Ok(Outcome::Redirect(detail_path(&record)))
}

pub async fn update_form<E: CatalogEntity, S: DocumentStore + ?Sized>(
    store: &S,
    id: &str,
) -> Result<Page<E>, CatalogError> {
    let (record, mut choices) =
        tokio::try_join!(fetch_by_id::<E, S>(store, id), E::selection_lists(store))?;

    let Some(record) = record else {
        return Err(CatalogError::not_found(E::LABEL));
    };

    let input = record.to_input();
    E::mark_selected(&mut choices, &input);

    Ok(Page::Form {
        title: format!("Update {}", E::LABEL),
        input,
        choices,
        errors: Vec::new(),
    })
}

pub async fn update<E: CatalogEntity, S: DocumentStore + ?Sized>(
    store: &S,
    id: &str,
    fields: &FormFields,
) -> Result<Outcome<E>, CatalogError> {
    let input = E::input_from_fields(fields);
    let submission = E::validate(id.to_string(), input, FormMode::Update);

    let Some(record) = submission.record.clone() else {
        log::debug!("Rejected {} update: {:?}", E::LABEL, submission.errors);
        return rejected_form(store, format!("Update {}", E::LABEL), submission).await;
    };

    if !replace_record(store, &record).await? {
        return Err(CatalogError::not_found(E::LABEL));
    }
    log::info!("Updated {} {}", E::LABEL, id);
    Ok(Outcome::Redirect(detail_path(&record)))
}

/// A missing record sends the client back to the list rather than failing.
pub async fn delete_form<E: CatalogEntity, S: DocumentStore + ?Sized>(
    store: &S,
    id: &str,
) -> Result<Outcome<E>, CatalogError> {
    let Some((detail, dependents)) = fetch_with_dependents::<E, S>(store, id).await? else {
        return Ok(Outcome::Redirect(list_path::<E>()));
    };

    Ok(Outcome::Render(Page::ConfirmDelete {
        title: format!("Delete {}", E::LABEL),
        detail,
        dependents,
    }))
}

fn delete_target<E: CatalogEntity>(path_id: &str, fields: &FormFields) -> Id {
    match E::DELETE_TARGET {
        DeleteTarget::BodyField(field) => fields.value(field).unwrap_or(path_id).to_string(),
        DeleteTarget::Path => path_id.to_string(),
    }
}

pub async fn delete<E: CatalogEntity, S: DocumentStore + ?Sized>(
    store: &S,
    path_id: &str,
    fields: &FormFields,
) -> Result<Outcome<E>, CatalogError> {
    if E::GUARDED_DELETE {
        if let Some((detail, dependents)) = fetch_with_dependents::<E, S>(store, path_id).await? {
            if !dependents.is_empty() {
                log::warn!(
                    "Refused to delete {} {}: {} dependent record(s)",
                    E::LABEL,
                    path_id,
                    dependents.len()
                );
                return Ok(Outcome::Render(Page::ConfirmDelete {
                    title: format!("Delete {}", E::LABEL),
                    detail,
                    dependents,
                }));
            }
        }
    }

    let target = delete_target::<E>(path_id, fields);
    if delete_record::<E, S>(store, &target).await? {
        log::info!("Deleted {} {}", E::LABEL, target);
    }
    Ok(Outcome::Redirect(list_path::<E>()))
}
