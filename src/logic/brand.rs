use anyhow::Result;

use crate::logic::entity::{CatalogEntity, DeleteTarget, FormMode, Submission};
use crate::logic::form::{escape, is_alphanumeric, parse_iso_date, unescape, FieldErrors, FormFields};
use crate::model::{Brand, Id, ShoeSummary};
use crate::store::records::fetch_all;
use crate::store::traits::{DocQuery, DocumentStore, Filter};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct BrandInput {
    pub name: String,
    pub country: String,
    pub established: String,
}

const MAX_LEN: usize = 100;

/// Required, at most 100 characters, ASCII letters and digits only.
fn check_word(errors: &mut FieldErrors, raw: &str, label: &str) -> String {
    let value = raw.trim();
    if errors.require(value, &format!("{} must be specified.", label)) {
        errors.max_chars(value, MAX_LEN, &format!("{} must not exceed {} characters.", label, MAX_LEN));
        errors.check(
            is_alphanumeric(value),
            &format!("{} has non-alphanumeric characters.", label),
        );
    }
    escape(value)
}

#[async_trait::async_trait]
impl CatalogEntity for Brand {
    type Input = BrandInput;
    type Listing = Brand;
    type Detail = Brand;
    type Dependent = ShoeSummary;
    type Choices = ();

    const LABEL: &'static str = "Brand";
    const LIST_TITLE: &'static str = "Brand List";
    const DELETE_TARGET: DeleteTarget = DeleteTarget::BodyField("brandid");

    fn input_from_fields(fields: &FormFields) -> BrandInput {
        BrandInput {
            name: fields.text("name"),
            country: fields.text("country"),
            established: fields.text("established"),
        }
    }

    fn to_input(&self) -> BrandInput {
        BrandInput {
            name: unescape(&self.name),
            country: unescape(&self.country),
            established: self
                .established
                .map(|date| date.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }

    fn validate(id: Id, input: BrandInput, _mode: FormMode) -> Submission<Self> {
        let mut errors = FieldErrors::new();

        let name = check_word(&mut errors, &input.name, "Brand name");
        let country = check_word(&mut errors, &input.country, "Country");

        let established_text = input.established.trim().to_string();
        let established = if established_text.is_empty() {
            None
        } else {
            let parsed = parse_iso_date(&established_text);
            errors.check(parsed.is_some(), "Invalid date of establishment");
            parsed
        };

        let sanitized = BrandInput {
            name: name.clone(),
            country: country.clone(),
            established: established_text,
        };

        if !errors.is_empty() {
            return Submission::rejected(sanitized, errors.into_messages());
        }

        Submission::accepted(
            sanitized,
            Brand {
                id,
                name,
                country,
                established,
            },
        )
    }

    fn detail_record(detail: &Brand) -> &Brand {
        detail
    }

    async fn list<S: DocumentStore + ?Sized>(store: &S) -> Result<Vec<Brand>> {
        fetch_all(store, &DocQuery::all().sorted_by("name")).await
    }

    async fn resolve<S: DocumentStore + ?Sized>(_store: &S, record: Brand) -> Result<Brand> {
        Ok(record)
    }

    async fn dependents<S: DocumentStore + ?Sized>(store: &S, id: &str) -> Result<Vec<ShoeSummary>> {
        fetch_all(
            store,
            &DocQuery::filtered(Filter::eq("brand", id)).project(&ShoeSummary::FIELDS),
        )
        .await
    }
}
