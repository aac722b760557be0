use anyhow::Result;
use std::collections::HashMap;
use std::convert::Infallible;

use crate::logic::entity::{CatalogEntity, FormMode, Submission};
use crate::logic::form::{escape, unescape, FieldErrors, FormFields};
use crate::model::{Color, Id, Selectable, Shoe, ShoeInstance, ShoeInstanceDetail, Size};
use crate::store::records::{fetch_all, fetch_by_id};
use crate::store::traits::{DocQuery, DocumentStore};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoeInstanceInput {
    pub shoe: Id,
    pub color: String,
    pub size: String,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoeInstanceChoices {
    pub shoes: Vec<Selectable<Shoe>>,
}

#[async_trait::async_trait]
impl CatalogEntity for ShoeInstance {
    type Input = ShoeInstanceInput;
    type Listing = ShoeInstanceDetail;
    type Detail = ShoeInstanceDetail;
    type Dependent = Infallible;
    type Choices = ShoeInstanceChoices;

    const LABEL: &'static str = "Shoe instance";
    const LIST_TITLE: &'static str = "Shoe Instance List";
    const GUARDED_DELETE: bool = false;

    fn input_from_fields(fields: &FormFields) -> ShoeInstanceInput {
        ShoeInstanceInput {
            shoe: fields.text("shoe"),
            color: fields.text("color"),
            size: fields.text("size"),
        }
    }

    fn to_input(&self) -> ShoeInstanceInput {
        ShoeInstanceInput {
            shoe: unescape(&self.shoe),
            color: self.color.to_string(),
            size: self.size.to_string(),
        }
    }

    /// Size may be left blank on create, where it defaults to 11.
    fn validate(id: Id, input: ShoeInstanceInput, mode: FormMode) -> Submission<Self> {
        let mut errors = FieldErrors::new();

        let shoe_text = input.shoe.trim();
        errors.require(shoe_text, "Shoe must be specified");
        let shoe = escape(shoe_text);

        let color_text = escape(input.color.trim());
        let color = if errors.require(&color_text, "Color must be specified") {
            let parsed = color_text.parse::<Color>().ok();
            errors.check(parsed.is_some(), "Color must be one of Black, White, Red, Blue");
            parsed
        } else {
            None
        };

        let size_text = input.size.trim();
        let size = match (size_text.is_empty(), mode) {
            (true, FormMode::Create) => Some(Size::default()),
            (true, FormMode::Update) => {
                errors.require(size_text, "Size must be specified");
                None
            }
            (false, _) => {
                let parsed = size_text.parse::<Size>().ok();
                errors.check(parsed.is_some(), "Size must be one of 8, 9, 10, 11");
                parsed
            }
        };

        let sanitized = ShoeInstanceInput {
            shoe: shoe.clone(),
            color: color_text,
            size: escape(size_text),
        };

        match (color, size) {
            (Some(color), Some(size)) if errors.is_empty() => Submission::accepted(
                sanitized,
                ShoeInstance {
                    id,
                    shoe,
                    color,
                    size,
                },
            ),
            _ => Submission::rejected(sanitized, errors.into_messages()),
        }
    }

    fn detail_record(detail: &ShoeInstanceDetail) -> &ShoeInstance {
        &detail.instance
    }

    fn detail_title(detail: &ShoeInstanceDetail) -> String {
        match &detail.shoe {
            Some(shoe) => format!("Shoe: {}", shoe.name),
            None => "Shoe:".to_string(),
        }
    }

    /// Natural order, each joined with its shoe through one bulk shoe fetch.
    async fn list<S: DocumentStore + ?Sized>(store: &S) -> Result<Vec<ShoeInstanceDetail>> {
        let everything = DocQuery::all();
        let (instances, shoes) = tokio::try_join!(
            fetch_all::<ShoeInstance, S>(store, &everything),
            fetch_all::<Shoe, S>(store, &everything),
        )?;

        let shoes: HashMap<Id, Shoe> = shoes.into_iter().map(|s| (s.id.clone(), s)).collect();
        Ok(instances
            .into_iter()
            .map(|instance| ShoeInstanceDetail {
                shoe: shoes.get(&instance.shoe).cloned(),
                instance,
            })
            .collect())
    }

    async fn resolve<S: DocumentStore + ?Sized>(store: &S, instance: ShoeInstance) -> Result<ShoeInstanceDetail> {
        let shoe = fetch_by_id::<Shoe, S>(store, &instance.shoe).await?;
        Ok(ShoeInstanceDetail { instance, shoe })
    }

    async fn dependents<S: DocumentStore + ?Sized>(_store: &S, _id: &str) -> Result<Vec<Infallible>> {
        Ok(Vec::new())
    }

    async fn selection_lists<S: DocumentStore + ?Sized>(store: &S) -> Result<ShoeInstanceChoices> {
        let shoes: Vec<Shoe> = fetch_all(store, &DocQuery::all().sorted_by("name")).await?;
        Ok(ShoeInstanceChoices {
            shoes: shoes.into_iter().map(Selectable::new).collect(),
        })
    }

    fn mark_selected(choices: &mut ShoeInstanceChoices, input: &ShoeInstanceInput) {
        Selectable::mark_all(&mut choices.shoes, std::slice::from_ref(&input.shoe));
    }
}
