use anyhow::Result;
use std::collections::HashMap;

use crate::logic::entity::{CatalogEntity, FormMode, Submission};
use crate::logic::form::{escape, unescape, FieldErrors, FormFields};
use crate::model::{
    Brand, Id, Selectable, Shoe, ShoeDetail, ShoeInstance, ShoeListing, ShoeType,
};
use crate::store::records::{fetch_all, fetch_by_id, fetch_referenced};
use crate::store::traits::{DocQuery, DocumentStore, Filter};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoeInput {
    pub name: String,
    pub brand: Id,
    pub description: String,
    pub price: String,
    pub types: Vec<Id>,
}

/// Brand and type choices of the shoe form.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShoeChoices {
    pub brands: Vec<Selectable<Brand>>,
    pub types: Vec<Selectable<ShoeType>>,
}

fn required(errors: &mut FieldErrors, raw: &str, message: &str) -> String {
    let value = raw.trim();
    errors.require(value, message);
    escape(value)
}

#[async_trait::async_trait]
impl CatalogEntity for Shoe {
    type Input = ShoeInput;
    type Listing = ShoeListing;
    type Detail = ShoeDetail;
    type Dependent = ShoeInstance;
    type Choices = ShoeChoices;

    const LABEL: &'static str = "Shoe";
    const LIST_TITLE: &'static str = "Shoe List";

    fn input_from_fields(fields: &FormFields) -> ShoeInput {
        ShoeInput {
            name: fields.text("name"),
            brand: fields.text("brand"),
            description: fields.text("description"),
            price: fields.text("price"),
            types: fields.values("type"),
        }
    }

    fn to_input(&self) -> ShoeInput {
        ShoeInput {
            name: unescape(&self.name),
            brand: unescape(&self.brand),
            description: unescape(&self.description),
            price: self.price.to_string(),
            types: self.types.iter().map(|t| unescape(t)).collect(),
        }
    }

    fn validate(id: Id, input: ShoeInput, _mode: FormMode) -> Submission<Self> {
        let mut errors = FieldErrors::new();

        let name = required(&mut errors, &input.name, "Name must not be empty.");
        let brand = required(&mut errors, &input.brand, "Brand must not be empty.");
        let description = required(&mut errors, &input.description, "Description must not be empty.");

        let price_text = input.price.trim();
        let price = if errors.require(price_text, "Price must not be empty.") {
            let parsed = price_text.parse::<f64>().ok().filter(|p| p.is_finite());
            errors.check(parsed.is_some(), "Price must be a number.");
            parsed
        } else {
            None
        };

        let types: Vec<Id> = input.types.iter().map(|t| escape(t)).collect();

        let sanitized = ShoeInput {
            name: name.clone(),
            brand: brand.clone(),
            description: description.clone(),
            price: escape(price_text),
            types: types.clone(),
        };

        match price {
            Some(price) if errors.is_empty() => Submission::accepted(
                sanitized,
                Shoe {
                    id,
                    name,
                    brand,
                    description,
                    price,
                    types,
                },
            ),
            _ => Submission::rejected(sanitized, errors.into_messages()),
        }
    }

    fn detail_record(detail: &ShoeDetail) -> &Shoe {
        &detail.shoe
    }

    fn detail_title(detail: &ShoeDetail) -> String {
        detail.shoe.name.clone()
    }

    /// Sorted by name, each joined with its brand through one bulk brand fetch.
    async fn list<S: DocumentStore + ?Sized>(store: &S) -> Result<Vec<ShoeListing>> {
        let by_name = DocQuery::all().sorted_by("name");
        let everything = DocQuery::all();
        let (shoes, brands) = tokio::try_join!(
            fetch_all::<Shoe, S>(store, &by_name),
            fetch_all::<Brand, S>(store, &everything),
        )?;

        let brands: HashMap<Id, Brand> = brands.into_iter().map(|b| (b.id.clone(), b)).collect();
        Ok(shoes
            .into_iter()
            .map(|shoe| ShoeListing {
                brand: brands.get(&shoe.brand).cloned(),
                shoe,
            })
            .collect())
    }

    async fn resolve<S: DocumentStore + ?Sized>(store: &S, shoe: Shoe) -> Result<ShoeDetail> {
        let (brand, types) = tokio::try_join!(
            fetch_by_id::<Brand, S>(store, &shoe.brand),
            fetch_referenced::<ShoeType, S>(store, &shoe.types),
        )?;
        Ok(ShoeDetail { shoe, brand, types })
    }

    async fn dependents<S: DocumentStore + ?Sized>(store: &S, id: &str) -> Result<Vec<ShoeInstance>> {
        fetch_all(store, &DocQuery::filtered(Filter::eq("shoe", id))).await
    }

    async fn selection_lists<S: DocumentStore + ?Sized>(store: &S) -> Result<ShoeChoices> {
        let by_name = DocQuery::all().sorted_by("name");
        let (brands, types) = tokio::try_join!(
            fetch_all::<Brand, S>(store, &by_name),
            fetch_all::<ShoeType, S>(store, &by_name),
        )?;
        Ok(ShoeChoices {
            brands: brands.into_iter().map(Selectable::new).collect(),
            types: types.into_iter().map(Selectable::new).collect(),
        })
    }

    fn mark_selected(choices: &mut ShoeChoices, input: &ShoeInput) {
        Selectable::mark_all(&mut choices.brands, std::slice::from_ref(&input.brand));
        Selectable::mark_all(&mut choices.types, &input.types);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(price: &str, types: &[&str]) -> ShoeInput {
        ShoeInput {
            name: " Superstar ".to_string(),
            brand: "b1".to_string(),
            description: "Classic".to_string(),
            price: price.to_string(),
            types: types.iter().map(|t| t.to_string()).collect(),
        }
    }

    #[test]
    fn test_valid_shoe_keeps_type_order() {
        let submission = Shoe::validate("s1".to_string(), input("90", &["t2", "t1"]), FormMode::Create);
        let shoe = submission.record.unwrap();
        assert_eq!(shoe.name, "Superstar");
        assert_eq!(shoe.price, 90.0);
        assert_eq!(shoe.types, vec!["t2", "t1"]);
    }

    #[test]
    fn test_every_required_field_is_reported() {
        let submission = Shoe::validate("s1".to_string(), ShoeInput::default(), FormMode::Create);
        assert!(submission.record.is_none());
        assert_eq!(
            submission.errors,
            vec![
                "Name must not be empty.",
                "Brand must not be empty.",
                "Description must not be empty.",
                "Price must not be empty.",
            ]
        );
    }

    #[test]
    fn test_non_numeric_price_is_rejected_and_preserved() {
        let submission = Shoe::validate("s1".to_string(), input("cheap", &[]), FormMode::Update);
        assert_eq!(submission.errors, vec!["Price must be a number."]);
        assert_eq!(submission.input.price, "cheap");
    }

    #[test]
    fn test_type_entries_are_escaped_but_not_required() {
        let submission = Shoe::validate("s1".to_string(), input("10", &["", "<x>"]), FormMode::Create);
        assert_eq!(submission.record.unwrap().types, vec!["", "&lt;x&gt;"]);
    }

    #[test]
    fn test_mark_selected_flags_brand_and_types() {
        let brand = |id: &str| Brand {
            id: id.to_string(),
            name: id.to_uppercase(),
            country: "USA".to_string(),
            established: None,
        };
        let shoe_type = |id: &str| ShoeType {
            id: id.to_string(),
            name: id.to_uppercase(),
        };
        let mut choices = ShoeChoices {
            brands: vec![Selectable::new(brand("b1")), Selectable::new(brand("b2"))],
            types: vec![Selectable::new(shoe_type("t1")), Selectable::new(shoe_type("t2"))],
        };

        Shoe::mark_selected(&mut choices, &input("1", &["t2"]));

        assert!(choices.brands[0].selected);
        assert!(!choices.brands[1].selected);
        assert!(!choices.types[0].selected);
        assert!(choices.types[1].selected);
    }
}
