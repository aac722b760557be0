use serde::{Deserialize, Serialize};

use crate::model::{Brand, Collection, Id, Record, ShoeType};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shoe {
    pub id: Id,
    pub name: String,
    pub brand: Id,
    pub description: String,
    pub price: f64,
    #[serde(rename = "type", default)]
    pub types: Vec<Id>,
}

impl Record for Shoe {
    const COLLECTION: Collection = Collection::Shoes;
    const SLUG: &'static str = "shoe";

    fn id(&self) -> &Id {
        &self.id
    }
}

/// Shoe with its brand and types resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoeDetail {
    pub shoe: Shoe,
    pub brand: Option<Brand>,
    pub types: Vec<ShoeType>,
}

/// Shoe with only its brand resolved, as shown on the list page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoeListing {
    pub shoe: Shoe,
    pub brand: Option<Brand>,
}

/// Projection of a shoe shown as a dependent of a brand or type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoeSummary {
    pub id: Id,
    pub name: String,
    pub description: String,
    pub price: f64,
}

impl Record for ShoeSummary {
    const COLLECTION: Collection = Collection::Shoes;
    const SLUG: &'static str = "shoe";

    fn id(&self) -> &Id {
        &self.id
    }
}

impl ShoeSummary {
    pub const FIELDS: [&'static str; 3] = ["name", "description", "price"];
}
