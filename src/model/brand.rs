use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{Collection, Id, Record};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brand {
    pub id: Id,
    pub name: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub established: Option<NaiveDate>, // stored as YYYY-MM-DD
}

impl Record for Brand {
    const COLLECTION: Collection = Collection::Brands;
    const SLUG: &'static str = "brand";

    fn id(&self) -> &Id {
        &self.id
    }
}

/// Medium-length establishment date, e.g. `Jan 25, 1964`. Empty when unknown.
pub fn established_formatted(brand: &Brand) -> String {
    brand
        .established
        .map(|date| date.format("%b %-d, %Y").to_string())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nike(established: Option<NaiveDate>) -> Brand {
        Brand {
            id: "b1".to_string(),
            name: "Nike".to_string(),
            country: "USA".to_string(),
            established,
        }
    }

    #[test]
    fn test_established_formatted() {
        let brand = nike(NaiveDate::from_ymd_opt(1964, 1, 25));
        assert_eq!(established_formatted(&brand), "Jan 25, 1964");
        assert_eq!(established_formatted(&nike(None)), "");
    }

    #[test]
    fn test_missing_established_is_not_serialized() {
        let json = serde_json::to_value(nike(None)).unwrap();
        assert!(json.get("established").is_none());

        let json = serde_json::to_value(nike(NaiveDate::from_ymd_opt(1949, 8, 18))).unwrap();
        assert_eq!(json["established"], "1949-08-18");
    }
}
