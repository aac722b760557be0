use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::model::{Collection, Id, Record, Shoe};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    #[default]
    Black,
    White,
    Red,
    Blue,
}

impl Color {
    pub const ALL: [Color; 4] = [Color::Black, Color::White, Color::Red, Color::Blue];

    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::White => "White",
            Color::Red => "Red",
            Color::Blue => "Blue",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Color {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Color::ALL
            .into_iter()
            .find(|color| color.as_str() == s)
            .ok_or_else(|| format!("unknown color '{}'", s))
    }
}

/// Shoe size; persisted as a plain number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Size {
    Eight,
    Nine,
    Ten,
    #[default]
    Eleven,
}

impl Size {
    pub const ALL: [Size; 4] = [Size::Eight, Size::Nine, Size::Ten, Size::Eleven];

    pub fn value(&self) -> u8 {
        match self {
            Size::Eight => 8,
            Size::Nine => 9,
            Size::Ten => 10,
            Size::Eleven => 11,
        }
    }
}

impl From<Size> for u8 {
    fn from(size: Size) -> Self {
        size.value()
    }
}

impl TryFrom<u8> for Size {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Size::ALL
            .into_iter()
            .find(|size| size.value() == value)
            .ok_or_else(|| format!("unsupported size {}", value))
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

impl FromStr for Size {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: u8 = s.parse().map_err(|_| format!("unsupported size '{}'", s))?;
        Size::try_from(value)
    }
}

/// A physical unit of a shoe in one color and size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoeInstance {
    pub id: Id,
    pub shoe: Id,
    #[serde(default)]
    pub color: Color,
    #[serde(default)]
    pub size: Size,
}

impl Record for ShoeInstance {
    const COLLECTION: Collection = Collection::ShoeInstances;
    const SLUG: &'static str = "shoeinstance";

    fn id(&self) -> &Id {
        &self.id
    }
}

/// Instance with its shoe resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ShoeInstanceDetail {
    pub instance: ShoeInstance,
    pub shoe: Option<Shoe>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_catalog_rules() {
        assert_eq!(Color::default(), Color::Black);
        assert_eq!(Size::default(), Size::Eleven);
    }

    #[test]
    fn test_size_serializes_as_number() {
        let instance = ShoeInstance {
            id: "i1".to_string(),
            shoe: "s1".to_string(),
            color: Color::Red,
            size: Size::Nine,
        };
        let json = serde_json::to_value(&instance).unwrap();
        assert_eq!(json["size"], 9);
        assert_eq!(json["color"], "Red");

        let back: ShoeInstance = serde_json::from_value(json).unwrap();
        assert_eq!(back, instance);
    }

    #[test]
    fn test_out_of_range_size_is_rejected() {
        assert!("12".parse::<Size>().is_err());
        assert!("ten".parse::<Size>().is_err());
        assert!(serde_json::from_value::<Size>(serde_json::json!(7)).is_err());
        assert_eq!("10".parse::<Size>().unwrap(), Size::Ten);
    }

    #[test]
    fn test_color_parsing_is_exact() {
        assert_eq!("Blue".parse::<Color>().unwrap(), Color::Blue);
        assert!("blue".parse::<Color>().is_err());
        assert!("Green".parse::<Color>().is_err());
    }
}
