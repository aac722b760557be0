pub mod brand;
pub mod crud;
pub mod entity;
pub mod form;
pub mod index;
pub mod shoe;
pub mod shoe_instance;
pub mod shoe_type;

pub use brand::BrandInput;
pub use crud::{Outcome, Page};
pub use entity::*;
pub use form::FormFields;
pub use index::{catalog_counts, CatalogCounts};
pub use shoe::{ShoeChoices, ShoeInput};
pub use shoe_instance::{ShoeInstanceChoices, ShoeInstanceInput};
pub use shoe_type::ShoeTypeInput;
