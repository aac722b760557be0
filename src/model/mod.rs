pub mod brand;
pub mod common;
pub mod shoe;
pub mod shoe_instance;
pub mod shoe_type;

pub use brand::*;
pub use common::*;
pub use shoe::*;
pub use shoe_instance::*;
pub use shoe_type::*;
