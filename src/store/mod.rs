pub mod memory;
pub mod postgres;
pub mod records;
pub mod traits;

pub use memory::*;
pub use postgres::*;
pub use records::*;
pub use traits::*;
