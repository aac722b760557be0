use serde::{Deserialize, Serialize};

use crate::model::{Collection, Id, Record};

/// A shoe category such as "Trainer". Shoes reference any number of them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShoeType {
    pub id: Id,
    pub name: String,
}

impl Record for ShoeType {
    const COLLECTION: Collection = Collection::Types;
    const SLUG: &'static str = "type";

    fn id(&self) -> &Id {
        &self.id
    }
}
