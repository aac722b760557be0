use serde::{de::DeserializeOwned, Deserialize, Serialize};
use uuid::Uuid;

pub type Id = String;

pub fn generate_id() -> Id {
    Uuid::new_v4().to_string()
}

/// The four record collections of the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Collection {
    Brands,
    Types,
    Shoes,
    ShoeInstances,
}

impl Collection {
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Brands => "brands",
            Collection::Types => "types",
            Collection::Shoes => "shoes",
            Collection::ShoeInstances => "shoeinstances",
        }
    }
}

/// A typed record stored as one document in a collection.
///
/// Records serialize with their identifier under `id`; the store keeps the
/// identifier beside the document body.
pub trait Record: Serialize + DeserializeOwned + Clone + Send + Sync + 'static {
    const COLLECTION: Collection;
    /// Path segment used in catalog URLs, e.g. `brand`.
    const SLUG: &'static str;

    fn id(&self) -> &Id;
}

/// Canonical detail location of a record.
pub fn detail_path<R: Record>(record: &R) -> String {
    detail_path_for::<R>(record.id())
}

pub fn detail_path_for<R: Record>(id: &str) -> String {
    format!("/catalog/{}/{}", R::SLUG, id)
}

/// Location of the list page for a record kind.
pub fn list_path<R: Record>() -> String {
    format!("/catalog/{}s", R::SLUG)
}

/// A reference-selection entry for a form `<select>` or checkbox group.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selectable<T> {
    pub item: T,
    pub selected: bool,
}

impl<T> Selectable<T> {
    pub fn new(item: T) -> Self {
        Self {
            item,
            selected: false,
        }
    }
}

impl<T: Record> Selectable<T> {
    /// Marks every entry whose id is in `chosen`.
    pub fn mark_all(entries: &mut [Selectable<T>], chosen: &[Id]) {
        for entry in entries.iter_mut() {
            entry.selected = chosen.iter().any(|id| id == entry.item.id());
        }
    }
}
