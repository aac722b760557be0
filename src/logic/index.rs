use anyhow::Result;

use crate::model::{Brand, Shoe, ShoeInstance, ShoeType};
use crate::store::records::count_records;
use crate::store::traits::{DocumentStore, Filter};

/// Record counts shown on the catalog home page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CatalogCounts {
    pub shoes: u64,
    pub shoe_instances: u64,
    pub brands: u64,
    pub types: u64,
}

pub async fn catalog_counts<S: DocumentStore + ?Sized>(store: &S) -> Result<CatalogCounts> {
    let all = Filter::all();
    let (shoes, shoe_instances, brands, types) = tokio::try_join!(
        count_records::<Shoe, S>(store, &all),
        count_records::<ShoeInstance, S>(store, &all),
        count_records::<Brand, S>(store, &all),
        count_records::<ShoeType, S>(store, &all),
    )?;

    Ok(CatalogCounts {
        shoes,
        shoe_instances,
        brands,
        types,
    })
}
