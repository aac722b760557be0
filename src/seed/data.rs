//! Fixture catalog: 3 types, 5 brands, 7 shoes and 11 shoe instances.
//!
//! Records are inserted directly, bypassing form validation.

use anyhow::Result;
use chrono::NaiveDate;

use crate::model::{generate_id, Brand, Color, Id, Shoe, ShoeInstance, ShoeType, Size};
use crate::store::records::insert_record;
use crate::store::traits::DocumentStore;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedSummary {
    pub types: usize,
    pub brands: usize,
    pub shoes: usize,
    pub shoe_instances: usize,
}

const TYPES: [&str; 3] = ["Football boot", "Trainer", "Slider"];

const BRANDS: [(&str, &str, Option<(i32, u32, u32)>); 5] = [
    ("Nike", "USA", Some((1964, 1, 25))),
    ("Adidas", "Germany", Some((1949, 8, 18))),
    ("Mizuno", "Japan", Some((1906, 4, 1))),
    ("Dr Martens", "UK", None),
    ("Vans", "USA", Some((1966, 3, 16))),
];

/// (name, description, price, brand index, type indexes)
const SHOES: [(&str, &str, f64, usize, &[usize]); 7] = [
    ("Morelia Neo IV Pro FG", "Made in Indonesia", 120.0, 2, &[0]),
    ("Originals Superstar", "Classic", 90.0, 1, &[1]),
    ("Tiempo IX", "K Leather", 140.0, 0, &[0]),
    ("1461", "Suede", 109.0, 3, &[1]),
    ("Vans", "-", 85.0, 4, &[1]),
    ("Test Shoe 1", "Summary of test shoe 1", 99.0, 4, &[0, 1]),
    ("Test Shoe 2", "Summary of test shoe 2", 35.0, 4, &[]),
];

/// (shoe index, color, size)
const SHOE_INSTANCES: [(usize, Color, Size); 11] = [
    (0, Color::White, Size::Eight),
    (1, Color::Red, Size::Eleven),
    (2, Color::Black, Size::Nine),
    (3, Color::White, Size::Ten),
    (3, Color::White, Size::Eleven),
    (3, Color::Blue, Size::Nine),
    (4, Color::Red, Size::Ten),
    (4, Color::Black, Size::Eleven),
    (4, Color::Blue, Size::Eight),
    (0, Color::Red, Size::Nine),
    (1, Color::Red, Size::Eight),
];

pub async fn load_seed_data<S: DocumentStore + ?Sized>(store: &S) -> Result<SeedSummary> {
    let type_ids = create_types(store).await?;
    let brand_ids = create_brands(store).await?;
    let shoe_ids = create_shoes(store, &brand_ids, &type_ids).await?;
    let instance_count = create_shoe_instances(store, &shoe_ids).await?;

    Ok(SeedSummary {
        types: type_ids.len(),
        brands: brand_ids.len(),
        shoes: shoe_ids.len(),
        shoe_instances: instance_count,
    })
}

async fn create_types<S: DocumentStore + ?Sized>(store: &S) -> Result<Vec<Id>> {
    let mut ids = Vec::with_capacity(TYPES.len());
    for name in TYPES {
        let shoe_type = ShoeType {
            id: generate_id(),
            name: name.to_string(),
        };
        ids.push(insert_record(store, &shoe_type).await?);
        log::info!("Added type: {}", name);
    }
    Ok(ids)
}

async fn create_brands<S: DocumentStore + ?Sized>(store: &S) -> Result<Vec<Id>> {
    let mut ids = Vec::with_capacity(BRANDS.len());
    for (name, country, established) in BRANDS {
        let brand = Brand {
            id: generate_id(),
            name: name.to_string(),
            country: country.to_string(),
            established: established.and_then(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d)),
        };
        ids.push(insert_record(store, &brand).await?);
        log::info!("Added brand: {} {}", name, country);
    }
    Ok(ids)
}

async fn create_shoes<S: DocumentStore + ?Sized>(
    store: &S,
    brand_ids: &[Id],
    type_ids: &[Id],
) -> Result<Vec<Id>> {
    let mut ids = Vec::with_capacity(SHOES.len());
    for (name, description, price, brand, types) in SHOES {
        let shoe = Shoe {
            id: generate_id(),
            name: name.to_string(),
            brand: brand_ids[brand].clone(),
            description: description.to_string(),
            price,
            types: types.iter().map(|&i| type_ids[i].clone()).collect(),
        };
        ids.push(insert_record(store, &shoe).await?);
        log::info!("Added shoe: {}", name);
    }
    Ok(ids)
}

async fn create_shoe_instances<S: DocumentStore + ?Sized>(store: &S, shoe_ids: &[Id]) -> Result<usize> {
    for (shoe, color, size) in SHOE_INSTANCES {
        let instance = ShoeInstance {
            id: generate_id(),
            shoe: shoe_ids[shoe].clone(),
            color,
            size,
        };
        insert_record(store, &instance).await?;
        log::info!("Added shoe instance: {} {}", color, size);
    }
    Ok(SHOE_INSTANCES.len())
}
