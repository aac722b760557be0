use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use shoe_catalog::{build_app, seed, MemoryStore};

fn app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let app = build_app(store.clone());
    (store, app)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn post(app: &Router, uri: &str, form: &str) -> (StatusCode, Option<String>, String) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(form.to_string()))
        .unwrap();
    send(app, request).await
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Option<String>, String) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let location = response
        .headers()
        .get(header::LOCATION)
        .map(|value| value.to_str().unwrap().to_string());
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, location, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn test_root_redirects_to_catalog() {
    let (_, app) = app();
    let (status, location, _) = get(&app, "/").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/catalog"));
}

#[tokio::test]
async fn test_index_shows_record_counts() {
    let (store, app) = app();
    seed::load_seed_data(&*store).await.unwrap();

    let (status, _, body) = get(&app, "/catalog").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Inventory Application Home"));
    assert!(body.contains("<li><strong>Shoes:</strong> 7</li>"));
    assert!(body.contains("<li><strong>Shoe instances:</strong> 11</li>"));
    assert!(body.contains("<li><strong>Brands:</strong> 5</li>"));
    assert!(body.contains("<li><strong>Types:</strong> 3</li>"));
}

#[tokio::test]
async fn test_create_type_and_view_it() {
    let (_, app) = app();

    let (status, location, _) = post(&app, "/catalog/type/create", "name=Sandal").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let location = location.unwrap();
    assert!(location.starts_with("/catalog/type/"));

    let (status, _, body) = get(&app, &location).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("<strong>Name:</strong> Sandal"));
    assert!(body.contains("This type has no shoes."));

    let (_, _, body) = get(&app, "/catalog/types").await;
    assert!(body.contains(&format!("<a href=\"{}\">Sandal</a>", location)));
}

#[tokio::test]
async fn test_invalid_type_rerenders_form_with_errors() {
    let (_, app) = app();

    let (status, location, body) = post(&app, "/catalog/type/create", "name=ab").await;
    assert_eq!(status, StatusCode::OK);
    assert!(location.is_none());
    assert!(body.contains("Type name must contain at least 3 characters"));
    assert!(body.contains("value=\"ab\""));

    let (_, _, body) = get(&app, "/catalog/types").await;
    assert!(body.contains("There are no types."));
}

#[tokio::test]
async fn test_duplicate_type_redirects_to_existing_record() {
    let (_, app) = app();
    let (_, first, _) = post(&app, "/catalog/type/create", "name=Trainer").await;
    let (status, second, _) = post(&app, "/catalog/type/create", "name=Trainer").await;

    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(first, second);
}

#[tokio::test]
async fn test_unknown_records_are_not_found() {
    let (_, app) = app();

    for (uri, message) in [
        ("/catalog/shoe/nope", "Shoe not found"),
        ("/catalog/brand/nope", "Brand not found"),
        ("/catalog/type/nope", "Type not found"),
        ("/catalog/shoeinstance/nope", "Shoe instance not found"),
        ("/catalog/brand/nope/update", "Brand not found"),
    ] {
        let (status, _, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{}", uri);
        assert!(body.contains(message), "{}", uri);
    }
}

#[tokio::test]
async fn test_delete_page_of_missing_record_redirects_to_list() {
    let (_, app) = app();
    let (status, location, _) = get(&app, "/catalog/brand/nope/delete").await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/catalog/brands"));
}

#[tokio::test]
async fn test_brand_with_shoes_is_protected_from_delete() {
    let (_, app) = app();

    let (_, brand, _) = post(&app, "/catalog/brand/create", "name=Vans&country=USA").await;
    let brand = brand.unwrap();
    let brand_id = brand.trim_start_matches("/catalog/brand/").to_string();

    let shoe_form = format!(
        "name=Authentic&brand={}&description=Canvas&price=55",
        brand_id
    );
    let (status, _, _) = post(&app, "/catalog/shoe/create", &shoe_form).await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (status, _, body) = get(&app, &format!("{}/delete", brand)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Delete the following shoes before attempting to delete this brand."));

    let (status, _, body) = post(
        &app,
        &format!("{}/delete", brand),
        &format!("brandid={}", brand_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Authentic"));

    let (status, _, _) = get(&app, &brand).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_brand_without_shoes_is_deleted() {
    let (_, app) = app();

    let (_, brand, _) = post(&app, "/catalog/brand/create", "name=Mizuno&country=Japan").await;
    let brand = brand.unwrap();
    let brand_id = brand.trim_start_matches("/catalog/brand/").to_string();

    let (_, _, body) = get(&app, &format!("{}/delete", brand)).await;
    assert!(body.contains(&format!("name=\"brandid\" value=\"{}\"", brand_id)));

    let (status, location, _) = post(
        &app,
        &format!("{}/delete", brand),
        &format!("brandid={}", brand_id),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/catalog/brands"));

    let (status, _, _) = get(&app, &brand).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_shoe_with_several_types() {
    let (_, app) = app();

    let (_, brand, _) = post(&app, "/catalog/brand/create", "name=Adidas&country=Germany").await;
    let brand_id = brand.unwrap().trim_start_matches("/catalog/brand/").to_string();
    let (_, trainer, _) = post(&app, "/catalog/type/create", "name=Trainer").await;
    let trainer_id = trainer.unwrap().trim_start_matches("/catalog/type/").to_string();
    let (_, casual, _) = post(&app, "/catalog/type/create", "name=Casual").await;
    let casual_id = casual.unwrap().trim_start_matches("/catalog/type/").to_string();

    let form = format!(
        "name=Samba&brand={}&description=Indoor+classic&price=90&type={}&type={}",
        brand_id, trainer_id, casual_id
    );
    let (status, shoe, _) = post(&app, "/catalog/shoe/create", &form).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    let shoe = shoe.unwrap();

    let (_, _, body) = get(&app, &shoe).await;
    assert!(body.contains(&format!("<a href=\"/catalog/type/{}\">Trainer</a>", trainer_id)));
    assert!(body.contains(&format!("<a href=\"/catalog/type/{}\">Casual</a>", casual_id)));
    assert!(body.contains("Indoor classic"));

    let (_, _, body) = get(&app, &format!("/catalog/type/{}", trainer_id)).await;
    assert!(body.contains("Samba"));

    let (status, _, body) = get(&app, &format!("{}/update", shoe)).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("checked"));
}

#[tokio::test]
async fn test_shoe_update_changes_price() {
    let (_, app) = app();

    let (_, brand, _) = post(&app, "/catalog/brand/create", "name=Puma&country=Germany").await;
    let brand_id = brand.unwrap().trim_start_matches("/catalog/brand/").to_string();
    let form = format!("name=Suede&brand={}&description=Classic&price=70", brand_id);
    let (_, shoe, _) = post(&app, "/catalog/shoe/create", &form).await;
    let shoe = shoe.unwrap();

    let form = format!("name=Suede&brand={}&description=Classic&price=65", brand_id);
    let (status, location, _) = post(&app, &format!("{}/update", shoe), &form).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some(shoe.as_str()));

    let (_, _, body) = get(&app, &shoe).await;
    assert!(body.contains("<strong>Price:</strong> $65"));
}

#[tokio::test]
async fn test_instance_create_defaults_size_and_rejects_bad_color() {
    let (_, app) = app();

    let (_, brand, _) = post(&app, "/catalog/brand/create", "name=Nike&country=USA").await;
    let brand_id = brand.unwrap().trim_start_matches("/catalog/brand/").to_string();
    let form = format!("name=Cortez&brand={}&description=Runner&price=80", brand_id);
    let (_, shoe, _) = post(&app, "/catalog/shoe/create", &form).await;
    let shoe_id = shoe.unwrap().trim_start_matches("/catalog/shoe/").to_string();

    let (status, _, body) = post(
        &app,
        "/catalog/shoeinstance/create",
        &format!("shoe={}&color=Green", shoe_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("Color must be one of Black, White, Red, Blue"));

    let (status, instance, _) = post(
        &app,
        "/catalog/shoeinstance/create",
        &format!("shoe={}&color=White", shoe_id),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);

    let (_, _, body) = get(&app, &instance.unwrap()).await;
    assert!(body.contains("Shoe: Cortez"));
    assert!(body.contains("<strong>Color:</strong> White"));
    assert!(body.contains("<strong>Size:</strong> 11"));
}

#[tokio::test]
async fn test_health_check() {
    let (_, app) = app();
    let (status, _, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.contains("healthy"));
}
