use std::collections::HashMap;

use product_catalog::api::{ApiError, CatalogService};
use product_catalog::lifecycle::{CatalogConfig, CatalogSystem};
use product_catalog::query::QueryError;
use product_catalog::validation::ValidationError;

fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn start() -> (CatalogSystem, CatalogService) {
    let system = CatalogSystem::new(&CatalogConfig::default()).expect("Failed to start system");
    let service = CatalogService::new(system.product_client.clone());
    (system, service)
}

/// Full end-to-end run through the façade against the real store actor.
#[tokio::test]
async fn test_full_catalog_lifecycle() {
    let (system, service) = start();

    // Seeded catalog
    let page = service.list(&HashMap::new()).await.unwrap();
    assert_eq!(page.total, 30);
    assert_eq!(page.products.len(), 10);
    assert_eq!(page.products[0].name, "Product 1");

    // Create
    let body = br#"{"name":"  Standing Desk ","price":"249.99","category":"Office","inStock":true}"#;
    let created = service.create(body).await.unwrap().product;
    assert_eq!(created.id.0, 31);
    assert_eq!(created.name, "Standing Desk");
    assert_eq!(created.price, 249.99);

    // Read back
    let fetched = service.get("31").await.unwrap().product;
    assert_eq!(fetched, created);

    // Patch one field; the others are untouched
    let patched = service
        .patch("31", br#"{"inStock":false}"#)
        .await
        .unwrap()
        .product;
    assert!(!patched.in_stock);
    assert_eq!(patched.name, created.name);
    assert_eq!(patched.price, created.price);
    assert_eq!(patched.category, created.category);

    // Replace every field
    let replaced = service
        .replace("31", br#"{"name":"Desk","price":199,"category":"Home","inStock":true}"#)
        .await
        .unwrap()
        .product;
    assert_eq!(replaced.id, created.id);
    assert_eq!(replaced.category, "Home");

    // Delete is terminal
    service.delete("31").await.unwrap();
    assert_eq!(service.get("31").await, Err(ApiError::NotFound));
    assert_eq!(service.delete("31").await, Err(ApiError::NotFound));

    // Ids keep growing after a delete
    let body = br#"{"name":"Chair","price":80,"category":"Office","inStock":true}"#;
    let next = service.create(body).await.unwrap().product;
    assert_eq!(next.id.0, 32);

    drop(service);
    system.shutdown().await.expect("Failed to shutdown system");
}

#[tokio::test]
async fn test_min_price_second_page_scenario() {
    let (system, service) = start();

    let page = service
        .list(&params(&[("minPrice", "50"), ("limit", "5"), ("page", "2")]))
        .await
        .unwrap();

    assert_eq!(page.page, 2);
    assert_eq!(page.limit, 5);
    assert_eq!(page.total, 17);
    let ids: Vec<u64> = page.products.iter().map(|p| p.id.0).collect();
    assert_eq!(ids, vec![19, 20, 21, 22, 23]);

    drop(service);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_deleted_seed_id_is_never_reused() {
    let (system, service) = start();

    service.delete("5").await.unwrap();
    assert_eq!(service.get("5").await, Err(ApiError::NotFound));

    let body = br#"{"name":"Fresh","price":5,"category":"Kids","inStock":false}"#;
    for expected in 31..=33 {
        let created = service.create(body).await.unwrap().product;
        assert_eq!(created.id.0, expected);
    }
    assert_eq!(service.get("5").await, Err(ApiError::NotFound));

    let page = service.list(&params(&[("limit", "50")])).await.unwrap();
    assert_eq!(page.total, 32);
    assert!(page.products.iter().all(|p| p.id.0 != 5));

    drop(service);
    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_rejections() {
    let (system, service) = start();

    assert_eq!(
        service
            .list(&params(&[("minPrice", "90"), ("maxPrice", "10")]))
            .await,
        Err(ApiError::InvalidQuery(QueryError::InvertedPriceRange))
    );
    assert_eq!(
        service.get("abc").await,
        Err(ApiError::MalformedRequest("Invalid id".to_string()))
    );
    assert_eq!(
        service.create(br#"{"name":"Lamp","price":-3}"#).await,
        Err(ApiError::ValidationFailed(ValidationError::PriceNotPositive))
    );
    assert_eq!(
        service.create(b"not json").await,
        Err(ApiError::MalformedRequest("Invalid JSON".to_string()))
    );
    assert_eq!(
        service.patch("2", b"{}").await,
        Err(ApiError::ValidationFailed(ValidationError::EmptyPatch))
    );
    // Id format is checked before existence
    assert_eq!(
        service.patch("x", b"{}").await,
        Err(ApiError::MalformedRequest("Invalid id".to_string()))
    );

    // Nothing above changed the store
    let unchanged = service.get("2").await.unwrap().product;
    assert_eq!(unchanged.name, "Product 2");
    assert_eq!(unchanged.price, 16.0);
    assert_eq!(service.list(&HashMap::new()).await.unwrap().total, 30);

    drop(service);
    system.shutdown().await.unwrap();
}

/// Concurrent creates are serialized by the store actor: every id is distinct.
#[tokio::test]
async fn test_concurrent_creates_get_distinct_ids() {
    let (system, service) = start();

    let mut handles = vec![];
    for i in 0..20 {
        let service = service.clone();
        handles.push(tokio::spawn(async move {
            let body = format!(
                r#"{{"name":"Item {}","price":{},"category":"Sports","inStock":true}}"#,
                i,
                i + 1
            );
            service.create(body.as_bytes()).await
        }));
    }

    let mut ids = vec![];
    for handle in handles {
        ids.push(handle.await.unwrap().unwrap().product.id.0);
    }
    ids.sort_unstable();
    assert_eq!(ids, (31..=50).collect::<Vec<_>>());

    drop(service);
    system.shutdown().await.unwrap();
}
