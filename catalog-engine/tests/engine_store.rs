//! CatalogEngine over the in-memory store: cache invalidation, overrides,
//! lazy stock initialization and error mapping.

use catalog_engine::catalog::IssueKind;
use catalog_engine::{
    AppError, CatalogEngine, CatalogRepository, EngineConfig, EngineError, ErrorCode,
    MemoryCatalogStore, ResolutionRequest,
};
use rust_decimal::Decimal;
use shared::models::{
    BrandCreate, BrandUpdate, CategoryCreate, Level, PriceSource, ProductCreate, Resolution,
    SeriesCreate, ServiceCreate, ServiceOverrideUpsert, ServiceUpdate, StockPricing,
    StockTypeUpdate,
};
use std::sync::Arc;

struct Fixture {
    engine: CatalogEngine<MemoryCatalogStore>,
    store: MemoryCatalogStore,
    brand_id: String,
    series_id: String,
    product_id: String,
}

async fn make_fixture(auto_init_stock: bool) -> Fixture {
    let store = MemoryCatalogStore::new();
    let brand = store
        .create_brand(BrandCreate {
            name: "Samsung".into(),
            logo: None,
            sort_order: None,
        })
        .await
        .unwrap();
    let category = store
        .create_category(CategoryCreate {
            brand_id: brand.id.clone(),
            name: "Phones".into(),
            sort_order: None,
        })
        .await
        .unwrap();
    let series = store
        .create_series(SeriesCreate {
            category_id: category.id,
            name: "Galaxy S".into(),
            sort_order: None,
        })
        .await
        .unwrap();
    let product = store
        .create_product(ProductCreate {
            series_id: series.id.clone(),
            name: "Galaxy S24".into(),
            model_number: Some("SM-S921".into()),
            image: None,
            sort_order: None,
        })
        .await
        .unwrap();

    let mut config = EngineConfig::from_env().with_conditions(["Brand New", "Used", "Refurbished"]);
    config.auto_init_stock = auto_init_stock;

    Fixture {
        engine: CatalogEngine::new(store.clone(), config),
        store,
        brand_id: brand.id,
        series_id: series.id,
        product_id: product.id,
    }
}

async fn add_brand_service(f: &Fixture, price: i64) -> String {
    f.store
        .create_service(ServiceCreate {
            name: "Screen Replacement".into(),
            description: None,
            level: Level::Brand,
            level_id: f.brand_id.clone(),
            base_price: Decimal::from(price),
            estimated_time: 60,
        })
        .await
        .unwrap()
        .id
}

#[tokio::test]
async fn snapshot_cached_until_revision_changes() {
    let f = make_fixture(false).await;
    let first = f.engine.snapshot().await.unwrap();
    let second = f.engine.snapshot().await.unwrap();
    assert!(std::sync::Arc::ptr_eq(&first, &second));

    f.store
        .update_brand(
            &f.brand_id,
            BrandUpdate {
                is_active: Some(false),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let third = f.engine.snapshot().await.unwrap();
    assert!(!std::sync::Arc::ptr_eq(&second, &third));
    assert_eq!(third.revision(), f.store.revision().await.unwrap());

    let result = f.engine.visibility(Level::Product, &f.product_id).await.unwrap();
    assert_eq!(result.messages(), vec!["Parent brand is inactive"]);
}

#[tokio::test]
async fn override_upsert_flows_into_resolution() {
    let f = make_fixture(false).await;
    let service_id = add_brand_service(&f, 150).await;

    let services = f.engine.services_for_product(&f.product_id).await.unwrap();
    assert_eq!(services[0].source, PriceSource::Base);

    let outcome = f
        .engine
        .upsert_override(ServiceOverrideUpsert {
            service_id: service_id.clone(),
            product_id: f.product_id.clone(),
            price: Some(Decimal::from(180)),
            estimated_time: None,
            is_disabled: None,
        })
        .await
        .unwrap();
    assert!(outcome.was_created());

    let services = f.engine.services_for_product(&f.product_id).await.unwrap();
    assert_eq!(services[0].final_price, Decimal::from(180));
    assert_eq!(services[0].source, PriceSource::Override);

    // Second write for the same pair updates the row in place
    let outcome = f
        .engine
        .upsert_override(ServiceOverrideUpsert {
            service_id,
            product_id: f.product_id.clone(),
            price: Some(Decimal::from(180)),
            estimated_time: None,
            is_disabled: Some(true),
        })
        .await
        .unwrap();
    assert!(!outcome.was_created());
    assert_eq!(f.store.load_records().await.unwrap().overrides.len(), 1);
    assert!(f.engine.services_for_product(&f.product_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn stock_defaults_created_once() {
    let f = make_fixture(true).await;

    let stock = f.engine.stock_for_product(&f.product_id).await.unwrap();
    let conditions: Vec<&str> = stock.iter().map(|s| s.condition.as_str()).collect();
    assert_eq!(conditions, vec!["Brand New", "Used", "Refurbished"]);
    assert!(stock.iter().all(|s| !s.is_enabled && !s.is_public_visible));
    assert!(
        stock
            .iter()
            .all(|s| s.pricing == StockPricing::Single { price: None })
    );

    let revision = f.store.revision().await.unwrap();
    let again = f.engine.stock_for_product(&f.product_id).await.unwrap();
    assert_eq!(again, stock);
    assert_eq!(f.store.revision().await.unwrap(), revision);

    f.store
        .update_stock_type(
            &stock[1].id,
            StockTypeUpdate {
                is_enabled: Some(true),
                is_public_visible: None,
                price: Some(Some(Decimal::from(420))),
            },
        )
        .await
        .unwrap();
    let updated = f.engine.stock_for_product(&f.product_id).await.unwrap();
    assert!(updated[1].is_enabled);
    assert!(!updated[1].is_publicly_listed());
    assert_eq!(updated[1].lowest_price(), Some(Decimal::from(420)));
}

#[tokio::test]
async fn stock_not_initialized_when_disabled() {
    let f = make_fixture(false).await;
    assert!(f.engine.stock_for_product(&f.product_id).await.unwrap().is_empty());
    assert!(f.store.list_stock_types(&f.product_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn unknown_product_maps_to_product_not_found() {
    let f = make_fixture(false).await;
    let err = f.engine.services_for_product("product:missing").await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound { level: Level::Product, .. }));

    let app: AppError = err.into();
    assert_eq!(app.code, ErrorCode::ProductNotFound);
    assert_eq!(app.http_status().as_u16(), 404);

    assert!(f.engine.stock_for_product("product:missing").await.is_err());
}

#[tokio::test]
async fn deleted_parent_reported_in_integrity_report() {
    let f = make_fixture(false).await;
    add_brand_service(&f, 99).await;
    f.store.delete_brand(&f.brand_id).await.unwrap();

    let issues = f.engine.integrity_report().await.unwrap();
    assert_eq!(issues.len(), 2);
    assert!(issues.iter().all(|i| i.kind == IssueKind::DanglingReference));
    assert_eq!(issues[0].collection, "categories");
    assert_eq!(issues[0].code, ErrorCode::BrokenParentReference);
    assert_eq!(issues[1].collection, "services");
    assert_eq!(issues[1].code, ErrorCode::ServiceTargetMissing);

    let result = f.engine.visibility(Level::Series, &f.series_id).await.unwrap();
    assert!(result.has_integrity_fault());
    assert!(f.engine.services_for_product(&f.product_id).await.unwrap().is_empty());
}

#[tokio::test]
async fn tagged_resolution_serializes_operation() {
    let f = make_fixture(false).await;
    add_brand_service(&f, 150).await;

    let request: ResolutionRequest = serde_json::from_value(serde_json::json!({
        "operation": "services",
        "product_id": f.product_id,
    }))
    .unwrap();
    let resolution = f.engine.resolve(request).await.unwrap();
    assert!(matches!(resolution, Resolution::Services { ref services, .. } if services.len() == 1));

    let json = serde_json::to_value(&resolution).unwrap();
    assert_eq!(json["operation"], "services");
    assert_eq!(json["services"][0]["source"], "base");

    let visibility = f
        .engine
        .resolve(ResolutionRequest::Visibility {
            level: Level::Brand,
            id: "brand:nope".into(),
        })
        .await
        .unwrap();
    let json = serde_json::to_value(&visibility).unwrap();
    assert_eq!(json["operation"], "visibility");
    assert_eq!(json["status"], "hidden");
    assert_eq!(json["reasons"][0]["kind"], "not_found");
}

#[tokio::test]
async fn visibility_for_level_lists_every_node() {
    let f = make_fixture(false).await;
    f.store
        .create_brand(BrandCreate {
            name: "Apple".into(),
            logo: None,
            sort_order: None,
        })
        .await
        .unwrap();
    let results = f.engine.visibility_for_level(Level::Brand).await.unwrap();
    assert_eq!(results.len(), 2);
    assert!(results.windows(2).all(|w| w[0].id <= w[1].id));
    assert!(results.iter().all(|r| r.is_visible()));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_resolutions_share_one_engine() {
    let f = make_fixture(false).await;
    let service_id = add_brand_service(&f, 150).await;
    let engine = Arc::new(f.engine);
    let product_id = f.product_id.clone();

    let mut handles = Vec::new();
    for _ in 0..16 {
        let engine = Arc::clone(&engine);
        let product_id = product_id.clone();
        handles.push(tokio::spawn(async move {
            engine.services_for_product(&product_id).await.unwrap()
        }));
    }
    let mut results = Vec::new();
    for handle in handles {
        results.push(handle.await.unwrap());
    }
    assert!(results.iter().all(|r| r == &results[0]));
    assert_eq!(results[0].len(), 1);
    assert_eq!(results[0][0].final_price, Decimal::from(150));

    // One writer racing with readers: every read sees either the old or the
    // new price, and reads after the write see the new one
    let writer = {
        let store = f.store.clone();
        let service_id = service_id.clone();
        tokio::spawn(async move {
            store
                .update_service(
                    &service_id,
                    ServiceUpdate {
                        base_price: Some(Decimal::from(175)),
                        ..Default::default()
                    },
                )
                .await
                .unwrap();
        })
    };
    let mut readers = Vec::new();
    for _ in 0..16 {
        let engine = Arc::clone(&engine);
        let product_id = product_id.clone();
        readers.push(tokio::spawn(async move {
            engine.services_for_product(&product_id).await.unwrap()
        }));
    }
    writer.await.unwrap();
    for reader in readers {
        let services = reader.await.unwrap();
        let price = services[0].final_price;
        assert!(price == Decimal::from(150) || price == Decimal::from(175));
    }

    let after = engine.services_for_product(&product_id).await.unwrap();
    assert_eq!(after[0].final_price, Decimal::from(175));
    assert_eq!(
        engine.snapshot().await.unwrap().revision(),
        f.store.revision().await.unwrap()
    );
}
