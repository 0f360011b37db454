//! In-memory catalog store
//!
//! Backs the admin console in tests and demos. All tables live behind one
//! `RwLock`; every mutation bumps the revision so snapshot caches know to
//! rebuild. Deletes never cascade: removing a parent leaves its children
//! pointing at a missing id, which resolution reports as a broken
//! reference.

use super::{CatalogRepository, RepoError, RepoResult};
use crate::catalog::{OverrideStore, UpsertOutcome, default_stock_types};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_NOTE_LEN, validate_id, validate_optional_price, validate_optional_text,
    validate_price, validate_required_text,
};
use parking_lot::RwLock;
use shared::models::{
    Brand, BrandCreate, BrandUpdate, CatalogRecords, Category, CategoryCreate, CategoryUpdate,
    Level, Product, ProductCreate, ProductStockType, ProductUpdate, Series, SeriesCreate,
    SeriesUpdate, Service, ServiceCreate, ServiceOverrideUpsert, ServiceProductOverride,
    ServiceUpdate, StockTypeUpdate, StockVariant, StockVariantCreate, StockVariantUpdate,
};
use shared::types::now_millis;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

#[derive(Debug, Default)]
struct Tables {
    brands: Vec<Brand>,
    categories: Vec<Category>,
    series: Vec<Series>,
    products: Vec<Product>,
    services: Vec<Service>,
    overrides: OverrideStore,
    stock_types: Vec<ProductStockType>,
}

impl Tables {
    fn contains(&self, level: Level, id: &str) -> bool {
        match level {
            Level::Brand => self.brands.iter().any(|b| b.id == id),
            Level::Category => self.categories.iter().any(|c| c.id == id),
            Level::Series => self.series.iter().any(|s| s.id == id),
            Level::Product => self.products.iter().any(|p| p.id == id),
        }
    }

    fn require(&self, level: Level, id: &str) -> RepoResult<()> {
        if self.contains(level, id) {
            Ok(())
        } else {
            Err(RepoError::NotFound(format!("{} {} not found", level.title(), id)))
        }
    }

    fn variant_mut(&mut self, variant_id: &str) -> Option<&mut StockVariant> {
        self.stock_types
            .iter_mut()
            .flat_map(|st| st.variants.iter_mut())
            .find(|v| v.id == variant_id)
    }
}

/// Shared in-memory record store
///
/// Cloning yields another handle to the same tables.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogStore {
    tables: Arc<RwLock<Tables>>,
    revision: Arc<AtomicU64>,
}

fn new_id(table: &str) -> String {
    format!("{}:{}", table, uuid::Uuid::new_v4())
}

impl MemoryCatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing records
    ///
    /// Records are stored as given; integrity problems surface when a
    /// snapshot is built, not here.
    pub fn from_records(records: CatalogRecords) -> Self {
        let tables = Tables {
            brands: records.brands,
            categories: records.categories,
            series: records.series,
            products: records.products,
            services: records.services,
            overrides: OverrideStore::build(records.overrides),
            stock_types: records.stock_types,
        };
        Self {
            tables: Arc::new(RwLock::new(tables)),
            revision: Arc::new(AtomicU64::new(0)),
        }
    }

    fn bump(&self) {
        self.revision.fetch_add(1, Ordering::SeqCst);
    }

    // ========================================================================
    // Brands
    // ========================================================================

    pub async fn create_brand(&self, data: BrandCreate) -> RepoResult<Brand> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        let brand = Brand {
            id: new_id("brand"),
            name: data.name,
            logo: data.logo,
            sort_order: data.sort_order.unwrap_or(0),
            is_active: true,
        };
        self.tables.write().brands.push(brand.clone());
        self.bump();
        Ok(brand)
    }

    pub async fn update_brand(&self, id: &str, data: BrandUpdate) -> RepoResult<Brand> {
        if let Some(name) = &data.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        let mut tables = self.tables.write();
        let brand = tables
            .brands
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("Brand {id} not found")))?;
        if let Some(name) = data.name {
            brand.name = name;
        }
        if let Some(logo) = data.logo {
            brand.logo = Some(logo);
        }
        if let Some(sort_order) = data.sort_order {
            brand.sort_order = sort_order;
        }
        if let Some(is_active) = data.is_active {
            brand.is_active = is_active;
        }
        let updated = brand.clone();
        drop(tables);
        self.bump();
        Ok(updated)
    }

    pub async fn delete_brand(&self, id: &str) -> RepoResult<bool> {
        let removed = remove_where(&mut self.tables.write().brands, |b| b.id == id);
        if removed {
            self.bump();
        }
        Ok(removed)
    }

    // ========================================================================
    // Categories
    // ========================================================================

    pub async fn create_category(&self, data: CategoryCreate) -> RepoResult<Category> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        let mut tables = self.tables.write();
        tables.require(Level::Brand, &data.brand_id)?;
        let category = Category {
            id: new_id("category"),
            brand_id: data.brand_id,
            name: data.name,
            sort_order: data.sort_order.unwrap_or(0),
            is_active: true,
        };
        tables.categories.push(category.clone());
        drop(tables);
        self.bump();
        Ok(category)
    }

    pub async fn update_category(&self, id: &str, data: CategoryUpdate) -> RepoResult<Category> {
        if let Some(name) = &data.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        let mut tables = self.tables.write();
        if let Some(brand_id) = &data.brand_id {
            tables.require(Level::Brand, brand_id)?;
        }
        let category = tables
            .categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("Category {id} not found")))?;
        if let Some(brand_id) = data.brand_id {
            category.brand_id = brand_id;
        }
        if let Some(name) = data.name {
            category.name = name;
        }
        if let Some(sort_order) = data.sort_order {
            category.sort_order = sort_order;
        }
        if let Some(is_active) = data.is_active {
            category.is_active = is_active;
        }
        let updated = category.clone();
        drop(tables);
        self.bump();
        Ok(updated)
    }

    pub async fn delete_category(&self, id: &str) -> RepoResult<bool> {
        let removed = remove_where(&mut self.tables.write().categories, |c| c.id == id);
        if removed {
            self.bump();
        }
        Ok(removed)
    }

    // ========================================================================
    // Series
    // ========================================================================

    pub async fn create_series(&self, data: SeriesCreate) -> RepoResult<Series> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        let mut tables = self.tables.write();
        tables.require(Level::Category, &data.category_id)?;
        let series = Series {
            id: new_id("series"),
            category_id: data.category_id,
            name: data.name,
            sort_order: data.sort_order.unwrap_or(0),
            is_active: true,
        };
        tables.series.push(series.clone());
        drop(tables);
        self.bump();
        Ok(series)
    }

    pub async fn update_series(&self, id: &str, data: SeriesUpdate) -> RepoResult<Series> {
        if let Some(name) = &data.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        let mut tables = self.tables.write();
        if let Some(category_id) = &data.category_id {
            tables.require(Level::Category, category_id)?;
        }
        let series = tables
            .series
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("Series {id} not found")))?;
        if let Some(category_id) = data.category_id {
            series.category_id = category_id;
        }
        if let Some(name) = data.name {
            series.name = name;
        }
        if let Some(sort_order) = data.sort_order {
            series.sort_order = sort_order;
        }
        if let Some(is_active) = data.is_active {
            series.is_active = is_active;
        }
        let updated = series.clone();
        drop(tables);
        self.bump();
        Ok(updated)
    }

    pub async fn delete_series(&self, id: &str) -> RepoResult<bool> {
        let removed = remove_where(&mut self.tables.write().series, |s| s.id == id);
        if removed {
            self.bump();
        }
        Ok(removed)
    }

    // ========================================================================
    // Products
    // ========================================================================

    pub async fn create_product(&self, data: ProductCreate) -> RepoResult<Product> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.model_number, "model_number", MAX_NAME_LEN)?;
        let mut tables = self.tables.write();
        tables.require(Level::Series, &data.series_id)?;
        let product = Product {
            id: new_id("product"),
            series_id: data.series_id,
            name: data.name,
            model_number: data.model_number,
            image: data.image.unwrap_or_default(),
            sort_order: data.sort_order.unwrap_or(0),
            is_active: true,
        };
        tables.products.push(product.clone());
        drop(tables);
        self.bump();
        Ok(product)
    }

    pub async fn update_product(&self, id: &str, data: ProductUpdate) -> RepoResult<Product> {
        if let Some(name) = &data.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        validate_optional_text(&data.model_number, "model_number", MAX_NAME_LEN)?;
        let mut tables = self.tables.write();
        if let Some(series_id) = &data.series_id {
            tables.require(Level::Series, series_id)?;
        }
        let product = tables
            .products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("Product {id} not found")))?;
        if let Some(series_id) = data.series_id {
            product.series_id = series_id;
        }
        if let Some(name) = data.name {
            product.name = name;
        }
        if let Some(model_number) = data.model_number {
            product.model_number = Some(model_number);
        }
        if let Some(image) = data.image {
            product.image = image;
        }
        if let Some(sort_order) = data.sort_order {
            product.sort_order = sort_order;
        }
        if let Some(is_active) = data.is_active {
            product.is_active = is_active;
        }
        let updated = product.clone();
        drop(tables);
        self.bump();
        Ok(updated)
    }

    pub async fn delete_product(&self, id: &str) -> RepoResult<bool> {
        let removed = remove_where(&mut self.tables.write().products, |p| p.id == id);
        if removed {
            self.bump();
        }
        Ok(removed)
    }

    // ========================================================================
    // Services
    // ========================================================================

    pub async fn create_service(&self, data: ServiceCreate) -> RepoResult<Service> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        validate_price(data.base_price, "base_price")?;
        let mut tables = self.tables.write();
        tables.require(data.level, &data.level_id)?;
        let service = Service {
            id: new_id("service"),
            name: data.name,
            description: data.description,
            level: data.level,
            level_id: data.level_id,
            base_price: data.base_price,
            estimated_time: data.estimated_time,
            is_active: true,
        };
        tables.services.push(service.clone());
        drop(tables);
        self.bump();
        Ok(service)
    }

    /// Edit a service; its attachment point (`level`, `level_id`) is fixed
    pub async fn update_service(&self, id: &str, data: ServiceUpdate) -> RepoResult<Service> {
        if let Some(name) = &data.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        validate_optional_price(data.base_price, "base_price")?;
        let mut tables = self.tables.write();
        let service = tables
            .services
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("Service {id} not found")))?;
        if let Some(name) = data.name {
            service.name = name;
        }
        if let Some(description) = data.description {
            service.description = Some(description);
        }
        if let Some(base_price) = data.base_price {
            service.base_price = base_price;
        }
        if let Some(estimated_time) = data.estimated_time {
            service.estimated_time = estimated_time;
        }
        if let Some(is_active) = data.is_active {
            service.is_active = is_active;
        }
        let updated = service.clone();
        drop(tables);
        self.bump();
        Ok(updated)
    }

    /// Delete a service together with its per-product overrides
    pub async fn delete_service(&self, id: &str) -> RepoResult<bool> {
        let mut tables = self.tables.write();
        let removed = remove_where(&mut tables.services, |s| s.id == id);
        if removed {
            let overrides = tables.overrides.remove_service(id);
            tracing::debug!(service_id = %id, overrides, "Service deleted");
        }
        drop(tables);
        if removed {
            self.bump();
        }
        Ok(removed)
    }

    // ========================================================================
    // Overrides
    // ========================================================================

    pub async fn find_override(
        &self,
        service_id: &str,
        product_id: &str,
    ) -> RepoResult<Option<ServiceProductOverride>> {
        Ok(self.tables.read().overrides.get(service_id, product_id).cloned())
    }

    pub async fn delete_override(&self, service_id: &str, product_id: &str) -> RepoResult<bool> {
        let removed = self
            .tables
            .write()
            .overrides
            .remove(service_id, product_id)
            .is_some();
        if removed {
            self.bump();
        }
        Ok(removed)
    }

    // ========================================================================
    // Stock
    // ========================================================================

    /// Stock types of one product, in insertion order
    pub async fn list_stock_types(&self, product_id: &str) -> RepoResult<Vec<ProductStockType>> {
        Ok(self
            .tables
            .read()
            .stock_types
            .iter()
            .filter(|st| st.product_id == product_id)
            .cloned()
            .collect())
    }

    /// Edit a stock type
    ///
    /// `price: Some(None)` clears the type-level price; an absent price
    /// leaves it unchanged.
    pub async fn update_stock_type(
        &self,
        id: &str,
        data: StockTypeUpdate,
    ) -> RepoResult<ProductStockType> {
        validate_optional_price(data.price.flatten(), "price")?;
        let mut tables = self.tables.write();
        let stock_type = tables
            .stock_types
            .iter_mut()
            .find(|st| st.id == id)
            .ok_or_else(|| RepoError::NotFound(format!("Stock type {id} not found")))?;
        if let Some(is_enabled) = data.is_enabled {
            stock_type.is_enabled = is_enabled;
        }
        if let Some(is_public_visible) = data.is_public_visible {
            stock_type.is_public_visible = is_public_visible;
        }
        if let Some(price) = data.price {
            stock_type.price = price;
        }
        let updated = stock_type.clone();
        drop(tables);
        self.bump();
        Ok(updated)
    }

    pub async fn add_variant(
        &self,
        stock_type_id: &str,
        data: StockVariantCreate,
    ) -> RepoResult<StockVariant> {
        validate_required_text(&data.name, "name", MAX_NAME_LEN)?;
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        validate_price(data.price, "price")?;
        let mut tables = self.tables.write();
        let stock_type = tables
            .stock_types
            .iter_mut()
            .find(|st| st.id == stock_type_id)
            .ok_or_else(|| RepoError::NotFound(format!("Stock type {stock_type_id} not found")))?;
        let variant = StockVariant {
            id: new_id("stock_variant"),
            name: data.name,
            price: data.price,
            description: data.description,
            is_active: true,
        };
        stock_type.variants.push(variant.clone());
        drop(tables);
        self.bump();
        Ok(variant)
    }

    pub async fn update_variant(
        &self,
        variant_id: &str,
        data: StockVariantUpdate,
    ) -> RepoResult<StockVariant> {
        if let Some(name) = &data.name {
            validate_required_text(name, "name", MAX_NAME_LEN)?;
        }
        validate_optional_text(&data.description, "description", MAX_NOTE_LEN)?;
        validate_optional_price(data.price, "price")?;
        let mut tables = self.tables.write();
        let variant = tables
            .variant_mut(variant_id)
            .ok_or_else(|| RepoError::NotFound(format!("Stock variant {variant_id} not found")))?;
        if let Some(name) = data.name {
            variant.name = name;
        }
        if let Some(price) = data.price {
            variant.price = price;
        }
        if let Some(description) = data.description {
            variant.description = Some(description);
        }
        if let Some(is_active) = data.is_active {
            variant.is_active = is_active;
        }
        let updated = variant.clone();
        drop(tables);
        self.bump();
        Ok(updated)
    }

    pub async fn delete_variant(&self, variant_id: &str) -> RepoResult<bool> {
        let mut tables = self.tables.write();
        let removed = tables
            .stock_types
            .iter_mut()
            .any(|st| remove_where(&mut st.variants, |v| v.id == variant_id));
        drop(tables);
        if removed {
            self.bump();
        }
        Ok(removed)
    }
}

fn remove_where<T>(rows: &mut Vec<T>, pred: impl Fn(&T) -> bool) -> bool {
    let before = rows.len();
    rows.retain(|row| !pred(row));
    rows.len() != before
}

impl CatalogRepository for MemoryCatalogStore {
    async fn revision(&self) -> RepoResult<u64> {
        Ok(self.revision.load(Ordering::SeqCst))
    }

    async fn load_records(&self) -> RepoResult<CatalogRecords> {
        let tables = self.tables.read();
        Ok(CatalogRecords {
            brands: tables.brands.clone(),
            categories: tables.categories.clone(),
            series: tables.series.clone(),
            products: tables.products.clone(),
            services: tables.services.clone(),
            overrides: tables.overrides.iter().cloned().collect(),
            stock_types: tables.stock_types.clone(),
        })
    }

    async fn upsert_override(&self, data: ServiceOverrideUpsert) -> RepoResult<UpsertOutcome> {
        validate_id(&data.service_id, "service_id")?;
        validate_id(&data.product_id, "product_id")?;
        let mut tables = self.tables.write();
        if !tables.services.iter().any(|s| s.id == data.service_id) {
            return Err(RepoError::NotFound(format!(
                "Service {} not found",
                data.service_id
            )));
        }
        tables.require(Level::Product, &data.product_id)?;
        let outcome = tables
            .overrides
            .upsert(data, || new_id("service_override"), now_millis())?;
        drop(tables);
        self.bump();
        Ok(outcome)
    }

    async fn ensure_default_stock_types(
        &self,
        product_id: &str,
        conditions: &[String],
    ) -> RepoResult<Vec<ProductStockType>> {
        let mut tables = self.tables.write();
        tables.require(Level::Product, product_id)?;
        let created = default_stock_types(&tables.stock_types, product_id, conditions, || {
            new_id("stock_type")
        });
        if created.is_empty() {
            return Ok(created);
        }
        tables.stock_types.extend(created.iter().cloned());
        drop(tables);
        self.bump();
        Ok(created)
    }
}
