//! Product and template catalogs
//!
//! The pricing engine never scans lists; it receives a keyed lookup.
//! [`ProductLookup`] and [`TemplateLookup`] centralize the sentinel rule:
//! the [`NONE_ID`](crate::NONE_ID) id never resolves, even when a row with
//! that id was loaded.

mod seed;

use std::collections::HashMap;

use dashmap::DashMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::error::{CatalogError, Result};
use crate::is_none_id;
use crate::types::{product::Product, template::Template};

/// Keyed product lookup
pub trait ProductLookup {
    /// Raw lookup, without the sentinel rule
    fn get_product(&self, id: &str) -> Option<Product>;

    /// Resolve a selected product; the sentinel id is always absent
    fn product(&self, id: &str) -> Option<Product> {
        if is_none_id(id) {
            return None;
        }
        self.get_product(id)
    }
}

/// Keyed template lookup
pub trait TemplateLookup {
    /// Raw lookup, without the sentinel rule
    fn get_template(&self, id: &str) -> Option<Template>;

    /// Resolve a selected template; the sentinel id is always absent
    fn template(&self, id: &str) -> Option<Template> {
        if is_none_id(id) {
            return None;
        }
        self.get_template(id)
    }
}

impl ProductLookup for HashMap<String, Product> {
    fn get_product(&self, id: &str) -> Option<Product> {
        self.get(id).cloned()
    }
}

impl TemplateLookup for HashMap<String, Template> {
    fn get_template(&self, id: &str) -> Option<Template> {
        self.get(id).cloned()
    }
}

impl<T: ProductLookup + ?Sized> ProductLookup for &T {
    fn get_product(&self, id: &str) -> Option<Product> {
        (**self).get_product(id)
    }
}

impl<T: TemplateLookup + ?Sized> TemplateLookup for &T {
    fn get_template(&self, id: &str) -> Option<Template> {
        (**self).get_template(id)
    }
}

/// Serializable catalog contents
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub templates: Vec<Template>,
}

/// Concurrent product and template catalog
///
/// Entries can be edited while other threads price rows against the same
/// catalog; lookups return owned copies.
#[derive(Debug, Default)]
pub struct Catalog {
    products: DashMap<String, Product>,
    templates: DashMap<String, Template>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog from products and templates, validating each entry
    pub fn from_parts(
        products: impl IntoIterator<Item = Product>,
        templates: impl IntoIterator<Item = Template>,
    ) -> Result<Self> {
        let catalog = Self::new();
        for product in products {
            catalog.insert_product(product)?;
        }
        for template in templates {
            catalog.insert_template(template)?;
        }
        Ok(catalog)
    }

    /// Load a catalog from a JSON snapshot
    #[instrument(skip(json))]
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: CatalogSnapshot = serde_json::from_str(json)?;
        let catalog = Self::from_parts(snapshot.products, snapshot.templates)?;
        debug!(
            products = catalog.product_count(),
            templates = catalog.template_count(),
            "Loaded catalog snapshot"
        );
        Ok(catalog)
    }

    /// Export the catalog, sorted by id
    pub fn snapshot(&self) -> CatalogSnapshot {
        let mut products: Vec<Product> = self.products.iter().map(|e| e.value().clone()).collect();
        products.sort_by(|a, b| a.id.cmp(&b.id));

        CatalogSnapshot {
            products,
            templates: self.templates_sorted(),
        }
    }

    /// Add or replace a product
    pub fn insert_product(&self, product: Product) -> Result<Option<Product>> {
        validate_product(&product)?;
        debug!(id = %product.id, category = %product.category, "Upserting product");
        Ok(self.products.insert(product.id.clone(), product))
    }

    /// Add or replace a template
    pub fn insert_template(&self, template: Template) -> Result<Option<Template>> {
        validate_template(&template)?;
        debug!(id = %template.id, "Upserting template");
        Ok(self.templates.insert(template.id.clone(), template))
    }

    pub fn remove_product(&self, id: &str) -> Option<Product> {
        self.products.remove(id).map(|(_, product)| product)
    }

    pub fn remove_template(&self, id: &str) -> Option<Template> {
        self.templates.remove(id).map(|(_, template)| template)
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn template_count(&self) -> usize {
        self.templates.len()
    }

    /// All templates sorted by id, for callers that need a stable order
    pub fn templates_sorted(&self) -> Vec<Template> {
        let mut templates: Vec<Template> =
            self.templates.iter().map(|e| e.value().clone()).collect();
        templates.sort_by(|a, b| a.id.cmp(&b.id));
        templates
    }
}

impl ProductLookup for Catalog {
    fn get_product(&self, id: &str) -> Option<Product> {
        self.products.get(id).map(|entry| entry.value().clone())
    }
}

impl TemplateLookup for Catalog {
    fn get_template(&self, id: &str) -> Option<Template> {
        self.templates.get(id).map(|entry| entry.value().clone())
    }
}

fn validate_product(product: &Product) -> std::result::Result<(), CatalogError> {
    if product.id.is_empty() {
        return Err(CatalogError::EmptyId);
    }
    if product.price < Decimal::ZERO {
        return Err(CatalogError::NegativePrice {
            id: product.id.clone(),
            price: product.price,
        });
    }
    if let Some(price) = product.discount_price.filter(|p| *p < Decimal::ZERO) {
        return Err(CatalogError::NegativeDiscountPrice {
            id: product.id.clone(),
            price,
        });
    }
    if let Some(width) = product.fabric_width.filter(|w| *w <= Decimal::ZERO) {
        return Err(CatalogError::InvalidFabricWidth {
            id: product.id.clone(),
            width,
        });
    }
    Ok(())
}

fn validate_template(template: &Template) -> std::result::Result<(), CatalogError> {
    if template.id.is_empty() {
        return Err(CatalogError::EmptyId);
    }

    let rates = [
        ("stitchingPricePerPanelFabric", template.stitching_price_per_panel_fabric),
        ("stitchingPricePerPanelSheer", template.stitching_price_per_panel_sheer),
        ("stitchingPricePerPanelLining", template.stitching_price_per_panel_lining),
        ("fixingPricePerSqM", template.fixing_price_per_sq_m),
    ];
    for (field, rate) in rates {
        if let Some(value) = rate.filter(|v| *v < Decimal::ZERO) {
            return Err(CatalogError::NegativeTemplateRate {
                id: template.id.clone(),
                field,
                value,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DraperyError;
    use crate::types::product::{ProductCategory, ProductUnit};
    use crate::types::template::CalculationType;
    use crate::NONE_ID;
    use rust_decimal_macros::dec;

    fn motor() -> Product {
        Product::new(
            "somfy-motor-s1",
            "Somfy Motor S1",
            dec!(150),
            ProductCategory::Motor,
            ProductUnit::PerItem,
        )
    }

    #[test]
    fn test_sentinel_never_resolves() {
        let catalog = Catalog::new();
        catalog
            .insert_product(Product::new(
                NONE_ID,
                "None",
                dec!(99),
                ProductCategory::Fabric,
                ProductUnit::PerMeter,
            ))
            .unwrap();
        catalog
            .insert_template(Template::new(NONE_ID, "None", CalculationType::RunningMeter))
            .unwrap();

        assert!(catalog.get_product(NONE_ID).is_some());
        assert!(catalog.product(NONE_ID).is_none());
        assert!(catalog.template(NONE_ID).is_none());
    }

    #[test]
    fn test_hashmap_lookup() {
        let mut products = HashMap::new();
        products.insert("somfy-motor-s1".to_string(), motor());

        assert_eq!(products.product("somfy-motor-s1").unwrap().price, dec!(150));
        assert!(products.product("unknown").is_none());
        assert!(products.product(NONE_ID).is_none());
    }

    #[test]
    fn test_rejects_negative_price() {
        let catalog = Catalog::new();
        let mut product = motor();
        product.price = dec!(-1);

        let err = catalog.insert_product(product).unwrap_err();
        assert!(matches!(
            err,
            DraperyError::Catalog(CatalogError::NegativePrice { .. })
        ));
        assert_eq!(catalog.product_count(), 0);
    }

    #[test]
    fn test_rejects_zero_fabric_width() {
        let catalog = Catalog::new();
        let product = Product::new(
            "cotton-plain",
            "Cotton",
            dec!(10.5),
            ProductCategory::Fabric,
            ProductUnit::PerMeter,
        )
        .with_fabric_width(Decimal::ZERO);

        assert!(catalog.insert_product(product).is_err());
    }

    #[test]
    fn test_rejects_negative_template_rate() {
        let catalog = Catalog::new();
        let template =
            Template::new("eyelet", "Eyelet", CalculationType::RunningMeter).with_fixing(dec!(-3));

        assert!(catalog.insert_template(template).is_err());
    }

    #[test]
    fn test_upsert_and_remove() {
        let catalog = Catalog::new();
        assert!(catalog.insert_product(motor()).unwrap().is_none());

        let replaced = catalog
            .insert_product(motor().with_discount_price(dec!(120)))
            .unwrap();
        assert_eq!(replaced.unwrap().discount_price, None);
        assert_eq!(
            catalog.product("somfy-motor-s1").unwrap().effective_price(),
            dec!(120)
        );

        assert!(catalog.remove_product("somfy-motor-s1").is_some());
        assert!(catalog.product("somfy-motor-s1").is_none());
    }

    #[test]
    fn test_json_roundtrip_through_snapshot() {
        let catalog = Catalog::seeded();
        let json = serde_json::to_string(&catalog.snapshot()).unwrap();
        let restored = Catalog::from_json(&json).unwrap();

        assert_eq!(restored.product_count(), catalog.product_count());
        assert_eq!(restored.template_count(), catalog.template_count());
        assert_eq!(
            restored.product("velvet").unwrap().fabric_width,
            Some(dec!(2.8))
        );
    }
}
