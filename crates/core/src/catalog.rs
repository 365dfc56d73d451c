//! Catalog

use std::{fs, io, path::Path};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cart::CartItem;

/// Errors raised while loading a catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog file could not be read.
    #[error("failed to read catalog: {0}")]
    Io(#[from] io::Error),

    /// The catalog file is not valid YAML for a product list.
    #[error("failed to parse catalog: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Two products share the same slug.
    #[error("duplicate product slug: {0}")]
    DuplicateSlug(String),
}

/// Product as listed by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Server identifier, when the product came from the API.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Unique, URL-safe product key
    pub slug: String,

    /// Display name
    pub name: String,

    /// Category name
    #[serde(default)]
    pub category: String,

    /// Image reference
    pub image: String,

    /// Unit price
    pub price: Decimal,

    /// Brand name
    #[serde(default)]
    pub brand: String,

    /// Average review rating
    #[serde(default)]
    pub rating: Decimal,

    /// Number of reviews
    #[serde(default)]
    pub num_reviews: u32,

    /// Units available
    pub count_in_stock: u32,

    /// Free-form description
    #[serde(default)]
    pub description: String,
}

impl Product {
    /// Whether at least one unit is available.
    pub fn is_in_stock(&self) -> bool {
        self.count_in_stock > 0
    }

    /// Snapshot this product into a cart line with the given quantity.
    pub fn to_cart_item(&self, quantity: u32) -> CartItem {
        CartItem {
            slug: self.slug.clone(),
            name: self.name.clone(),
            image: self.image.clone(),
            price: self.price,
            quantity,
            count_in_stock: self.count_in_stock,
        }
    }
}

const BUNDLED_PRODUCTS: &str = include_str!("../fixtures/products.yml");

/// Wrapper for products in YAML
#[derive(Debug, Deserialize)]
struct CatalogFixture {
    products: Vec<Product>,
}

/// Ordered list of the products on sale.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    products: Vec<Product>,
}

impl Catalog {
    /// Build a catalog from a list of products.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateSlug`] when two products share a slug.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        for (i, product) in products.iter().enumerate() {
            if products.iter().take(i).any(|other| other.slug == product.slug) {
                return Err(CatalogError::DuplicateSlug(product.slug.clone()));
            }
        }

        Ok(Self { products })
    }

    /// Parse a catalog from a YAML document with a top-level `products` list.
    ///
    /// # Errors
    ///
    /// Returns an error if the YAML is malformed or a slug is repeated.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, CatalogError> {
        let fixture: CatalogFixture = serde_norway::from_str(yaml)?;

        Self::new(fixture.products)
    }

    /// Load a catalog from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let contents = fs::read_to_string(path)?;

        Self::from_yaml_str(&contents)
    }

    /// The catalog shipped with the client.
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled fixture fails to parse.
    pub fn bundled() -> Result<Self, CatalogError> {
        Self::from_yaml_str(BUNDLED_PRODUCTS)
    }

    /// All products, in listing order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Find a product by slug.
    pub fn find_by_slug(&self, slug: &str) -> Option<&Product> {
        self.products.iter().find(|product| product.slug == slug)
    }

    /// Get the number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    const YAML: &str = r"
products:
  - slug: camisa-polo
    name: Camisa Polo
    category: Camisas
    image: /images/polo.jpg
    price: 70
    brand: Lacoste
    rating: 4.5
    numReviews: 8
    countInStock: 20
    description: Camisa polo de algodão
  - slug: calca-jeans
    name: Calça Jeans
    image: /images/jeans.jpg
    price: 89.9
    countInStock: 0
";

    #[test]
    fn parses_yaml_fixture() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;

        assert_eq!(catalog.len(), 2);

        let polo = catalog.find_by_slug("camisa-polo").ok_or("missing polo")?;

        assert_eq!(polo.price, Decimal::from(70));
        assert_eq!(polo.num_reviews, 8);
        assert!(polo.is_in_stock());

        Ok(())
    }

    #[test]
    fn optional_fields_default() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;
        let jeans = catalog.find_by_slug("calca-jeans").ok_or("missing jeans")?;

        assert_eq!(jeans.price, Decimal::new(899, 1));
        assert!(jeans.brand.is_empty());
        assert!(!jeans.is_in_stock());

        Ok(())
    }

    #[test]
    fn unknown_slug_is_none() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;

        assert!(catalog.find_by_slug("tenis").is_none());

        Ok(())
    }

    #[test]
    fn duplicate_slugs_are_rejected() {
        let yaml = r"
products:
  - { slug: a, name: A, image: a.jpg, price: 1, countInStock: 1 }
  - { slug: a, name: B, image: b.jpg, price: 2, countInStock: 1 }
";

        let result = Catalog::from_yaml_str(yaml);

        assert!(
            matches!(result, Err(CatalogError::DuplicateSlug(ref slug)) if slug == "a"),
            "expected DuplicateSlug, got {result:?}"
        );
    }

    #[test]
    fn to_cart_item_snapshots_product() -> TestResult {
        let catalog = Catalog::from_yaml_str(YAML)?;
        let polo = catalog.find_by_slug("camisa-polo").ok_or("missing polo")?;

        let item = polo.to_cart_item(3);

        assert_eq!(item.slug, "camisa-polo");
        assert_eq!(item.quantity, 3);
        assert_eq!(item.count_in_stock, 20);
        assert_eq!(item.price, polo.price);

        Ok(())
    }
}
