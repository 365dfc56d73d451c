//! Product listing.

use storefront::{cart::CartStorage, catalog::Product, messages, money::format_brl};

use crate::context::AppContext;

/// A product card on the listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductCard {
    /// Link target
    pub slug: String,

    /// Product name
    pub name: String,

    /// Brand name
    pub brand: String,

    /// Image reference
    pub image: String,

    /// Formatted price
    pub price: String,

    /// Stock label
    pub availability: &'static str,
}

impl From<&Product> for ProductCard {
    fn from(product: &Product) -> Self {
        Self {
            slug: product.slug.clone(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            image: product.image.clone(),
            price: format_brl(product.price),
            availability: if product.is_in_stock() {
                messages::IN_STOCK
            } else {
                messages::UNAVAILABLE
            },
        }
    }
}

/// Cards for every product, in catalog order.
pub fn listing<S: CartStorage>(ctx: &AppContext<S>) -> Vec<ProductCard> {
    ctx.catalog.products().iter().map(ProductCard::from).collect()
}

#[cfg(test)]
mod tests {
    use crate::{api::MockStorefrontApi, test::context};

    use super::*;

    #[test]
    fn lists_catalog_in_order() {
        let ctx = context(MockStorefrontApi::new());

        let cards = listing(&ctx);
        let slugs: Vec<&str> = cards.iter().map(|card| card.slug.as_str()).collect();

        assert_eq!(slugs, ["camisa-polo", "calca-jeans", "calca-sarja"]);
        assert_eq!(cards[0].availability, messages::IN_STOCK);
        assert_eq!(cards[2].availability, messages::UNAVAILABLE);
    }
}
