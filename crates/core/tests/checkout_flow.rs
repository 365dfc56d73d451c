//! End-to-end cart and checkout flow over the bundled catalog

use rust_decimal::Decimal;
use storefront::prelude::*;
use tempfile::tempdir;
use testresult::TestResult;

fn catalog() -> Result<Catalog, CatalogError> {
    Catalog::from_path(concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures/products.yml"))
}

fn customer() -> User {
    User {
        id: "6272a1f0c2b1e4a5d6f7a001".to_string(),
        name: "Maria Silva".to_string(),
        email: "maria@example.com".to_string(),
        is_admin: false,
    }
}

fn shipping_form() -> ShippingForm {
    ShippingForm {
        full_name: "Maria Silva".to_string(),
        address: "Rua das Flores, 100".to_string(),
        city: "Recife".to_string(),
        postal_code: "50000-000".to_string(),
        country: "Brasil".to_string(),
    }
}

#[test]
fn bundled_catalog_loads() -> TestResult {
    let catalog = catalog()?;

    assert_eq!(catalog.len(), 6);
    assert!(!catalog.find_by_slug("calca-sarja").ok_or("missing")?.is_in_stock());
    assert_eq!(Catalog::bundled()?, catalog);

    Ok(())
}

#[test]
fn checkout_walks_every_step() -> TestResult {
    let catalog = catalog()?;
    let user = customer();
    let mut store = CartStore::open(MemoryStorage::new());

    let polo = catalog.find_by_slug("camisa-polo").ok_or("missing polo")?;
    let basica = catalog.find_by_slug("camiseta-basica").ok_or("missing basica")?;

    store.add_product(polo)?;
    store.add_product(polo)?;
    store.add_product(basica)?;

    assert_eq!(
        CheckoutStep::Shipping.enter(None, store.cart()),
        Err(Route::login_then(Route::Shipping))
    );
    assert_eq!(
        CheckoutStep::Payment.enter(Some(&user), store.cart()),
        Err(Route::Shipping)
    );

    store.save_shipping_address(shipping_form().into_address()?)?;

    assert_eq!(
        CheckoutStep::PlaceOrder.enter(Some(&user), store.cart()),
        Err(Route::Payment)
    );

    store.save_payment_method(select_payment_method(Some(PaymentMethod::Pagseguro))?)?;

    assert_eq!(CheckoutStep::PlaceOrder.enter(Some(&user), store.cart()), Ok(()));

    let order = NewOrder::from_cart(store.cart(), &PriceSchedule::default())?;

    // 2 x 70 + 39.9
    assert_eq!(order.prices.items_price, Decimal::new(1_799, 1));
    assert_eq!(order.prices.shipping_price, Decimal::ZERO);
    assert_eq!(order.prices.tax_price, Decimal::new(2_699, 2));
    assert_eq!(order.prices.total_price, Decimal::new(20_689, 2));

    store.clear_items()?;

    assert!(store.cart().is_empty());
    assert_eq!(store.cart().payment_method, Some(PaymentMethod::Pagseguro));

    Ok(())
}

#[test]
fn stock_limits_cart_quantity() -> TestResult {
    let catalog = catalog()?;
    let jeans = catalog.find_by_slug("calca-jeans").ok_or("missing jeans")?;
    let mut store = CartStore::open(MemoryStorage::new());

    store.add_product(jeans)?;
    store.add_product(jeans)?;

    let error = store.add_product(jeans).err().ok_or("third unit accepted")?;

    assert_eq!(error.to_string(), "Este produto esgotou.");
    assert_eq!(store.cart().item_count(), 2);

    let sarja = catalog.find_by_slug("calca-sarja").ok_or("missing sarja")?;

    assert!(store.add_product(sarja).is_err());
    assert!(store.cart().item("calca-sarja").is_none());

    Ok(())
}

#[test]
fn file_snapshot_survives_restart() -> TestResult {
    let dir = tempdir()?;
    let path = dir.path().join("state").join("cart.json");
    let catalog = catalog()?;
    let social = catalog.find_by_slug("camisa-social").ok_or("missing social")?;

    {
        let mut store = CartStore::open(JsonFileStorage::new(&path));

        store.add_product(social)?;
        store.update_quantity("camisa-social", 4)?;
        store.save_payment_method(PaymentMethod::Paypal)?;
    }

    let store = CartStore::open(JsonFileStorage::new(&path));

    assert_eq!(store.cart().item("camisa-social").map(|i| i.quantity), Some(4));
    assert_eq!(store.cart().payment_method, Some(PaymentMethod::Paypal));

    let prices = derive_prices(&store.cart().cart_items);

    // 4 x 89.9 = 359.6 clears the free-shipping threshold
    assert_eq!(prices.shipping_price, Decimal::from(15));
    assert_eq!(prices.total_price, Decimal::new(42_854, 2));

    Ok(())
}
