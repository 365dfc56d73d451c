//! Screens and actions reachable from the command line.

use std::io;

use clap::Subcommand;
use storefront::{
    cart::{CartStorage, PaymentMethod},
    forms::{FormErrors, RegisterForm},
};
use storefront_app::{
    context::AppContext,
    pages::{PageOutcome, home},
};

use crate::render;

mod account;
mod cart;
mod checkout;
mod orders;

pub(crate) use account::RedirectTarget;
pub(crate) use cart::CartCommand;
pub(crate) use orders::OrdersCommand;

/// Screen or action to run.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// List the products on sale
    Products,

    /// Show one product
    Product {
        /// Product slug
        slug: String,
    },

    /// Inspect or change the cart
    Cart {
        #[command(subcommand)]
        command: CartCommand,
    },

    /// Show or save the shipping address
    Shipping {
        /// Recipient name
        #[arg(long)]
        full_name: Option<String>,

        /// Street address
        #[arg(long)]
        address: Option<String>,

        /// City
        #[arg(long)]
        city: Option<String>,

        /// Postal code (CEP)
        #[arg(long)]
        postal_code: Option<String>,

        /// Country
        #[arg(long)]
        country: Option<String>,
    },

    /// Show or choose the payment method
    Payment {
        /// Payment provider
        #[arg(long)]
        method: Option<PaymentMethod>,
    },

    /// Review the order before placing it
    Review,

    /// Place the order
    PlaceOrder,

    /// Orders of the signed-in customer
    Orders {
        #[command(subcommand)]
        command: OrdersCommand,
    },

    /// Sign in
    Login {
        /// Account e-mail
        #[arg(long)]
        email: String,

        /// Account password
        #[arg(long)]
        password: String,

        /// Page to continue to after signing in
        #[arg(long, value_enum)]
        redirect: Option<RedirectTarget>,
    },

    /// Create an account and sign in
    Register {
        /// Full name
        #[arg(long)]
        name: String,

        /// Account e-mail
        #[arg(long)]
        email: String,

        /// New password
        #[arg(long)]
        password: String,

        /// Password typed again
        #[arg(long)]
        confirm_password: String,

        /// Page to continue to after signing in
        #[arg(long, value_enum)]
        redirect: Option<RedirectTarget>,
    },

    /// Sign out
    Logout,
}

pub(crate) async fn run<S: CartStorage>(
    ctx: &mut AppContext<S>,
    command: Command,
    out: &mut impl io::Write,
) -> io::Result<()> {
    match command {
        Command::Products => render::write_products(out, &home::listing(ctx)),
        Command::Product { slug } => cart::show_product(ctx, &slug, out).await,
        Command::Cart { command } => cart::run(ctx, command, out).await,
        Command::Shipping {
            full_name,
            address,
            city,
            postal_code,
            country,
        } => {
            let fields = checkout::ShippingFields {
                full_name,
                address,
                city,
                postal_code,
                country,
            };

            checkout::shipping(ctx, fields, out)
        }
        Command::Payment { method } => checkout::payment(ctx, method, out),
        Command::Review => checkout::review(ctx, out),
        Command::PlaceOrder => checkout::place_order(ctx, out).await,
        Command::Orders { command } => orders::run(ctx, command, out).await,
        Command::Login {
            email,
            password,
            redirect,
        } => account::login(ctx, email, password, redirect, out).await,
        Command::Register {
            name,
            email,
            password,
            confirm_password,
            redirect,
        } => {
            let form = RegisterForm {
                name,
                email,
                password,
                confirm_password,
            };

            account::register(ctx, form, redirect, out).await
        }
        Command::Logout => account::logout(ctx, out),
    }
}

/// Print a form submission's result: the outcome, or each rejected field.
fn write_submission(
    out: &mut impl io::Write,
    submission: Result<PageOutcome, FormErrors>,
) -> io::Result<()> {
    match submission {
        Ok(outcome) => render::write_outcome(out, &outcome),
        Err(errors) => render::write_form_errors(out, &errors),
    }
}

#[cfg(test)]
mod tests {
    use std::{error::Error, sync::Arc};

    use storefront::{
        cart::{CartStore, MemoryStorage},
        catalog::Catalog,
        session::{Session, User},
    };
    use storefront_app::api::MockStorefrontApi;
    use testresult::TestResult;

    use super::*;

    fn context(api: MockStorefrontApi) -> Result<AppContext<MemoryStorage>, Box<dyn Error>> {
        Ok(AppContext::new(
            Arc::new(api),
            CartStore::open(MemoryStorage::new()),
            Catalog::bundled()?,
        ))
    }

    fn customer() -> Session {
        Session {
            user: User {
                id: "u-1".to_string(),
                name: "Maria Silva".to_string(),
                email: "maria@example.com".to_string(),
                is_admin: false,
            },
            token: "test-token".to_string(),
        }
    }

    async fn output(
        ctx: &mut AppContext<MemoryStorage>,
        command: Command,
    ) -> Result<String, Box<dyn Error>> {
        let mut out = Vec::new();

        run(ctx, command, &mut out).await?;

        Ok(String::from_utf8(out)?)
    }

    #[tokio::test]
    async fn products_lists_bundled_catalog() -> TestResult {
        let mut ctx = context(MockStorefrontApi::new())?;

        let listing = output(&mut ctx, Command::Products).await?;

        assert!(listing.contains("camisa-polo"));
        assert!(listing.contains("Indisponível"));

        Ok(())
    }

    #[tokio::test]
    async fn adding_to_cart_shows_the_cart() -> TestResult {
        let mut ctx = context(MockStorefrontApi::new())?;

        let command = Command::Cart {
            command: CartCommand::Add {
                slug: "camisa-polo".to_string(),
            },
        };

        let screen = output(&mut ctx, command).await?;

        assert!(screen.contains("-> /cart"));
        assert!(screen.contains("Camisa Polo"));
        assert_eq!(ctx.cart.cart().item_count(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn sold_out_product_is_not_added() -> TestResult {
        let mut ctx = context(MockStorefrontApi::new())?;

        let command = Command::Cart {
            command: CartCommand::Add {
                slug: "calca-sarja".to_string(),
            },
        };

        let screen = output(&mut ctx, command).await?;

        assert!(screen.starts_with("! Este produto esgotou."));
        assert!(ctx.cart.cart().is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn shipping_requires_sign_in() -> TestResult {
        let mut ctx = context(MockStorefrontApi::new())?;

        let command = Command::Shipping {
            full_name: None,
            address: None,
            city: None,
            postal_code: None,
            country: None,
        };

        let screen = output(&mut ctx, command).await?;

        assert_eq!(screen, "-> /login?redirect=/shipping\n");

        Ok(())
    }

    #[tokio::test]
    async fn incomplete_shipping_reports_fields() -> TestResult {
        let mut ctx = context(MockStorefrontApi::new())?.with_session(Some(customer()));

        let command = Command::Shipping {
            full_name: Some("Maria Silva".to_string()),
            address: Some("Ru".to_string()),
            city: None,
            postal_code: None,
            country: None,
        };

        let screen = output(&mut ctx, command).await?;

        assert!(screen.contains("address: Digite endereço correto"));
        assert!(screen.contains("city: Digite a cidade"));
        assert!(ctx.cart.cart().shipping_address.is_empty());

        Ok(())
    }

    #[tokio::test]
    async fn missing_payment_method_shows_choices() -> TestResult {
        let mut ctx = context(MockStorefrontApi::new())?.with_session(Some(customer()));

        let shipping = Command::Shipping {
            full_name: Some("Maria Silva".to_string()),
            address: Some("Rua do Sol, 10".to_string()),
            city: Some("Recife".to_string()),
            postal_code: Some("50000-000".to_string()),
            country: Some("Brasil".to_string()),
        };

        assert_eq!(output(&mut ctx, shipping).await?, "-> /payment\n");

        let screen = output(&mut ctx, Command::Payment { method: None }).await?;

        assert!(screen.contains("( ) Paypal"));
        assert!(screen.contains("( ) Pagseguro"));

        Ok(())
    }

    #[tokio::test]
    async fn logout_drops_session() -> TestResult {
        let mut ctx = context(MockStorefrontApi::new())?.with_session(Some(customer()));

        let screen = output(&mut ctx, Command::Logout).await?;

        assert_eq!(screen, "-> /login\n");
        assert!(ctx.session().is_none());

        Ok(())
    }
}
