use std::io;

use clap::ValueEnum;
use storefront::{
    cart::CartStorage,
    checkout::Route,
    forms::{LoginForm, RegisterForm},
};
use storefront_app::{context::AppContext, pages::auth};

use crate::{commands::write_submission, render};

/// Pages a sign-in may continue to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RedirectTarget {
    Shipping,
    Payment,
    PlaceOrder,
    Orders,
}

impl From<RedirectTarget> for Route {
    fn from(target: RedirectTarget) -> Self {
        match target {
            RedirectTarget::Shipping => Route::Shipping,
            RedirectTarget::Payment => Route::Payment,
            RedirectTarget::PlaceOrder => Route::PlaceOrder,
            RedirectTarget::Orders => Route::OrderHistory,
        }
    }
}

pub(crate) async fn login<S: CartStorage>(
    ctx: &mut AppContext<S>,
    email: String,
    password: String,
    redirect: Option<RedirectTarget>,
    out: &mut impl io::Write,
) -> io::Result<()> {
    let form = LoginForm { email, password };

    write_submission(out, auth::sign_in(ctx, form, redirect.map(Route::from)).await)
}

pub(crate) async fn register<S: CartStorage>(
    ctx: &mut AppContext<S>,
    form: RegisterForm,
    redirect: Option<RedirectTarget>,
    out: &mut impl io::Write,
) -> io::Result<()> {
    write_submission(out, auth::register(ctx, form, redirect.map(Route::from)).await)
}

pub(crate) fn logout<S: CartStorage>(
    ctx: &mut AppContext<S>,
    out: &mut impl io::Write,
) -> io::Result<()> {
    render::write_outcome(out, &auth::sign_out(ctx))
}
