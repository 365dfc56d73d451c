use std::io;

use storefront::{
    cart::{CartStorage, PaymentMethod},
    checkout::Route,
    forms::ShippingForm,
};
use storefront_app::{
    context::AppContext,
    pages::{
        PageOutcome, payment,
        place_order::{self, PlaceOrderPage},
        shipping,
    },
};

use crate::{commands::write_submission, render};

/// Shipping fields given on the command line; absent ones keep the saved value.
#[derive(Debug, Default)]
pub(crate) struct ShippingFields {
    pub(crate) full_name: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) city: Option<String>,
    pub(crate) postal_code: Option<String>,
    pub(crate) country: Option<String>,
}

impl ShippingFields {
    fn is_empty(&self) -> bool {
        self.full_name.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.postal_code.is_none()
            && self.country.is_none()
    }

    fn fill(self, form: ShippingForm) -> ShippingForm {
        ShippingForm {
            full_name: self.full_name.unwrap_or(form.full_name),
            address: self.address.unwrap_or(form.address),
            city: self.city.unwrap_or(form.city),
            postal_code: self.postal_code.unwrap_or(form.postal_code),
            country: self.country.unwrap_or(form.country),
        }
    }
}

fn gated(out: &mut impl io::Write, route: Route) -> io::Result<()> {
    render::write_outcome(out, &PageOutcome::navigate(route))
}

pub(crate) fn shipping<S: CartStorage>(
    ctx: &mut AppContext<S>,
    fields: ShippingFields,
    out: &mut impl io::Write,
) -> io::Result<()> {
    let form = match shipping::view(ctx) {
        Ok(form) => form,
        Err(route) => return gated(out, route),
    };

    if fields.is_empty() {
        return render::write_shipping_form(out, &form);
    }

    write_submission(out, shipping::submit(ctx, fields.fill(form)))
}

pub(crate) fn payment<S: CartStorage>(
    ctx: &mut AppContext<S>,
    method: Option<PaymentMethod>,
    out: &mut impl io::Write,
) -> io::Result<()> {
    let view = match payment::view(ctx) {
        Ok(view) => view,
        Err(route) => return gated(out, route),
    };

    if method.is_none() {
        return render::write_payment(out, &view);
    }

    render::write_outcome(out, &payment::submit(ctx, method))
}

pub(crate) fn review<S: CartStorage>(
    ctx: &AppContext<S>,
    out: &mut impl io::Write,
) -> io::Result<()> {
    match place_order::view(ctx) {
        Ok(view) => render::write_review(out, &view),
        Err(route) => gated(out, route),
    }
}

pub(crate) async fn place_order<S: CartStorage>(
    ctx: &mut AppContext<S>,
    out: &mut impl io::Write,
) -> io::Result<()> {
    let mut page = PlaceOrderPage::new();

    let outcome = page.place(ctx).await;

    render::write_outcome(out, &outcome)
}
