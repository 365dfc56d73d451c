//! Render
//!
//! Writes each screen to the terminal.

use std::io;

use storefront::{
    checkout::CheckoutStep,
    forms::{FormErrors, ShippingForm},
    messages::{self, summary, titles},
    money::format_brl,
    orders::Order,
    pricing::OrderPrices,
};
use storefront_app::pages::{
    PageOutcome,
    cart::{CartLine, CartView},
    home::ProductCard,
    order::OrderPage,
    orders_history::OrderRow,
    payment::PaymentView,
    place_order::PlaceOrderView,
    product::ProductView,
};
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

fn write_table(out: &mut impl io::Write, builder: Builder, right_from: usize) -> io::Result<()> {
    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(right_from..), Alignment::right());

    writeln!(out, "{table}")
}

fn write_title(out: &mut impl io::Write, title: &str) -> io::Result<()> {
    writeln!(out, "\n{title}\n")
}

/// Checkout progress, marking steps up to `active`.
pub fn write_wizard(out: &mut impl io::Write, active: CheckoutStep) -> io::Result<()> {
    let steps: Vec<String> = CheckoutStep::ALL
        .iter()
        .map(|step| {
            if *step <= active {
                format!("[x] {}", step.label())
            } else {
                format!("[ ] {}", step.label())
            }
        })
        .collect();

    writeln!(out, "{}", steps.join("  >  "))
}

/// Product listing.
pub fn write_products(out: &mut impl io::Write, cards: &[ProductCard]) -> io::Result<()> {
    write_title(out, titles::HOME)?;

    let mut builder = Builder::default();

    builder.push_record(["Slug", "Produto", "Marca", "Estoque", "Preço"]);

    for card in cards {
        builder.push_record([
            card.slug.as_str(),
            card.name.as_str(),
            card.brand.as_str(),
            card.availability,
            card.price.as_str(),
        ]);
    }

    write_table(out, builder, 4)
}

/// Product detail.
pub fn write_product(out: &mut impl io::Write, view: &ProductView) -> io::Result<()> {
    let product = &view.product;

    write_title(out, &product.name)?;

    writeln!(out, "Categoria: {}", product.category)?;
    writeln!(out, "Marca: {}", product.brand)?;
    writeln!(out, "Avaliação: {} ({} avaliações)", product.rating, product.num_reviews)?;
    writeln!(out, "Descrição: {}", product.description)?;
    writeln!(out, "Preço: {}", view.price)?;
    writeln!(out, "Status: {}", view.availability)?;

    if view.in_cart > 0 {
        writeln!(out, "No carrinho: {}", view.in_cart)?;
    }

    Ok(())
}

fn cart_lines(lines: &[CartLine]) -> Builder {
    let mut builder = Builder::default();

    builder.push_record(["Item", "Quantidade", "Preço", "Total"]);

    for line in lines {
        builder.push_record([
            line.name.clone(),
            format!("{} (1-{})", line.quantity, line.quantity_options.end()),
            format_brl(line.price),
            format_brl(line.line_total),
        ]);
    }

    builder
}

/// Cart page.
pub fn write_cart(out: &mut impl io::Write, view: &CartView) -> io::Result<()> {
    write_title(out, titles::CART)?;

    if let Some(message) = view.empty_message {
        return writeln!(out, "{message} {}", messages::BACK_TO_STORE);
    }

    write_table(out, cart_lines(&view.lines), 1)?;

    writeln!(
        out,
        "Subtotal ({} itens): {}",
        view.item_count,
        format_brl(view.subtotal)
    )
}

/// Shipping form, prefilled.
pub fn write_shipping_form(out: &mut impl io::Write, form: &ShippingForm) -> io::Result<()> {
    write_wizard(out, CheckoutStep::Shipping)?;
    write_title(out, titles::SHIPPING_HEADING)?;

    writeln!(out, "Nome completo: {}", form.full_name)?;
    writeln!(out, "Endereço: {}", form.address)?;
    writeln!(out, "Cidade: {}", form.city)?;
    writeln!(out, "CEP: {}", form.postal_code)?;
    writeln!(out, "País: {}", form.country)
}

/// Per-field validation messages.
pub fn write_form_errors(out: &mut impl io::Write, errors: &FormErrors) -> io::Result<()> {
    for (field, message) in errors.iter() {
        writeln!(out, "{field}: {message}")?;
    }

    Ok(())
}

/// Payment method choice.
pub fn write_payment(out: &mut impl io::Write, view: &PaymentView) -> io::Result<()> {
    write_wizard(out, CheckoutStep::Payment)?;
    write_title(out, titles::PAYMENT)?;

    for method in view.methods {
        let marker = if view.selected == Some(method) { "(x)" } else { "( )" };

        writeln!(out, "{marker} {method}")?;
    }

    Ok(())
}

fn write_summary(out: &mut impl io::Write, prices: &OrderPrices) -> io::Result<()> {
    let mut builder = Builder::default();

    builder.push_record([titles::ORDER_SUMMARY.to_string(), String::new()]);
    builder.push_record([summary::ITEMS.to_string(), format_brl(prices.items_price)]);
    builder.push_record([summary::TAX.to_string(), format_brl(prices.tax_price)]);
    builder.push_record([summary::SHIPPING.to_string(), format_brl(prices.shipping_price)]);
    builder.push_record([summary::TOTAL.to_string(), format_brl(prices.total_price)]);

    write_table(out, builder, 1)
}

/// Order review before placing.
pub fn write_review(out: &mut impl io::Write, view: &PlaceOrderView) -> io::Result<()> {
    write_wizard(out, CheckoutStep::PlaceOrder)?;
    write_title(out, titles::PLACE_ORDER)?;

    if let Some(message) = view.empty_message {
        return writeln!(out, "{message} {}", messages::BACK_TO_STORE);
    }

    writeln!(out, "{}: {}", titles::SHIPPING_HEADING, view.shipping_address)?;
    writeln!(out, "Método de pagamento: {}\n", view.payment_method)?;

    write_table(out, cart_lines(&view.lines), 1)?;
    write_summary(out, &view.prices)
}

fn write_order_detail(out: &mut impl io::Write, order: &Order) -> io::Result<()> {
    writeln!(out, "{}: {}", titles::SHIPPING_HEADING, order.shipping_address)?;
    writeln!(out, "{}", order.delivery_status_label())?;
    writeln!(out, "Método de pagamento: {}", order.payment_method)?;
    writeln!(out, "{}\n", order.payment_status_label())?;

    let mut builder = Builder::default();

    builder.push_record(["Item", "Quantidade", "Preço", "Total"]);

    for item in &order.order_items {
        builder.push_record([
            item.name.clone(),
            item.quantity.to_string(),
            format_brl(item.price),
            format_brl(item.line_total()),
        ]);
    }

    write_table(out, builder, 1)?;
    write_summary(out, &order.prices)
}

/// Order detail page.
pub fn write_order(out: &mut impl io::Write, page: &OrderPage) -> io::Result<()> {
    write_title(out, &format!("Pedido {}", page.id()))?;

    let state = page.state();

    if state.order.is_loading() {
        return writeln!(out, "{}", messages::LOADING);
    }

    if let Some(error) = state.order.error() {
        return writeln!(out, "{error}");
    }

    if let Some(order) = page.order() {
        write_order_detail(out, order)?;
    }

    if let Some(client_id) = page.paypal_client_id().data() {
        writeln!(out, "PayPal client id: {client_id}")?;
    }

    Ok(())
}

/// Order history table.
pub fn write_history(out: &mut impl io::Write, rows: &[OrderRow]) -> io::Result<()> {
    write_title(out, titles::ORDER_HISTORY)?;

    let mut builder = Builder::default();

    builder.push_record(["ID", "DATA", "TOTAL", "PAGAMENTO", "ENTREGA", "DETALHES"]);

    for row in rows {
        builder.push_record([
            row.short_id.as_str(),
            row.date.as_str(),
            row.total.as_str(),
            row.paid.as_str(),
            row.delivered.as_str(),
            row.id.as_str(),
        ]);
    }

    write_table(out, builder, 2)
}

/// Notice and next page of an action.
pub fn write_outcome(out: &mut impl io::Write, outcome: &PageOutcome) -> io::Result<()> {
    if let Some(notice) = &outcome.notice {
        let marker = if notice.is_error() { "!" } else { "*" };

        writeln!(out, "{marker} {notice}")?;
    }

    if let Some(route) = &outcome.navigation {
        writeln!(out, "-> {route}")?;
    }

    Ok(())
}
