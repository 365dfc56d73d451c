//! Localized (pt-BR) interface text.

/// Notice when a product cannot be added because stock ran out.
pub const OUT_OF_STOCK: &str = "Este produto esgotou.";

/// Stock label for available products.
pub const IN_STOCK: &str = "Em estoque";

/// Stock label for unavailable products.
pub const UNAVAILABLE: &str = "Indisponível";

/// Product detail page for an unknown slug.
pub const PRODUCT_NOT_FOUND: &str = "Produto não encontrado";

/// Cart page with no lines.
pub const CART_EMPTY: &str = "Carrinho esta vazio.";

/// Link back to the listing from an empty cart.
pub const BACK_TO_STORE: &str = "Voltar para loja.";

/// Place-order page with no lines.
pub const PLACE_ORDER_CART_EMPTY: &str = "Carrinho vazio.";

/// Notice when no payment method was chosen.
pub const SELECT_PAYMENT_METHOD: &str = "Selecione um método de pagamento";

/// In-flight indicator.
pub const LOADING: &str = "Carregando...";

/// Place-order button.
pub const SUBMIT_ORDER: &str = "Enviar pedido";

/// Notice shown after a successful payment capture.
pub const ORDER_PAID: &str = "Pedido pago com sucesso";

/// Notice shown after a delivery confirmation.
pub const ORDER_DELIVERED: &str = "Pedido marcado como entregue";

/// Unpaid order, detail page.
pub const PAYMENT_PENDING: &str = "Pagamento não efetuado";

/// Unpaid order, history table.
pub const PAYMENT_NOT_MADE: &str = "Pagamento não realizado";

/// Undelivered order, detail page.
pub const DELIVERY_PENDING: &str = "Seu pedido será enviado após confirmação do pagamento";

/// Undelivered order, history table.
pub const NOT_SHIPPED: &str = "Produto não enviado";

/// Access denied heading.
pub const ACCESS_DENIED: &str = "Acesso Negado";

/// Reason given when a non-admin tries an admin action.
pub const ADMIN_REQUIRED: &str = "Acesso restrito a administradores";

/// Reason given when a checkout page is opened signed out.
pub const SIGN_IN_REQUIRED: &str = "Faça login para continuar";

/// Fallback when a failure carries no message.
pub const UNKNOWN_ERROR: &str = "Ocorreu um erro inesperado";

/// Page titles.
pub mod titles {
    /// Listing page
    pub const HOME: &str = "Home Page";

    /// Cart page
    pub const CART: &str = "Carrinho";

    /// Shipping page
    pub const SHIPPING: &str = "Cadastre seu endereço";

    /// Shipping form heading
    pub const SHIPPING_HEADING: &str = "Endereço de entrega";

    /// Payment page
    pub const PAYMENT: &str = "Escolha como quer pagar";

    /// Place-order page
    pub const PLACE_ORDER: &str = "Finalizar compra";

    /// Order history page
    pub const ORDER_HISTORY: &str = "Histórico de pedidos";

    /// Order summary card
    pub const ORDER_SUMMARY: &str = "Resumo do pedido";

    /// Sign-in page
    pub const LOGIN: &str = "Login";

    /// Registration page
    pub const REGISTER: &str = "Crie sua conta";

    /// Access denied page
    pub const UNAUTHORIZED: &str = "Acesso não autorizado";
}

/// Order summary row labels.
pub mod summary {
    /// Items subtotal
    pub const ITEMS: &str = "Items";

    /// Tax
    pub const TAX: &str = "Tax";

    /// Shipping
    pub const SHIPPING: &str = "Frete";

    /// Grand total
    pub const TOTAL: &str = "Total";
}
