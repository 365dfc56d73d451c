//! Forms
//!
//! Input forms of the storefront and their field rules. Failed rules are
//! reported per field with the message shown next to that field.

use std::{borrow::Cow, collections::BTreeMap, error::Error, fmt};

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::{
    cart::{PaymentMethod, ShippingAddress},
    messages,
};

/// Field name → first failing rule's message.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    /// Message for a field, if its value was rejected.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    /// Number of rejected fields.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Rejected fields and their messages, by field name.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(field, message)| (field.as_str(), message.as_str()))
    }

    fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }
}

impl fmt::Display for FormErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (field, message)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }

            write!(f, "{field}: {message}")?;
        }

        Ok(())
    }
}

impl Error for FormErrors {}

impl From<ValidationErrors> for FormErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut form_errors = FormErrors::default();

        for (field, field_errors) in errors.field_errors() {
            let message = field_errors
                .iter()
                .find_map(|error| error.message.as_ref())
                .map_or_else(|| messages::UNKNOWN_ERROR.to_string(), ToString::to_string);

            form_errors.insert(field.to_string(), message);
        }

        form_errors
    }
}

fn run<T: Validate>(form: &T) -> Result<(), FormErrors> {
    form.validate().map_err(FormErrors::from)
}

fn rule(code: &'static str, message: &'static str) -> ValidationError {
    ValidationError::new(code).with_message(Cow::Borrowed(message))
}

fn required(value: &str, message: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(rule("required", message));
    }

    Ok(())
}

fn validate_full_name(value: &str) -> Result<(), ValidationError> {
    required(value, "Digite seu nome completo")
}

fn validate_address(value: &str) -> Result<(), ValidationError> {
    required(value, "Digite seu endereço")?;

    if value.trim().chars().count() < 3 {
        return Err(rule("min_length", "Digite endereço correto"));
    }

    Ok(())
}

fn validate_city(value: &str) -> Result<(), ValidationError> {
    required(value, "Digite a cidade")
}

fn validate_postal_code(value: &str) -> Result<(), ValidationError> {
    required(value, "Digite o CEP")
}

fn validate_country(value: &str) -> Result<(), ValidationError> {
    required(value, "Digite o país")
}

/// Shipping address form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShippingForm {
    /// Recipient name
    #[validate(custom(function = "validate_full_name"))]
    pub full_name: String,

    /// Street address
    #[validate(custom(function = "validate_address"))]
    pub address: String,

    /// City
    #[validate(custom(function = "validate_city"))]
    pub city: String,

    /// Postal code (CEP)
    #[validate(custom(function = "validate_postal_code"))]
    pub postal_code: String,

    /// Country
    #[validate(custom(function = "validate_country"))]
    pub country: String,
}

impl ShippingForm {
    /// Prefill the form from a saved address.
    pub fn from_address(address: &ShippingAddress) -> Self {
        Self {
            full_name: address.full_name.clone(),
            address: address.address.clone(),
            city: address.city.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
        }
    }

    /// Validate the form and produce the address to save.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any rule fails.
    pub fn into_address(self) -> Result<ShippingAddress, FormErrors> {
        run(&self)?;

        Ok(ShippingAddress {
            full_name: self.full_name.trim().to_string(),
            address: self.address.trim().to_string(),
            city: self.city.trim().to_string(),
            postal_code: self.postal_code.trim().to_string(),
            country: self.country.trim().to_string(),
        })
    }
}

fn validate_login_email(value: &str) -> Result<(), ValidationError> {
    required(value, "Insira o email cadastrado")
}

fn validate_login_password(value: &str) -> Result<(), ValidationError> {
    required(value, "Insira sua senha cadastrada")
}

/// Sign-in form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct LoginForm {
    /// Account e-mail
    #[validate(
        custom(function = "validate_login_email"),
        email(message = "Por favor, insira um email válido")
    )]
    pub email: String,

    /// Account password
    #[validate(
        custom(function = "validate_login_password"),
        length(min = 6, message = "Senha deve conter no minimo 6 caracteres")
    )]
    pub password: String,
}

impl LoginForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any rule fails.
    pub fn check(&self) -> Result<(), FormErrors> {
        run(self)
    }
}

fn validate_name(value: &str) -> Result<(), ValidationError> {
    required(value, "Insira seu nome completo")
}

fn validate_new_password(value: &str) -> Result<(), ValidationError> {
    required(value, "Insira uma senha válida")
}

fn validate_confirm_password(value: &str) -> Result<(), ValidationError> {
    required(value, "Confirme sua senha")
}

/// Account registration form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterForm {
    /// Full name
    #[validate(
        custom(function = "validate_name"),
        length(min = 8, message = "Nome deve conter no minimo 8 caracteres")
    )]
    pub name: String,

    /// Account e-mail
    #[validate(
        custom(function = "validate_login_email"),
        email(message = "Por favor, insira um email válido")
    )]
    pub email: String,

    /// New password
    #[validate(
        custom(function = "validate_new_password"),
        length(min = 6, message = "Senha deve conter no minimo 6 caracteres")
    )]
    pub password: String,

    /// Password typed again
    #[validate(
        custom(function = "validate_confirm_password"),
        length(min = 6, message = "Senha deve conter no minimo 6 caracteres"),
        must_match(other = "password", message = "As senhas não conferem")
    )]
    pub confirm_password: String,
}

impl RegisterForm {
    /// Validate the form.
    ///
    /// # Errors
    ///
    /// Returns the per-field messages when any rule fails.
    pub fn check(&self) -> Result<(), FormErrors> {
        run(self)
    }
}

/// Payment method selection.
///
/// # Errors
///
/// Returns the message to show when nothing was selected.
pub fn select_payment_method(selection: Option<PaymentMethod>) -> Result<PaymentMethod, &'static str> {
    selection.ok_or(messages::SELECT_PAYMENT_METHOD)
}
