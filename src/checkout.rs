//! Checkout form

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use uuid::Uuid;

/// Customer contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    /// Full name.
    pub name: String,
    /// Contact email.
    pub email: String,
    /// Optional phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// Delivery address.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    /// Street and number.
    pub line1: String,
    /// Apartment, floor, etc.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub line2: Option<String>,
    /// City.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// ISO 3166-1 alpha-2 country code.
    pub country: String,
}

/// A requested line; prices are always re-read server side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutLine {
    /// Variant to buy.
    pub variant_id: Uuid,
    /// Units to buy.
    pub quantity: u32,
}

/// Everything the customer submits at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    /// Contact details.
    pub customer: Customer,
    /// Where to deliver.
    pub shipping_address: ShippingAddress,
    /// Requested lines.
    pub items: Vec<CheckoutLine>,
}

/// A single invalid field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    /// Dotted path of the field, e.g. `customer.email`.
    pub field: String,
    /// What is wrong with it.
    pub message: String,
}

impl FieldError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Field errors collected by [`CheckoutForm::validate`].
pub type FieldErrors = SmallVec<[FieldError; 4]>;

impl CheckoutForm {
    /// Variant ids requested, in submission order.
    pub fn variant_ids(&self) -> Vec<Uuid> {
        self.items.iter().map(|line| line.variant_id).collect()
    }

    /// Check every field, collecting all problems.
    ///
    /// # Errors
    ///
    /// Returns the list of invalid fields.
    pub fn validate(&self) -> Result<(), FieldErrors> {
        let mut errors = FieldErrors::new();

        let required = [
            ("customer.name", self.customer.name.as_str()),
            ("customer.email", self.customer.email.as_str()),
            ("shippingAddress.line1", self.shipping_address.line1.as_str()),
            ("shippingAddress.city", self.shipping_address.city.as_str()),
            (
                "shippingAddress.postalCode",
                self.shipping_address.postal_code.as_str(),
            ),
            ("shippingAddress.country", self.shipping_address.country.as_str()),
        ];

        errors.extend(
            required
                .into_iter()
                .filter(|(_, value)| value.trim().is_empty())
                .map(|(field, _)| FieldError::new(field, "is required")),
        );

        if !self.customer.email.trim().is_empty() && !is_plausible_email(&self.customer.email) {
            errors.push(FieldError::new("customer.email", "is not a valid email address"));
        }

        if self.items.is_empty() {
            errors.push(FieldError::new("items", "must contain at least one item"));
        }

        let mut seen = FxHashSet::default();

        for (index, line) in self.items.iter().enumerate() {
            if line.quantity == 0 {
                errors.push(FieldError::new(
                    format!("items.{index}.quantity"),
                    "must be at least 1",
                ));
            }

            if !seen.insert(line.variant_id) {
                errors.push(FieldError::new(
                    format!("items.{index}.variantId"),
                    "is listed more than once",
                ));
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn is_plausible_email(email: &str) -> bool {
    let email = email.trim();

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn form(items: Vec<CheckoutLine>) -> CheckoutForm {
        CheckoutForm {
            customer: Customer {
                name: "Ada Lovelace".to_string(),
                email: "ada@example.com".to_string(),
                phone: None,
            },
            shipping_address: ShippingAddress {
                line1: "Calle Mayor 1".to_string(),
                line2: None,
                city: "Madrid".to_string(),
                postal_code: "28013".to_string(),
                country: "ES".to_string(),
            },
            items,
        }
    }

    fn fields(errors: &FieldErrors) -> Vec<&str> {
        errors.iter().map(|error| error.field.as_str()).collect()
    }

    #[test]
    fn complete_form_is_valid() {
        let form = form(vec![CheckoutLine {
            variant_id: Uuid::now_v7(),
            quantity: 1,
        }]);

        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn blank_fields_are_required() {
        let mut form = form(vec![CheckoutLine {
            variant_id: Uuid::now_v7(),
            quantity: 1,
        }]);

        form.customer.name = "  ".to_string();
        form.shipping_address.city = String::new();

        let errors = form.validate().err().unwrap_or_default();

        assert_eq!(fields(&errors), vec!["customer.name", "shippingAddress.city"]);
    }

    #[test]
    fn malformed_email_is_rejected() {
        for email in ["ada", "ada@", "@example.com", "ada@example", "a da@example.com"] {
            let mut form = form(vec![CheckoutLine {
                variant_id: Uuid::now_v7(),
                quantity: 1,
            }]);

            form.customer.email = email.to_string();

            let errors = form.validate().err().unwrap_or_default();

            assert_eq!(fields(&errors), vec!["customer.email"], "email {email:?}");
        }
    }

    #[test]
    fn empty_items_are_rejected() {
        let errors = form(vec![]).validate().err().unwrap_or_default();

        assert_eq!(fields(&errors), vec!["items"]);
    }

    #[test]
    fn zero_quantity_and_duplicates_are_rejected() {
        let variant_id = Uuid::now_v7();

        let errors = form(vec![
            CheckoutLine {
                variant_id,
                quantity: 0,
            },
            CheckoutLine {
                variant_id,
                quantity: 1,
            },
        ])
        .validate()
        .err()
        .unwrap_or_default();

        assert_eq!(fields(&errors), vec!["items.0.quantity", "items.1.variantId"]);
    }
}
