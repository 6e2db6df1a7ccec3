//! Gallery prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{
        CartAction, CartItem, CartState, CartStorage, FileStorage, MemoryStorage, PersistedCart,
        STORAGE_KEY, StorageError,
    },
    checkout::{CheckoutForm, CheckoutLine, Customer, FieldError, FieldErrors, ShippingAddress},
    money::{AmountError, CURRENCY, format_amount, parse_amount, to_money},
    orders::{OrderLine, OrderStatus, StockAdjustment, UnknownStatus, VariantStatus},
    payments::{CaptureStatus, PaymentEvent, WebhookEvent},
    totals::{OrderTotals, ShippingSettings, calculate_order_total, tax_for},
    validation::{CartIssue, CartIssueKind, CartValidation, VariantSnapshot, validate_cart},
};
