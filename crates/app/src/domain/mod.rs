//! Gallery Domain Concerns

pub mod cart_validation;
pub mod checkout;
pub mod orders;
pub mod settings;
pub mod variants;

mod columns;
