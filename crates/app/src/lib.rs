//! Persistence, payment and checkout services for the gallery storefront.

pub mod context;
pub mod database;
pub mod domain;
pub mod mailer;
pub mod paypal;

#[cfg(test)]
mod test;

mod uuids;
