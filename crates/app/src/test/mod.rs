//! Test support: an isolated Postgres database per test and record fixtures.

mod helpers;

pub(crate) use context::TestContext;
pub(crate) use helpers::*;
