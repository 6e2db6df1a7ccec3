//! Column conversions shared by the repositories.
//!
//! Amounts are stored as `BIGINT` minor units and quantities as `INTEGER`;
//! both are unsigned on the Rust side.

use std::{error::Error as StdError, str::FromStr};

use sqlx::{Row, postgres::PgRow};

fn decode_error(column: &str, source: impl StdError + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: column.to_string(),
        source: Box::new(source),
    }
}

pub(crate) fn amount(row: &PgRow, column: &str) -> sqlx::Result<u64> {
    let value: i64 = row.try_get(column)?;

    u64::try_from(value).map_err(|error| decode_error(column, error))
}

pub(crate) fn count(row: &PgRow, column: &str) -> sqlx::Result<u32> {
    let value: i32 = row.try_get(column)?;

    u32::try_from(value).map_err(|error| decode_error(column, error))
}

pub(crate) fn parsed<T>(row: &PgRow, column: &str) -> sqlx::Result<T>
where
    T: FromStr,
    T::Err: StdError + Send + Sync + 'static,
{
    let value: String = row.try_get(column)?;

    value.parse().map_err(|error| decode_error(column, error))
}

pub(crate) fn bind_amount(value: u64, column: &str) -> sqlx::Result<i64> {
    i64::try_from(value).map_err(|error| decode_error(column, error))
}

pub(crate) fn bind_count(value: u32, column: &str) -> sqlx::Result<i32> {
    i32::try_from(value).map_err(|error| decode_error(column, error))
}
