//! Database connection management

use std::{future::Future, time::Duration};

use sqlx::{PgPool, Postgres, Transaction};
use tracing::warn;

/// Attempts made by [`with_retry`] before giving up.
pub const MAX_ATTEMPTS: u32 = 3;

/// Delay before the first retry; doubled after every failed attempt.
pub const INITIAL_BACKOFF: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct Db {
    pool: PgPool,
}

impl Db {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Begin a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error when a connection cannot be acquired.
    pub async fn begin_transaction(&self) -> Result<Transaction<'static, Postgres>, sqlx::Error> {
        self.pool.begin().await
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Connect to `PostgreSQL`, retrying transient failures.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<PgPool, sqlx::Error> {
    with_retry("connect", || PgPool::connect(database_url)).await
}

/// Run `operation`, retrying up to [`MAX_ATTEMPTS`] times with exponential
/// backoff while it fails with a transient error.
///
/// Only use this for operations that are safe to repeat.
///
/// # Errors
///
/// Returns the last error once attempts are exhausted, or the first
/// non-transient error.
pub async fn with_retry<T, F, Fut>(operation_name: &str, mut operation: F) -> Result<T, sqlx::Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let mut delay = INITIAL_BACKOFF;
    let mut attempt = 1;

    loop {
        match operation().await {
            Err(error) if attempt < MAX_ATTEMPTS && is_transient(&error) => {
                warn!(
                    operation = operation_name,
                    attempt,
                    delay_ms = delay.as_millis(),
                    error = %error,
                    "transient database error, retrying"
                );

                tokio::time::sleep(delay).await;

                delay *= 2;
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Whether an error is worth retrying: I/O failures, pool exhaustion,
/// connection exceptions (SQLSTATE class `08`) and administrator shutdown.
#[must_use]
pub fn is_transient(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => true,
        sqlx::Error::Database(error) => error
            .code()
            .is_some_and(|code| code.starts_with("08") || code == "57P01"),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::{
        io,
        sync::{
            Arc,
            atomic::{AtomicU32, Ordering},
        },
    };

    use super::*;

    #[test]
    fn io_and_pool_timeouts_are_transient() {
        assert!(is_transient(&sqlx::Error::PoolTimedOut));
        assert!(is_transient(&sqlx::Error::Io(io::Error::from(
            io::ErrorKind::ConnectionReset
        ))));
    }

    #[test]
    fn missing_rows_are_not_transient() {
        assert!(!is_transient(&sqlx::Error::RowNotFound));
        assert!(!is_transient(&sqlx::Error::PoolClosed));
    }

    #[tokio::test(start_paused = true)]
    async fn retries_transient_errors_until_success() {
        let calls = Arc::new(AtomicU32::new(0));

        let result = with_retry("test", || {
            let calls = Arc::clone(&calls);

            async move {
                if calls.fetch_add(1, Ordering::SeqCst) == 0 {
                    Err(sqlx::Error::PoolTimedOut)
                } else {
                    Ok(7)
                }
            }
        })
        .await;

        assert!(matches!(result, Ok(7)));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() {
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), _> = with_retry("test", || {
            let calls = Arc::clone(&calls);

            async move {
                calls.fetch_add(1, Ordering::SeqCst);

                Err(sqlx::Error::PoolTimedOut)
            }
        })
        .await;

        assert!(matches!(result, Err(sqlx::Error::PoolTimedOut)));
        assert_eq!(calls.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }

    #[tokio::test(start_paused = true)]
    async fn does_not_retry_permanent_errors() {
        let calls = Arc::new(AtomicU32::new(0));

        let result: Result<(), _> = with_retry("test", || {
            let calls = Arc::clone(&calls);

            async move {
                calls.fetch_add(1, Ordering::SeqCst);

                Err(sqlx::Error::RowNotFound)
            }
        })
        .await;

        assert!(matches!(result, Err(sqlx::Error::RowNotFound)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
