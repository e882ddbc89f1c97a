//! A module containing the [`RatingsError`] struct, which contains various basic error types.

use deadpool_redis::PoolError;
use sea_orm::TransactionError;

/// Represents any type of error that could happen when using this crate.
#[derive(thiserror::Error, Debug)]
#[rustfmt::skip]
pub enum RatingsError {
    // --------
    // --- Internal server errors
    // --------

    /// An error that happened when interacting with the SQL database.
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
    /// An error that happened when interacting with the Redis database.
    #[error(transparent)]
    Redis(#[from] deadpool_redis::redis::RedisError),
    /// An error that happened when using the Redis pool.
    #[error(transparent)]
    Pool(#[from] PoolError),

    // --------
    // --- Logical errors
    // --------

    /// The submitted score is outside the accepted range.
    #[error("score must be between 1 and 5, got {0}")]
    InvalidScore(
        /// The submitted score.
        u8,
    ),
    /// The user with the provided login was not found.
    #[error("user `{0}` not found in database")]
    UserNotFound(
        /// The user login.
        String,
    ),
    /// The professor with the provided ID was not found.
    #[error("professor `{0}` not found in database")]
    ProfessorNotFound(
        /// The professor ID.
        String,
    ),
    /// The module with the provided code was not found.
    #[error("module `{0}` not found in database")]
    ModuleNotFound(
        /// The module code.
        String,
    ),
    /// No instance of the module exists for the provided year and semester.
    #[error("module `{0}` has no instance in year {1} semester {2}")]
    ModuleInstanceNotFound(
        /// The module code.
        String,
        /// The year.
        i32,
        /// The semester.
        u8,
    ),
    /// A professor already exists with the provided ID.
    #[error("professor `{0}` already exists")]
    ProfessorAlreadyExists(
        /// The professor ID.
        String,
    ),
    /// A module already exists with the provided code.
    #[error("module `{0}` already exists")]
    ModuleAlreadyExists(
        /// The module code.
        String,
    ),
    /// An instance of the module already exists for the provided year and semester.
    #[error("module `{0}` already has an instance in year {1} semester {2}")]
    ModuleInstanceAlreadyExists(
        /// The module code.
        String,
        /// The year.
        i32,
        /// The semester.
        u8,
    ),
    /// A user already exists with the provided login.
    #[error("username `{0}` already exists")]
    UsernameAlreadyExists(
        /// The user login.
        String,
    ),
}

impl AsRef<RatingsError> for RatingsError {
    fn as_ref(&self) -> &RatingsError {
        self
    }
}

impl<E> From<TransactionError<E>> for RatingsError
where
    RatingsError: From<E>,
{
    fn from(value: TransactionError<E>) -> Self {
        match value {
            TransactionError::Connection(db_err) => From::from(db_err),
            TransactionError::Transaction(e) => From::from(e),
        }
    }
}

/// Represents the result of a computation that could return a [`RatingsError`].
pub type RatingsResult<T = ()> = Result<T, RatingsError>;
