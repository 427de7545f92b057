use crate::Error;
use std::borrow::Cow;

/// The caller violated a structural precondition of an operation. Always
/// raised before any statement is prepared.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{0}")]
pub struct PreconditionError(pub Cow<'static, str>);

impl PreconditionError {
    pub fn new(message: impl Into<Cow<'static, str>>) -> Self {
        Self(message.into())
    }
}

/// Structured failure reported by the database server. Drivers attach it to
/// their errors so that an [`ErrorChecker`] can classify by server code.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Server error {code} ({state}): {message}")]
pub struct ServerError {
    pub code: u16,
    pub state: String,
    pub message: String,
}

/// Domain level classification of driver errors.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DbError {
    #[error("Duplicate key: {0}")]
    DuplicateKey(String),
    #[error("Foreign key constraint violated: {0}")]
    ForeignKey(String),
    #[error("Column cannot be null: {0}")]
    NotNull(String),
    #[error("Deadlock detected: {0}")]
    Deadlock(String),
    #[error("Lock wait timeout exceeded: {0}")]
    LockTimeout(String),
}

/// Translates low level driver errors into domain errors. It is consulted
/// only on failure paths.
pub trait ErrorChecker: Send + Sync {
    fn check(&self, error: Error) -> Error;
}

impl<F> ErrorChecker for F
where
    F: Fn(Error) -> Error + Send + Sync,
{
    fn check(&self, error: Error) -> Error {
        self(error)
    }
}

/// Optional error checker accepted by every CRUD operation.
pub type Checker<'a> = Option<&'a dyn ErrorChecker>;

/// Passes `error` through the checker when there is one.
pub fn check_error(checker: Checker<'_>, error: Error) -> Error {
    match checker {
        Some(checker) => checker.check(error),
        None => error,
    }
}

/// Classifies MySQL server error codes into [`DbError`]. The original error is
/// kept in the chain, unknown codes pass through untouched.
#[derive(Default, Clone, Copy, Debug)]
pub struct MySQLErrorChecker;

impl ErrorChecker for MySQLErrorChecker {
    fn check(&self, error: Error) -> Error {
        let server = error
            .chain()
            .find_map(|e| e.downcast_ref::<ServerError>())
            .cloned();
        let Some(ServerError { code, message, .. }) = server else {
            return error;
        };
        let kind = match code {
            1062 => DbError::DuplicateKey(message),
            1451 | 1452 => DbError::ForeignKey(message),
            1048 => DbError::NotNull(message),
            1213 => DbError::Deadlock(message),
            1205 => DbError::LockTimeout(message),
            _ => return error,
        };
        error.context(kind)
    }
}
