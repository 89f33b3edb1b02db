//! Operations behind the HTTP routes. Every function takes the pool
//! explicitly; nothing here holds state between calls.

pub mod categories;
pub mod questions;
pub mod quiz;

use std::fmt;

#[derive(Debug)]
pub enum ServiceError {
    NotFound,
    Unprocessable(String),
    Storage(sqlx::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ServiceError::NotFound => write!(f, "resource not found"),
            ServiceError::Unprocessable(reason) => write!(f, "unprocessable: {reason}"),
            ServiceError::Storage(err) => write!(f, "storage error: {err}"),
        }
    }
}

impl std::error::Error for ServiceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ServiceError::Storage(err) => Some(err),
            _ => None,
        }
    }
}

impl From<sqlx::Error> for ServiceError {
    fn from(error: sqlx::Error) -> ServiceError {
        match error {
            sqlx::Error::RowNotFound => ServiceError::NotFound,
            error => ServiceError::Storage(error),
        }
    }
}
