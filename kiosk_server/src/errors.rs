use actix_web::{error::ResponseError, http::StatusCode, HttpResponse};
use kiosk_engine::traits::{KioskError, INSUFFICIENT_STOCK_MESSAGE};
use log::error;
use thiserror::Error;

use crate::data_objects::ApiResponse;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Could not initialize server. {0}")]
    InitializeError(String),
    #[error("An error occurred on the backend of the server. {0}")]
    BackendError(String),
    #[error("Could not read request body: {0}")]
    InvalidRequestBody(String),
    #[error("{0}")]
    ValidationError(String),
    #[error("{}", INSUFFICIENT_STOCK_MESSAGE)]
    InsufficientStock,
    #[error("The following product numbers are not in the catalog: {}", .0.join(", "))]
    UnresolvedProduct(Vec<String>),
    #[error("The data was not found. {0}")]
    NoRecordFound(String),
    #[error("An I/O error happened in the server. {0}")]
    IOError(#[from] std::io::Error),
    #[error("UnspecifiedError. {0}")]
    Unspecified(String),
}

impl ResponseError for ServerError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequestBody(_) => StatusCode::BAD_REQUEST,
            Self::ValidationError(_) => StatusCode::BAD_REQUEST,
            Self::InsufficientStock => StatusCode::BAD_REQUEST,
            Self::UnresolvedProduct(_) => StatusCode::BAD_REQUEST,
            Self::NoRecordFound(_) => StatusCode::NOT_FOUND,
            Self::InitializeError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BackendError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::IOError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Unspecified(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        if status.is_server_error() {
            error!("💻️ {self}");
        }
        HttpResponse::build(status).json(ApiResponse::<()>::error(status, self.to_string()))
    }
}

impl From<KioskError> for ServerError {
    fn from(e: KioskError) -> Self {
        match e {
            KioskError::InsufficientStock => Self::InsufficientStock,
            KioskError::UnresolvedProduct(numbers) => Self::UnresolvedProduct(numbers),
            KioskError::EmptyOrder |
            KioskError::InvalidQuantity(_) |
            KioskError::StockNotTracked(_) |
            KioskError::InvalidItemCount |
            KioskError::OutsideOpeningHours |
            KioskError::PriceOverflow => Self::ValidationError(e.to_string()),
            KioskError::ProductNotFound(_) | KioskError::OrderNotFound(_) => Self::NoRecordFound(e.to_string()),
            KioskError::DatabaseError(_) | KioskError::PersistenceConflict(_) | KioskError::InvalidProductNumber(_) => {
                Self::BackendError(e.to_string())
            },
        }
    }
}
