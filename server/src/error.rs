use axum::{http::StatusCode, response::IntoResponse, Json};
use derive_more::{Display, Error, From};
use log::{error, warn};
use serde_json::json;

use crate::{logic::RelationshipError, managers::RelationshipStoreError};

#[derive(Debug, Display, Error, From)]
pub enum ServerError {
    Relationship(RelationshipError),
}

impl ServerError {
    fn status(&self) -> StatusCode {
        match self {
            ServerError::Relationship(RelationshipError::UnknownAccount(_)) => {
                StatusCode::NOT_FOUND
            }
            ServerError::Relationship(RelationshipError::InvalidTransition(_)) => {
                StatusCode::CONFLICT
            }
            ServerError::Relationship(RelationshipError::StoreUnavailable(_)) => {
                StatusCode::SERVICE_UNAVAILABLE
            }
        }
    }

    fn code(&self) -> &'static str {
        match self {
            ServerError::Relationship(RelationshipError::UnknownAccount(_)) => "unknown_account",
            ServerError::Relationship(RelationshipError::InvalidTransition(rejection)) => {
                rejection.code()
            }
            ServerError::Relationship(RelationshipError::StoreUnavailable(_)) => {
                "store_unavailable"
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let status = self.status();
        if status.is_server_error() {
            error!("ServerError occurred: {}", self);
        } else {
            warn!("Request rejected: {}", self);
        }
        let body = Json(json!({
            "error": self.code(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

#[derive(Debug, Display, Error, From)]
pub enum CliError {
    #[from(skip)]
    #[display("Argument error: {_0}")]
    ArgumentError(#[error(not(source))] String),
    #[display("Could not parse address")]
    AddressParseError,
    #[display("Failed to start server")]
    FailedToStartServer,
    IoError(std::io::Error),
    ConfigError(serde_json::Error),
    StoreError(RelationshipStoreError),
}
