//! Custom request extractors
//!
//! Wraps axum's JSON extraction so every body problem comes back as the
//! same 400 envelope the rest of the error surface uses, instead of
//! axum's default 415/422 responses.

use axum::extract::{rejection::JsonRejection, FromRequest, Request};
use axum::Json;

use crate::error::ServerError;

/// JSON body extractor that rejects with [`ServerError::InvalidRequest`]
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    T: serde::de::DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ServerError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(Self(value)),
            Err(rejection) => {
                let message = match rejection {
                    JsonRejection::JsonDataError(err) => {
                        format!("Invalid request body: {}", err)
                    }
                    JsonRejection::JsonSyntaxError(err) => {
                        format!("Malformed JSON: {}", err)
                    }
                    JsonRejection::MissingJsonContentType(_) => {
                        "Missing 'Content-Type: application/json' header".to_string()
                    }
                    other => format!("Failed to read JSON body: {}", other),
                };
                Err(ServerError::InvalidRequest(message))
            }
        }
    }
}
