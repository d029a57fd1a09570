use axum::{
    extract::{rejection::JsonRejection, FromRequest, Request},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::de::DeserializeOwned;

use crate::error::error_response;

/// JSON body extractor whose rejections use the registry's error body
///
/// Only `application/json` bodies are accepted, with or without parameters
/// such as charset.
pub struct FormJson<T>(pub T);

impl<T, S> FromRequest<S> for FormJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = FormJsonRejection;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        if let Some(content_type) = req.headers().get(header::CONTENT_TYPE) {
            let content_type_str = content_type
                .to_str()
                .map_err(|_| FormJsonRejection::InvalidContentType)?;

            // Drop parameters such as charset
            let media_type = content_type_str
                .split(';')
                .next()
                .unwrap_or("")
                .trim()
                .to_lowercase();

            if media_type != "application/json" {
                return Err(FormJsonRejection::InvalidContentType);
            }
        }

        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(FormJson(value)),
            Err(rejection) => Err(FormJsonRejection::JsonRejection(rejection)),
        }
    }
}

#[derive(Debug)]
pub enum FormJsonRejection {
    InvalidContentType,
    JsonRejection(JsonRejection),
}

impl IntoResponse for FormJsonRejection {
    fn into_response(self) -> Response {
        match self {
            FormJsonRejection::InvalidContentType => error_response(
                StatusCode::BAD_REQUEST,
                "invalidContentType",
                "Content-Type must be application/json",
            )
            .into_response(),
            FormJsonRejection::JsonRejection(rejection) => error_response(
                StatusCode::BAD_REQUEST,
                "invalidBody",
                &format!("Invalid JSON: {}", rejection.body_text()),
            )
            .into_response(),
        }
    }
}
