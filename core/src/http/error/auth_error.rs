use actix_web::http::header::{HeaderValue, CONTENT_TYPE};
use actix_web::{error, http::StatusCode, HttpResponse, HttpResponseBuilder};
use derive_more::{Display, Error};
use serde::Serialize;

/// Content type of the rejection body.
pub const JSON_UTF8: &str = "application/json; charset=utf-8";

/// Body sent to callers that presented no valid API key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rejection {
    pub message: &'static str,
    pub status_code: u16,
}

impl Rejection {
    pub fn forbidden() -> Self {
        Rejection {
            message: "Invalid or missing API Key",
            status_code: StatusCode::FORBIDDEN.as_u16(),
        }
    }
}

#[derive(Debug, Display, Error)]
pub enum AuthError {
    #[display("Invalid or missing API Key")]
    InvalidApiKey,
}

impl error::ResponseError for AuthError {
    fn status_code(&self) -> StatusCode {
        match *self {
            AuthError::InvalidApiKey => StatusCode::FORBIDDEN,
        }
    }

    fn error_response(&self) -> HttpResponse {
        let mut builder = HttpResponseBuilder::new(self.status_code());
        builder.insert_header((CONTENT_TYPE, HeaderValue::from_static(JSON_UTF8)));

        match serde_json::to_string(&Rejection::forbidden()) {
            Ok(body) => builder.body(body),
            Err(e) => {
                log::error!("Error when sending response to an invalid key: {}", e);
                builder.finish()
            }
        }
    }
}
