mod auth_error;

pub use auth_error::{AuthError, Rejection, JSON_UTF8};
