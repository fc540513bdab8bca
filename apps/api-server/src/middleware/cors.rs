//! Cross-origin policy.

use actix_cors::Cors;
use actix_web::http::{Method, header};

/// Any origin may call the API with the listed methods and headers.
///
/// PUT and DELETE are accepted here even though no route serves them.
pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .send_wildcard()
        .allowed_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allowed_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
}
