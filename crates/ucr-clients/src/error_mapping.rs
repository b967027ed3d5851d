//! Shared HTTP/XML → `TypedError` mapping helpers. Detection is always by
//! structured signal (status code, transport error kind) — never by
//! matching on message substrings.

use ucr_schemas::{ErrorKind, TypedError, UpstreamSource};

/// Map a `reqwest::Error` that occurred before a response was received
/// (connect failure, timeout, decode failure) to a `TypedError`.
pub fn map_transport_error(source: UpstreamSource, err: &reqwest::Error) -> TypedError {
    let kind = if err.is_timeout() {
        ErrorKind::Timeout
    } else if err.is_connect() || err.is_request() {
        ErrorKind::Network
    } else if err.is_decode() {
        ErrorKind::MalformedResponse
    } else {
        ErrorKind::Network
    };
    TypedError::new(source, kind, err.to_string()).with_cause(err.to_string())
}

/// Map an HTTP status code from a CEIDG response to an `ErrorKind`, per
/// spec.md §4.1: `404 ⇒ NotFound`, `401 ⇒ Unauthorized`, `429 ⇒ RateLimited`,
/// `5xx ⇒ ServerError`.
pub fn map_ceidg_status(status: reqwest::StatusCode) -> ErrorKind {
    match status.as_u16() {
        404 => ErrorKind::NotFound,
        401 => ErrorKind::Unauthorized,
        429 => ErrorKind::RateLimited,
        s if (500..600).contains(&s) => ErrorKind::ServerError,
        _ => ErrorKind::Other,
    }
}

/// Map an HTTP status code from a KRS response to an `ErrorKind`, per
/// spec.md §4.1: `404 ⇒ NotFound`, `5xx ⇒ ServerError`, every other 4xx ⇒
/// `Other` — unlike CEIDG, KRS has no distinct `Unauthorized`/`RateLimited`
/// contract.
pub fn map_krs_status(status: reqwest::StatusCode) -> ErrorKind {
    match status.as_u16() {
        404 => ErrorKind::NotFound,
        s if (500..600).contains(&s) => ErrorKind::ServerError,
        _ => ErrorKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ceidg_status_mapping_covers_spec_table() {
        assert_eq!(
            map_ceidg_status(reqwest::StatusCode::NOT_FOUND),
            ErrorKind::NotFound
        );
        assert_eq!(
            map_ceidg_status(reqwest::StatusCode::UNAUTHORIZED),
            ErrorKind::Unauthorized
        );
        assert_eq!(
            map_ceidg_status(reqwest::StatusCode::TOO_MANY_REQUESTS),
            ErrorKind::RateLimited
        );
        assert_eq!(
            map_ceidg_status(reqwest::StatusCode::BAD_GATEWAY),
            ErrorKind::ServerError
        );
        assert_eq!(
            map_ceidg_status(reqwest::StatusCode::BAD_REQUEST),
            ErrorKind::Other
        );
    }

    #[test]
    fn krs_status_mapping_treats_401_and_429_as_other() {
        assert_eq!(map_krs_status(reqwest::StatusCode::NOT_FOUND), ErrorKind::NotFound);
        assert_eq!(map_krs_status(reqwest::StatusCode::BAD_GATEWAY), ErrorKind::ServerError);
        assert_eq!(map_krs_status(reqwest::StatusCode::UNAUTHORIZED), ErrorKind::Other);
        assert_eq!(map_krs_status(reqwest::StatusCode::TOO_MANY_REQUESTS), ErrorKind::Other);
        assert_eq!(map_krs_status(reqwest::StatusCode::BAD_REQUEST), ErrorKind::Other);
    }
}
