//! Stateless HTTP request builder and response parser for the ApiCEP CDN.
//!
//! # Design
//! `CepClient` holds only a `base_url` and carries no mutable state between
//! calls. A lookup is split into `build_lookup`, which produces an
//! `HttpRequest`, and `parse_lookup`, which consumes an `HttpResponse`. The
//! caller executes the actual HTTP round-trip in between.

use tracing::debug;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Address, Envelope};

/// Where the public ApiCEP CDN serves its per-CEP JSON files.
pub const DEFAULT_BASE_URL: &str = "https://cdn.apicep.com/file/apicep";

/// Synchronous, stateless client for the ApiCEP CDN.
#[derive(Debug, Clone)]
pub struct CepClient {
    base_url: String,
}

impl Default for CepClient {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

impl CepClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build the GET for `{base_url}/{cep}.json`. The CEP is interpolated
    /// exactly as typed.
    pub fn build_lookup(&self, cep: &str) -> HttpRequest {
        let path = format!("{}/{cep}.json", self.base_url);
        debug!(%path, "built lookup request");
        HttpRequest {
            method: HttpMethod::Get,
            path,
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    pub fn parse_lookup(&self, response: HttpResponse) -> Result<Address, ApiError> {
        check_status(&response)?;

        let body: serde_json::Value = serde_json::from_str(&response.body)
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        if !body.is_object() {
            return Err(ApiError::Deserialization(format!(
                "expected a JSON object, got {body}"
            )));
        }

        let envelope: Envelope = serde_json::from_value(body.clone())
            .map_err(|e| ApiError::Deserialization(e.to_string()))?;
        if !envelope.is_found() {
            return Err(ApiError::NotFound {
                status: envelope.status_number(),
            });
        }

        serde_json::from_value(body).map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

/// Any 2xx is a transport-level success; the body decides the rest.
fn check_status(response: &HttpResponse) -> Result<(), ApiError> {
    if (200..300).contains(&response.status) {
        return Ok(());
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const SE_BODY: &str = r#"{"status":200,"ok":true,"code":"01001-000","state":"SP","city":"São Paulo","district":"Sé","address":"Praça da Sé - lado ímpar","statusText":"ok"}"#;

    fn client() -> CepClient {
        CepClient::new("http://localhost:3000/file/apicep")
    }

    #[test]
    fn build_lookup_produces_correct_request() {
        let req = client().build_lookup("01001000");
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/file/apicep/01001000.json");
        assert!(req.body.is_none());
        assert_eq!(
            req.headers,
            vec![("accept".to_string(), "application/json".to_string())]
        );
    }

    #[test]
    fn build_lookup_passes_input_through_unvalidated() {
        let req = client().build_lookup("");
        assert_eq!(req.path, "http://localhost:3000/file/apicep/.json");
        let req = client().build_lookup("abc");
        assert_eq!(req.path, "http://localhost:3000/file/apicep/abc.json");
    }

    #[test]
    fn default_client_targets_apicep_cdn() {
        let req = CepClient::default().build_lookup("01001000");
        assert_eq!(req.path, "https://cdn.apicep.com/file/apicep/01001000.json");
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = CepClient::new("http://localhost:3000/file/apicep/");
        assert_eq!(client.base_url(), "http://localhost:3000/file/apicep");
    }

    #[test]
    fn parse_lookup_success() {
        let addr = client().parse_lookup(HttpResponse::new(200, SE_BODY)).unwrap();
        assert_eq!(addr.code, "01001-000");
        assert_eq!(addr.address, "Praça da Sé - lado ímpar");
        assert_eq!(addr.district, "Sé");
        assert_eq!(addr.city, "São Paulo");
        assert_eq!(addr.state, "SP");
    }

    #[test]
    fn parse_lookup_null_fields_still_resolve() {
        let resp = HttpResponse::new(
            200,
            r#"{"status":200,"ok":true,"code":"69945-000","address":null,"district":null,"city":"Acrelândia","state":"AC"}"#,
        );
        let addr = client().parse_lookup(resp).unwrap();
        assert_eq!(addr.code, "69945-000");
        assert_eq!(addr.address, "");
        assert_eq!(addr.district, "");
        assert_eq!(addr.state, "AC");
    }

    #[test]
    fn parse_lookup_body_status_404_is_not_found() {
        let resp = HttpResponse::new(200, r#"{"status":404,"ok":false,"message":"CEP não encontrado"}"#);
        let err = client().parse_lookup(resp).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { status: Some(s) } if s == 404.0));
    }

    #[test]
    fn parse_lookup_ok_false_is_not_found_even_with_status_200() {
        let resp = HttpResponse::new(200, r#"{"status":200,"ok":false}"#);
        let err = client().parse_lookup(resp).unwrap_err();
        assert!(matches!(err, ApiError::NotFound { .. }));
    }

    #[test]
    fn parse_lookup_transport_404_is_http_error() {
        let resp = HttpResponse::new(404, "Not Found");
        let err = client().parse_lookup(resp).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 404, .. }));
    }

    #[test]
    fn parse_lookup_server_error() {
        let resp = HttpResponse::new(500, "internal error");
        let err = client().parse_lookup(resp).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_lookup_bad_json() {
        let err = client().parse_lookup(HttpResponse::new(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }

    #[test]
    fn parse_lookup_non_object_json() {
        let err = client().parse_lookup(HttpResponse::new(200, "[1,2]")).unwrap_err();
        assert!(matches!(err, ApiError::Deserialization(_)));
    }
}
