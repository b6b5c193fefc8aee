//! Reqwest-backed HTTP transport.
//!
//! This adapter owns transport details only: method and header mapping,
//! body transfer, and classifying reqwest failures. Status handling and JSON
//! decoding stay in the access layer.

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Method};

use crate::domain::ports::{ApiRequest, ApiResponse, HttpMethod, HttpTransport, TransportError};

/// Transport performing real HTTP exchanges through a shared reqwest client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Build a transport with reqwest's default client settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new() -> Result<Self, reqwest::Error> {
        Ok(Self::with_client(Client::builder().build()?))
    }

    /// Wrap a preconfigured client.
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
        let ApiRequest {
            method,
            url,
            headers,
            body,
        } = request;
        let mut builder = self.client.request(map_method(method), url.as_str());
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(payload) = body {
            builder = builder.body(payload);
        }

        let response = builder.send().await.map_err(map_send_error)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = response
            .bytes()
            .await
            .map_err(|error| TransportError::body(error.to_string()))?;

        Ok(ApiResponse {
            status,
            content_type,
            body: bytes.to_vec(),
        })
    }
}

fn map_method(method: HttpMethod) -> Method {
    match method {
        HttpMethod::Get => Method::GET,
        HttpMethod::Post => Method::POST,
        HttpMethod::Put => Method::PUT,
        HttpMethod::Delete => Method::DELETE,
    }
}

fn map_send_error(error: reqwest::Error) -> TransportError {
    if error.is_builder() {
        TransportError::invalid_request(error.to_string())
    } else {
        TransportError::unreachable(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for non-network mapping helpers.
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(HttpMethod::Get, Method::GET)]
    #[case(HttpMethod::Post, Method::POST)]
    #[case(HttpMethod::Put, Method::PUT)]
    #[case(HttpMethod::Delete, Method::DELETE)]
    fn methods_map_to_reqwest(#[case] method: HttpMethod, #[case] expected: Method) {
        assert_eq!(map_method(method), expected);
    }

    #[tokio::test]
    async fn malformed_urls_are_invalid_requests() {
        let transport = ReqwestTransport::new().expect("client builds");
        let err = transport
            .send(ApiRequest {
                method: HttpMethod::Get,
                url: "not a url".to_owned(),
                headers: Vec::new(),
                body: None,
            })
            .await
            .expect_err("malformed URL must fail");
        assert!(matches!(err, TransportError::InvalidRequest { .. }));
    }
}
