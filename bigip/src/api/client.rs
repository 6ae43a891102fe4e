use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

use super::common::ApiErrorResponse;
use super::error::ApiError;
use super::ltm::{TrafficMatchingCriteria, UniversalPersistenceProfile};
use super::net::AddressList;
use super::BigIpApi;

const REQUEST_TIMEOUT_SECS: u64 = 30;

/// iControl REST client
#[derive(Clone)]
pub struct Client {
    inner: Arc<ClientInner>,
}

struct ClientInner {
    http_client: reqwest::Client,
    base_url: String,
    username: String,
    password: String,
}

impl Client {
    /// Create a new API client for a management endpoint such as
    /// `https://10.1.1.4:8443`
    pub fn new(
        endpoint: &str,
        username: &str,
        password: &str,
        insecure: bool,
    ) -> Result<Self, ApiError> {
        let endpoint = Url::parse(endpoint)?;

        let http_client = reqwest::Client::builder()
            .danger_accept_invalid_certs(insecure)
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            inner: Arc::new(ClientInner {
                http_client,
                base_url: endpoint.as_str().trim_end_matches('/').to_string(),
                username: username.to_string(),
                password: password.to_string(),
            }),
        })
    }

    /// Builds the management endpoint from a provider `address`, which may be a
    /// bare host or a full URL. `port` applies only when the address has none.
    pub fn endpoint(address: &str, port: u16) -> Result<Url, ApiError> {
        let address = address.trim().trim_end_matches('/');
        if address.is_empty() {
            return Err(ApiError::InvalidAddress("address is empty".to_string()));
        }

        let mut url = if address.contains("://") {
            Url::parse(address)?
        } else {
            Url::parse(&format!("https://{}", address))?
        };

        if url.port().is_none() {
            url.set_port(Some(port))
                .map_err(|_| ApiError::InvalidAddress(address.to_string()))?;
        }

        Ok(url)
    }

    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.inner.base_url, path)
    }

    /// Execute a GET request; a 404 answer means the object is absent
    pub async fn get_optional<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<Option<T>, ApiError> {
        let url = self.url(path);
        tracing::debug!("GET request to: {}", url);

        match self.send(self.inner.http_client.get(&url)).await {
            Ok(response) => {
                let text = response.text().await?;
                serde_json::from_str(&text).map(Some).map_err(|e| {
                    tracing::error!("Failed to deserialize response: {}, body: {}", e, text);
                    ApiError::ParseError(format!("Failed to parse response: {}", e))
                })
            }
            Err(e) if e.status() == Some(404) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Execute a POST request
    pub async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let url = self.url(path);
        tracing::debug!("POST request to: {}", url);

        self.send(self.inner.http_client.post(&url).json(body))
            .await
            .map(|_| ())
    }

    /// Execute a PUT request
    pub async fn put<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        let url = self.url(path);
        tracing::debug!("PUT request to: {}", url);

        self.send(self.inner.http_client.put(&url).json(body))
            .await
            .map(|_| ())
    }

    /// Execute a DELETE request
    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        tracing::debug!("DELETE request to: {}", url);

        self.send(self.inner.http_client.delete(&url))
            .await
            .map(|_| ())
    }

    /// Sends once; iControl requests are never retried
    async fn send(&self, request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .basic_auth(&self.inner.username, Some(&self.inner.password))
            .send()
            .await?;

        let status = response.status();
        tracing::debug!("Response status: {}", status);

        if status == StatusCode::UNAUTHORIZED {
            return Err(ApiError::AuthError);
        }

        if !status.is_success() {
            return Err(Self::error_from_response(response).await);
        }

        Ok(response)
    }

    async fn error_from_response(response: Response) -> ApiError {
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        let message = serde_json::from_str::<ApiErrorResponse>(&text)
            .ok()
            .and_then(|envelope| envelope.message)
            .unwrap_or(text);

        tracing::debug!("API error response (HTTP {}): {}", status, message);
        ApiError::ApiError { status, message }
    }
}

#[async_trait]
impl BigIpApi for Client {
    async fn create_universal_persistence_profile(
        &self,
        profile: &UniversalPersistenceProfile,
    ) -> Result<(), ApiError> {
        self.create_universal_persistence(profile).await
    }

    async fn get_universal_persistence_profile(
        &self,
        name: &str,
    ) -> Result<Option<UniversalPersistenceProfile>, ApiError> {
        self.get_universal_persistence(name).await
    }

    async fn modify_universal_persistence_profile(
        &self,
        name: &str,
        profile: &UniversalPersistenceProfile,
    ) -> Result<(), ApiError> {
        self.modify_universal_persistence(name, profile).await
    }

    async fn delete_universal_persistence_profile(&self, name: &str) -> Result<(), ApiError> {
        self.delete_universal_persistence(name).await
    }

    async fn create_traffic_matching_criteria(
        &self,
        criteria: &TrafficMatchingCriteria,
    ) -> Result<(), ApiError> {
        Client::create_traffic_matching_criteria(self, criteria).await
    }

    async fn get_traffic_matching_criteria(
        &self,
        name: &str,
    ) -> Result<Option<TrafficMatchingCriteria>, ApiError> {
        Client::get_traffic_matching_criteria(self, name).await
    }

    async fn modify_traffic_matching_criteria(
        &self,
        name: &str,
        criteria: &TrafficMatchingCriteria,
    ) -> Result<(), ApiError> {
        Client::modify_traffic_matching_criteria(self, name, criteria).await
    }

    async fn delete_traffic_matching_criteria(&self, name: &str) -> Result<(), ApiError> {
        Client::delete_traffic_matching_criteria(self, name).await
    }

    async fn create_address_list(&self, list: &AddressList) -> Result<(), ApiError> {
        Client::create_address_list(self, list).await
    }

    async fn get_address_list(&self, name: &str) -> Result<Option<AddressList>, ApiError> {
        Client::get_address_list(self, name).await
    }

    async fn modify_address_list(&self, name: &str, list: &AddressList) -> Result<(), ApiError> {
        Client::modify_address_list(self, name, list).await
    }

    async fn delete_address_list(&self, name: &str) -> Result<(), ApiError> {
        Client::delete_address_list(self, name).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_helpers::create_test_client;
    use mockito::Server;

    #[tokio::test]
    async fn client_sends_basic_auth() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/mgmt/tm/net/address-list/~Common~al1")
            .match_header("authorization", "Basic YWRtaW46c2VjcmV0")
            .with_body(r#"{"name":"al1"}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let list = client.get_address_list("/Common/al1").await.unwrap();

        assert!(list.is_some());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn client_handles_authentication_failure() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("DELETE", "/mgmt/tm/net/address-list/~Common~al1")
            .with_status(401)
            .with_body(r#"{"code":401,"message":"Authentication failed."}"#)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let result = client.delete_address_list("/Common/al1").await;

        match result {
            Err(ApiError::AuthError) => {}
            other => panic!("Expected AuthError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn client_reports_error_envelope_message() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/mgmt/tm/net/address-list")
            .with_status(409)
            .with_body(
                r#"{"code":409,"message":"01020066:3: The requested address list (/Common/al1) already exists in partition Common.","errorStack":[]}"#,
            )
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let result = client.create_address_list(&AddressList::default()).await;

        match result {
            Err(ApiError::ApiError { status, message }) => {
                assert_eq!(status, 409);
                assert!(message.contains("already exists"));
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn client_keeps_raw_body_when_no_envelope() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("PUT", "/mgmt/tm/net/address-list/~Common~al1")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        let result = client
            .modify_address_list("/Common/al1", &AddressList::default())
            .await;

        match result {
            Err(ApiError::ApiError { status, message }) => {
                assert_eq!(status, 500);
                assert_eq!(message, "upstream exploded");
            }
            other => panic!("Expected ApiError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn client_does_not_retry_server_errors() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/mgmt/tm/net/address-list/~Common~al1")
            .with_status(503)
            .expect(1)
            .create_async()
            .await;

        let client = create_test_client(&server.url());
        assert!(client.get_address_list("/Common/al1").await.is_err());
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn client_strips_trailing_slash_from_endpoint() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/mgmt/tm/net/address-list/~Common~al1")
            .with_body("{}")
            .create_async()
            .await;

        let client = create_test_client(&format!("{}/", server.url()));

        let _ = client.get_address_list("/Common/al1").await;
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn client_handles_network_errors() {
        let client = create_test_client("http://127.0.0.1:1");

        let result = client.get_address_list("/Common/al1").await;
        assert!(matches!(result, Err(ApiError::RequestError(_))));
    }

    #[test]
    fn endpoint_adds_scheme_and_port() {
        let url = Client::endpoint("10.1.1.4", 8443).unwrap();
        assert_eq!(url.as_str(), "https://10.1.1.4:8443/");

        let url = Client::endpoint("bigip.example.com", 443).unwrap();
        assert_eq!(url.as_str(), "https://bigip.example.com/");
    }

    #[test]
    fn endpoint_keeps_explicit_port() {
        let url = Client::endpoint("http://127.0.0.1:9000/", 443).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/");
    }

    #[test]
    fn endpoint_rejects_empty_address() {
        assert!(matches!(
            Client::endpoint("  ", 443),
            Err(ApiError::InvalidAddress(_))
        ));
    }

    #[test]
    fn client_rejects_invalid_endpoint() {
        assert!(matches!(
            Client::new("not a url", "admin", "secret", true),
            Err(ApiError::InvalidUrl(_))
        ));
    }
}
