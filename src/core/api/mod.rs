//! Core API client - the bot's only path to marketplace state.
//!
//! Every call issues exactly one HTTP request and classifies the reply into an
//! [`ApiOutcome`]. `Err` is reserved for transport failures (the Core API could not
//! be reached) and for success replies whose body is unusable. There are no retries;
//! callers render one message per outcome.

/// Request and response contracts
pub mod models;

pub use models::{
    ApiOutcome, CheckoutRequest, CreateDropRequest, Drop, DropType, FulfillmentReceipt,
    LiveRequest, OnboardRequest, Product, ProductId, ShipRequest, UrlResponse,
};

use crate::{
    config::settings::CoreApiConfig,
    errors::{Error, Result},
};
use models::ErrorBody;
use reqwest::{Method, StatusCode, Url};
use serde::{Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Header carrying the shared secret for internal routes.
pub const INTERNAL_KEY_HEADER: &str = "X-Internal-Key";

/// Which statuses an endpoint counts as success.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Accept {
    /// Any 2xx
    AnySuccess,
    /// Exactly 200; other 2xx statuses are `Unexpected`
    OkOnly,
}

impl Accept {
    fn accepts(self, status: StatusCode) -> bool {
        match self {
            Self::AnySuccess => status.is_success(),
            Self::OkOnly => status == StatusCode::OK,
        }
    }
}

/// Shared HTTP session to the Core API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CoreApiClient {
    http: reqwest::Client,
    base_url: Url,
    internal_key: Option<String>,
    timeout: Duration,
}

impl CoreApiClient {
    /// Builds a client from configuration.
    pub fn new(config: &CoreApiConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim()).map_err(|e| Error::Config {
            message: format!("core_api.base_url {:?} is not a URL: {e}", config.base_url),
        })?;
        if base_url.cannot_be_a_base() {
            return Err(Error::Config {
                message: format!("core_api.base_url {:?} cannot be a base URL", config.base_url),
            });
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("c500-bot/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            internal_key: config.internal_key.clone(),
            timeout: Duration::from_secs(config.timeout_secs),
        })
    }

    /// Joins path segments onto the base URL. Each segment is percent-encoded,
    /// so ids containing `/` or `?` stay inside their segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        {
            let mut path = url.path_segments_mut().map_err(|()| Error::Config {
                message: format!("cannot append a path to {}", self.base_url),
            })?;
            path.pop_if_empty().extend(segments);
        }
        Ok(url)
    }

    /// Asks the Core API for a Stripe Express onboarding link.
    #[instrument(skip(self))]
    pub async fn stripe_onboarding_link(&self, discord_id: &str) -> Result<ApiOutcome<String>> {
        let url = self.endpoint(&["api", "internal", "seller", "onboard"])?;
        let body = OnboardRequest {
            discord_id: discord_id.to_string(),
        };
        let outcome: ApiOutcome<UrlResponse> = self
            .send(Method::POST, url, Some(&body), Accept::AnySuccess)
            .await?;
        require_url(outcome, "onboarding")
    }

    /// Submits a drop collected from the drop modal.
    #[instrument(skip(self, request), fields(title = %request.title))]
    pub async fn submit_drop(&self, request: &CreateDropRequest) -> Result<ApiOutcome<Drop>> {
        let url = self.endpoint(&["api", "internal", "drops", "create"])?;
        self.send(Method::POST, url, Some(request), Accept::AnySuccess)
            .await
    }

    /// Marks a ready-to-ship order as shipped.
    #[instrument(skip(self, request))]
    pub async fn fulfill_ship(
        &self,
        order_id: &str,
        request: &ShipRequest,
    ) -> Result<ApiOutcome<Option<FulfillmentReceipt>>> {
        let url = self.endpoint(&["api", "v1", "orders", order_id, "fulfill", "ship"])?;
        self.send_fulfillment(url, request).await
    }

    /// Marks a commission order as completed on stream.
    #[instrument(skip(self, request))]
    pub async fn fulfill_live(
        &self,
        order_id: &str,
        request: &LiveRequest,
    ) -> Result<ApiOutcome<Option<FulfillmentReceipt>>> {
        let url = self.endpoint(&["api", "v1", "orders", order_id, "fulfill", "live"])?;
        self.send_fulfillment(url, request).await
    }

    /// Creates a Stripe checkout session for a drop and returns its URL.
    #[instrument(skip(self, request), fields(drop_id = %request.drop_id))]
    pub async fn create_checkout_session(
        &self,
        request: &CheckoutRequest,
    ) -> Result<ApiOutcome<String>> {
        let url = self.endpoint(&["api", "v1", "checkout", "session"])?;
        let outcome: ApiOutcome<UrlResponse> = self
            .send(Method::POST, url, Some(request), Accept::OkOnly)
            .await?;
        require_url(outcome, "checkout")
    }

    /// Lists the active products.
    pub async fn list_products(&self) -> Result<ApiOutcome<Vec<Product>>> {
        let url = self.endpoint(&["api", "products"])?;
        self.send::<(), _>(Method::GET, url, None, Accept::AnySuccess)
            .await
    }

    /// True when `/healthz` answers with a 2xx status.
    pub async fn health(&self) -> Result<bool> {
        let url = self.endpoint(&["healthz"])?;
        let response = self.request(Method::GET, url).send().await?;
        Ok(response.status().is_success())
    }

    fn request(&self, method: Method, url: Url) -> reqwest::RequestBuilder {
        let mut builder = self.http.request(method, url).timeout(self.timeout);
        if let Some(key) = &self.internal_key {
            builder = builder.header(INTERNAL_KEY_HEADER, key);
        }
        builder
    }

    /// Sends a request and decodes a success body as JSON. An empty body reads as `null`.
    async fn send<B, T>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        accept: Accept,
    ) -> Result<ApiOutcome<T>>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.send_with(method, url, body, accept, |status, bytes| {
            let payload: &[u8] = if bytes.is_empty() { b"null" } else { bytes };
            serde_json::from_slice(payload).map_err(|e| Error::MalformedResponse {
                message: format!("status {status}: {e}"),
            })
        })
        .await
    }

    /// Fulfillment replies only matter by status. The body is a best-effort receipt.
    async fn send_fulfillment<B>(
        &self,
        url: Url,
        request: &B,
    ) -> Result<ApiOutcome<Option<FulfillmentReceipt>>>
    where
        B: Serialize + ?Sized,
    {
        self.send_with(Method::POST, url, Some(request), Accept::OkOnly, |_, bytes| {
            Ok(serde_json::from_slice(bytes).ok())
        })
        .await
    }

    async fn send_with<B, T, F>(
        &self,
        method: Method,
        url: Url,
        body: Option<&B>,
        accept: Accept,
        decode: F,
    ) -> Result<ApiOutcome<T>>
    where
        B: Serialize + ?Sized,
        F: FnOnce(StatusCode, &[u8]) -> Result<T>,
    {
        debug!(%method, %url, "Calling Core API");
        let mut builder = self.request(method, url);
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;

        if accept.accepts(status) {
            return decode(status, &bytes).map(ApiOutcome::Success);
        }

        let error = serde_json::from_slice::<ErrorBody>(&bytes)
            .ok()
            .and_then(|body| body.error);
        if status.is_server_error() {
            warn!(%status, error = ?error, "Core API returned a server error");
        } else if status.is_success() {
            warn!(%status, "Core API returned a success status this endpoint does not expect");
        }
        Ok(ApiOutcome::from_error_status(status.as_u16(), error))
    }
}

fn require_url(outcome: ApiOutcome<UrlResponse>, what: &str) -> Result<ApiOutcome<String>> {
    match outcome {
        ApiOutcome::Success(UrlResponse { url: Some(url) }) if !url.trim().is_empty() => {
            Ok(ApiOutcome::Success(url))
        }
        ApiOutcome::Success(_) => Err(Error::MalformedResponse {
            message: format!("{what} response missing url"),
        }),
        other => Ok(other.map(|_| String::new())),
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;
    use httpmock::prelude::*;
    use serde_json::json;

    fn client_for(server: &MockServer) -> CoreApiClient {
        CoreApiClient::new(&CoreApiConfig {
            base_url: server.base_url(),
            internal_key: Some("s3cret".to_string()),
            timeout_secs: 5,
        })
        .unwrap()
    }

    fn ship_request() -> ShipRequest {
        ShipRequest {
            tracking_number: "1Z999".to_string(),
            carrier: "UPS".to_string(),
            seller_discord_id: "42".to_string(),
        }
    }

    #[test]
    fn test_endpoint_encodes_segments() {
        let client = CoreApiClient::new(&CoreApiConfig {
            base_url: "http://localhost:8080/".to_string(),
            ..CoreApiConfig::default()
        })
        .unwrap();

        let url = client
            .endpoint(&["api", "v1", "orders", "ord/1 x", "fulfill", "ship"])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "http://localhost:8080/api/v1/orders/ord%2F1%20x/fulfill/ship"
        );
    }

    #[test]
    fn test_endpoint_keeps_base_path_prefix() {
        let client = CoreApiClient::new(&CoreApiConfig {
            base_url: "https://core.example/prefix".to_string(),
            ..CoreApiConfig::default()
        })
        .unwrap();
        let url = client.endpoint(&["api", "products"]).unwrap();
        assert_eq!(url.as_str(), "https://core.example/prefix/api/products");
    }

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let result = CoreApiClient::new(&CoreApiConfig {
            base_url: "not a url".to_string(),
            ..CoreApiConfig::default()
        });
        assert!(matches!(result, Err(Error::Config { .. })));
    }

    #[tokio::test]
    async fn test_onboarding_link_success() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/internal/seller/onboard")
                .header(INTERNAL_KEY_HEADER, "s3cret")
                .json_body(json!({"discord_id": "42"}));
            then.status(200)
                .json_body(json!({"url": "https://connect.stripe.com/setup/abc"}));
        });

        let outcome = client_for(&server)
            .stripe_onboarding_link("42")
            .await
            .unwrap();

        mock.assert();
        assert_eq!(
            outcome,
            ApiOutcome::Success("https://connect.stripe.com/setup/abc".to_string())
        );
    }

    #[tokio::test]
    async fn test_onboarding_link_missing_url_is_malformed() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/internal/seller/onboard");
            then.status(200).json_body(json!({}));
        });

        let result = client_for(&server).stripe_onboarding_link("42").await;
        assert!(matches!(result, Err(Error::MalformedResponse { .. })));
    }

    #[tokio::test]
    async fn test_submit_drop_accepts_created() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST).path("/api/internal/drops/create").json_body(json!({
                "seller_discord_id": "42",
                "title": "Snowy TKL",
                "price": 450.0,
                "type": "ready_to_ship"
            }));
            then.status(201).json_body(json!({
                "id": "drop_9",
                "seller_discord_id": "42",
                "title": "Snowy TKL",
                "price": 450.0,
                "type": "ready_to_ship",
                "status": "available"
            }));
        });

        let request = CreateDropRequest {
            seller_discord_id: "42".to_string(),
            title: "Snowy TKL".to_string(),
            price: 450.0,
            description: None,
            image_url: None,
            drop_type: DropType::ReadyToShip,
        };
        let outcome = client_for(&server).submit_drop(&request).await.unwrap();

        mock.assert();
        let ApiOutcome::Success(drop) = outcome else {
            panic!("expected success, got {outcome:?}");
        };
        assert_eq!(drop.id, "drop_9");
        assert_eq!(drop.status, "available");
    }

    #[tokio::test]
    async fn test_fulfill_ship_statuses() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/orders/ord_ok/fulfill/ship");
            then.status(200)
                .json_body(json!({"status": "success", "message": "Order fulfilled and funds released."}));
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/orders/ord_missing/fulfill/ship");
            then.status(404).json_body(json!({"error": "Order not found"}));
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/orders/ord_done/fulfill/ship");
            then.status(400)
                .json_body(json!({"error": "Order is already fulfilled"}));
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/orders/ord_boom/fulfill/ship");
            then.status(500).body("upstream exploded");
        });

        let client = client_for(&server);
        let request = ship_request();

        let ok = client.fulfill_ship("ord_ok", &request).await.unwrap();
        assert!(matches!(ok, ApiOutcome::Success(Some(FulfillmentReceipt { status: Some(s), .. })) if s == "success"));

        let missing = client.fulfill_ship("ord_missing", &request).await.unwrap();
        assert_eq!(missing, ApiOutcome::NotFound(Some("Order not found".to_string())));

        let done = client.fulfill_ship("ord_done", &request).await.unwrap();
        assert_eq!(done.error_message(), Some("Order is already fulfilled"));

        let boom = client.fulfill_ship("ord_boom", &request).await.unwrap();
        assert_eq!(
            boom,
            ApiOutcome::Unexpected {
                status: 500,
                error: None
            }
        );
    }

    #[tokio::test]
    async fn test_fulfill_live_empty_success_body() {
        let server = MockServer::start();
        let mock = server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/orders/ord_1/fulfill/live")
                .json_body(json!({"vod_url": "https://twitch.tv/videos/1", "seller_discord_id": "42"}));
            then.status(200);
        });

        let request = LiveRequest {
            vod_url: "https://twitch.tv/videos/1".to_string(),
            seller_discord_id: "42".to_string(),
        };
        let outcome = client_for(&server).fulfill_live("ord_1", &request).await.unwrap();

        mock.assert();
        assert_eq!(outcome, ApiOutcome::Success(None));
    }

    #[tokio::test]
    async fn test_checkout_conflict() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/v1/checkout/session")
                .json_body(json!({"drop_id": "drop_1", "buyer_discord_id": "7"}));
            then.status(409)
                .json_body(json!({"error": "Drop is no longer available"}));
        });

        let request = CheckoutRequest {
            drop_id: "drop_1".to_string(),
            buyer_discord_id: "7".to_string(),
        };
        let outcome = client_for(&server)
            .create_checkout_session(&request)
            .await
            .unwrap();
        assert_eq!(
            outcome,
            ApiOutcome::Conflict(Some("Drop is no longer available".to_string()))
        );
    }

    #[tokio::test]
    async fn test_list_products_and_health() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(GET).path("/api/products");
            then.status(200).json_body(json!([
                {"id": 1, "name": "Snowy TKL", "price": 450.0, "description": "Lubed"}
            ]));
        });
        server.mock(|when, then| {
            when.method(GET).path("/healthz");
            then.status(200);
        });

        let client = client_for(&server);
        let ApiOutcome::Success(products) = client.list_products().await.unwrap() else {
            panic!("expected products");
        };
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].name, "Snowy TKL");
        assert!(client.health().await.unwrap());
    }

    #[tokio::test]
    async fn test_fulfill_ship_plain_text_success_body() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/orders/ord_txt/fulfill/ship");
            then.status(200).body("Order shipped");
        });

        let outcome = client_for(&server)
            .fulfill_ship("ord_txt", &ship_request())
            .await
            .unwrap();
        assert_eq!(outcome, ApiOutcome::Success(None));
    }

    #[tokio::test]
    async fn test_fulfill_and_checkout_only_accept_200() {
        let server = MockServer::start();
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/orders/ord_1/fulfill/ship");
            then.status(202);
        });
        server.mock(|when, then| {
            when.method(POST).path("/api/v1/checkout/session");
            then.status(201)
                .json_body(json!({"url": "https://checkout.stripe.com/x"}));
        });

        let client = client_for(&server);
        let ship = client.fulfill_ship("ord_1", &ship_request()).await.unwrap();
        assert_eq!(
            ship,
            ApiOutcome::Unexpected {
                status: 202,
                error: None
            }
        );

        let request = CheckoutRequest {
            drop_id: "drop_1".to_string(),
            buyer_discord_id: "7".to_string(),
        };
        let checkout = client.create_checkout_session(&request).await.unwrap();
        assert_eq!(
            checkout,
            ApiOutcome::Unexpected {
                status: 201,
                error: None
            }
        );
    }

    #[tokio::test]
    async fn test_unreachable_core_api_is_network_error() {
        let client = CoreApiClient::new(&CoreApiConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            internal_key: None,
            timeout_secs: 2,
        })
        .unwrap();

        let err = client.fulfill_ship("ord_1", &ship_request()).await.unwrap_err();
        assert!(err.is_network());
    }
}
