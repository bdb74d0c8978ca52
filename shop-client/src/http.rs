//! HTTP order source for the shop API

use crate::{ClientConfig, ClientError, ClientResult, OrderSource};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use shared::{
    AssignedOrdersEnvelope, AvailabilityUpdateRequest, Order, ServedOrder, ServedOrdersEnvelope,
    StatusUpdateRequest,
};

/// Error body returned by the shop API (`{ "message": "..." }`)
#[derive(serde::Deserialize)]
struct ApiErrorResponse {
    message: String,
}

/// Network order source
#[derive(Debug, Clone)]
pub struct NetworkOrderSource {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl NetworkOrderSource {
    /// Create a new order source from configuration
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: config.token.clone(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Attach credentials; requests are never sent without them
    fn authorize(&self, request: RequestBuilder) -> ClientResult<RequestBuilder> {
        match self.token.as_deref() {
            Some(token) if !token.is_empty() => {
                Ok(request.header(reqwest::header::AUTHORIZATION, format!("Bearer {}", token)))
            }
            _ => Err(ClientError::Unauthorized(
                "missing session credentials".into(),
            )),
        }
    }

    /// Map a non-success status to the client error taxonomy
    async fn check_status(response: reqwest::Response) -> ClientResult<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ApiErrorResponse>(&text)
            .map(|e| e.message)
            .unwrap_or(text);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ClientError::Unauthorized(message))
            }
            _ => Err(ClientError::Server {
                status: status.as_u16(),
                message,
            }),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let request = self.authorize(self.client.get(self.url(path)))?;
        let response = Self::check_status(request.send().await?).await?;
        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| ClientError::InvalidResponse(e.to_string()))
    }

    /// PUT with a JSON body; the acknowledgement body is not decoded
    async fn put_ack<B: serde::Serialize + Sync>(&self, path: &str, body: &B) -> ClientResult<()> {
        let request = self.authorize(self.client.put(self.url(path)).json(body))?;
        Self::check_status(request.send().await?).await?;
        Ok(())
    }
}

#[async_trait]
impl OrderSource for NetworkOrderSource {
    async fn fetch_assigned_orders(&self) -> ClientResult<Vec<Order>> {
        let envelope: AssignedOrdersEnvelope = self.get_json("shop/get-assigned-orders").await?;
        tracing::debug!(orders = envelope.data.len(), "Fetched assigned orders");
        Ok(envelope.data)
    }

    async fn update_order_status(&self, order_id: &str, status: &str) -> ClientResult<()> {
        let body = StatusUpdateRequest {
            status: status.to_string(),
        };
        self.put_ack(&format!("shop/{}/status", order_id), &body)
            .await?;
        tracing::debug!(order_id = %order_id, status = %status, "Order status updated");
        Ok(())
    }

    async fn set_item_availability(
        &self,
        order_id: &str,
        product_id: &str,
        available: bool,
    ) -> ClientResult<()> {
        let body = AvailabilityUpdateRequest {
            product_id: product_id.to_string(),
            available,
        };
        self.put_ack(&format!("shop/{}/product-availability", order_id), &body)
            .await?;
        tracing::debug!(
            order_id = %order_id,
            product_id = %product_id,
            available,
            "Item availability updated"
        );
        Ok(())
    }

    async fn fetch_served_orders(&self) -> ClientResult<Vec<ServedOrder>> {
        let envelope: ServedOrdersEnvelope = self.get_json("shop/served-orders").await?;
        Ok(envelope.orders)
    }
}
