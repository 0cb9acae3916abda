//! Typed wrapper over the ordering HTTP API

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use bhatti_core::domain::{
    AdminOrderView, CustomerOrderView, MenuItem, Offer, PlaceOrder, ProfileView,
};

use crate::error::ClientError;

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

#[derive(Deserialize)]
struct VisitBody {
    value: u64,
}

#[derive(Serialize)]
struct StatusBody<'a> {
    id: &'a str,
    status: &'a str,
}

#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
    timeout: Duration,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: None,
            timeout,
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.request_url(method, format!("{}{}", self.base_url, path))
    }

    fn request_url(&self, method: Method, url: impl reqwest::IntoUrl + std::fmt::Display) -> RequestBuilder {
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url).timeout(self.timeout);
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    async fn parse<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ErrorBody>(&text)
                .map(|b| b.error)
                .unwrap_or(text);
            return Err(ClientError::Api { status: status.as_u16(), message });
        }
        Ok(response.json::<T>().await?)
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        Self::parse(self.request(Method::GET, path).send().await?).await
    }

    async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        Self::parse(self.request(method, path).json(body).send().await?).await
    }

    pub async fn menu(&self, query: Option<&str>, category: Option<&str>) -> Result<Vec<MenuItem>, ClientError> {
        let mut url = Url::parse(&format!("{}/api/menu", self.base_url))
            .map_err(|e| ClientError::InvalidUrl(e.to_string()))?;
        let params: Vec<(&str, &str)> = [("q", query), ("category", category)]
            .into_iter()
            .filter_map(|(key, value)| value.map(|v| (key, v)))
            .collect();
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Self::parse(self.request_url(Method::GET, url).send().await?).await
    }

    pub async fn offers(&self) -> Result<Vec<Offer>, ClientError> {
        self.get("/api/offers").await
    }

    pub async fn record_visit(&self) -> Result<u64, ClientError> {
        let body: VisitBody = Self::parse(self.request(Method::POST, "/api/metrics/visit").send().await?).await?;
        Ok(body.value)
    }

    pub async fn my_orders(&self) -> Result<Vec<CustomerOrderView>, ClientError> {
        self.get("/api/orders").await
    }

    pub async fn place_order(&self, request: &PlaceOrder) -> Result<CustomerOrderView, ClientError> {
        self.send_json(Method::POST, "/api/orders", request).await
    }

    pub async fn profile(&self) -> Result<ProfileView, ClientError> {
        self.get("/api/profile").await
    }

    pub async fn admin_orders(&self, limit: Option<usize>) -> Result<Vec<AdminOrderView>, ClientError> {
        self.get(&admin_orders_path(limit)).await
    }

    pub async fn update_order_status(&self, id: &str, status: &str) -> Result<AdminOrderView, ClientError> {
        self.send_json(Method::PATCH, "/api/admin/orders", &StatusBody { id, status })
            .await
    }
}

pub(crate) fn admin_orders_path(limit: Option<usize>) -> String {
    match limit {
        Some(limit) => format!("/api/admin/orders?limit={}", limit),
        None => "/api/admin/orders".to_string(),
    }
}
