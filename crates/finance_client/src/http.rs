use std::sync::Arc;

use api_types::{
    auth::{AuthResponse, LoginRequest, RegisterRequest},
    page::PageResponse,
    transaction::MonthlyBalance,
};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::{Deserialize, de::DeserializeOwned};
use uuid::Uuid;

use crate::{error::ClientError, list::ListQuery, resource::Resource, storage::TokenStore};

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(alias = "message", alias = "title")]
    error: String,
}

/// Single point of REST access.
///
/// The bearer token is read from the token store on every request, so a
/// login or logout takes effect without rebuilding the client.
#[derive(Clone, Debug)]
pub struct ApiClient {
    base_url: String,
    http: Client,
    tokens: Arc<dyn TokenStore>,
}

impl ApiClient {
    pub fn new(base_url: &str, tokens: Arc<dyn TokenStore>) -> Result<Self, ClientError> {
        Url::parse(base_url).map_err(|err| ClientError::InvalidUrl(err.to_string()))?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http: Client::new(),
            tokens,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tokens(&self) -> &Arc<dyn TokenStore> {
        &self.tokens
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let req = self.http.request(method, self.url(path));
        match self.tokens.access_token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ClientError> {
        let resp = self.dispatch(req).await?;
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|err| {
            tracing::warn!("undecodable response body: {err}");
            ClientError::Decode(err.to_string())
        })
    }

    async fn send_unit(&self, req: RequestBuilder) -> Result<(), ClientError> {
        self.dispatch(req).await.map(|_| ())
    }

    async fn dispatch(&self, req: RequestBuilder) -> Result<Response, ClientError> {
        let resp = req.send().await.map_err(|err| {
            tracing::warn!("request failed: {err}");
            ClientError::Transport(err)
        })?;
        let status = resp.status();
        tracing::debug!(status = status.as_u16(), url = %resp.url(), "response");
        if status.is_success() {
            return Ok(resp);
        }

        let message = match resp.json::<ErrorBody>().await {
            Ok(body) => body.error,
            Err(_) => "server error".to_string(),
        };
        Err(ClientError::from_status(status.as_u16(), message))
    }

    pub async fn login(&self, payload: &LoginRequest) -> Result<AuthResponse, ClientError> {
        self.send(self.request(Method::POST, "auth/login").json(payload))
            .await
    }

    pub async fn register(&self, payload: &RegisterRequest) -> Result<AuthResponse, ClientError> {
        self.send(self.request(Method::POST, "auth/register").json(payload))
            .await
    }

    pub async fn monthly_balance(&self, year: i32, month: u32) -> Result<MonthlyBalance, ClientError> {
        let req = self
            .request(Method::GET, "transactions/monthly-balance")
            .query(&[("year", year.to_string()), ("month", month.to_string())]);
        self.send(req).await
    }

    pub async fn get_page<R: Resource>(
        &self,
        query: &ListQuery<R::Filters>,
    ) -> Result<PageResponse<R::Item>, ClientError> {
        tracing::debug!(path = R::LIST_PATH, page = query.page, size = query.page_size, "list");
        let req = self
            .request(Method::GET, R::LIST_PATH)
            .query(&query.to_pairs());
        self.send(req).await
    }

    pub async fn post_item<R: Resource>(&self, draft: &R::Draft) -> Result<(), ClientError> {
        self.send_unit(self.request(Method::POST, R::PATH).json(draft))
            .await
    }

    pub async fn put_item<R: Resource>(&self, id: Uuid, draft: &R::Draft) -> Result<(), ClientError> {
        let path = format!("{}/{id}", R::PATH);
        self.send_unit(self.request(Method::PUT, &path).json(draft))
            .await
    }

    pub async fn delete_item<R: Resource>(&self, id: Uuid) -> Result<(), ClientError> {
        let path = format!("{}/{id}", R::PATH);
        self.send_unit(self.request(Method::DELETE, &path)).await
    }
}
