//! Browser side of the API client: a `gloo-net` transport and a constructor
//! wired to local storage.

use std::rc::Rc;

use async_trait::async_trait;
use classdesk_shared::{
    ApiClient, ApiError, ApiResult, ClientConfig, HttpRequest, HttpResponse, HttpTransport,
    Method,
};
use gloo_net::http::Request;

use crate::services::storage::LocalTokenStore;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GlooTransport;

#[async_trait(?Send)]
impl HttpTransport for GlooTransport {
    async fn send(&self, request: HttpRequest) -> ApiResult<HttpResponse> {
        let mut builder = match request.method {
            Method::Get => Request::get(&request.url),
            Method::Post => Request::post(&request.url),
            Method::Put => Request::put(&request.url),
            Method::Delete => Request::delete(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        let prepared = match request.body {
            Some(body) => builder.body(body),
            None => builder.build(),
        }
        .map_err(|e| ApiError::transport(format!("{:?}", e)))?;

        let response = prepared
            .send()
            .await
            .map_err(|e| ApiError::transport(format!("{:?}", e)))?;

        let status = response.status();
        let status_text = response.status_text();
        // An unreadable body is treated like an empty one
        let body = response.text().await.unwrap_or_default();

        Ok(HttpResponse {
            status,
            status_text,
            body,
        })
    }
}

pub type Client = ApiClient<GlooTransport>;

pub fn config() -> ClientConfig {
    ClientConfig::from_build_env()
}

pub fn token_store() -> Rc<LocalTokenStore> {
    Rc::new(LocalTokenStore::new(config().token_storage_key))
}

/// Client bound to the browser's token storage.
pub fn client() -> Client {
    ApiClient::new(GlooTransport, token_store(), config())
}
