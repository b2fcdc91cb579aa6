//! Client for the HTTP control API of a Locust load test.
//!
//! ```no_run
//! # async fn run() -> control::Result<()> {
//! let client = control::Client::new("http://localhost:8089")?;
//! client.generate_load(5, 1.0).await?;
//! let stats = client.stats().await?;
//! println!("{} users, {} rps", stats.user_count, stats.total_rps);
//! client.stop_load().await?;
//! # Ok(())
//! # }
//! ```

use anyhow::Result as AnyResult;
use async_trait::async_trait;

use hyper::{body::Bytes, client::HttpConnector, Body, Request, StatusCode};

pub mod blocking;
pub mod client;
pub mod error;
pub mod model;

pub use client::{parse_base_url, parse_http_base_url, Client, ClientConfig, Endpoints};
pub use error::{Error, Result};
pub use model::{ActionResult, StatsError, StatsResult};

pub type HttpClient = hyper::Client<HttpConnector, Body>;

/// Status and fully buffered body of an HTTP exchange.
#[derive(Debug, Clone)]
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Bytes,
}

/// One HTTP round trip. Errors returned here are network level failures,
/// a non-success status is still an `Ok`.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: Request<Body>) -> AnyResult<RawResponse>;
}

#[async_trait]
impl Transport for HttpClient {
    async fn send(&self, request: Request<Body>) -> AnyResult<RawResponse> {
        let response = self.request(request).await?;
        let status = response.status();
        let body = hyper::body::to_bytes(response.into_body()).await?;
        Ok(RawResponse { status, body })
    }
}
