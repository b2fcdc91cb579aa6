//! Synchronous wrapper around [`crate::Client`].
//!
//! Each call blocks the current thread for the duration of the round trip.
//! The wrapper owns a runtime with one worker thread, which keeps pooled
//! connections driven between calls so a connection closed by the server is
//! dropped from the pool instead of being reused. It must not be used from
//! within an async context.

use tokio::runtime::{Builder, Runtime};

use crate::{
    client::parse_http_base_url, ActionResult, ClientConfig, Error, HttpClient, Result, StatsResult,
    Transport,
};

#[derive(Debug)]
pub struct Client<T = HttpClient> {
    inner: crate::Client<T>,
    runtime: Runtime,
}

impl Client<HttpClient> {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_config(base_url, ClientConfig::default())
    }

    pub fn with_config(base_url: &str, config: ClientConfig) -> Result<Self> {
        parse_http_base_url(base_url)?;
        let transport = config.build_http();
        Self::with_transport(base_url, config, transport)
    }
}

impl<T: Transport> Client<T> {
    pub fn with_transport(base_url: &str, config: ClientConfig, transport: T) -> Result<Self> {
        let inner = crate::Client::with_transport(base_url, config, transport)?;
        let runtime = Builder::new_multi_thread()
            .worker_threads(1)
            .enable_all()
            .build()
            .map_err(|err| Error::Transport(Box::new(err)))?;
        Ok(Client { inner, runtime })
    }

    pub fn base_url(&self) -> &str {
        self.inner.base_url()
    }

    pub fn generate_load(&self, user_count: u64, spawn_rate: f64) -> Result<ActionResult> {
        self.runtime
            .block_on(self.inner.generate_load(user_count, spawn_rate))
    }

    pub fn stop_load(&self) -> Result<ActionResult> {
        self.runtime.block_on(self.inner.stop_load())
    }

    pub fn stats(&self) -> Result<StatsResult> {
        self.runtime.block_on(self.inner.stats())
    }
}
