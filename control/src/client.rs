use std::time::Duration;

use hyper::{header, Body, Method, Request, Uri};
use serde::de::DeserializeOwned;
use tokio::time::timeout;
use url::{form_urlencoded, Url};

use crate::{ActionResult, Error, HttpClient, Result, StatsResult, Transport};

const DEFAULT_POOL_IDLE_TIMEOUT: Duration = Duration::from_secs(90);
const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";
const JSON_CONTENT_TYPE: &str = "application/json";

/// Paths of the control endpoints, relative to the base url.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub swarm: String,
    pub stop: String,
    pub stats: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Endpoints {
            swarm: "/swarm".to_string(),
            stop: "/stop".to_string(),
            stats: "/stats/requests".to_string(),
        }
    }
}

/// Transport settings handed to the client at construction.
///
/// `timeout` bounds a whole round trip, body included. The pool settings are
/// only used when the client builds its own hyper client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub timeout: Option<Duration>,
    pub pool_idle_timeout: Option<Duration>,
    pub pool_max_idle_per_host: usize,
    pub endpoints: Endpoints,
}

impl Default for ClientConfig {
    fn default() -> Self {
        ClientConfig {
            timeout: None,
            pool_idle_timeout: Some(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: usize::MAX,
            endpoints: Endpoints::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    pub fn build_http(&self) -> HttpClient {
        hyper::Client::builder()
            .pool_idle_timeout(self.pool_idle_timeout)
            .pool_max_idle_per_host(self.pool_max_idle_per_host)
            .build_http()
    }
}

/// Checks that `s` is an absolute http(s) url that endpoint paths can be
/// appended to.
pub fn parse_base_url(s: &str) -> Result<Url> {
    let url = Url::parse(s).map_err(|err| Error::invalid_url(s, err))?;
    if url.cannot_be_a_base() {
        return Err(Error::invalid_url(s, "cannot be used as a base url"));
    }
    match url.scheme() {
        "http" | "https" => {}
        other => return Err(Error::invalid_url(s, format!("unsupported scheme `{other}`"))),
    }
    if url.host().is_none() {
        return Err(Error::invalid_url(s, "missing host"));
    }
    Ok(url)
}

/// Like [`parse_base_url`] but only accepts plain `http`, the one scheme the
/// hyper client built from a [`ClientConfig`] can speak. `https` bases need a
/// TLS capable transport handed to `Client::with_transport`.
pub fn parse_http_base_url(s: &str) -> Result<Url> {
    let url = parse_base_url(s)?;
    if url.scheme() != "http" {
        return Err(Error::invalid_url(
            s,
            format!("scheme `{}` needs a TLS transport", url.scheme()),
        ));
    }
    Ok(url)
}

/// Handle on one Locust web UI.
///
/// Each call is a single independent HTTP exchange. The client holds no
/// mutable state, clones share the underlying connection pool.
#[derive(Debug, Clone)]
pub struct Client<T = HttpClient> {
    base_url: String,
    base: Url,
    config: ClientConfig,
    transport: T,
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
        let base = parse_base_url(base_url)?;
        Ok(Client {
            base_url: base_url.to_string(),
            base,
            config,
            transport,
        })
    }

    /// The url given at construction, verbatim.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts (or resizes) the swarm. `spawn_rate` is sent as is, the server
    /// is left to reject values it does not accept.
    pub async fn generate_load(&self, user_count: u64, spawn_rate: f64) -> Result<ActionResult> {
        let uri = self.endpoint(&self.config.endpoints.swarm)?;
        let form = form_urlencoded::Serializer::new(String::new())
            .append_pair("locust_count", &user_count.to_string())
            .append_pair("hatch_rate", &spawn_rate.to_string())
            .finish();

        let request = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(header::ACCEPT, JSON_CONTENT_TYPE)
            .body(Body::from(form))
            .map_err(|err| Error::Transport(Box::new(err)))?;

        self.execute(request).await
    }

    pub async fn stop_load(&self) -> Result<ActionResult> {
        let request = self.get(&self.config.endpoints.stop)?;
        self.execute(request).await
    }

    pub async fn stats(&self) -> Result<StatsResult> {
        let request = self.get(&self.config.endpoints.stats)?;
        self.execute(request).await
    }

    fn get(&self, path: &str) -> Result<Request<Body>> {
        let uri = self.endpoint(path)?;
        Request::builder()
            .method(Method::GET)
            .uri(uri)
            .header(header::ACCEPT, JSON_CONTENT_TYPE)
            .body(Body::empty())
            .map_err(|err| Error::Transport(Box::new(err)))
    }

    /// Appends `path` to the base url path, keeping whatever prefix the base
    /// already has. The base was validated at construction, so a failure here
    /// comes from the request itself and is reported as a transport error.
    fn endpoint(&self, path: &str) -> Result<Uri> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| Error::Transport(format!("`{}` cannot be a base url", self.base_url).into()))?
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
        url.as_str()
            .parse::<Uri>()
            .map_err(|err| Error::Transport(Box::new(err)))
    }

    async fn execute<R: DeserializeOwned>(&self, request: Request<Body>) -> Result<R> {
        log::debug!("{} {}", request.method(), request.uri());

        let response = match self.config.timeout {
            Some(limit) => timeout(limit, self.transport.send(request)).await??,
            None => self.transport.send(request).await?,
        };

        if !response.status.is_success() {
            return Err(Error::Status {
                status: response.status,
                body: String::from_utf8_lossy(&response.body).into_owned(),
            });
        }

        Ok(serde_json::from_slice(&response.body)?)
    }
}
