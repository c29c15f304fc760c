//! Running the HTTP server from its command line configuration.

use crate::app::{new_app, AppOptions};
use actix_web::{dev::Server, middleware::Logger, web, HttpServer};
use anyhow::Context;
use licensing_auth::{authenticator::Authenticator, authorizer::Authorizer};
use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

#[derive(Clone, Debug, clap::Args)]
#[command(
    rename_all_env = "SCREAMING_SNAKE_CASE",
    next_help_heading = "HTTP endpoint"
)]
#[group(id = "http")]
pub struct HttpServerConfig {
    /// The number of worker threads, zero uses one per core
    #[arg(
        id = "http-server-workers",
        long,
        env = "HTTP_SERVER_WORKERS",
        default_value_t = 0
    )]
    pub workers: usize,

    /// The address to listen on
    #[arg(
        id = "http-server-bind-address",
        long,
        env = "HTTP_SERVER_BIND_ADDR",
        default_value = "::1"
    )]
    pub bind_addr: String,

    /// The port to listen on
    #[arg(
        id = "http-server-bind-port",
        short = 'p',
        long,
        env = "HTTP_SERVER_BIND_PORT",
        default_value_t = 8080
    )]
    pub bind_port: u16,

    /// The limit of request bodies, like uploaded user guides, in bytes
    #[arg(
        id = "http-server-request-limit",
        long,
        env = "HTTP_SERVER_REQUEST_LIMIT",
        default_value_t = 32 * 1024 * 1024
    )]
    pub request_limit: usize,

    /// The limit of JSON request bodies, in bytes
    #[arg(
        id = "http-server-json-limit",
        long,
        env = "HTTP_SERVER_JSON_LIMIT",
        default_value_t = 2 * 1024 * 1024
    )]
    pub json_limit: usize,
}

impl Default for HttpServerConfig {
    fn default() -> Self {
        Self {
            workers: 0,
            bind_addr: "::1".into(),
            bind_port: 8080,
            request_limit: 32 * 1024 * 1024,
            json_limit: 2 * 1024 * 1024,
        }
    }
}

impl HttpServerConfig {
    pub fn socket_addr(&self) -> anyhow::Result<SocketAddr> {
        let ip: IpAddr = self
            .bind_addr
            .parse()
            .with_context(|| format!("invalid bind address: {}", self.bind_addr))?;
        Ok(SocketAddr::new(ip, self.bind_port))
    }
}

pub type ConfiguratorFn = dyn Fn(&mut web::ServiceConfig) + Send + Sync;

/// Assembles the app of each worker from the configuration and the modules.
pub struct HttpServerBuilder {
    config: HttpServerConfig,
    authenticator: Option<Arc<Authenticator>>,
    authorizer: Authorizer,
    configurator: Option<Arc<ConfiguratorFn>>,
}

impl HttpServerBuilder {
    pub fn new(config: HttpServerConfig) -> Self {
        Self {
            config,
            authenticator: None,
            authorizer: Authorizer::default(),
            configurator: None,
        }
    }

    pub fn authenticator(mut self, authenticator: Option<Arc<Authenticator>>) -> Self {
        self.authenticator = authenticator;
        self
    }

    pub fn authorizer(mut self, authorizer: Authorizer) -> Self {
        self.authorizer = authorizer;
        self
    }

    pub fn configure<F>(mut self, configurator: F) -> Self
    where
        F: Fn(&mut web::ServiceConfig) + Send + Sync + 'static,
    {
        self.configurator = Some(Arc::new(configurator));
        self
    }

    /// Bind to the configured address, the returned server runs once awaited.
    pub fn bind(self) -> anyhow::Result<Server> {
        let addr = self.config.socket_addr()?;
        let Self {
            config,
            authenticator,
            authorizer,
            configurator,
        } = self;

        log::info!(
            "request limit: {} bytes, JSON limit: {} bytes",
            config.request_limit,
            config.json_limit
        );

        let (request_limit, json_limit) = (config.request_limit, config.json_limit);
        let mut http = HttpServer::new(move || {
            new_app(AppOptions {
                authenticator: authenticator.clone(),
                authorizer: authorizer.clone(),
                logger: Some(Logger::default()),
                json_limit: Some(json_limit),
            })
            .app_data(web::PayloadConfig::new(request_limit))
            .configure(|svc| {
                if let Some(configure) = &configurator {
                    configure(svc);
                }
            })
        });

        if config.workers > 0 {
            log::info!("using {} worker(s)", config.workers);
            http = http.workers(config.workers);
        }

        log::info!("binding to {addr}");
        Ok(http.bind(addr).with_context(|| format!("binding to {addr}"))?.run())
    }

    pub async fn run(self) -> anyhow::Result<()> {
        Ok(self.bind()?.await?)
    }
}
