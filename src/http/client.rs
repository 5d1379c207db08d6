//! reqwest-backed transport with basic auth and optional TLS.

use anyhow::{Context, Result};
use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, RequestBuilder, header::ACCEPT};
use std::time::Duration;

use super::transport::{HttpResponse, Transport};
use crate::config::ConnectionOptions;
use crate::error::ClassifierError;

/// Transport bound to one registry. Every request carries the same credentials.
#[derive(Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    auth_user: Option<String>,
    auth_passwd: Option<String>,
}

impl HttpTransport {
    /// Builds the underlying client. No connection is opened until the first request.
    #[tracing::instrument]
    pub fn new(options: &ConnectionOptions) -> Result<Self> {
        let mut builder =
            Client::builder().user_agent(concat!("enc-classifier/", env!("ENC_CLASSIFIER_VERSION")));

        if options.use_ssl && !options.verify_tls {
            debug!("TLS certificate verification is disabled");
            builder = builder.danger_accept_invalid_certs(true);
        }
        if let Some(secs) = options.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }

        let client = builder.build().context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: options.base_url(),
            auth_user: options.auth_user.clone(),
            auth_passwd: options.auth_passwd.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let request = self
            .client
            .request(method, url)
            .header(ACCEPT, "application/json");

        match &self.auth_user {
            Some(user) => request.basic_auth(user, self.auth_passwd.as_ref()),
            None => request,
        }
    }

    async fn send(&self, request: RequestBuilder, label: &str) -> Result<HttpResponse> {
        debug!("{}...", label);

        let response = request
            .send()
            .await
            .map_err(|e| ClassifierError::Transport(format!("{}: {}", label, e)))?;

        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| ClassifierError::Transport(format!("{}: {}", label, e)))?;

        debug!("{}: HTTP {} ({} bytes)", label, status, body.len());

        Ok(HttpResponse { status, body })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[tracing::instrument(skip(self))]
    async fn get(&self, path: &str, label: &str) -> Result<HttpResponse> {
        let request = self.request(Method::GET, path);
        self.send(request, label).await
    }

    #[tracing::instrument(skip(self, body))]
    async fn post(
        &self,
        path: &str,
        label: &str,
        body: &serde_json::Value,
    ) -> Result<HttpResponse> {
        let request = self.request(Method::POST, path).json(body);
        self.send(request, label).await
    }
}
