//! HTTP pipeline adapter
//!
//! Registers the interceptor into a concrete request pipeline: every
//! request sent through `AuthHttp` is decorated on the way out, and error
//! statuses on the way back are offered to the interceptor before they
//! reach the caller. Hosts with their own pipeline can ignore this module
//! and call the interceptor traits directly.

use std::sync::Arc;

use thiserror::Error;

use crate::interceptor::{
    ErrorOutcome, IdentityInterceptor, Request, RequestDecorator, Response, ResponseErrorHandler,
};

/// Errors that can occur sending a request through the pipeline
#[derive(Debug, Error)]
pub enum HttpError {
    /// Transport-level failure
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The request descriptor could not be turned into a wire request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// An error status the interceptor declined to handle
    #[error("HTTP {status} from {url}")]
    Status {
        /// The response status code
        status: u16,
        /// The request URL
        url: String,
    },
}

/// What came back from the pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// A non-error response
    Response {
        /// HTTP status code
        status: u16,
        /// Response body
        body: String,
    },
    /// The interceptor consumed an authorization failure and pointed the
    /// browser at the login page; there is no response for the caller
    Redirected {
        /// The login URL the navigator was pointed at
        location: String,
    },
}

/// HTTP client with the identity interceptor wired into both hooks.
pub struct AuthHttp {
    client: reqwest::Client,
    interceptor: Arc<IdentityInterceptor>,
}

impl AuthHttp {
    /// Creates a client around a default `reqwest::Client`
    pub fn new(interceptor: Arc<IdentityInterceptor>) -> Self {
        Self::with_client(reqwest::Client::new(), interceptor)
    }

    /// Creates a client around an existing `reqwest::Client`
    pub fn with_client(client: reqwest::Client, interceptor: Arc<IdentityInterceptor>) -> Self {
        Self {
            client,
            interceptor,
        }
    }

    /// Sends a GET request through the pipeline
    pub async fn get(&self, url: &str) -> Result<FetchOutcome, HttpError> {
        self.execute(&Request::get(url)).await
    }

    /// Sends a request descriptor through the pipeline.
    ///
    /// The descriptor is decorated (never mutated), sent, and any error
    /// status is offered to the interceptor: a handled 403 comes back as
    /// `FetchOutcome::Redirected`, everything else as `HttpError::Status`.
    pub async fn execute(&self, request: &Request) -> Result<FetchOutcome, HttpError> {
        let decorated = self.interceptor.decorate(request);

        let method = reqwest::Method::from_bytes(decorated.method.as_bytes())
            .map_err(|_| HttpError::InvalidRequest(format!("bad method: {}", decorated.method)))?;
        let mut builder = self.client.request(method, &decorated.url);
        for (name, value) in &decorated.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }

        let response = builder.send().await?;
        let status = response.status();

        if status.is_client_error() || status.is_server_error() {
            let descriptor = Response::new(status.as_u16(), decorated.url.clone());
            return match self.interceptor.handle_error(&descriptor) {
                ErrorOutcome::Redirected { location } => Ok(FetchOutcome::Redirected { location }),
                ErrorOutcome::Propagate => Err(HttpError::Status {
                    status: status.as_u16(),
                    url: decorated.url,
                }),
            };
        }

        let body = response.text().await?;
        Ok(FetchOutcome::Response {
            status: status.as_u16(),
            body,
        })
    }
}
