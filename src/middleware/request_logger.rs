//! Request logging middleware.

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready};
use actix_web::http::{Method, StatusCode, header};
use futures_util::future::LocalBoxFuture;
use std::future::{Ready, ready};
use std::time::Instant;
use tracing::{error, info, warn};

/// Which part of the service a request is aimed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Surface {
    Api,
    Static,
}

impl Surface {
    fn as_str(self) -> &'static str {
        match self {
            Surface::Api => "api",
            Surface::Static => "static",
        }
    }
}

/// Fields logged when a request arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestSummary {
    pub method: Method,
    pub path: String,
    pub surface: Surface,
    pub remote_addr: String,
    /// Body encoding of a write; `None` for reads or when no header was sent
    pub content_type: Option<String>,
    pub content_length: Option<u64>,
}

impl RequestSummary {
    pub fn from_request(req: &ServiceRequest) -> Self {
        let path = req.path().to_string();
        let surface = if path == "/api" || path.starts_with("/api/") {
            Surface::Api
        } else {
            Surface::Static
        };

        let is_write = !matches!(*req.method(), Method::GET | Method::HEAD);
        let header_str = |name: header::HeaderName| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let (content_type, content_length) = if is_write {
            (
                header_str(header::CONTENT_TYPE),
                header_str(header::CONTENT_LENGTH).and_then(|v| v.parse().ok()),
            )
        } else {
            (None, None)
        };

        Self {
            method: req.method().clone(),
            path,
            surface,
            remote_addr: req
                .connection_info()
                .realip_remote_addr()
                .unwrap_or("unknown")
                .to_string(),
            content_type,
            content_length,
        }
    }
}

/// How a finished request is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Ok,
    Rejected,
    Failed,
}

impl From<StatusCode> for Outcome {
    fn from(status: StatusCode) -> Self {
        if status.is_server_error() {
            Outcome::Failed
        } else if status.is_client_error() {
            Outcome::Rejected
        } else {
            Outcome::Ok
        }
    }
}

/// Logs each request on arrival and on completion with status and duration.
///
/// Storage failures surface as `Failed` at error level so they line up with
/// the `Database error` line logged by the error handler.
pub struct RequestLogger;

impl<S, B> Transform<S, ServiceRequest> for RequestLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestLoggerMiddleware { service }))
    }
}

pub struct RequestLoggerMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for RequestLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let start = Instant::now();
        let summary = RequestSummary::from_request(&req);

        info!(
            target: "apikey_service::http",
            method = %summary.method,
            path = %summary.path,
            surface = summary.surface.as_str(),
            remote_addr = %summary.remote_addr,
            content_type = summary.content_type.as_deref().unwrap_or("-"),
            content_length = summary.content_length.unwrap_or(0),
            "request started"
        );

        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;
            let status = res.status();
            let duration_ms = start.elapsed().as_millis() as u64;
            let method = &summary.method;
            let path = &summary.path;

            match Outcome::from(status) {
                Outcome::Ok => info!(
                    target: "apikey_service::http",
                    %method, %path, status = status.as_u16(), duration_ms,
                    "request completed"
                ),
                Outcome::Rejected => warn!(
                    target: "apikey_service::http",
                    %method, %path, status = status.as_u16(), duration_ms,
                    "request rejected"
                ),
                Outcome::Failed => error!(
                    target: "apikey_service::http",
                    %method, %path, status = status.as_u16(), duration_ms,
                    "request failed"
                ),
            }

            Ok(res)
        })
    }
}
