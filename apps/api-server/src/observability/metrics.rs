//! Request metrics middleware and the Prometheus registry behind it.

use std::future::{Future, Ready, ready};
use std::pin::Pin;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Instant;

use actix_web::{
    Error,
    dev::{Service, ServiceRequest, ServiceResponse, Transform, forward_ready},
};
use prometheus::{Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder};

/// Route serving the exposition text. Requests to it are not recorded.
pub const METRICS_PATH: &str = "/api/metrics";

const LABELS: &[&str] = &["method", "path", "status"];

/// Per-route request counters and latencies, in a registry owned by the app.
pub struct HttpMetrics {
    registry: Registry,
    requests: IntCounterVec,
    duration: HistogramVec,
}

impl HttpMetrics {
    pub fn new() -> Result<Self, prometheus::Error> {
        let registry = Registry::new();

        let requests = IntCounterVec::new(
            Opts::new("requests_total", "HTTP requests handled")
                .namespace("forum")
                .subsystem("http"),
            LABELS,
        )?;
        let duration = HistogramVec::new(
            HistogramOpts::new("request_duration_seconds", "HTTP request latency")
                .namespace("forum")
                .subsystem("http"),
            LABELS,
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(duration.clone()))?;

        Ok(Self {
            registry,
            requests,
            duration,
        })
    }

    pub fn observe(&self, method: &str, path: &str, status: u16, seconds: f64) {
        let status = status.to_string();
        let labels = [method, path, status.as_str()];

        self.requests.with_label_values(&labels).inc();
        self.duration.with_label_values(&labels).observe(seconds);
    }

    /// Render every family in the text exposition format.
    pub fn render(&self) -> Result<(String, String), prometheus::Error> {
        let encoder = TextEncoder::new();
        let mut buf = Vec::new();
        encoder.encode(&self.registry.gather(), &mut buf)?;

        let body = String::from_utf8(buf)
            .map_err(|e| prometheus::Error::Msg(format!("exposition is not utf-8: {e}")))?;

        Ok((encoder.format_type().to_string(), body))
    }
}

/// Middleware recording one observation per request.
///
/// The path label is the matched route pattern, so `/api/posts/{id}` is one
/// series no matter which id was asked for.
pub struct RequestMetrics {
    metrics: Arc<HttpMetrics>,
}

impl RequestMetrics {
    pub fn new(metrics: Arc<HttpMetrics>) -> Self {
        Self { metrics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Transform = RequestMetricsService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestMetricsService {
            service: Rc::new(service),
            metrics: self.metrics.clone(),
        }))
    }
}

pub struct RequestMetricsService<S> {
    service: Rc<S>,
    metrics: Arc<HttpMetrics>,
}

impl<S, B> Service<ServiceRequest> for RequestMetricsService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let started = Instant::now();
        let method = req.method().to_string();
        let metrics = self.metrics.clone();
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await?;

            let path = res
                .request()
                .match_pattern()
                .unwrap_or_else(|| "unmatched".to_string());

            if path != METRICS_PATH {
                metrics.observe(
                    &method,
                    &path,
                    res.status().as_u16(),
                    started.elapsed().as_secs_f64(),
                );
            }

            Ok(res)
        })
    }
}
