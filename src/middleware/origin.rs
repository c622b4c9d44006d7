use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::debug;

pub const ACCEPTED_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "http://localhost:3001",
    "http://localhost:8080",
    "http://localhost:8081",
];

pub const ALLOWED_METHODS: &str = "DELETE, PATCH, OPTIONS";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OriginDecision {
    pub allow: bool,
    pub allowed_origin: Option<String>,
}

impl OriginDecision {
    /// Writes the permissive headers, if any. The origin is always echoed
    /// verbatim, never as `*`.
    pub fn write_headers(&self, headers: &mut HeaderMap, with_methods: bool) {
        if !self.allow {
            return;
        }
        if let Some(value) = self
            .allowed_origin
            .as_deref()
            .and_then(|origin| HeaderValue::from_str(origin).ok())
        {
            headers.insert(header::ACCESS_CONTROL_ALLOW_ORIGIN, value);
        }
        if with_methods {
            headers.insert(
                header::ACCESS_CONTROL_ALLOW_METHODS,
                HeaderValue::from_static(ALLOWED_METHODS),
            );
        }
    }
}

/// Never blocks a request, only decides which `Access-Control-*` headers go out.
#[derive(Debug, Clone)]
pub struct OriginGate {
    accepted: &'static [&'static str],
}

impl Default for OriginGate {
    fn default() -> Self {
        Self::new(ACCEPTED_ORIGINS)
    }
}

impl OriginGate {
    pub fn new(accepted: &'static [&'static str]) -> Self {
        Self { accepted }
    }

    pub fn decide(&self, origin: Option<&str>) -> OriginDecision {
        match origin {
            None => OriginDecision {
                allow: true,
                allowed_origin: None,
            },
            Some(origin) if self.accepted.iter().any(|accepted| *accepted == origin) => OriginDecision {
                allow: true,
                allowed_origin: Some(origin.to_string()),
            },
            Some(_) => OriginDecision {
                allow: false,
                allowed_origin: None,
            },
        }
    }
}

pub async fn expose_origin(State(gate): State<OriginGate>, req: Request, next: Next) -> Response {
    apply(&gate, req, next, false).await
}

pub async fn expose_origin_and_methods(
    State(gate): State<OriginGate>,
    req: Request,
    next: Next,
) -> Response {
    apply(&gate, req, next, true).await
}

async fn apply(gate: &OriginGate, req: Request, next: Next, with_methods: bool) -> Response {
    // A non-UTF-8 origin can never be on the list, so it counts as present and unknown.
    let origin = req
        .headers()
        .get(header::ORIGIN)
        .map(|value| value.to_str().unwrap_or_default().to_string());
    let decision = gate.decide(origin.as_deref());
    debug!(origin = ?origin, allow = decision.allow, "origin gate");

    let mut response = next.run(req).await;
    decision.write_headers(response.headers_mut(), with_methods);
    response
}
