//! Request forwarding.
//!
//! Looks up the route for the request path, rewrites the URI to the
//! upstream, and streams the request and response through unchanged.

use axum::{
    body::Body,
    extract::State,
    http::{header, uri::PathAndQuery, HeaderValue, Request, Uri, Version},
    response::{IntoResponse, Response},
};
use hyper::body::Incoming;
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use std::sync::Arc;

use crate::http::request::request_id;
use crate::relay::{RelayError, Route, RouteTable};

/// State shared by every relay request.
#[derive(Clone)]
pub struct RelayState {
    pub table: Arc<RouteTable>,
    pub client: Client<HttpConnector, Body>,
}

impl RelayState {
    pub fn new(table: RouteTable) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            table: Arc::new(table),
            client,
        }
    }
}

/// Forward a request to the upstream its path maps to.
pub async fn forward_handler(State(state): State<RelayState>, request: Request<Body>) -> Response {
    let request_id = request_id(&request).unwrap_or("unknown").to_string();
    let path = request.uri().path().to_string();

    let Some(route) = state.table.lookup(&path) else {
        tracing::warn!(request_id = %request_id, path = %path, "No route matched");
        return RelayError::NoRoute.into_response();
    };

    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        path = %path,
        route = %route.name,
        upstream = %route.upstream,
        "Forwarding request"
    );

    let outbound = match rewrite(request, route) {
        Ok(req) => req,
        Err(e) => return e.into_response(),
    };

    match state.client.request(outbound).await {
        Ok(response) => {
            tracing::debug!(request_id = %request_id, status = %response.status(), "Upstream responded");
            into_axum(response)
        }
        Err(e) => {
            tracing::error!(request_id = %request_id, upstream = %route.upstream, error = %e, "Upstream error");
            RelayError::Upstream(e).into_response()
        }
    }
}

fn into_axum(response: hyper::Response<Incoming>) -> Response {
    let (parts, body) = response.into_parts();
    Response::from_parts(parts, Body::new(body))
}

/// Point `request` at `route`'s upstream, keeping method, headers and body.
fn rewrite(request: Request<Body>, route: &Route) -> Result<Request<Body>, RelayError> {
    let (mut parts, body) = request.into_parts();

    let path_and_query = parts
        .uri
        .path_and_query()
        .map(PathAndQuery::as_str)
        .unwrap_or("/")
        .to_string();
    parts.uri = Uri::builder()
        .scheme("http")
        .authority(route.upstream.as_str())
        .path_and_query(path_and_query)
        .build()
        .map_err(|_| RelayError::InvalidUpstream(route.upstream.to_string()))?;

    let host = HeaderValue::from_str(route.upstream.as_str())
        .map_err(|_| RelayError::InvalidUpstream(route.upstream.to_string()))?;
    parts.headers.insert(header::HOST, host);
    parts.version = Version::HTTP_11;

    Ok(Request::from_parts(parts, body))
}
