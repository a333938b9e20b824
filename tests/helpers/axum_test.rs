// ABOUTME: Minimal request builder for exercising axum routers in tests
// ABOUTME: Drives a router via tower oneshot and exposes status and JSON body accessors
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

#![allow(clippy::unwrap_used)]

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde::de::DeserializeOwned;
use tower::ServiceExt as _;

/// Builder for one in-memory request against a router
pub struct AxumTestRequest {
    method: Method,
    uri: String,
    body: Body,
}

impl AxumTestRequest {
    #[must_use]
    pub fn get(uri: &str) -> Self {
        Self::new(Method::GET, uri)
    }

    #[must_use]
    pub fn post(uri: &str) -> Self {
        Self::new(Method::POST, uri)
    }

    #[must_use]
    pub fn put(uri: &str) -> Self {
        Self::new(Method::PUT, uri)
    }

    fn new(method: Method, uri: &str) -> Self {
        Self {
            method,
            uri: uri.to_owned(),
            body: Body::empty(),
        }
    }

    /// Attach a JSON body
    #[must_use]
    pub fn json(mut self, value: &serde_json::Value) -> Self {
        self.body = Body::from(serde_json::to_vec(value).unwrap());
        self
    }

    /// Send the request through the router
    pub async fn send(self, router: Router) -> AxumTestResponse {
        let request = Request::builder()
            .method(self.method)
            .uri(self.uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(self.body)
            .unwrap();

        let response = router.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        AxumTestResponse { status, bytes }
    }
}

/// Captured response from [`AxumTestRequest::send`]
pub struct AxumTestResponse {
    status: StatusCode,
    bytes: axum::body::Bytes,
}

impl AxumTestResponse {
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        self.status
    }

    /// Parse the body as JSON into the given type
    pub fn json<T: DeserializeOwned>(&self) -> T {
        serde_json::from_slice(&self.bytes).unwrap()
    }
}
