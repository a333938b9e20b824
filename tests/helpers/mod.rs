// ABOUTME: Shared helpers for integration tests
// ABOUTME: Re-exports the axum request builder used by route tests
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2026 Spark Health

#![allow(dead_code)]

pub mod axum_test;
