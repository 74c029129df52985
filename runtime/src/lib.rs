// Copyright 2026 ldsh-feed Contributors
// SPDX-License-Identifier: Apache-2.0

//! ldsh-feed library. Scrolls the LDSH announcement list in headless
//! Chromium and publishes what it finds as an RSS 2.0 feed.
//!
//! This library crate exposes the core modules for integration testing.

pub mod cli;
pub mod collector;
pub mod error;
pub mod feed;
pub mod logging;
pub mod pipeline;
pub mod renderer;
pub mod site;
