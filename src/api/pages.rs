// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 TPDB Project

//! Page handlers.

use axum::{extract::State, response::Html};
use tera::Context;

use crate::{error::ApiError, state::AppState};

/// Body served at the site root.
pub const GREETING: &str = "Hello, World! This is my first Django app.";

/// Template rendered by [`about`].
pub const ABOUT_TEMPLATE: &str = "myapp/about.html";

/// Landing page. Ignores the request entirely; plain text, no failure modes.
pub async fn index() -> &'static str {
    GREETING
}

/// About page, rendered from [`ABOUT_TEMPLATE`]. A render failure (including
/// a template missing from the template root) propagates as a 500.
pub async fn about(State(state): State<AppState>) -> Result<Html<String>, ApiError> {
    let body = state.templates.render(ABOUT_TEMPLATE, &about_context())?;
    Ok(Html(body))
}

/// Context handed to the template engine for the about page.
fn about_context() -> Context {
    let mut context = Context::new();
    context.insert("title", "About Page");
    context
}
