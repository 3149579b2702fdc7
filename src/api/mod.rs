// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 TPDB Project

use axum::{middleware, routing::get, Router};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{security, state::AppState};

pub mod pages;

/// Assemble the application router: the two pages, the asset roots, and the
/// hardening layers around everything.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(pages::index))
        .route("/about", get(pages::about))
        .nest_service("/static", ServeDir::new(&state.config.static_root))
        .nest_service("/media", ServeDir::new(&state.config.media_root))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security::redirect_to_https,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security::enforce_allowed_hosts,
        ))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            security::security_headers,
        ))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
