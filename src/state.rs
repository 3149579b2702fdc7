// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 TPDB Project

use std::sync::Arc;

use tera::Tera;

use crate::config::Config;

/// Shared application state. Built once in `main` and never mutated, so
/// concurrent readers need no synchronization.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub templates: Arc<Tera>,
}

impl AppState {
    pub fn new(config: Config, templates: Tera) -> Self {
        Self {
            config: Arc::new(config),
            templates: Arc::new(templates),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default(), Tera::default())
    }
}
