// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 TPDB Project

//! Template engine wiring.
//!
//! Templates load once at startup from the template root. Rendering a name
//! that was never loaded fails at render time; that error is propagated,
//! not handled here.

use std::path::Path;

use tera::Tera;

/// Directory scanned for templates, relative to the working directory.
pub const TEMPLATE_ROOT: &str = "templates";

/// Load every `.html` template under `root`.
pub fn load(root: impl AsRef<Path>) -> Result<Tera, tera::Error> {
    let glob = format!("{}/**/*.html", root.as_ref().display());
    Tera::new(&glob)
}
