//! Breadcrumb navigation derived from glossary FQNs.

use serde::Serialize;

use crate::domain::error::DomainResult;
use crate::domain::fqn::{self, FQN_SEPARATOR};

pub const DEFAULT_ROUTE_BASE: &str = "/glossary";
pub const DEFAULT_ROOT_LABEL: &str = "Glossaries";

/// Routing for glossary pages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlossaryRoutes {
    /// Path of the glossary listing view
    pub base: String,
    /// Label of the leading breadcrumb entry
    pub root_label: String,
}

impl Default for GlossaryRoutes {
    fn default() -> Self {
        Self {
            base: DEFAULT_ROUTE_BASE.to_string(),
            root_label: DEFAULT_ROOT_LABEL.to_string(),
        }
    }
}

impl GlossaryRoutes {
    /// URL of the glossary page for `fqn`; the listing view for an empty FQN.
    pub fn glossary_path(&self, fqn: &str) -> String {
        let base = self.base.trim_end_matches('/');
        if fqn.is_empty() {
            base.to_string()
        } else {
            format!("{}/{}", base, urlencoding::encode(fqn))
        }
    }
}

/// One breadcrumb entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Breadcrumb {
    pub name: String,
    pub url: String,
    pub active_title: bool,
}

/// Breadcrumbs for `fqn`: the listing view, then one entry per path segment.
///
/// Each segment links to the cumulative path so far. No entry is marked
/// active.
pub fn build_breadcrumbs(fqn: &str, routes: &GlossaryRoutes) -> Vec<Breadcrumb> {
    let mut crumbs = vec![Breadcrumb {
        name: routes.root_label.clone(),
        url: routes.glossary_path(""),
        active_title: false,
    }];

    let mut path: Vec<String> = Vec::new();
    for segment in fqn::split(fqn) {
        let name = fqn::unquote_name(&segment).to_string();
        path.push(segment);
        crumbs.push(Breadcrumb {
            name,
            url: routes.glossary_path(&path.join(&FQN_SEPARATOR.to_string())),
            active_title: false,
        });
    }
    crumbs
}

/// Breadcrumbs for user-supplied input, normalized first.
///
/// Fails if a segment carries a stray quote.
pub fn breadcrumbs_for(fqn: &str, routes: &GlossaryRoutes) -> DomainResult<Vec<Breadcrumb>> {
    Ok(build_breadcrumbs(&fqn::normalize(fqn)?, routes))
}
