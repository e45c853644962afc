//! Glossary service
//!
//! Fetches flat term records from a term source and turns them into
//! forests, filtered levels, search results and breadcrumbs.

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::config::Settings;
use crate::domain::{
    breadcrumbs_for, build_tree, replace_children, root_level_terms, search_tree,
    term_fqn_list, Breadcrumb, GlossaryTerm, GlossaryTermNode, ListTermsParams,
};
use crate::infrastructure::traits::{SearchRequest, TermSource};

/// Query matching every term.
pub const WILD_CARD: &str = "*";

/// Result of replacing a subtree.
#[derive(Debug, Clone)]
pub struct ExpandOutcome {
    pub forest: Vec<GlossaryTermNode>,
    /// False if no node carried the target id (forest unchanged)
    pub updated: bool,
}

/// Service for glossary hierarchies.
pub struct GlossaryService {
    source: Arc<dyn TermSource>,
    settings: Arc<Settings>,
}

impl GlossaryService {
    /// Create a new glossary service.
    pub fn new(source: Arc<dyn TermSource>, settings: Arc<Settings>) -> Self {
        Self { source, settings }
    }

    /// Fetch one page of terms matching a wildcard query.
    ///
    /// Source failures are returned with the underlying error as source.
    #[instrument(level = "debug", skip(self))]
    pub fn search_terms(
        &self,
        query: &str,
        page: usize,
        page_size: usize,
    ) -> ApplicationResult<Vec<GlossaryTerm>> {
        let request = SearchRequest {
            query: query.to_string(),
            page,
            page_size,
            index: self.settings.search_index.clone(),
        };
        self.source
            .search(&request)
            .with_context(format!("search glossary terms: {}", query))
    }

    /// Fetch all glossary terms (first page of a wildcard query).
    pub fn fetch_glossary_terms(&self) -> ApplicationResult<Vec<GlossaryTerm>> {
        let terms = self.search_terms(WILD_CARD, 1, self.settings.page_size)?;
        info!("fetched {} glossary terms", terms.len());
        Ok(terms)
    }

    /// FQNs of all glossary terms.
    pub fn term_fqns(&self) -> ApplicationResult<Vec<String>> {
        Ok(term_fqn_list(&self.fetch_glossary_terms()?))
    }

    /// Fetch all terms and build the forest.
    pub fn load_forest(&self) -> ApplicationResult<Vec<GlossaryTermNode>> {
        let terms = self.fetch_glossary_terms()?;
        let forest = build_tree(&terms);
        debug!("load_forest: {} roots", forest.len());
        Ok(forest)
    }

    /// Terms of one hierarchy level (glossary roots or children of a parent).
    pub fn root_terms(&self, params: &ListTermsParams) -> ApplicationResult<Vec<GlossaryTerm>> {
        let terms = self.fetch_glossary_terms()?;
        Ok(root_level_terms(&terms, params))
    }

    /// Forest filtered by a case-insensitive substring query.
    pub fn search_forest(&self, query: &str) -> ApplicationResult<Vec<GlossaryTermNode>> {
        let forest = self.load_forest()?;
        Ok(search_tree(&forest, query))
    }

    /// Replace the children of `term_id` with a freshly fetched batch.
    ///
    /// The batch is built into a forest of its own before it is attached.
    pub fn expand(
        &self,
        mut forest: Vec<GlossaryTermNode>,
        children: &[GlossaryTerm],
        term_id: &str,
    ) -> ExpandOutcome {
        let new_children = build_tree(children);
        let updated = replace_children(&mut forest, &new_children, term_id);
        debug!(
            "expand: term={} children={} updated={}",
            term_id,
            new_children.len(),
            updated
        );
        ExpandOutcome { forest, updated }
    }

    /// Breadcrumbs for a term FQN using the configured routes.
    pub fn breadcrumbs(&self, fqn: &str) -> ApplicationResult<Vec<Breadcrumb>> {
        Ok(breadcrumbs_for(fqn, &self.settings.routes())?)
    }
}
