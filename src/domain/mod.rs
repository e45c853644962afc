//! Domain layer: glossary entities and tree algorithms
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).

pub mod breadcrumb;
pub mod builder;
pub mod entities;
pub mod error;
pub mod fqn;
pub mod glossary;
pub mod search;

pub use breadcrumb::{breadcrumbs_for, build_breadcrumbs, Breadcrumb, GlossaryRoutes};
pub use builder::{
    build_tree, depth, find_by_id, leaf_fqns, node_count, replace_children, root_level_terms,
    update_subtree, ListTermsParams, TreeBuilder,
};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use glossary::{
    exclude_term_query_filter, related_term_options, status_class, status_filters,
    term_fqn_list, RelatedTermOption, StatusFilter, StatusType,
};
pub use search::search_tree;
