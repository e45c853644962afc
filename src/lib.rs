//! glosstree: glossary term hierarchies
//!
//! Builds forests from flat glossary-term records, replaces subtrees as
//! children are fetched, searches forests by substring and derives
//! breadcrumbs from fully-qualified names.

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod tree_traits;
pub mod util;
