//! Glossary helpers: FQN lists, related-term options, status presentation
//! and search filters.

use serde::Serialize;
use serde_json::{json, Value};

use crate::domain::entities::{EntityReference, GlossaryTerm, Status};

/// FQNs of the given terms, in order.
pub fn term_fqn_list(terms: &[GlossaryTerm]) -> Vec<String> {
    terms
        .iter()
        .map(|term| term.fully_qualified_name.clone())
        .collect()
}

/// Selectable option for a related term.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RelatedTermOption {
    pub value: String,
    pub label: String,
    pub key: String,
    #[serde(flatten)]
    pub reference: EntityReference,
}

/// Options for related-term pickers; labels prefer the display name.
pub fn related_term_options(references: Option<&[EntityReference]>) -> Vec<RelatedTermOption> {
    references
        .unwrap_or_default()
        .iter()
        .map(|reference| RelatedTermOption {
            value: reference.id.clone(),
            label: reference
                .display_name
                .clone()
                .filter(|d| !d.is_empty())
                .or_else(|| reference.name.clone())
                .unwrap_or_default(),
            key: reference.id.clone(),
            reference: reference.clone(),
        })
        .collect()
}

/// Visual class of a status badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum StatusType {
    Success,
    Warning,
    Failure,
}

pub fn status_class(status: Status) -> StatusType {
    match status {
        Status::Approved => StatusType::Success,
        Status::Draft | Status::Deprecated => StatusType::Warning,
        Status::Rejected => StatusType::Failure,
    }
}

/// Entry of a status filter menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusFilter {
    pub text: String,
    pub value: Status,
}

/// Filterable statuses. `Deprecated` is not offered.
pub fn status_filters() -> Vec<StatusFilter> {
    Status::ALL
        .iter()
        .filter(|status| **status != Status::Deprecated)
        .map(|status| StatusFilter {
            text: status.as_str().to_string(),
            value: *status,
        })
        .collect()
}

/// Search query filter excluding assets already tagged with `fqn`.
pub fn exclude_term_query_filter(fqn: &str) -> Value {
    json!({
        "query": {
            "bool": {
                "must": [
                    {
                        "bool": {
                            "must": [
                                {
                                    "bool": {
                                        "must_not": {
                                            "term": { "tags.tagFQN": fqn }
                                        }
                                    }
                                }
                            ]
                        }
                    }
                ]
            }
        }
    })
}
