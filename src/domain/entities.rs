//! Domain entities: glossary records, references and tree nodes

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

/// Relation tag applied to terms nested under a parent term.
pub const GLOSSARY_TERM_TYPE: &str = "glossaryTerm";

/// Lightweight pointer to another catalog entity.
///
/// Parent links are carried as references and resolved through lookups,
/// never as ownership.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EntityReference {
    pub id: String,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Review status of a glossary term.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Draft,
    Approved,
    Deprecated,
    Rejected,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Draft,
        Status::Approved,
        Status::Deprecated,
        Status::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Draft => "Draft",
            Status::Approved => "Approved",
            Status::Deprecated => "Deprecated",
            Status::Rejected => "Rejected",
        }
    }
}

/// A glossary (the container of a term hierarchy).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Glossary {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

/// Flat glossary term record as delivered by the search service.
///
/// `children` only signals whether the term has children; the references
/// themselves are not resolved.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GlossaryTerm {
    pub id: String,
    pub fully_qualified_name: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<EntityReference>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<EntityReference>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl GlossaryTerm {
    /// Minimal record, mostly useful for fixtures.
    pub fn new(
        id: impl Into<String>,
        fully_qualified_name: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            fully_qualified_name: fully_qualified_name.into(),
            name: name.into(),
            ..Default::default()
        }
    }

    /// Set the parent reference by FQN and id.
    pub fn with_parent(mut self, id: impl Into<String>, fqn: impl Into<String>) -> Self {
        self.parent = Some(EntityReference {
            id: id.into(),
            fully_qualified_name: Some(fqn.into()),
            ..Default::default()
        });
        self
    }

    /// Mark the record as having children (ids only).
    pub fn with_children<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.children = Some(
            ids.into_iter()
                .map(|id| EntityReference {
                    id: id.into(),
                    ..Default::default()
                })
                .collect(),
        );
        self
    }

    pub fn with_display_name(mut self, display_name: impl Into<String>) -> Self {
        self.display_name = Some(display_name.into());
        self
    }

    /// True if the record announces at least one child.
    pub fn has_children(&self) -> bool {
        self.children.as_ref().is_some_and(|c| !c.is_empty())
    }
}

/// Children slot of a tree node.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Children {
    /// No children indicated.
    #[default]
    Absent,
    /// Children exist but none have been loaded yet.
    Pending,
    /// Children loaded, in insertion order. May be empty.
    Loaded(Vec<GlossaryTermNode>),
}

impl Children {
    pub fn is_absent(&self) -> bool {
        matches!(self, Children::Absent)
    }

    /// `Pending` and `Loaded` slots can receive children.
    pub fn is_initialized(&self) -> bool {
        !self.is_absent()
    }

    /// Loaded children, empty for `Absent` and `Pending`.
    pub fn as_slice(&self) -> &[GlossaryTermNode] {
        match self {
            Children::Loaded(nodes) => nodes,
            _ => &[],
        }
    }

    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// Append a child, turning a `Pending` slot into `Loaded`.
    /// Appending to an `Absent` slot is ignored.
    pub fn push(&mut self, node: GlossaryTermNode) {
        match self {
            Children::Absent => {}
            Children::Pending => *self = Children::Loaded(vec![node]),
            Children::Loaded(nodes) => nodes.push(node),
        }
    }
}

impl Serialize for Children {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nodes = self.as_slice();
        let mut seq = serializer.serialize_seq(Some(nodes.len()))?;
        for node in nodes {
            seq.serialize_element(node)?;
        }
        seq.end()
    }
}

/// Glossary term placed in a forest, owning its children.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GlossaryTermNode {
    pub id: String,
    pub fully_qualified_name: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<EntityReference>,
    #[serde(skip_serializing_if = "Children::is_absent")]
    pub children: Children,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<Status>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub entity_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deleted: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl GlossaryTermNode {
    /// Clone a record into a node whose slot reflects the record's children marker.
    pub fn from_record(record: &GlossaryTerm) -> Self {
        Self {
            id: record.id.clone(),
            fully_qualified_name: record.fully_qualified_name.clone(),
            name: record.name.clone(),
            display_name: record.display_name.clone(),
            description: record.description.clone(),
            parent: record.parent.clone(),
            children: if record.has_children() {
                Children::Pending
            } else {
                Children::Absent
            },
            status: record.status,
            entity_type: record.entity_type.clone(),
            deleted: record.deleted,
            href: record.href.clone(),
        }
    }

    /// Copy of this node with its children slot replaced.
    pub fn with_children(&self, children: Children) -> Self {
        Self {
            id: self.id.clone(),
            fully_qualified_name: self.fully_qualified_name.clone(),
            name: self.name.clone(),
            display_name: self.display_name.clone(),
            description: self.description.clone(),
            parent: self.parent.clone(),
            children,
            status: self.status,
            entity_type: self.entity_type.clone(),
            deleted: self.deleted,
            href: self.href.clone(),
        }
    }

    /// Name shown to users: display name if set, else name.
    pub fn label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(&self.name)
    }

    /// Number of nodes in this subtree, including self.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .as_slice()
            .iter()
            .map(|child| child.node_count())
            .sum::<usize>()
    }

    pub fn depth(&self) -> usize {
        1 + self
            .children
            .as_slice()
            .iter()
            .map(|child| child.depth())
            .max()
            .unwrap_or(0)
    }
}

impl From<&GlossaryTerm> for GlossaryTermNode {
    fn from(record: &GlossaryTerm) -> Self {
        Self::from_record(record)
    }
}

impl From<&GlossaryTerm> for EntityReference {
    fn from(term: &GlossaryTerm) -> Self {
        Self {
            id: term.id.clone(),
            entity_type: Some(GLOSSARY_TERM_TYPE.to_string()),
            name: Some(term.name.clone()),
            fully_qualified_name: Some(term.fully_qualified_name.clone()),
            display_name: term.display_name.clone(),
            description: term.description.clone(),
            deleted: term.deleted,
            href: term.href.clone(),
        }
    }
}

impl From<&Glossary> for EntityReference {
    fn from(glossary: &Glossary) -> Self {
        Self {
            id: glossary.id.clone(),
            entity_type: Some(GLOSSARY_TERM_TYPE.to_string()),
            name: Some(glossary.name.clone()),
            fully_qualified_name: Some(glossary.fully_qualified_name.clone().unwrap_or_default()),
            display_name: glossary.display_name.clone(),
            description: glossary.description.clone(),
            deleted: glossary.deleted,
            href: glossary.href.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_record_with_empty_children_when_converting_then_slot_is_absent() {
        let record = GlossaryTerm::new("1", "g.a", "a").with_children(Vec::<String>::new());
        let node = GlossaryTermNode::from(&record);
        assert_eq!(node.children, Children::Absent);
    }

    #[test]
    fn given_record_with_children_when_converting_then_slot_is_pending() {
        let record = GlossaryTerm::new("1", "g.a", "a").with_children(["2"]);
        let node = GlossaryTermNode::from(&record);
        assert_eq!(node.children, Children::Pending);
        assert!(node.children.is_initialized());
        assert!(node.children.is_empty());
    }

    #[test]
    fn given_absent_slot_when_pushing_then_ignored() {
        let mut slot = Children::Absent;
        slot.push(GlossaryTermNode::from(&GlossaryTerm::new("2", "b", "b")));
        assert!(slot.is_absent());
    }

    #[test]
    fn given_camel_case_json_when_deserializing_then_reads_record() {
        let json = r#"{
            "id": "42",
            "fullyQualifiedName": "Business.Revenue",
            "name": "Revenue",
            "displayName": "Revenue (net)",
            "parent": {"id": "7", "fullyQualifiedName": "Business"},
            "children": [{"id": "43"}],
            "status": "Approved"
        }"#;
        let term: GlossaryTerm = serde_json::from_str(json).expect("parse term");

        assert_eq!(term.fully_qualified_name, "Business.Revenue");
        assert_eq!(term.display_name.as_deref(), Some("Revenue (net)"));
        assert_eq!(
            term.parent.as_ref().and_then(|p| p.fully_qualified_name.as_deref()),
            Some("Business")
        );
        assert!(term.has_children());
        assert_eq!(term.status, Some(Status::Approved));
    }

    #[test]
    fn given_node_slots_when_serializing_then_absent_is_omitted_and_pending_is_empty() {
        let leaf = GlossaryTermNode::from(&GlossaryTerm::new("1", "a", "a"));
        let pending = GlossaryTermNode::from(&GlossaryTerm::new("2", "b", "b").with_children(["3"]));

        let leaf_json = serde_json::to_value(&leaf).unwrap();
        let pending_json = serde_json::to_value(&pending).unwrap();

        assert!(leaf_json.get("children").is_none());
        assert_eq!(pending_json["children"], serde_json::json!([]));
        assert_eq!(pending_json["fullyQualifiedName"], "b");
    }

    #[test]
    fn given_term_when_converting_to_reference_then_tagged_as_glossary_term() {
        let term = GlossaryTerm::new("1", "g.a", "a").with_display_name("A");
        let reference = EntityReference::from(&term);
        assert_eq!(reference.entity_type.as_deref(), Some(GLOSSARY_TERM_TYPE));
        assert_eq!(reference.fully_qualified_name.as_deref(), Some("g.a"));
        assert_eq!(reference.display_name.as_deref(), Some("A"));
    }

    #[test]
    fn given_glossary_without_fqn_when_converting_then_fqn_is_empty() {
        let glossary = Glossary {
            id: "g".into(),
            name: "Business".into(),
            ..Default::default()
        };
        let reference = EntityReference::from(&glossary);
        assert_eq!(reference.fully_qualified_name.as_deref(), Some(""));
    }
}
