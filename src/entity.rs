//! Registry records and the per-kind routing table.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// The kinds of record the registry holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Node,
    NodeClass,
    NodeGroup,
}

/// Static routing data for one [`EntityKind`].
#[derive(Debug)]
pub struct KindInfo {
    /// URL path segment, e.g. `node_classes`
    pub segment: &'static str,
    /// JSON wrapper key used in create bodies, e.g. `node_class`
    pub wrapper: &'static str,
    /// Label used in request descriptions, e.g. `class`
    pub singular: &'static str,
    pub plural: &'static str,
}

const NODE: KindInfo = KindInfo {
    segment: "nodes",
    wrapper: "node",
    singular: "node",
    plural: "nodes",
};

const NODE_CLASS: KindInfo = KindInfo {
    segment: "node_classes",
    wrapper: "node_class",
    singular: "class",
    plural: "classes",
};

const NODE_GROUP: KindInfo = KindInfo {
    segment: "node_groups",
    wrapper: "node_group",
    singular: "group",
    plural: "groups",
};

impl EntityKind {
    pub const ALL: [EntityKind; 3] = [
        EntityKind::Node,
        EntityKind::NodeClass,
        EntityKind::NodeGroup,
    ];

    pub fn info(self) -> &'static KindInfo {
        match self {
            EntityKind::Node => &NODE,
            EntityKind::NodeClass => &NODE_CLASS,
            EntityKind::NodeGroup => &NODE_GROUP,
        }
    }

    /// Collection path for this kind, e.g. `/nodes.json`.
    pub fn path(self) -> String {
        format!("/{}.json", self.info().segment)
    }

    /// Wraps `fields` under this kind's JSON key.
    pub fn wrap(self, fields: serde_json::Value) -> serde_json::Value {
        let mut body = serde_json::Map::new();
        body.insert(self.info().wrapper.to_string(), fields);
        serde_json::Value::Object(body)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.info().singular)
    }
}

impl FromStr for EntityKind {
    type Err = anyhow::Error;

    /// Accepts singular or plural labels as well as path segments.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EntityKind::ALL
            .into_iter()
            .find(|kind| {
                let info = kind.info();
                s == info.singular || s == info.plural || s == info.segment || s == info.wrapper
            })
            .ok_or_else(|| {
                anyhow::anyhow!("Unknown entity kind '{}'. Expected node, class or group.", s)
            })
    }
}

/// Opaque registry-assigned identifier, kept exactly as received.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntityId(pub serde_json::Value);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            serde_json::Value::String(s) => write!(f, "{}", s),
            other => write!(f, "{}", other),
        }
    }
}

impl From<u64> for EntityId {
    fn from(id: u64) -> Self {
        EntityId(serde_json::Value::from(id))
    }
}

impl From<&str> for EntityId {
    fn from(id: &str) -> Self {
        EntityId(serde_json::Value::from(id))
    }
}

/// A record as returned by the registry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub id: EntityId,
    /// Fields the client does not inspect
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Entity {
    pub fn new(name: impl Into<String>, id: impl Into<EntityId>) -> Self {
        Self {
            name: name.into(),
            id: id.into(),
            extra: serde_json::Map::new(),
        }
    }
}

/// A key/value override attached to a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameter {
    pub key: String,
    pub value: String,
}

/// Converts a parameter map into the registry's attribute list, in key order.
pub fn parameter_attributes(parameters: &BTreeMap<String, String>) -> Vec<Parameter> {
    parameters
        .iter()
        .map(|(key, value)| Parameter {
            key: key.clone(),
            value: value.clone(),
        })
        .collect()
}
