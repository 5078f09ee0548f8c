//! Core record types for a declarative property-graph dataset.
//!
//! A dataset is a table of node and relationship records. Nothing here knows
//! about a particular store; backends turn these records into writes.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

// ── Properties ────────────────────────────────────────────────────

/// A scalar attribute value carried by a node or relationship.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PropertyValue {
    Bool(bool),
    Integer(i64),
    Float(f64),
    String(String),
}

impl PropertyValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Integer(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        PropertyValue::Float(f)
    }
}

/// Ordered attribute map. Ordering keeps generated writes deterministic.
pub type Properties = BTreeMap<String, PropertyValue>;

// ── Nodes ─────────────────────────────────────────────────────────

/// A node to create: one label, one string key, scalar attributes.
///
/// The key is written under `key_property`; `properties` holds the rest.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeSpec {
    pub label: String,
    pub key_property: String,
    pub key: String,
    #[serde(default)]
    pub properties: Properties,
}

impl NodeSpec {
    pub fn new(label: &str, key_property: &str, key: &str) -> Self {
        Self {
            label: label.to_string(),
            key_property: key_property.to_string(),
            key: key.to_string(),
            properties: Properties::new(),
        }
    }

    /// Builder-style attribute setter.
    pub fn with(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }

    /// All attributes as stored, key property included.
    pub fn stored_properties(&self) -> Properties {
        let mut props = self.properties.clone();
        props.insert(
            self.key_property.clone(),
            PropertyValue::String(self.key.clone()),
        );
        props
    }

    pub fn node_ref(&self) -> NodeRef {
        NodeRef::new(&self.label, &self.key)
    }
}

/// Typed records that know how to describe themselves as a graph node.
pub trait ToNodeSpec {
    fn to_node_spec(&self) -> NodeSpec;
}

/// Reference to a node by label and key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeRef {
    pub label: String,
    pub key: String,
}

impl NodeRef {
    pub fn new(label: &str, key: &str) -> Self {
        Self {
            label: label.to_string(),
            key: key.to_string(),
        }
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.label, self.key)
    }
}

/// A node reference resolved against its dataset, so a store can look the
/// node up by `(label, key_property = key)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint<'a> {
    pub label: &'a str,
    pub key_property: &'a str,
    pub key: &'a str,
}

// ── Relationships ─────────────────────────────────────────────────

/// A directed, typed relationship between two nodes of the same dataset.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelationshipSpec {
    pub rel_type: String,
    pub from: NodeRef,
    pub to: NodeRef,
    #[serde(default)]
    pub properties: Properties,
}

impl RelationshipSpec {
    pub fn new(rel_type: &str, from: NodeRef, to: NodeRef) -> Self {
        Self {
            rel_type: rel_type.to_string(),
            from,
            to,
            properties: Properties::new(),
        }
    }

    pub fn with(mut self, name: &str, value: impl Into<PropertyValue>) -> Self {
        self.properties.insert(name.to_string(), value.into());
        self
    }
}
