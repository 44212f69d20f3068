//! JcrNode entity - a repository node built from Sling-Initial-Content JSON
//!
//! Every JSON object becomes a node. Non-object values become attributes,
//! encoded in the repository's typed string form (`{Boolean}true`,
//! `{Date}...`, `[a,b]`).

use chrono::{DateTime, FixedOffset, Local, NaiveDateTime, TimeZone};
use serde_json::{Map, Value};

use crate::domain::services::SerializeError;

/// A typed attribute value
#[derive(Debug, Clone, PartialEq)]
pub enum JcrValue {
    Boolean(bool),
    String(String),
    Date(DateTime<FixedOffset>),
    Array(Vec<JcrValue>),
}

impl JcrValue {
    /// Convert a non-object JSON value.
    ///
    /// Numbers, nulls and objects nested in arrays have no encoding and fail
    /// with `UnsupportedValueType`.
    pub fn from_json(value: &Value) -> Result<Self, SerializeError> {
        match value {
            Value::Bool(b) => Ok(JcrValue::Boolean(*b)),
            Value::String(s) => Ok(JcrValue::String(s.clone())),
            Value::Array(items) => items
                .iter()
                .map(JcrValue::from_json)
                .collect::<Result<Vec<_>, _>>()
                .map(JcrValue::Array),
            Value::Number(_) | Value::Null | Value::Object(_) => {
                Err(SerializeError::UnsupportedValueType {
                    type_name: json_type_name(value),
                    value: value.to_string(),
                })
            }
        }
    }

    /// A date in the process's local timezone.
    ///
    /// `None` when the local time is ambiguous or skipped (DST transitions).
    pub fn local_date(naive: NaiveDateTime) -> Option<Self> {
        Local
            .from_local_datetime(&naive)
            .single()
            .map(|dt| JcrValue::Date(dt.fixed_offset()))
    }

    /// Serialized attribute form
    pub fn encode(&self) -> String {
        match self {
            JcrValue::Boolean(b) => format!("{{Boolean}}{}", b),
            JcrValue::String(s) => s.clone(),
            JcrValue::Date(date) => {
                format!("{{Date}}{}", date.format("%Y-%m-%dT%H:%M:%S%.3f%:z"))
            }
            JcrValue::Array(values) => {
                let encoded: Vec<String> = values.iter().map(JcrValue::encode).collect();
                format!("[{}]", encoded.join(","))
            }
        }
    }
}

pub(crate) fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// A node: encoded attributes plus nested child nodes, both in source order
#[derive(Debug, Clone, PartialEq)]
pub struct JcrNode {
    name: String,
    attributes: Vec<(String, String)>,
    children: Vec<JcrNode>,
}

impl JcrNode {
    /// Build a node (and its subtree) from a JSON object
    pub fn from_object(
        name: impl Into<String>,
        object: &Map<String, Value>,
    ) -> Result<Self, SerializeError> {
        let mut attributes = Vec::new();
        let mut children = Vec::new();

        for (key, value) in object {
            match value {
                Value::Object(child) => children.push(JcrNode::from_object(key.clone(), child)?),
                other => attributes.push((key.clone(), JcrValue::from_json(other)?.encode())),
            }
        }

        Ok(Self {
            name: name.into(),
            attributes,
            children,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[(String, String)] {
        &self.attributes
    }

    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn children(&self) -> &[JcrNode] {
        &self.children
    }

    pub fn child(&self, name: &str) -> Option<&JcrNode> {
        self.children.iter().find(|c| c.name == name)
    }

    /// Append this node as an element with its own attributes
    pub fn write_xml(&self, out: &mut String) {
        let attributes = self
            .attributes
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()));
        self.write_element(&self.name, attributes, out);
    }

    /// Append an element for this node's children under the given tag and
    /// attribute list. Values are written verbatim.
    pub(crate) fn write_element<'a>(
        &self,
        tag: &str,
        attributes: impl Iterator<Item = (&'a str, &'a str)>,
        out: &mut String,
    ) {
        out.push('<');
        out.push_str(tag);
        for (key, value) in attributes {
            out.push(' ');
            out.push_str(key);
            out.push_str("=\"");
            out.push_str(value);
            out.push('"');
        }
        out.push('>');
        for child in &self.children {
            child.write_xml(out);
        }
        out.push_str("</");
        out.push_str(tag);
        out.push('>');
    }
}
