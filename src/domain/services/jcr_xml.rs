//! Sling-Initial-Content JSON to `.content.xml` conversion
//!
//! A `foo.json` node definition becomes `foo/.content.xml`. Output is
//! written compactly, one element per JSON object, in source key order.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;
use tracing::{debug, warn};

use crate::domain::entities::{json_type_name, JcrNode};
use crate::domain::value_objects::{DESCRIPTOR_FILE_NAME, JSON_SUFFIX};

/// Tag of every descriptor's root element
pub const ROOT_TAG: &str = "jcr:root";

/// Namespace declarations on every root element, in output order
pub const NAMESPACES: [(&str, &str); 5] = [
    ("xmlns:cq", "http://www.day.com/jcr/cq/1.0"),
    ("xmlns:sling", "http://sling.apache.org/jcr/sling/1.0"),
    ("xmlns:jcr", "http://www.jcp.org/jcr/1.0"),
    ("xmlns:vlt", "http://www.day.com/jcr/vault/1.0"),
    ("xmlns:nt", "http://www.jcp.org/jcr/nt/1.0"),
];

/// Conversion failures
#[derive(Error, Debug)]
pub enum SerializeError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("node definition must be a JSON object, found {found}")]
    NotAnObject { found: &'static str },

    #[error("unknown type, cannot serialize {type_name} value: {value}")]
    UnsupportedValueType {
        type_name: &'static str,
        value: String,
    },

    #[error("{} must end in .json", path.display())]
    InvalidInput { path: PathBuf },

    #[error("failed to {action} {}: {source}", path.display())]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: Box<SerializeError>,
    },
}

/// Convert one JSON node definition to descriptor XML
pub fn serialize(json: &str) -> Result<String, SerializeError> {
    let value: Value = serde_json::from_str(json)?;
    let object = match &value {
        Value::Object(object) => object,
        other => {
            return Err(SerializeError::NotAnObject {
                found: json_type_name(other),
            })
        }
    };
    let root = JcrNode::from_object(ROOT_TAG, object)?;

    let mut attributes: Vec<(&str, &str)> = NAMESPACES.to_vec();
    for (key, value) in root.attributes() {
        match attributes.iter_mut().find(|(k, _)| *k == key.as_str()) {
            Some(existing) => {
                warn!(
                    "Attribute {} replaces the {} namespace declaration",
                    key, existing.1
                );
                existing.1 = value.as_str();
            }
            None => attributes.push((key.as_str(), value.as_str())),
        }
    }

    let mut xml = String::new();
    root.write_element(ROOT_TAG, attributes.into_iter(), &mut xml);
    Ok(xml)
}

/// Where the descriptor for a JSON source is written.
///
/// `/foo/my_node.json` becomes `/foo/my_node/.content.xml`.
pub fn descriptor_path_for(json_path: &Path) -> Result<PathBuf, SerializeError> {
    let invalid = || SerializeError::InvalidInput {
        path: json_path.to_path_buf(),
    };
    let name = json_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(invalid)?;
    let node_name = name.strip_suffix(JSON_SUFFIX).ok_or_else(invalid)?;

    let parent = json_path.parent().unwrap_or_else(|| Path::new(""));
    Ok(parent.join(node_name).join(DESCRIPTOR_FILE_NAME))
}

/// Every `*.json` file under `root`, depth first, sorted per directory
pub fn json_files_within(root: &Path) -> Result<Vec<PathBuf>, SerializeError> {
    let mut files = Vec::new();
    collect_json_files(root, &mut files)?;
    Ok(files)
}

fn collect_json_files(dir: &Path, files: &mut Vec<PathBuf>) -> Result<(), SerializeError> {
    let read_err = |source| SerializeError::Io {
        action: "read directory",
        path: dir.to_path_buf(),
        source,
    };
    let mut entries = fs::read_dir(dir)
        .map_err(read_err)?
        .map(|entry| entry.and_then(|e| Ok((e.path(), e.file_type()?))))
        .collect::<Result<Vec<_>, _>>()
        .map_err(read_err)?;
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    // Linked directories are not descended into
    for (path, file_type) in entries {
        if file_type.is_dir() {
            collect_json_files(&path, files)?;
        } else if path.to_string_lossy().ends_with(JSON_SUFFIX) {
            files.push(path);
        }
    }
    Ok(())
}

/// Replace every JSON source under `root` with its descriptor.
///
/// The first failure stops the walk; files converted before it stay
/// converted.
pub fn convert_tree(root: &Path) -> Result<Vec<PathBuf>, SerializeError> {
    let mut written = Vec::new();
    for json_path in json_files_within(root)? {
        let descriptor = convert_file(&json_path).map_err(|source| SerializeError::File {
            path: json_path.clone(),
            source: Box::new(source),
        })?;
        debug!("Converted {} to {}", json_path.display(), descriptor.display());
        written.push(descriptor);
    }
    Ok(written)
}

/// Replace one JSON source with its descriptor, returning the descriptor path
pub fn convert_file(json_path: &Path) -> Result<PathBuf, SerializeError> {
    let io = |action: &'static str, path: &Path| {
        let path = path.to_path_buf();
        move |source| SerializeError::Io {
            action,
            path,
            source,
        }
    };

    let descriptor = descriptor_path_for(json_path)?;
    let json = fs::read_to_string(json_path).map_err(io("read", json_path))?;
    let xml = serialize(&json)?;

    if let Some(dir) = descriptor.parent() {
        fs::create_dir_all(dir).map_err(io("create directory", dir))?;
    }
    fs::write(&descriptor, xml).map_err(io("write", &descriptor))?;
    fs::remove_file(json_path).map_err(io("remove", json_path))?;
    Ok(descriptor)
}
