//! Domain Services
//!
//! Path mapping and node serialization. Filesystem access is limited to
//! existence checks and the in-place tree conversion.

mod jcr_xml;
mod path_mapper;

pub use jcr_xml::{
    convert_file, convert_tree, descriptor_path_for, json_files_within, serialize, SerializeError,
    NAMESPACES, ROOT_TAG,
};
pub use path_mapper::{
    flatten_sling_json_path, normalize_descriptor_path, resolve_repository_path, PathMapper,
    PathResolutionError,
};
