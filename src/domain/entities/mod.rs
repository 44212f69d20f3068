//! Domain Entities
//!
//! - `JcrNode` - A repository node converted from Sling-Initial-Content JSON
//! - `PackageDescriptor` - A staged vault package
//! - `SyncJob` / `ChangeBatch` - Units of work handed to the scheduler

mod jcr_node;
mod package;
mod sync_job;

pub use jcr_node::{JcrNode, JcrValue};
pub(crate) use jcr_node::json_type_name;
pub use package::{
    filter_xml, settings_xml, PackageDescriptor, IGNORED_NAMES, JCR_ROOT_DIR, VAULT_DIR,
};
pub use sync_job::{ChangeBatch, SyncJob};
