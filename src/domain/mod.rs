//! Domain Layer
//!
//! Path mapping, node serialization and the types the sync pipeline passes
//! around.
//!
//! ## Structure
//!
//! - `entities/` - JcrNode, PackageDescriptor, SyncJob, ChangeBatch
//! - `value_objects/` - RepositoryPath, ContentPath, Host, WatchTarget
//! - `services/` - PathMapper and the JSON to XML serializer
//! - `ports/` - Importer and command runner interfaces

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
