//! Domain model (tasks, records, catalog, origins, patterns, errors).

pub mod catalog;
pub mod errors;
pub mod origin;
pub mod patterns;
pub mod record;
pub mod task;

pub use self::catalog::{AlivenessMap, Catalog, UpdateConfig};
pub use self::errors::CuratorError;
pub use self::origin::Origin;
pub use self::patterns::PatternSet;
pub use self::record::{ConfigRecord, SubRef};
pub use self::task::TaskDescriptor;
