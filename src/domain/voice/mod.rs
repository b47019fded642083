//! Voice Context - 音色限界上下文
//!
//! 职责:
//! - 平台音色快照
//! - 音色目录刷新与默认音色维护
//! - 按名称查找音色

mod catalog;
mod value_objects;

pub use catalog::{CatalogChange, VoiceCatalog};
pub use value_objects::VoiceDescriptor;
