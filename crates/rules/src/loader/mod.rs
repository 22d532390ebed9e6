//! Loading rule documents from YAML files on disk.

mod core;
mod error;


pub use self::core::{parse_document, RuleLoader};
pub use self::error::{LoadResult, LoadStatus, Result, RuleError};
