//! Per-scope properties resolution.

pub mod parser;
pub mod resolver;
pub mod scope;
pub mod shared;
pub mod table;

pub use parser::PropertiesParseError;
pub use resolver::{PropertyCache, PropertyResolver};
pub use scope::Scope;
pub use shared::SharedPropertyResolver;
pub use table::PropertyTable;
