// Service exports
pub mod catalog;
pub mod options;

pub use catalog::{AssetCatalog, CatalogError, InMemoryCatalog};
pub use options::form_options;
