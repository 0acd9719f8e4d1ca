pub mod source;

pub use source::{CatalogQuery, CatalogSource, Fetched};
