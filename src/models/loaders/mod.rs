pub mod json_loader;
pub mod toml_loader;

pub use json_loader::{load_dataset, parse_dataset};
pub use toml_loader::{load_catalog, parse_catalog};
