//! Dataset loading.
//!
//! Routes are read once at startup from a JSON document at a URL or a
//! local path. Any failure (unreachable source, bad status, malformed or
//! invalid document, timeout) is logged and replaced by the embedded
//! sample routes, so the rest of the viewer never sees an empty dataset.

mod embedded;
mod error;
mod loader;
mod source;

pub use embedded::embedded_routes;
pub use error::DatasetError;
pub use loader::{
    DEFAULT_FETCH_TIMEOUT, DatasetLoader, DatasetOrigin, LoadedDataset, parse_document,
};
pub use source::{DEFAULT_DATASET, DatasetSource};
