//! Deployment domain: layout, stages, the managed config block and the
//! model catalog. No I/O happens here.

pub mod catalog;
pub mod layout;
pub mod marker;
pub mod stage;

pub use catalog::{Catalog, ModelSpec};
pub use layout::Layout;
pub use marker::MarkerBlock;
pub use stage::Stage;
