mod builtin;
mod dataset;
mod table;

pub use dataset::{Dataset, NodeSeed};
pub use table::ConceptTable;
