//! DOM arena: slotmap-backed element tree with selector queries.

pub mod node;
pub mod query;
pub mod tree;

pub use node::{NodeData, NodeId};
pub use tree::Dom;
