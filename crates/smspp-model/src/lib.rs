//! In-memory hierarchical block model for SMS++ networks.
//!
//! An SMS++ model is a tree of [`Block`]s. Each block owns a set of
//! [`Attribute`]s (small typed metadata), [`Dimension`]s (named array sizes),
//! [`Variable`]s (typed, dimensioned data arrays), and nested child blocks.
//! [`SMSNetwork`] is the root container, tagged with an [`SMSFileType`]
//! discriminator.
//!
//! # Overview
//!
//! - [`AttrValue`] / [`VarData`]: attribute and variable payload types
//! - [`Block`]: the tree node and its structural invariants
//! - [`SMSNetwork`]: the root container
//! - [`TreeOptions`]: ASCII tree rendering for inspection
//! - [`ModelError`]: model error types

mod block;
mod error;
mod iter;
mod network;
mod tree;
mod value;

pub use block::{Block, BlockField, DuplicatePolicy};
pub use error::{ComponentKind, ModelError};
pub use iter::BlockIter;
pub use network::{SMSFileType, SMSNetwork, FILE_TYPE_ATTR, TYPE_ATTR};
pub use tree::TreeOptions;
pub use value::{AttrValue, Attribute, Dimension, VarData, VarType, Variable};
