//! Human-readable tree rendering of a block hierarchy.

use std::fmt::Write as _;

use crate::block::{Block, TYPE_ATTR_NAME};

/// Controls which component details appear in the rendered tree.
#[derive(Debug, Clone, Copy, Default)]
pub struct TreeOptions {
    pub show_dimensions: bool,
    pub show_variables: bool,
    pub show_attributes: bool,
}

impl TreeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dimensions(mut self) -> Self {
        self.show_dimensions = true;
        self
    }

    pub fn with_variables(mut self) -> Self {
        self.show_variables = true;
        self
    }

    pub fn with_attributes(mut self) -> Self {
        self.show_attributes = true;
        self
    }

    /// Enables every detail section.
    pub fn full() -> Self {
        Self::new().with_dimensions().with_variables().with_attributes()
    }
}

impl Block {
    /// Renders this block and its descendants as an indented tree.
    ///
    /// Each block line shows the given name and the block type in
    /// brackets; detail lines for dimensions, variables, and attributes
    /// follow when enabled. The reserved type attribute is not listed
    /// among attributes since it already appears on the block line.
    pub fn tree_string(&self, name: &str, options: TreeOptions) -> String {
        let mut out = String::new();
        self.render(&mut out, name, "", "", options);
        out
    }

    fn render(
        &self,
        out: &mut String,
        name: &str,
        connector: &str,
        child_prefix: &str,
        options: TreeOptions,
    ) {
        let type_label = self.block_type().unwrap_or("Block");
        let _ = writeln!(out, "{connector}{name} [{type_label}]");

        if options.show_dimensions {
            for (dim, size) in self.dimensions() {
                let _ = writeln!(out, "{child_prefix}- dim {dim} = {size}");
            }
        }
        if options.show_variables {
            for var in self.variables().values() {
                let dims = var.dims.join(", ");
                let _ = writeln!(
                    out,
                    "{child_prefix}- var {} ({}) [{}]",
                    var.name,
                    dims,
                    var.dtype().as_str()
                );
            }
        }
        if options.show_attributes {
            for (attr, value) in self.attributes() {
                if attr == TYPE_ATTR_NAME {
                    continue;
                }
                let _ = writeln!(
                    out,
                    "{child_prefix}- attr {attr}: {}",
                    value.type_name()
                );
            }
        }

        let count = self.blocks().len();
        for (idx, (child_name, child)) in self.blocks().iter().enumerate() {
            let last = idx + 1 == count;
            let branch = if last { "└── " } else { "├── " };
            let next_prefix = if last { "    " } else { "│   " };
            child.render(
                out,
                child_name,
                &format!("{child_prefix}{branch}"),
                &format!("{child_prefix}{next_prefix}"),
                options,
            );
        }
    }
}
