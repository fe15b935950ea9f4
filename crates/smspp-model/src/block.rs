//! The block tree: the central container of the model.

use indexmap::IndexMap;

use crate::error::{ComponentKind, ModelError};
use crate::iter::BlockIter;
use crate::value::{AttrValue, Variable};

/// Reserved attribute carrying the block type, e.g. "UCBlock".
pub(crate) const TYPE_ATTR_NAME: &str = "type";

/// What to do when an added component collides with an existing name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Overwrite the existing component.
    #[default]
    Replace,
    /// Fail with a duplicate-name error.
    Reject,
}

/// A field to attach when constructing a block in one call.
///
/// Dimensions are applied before attributes and variables so that variables
/// in the same field list can reference dimensions declared alongside them.
#[derive(Debug, Clone, PartialEq)]
pub enum BlockField {
    Attr(AttrValue),
    Dim(u64),
    Var(Variable),
}

impl From<u64> for BlockField {
    fn from(v: u64) -> Self {
        BlockField::Dim(v)
    }
}

impl From<Variable> for BlockField {
    fn from(v: Variable) -> Self {
        BlockField::Var(v)
    }
}

impl From<AttrValue> for BlockField {
    fn from(v: AttrValue) -> Self {
        BlockField::Attr(v)
    }
}

impl From<&str> for BlockField {
    fn from(v: &str) -> Self {
        BlockField::Attr(AttrValue::from(v))
    }
}

impl From<String> for BlockField {
    fn from(v: String) -> Self {
        BlockField::Attr(AttrValue::from(v))
    }
}

impl From<i64> for BlockField {
    fn from(v: i64) -> Self {
        BlockField::Attr(AttrValue::Int(v))
    }
}

impl From<f64> for BlockField {
    fn from(v: f64) -> Self {
        BlockField::Attr(AttrValue::Float(v))
    }
}

/// A node of the model tree.
///
/// A block owns four name-keyed component maps. Child blocks are owned by
/// value, so a block always has at most one parent and the tree cannot
/// contain cycles; `clone()` performs a deep copy of the whole subtree.
/// Maps preserve insertion order, which drives both traversal and the
/// serialized layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Block {
    attributes: IndexMap<String, AttrValue>,
    dimensions: IndexMap<String, u64>,
    variables: IndexMap<String, Variable>,
    blocks: IndexMap<String, Block>,
}

impl Block {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a block of the given type and attaches the fields,
    /// dimensions first so variables can resolve against them.
    pub fn from_fields(
        block_type: &str,
        fields: Vec<(String, BlockField)>,
    ) -> Result<Self, ModelError> {
        let mut block = Block::new();
        block.set_block_type(block_type);
        for (name, field) in &fields {
            if let BlockField::Dim(size) = field {
                block.add_dimension(name, *size, DuplicatePolicy::Reject)?;
            }
        }
        for (name, field) in fields {
            match field {
                BlockField::Dim(_) => {}
                BlockField::Attr(value) => {
                    block.add_attribute(name, value, DuplicatePolicy::Reject)?;
                }
                BlockField::Var(mut var) => {
                    var.name = name;
                    block.add_variable(var, DuplicatePolicy::Reject)?;
                }
            }
        }
        Ok(block)
    }

    // --- attributes ---

    pub fn add_attribute(
        &mut self,
        name: impl Into<String>,
        value: impl Into<AttrValue>,
        policy: DuplicatePolicy,
    ) -> Result<(), ModelError> {
        let name = name.into();
        if policy == DuplicatePolicy::Reject && self.attributes.contains_key(&name) {
            tracing::warn!(
                component = "block",
                operation = "add_attribute",
                status = "duplicate",
                name = %name,
                "Attribute already exists"
            );
            return Err(ModelError::DuplicateName {
                kind: ComponentKind::Attribute,
                name,
            });
        }
        self.attributes.insert(name, value.into());
        Ok(())
    }

    pub fn attribute(&self, name: &str) -> Option<&AttrValue> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> &IndexMap<String, AttrValue> {
        &self.attributes
    }

    pub fn remove_attribute(&mut self, name: &str) -> Result<AttrValue, ModelError> {
        self.attributes
            .shift_remove(name)
            .ok_or_else(|| ModelError::NotFound {
                kind: ComponentKind::Attribute,
                name: name.to_string(),
            })
    }

    /// The block type, read from the reserved "type" attribute.
    pub fn block_type(&self) -> Option<&str> {
        self.attributes.get(TYPE_ATTR_NAME).and_then(|v| v.as_str())
    }

    pub fn set_block_type(&mut self, block_type: impl Into<String>) {
        self.attributes
            .insert(TYPE_ATTR_NAME.to_string(), AttrValue::Str(block_type.into()));
    }

    // --- dimensions ---

    pub fn add_dimension(
        &mut self,
        name: impl Into<String>,
        size: u64,
        policy: DuplicatePolicy,
    ) -> Result<(), ModelError> {
        let name = name.into();
        if let Some(existing) = self.dimensions.get(&name) {
            if policy == DuplicatePolicy::Reject {
                return Err(ModelError::DuplicateName {
                    kind: ComponentKind::Dimension,
                    name,
                });
            }
            // Resizing a dimension under a live variable would silently
            // invalidate that variable's shape.
            if *existing != size {
                if let Some(var) = self.variable_referencing(&name) {
                    tracing::warn!(
                        component = "block",
                        operation = "add_dimension",
                        status = "in_use",
                        name = %name,
                        variable = %var,
                        "Cannot resize dimension referenced by variable"
                    );
                    return Err(ModelError::DimensionInUse {
                        dimension: name,
                        variable: var.to_string(),
                    });
                }
            }
        }
        self.dimensions.insert(name, size);
        Ok(())
    }

    pub fn dimension(&self, name: &str) -> Option<u64> {
        self.dimensions.get(name).copied()
    }

    pub fn dimensions(&self) -> &IndexMap<String, u64> {
        &self.dimensions
    }

    pub fn remove_dimension(&mut self, name: &str) -> Result<u64, ModelError> {
        if !self.dimensions.contains_key(name) {
            return Err(ModelError::NotFound {
                kind: ComponentKind::Dimension,
                name: name.to_string(),
            });
        }
        if let Some(var) = self.variable_referencing(name) {
            return Err(ModelError::DimensionInUse {
                dimension: name.to_string(),
                variable: var.to_string(),
            });
        }
        // Checked above, shift_remove keeps the insertion order of the rest.
        match self.dimensions.shift_remove(name) {
            Some(size) => Ok(size),
            None => Err(ModelError::NotFound {
                kind: ComponentKind::Dimension,
                name: name.to_string(),
            }),
        }
    }

    fn variable_referencing(&self, dim: &str) -> Option<&str> {
        self.variables
            .values()
            .find(|v| v.dims.iter().any(|d| d == dim))
            .map(|v| v.name.as_str())
    }

    // --- variables ---

    /// Adds a variable after validating that every dimension it names is
    /// defined in this block and that the data shape matches.
    pub fn add_variable(
        &mut self,
        var: Variable,
        policy: DuplicatePolicy,
    ) -> Result<(), ModelError> {
        if policy == DuplicatePolicy::Reject && self.variables.contains_key(&var.name) {
            return Err(ModelError::DuplicateName {
                kind: ComponentKind::Variable,
                name: var.name,
            });
        }
        self.validate_variable(&var)?;
        self.variables.insert(var.name.clone(), var);
        Ok(())
    }

    pub fn variable(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn variables(&self) -> &IndexMap<String, Variable> {
        &self.variables
    }

    pub fn remove_variable(&mut self, name: &str) -> Result<Variable, ModelError> {
        self.variables
            .shift_remove(name)
            .ok_or_else(|| ModelError::NotFound {
                kind: ComponentKind::Variable,
                name: name.to_string(),
            })
    }

    fn validate_variable(&self, var: &Variable) -> Result<(), ModelError> {
        let mut expected = Vec::with_capacity(var.dims.len());
        for dim in &var.dims {
            match self.dimensions.get(dim) {
                Some(size) => expected.push(*size as usize),
                None => {
                    tracing::warn!(
                        component = "block",
                        operation = "add_variable",
                        status = "unresolved_dimension",
                        variable = %var.name,
                        dimension = %dim,
                        "Variable references undefined dimension"
                    );
                    return Err(ModelError::UnresolvedDimension {
                        variable: var.name.clone(),
                        dimension: dim.clone(),
                    });
                }
            }
        }
        if var.data.shape() != expected.as_slice() {
            return Err(ModelError::ShapeMismatch {
                variable: var.name.clone(),
                expected,
                actual: var.data.shape().to_vec(),
            });
        }
        Ok(())
    }

    // --- child blocks ---

    pub fn add_block(
        &mut self,
        name: impl Into<String>,
        block: Block,
        policy: DuplicatePolicy,
    ) -> Result<(), ModelError> {
        let name = name.into();
        if policy == DuplicatePolicy::Reject && self.blocks.contains_key(&name) {
            return Err(ModelError::DuplicateName {
                kind: ComponentKind::Block,
                name,
            });
        }
        self.blocks.insert(name, block);
        Ok(())
    }

    /// Convenience for building and attaching a child in one call.
    pub fn add_child(
        &mut self,
        block_type: &str,
        name: impl Into<String>,
        fields: Vec<(String, BlockField)>,
        policy: DuplicatePolicy,
    ) -> Result<&mut Block, ModelError> {
        let name = name.into();
        let child = Block::from_fields(block_type, fields)?;
        self.add_block(name.clone(), child, policy)?;
        match self.blocks.get_mut(&name) {
            Some(block) => Ok(block),
            None => Err(ModelError::NotFound {
                kind: ComponentKind::Block,
                name,
            }),
        }
    }

    pub fn block(&self, name: &str) -> Option<&Block> {
        self.blocks.get(name)
    }

    pub fn block_mut(&mut self, name: &str) -> Option<&mut Block> {
        self.blocks.get_mut(name)
    }

    pub fn blocks(&self) -> &IndexMap<String, Block> {
        &self.blocks
    }

    pub fn remove_block(&mut self, name: &str) -> Result<Block, ModelError> {
        self.blocks
            .shift_remove(name)
            .ok_or_else(|| ModelError::NotFound {
                kind: ComponentKind::Block,
                name: name.to_string(),
            })
    }

    // --- validation and traversal ---

    /// Checks the variables of this block alone.
    pub fn validate_local(&self) -> Result<(), ModelError> {
        for var in self.variables.values() {
            self.validate_variable(var)?;
        }
        Ok(())
    }

    /// Checks this block and every descendant.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.validate_local()?;
        for child in self.blocks.values() {
            child.validate()?;
        }
        Ok(())
    }

    /// Depth-first pre-order traversal over this block and its descendants,
    /// yielding slash-separated paths relative to this block.
    pub fn iter(&self) -> BlockIter<'_> {
        BlockIter::new(self)
    }
}
