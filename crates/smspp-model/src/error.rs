//! Model error types.

/// The four component kinds a block can own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComponentKind {
    Attribute,
    Dimension,
    Variable,
    Block,
}

impl ComponentKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ComponentKind::Attribute => "attribute",
            ComponentKind::Dimension => "dimension",
            ComponentKind::Variable => "variable",
            ComponentKind::Block => "block",
        }
    }
}

/// Errors that can occur during model operations.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A component with this name already exists in the block.
    DuplicateName { kind: ComponentKind, name: String },
    /// No component with this name exists in the block.
    NotFound { kind: ComponentKind, name: String },
    /// A variable references a dimension not defined in its own block.
    UnresolvedDimension { variable: String, dimension: String },
    /// Variable data shape disagrees with the shape implied by its dimensions.
    ShapeMismatch {
        variable: String,
        expected: Vec<usize>,
        actual: Vec<usize>,
    },
    /// A dimension cannot be changed or removed while a variable references it.
    DimensionInUse { dimension: String, variable: String },
    /// The root block carries no file-type attribute.
    MissingFileType,
    /// The file-type attribute holds an unknown code.
    InvalidFileType { code: i64 },
}

impl ModelError {
    /// Returns a semantic error code for programmatic handling.
    pub fn code(&self) -> &'static str {
        match self {
            ModelError::DuplicateName { .. } => "NAME_DUPLICATE",
            ModelError::NotFound { .. } => "NAME_NOT_FOUND",
            ModelError::UnresolvedDimension { .. } => "DIMENSION_UNRESOLVED",
            ModelError::ShapeMismatch { .. } => "SHAPE_MISMATCH",
            ModelError::DimensionInUse { .. } => "DIMENSION_IN_USE",
            ModelError::MissingFileType => "FILE_TYPE_MISSING",
            ModelError::InvalidFileType { .. } => "FILE_TYPE_INVALID",
        }
    }
}

impl std::fmt::Display for ModelError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModelError::DuplicateName { kind, name } => write!(
                f,
                "[{}] {} '{}' already exists",
                self.code(),
                kind.as_str(),
                name
            ),
            ModelError::NotFound { kind, name } => {
                write!(f, "[{}] {} '{}' not found", self.code(), kind.as_str(), name)
            }
            ModelError::UnresolvedDimension {
                variable,
                dimension,
            } => write!(
                f,
                "[{}] Variable '{}' references dimension '{}' not defined in its block",
                self.code(),
                variable,
                dimension
            ),
            ModelError::ShapeMismatch {
                variable,
                expected,
                actual,
            } => write!(
                f,
                "[{}] Variable '{}' data shape {:?} does not match dimension shape {:?}",
                self.code(),
                variable,
                actual,
                expected
            ),
            ModelError::DimensionInUse {
                dimension,
                variable,
            } => write!(
                f,
                "[{}] Dimension '{}' is referenced by variable '{}'",
                self.code(),
                dimension,
                variable
            ),
            ModelError::MissingFileType => write!(
                f,
                "[{}] Root block has no SMS++ file-type attribute",
                self.code()
            ),
            ModelError::InvalidFileType { code } => write!(
                f,
                "[{}] Unknown SMS++ file-type code {}",
                self.code(),
                code
            ),
        }
    }
}

impl std::error::Error for ModelError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_duplicate() {
        let err = ModelError::DuplicateName {
            kind: ComponentKind::Block,
            name: "Block_0".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("NAME_DUPLICATE"));
        assert!(msg.contains("Block_0"));
    }

    #[test]
    fn test_error_display_shape_mismatch() {
        let err = ModelError::ShapeMismatch {
            variable: "ActivePowerDemand".to_string(),
            expected: vec![1, 24],
            actual: vec![24],
        };
        let msg = err.to_string();
        assert!(msg.contains("SHAPE_MISMATCH"));
        assert!(msg.contains("ActivePowerDemand"));
        assert!(msg.contains("[1, 24]"));
    }

    #[test]
    fn test_error_code() {
        assert_eq!(
            ModelError::NotFound {
                kind: ComponentKind::Variable,
                name: String::new()
            }
            .code(),
            "NAME_NOT_FOUND"
        );
        assert_eq!(ModelError::MissingFileType.code(), "FILE_TYPE_MISSING");
        assert_eq!(
            ModelError::InvalidFileType { code: 9 }.code(),
            "FILE_TYPE_INVALID"
        );
    }
}
