//! The network: a typed root block with the SMS++ file-type marker.

use crate::block::{Block, TYPE_ATTR_NAME};
use crate::error::ModelError;
use crate::iter::BlockIter;
use crate::value::AttrValue;

/// Root attribute carrying the SMS++ file-type discriminator.
pub const FILE_TYPE_ATTR: &str = "SMS++_file_type";

/// Reserved attribute carrying the block type.
pub const TYPE_ATTR: &str = TYPE_ATTR_NAME;

/// The kind of SMS++ file a network serializes into.
///
/// Codes match the convention used by SMS++ tools.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SMSFileType {
    /// Problem file: both block and configuration data.
    ProbFile,
    /// Block file: one or more model blocks.
    BlockFile,
    /// Configuration file.
    ConfigFile,
    /// Solution file.
    SolutionFile,
}

impl SMSFileType {
    pub fn code(self) -> i64 {
        match self {
            SMSFileType::ProbFile => 0,
            SMSFileType::BlockFile => 1,
            SMSFileType::ConfigFile => 2,
            SMSFileType::SolutionFile => 3,
        }
    }

    pub fn from_code(code: i64) -> Result<Self, ModelError> {
        match code {
            0 => Ok(SMSFileType::ProbFile),
            1 => Ok(SMSFileType::BlockFile),
            2 => Ok(SMSFileType::ConfigFile),
            3 => Ok(SMSFileType::SolutionFile),
            _ => Err(ModelError::InvalidFileType { code }),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            SMSFileType::ProbFile => "eProbFile",
            SMSFileType::BlockFile => "eBlockFile",
            SMSFileType::ConfigFile => "eConfigFile",
            SMSFileType::SolutionFile => "eSolutionFile",
        }
    }
}

impl std::fmt::Display for SMSFileType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An SMS++ network: a block tree whose root declares the file type.
#[derive(Debug, Clone, PartialEq)]
pub struct SMSNetwork {
    root: Block,
}

impl SMSNetwork {
    /// An empty network of the given file type.
    pub fn new(file_type: SMSFileType) -> Self {
        let mut root = Block::new();
        // The root is empty so Replace cannot fail.
        let _ = root.add_attribute(
            FILE_TYPE_ATTR,
            AttrValue::Int(file_type.code()),
            crate::block::DuplicatePolicy::Replace,
        );
        Self { root }
    }

    /// Wraps an existing root block, requiring a valid file-type marker.
    pub fn from_root(root: Block) -> Result<Self, ModelError> {
        let network = Self { root };
        network.file_type()?;
        Ok(network)
    }

    pub fn file_type(&self) -> Result<SMSFileType, ModelError> {
        let value = self
            .root
            .attribute(FILE_TYPE_ATTR)
            .ok_or(ModelError::MissingFileType)?;
        let code = value.as_int().ok_or(ModelError::MissingFileType)?;
        SMSFileType::from_code(code)
    }

    pub fn set_file_type(&mut self, file_type: SMSFileType) {
        // The attribute always exists after this, Replace cannot fail.
        let _ = self.root.add_attribute(
            FILE_TYPE_ATTR,
            AttrValue::Int(file_type.code()),
            crate::block::DuplicatePolicy::Replace,
        );
    }

    pub fn root(&self) -> &Block {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut Block {
        &mut self.root
    }

    pub fn into_root(self) -> Block {
        self.root
    }

    /// Pre-order traversal starting at the root.
    pub fn iter(&self) -> BlockIter<'_> {
        self.root.iter()
    }

    /// Validates every block in the tree and the file-type marker.
    pub fn validate(&self) -> Result<(), ModelError> {
        self.file_type()?;
        self.root.validate()
    }
}
