//! Wire-format constants and type tags.
//!
//! Layout, all integers little-endian:
//!
//! ```text
//! file  := magic "SMSC" | version u32 | group(root)
//! group := attr_count u32 | attr*
//!        | dim_count u32 | dim*
//!        | var_count u32 | var*
//!        | child_count u32 | (string name, group)*
//! attr  := string name | tag u32 | payload
//! dim   := string name | size u64
//! var   := string name | dtype u32 | ndims u32 | string dim_name*
//!        | element*            (count = product of resolved dim sizes)
//! string:= len u64 | utf8 bytes
//! ```

use smspp_model::{AttrValue, VarType};

use crate::error::CodecError;

pub const MAGIC: [u8; 4] = *b"SMSC";
pub const VERSION: u32 = 1;

/// Upper bound on any encoded string, guards against corrupt lengths.
pub const MAX_STRING_LEN: u64 = 1024 * 1024;

/// Upper bound on per-group component counts.
pub const MAX_COUNT: u32 = 16 * 1024 * 1024;

pub const ATTR_TAG_INT: u32 = 0;
pub const ATTR_TAG_FLOAT: u32 = 1;
pub const ATTR_TAG_STR: u32 = 2;
pub const ATTR_TAG_INT_ARRAY: u32 = 3;
pub const ATTR_TAG_FLOAT_ARRAY: u32 = 4;
pub const ATTR_TAG_STR_ARRAY: u32 = 5;

pub const DTYPE_INT: u32 = 0;
pub const DTYPE_FLOAT: u32 = 1;
pub const DTYPE_STR: u32 = 2;

pub fn attr_tag(value: &AttrValue) -> u32 {
    match value {
        AttrValue::Int(_) => ATTR_TAG_INT,
        AttrValue::Float(_) => ATTR_TAG_FLOAT,
        AttrValue::Str(_) => ATTR_TAG_STR,
        AttrValue::IntArray(_) => ATTR_TAG_INT_ARRAY,
        AttrValue::FloatArray(_) => ATTR_TAG_FLOAT_ARRAY,
        AttrValue::StrArray(_) => ATTR_TAG_STR_ARRAY,
    }
}

pub fn dtype_tag(dtype: VarType) -> u32 {
    match dtype {
        VarType::Int => DTYPE_INT,
        VarType::Float => DTYPE_FLOAT,
        VarType::Str => DTYPE_STR,
    }
}

pub fn dtype_from_tag(tag: u32) -> Result<VarType, CodecError> {
    match tag {
        DTYPE_INT => Ok(VarType::Int),
        DTYPE_FLOAT => Ok(VarType::Float),
        DTYPE_STR => Ok(VarType::Str),
        other => Err(CodecError::invalid(format!(
            "unknown variable dtype tag {other}"
        ))),
    }
}
