//! Container decoder.

use std::io::Read;

use byteorder::{LittleEndian, ReadBytesExt};
use ndarray::{ArrayD, IxDyn};
use smspp_model::{AttrValue, Block, DuplicatePolicy, VarData, VarType, Variable};

use crate::error::CodecError;
use crate::format;

/// Decodes a full container, header plus root group, from `r`.
pub fn decode<R: Read>(r: &mut R) -> Result<Block, CodecError> {
    let mut magic = [0u8; 4];
    r.read_exact(&mut magic)?;
    if magic != format::MAGIC {
        return Err(CodecError::InvalidMagic { found: magic });
    }
    let version = r.read_u32::<LittleEndian>()?;
    if version != format::VERSION {
        return Err(CodecError::UnsupportedVersion { found: version });
    }
    decode_group(r)
}

fn decode_group<R: Read>(r: &mut R) -> Result<Block, CodecError> {
    let mut block = Block::new();

    let attr_count = read_count(r, "attribute")?;
    for _ in 0..attr_count {
        let name = read_string(r)?;
        let value = decode_attr(r)?;
        block.add_attribute(name, value, DuplicatePolicy::Reject)?;
    }

    let dim_count = read_count(r, "dimension")?;
    for _ in 0..dim_count {
        let name = read_string(r)?;
        let size = r.read_u64::<LittleEndian>()?;
        block.add_dimension(name, size, DuplicatePolicy::Reject)?;
    }

    let var_count = read_count(r, "variable")?;
    for _ in 0..var_count {
        let var = decode_variable(r, &block)?;
        block.add_variable(var, DuplicatePolicy::Reject)?;
    }

    let child_count = read_count(r, "child block")?;
    for _ in 0..child_count {
        let name = read_string(r)?;
        let child = decode_group(r)?;
        block.add_block(name, child, DuplicatePolicy::Reject)?;
    }
    Ok(block)
}

fn decode_attr<R: Read>(r: &mut R) -> Result<AttrValue, CodecError> {
    let tag = r.read_u32::<LittleEndian>()?;
    let value = match tag {
        format::ATTR_TAG_INT => AttrValue::Int(r.read_i64::<LittleEndian>()?),
        format::ATTR_TAG_FLOAT => AttrValue::Float(r.read_f64::<LittleEndian>()?),
        format::ATTR_TAG_STR => AttrValue::Str(read_string(r)?),
        format::ATTR_TAG_INT_ARRAY => {
            let len = read_array_len(r)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(r.read_i64::<LittleEndian>()?);
            }
            AttrValue::IntArray(items)
        }
        format::ATTR_TAG_FLOAT_ARRAY => {
            let len = read_array_len(r)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(r.read_f64::<LittleEndian>()?);
            }
            AttrValue::FloatArray(items)
        }
        format::ATTR_TAG_STR_ARRAY => {
            let len = read_array_len(r)?;
            let mut items = Vec::with_capacity(len);
            for _ in 0..len {
                items.push(read_string(r)?);
            }
            AttrValue::StrArray(items)
        }
        other => {
            return Err(CodecError::invalid(format!(
                "unknown attribute tag {other}"
            )))
        }
    };
    Ok(value)
}

/// Decodes one variable record. Dimension names must already be present
/// in `block` since the element count depends on their sizes.
fn decode_variable<R: Read>(r: &mut R, block: &Block) -> Result<Variable, CodecError> {
    let name = read_string(r)?;
    let dtype = format::dtype_from_tag(r.read_u32::<LittleEndian>()?)?;
    let ndims = r.read_u32::<LittleEndian>()?;
    if ndims > format::MAX_COUNT {
        return Err(CodecError::invalid(format!(
            "variable '{name}' declares {ndims} dimensions"
        )));
    }

    let mut dims = Vec::with_capacity(ndims as usize);
    let mut shape = Vec::with_capacity(ndims as usize);
    for _ in 0..ndims {
        let dim = read_string(r)?;
        let size = block.dimension(&dim).ok_or_else(|| {
            CodecError::invalid(format!(
                "variable '{name}' references undeclared dimension '{dim}'"
            ))
        })?;
        shape.push(size as usize);
        dims.push(dim);
    }

    let count = shape.iter().try_fold(1usize, |acc, s| acc.checked_mul(*s));
    let count = count.ok_or_else(|| {
        CodecError::invalid(format!("variable '{name}' element count overflows"))
    })?;
    // Bounded before any allocation, a corrupt dimension size must not
    // drive a huge `Vec::with_capacity`.
    if count as u64 > u64::from(format::MAX_COUNT) {
        return Err(CodecError::invalid(format!(
            "variable '{name}' element count {count} exceeds the container limit"
        )));
    }

    let data = match dtype {
        VarType::Int => {
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(r.read_i64::<LittleEndian>()?);
            }
            VarData::Int(shaped(&name, shape, items)?)
        }
        VarType::Float => {
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(r.read_f64::<LittleEndian>()?);
            }
            VarData::Float(shaped(&name, shape, items)?)
        }
        VarType::Str => {
            let mut items = Vec::with_capacity(count);
            for _ in 0..count {
                items.push(read_string(r)?);
            }
            VarData::Str(shaped(&name, shape, items)?)
        }
    };
    Ok(Variable::new(name, dims, data))
}

fn shaped<T>(name: &str, shape: Vec<usize>, items: Vec<T>) -> Result<ArrayD<T>, CodecError> {
    ArrayD::from_shape_vec(IxDyn(&shape), items).map_err(|err| {
        CodecError::invalid(format!("variable '{name}' payload malformed: {err}"))
    })
}

fn read_string<R: Read>(r: &mut R) -> Result<String, CodecError> {
    let len = r.read_u64::<LittleEndian>()?;
    if len > format::MAX_STRING_LEN {
        return Err(CodecError::invalid(format!(
            "string length {len} exceeds the container limit"
        )));
    }
    let mut buf = vec![0u8; len as usize];
    r.read_exact(&mut buf)?;
    String::from_utf8(buf)
        .map_err(|_| CodecError::invalid("string is not valid UTF-8".to_string()))
}

fn read_array_len<R: Read>(r: &mut R) -> Result<usize, CodecError> {
    let len = r.read_u64::<LittleEndian>()?;
    if len > u64::from(format::MAX_COUNT) {
        return Err(CodecError::invalid(format!(
            "array length {len} exceeds the container limit"
        )));
    }
    Ok(len as usize)
}

fn read_count<R: Read>(r: &mut R, what: &str) -> Result<u32, CodecError> {
    let count = r.read_u32::<LittleEndian>()?;
    if count > format::MAX_COUNT {
        return Err(CodecError::invalid(format!(
            "{what} count {count} exceeds the container limit"
        )));
    }
    Ok(count)
}
