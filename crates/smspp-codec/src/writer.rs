//! Container encoder.

use std::io::Write;

use byteorder::{LittleEndian, WriteBytesExt};
use smspp_model::{AttrValue, Block, VarData};

use crate::error::CodecError;
use crate::format;

/// Encodes a full container, header plus root group, into `w`.
///
/// The caller is expected to have validated the tree; encoding walks
/// every map in insertion order, so re-encoding an unchanged tree
/// produces byte-identical output.
pub fn encode<W: Write>(w: &mut W, root: &Block) -> Result<(), CodecError> {
    w.write_all(&format::MAGIC)?;
    w.write_u32::<LittleEndian>(format::VERSION)?;
    encode_group(w, root)
}

fn encode_group<W: Write>(w: &mut W, block: &Block) -> Result<(), CodecError> {
    write_count(w, block.attributes().len(), "attribute")?;
    for (name, value) in block.attributes() {
        write_string(w, name)?;
        encode_attr(w, value)?;
    }

    write_count(w, block.dimensions().len(), "dimension")?;
    for (name, size) in block.dimensions() {
        write_string(w, name)?;
        w.write_u64::<LittleEndian>(*size)?;
    }

    write_count(w, block.variables().len(), "variable")?;
    for var in block.variables().values() {
        write_string(w, &var.name)?;
        w.write_u32::<LittleEndian>(format::dtype_tag(var.dtype()))?;
        w.write_u32::<LittleEndian>(var.dims.len() as u32)?;
        for dim in &var.dims {
            write_string(w, dim)?;
        }
        encode_elements(w, &var.data)?;
    }

    write_count(w, block.blocks().len(), "child block")?;
    for (name, child) in block.blocks() {
        write_string(w, name)?;
        encode_group(w, child)?;
    }
    Ok(())
}

fn encode_attr<W: Write>(w: &mut W, value: &AttrValue) -> Result<(), CodecError> {
    w.write_u32::<LittleEndian>(format::attr_tag(value))?;
    match value {
        AttrValue::Int(v) => w.write_i64::<LittleEndian>(*v)?,
        AttrValue::Float(v) => w.write_f64::<LittleEndian>(*v)?,
        AttrValue::Str(v) => write_string(w, v)?,
        AttrValue::IntArray(items) => {
            w.write_u64::<LittleEndian>(items.len() as u64)?;
            for item in items {
                w.write_i64::<LittleEndian>(*item)?;
            }
        }
        AttrValue::FloatArray(items) => {
            w.write_u64::<LittleEndian>(items.len() as u64)?;
            for item in items {
                w.write_f64::<LittleEndian>(*item)?;
            }
        }
        AttrValue::StrArray(items) => {
            w.write_u64::<LittleEndian>(items.len() as u64)?;
            for item in items {
                write_string(w, item)?;
            }
        }
    }
    Ok(())
}

fn encode_elements<W: Write>(w: &mut W, data: &VarData) -> Result<(), CodecError> {
    // Row-major element order, matching ndarray's default layout.
    match data {
        VarData::Int(arr) => {
            for v in arr.iter() {
                w.write_i64::<LittleEndian>(*v)?;
            }
        }
        VarData::Float(arr) => {
            for v in arr.iter() {
                w.write_f64::<LittleEndian>(*v)?;
            }
        }
        VarData::Str(arr) => {
            for v in arr.iter() {
                write_string(w, v)?;
            }
        }
    }
    Ok(())
}

fn write_string<W: Write>(w: &mut W, s: &str) -> Result<(), CodecError> {
    let len = s.len() as u64;
    if len > format::MAX_STRING_LEN {
        return Err(CodecError::invalid(format!(
            "string of {len} bytes exceeds the container limit"
        )));
    }
    w.write_u64::<LittleEndian>(len)?;
    w.write_all(s.as_bytes())?;
    Ok(())
}

fn write_count<W: Write>(w: &mut W, count: usize, what: &str) -> Result<(), CodecError> {
    if count as u64 > u64::from(format::MAX_COUNT) {
        return Err(CodecError::invalid(format!(
            "{what} count {count} exceeds the container limit"
        )));
    }
    w.write_u32::<LittleEndian>(count as u32)?;
    Ok(())
}
