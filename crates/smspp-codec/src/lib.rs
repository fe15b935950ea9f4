//! Self-describing binary container for SMS++ block networks.
//!
//! A file is a header followed by the root group; each group carries its
//! attributes, dimensions, variables, and named child groups, mirroring
//! the netCDF group model one-to-one with [`smspp_model::Block`]. Names,
//! insertion order, and element values survive a save/load cycle exactly.

mod error;
mod format;
mod reader;
mod writer;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;
use std::time::Instant;

use smspp_model::{Block, SMSNetwork};

pub use error::CodecError;
pub use format::{MAGIC, VERSION};

/// Encodes a bare block tree, header included, into `w`.
pub fn encode<W: Write>(w: &mut W, root: &Block) -> Result<(), CodecError> {
    writer::encode(w, root)
}

/// Decodes a bare block tree from `r` without interpreting the root's
/// attributes.
pub fn decode<R: Read>(r: &mut R) -> Result<Block, CodecError> {
    reader::decode(r)
}

/// Serializes a network to `path`.
///
/// The network is validated first: the file-type marker and every
/// variable shape are checked before anything is written, so a failed
/// save never leaves a truncated file behind a passing one.
pub fn save(network: &SMSNetwork, path: impl AsRef<Path>) -> Result<(), CodecError> {
    let path = path.as_ref();
    let started = Instant::now();
    network.validate()?;

    let file = File::create(path)?;
    let mut w = BufWriter::new(file);
    writer::encode(&mut w, network.root())?;
    w.flush()?;

    tracing::debug!(
        component = "codec",
        operation = "save",
        status = "success",
        path = %path.display(),
        duration_ms = started.elapsed().as_millis() as u64,
        "Saved network container"
    );
    Ok(())
}

/// Deserializes a network from `path`, requiring a valid file-type marker
/// on the root block.
pub fn load(path: impl AsRef<Path>) -> Result<SMSNetwork, CodecError> {
    let path = path.as_ref();
    let started = Instant::now();

    let file = File::open(path)?;
    let mut r = BufReader::new(file);
    let root = reader::decode(&mut r)?;
    let network = SMSNetwork::from_root(root)?;

    tracing::debug!(
        component = "codec",
        operation = "load",
        status = "success",
        path = %path.display(),
        file_type = %network.file_type()?,
        duration_ms = started.elapsed().as_millis() as u64,
        "Loaded network container"
    );
    Ok(network)
}

/// Deserializes a bare block tree from `path` without requiring the
/// file-type marker. Used for solver outputs whose root is a plain block.
pub fn load_block(path: impl AsRef<Path>) -> Result<Block, CodecError> {
    let file = File::open(path.as_ref())?;
    let mut r = BufReader::new(file);
    reader::decode(&mut r)
}

/// Encodes a network into an in-memory buffer.
pub fn to_bytes(network: &SMSNetwork) -> Result<Vec<u8>, CodecError> {
    network.validate()?;
    let mut buf = Vec::new();
    writer::encode(&mut buf, network.root())?;
    Ok(buf)
}

/// Decodes a network from an in-memory buffer.
pub fn from_bytes(bytes: &[u8]) -> Result<SMSNetwork, CodecError> {
    let mut r: &[u8] = bytes;
    let root = reader::decode(&mut r)?;
    Ok(SMSNetwork::from_root(root)?)
}
