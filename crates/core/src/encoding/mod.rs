//! Byte-level encoding.
//!
//! This module provides the byte <-> character alphabet used by byte-level
//! BPE and the decoder that turns tokens back into text.

pub mod byte_level;

pub use byte_level::{ByteCodepointMap, ByteLevelDecoder};
