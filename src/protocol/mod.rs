//! Protocol module for encoding and decoding characteristic payloads.
//!
//! This module contains the implementations for:
//! - The per-characteristic value codecs
//! - The options get/set wire format

pub mod codec;
pub mod options;

pub use codec::{ByteEnum, ByteRecord, Decode, Encode};
