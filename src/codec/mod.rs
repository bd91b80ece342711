//! Slim structured-list format
//!
//! Instruction batches, nested operands and result lists all travel as
//! Slim lists.

pub mod list;

pub use list::{decode, encode, render, CodecError};
