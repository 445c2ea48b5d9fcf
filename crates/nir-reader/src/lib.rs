// lib.rs
//
// Binary deserialization of serialized NIR modules: a random-access byte
// source with explicit endianness, the tag tables of the wire format, the
// interning deserializer, and the file container.

pub mod decoder;
pub mod deserializer;
pub mod error;
pub mod file;
pub mod tags;

pub use decoder::{ByteOrder, Decoder};
pub use deserializer::Deserializer;
pub use error::{DecodeError, FileError};
pub use file::{FILE_IDENTIFIER, File, Header};
