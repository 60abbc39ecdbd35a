//! # Metasync Serde
//! Wire primitives for entity metadata: a growable bit/byte writer, a reader over
//! borrowed bytes, the `Serde` trait and the protocol's variable-length integer.

#![deny(trivial_numeric_casts, unstable_features, unused_import_braces)]

mod bit_reader;
mod bit_writer;
mod error;
mod impls;
mod serde;
mod var_int;

pub use bit_reader::BitReader;
pub use bit_writer::{BitWrite, BitWriter};
pub use error::SerdeErr;
pub use serde::Serde;
pub use var_int::VarInt;
