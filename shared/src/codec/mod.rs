use metasync_serde::{BitReader, BitWrite, BitWriter, SerdeErr};

use crate::{
    entry::MetaEntry,
    value::{KindMismatch, MetaKind, MetaValue},
};

mod builtin;
mod codec_table;

pub use builtin::BuiltinCodec;
pub use codec_table::CodecTable;

/// Wire encoder for one semantic value kind
pub trait MetaCodec: Send + Sync {
    fn kind(&self) -> MetaKind;

    /// Wire type id written ahead of every payload
    fn serializer(&self) -> i32;

    /// Canonical form of `value` for this codec. May coerce or clamp, must
    /// reject values of an unrelated kind.
    fn normalize(&self, value: &MetaValue) -> Result<MetaValue, KindMismatch>;

    fn write_payload(
        &self,
        value: &MetaValue,
        writer: &mut dyn BitWrite,
    ) -> Result<(), KindMismatch>;

    fn read_payload(&self, reader: &mut BitReader) -> Result<MetaValue, SerdeErr>;

    fn encode(&self, slot: u8, value: &MetaValue) -> Result<MetaEntry, KindMismatch> {
        let value = self.normalize(value)?;
        let mut writer = BitWriter::new();
        self.write_payload(&value, &mut writer)?;
        Ok(MetaEntry::new(slot, self.serializer(), writer.to_bytes()))
    }

    fn decode(&self, payload: &[u8]) -> Result<MetaValue, SerdeErr> {
        let mut reader = BitReader::new(payload);
        self.read_payload(&mut reader)
    }
}
