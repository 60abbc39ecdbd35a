use metasync_serde::{BitReader, BitWrite, BitWriter, Serde, SerdeErr, VarInt};

use crate::{codec::CodecTable, value::MetaValue};

/// Slot byte that terminates a batch of entries
pub const END_OF_BATCH: u8 = 0xFF;

/// One attribute, encoded and ready for the wire
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MetaEntry {
    slot: u8,
    serializer: i32,
    payload: Vec<u8>,
}

impl MetaEntry {
    pub fn new(slot: u8, serializer: i32, payload: Vec<u8>) -> Self {
        Self {
            slot,
            serializer,
            payload,
        }
    }

    pub fn slot(&self) -> u8 {
        self.slot
    }

    pub fn serializer(&self) -> i32 {
        self.serializer
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Writes `slot, serializer, payload`
    pub fn write(&self, writer: &mut dyn BitWrite) {
        writer.write_byte(self.slot);
        VarInt(self.serializer).ser(writer);
        writer.write_bytes(&self.payload);
    }

    pub fn bit_length(&self) -> u32 {
        8 + VarInt(self.serializer).bit_length() + (self.payload.len() as u32) * 8
    }

    /// Reads the payload back through the codec registered for its serializer
    pub fn decode(&self, codecs: &CodecTable) -> Result<MetaValue, SerdeErr> {
        let Some(codec) = codecs.by_serializer(self.serializer) else {
            return Err(unknown_serializer(self.serializer));
        };
        codec.decode(&self.payload)
    }
}

/// Serializes a whole batch, terminated by `END_OF_BATCH`
pub fn write_batch(entries: &[MetaEntry]) -> Vec<u8> {
    let bits: u32 = entries.iter().map(MetaEntry::bit_length).sum();
    let mut writer = BitWriter::with_capacity((bits / 8) as usize + 1);
    for entry in entries {
        entry.write(&mut writer);
    }
    writer.write_byte(END_OF_BATCH);
    writer.to_bytes()
}

/// Parses a batch produced by `write_batch` into `(slot, value)` pairs
pub fn read_batch(bytes: &[u8], codecs: &CodecTable) -> Result<Vec<(u8, MetaValue)>, SerdeErr> {
    let mut reader = BitReader::new(bytes);
    let mut output = Vec::new();
    loop {
        let slot = reader.read_byte()?;
        if slot == END_OF_BATCH {
            return Ok(output);
        }
        let serializer = VarInt::de(&mut reader)?.get();
        let Some(codec) = codecs.by_serializer(serializer) else {
            return Err(unknown_serializer(serializer));
        };
        output.push((slot, codec.read_payload(&mut reader)?));
    }
}

fn unknown_serializer(serializer: i32) -> SerdeErr {
    SerdeErr::InvalidValue {
        type_name: "serializer",
        value: i64::from(serializer),
    }
}
