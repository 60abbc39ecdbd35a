use crate::{bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde};

const MAX_VAR_INT_BYTES: usize = 5;
const SEGMENT_BITS: u32 = 0x7F;
const CONTINUE_BIT: u8 = 0x80;

/// A 32-bit integer written 7 bits at a time, low group first, with the high
/// bit of each byte flagging that another byte follows. Negative values are
/// written as their two's complement and always take the full 5 bytes.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub struct VarInt(pub i32);

impl VarInt {
    pub fn get(&self) -> i32 {
        self.0
    }
}

impl From<i32> for VarInt {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl Serde for VarInt {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let mut value = self.0 as u32;
        loop {
            let segment = (value & SEGMENT_BITS) as u8;
            value >>= 7;
            if value == 0 {
                writer.write_byte(segment);
                return;
            }
            writer.write_byte(segment | CONTINUE_BIT);
        }
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let mut output: u32 = 0;
        for position in 0..MAX_VAR_INT_BYTES {
            let byte = reader.read_byte()?;
            output |= (u32::from(byte) & SEGMENT_BITS) << (7 * position);
            if byte & CONTINUE_BIT == 0 {
                return Ok(Self(output as i32));
            }
        }
        Err(SerdeErr::VarIntTooLong {
            max_bytes: MAX_VAR_INT_BYTES,
        })
    }

    fn bit_length(&self) -> u32 {
        let mut value = self.0 as u32;
        let mut bytes = 1;
        while value >= 0x80 {
            value >>= 7;
            bytes += 1;
        }
        bytes * 8
    }
}
