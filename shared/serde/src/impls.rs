use crate::{bit_reader::BitReader, bit_writer::BitWrite, error::SerdeErr, serde::Serde, VarInt};

// Multi-byte numbers go out big-endian, one wire byte at a time

macro_rules! impl_serde_be {
    ($type:ty, $bytes:expr) => {
        impl Serde for $type {
            fn ser(&self, writer: &mut dyn BitWrite) {
                writer.write_bytes(&self.to_be_bytes());
            }

            fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
                let mut bytes = [0u8; $bytes];
                for byte in bytes.iter_mut() {
                    *byte = reader.read_byte()?;
                }
                Ok(<$type>::from_be_bytes(bytes))
            }

            fn bit_length(&self) -> u32 {
                $bytes * 8
            }
        }
    };
}

impl_serde_be!(u8, 1);
impl_serde_be!(i8, 1);
impl_serde_be!(i16, 2);
impl_serde_be!(i32, 4);
impl_serde_be!(i64, 8);
impl_serde_be!(f32, 4);
impl_serde_be!(f64, 8);

// Booleans occupy a whole byte on this wire
impl Serde for bool {
    fn ser(&self, writer: &mut dyn BitWrite) {
        writer.write_byte(u8::from(*self));
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        match reader.read_byte()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(SerdeErr::InvalidValue {
                type_name: "bool",
                value: i64::from(other),
            }),
        }
    }

    fn bit_length(&self) -> u32 {
        8
    }
}

// Strings are a VarInt byte length followed by UTF-8
impl Serde for String {
    fn ser(&self, writer: &mut dyn BitWrite) {
        let length = i32::try_from(self.len()).unwrap_or(i32::MAX);
        VarInt(length).ser(writer);
        writer.write_bytes(self.as_bytes());
    }

    fn de(reader: &mut BitReader) -> Result<Self, SerdeErr> {
        let length = VarInt::de(reader)?.0;
        let Ok(length) = usize::try_from(length) else {
            return Err(SerdeErr::InvalidValue {
                type_name: "String length",
                value: i64::from(length),
            });
        };
        let bytes = reader.read_bytes(length)?;
        String::from_utf8(bytes).map_err(|_| SerdeErr::InvalidUtf8)
    }

    fn bit_length(&self) -> u32 {
        let length = i32::try_from(self.len()).unwrap_or(i32::MAX);
        VarInt(length).bit_length() + (self.len() as u32) * 8
    }
}
