use metasync_serde::{BitReader, BitWrite, Serde, SerdeErr, VarInt};

use crate::value::{BlockPosition, KindMismatch, MetaKind, MetaValue, Pose, Rotation, VillagerData};

use super::MetaCodec;

/// Codec for the kinds whose wire layout is fixed by the protocol itself.
/// Complex kinds (chat, items, particles, block data) are left to codecs the
/// caller provides.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BuiltinCodec {
    kind: MetaKind,
    serializer: i32,
}

impl BuiltinCodec {
    pub const BYTE: i32 = 0;
    pub const INT: i32 = 1;
    pub const FLOAT: i32 = 2;
    pub const STRING: i32 = 3;
    pub const BOOLEAN: i32 = 7;
    pub const ROTATION: i32 = 8;
    pub const POSITION: i32 = 9;
    pub const VILLAGER_DATA: i32 = 16;
    pub const POSE: i32 = 18;

    /// `None` for kinds without a built-in layout
    pub fn new(kind: MetaKind, serializer: i32) -> Option<Self> {
        if Self::supports(kind) {
            Some(Self { kind, serializer })
        } else {
            None
        }
    }

    pub fn supports(kind: MetaKind) -> bool {
        matches!(
            kind,
            MetaKind::Byte
                | MetaKind::Int
                | MetaKind::Float
                | MetaKind::String
                | MetaKind::Boolean
                | MetaKind::Rotation
                | MetaKind::Position
                | MetaKind::VillagerData
                | MetaKind::Pose
        )
    }

    /// Every built-in codec with its default serializer id
    pub fn defaults() -> Vec<Self> {
        [
            (MetaKind::Byte, Self::BYTE),
            (MetaKind::Int, Self::INT),
            (MetaKind::Float, Self::FLOAT),
            (MetaKind::String, Self::STRING),
            (MetaKind::Boolean, Self::BOOLEAN),
            (MetaKind::Rotation, Self::ROTATION),
            (MetaKind::Position, Self::POSITION),
            (MetaKind::VillagerData, Self::VILLAGER_DATA),
            (MetaKind::Pose, Self::POSE),
        ]
        .into_iter()
        .filter_map(|(kind, serializer)| Self::new(kind, serializer))
        .collect()
    }
}

impl MetaCodec for BuiltinCodec {
    fn kind(&self) -> MetaKind {
        self.kind
    }

    fn serializer(&self) -> i32 {
        self.serializer
    }

    fn normalize(&self, value: &MetaValue) -> Result<MetaValue, KindMismatch> {
        if value.kind() == self.kind {
            return Ok(value.clone());
        }
        match (self.kind, value) {
            (MetaKind::Float, MetaValue::Int(int)) => Ok(MetaValue::Float(*int as f32)),
            (MetaKind::Float, MetaValue::Byte(byte)) => Ok(MetaValue::Float(f32::from(*byte))),
            (MetaKind::Int, MetaValue::Byte(byte)) => Ok(MetaValue::Int(i32::from(*byte))),
            (MetaKind::Byte, MetaValue::Int(int)) => {
                let clamped = (*int).clamp(i32::from(i8::MIN), i32::from(i8::MAX));
                Ok(MetaValue::Byte(clamped as i8))
            }
            _ => Err(KindMismatch::new(self.kind, value.kind())),
        }
    }

    fn write_payload(
        &self,
        value: &MetaValue,
        writer: &mut dyn BitWrite,
    ) -> Result<(), KindMismatch> {
        if value.kind() != self.kind {
            return Err(KindMismatch::new(self.kind, value.kind()));
        }
        match value {
            MetaValue::Byte(byte) => byte.ser(writer),
            MetaValue::Int(int) => VarInt(*int).ser(writer),
            MetaValue::Float(float) => float.ser(writer),
            MetaValue::String(string) => string.ser(writer),
            MetaValue::Boolean(boolean) => boolean.ser(writer),
            MetaValue::Rotation(rotation) => {
                rotation.x.ser(writer);
                rotation.y.ser(writer);
                rotation.z.ser(writer);
            }
            MetaValue::Position(position) => pack_position(position).ser(writer),
            MetaValue::VillagerData(data) => {
                VarInt(data.villager_type).ser(writer);
                VarInt(data.profession).ser(writer);
                VarInt(data.level).ser(writer);
            }
            MetaValue::Pose(pose) => VarInt(pose.ordinal()).ser(writer),
            other => return Err(KindMismatch::new(self.kind, other.kind())),
        }
        Ok(())
    }

    fn read_payload(&self, reader: &mut BitReader) -> Result<MetaValue, SerdeErr> {
        let value = match self.kind {
            MetaKind::Byte => MetaValue::Byte(i8::de(reader)?),
            MetaKind::Int => MetaValue::Int(VarInt::de(reader)?.get()),
            MetaKind::Float => MetaValue::Float(f32::de(reader)?),
            MetaKind::String => MetaValue::String(String::de(reader)?),
            MetaKind::Boolean => MetaValue::Boolean(bool::de(reader)?),
            MetaKind::Rotation => {
                let x = f32::de(reader)?;
                let y = f32::de(reader)?;
                let z = f32::de(reader)?;
                MetaValue::Rotation(Rotation::new(x, y, z))
            }
            MetaKind::Position => MetaValue::Position(unpack_position(i64::de(reader)?)),
            MetaKind::VillagerData => {
                let villager_type = VarInt::de(reader)?.get();
                let profession = VarInt::de(reader)?.get();
                let level = VarInt::de(reader)?.get();
                MetaValue::VillagerData(VillagerData::new(villager_type, profession, level))
            }
            MetaKind::Pose => {
                let ordinal = VarInt::de(reader)?.get();
                let pose = Pose::from_ordinal(ordinal).ok_or(SerdeErr::InvalidValue {
                    type_name: "Pose",
                    value: i64::from(ordinal),
                })?;
                MetaValue::Pose(pose)
            }
            MetaKind::Chat
            | MetaKind::Item
            | MetaKind::BlockData
            | MetaKind::Particle => {
                return Err(SerdeErr::InvalidValue {
                    type_name: "builtin codec kind",
                    value: i64::from(self.serializer),
                })
            }
        };
        Ok(value)
    }
}

// x: 26 bits, z: 26 bits, y: 12 bits, all two's complement
fn pack_position(position: &BlockPosition) -> i64 {
    ((i64::from(position.x) & 0x3FF_FFFF) << 38)
        | ((i64::from(position.z) & 0x3FF_FFFF) << 12)
        | (i64::from(position.y) & 0xFFF)
}

fn unpack_position(packed: i64) -> BlockPosition {
    let x = packed >> 38;
    let y = (packed << 52) >> 52;
    let z = (packed << 26) >> 38;
    BlockPosition::new(x as i32, y as i32, z as i32)
}
