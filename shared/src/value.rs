use std::fmt;

/// Tag naming each semantic value kind an attribute can hold
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetaKind {
    Byte,
    Int,
    Float,
    String,
    Chat,
    Item,
    Boolean,
    Rotation,
    Position,
    BlockData,
    VillagerData,
    Particle,
    Pose,
}

impl MetaKind {
    pub fn name(&self) -> &'static str {
        match self {
            MetaKind::Byte => "Byte",
            MetaKind::Int => "Int",
            MetaKind::Float => "Float",
            MetaKind::String => "String",
            MetaKind::Chat => "Chat",
            MetaKind::Item => "Item",
            MetaKind::Boolean => "Boolean",
            MetaKind::Rotation => "Rotation",
            MetaKind::Position => "Position",
            MetaKind::BlockData => "BlockData",
            MetaKind::VillagerData => "VillagerData",
            MetaKind::Particle => "Particle",
            MetaKind::Pose => "Pose",
        }
    }
}

impl fmt::Display for MetaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Euler angles in degrees, as used by armor stand poses
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Rotation {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Rotation {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub struct BlockPosition {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPosition {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VillagerData {
    pub villager_type: i32,
    pub profession: i32,
    pub level: i32,
}

impl VillagerData {
    pub fn new(villager_type: i32, profession: i32, level: i32) -> Self {
        Self {
            villager_type,
            profession,
            level,
        }
    }
}

impl Default for VillagerData {
    fn default() -> Self {
        Self::new(0, 0, 1)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Pose {
    #[default]
    Standing,
    FallFlying,
    Sleeping,
    Swimming,
    SpinAttack,
    Crouching,
    Dying,
}

impl Pose {
    const ALL: [Pose; 7] = [
        Pose::Standing,
        Pose::FallFlying,
        Pose::Sleeping,
        Pose::Swimming,
        Pose::SpinAttack,
        Pose::Crouching,
        Pose::Dying,
    ];

    pub fn ordinal(&self) -> i32 {
        match self {
            Pose::Standing => 0,
            Pose::FallFlying => 1,
            Pose::Sleeping => 2,
            Pose::Swimming => 3,
            Pose::SpinAttack => 4,
            Pose::Crouching => 5,
            Pose::Dying => 6,
        }
    }

    pub fn from_ordinal(ordinal: i32) -> Option<Self> {
        usize::try_from(ordinal)
            .ok()
            .and_then(|index| Self::ALL.get(index).copied())
    }
}

/// A semantic attribute value. The variant decides which codec encodes it.
#[derive(Clone, Debug, PartialEq)]
pub enum MetaValue {
    Byte(i8),
    Int(i32),
    Float(f32),
    String(String),
    /// Serialized chat component, opaque to this crate
    Chat(String),
    /// Serialized item stack, opaque to this crate
    Item(Vec<u8>),
    Boolean(bool),
    Rotation(Rotation),
    Position(BlockPosition),
    /// Global block state id
    BlockData(i32),
    VillagerData(VillagerData),
    /// Particle type key, opaque to this crate
    Particle(String),
    Pose(Pose),
}

impl MetaValue {
    pub fn kind(&self) -> MetaKind {
        match self {
            MetaValue::Byte(_) => MetaKind::Byte,
            MetaValue::Int(_) => MetaKind::Int,
            MetaValue::Float(_) => MetaKind::Float,
            MetaValue::String(_) => MetaKind::String,
            MetaValue::Chat(_) => MetaKind::Chat,
            MetaValue::Item(_) => MetaKind::Item,
            MetaValue::Boolean(_) => MetaKind::Boolean,
            MetaValue::Rotation(_) => MetaKind::Rotation,
            MetaValue::Position(_) => MetaKind::Position,
            MetaValue::BlockData(_) => MetaKind::BlockData,
            MetaValue::VillagerData(_) => MetaKind::VillagerData,
            MetaValue::Particle(_) => MetaKind::Particle,
            MetaValue::Pose(_) => MetaKind::Pose,
        }
    }
}

impl fmt::Display for MetaValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MetaValue::Byte(value) => write!(f, "{}", value),
            MetaValue::Int(value) | MetaValue::BlockData(value) => write!(f, "{}", value),
            MetaValue::Float(value) => write!(f, "{}", value),
            MetaValue::String(value) | MetaValue::Chat(value) | MetaValue::Particle(value) => {
                f.write_str(value)
            }
            MetaValue::Item(bytes) => write!(f, "<item {} bytes>", bytes.len()),
            MetaValue::Boolean(value) => write!(f, "{}", value),
            MetaValue::Rotation(r) => write!(f, "{}, {}, {}", r.x, r.y, r.z),
            MetaValue::Position(p) => write!(f, "{}, {}, {}", p.x, p.y, p.z),
            MetaValue::VillagerData(v) => {
                write!(f, "{}:{}:{}", v.villager_type, v.profession, v.level)
            }
            MetaValue::Pose(pose) => write!(f, "{:?}", pose),
        }
    }
}

/// A value was of a different kind than the one asked for
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KindMismatch {
    pub expected: MetaKind,
    pub found: MetaKind,
}

impl KindMismatch {
    pub fn new(expected: MetaKind, found: MetaKind) -> Self {
        Self { expected, found }
    }
}

macro_rules! impl_meta_conversions {
    ($type:ty, $variant:ident) => {
        impl From<$type> for MetaValue {
            fn from(value: $type) -> Self {
                MetaValue::$variant(value)
            }
        }

        impl TryFrom<MetaValue> for $type {
            type Error = KindMismatch;

            fn try_from(value: MetaValue) -> Result<Self, Self::Error> {
                match value {
                    MetaValue::$variant(inner) => Ok(inner),
                    other => Err(KindMismatch::new(MetaKind::$variant, other.kind())),
                }
            }
        }
    };
}

impl_meta_conversions!(i8, Byte);
impl_meta_conversions!(i32, Int);
impl_meta_conversions!(f32, Float);
impl_meta_conversions!(String, String);
impl_meta_conversions!(bool, Boolean);
impl_meta_conversions!(Rotation, Rotation);
impl_meta_conversions!(BlockPosition, Position);
impl_meta_conversions!(VillagerData, VillagerData);
impl_meta_conversions!(Pose, Pose);

impl From<&str> for MetaValue {
    fn from(value: &str) -> Self {
        MetaValue::String(value.to_string())
    }
}
