/// Get/set contract of a live instance

use std::sync::Arc;

use metasync_shared::{
    BitReader, BitWrite, BuiltinCodec, CodecTable, KindMismatch, MetaCodec, MetaConfig, MetaKind,
    MetaRegistry, MetaValue, Pose, ProtocolVersion, Serde, SerdeErr, SlotIndex, ViewerKey,
};
use metasync_test::{assert_last_delivery, assert_meta_err, living_entity_registry, spawn};
use proptest::prelude::*;

#[test]
fn unknown_name_is_not_registered() {
    let spawned = spawn(living_entity_registry(ProtocolVersion::LATEST), &[]);

    assert_meta_err!(spawned.instance.get("mana"), NotRegistered);
    assert_meta_err!(spawned.instance.set("mana", 1i32), NotRegistered);
    assert_meta_err!(spawned.instance.reset("mana"), NotRegistered);
    assert_meta_err!(spawned.instance.put_raw("mana", 1i32), NotRegistered);
}

#[test]
fn unsupported_attribute_fails_and_is_never_collected() {
    let registry = living_entity_registry(ProtocolVersion(100));
    let ticks = registry.definition("ticks_frozen").unwrap();
    assert_eq!(ticks.slot(), SlotIndex::Unsupported);
    let spawned = spawn(registry.clone(), &[ViewerKey(1)]);

    for name in ["ticks_frozen", "pose", "custom_name", "hand_active"] {
        assert_meta_err!(spawned.instance.get(name), UnsupportedInVersion);
        assert_meta_err!(spawned.instance.set(name, 1i32), UnsupportedInVersion);
        assert_meta_err!(spawned.instance.broadcast_one(name), UnsupportedInVersion);
    }
    assert!(spawned.transport.is_empty());

    let unsupported: Vec<&str> = registry
        .list_transmittable()
        .into_iter()
        .filter(|definition| !definition.slot().is_supported())
        .map(|definition| definition.name())
        .collect();
    assert_eq!(
        unsupported,
        vec!["custom_name", "pose", "ticks_frozen", "hand_active", "offhand"]
    );

    let slots: Vec<u8> = spawned
        .instance
        .collect_all()
        .unwrap()
        .iter()
        .map(|entry| entry.slot())
        .collect();
    assert_eq!(slots, vec![0, 1, 3, 4, 5, 7]);
}

#[test]
fn float_attribute_accepts_integral_values() {
    let spawned = spawn(living_entity_registry(ProtocolVersion::LATEST), &[ViewerKey(1)]);

    spawned.instance.set("health", 15i32).unwrap();
    assert_eq!(spawned.instance.get("health").unwrap(), MetaValue::Float(15.0));
    assert_eq!(spawned.instance.get_as::<f32>("health").unwrap(), 15.0);
    assert_last_delivery!(spawned.transport, 9, MetaValue::Float(15.0));
}

#[test]
fn wrong_kind_is_type_mismatch() {
    let spawned = spawn(living_entity_registry(ProtocolVersion::LATEST), &[ViewerKey(1)]);

    assert_meta_err!(spawned.instance.set("health", "full"), TypeMismatch);
    assert_meta_err!(spawned.instance.set("pose", 3i32), TypeMismatch);
    assert_meta_err!(spawned.instance.get_as::<bool>("air"), TypeMismatch);
    assert!(spawned.transport.is_empty());
    assert_eq!(spawned.instance.get("health").unwrap(), MetaValue::Float(20.0));
}

#[test]
fn typed_reads() {
    let spawned = spawn(living_entity_registry(ProtocolVersion::LATEST), &[]);

    spawned.instance.set("pose", Pose::Sleeping).unwrap();
    spawned.instance.set("silent", true).unwrap();

    assert_eq!(spawned.instance.get_as::<Pose>("pose").unwrap(), Pose::Sleeping);
    assert!(spawned.instance.get_as::<bool>("silent").unwrap());
    assert_eq!(spawned.instance.get_as::<i32>("air").unwrap(), 300);
}

#[test]
fn reset_restores_default_and_broadcasts() {
    let spawned = spawn(living_entity_registry(ProtocolVersion::LATEST), &[ViewerKey(1)]);
    spawned.instance.set("no_gravity", true).unwrap();
    spawned.instance.set("sprinting", true).unwrap();

    spawned.instance.reset("no_gravity").unwrap();
    assert_last_delivery!(spawned.transport, 5, MetaValue::Boolean(false));
    spawned.instance.reset("sprinting").unwrap();
    assert_last_delivery!(spawned.transport, 0, MetaValue::Byte(0));
}

#[test]
fn put_raw_skips_broadcast() {
    let spawned = spawn(living_entity_registry(ProtocolVersion::LATEST), &[ViewerKey(1)]);

    spawned.instance.put_raw("air", 10i32).unwrap();
    assert!(spawned.transport.is_empty());
    assert_eq!(spawned.instance.get("air").unwrap(), MetaValue::Int(10));

    assert_meta_err!(spawned.instance.put_raw("glowing", 1i32), TypeMismatch);
}

#[test]
fn put_raw_of_wrong_kind_leaves_snapshot_intact() {
    let spawned = spawn(living_entity_registry(ProtocolVersion::LATEST), &[ViewerKey(1)]);

    assert_meta_err!(spawned.instance.put_raw("air", "text"), TypeMismatch);
    assert_meta_err!(spawned.instance.put_raw("health", true), TypeMismatch);
    assert_eq!(spawned.instance.get("air").unwrap(), MetaValue::Int(300));

    assert_eq!(spawned.instance.collect_all().unwrap().len(), 9);
    spawned.instance.broadcast_all().unwrap();
    assert_eq!(spawned.transport.len(), 1);

    // coercions the codec accepts still go through
    spawned.instance.put_raw("health", 4i32).unwrap();
    assert_eq!(spawned.instance.get("health").unwrap(), MetaValue::Float(4.0));

    // editor-only cells have no codec to check against
    spawned.instance.put_raw("spawn_group", "north").unwrap();
    assert_eq!(
        spawned.instance.get("spawn_group").unwrap(),
        MetaValue::String("north".to_string())
    );
}

#[test]
fn put_raw_on_unsupported_masked_flag_takes_booleans() {
    let spawned = spawn(living_entity_registry(ProtocolVersion(100)), &[]);

    spawned.instance.put_raw("hand_active", true).unwrap();
    assert_meta_err!(spawned.instance.put_raw("hand_active", 1i32), TypeMismatch);
}

#[test]
fn tags_are_per_instance() {
    let registry = living_entity_registry(ProtocolVersion::LATEST);
    let first = spawn(registry.clone(), &[]);
    let second = spawn(registry, &[]);

    first.instance.set_tag("team", "red");
    assert_eq!(first.instance.tag("team").as_deref(), Some("red"));
    assert!(first.instance.has_tag("team"));
    assert!(!second.instance.has_tag("team"));

    first.instance.set_tag("team", "blue");
    assert_eq!(first.instance.tags().len(), 1);
    assert_eq!(first.instance.remove_tag("team").as_deref(), Some("blue"));
    assert!(first.instance.tags().is_empty());
}

#[test]
fn caller_codec_makes_kind_transmittable() {
    struct ChatCodec;

    impl MetaCodec for ChatCodec {
        fn kind(&self) -> MetaKind {
            MetaKind::Chat
        }

        fn serializer(&self) -> i32 {
            4
        }

        fn normalize(&self, value: &MetaValue) -> Result<MetaValue, KindMismatch> {
            match value {
                MetaValue::Chat(_) => Ok(value.clone()),
                MetaValue::String(text) => Ok(MetaValue::Chat(text.clone())),
                other => Err(KindMismatch::new(MetaKind::Chat, other.kind())),
            }
        }

        fn write_payload(
            &self,
            value: &MetaValue,
            writer: &mut dyn BitWrite,
        ) -> Result<(), KindMismatch> {
            let MetaValue::Chat(text) = value else {
                return Err(KindMismatch::new(MetaKind::Chat, value.kind()));
            };
            text.ser(writer);
            Ok(())
        }

        fn read_payload(
            &self,
            reader: &mut BitReader,
        ) -> Result<MetaValue, SerdeErr> {
            let text = String::de(reader)?;
            Ok(MetaValue::Chat(text))
        }
    }

    let codecs = CodecTable::default().with(Arc::new(ChatCodec));
    let mut builder = MetaRegistry::builder(MetaConfig::default()).codecs(codecs.clone());
    builder
        .register(SlotIndex::Wire(2), "custom_name", MetaValue::Chat(String::new()))
        .unwrap();
    let spawned = spawn(builder.build(), &[ViewerKey(1)]);

    spawned.instance.set("custom_name", "Grumm").unwrap();
    assert_eq!(
        spawned.instance.get("custom_name").unwrap(),
        MetaValue::Chat("Grumm".to_string())
    );
    let delivery = spawned.transport.last().unwrap();
    assert_eq!(delivery.entries[0].serializer(), 4);
    assert_eq!(
        delivery.entries[0].decode(&codecs).unwrap(),
        MetaValue::Chat("Grumm".to_string())
    );
    assert_ne!(delivery.entries[0].serializer(), BuiltinCodec::STRING);
}

proptest! {
    #[test]
    fn integer_round_trip(value in any::<i32>()) {
        let spawned = spawn(living_entity_registry(ProtocolVersion::LATEST), &[ViewerKey(1)]);

        spawned.instance.set("air", value).unwrap();
        prop_assert_eq!(spawned.instance.get("air").unwrap(), MetaValue::Int(value));

        let delivery = spawned.transport.last().unwrap();
        prop_assert_eq!(
            delivery.entries[0].decode(&CodecTable::default()).unwrap(),
            MetaValue::Int(value)
        );
    }
}
