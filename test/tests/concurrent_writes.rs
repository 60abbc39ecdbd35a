/// Parallel writers against one instance

use std::{sync::Arc, thread};

use metasync_shared::{
    CodecTable, MetaConfig, MetaRegistry, MetaValue, ProtocolVersion, SlotIndex, ViewerKey,
};
use metasync_test::spawn;

const WRITERS: usize = 8;
const WRITES: i32 = 200;

fn counters_registry() -> Arc<MetaRegistry> {
    let mut builder = MetaRegistry::builder(MetaConfig::new(ProtocolVersion(600)));
    for index in 0..WRITERS {
        let name = format!("counter_{}", index);
        builder
            .register(SlotIndex::Wire(index as u8 + 1), &name, 0i32)
            .unwrap();
    }
    for index in 0..WRITERS {
        let name = format!("flag_{}", index);
        builder
            .register_masked(SlotIndex::Wire(0), &name, 1u8 << index, false)
            .unwrap();
    }
    builder.build()
}

#[test]
fn distinct_attributes_lose_no_updates() {
    let _ = env_logger::builder().is_test(true).try_init();
    let spawned = spawn(counters_registry(), &[ViewerKey(1)]);
    let instance = &spawned.instance;

    thread::scope(|scope| {
        for index in 0..WRITERS {
            scope.spawn(move || {
                let name = format!("counter_{}", index);
                for value in 0..WRITES {
                    instance.set(&name, value).unwrap();
                }
            });
        }
    });

    for index in 0..WRITERS {
        let name = format!("counter_{}", index);
        assert_eq!(instance.get(&name).unwrap(), MetaValue::Int(WRITES - 1));
    }
    assert_eq!(spawned.transport.len(), WRITERS * WRITES as usize);
}

#[test]
fn deliveries_follow_write_order_per_attribute() {
    let spawned = spawn(counters_registry(), &[ViewerKey(1)]);
    let instance = &spawned.instance;

    thread::scope(|scope| {
        for index in 0..WRITERS {
            scope.spawn(move || {
                let name = format!("counter_{}", index);
                for value in 0..WRITES {
                    instance.set(&name, value).unwrap();
                }
            });
        }
    });

    let codecs = CodecTable::default();
    let mut seen: Vec<Vec<i32>> = vec![Vec::new(); WRITERS];
    for delivery in spawned.transport.deliveries() {
        for (slot, value) in delivery.decoded(&codecs) {
            let MetaValue::Int(value) = value else {
                panic!("counter slot {} delivered {:?}", slot, value);
            };
            seen[slot as usize - 1].push(value);
        }
    }
    let expected: Vec<i32> = (0..WRITES).collect();
    for values in seen {
        assert_eq!(values, expected);
    }
}

#[test]
fn flags_in_one_group_lose_no_updates() {
    let spawned = spawn(counters_registry(), &[ViewerKey(1)]);
    let instance = &spawned.instance;

    thread::scope(|scope| {
        for index in 0..WRITERS {
            scope.spawn(move || {
                let name = format!("flag_{}", index);
                for write in 0..WRITES {
                    // odd writers finish on true, even ones on false
                    let flag = (write + index as i32) % 2 == 0;
                    instance.set(&name, flag).unwrap();
                }
            });
        }
    });

    let mut bits = 0u8;
    for index in 0..WRITERS {
        let name = format!("flag_{}", index);
        let expected = (WRITES - 1 + index as i32) % 2 == 0;
        assert_eq!(instance.get(&name).unwrap(), MetaValue::Boolean(expected));
        if expected {
            bits |= 1 << index;
        }
    }

    let entries = instance.collect_all().unwrap();
    let group = entries.iter().find(|entry| entry.slot() == 0).unwrap();
    assert_eq!(group.payload(), &[bits]);
}
