use proptest::prelude::*;
use std::collections::HashSet;
use vero_core::{IdGenerator, Record, RecordId, RecordStore};

#[derive(Debug, Clone, PartialEq)]
struct Row {
    id: RecordId,
    label: String,
    value: f64,
}

impl Record for Row {
    fn id(&self) -> RecordId {
        self.id
    }
}

fn seeded(n: u32) -> RecordStore<Row> {
    let rows = (1..=n)
        .map(|i| Row {
            id: RecordId::seed(i),
            label: format!("row-{i}"),
            value: f64::from(i),
        })
        .collect();
    RecordStore::seeded(rows).expect("seed ids are distinct")
}

proptest! {
    #[test]
    fn create_sequences_yield_pairwise_distinct_ids(labels in proptest::collection::vec(".{0,12}", 0..64)) {
        let ids = IdGenerator::new();
        let mut store = RecordStore::new();
        for label in labels {
            store.create_with(&ids, |id| Row { id, label, value: 0.0 });
        }
        let unique: HashSet<RecordId> = store.records().iter().map(Record::id).collect();
        prop_assert_eq!(unique.len(), store.len());
    }

    #[test]
    fn update_round_trip_overwrites_patch_fields_only(n in 1_u32..20, pick in 0_u32..20, value in -1e6_f64..1e6) {
        let mut store = seeded(n);
        let target = RecordId::seed((pick % n) + 1);
        let before = store.get(target).cloned().expect("target is seeded");

        prop_assert!(store.update(target, |r| r.value = value));

        let after = store.get(target).expect("target survives update");
        prop_assert_eq!(after.value, value);
        prop_assert_eq!(&after.label, &before.label);
        prop_assert_eq!(after.id, before.id);
        prop_assert_eq!(store.len(), n as usize);
    }

    #[test]
    fn delete_twice_equals_delete_once(n in 1_u32..20, pick in 0_u32..20) {
        let target = RecordId::seed((pick % n) + 1);

        let mut once = seeded(n);
        prop_assert!(once.delete(target));

        let mut twice = seeded(n);
        twice.delete(target);
        prop_assert!(!twice.delete(target));

        prop_assert_eq!(once.records(), twice.records());
    }

    #[test]
    fn unknown_id_mutations_leave_store_untouched(n in 1_u32..20) {
        let mut store = seeded(n);
        let snapshot = store.records().to_vec();
        let missing = RecordId::seed(n + 1000);

        prop_assert!(!store.update(missing, |r| r.value = -1.0));
        prop_assert!(!store.delete(missing));
        prop_assert_eq!(store.records(), snapshot.as_slice());
    }
}

#[test]
fn unknown_id_update_on_three_records_changes_nothing() {
    let mut store = seeded(3);
    let snapshot = store.records().to_vec();
    assert!(!store.update(RecordId::seed(9999), |r| r.value = 0.0));
    assert_eq!(store.records(), snapshot.as_slice());
    assert_eq!(store.len(), 3);
}
