//! End-to-end notification scenarios for `ObservableVec`.
//!
//! Each test drives a short mutation script and checks both the resulting
//! contents and the exact notification stream captured by an
//! `EventRecorder`.

use std::cell::RefCell;
use std::rc::Rc;

use obseq::{
    ChangeKind, ClearNotification, EventRecorder, ObservableVec, RecordedEvent, SeqError,
    SequenceConfig,
};

fn strings(items: &[&str]) -> ObservableVec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

#[test]
fn append_index_of_and_remove_at() {
    let mut seq: ObservableVec<String> = ObservableVec::new();
    seq.append("a".into()).unwrap();
    seq.append("b".into()).unwrap();
    seq.append("c".into()).unwrap();
    assert_eq!(seq.len(), 3);
    assert_eq!(seq.index_of(&"b".to_string()), Some(1));

    let rec = EventRecorder::attach(&mut seq);
    assert_eq!(seq.remove_at(1).unwrap(), "b");
    assert_eq!(
        rec.events(),
        vec![RecordedEvent::Removed {
            value: "b".to_string(),
            index: Some(1)
        }]
    );
    assert_eq!(seq.get(1).unwrap(), "c");
}

#[test]
fn remove_missing_value_announces_miss() {
    let mut seq = strings(&["x", "y"]);
    let rec = EventRecorder::attach(&mut seq);

    assert!(!seq.remove(&"z".to_string()).unwrap());
    assert_eq!(
        rec.events(),
        vec![RecordedEvent::Removed {
            value: "z".to_string(),
            index: None
        }]
    );
    assert_eq!(seq.len(), 2);
}

#[test]
fn set_announces_new_old_and_index() {
    let mut seq = strings(&["a", "b", "c"]);
    let rec = EventRecorder::attach(&mut seq);

    seq.set(1, "B".into()).unwrap();
    assert_eq!(
        rec.events(),
        vec![RecordedEvent::Changed {
            new: "B".to_string(),
            old: "b".to_string(),
            index: 1
        }]
    );
    assert_eq!(seq.get(1).unwrap(), "B");
}

#[test]
fn listeners_run_in_registration_order_with_same_payload() {
    let mut seq: ObservableVec<&str> = ObservableVec::new();
    seq.append("seed").unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));

    let l1 = Rc::clone(&log);
    seq.on_inserted(move |s, v, i| l1.borrow_mut().push(("L1", *v, i, s.len())));
    let l2 = Rc::clone(&log);
    seq.on_inserted(move |s, v, i| l2.borrow_mut().push(("L2", *v, i, s.len())));

    seq.append("x").unwrap();
    assert_eq!(
        *log.borrow(),
        vec![("L1", "x", 1, 2), ("L2", "x", 1, 2)]
    );
}

#[test]
fn removed_listener_sees_shrunk_sequence() {
    let mut seq: ObservableVec<u32> = (0..5).collect();
    let rec = EventRecorder::attach(&mut seq);

    seq.remove_at(3).unwrap();
    seq.remove(&0).unwrap();
    assert_eq!(rec.observed_lengths(), vec![4, 3]);
}

#[test]
fn clear_emits_nothing() {
    let mut seq = strings(&["a", "b", "c"]);
    let rec = EventRecorder::attach(&mut seq);

    seq.clear().unwrap();
    assert_eq!(rec.count(ChangeKind::Removed), 0);
    assert!(rec.is_empty());
    assert_eq!(seq.len(), 0);
}

#[test]
fn strict_config_reports_structural_events() {
    let mut seq = ObservableVec::from_vec_with_config(vec![1, 2, 3], SequenceConfig::strict());
    let rec = EventRecorder::attach(&mut seq);

    seq.insert(1, 7).unwrap();
    assert!(!seq.remove(&42).unwrap());
    seq.clear().unwrap();

    assert_eq!(
        rec.events(),
        vec![
            RecordedEvent::Inserted { value: 7, index: 1 },
            RecordedEvent::Removed {
                value: 1,
                index: Some(0)
            },
            RecordedEvent::Removed {
                value: 7,
                index: Some(1)
            },
            RecordedEvent::Removed {
                value: 2,
                index: Some(2)
            },
            RecordedEvent::Removed {
                value: 3,
                index: Some(3)
            },
        ]
    );
    assert_eq!(rec.observed_lengths(), vec![4, 0, 0, 0, 0]);
}

#[test]
fn per_element_clear_stops_at_failing_listener() {
    let cfg = SequenceConfig::new().with_clear_notification(ClearNotification::PerElement);
    let mut seq = ObservableVec::from_vec_with_config(vec!["a", "b", "c"], cfg);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    seq.try_on_removed(move |_, v, _| {
        sink.borrow_mut().push(*v);
        if *v == "b" {
            Err("stop".into())
        } else {
            Ok(())
        }
    });

    let err = seq.clear().unwrap_err();
    assert_eq!(err.listener_kind(), Some(ChangeKind::Removed));
    assert_eq!(*seen.borrow(), vec!["a", "b"]);
    assert!(seq.is_empty());
}

#[test]
fn out_of_range_errors_leave_state_untouched() {
    let mut seq = strings(&["only"]);
    let rec = EventRecorder::attach(&mut seq);

    for err in [
        seq.get(1).map(|_| ()).unwrap_err(),
        seq.set(1, "x".into()).map(|_| ()).unwrap_err(),
        seq.insert(2, "x".into()).unwrap_err(),
        seq.remove_at(1).map(|_| ()).unwrap_err(),
    ] {
        assert!(matches!(err, SeqError::IndexOutOfRange { len: 1, .. }));
    }
    assert!(rec.is_empty());
    assert_eq!(seq.as_slice(), &["only".to_string()]);
}

#[test]
fn listener_can_requery_through_collection_reference() {
    let mut seq: ObservableVec<i32> = vec![10, 20].into();
    let snapshots = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&snapshots);
    seq.on_changed(move |s, _, _, _| sink.borrow_mut().push(s.to_vec()));

    seq.insert(0, 5).unwrap();
    seq.set(2, 25).unwrap();
    assert_eq!(
        *snapshots.borrow(),
        vec![vec![5, 10, 20], vec![5, 10, 25]]
    );
}
