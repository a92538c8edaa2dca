//! Lifecycle events emitted under the `tracing` feature.

#![cfg(feature = "tracing")]

use std::{
    fmt,
    sync::{Arc, Mutex},
};

use pretty_assertions::assert_eq;
use tracing::{
    field::{Field, Visit},
    Event, Subscriber,
};
use tracing_subscriber::{
    layer::{Context, Layer, SubscriberExt},
    registry,
};
use tvariant::Variant;

#[derive(Debug, Default, Clone, PartialEq)]
struct Record {
    message: String,
    index: Option<u64>,
}

impl Visit for Record {
    fn record_u64(&mut self, field: &Field, value: u64) {
        if field.name() == "index" {
            self.index = Some(value);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}

/// Keeps every event the container emits.
#[derive(Clone, Default)]
struct Journal(Arc<Mutex<Vec<Record>>>);

impl<S: Subscriber> Layer<S> for Journal {
    fn on_event(&self, event: &Event<'_>, _: Context<'_, S>) {
        if event.metadata().target() != "tvariant" {
            return;
        }
        let mut record = Record::default();
        event.record(&mut record);
        self.0.lock().unwrap().push(record);
    }
}

fn journal(f: impl FnOnce()) -> Vec<(String, Option<u64>)> {
    let journal = Journal::default();
    let subscriber = registry().with(journal.clone());
    tracing::subscriber::with_default(subscriber, f);

    let records = journal.0.lock().unwrap();
    records.iter().map(|r| (r.message.clone(), r.index)).collect()
}

fn event(message: &str, index: u64) -> (String, Option<u64>) {
    (message.to_string(), Some(index))
}

#[test]
fn assign_destroys_then_constructs() {
    let mut v: Variant![i32, String] = Variant::new(1i32);

    let events = journal(|| {
        v.assign(String::from("x"));
    });
    assert_eq!(events, vec![event("destroy", 0), event("construct", 1)]);
}

#[test]
fn copy_and_move_are_reported() {
    let events = journal(|| {
        let src: Variant![i32, String] = Variant::new(String::from("x"));
        let mut copy = src.clone();
        let moved = copy.take();
        drop(moved);
        drop(copy);
        drop(src);
    });
    assert_eq!(
        events,
        vec![
            event("construct", 1),
            event("clone", 1),
            event("move", 1),
            event("destroy", 1),
            event("destroy", 1),
        ]
    );
}

#[test]
fn empty_variants_are_silent() {
    let events = journal(|| {
        let mut v = <Variant![i32, String]>::empty();
        v.clear();
        let _ = v.take();
        let _ = v.clone();
    });
    assert_eq!(events, vec![]);
}
