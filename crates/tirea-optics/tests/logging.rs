//! Diagnostics emitted through `tracing`.
//!
//! Kept in its own test binary so the scoped subscriber only sees these calls.

use serde_json::json;
use std::fmt;
use std::sync::{Arc, Mutex};
use tirea_optics::{lens, set, Lens, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

#[derive(Debug, Clone)]
struct Captured {
    level: Level,
    message: String,
    fields: Vec<(String, String)>,
}

#[derive(Clone, Default)]
struct CaptureLayer(Arc<Mutex<Vec<Captured>>>);

struct FieldVisitor<'a> {
    message: &'a mut String,
    fields: &'a mut Vec<(String, String)>,
}

impl Visit for FieldVisitor<'_> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.fields.push((field.name().to_string(), value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            *self.message = format!("{value:?}");
        } else {
            self.fields
                .push((field.name().to_string(), format!("{value:?}")));
        }
    }
}

impl<S: Subscriber> Layer<S> for CaptureLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let mut message = String::new();
        let mut fields = Vec::new();
        event.record(&mut FieldVisitor {
            message: &mut message,
            fields: &mut fields,
        });
        self.0.lock().unwrap().push(Captured {
            level: *event.metadata().level(),
            message,
            fields,
        });
    }
}

#[test]
fn test_set_emits_diagnostics() {
    let layer = CaptureLayer::default();
    let events = Arc::clone(&layer.0);
    let subscriber = tracing_subscriber::registry::Registry::default().with(layer);
    let _guard = tracing::subscriber::set_default(subscriber);

    // rejected lens
    let _ = set(&Lens::from("a"), Value::from(1), &Value::Null);
    // incompatible container replaced
    let _ = set(&lens!("a", "b"), Value::from(1), &Value::from(json!({"a": [1]}))).unwrap();
    // plain vivification
    let _ = set(&lens!("x"), Value::from(1), &Value::Null).unwrap();

    let events = events.lock().unwrap().clone();

    let rejected = events
        .iter()
        .find(|e| e.message == "rejected lens")
        .expect("rejected lens event");
    assert_eq!(rejected.level, Level::DEBUG);
    assert!(rejected
        .fields
        .iter()
        .any(|(k, v)| k == "lens" && v == "$.a"));

    let replaced = events
        .iter()
        .find(|e| e.message == "replacing incompatible value with new container")
        .expect("replacement event");
    assert_eq!(replaced.level, Level::TRACE);
    assert!(replaced
        .fields
        .iter()
        .any(|(k, v)| k == "found" && v == "list"));

    assert!(events.iter().any(|e| e.message == "vivifying container"));
}
