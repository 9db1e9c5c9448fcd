//! Structural writes through a lens.
//!
//! Writes are copy-on-write per level: each container along the addressed path
//! is copied (its children are `Arc` handles, so the copy is shallow), the new
//! child is spliced in, and every other branch keeps pointing at the input's
//! data.

use crate::{
    error::{OpticsError, OpticsResult},
    value::{Record, Slot},
    view::resolve_index,
    Key, Lens, Value,
};
use std::sync::Arc;
use tracing::{debug, trace};

/// Result of writing below one level.
enum Outcome {
    /// Nothing changed; the caller keeps its original value.
    Unchanged,
    /// The slot now holds this value.
    Replaced(Value),
    /// The slot should be removed from its container.
    Removed,
}

/// Write `value` at the location a lens addresses and return the new document.
///
/// `value` of `None` removes the slot: a record entry is deleted, a list
/// element is spliced out and later elements shift down. Removing a slot that
/// does not exist returns the target itself (`ptr_eq` holds).
///
/// Missing containers are created on the way down. The key decides the shape:
/// an index creates a list (padding with holes up to the index), a record key
/// creates a record. A container of the wrong shape is replaced.
///
/// Negative indices count from the end of the current list. One that still
/// falls before the start is a no-op.
///
/// # Errors
///
/// - [`OpticsError::InvalidKey`] if any step is a [`Key::Unsupported`].
/// - [`OpticsError::AbsentTarget`] if the lens is a bare [`Lens::Key`] and the
///   target is `Null`. Path lenses vivify from `Null` instead.
/// - [`OpticsError::IndexTooLarge`] if padding a list up to an index cannot
///   be allocated.
///
/// # Examples
///
/// ```
/// use tirea_optics::{lens, set, Lens, Value};
/// use serde_json::json;
///
/// let doc = Value::from(json!({"a": [1, 2], "b": {"c": 3}}));
///
/// let updated = set(&lens!("a", 0), Value::from(99), &doc).unwrap();
/// assert_eq!(updated, Value::from(json!({"a": [99, 2], "b": {"c": 3}})));
/// assert!(updated.get("b").unwrap().ptr_eq(doc.get("b").unwrap()));
///
/// let removed = set(&Lens::from("b"), None, &doc).unwrap();
/// assert_eq!(removed, Value::from(json!({"a": [1, 2]})));
///
/// let vivified = set(&lens!("x", 1, "y"), Value::from(7), &Value::Null).unwrap();
/// assert_eq!(vivified.get("x").unwrap().at(1), Some(&Value::from(json!({"y": 7}))));
/// ```
pub fn set(lens: &Lens, value: impl Into<Option<Value>>, target: &Value) -> OpticsResult<Value> {
    let steps = lens.steps();
    if let Err(err) = check_lens(lens, &steps, target) {
        debug!(lens = %lens, error = %err, "rejected lens");
        return Err(err);
    }

    let outcome = match write_at(Some(target), &steps, value.into()) {
        Ok(outcome) => outcome,
        Err(err) => {
            debug!(lens = %lens, error = %err, "write failed");
            return Err(err);
        }
    };
    Ok(match outcome {
        Outcome::Unchanged => target.clone(),
        Outcome::Replaced(v) => v,
        Outcome::Removed => Value::Null,
    })
}

fn check_lens(lens: &Lens, steps: &[&Key], target: &Value) -> OpticsResult<()> {
    if let Some(Key::Unsupported(kind)) = steps.iter().find(|k| matches!(k, Key::Unsupported(_))) {
        return Err(OpticsError::invalid_key(*kind, lens.to_string()));
    }
    if let Lens::Key(key) = lens {
        if target.is_null() {
            return Err(OpticsError::absent_target(key.clone()));
        }
    }
    Ok(())
}

/// Write below `current`, which is `None` when the slot does not exist.
fn write_at(
    current: Option<&Value>,
    steps: &[&Key],
    value: Option<Value>,
) -> OpticsResult<Outcome> {
    let Some((key, rest)) = steps.split_first() else {
        return Ok(match value {
            Some(v) => Outcome::Replaced(v),
            None => Outcome::Removed,
        });
    };

    match key {
        Key::Prop(k) => write_prop(current, key, k, rest, value),
        Key::Index(i) => write_index(current, key, *i, rest, value),
        // rejected by check_lens
        Key::Unsupported(_) => Ok(Outcome::Unchanged),
    }
}

fn write_prop(
    current: Option<&Value>,
    step: &Key,
    name: &str,
    rest: &[&Key],
    value: Option<Value>,
) -> OpticsResult<Outcome> {
    let existing = current.and_then(Value::as_record);
    let child = existing.and_then(|record| record.get(name));

    Ok(match write_at(child, rest, value)? {
        Outcome::Unchanged => Outcome::Unchanged,
        Outcome::Removed => match existing {
            Some(record) if record.contains_key(name) => {
                let mut copy = record.clone();
                copy.remove(name);
                Outcome::Replaced(Value::Record(Arc::new(copy)))
            }
            _ => Outcome::Unchanged,
        },
        Outcome::Replaced(new_child) => {
            let mut copy = match existing {
                Some(record) => record.clone(),
                None => {
                    note_vivify(current, step, "record");
                    Record::new()
                }
            };
            copy.insert(name.to_owned(), new_child);
            Outcome::Replaced(Value::Record(Arc::new(copy)))
        }
    })
}

fn write_index(
    current: Option<&Value>,
    step: &Key,
    index: i64,
    rest: &[&Key],
    value: Option<Value>,
) -> OpticsResult<Outcome> {
    let existing = current.and_then(Value::as_list);
    let len = existing.map_or(0, <[Slot]>::len);

    // A negative index reaching before the start addresses nothing.
    let Some(idx) = resolve_index(index, len) else {
        return Ok(Outcome::Unchanged);
    };
    let child = existing
        .and_then(|list| list.get(idx))
        .and_then(Option::as_ref);

    Ok(match write_at(child, rest, value)? {
        Outcome::Unchanged => Outcome::Unchanged,
        Outcome::Removed => match existing {
            Some(list) if idx < list.len() => {
                let mut copy = list.to_vec();
                copy.remove(idx);
                Outcome::Replaced(Value::List(Arc::new(copy)))
            }
            _ => Outcome::Unchanged,
        },
        Outcome::Replaced(new_child) => {
            let mut copy = match existing {
                Some(list) => list.to_vec(),
                None => {
                    note_vivify(current, step, "list");
                    Vec::new()
                }
            };
            if idx >= copy.len() {
                let extra = idx
                    .checked_add(1)
                    .map(|needed| needed - copy.len())
                    .ok_or_else(|| OpticsError::index_too_large(index))?;
                copy.try_reserve(extra)
                    .map_err(|_| OpticsError::index_too_large(index))?;
                copy.resize(idx + 1, None);
            }
            copy[idx] = Some(new_child);
            Outcome::Replaced(Value::List(Arc::new(copy)))
        }
    })
}

fn note_vivify(current: Option<&Value>, step: &Key, shape: &'static str) {
    match current {
        Some(found) if !found.is_null() => trace!(
            step = %step,
            found = found.type_name(),
            shape,
            "replacing incompatible value with new container"
        ),
        _ => trace!(step = %step, shape, "vivifying container"),
    }
}
