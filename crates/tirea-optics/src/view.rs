//! Read access through a lens.

use crate::{Key, Lens, Value};

/// Read the value a lens addresses.
///
/// Returns `None` as soon as a step does not apply: a record key on a
/// non-record or a missing entry, an index on a non-list, an index out of
/// range, a hole, or an unsupported key. Negative indices count from the end.
///
/// # Examples
///
/// ```
/// use tirea_optics::{lens, view, Lens, Value};
/// use serde_json::json;
///
/// let doc = Value::from(json!({"a": [0, {"b": 7}]}));
///
/// assert_eq!(view(&lens!("a", -1, "b"), &doc), Some(&Value::from(7)));
/// assert_eq!(view(&lens!("a", 2), &doc), None);
/// assert!(view(&Lens::Identity, &doc).unwrap().ptr_eq(&doc));
/// ```
pub fn view<'a>(lens: &Lens, target: &'a Value) -> Option<&'a Value> {
    get_at_steps(target, &lens.steps())
}

/// Walk normalized steps from `current`.
fn get_at_steps<'a>(current: &'a Value, steps: &[&Key]) -> Option<&'a Value> {
    let mut current = current;
    for step in steps {
        current = step_into(current, step)?;
    }
    Some(current)
}

/// Apply one step to a value.
fn step_into<'a>(current: &'a Value, key: &Key) -> Option<&'a Value> {
    match key {
        Key::Prop(k) => current.as_record()?.get(k),
        Key::Index(i) => {
            let list = current.as_list()?;
            let idx = resolve_index(*i, list.len())?;
            list.get(idx)?.as_ref()
        }
        Key::Unsupported(_) => None,
    }
}

/// Resolve a possibly negative index against a length.
///
/// Negative indices become `len + index`. Returns `None` when the result is
/// still negative. The upper bound is left to the caller, since writes may
/// address past the end.
#[inline]
pub(crate) fn resolve_index(index: i64, len: usize) -> Option<usize> {
    if index >= 0 {
        return usize::try_from(index).ok();
    }
    let len = i64::try_from(len).ok()?;
    usize::try_from(len.checked_add(index)?).ok()
}
