//! Functional update through a lens.

use crate::{error::OpticsResult, set, view, Lens, Value};

/// Replace the value a lens addresses with `f` applied to it.
///
/// Exactly `set(lens, f(view(lens, target)), target)`. `f` receives `None`
/// when nothing is there; returning `None` removes the slot.
///
/// # Examples
///
/// ```
/// use tirea_optics::{lens, over, Value};
/// use serde_json::json;
///
/// let doc = Value::from(json!({"a": ["foo", "bar"]}));
/// let shouted = over(
///     &lens!("a", 1),
///     |s| s.and_then(Value::as_str).map(|s| Value::from(s.to_uppercase())),
///     &doc,
/// )
/// .unwrap();
/// assert_eq!(shouted, Value::from(json!({"a": ["foo", "BAR"]})));
/// ```
pub fn over<F, R>(lens: &Lens, f: F, target: &Value) -> OpticsResult<Value>
where
    F: FnOnce(Option<&Value>) -> R,
    R: Into<Option<Value>>,
{
    let next = f(view(lens, target)).into();
    set(lens, next, target)
}
