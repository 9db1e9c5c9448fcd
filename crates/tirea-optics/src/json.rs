//! Interop with `serde_json`.
//!
//! Documents convert to and from `serde_json::Value`; holes become `null` on
//! the way out. Lenses can be built from dynamic JSON, which is the one way to
//! end up with a [`Key::Unsupported`] step.

use crate::{Key, Lens, Value};
use serde_json::Value as Json;
use std::sync::Arc;

impl From<Json> for Value {
    fn from(json: Json) -> Self {
        match json {
            Json::Null => Value::Null,
            Json::Bool(b) => Value::Bool(b),
            Json::Number(n) => Value::Number(n),
            Json::String(s) => Value::String(Arc::from(s)),
            Json::Array(items) => Value::list_of(items.into_iter().map(Value::from)),
            Json::Object(map) => Value::record(map.into_iter().map(|(k, v)| (k, Value::from(v)))),
        }
    }
}

impl From<&Value> for Json {
    fn from(value: &Value) -> Self {
        match value {
            Value::Null => Json::Null,
            Value::Bool(b) => Json::Bool(*b),
            Value::Number(n) => Json::Number(n.clone()),
            Value::String(s) => Json::String(s.to_string()),
            Value::List(slots) => Json::Array(
                slots
                    .iter()
                    .map(|slot| slot.as_ref().map_or(Json::Null, Json::from))
                    .collect(),
            ),
            Value::Record(record) => Json::Object(
                record
                    .iter()
                    .map(|(k, v)| (k.clone(), Json::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for Json {
    fn from(value: Value) -> Self {
        Json::from(&value)
    }
}

/// Name of a JSON value's kind, for diagnostics.
#[inline]
pub fn json_type_name(v: &Json) -> &'static str {
    match v {
        Json::Null => "null",
        Json::Bool(_) => "boolean",
        Json::Number(_) => "number",
        Json::String(_) => "string",
        Json::Array(_) => "array",
        Json::Object(_) => "object",
    }
}

impl Lens {
    /// Build a lens from a dynamic JSON value.
    ///
    /// `null` is the identity, a string is a record key, an integer (or a
    /// float with no fractional part, such as `1.0`) is an index and an array
    /// is a path. Anything else (booleans, fractional
    /// numbers, objects) becomes a [`Key::Unsupported`] step, which
    /// [`set`](crate::set) rejects and [`view`](crate::view) treats as absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use tirea_optics::{lens, Lens};
    /// use serde_json::json;
    ///
    /// assert_eq!(Lens::from_json(&json!(["a", 1, null])), lens!("a", 1, Lens::Identity));
    /// assert_eq!(Lens::from_json(&json!(null)), Lens::Identity);
    /// ```
    pub fn from_json(json: &Json) -> Lens {
        match json {
            Json::Null => Lens::Identity,
            Json::String(s) => Lens::Key(Key::Prop(s.clone())),
            Json::Number(n) => match n.as_i64().or_else(|| n.as_f64().and_then(whole_index)) {
                Some(i) => Lens::Key(Key::Index(i)),
                None => Lens::Key(Key::Unsupported("number")),
            },
            Json::Array(items) => Lens::Path(items.iter().map(Lens::from_json).collect()),
            other => Lens::Key(Key::Unsupported(json_type_name(other))),
        }
    }
}

/// A float that names an exact `i64`.
fn whole_index(f: f64) -> Option<i64> {
    // i64::MAX as f64 rounds up to 2^63, which is out of range
    let in_range = f >= i64::MIN as f64 && f < i64::MAX as f64;
    (f.fract() == 0.0 && in_range).then_some(f as i64)
}

impl From<&Json> for Lens {
    fn from(json: &Json) -> Self {
        Lens::from_json(json)
    }
}

#[cfg(feature = "serde")]
mod serde_impls {
    use super::Json;
    use crate::{Key, Lens, Value};
    use serde::{de, ser, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for Value {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            Json::from(self).serialize(serializer)
        }
    }

    impl<'de> Deserialize<'de> for Value {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            Json::deserialize(deserializer).map(Value::from)
        }
    }

    impl Serialize for Key {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Key::Index(i) => serializer.serialize_i64(*i),
                Key::Prop(k) => serializer.serialize_str(k),
                Key::Unsupported(kind) => Err(ser::Error::custom(format!(
                    "cannot serialize lens key of kind {kind}"
                ))),
            }
        }
    }

    impl Serialize for Lens {
        fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
            match self {
                Lens::Identity => serializer.serialize_none(),
                Lens::Key(k) => k.serialize(serializer),
                Lens::Path(items) => serializer.collect_seq(items),
            }
        }
    }

    impl<'de> Deserialize<'de> for Lens {
        fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
            let json = Json::deserialize(deserializer)?;
            let lens = Lens::from_json(&json);
            let unsupported = lens.steps().iter().find_map(|k| match k {
                Key::Unsupported(kind) => Some(*kind),
                _ => None,
            });
            match unsupported {
                Some(kind) => Err(de::Error::custom(format!(
                    "unsupported lens key of kind {kind}"
                ))),
                None => Ok(lens),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lens;
    use serde_json::json;

    #[test]
    fn test_json_conversion_preserves_shape() {
        let json = json!({"a": [1, "two", null, {"b": true}], "c": 1.5});
        let value = Value::from(json.clone());
        assert_eq!(Json::from(&value), json);
    }

    #[test]
    fn test_holes_become_null() {
        let value = Value::list([None, Some(Value::from(7))]);
        assert_eq!(Json::from(value), json!([null, 7]));
    }

    #[test]
    fn test_lens_from_json() {
        assert_eq!(Lens::from_json(&json!("a")), Lens::prop("a"));
        assert_eq!(Lens::from_json(&json!(-2)), Lens::index(-2));
        assert_eq!(
            Lens::from_json(&json!(["a", ["b", 0]])),
            lens!("a", lens!("b", 0))
        );
    }

    #[test]
    fn test_lens_from_json_unsupported_kinds() {
        assert_eq!(Lens::from_json(&json!(true)), Lens::Key(Key::Unsupported("boolean")));
        assert_eq!(Lens::from_json(&json!({})), Lens::Key(Key::Unsupported("object")));
        assert_eq!(Lens::from_json(&json!(1.5)), Lens::Key(Key::Unsupported("number")));
        assert_eq!(Lens::from_json(&json!(1e300)), Lens::Key(Key::Unsupported("number")));
        assert_eq!(
            Lens::from_json(&json!(u64::MAX)),
            Lens::Key(Key::Unsupported("number"))
        );
    }

    #[test]
    fn test_lens_from_json_whole_floats_are_indices() {
        assert_eq!(Lens::from_json(&json!(1.0)), Lens::index(1));
        assert_eq!(Lens::from_json(&json!(-2.0)), Lens::index(-2));
        assert_eq!(Lens::from_json(&json!(["a", 0.0])), lens!("a", 0));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_lens_serde() {
        let l = lens!("users", 0, Lens::Identity, "name");
        let text = serde_json::to_string(&l).unwrap();
        assert_eq!(text, r#"["users",0,null,"name"]"#);
        let parsed: Lens = serde_json::from_str(&text).unwrap();
        assert_eq!(parsed, l);

        assert!(serde_json::from_str::<Lens>(r#"["a",true]"#).is_err());
        assert!(serde_json::to_string(&Lens::from(Key::Unsupported("boolean"))).is_err());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_value_serde() {
        let value: Value = serde_json::from_str(r#"{"a":[1,2]}"#).unwrap();
        assert_eq!(value, Value::from(json!({"a": [1, 2]})));
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"{"a":[1,2]}"#);
    }
}
