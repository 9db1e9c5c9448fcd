//! Lens representation for addressing locations inside a document.
//!
//! A lens is the identity, a single key, or a path of lenses. Before any read
//! or write it is normalized into a flat sequence of [`Key`] steps.

use std::{fmt, num::TryFromIntError};

/// A single step into a document.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// List index. Negative values count from the end.
    Index(i64),
    /// Record key.
    Prop(String),
    /// A key of a kind that cannot address anything (boolean, fractional
    /// number, object, ...). Only produced by dynamic construction, see
    /// [`Lens::from_json`]. Carries the rejected kind's name.
    Unsupported(&'static str),
}

/// The container shape a key addresses.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// Addresses a slot of a list.
    Index,
    /// Addresses an entry of a record.
    Record,
    /// Addresses nothing.
    Unsupported,
}

impl Key {
    /// Create a record key.
    #[inline]
    pub fn prop(k: impl Into<String>) -> Self {
        Key::Prop(k.into())
    }

    /// Create an index key.
    #[inline]
    pub fn index(i: i64) -> Self {
        Key::Index(i)
    }

    /// Classify this key. Reads and writes both dispatch on this.
    #[inline]
    pub fn kind(&self) -> KeyKind {
        match self {
            Key::Index(_) => KeyKind::Index,
            Key::Prop(_) => KeyKind::Record,
            Key::Unsupported(_) => KeyKind::Unsupported,
        }
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Index(i) => write!(f, "[{}]", i),
            Key::Prop(k) => write!(f, ".{}", k),
            Key::Unsupported(kind) => write!(f, "<{}>", kind),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Prop(s.to_owned())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Prop(s)
    }
}

impl From<i64> for Key {
    fn from(i: i64) -> Self {
        Key::Index(i)
    }
}

impl From<i32> for Key {
    fn from(i: i32) -> Self {
        Key::Index(i64::from(i))
    }
}

impl TryFrom<usize> for Key {
    type Error = TryFromIntError;

    /// Fails for positions beyond `i64::MAX`.
    fn try_from(i: usize) -> Result<Self, Self::Error> {
        i64::try_from(i).map(Key::Index)
    }
}

/// An address into a document.
///
/// `Lens::Key` and a one-element `Lens::Path` normalize to the same step, but
/// they differ in one respect when writing: a bare key refuses to write into a
/// null target, while a path vivifies containers from null.
///
/// # Examples
///
/// ```
/// use tirea_optics::{lens, Key, Lens};
///
/// let l = lens!("users", 0, "name");
/// assert_eq!(l.steps().len(), 3);
/// assert_eq!(l.to_string(), "$.users[0].name");
///
/// let single = Lens::from(-1);
/// assert_eq!(single.steps(), vec![&Key::Index(-1)]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Lens {
    /// The whole target.
    #[default]
    Identity,
    /// A single key.
    Key(Key),
    /// Lenses applied left to right.
    Path(Vec<Lens>),
}

impl Lens {
    /// Create a single record-key lens.
    #[inline]
    pub fn prop(k: impl Into<String>) -> Self {
        Lens::Key(Key::Prop(k.into()))
    }

    /// Create a single index lens.
    #[inline]
    pub fn index(i: i64) -> Self {
        Lens::Key(Key::Index(i))
    }

    /// Create a path lens.
    pub fn path<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Lens>,
    {
        Lens::Path(items.into_iter().map(Into::into).collect())
    }

    /// Returns true when this lens normalizes to no steps.
    pub fn is_identity(&self) -> bool {
        match self {
            Lens::Identity => true,
            Lens::Key(_) => false,
            Lens::Path(items) => items.iter().all(Lens::is_identity),
        }
    }

    /// Returns true for a bare `Lens::Key`.
    #[inline]
    pub fn is_single_key(&self) -> bool {
        matches!(self, Lens::Key(_))
    }

    /// Normalize into a flat step sequence.
    ///
    /// Identity elements inside a path contribute no step and do not stop
    /// later elements from applying.
    pub fn steps(&self) -> Vec<&Key> {
        let mut out = Vec::new();
        self.push_steps(&mut out);
        out
    }

    fn push_steps<'a>(&'a self, out: &mut Vec<&'a Key>) {
        match self {
            Lens::Identity => {}
            Lens::Key(k) => out.push(k),
            Lens::Path(items) => {
                for item in items {
                    item.push_steps(out);
                }
            }
        }
    }

    /// Concatenate two lenses into a path (non-consuming).
    pub fn join(&self, other: &Lens) -> Lens {
        self.clone().then(other.clone())
    }

    /// Append a lens and return the resulting path (builder pattern).
    pub fn then(self, next: impl Into<Lens>) -> Lens {
        let mut items = match self {
            Lens::Path(items) => items,
            Lens::Identity => Vec::new(),
            key @ Lens::Key(_) => vec![key],
        };
        items.push(next.into());
        Lens::Path(items)
    }
}

impl fmt::Display for Lens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "$")?;
        for step in self.steps() {
            write!(f, "{}", step)?;
        }
        Ok(())
    }
}

impl From<Key> for Lens {
    fn from(k: Key) -> Self {
        Lens::Key(k)
    }
}

impl From<&str> for Lens {
    fn from(s: &str) -> Self {
        Lens::Key(s.into())
    }
}

impl From<String> for Lens {
    fn from(s: String) -> Self {
        Lens::Key(s.into())
    }
}

impl From<i64> for Lens {
    fn from(i: i64) -> Self {
        Lens::Key(i.into())
    }
}

impl From<i32> for Lens {
    fn from(i: i32) -> Self {
        Lens::Key(i.into())
    }
}

impl From<Vec<Lens>> for Lens {
    fn from(items: Vec<Lens>) -> Self {
        Lens::Path(items)
    }
}

impl<T: Into<Lens>> From<Option<T>> for Lens {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Lens::Identity, Into::into)
    }
}

impl FromIterator<Lens> for Lens {
    fn from_iter<I: IntoIterator<Item = Lens>>(iter: I) -> Self {
        Lens::Path(iter.into_iter().collect())
    }
}

/// Construct a path `Lens` from a sequence of steps.
///
/// # Examples
///
/// ```
/// use tirea_optics::{lens, Lens};
///
/// // String literals become record keys, integers become indices
/// let l = lens!("items", -1, "name");
///
/// // Identity elements are skipped
/// let same = lens!("items", Lens::Identity, -1, "name");
/// assert_eq!(l.steps(), same.steps());
///
/// // No steps at all is the identity
/// assert!(lens!().is_identity());
/// ```
#[macro_export]
macro_rules! lens {
    () => {
        $crate::Lens::Identity
    };
    ($($step:expr),+ $(,)?) => {
        $crate::Lens::Path(vec![$($crate::Lens::from($step)),+])
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_has_no_steps() {
        assert!(Lens::Identity.steps().is_empty());
        assert!(Lens::Path(vec![]).is_identity());
        assert!(lens!(Lens::Identity, Lens::Identity).is_identity());
        assert!(!Lens::from("a").is_identity());
    }

    #[test]
    fn test_identity_inside_path_is_skipped() {
        let l = lens!("a", Lens::Identity, 1);
        assert_eq!(l.steps(), vec![&Key::prop("a"), &Key::Index(1)]);
    }

    #[test]
    fn test_nested_paths_flatten() {
        let inner = lens!("b", 2);
        let l = Lens::path([Lens::from("a"), inner, Lens::from("c")]);
        assert_eq!(
            l.steps(),
            vec![&Key::prop("a"), &Key::prop("b"), &Key::Index(2), &Key::prop("c")]
        );
    }

    #[test]
    fn test_option_maps_none_to_identity() {
        assert_eq!(Lens::from(None::<&str>), Lens::Identity);
        assert_eq!(Lens::from(Some("a")), Lens::prop("a"));
    }

    #[test]
    fn test_key_kind() {
        assert_eq!(Key::Index(-3).kind(), KeyKind::Index);
        assert_eq!(Key::prop("x").kind(), KeyKind::Record);
        assert_eq!(Key::Unsupported("boolean").kind(), KeyKind::Unsupported);
    }

    #[test]
    fn test_key_from_usize() {
        assert_eq!(Key::try_from(3usize), Ok(Key::Index(3)));
        #[cfg(target_pointer_width = "64")]
        assert!(Key::try_from(usize::MAX).is_err());
    }

    #[test]
    fn test_single_key_vs_path() {
        assert!(Lens::from("a").is_single_key());
        assert!(!lens!("a").is_single_key());
        assert_eq!(Lens::from("a").steps(), lens!("a").steps());
    }

    #[test]
    fn test_then_and_join() {
        let base = Lens::from("data");
        let joined = base.join(&lens!("items", 0));
        assert_eq!(joined.to_string(), "$.data.items[0]");

        let built = Lens::Identity.then("a").then(-1);
        assert_eq!(built.steps(), vec![&Key::prop("a"), &Key::Index(-1)]);
    }

    #[test]
    fn test_display() {
        assert_eq!(Lens::Identity.to_string(), "$");
        assert_eq!(lens!("users", 0, "name").to_string(), "$.users[0].name");
        assert_eq!(Lens::from(Key::Unsupported("boolean")).to_string(), "$<boolean>");
    }
}
