//! Lens-addressed reads and structurally shared writes over nested documents.
//!
//! `tirea-optics` provides three pure operations over records and lists:
//!
//! - [`view`]: read the value a lens addresses
//! - [`set`]: produce a new document with that slot replaced, removed or
//!   created
//! - [`over`]: `set` the result of a function applied to `view`
//!
//! # Core Concepts
//!
//! - **Value**: a document whose records and lists sit behind `Arc`, so
//!   unchanged branches are shared between the input and the output of a write
//! - **Lens**: the identity, a single [`Key`], or a path of lenses
//! - **Key**: a record key or a list index (negative counts from the end)
//! - **Absence**: `None`. `view` returns it for anything it cannot reach, and
//!   passing it to `set` removes the slot
//!
//! # Structural Sharing
//!
//! ```text
//! doc' = set(lens, value, doc)
//! ```
//!
//! - `doc` is never mutated
//! - `doc'` differs from `doc` only along `lens`; everything else is the same
//!   allocation (see [`Value::ptr_eq`])
//! - A removal that finds nothing returns `doc` itself
//!
//! # Quick Start
//!
//! ```
//! use tirea_optics::{lens, over, set, view, Value};
//! use serde_json::json;
//!
//! let doc = Value::from(json!({"user": {"name": "Alice", "roles": ["admin"]}}));
//!
//! // Read
//! assert_eq!(view(&lens!("user", "roles", -1), &doc), Some(&Value::from("admin")));
//!
//! // Write (pure function, missing containers are created)
//! let doc2 = set(&lens!("user", "tags", 1), Value::from("new"), &doc).unwrap();
//! assert_eq!(view(&lens!("user", "tags", 1), &doc2), Some(&Value::from("new")));
//! assert!(view(&lens!("user", "roles"), &doc2)
//!     .unwrap()
//!     .ptr_eq(view(&lens!("user", "roles"), &doc).unwrap()));
//!
//! // Remove
//! let doc3 = set(&lens!("user", "name"), None, &doc2).unwrap();
//! assert_eq!(view(&lens!("user", "name"), &doc3), None);
//!
//! // Update
//! let doc4 = over(
//!     &lens!("user", "name"),
//!     |name| name.and_then(Value::as_str).map(|n| Value::from(n.to_uppercase())),
//!     &doc,
//! )
//! .unwrap();
//! assert_eq!(view(&lens!("user", "name"), &doc4), Some(&Value::from("ALICE")));
//! ```

mod error;
mod json;
mod lens;
mod over;
mod set;
mod value;
mod view;

pub use error::{OpticsError, OpticsResult};
pub use json::json_type_name;
pub use lens::{Key, KeyKind, Lens};
pub use over::over;
pub use set::set;
pub use value::{Record, Slot, Value};
pub use view::view;
