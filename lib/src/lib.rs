//! Generated reflection and structure for plain Rust types.
//!
//! The derives read an enum definition and add the members you would
//! otherwise write by hand:
//!
//! - [`CaseName`]: a `case_name` method reporting the active variant's name.
//! - [`IsCase`] / [`IsNotCase`]: per-variant `is_*` and `is_not_*`
//!   predicates, plus a payload-free `<Name>Cases` mirror enum with
//!   `is_among` membership tests.
//! - [`CaseValue`]: an accessor per payload slot, returning `Option<&T>`.
//!
//! ```
//! use casekit::{CaseName, CaseValue, IsCase};
//!
//! #[derive(CaseName, IsCase, CaseValue)]
//! pub enum Connection {
//!     Idle,
//!     Open { port: u16 },
//!     Closed(Option<String>),
//! }
//!
//! let connection = Connection::Open { port: 443 };
//! assert_eq!(connection.case_name(), "Open");
//! assert!(connection.is_open());
//! assert!(!connection.is_idle());
//! assert_eq!(connection.open_port(), Some(&443));
//! assert!(connection.is_among(&[ConnectionCases::Idle, ConnectionCases::Open]));
//! ```
//!
//! The function-like macros build values and declarations from terse input.
//! [`labeled!`] turns an array literal into an ordered [`LabeledMap`] keyed
//! by each element's source text:
//!
//! ```
//! let small = 4;
//! let large = 16;
//! let sizes = casekit::labeled!([small, large, small + large]);
//! assert_eq!(sizes.get("small"), Some(&4));
//! assert_eq!(sizes.get("small + large"), Some(&20));
//! let keys: Vec<_> = sizes.keys().copied().collect();
//! assert_eq!(keys, ["small", "large", "small + large"]);
//! ```
//!
//! [`option_set!`] declares a bit-set struct from an enum of flag names, and
//! [`with_environment!`] builds a value that pulls typed dependencies out of
//! an [`Environment`] before running its content closure. See each macro's
//! documentation for details.

pub use casekit_macros::dictionarified;
pub use casekit_macros::labeled;
pub use casekit_macros::labeled_views;
pub use casekit_macros::option_set;
pub use casekit_macros::stringified;
pub use casekit_macros::with_env;
pub use casekit_macros::with_environment;
pub use casekit_macros::CaseName;
pub use casekit_macros::CaseValue;
pub use casekit_macros::IsCase;
pub use casekit_macros::IsNotCase;

mod env;
mod options;
mod view;

pub use env::Environment;
pub use env::Observed;
pub use env::ObservedObject;
pub use options::OptionBits;
pub use options::OptionSet;
pub use view::labeled_views;
pub use view::Labeled;
pub use view::LabeledView;

/// The ordered map produced by [`labeled!`]. Iteration follows insertion
/// order, which is the source order of the labeled elements.
pub type LabeledMap<V> = indexmap::IndexMap<&'static str, V>;
