//! Query Module - Step sequences over cursors
//!
//! - `step`: the closed `Step` type, `Predicate` and the `Query` builder
//! - `eval`: lazy left-to-right evaluation (`select`, `select_first`, ...)
//! - `axes`: structural axes in XPath terms
//! - `predicates`: ready-made generators and tests
//! - `parallel`: independent queries on the rayon pool

pub mod axes;
pub mod eval;
#[cfg(feature = "parallel")]
pub mod parallel;
pub mod predicates;
mod regex_cache;
pub mod step;

pub use axes::{navigate, Axis};
pub use eval::{select, select_first, select_first_from_root, select_from_root, Matches};
#[cfg(feature = "parallel")]
pub use parallel::{select_all, select_keyed};
pub use step::{AxisFn, FilterFn, Predicate, Query, Step};
