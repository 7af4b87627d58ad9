//! Sequence combinators over cursors.
//!
//! Every combinator here is built from the two traversal primitives of a
//! [`Traverse`] provider: visit everything
//! ([`for_each_async`](Traverse::for_each_async)) or visit until told to stop
//! ([`while_async`](Traverse::while_async)). The crate adds no errors of its
//! own; a provider failure fails the terminal call with no partial result.
//!
//! | Combinator | Terminal call | Primitive | Absent cursor |
//! |------------|---------------|-----------|---------------|
//! | [`ForEach`] | `callback(f)` | every | `()` |
//! | [`Transform`] | `callback(f)` | every | `[]` |
//! | [`Accumulate`] | `callback(seed, f)` | every | `seed` |
//! | [`Collect`] | `matching(pred)` | every | `[]` |
//! | [`Quantify`] (any/all/none) | `matching(pred)` | while | `false` |
//! | [`Find`] | `matching(pred)` | while | `None` |
//! | [`Select`] | `project(options, f)` | while | `[]` |
//!
//! Each combinator consumes its cursor; build a new one per traversal.
//!
//! # Example
//!
//! ```ignore
//! use cursor_algorithm::{Algorithms, SelectOptions};
//! use cursor_traverse::mem::{MemCursor, MemTraversal};
//!
//! let provider = MemTraversal::new();
//! let algorithms = Algorithms::new(&provider);
//!
//! let firsts = algorithms
//!     .select(Some(MemCursor::from(vec![1, 2, 3, 4, 5])), 2)
//!     .project(SelectOptions::matching(|x: &i32| x % 2 == 0), |x| x * 10)
//!     .await?;
//! assert_eq!(firsts, vec![20, 40]);
//! ```

#![warn(
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    unreachable_pub,
    clippy::missing_const_for_fn,
    rustdoc::all
)]
#![cfg_attr(not(test), warn(unused_crate_dependencies))]
#![deny(unused_must_use, rust_2018_idioms)]
#![cfg_attr(docsrs, feature(doc_cfg))]

mod source;

mod each;
pub use each::{Accumulate, Collect, ForEach, Transform};

mod factory;
pub use factory::Algorithms;

mod find;
pub use find::Find;

mod quantifier;
pub use quantifier::{Quantifier, Quantify};

mod select;
pub use select::{Select, SelectOptions};

pub use cursor_traverse::{Traverse, TraverseError, TraverseResult};
