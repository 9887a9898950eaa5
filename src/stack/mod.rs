//! The coarse-lock concurrent stack
//!
//! `ConcurrentStack<T>` keeps its elements in a `Vec<T>` behind one
//! `Mutex`. Every public operation, from a single `push` to a full
//! `for_each` traversal, runs under one acquisition of that mutex, which
//! makes each call atomic and gives every caller a single consistent
//! snapshot of the stack. There is no reader/writer split and no lock-free
//! fast path: a long traversal blocks all other callers for its duration.
//!
//! Operations are grouped as follows:
//!
//! * core: `push`, `pop`, `peek`/`top`, `swap`, `size`, `is_empty`, `clear`,
//!   `contains`, `to_vec`, `reverse`
//! * bulk: `push_many`, `push_all`, `pop_n`, `pop_all`
//! * transforms: `filter`, `map`, `try_map`, `reduce`, `fold`
//! * traversal with mutation: `for_each`, `for_range`, `for_from`
//! * search: `any`, `all` and the `find` family
//! * whole stack: `copy`, `equal`, `Display`
//!
//! Element bounds are per operation: only the methods that copy elements
//! out need `T: Clone`, and only the comparing ones need `T: PartialEq`.

mod coarse_lock;
mod error;
mod functional;

pub use self::coarse_lock::ConcurrentStack;
pub use self::error::{MutatorError, StackError};
