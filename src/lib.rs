//! A thread-safe LIFO stack behind a single coarse-grained lock, plus the
//! linearizability checker used to test it.
//!
//! ```
//! use coarse_stack::{ConcurrentStack, StackError};
//!
//! let stack = ConcurrentStack::from_slice(&[1, 2, 3]);
//! stack.push(4);
//!
//! assert_eq!(stack.pop(), Ok(4));
//! assert_eq!(stack.pop_n(2), Ok(vec![3, 2]));
//! assert_eq!(stack.to_string(), "[1]");
//! assert_eq!(stack.pop_n(2), Err(StackError::InsufficientElements { required: 2, available: 1 }));
//! ```

pub mod stack;
pub mod linearization;

#[cfg(test)]
mod testing;

pub use stack::{ConcurrentStack, MutatorError, StackError};
