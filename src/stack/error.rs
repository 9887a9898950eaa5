use thiserror::Error;

/// Failures raised by the stack itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StackError {
  /// The operation needs a top element but the stack holds none.
  #[error("stack is empty")]
  EmptyStack,

  /// The operation needs more elements than the stack currently holds.
  #[error("stack has {available} elements, {required} required")]
  InsufficientElements { required: usize, available: usize },

  /// A traversal window does not fit the current contents.
  #[error("range {lo}..{hi} is invalid for a stack of {size} elements")]
  InvalidRange { lo: usize, hi: usize, size: usize },

  /// No element satisfies the predicate.
  #[error("no element matches the predicate")]
  NotFound,
}

/// Failure of a windowed traversal: either the window was rejected before
/// any element was visited, or the caller's mutator failed part way through.
///
/// Mutations applied to elements before the failing one are kept.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MutatorError<E> {
  #[error(transparent)]
  Stack(#[from] StackError),

  #[error("mutator failed: {0}")]
  Mutator(E),
}

impl<E> MutatorError<E> {
  /// Returns the caller's error, if that is what stopped the traversal.
  pub fn into_mutator(self) -> Option<E> {
    match self {
      MutatorError::Mutator(e) => Some(e),
      MutatorError::Stack(_) => None,
    }
  }
}
