use std::fmt;
use std::ptr;
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{trace, warn};
use super::*;

/// A thread-safe LIFO stack guarded by a single mutex.
///
/// Elements live in a `Vec<T>` with index 0 at the bottom and the last index
/// at the top. Every public method takes the lock exactly once and holds it
/// until it returns, so each call is atomic with respect to every other call
/// on the same instance. Sequences of calls are not.
///
/// Callbacks handed to the traversal and search methods run while the lock
/// is held. They must not call back into the same stack; the mutex is not
/// reentrant and the call would deadlock.
///
/// Share an instance across threads with `Arc<ConcurrentStack<T>>` or a
/// scoped borrow. `Clone` produces an independent deep copy, not a second
/// handle to the same stack.
pub struct ConcurrentStack<T> {
  elems: Mutex<Vec<T>>,
}

impl<T> ConcurrentStack<T> {
  /// Creates a new, empty stack.
  pub fn new() -> Self {
    Self {
      elems: Mutex::new(Vec::new()),
    }
  }

  /// Creates an empty stack with room for `capacity` elements before it
  /// reallocates.
  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      elems: Mutex::new(Vec::with_capacity(capacity)),
    }
  }

  /// Builds a stack by pushing `items` in order, so the last item is on top.
  pub fn from_slice(items: &[T]) -> Self
  where T: Clone {
    Self::from(items.to_vec())
  }

  /// Acquires the instance lock, recovering it if a callback panicked while
  /// holding it. The `Vec` itself is never left structurally broken, only
  /// partially traversed.
  pub(super) fn lock(&self) -> MutexGuard<'_, Vec<T>> {
    self.elems.lock().unwrap_or_else(|poisoned| {
      warn!("recovering stack lock poisoned by a panicking callback");
      self.elems.clear_poison();
      poisoned.into_inner()
    })
  }

  ///////////////////////////////////////////////////////////////////////////
  //// Core operations
  ///////////////////////////////////////////////////////////////////////////

  /// Pushes an element onto the top of the stack.
  pub fn push(&self, item: T) {
    self.lock().push(item);
  }

  /// Removes and returns the top element.
  pub fn pop(&self) -> Result<T, StackError> {
    self.lock().pop().ok_or(StackError::EmptyStack)
  }

  /// Returns a copy of the top element.
  pub fn peek(&self) -> Result<T, StackError>
  where T: Clone {
    self.lock().last().cloned().ok_or(StackError::EmptyStack)
  }

  /// Same as [`peek`](Self::peek).
  pub fn top(&self) -> Result<T, StackError>
  where T: Clone {
    self.peek()
  }

  /// Runs `f` against the top element without copying it out.
  pub fn with_top<R, F>(&self, f: F) -> Result<R, StackError>
  where F: FnOnce(&T) -> R {
    self.lock().last().map(f).ok_or(StackError::EmptyStack)
  }

  /// Exchanges the two topmost elements.
  pub fn swap(&self) -> Result<(), StackError> {
    let mut elems = self.lock();
    let n = elems.len();
    if n < 2 {
      trace!(available = n, "swap rejected");
      return Err(StackError::InsufficientElements {
        required: 2,
        available: n,
      });
    }

    elems.swap(n - 1, n - 2);
    Ok(())
  }

  /// Returns the number of elements in the stack.
  pub fn size(&self) -> usize {
    self.lock().len()
  }

  /// Predicate that tests if the stack is empty.
  pub fn is_empty(&self) -> bool {
    self.lock().is_empty()
  }

  /// Removes every element.
  pub fn clear(&self) {
    let mut elems = self.lock();
    trace!(count = elems.len(), "clearing stack");
    elems.clear();
  }

  pub fn contains(&self, item: &T) -> bool
  where T: PartialEq {
    self.lock().contains(item)
  }

  /// Returns a snapshot of the contents, bottom first.
  pub fn to_vec(&self) -> Vec<T>
  where T: Clone {
    self.lock().clone()
  }

  /// Consumes the stack and returns its contents, bottom first.
  pub fn into_vec(self) -> Vec<T> {
    self.elems.into_inner().unwrap_or_else(PoisonError::into_inner)
  }

  /// Reverses the stack in place: the bottom element becomes the top.
  pub fn reverse(&self) {
    self.lock().reverse();
  }

  ///////////////////////////////////////////////////////////////////////////
  //// Bulk operations
  ///////////////////////////////////////////////////////////////////////////

  /// Pushes every item in order; the last one ends up on top. No other
  /// operation can interleave with the pushes.
  pub fn push_many<I>(&self, items: I)
  where I: IntoIterator<Item = T> {
    let mut elems = self.lock();
    let before = elems.len();
    elems.extend(items);
    trace!(count = elems.len() - before, "pushed elements");
  }

  /// Pushes copies of `items` in order; the last one ends up on top.
  pub fn push_all(&self, items: &[T])
  where T: Clone {
    self.push_many(items.iter().cloned());
  }

  /// Removes the top `n` elements and returns them top first.
  ///
  /// Either all `n` elements are removed or none are.
  pub fn pop_n(&self, n: usize) -> Result<Vec<T>, StackError> {
    let mut elems = self.lock();
    let available = elems.len();
    if available < n {
      trace!(required = n, available, "pop_n rejected");
      return Err(StackError::InsufficientElements {
        required: n,
        available,
      });
    }

    let mut popped = elems.split_off(available - n);
    popped.reverse();
    trace!(count = n, "popped elements");
    Ok(popped)
  }

  /// Empties the stack and returns everything top first.
  pub fn pop_all(&self) -> Vec<T> {
    let mut elems = self.lock();
    trace!(count = elems.len(), "popping all elements");
    elems.drain(..).rev().collect()
  }

  ///////////////////////////////////////////////////////////////////////////
  //// Whole-stack operations
  ///////////////////////////////////////////////////////////////////////////

  /// Returns an independent stack holding copies of the current elements.
  pub fn copy(&self) -> Self
  where T: Clone {
    Self::from(self.to_vec())
  }

  /// Tests whether both stacks hold equal elements at every position.
  ///
  /// Both locks are taken in address order, so two threads running
  /// `a.equal(&b)` and `b.equal(&a)` cannot deadlock.
  pub fn equal(&self, other: &Self) -> bool
  where T: PartialEq {
    if ptr::eq(self, other) {
      return true;
    }

    let (first, second) = if (self as *const Self) < (other as *const Self) {
      (self, other)
    } else {
      (other, self)
    };

    let a = first.lock();
    let b = second.lock();
    *a == *b
  }
}

impl<T> Default for ConcurrentStack<T> {
  fn default() -> Self {
    Self::new()
  }
}

impl<T> From<Vec<T>> for ConcurrentStack<T> {
  /// The first element of `elems` is the bottom, the last is the top.
  fn from(elems: Vec<T>) -> Self {
    Self {
      elems: Mutex::new(elems),
    }
  }
}

impl<T> FromIterator<T> for ConcurrentStack<T> {
  fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
    Self::from(iter.into_iter().collect::<Vec<T>>())
  }
}

impl<T> Extend<T> for ConcurrentStack<T> {
  fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
    self.push_many(iter);
  }
}

impl<T> Clone for ConcurrentStack<T>
where T: Clone {
  fn clone(&self) -> Self {
    self.copy()
  }
}

impl<T> PartialEq for ConcurrentStack<T>
where T: PartialEq {
  fn eq(&self, other: &Self) -> bool {
    self.equal(other)
  }
}

impl<T> Eq for ConcurrentStack<T>
where T: Eq {}

/// Renders the stack bottom to top, e.g. `[1, 2, 3]` with 3 on top.
impl<T> fmt::Display for ConcurrentStack<T>
where T: fmt::Display {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    let elems = self.lock();
    write!(f, "[")?;
    for (i, elem) in elems.iter().enumerate() {
      if i > 0 {
        write!(f, ", ")?;
      }
      write!(f, "{}", elem)?;
    }
    write!(f, "]")
  }
}

impl<T> fmt::Debug for ConcurrentStack<T>
where T: fmt::Debug {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("ConcurrentStack")
      .field("elements", &*self.lock())
      .finish()
  }
}
