use tracing::trace;
use super::*;

/// Transforms, traversals and searches.
///
/// Indices count from the bottom of the stack. "First" means the lowest
/// index (push order), "last" the highest. Every method holds the lock for
/// the whole scan.
impl<T> ConcurrentStack<T> {
  ///////////////////////////////////////////////////////////////////////////
  //// Transforms
  ///////////////////////////////////////////////////////////////////////////

  /// Keeps only the elements for which `predicate` holds, in their original
  /// relative order.
  pub fn filter<F>(&self, predicate: F)
  where F: FnMut(&T) -> bool {
    let mut elems = self.lock();
    let before = elems.len();
    elems.retain(predicate);
    trace!(retained = elems.len(), removed = before - elems.len(), "filtered stack");
  }

  /// Builds a new stack from `f` applied to every element. The source is
  /// left untouched and positions are preserved.
  pub fn map<U, F>(&self, f: F) -> ConcurrentStack<U>
  where F: FnMut(&T) -> U {
    let elems = self.lock();
    elems.iter().map(f).collect()
  }

  /// Like [`map`](Self::map) with a fallible `f`. The first error is
  /// returned as is and no partial stack is produced.
  pub fn try_map<U, E, F>(&self, f: F) -> Result<ConcurrentStack<U>, E>
  where F: FnMut(&T) -> Result<U, E> {
    let elems = self.lock();
    elems.iter().map(f).collect()
  }

  /// Folds the stack bottom to top, seeded with the bottom element.
  pub fn reduce<F>(&self, f: F) -> Result<T, StackError>
  where T: Clone,
        F: FnMut(T, &T) -> T {
    let elems = self.lock();
    let (first, rest) = elems.split_first().ok_or(StackError::EmptyStack)?;
    Ok(rest.iter().fold(first.clone(), f))
  }

  /// Folds the stack bottom to top starting from `init`.
  pub fn fold<A, F>(&self, init: A, f: F) -> A
  where F: FnMut(A, &T) -> A {
    self.lock().iter().fold(init, f)
  }

  ///////////////////////////////////////////////////////////////////////////
  //// Traversal with mutation
  ///////////////////////////////////////////////////////////////////////////

  /// Applies `f` to every element, bottom to top.
  ///
  /// Stops at the first error and returns it. Elements already visited keep
  /// their new values.
  pub fn for_each<E, F>(&self, mut f: F) -> Result<(), E>
  where F: FnMut(&mut T) -> Result<(), E> {
    self.lock().iter_mut().try_for_each(&mut f)
  }

  /// Applies `f` to the elements with index in `lo..hi`.
  ///
  /// The window is checked before anything is visited. A mutator failure
  /// stops the traversal; earlier elements keep their new values.
  pub fn for_range<E, F>(&self, lo: usize, hi: usize, f: F) -> Result<(), MutatorError<E>>
  where F: FnMut(&mut T) -> Result<(), E> {
    let mut elems = self.lock();
    visit_window(&mut elems, lo, hi, f)
  }

  /// Applies `f` to the elements from index `lo` up to the top.
  pub fn for_from<E, F>(&self, lo: usize, f: F) -> Result<(), MutatorError<E>>
  where F: FnMut(&mut T) -> Result<(), E> {
    let mut elems = self.lock();
    let hi = elems.len();
    visit_window(&mut elems, lo, hi, f)
  }

  ///////////////////////////////////////////////////////////////////////////
  //// Search
  ///////////////////////////////////////////////////////////////////////////

  /// Tests if any element satisfies `predicate`. False on an empty stack.
  pub fn any<F>(&self, predicate: F) -> bool
  where F: FnMut(&T) -> bool {
    self.lock().iter().any(predicate)
  }

  /// Tests if every element satisfies `predicate`. True on an empty stack.
  pub fn all<F>(&self, predicate: F) -> bool
  where F: FnMut(&T) -> bool {
    self.lock().iter().all(predicate)
  }

  /// Returns a copy of the lowest-index element satisfying `predicate`.
  pub fn find<F>(&self, mut predicate: F) -> Result<T, StackError>
  where T: Clone,
        F: FnMut(&T) -> bool {
    self.lock()
      .iter()
      .find(|&e| predicate(e))
      .cloned()
      .ok_or(StackError::NotFound)
  }

  /// Returns a copy of the highest-index element satisfying `predicate`.
  pub fn find_last<F>(&self, mut predicate: F) -> Result<T, StackError>
  where T: Clone,
        F: FnMut(&T) -> bool {
    self.lock()
      .iter()
      .rev()
      .find(|&e| predicate(e))
      .cloned()
      .ok_or(StackError::NotFound)
  }

  pub fn find_index<F>(&self, predicate: F) -> Result<usize, StackError>
  where F: FnMut(&T) -> bool {
    self.lock().iter().position(predicate).ok_or(StackError::NotFound)
  }

  pub fn find_last_index<F>(&self, predicate: F) -> Result<usize, StackError>
  where F: FnMut(&T) -> bool {
    self.lock().iter().rposition(predicate).ok_or(StackError::NotFound)
  }

  /// Returns copies of every matching element, bottom first. Empty when
  /// nothing matches.
  pub fn find_all<F>(&self, mut predicate: F) -> Vec<T>
  where T: Clone,
        F: FnMut(&T) -> bool {
    self.lock()
      .iter()
      .filter(|&e| predicate(e))
      .cloned()
      .collect()
  }

  /// Returns the indices of every matching element in ascending order.
  pub fn find_indices<F>(&self, mut predicate: F) -> Vec<usize>
  where F: FnMut(&T) -> bool {
    self.lock()
      .iter()
      .enumerate()
      .filter(|&(_, e)| predicate(e))
      .map(|(i, _)| i)
      .collect()
  }
}

fn visit_window<T, E, F>(elems: &mut [T], lo: usize, hi: usize, mut f: F) -> Result<(), MutatorError<E>>
where F: FnMut(&mut T) -> Result<(), E> {
  let size = elems.len();
  if lo > hi || hi > size {
    trace!(lo, hi, size, "traversal window rejected");
    return Err(StackError::InvalidRange { lo, hi, size }.into());
  }

  elems[lo..hi]
    .iter_mut()
    .try_for_each(&mut f)
    .map_err(MutatorError::Mutator)
}
