//! Linearization of concurrent histories
//!
//! This module checks that a concurrent log of stack operations could have
//! been produced by some sequential execution that respects real time: if
//! one call returned before another started, it must come first.
//!
//! Each thread records its calls as `Action` objects (see
//! `Action::record`). A `Linearization` sorts the merged log by start time
//! and performs a depth-first search over the calls that could take effect
//! next, undoing its model state on backtrack. The search is based on a
//! [thesis](https://www.cl.cam.ac.uk/techreports/UCAM-CL-TR-579.pdf) by
//! Karl Fraser.
//!
//! The search is exponential in the worst case. Keep recorded histories to
//! a few thousand actions with modest overlap.

mod action;
mod stack;

pub use self::action::{Action, ActionID};
pub use self::stack::{StackOp, StackLinearization};

use std::fmt::Debug;

/// Represents an operation performed by an abstract data type, including
/// whatever output the caller saw.
pub trait Op: Clone + Debug {}

/// A linearization for a sequence of `Action` objects.
pub trait Linearization
where Self::P: Op {
  type P;

  /// Creates a new, empty linearization.
  fn new() -> Self;

  /// Pushes the given action onto the search path, applying it to the model.
  fn push(&mut self, a: Action<Self::P>);

  /// Pops the latest action from the search path, undoing it.
  fn pop(&mut self);

  /// Returns the latest action on the search path.
  fn peek(&self) -> &Action<Self::P>;

  /// Tests if the search path contains the given action.
  fn contains(&self, a: &Action<Self::P>) -> bool;

  /// Returns the number of actions in the search path.
  fn count(&self) -> usize;

  /// Determines if the action's observed output matches the model in its
  /// current state (i.e. if the action can be pushed onto the search path).
  fn is_consistent_with(&self, a: &Action<Self::P>) -> bool;

  /// Returns the linearized history produced by this linearization.
  fn get_history(&self) -> Vec<Action<Self::P>>;

  /// Linearizes the given concurrent log, if possible.
  fn linearize(&mut self, mut log: Vec<Action<Self::P>>) -> Option<Vec<Action<Self::P>>> {
    log.sort_by_key(|a| a.get_start());
    self.dfs(&log)
  }

  /// Performs a depth-first search for a valid linearization on the given
  /// log, which must be sorted by start time.
  fn dfs(&mut self, log: &[Action<Self::P>]) -> Option<Vec<Action<Self::P>>> {
    let mut frames = Vec::new();
    let mut candidates = self.gen(log);
    let mut i = 0;

    loop {
      if self.pred(log) {
        return Some(self.get_history());
      } else if i < candidates.len() {
        let a = candidates[i].clone();

        if !self.contains(&a) {
          self.push(a);
          frames.push((candidates, i + 1));
          candidates = self.gen(log);
          i = 0;
        } else {
          i += 1;
        }
      } else if let Some((prev, next)) = frames.pop() {
        self.pop();
        candidates = prev;
        i = next;
      } else {
        return None;
      }
    }
  }

  /// Returns true if the search has been completed successfully.
  fn pred(&self, log: &[Action<Self::P>]) -> bool {
    self.count() == log.len()
  }

  /// Generates every action that may be linearized next: not yet on the
  /// path, started before the earliest pending stop time, and consistent
  /// with the model.
  fn gen(&self, log: &[Action<Self::P>]) -> Vec<Action<Self::P>> {
    let mut candidates = Vec::new();

    let i_first = log.iter().position(|a| {
      self.count() == 0 ||
        (a.get_stop() >= self.peek().get_start() && !self.contains(a))
    });

    if let Some(i) = i_first {
      let mut first_stop_time = log[i].get_stop();

      for a in &log[i..] {
        if a.get_start() > first_stop_time {
          break;
        }

        if !self.contains(a) {
          if a.get_stop() < first_stop_time {
            first_stop_time = a.get_stop();
          }
          if self.is_consistent_with(a) {
            candidates.push(a.clone());
          }
        }
      }
    }

    candidates
  }
}
