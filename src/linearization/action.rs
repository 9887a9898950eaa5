use std::time::Instant;
use super::*;

/// Describes the ID of an `Action` as a (thread ID, operation no.) pair.
pub type ActionID = (usize, usize);

/// One operation observed by a thread, with the instants just before the
/// call started and just after it returned.
#[derive(Debug, Clone)]
pub struct Action<P>
where P: Op {
  id: ActionID,
  op: P,
  start: Instant,
  stop: Instant,
}

impl<P> Action<P>
where P: Op {
  pub fn new(id: ActionID, op: P, start: Instant, stop: Instant) -> Self {
    Self {
      id,
      op,
      start,
      stop,
    }
  }

  /// Runs `f`, timing it, and records the operation `op` builds from its
  /// output.
  pub fn record<R, F, G>(id: ActionID, f: F, op: G) -> Self
  where F: FnOnce() -> R,
        G: FnOnce(R) -> P {
    let start = Instant::now();
    let output = f();
    let stop = Instant::now();

    Self::new(id, op(output), start, stop)
  }

  pub fn get_op(&self) -> &P {
    &self.op
  }

  pub fn get_id(&self) -> ActionID {
    self.id
  }

  pub fn get_start(&self) -> Instant {
    self.start
  }

  pub fn get_stop(&self) -> Instant {
    self.stop
  }
}

/// Actions are identified by ID alone.
impl<P> PartialEq for Action<P>
where P: Op {
  fn eq(&self, other: &Self) -> bool {
    self.get_id() == other.get_id()
  }
}
