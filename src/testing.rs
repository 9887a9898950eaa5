//! Randomized drivers shared by the concurrent tests.
//!
//! A `ConcurrentTester` is cloned into every worker thread. Each worker
//! either records timed actions for the linearizability check, or just runs
//! operations as fast as it can for the throughput report.

use std::time::{Duration, Instant};
use rand::Rng;
use rand::rngs::ThreadRng;
use crate::linearization::{Action, Linearization};

/// An operation kind that a tester can pick at random.
pub trait TestOp: Copy {}

/// Picks an operation, each with its given probability. The probabilities
/// should sum to 1; any remainder goes to the last operation.
pub fn choose_op<O: TestOp>(rng: &mut ThreadRng, ops: &[(O, f64)]) -> O {
  let mut f: f64 = rng.gen();
  for &(op, p) in ops {
    if f < p {
      return op;
    }
    f -= p;
  }

  ops[ops.len() - 1].0
}

/// Generates `n` random payload values.
pub fn gen_args(rng: &mut ThreadRng, n: usize) -> Vec<i32> {
  (0..n).map(|_| rng.gen_range(0..1000)).collect()
}

pub trait ConcurrentTester: Clone + Send {
  type L: Linearization;

  /// Runs one random operation without recording it.
  fn execute_op(&mut self, rng: &mut ThreadRng);

  /// Runs one random operation and records it as action `i` of thread `tid`.
  fn record_op(&mut self, rng: &mut ThreadRng, tid: usize, i: usize)
    -> Action<<Self::L as Linearization>::P>;

  /// Returns an empty linearization for the recorded actions.
  fn lin(&self) -> Self::L;
}

/// Runs `n_threads` workers for `t_secs` each, then checks that the merged
/// log has a valid linearization.
pub fn test_concurrent_correctness<C>(tester: C, t_secs: f64, n_threads: usize)
where C: ConcurrentTester,
      <C::L as Linearization>::P: Send {
  let duration = Duration::from_secs_f64(t_secs);

  let logs = crossbeam::scope(|scope| {
    let handles: Vec<_> = (0..n_threads).map(|tid| {
      let mut tester = tester.clone();

      scope.spawn(move |_| {
        let mut rng = rand::thread_rng();
        let mut log = Vec::new();
        let start_time = Instant::now();
        let mut i = 0;

        loop {
          log.push(tester.record_op(&mut rng, tid, i));
          i += 1;

          if start_time.elapsed() >= duration {
            break;
          }
        }

        log
      })
    }).collect();

    handles.into_iter()
      .map(|h| h.join().expect("worker panicked"))
      .collect::<Vec<_>>()
  }).expect("worker scope panicked");

  let log: Vec<_> = logs.into_iter().flatten().collect();
  let n_actions = log.len();

  let mut lin = tester.lin();
  let history = lin.linearize(log).expect(
    "No valid linearization found.");

  assert_eq!(history.len(), n_actions);
}

/// Runs `n_threads` workers for `t_secs` each and prints the mean time per
/// operation.
pub fn test_concurrent_throughput<C>(tester: C, t_secs: f64, n_threads: usize)
where C: ConcurrentTester {
  let duration = Duration::from_secs_f64(t_secs);

  let results = crossbeam::scope(|scope| {
    let handles: Vec<_> = (0..n_threads).map(|_| {
      let mut tester = tester.clone();

      scope.spawn(move |_| {
        let mut rng = rand::thread_rng();
        let mut n_ops: u64 = 0;
        let start_time = Instant::now();

        let elapsed = loop {
          tester.execute_op(&mut rng);
          n_ops += 1;

          let d = start_time.elapsed();
          if d >= duration {
            break d;
          }
        };

        (elapsed, n_ops)
      })
    }).collect();

    handles.into_iter()
      .map(|h| h.join().expect("worker panicked"))
      .collect::<Vec<_>>()
  }).expect("worker scope panicked");

  let ns_elapsed: f64 = results.iter().map(|(d, _)| d.as_nanos() as f64).sum();
  let op_total: u64 = results.iter().map(|(_, n)| n).sum();

  println!();
  println!("Time elapsed (s): {}", ns_elapsed / 1_000_000_000.0);
  println!("Ops completed:    {}", op_total);
  println!("Time per op (ns): {}", ns_elapsed / (op_total as f64));
}

/// Calls `f(j)` once from each of `n` threads, all running at the same time.
pub fn run_concurrent<F>(n: usize, f: F)
where F: Fn(usize) + Sync {
  crossbeam::scope(|scope| {
    for j in 0..n {
      let f = &f;
      scope.spawn(move |_| f(j));
    }
  }).expect("worker panicked");
}
