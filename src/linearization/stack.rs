use super::*;

/// An operation performed against a `ConcurrentStack<T>`, together with the
/// output the caller observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StackOp<T> {
  Push(T),
  /// Items in push order.
  PushMany(Vec<T>),
  /// `None` when the stack was empty.
  Pop(Option<T>),
  /// Requested count and the popped items top first, `None` when the stack
  /// held fewer than requested.
  PopN(usize, Option<Vec<T>>),
  Peek(Option<T>),
  Size(usize),
}

impl<T> Op for StackOp<T>
where T: Clone + Debug {}

/// An implementation of `Linearization` for a LIFO stack.
#[derive(Clone)]
pub struct StackLinearization<T>
where T: Clone + Debug {
  current: Vec<T>,
  path: Vec<Action<StackOp<T>>>,
}

impl<T> Linearization for StackLinearization<T>
where T: Clone + Eq + Debug {
  type P = StackOp<T>;

  fn new() -> Self {
    Self {
      current: Vec::new(),
      path: Vec::new(),
    }
  }

  fn push(&mut self, a: Action<Self::P>) {
    match a.get_op() {
      StackOp::Push(v) => self.current.push(v.clone()),
      StackOp::PushMany(vs) => self.current.extend(vs.iter().cloned()),
      StackOp::Pop(Some(_)) => {
        self.current.pop();
      }
      StackOp::PopN(n, Some(_)) => {
        let len = self.current.len();
        self.current.truncate(len - n);
      }
      StackOp::Pop(None) | StackOp::PopN(_, None) | StackOp::Peek(_) | StackOp::Size(_) => {}
    }

    self.path.push(a);
  }

  fn pop(&mut self) {
    if let Some(a) = self.path.pop() {
      match a.get_op() {
        StackOp::Push(_) => {
          self.current.pop();
        }
        StackOp::PushMany(vs) => {
          let len = self.current.len();
          self.current.truncate(len - vs.len());
        }
        StackOp::Pop(Some(v)) => self.current.push(v.clone()),
        StackOp::PopN(_, Some(vs)) => self.current.extend(vs.iter().rev().cloned()),
        StackOp::Pop(None) | StackOp::PopN(_, None) | StackOp::Peek(_) | StackOp::Size(_) => {}
      }
    }
  }

  fn peek(&self) -> &Action<Self::P> {
    &self.path[self.path.len() - 1]
  }

  fn contains(&self, a: &Action<Self::P>) -> bool {
    self.path.contains(a)
  }

  fn count(&self) -> usize {
    self.path.len()
  }

  fn is_consistent_with(&self, a: &Action<Self::P>) -> bool {
    let len = self.current.len();

    match a.get_op() {
      StackOp::Push(_) | StackOp::PushMany(_) => true,
      StackOp::Pop(None) | StackOp::Peek(None) => len == 0,
      StackOp::Pop(Some(v)) | StackOp::Peek(Some(v)) => self.current.last() == Some(v),
      StackOp::PopN(n, None) => len < *n,
      StackOp::PopN(n, Some(vs)) => {
        vs.len() == *n && len >= *n && self.current[len - n..].iter().rev().eq(vs.iter())
      }
      StackOp::Size(s) => len == *s,
    }
  }

  fn get_history(&self) -> Vec<Action<Self::P>> {
    self.path.clone()
  }
}
