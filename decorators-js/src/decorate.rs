use crate::reflect::is_descriptor;
use object_js::{Heap, Value, VmError};

/// Outcome of [`decorate`].
pub enum Decoration<F, T> {
  /// The decorator was applied bare (`@dec`): the handler already ran.
  Applied(T),
  /// The decorator was called with parameters (`@dec(a, b)`): apply the result to the target.
  Pending(PendingDecorator<F>),
}

/// A decorator factory call waiting for its target.
pub struct PendingDecorator<F> {
  handle: F,
  entry_args: Vec<Value>,
}

impl<F> PendingDecorator<F> {
  /// The parameters the decorator was called with.
  pub fn entry_args(&self) -> &[Value] {
    &self.entry_args
  }

  /// Runs the handler with the target arguments and the stored parameters.
  pub fn apply<T>(self, heap: &mut Heap, args: &[Value]) -> Result<T, VmError>
  where
    F: FnOnce(&mut Heap, &[Value], &[Value]) -> Result<T, VmError>,
  {
    (self.handle)(heap, args, &self.entry_args)
  }
}

/// Dispatches a decorator invocation.
///
/// When the last of `entry_args` is a descriptor object the decorator was applied directly, and
/// `handle(entry_args, [])` runs now. Otherwise `entry_args` are decorator parameters and the
/// returned [`PendingDecorator`] later runs `handle(target_args, entry_args)`.
pub fn decorate<F, T>(
  heap: &mut Heap,
  handle: F,
  entry_args: Vec<Value>,
) -> Result<Decoration<F, T>, VmError>
where
  F: FnOnce(&mut Heap, &[Value], &[Value]) -> Result<T, VmError>,
{
  let bare = match entry_args.last() {
    Some(last) => is_descriptor(heap, *last)?,
    None => false,
  };
  if bare {
    return Ok(Decoration::Applied(handle(heap, &entry_args, &[])?));
  }
  Ok(Decoration::Pending(PendingDecorator { handle, entry_args }))
}
