/// Errors produced by object model operations.
#[derive(Debug, Clone, thiserror::Error)]
pub enum VmError {
  /// A handle was used after the underlying object was released (or the handle is otherwise
  /// malformed).
  #[error("invalid handle")]
  InvalidHandle,

  /// An attempted prototype mutation would introduce a cycle in the `[[Prototype]]` chain.
  #[error("prototype cycle")]
  PrototypeCycle,

  /// A prototype chain traversal exceeded a hard upper bound.
  #[error("prototype chain too deep")]
  PrototypeChainTooDeep,

  /// The provided property descriptor patch is invalid.
  #[error("invalid property descriptor patch: cannot mix data and accessor fields")]
  InvalidPropertyDescriptorPatch,

  /// An operation expected a data property, but an accessor property was encountered instead.
  #[error("property is not a data property")]
  PropertyNotData,

  #[error("type error: {0}")]
  TypeError(&'static str),

  /// Attempted to call a non-callable value.
  #[error("value is not callable")]
  NotCallable,

  /// Attempted to construct a non-constructable value.
  #[error("value is not a constructor")]
  NotConstructable,
}
