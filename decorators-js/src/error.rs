use object_js::VmError;

/// Errors produced while applying decorators.
#[derive(Debug, Clone, thiserror::Error)]
pub enum DecoratorError {
  /// `@mixin()` was applied to a class without any mixins.
  #[error("@mixin() class {class} requires at least one mixin as an argument")]
  MissingMixin { class: String },

  /// An object model failure, passed through unchanged.
  #[error(transparent)]
  Vm(#[from] VmError),
}
