use crate::heap::ObjectBase;
use crate::{GcString, Heap, Value, VmError};
use std::rc::Rc;

/// Identifier for a host/native `[[Call]]` implementation.
///
/// The heap keeps a dispatch table keyed by this id; see [`Heap::register_native`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct NativeFunctionId(pub u32);

/// A host `[[Call]]` implementation: `(heap, this, args) -> completion`.
pub type NativeCallFn = Rc<dyn Fn(&mut Heap, Value, &[Value]) -> Result<Value, VmError>>;

/// A JavaScript function object.
///
/// - Functions are heap objects referenced as `Value::Object(GcObject)`.
/// - `call` is `None` for class constructors, which may only be constructed.
#[derive(Debug)]
pub(crate) struct JsFunction {
  pub(crate) call: Option<NativeFunctionId>,
  pub(crate) constructable: bool,
  /// Function `name` metadata.
  pub(crate) name: GcString,
  pub(crate) base: ObjectBase,
}

impl JsFunction {
  pub(crate) fn new_native(call: NativeFunctionId, name: GcString, base: ObjectBase) -> Self {
    Self {
      call: Some(call),
      constructable: false,
      name,
      base,
    }
  }

  pub(crate) fn new_class(name: GcString, base: ObjectBase) -> Self {
    Self {
      call: None,
      constructable: true,
      name,
      base,
    }
  }
}
