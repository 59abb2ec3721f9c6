use crate::property::{PropertyDescriptor, PropertyKey, PropertyKind};
use crate::{GcObject, GcString, Heap, Value, VmError};

/// ECMA-262-like helper for setting a function's `name` property.
///
/// This defines (or overwrites) `F.name` as a:
/// - non-writable
/// - non-enumerable
/// - configurable
/// data property.
pub fn set_function_name(heap: &mut Heap, func: GcObject, name: GcString) -> Result<(), VmError> {
  let name_key = heap.string_key("name");
  heap.define_property(
    func,
    name_key,
    PropertyDescriptor {
      enumerable: false,
      configurable: true,
      kind: PropertyKind::Data {
        value: Value::String(name),
        writable: false,
      },
    },
  )
}

/// ECMA-262-like helper for setting a function's `length` property.
///
/// Same attributes as `name`.
pub fn set_function_length(heap: &mut Heap, func: GcObject, length: u32) -> Result<(), VmError> {
  let length_key = heap.string_key("length");
  heap.define_property(
    func,
    length_key,
    PropertyDescriptor {
      enumerable: false,
      configurable: true,
      kind: PropertyKind::Data {
        value: Value::Number(length as f64),
        writable: false,
      },
    },
  )
}

/// Creates a constructor's `.prototype` object and wires `.prototype.constructor`.
///
/// This defines:
/// - `F.prototype` as a writable, non-enumerable, non-configurable data property
/// - `F.prototype.constructor` as a writable, non-enumerable, configurable data property
///
/// `parent` becomes the new prototype object's `[[Prototype]]`.
pub fn make_constructor(
  heap: &mut Heap,
  func: GcObject,
  parent: Option<GcObject>,
) -> Result<GcObject, VmError> {
  let proto = heap.alloc_object(parent);

  let constructor_key = heap.string_key("constructor");
  heap.define_property(
    proto,
    constructor_key,
    PropertyDescriptor {
      enumerable: false,
      configurable: true,
      kind: PropertyKind::Data {
        value: Value::Object(func),
        writable: true,
      },
    },
  )?;

  let prototype_key = heap.string_key("prototype");
  heap.define_property(
    func,
    prototype_key,
    PropertyDescriptor {
      enumerable: false,
      configurable: false,
      kind: PropertyKind::Data {
        value: Value::Object(proto),
        writable: true,
      },
    },
  )?;

  Ok(proto)
}

/// Reads `F.prototype`, which must hold an object.
pub fn get_prototype_from_constructor(heap: &Heap, func: GcObject) -> Result<GcObject, VmError> {
  let key = match heap.lookup_string("prototype") {
    Some(s) => PropertyKey::String(s),
    None => return Err(VmError::TypeError("constructor has no prototype object")),
  };
  match heap.object_get_own_property(func, &key)? {
    Some(PropertyDescriptor {
      kind: PropertyKind::Data {
        value: Value::Object(proto),
        ..
      },
      ..
    }) => Ok(proto),
    Some(PropertyDescriptor {
      kind: PropertyKind::Accessor { .. },
      ..
    }) => Err(VmError::PropertyNotData),
    _ => Err(VmError::TypeError("constructor has no prototype object")),
  }
}
