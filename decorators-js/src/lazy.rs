use crate::reflect::create_default_setter;
use object_js::{
  PropertyDescriptor, PropertyDescriptorPatch, PropertyKey, PropertyKind, Realm, Value, VmError,
};

/// A class field declared with an initializer.
#[derive(Debug, Clone, Copy)]
pub struct LazyField {
  /// Called with the instance as `this` to produce the field's value.
  pub initializer: Value,
  pub enumerable: bool,
  pub configurable: bool,
  pub writable: bool,
}

/// Turns a field into an accessor that runs its initializer on first read.
///
/// The first read through the returned descriptor calls the initializer with the instance as
/// `this`, stores the result as an own data property of the instance (with the field's
/// attributes) and returns it; later reads hit the data property. Assigning before any read
/// defines the data property directly via [`create_default_setter`]. Reading through the object
/// the accessor is installed on yields `undefined` and runs nothing.
pub fn lazy_initialize(
  realm: &mut Realm,
  key: PropertyKey,
  field: LazyField,
) -> Result<PropertyDescriptor, VmError> {
  if !realm.heap().is_callable(field.initializer)? {
    return Err(VmError::NotCallable);
  }

  let getter = realm.alloc_function("get", 0, move |heap, this, _args| {
    let Value::Object(instance) = this else {
      return Err(VmError::TypeError("lazy field read on non-object"));
    };
    // Read on the object holding the accessor itself (the class prototype): nothing to
    // initialize, and instances must keep running their own initializer.
    if let Some(own) = heap.object_get_own_property(instance, &key)? {
      if own.is_accessor_descriptor() {
        return Ok(Value::Undefined);
      }
    }
    let value = heap.call(field.initializer, this, &[])?;
    heap.define_property_or_throw(
      instance,
      key,
      PropertyDescriptorPatch {
        configurable: Some(field.configurable),
        enumerable: Some(field.enumerable),
        writable: Some(field.writable),
        value: Some(value),
        ..Default::default()
      },
    )?;
    Ok(value)
  })?;
  let setter = create_default_setter(realm, key)?;

  Ok(PropertyDescriptor {
    enumerable: field.enumerable,
    configurable: field.configurable,
    kind: PropertyKind::Accessor {
      get: Value::Object(getter),
      set: Value::Object(setter),
    },
  })
}
