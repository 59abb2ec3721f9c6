use crate::property::{PropertyDescriptor, PropertyDescriptorPatch, PropertyKey, PropertyKind};
use crate::{GcObject, Heap, Value, VmError, MAX_PROTOTYPE_CHAIN};

impl Heap {
  /// ECMAScript `[[DefineOwnProperty]]` for ordinary objects.
  ///
  /// Returns `Ok(false)` when the definition is rejected (non-extensible target, or a change to a
  /// non-configurable property).
  pub fn ordinary_define_own_property(
    &mut self,
    obj: GcObject,
    key: PropertyKey,
    desc: PropertyDescriptorPatch,
  ) -> Result<bool, VmError> {
    desc.validate()?;

    let current = self.object_get_own_property(obj, &key)?;
    let extensible = self.object_is_extensible(obj)?;

    validate_and_apply_property_descriptor(self, obj, key, extensible, desc, current)
  }

  /// ECMAScript `DefinePropertyOrThrow`: a rejected definition becomes a `TypeError`.
  pub fn define_property_or_throw(
    &mut self,
    obj: GcObject,
    key: PropertyKey,
    desc: PropertyDescriptorPatch,
  ) -> Result<(), VmError> {
    if self.ordinary_define_own_property(obj, key, desc)? {
      Ok(())
    } else {
      Err(VmError::TypeError("Cannot define property"))
    }
  }

  pub fn create_data_property(
    &mut self,
    obj: GcObject,
    key: PropertyKey,
    value: Value,
  ) -> Result<bool, VmError> {
    self.ordinary_define_own_property(
      obj,
      key,
      PropertyDescriptorPatch {
        value: Some(value),
        writable: Some(true),
        enumerable: Some(true),
        configurable: Some(true),
        ..Default::default()
      },
    )
  }

  /// ECMAScript `[[Get]]` for ordinary objects, with `obj` as the receiver.
  pub fn get(&mut self, obj: GcObject, key: PropertyKey) -> Result<Value, VmError> {
    self.ordinary_get(obj, key, Value::Object(obj))
  }

  /// ECMAScript `[[Get]]` for ordinary objects.
  ///
  /// Accessor getters are called with `receiver` as `this`.
  pub fn ordinary_get(
    &mut self,
    obj: GcObject,
    key: PropertyKey,
    receiver: Value,
  ) -> Result<Value, VmError> {
    let Some(desc) = self.get_property(obj, &key)? else {
      return Ok(Value::Undefined);
    };

    match desc.kind {
      PropertyKind::Data { value, .. } => Ok(value),
      PropertyKind::Accessor { get, .. } => {
        if get.is_undefined() {
          Ok(Value::Undefined)
        } else {
          self.call(get, receiver, &[])
        }
      }
    }
  }

  /// ECMAScript `[[Set]]` for ordinary objects, with `obj` as the receiver.
  pub fn set(&mut self, obj: GcObject, key: PropertyKey, value: Value) -> Result<bool, VmError> {
    self.ordinary_set(obj, key, value, Value::Object(obj))
  }

  /// ECMAScript `[[Set]]` for ordinary objects.
  pub fn ordinary_set(
    &mut self,
    obj: GcObject,
    key: PropertyKey,
    value: Value,
    receiver: Value,
  ) -> Result<bool, VmError> {
    // `OrdinarySetWithOwnDescriptor`, with the recursion over the prototype chain flattened.
    let mut current = obj;
    let mut steps = 0usize;
    let own_desc = loop {
      if steps >= MAX_PROTOTYPE_CHAIN {
        return Err(VmError::PrototypeChainTooDeep);
      }
      steps += 1;

      if let Some(desc) = self.object_get_own_property(current, &key)? {
        break desc;
      }
      match self.object_prototype(current)? {
        Some(parent) => current = parent,
        None => break PropertyDescriptor::data(Value::Undefined),
      }
    };

    match own_desc.kind {
      PropertyKind::Data { writable, .. } => {
        if !writable {
          return Ok(false);
        }
        let Value::Object(receiver_obj) = receiver else {
          return Ok(false);
        };

        match self.object_get_own_property(receiver_obj, &key)? {
          Some(existing) => {
            let PropertyKind::Data {
              writable: receiver_writable,
              ..
            } = existing.kind
            else {
              return Ok(false);
            };
            if !receiver_writable {
              return Ok(false);
            }
            self.ordinary_define_own_property(
              receiver_obj,
              key,
              PropertyDescriptorPatch {
                value: Some(value),
                ..Default::default()
              },
            )
          }
          None => self.create_data_property(receiver_obj, key, value),
        }
      }
      PropertyKind::Accessor { set, .. } => {
        if set.is_undefined() {
          return Ok(false);
        }
        self.call(set, receiver, &[value])?;
        Ok(true)
      }
    }
  }

  /// `this[key](...args)` with `this` an object.
  pub fn invoke(
    &mut self,
    this: GcObject,
    key: PropertyKey,
    args: &[Value],
  ) -> Result<Value, VmError> {
    let func = self.get(this, key)?;
    if !self.is_callable(func)? {
      return Err(VmError::NotCallable);
    }
    self.call(func, Value::Object(this), args)
  }
}

fn validate_and_apply_property_descriptor(
  heap: &mut Heap,
  obj: GcObject,
  key: PropertyKey,
  extensible: bool,
  desc: PropertyDescriptorPatch,
  current: Option<PropertyDescriptor>,
) -> Result<bool, VmError> {
  let Some(current_desc) = current else {
    if !extensible {
      return Ok(false);
    }

    // Create new property with default attributes for missing fields.
    let enumerable = desc.enumerable.unwrap_or(false);
    let configurable = desc.configurable.unwrap_or(false);
    let kind = if desc.is_accessor_descriptor() {
      PropertyKind::Accessor {
        get: desc.get.unwrap_or(Value::Undefined),
        set: desc.set.unwrap_or(Value::Undefined),
      }
    } else {
      // Generic descriptors create data properties.
      PropertyKind::Data {
        value: desc.value.unwrap_or(Value::Undefined),
        writable: desc.writable.unwrap_or(false),
      }
    };

    heap.define_property(
      obj,
      key,
      PropertyDescriptor {
        enumerable,
        configurable,
        kind,
      },
    )?;
    return Ok(true);
  };

  // If `Desc` has no fields, no change is requested.
  if desc.is_empty() {
    return Ok(true);
  }

  // Non-configurable invariants.
  if !current_desc.configurable {
    if desc.configurable == Some(true) {
      return Ok(false);
    }
    if let Some(enumerable) = desc.enumerable {
      if enumerable != current_desc.enumerable {
        return Ok(false);
      }
    }

    if !desc.is_generic_descriptor() {
      match current_desc.kind {
        PropertyKind::Data { .. } if desc.is_accessor_descriptor() => return Ok(false),
        PropertyKind::Accessor { .. } if desc.is_data_descriptor() => return Ok(false),
        PropertyKind::Data { value, writable } => {
          if !writable {
            if desc.writable == Some(true) {
              return Ok(false);
            }
            if let Some(new_value) = desc.value {
              if !new_value.same_value(value) {
                return Ok(false);
              }
            }
          }
        }
        PropertyKind::Accessor { get, set } => {
          if let Some(new_get) = desc.get {
            if !new_get.same_value(get) {
              return Ok(false);
            }
          }
          if let Some(new_set) = desc.set {
            if !new_set.same_value(set) {
              return Ok(false);
            }
          }
        }
      }
    }
  }

  heap.define_property(obj, key, apply_descriptor_patch(current_desc, desc))?;
  Ok(true)
}

fn apply_descriptor_patch(
  current: PropertyDescriptor,
  desc: PropertyDescriptorPatch,
) -> PropertyDescriptor {
  let enumerable = desc.enumerable.unwrap_or(current.enumerable);
  let configurable = desc.configurable.unwrap_or(current.configurable);

  let kind = if desc.is_generic_descriptor() {
    current.kind
  } else {
    match (current.kind, desc.is_accessor_descriptor()) {
      (PropertyKind::Data { value, writable }, false) => PropertyKind::Data {
        value: desc.value.unwrap_or(value),
        writable: desc.writable.unwrap_or(writable),
      },
      (PropertyKind::Accessor { get, set }, true) => PropertyKind::Accessor {
        get: desc.get.unwrap_or(get),
        set: desc.set.unwrap_or(set),
      },
      // Kind conversions. Default values are per `ValidateAndApplyPropertyDescriptor`.
      (PropertyKind::Data { .. }, true) => PropertyKind::Accessor {
        get: desc.get.unwrap_or(Value::Undefined),
        set: desc.set.unwrap_or(Value::Undefined),
      },
      (PropertyKind::Accessor { .. }, false) => PropertyKind::Data {
        value: desc.value.unwrap_or(Value::Undefined),
        writable: desc.writable.unwrap_or(false),
      },
    }
  };

  PropertyDescriptor {
    enumerable,
    configurable,
    kind,
  }
}
