//! Reflection helpers shared by the decorators.

use object_js::{
  GcObject, Heap, PropertyDescriptor, PropertyDescriptorPatch, PropertyKey, PropertyKind, Realm,
  TypeOf, Value, VmError, MAX_PROTOTYPE_CHAIN,
};

/// Every own property key of `obj`: ordinary keys first, then symbol keys.
///
/// Symbol keys are omitted when the realm cannot enumerate them.
pub fn own_keys(realm: &Realm, obj: GcObject) -> Result<Vec<PropertyKey>, VmError> {
  let mut keys = realm.heap().own_property_keys(obj)?;
  if !realm.options().symbol_key_enumeration {
    keys.retain(|key| !key.is_symbol());
  }
  Ok(keys)
}

/// Own property descriptors of an object, in [`own_keys`] order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OwnPropertyDescriptors {
  entries: Vec<(PropertyKey, PropertyDescriptor)>,
}

impl OwnPropertyDescriptors {
  pub fn len(&self) -> usize {
    self.entries.len()
  }

  pub fn is_empty(&self) -> bool {
    self.entries.is_empty()
  }

  pub fn keys(&self) -> impl Iterator<Item = PropertyKey> + '_ {
    self.entries.iter().map(|(key, _)| *key)
  }

  pub fn get(&self, key: &PropertyKey) -> Option<&PropertyDescriptor> {
    self
      .entries
      .iter()
      .find(|(k, _)| k == key)
      .map(|(_, desc)| desc)
  }

  pub fn iter(&self) -> impl Iterator<Item = (PropertyKey, PropertyDescriptor)> + '_ {
    self.entries.iter().copied()
  }
}

/// Captures the full descriptor of every key returned by [`own_keys`].
pub fn own_property_descriptors(
  realm: &Realm,
  obj: GcObject,
) -> Result<OwnPropertyDescriptors, VmError> {
  let heap = realm.heap();
  let keys = own_keys(realm, obj)?;
  let mut entries = Vec::with_capacity(keys.len());
  for key in keys {
    let desc = heap
      .object_get_own_property(obj, &key)?
      .ok_or(VmError::TypeError("own property key without a descriptor"))?;
    entries.push((key, desc));
  }
  Ok(OwnPropertyDescriptors { entries })
}

/// Decides whether a value found on the root object prototype is a real assignment.
///
/// Symbol polyfills leave a slot for every symbol they create on `%Object.prototype%`; a probe
/// tells those registration artifacts apart from properties somebody actually assigned.
pub trait RootSlotProbe {
  fn is_assigned(&self, heap: &Heap, value: Value) -> bool;
}

/// The default probe: a slot holding `undefined` is a registration artifact.
#[derive(Debug, Clone, Copy, Default)]
pub struct UndefinedIsAbsent;

impl RootSlotProbe for UndefinedIsAbsent {
  fn is_assigned(&self, _heap: &Heap, value: Value) -> bool {
    !value.is_undefined()
  }
}

/// Whether `key` is a symbol the membership test can't be trusted with.
///
/// A key tagged as a Symbol whose `typeof` nevertheless reports `"object"` is a polyfill
/// stand-in.
pub fn is_degraded_symbol(heap: &Heap, key: &PropertyKey) -> Result<bool, VmError> {
  let PropertyKey::Symbol(_) = key else {
    return Ok(false);
  };
  let value = key.to_value();
  Ok(heap.builtin_tag(value)? == "Symbol" && heap.type_of(value)? == TypeOf::Object)
}

/// Whether `key` exists on `obj` or anywhere on its prototype chain.
pub fn has_property(realm: &mut Realm, key: PropertyKey, obj: GcObject) -> Result<bool, VmError> {
  has_property_with(realm, key, obj, &UndefinedIsAbsent)
}

/// [`has_property`] with a custom [`RootSlotProbe`] for degraded symbols.
///
/// Ordinary keys and native symbols use the `in` test. Degraded symbols walk the chain by hand:
/// an own property anywhere below the root counts; at `%Object.prototype%` the value read under
/// the key must satisfy `probe`.
pub fn has_property_with<P>(
  realm: &mut Realm,
  key: PropertyKey,
  obj: GcObject,
  probe: &P,
) -> Result<bool, VmError>
where
  P: RootSlotProbe + ?Sized,
{
  if !is_degraded_symbol(realm.heap(), &key)? {
    return realm.heap().has_property(obj, &key);
  }

  let root = realm.intrinsics().object_prototype();
  let mut current = Some(obj);
  let mut steps = 0usize;
  while let Some(o) = current {
    if steps >= MAX_PROTOTYPE_CHAIN {
      return Err(VmError::PrototypeChainTooDeep);
    }
    steps += 1;

    if o == root {
      let value = realm.heap_mut().get(o, key)?;
      return Ok(probe.is_assigned(realm.heap(), value));
    }
    if realm.heap().object_has_own_property(o, &key)? {
      return Ok(true);
    }
    current = realm.heap().object_prototype(o)?;
  }
  Ok(false)
}

const DESCRIPTOR_FIELDS: [&str; 4] = ["value", "initializer", "get", "set"];

/// Whether `value` looks like a descriptor object: an object with an own `value`, `initializer`,
/// `get` or `set` property.
pub fn is_descriptor(heap: &Heap, value: Value) -> Result<bool, VmError> {
  let Value::Object(obj) = value else {
    return Ok(false);
  };
  for field in DESCRIPTOR_FIELDS {
    // A name that was never interned can't be a key of any object.
    let Some(s) = heap.lookup_string(field) else {
      continue;
    };
    if heap.object_has_own_property(obj, &PropertyKey::String(s))? {
      return Ok(true);
    }
  }
  Ok(false)
}

/// ECMAScript `FromPropertyDescriptor`.
pub fn from_property_descriptor(
  realm: &mut Realm,
  desc: PropertyDescriptor,
) -> Result<GcObject, VmError> {
  let obj = realm.alloc_object();
  let heap = realm.heap_mut();
  let mut fields: Vec<(&str, Value)> = Vec::with_capacity(4);
  match desc.kind {
    PropertyKind::Data { value, writable } => {
      fields.push(("value", value));
      fields.push(("writable", Value::Bool(writable)));
    }
    PropertyKind::Accessor { get, set } => {
      fields.push(("get", get));
      fields.push(("set", set));
    }
  }
  fields.push(("enumerable", Value::Bool(desc.enumerable)));
  fields.push(("configurable", Value::Bool(desc.configurable)));

  for (name, value) in fields {
    let key = heap.string_key(name);
    heap.create_data_property(obj, key, value)?;
  }
  Ok(obj)
}

/// ECMAScript `ToPropertyDescriptor`.
pub fn to_property_descriptor(
  heap: &mut Heap,
  obj: GcObject,
) -> Result<PropertyDescriptorPatch, VmError> {
  let mut patch = PropertyDescriptorPatch::default();

  if let Some(v) = read_field(heap, obj, "enumerable")? {
    patch.enumerable = Some(heap.to_boolean(v)?);
  }
  if let Some(v) = read_field(heap, obj, "configurable")? {
    patch.configurable = Some(heap.to_boolean(v)?);
  }
  patch.value = read_field(heap, obj, "value")?;
  if let Some(v) = read_field(heap, obj, "writable")? {
    patch.writable = Some(heap.to_boolean(v)?);
  }
  for (name, slot) in [("get", &mut patch.get), ("set", &mut patch.set)] {
    if let Some(f) = read_field(heap, obj, name)? {
      if !f.is_undefined() && !heap.is_callable(f)? {
        return Err(VmError::TypeError("accessor must be a function or undefined"));
      }
      *slot = Some(f);
    }
  }

  patch.validate()?;
  Ok(patch)
}

fn read_field(heap: &mut Heap, obj: GcObject, name: &str) -> Result<Option<Value>, VmError> {
  let key = heap.string_key(name);
  if !heap.has_property(obj, &key)? {
    return Ok(None);
  }
  heap.get(obj, key).map(Some)
}

/// A setter that turns the property it backs into a plain data property on first assignment.
///
/// Calling the returned function with `this` and `new_value` defines `key` on `this` as a
/// configurable, writable, enumerable data property holding `new_value`, and returns
/// `new_value`.
pub fn create_default_setter(realm: &mut Realm, key: PropertyKey) -> Result<GcObject, VmError> {
  realm.alloc_function("set", 1, move |heap, this, args| {
    let new_value = args.first().copied().unwrap_or(Value::Undefined);
    let Value::Object(this) = this else {
      return Err(VmError::TypeError("Object.defineProperty called on non-object"));
    };
    heap.define_property_or_throw(
      this,
      key,
      PropertyDescriptorPatch {
        configurable: Some(true),
        writable: Some(true),
        // Enumerable once assigned from the outside.
        enumerable: Some(true),
        value: Some(new_value),
        ..Default::default()
      },
    )?;
    Ok(new_value)
  })
}
