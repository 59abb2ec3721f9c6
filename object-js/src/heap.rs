use crate::function::{JsFunction, NativeCallFn, NativeFunctionId};
use crate::property::{PropertyDescriptor, PropertyKey};
use crate::symbol::{JsSymbol, SymbolRepr};
use crate::{GcObject, GcString, GcSymbol, HeapId, Value, VmError};
use ahash::{AHashMap, AHashSet};
use std::rc::Rc;

/// Hard upper bound for `[[Prototype]]` chain traversals.
///
/// `object_set_prototype` prevents cycles, but walks stay bounded regardless.
pub const MAX_PROTOTYPE_CHAIN: usize = 10_000;

/// Handle-addressed storage for objects, interned strings, symbols and native call targets.
///
/// Objects live in a `Vec` of slots. Handles store the slot `index` and a per-slot `generation`,
/// which makes handles stable across `Vec` reallocations and allows detection of stale handles
/// once an object is released with [`Heap::release_object`]. Strings and symbols are never
/// released.
pub struct Heap {
  slots: Vec<Slot>,
  free_list: Vec<u32>,

  strings: Vec<Rc<str>>,
  string_ids: AHashMap<Rc<str>, GcString>,

  symbols: Vec<JsSymbol>,

  // Dispatch table for `NativeFunctionId`.
  natives: Vec<NativeCallFn>,
}

impl Default for Heap {
  fn default() -> Self {
    Self::new()
  }
}

impl Heap {
  pub fn new() -> Self {
    Self {
      slots: Vec::new(),
      free_list: Vec::new(),
      strings: Vec::new(),
      string_ids: AHashMap::new(),
      symbols: Vec::new(),
      natives: Vec::new(),
    }
  }

  /// Interns `s`, returning the same handle for equal contents.
  pub fn alloc_string(&mut self, s: &str) -> GcString {
    if let Some(id) = self.string_ids.get(s) {
      return *id;
    }
    let id = GcString(self.strings.len() as u32);
    let s: Rc<str> = Rc::from(s);
    self.strings.push(s.clone());
    self.string_ids.insert(s, id);
    id
  }

  /// Gets the string contents for `s`.
  pub fn get_string(&self, s: GcString) -> Result<&str, VmError> {
    self
      .strings
      .get(s.0 as usize)
      .map(|s| &**s)
      .ok_or(VmError::InvalidHandle)
  }

  /// Returns the handle for `s` if it has already been interned.
  pub fn lookup_string(&self, s: &str) -> Option<GcString> {
    self.string_ids.get(s).copied()
  }

  /// Convenience: interns `s` and wraps it as a string property key.
  pub fn string_key(&mut self, s: &str) -> PropertyKey {
    PropertyKey::String(self.alloc_string(s))
  }

  /// Creates a new, unique symbol.
  ///
  /// This does not perform any environment side effects; see `Realm::new_symbol` for the
  /// polyfill registration behaviour.
  pub fn new_symbol(&mut self, repr: SymbolRepr) -> GcSymbol {
    let id = GcSymbol(self.symbols.len() as u32);
    self.symbols.push(JsSymbol::new(repr));
    id
  }

  pub fn get_symbol(&self, sym: GcSymbol) -> Result<&JsSymbol, VmError> {
    self
      .symbols
      .get(sym.0 as usize)
      .ok_or(VmError::InvalidHandle)
  }

  /// Allocates an ordinary, extensible object with no own properties.
  pub fn alloc_object(&mut self, prototype: Option<GcObject>) -> GcObject {
    GcObject(self.alloc(HeapObject::Object(ObjectBase::new(prototype))))
  }

  /// Allocates an ordinary object with the given own properties, in order.
  ///
  /// Later duplicates of a key replace the earlier descriptor in place.
  pub fn alloc_object_with_properties(
    &mut self,
    prototype: Option<GcObject>,
    props: &[(PropertyKey, PropertyDescriptor)],
  ) -> GcObject {
    let mut base = ObjectBase::new(prototype);
    for (key, desc) in props {
      base.insert(*key, *desc);
    }
    GcObject(self.alloc(HeapObject::Object(base)))
  }

  /// Registers a native `[[Call]]` implementation in the dispatch table.
  pub fn register_native<F>(&mut self, f: F) -> NativeFunctionId
  where
    F: Fn(&mut Heap, Value, &[Value]) -> Result<Value, VmError> + 'static,
  {
    let id = NativeFunctionId(self.natives.len() as u32);
    self.natives.push(Rc::new(f));
    id
  }

  /// Allocates a native function object with `name` and `length` own properties.
  pub fn alloc_native_function<F>(
    &mut self,
    prototype: Option<GcObject>,
    name: &str,
    length: u32,
    f: F,
  ) -> Result<GcObject, VmError>
  where
    F: Fn(&mut Heap, Value, &[Value]) -> Result<Value, VmError> + 'static,
  {
    let call = self.register_native(f);
    let name = self.alloc_string(name);
    let func = GcObject(self.alloc(HeapObject::Function(JsFunction::new_native(
      call,
      name,
      ObjectBase::new(prototype),
    ))));
    crate::function_properties::set_function_length(self, func, length)?;
    crate::function_properties::set_function_name(self, func, name)?;
    Ok(func)
  }

  pub(crate) fn alloc_class_object(
    &mut self,
    prototype: Option<GcObject>,
    name: GcString,
  ) -> GcObject {
    GcObject(self.alloc(HeapObject::Function(JsFunction::new_class(
      name,
      ObjectBase::new(prototype),
    ))))
  }

  /// Releases `obj`. Any handle to it becomes invalid.
  pub fn release_object(&mut self, obj: GcObject) -> Result<(), VmError> {
    let idx = self.validate(obj.0).ok_or(VmError::InvalidHandle)?;
    let slot = &mut self.slots[idx];
    slot.value = None;
    slot.generation = slot.generation.wrapping_add(1);
    self.free_list.push(idx as u32);
    Ok(())
  }

  /// Returns `true` if `obj` refers to a live object.
  pub fn is_valid_object(&self, obj: GcObject) -> bool {
    self.validate(obj.0).is_some()
  }

  /// Returns `true` if `value` is callable (any function object, including class constructors).
  pub fn is_callable(&self, value: Value) -> Result<bool, VmError> {
    match value {
      Value::Object(obj) => Ok(matches!(self.get_heap_object(obj.0)?, HeapObject::Function(_))),
      _ => Ok(false),
    }
  }

  /// Returns `true` if `value` has a `[[Construct]]` internal method.
  pub fn is_constructor(&self, value: Value) -> Result<bool, VmError> {
    match value {
      Value::Object(obj) => match self.get_heap_object(obj.0)? {
        HeapObject::Function(f) => Ok(f.constructable),
        _ => Ok(false),
      },
      _ => Ok(false),
    }
  }

  /// Returns the `name` metadata of a function object.
  pub fn function_name(&self, func: GcObject) -> Result<GcString, VmError> {
    match self.get_heap_object(func.0)? {
      HeapObject::Function(f) => Ok(f.name),
      _ => Err(VmError::NotCallable),
    }
  }

  /// Calls `callee` with the provided `this` value and arguments.
  pub fn call(&mut self, callee: Value, this: Value, args: &[Value]) -> Result<Value, VmError> {
    let Value::Object(func) = callee else {
      return Err(VmError::NotCallable);
    };
    let call = match self.get_heap_object(func.0)? {
      HeapObject::Function(f) => f.call,
      HeapObject::Object(_) => return Err(VmError::NotCallable),
    };
    let Some(call) = call else {
      return Err(VmError::TypeError(
        "class constructors cannot be invoked without 'new'",
      ));
    };
    let f = self
      .natives
      .get(call.0 as usize)
      .cloned()
      .ok_or(VmError::InvalidHandle)?;
    f(self, this, args)
  }

  /// Gets an object's `[[Prototype]]`.
  pub fn object_prototype(&self, obj: GcObject) -> Result<Option<GcObject>, VmError> {
    Ok(self.get_object_base(obj)?.prototype)
  }

  /// Sets an object's `[[Prototype]]`.
  pub fn object_set_prototype(
    &mut self,
    obj: GcObject,
    prototype: Option<GcObject>,
  ) -> Result<(), VmError> {
    // Validate `obj` early so we don't silently accept stale handles.
    let _ = self.get_object_base(obj)?;

    if prototype == Some(obj) {
      return Err(VmError::PrototypeCycle);
    }

    // Reject indirect cycles by walking `prototype`'s chain and checking whether it contains `obj`.
    let mut current = prototype;
    let mut steps = 0usize;
    let mut visited: AHashSet<GcObject> = AHashSet::new();
    while let Some(p) = current {
      if steps >= MAX_PROTOTYPE_CHAIN {
        return Err(VmError::PrototypeChainTooDeep);
      }
      steps += 1;

      if !visited.insert(p) || p == obj {
        return Err(VmError::PrototypeCycle);
      }

      current = self.object_prototype(p)?;
    }

    self.get_object_base_mut(obj)?.prototype = prototype;
    Ok(())
  }

  pub fn object_is_extensible(&self, obj: GcObject) -> Result<bool, VmError> {
    Ok(self.get_object_base(obj)?.extensible)
  }

  /// ECMAScript `[[PreventExtensions]]`.
  pub fn object_prevent_extensions(&mut self, obj: GcObject) -> Result<(), VmError> {
    self.get_object_base_mut(obj)?.extensible = false;
    Ok(())
  }

  /// Gets an own property descriptor from an object.
  pub fn object_get_own_property(
    &self,
    obj: GcObject,
    key: &PropertyKey,
  ) -> Result<Option<PropertyDescriptor>, VmError> {
    Ok(self.get_object_base(obj)?.find(key).map(|prop| prop.desc))
  }

  /// Returns whether `obj` has an own property `key` (`Object.prototype.hasOwnProperty`).
  pub fn object_has_own_property(&self, obj: GcObject, key: &PropertyKey) -> Result<bool, VmError> {
    Ok(self.object_get_own_property(obj, key)?.is_some())
  }

  /// Unconditionally defines (or overwrites) an own property.
  ///
  /// This bypasses `[[DefineOwnProperty]]` validation; use
  /// [`Heap::ordinary_define_own_property`] for the validated path.
  pub fn define_property(
    &mut self,
    obj: GcObject,
    key: PropertyKey,
    desc: PropertyDescriptor,
  ) -> Result<(), VmError> {
    self.get_object_base_mut(obj)?.insert(key, desc);
    Ok(())
  }

  /// Gets a property descriptor from `obj` or its prototype chain.
  pub fn get_property(
    &self,
    obj: GcObject,
    key: &PropertyKey,
  ) -> Result<Option<PropertyDescriptor>, VmError> {
    let mut current = Some(obj);
    let mut steps = 0usize;

    while let Some(obj) = current {
      if steps >= MAX_PROTOTYPE_CHAIN {
        return Err(VmError::PrototypeChainTooDeep);
      }
      steps += 1;

      if let Some(desc) = self.object_get_own_property(obj, key)? {
        return Ok(Some(desc));
      }

      current = self.object_prototype(obj)?;
    }

    Ok(None)
  }

  /// ECMAScript `[[HasProperty]]` (the `in` operator): own or inherited.
  pub fn has_property(&self, obj: GcObject, key: &PropertyKey) -> Result<bool, VmError> {
    Ok(self.get_property(obj, key)?.is_some())
  }

  /// Implements the `OwnPropertyKeys` internal method (ECMA-262) for ordinary objects.
  ///
  /// This orders keys as:
  /// 1. array index keys, in ascending numeric order,
  /// 2. other string keys, in insertion order,
  /// 3. symbol keys, in insertion order.
  pub fn own_property_keys(&self, obj: GcObject) -> Result<Vec<PropertyKey>, VmError> {
    let props = &self.get_object_base(obj)?.properties;

    let mut array_keys: Vec<(u32, PropertyKey)> = Vec::new();
    let mut string_keys: Vec<PropertyKey> = Vec::new();
    let mut symbol_keys: Vec<PropertyKey> = Vec::new();

    for prop in props.iter() {
      match prop.key {
        PropertyKey::String(s) => match self.string_to_array_index(s)? {
          Some(idx) => array_keys.push((idx, prop.key)),
          None => string_keys.push(prop.key),
        },
        PropertyKey::Symbol(_) => symbol_keys.push(prop.key),
      }
    }

    array_keys.sort_by_key(|(idx, _)| *idx);

    let mut out = Vec::with_capacity(array_keys.len() + string_keys.len() + symbol_keys.len());
    out.extend(array_keys.into_iter().map(|(_, k)| k));
    out.extend(string_keys);
    out.extend(symbol_keys);
    Ok(out)
  }

  /// Attempts to parse `s` as an ECMAScript array index.
  ///
  /// This matches the `ToString(ToUint32(P)) === P` and `ToUint32(P) != 2^32-1` conditions used by
  /// `OrdinaryOwnPropertyKeys`.
  pub fn string_to_array_index(&self, s: GcString) -> Result<Option<u32>, VmError> {
    let s = self.get_string(s)?;
    if s.is_empty() {
      return Ok(None);
    }

    // No leading zeros (except the single "0").
    if s.len() > 1 && s.starts_with('0') {
      return Ok(None);
    }

    let mut value: u64 = 0;
    for b in s.bytes() {
      if !b.is_ascii_digit() {
        return Ok(None);
      }
      value = match value.checked_mul(10).and_then(|v| v.checked_add((b - b'0') as u64)) {
        Some(v) => v,
        None => return Ok(None),
      };
      if value > u32::MAX as u64 {
        return Ok(None);
      }
    }

    // Exclude 2^32-1.
    if value == u32::MAX as u64 {
      return Ok(None);
    }
    Ok(Some(value as u32))
  }

  fn alloc(&mut self, obj: HeapObject) -> HeapId {
    match self.free_list.pop() {
      Some(idx) => {
        let slot = &mut self.slots[idx as usize];
        debug_assert!(slot.value.is_none());
        slot.value = Some(obj);
        HeapId::from_parts(idx, slot.generation)
      }
      None => {
        let idx = self.slots.len() as u32;
        self.slots.push(Slot {
          generation: 0,
          value: Some(obj),
        });
        HeapId::from_parts(idx, 0)
      }
    }
  }

  fn validate(&self, id: HeapId) -> Option<usize> {
    let idx = id.index() as usize;
    let slot = self.slots.get(idx)?;
    if slot.generation != id.generation() || slot.value.is_none() {
      return None;
    }
    Some(idx)
  }

  fn get_heap_object(&self, id: HeapId) -> Result<&HeapObject, VmError> {
    let idx = self.validate(id).ok_or(VmError::InvalidHandle)?;
    self.slots[idx].value.as_ref().ok_or(VmError::InvalidHandle)
  }

  fn get_heap_object_mut(&mut self, id: HeapId) -> Result<&mut HeapObject, VmError> {
    let idx = self.validate(id).ok_or(VmError::InvalidHandle)?;
    self.slots[idx].value.as_mut().ok_or(VmError::InvalidHandle)
  }

  fn get_object_base(&self, obj: GcObject) -> Result<&ObjectBase, VmError> {
    match self.get_heap_object(obj.0)? {
      HeapObject::Object(o) => Ok(o),
      HeapObject::Function(f) => Ok(&f.base),
    }
  }

  fn get_object_base_mut(&mut self, obj: GcObject) -> Result<&mut ObjectBase, VmError> {
    match self.get_heap_object_mut(obj.0)? {
      HeapObject::Object(o) => Ok(o),
      HeapObject::Function(f) => Ok(&mut f.base),
    }
  }
}

#[derive(Debug)]
struct Slot {
  generation: u32,
  value: Option<HeapObject>,
}

#[derive(Debug)]
enum HeapObject {
  Object(ObjectBase),
  Function(JsFunction),
}

#[derive(Debug)]
pub(crate) struct ObjectBase {
  prototype: Option<GcObject>,
  extensible: bool,
  properties: Vec<PropertyEntry>,
}

impl ObjectBase {
  pub(crate) fn new(prototype: Option<GcObject>) -> Self {
    Self {
      prototype,
      extensible: true,
      properties: Vec::new(),
    }
  }

  fn find(&self, key: &PropertyKey) -> Option<&PropertyEntry> {
    self.properties.iter().find(|prop| prop.key == *key)
  }

  /// Replaces an existing entry in place (keeping its insertion position) or appends.
  fn insert(&mut self, key: PropertyKey, desc: PropertyDescriptor) {
    match self.properties.iter_mut().find(|prop| prop.key == key) {
      Some(prop) => prop.desc = desc,
      None => self.properties.push(PropertyEntry { key, desc }),
    }
  }
}

#[derive(Debug, Clone, Copy)]
struct PropertyEntry {
  key: PropertyKey,
  desc: PropertyDescriptor,
}
