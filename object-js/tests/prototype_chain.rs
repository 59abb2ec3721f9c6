use object_js::{Heap, PropertyDescriptor, Value, VmError, MAX_PROTOTYPE_CHAIN};

#[test]
fn set_prototype_rejects_direct_self() {
  let mut heap = Heap::new();
  let obj = heap.alloc_object(None);
  assert!(matches!(
    heap.object_set_prototype(obj, Some(obj)),
    Err(VmError::PrototypeCycle)
  ));
}

#[test]
fn set_prototype_rejects_indirect_cycle() -> Result<(), VmError> {
  let mut heap = Heap::new();
  let a = heap.alloc_object(None);
  let b = heap.alloc_object(None);
  let c = heap.alloc_object(None);

  heap.object_set_prototype(a, Some(b))?;
  heap.object_set_prototype(b, Some(c))?;

  assert!(matches!(
    heap.object_set_prototype(c, Some(a)),
    Err(VmError::PrototypeCycle)
  ));
  Ok(())
}

#[test]
fn has_property_sees_inherited_keys() -> Result<(), VmError> {
  let mut heap = Heap::new();
  let base = heap.alloc_object(None);
  let leaf = heap.alloc_object(Some(base));
  let key = heap.string_key("x");
  heap.define_property(base, key, PropertyDescriptor::data(Value::Number(123.0)))?;

  assert!(heap.has_property(leaf, &key)?);
  assert!(!heap.object_has_own_property(leaf, &key)?);
  assert_eq!(heap.get(leaf, key)?, Value::Number(123.0));
  Ok(())
}

#[test]
fn prototype_chain_traversal_is_bounded() -> Result<(), VmError> {
  let mut heap = Heap::new();
  let key = heap.string_key("x");

  let base = heap.alloc_object(None);
  heap.define_property(base, key, PropertyDescriptor::data(Value::Number(1.0)))?;

  let mut prev = base;
  for _ in 0..(MAX_PROTOTYPE_CHAIN - 1) {
    prev = heap.alloc_object(Some(prev));
  }
  let leaf = prev;
  assert!(heap.get_property(leaf, &key)?.is_some());

  // One more hop exceeds the cap.
  let too_deep = heap.alloc_object(Some(leaf));
  assert!(matches!(
    heap.get_property(too_deep, &key),
    Err(VmError::PrototypeChainTooDeep)
  ));
  Ok(())
}

#[test]
fn set_creates_own_property_on_receiver() -> Result<(), VmError> {
  let mut heap = Heap::new();
  let base = heap.alloc_object(None);
  let leaf = heap.alloc_object(Some(base));
  let key = heap.string_key("x");
  heap.define_property(base, key, PropertyDescriptor::data(Value::Number(1.0)))?;

  assert!(heap.set(leaf, key, Value::Number(2.0))?);
  assert_eq!(heap.get(leaf, key)?, Value::Number(2.0));
  assert_eq!(heap.get(base, key)?, Value::Number(1.0));
  Ok(())
}
