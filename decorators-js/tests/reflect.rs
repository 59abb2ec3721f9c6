use decorators_js::reflect::{
  create_default_setter, from_property_descriptor, has_property, has_property_with,
  is_degraded_symbol, is_descriptor, own_keys, own_property_descriptors, to_property_descriptor,
  RootSlotProbe, UndefinedIsAbsent,
};
use object_js::{Heap, PropertyDescriptor, PropertyKind, Realm, RealmOptions, Value, VmError};

#[test]
fn own_keys_lists_strings_before_symbols() -> Result<(), VmError> {
  let mut realm = Realm::default();
  let sym = realm.new_symbol()?;
  let b = realm.heap_mut().string_key("b");
  let a = realm.heap_mut().string_key("a");
  let obj = realm.alloc_object_literal(&[
    (sym.into(), Value::Null),
    (b, Value::Null),
    (a, Value::Null),
  ]);

  assert_eq!(own_keys(&realm, obj)?, vec![b, a, sym.into()]);
  Ok(())
}

#[test]
fn own_keys_omits_symbols_when_unsupported() -> Result<(), VmError> {
  let mut realm = Realm::new(RealmOptions {
    symbol_key_enumeration: false,
    ..RealmOptions::default()
  });
  let sym = realm.new_symbol()?;
  let a = realm.heap_mut().string_key("a");
  let obj = realm.alloc_object_literal(&[(sym.into(), Value::Null), (a, Value::Null)]);

  assert_eq!(own_keys(&realm, obj)?, vec![a]);
  Ok(())
}

#[test]
fn descriptors_cover_non_enumerable_keys() -> Result<(), VmError> {
  let mut realm = Realm::default();
  let hidden = realm.heap_mut().string_key("hidden");
  let shown = realm.heap_mut().string_key("shown");
  let obj = realm.alloc_object_literal(&[(shown, Value::Number(1.0))]);
  let hidden_desc = PropertyDescriptor {
    enumerable: false,
    configurable: false,
    kind: PropertyKind::Data {
      value: Value::Bool(false),
      writable: false,
    },
  };
  realm.heap_mut().define_property(obj, hidden, hidden_desc)?;

  let descs = own_property_descriptors(&realm, obj)?;
  assert_eq!(descs.len(), 2);
  assert_eq!(descs.keys().collect::<Vec<_>>(), own_keys(&realm, obj)?);
  assert_eq!(descs.get(&hidden), Some(&hidden_desc));
  assert_eq!(
    descs.get(&shown),
    Some(&PropertyDescriptor::data(Value::Number(1.0)))
  );
  Ok(())
}

#[test]
fn degraded_symbol_detection() -> Result<(), VmError> {
  let mut native = Realm::default();
  let native_sym = native.new_symbol()?;
  let name = native.heap_mut().string_key("name");
  assert!(!is_degraded_symbol(native.heap(), &native_sym.into())?);
  assert!(!is_degraded_symbol(native.heap(), &name)?);

  let mut polyfilled = Realm::new(RealmOptions::polyfilled());
  let sym = polyfilled.new_symbol()?;
  assert!(is_degraded_symbol(polyfilled.heap(), &sym.into())?);
  Ok(())
}

#[test]
fn native_symbols_use_the_in_test() -> Result<(), VmError> {
  let mut realm = Realm::default();
  let sym = realm.new_symbol()?;
  let object_prototype = realm.intrinsics().object_prototype();
  let obj = realm.alloc_object();

  assert!(!has_property(&mut realm, sym.into(), obj)?);
  // Any value on the root counts for a native symbol, even `undefined`.
  realm.heap_mut().define_property(
    object_prototype,
    sym.into(),
    PropertyDescriptor::data(Value::Undefined),
  )?;
  assert!(has_property(&mut realm, sym.into(), obj)?);
  Ok(())
}

#[test]
fn degraded_symbols_walk_the_chain() -> Result<(), VmError> {
  let mut realm = Realm::new(RealmOptions::polyfilled());
  let sym = realm.new_symbol()?;
  let class = realm.alloc_class("C", None)?;
  let proto = realm.class_prototype(class)?;
  let instance = realm.construct(class)?;

  // Only the registration on the root.
  assert!(!has_property(&mut realm, sym.into(), instance)?);

  // An own property anywhere below the root counts, whatever its value.
  realm.heap_mut().define_property(
    proto,
    sym.into(),
    PropertyDescriptor::data(Value::Undefined),
  )?;
  assert!(has_property(&mut realm, sym.into(), instance)?);
  Ok(())
}

struct Always;

impl RootSlotProbe for Always {
  fn is_assigned(&self, _heap: &Heap, _value: Value) -> bool {
    true
  }
}

#[test]
fn root_probe_is_pluggable() -> Result<(), VmError> {
  let mut realm = Realm::new(RealmOptions::polyfilled());
  let sym = realm.new_symbol()?;
  let obj = realm.alloc_object();

  assert!(!has_property_with(&mut realm, sym.into(), obj, &UndefinedIsAbsent)?);
  assert!(has_property_with(&mut realm, sym.into(), obj, &Always)?);
  Ok(())
}

#[test]
fn prototype_less_objects_never_reach_the_root() -> Result<(), VmError> {
  let mut realm = Realm::new(RealmOptions::polyfilled());
  let sym = realm.new_symbol()?;
  let bare = realm.heap_mut().alloc_object(None);
  assert!(!has_property_with(&mut realm, sym.into(), bare, &Always)?);
  Ok(())
}

#[test]
fn descriptor_objects_are_recognised_by_own_fields() -> Result<(), VmError> {
  let mut realm = Realm::default();
  assert!(!is_descriptor(realm.heap(), Value::Number(1.0))?);
  assert!(!is_descriptor(realm.heap(), Value::Undefined)?);

  let plain = realm.alloc_object();
  assert!(!is_descriptor(realm.heap(), plain.into())?);

  let initializer = realm.heap_mut().string_key("initializer");
  let field = realm.alloc_object_literal(&[(initializer, Value::Null)]);
  assert!(is_descriptor(realm.heap(), field.into())?);

  // Inherited fields don't count.
  let value = realm.heap_mut().string_key("value");
  let parent = realm.alloc_object_literal(&[(value, Value::Null)]);
  let child = realm.heap_mut().alloc_object(Some(parent));
  assert!(!is_descriptor(realm.heap(), child.into())?);
  Ok(())
}

#[test]
fn descriptor_objects_convert_back() -> Result<(), VmError> {
  let mut realm = Realm::default();
  let getter = realm.alloc_function("get", 0, |_heap, _this, _args| Ok(Value::Number(3.0)))?;
  let desc = PropertyDescriptor {
    enumerable: false,
    configurable: true,
    kind: PropertyKind::Accessor {
      get: Value::Object(getter),
      set: Value::Undefined,
    },
  };

  let obj = from_property_descriptor(&mut realm, desc)?;
  assert!(is_descriptor(realm.heap(), obj.into())?);

  let patch = to_property_descriptor(realm.heap_mut(), obj)?;
  assert_eq!(patch.get, Some(Value::Object(getter)));
  assert_eq!(patch.set, Some(Value::Undefined));
  assert_eq!(patch.enumerable, Some(false));
  assert_eq!(patch.configurable, Some(true));
  assert!(patch.value.is_none());
  assert!(patch.writable.is_none());
  Ok(())
}

#[test]
fn to_property_descriptor_rejects_mixed_and_uncallable_fields() -> Result<(), VmError> {
  let mut realm = Realm::default();
  let get = realm.heap_mut().string_key("get");
  let value = realm.heap_mut().string_key("value");

  let uncallable = realm.alloc_object_literal(&[(get, Value::Number(1.0))]);
  assert!(matches!(
    to_property_descriptor(realm.heap_mut(), uncallable),
    Err(VmError::TypeError(_))
  ));

  let f = realm.alloc_function("f", 0, |_heap, _this, _args| Ok(Value::Undefined))?;
  let mixed = realm.alloc_object_literal(&[(get, Value::Object(f)), (value, Value::Null)]);
  assert!(to_property_descriptor(realm.heap_mut(), mixed).is_err());
  Ok(())
}

#[test]
fn default_setter_defines_a_data_property_on_this() -> Result<(), VmError> {
  let mut realm = Realm::default();
  let key = realm.heap_mut().string_key("size");
  let setter = create_default_setter(&mut realm, key)?;
  let target = realm.alloc_object();

  let returned = realm
    .heap_mut()
    .call(Value::Object(setter), Value::Object(target), &[Value::Number(4.0)])?;
  assert_eq!(returned, Value::Number(4.0));
  assert_eq!(
    realm.heap().object_get_own_property(target, &key)?,
    Some(PropertyDescriptor {
      enumerable: true,
      configurable: true,
      kind: PropertyKind::Data {
        value: Value::Number(4.0),
        writable: true,
      },
    })
  );

  assert!(matches!(
    realm
      .heap_mut()
      .call(Value::Object(setter), Value::Null, &[Value::Number(1.0)]),
    Err(VmError::TypeError(_))
  ));
  Ok(())
}
