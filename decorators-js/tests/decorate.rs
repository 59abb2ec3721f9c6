use decorators_js::reflect::from_property_descriptor;
use decorators_js::{decorate, lazy_initialize, Decoration, LazyField};
use object_js::{Heap, PropertyDescriptor, PropertyKind, Realm, Value, VmError};
use std::cell::Cell;
use std::rc::Rc;

/// Records how the handler was invoked.
fn recording_handler(
  seen: Rc<Cell<Option<(usize, usize)>>>,
) -> impl FnOnce(&mut Heap, &[Value], &[Value]) -> Result<&'static str, VmError> {
  move |_heap, args, params| {
    seen.set(Some((args.len(), params.len())));
    Ok("handled")
  }
}

#[test]
fn bare_application_runs_immediately() -> Result<(), VmError> {
  let mut realm = Realm::default();
  let target = realm.alloc_object();
  let key = realm.heap_mut().alloc_string("render");
  let desc = from_property_descriptor(&mut realm, PropertyDescriptor::data(Value::Null))?;

  let seen = Rc::new(Cell::new(None));
  let outcome = decorate(
    realm.heap_mut(),
    recording_handler(seen.clone()),
    vec![target.into(), key.into(), desc.into()],
  )?;
  assert!(matches!(outcome, Decoration::Applied("handled")));
  assert_eq!(seen.get(), Some((3, 0)));
  Ok(())
}

#[test]
fn parameterised_application_waits_for_target() -> Result<(), VmError> {
  let mut realm = Realm::default();
  let target = realm.alloc_object();
  let key = realm.heap_mut().alloc_string("render");
  let desc = from_property_descriptor(&mut realm, PropertyDescriptor::data(Value::Null))?;

  let seen = Rc::new(Cell::new(None));
  let outcome = decorate(
    realm.heap_mut(),
    recording_handler(seen.clone()),
    vec![Value::Number(250.0)],
  )?;
  let Decoration::Pending(pending) = outcome else {
    panic!("expected a pending decorator");
  };
  assert_eq!(pending.entry_args(), &[Value::Number(250.0)]);
  assert_eq!(seen.get(), None);

  let result = pending.apply(realm.heap_mut(), &[target.into(), key.into(), desc.into()])?;
  assert_eq!(result, "handled");
  assert_eq!(seen.get(), Some((3, 1)));
  Ok(())
}

#[test]
fn no_arguments_is_parameterised() -> Result<(), VmError> {
  let mut realm = Realm::default();
  let seen = Rc::new(Cell::new(None));
  let outcome = decorate(realm.heap_mut(), recording_handler(seen.clone()), vec![])?;
  assert!(matches!(outcome, Decoration::Pending(_)));
  assert_eq!(seen.get(), None);
  Ok(())
}

#[test]
fn lazy_fields_initialize_once_per_instance() -> Result<(), VmError> {
  let mut realm = Realm::default();
  let key = realm.heap_mut().string_key("cache");
  let calls = Rc::new(Cell::new(0u32));
  let initializer = {
    let calls = calls.clone();
    realm.alloc_function("initializer", 0, move |_heap, _this, _args| {
      calls.set(calls.get() + 1);
      Ok(Value::Number(f64::from(calls.get())))
    })?
  };
  let field = LazyField {
    initializer: Value::Object(initializer),
    enumerable: false,
    configurable: true,
    writable: true,
  };

  let class = realm.alloc_class("Store", None)?;
  let proto = realm.class_prototype(class)?;
  let desc = lazy_initialize(&mut realm, key, field)?;
  assert!(desc.is_accessor_descriptor());
  realm.heap_mut().define_property(proto, key, desc)?;

  let a = realm.construct(class)?;
  let b = realm.construct(class)?;
  assert_eq!(realm.heap_mut().get(a, key)?, Value::Number(1.0));
  assert_eq!(realm.heap_mut().get(a, key)?, Value::Number(1.0));
  assert_eq!(realm.heap_mut().get(b, key)?, Value::Number(2.0));
  assert_eq!(calls.get(), 2);

  assert_eq!(
    realm.heap().object_get_own_property(a, &key)?,
    Some(PropertyDescriptor {
      enumerable: false,
      configurable: true,
      kind: PropertyKind::Data {
        value: Value::Number(1.0),
        writable: true,
      },
    })
  );
  Ok(())
}

#[test]
fn lazy_fields_read_on_the_prototype_stay_per_instance() -> Result<(), VmError> {
  let mut realm = Realm::default();
  let key = realm.heap_mut().string_key("cache");
  let calls = Rc::new(Cell::new(0u32));
  let initializer = {
    let calls = calls.clone();
    realm.alloc_function("initializer", 0, move |_heap, _this, _args| {
      calls.set(calls.get() + 1);
      Ok(Value::Number(f64::from(calls.get())))
    })?
  };
  let field = LazyField {
    initializer: Value::Object(initializer),
    enumerable: true,
    configurable: true,
    writable: true,
  };

  let class = realm.alloc_class("Store", None)?;
  let proto = realm.class_prototype(class)?;
  let desc = lazy_initialize(&mut realm, key, field)?;
  realm.heap_mut().define_property(proto, key, desc)?;

  assert_eq!(realm.heap_mut().get(proto, key)?, Value::Undefined);
  assert_eq!(calls.get(), 0);
  assert_eq!(realm.heap().object_get_own_property(proto, &key)?, Some(desc));

  let a = realm.construct(class)?;
  let b = realm.construct(class)?;
  assert_eq!(realm.heap_mut().get(a, key)?, Value::Number(1.0));
  assert_eq!(realm.heap_mut().get(b, key)?, Value::Number(2.0));
  assert!(realm.heap().object_has_own_property(a, &key)?);
  assert!(realm.heap().object_has_own_property(b, &key)?);
  Ok(())
}

#[test]
fn lazy_fields_assigned_before_read_skip_the_initializer() -> Result<(), VmError> {
  let mut realm = Realm::default();
  let key = realm.heap_mut().string_key("cache");
  let initializer = realm.alloc_function("initializer", 0, |_heap, _this, _args| {
    Err(VmError::TypeError("initializer ran"))
  })?;
  let field = LazyField {
    initializer: Value::Object(initializer),
    enumerable: false,
    configurable: true,
    writable: true,
  };

  let class = realm.alloc_class("Store", None)?;
  let proto = realm.class_prototype(class)?;
  let desc = lazy_initialize(&mut realm, key, field)?;
  realm.heap_mut().define_property(proto, key, desc)?;

  let instance = realm.construct(class)?;
  assert!(realm.heap_mut().set(instance, key, Value::Bool(true))?);
  assert_eq!(realm.heap_mut().get(instance, key)?, Value::Bool(true));
  Ok(())
}

#[test]
fn lazy_fields_need_a_callable_initializer() -> Result<(), VmError> {
  let mut realm = Realm::default();
  let key = realm.heap_mut().string_key("cache");
  let field = LazyField {
    initializer: Value::Number(1.0),
    enumerable: true,
    configurable: true,
    writable: true,
  };
  assert!(matches!(
    lazy_initialize(&mut realm, key, field),
    Err(VmError::NotCallable)
  ));
  Ok(())
}
