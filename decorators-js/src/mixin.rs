use crate::error::DecoratorError;
use crate::reflect::{has_property, own_property_descriptors, OwnPropertyDescriptors};
use object_js::{GcObject, Heap, Realm, Value, VmError};
use std::time::Instant;
use tracing::debug_span;

/// What `@mixin(...)` evaluates to.
#[derive(Debug, Clone)]
pub enum Mixin {
  /// `@mixin` applied directly to a class with nothing to mix in: the class, untouched.
  Applied(GcObject),
  /// `@mixin(a, b, ...)`: a decorator to apply to the class.
  Decorator(MixinDecorator),
}

/// A pending `@mixin(...)` decorator holding its mixins in application order.
#[derive(Debug, Clone)]
pub struct MixinDecorator {
  mixins: Vec<Value>,
}

impl MixinDecorator {
  pub fn mixins(&self) -> &[Value] {
    &self.mixins
  }

  /// Decorates `target`, returning the same class.
  pub fn apply(&self, realm: &mut Realm, target: GcObject) -> Result<GcObject, DecoratorError> {
    apply_mixins(realm, target, &self.mixins)
  }
}

/// Entry point of the `@mixin` decorator.
///
/// A single function argument is the class itself (`@mixin class C {}`), which is returned
/// unchanged. Any other argument list is the mixin sequence for a decorator.
pub fn mixin(realm: &mut Realm, args: &[Value]) -> Result<Mixin, DecoratorError> {
  if let [target @ Value::Object(class)] = args {
    if realm.heap().is_callable(*target)? {
      let name = target_name(realm.heap(), *class)?;
      tracing::debug!(class = %name, "mixin applied without mixins");
      return Ok(Mixin::Applied(*class));
    }
  }
  Ok(Mixin::Decorator(MixinDecorator {
    mixins: args.to_vec(),
  }))
}

/// Copies the own properties of each mixin onto `target.prototype`.
///
/// Mixins are applied in order. A key is installed only if the prototype chain doesn't already
/// have it, so the class's own and inherited members win over mixins, and earlier mixins win over
/// later ones. Descriptors are installed verbatim.
///
/// Failures other than an empty `mixins` propagate as-is; properties installed before the failure
/// stay installed.
pub fn apply_mixins(
  realm: &mut Realm,
  target: GcObject,
  mixins: &[Value],
) -> Result<GcObject, DecoratorError> {
  let class = target_name(realm.heap(), target)?;
  if mixins.is_empty() {
    return Err(DecoratorError::MissingMixin { class });
  }

  let span = MixinSpan::enter(&class, mixins.len());
  let _guard = span.as_ref().map(|span| span.span.enter());

  let proto = realm.class_prototype(target)?;
  let mut installed = 0usize;
  let mut skipped = 0usize;

  for mixin in mixins {
    let descs = mixin_descriptors(realm, *mixin)?;
    for (key, desc) in descs.iter() {
      if has_property(realm, key, proto)? {
        tracing::trace!(?key, "mixin key already present");
        skipped += 1;
        continue;
      }
      realm
        .heap_mut()
        .define_property_or_throw(proto, key, desc.into())?;
      installed += 1;
    }
  }

  if let Some(span) = &span {
    span.finish(installed, skipped);
  }
  Ok(target)
}

fn mixin_descriptors(realm: &Realm, mixin: Value) -> Result<OwnPropertyDescriptors, VmError> {
  match mixin {
    Value::Object(obj) => own_property_descriptors(realm, obj),
    Value::Undefined | Value::Null => Err(VmError::TypeError(
      "Cannot convert undefined or null to object",
    )),
    // Wrapper objects of other primitives have no own properties worth mixing in.
    _ => Ok(OwnPropertyDescriptors::default()),
  }
}

/// The class name as interpolated into diagnostics.
///
/// Read from the function's name metadata, never through `[[Get]]`, so no user getter runs.
fn target_name(heap: &Heap, target: GcObject) -> Result<String, VmError> {
  match heap.function_name(target) {
    Ok(name) => Ok(heap.get_string(name)?.to_string()),
    Err(VmError::NotCallable) => Ok("undefined".to_string()),
    Err(err) => Err(err),
  }
}

struct MixinSpan {
  span: tracing::Span,
  start: Instant,
}

impl MixinSpan {
  fn enter(class: &str, mixins: usize) -> Option<MixinSpan> {
    let span = debug_span!(
      "decorators_js.mixin",
      class = tracing::field::Empty,
      mixins,
      installed = tracing::field::Empty,
      skipped = tracing::field::Empty,
      duration_ms = tracing::field::Empty,
    );
    if span.is_disabled() {
      return None;
    }
    span.record("class", class);
    Some(MixinSpan {
      span,
      start: Instant::now(),
    })
  }

  fn finish(&self, installed: usize, skipped: usize) {
    self.span.record("installed", installed);
    self.span.record("skipped", skipped);
    self
      .span
      .record("duration_ms", self.start.elapsed().as_secs_f64() * 1000.0);
  }
}
