use ahash::AHashMap;
use object_js::{GcObject, Heap, PropertyKey, VmError};
use once_cell::unsync::Lazy;

type LazyMap<V> = Lazy<AHashMap<PropertyKey, V>>;

/// Identifier of a pending host timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeoutId(pub u64);

/// Per-instance bookkeeping for timing decorators (debounce/throttle), keyed by method.
///
/// Every table is created on first access.
pub struct Meta {
  debounce_timeout_ids: LazyMap<TimeoutId>,
  throttle_timeout_ids: LazyMap<TimeoutId>,
  throttle_previous_timestamps: LazyMap<f64>,
}

impl Default for Meta {
  fn default() -> Self {
    Self {
      debounce_timeout_ids: Lazy::new(AHashMap::default),
      throttle_timeout_ids: Lazy::new(AHashMap::default),
      throttle_previous_timestamps: Lazy::new(AHashMap::default),
    }
  }
}

impl Meta {
  pub fn debounce_timeout_ids(&mut self) -> &mut AHashMap<PropertyKey, TimeoutId> {
    &mut self.debounce_timeout_ids
  }

  pub fn throttle_timeout_ids(&mut self) -> &mut AHashMap<PropertyKey, TimeoutId> {
    &mut self.throttle_timeout_ids
  }

  /// Milliseconds since the epoch at which each throttled method last ran.
  pub fn throttle_previous_timestamps(&mut self) -> &mut AHashMap<PropertyKey, f64> {
    &mut self.throttle_previous_timestamps
  }

  pub fn is_debounce_initialized(&self) -> bool {
    Lazy::get(&self.debounce_timeout_ids).is_some()
  }

  pub fn is_throttle_initialized(&self) -> bool {
    Lazy::get(&self.throttle_timeout_ids).is_some()
      || Lazy::get(&self.throttle_previous_timestamps).is_some()
  }
}

impl std::fmt::Debug for Meta {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.debug_struct("Meta")
      .field("debounce_timeout_ids", &Lazy::get(&self.debounce_timeout_ids))
      .field("throttle_timeout_ids", &Lazy::get(&self.throttle_timeout_ids))
      .field(
        "throttle_previous_timestamps",
        &Lazy::get(&self.throttle_previous_timestamps),
      )
      .finish()
  }
}

/// Side table of [`Meta`] records keyed by instance identity.
///
/// Records are stored next to the instances rather than on them, so the instances' own property
/// lists never change.
#[derive(Debug, Default)]
pub struct MetaTable {
  slots: AHashMap<GcObject, Meta>,
}

impl MetaTable {
  pub fn new() -> Self {
    Self::default()
  }

  /// Returns the record for `obj`, creating it on first use.
  pub fn meta_for(&mut self, heap: &Heap, obj: GcObject) -> Result<&mut Meta, VmError> {
    if !heap.is_valid_object(obj) {
      return Err(VmError::InvalidHandle);
    }
    Ok(self.slots.entry(obj).or_default())
  }

  /// Returns the record for `obj` without creating one.
  pub fn get(&self, obj: GcObject) -> Option<&Meta> {
    self.slots.get(&obj)
  }

  /// Drops the record for `obj` (e.g. before releasing the instance).
  pub fn remove(&mut self, obj: GcObject) -> Option<Meta> {
    self.slots.remove(&obj)
  }

  pub fn len(&self) -> usize {
    self.slots.len()
  }

  pub fn is_empty(&self) -> bool {
    self.slots.is_empty()
  }
}
