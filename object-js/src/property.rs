use crate::{GcString, GcSymbol, Value, VmError};

/// A JavaScript property key (ECMAScript `PropertyKey`).
///
/// ECMAScript's `PropertyKey` union: `String | Symbol`. Strings are interned, so both
/// variants compare by handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKey {
  String(GcString),
  Symbol(GcSymbol),
}

impl PropertyKey {
  pub fn is_symbol(&self) -> bool {
    matches!(self, PropertyKey::Symbol(_))
  }

  /// The key as a JS value (what `Reflect.ownKeys` would hand out).
  pub fn to_value(self) -> Value {
    match self {
      PropertyKey::String(s) => Value::String(s),
      PropertyKey::Symbol(s) => Value::Symbol(s),
    }
  }
}

impl From<GcString> for PropertyKey {
  fn from(value: GcString) -> Self {
    Self::String(value)
  }
}

impl From<GcSymbol> for PropertyKey {
  fn from(value: GcSymbol) -> Self {
    Self::Symbol(value)
  }
}

/// A concrete property descriptor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PropertyDescriptor {
  pub enumerable: bool,
  pub configurable: bool,
  pub kind: PropertyKind,
}

impl PropertyDescriptor {
  /// A writable, enumerable, configurable data property (what plain assignment creates).
  pub fn data(value: Value) -> Self {
    Self {
      enumerable: true,
      configurable: true,
      kind: PropertyKind::Data {
        value,
        writable: true,
      },
    }
  }

  pub fn is_data_descriptor(&self) -> bool {
    matches!(self.kind, PropertyKind::Data { .. })
  }

  pub fn is_accessor_descriptor(&self) -> bool {
    matches!(self.kind, PropertyKind::Accessor { .. })
  }
}

/// The kind of property described by a [`PropertyDescriptor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PropertyKind {
  Data { value: Value, writable: bool },
  Accessor { get: Value, set: Value },
}

/// A "partial" property descriptor patch used by `DefineProperty`-style operations.
#[derive(Debug, Default, Clone, Copy)]
pub struct PropertyDescriptorPatch {
  pub enumerable: Option<bool>,
  pub configurable: Option<bool>,
  pub value: Option<Value>,
  pub writable: Option<bool>,
  pub get: Option<Value>,
  pub set: Option<Value>,
}

impl PropertyDescriptorPatch {
  /// Validates that this patch does not mix data and accessor descriptor fields.
  ///
  /// Per ECMAScript, a descriptor cannot be both a Data Descriptor and an Accessor Descriptor.
  pub fn validate(&self) -> Result<(), VmError> {
    if self.is_data_descriptor() && self.is_accessor_descriptor() {
      return Err(VmError::InvalidPropertyDescriptorPatch);
    }
    Ok(())
  }

  pub fn is_empty(&self) -> bool {
    self.enumerable.is_none()
      && self.configurable.is_none()
      && self.value.is_none()
      && self.writable.is_none()
      && self.get.is_none()
      && self.set.is_none()
  }

  pub fn is_data_descriptor(&self) -> bool {
    self.value.is_some() || self.writable.is_some()
  }

  pub fn is_accessor_descriptor(&self) -> bool {
    self.get.is_some() || self.set.is_some()
  }

  pub fn is_generic_descriptor(&self) -> bool {
    !self.is_data_descriptor() && !self.is_accessor_descriptor()
  }
}

impl From<PropertyDescriptor> for PropertyDescriptorPatch {
  fn from(desc: PropertyDescriptor) -> Self {
    let mut patch = PropertyDescriptorPatch {
      enumerable: Some(desc.enumerable),
      configurable: Some(desc.configurable),
      ..Default::default()
    };
    match desc.kind {
      PropertyKind::Data { value, writable } => {
        patch.value = Some(value);
        patch.writable = Some(writable);
      }
      PropertyKind::Accessor { get, set } => {
        patch.get = Some(get);
        patch.set = Some(set);
      }
    }
    patch
  }
}
