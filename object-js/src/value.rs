use crate::{GcObject, GcString, GcSymbol, Heap, VmError};

/// A JavaScript value.
///
/// Heap-allocated values are represented using handles (e.g. [`GcObject`]), so `Value` is `Copy`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Value {
  /// The JavaScript `undefined` value.
  Undefined,
  /// The JavaScript `null` value.
  Null,
  /// A JavaScript boolean.
  Bool(bool),
  /// A JavaScript number (IEEE-754 double).
  Number(f64),
  /// An interned JavaScript string.
  String(GcString),
  /// A JavaScript symbol (native or polyfilled).
  Symbol(GcSymbol),
  /// A JavaScript object.
  Object(GcObject),
}

impl Value {
  pub fn is_undefined(self) -> bool {
    matches!(self, Value::Undefined)
  }

  /// ECMAScript `SameValue`.
  pub fn same_value(self, other: Value) -> bool {
    match (self, other) {
      (Value::Number(a), Value::Number(b)) => {
        if a.is_nan() && b.is_nan() {
          return true;
        }
        a == b && a.is_sign_negative() == b.is_sign_negative()
      }
      (a, b) => a == b,
    }
  }
}

impl From<GcObject> for Value {
  fn from(obj: GcObject) -> Self {
    Value::Object(obj)
  }
}

impl From<GcString> for Value {
  fn from(s: GcString) -> Self {
    Value::String(s)
  }
}

impl From<GcSymbol> for Value {
  fn from(sym: GcSymbol) -> Self {
    Value::Symbol(sym)
  }
}

/// Result of the `typeof` operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeOf {
  Undefined,
  Object,
  Boolean,
  Number,
  String,
  Symbol,
  Function,
}

impl TypeOf {
  pub fn as_str(self) -> &'static str {
    match self {
      TypeOf::Undefined => "undefined",
      TypeOf::Object => "object",
      TypeOf::Boolean => "boolean",
      TypeOf::Number => "number",
      TypeOf::String => "string",
      TypeOf::Symbol => "symbol",
      TypeOf::Function => "function",
    }
  }
}

impl Heap {
  /// The `typeof` operator.
  ///
  /// Polyfilled symbols report `"object"`, matching the wrapper objects such polyfills hand out.
  pub fn type_of(&self, value: Value) -> Result<TypeOf, VmError> {
    Ok(match value {
      Value::Undefined => TypeOf::Undefined,
      Value::Null => TypeOf::Object,
      Value::Bool(_) => TypeOf::Boolean,
      Value::Number(_) => TypeOf::Number,
      Value::String(_) => TypeOf::String,
      Value::Symbol(sym) => {
        if self.get_symbol(sym)?.is_polyfilled() {
          TypeOf::Object
        } else {
          TypeOf::Symbol
        }
      }
      Value::Object(obj) => {
        if self.is_callable(Value::Object(obj))? {
          TypeOf::Function
        } else {
          TypeOf::Object
        }
      }
    })
  }

  /// ECMAScript `ToBoolean`.
  pub fn to_boolean(&self, value: Value) -> Result<bool, VmError> {
    Ok(match value {
      Value::Undefined | Value::Null => false,
      Value::Bool(b) => b,
      Value::Number(n) => n != 0.0 && !n.is_nan(),
      Value::String(s) => !self.get_string(s)?.is_empty(),
      Value::Symbol(_) | Value::Object(_) => true,
    })
  }

  /// The builtin tag reported by `Object.prototype.toString` (the `X` in `"[object X]"`).
  ///
  /// Symbols report `"Symbol"` regardless of representation.
  pub fn builtin_tag(&self, value: Value) -> Result<&'static str, VmError> {
    Ok(match value {
      Value::Undefined => "Undefined",
      Value::Null => "Null",
      Value::Bool(_) => "Boolean",
      Value::Number(_) => "Number",
      Value::String(_) => "String",
      Value::Symbol(sym) => {
        // Validate the handle even though the tag doesn't depend on the record.
        let _ = self.get_symbol(sym)?;
        "Symbol"
      }
      Value::Object(obj) => {
        if self.is_callable(Value::Object(obj))? {
          "Function"
        } else {
          "Object"
        }
      }
    })
  }
}
