use crate::function_properties::{
  get_prototype_from_constructor, make_constructor, set_function_name,
};
use crate::property::{PropertyDescriptor, PropertyKey, PropertyKind};
use crate::symbol::SymbolRepr;
use crate::{GcObject, GcSymbol, Heap, Value, VmError};

/// How the environment provides symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SymbolSupport {
  /// Real symbol primitives.
  #[default]
  Native,
  /// A polyfill: symbols are stand-in objects, and creating one registers it on
  /// `%Object.prototype%` with the value `undefined`.
  Polyfilled,
}

/// Realm configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RealmOptions {
  pub symbols: SymbolSupport,
  /// Whether the environment can enumerate symbol-keyed own properties
  /// (`Object.getOwnPropertySymbols`).
  pub symbol_key_enumeration: bool,
}

impl Default for RealmOptions {
  fn default() -> Self {
    Self {
      symbols: SymbolSupport::Native,
      symbol_key_enumeration: true,
    }
  }
}

impl RealmOptions {
  /// An environment running a symbol polyfill that still exposes symbol-keyed properties.
  pub fn polyfilled() -> Self {
    Self {
      symbols: SymbolSupport::Polyfilled,
      ..Self::default()
    }
  }
}

/// The intrinsic objects every realm starts with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Intrinsics {
  object_prototype: GcObject,
  function_prototype: GcObject,
}

impl Intrinsics {
  /// `%Object.prototype%`, the root of every ordinary prototype chain.
  pub fn object_prototype(&self) -> GcObject {
    self.object_prototype
  }

  /// `%Function.prototype%`.
  pub fn function_prototype(&self) -> GcObject {
    self.function_prototype
  }
}

/// A heap together with its intrinsics and environment options.
pub struct Realm {
  heap: Heap,
  intrinsics: Intrinsics,
  options: RealmOptions,
}

impl Default for Realm {
  fn default() -> Self {
    Self::new(RealmOptions::default())
  }
}

impl Realm {
  pub fn new(options: RealmOptions) -> Self {
    let mut heap = Heap::new();
    let object_prototype = heap.alloc_object(None);
    let function_prototype = heap.alloc_object(Some(object_prototype));
    Self {
      heap,
      intrinsics: Intrinsics {
        object_prototype,
        function_prototype,
      },
      options,
    }
  }

  pub fn heap(&self) -> &Heap {
    &self.heap
  }

  pub fn heap_mut(&mut self) -> &mut Heap {
    &mut self.heap
  }

  pub fn intrinsics(&self) -> &Intrinsics {
    &self.intrinsics
  }

  pub fn options(&self) -> &RealmOptions {
    &self.options
  }

  /// `Symbol()`.
  ///
  /// Under [`SymbolSupport::Polyfilled`] the new symbol is also registered on
  /// `%Object.prototype%` with the value `undefined`, as such polyfills do on creation.
  pub fn new_symbol(&mut self) -> Result<GcSymbol, VmError> {
    match self.options.symbols {
      SymbolSupport::Native => Ok(self.heap.new_symbol(SymbolRepr::Native)),
      SymbolSupport::Polyfilled => {
        let sym = self.heap.new_symbol(SymbolRepr::Polyfilled);
        self.heap.define_property(
          self.intrinsics.object_prototype,
          PropertyKey::Symbol(sym),
          PropertyDescriptor {
            enumerable: false,
            configurable: true,
            kind: PropertyKind::Data {
              value: Value::Undefined,
              writable: true,
            },
          },
        )?;
        Ok(sym)
      }
    }
  }

  /// `{}`: an ordinary object inheriting from `%Object.prototype%`.
  pub fn alloc_object(&mut self) -> GcObject {
    self.heap.alloc_object(Some(self.intrinsics.object_prototype))
  }

  /// An object literal: own data properties (writable, enumerable, configurable) in order.
  pub fn alloc_object_literal(&mut self, props: &[(PropertyKey, Value)]) -> GcObject {
    let props: Vec<(PropertyKey, PropertyDescriptor)> = props
      .iter()
      .map(|(key, value)| (*key, PropertyDescriptor::data(*value)))
      .collect();
    self
      .heap
      .alloc_object_with_properties(Some(self.intrinsics.object_prototype), &props)
  }

  /// A native function inheriting from `%Function.prototype%`.
  pub fn alloc_function<F>(&mut self, name: &str, length: u32, f: F) -> Result<GcObject, VmError>
  where
    F: Fn(&mut Heap, Value, &[Value]) -> Result<Value, VmError> + 'static,
  {
    let proto = Some(self.intrinsics.function_prototype);
    self.heap.alloc_native_function(proto, name, length, f)
  }

  /// `class name extends parent {}`.
  ///
  /// The constructor inherits from `parent` (or `%Function.prototype%`) and its `.prototype`
  /// object inherits from `parent.prototype` (or `%Object.prototype%`).
  pub fn alloc_class(&mut self, name: &str, parent: Option<GcObject>) -> Result<GcObject, VmError> {
    let (ctor_proto, proto_parent) = match parent {
      Some(parent) => {
        if !self.heap.is_constructor(Value::Object(parent))? {
          return Err(VmError::NotConstructable);
        }
        (parent, get_prototype_from_constructor(&self.heap, parent)?)
      }
      None => (
        self.intrinsics.function_prototype,
        self.intrinsics.object_prototype,
      ),
    };

    let name = self.heap.alloc_string(name);
    let class = self.heap.alloc_class_object(Some(ctor_proto), name);
    make_constructor(&mut self.heap, class, Some(proto_parent))?;
    set_function_name(&mut self.heap, class, name)?;
    Ok(class)
  }

  /// `C.prototype`.
  pub fn class_prototype(&self, class: GcObject) -> Result<GcObject, VmError> {
    get_prototype_from_constructor(&self.heap, class)
  }

  /// `new C()`: an ordinary object whose `[[Prototype]]` is `C.prototype`.
  pub fn construct(&mut self, class: GcObject) -> Result<GcObject, VmError> {
    if !self.heap.is_constructor(Value::Object(class))? {
      return Err(VmError::NotConstructable);
    }
    let proto = get_prototype_from_constructor(&self.heap, class)?;
    Ok(self.heap.alloc_object(Some(proto)))
  }

  /// The class's `name` metadata as a Rust string.
  pub fn class_name(&self, class: GcObject) -> Result<String, VmError> {
    let name = self.heap.function_name(class)?;
    Ok(self.heap.get_string(name)?.to_string())
  }
}
