/// How a symbol is represented by the environment that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolRepr {
  /// A real symbol primitive: `typeof` reports `"symbol"`.
  Native,
  /// A polyfill stand-in: it tags itself as a Symbol but `typeof` reports `"object"`.
  Polyfilled,
}

/// A JS Symbol record.
#[derive(Debug)]
pub struct JsSymbol {
  repr: SymbolRepr,
}

impl JsSymbol {
  pub(crate) fn new(repr: SymbolRepr) -> Self {
    Self { repr }
  }

  pub fn is_polyfilled(&self) -> bool {
    self.repr == SymbolRepr::Polyfilled
  }
}
