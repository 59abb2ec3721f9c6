use core::fmt;

/// A stable identifier for an object allocation in the [`Heap`](crate::Heap).
///
/// This is a packed `{ index: u32, generation: u32 }`.
/// - `index` selects a slot in the heap's slot vector.
/// - `generation` is incremented each time that slot is released.
///
/// A `HeapId` is **only valid** if the slot at `index` is occupied and its generation matches.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct HeapId(pub(crate) u64);

impl HeapId {
  pub(crate) fn from_parts(index: u32, generation: u32) -> Self {
    Self((index as u64) | ((generation as u64) << 32))
  }

  /// The slot index within the heap.
  #[inline]
  pub fn index(self) -> u32 {
    self.0 as u32
  }

  /// The generation of the slot when this handle was created.
  #[inline]
  pub fn generation(self) -> u32 {
    (self.0 >> 32) as u32
  }
}

impl fmt::Debug for HeapId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("HeapId")
      .field("index", &self.index())
      .field("generation", &self.generation())
      .finish()
  }
}

/// A heap-allocated JavaScript object (ordinary object, function or class constructor).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct GcObject(pub(crate) HeapId);

impl GcObject {
  /// The underlying [`HeapId`].
  #[inline]
  pub fn id(self) -> HeapId {
    self.0
  }

  /// The slot index within the heap.
  #[inline]
  pub fn index(self) -> u32 {
    self.0.index()
  }

  /// The slot generation within the heap.
  #[inline]
  pub fn generation(self) -> u32 {
    self.0.generation()
  }
}

/// An interned JavaScript string.
///
/// Strings are interned by the heap, so two `GcString`s from the same heap are equal exactly when
/// their contents are equal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct GcString(pub(crate) u32);

impl GcString {
  /// The index within the heap's string table.
  #[inline]
  pub fn index(self) -> u32 {
    self.0
  }
}

/// A JavaScript symbol. Equality is identity: every call to `new_symbol` yields a distinct one.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
#[repr(transparent)]
pub struct GcSymbol(pub(crate) u32);

impl GcSymbol {
  /// The index within the heap's symbol table.
  #[inline]
  pub fn index(self) -> u32 {
    self.0
  }
}
