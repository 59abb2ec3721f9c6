//! A JavaScript object model for host-side reflection.
//!
//! This crate provides the pieces needed to reason about JavaScript objects without an interpreter:
//! - Handle-addressed storage ([`Heap`]) with generation-checked object handles ([`GcObject`]),
//!   interned strings ([`GcString`]) and unique symbols ([`GcSymbol`])
//! - Ordinary object internal methods (`[[GetOwnProperty]]`, `[[DefineOwnProperty]]`,
//!   `[[HasProperty]]`, `[[Get]]`, `[[Set]]`, `[[OwnPropertyKeys]]`)
//! - Full property descriptors ([`PropertyDescriptor`]), data and accessor
//! - Native functions and classes, constructed through a [`Realm`]
//!
//! # Handle validity
//!
//! An object handle contains `{ index, generation }`. Releasing an object with
//! [`Heap::release_object`] bumps the slot's generation, so every API that dereferences a stale
//! handle returns [`VmError::InvalidHandle`] instead of touching a reused slot.
//!
//! # Symbols
//!
//! A realm is created with [`RealmOptions`]. Under [`SymbolSupport::Polyfilled`] symbols behave
//! like the stand-ins handed out by symbol polyfills: `typeof` reports `"object"` while the
//! builtin tag is still `"Symbol"`, and every creation leaves an `undefined` slot for the symbol
//! on `%Object.prototype%`.

mod error;
mod function;
mod function_properties;
mod handle;
mod heap;
mod object_ops;
mod property;
mod realm;
mod symbol;
mod value;

pub use crate::error::VmError;
pub use crate::function::NativeCallFn;
pub use crate::function::NativeFunctionId;
pub use crate::function_properties::get_prototype_from_constructor;
pub use crate::function_properties::make_constructor;
pub use crate::function_properties::set_function_length;
pub use crate::function_properties::set_function_name;
pub use crate::handle::GcObject;
pub use crate::handle::GcString;
pub use crate::handle::GcSymbol;
pub use crate::handle::HeapId;
pub use crate::heap::Heap;
pub use crate::heap::MAX_PROTOTYPE_CHAIN;
pub use crate::property::PropertyDescriptor;
pub use crate::property::PropertyDescriptorPatch;
pub use crate::property::PropertyKey;
pub use crate::property::PropertyKind;
pub use crate::realm::Intrinsics;
pub use crate::realm::Realm;
pub use crate::realm::RealmOptions;
pub use crate::realm::SymbolSupport;
pub use crate::symbol::JsSymbol;
pub use crate::symbol::SymbolRepr;
pub use crate::value::TypeOf;
pub use crate::value::Value;
