//! Class decorators over the `object-js` object model.
//!
//! The main entry point is [`mixin`], which copies the own properties of mixin objects onto a
//! class's prototype without overriding anything the prototype chain already provides:
//!
//! ```ignore
//! let decorator = match mixin(&mut realm, &[theme.into(), pure_render.into()])? {
//!   Mixin::Decorator(decorator) => decorator,
//!   Mixin::Applied(_) => unreachable!(),
//! };
//! decorator.apply(&mut realm, component)?;
//! ```
//!
//! The [`reflect`] module holds the helpers the decorators share: own key and descriptor
//! enumeration (string and symbol keys), a membership test that copes with polyfilled symbols,
//! descriptor object conversion and the default setter factory.

mod decorate;
mod error;
mod lazy;
mod meta;
mod mixin;
pub mod reflect;

pub use crate::decorate::decorate;
pub use crate::decorate::Decoration;
pub use crate::decorate::PendingDecorator;
pub use crate::error::DecoratorError;
pub use crate::lazy::lazy_initialize;
pub use crate::lazy::LazyField;
pub use crate::meta::Meta;
pub use crate::meta::MetaTable;
pub use crate::meta::TimeoutId;
pub use crate::mixin::apply_mixins;
pub use crate::mixin::mixin;
pub use crate::mixin::Mixin;
pub use crate::mixin::MixinDecorator;
