//! Stack-safe corecursive structures and the recursion schemes over them.
//!
//! The building blocks: a [`Trampoline`] whose evaluation is driven by an
//! explicit loop, a [`Cofree`] tree holding a value at each node plus a
//! trampolined, capability-shaped collection of children, and capability
//! traits ([`Functor`], [`Traverse`], [`Monad`], [`Bifoldable`]) implemented
//! on marker tokens in the `Option<PartiallyApplied>` style.

mod bifold;
mod cobind;
mod cofree;
mod functor;
mod monad;
mod trampoline;
mod traverse;

pub use bifold::{Bifoldable, Composed};
pub use cobind::{cobinding, pull, pull_tail, Cobound};
pub use cofree::Cofree;
pub use functor::{Functor, Linear, NaturalTransformation, PartiallyApplied};
pub use monad::Monad;
pub use trampoline::Trampoline;
pub use traverse::Traverse;
