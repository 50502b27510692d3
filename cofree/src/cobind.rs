//! Binding-style sequencing of extractions from corecursive structures.
//!
//! Sugar over repeated [`Cofree::run`]/[`Cofree::run_tail`]: each pull forces
//! evaluation up to the point needed for that call, in program order, and the
//! block's final expression becomes the bound result. No evaluation semantics
//! beyond `run`/`run_tail` are introduced.
//!
//! ```rust
//! # use cofree::{cobinding, pull, Cofree, PartiallyApplied};
//! let result = cobinding(|| {
//!     let program: Cofree<Option<PartiallyApplied>, u32> =
//!         Cofree::unfold(0, |n| if n == 5 { None } else { Some(n + 1) });
//!     pull(program).map(|value| value + 1)
//! });
//! assert_eq!(result, 1);
//! ```

use crate::cofree::Cofree;
use crate::functor::Linear;

/// A value pulled out of a corecursive structure, available to subsequent
/// pulls in the same binding block.
pub struct Cobound<A>(A);

/// Pull a value out by running the structure's single-child path to
/// exhaustion. Forces eagerly, at the point of the call.
pub fn pull<F: Linear, A: 'static>(structure: Cofree<F, A>) -> Cobound<A> {
    Cobound(structure.run())
}

/// Pull the structure one step forward: its optional child. Forces exactly
/// one step, at the point of the call.
pub fn pull_tail<F: Linear, A: 'static>(structure: Cofree<F, A>) -> Cobound<Option<Cofree<F, A>>> {
    Cobound(structure.run_tail())
}

impl<A> Cobound<A> {
    /// Feed the pulled value to the next step of the block.
    pub fn bind<B>(self, f: impl FnOnce(A) -> Cobound<B>) -> Cobound<B> {
        f(self.0)
    }

    pub fn map<B>(self, f: impl FnOnce(A) -> B) -> Cobound<B> {
        Cobound(f(self.0))
    }

    /// The block's final expression.
    pub fn yields(self) -> A {
        self.0
    }
}

/// Run a binding block to its final [`Cobound`] and unwrap it.
pub fn cobinding<R>(block: impl FnOnce() -> Cobound<R>) -> R {
    block().yields()
}
