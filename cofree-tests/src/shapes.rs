//! Capability instances used by the test suite: the concrete branching and
//! effect types the core deliberately does not ship.

use std::cell::Cell;
use std::marker::PhantomData;
use std::rc::Rc;

use cofree::{
    Bifoldable, Functor, Linear, Monad, NaturalTransformation, PartiallyApplied, Trampoline,
    Traverse,
};

/// Branching shape with exactly one child, for observing single forcing
/// steps over structures that never terminate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Id<A>(pub A);

impl Functor for Id<PartiallyApplied> {
    type Shape<X: 'static> = Id<X>;

    fn map<A: 'static, B: 'static>(
        fa: Self::Shape<A>,
        mut f: impl FnMut(A) -> B + 'static,
    ) -> Self::Shape<B> {
        Id(f(fa.0))
    }
}

impl Linear for Id<PartiallyApplied> {
    fn into_child<A: 'static>(fa: Id<A>) -> Option<A> {
        Some(fa.0)
    }
}

impl Traverse for Id<PartiallyApplied> {
    fn sequence<M: Monad, A: 'static>(fa: Id<M::Shape<A>>) -> M::Shape<Id<A>> {
        M::map(fa.0, Id)
    }
}

/// An either-like two-parameter shape for exercising bifoldable composition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Either<A, B> {
    Left(A),
    Right(B),
}

impl Bifoldable for Either<PartiallyApplied, PartiallyApplied> {
    type Shape<A: 'static, B: 'static> = Either<A, B>;

    fn bifold_left<A: 'static, B: 'static, C>(
        fab: Self::Shape<A, B>,
        init: C,
        mut f: impl FnMut(C, A) -> C,
        mut g: impl FnMut(C, B) -> C,
    ) -> C {
        match fab {
            Either::Left(a) => f(init, a),
            Either::Right(b) => g(init, b),
        }
    }

    fn bifold_right<A: 'static, B: 'static, C: 'static>(
        fab: Self::Shape<A, B>,
        init: Trampoline<C>,
        mut f: impl FnMut(A, Trampoline<C>) -> Trampoline<C>,
        mut g: impl FnMut(B, Trampoline<C>) -> Trampoline<C>,
    ) -> Trampoline<C> {
        match fab {
            Either::Left(a) => f(a, init),
            Either::Right(b) => g(b, init),
        }
    }
}

/// Trampoline layered with optional short-circuiting: the effect monad for
/// the `cata_m` scenarios (an OptionT-alike).
pub enum TrampolineOption {}

impl Functor for TrampolineOption {
    type Shape<X: 'static> = Trampoline<Option<X>>;

    fn map<A: 'static, B: 'static>(
        fa: Self::Shape<A>,
        mut f: impl FnMut(A) -> B + 'static,
    ) -> Self::Shape<B> {
        fa.map(move |opt| opt.map(|a| f(a)))
    }
}

impl Monad for TrampolineOption {
    fn pure<A: 'static>(value: A) -> Trampoline<Option<A>> {
        Trampoline::now(Some(value))
    }

    fn bind<A: 'static, B: 'static>(
        ma: Trampoline<Option<A>>,
        f: impl FnOnce(A) -> Trampoline<Option<B>> + 'static,
    ) -> Trampoline<Option<B>> {
        ma.flat_map(move |opt| match opt {
            Some(a) => f(a),
            None => Trampoline::now(None),
        })
    }
}

/// Lifts a plain trampolined value into [`TrampolineOption`].
#[derive(Clone, Copy)]
pub struct LiftOption;

impl NaturalTransformation<Trampoline<PartiallyApplied>, TrampolineOption> for LiftOption {
    fn apply<A: 'static>(&self, fa: Trampoline<A>) -> Trampoline<Option<A>> {
        fa.map(Some)
    }
}

/// Trampoline layered with error short-circuiting.
pub struct TrampolineResult<E>(PhantomData<E>);

impl<E: 'static> Functor for TrampolineResult<E> {
    type Shape<X: 'static> = Trampoline<Result<X, E>>;

    fn map<A: 'static, B: 'static>(
        fa: Self::Shape<A>,
        mut f: impl FnMut(A) -> B + 'static,
    ) -> Self::Shape<B> {
        fa.map(move |res| res.map(|a| f(a)))
    }
}

impl<E: 'static> Monad for TrampolineResult<E> {
    fn pure<A: 'static>(value: A) -> Trampoline<Result<A, E>> {
        Trampoline::now(Ok(value))
    }

    fn bind<A: 'static, B: 'static>(
        ma: Trampoline<Result<A, E>>,
        f: impl FnOnce(A) -> Trampoline<Result<B, E>> + 'static,
    ) -> Trampoline<Result<B, E>> {
        ma.flat_map(move |res| match res {
            Ok(a) => f(a),
            Err(e) => Trampoline::now(Err(e)),
        })
    }
}

/// Lifts a plain trampolined value into [`TrampolineResult`].
pub struct LiftResult<E>(PhantomData<E>);

impl<E> LiftResult<E> {
    pub fn new() -> Self {
        LiftResult(PhantomData)
    }
}

impl<E> Default for LiftResult<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Clone for LiftResult<E> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<E> Copy for LiftResult<E> {}

impl<E: 'static> NaturalTransformation<Trampoline<PartiallyApplied>, TrampolineResult<E>>
    for LiftResult<E>
{
    fn apply<A: 'static>(&self, fa: Trampoline<A>) -> Trampoline<Result<A, E>> {
        fa.map(Ok)
    }
}

/// Reshapes optional branching into list branching.
#[derive(Clone, Copy)]
pub struct OptionToVec;

impl NaturalTransformation<Option<PartiallyApplied>, Vec<PartiallyApplied>> for OptionToVec {
    fn apply<A: 'static>(&self, fa: Option<A>) -> Vec<A> {
        fa.into_iter().collect()
    }
}

/// Rewrites any optional branching instance to the empty one.
#[derive(Clone, Copy)]
pub struct Prune;

impl NaturalTransformation<Option<PartiallyApplied>, Option<PartiallyApplied>> for Prune {
    fn apply<A: 'static>(&self, _fa: Option<A>) -> Option<A> {
        None
    }
}

/// Shared invocation counter for observing how often generators and algebras
/// actually run.
#[derive(Clone, Default)]
pub struct SideEffect(Rc<Cell<usize>>);

impl SideEffect {
    pub fn increment(&self) {
        self.0.set(self.0.get() + 1);
    }

    pub fn count(&self) -> usize {
        self.0.get()
    }
}
