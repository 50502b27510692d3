use crate::functor::{Functor, PartiallyApplied};
use crate::trampoline::Trampoline;

/// An effect capability: inject a pure value into the shape, and sequence a
/// shape-producing continuation after it.
///
/// `bind` is what gives effect types their short-circuiting behavior: a
/// terminal state (an absent optional, a failed result) never invokes the
/// continuation.
pub trait Monad: Functor {
    fn pure<A: 'static>(value: A) -> Self::Shape<A>;

    fn bind<A: 'static, B: 'static>(
        ma: Self::Shape<A>,
        f: impl FnOnce(A) -> Self::Shape<B> + 'static,
    ) -> Self::Shape<B>;
}

impl Functor for Trampoline<PartiallyApplied> {
    type Shape<X: 'static> = Trampoline<X>;

    fn map<A: 'static, B: 'static>(
        fa: Self::Shape<A>,
        f: impl FnMut(A) -> B + 'static,
    ) -> Self::Shape<B> {
        fa.map(f)
    }
}

impl Monad for Trampoline<PartiallyApplied> {
    fn pure<A: 'static>(value: A) -> Trampoline<A> {
        Trampoline::now(value)
    }

    fn bind<A: 'static, B: 'static>(
        ma: Trampoline<A>,
        f: impl FnOnce(A) -> Trampoline<B> + 'static,
    ) -> Trampoline<B> {
        ma.flat_map(f)
    }
}

impl Monad for Option<PartiallyApplied> {
    fn pure<A: 'static>(value: A) -> Option<A> {
        Some(value)
    }

    fn bind<A: 'static, B: 'static>(
        ma: Option<A>,
        f: impl FnOnce(A) -> Option<B> + 'static,
    ) -> Option<B> {
        ma.and_then(f)
    }
}
