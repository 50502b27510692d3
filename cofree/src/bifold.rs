use std::cell::RefCell;
use std::marker::PhantomData;

use crate::trampoline::Trampoline;

/// A fold capability over shapes with two type parameters (an either-like
/// type, a pair-like type).
///
/// `bifold_left` is strict; `bifold_right` threads a trampolined accumulator
/// so implementations can defer work on large shapes.
pub trait Bifoldable {
    type Shape<A: 'static, B: 'static>: 'static;

    fn bifold_left<A: 'static, B: 'static, C>(
        fab: Self::Shape<A, B>,
        init: C,
        f: impl FnMut(C, A) -> C,
        g: impl FnMut(C, B) -> C,
    ) -> C;

    fn bifold_right<A: 'static, B: 'static, C: 'static>(
        fab: Self::Shape<A, B>,
        init: Trampoline<C>,
        f: impl FnMut(A, Trampoline<C>) -> Trampoline<C>,
        g: impl FnMut(B, Trampoline<C>) -> Trampoline<C>,
    ) -> Trampoline<C>;
}

/// Token for the composition of two bifoldable shapes: an outer `P` whose
/// two sides each hold an inner `Q` shape. Folding visits the innermost
/// values exactly once each.
pub struct Composed<P, Q>(PhantomData<P>, PhantomData<Q>);

impl<P: Bifoldable + 'static, Q: Bifoldable + 'static> Bifoldable for Composed<P, Q> {
    type Shape<A: 'static, B: 'static> = P::Shape<Q::Shape<A, B>, Q::Shape<A, B>>;

    fn bifold_left<A: 'static, B: 'static, C>(
        fab: Self::Shape<A, B>,
        init: C,
        f: impl FnMut(C, A) -> C,
        g: impl FnMut(C, B) -> C,
    ) -> C {
        // both sides of the outer shape fold with the same pair of
        // functions; the cell lets the two outer closures share them
        // (the borrows are strictly sequential, a fold never reenters)
        let fg = RefCell::new((f, g));
        P::bifold_left(
            fab,
            init,
            |c, inner| {
                let mut fg = fg.borrow_mut();
                let (f, g) = &mut *fg;
                Q::bifold_left(inner, c, |c, a| f(c, a), |c, b| g(c, b))
            },
            |c, inner| {
                let mut fg = fg.borrow_mut();
                let (f, g) = &mut *fg;
                Q::bifold_left(inner, c, |c, a| f(c, a), |c, b| g(c, b))
            },
        )
    }

    fn bifold_right<A: 'static, B: 'static, C: 'static>(
        fab: Self::Shape<A, B>,
        init: Trampoline<C>,
        f: impl FnMut(A, Trampoline<C>) -> Trampoline<C>,
        g: impl FnMut(B, Trampoline<C>) -> Trampoline<C>,
    ) -> Trampoline<C> {
        let fg = RefCell::new((f, g));
        P::bifold_right(
            fab,
            init,
            |inner, acc| {
                let mut fg = fg.borrow_mut();
                let (f, g) = &mut *fg;
                Q::bifold_right(inner, acc, |a, acc| f(a, acc), |b, acc| g(b, acc))
            },
            |inner, acc| {
                let mut fg = fg.borrow_mut();
                let (f, g) = &mut *fg;
                Q::bifold_right(inner, acc, |a, acc| f(a, acc), |b, acc| g(b, acc))
            },
        )
    }
}
