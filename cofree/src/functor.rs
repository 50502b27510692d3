/// An uninhabited type used to write capability instances for partially
/// applied type constructors.
///
/// Rust does not allow implementing a trait for `Option` by itself, only for
/// `Option<T>`. Instances are therefore written over the marker application
/// `Option<PartiallyApplied>`, with the real shape named by the trait's GAT:
///
/// ```rust
/// # use cofree::{Functor, PartiallyApplied};
/// let doubled = <Option<PartiallyApplied> as Functor>::map(Some(2), |n| n * 2);
/// assert_eq!(doubled, Some(4));
/// ```
#[derive(Clone, Debug)]
pub enum PartiallyApplied {}

/// A branching capability: some shape holding zero or more elements that can
/// be mapped over.
///
/// Implemented on marker tokens (see [`PartiallyApplied`]); the token is
/// passed as a type parameter wherever the capability is needed, which is the
/// static-dispatch rendition of an explicit capability dictionary. Tokens are
/// plain marker types, hence the `'static` supertrait.
pub trait Functor: 'static {
    /// the shape holding elements of type `X`
    type Shape<X: 'static>: 'static;

    /// Apply `f` to each element of a shape.
    fn map<A: 'static, B: 'static>(
        fa: Self::Shape<A>,
        f: impl FnMut(A) -> B + 'static,
    ) -> Self::Shape<B>;
}

/// Branching shapes that yield at most one child, e.g. an optional child.
///
/// This is the capability behind single-path descent: `run` and `run_tail`
/// follow the one possible child until none remains.
pub trait Linear: Functor {
    fn into_child<A: 'static>(fa: Self::Shape<A>) -> Option<A>;
}

/// A structure-preserving conversion from one branching shape to another,
/// valid at every element type.
///
/// Implementors are ordinary values (usually unit structs) with a single
/// generic method, so the conversion is forced to behave uniformly for every
/// `A` it is applied to.
pub trait NaturalTransformation<F: Functor, G: Functor> {
    fn apply<A: 'static>(&self, fa: F::Shape<A>) -> G::Shape<A>;
}

impl Functor for Option<PartiallyApplied> {
    type Shape<X: 'static> = Option<X>;

    fn map<A: 'static, B: 'static>(
        fa: Self::Shape<A>,
        f: impl FnMut(A) -> B + 'static,
    ) -> Self::Shape<B> {
        fa.map(f)
    }
}

impl Linear for Option<PartiallyApplied> {
    fn into_child<A: 'static>(fa: Option<A>) -> Option<A> {
        fa
    }
}

impl Functor for Vec<PartiallyApplied> {
    type Shape<X: 'static> = Vec<X>;

    fn map<A: 'static, B: 'static>(
        fa: Self::Shape<A>,
        f: impl FnMut(A) -> B + 'static,
    ) -> Self::Shape<B> {
        fa.into_iter().map(f).collect()
    }
}
