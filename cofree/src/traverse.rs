use crate::functor::{Functor, PartiallyApplied};
use crate::monad::Monad;

/// A branching capability that can thread an effect through itself: collapse
/// a shape of effectful values into a single effect producing the shape.
///
/// Elements are visited left to right as laid out by the shape, which fixes
/// the order in which folds observe children.
pub trait Traverse: Functor {
    fn sequence<M: Monad, A: 'static>(fa: Self::Shape<M::Shape<A>>) -> M::Shape<Self::Shape<A>>;
}

impl Traverse for Option<PartiallyApplied> {
    fn sequence<M: Monad, A: 'static>(fa: Option<M::Shape<A>>) -> M::Shape<Option<A>> {
        match fa {
            Some(ma) => M::map(ma, Some),
            None => M::pure(None),
        }
    }
}

impl Traverse for Vec<PartiallyApplied> {
    fn sequence<M: Monad, A: 'static>(fa: Vec<M::Shape<A>>) -> M::Shape<Vec<A>> {
        let mut acc = M::pure(Vec::with_capacity(fa.len()));
        for ma in fa {
            acc = M::bind(acc, move |mut xs| {
                M::bind(ma, move |x| {
                    xs.push(x);
                    M::pure(xs)
                })
            });
        }
        acc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_collects_in_order_and_short_circuits() {
        let all = <Vec<PartiallyApplied> as Traverse>::sequence::<Option<PartiallyApplied>, i32>(
            vec![Some(1), Some(2), Some(3)],
        );
        assert_eq!(all, Some(vec![1, 2, 3]));

        let missing = <Vec<PartiallyApplied> as Traverse>::sequence::<Option<PartiallyApplied>, i32>(
            vec![Some(1), None, Some(3)],
        );
        assert_eq!(missing, None);
    }
}
