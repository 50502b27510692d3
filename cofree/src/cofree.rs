use std::rc::Rc;

use crate::functor::{Functor, Linear, NaturalTransformation, PartiallyApplied};
use crate::monad::Monad;
use crate::trampoline::Trampoline;
use crate::traverse::Traverse;

/// A corecursive, potentially infinite tree: a value at each node plus a
/// trampolined, capability-shaped collection of child nodes.
///
/// Only the head and explicitly forced tails are ever materialized, so a
/// structure may describe an infinite expansion. Forcing operations consume
/// the structure, mirroring how a [`Trampoline`] is consumed by running it.
///
/// ```rust
/// # use cofree::{Cofree, PartiallyApplied, Trampoline};
/// // a single-path structure counting 0..=3
/// let structure: Cofree<Option<PartiallyApplied>, u32> =
///     Cofree::unfold(0, |n| if n == 3 { None } else { Some(n + 1) });
///
/// let heads = structure
///     .cata(|head, children: Option<Vec<u32>>| {
///         let mut out = vec![head];
///         out.extend(children.into_iter().flatten());
///         Trampoline::now(out)
///     })
///     .run();
///
/// assert_eq!(heads, vec![0, 1, 2, 3]);
/// ```
pub struct Cofree<F: Functor, A: 'static> {
    head: A,
    tail: Trampoline<F::Shape<Cofree<F, A>>>,
}

impl<F: Functor, A: 'static> Cofree<F, A> {
    pub fn new(head: A, tail: Trampoline<F::Shape<Self>>) -> Self {
        Cofree { head, tail }
    }

    /// Build a structure corecursively from a seed.
    ///
    /// The node's head is the seed; its tail is a deferred trampoline that
    /// evaluates `generator(seed)` for the shape of next seeds and unfolds
    /// each of them in turn. The generator runs zero times until some
    /// forcing operation is called, and exactly once per node forced.
    pub fn unfold(seed: A, generator: impl Fn(A) -> F::Shape<A> + 'static) -> Self
    where
        A: Clone,
    {
        Self::unfold_shared(seed, Rc::new(generator))
    }

    fn unfold_shared(seed: A, generator: Rc<dyn Fn(A) -> F::Shape<A>>) -> Self
    where
        A: Clone,
    {
        let next_seed = seed.clone();
        Cofree {
            head: seed,
            tail: Trampoline::defer(move || {
                let children = generator(next_seed);
                Trampoline::now(F::map(children, move |s| {
                    Self::unfold_shared(s, Rc::clone(&generator))
                }))
            }),
        }
    }

    /// Comonadic extraction: borrow the head value.
    pub fn extract(&self) -> &A {
        &self.head
    }

    /// Rewrite every head through `f`, lazily: each level is transformed
    /// only when its tail is forced.
    pub fn map<B: 'static>(self, f: impl Fn(A) -> B + 'static) -> Cofree<F, B> {
        self.map_shared(Rc::new(f))
    }

    fn map_shared<B: 'static>(self, f: Rc<dyn Fn(A) -> B>) -> Cofree<F, B> {
        let Cofree { head, tail } = self;
        let head = f(head);
        Cofree {
            head,
            tail: tail
                .map(move |shape| F::map(shape, move |child| child.map_shared(Rc::clone(&f)))),
        }
    }

    /// Force exactly one tail step, returning the shape-wrapped children
    /// without recursing further.
    pub fn tail_forced(self) -> F::Shape<Self> {
        self.tail.run()
    }

    /// Force one step along the single-child path: the child if one exists.
    pub fn run_tail(self) -> Option<Self>
    where
        F: Linear,
    {
        F::into_child(self.tail.run())
    }

    /// Follow the single-child path to exhaustion and return the root head.
    ///
    /// This is an iterative loop over trampoline forces: each pass forces
    /// one tail and steps into the child, so descent depth never consumes
    /// call stack. Intermediate heads are discarded as their nodes are
    /// passed.
    pub fn run(self) -> A
    where
        F: Linear,
    {
        let Cofree { head, mut tail } = self;
        loop {
            match F::into_child(tail.run()) {
                Some(child) => tail = child.tail,
                None => return head,
            }
        }
    }

    /// Rewrite only the root node's shape instance, leaving deeper nodes as
    /// originally produced.
    pub fn map_branching_root<N>(self, nt: N) -> Self
    where
        N: NaturalTransformation<F, F> + 'static,
    {
        let Cofree { head, tail } = self;
        Cofree {
            head,
            tail: tail.map(move |shape| nt.apply(shape)),
        }
    }

    /// Rewrite every node's shape, transforming each node's direct children
    /// shape first and recursing through the rewritten shape.
    pub fn map_branching_s<G, N>(self, nt: N) -> Cofree<G, A>
    where
        G: Functor,
        N: NaturalTransformation<F, G> + Clone + 'static,
    {
        let Cofree { head, tail } = self;
        Cofree {
            head,
            tail: tail.map(move |shape| {
                let rewritten = nt.apply(shape);
                G::map(rewritten, move |child| child.map_branching_s(nt.clone()))
            }),
        }
    }

    /// Rewrite every node's shape, recursing through the source shape and
    /// transforming the result.
    pub fn map_branching_t<G, N>(self, nt: N) -> Cofree<G, A>
    where
        G: Functor,
        N: NaturalTransformation<F, G> + Clone + 'static,
    {
        let Cofree { head, tail } = self;
        Cofree {
            head,
            tail: tail.map(move |shape| {
                let inner_nt = nt.clone();
                let mapped = F::map(shape, move |child| child.map_branching_t(inner_nt.clone()));
                nt.apply(mapped)
            }),
        }
    }

    /// Fold the whole structure bottom-up into a single value.
    ///
    /// For each node the children are folded first (deferred behind the
    /// node's tail trampoline), the shape of trampolined child results is
    /// sequenced into one trampolined shape, and the algebra combines the
    /// head with that shape of sub-results. The algebra runs exactly once
    /// per node, in the order fixed by the shape's `sequence`, and the whole
    /// fold is a composition of trampoline steps: stack usage is bounded
    /// regardless of depth.
    pub fn cata<B: 'static>(
        self,
        algebra: impl Fn(A, F::Shape<B>) -> Trampoline<B> + 'static,
    ) -> Trampoline<B>
    where
        F: Traverse,
    {
        self.cata_shared(Rc::new(algebra))
    }

    fn cata_shared<B: 'static>(
        self,
        algebra: Rc<dyn Fn(A, F::Shape<B>) -> Trampoline<B>>,
    ) -> Trampoline<B>
    where
        F: Traverse,
    {
        let Cofree { head, tail } = self;
        tail.flat_map(move |children| {
            let child_alg = Rc::clone(&algebra);
            let folded = F::map(children, move |child| {
                child.cata_shared(Rc::clone(&child_alg))
            });
            F::sequence::<Trampoline<PartiallyApplied>, B>(folded)
                .flat_map(move |results| algebra(head, results))
        })
    }

    /// As [`Cofree::cata`], with the algebra running inside an effect monad
    /// `M` layered over the trampoline.
    ///
    /// `inclusion` lifts a plain trampolined value into `M`, letting the
    /// fold interleave trampoline steps with effect binds. A terminal effect
    /// state short-circuits through `M::bind` itself: once any node's
    /// sub-results resolve to the absent state, the algebra is not applied
    /// for that node or any node above it.
    pub fn cata_m<M, B, Alg, N>(self, algebra: Alg, inclusion: N) -> M::Shape<B>
    where
        F: Traverse,
        M: Monad,
        B: 'static,
        Alg: Fn(A, F::Shape<B>) -> M::Shape<B> + 'static,
        N: NaturalTransformation<Trampoline<PartiallyApplied>, M> + Clone + 'static,
    {
        self.cata_m_shared(Rc::new(algebra), inclusion)
    }

    fn cata_m_shared<M, B, N>(
        self,
        algebra: Rc<dyn Fn(A, F::Shape<B>) -> M::Shape<B>>,
        inclusion: N,
    ) -> M::Shape<B>
    where
        F: Traverse,
        M: Monad,
        B: 'static,
        N: NaturalTransformation<Trampoline<PartiallyApplied>, M> + Clone + 'static,
    {
        let Cofree { head, tail } = self;
        let lifted = inclusion.apply(tail);
        M::bind(lifted, move |children| {
            let child_alg = Rc::clone(&algebra);
            let child_incl = inclusion.clone();
            let folded = F::map(children, move |child| {
                child.cata_m_shared(Rc::clone(&child_alg), child_incl.clone())
            });
            M::bind(F::sequence::<M, B>(folded), move |results| {
                algebra(head, results)
            })
        })
    }
}
