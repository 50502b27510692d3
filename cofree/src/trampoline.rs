use std::any::Any;
use std::marker::PhantomData;

/// A lazily evaluated computation whose evaluation is driven by an explicit
/// loop, so that composition chains of any length run in constant stack space.
///
/// A trampoline is either already resolved (`now`), deferred behind a thunk
/// (`defer`), or a composition of a source trampoline with a continuation
/// (`map`/`flat_map`). Nothing is evaluated until [`Trampoline::run`] is
/// called, and a trampoline is consumed by running it.
///
/// ```rust
/// # use cofree::Trampoline;
/// let mut t = Trampoline::now(0u64);
/// for _ in 0..100_000 {
///     t = t.map(|n| n + 1);
/// }
/// // forcing a chain this long would overflow the call stack if `run`
/// // recursed per composition step
/// assert_eq!(t.run(), 100_000);
/// ```
pub struct Trampoline<A> {
    step: Step,
    _out: PhantomData<fn() -> A>,
}

/// Internal machine state. Intermediate values are type-erased so that a
/// single continuation stack can hold the heterogeneous stages of a
/// `flat_map` chain; the typed wrapper guarantees each continuation is only
/// ever fed the value it was built for.
enum Step {
    Now(Box<dyn Any>),
    Defer(Box<dyn FnOnce() -> Step>),
    Bind {
        source: Box<Step>,
        cont: Box<dyn FnOnce(Box<dyn Any>) -> Step>,
    },
}

impl<A: 'static> Trampoline<A> {
    /// An already-resolved trampoline.
    pub fn now(value: A) -> Self {
        Trampoline::wrap(Step::Now(Box::new(value)))
    }

    /// A trampoline that evaluates `thunk` when forced. The thunk does not
    /// run at construction time.
    pub fn defer(thunk: impl FnOnce() -> Trampoline<A> + 'static) -> Self {
        Trampoline::wrap(Step::Defer(Box::new(move || thunk().step)))
    }

    /// "Evaluate this, then feed the result to `f`." Builds a new trampoline
    /// without performing any evaluation.
    pub fn flat_map<B: 'static>(
        self,
        f: impl FnOnce(A) -> Trampoline<B> + 'static,
    ) -> Trampoline<B> {
        Trampoline::wrap(Step::Bind {
            source: Box::new(self.step),
            cont: Box::new(move |erased| f(unerase::<A>(erased)).step),
        })
    }

    /// "Evaluate this, then apply `f` to the result."
    pub fn map<B: 'static>(self, f: impl FnOnce(A) -> B + 'static) -> Trampoline<B> {
        self.flat_map(move |a| Trampoline::now(f(a)))
    }

    /// Force the computation to its final value.
    ///
    /// This is an iterative work-list loop: pending continuations are pushed
    /// onto an explicit stack and popped as their inputs resolve, so stack
    /// usage is independent of how many compositions and deferrals the
    /// trampoline contains. A panic raised by a thunk propagates to the
    /// caller; nothing is caught or retried here.
    pub fn run(self) -> A {
        let mut conts: Vec<Box<dyn FnOnce(Box<dyn Any>) -> Step>> = Vec::new();
        let mut current = self.step;
        loop {
            current = match current {
                Step::Now(value) => match conts.pop() {
                    Some(cont) => cont(value),
                    None => return unerase::<A>(value),
                },
                Step::Defer(thunk) => thunk(),
                Step::Bind { source, cont } => {
                    conts.push(cont);
                    *source
                }
            };
        }
    }

    fn wrap(step: Step) -> Self {
        Trampoline {
            step,
            _out: PhantomData,
        }
    }
}

fn unerase<A: 'static>(value: Box<dyn Any>) -> A {
    match value.downcast::<A>() {
        Ok(value) => *value,
        // continuations are only ever paired with the source they were
        // built from, so each one is fed the type it expects
        Err(_) => unreachable!("trampoline step resolved to a value of the wrong type"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn defer_is_lazy() {
        let ran = Rc::new(Cell::new(false));
        let flag = Rc::clone(&ran);
        let t = Trampoline::defer(move || {
            flag.set(true);
            Trampoline::now(1)
        });
        assert!(!ran.get());
        assert_eq!(t.run(), 1);
        assert!(ran.get());
    }

    #[test]
    fn deep_flat_map_chain() {
        let mut t = Trampoline::now(0u64);
        for _ in 0..100_000 {
            t = t.flat_map(|n| Trampoline::now(n + 1));
        }
        assert_eq!(t.run(), 100_000);
    }

    #[test]
    fn deep_defer_chain() {
        fn countdown(n: u64, acc: u64) -> Trampoline<u64> {
            if n == 0 {
                Trampoline::now(acc)
            } else {
                Trampoline::defer(move || countdown(n - 1, acc + 1))
            }
        }
        assert_eq!(countdown(1_000_000, 0).run(), 1_000_000);
    }

    #[test]
    fn nested_binds_resolve_in_order() {
        let t = Trampoline::now(1)
            .flat_map(|a| Trampoline::defer(move || Trampoline::now(a + 1)).map(|b| b * 10));
        assert_eq!(t.run(), 20);
    }
}
