use cofree::{
    cobinding, pull, pull_tail, Bifoldable, Cofree, Composed, PartiallyApplied, Trampoline,
};
use proptest::prelude::*;

use crate::naive::run_naive;
use crate::shapes::{
    Either, Id, LiftOption, LiftResult, OptionToVec, Prune, SideEffect, TrampolineOption,
    TrampolineResult,
};

fn start_hundred() -> Cofree<Option<PartiallyApplied>, i32> {
    Cofree::unfold(0, |n| if n == 100 { None } else { Some(n + 1) })
}

fn counting_program(loops: &SideEffect, limit: i32) -> Cofree<Option<PartiallyApplied>, i32> {
    let loops = loops.clone();
    Cofree::unfold(0, move |n| {
        loops.increment();
        if n == limit {
            None
        } else {
            Some(n + 1)
        }
    })
}

fn cons(head: i32, rest: Option<Vec<i32>>) -> Vec<i32> {
    let mut out = vec![head];
    out.extend(rest.into_iter().flatten());
    out
}

fn collect_option(structure: Cofree<Option<PartiallyApplied>, i32>) -> Vec<i32> {
    structure
        .cata(|head, children: Option<Vec<i32>>| Trampoline::now(cons(head, children)))
        .run()
}

fn collect_vec(structure: Cofree<Vec<PartiallyApplied>, i32>) -> Vec<i32> {
    structure
        .cata(|head, children: Vec<Vec<i32>>| {
            let mut out = vec![head];
            out.extend(children.into_iter().flatten());
            Trampoline::now(out)
        })
        .run()
}

#[test]
fn unfold_invokes_the_generator_zero_times() {
    let effect = SideEffect::default();
    let counter = effect.clone();
    let structure: Cofree<Id<PartiallyApplied>, i32> = Cofree::unfold(0, move |n| {
        counter.increment();
        Id(n + 1)
    });
    assert_eq!(effect.count(), 0);
    drop(structure);
    assert_eq!(effect.count(), 0);
}

#[test]
fn tail_forced_evaluates_one_step_and_returns() {
    let effect = SideEffect::default();
    let counter = effect.clone();
    let structure: Cofree<Id<PartiallyApplied>, i32> = Cofree::unfold(0, move |n| {
        counter.increment();
        Id(n + 1)
    });
    assert_eq!(effect.count(), 0);
    let Id(child) = structure.tail_forced();
    assert_eq!(effect.count(), 1);
    assert_eq!(*child.extract(), 1);
}

#[test]
fn run_tail_runs_once_and_returns() {
    let effect = SideEffect::default();
    let counter = effect.clone();
    let structure: Cofree<Id<PartiallyApplied>, i32> = Cofree::unfold(0, move |n| {
        counter.increment();
        Id(n)
    });
    assert_eq!(effect.count(), 0);
    let child = structure.run_tail();
    assert_eq!(effect.count(), 1);
    assert_eq!(child.map(|c| *c.extract()), Some(0));
}

#[test]
fn run_folds_until_completion() {
    let effect = SideEffect::default();
    let result = counting_program(&effect, 5).run();
    assert_eq!(effect.count(), 6);
    assert_eq!(result, 0);
}

#[test]
fn run_is_stack_safe_at_depth() {
    let effect = SideEffect::default();
    let result = counting_program(&effect, 10_000).run();
    assert_eq!(effect.count(), 10_001);
    assert_eq!(result, 0);
}

// stack overflow aborts the process rather than unwinding, so this cannot be
// part of the normal suite; run with --ignored to watch the naive descent die
#[test]
#[ignore]
fn run_naive_overflows_on_deep_structures() {
    let effect = SideEffect::default();
    let structure = counting_program(&effect, 10_000_000);
    run_naive(structure);
}

#[test]
fn cata_collects_heads_in_order() {
    assert_eq!(
        collect_option(start_hundred()),
        (0..=100).collect::<Vec<i32>>()
    );
}

#[test]
fn cata_is_stack_safe_at_depth() {
    let structure: Cofree<Option<PartiallyApplied>, i64> =
        Cofree::unfold(0, |n| if n == 10_000 { None } else { Some(n + 1) });
    let sum = structure
        .cata(|head, children: Option<i64>| Trampoline::now(head + children.unwrap_or(0)))
        .run();
    assert_eq!(sum, 50_005_000);
}

#[test]
fn cata_visits_list_children_left_to_right() {
    // heap-numbered binary tree: children of n are 2n+1 and 2n+2
    let tree: Cofree<Vec<PartiallyApplied>, i32> = Cofree::unfold(0, |n| {
        if n >= 3 {
            vec![]
        } else {
            vec![2 * n + 1, 2 * n + 2]
        }
    });
    assert_eq!(collect_vec(tree), vec![0, 1, 3, 4, 2, 5, 6]);
}

#[test]
fn cata_m_folds_and_short_circuits() {
    let folder = |head: i32, children: Option<Vec<i32>>| {
        if head <= 100 {
            Trampoline::now(Some(cons(head, children)))
        } else {
            Trampoline::now(None)
        }
    };

    let cata_hundred = start_hundred()
        .cata_m::<TrampolineOption, Vec<i32>, _, _>(folder, LiftOption)
        .run();
    assert_eq!(cata_hundred, Some((0..=100).collect::<Vec<i32>>()));

    // one extra node grafted above the same structure
    let hundred_one: Cofree<Option<PartiallyApplied>, i32> =
        Cofree::new(101, Trampoline::now(Some(start_hundred())));
    let cata_hundred_one = hundred_one
        .cata_m::<TrampolineOption, Vec<i32>, _, _>(folder, LiftOption)
        .run();
    assert_eq!(cata_hundred_one, None);
}

#[test]
fn cata_m_short_circuits_the_algebra_itself() {
    let applications = SideEffect::default();
    let apps = applications.clone();
    let folder = move |head: i32, children: Option<Vec<i32>>| {
        apps.increment();
        if head <= 100 {
            Trampoline::now(Some(cons(head, children)))
        } else {
            Trampoline::now(None)
        }
    };

    // deepest node has head 101, so the very first (bottom-up) application
    // fails and no ancestor's algebra may run
    let structure: Cofree<Option<PartiallyApplied>, i32> =
        Cofree::unfold(0, |n| if n == 101 { None } else { Some(n + 1) });
    let result = structure
        .cata_m::<TrampolineOption, Vec<i32>, _, _>(folder, LiftOption)
        .run();
    assert_eq!(result, None);
    assert_eq!(applications.count(), 1);
}

#[test]
fn cata_m_propagates_errors() {
    let folder = |head: i32, children: Option<Vec<i32>>| {
        if head == 10 {
            Trampoline::now(Err("limit reached"))
        } else {
            Trampoline::now(Ok(cons(head, children)))
        }
    };
    let structure: Cofree<Option<PartiallyApplied>, i32> =
        Cofree::unfold(0, |n| if n == 10 { None } else { Some(n + 1) });
    let result = structure
        .cata_m::<TrampolineResult<&'static str>, Vec<i32>, _, _>(folder, LiftResult::new())
        .run();
    assert_eq!(result, Err("limit reached"));
}

#[test]
fn map_branching_root_rewrites_only_the_root() {
    let pruned = start_hundred().map_branching_root(Prune);
    assert_eq!(collect_option(pruned), vec![0]);
}

#[test]
fn map_branching_s_and_t_recur_over_every_node() {
    let mapped_s: Cofree<Vec<PartiallyApplied>, i32> =
        start_hundred().map_branching_s(OptionToVec);
    let mapped_t: Cofree<Vec<PartiallyApplied>, i32> =
        start_hundred().map_branching_t(OptionToVec);
    let expected: Vec<i32> = (0..=100).collect();
    assert_eq!(collect_vec(mapped_s), expected);
    assert_eq!(collect_vec(mapped_t), expected);
}

#[test]
fn map_rewrites_heads_lazily() {
    let effect = SideEffect::default();
    let doubled = counting_program(&effect, 5).map(|n| n * 2);
    assert_eq!(effect.count(), 0);
    assert_eq!(collect_option(doubled), vec![0, 2, 4, 6, 8, 10]);
}

#[test]
fn cobinding_pulls_in_program_order() {
    let loops = SideEffect::default();
    let result = cobinding(|| {
        pull(counting_program(&loops, 10)).bind(|value| {
            pull_tail(counting_program(&loops, 10)).map(move |next| {
                let next_head = next.map(|c| *c.extract()).unwrap_or(value);
                value + next_head
            })
        })
    });
    assert_eq!(result, 1);
    // eleven generator calls for the full run, one for the single step
    assert_eq!(loops.count(), 12);
}

type EitherShape = Either<PartiallyApplied, PartiallyApplied>;
type Nested = Either<Either<i32, i32>, Either<i32, i32>>;

fn innermost(nested: &Nested) -> i32 {
    match nested {
        Either::Left(Either::Left(x))
        | Either::Left(Either::Right(x))
        | Either::Right(Either::Left(x))
        | Either::Right(Either::Right(x)) => *x,
    }
}

fn arb_nested() -> impl Strategy<Value = Nested> {
    prop_oneof![
        any::<i32>().prop_map(|x| Either::Left(Either::Left(x))),
        any::<i32>().prop_map(|x| Either::Left(Either::Right(x))),
        any::<i32>().prop_map(|x| Either::Right(Either::Left(x))),
        any::<i32>().prop_map(|x| Either::Right(Either::Right(x))),
    ]
}

proptest! {
    #[test]
    fn composed_bifold_applies_the_combining_fn_once(nested in arb_nested()) {
        let expected = innermost(&nested) as i64;

        let left = Composed::<EitherShape, EitherShape>::bifold_left(
            nested.clone(),
            0i64,
            |c, a| c + a as i64,
            |c, b| c + b as i64,
        );
        prop_assert_eq!(left, expected);

        let right = Composed::<EitherShape, EitherShape>::bifold_right(
            nested,
            Trampoline::now(0i64),
            |a, acc| acc.map(move |c| c + a as i64),
            |b, acc| acc.map(move |c| c + b as i64),
        )
        .run();
        prop_assert_eq!(right, expected);
    }

    #[test]
    fn run_invokes_the_generator_once_per_node(limit in 0i32..200) {
        let effect = SideEffect::default();
        let result = counting_program(&effect, limit).run();
        prop_assert_eq!(result, 0);
        prop_assert_eq!(effect.count(), limit as usize + 1);
    }

    #[test]
    fn cata_collects_heads_at_any_depth(limit in 0i32..300) {
        let structure: Cofree<Option<PartiallyApplied>, i32> =
            Cofree::unfold(0, move |n| if n == limit { None } else { Some(n + 1) });
        prop_assert_eq!(collect_option(structure), (0..=limit).collect::<Vec<i32>>());
    }
}
