//! Negative control: what single-path descent looks like without the
//! trampoline discipline.

use cofree::{Cofree, PartiallyApplied};

/// Recursive single-path descent. Call-stack depth grows with path length,
/// so deep structures exhaust the stack; [`Cofree::run`] is the iterative
/// replacement.
pub fn run_naive<A: Clone + 'static>(structure: Cofree<Option<PartiallyApplied>, A>) -> A {
    let head = structure.extract().clone();
    descend(structure);
    head
}

fn descend<A: Clone + 'static>(structure: Cofree<Option<PartiallyApplied>, A>) {
    if let Some(child) = structure.run_tail() {
        descend(child);
    }
}
