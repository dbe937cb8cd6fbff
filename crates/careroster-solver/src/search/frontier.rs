//! Splitting the search tree into subtrees for the workers.

use super::state::{Choice, SearchState};
use super::SearchOrder;
use crate::encoder::EncodedModel;

/// Decisions leading from the root to a subtree.
pub(crate) type Subtree = Vec<(usize, Choice)>;

/// Deepens the tree one level at a time until there are at least `target`
/// subtrees or every leaf is a complete assignment.
///
/// Subtrees come out in the order a single depth-first search would reach
/// them. Branches that fail forward checking are dropped, so an empty
/// result means no solution exists below `state`.
pub(crate) fn split(
    state: &mut SearchState,
    model: &EncodedModel<'_>,
    order: &SearchOrder,
    target: usize,
) -> Vec<Subtree> {
    let mut subtrees = vec![Subtree::new()];
    let mut depth = 0;
    while subtrees.len() < target && depth < model.visit_count() {
        depth += 1;
        let mut next = Vec::new();
        let deeper = expand(state, model, order, depth, &mut Subtree::new(), &mut next);
        subtrees = next;
        if !deeper {
            break;
        }
    }
    subtrees
}

/// Collects the nodes at `depth` below the current path. Returns true if
/// any of them still has open visits.
fn expand(
    state: &mut SearchState,
    model: &EncodedModel<'_>,
    order: &SearchOrder,
    depth: usize,
    path: &mut Subtree,
    out: &mut Vec<Subtree>,
) -> bool {
    let Some(visit) = state.select_visit(order) else {
        out.push(path.clone());
        return false;
    };
    if path.len() == depth {
        out.push(path.clone());
        return true;
    }

    let mut deeper = false;
    for choice in state.ordered_choices(model, order, visit) {
        let mark = state.domains.mark();
        if state.apply(model, visit, choice) {
            path.push((visit, choice));
            deeper |= expand(state, model, order, depth, path, out);
            path.pop();
        }
        state.retract(model, visit, choice, mark);
    }
    deeper
}
