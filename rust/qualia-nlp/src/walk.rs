//! Dependency-tree walk primitives.
//!
//! Pattern extraction reduces to two queries against the tree: the first
//! ancestor of a token that carries an accepted dependency label and an
//! accepted part-of-speech tag, and the first child that does. A walk that
//! exhausts its candidates signals [`PatternNotFound`] — a recoverable,
//! per-evidence condition, not a failure of the engine.

use thiserror::Error;

use crate::token::{DepLabel, PosTag, TokenSequence};

/// No token satisfied the dependency walk's filters.
///
/// Callers record the evidence that produced this as unresolved and keep
/// going; it never aborts a generation run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("no token satisfies the dependency walk")]
pub struct PatternNotFound;

fn accepts(deps: &[DepLabel], pos: &[PosTag], dep: DepLabel, tag: PosTag) -> bool {
    deps.contains(&dep) && pos.contains(&tag)
}

/// First ancestor of `index` (nearest first) whose dependency label is in
/// `deps` and whose part-of-speech tag is in `pos`.
pub fn ancestor_matching(
    seq: &TokenSequence,
    index: usize,
    deps: &[DepLabel],
    pos: &[PosTag],
) -> Result<usize, PatternNotFound> {
    for ancestor in seq.ancestors(index) {
        let token = seq.get(ancestor).ok_or(PatternNotFound)?;
        if accepts(deps, pos, token.dep, token.pos) {
            return Ok(ancestor);
        }
    }
    Err(PatternNotFound)
}

/// First child of `index` (sentence order) whose dependency label is in
/// `deps` and whose part-of-speech tag is in `pos`.
pub fn child_matching(
    seq: &TokenSequence,
    index: usize,
    deps: &[DepLabel],
    pos: &[PosTag],
) -> Result<usize, PatternNotFound> {
    for child in seq.children(index) {
        let token = seq.get(child).ok_or(PatternNotFound)?;
        if accepts(deps, pos, token.dep, token.pos) {
            return Ok(child);
        }
    }
    Err(PatternNotFound)
}
