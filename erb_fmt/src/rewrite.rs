//! The rewriter collaborator interface.
//!
//! Rewriters are named tree transforms that an external pipeline runs in
//! configured order around the layout pass. They take the tree by value and
//! return a tree instead of mutating fields in place, so their ordering
//! stays composable and each one is testable in isolation. The layout
//! engine itself never invokes them.

use crate::ast::Root;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RewritePhase {
    /// Runs on the parsed tree before layout.
    Pre,
    /// Runs on the re-parsed tree of the formatted output.
    Post,
}

pub trait Rewriter {
    fn name(&self) -> &str;

    fn phase(&self) -> RewritePhase;

    fn rewrite<'s>(&self, ast: Root<'s>) -> Root<'s>;
}
