#[derive(Clone)]
pub(crate) struct State {
    /// Raised while printing the gated attribute lines of a multi-line
    /// conditional open tag; keeps nested markup from rendering inline there.
    pub(crate) in_conditional_open_tag: bool,
}
