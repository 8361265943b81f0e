use super::{ResolvedPattern, RoutePattern};

/// result of matching a [`RoutePattern`] against the stop index
#[derive(Debug, Clone)]
pub enum AssembledPattern<'a> {
    /// two or more stops have coordinates
    Resolved(ResolvedPattern<'a>),
    /// fewer than two stops have coordinates, so no geometry can be computed
    Unresolved(RoutePattern),
}
