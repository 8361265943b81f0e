mod assembled_pattern;
mod pattern_ops;
mod resolved_pattern;
mod route_pattern;

pub use assembled_pattern::AssembledPattern;
pub use pattern_ops::{assemble_patterns, resolve_pattern};
pub use resolved_pattern::ResolvedPattern;
pub use route_pattern::RoutePattern;
