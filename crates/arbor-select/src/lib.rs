//! Arbor selectors
//!
//! Structural selector patterns over arbor-dom trees: tag, class, and
//! attribute predicates combined with descendant / direct-child
//! relations, plus pre-order query operations.

mod matcher;
mod pattern;

pub use matcher::{matches, query_all, query_first};
pub use pattern::{Combinator, Compound, ParseError, Pattern, SimpleSelector};
