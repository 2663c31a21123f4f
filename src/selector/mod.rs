//! Selector data model and the algebra over it.
//!
//! This module provides the in-memory representation of CSS selectors and
//! the operations the preprocessor performs on them:
//!
//! - [`SimpleSelector`]: a single atomic selector (class, id, element,
//!   attribute, pseudo, negation, universal, `&`, interpolation)
//! - [`SimpleSequence`]: simple selectors concatenated without
//!   combinators, targeting one element (`a.foo#bar`)
//! - [`Sequence`]: simple sequences joined by combinators (`a > b c`)
//! - [`CommaSequence`]: a selector group (`a, b, c`)
//! - [`ExtendMap`]: the registered `@extend` directives
//! - [`weave`] / [`subweave`]: combinatorial interleaving of two
//!   sequences, preserving relative order
//!
//! ## Submodules
//!
//! - [`simple`]: simple selector variants, namespace and per-variant
//!   unification
//! - [`simple_sequence`]: compound selectors and their equality semantics
//! - [`sequence`]: combinator sequences, parent resolution, extension
//! - [`comma_sequence`]: selector groups
//! - [`extend`]: the extension map and subset lookup
//! - [`weave`]: the `weave`/`subweave` interleaving algorithm

pub mod comma_sequence;
pub mod extend;
pub mod sequence;
pub mod simple;
pub mod simple_sequence;
pub mod weave;

pub use comma_sequence::CommaSequence;
pub use extend::ExtendMap;
pub use sequence::{Combinator, Member, Sequence};
pub use simple::{unify_namespaces, Namespace, PseudoKind, SimpleSelector};
pub use simple_sequence::SimpleSequence;
pub use weave::{subweave, weave};
