//! # PCSS — preprocessor selector engine
//!
//! The selector core of a CSS preprocessor: the in-memory representation
//! of CSS selectors and the operations a preprocessor performs on them —
//! nesting resolution for the `&` parent reference, selector unification,
//! and `@extend` expansion. This crate provides:
//!
//! - **Parsing**: Convert selector source text into a structured
//!   [`CommaSequence`](selector::CommaSequence)
//! - **Parent resolution**: Rewrite `&` references against the enclosing
//!   rule's selector, distributing over commas
//! - **Extension**: Expand selectors against registered `@extend`
//!   directives, including the `weave` interleaving of ancestor paths
//!   and extend-loop detection
//!
//! ## Quick Start
//!
//! ```rust
//! use pcss::parse_selector;
//!
//! let child = parse_selector("&.active, .icon").unwrap();
//! let parent = parse_selector("nav a").unwrap();
//!
//! let resolved = child.resolve_parent_refs(Some(&parent)).unwrap();
//! assert_eq!(resolved.to_string(), "nav a.active, nav a .icon");
//! ```
//!
//! Extension rewrites every selector matching a target so it also
//! matches the extender:
//!
//! ```rust
//! use pcss::{parse_selector, ExtendMap, SimpleSelector};
//!
//! let sheet = parse_selector("button.error").unwrap();
//!
//! let mut extends = ExtendMap::new();
//! let extender = parse_selector(".serious").unwrap().members.remove(0);
//! extends
//!     .insert(vec![SimpleSelector::class("error")], extender)
//!     .unwrap();
//!
//! let expanded = sheet.extend(&extends).unwrap();
//! assert_eq!(expanded.to_string(), "button.error, button.serious");
//! ```
//!
//! ## Supported Selector Syntax
//!
//! - Type, class, id, universal: `a`, `.foo`, `#bar`, `*`
//! - Namespaces: `svg|rect`, `*|rect`, `|rect`
//! - Attributes: `[href]`, `[rel=next]`, `[lang|=en]`
//! - Pseudo-classes and -elements: `:hover`, `:nth-child(2)`, `::before`
//! - Negation: `:not(.foo)`
//! - Combinators: descendant, `>`, `+`, `~`
//! - Parent reference: `&`, `&.foo`
//! - Interpolation: `.item-#{$i}` (captured as an opaque script node)
//!
//! ## Preconditions
//!
//! Unification and extension require fully resolved selectors: any
//! remaining `&` or `#{...}` aborts with an internal error. Resolve
//! parent references (and let the script engine substitute
//! interpolation) first.
//!
//! ## Modules
//!
//! - [`selector`]: the selector data model and algebra
//! - [`parser`]: selector parsing
//! - [`tokens`]: token streams and opaque script nodes
//! - [`error`]: error types

pub mod error;
pub mod parser;
pub mod selector;
pub mod tokens;

pub use error::{PcssError, Result};
pub use parser::parse_selector;
pub use selector::{
    subweave, unify_namespaces, weave, Combinator, CommaSequence, ExtendMap, Member, Namespace,
    PseudoKind, Sequence, SimpleSelector, SimpleSequence,
};
pub use tokens::{ScriptNode, Token};
