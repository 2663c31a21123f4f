//! Simple selectors and unification.
//!
//! A simple selector is a single condition on one element. Unification
//! answers "can these two conditions hold for the same element, and what
//! is the combined condition?" — the building block the weaver and the
//! extension engine use to merge selectors.

use std::fmt;

use crate::error::{PcssError, Result};
use crate::tokens::{strip_tokens, tokens_to_string, ScriptNode, Token};

/// An optional selector namespace.
///
/// `None` means unspecified (compatible with anything), `Some([""])` is
/// the explicit no-namespace form (`|foo`), and `Some(["*"])` is the
/// any-namespace wildcard (`*|foo`).
pub type Namespace = Option<Vec<Token>>;

/// Whether a pseudo selector is a pseudo-class (`:hover`) or a
/// pseudo-element (`::before`).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PseudoKind {
    Class,
    Element,
}

/// A single atomic selector.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SimpleSelector {
    /// The `&` marker, replaced by the ambient selector during nesting
    /// resolution.
    Parent,
    Class {
        name: Vec<Token>,
    },
    Id {
        name: Vec<Token>,
    },
    Universal {
        namespace: Namespace,
    },
    Element {
        name: Vec<Token>,
        namespace: Namespace,
    },
    Attribute {
        name: Vec<Token>,
        namespace: Namespace,
        /// Comparison operator (`=`, `~=`, `|=`, `^=`, `$=`, `*=`).
        /// When absent the attribute only needs to exist, and `value`
        /// is absent too.
        op: Option<String>,
        value: Option<Vec<Token>>,
    },
    Pseudo {
        kind: PseudoKind,
        name: Vec<Token>,
        arg: Option<Vec<Token>>,
    },
    Negation {
        inner: Box<SimpleSelector>,
    },
    /// A bare `#{...}` standing in for a selector. Must be resolved by
    /// the script engine before any algebra runs.
    Interpolation {
        script: ScriptNode,
    },
}

/// Reconciles two optional namespaces under wildcard rules.
///
/// Returns `(result, accepted)`; when `accepted` is false the two
/// namespaces are incompatible and the result is meaningless.
pub fn unify_namespaces(n1: &Namespace, n2: &Namespace) -> (Namespace, bool) {
    if n1 == n2 {
        return (n1.clone(), true);
    }
    if is_any_namespace(n1) {
        return (n2.clone(), true);
    }
    if is_any_namespace(n2) {
        return (n1.clone(), true);
    }
    match (n1, n2) {
        (None, _) => (n2.clone(), true),
        (_, None) => (n1.clone(), true),
        _ => (None, false),
    }
}

fn is_any_namespace(ns: &Namespace) -> bool {
    match ns {
        Some(tokens) => matches!(tokens.as_slice(), [Token::Literal(s)] if s == "*"),
        None => false,
    }
}

impl SimpleSelector {
    pub fn class(name: &str) -> Self {
        SimpleSelector::Class {
            name: vec![Token::Literal(name.to_string())],
        }
    }

    pub fn id(name: &str) -> Self {
        SimpleSelector::Id {
            name: vec![Token::Literal(name.to_string())],
        }
    }

    pub fn element(name: &str) -> Self {
        SimpleSelector::Element {
            name: vec![Token::Literal(name.to_string())],
            namespace: None,
        }
    }

    pub fn universal() -> Self {
        SimpleSelector::Universal { namespace: None }
    }

    pub fn pseudo_class(name: &str) -> Self {
        SimpleSelector::Pseudo {
            kind: PseudoKind::Class,
            name: vec![Token::Literal(name.to_string())],
            arg: None,
        }
    }

    pub fn pseudo_element(name: &str) -> Self {
        SimpleSelector::Pseudo {
            kind: PseudoKind::Element,
            name: vec![Token::Literal(name.to_string())],
            arg: None,
        }
    }

    /// Fuses `self` into `sels`, the member list of a simple sequence.
    ///
    /// Returns `Ok(None)` when the two cannot target the same element.
    /// `Parent` and `Interpolation` must be resolved before unification
    /// and abort with an internal error.
    pub fn unify(&self, sels: &[SimpleSelector]) -> Result<Option<Vec<SimpleSelector>>> {
        match self {
            SimpleSelector::Parent => {
                Err(PcssError::internal("Cannot unify parent selectors."))
            }
            SimpleSelector::Interpolation { .. } => {
                Err(PcssError::internal("Cannot unify interpolation selectors."))
            }
            SimpleSelector::Id { .. } => {
                let conflict = sels
                    .iter()
                    .any(|s| matches!(s, SimpleSelector::Id { .. }) && s != self);
                if conflict {
                    Ok(None)
                } else {
                    Ok(Some(self.unify_default(sels)))
                }
            }
            SimpleSelector::Pseudo {
                kind: PseudoKind::Element,
                ..
            } => {
                let conflict = sels.iter().any(|s| {
                    matches!(
                        s,
                        SimpleSelector::Pseudo {
                            kind: PseudoKind::Element,
                            ..
                        }
                    ) && s != self
                });
                if conflict {
                    Ok(None)
                } else {
                    Ok(Some(self.unify_default(sels)))
                }
            }
            SimpleSelector::Universal { namespace } => Ok(self.unify_universal(namespace, sels)),
            SimpleSelector::Element { name, namespace } => {
                Ok(self.unify_element(name, namespace, sels))
            }
            _ => Ok(Some(self.unify_default(sels))),
        }
    }

    /// The shared fusion rule: keep an equal member, otherwise slot in
    /// before a trailing pseudo-element, otherwise append.
    fn unify_default(&self, sels: &[SimpleSelector]) -> Vec<SimpleSelector> {
        if sels.contains(self) {
            return sels.to_vec();
        }
        let mut out = sels.to_vec();
        if matches!(
            out.last(),
            Some(SimpleSelector::Pseudo {
                kind: PseudoKind::Element,
                ..
            })
        ) {
            let last = out.len() - 1;
            out.insert(last, self.clone());
        } else {
            out.push(self.clone());
        }
        out
    }

    fn unify_universal(
        &self,
        namespace: &Namespace,
        sels: &[SimpleSelector],
    ) -> Option<Vec<SimpleSelector>> {
        match sels.first() {
            Some(SimpleSelector::Universal { namespace: ns2 }) => {
                let (ns, ok) = unify_namespaces(namespace, ns2);
                if !ok {
                    return None;
                }
                let mut out = sels.to_vec();
                out[0] = SimpleSelector::Universal { namespace: ns };
                Some(out)
            }
            Some(SimpleSelector::Element {
                name,
                namespace: ns2,
            }) => {
                let (ns, ok) = unify_namespaces(namespace, ns2);
                if !ok {
                    return None;
                }
                let mut out = sels.to_vec();
                out[0] = SimpleSelector::Element {
                    name: name.clone(),
                    namespace: ns,
                };
                Some(out)
            }
            None => Some(vec![self.clone()]),
            Some(_) => {
                // A universal in the default or any namespace adds
                // nothing to a sequence that already has members.
                if namespace.is_none() || is_any_namespace(namespace) {
                    Some(sels.to_vec())
                } else {
                    let mut out = Vec::with_capacity(sels.len() + 1);
                    out.push(self.clone());
                    out.extend(sels.iter().cloned());
                    Some(out)
                }
            }
        }
    }

    fn unify_element(
        &self,
        name: &[Token],
        namespace: &Namespace,
        sels: &[SimpleSelector],
    ) -> Option<Vec<SimpleSelector>> {
        match sels.first() {
            Some(SimpleSelector::Universal { namespace: ns2 }) => {
                let (ns, ok) = unify_namespaces(namespace, ns2);
                if !ok {
                    return None;
                }
                let mut out = sels.to_vec();
                out[0] = SimpleSelector::Element {
                    name: name.to_vec(),
                    namespace: ns,
                };
                Some(out)
            }
            Some(SimpleSelector::Element {
                name: name2,
                namespace: ns2,
            }) => {
                if name != name2.as_slice() {
                    return None;
                }
                let (ns, ok) = unify_namespaces(namespace, ns2);
                if !ok {
                    return None;
                }
                let mut out = sels.to_vec();
                out[0] = SimpleSelector::Element {
                    name: name.to_vec(),
                    namespace: ns,
                };
                Some(out)
            }
            _ => {
                let mut out = Vec::with_capacity(sels.len() + 1);
                out.push(self.clone());
                out.extend(sels.iter().cloned());
                Some(out)
            }
        }
    }

    /// The canonical token form of this selector.
    pub fn to_tokens(&self) -> Vec<Token> {
        match self {
            SimpleSelector::Parent => vec![Token::Literal("&".to_string())],
            SimpleSelector::Class { name } => {
                let mut out = vec![Token::Literal(".".to_string())];
                out.extend(name.iter().cloned());
                out
            }
            SimpleSelector::Id { name } => {
                let mut out = vec![Token::Literal("#".to_string())];
                out.extend(name.iter().cloned());
                out
            }
            SimpleSelector::Universal { namespace } => {
                let mut out = namespace_tokens(namespace);
                out.push(Token::Literal("*".to_string()));
                out
            }
            SimpleSelector::Element { name, namespace } => {
                let mut out = namespace_tokens(namespace);
                out.extend(name.iter().cloned());
                out
            }
            SimpleSelector::Attribute {
                name,
                namespace,
                op,
                value,
            } => {
                let mut out = vec![Token::Literal("[".to_string())];
                out.extend(namespace_tokens(namespace));
                out.extend(name.iter().cloned());
                if let Some(op) = op {
                    out.push(Token::Literal(op.clone()));
                }
                if let Some(value) = value {
                    out.extend(value.iter().cloned());
                }
                out.push(Token::Literal("]".to_string()));
                out
            }
            SimpleSelector::Pseudo { kind, name, arg } => {
                let colons = match kind {
                    PseudoKind::Class => ":",
                    PseudoKind::Element => "::",
                };
                let mut out = vec![Token::Literal(colons.to_string())];
                out.extend(name.iter().cloned());
                if let Some(arg) = arg {
                    out.push(Token::Literal("(".to_string()));
                    out.extend(strip_tokens(arg));
                    out.push(Token::Literal(")".to_string()));
                }
                out
            }
            SimpleSelector::Negation { inner } => {
                let mut out = vec![Token::Literal(":not(".to_string())];
                out.extend(inner.to_tokens());
                out.push(Token::Literal(")".to_string()));
                out
            }
            SimpleSelector::Interpolation { script } => vec![Token::Script(script.clone())],
        }
    }
}

fn namespace_tokens(namespace: &Namespace) -> Vec<Token> {
    match namespace {
        None => Vec::new(),
        Some(ns) => {
            let mut out = ns.clone();
            out.push(Token::Literal("|".to_string()));
            out
        }
    }
}

impl fmt::Display for SimpleSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&tokens_to_string(&self.to_tokens()))
    }
}
