//! Selector parsing.
//!
//! Turns selector source text into a [`CommaSequence`]:
//!
//! - [`parse_selector`]: main entry point
//! - [`selectors`]: the `nom` combinators (simple, compound, complex,
//!   comma-separated list)
//!
//! ## Example
//!
//! ```rust
//! use pcss::parse_selector;
//!
//! let group = parse_selector("nav a.active, .sidebar > *").unwrap();
//! assert_eq!(group.members.len(), 2);
//! assert_eq!(group.to_string(), "nav a.active, .sidebar > *");
//! ```

mod selectors;

use crate::error::{PcssError, Result};
use crate::selector::comma_sequence::CommaSequence;
use crate::selector::sequence::Member;

use selectors::parse_comma_sequence;

/// Parses selector source text into a comma sequence, assigning each
/// compound its 1-based source line.
pub fn parse_selector(source: &str) -> Result<CommaSequence> {
    let (remaining, mut comma) = parse_comma_sequence(source)
        .map_err(|e| PcssError::syntax(format!("invalid selector: {e}"), 1, None))?;

    if !remaining.trim().is_empty() {
        let offset = source.len() - remaining.len();
        let line = source[..offset].matches('\n').count() + 1;
        return Err(PcssError::syntax(
            format!("Unexpected tokens at end of selector: {}", remaining.trim()),
            line,
            None,
        ));
    }

    assign_lines(&mut comma);
    Ok(comma)
}

/// Lines are recovered from the newline markers the parser records in
/// sequence members.
fn assign_lines(comma: &mut CommaSequence) {
    let mut line = 1;
    for seq in &mut comma.members {
        for member in &mut seq.members {
            match member {
                Member::Newline => line += 1,
                Member::Simple(sseq) => sseq.set_line(line),
                Member::Combinator(_) => {}
            }
        }
    }
}
