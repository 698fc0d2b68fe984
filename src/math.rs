//! Math-notation escaper for markdown preview pipelines.
//!
//! Markdown renderers treat `\`, `_`, `*`, and `~` as formatting
//! syntax, which corrupts math notation embedded in the source text.
//! [`escape`] scans the text left to right, finds spans delimited by
//! the recognized math markers, and backslash-escapes those four
//! characters inside each span; every other character passes through
//! verbatim. The output is safe to hand to a markdown renderer ahead of
//! a math-typesetting pass.
//!
//! Recognized delimiters, in priority order:
//! - **Simple** (symmetric): `$$`, then `$`. A closing occurrence
//!   preceded by a backslash does not terminate the span.
//! - **Paired**: `\(`…`\)` and `\[`…`\]`.
//! - **Named blocks**: `\begin{…}`…`\end{…}` for the `equation`,
//!   `multline`, `gather`, and `align` environments and their starred
//!   forms.
//!
//! A literal `\$` never opens a span, and an opening marker with no
//! closing marker in the rest of the input is copied through one
//! character at a time. The scan never fails; malformed notation
//! degrades to plain passthrough.
//!
//! ## Example
//! ```rust
//! use clockmark::math::escape;
//!
//! assert_eq!(escape("$x_1$"), "$x\\_1$");
//! assert_eq!(escape("a_b"), "a_b");
//! assert_eq!(escape("price is \\$5"), "price is \\$5");
//! ```

/// Characters a markdown renderer treats as formatting syntax.
const MARKDOWN_SIGNIFICANT: [char; 4] = ['\\', '_', '*', '~'];

/// A literal backslash-dollar pair; copied through before any span
/// matching so an intentionally escaped dollar cannot open a span.
const ESCAPED_DOLLAR: &str = "\\$";

/// A math span delimiter rule.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Delimiter {
    /// Symmetric marker; open and close are the same literal.
    Simple(&'static str),
    /// Distinct open and close markers.
    Paired {
        open: &'static str,
        close: &'static str,
    },
    /// Named environment with literal opening and closing tags.
    Block {
        open: &'static str,
        close: &'static str,
    },
}

/// Priority-ordered delimiter table. `$$` must come before `$` so a
/// display span is not read as two adjacent inline spans.
const DELIMITERS: &[Delimiter] = &[
    Delimiter::Simple("$$"),
    Delimiter::Simple("$"),
    Delimiter::Paired {
        open: "\\(",
        close: "\\)",
    },
    Delimiter::Paired {
        open: "\\[",
        close: "\\]",
    },
    Delimiter::Block {
        open: "\\begin{equation}",
        close: "\\end{equation}",
    },
    Delimiter::Block {
        open: "\\begin{equation*}",
        close: "\\end{equation*}",
    },
    Delimiter::Block {
        open: "\\begin{multline}",
        close: "\\end{multline}",
    },
    Delimiter::Block {
        open: "\\begin{multline*}",
        close: "\\end{multline*}",
    },
    Delimiter::Block {
        open: "\\begin{gather}",
        close: "\\end{gather}",
    },
    Delimiter::Block {
        open: "\\begin{gather*}",
        close: "\\end{gather*}",
    },
    Delimiter::Block {
        open: "\\begin{align}",
        close: "\\end{align}",
    },
    Delimiter::Block {
        open: "\\begin{align*}",
        close: "\\end{align*}",
    },
];

impl Delimiter {
    fn open(&self) -> &'static str {
        match self {
            Delimiter::Simple(marker) => marker,
            Delimiter::Paired { open, .. } | Delimiter::Block { open, .. } => open,
        }
    }

    fn close(&self) -> &'static str {
        match self {
            Delimiter::Simple(marker) => marker,
            Delimiter::Paired { close, .. } | Delimiter::Block { close, .. } => close,
        }
    }

    /// Only symmetric markers honor a backslash-escaped closer; the
    /// paired and block closers are matched literally.
    fn skips_escaped_close(&self) -> bool {
        matches!(self, Delimiter::Simple(_))
    }
}

/// Escape markdown-significant characters inside recognized math spans.
///
/// Every character outside a span is copied verbatim; a matched span
/// (opening marker through the end of its closing marker) has `\`, `_`,
/// `*`, and `~` prefixed with a backslash. Never fails.
pub fn escape(plain: &str) -> String {
    let mut out = String::with_capacity(plain.len());
    let mut i = 0;

    // All delimiters are ASCII, so marker matching works on byte
    // offsets; only the verbatim copy has to advance by whole chars.
    while i < plain.len() {
        let rest = &plain[i..];

        if rest.starts_with(ESCAPED_DOLLAR) {
            out.push_str(ESCAPED_DOLLAR);
            i += ESCAPED_DOLLAR.len();
            continue;
        }

        if let Some(end) = span_end(plain, i) {
            escape_span(&plain[i..end], &mut out);
            i = end;
            continue;
        }

        match rest.chars().next() {
            Some(c) => {
                out.push(c);
                i += c.len_utf8();
            }
            None => break,
        }
    }

    out
}

/// Find the first rule that both opens at `start` and closes somewhere
/// after it; returns the byte offset just past the closing marker.
fn span_end(plain: &str, start: usize) -> Option<usize> {
    for rule in DELIMITERS {
        let open = rule.open();
        if !plain[start..].starts_with(open) {
            continue;
        }

        if let Some(close_at) = find_close(plain, start + open.len(), rule) {
            return Some(close_at + rule.close().len());
        }

        // Opener without a closer: later rules (and ultimately the
        // verbatim copy) get the position.
    }

    None
}

fn find_close(plain: &str, from: usize, rule: &Delimiter) -> Option<usize> {
    let close = rule.close();
    let mut searched = from;

    loop {
        let at = plain[searched..].find(close)? + searched;
        if rule.skips_escaped_close() && plain[..at].ends_with('\\') {
            searched = at + 1;
            continue;
        }

        return Some(at);
    }
}

fn escape_span(span: &str, out: &mut String) {
    for c in span.chars() {
        if MARKDOWN_SIGNIFICANT.contains(&c) {
            out.push('\\');
        }

        out.push(c);
    }
}
