//! HTML-safe rendering of text with search matches marked.
//!
//! Renderers can take either form: a segment list for component-based UIs,
//! or ready-made markup with `<mark>` tags. In both forms the raw text is
//! HTML-escaped before any marker is added, so transaction text can never
//! be interpreted as markup.

use crate::search::SearchMatcher;

/// A run of text, flagged when it lies inside a search match.
///
/// The segments produced for an input always concatenate back to the whole
/// input, in order, without overlap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// The raw (unescaped) text of this run.
    pub text: String,
    /// Whether this run is part of a search match.
    pub is_match: bool,
}

/// Escape text for inclusion in HTML.
///
/// Every occurrence of `&`, `<`, `>`, `"` and `'` is replaced with its
/// entity, whether or not the text will carry match markers.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());

    for character in text.chars() {
        match character {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(character),
        }
    }

    escaped
}

/// Split `text` into an ordered cover of matching and non-matching runs.
///
/// Matching is global: every non-overlapping match across the whole string
/// is marked, left to right. Zero-length matches are skipped so the scan
/// always advances. Without a matcher, or without any match, the whole
/// input becomes a single non-matching segment; empty input produces an
/// empty list.
pub fn highlight_segments(text: &str, matcher: Option<&SearchMatcher>) -> Vec<Segment> {
    let mut segments = Vec::new();

    if text.is_empty() {
        return segments;
    }

    let Some(matcher) = matcher else {
        segments.push(Segment {
            text: text.to_owned(),
            is_match: false,
        });
        return segments;
    };

    let mut cursor = 0;

    for range in matcher.find_ranges(text) {
        if range.is_empty() {
            continue;
        }

        if range.start > cursor {
            segments.push(Segment {
                text: text[cursor..range.start].to_owned(),
                is_match: false,
            });
        }

        segments.push(Segment {
            text: text[range.clone()].to_owned(),
            is_match: true,
        });
        cursor = range.end;
    }

    if cursor < text.len() {
        segments.push(Segment {
            text: text[cursor..].to_owned(),
            is_match: false,
        });
    }

    segments
}

/// Render `text` as HTML with every search match wrapped in `<mark>` tags.
///
/// All text is escaped, markers present or not, so the result is safe to
/// insert into a document as-is.
pub fn highlight_markup(text: &str, matcher: Option<&SearchMatcher>) -> String {
    let mut markup = String::with_capacity(text.len());

    for segment in highlight_segments(text, matcher) {
        let escaped = escape_html(&segment.text);

        if segment.is_match {
            markup.push_str("<mark>");
            markup.push_str(&escaped);
            markup.push_str("</mark>");
        } else {
            markup.push_str(&escaped);
        }
    }

    markup
}
