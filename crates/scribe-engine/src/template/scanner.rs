//! Placeholder span scanner.
//!
//! Splits text into literal runs and `{{@...}}` expression bodies. The
//! close token is located by a small explicit-state machine (normal,
//! in-string, after-escape) so a `}}` sequence inside a quoted string
//! inside the expression body does not terminate the placeholder.
//!
//! The scanner only finds spans; resolving a body to a value is the
//! resolver's job.

/// Start token of a placeholder.
const OPEN: &str = "{{@";
/// Close token of a placeholder.
const CLOSE: &str = "}}";

/// One scanned piece of the input text.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Text emitted verbatim.
    Literal(&'a str),
    /// The body between `{{@` and its matching `}}`.
    Expression(&'a str),
}

/// Scanner state while searching for the matching close token.
enum State {
    Normal,
    InString,
    AfterEscape { in_string: bool },
}

/// Split text into literal and expression segments.
///
/// An open token with no matching close is lenient: the remaining text is
/// returned as one literal segment.
pub fn scan(text: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    while cursor < text.len() {
        let Some(open_offset) = text[cursor..].find(OPEN) else {
            segments.push(Segment::Literal(&text[cursor..]));
            break;
        };
        let open_at = cursor + open_offset;
        if open_at > cursor {
            segments.push(Segment::Literal(&text[cursor..open_at]));
        }

        let body_start = open_at + OPEN.len();
        match find_close(text, body_start) {
            Some(close_at) => {
                segments.push(Segment::Expression(&text[body_start..close_at]));
                cursor = close_at + CLOSE.len();
            }
            None => {
                segments.push(Segment::Literal(&text[open_at..]));
                break;
            }
        }
    }

    segments
}

/// Find the byte offset of the matching `}}` for a body starting at
/// `body_start`, honoring quoted strings and backslash escapes.
fn find_close(text: &str, body_start: usize) -> Option<usize> {
    let mut state = State::Normal;
    let mut chars = text[body_start..].char_indices().peekable();

    while let Some((offset, ch)) = chars.next() {
        match state {
            State::AfterEscape { in_string } => {
                state = if in_string {
                    State::InString
                } else {
                    State::Normal
                };
            }
            State::InString => match ch {
                '\\' => state = State::AfterEscape { in_string: true },
                '"' => state = State::Normal,
                _ => {}
            },
            State::Normal => match ch {
                '\\' => state = State::AfterEscape { in_string: false },
                '"' => state = State::InString,
                '}' if chars.peek().is_some_and(|(_, next)| *next == '}') => {
                    return Some(body_start + offset);
                }
                _ => {}
            },
        }
    }

    None
}
