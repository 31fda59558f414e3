use regex_automata::meta::{BuildError, Regex};
use std::fmt;
use thiserror::Error;

const MAX_PATTERN_LENGTH: usize = 4_096;
const MAX_ORIGIN_LENGTH: usize = 4_096;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("failed to compile origin pattern")]
    Build(#[source] Box<BuildError>),
    #[error("origin pattern length {length} exceeds maximum allowed {max}")]
    TooLong { length: usize, max: usize },
}

#[derive(Clone, Debug)]
enum Matcher {
    Exact,
    Glob(Regex),
}

/// A configured origin, matched with shell-style wildcards.
///
/// `*` matches any run of characters, `?` a single character, and `[...]`
/// (or `[!...]` for negation) a character class. Matching is case-sensitive
/// and applies to the whole `Origin` value exactly as sent.
#[derive(Clone, Debug)]
pub struct OriginPattern {
    source: String,
    matcher: Matcher,
}

impl OriginPattern {
    pub fn new<S: Into<String>>(pattern: S) -> Result<Self, PatternError> {
        let source = pattern.into();
        if source.len() > MAX_PATTERN_LENGTH {
            return Err(PatternError::TooLong {
                length: source.len(),
                max: MAX_PATTERN_LENGTH,
            });
        }

        let matcher = if source.contains(['*', '?', '[']) {
            let regex = Regex::new(&translate(&source))
                .map_err(|err| PatternError::Build(Box::new(err)))?;
            Matcher::Glob(regex)
        } else {
            Matcher::Exact
        };

        Ok(Self { source, matcher })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, origin: &str) -> bool {
        if origin.len() > MAX_ORIGIN_LENGTH {
            return false;
        }

        match &self.matcher {
            Matcher::Exact => self.source == origin,
            Matcher::Glob(regex) => regex.is_match(origin),
        }
    }
}

impl PartialEq for OriginPattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

impl Eq for OriginPattern {}

impl fmt::Display for OriginPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.source)
    }
}

/// Translates a shell glob into an anchored regular expression.
pub(crate) fn translate(glob: &str) -> String {
    let chars: Vec<char> = glob.chars().collect();
    let mut out = String::with_capacity(glob.len() * 2 + 8);
    out.push_str(r"\A(?s:");

    let mut i = 0;
    while i < chars.len() {
        let ch = chars[i];
        i += 1;
        match ch {
            '*' => {
                while i < chars.len() && chars[i] == '*' {
                    i += 1;
                }
                out.push_str(".*");
            }
            '?' => out.push('.'),
            '[' => match class_end(&chars, i) {
                Some(end) => {
                    push_class(&mut out, &chars[i..end]);
                    i = end + 1;
                }
                None => out.push_str(r"\["),
            },
            other => push_literal(&mut out, other),
        }
    }

    out.push_str(r")\z");
    out
}

/// Index of the `]` closing a class opened just before `start`. A `]`
/// directly after the opening bracket (or after `!`) is part of the class.
fn class_end(chars: &[char], start: usize) -> Option<usize> {
    let mut j = start;
    if j < chars.len() && chars[j] == '!' {
        j += 1;
    }
    if j < chars.len() && chars[j] == ']' {
        j += 1;
    }
    while j < chars.len() && chars[j] != ']' {
        j += 1;
    }
    (j < chars.len()).then_some(j)
}

fn push_class(out: &mut String, body: &[char]) {
    out.push('[');
    let rest = match body.split_first() {
        Some(('!', rest)) => {
            out.push('^');
            rest
        }
        _ => body,
    };
    for &ch in rest {
        if matches!(ch, '\\' | '[' | ']' | '^' | '&' | '~') {
            out.push('\\');
        }
        out.push(ch);
    }
    out.push(']');
}

fn push_literal(out: &mut String, ch: char) {
    if matches!(
        ch,
        '\\' | '.'
            | '+'
            | '*'
            | '?'
            | '('
            | ')'
            | '|'
            | '['
            | ']'
            | '{'
            | '}'
            | '^'
            | '$'
            | '#'
            | '&'
            | '-'
            | '~'
    ) {
        out.push('\\');
    }
    out.push(ch);
}

#[cfg(test)]
#[path = "pattern_test.rs"]
mod pattern_test;
