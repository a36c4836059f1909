//! Compound selector parsing for the headless document
//!
//! Supports a single compound selector: an optional tag name (or `*`)
//! followed by any number of `.class` and `#id` parts. Combinators and
//! attribute selectors are rejected as malformed.

use super::HeadlessElement;
use crate::error::SelectorError;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub(crate) struct Selector {
    tag: Option<String>,
    ids: Vec<String>,
    classes: Vec<String>,
}

impl Selector {
    pub(crate) fn parse(input: &str) -> Result<Self, SelectorError> {
        let fail = |reason: &str| SelectorError::new(input, reason);

        if input.trim().is_empty() {
            return Err(fail("empty selector"));
        }

        let mut selector = Selector::default();
        let mut rest = input;

        if let Some(stripped) = rest.strip_prefix('*') {
            rest = stripped;
        } else if rest.starts_with(is_ident_start) {
            let (tag, tail) = take_ident(rest);
            selector.tag = Some(tag.to_ascii_lowercase());
            rest = tail;
        }

        while let Some(marker) = rest.chars().next() {
            let tail = &rest[marker.len_utf8()..];
            match marker {
                '.' | '#' => {
                    if !tail.starts_with(is_ident_start) {
                        return Err(fail(&format!("missing identifier after '{}'", marker)));
                    }
                    let (name, tail) = take_ident(tail);
                    if marker == '.' {
                        selector.classes.push(name.to_string());
                    } else {
                        selector.ids.push(name.to_string());
                    }
                    rest = tail;
                }
                c if c.is_whitespace() || matches!(c, '>' | '+' | '~' | ',') => {
                    return Err(fail("combinators are not supported"));
                }
                c => return Err(fail(&format!("unexpected character '{}'", c))),
            }
        }

        Ok(selector)
    }

    pub(crate) fn matches(&self, element: &HeadlessElement) -> bool {
        if let Some(tag) = &self.tag {
            if tag != element.tag_name() {
                return false;
            }
        }
        let id = element.element_id();
        self.ids.iter().all(|wanted| id.as_deref() == Some(wanted.as_str()))
            && self.classes.iter().all(|class| element.has_class(class))
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || c == '-'
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_' || c == '-'
}

fn take_ident(input: &str) -> (&str, &str) {
    let end = input
        .char_indices()
        .find(|(_, c)| !is_ident_char(*c))
        .map(|(i, _)| i)
        .unwrap_or(input.len());
    input.split_at(end)
}
