//! Class names defined by a compiled stylesheet.
//!
//! Only selector preludes are inspected. Declaration blocks, comments and
//! string literals are skipped, and conditional at-rule blocks are descended
//! so `@media (min-width: 768px) { .md\:flex-row { ... } }` yields
//! `md:flex-row`.

use std::collections::BTreeSet;

/// At-rules whose blocks contain further style rules
const NESTING_AT_RULES: &[&str] = &["media", "supports", "layer", "container", "document"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Block {
    Rules,
    Declarations,
}

/// Collect every class selector name in `css`, with escapes decoded
pub fn stylesheet_classes(css: &str) -> BTreeSet<String> {
    let mut classes = BTreeSet::new();
    let mut stack: Vec<Block> = Vec::new();
    let mut prelude = String::new();
    let mut chars = css.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            skip_comment(&mut chars);
            continue;
        }

        let in_rules = stack.last().map_or(true, |b| *b == Block::Rules);
        if !in_rules {
            match c {
                '"' | '\'' => skip_string(&mut chars, c),
                '{' => stack.push(Block::Declarations),
                '}' => {
                    stack.pop();
                }
                _ => {}
            }
            continue;
        }

        match c {
            '"' | '\'' => skip_string(&mut chars, c),
            '\\' => {
                prelude.push(c);
                if let Some(next) = chars.next() {
                    prelude.push(next);
                }
            }
            '{' => {
                let head = prelude.trim();
                if let Some(at_rule) = head.strip_prefix('@') {
                    let name: String = at_rule
                        .chars()
                        .take_while(|c| c.is_ascii_alphanumeric() || *c == '-')
                        .collect();
                    if NESTING_AT_RULES.contains(&name.to_ascii_lowercase().as_str()) {
                        stack.push(Block::Rules);
                    } else {
                        stack.push(Block::Declarations);
                    }
                } else {
                    collect_selector_classes(head, &mut classes);
                    stack.push(Block::Declarations);
                }
                prelude.clear();
            }
            '}' => {
                stack.pop();
                prelude.clear();
            }
            ';' => prelude.clear(),
            _ => prelude.push(c),
        }
    }

    classes
}

fn skip_comment(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) {
    while let Some(c) = chars.next() {
        if c == '*' && chars.peek() == Some(&'/') {
            chars.next();
            return;
        }
    }
}

fn skip_string(chars: &mut std::iter::Peekable<std::str::Chars<'_>>, quote: char) {
    while let Some(c) = chars.next() {
        if c == '\\' {
            chars.next();
        } else if c == quote || c == '\n' {
            return;
        }
    }
}

/// Pull `.class` names out of one selector list
fn collect_selector_classes(selector: &str, out: &mut BTreeSet<String>) {
    let mut chars = selector.chars().peekable();
    let mut bracket_depth = 0usize;

    while let Some(c) = chars.next() {
        match c {
            '[' => bracket_depth += 1,
            ']' => bracket_depth = bracket_depth.saturating_sub(1),
            '\\' => {
                chars.next();
            }
            '.' if bracket_depth == 0 => {
                if let Some(name) = read_identifier(&mut chars) {
                    out.insert(name);
                }
            }
            _ => {}
        }
    }
}

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_' || !c.is_ascii()
}

/// Read a CSS identifier following a `.`; `None` if it is not a class name
fn read_identifier(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<String> {
    let mut name = String::new();
    let mut first_raw: Option<char> = None;

    loop {
        match chars.peek().copied() {
            Some('\\') => {
                chars.next();
                first_raw.get_or_insert('\\');
                if let Some(decoded) = read_escape(chars) {
                    name.push(decoded);
                }
            }
            Some(c) if is_name_char(c) => {
                chars.next();
                first_raw.get_or_insert(c);
                name.push(c);
            }
            _ => break,
        }
    }

    match first_raw {
        Some(c) if c.is_ascii_digit() => None,
        Some(_) if !name.is_empty() => Some(name),
        _ => None,
    }
}

/// Decode the escape after a backslash: up to six hex digits, or one literal char
fn read_escape(chars: &mut std::iter::Peekable<std::str::Chars<'_>>) -> Option<char> {
    let mut hex = String::new();
    while hex.len() < 6 {
        match chars.peek() {
            Some(c) if c.is_ascii_hexdigit() => {
                hex.push(*c);
                chars.next();
            }
            _ => break,
        }
    }

    if hex.is_empty() {
        return match chars.next() {
            Some('\n') | None => None,
            Some(c) => Some(c),
        };
    }

    if matches!(chars.peek(), Some(' ' | '\t' | '\n')) {
        chars.next();
    }
    // NUL, surrogates and values past U+10FFFF all become U+FFFD
    let code = u32::from_str_radix(&hex, 16).ok()?;
    Some(
        char::from_u32(code)
            .filter(|c| *c != '\0')
            .unwrap_or(char::REPLACEMENT_CHARACTER),
    )
}
