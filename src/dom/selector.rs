use crate::utils::error::SiteError;
use std::iter::Peekable;
use std::str::{Chars, FromStr};

/// 單一複合選擇器：`tag#id.class[attr="value"]`，不支援組合子
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selector {
    pub(crate) tag: Option<String>,
    pub(crate) id: Option<String>,
    pub(crate) classes: Vec<String>,
    pub(crate) attributes: Vec<(String, Option<String>)>,
}

fn is_ident_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '-' || c == '_'
}

fn read_ident(chars: &mut Peekable<Chars<'_>>) -> String {
    let mut ident = String::new();
    while let Some(&c) = chars.peek() {
        if !is_ident_char(c) {
            break;
        }
        ident.push(c);
        chars.next();
    }
    ident
}

fn invalid(selector: &str, reason: &str) -> SiteError {
    SiteError::InvalidSelector {
        selector: selector.to_string(),
        reason: reason.to_string(),
    }
}

impl FromStr for Selector {
    type Err = SiteError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let source = input.trim();
        if source.is_empty() {
            return Err(invalid(input, "selector is empty"));
        }

        let mut selector = Selector::default();
        let mut chars = source.chars().peekable();

        if chars.peek() == Some(&'*') {
            chars.next();
        } else if chars.peek().is_some_and(|c| is_ident_char(*c)) {
            selector.tag = Some(read_ident(&mut chars).to_ascii_lowercase());
        }

        while let Some(c) = chars.next() {
            match c {
                '#' => {
                    let id = read_ident(&mut chars);
                    if id.is_empty() {
                        return Err(invalid(input, "expected an id after '#'"));
                    }
                    selector.id = Some(id);
                }
                '.' => {
                    let class = read_ident(&mut chars);
                    if class.is_empty() {
                        return Err(invalid(input, "expected a class name after '.'"));
                    }
                    selector.classes.push(class);
                }
                '[' => {
                    let name = read_ident(&mut chars);
                    if name.is_empty() {
                        return Err(invalid(input, "expected an attribute name after '['"));
                    }
                    match chars.next() {
                        Some(']') => selector.attributes.push((name, None)),
                        Some('=') => {
                            let quote = match chars.peek() {
                                Some(&q) if q == '"' || q == '\'' => {
                                    chars.next();
                                    Some(q)
                                }
                                _ => None,
                            };
                            let mut value = String::new();
                            loop {
                                match chars.next() {
                                    Some(c) if Some(c) == quote => break,
                                    Some(']') if quote.is_none() => break,
                                    Some(c) => value.push(c),
                                    None => {
                                        return Err(invalid(input, "unterminated attribute selector"))
                                    }
                                }
                            }
                            if quote.is_some() && chars.next() != Some(']') {
                                return Err(invalid(input, "expected ']' after attribute value"));
                            }
                            selector.attributes.push((name, Some(value)));
                        }
                        _ => return Err(invalid(input, "malformed attribute selector")),
                    }
                }
                other => {
                    return Err(invalid(
                        input,
                        &format!("unsupported character '{}' (combinators are not supported)", other),
                    ))
                }
            }
        }

        Ok(selector)
    }
}
