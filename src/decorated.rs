//! Figurine-decorated move text.
//!
//! Graphical clients render piece letters in move lists as small piece
//! images. The decorated form splits notation into plain text and figurine
//! tokens, writing the tokens as `{queen}`-style placeholders: `Qxf7#`
//! becomes `{queen}xf7#`.

use std::fmt;

use crate::role::Role;

/// One element of decorated move text.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum Element {
    Text(String),
    Figurine(Role),
}

/// Move text split into plain text and figurine tokens.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct Decorated {
    elements: Vec<Element>,
}

impl Decorated {
    /// Splits notation into elements. A role letter counts as a figurine
    /// only where notation puts one: at the start of the move, or right
    /// after a promotion `=` or a leading `+`.
    pub fn parse(notation: &str) -> Decorated {
        let mut elements = Vec::new();
        let mut text = String::new();
        let mut at_role_position = true;
        for (i, ch) in notation.chars().enumerate() {
            if at_role_position && ch.is_ascii_uppercase() {
                if let Some(role) = Role::from_char(ch) {
                    if !text.is_empty() {
                        elements.push(Element::Text(std::mem::take(&mut text)));
                    }
                    elements.push(Element::Figurine(role));
                    at_role_position = false;
                    continue;
                }
            }
            text.push(ch);
            at_role_position = ch == '=' || (ch == '+' && i == 0);
        }
        if !text.is_empty() {
            elements.push(Element::Text(text));
        }
        Decorated { elements }
    }

    pub fn elements(&self) -> &[Element] {
        &self.elements
    }
}

impl fmt::Display for Decorated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for element in &self.elements {
            match element {
                Element::Text(text) => f.write_str(text)?,
                Element::Figurine(role) => write!(f, "{{{}}}", role.figurine())?,
            }
        }
        Ok(())
    }
}

/// Convenience wrapper: notation in, decorated text out.
pub fn decorate(notation: &str) -> String {
    Decorated::parse(notation).to_string()
}

/// Reverses [`decorate`], turning figurine tokens back into piece letters.
/// Returns `None` when a token names no piece or a brace is unbalanced.
pub fn undecorate(text: &str) -> Option<String> {
    let mut out = String::new();
    let mut rest = text;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let end = start + rest[start..].find('}')?;
        let name = &rest[start + 1..end];
        let role = Role::ALL.iter().copied().find(|role| role.figurine() == name)?;
        out.push(role.upper_char());
        rest = &rest[end + 1..];
    }
    if rest.contains('}') {
        return None;
    }
    out.push_str(rest);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decorate() {
        assert_eq!(decorate("Qxf7#"), "{queen}xf7#");
        assert_eq!(decorate("exd8=Q"), "exd8={queen}");
        assert_eq!(decorate("N@e5"), "{knight}@e5");
        assert_eq!(decorate("+Rx5e"), "+{rook}x5e");
        assert_eq!(decorate("O-O-O"), "O-O-O");
        assert_eq!(decorate("e4"), "e4");
    }

    #[test]
    fn test_undecorate() {
        assert_eq!(undecorate("{queen}xf7#").as_deref(), Some("Qxf7#"));
        assert_eq!(undecorate("e4").as_deref(), Some("e4"));
        assert_eq!(undecorate("{dragon}xf7"), None);
        assert_eq!(undecorate("{queen"), None);
    }

    #[test]
    fn test_elements() {
        let decorated = Decorated::parse("Nxf3");
        assert_eq!(
            decorated.elements(),
            [
                Element::Figurine(Role::Knight),
                Element::Text("xf3".to_string()),
            ]
        );
    }
}
