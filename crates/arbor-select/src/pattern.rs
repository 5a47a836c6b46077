//! Selector patterns
//!
//! A pattern is a sequence of compounds joined by combinators, matched
//! right to left: the last compound describes the subject node, the ones
//! before it constrain its ancestors. Tag names compare
//! case-insensitively (stored lowercased); class tokens and attribute
//! values compare case-sensitively.

/// One predicate applied to a single node
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// Tag name match, e.g. `div`
    Tag(String),
    /// Class-token membership, e.g. `.active`
    Class(String),
    /// Attribute presence, e.g. `[disabled]`
    AttrPresent(String),
    /// Attribute value equality, e.g. `[role=button]`
    AttrEq(String, String),
}

/// Conjunction of simple selectors on one node, e.g. `div.card[role=main]`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Compound {
    pub(crate) selectors: Vec<SimpleSelector>,
}

impl Compound {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tag(mut self, tag: &str) -> Self {
        self.selectors.push(SimpleSelector::Tag(tag.to_ascii_lowercase()));
        self
    }

    pub fn with_class(mut self, token: &str) -> Self {
        self.selectors.push(SimpleSelector::Class(token.to_string()));
        self
    }

    pub fn with_attr(mut self, name: &str) -> Self {
        self.selectors.push(SimpleSelector::AttrPresent(name.to_string()));
        self
    }

    pub fn with_attr_eq(mut self, name: &str, value: &str) -> Self {
        self.selectors
            .push(SimpleSelector::AttrEq(name.to_string(), value.to_string()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }
}

/// Structural relation between adjacent compounds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Any ancestor, written as whitespace
    Descendant,
    /// Direct parent, written as `>`
    Child,
}

/// A full selector pattern
///
/// `compounds` and `combinators` interleave left to right:
/// `compounds[i]` relates to `compounds[i + 1]` through `combinators[i]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    pub(crate) compounds: Vec<Compound>,
    pub(crate) combinators: Vec<Combinator>,
}

impl Pattern {
    /// Pattern of a single compound (no ancestor constraints)
    pub fn single(compound: Compound) -> Self {
        Self {
            compounds: vec![compound],
            combinators: Vec::new(),
        }
    }

    /// Require some ancestor of the current leftmost compound to match
    /// `ancestor`
    pub fn descendant_of(mut self, ancestor: Compound) -> Self {
        self.compounds.insert(0, ancestor);
        self.combinators.insert(0, Combinator::Descendant);
        self
    }

    /// Require the direct parent of the current leftmost compound to
    /// match `parent`
    pub fn child_of(mut self, parent: Compound) -> Self {
        self.compounds.insert(0, parent);
        self.combinators.insert(0, Combinator::Child);
        self
    }

    /// The compound the subject node itself must satisfy
    pub(crate) fn subject(&self) -> &Compound {
        // construction guarantees at least one compound
        &self.compounds[self.compounds.len() - 1]
    }

    /// Parse selector text, e.g. `div.card > span[role=button]`
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        Parser { input, pos: 0 }.parse()
    }
}

/// Selector text parse errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("empty pattern")]
    Empty,

    #[error("unexpected character `{ch}` at byte {pos}")]
    UnexpectedChar { pos: usize, ch: char },

    #[error("expected identifier at byte {pos}")]
    ExpectedIdent { pos: usize },

    #[error("unclosed attribute selector starting at byte {pos}")]
    UnclosedAttribute { pos: usize },

    #[error("combinator with no right-hand side")]
    DanglingCombinator,
}

struct Parser<'a> {
    input: &'a str,
    pos: usize,
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '-' || ch == '_'
}

impl Parser<'_> {
    fn parse(mut self) -> Result<Pattern, ParseError> {
        self.skip_ws();
        if self.peek().is_none() {
            return Err(ParseError::Empty);
        }

        let mut compounds = vec![self.parse_compound()?];
        let mut combinators = Vec::new();
        loop {
            let had_ws = self.skip_ws();
            match self.peek() {
                None => break,
                Some('>') => {
                    self.pos += 1;
                    self.skip_ws();
                    combinators.push(Combinator::Child);
                }
                Some(_) if had_ws => combinators.push(Combinator::Descendant),
                // parse_compound only stops at whitespace, `>`, or end
                Some(ch) => {
                    return Err(ParseError::UnexpectedChar { pos: self.pos, ch });
                }
            }
            if self.peek().is_none() {
                return Err(ParseError::DanglingCombinator);
            }
            compounds.push(self.parse_compound()?);
        }

        Ok(Pattern { compounds, combinators })
    }

    fn parse_compound(&mut self) -> Result<Compound, ParseError> {
        let mut compound = Compound::new();
        while let Some(ch) = self.peek() {
            match ch {
                '.' => {
                    self.pos += 1;
                    let token = self.parse_ident()?;
                    compound.selectors.push(SimpleSelector::Class(token));
                }
                '[' => {
                    let open = self.pos;
                    self.pos += 1;
                    self.skip_ws();
                    let name = self.parse_ident()?;
                    self.skip_ws();
                    match self.peek() {
                        Some(']') => {
                            self.pos += 1;
                            compound.selectors.push(SimpleSelector::AttrPresent(name));
                        }
                        Some('=') => {
                            self.pos += 1;
                            self.skip_ws();
                            let value = self.parse_attr_value(open)?;
                            self.skip_ws();
                            if self.peek() != Some(']') {
                                return Err(ParseError::UnclosedAttribute { pos: open });
                            }
                            self.pos += 1;
                            compound.selectors.push(SimpleSelector::AttrEq(name, value));
                        }
                        _ => return Err(ParseError::UnclosedAttribute { pos: open }),
                    }
                }
                c if is_ident_char(c) => {
                    let tag = self.parse_ident()?;
                    compound
                        .selectors
                        .push(SimpleSelector::Tag(tag.to_ascii_lowercase()));
                }
                _ => break,
            }
        }
        if compound.is_empty() {
            return Err(ParseError::ExpectedIdent { pos: self.pos });
        }
        Ok(compound)
    }

    fn parse_ident(&mut self) -> Result<String, ParseError> {
        let start = self.pos;
        while self.peek().is_some_and(is_ident_char) {
            self.pos += self.peek().map_or(0, char::len_utf8);
        }
        if self.pos == start {
            return Err(ParseError::ExpectedIdent { pos: start });
        }
        Ok(self.input[start..self.pos].to_string())
    }

    /// Bare value up to `]`, or a double-quoted value
    fn parse_attr_value(&mut self, open: usize) -> Result<String, ParseError> {
        if self.peek() == Some('"') {
            self.pos += 1;
            let start = self.pos;
            while let Some(ch) = self.peek() {
                if ch == '"' {
                    let value = self.input[start..self.pos].to_string();
                    self.pos += 1;
                    return Ok(value);
                }
                self.pos += ch.len_utf8();
            }
            Err(ParseError::UnclosedAttribute { pos: open })
        } else {
            let start = self.pos;
            while self.peek().is_some_and(|ch| ch != ']') {
                self.pos += self.peek().map_or(0, char::len_utf8);
            }
            Ok(self.input[start..self.pos].trim_end().to_string())
        }
    }

    fn peek(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn skip_ws(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += self.peek().map_or(0, char::len_utf8);
        }
        self.pos > start
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_compound() {
        let pattern = Pattern::parse("DIV.card[role=button]").unwrap();
        assert_eq!(pattern.compounds.len(), 1);
        assert_eq!(
            pattern.compounds[0].selectors,
            vec![
                SimpleSelector::Tag("div".to_string()),
                SimpleSelector::Class("card".to_string()),
                SimpleSelector::AttrEq("role".to_string(), "button".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_combinators() {
        let pattern = Pattern::parse("ul > li a").unwrap();
        assert_eq!(pattern.compounds.len(), 3);
        assert_eq!(
            pattern.combinators,
            vec![Combinator::Child, Combinator::Descendant]
        );
    }

    #[test]
    fn test_parse_quoted_attr_value() {
        let pattern = Pattern::parse(r#"[title="two words"]"#).unwrap();
        assert_eq!(
            pattern.compounds[0].selectors,
            vec![SimpleSelector::AttrEq(
                "title".to_string(),
                "two words".to_string()
            )]
        );
    }

    #[test]
    fn test_parse_attr_presence() {
        let pattern = Pattern::parse("input[disabled]").unwrap();
        assert_eq!(
            pattern.compounds[0].selectors[1],
            SimpleSelector::AttrPresent("disabled".to_string())
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Pattern::parse(""), Err(ParseError::Empty));
        assert_eq!(Pattern::parse("   "), Err(ParseError::Empty));
        assert_eq!(Pattern::parse("a >"), Err(ParseError::DanglingCombinator));
        assert!(matches!(
            Pattern::parse("[broken"),
            Err(ParseError::UnclosedAttribute { .. })
        ));
        assert!(matches!(
            Pattern::parse("."),
            Err(ParseError::ExpectedIdent { .. })
        ));
    }

    #[test]
    fn test_typed_construction_matches_parsed() {
        let typed = Pattern::single(Compound::new().with_tag("a"))
            .child_of(Compound::new().with_tag("li"))
            .descendant_of(Compound::new().with_tag("ul").with_class("menu"));
        let parsed = Pattern::parse("ul.menu li > a").unwrap();
        assert_eq!(typed, parsed);
    }
}
