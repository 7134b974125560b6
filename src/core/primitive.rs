//! Radiance scene descriptions are a flat list of primitives:
//!
//! ```text
//! modifier type identifier
//! n_strings [string ...]
//! n_ints [int ...]
//! n_reals [real ...]
//! ```
//!
//! Line breaks carry no meaning, only the argument counts decide where
//! a primitive ends. Lines starting with `#` are comments, lines
//! starting with `!` are generator commands whose output is read as
//! scene text.

// std
use std::fmt;
// others
use pest::Parser;
use pest_derive::Parser;
// manysuns
use crate::core::error::{ManySunsError, Result};
use crate::core::manysuns::Float;

#[derive(Parser)]
#[grammar = "core/rad.pest"]
struct RadParser;

#[derive(Debug, Clone, PartialEq)]
pub struct Primitive {
    pub modifier: String,
    pub ptype: String,
    pub identifier: String,
    pub strings: Vec<String>,
    pub ints: Vec<i64>,
    pub reals: Vec<Float>,
}

impl Primitive {
    /// Read one primitive from the start of `words`. Returns the
    /// primitive and the number of words consumed, or a `Syntax` error
    /// naming what is missing.
    pub fn from_words(words: &[&str]) -> Result<(Primitive, usize)> {
        if words.len() < 3 {
            return Err(ManySunsError::Syntax(format!(
                "expected 'modifier type identifier', found {} word(s)",
                words.len()
            )));
        }
        let mut pos: usize = 3;
        let n_strings: usize = read_count(words, &mut pos, "string")?;
        let strings: Vec<String> = take_words(words, &mut pos, n_strings, "string")?
            .iter()
            .map(|s| s.to_string())
            .collect();
        let n_ints: usize = read_count(words, &mut pos, "integer")?;
        let mut ints: Vec<i64> = Vec::with_capacity(n_ints);
        for w in take_words(words, &mut pos, n_ints, "integer")? {
            ints.push(
                w.parse::<i64>()
                    .map_err(|_| ManySunsError::Syntax(format!("'{}' is not an integer argument", w)))?,
            );
        }
        let n_reals: usize = read_count(words, &mut pos, "real")?;
        let mut reals: Vec<Float> = Vec::with_capacity(n_reals);
        for w in take_words(words, &mut pos, n_reals, "real")? {
            reals.push(
                w.parse::<Float>()
                    .map_err(|_| ManySunsError::Syntax(format!("'{}' is not a real argument", w)))?,
            );
        }
        Ok((
            Primitive {
                modifier: words[0].to_string(),
                ptype: words[1].to_string(),
                identifier: words[2].to_string(),
                strings,
                ints,
                reals,
            },
            pos,
        ))
    }
    /// The canonical header `modifier type identifier`.
    pub fn header(&self) -> String {
        format!("{} {} {}", self.modifier, self.ptype, self.identifier)
    }
    pub fn is_source(&self) -> bool {
        self.ptype == "source"
    }
}

fn read_count(words: &[&str], pos: &mut usize, what: &str) -> Result<usize> {
    match words.get(*pos) {
        Some(w) => {
            *pos += 1;
            w.parse::<usize>()
                .map_err(|_| ManySunsError::Syntax(format!("'{}' is not a valid {} argument count", w, what)))
        }
        None => Err(ManySunsError::Syntax(format!("missing {} argument count", what))),
    }
}

fn take_words<'a, 'b>(
    words: &'b [&'a str],
    pos: &mut usize,
    n: usize,
    what: &str,
) -> Result<&'b [&'a str]> {
    if *pos + n > words.len() {
        return Err(ManySunsError::Syntax(format!(
            "expected {} {} argument(s), found {}",
            n,
            what,
            words.len() - *pos
        )));
    }
    let slice: &[&str] = &words[*pos..*pos + n];
    *pos += n;
    Ok(slice)
}

impl fmt::Display for Primitive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.header())?;
        write!(f, "{}", self.strings.len())?;
        for s in &self.strings {
            write!(f, " {}", s)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.ints.len())?;
        for i in &self.ints {
            write!(f, " {}", i)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.reals.len())?;
        for r in &self.reals {
            write!(f, " {}", r)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SceneItem {
    Primitive(Primitive),
    Comment(String),
    Command(String),
}

enum Token<'a> {
    Word(&'a str, usize),
    Comment(&'a str),
    Command(&'a str),
}

/// Split scene text into primitives, comments and commands.
pub fn parse_scene(text: &str) -> Result<Vec<SceneItem>> {
    let scene = RadParser::parse(Rule::scene, text)
        .map_err(|e| ManySunsError::Compile(format!("scene text does not tokenize: {}", e)))?
        .next()
        .ok_or_else(|| ManySunsError::Compile(String::from("empty parse tree")))?;
    let mut tokens: Vec<Token> = Vec::new();
    for pair in scene.into_inner() {
        match pair.as_rule() {
            Rule::word => {
                let (line, _col) = pair.as_span().start_pos().line_col();
                tokens.push(Token::Word(pair.as_str(), line));
            }
            Rule::comment => tokens.push(Token::Comment(pair.as_str())),
            Rule::command => tokens.push(Token::Command(pair.as_str())),
            _ => {}
        }
    }
    let mut items: Vec<SceneItem> = Vec::new();
    let mut i: usize = 0;
    while i < tokens.len() {
        match tokens[i] {
            Token::Comment(c) => {
                items.push(SceneItem::Comment(c.trim_end().to_string()));
                i += 1;
            }
            Token::Command(c) => {
                items.push(SceneItem::Command(c.trim_end().to_string()));
                i += 1;
            }
            Token::Word(_, line) => {
                // a primitive ends before the next comment or command
                let mut words: Vec<&str> = Vec::new();
                let mut j: usize = i;
                while j < tokens.len() {
                    if let Token::Word(w, _) = tokens[j] {
                        words.push(w);
                        j += 1;
                    } else {
                        break;
                    }
                }
                let mut consumed: usize = 0;
                while consumed < words.len() {
                    let (prim, n) = Primitive::from_words(&words[consumed..]).map_err(|e| {
                        ManySunsError::Compile(format!(
                            "bad primitive near line {} ('{}'): {}",
                            line,
                            words[consumed..].iter().take(3).cloned().collect::<Vec<&str>>().join(" "),
                            e
                        ))
                    })?;
                    items.push(SceneItem::Primitive(prim));
                    consumed += n;
                }
                i = j;
            }
        }
    }
    Ok(items)
}

/// Write scene items back as text, one primitive block per item.
pub fn write_scene(items: &[SceneItem]) -> String {
    let mut out: String = String::new();
    for item in items {
        match item {
            SceneItem::Primitive(p) => {
                out.push('\n');
                out.push_str(&p.to_string());
                out.push('\n');
            }
            SceneItem::Comment(c) | SceneItem::Command(c) => {
                out.push_str(c);
                out.push('\n');
            }
        }
    }
    out
}

/// Iterate over the primitives of a parsed scene.
pub fn primitives(items: &[SceneItem]) -> impl Iterator<Item = &Primitive> {
    items.iter().filter_map(|item| match item {
        SceneItem::Primitive(p) => Some(p),
        _ => None,
    })
}
