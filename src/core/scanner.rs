//! Line based block scanner for sun descriptions.
//!
//! A block starts at the first line beginning with the keyword words
//! and collects consecutive non-blank lines until the primitive is
//! complete or `MAX_BLOCK_LINES` lines have been taken.

// manysuns
use crate::core::primitive::Primitive;

pub const MAX_BLOCK_LINES: usize = 4;

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ScanState {
    Searching,
    /// Number of lines collected so far.
    Collecting(usize),
    Done,
}

/// A block of collected lines; `start` and `end` are line indices
/// into the scanned text, `end` inclusive.
#[derive(Debug, Clone, PartialEq)]
pub struct Block {
    pub start: usize,
    pub end: usize,
    pub lines: Vec<String>,
}

impl Block {
    pub fn last_line(&self) -> &str {
        self.lines.last().map(|s| s.as_str()).unwrap_or("")
    }
    pub fn words(&self) -> Vec<&str> {
        self.lines
            .iter()
            .flat_map(|l| l.split_whitespace())
            .collect()
    }
}

pub struct BlockScanner<'a> {
    keyword: Vec<&'a str>,
    state: ScanState,
    block: Option<Block>,
}

impl<'a> BlockScanner<'a> {
    pub fn new(keyword: &'a str) -> Self {
        BlockScanner {
            keyword: keyword.split_whitespace().collect(),
            state: ScanState::Searching,
            block: None,
        }
    }
    pub fn state(&self) -> ScanState {
        self.state
    }
    /// Feed the next line; `index` is its line number in the text.
    pub fn feed(&mut self, index: usize, line: &str) {
        match self.state {
            ScanState::Searching => {
                if starts_with_words(line, &self.keyword) {
                    self.block = Some(Block {
                        start: index,
                        end: index,
                        lines: vec![line.to_string()],
                    });
                    self.state = self.after_collect(1);
                }
            }
            ScanState::Collecting(count) => {
                if line.trim().is_empty() {
                    return;
                }
                if let Some(block) = self.block.as_mut() {
                    block.end = index;
                    block.lines.push(line.to_string());
                }
                self.state = self.after_collect(count + 1);
            }
            ScanState::Done => {}
        }
    }
    fn after_collect(&self, count: usize) -> ScanState {
        let complete: bool = match &self.block {
            Some(block) => Primitive::from_words(&block.words()).is_ok(),
            None => false,
        };
        if complete || count >= MAX_BLOCK_LINES {
            ScanState::Done
        } else {
            ScanState::Collecting(count)
        }
    }
    /// Block found so far (a block cut short by the end of the text
    /// is returned as is).
    pub fn finish(self) -> Option<Block> {
        match self.state {
            ScanState::Searching => None,
            _ => self.block,
        }
    }
    /// Scan all lines and return the first matching block.
    pub fn scan<S: AsRef<str>>(keyword: &str, lines: &[S]) -> Option<Block> {
        let mut scanner = BlockScanner::new(keyword);
        for (i, line) in lines.iter().enumerate() {
            scanner.feed(i, line.as_ref());
            if scanner.state() == ScanState::Done {
                break;
            }
        }
        scanner.finish()
    }
}

/// Does the line start with the given words (as whole words)?
pub fn starts_with_words(line: &str, keyword: &[&str]) -> bool {
    let mut words = line.split_whitespace();
    for k in keyword {
        match words.next() {
            Some(w) if w == *k => {}
            _ => return false,
        }
    }
    !keyword.is_empty()
}
