//! Nested square-bracket extraction.
//!
//! Verbose GC lines nest their measurements in `[...]` regions:
//! `[GC [PSYoungGen: 1000K->200K(2000K)] 5000K->3000K(8000K), 0.01 secs]`.
//! The extractor recovers every region together with its nesting depth.

/// Lazy iterator over `(depth, content)` pairs of one string
///
/// Regions are yielded when their closing bracket is reached, so children
/// come before their parent. Depth 0 is a top-level region. Unmatched `]`
/// are ignored and a region left open at the end of input yields nothing.
#[derive(Debug, Clone)]
pub struct Brackets<'a> {
    text: &'a str,
    pos: usize,
    open: Vec<usize>,
}

impl<'a> Iterator for Brackets<'a> {
    type Item = (usize, &'a str);

    fn next(&mut self) -> Option<Self::Item> {
        let bytes = self.text.as_bytes();

        while self.pos < bytes.len() {
            let index = self.pos;
            self.pos += 1;

            match bytes[index] {
                b'[' => self.open.push(index),
                b']' => {
                    if let Some(start) = self.open.pop() {
                        return Some((self.open.len(), &self.text[start + 1..index]));
                    }
                }
                _ => {}
            }
        }

        None
    }
}

/// Iterate over every bracketed region of `text`
pub fn bracket_contents(text: &str) -> Brackets<'_> {
    Brackets {
        text,
        pos: 0,
        open: Vec::new(),
    }
}

/// Regions directly nested in `content` (depth 1 relative to its parent)
pub fn direct_children(content: &str) -> impl Iterator<Item = &str> {
    bracket_contents(content)
        .filter(|(depth, _)| *depth == 0)
        .map(|(_, child)| child)
}

/// `content` with every nested region removed, delimiters included
///
/// `GC [PSYoungGen: 1K->0K(2K)] 5K->3K(8K)` becomes `GC  5K->3K(8K)`.
pub fn top_level_text(content: &str) -> String {
    let mut out = String::with_capacity(content.len());
    let mut depth = 0usize;

    for c in content.chars() {
        match c {
            '[' => depth += 1,
            ']' if depth > 0 => depth -= 1,
            _ if depth == 0 => out.push(c),
            _ => {}
        }
    }

    out
}
