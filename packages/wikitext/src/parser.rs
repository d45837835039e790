//! Wikitext scanner.
//!
//! Single forward pass over the input producing a flat [`Document`].
//! The scanner is total: malformed constructs (an unclosed `{{`, a bare
//! run of `=`) degrade to literal text instead of failing, so every
//! input yields a best-effort tree.

use tracing::trace;

use crate::nodes::{Document, MarkupNode, Template};

/// Parse a wikitext string into a document.
pub fn parse(text: &str) -> Document {
    Scanner::new(text).run()
}

// ---------------------------------------------------------------------------
// Scanner
// ---------------------------------------------------------------------------

struct Scanner<'a> {
    text: &'a str,
    bytes: &'a [u8],
    /// Current scan position (byte offset).
    pos: usize,
    /// Start of the pending literal-text run.
    text_start: usize,
    nodes: Vec<MarkupNode>,
}

impl<'a> Scanner<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text,
            bytes: text.as_bytes(),
            pos: 0,
            text_start: 0,
            nodes: Vec::new(),
        }
    }

    fn run(mut self) -> Document {
        let len = self.bytes.len();

        while self.pos < len {
            let at_line_start = self.pos == 0 || self.bytes[self.pos - 1] == b'\n';

            match self.bytes[self.pos] {
                // Headings are line-anchored; a line starting mid-text
                // with '=' is plain text.
                b'=' if at_line_start => {
                    let line_end = self.line_end();
                    if let Some((level, title)) = scan_heading(&self.text[self.pos..line_end]) {
                        self.flush_text(self.pos);
                        self.nodes.push(MarkupNode::Heading { level, title });
                        // The terminating newline stays with the
                        // following text run.
                        self.pos = line_end;
                        self.text_start = line_end;
                    } else {
                        // Not a heading; rescan the line for templates.
                        self.pos += 1;
                    }
                }
                b'{' if self.peek_is(b'{') => {
                    if let Some((template, end)) = self.scan_template(self.pos) {
                        self.flush_text(self.pos);
                        self.nodes.push(MarkupNode::Template(template));
                        self.pos = end;
                        self.text_start = end;
                    } else {
                        // Unclosed or empty template: the braces stay literal.
                        self.pos += 2;
                    }
                }
                _ => self.pos += 1,
            }
        }

        self.flush_text(len);
        trace!(nodes = self.nodes.len(), "parsed document");
        Document::new(self.nodes)
    }

    /// Byte offset of the next `\n` at or after the cursor, or end of input.
    fn line_end(&self) -> usize {
        self.bytes[self.pos..]
            .iter()
            .position(|&b| b == b'\n')
            .map(|off| self.pos + off)
            .unwrap_or(self.bytes.len())
    }

    fn peek_is(&self, byte: u8) -> bool {
        self.pos + 1 < self.bytes.len() && self.bytes[self.pos + 1] == byte
    }

    /// Emit the pending literal-text run ending at `end`, if non-empty.
    fn flush_text(&mut self, end: usize) {
        if end > self.text_start {
            self.nodes.push(MarkupNode::Text {
                content: self.text[self.text_start..end].to_string(),
            });
        }
    }

    /// Scan a template starting at `start` (which points at `{{`).
    ///
    /// Returns the template and the offset just past its closing `}}`,
    /// or `None` when the construct never closes or has a blank name.
    /// Parameter boundaries are only recognized at template depth one
    /// and outside `[[...]]`, so pipes in nested templates and wikilinks
    /// stay part of the surrounding value.
    fn scan_template(&self, start: usize) -> Option<(Template, usize)> {
        let bytes = self.bytes;
        let len = bytes.len();

        let mut i = start + 2;
        let mut template_depth = 1usize;
        let mut link_depth = 0usize;

        // (start, end, first top-level '=') spans between top-level pipes.
        let mut segments: Vec<(usize, usize, Option<usize>)> = Vec::new();
        let mut seg_start = i;
        let mut eq_pos: Option<usize> = None;

        while i < len {
            match bytes[i] {
                b'{' if i + 1 < len && bytes[i + 1] == b'{' => {
                    template_depth += 1;
                    i += 2;
                }
                b'}' if i + 1 < len && bytes[i + 1] == b'}' => {
                    template_depth -= 1;
                    if template_depth == 0 {
                        segments.push((seg_start, i, eq_pos));
                        return self.build_template(&segments).map(|t| (t, i + 2));
                    }
                    i += 2;
                }
                b'[' if i + 1 < len && bytes[i + 1] == b'[' => {
                    link_depth += 1;
                    i += 2;
                }
                b']' if i + 1 < len && bytes[i + 1] == b']' => {
                    link_depth = link_depth.saturating_sub(1);
                    i += 2;
                }
                b'|' if template_depth == 1 && link_depth == 0 => {
                    segments.push((seg_start, i, eq_pos));
                    seg_start = i + 1;
                    eq_pos = None;
                    i += 1;
                }
                b'=' if template_depth == 1 && link_depth == 0 && eq_pos.is_none() => {
                    eq_pos = Some(i);
                    i += 1;
                }
                _ => i += 1,
            }
        }

        None
    }

    fn build_template(&self, segments: &[(usize, usize, Option<usize>)]) -> Option<Template> {
        let (name_start, name_end, _) = segments[0];
        let name = self.text[name_start..name_end].trim();
        if name.is_empty() {
            return None;
        }

        let mut template = Template::new(name);
        for &(seg_start, seg_end, eq) in &segments[1..] {
            match eq {
                // Keys are trimmed, values kept raw.
                Some(eq) => {
                    let key = self.text[seg_start..eq].trim();
                    template.set(key, &self.text[eq + 1..seg_end]);
                }
                None => template.push_positional(&self.text[seg_start..seg_end]),
            }
        }
        Some(template)
    }
}

// ---------------------------------------------------------------------------
// Heading recognition
// ---------------------------------------------------------------------------

/// Try to read a heading from one line (cursor at line start).
///
/// A heading line starts and ends with runs of `=` that do not overlap;
/// the level is the shorter run capped at six, and the title is whatever
/// sits between two level-sized marker runs, trimmed. A line consisting
/// only of `=` is not a heading.
fn scan_heading(line: &str) -> Option<(usize, String)> {
    let line = line.trim_end();
    if !line.starts_with('=') || !line.ends_with('=') {
        return None;
    }

    let bytes = line.as_bytes();
    let open = bytes.iter().take_while(|&&b| b == b'=').count();
    let close = bytes.iter().rev().take_while(|&&b| b == b'=').count();
    if open + close > line.len() {
        return None;
    }

    let level = open.min(close).min(6);
    let title = line[level..line.len() - level].trim().to_string();
    Some((level, title))
}
