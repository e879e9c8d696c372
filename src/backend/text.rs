//! Indentation-aware, line-buffered text builder with placeholders.
//!
//! A [`TextAccumulator`] is an owned tree: an ordered list of terminated lines and nested
//! placeholder accumulators, plus one open "current" line. Placeholders let the emitter reserve a
//! position (the import block of a translation unit, say) and fill it after later text has been
//! written, without re-traversing what was already emitted.
//!
//! ## Rendering
//!
//! - A terminated line renders as its text followed by `\n`.
//! - A placeholder renders its own segments, then its current line followed by `\n` if that line is
//!   non-empty. An empty placeholder renders nothing.
//! - The root's current line renders as-is, without a trailing `\n`.
//!
//! ## Examples
//!
//! ```rust
//! use ts2go::backend::text::TextAccumulator;
//!
//! let mut out = TextAccumulator::new();
//! out.append_line("before");
//! let slot = out.insert_placeholder();
//! out.append("after");
//! out.placeholder_mut(slot).append("middle");
//! assert_eq!(out.to_string(), "before\nmiddle\nafter");
//! ```

use std::fmt;

/// Default indentation unit: one tab per level.
pub const DEFAULT_INDENT_UNIT: &str = "\t";

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Line(String),
    Placeholder(TextAccumulator),
}

/// Handle to a placeholder created by [`TextAccumulator::insert_placeholder`].
///
/// Only meaningful for the accumulator that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaceholderId(usize);

/// Line-buffered text builder.
#[derive(Debug, Clone, PartialEq)]
pub struct TextAccumulator {
    segments: Vec<Segment>,
    current: String,
    indent_level: usize,
    indent_unit: String,
}

impl Default for TextAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

impl TextAccumulator {
    pub fn new() -> Self {
        Self::with_indent_unit(DEFAULT_INDENT_UNIT)
    }

    pub fn with_indent_unit(unit: impl Into<String>) -> Self {
        Self {
            segments: Vec::new(),
            current: String::new(),
            indent_level: 0,
            indent_unit: unit.into(),
        }
    }

    /// Append `text` to the current line, indenting first if the line is still empty.
    pub fn append(&mut self, text: &str) {
        if self.current.is_empty() {
            self.current.push_str(&self.indent_unit.repeat(self.indent_level));
        }
        self.current.push_str(text);
    }

    /// Append `text`, then terminate the current line.
    pub fn append_line(&mut self, text: &str) {
        if !text.is_empty() {
            self.append(text);
        }
        self.new_line();
    }

    /// Terminate the current line (possibly empty) and start a new one.
    pub fn new_line(&mut self) {
        let line = std::mem::take(&mut self.current);
        self.segments.push(Segment::Line(line));
    }

    /// Clear the current line if it has text; otherwise drop the last terminated line.
    ///
    /// A placeholder is never removed: if it is the last segment, nothing happens.
    pub fn remove_line(&mut self) {
        if !self.current.is_empty() {
            self.current.clear();
            return;
        }
        if matches!(self.segments.last(), Some(Segment::Line(_))) {
            self.segments.pop();
        }
    }

    pub fn indent(&mut self) {
        self.indent_level += 1;
    }

    /// Saturates at zero; mis-paired calls are the caller's problem.
    pub fn unindent(&mut self) {
        self.indent_level = self.indent_level.saturating_sub(1);
    }

    pub fn indent_level(&self) -> usize {
        self.indent_level
    }

    /// Reserve a nested accumulator at the current position.
    ///
    /// A non-empty current line is terminated first, so text written to the parent afterwards lands
    /// on a fresh line after the placeholder. The placeholder inherits the indent level and unit.
    pub fn insert_placeholder(&mut self) -> PlaceholderId {
        if !self.current.is_empty() {
            self.new_line();
        }
        let mut nested = TextAccumulator::with_indent_unit(self.indent_unit.clone());
        nested.indent_level = self.indent_level;
        self.segments.push(Segment::Placeholder(nested));
        PlaceholderId(self.segments.len() - 1)
    }

    /// The placeholder behind `id`.
    ///
    /// ## Panics
    /// - If `id` was not produced by this accumulator (misuse, not a data condition).
    pub fn placeholder_mut(&mut self, id: PlaceholderId) -> &mut TextAccumulator {
        match self.segments.get_mut(id.0) {
            Some(Segment::Placeholder(nested)) => nested,
            _ => panic!("INVARIANT: placeholder id does not belong to this accumulator"),
        }
    }

    /// Move the placeholder's content out, leaving an empty placeholder with the same indentation.
    pub fn take_placeholder(&mut self, id: PlaceholderId) -> TextAccumulator {
        let slot = self.placeholder_mut(id);
        let mut empty = TextAccumulator::with_indent_unit(slot.indent_unit.clone());
        empty.indent_level = slot.indent_level;
        std::mem::replace(slot, empty)
    }

    /// Replace the placeholder's content.
    pub fn fill(&mut self, id: PlaceholderId, content: TextAccumulator) {
        *self.placeholder_mut(id) = content;
    }

    /// `true` when nothing would be rendered.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
            && self.segments.iter().all(|segment| match segment {
                Segment::Line(_) => false,
                Segment::Placeholder(nested) => nested.is_empty(),
            })
    }

    fn render_segments(&self, out: &mut String) {
        for segment in &self.segments {
            match segment {
                Segment::Line(line) => {
                    out.push_str(line);
                    out.push('\n');
                }
                Segment::Placeholder(nested) => nested.render_nested(out),
            }
        }
    }

    fn render_nested(&self, out: &mut String) {
        self.render_segments(out);
        if !self.current.is_empty() {
            out.push_str(&self.current);
            out.push('\n');
        }
    }
}

impl fmt::Display for TextAccumulator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::new();
        self.render_segments(&mut out);
        out.push_str(&self.current);
        f.write_str(&out)
    }
}
