//! # Selection Mirroring
//!
//! Maps a selection in one text view to the same line range in a paired
//! view, so selecting input lines highlights their conversions and vice
//! versa.
//!
//! Offsets are character offsets. Lines are `\n`-separated, so `"a\n"` has
//! two lines (the second one empty).
//!
//! Applying a mirrored selection usually fires the paired view's own
//! selection callback. [`SelectionMirror`] carries an in-progress flag so
//! the nested call returns without mirroring back.

use std::cell::Cell;

/// Inclusive range of line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

/// What the host should do with the paired view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mirror {
    /// Select the character span `start..end`
    Select { start: usize, end: usize },
    /// Clear the selection
    Clear,
}

/// Lines covered by the selection `sel_start..sel_end`.
///
/// Returns `None` for an empty selection. Offsets past the end of `text`
/// are clamped.
pub fn line_range_of(text: &str, sel_start: usize, sel_end: usize) -> Option<LineRange> {
    if sel_start == sel_end {
        return None;
    }
    let (lo, hi) = (sel_start.min(sel_end), sel_start.max(sel_end));
    Some(LineRange {
        start: line_at(text, lo),
        end: line_at(text, hi),
    })
}

/// Line number containing the character offset `offset`.
fn line_at(text: &str, offset: usize) -> usize {
    text.chars().take(offset).filter(|&c| c == '\n').count()
}

/// Number of lines in `text`.
pub fn line_count(text: &str) -> usize {
    text.split('\n').count()
}

/// Character span from the start of `range.start` to the end of
/// `range.end`, newline excluded. `None` if either line does not exist.
pub fn span_of(text: &str, range: LineRange) -> Option<(usize, usize)> {
    let mut offset = 0;
    let mut start = None;
    for (number, line) in text.split('\n').enumerate() {
        if number == range.start {
            start = Some(offset);
        }
        let len = line.chars().count();
        if number == range.end {
            return start.map(|s| (s, offset + len));
        }
        offset += len + 1;
    }
    None
}

/// Mirror an input selection onto the output view.
pub fn input_to_output(input: &str, output: &str, selection: (usize, usize)) -> Option<Mirror> {
    let range = line_range_of(input, selection.0, selection.1)?;
    span_of(output, range).map(|(start, end)| Mirror::Select { start, end })
}

/// Mirror an output selection onto the input view.
///
/// Output lines past the end of the input clear the input selection.
pub fn output_to_input(output: &str, input: &str, selection: (usize, usize)) -> Option<Mirror> {
    let range = line_range_of(output, selection.0, selection.1)?;
    if range.start >= line_count(input) {
        return Some(Mirror::Clear);
    }
    span_of(input, range).map(|(start, end)| Mirror::Select { start, end })
}

/// Two-way selection sync with a reentrancy guard.
#[derive(Debug, Default)]
pub struct SelectionMirror {
    in_progress: Cell<bool>,
}

/// Clears the in-progress flag when dropped.
struct InProgress<'a>(&'a Cell<bool>);

impl Drop for InProgress<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

impl SelectionMirror {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a mirror is being applied right now.
    pub fn in_progress(&self) -> bool {
        self.in_progress.get()
    }

    /// Input selection changed: compute the output selection and hand it to
    /// `apply`. Returns `false` without calling `apply` when nested inside
    /// another sync or when there is nothing to mirror.
    pub fn sync_from_input<F>(
        &self,
        input: &str,
        output: &str,
        selection: (usize, usize),
        apply: F,
    ) -> bool
    where
        F: FnOnce(Mirror),
    {
        self.run(|| input_to_output(input, output, selection), apply)
    }

    /// Output selection changed: compute the input selection and hand it to
    /// `apply`. Same guard behavior as [`SelectionMirror::sync_from_input`].
    pub fn sync_from_output<F>(
        &self,
        output: &str,
        input: &str,
        selection: (usize, usize),
        apply: F,
    ) -> bool
    where
        F: FnOnce(Mirror),
    {
        self.run(|| output_to_input(output, input, selection), apply)
    }

    fn run<C, F>(&self, compute: C, apply: F) -> bool
    where
        C: FnOnce() -> Option<Mirror>,
        F: FnOnce(Mirror),
    {
        if self.in_progress.replace(true) {
            return false;
        }
        let _guard = InProgress(&self.in_progress);
        match compute() {
            Some(mirror) => {
                apply(mirror);
                true
            }
            None => false,
        }
    }
}
