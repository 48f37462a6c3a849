//! The fragment transformation pipeline: pure functions from one
//! `(fragments, position maps)` triple to another, composed left to right.

use crate::collab::DocumentSnapshot;
use crate::fragment::{Fragment, FragmentList};
use crate::screen::WindowId;
use crate::style::StyleString;
use std::sync::Arc;

/// A position-mapping function, shared so composed transformations can close
/// over several of these cheaply.
pub type PositionMap = Arc<dyn Fn(usize) -> usize + Send + Sync>;

fn identity_map() -> PositionMap {
    Arc::new(|i| i)
}

/// The output of a single processor (or a composed pipeline of them): a new
/// fragment list, plus the forward and reverse position maps relating source
/// character offsets to display character offsets.
#[derive(Clone)]
pub struct Transformation {
    /// The transformed fragments.
    pub fragments: FragmentList,
    /// Maps a source offset to its display offset.
    pub source_to_display: PositionMap,
    /// Maps a display offset back to its source offset.
    pub display_to_source: PositionMap,
}

impl Transformation {
    /// A transformation that changes nothing: identity maps in both
    /// directions.
    pub fn identity(fragments: FragmentList) -> Self {
        Self {
            fragments,
            source_to_display: identity_map(),
            display_to_source: identity_map(),
        }
    }
}

/// Everything a [`Processor`] needs to transform one line.
#[derive(Clone)]
pub struct TransformationInput {
    /// The control this line belongs to.
    pub control_id: WindowId,
    /// A snapshot of the owning buffer's text/cursor/search state.
    pub document: DocumentSnapshot,
    /// Which line of the control is being processed, 0-based.
    pub line_number: usize,
    /// The source→display map accumulated by earlier stages.
    pub source_to_display: PositionMap,
    /// The fragments produced by earlier stages (or the control's raw line).
    pub fragments: FragmentList,
    /// Viewport width available to this control.
    pub width: u16,
    /// Viewport height available to this control.
    pub height: u16,
    /// Fetches the raw text of an arbitrary line number of this control, for
    /// processors that need cross-line context. Returns `None` past the last
    /// line.
    pub get_line: Arc<dyn Fn(usize) -> Option<String> + Send + Sync>,
}

impl TransformationInput {
    /// `true` when `line_number` is the first line.
    pub fn is_first_line(&self) -> bool {
        self.line_number == 0
    }

    /// `true` when `line_number` is the last line (no line follows it).
    pub fn is_last_line(&self) -> bool {
        (self.get_line)(self.line_number + 1).is_none()
    }
}

/// A pure transformation from one `TransformationInput` to a `Transformation`.
pub trait Processor: Send + Sync {
    /// Applies this processor to `input`.
    fn apply(&self, input: &TransformationInput) -> Transformation;
}

/// The processor that changes nothing; what `merge_processors(&[])` returns.
pub struct IdentityProcessor;

impl Processor for IdentityProcessor {
    fn apply(&self, input: &TransformationInput) -> Transformation {
        Transformation::identity(input.fragments.clone())
    }
}

/// Replaces every character with a mask, preserving style and mouse handler.
pub struct PasswordProcessor {
    /// The mask character, `*` by default.
    pub mask: char,
}

impl Default for PasswordProcessor {
    fn default() -> Self {
        Self { mask: '*' }
    }
}

impl Processor for PasswordProcessor {
    fn apply(&self, input: &TransformationInput) -> Transformation {
        let exploded = input.fragments.explode();
        let masked: FragmentList = exploded
            .iter()
            .map(|f| Fragment {
                style: f.style.clone(),
                text: self.mask.to_string(),
                mouse_handler: f.mouse_handler.clone(),
            })
            .collect();
        Transformation::identity(masked)
    }
}

/// Re-styles the characters covered by the document's active selection, if
/// any; otherwise passes the fragments through unchanged.
pub struct HighlightSelectionProcessor {
    /// The style tokens applied over selected characters.
    pub style: StyleString,
}

impl Default for HighlightSelectionProcessor {
    fn default() -> Self {
        Self {
            style: StyleString::new("class:selected reverse"),
        }
    }
}

impl Processor for HighlightSelectionProcessor {
    fn apply(&self, input: &TransformationInput) -> Transformation {
        let Some((start, end)) = input.document.selection.filter(|(s, e)| s < e) else {
            return Transformation::identity(input.fragments.clone());
        };
        let exploded = input.fragments.explode();
        let styled: FragmentList = exploded
            .iter()
            .enumerate()
            .map(|(i, f)| {
                if i >= start && i < end {
                    Fragment {
                        style: self.style.compose_over(&f.style),
                        text: f.text.clone(),
                        mouse_handler: f.mouse_handler.clone(),
                    }
                } else {
                    f.clone()
                }
            })
            .collect();
        Transformation::identity(styled)
    }
}

fn highlight_occurrences(fragments: &FragmentList, needle: &str, style: &StyleString) -> FragmentList {
    if needle.is_empty() {
        return fragments.clone();
    }
    let exploded = fragments.explode();
    let full: String = exploded.iter().map(|f| f.text.as_str()).collect();
    let chars: Vec<char> = full.chars().collect();
    let needle_len = needle.chars().count();
    let mut covered = vec![false; chars.len()];
    let mut start = 0;
    while start + needle_len <= chars.len() {
        let window: String = chars[start..start + needle_len].iter().collect();
        if window == needle {
            for slot in covered.iter_mut().take(start + needle_len).skip(start) {
                *slot = true;
            }
            start += needle_len.max(1);
        } else {
            start += 1;
        }
    }
    exploded
        .iter()
        .enumerate()
        .map(|(i, f)| {
            if covered.get(i).copied().unwrap_or(false) {
                Fragment {
                    style: style.compose_over(&f.style),
                    text: f.text.clone(),
                    mouse_handler: f.mouse_handler.clone(),
                }
            } else {
                f.clone()
            }
        })
        .collect()
}

/// Re-styles matches of the search buffer's text. A no-op when the owning
/// application is done, or the search text is empty.
pub struct HighlightSearchProcessor {
    /// The style tokens applied over matches.
    pub style: StyleString,
}

impl Default for HighlightSearchProcessor {
    fn default() -> Self {
        Self {
            style: StyleString::new("class:search-match"),
        }
    }
}

impl Processor for HighlightSearchProcessor {
    fn apply(&self, input: &TransformationInput) -> Transformation {
        let needle = input.document.search_text.as_deref().unwrap_or("");
        if input.document.is_done || needle.is_empty() {
            return Transformation::identity(input.fragments.clone());
        }
        Transformation::identity(highlight_occurrences(&input.fragments, needle, &self.style))
    }
}

/// Subtype of [`HighlightSearchProcessor`] that only applies while an
/// incremental search is in progress.
pub struct HighlightIncrementalSearchProcessor {
    /// The style tokens applied over matches.
    pub style: StyleString,
}

impl Default for HighlightIncrementalSearchProcessor {
    fn default() -> Self {
        Self {
            style: StyleString::new("class:search-match class:current"),
        }
    }
}

impl Processor for HighlightIncrementalSearchProcessor {
    fn apply(&self, input: &TransformationInput) -> Transformation {
        let needle = input.document.search_text.as_deref().unwrap_or("");
        if input.document.is_done || needle.is_empty() || !input.document.incremental_search_active {
            return Transformation::identity(input.fragments.clone());
        }
        Transformation::identity(highlight_occurrences(&input.fragments, needle, &self.style))
    }
}

/// On the last line only, appends a fragment containing the buffer's current
/// auto-suggestion text. Empty when there is none, or the cursor is not at
/// the end of the buffer.
pub struct AppendAutoSuggestion {
    /// The style applied to the suggestion text.
    pub style: StyleString,
}

impl Processor for AppendAutoSuggestion {
    fn apply(&self, input: &TransformationInput) -> Transformation {
        if !input.is_last_line() || !input.document.cursor_at_end() {
            return Transformation::identity(input.fragments.clone());
        }
        let Some(suggestion) = input.document.suggestion.as_ref().filter(|s| !s.is_empty()) else {
            return Transformation::identity(input.fragments.clone());
        };
        let mut fragments = input.fragments.clone();
        fragments.push(Fragment::new(self.style.clone(), suggestion.clone()));
        Transformation::identity(fragments)
    }
}

/// On the last line only, appends a trailing fragment. Other lines pass
/// through unchanged.
pub struct AfterInput {
    /// The text to append.
    pub text: String,
    /// The style of the appended fragment.
    pub style: StyleString,
}

impl Processor for AfterInput {
    fn apply(&self, input: &TransformationInput) -> Transformation {
        if !input.is_last_line() {
            return Transformation::identity(input.fragments.clone());
        }
        let mut fragments = input.fragments.clone();
        fragments.push(Fragment::new(self.style.clone(), self.text.clone()));
        Transformation::identity(fragments)
    }
}

/// Symmetrical to [`AfterInput`]: on the first line only, prepends a fragment.
/// Shifts the source→display map forward by the prefix's display width since
/// the prefix carries no source characters of its own.
pub struct BeforeInput {
    /// The text to prepend.
    pub text: String,
    /// The style of the prepended fragment.
    pub style: StyleString,
}

impl Processor for BeforeInput {
    fn apply(&self, input: &TransformationInput) -> Transformation {
        if !input.is_first_line() {
            return Transformation::identity(input.fragments.clone());
        }
        let prefix_width = unicode_width::UnicodeWidthStr::width(self.text.as_str());
        let mut fragments = FragmentList::new();
        fragments.push(Fragment::new(self.style.clone(), self.text.clone()));
        for f in input.fragments.iter() {
            fragments.push(f.clone());
        }
        let prior = input.source_to_display.clone();
        let prior_rev = identity_map();
        let forward: PositionMap = Arc::new(move |i| prior(i) + prefix_width);
        let backward: PositionMap = Arc::new(move |d| prior_rev(d.saturating_sub(prefix_width)));
        Transformation {
            fragments,
            source_to_display: forward,
            display_to_source: backward,
        }
    }
}

/// A parameter that may be a fixed value or computed lazily at apply-time.
pub enum Lazy<T> {
    /// A fixed value.
    Static(T),
    /// A value computed fresh on every application.
    Dynamic(Arc<dyn Fn() -> T + Send + Sync>),
}

impl<T: Clone> Lazy<T> {
    fn resolve(&self) -> T {
        match self {
            Lazy::Static(v) => v.clone(),
            Lazy::Dynamic(f) => f(),
        }
    }
}

/// Expands `\t` into `char1` followed by `tabstop - (col % tabstop) - 1`
/// copies of `char2`, updating both position maps.
pub struct TabsProcessor {
    /// Tab stop width.
    pub tabstop: Lazy<usize>,
    /// The first glyph of an expanded tab.
    pub char1: Lazy<char>,
    /// The fill glyph of an expanded tab.
    pub char2: Lazy<char>,
    /// The style applied to the expansion glyphs.
    pub style: StyleString,
}

impl Default for TabsProcessor {
    fn default() -> Self {
        Self {
            tabstop: Lazy::Static(4),
            char1: Lazy::Static('|'),
            char2: Lazy::Static('\u{2508}'),
            style: StyleString::empty(),
        }
    }
}

impl Processor for TabsProcessor {
    fn apply(&self, input: &TransformationInput) -> Transformation {
        let tabstop = self.tabstop.resolve().max(1);
        let char1 = self.char1.resolve();
        let char2 = self.char2.resolve();
        let exploded = input.fragments.explode();

        let mut fragments = Vec::new();
        let mut forward_starts = Vec::with_capacity(exploded.len() + 1);
        let mut col = 0usize;
        for f in exploded.iter() {
            forward_starts.push(col);
            if f.text == "\t" {
                let fill = tabstop.saturating_sub(col % tabstop).saturating_sub(1);
                fragments.push(Fragment::new(self.style.clone(), char1.to_string()));
                for _ in 0..fill {
                    fragments.push(Fragment::new(self.style.clone(), char2.to_string()));
                }
                col += 1 + fill;
            } else {
                fragments.push(f.clone());
                col += f.width();
            }
        }
        forward_starts.push(col);

        // `forward_starts` is monotonically non-decreasing, so walk both indices
        // forward together: gaps inside an expanded tab's fill glyphs carry the
        // tab's own source index.
        let mut reverse_lookup = vec![0usize; col + 1];
        let mut source_idx = 0usize;
        for (display_idx, slot) in reverse_lookup.iter_mut().enumerate() {
            while source_idx + 1 < forward_starts.len() && forward_starts[source_idx + 1] <= display_idx {
                source_idx += 1;
            }
            *slot = source_idx;
        }

        let forward_starts = Arc::new(forward_starts);
        let reverse_lookup = Arc::new(reverse_lookup);
        let forward_map = forward_starts.clone();
        let reverse_map = reverse_lookup.clone();
        let source_to_display: PositionMap =
            Arc::new(move |i| forward_map.get(i).copied().unwrap_or_else(|| forward_map[forward_map.len() - 1]));
        let display_to_source: PositionMap =
            Arc::new(move |d| reverse_map.get(d).copied().unwrap_or_else(|| reverse_map[reverse_map.len() - 1]));

        Transformation {
            fragments: FragmentList::from_vec(fragments),
            source_to_display,
            display_to_source,
        }
    }
}

fn replace_run<F>(fragments: &FragmentList, substitute: char, class: &str, is_run_char: F, leading: bool) -> FragmentList
where
    F: Fn(&str) -> bool,
{
    let exploded = fragments.explode();
    let slice = exploded.as_slice();
    let run_end = if leading {
        slice.iter().take_while(|f| is_run_char(&f.text)).count()
    } else {
        slice.len()
            - slice
                .iter()
                .rev()
                .take_while(|f| is_run_char(&f.text))
                .count()
    };
    slice
        .iter()
        .enumerate()
        .map(|(i, f)| {
            let in_run = if leading { i < run_end } else { i >= run_end };
            if in_run && is_run_char(&f.text) {
                Fragment::new(
                    StyleString::new(format!("class:{class} {}", f.style.as_str())),
                    substitute.to_string(),
                )
            } else {
                f.clone()
            }
        })
        .collect()
}

/// Replaces a run of leading space characters with a substitute glyph.
/// Width-preserving.
pub struct ShowLeadingWhiteSpace {
    /// The glyph drawn in place of each leading space.
    pub substitute: char,
}

impl Default for ShowLeadingWhiteSpace {
    fn default() -> Self {
        Self { substitute: '\u{b7}' }
    }
}

impl Processor for ShowLeadingWhiteSpace {
    fn apply(&self, input: &TransformationInput) -> Transformation {
        // Kept class name intentionally matches a long-standing misspelling;
        // `ShowTrailingWhiteSpace` below uses the corrected spelling.
        let fragments = replace_run(&input.fragments, self.substitute, "leading-whitespce", |t| t == " ", true);
        Transformation::identity(fragments)
    }
}

/// Replaces a run of trailing space characters with a substitute glyph.
/// Width-preserving.
pub struct ShowTrailingWhiteSpace {
    /// The glyph drawn in place of each trailing space.
    pub substitute: char,
}

impl Default for ShowTrailingWhiteSpace {
    fn default() -> Self {
        Self { substitute: '\u{b7}' }
    }
}

impl Processor for ShowTrailingWhiteSpace {
    fn apply(&self, input: &TransformationInput) -> Transformation {
        let fragments = replace_run(&input.fragments, self.substitute, "trailing-whitespace", |t| t == " ", false);
        Transformation::identity(fragments)
    }
}

/// On line 0 only, if a search target buffer exists, replaces the line's
/// fragments with an `(i-search)` prefix followed by the search text.
pub struct ReverseSearchProcessor {
    /// The style of the synthesised prompt fragment.
    pub style: StyleString,
}

impl Default for ReverseSearchProcessor {
    fn default() -> Self {
        Self {
            style: StyleString::new("class:reverse-search-prompt"),
        }
    }
}

impl Processor for ReverseSearchProcessor {
    fn apply(&self, input: &TransformationInput) -> Transformation {
        if input.line_number != 0 {
            return Transformation::identity(input.fragments.clone());
        }
        let Some(search_text) = input.document.search_text.as_ref() else {
            return Transformation::identity(input.fragments.clone());
        };
        let prompt = format!("(i-search)`{search_text}'");
        let mut fragments = FragmentList::new();
        fragments.push(Fragment::new(self.style.clone(), prompt));
        Transformation::identity(fragments)
    }
}

struct CompositeProcessor {
    processors: Vec<Arc<dyn Processor>>,
}

impl Processor for CompositeProcessor {
    fn apply(&self, input: &TransformationInput) -> Transformation {
        let mut fragments = input.fragments.clone();
        let mut total_s2d: PositionMap = identity_map();
        let mut total_d2s: PositionMap = identity_map();

        for processor in &self.processors {
            let step_input = TransformationInput {
                control_id: input.control_id,
                document: input.document.clone(),
                line_number: input.line_number,
                source_to_display: identity_map(),
                fragments,
                width: input.width,
                height: input.height,
                get_line: input.get_line.clone(),
            };
            let result = processor.apply(&step_input);
            fragments = result.fragments;

            let prev_s2d = total_s2d.clone();
            let child_s2d = result.source_to_display.clone();
            total_s2d = Arc::new(move |i| child_s2d(prev_s2d(i)));

            let prev_d2s = total_d2s.clone();
            let child_d2s = result.display_to_source.clone();
            total_d2s = Arc::new(move |d| prev_d2s(child_d2s(d)));
        }

        Transformation {
            fragments,
            source_to_display: total_s2d,
            display_to_source: total_d2s,
        }
    }
}

/// Composes `processors` into one. An empty list returns an identity
/// processor; a single-element list returns it unchanged; otherwise the
/// composite discards any pre-existing non-identity `source_to_display` on
/// the supplied input and re-establishes its own mapping base.
pub fn merge_processors(mut processors: Vec<Arc<dyn Processor>>) -> Arc<dyn Processor> {
    match processors.len() {
        0 => Arc::new(IdentityProcessor),
        1 => processors.remove(0),
        _ => Arc::new(CompositeProcessor { processors }),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn input(fragments: FragmentList) -> TransformationInput {
        TransformationInput {
            control_id: crate::screen::WindowIdAllocator::new().next(),
            document: DocumentSnapshot::default(),
            line_number: 0,
            source_to_display: identity_map(),
            fragments,
            width: 80,
            height: 24,
            get_line: Arc::new(|_| None),
        }
    }

    fn plain(text: &str) -> FragmentList {
        FragmentList::from_vec(vec![Fragment::new(StyleString::empty(), text)])
    }

    #[test]
    fn password_processor_masks_every_character() {
        let processor = PasswordProcessor::default();
        let result = processor.apply(&input(plain("secret")));
        let joined: String = result.fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(joined, "******");
    }

    #[test]
    fn highlight_selection_passthrough_without_selection() {
        let processor = HighlightSelectionProcessor::default();
        let frags = plain("hello");
        let result = processor.apply(&input(frags.clone()));
        assert_eq!(result.fragments, frags);
    }

    #[test]
    fn highlight_selection_styles_covered_range() {
        let processor = HighlightSelectionProcessor::default();
        let mut ti = input(plain("hello"));
        ti.document.selection = Some((1, 3));
        let result = processor.apply(&ti);
        assert!(result.fragments.as_slice()[1].style.has_class("selected"));
        assert!(!result.fragments.as_slice()[0].style.has_class("selected"));
    }

    #[test]
    fn highlight_search_noop_when_done_or_empty() {
        let processor = HighlightSearchProcessor::default();
        let mut ti = input(plain("hello world"));
        ti.document.search_text = Some("world".to_string());
        ti.document.is_done = true;
        let result = processor.apply(&ti);
        assert!(!result.fragments.as_slice()[6].style.has_class("search-match"));
    }

    #[test]
    fn highlight_search_styles_match() {
        let processor = HighlightSearchProcessor::default();
        let mut ti = input(plain("hello world"));
        ti.document.search_text = Some("world".to_string());
        let result = processor.apply(&ti);
        assert!(result.fragments.as_slice()[6].style.has_class("search-match"));
        assert!(!result.fragments.as_slice()[0].style.has_class("search-match"));
    }

    #[test]
    fn append_auto_suggestion_only_at_end_of_last_line() {
        let processor = AppendAutoSuggestion {
            style: StyleString::new("class:suggestion"),
        };
        let mut ti = input(plain("go"));
        ti.document.text = "go".to_string();
        ti.document.cursor = 2;
        ti.document.suggestion = Some("od".to_string());
        let result = processor.apply(&ti);
        assert_eq!(result.fragments.as_slice().last().unwrap().text, "od");
    }

    #[test]
    fn after_input_appends_only_on_last_line() {
        let processor = AfterInput {
            text: ">".to_string(),
            style: StyleString::empty(),
        };
        let mut ti = input(plain("x"));
        ti.get_line = Arc::new(|n| if n == 0 { None } else { Some(String::new()) });
        let result = processor.apply(&ti);
        assert_eq!(result.fragments.as_slice().last().unwrap().text, ">");
    }

    #[test]
    fn before_input_prepends_and_shifts_mapping() {
        let processor = BeforeInput {
            text: ">>".to_string(),
            style: StyleString::empty(),
        };
        let ti = input(plain("x"));
        let result = processor.apply(&ti);
        assert_eq!(result.fragments.as_slice()[0].text, ">>");
        assert_eq!((result.source_to_display)(0), 2);
        assert_eq!((result.display_to_source)(2), 0);
    }

    #[test]
    fn tabs_processor_expands_and_maps_round_trip() {
        let processor = TabsProcessor {
            tabstop: Lazy::Static(4),
            ..TabsProcessor::default()
        };
        let ti = input(plain("a\tb"));
        let result = processor.apply(&ti);
        let joined: String = result.fragments.iter().map(|f| f.text.as_str()).collect();
        assert_eq!(joined.chars().count(), 5); // a + (| + 2 fill) + b
        for i in 0..3usize {
            let d = (result.source_to_display)(i);
            assert_eq!((result.display_to_source)(d), i);
        }
    }

    #[test]
    fn show_leading_white_space_replaces_prefix_only() {
        let processor = ShowLeadingWhiteSpace::default();
        let ti = input(plain("  ab  "));
        let result = processor.apply(&ti);
        let slice = result.fragments.as_slice();
        assert_eq!(slice[0].text, processor.substitute.to_string());
        assert_eq!(slice[1].text, processor.substitute.to_string());
        assert_eq!(slice[2].text, "a");
        assert_eq!(slice[4].text, " ");
    }

    #[test]
    fn show_trailing_white_space_replaces_suffix_only() {
        let processor = ShowTrailingWhiteSpace::default();
        let ti = input(plain("  ab  "));
        let result = processor.apply(&ti);
        let slice = result.fragments.as_slice();
        assert_eq!(slice[0].text, " ");
        assert_eq!(slice[4].text, processor.substitute.to_string());
        assert_eq!(slice[5].text, processor.substitute.to_string());
    }

    #[test]
    fn reverse_search_replaces_line_zero_only() {
        let processor = ReverseSearchProcessor::default();
        let mut ti = input(plain("irrelevant"));
        ti.document.search_text = Some("foo".to_string());
        let result = processor.apply(&ti);
        assert_eq!(result.fragments.len(), 1);
        assert_eq!(result.fragments.as_slice()[0].text, "(i-search)`foo'");
    }

    #[test]
    fn merge_empty_is_identity() {
        let merged = merge_processors(Vec::new());
        let ti = input(plain("abc"));
        let result = merged.apply(&ti);
        assert_eq!(result.fragments, ti.fragments);
        assert_eq!((result.source_to_display)(2), 2);
    }

    #[test]
    fn merge_single_is_unchanged() {
        let processor: Arc<dyn Processor> = Arc::new(PasswordProcessor::default());
        let merged = merge_processors(vec![processor.clone()]);
        let ti = input(plain("ab"));
        let direct = processor.apply(&ti);
        let via_merge = merged.apply(&ti);
        assert_eq!(direct.fragments, via_merge.fragments);
    }

    struct ShiftProcessor(usize);
    impl Processor for ShiftProcessor {
        fn apply(&self, input: &TransformationInput) -> Transformation {
            let shift = self.0;
            Transformation {
                fragments: input.fragments.clone(),
                source_to_display: Arc::new(move |i| i + shift),
                display_to_source: Arc::new(move |d| d.saturating_sub(shift)),
            }
        }
    }

    #[test]
    fn composed_offset_processors_sum_shifts() {
        let processors: Vec<Arc<dyn Processor>> =
            vec![Arc::new(ShiftProcessor(2)), Arc::new(ShiftProcessor(3))];
        let merged = merge_processors(processors);
        let ti = input(plain("abcdef"));
        let result = merged.apply(&ti);
        assert_eq!((result.source_to_display)(1), 1 + 5);
        assert_eq!((result.display_to_source)(6), 1);
    }
}
