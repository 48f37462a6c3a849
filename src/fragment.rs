//! `FragmentList`: the ordered `(style, text, mouse_handler?)` sequence that
//! lines of the UI are built from, and the processor pipeline's input/output
//! currency.

use crate::event::MouseEvent;
use crate::style::StyleString;
use std::sync::Arc;
use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

/// A callable registered on a fragment; invoked when the user clicks within
/// the fragment's span. Boxed as a trait object since fragments are built and
/// merged across independent processors with no common closure type.
pub type MouseHandler = Arc<dyn Fn(MouseEvent) + Send + Sync>;

/// One `(style, text, optional mouse handler)` triple.
#[derive(Clone)]
pub struct Fragment {
    /// The style tokens applying to `text`.
    pub style: StyleString,
    /// The text this fragment renders.
    pub text: String,
    /// An optional click handler for this fragment's span.
    pub mouse_handler: Option<MouseHandler>,
}

impl Fragment {
    /// Builds a plain fragment with no mouse handler.
    pub fn new(style: StyleString, text: impl Into<String>) -> Self {
        Self {
            style,
            text: text.into(),
            mouse_handler: None,
        }
    }

    /// Builds a fragment with a click handler attached.
    pub fn with_handler(style: StyleString, text: impl Into<String>, handler: MouseHandler) -> Self {
        Self {
            style,
            text: text.into(),
            mouse_handler: Some(handler),
        }
    }

    /// Unicode display width of this fragment's text.
    pub fn width(&self) -> usize {
        UnicodeWidthStr::width(self.text.as_str())
    }
}

impl std::fmt::Debug for Fragment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fragment")
            .field("style", &self.style)
            .field("text", &self.text)
            .field("mouse_handler", &self.mouse_handler.is_some())
            .finish()
    }
}

impl PartialEq for Fragment {
    fn eq(&self, other: &Self) -> bool {
        self.style == other.style && self.text == other.text
    }
}

/// An ordered sequence of [`Fragment`]s.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FragmentList(Vec<Fragment>);

impl FragmentList {
    /// An empty fragment list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Builds a fragment list from an explicit vector.
    pub fn from_vec(fragments: Vec<Fragment>) -> Self {
        Self(fragments)
    }

    /// Appends a fragment.
    pub fn push(&mut self, fragment: Fragment) {
        self.0.push(fragment);
    }

    /// Prepends a fragment.
    pub fn prepend(&mut self, fragment: Fragment) {
        self.0.insert(0, fragment);
    }

    /// Number of fragments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// `true` if there are no fragments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the fragments in order.
    pub fn iter(&self) -> impl Iterator<Item = &Fragment> {
        self.0.iter()
    }

    /// The slice of fragments.
    pub fn as_slice(&self) -> &[Fragment] {
        &self.0
    }

    /// Total Unicode display width: the sum of every fragment's text width.
    pub fn width(&self) -> usize {
        self.0.iter().map(Fragment::width).sum()
    }

    /// `true` if every fragment holds exactly one grapheme cluster — i.e. this
    /// list is already in exploded form, making `explode` idempotent.
    pub fn is_exploded(&self) -> bool {
        self.0
            .iter()
            .all(|f| f.text.graphemes(true).count() <= 1)
    }

    /// Splits every fragment into one fragment per grapheme cluster, each
    /// preserving the original style and mouse handler. Re-exploding an
    /// already-exploded list is a no-op (returns an equivalent list).
    pub fn explode(&self) -> FragmentList {
        if self.is_exploded() {
            return self.clone();
        }
        let mut out = Vec::new();
        for fragment in &self.0 {
            for grapheme in fragment.text.graphemes(true) {
                out.push(Fragment {
                    style: fragment.style.clone(),
                    text: grapheme.to_string(),
                    mouse_handler: fragment.mouse_handler.clone(),
                });
            }
        }
        FragmentList(out)
    }
}

impl FromIterator<Fragment> for FragmentList {
    fn from_iter<T: IntoIterator<Item = Fragment>>(iter: T) -> Self {
        FragmentList(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_sums_fragment_widths() {
        let list = FragmentList::from_vec(vec![
            Fragment::new(StyleString::empty(), "ab"),
            Fragment::new(StyleString::empty(), "中"),
        ]);
        assert_eq!(list.width(), 4); // 2 + 2
    }

    #[test]
    fn explode_splits_to_one_grapheme_per_fragment() {
        let list = FragmentList::from_vec(vec![Fragment::new(StyleString::new("bold"), "abc")]);
        let exploded = list.explode();
        assert_eq!(exploded.len(), 3);
        assert_eq!(exploded.as_slice()[0].text, "a");
        assert_eq!(exploded.as_slice()[1].text, "b");
        assert_eq!(exploded.as_slice()[2].text, "c");
        assert!(exploded.as_slice().iter().all(|f| f.style.as_str() == "bold"));
    }

    #[test]
    fn explode_is_idempotent() {
        let list = FragmentList::from_vec(vec![Fragment::new(StyleString::empty(), "abc")]);
        let once = list.explode();
        let twice = once.explode();
        assert_eq!(once, twice);
    }

    #[test]
    fn explode_preserves_combining_marks_as_one_grapheme() {
        let list = FragmentList::from_vec(vec![Fragment::new(StyleString::empty(), "e\u{0301}X")]);
        let exploded = list.explode();
        assert_eq!(exploded.len(), 2);
        assert_eq!(exploded.as_slice()[0].text, "e\u{0301}");
    }

    #[test]
    fn prepend_puts_fragment_first() {
        let mut list = FragmentList::from_vec(vec![Fragment::new(StyleString::empty(), "b")]);
        list.prepend(Fragment::new(StyleString::empty(), "a"));
        assert_eq!(list.as_slice()[0].text, "a");
    }
}
