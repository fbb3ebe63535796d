//! Windowed pager: a fixed-size visible window over an ordered sequence.
//!
//! The pager keeps a cursor (the start index of the window) and moves it one
//! item at a time. Paging past either end wraps around by default. A move
//! puts the pager into a transition state that swallows further moves until
//! the caller reports the transition finished with
//! [`WindowedPager::complete_transition`].
//!
//! This type does not render anything; see [`crate::slider`] for the
//! component built on top of it.
//!
//! ```rust
//! use bubbletea_carousel::pager::WindowedPager;
//!
//! let mut pager = WindowedPager::new(vec!['A', 'B', 'C', 'D', 'E', 'F', 'G'], 3)?;
//! assert_eq!(pager.visible(), &['A', 'B', 'C']);
//! assert_eq!(pager.max_cursor(), 4);
//!
//! pager.advance();
//! pager.advance(); // ignored, still in transition
//! pager.complete_transition();
//! assert_eq!(pager.visible(), &['B', 'C', 'D']);
//! # Ok::<(), bubbletea_carousel::Error>(())
//! ```

use crate::error::{Error, Result};
use tracing::{debug, trace};

/// What happens when the cursor is moved past either end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Wrap {
    /// Advancing from the last window goes to the first and vice versa.
    #[default]
    Around,
    /// Moves past either end are ignored.
    Clamp,
}

/// A cursor into an ordered sequence exposing a fixed-size window.
///
/// Invariant: `cursor <= max_cursor()`, so `cursor + window_size <= len`
/// whenever the sequence is at least one window long.
#[derive(Debug, Clone)]
pub struct WindowedPager<T> {
    items: Vec<T>,
    window_size: usize,
    cursor: usize,
    in_transition: bool,
    wrap: Wrap,
}

impl<T> WindowedPager<T> {
    /// Creates a pager over `items` showing `window_size` items at a time.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if `window_size` is zero.
    ///
    /// ```rust
    /// use bubbletea_carousel::pager::WindowedPager;
    ///
    /// assert!(WindowedPager::<u8>::new(vec![], 0).is_err());
    /// assert!(WindowedPager::<u8>::new(vec![], 6).is_ok());
    /// ```
    pub fn new(items: Vec<T>, window_size: usize) -> Result<Self> {
        if window_size == 0 {
            return Err(Error::InvalidConfiguration(
                "window size must be at least 1".to_string(),
            ));
        }
        Ok(Self {
            items,
            window_size,
            cursor: 0,
            in_transition: false,
            wrap: Wrap::default(),
        })
    }

    /// Sets the paging policy (builder pattern).
    pub fn with_wrap(mut self, wrap: Wrap) -> Self {
        self.wrap = wrap;
        self
    }

    /// Returns the paging policy.
    pub fn wrap(&self) -> Wrap {
        self.wrap
    }

    /// Sets the paging policy.
    pub fn set_wrap(&mut self, wrap: Wrap) {
        self.wrap = wrap;
    }

    /// Replaces the sequence, clamping the cursor if the new sequence is shorter.
    ///
    /// The transition state is left untouched; a pending completion still
    /// clears it.
    ///
    /// ```rust
    /// use bubbletea_carousel::pager::WindowedPager;
    ///
    /// let mut pager = WindowedPager::new((0..10).collect::<Vec<i32>>(), 3)?;
    /// for _ in 0..6 {
    ///     pager.advance();
    ///     pager.complete_transition();
    /// }
    /// assert_eq!(pager.cursor(), 6);
    ///
    /// pager.set_items((0..5).collect::<Vec<i32>>());
    /// assert_eq!(pager.cursor(), 2);
    /// assert_eq!(pager.visible(), &[2, 3, 4]);
    /// # Ok::<(), bubbletea_carousel::Error>(())
    /// ```
    pub fn set_items(&mut self, items: Vec<T>) {
        self.items = items;
        let max = self.max_cursor();
        if self.cursor > max {
            debug!(from = self.cursor, to = max, "clamping pager cursor");
            self.cursor = max;
        }
    }

    /// Returns the whole sequence.
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Number of items in the sequence.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the sequence is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of items visible at once.
    pub fn window_size(&self) -> usize {
        self.window_size
    }

    /// Start index of the visible window.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Largest valid cursor: `len - window_size`, or 0 for short sequences.
    pub fn max_cursor(&self) -> usize {
        self.items.len().saturating_sub(self.window_size)
    }

    /// Whether a window change is still in flight.
    pub fn in_transition(&self) -> bool {
        self.in_transition
    }

    /// Returns the items in the current window.
    ///
    /// Shorter than `window_size` when the sequence is; empty for an empty sequence.
    pub fn visible(&self) -> &[T] {
        let end = (self.cursor + self.window_size).min(self.items.len());
        let start = self.cursor.min(end);
        &self.items[start..end]
    }

    /// Whether the cursor is before the last window.
    pub fn can_advance(&self) -> bool {
        self.cursor < self.max_cursor()
    }

    /// Whether the cursor is after the first window.
    pub fn can_retreat(&self) -> bool {
        self.cursor > 0
    }

    /// Whether the sequence is longer than one window.
    fn pageable(&self) -> bool {
        self.items.len() > self.window_size
    }

    /// Moves the window forward by one item.
    ///
    /// From the last window this wraps to the first under [`Wrap::Around`] and
    /// does nothing under [`Wrap::Clamp`]. Ignored while a transition is in
    /// flight or when the sequence fits in one window.
    ///
    /// Returns `true` if the cursor moved; the pager is then in transition.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_carousel::pager::{WindowedPager, Wrap};
    ///
    /// let mut pager = WindowedPager::new(vec![1, 2, 3, 4], 3)?;
    /// assert!(pager.advance());
    /// assert_eq!(pager.visible(), &[2, 3, 4]);
    /// pager.complete_transition();
    ///
    /// // last window wraps back to the first
    /// assert!(pager.advance());
    /// assert_eq!(pager.cursor(), 0);
    ///
    /// let mut clamped = WindowedPager::new(vec![1, 2, 3, 4], 3)?.with_wrap(Wrap::Clamp);
    /// clamped.advance();
    /// clamped.complete_transition();
    /// assert!(!clamped.advance());
    /// # Ok::<(), bubbletea_carousel::Error>(())
    /// ```
    pub fn advance(&mut self) -> bool {
        if !self.pageable() {
            return false;
        }
        if self.in_transition {
            trace!(cursor = self.cursor, "advance ignored during transition");
            return false;
        }
        let next = if self.cursor >= self.max_cursor() {
            match self.wrap {
                Wrap::Around => 0,
                Wrap::Clamp => return false,
            }
        } else {
            self.cursor + 1
        };
        self.begin(next);
        true
    }

    /// Moves the window back by one item. The mirror of [`advance`](Self::advance).
    ///
    /// ```rust
    /// use bubbletea_carousel::pager::WindowedPager;
    ///
    /// let mut pager = WindowedPager::new(vec!['a', 'b', 'c', 'd', 'e'], 2)?;
    /// assert!(pager.retreat());
    /// assert_eq!(pager.visible(), &['d', 'e']);
    /// assert!(!pager.retreat()); // still in transition
    /// # Ok::<(), bubbletea_carousel::Error>(())
    /// ```
    pub fn retreat(&mut self) -> bool {
        if !self.pageable() {
            return false;
        }
        if self.in_transition {
            trace!(cursor = self.cursor, "retreat ignored during transition");
            return false;
        }
        let next = if self.cursor == 0 {
            match self.wrap {
                Wrap::Around => self.max_cursor(),
                Wrap::Clamp => return false,
            }
        } else {
            self.cursor - 1
        };
        self.begin(next);
        true
    }

    /// Marks the current transition finished so the next move is accepted.
    ///
    /// Calling it outside a transition does nothing.
    ///
    /// ```rust
    /// use bubbletea_carousel::pager::WindowedPager;
    ///
    /// let mut pager = WindowedPager::new(vec![1, 2, 3, 4], 2)?;
    /// pager.advance();
    /// assert!(pager.in_transition());
    ///
    /// pager.complete_transition();
    /// assert!(!pager.in_transition());
    /// assert!(pager.advance());
    /// assert_eq!(pager.cursor(), 2);
    /// # Ok::<(), bubbletea_carousel::Error>(())
    /// ```
    pub fn complete_transition(&mut self) {
        self.in_transition = false;
    }

    fn begin(&mut self, cursor: usize) {
        trace!(from = self.cursor, to = cursor, "pager transition");
        self.cursor = cursor;
        self.in_transition = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn letters() -> WindowedPager<char> {
        WindowedPager::new("ABCDEFG".chars().collect(), 3).unwrap()
    }

    fn step(p: &mut WindowedPager<char>) {
        p.advance();
        p.complete_transition();
    }

    #[test]
    fn test_zero_window_is_rejected() {
        let err = WindowedPager::<u32>::new(vec![1, 2, 3], 0).unwrap_err();
        assert!(matches!(err, Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_visible_is_full_window_for_long_sequences() {
        for len in 3..12 {
            let p = WindowedPager::new((0..len).collect::<Vec<_>>(), 3).unwrap();
            assert_eq!(p.visible().len(), 3);
        }
    }

    #[test]
    fn test_visible_is_whole_sequence_for_short_sequences() {
        for len in 0..4 {
            let p = WindowedPager::new((0..len).collect::<Vec<_>>(), 4).unwrap();
            assert_eq!(p.visible().len(), len);
        }
    }

    #[test]
    fn test_walkthrough_with_wrap() {
        let mut p = letters();
        assert_eq!(p.visible(), &['A', 'B', 'C']);
        assert_eq!(p.max_cursor(), 4);

        step(&mut p);
        step(&mut p);
        step(&mut p);
        assert_eq!(p.cursor(), 3);
        assert_eq!(p.visible(), &['D', 'E', 'F']);

        step(&mut p);
        assert_eq!(p.cursor(), 4);
        assert_eq!(p.visible(), &['E', 'F', 'G']);
        assert!(!p.can_advance());

        step(&mut p);
        assert_eq!(p.cursor(), 0);
    }

    #[test]
    fn test_retreat_from_start_wraps_to_end() {
        let mut p = letters();
        assert!(p.retreat());
        assert_eq!(p.cursor(), p.max_cursor());
        assert_eq!(p.visible(), &['E', 'F', 'G']);
    }

    #[test]
    fn test_second_advance_without_completion_is_ignored() {
        let mut p = letters();
        assert!(p.advance());
        assert!(!p.advance());
        assert!(!p.retreat());
        assert_eq!(p.cursor(), 1);
        assert!(p.in_transition());

        p.complete_transition();
        assert!(p.advance());
        assert_eq!(p.cursor(), 2);
    }

    #[test]
    fn test_exact_fit_cannot_page() {
        let mut p = WindowedPager::new(vec![1, 2, 3], 3).unwrap();
        assert!(!p.can_advance());
        assert!(!p.can_retreat());
        assert!(!p.advance());
        assert!(!p.retreat());
        assert_eq!(p.cursor(), 0);
        assert!(!p.in_transition());
    }

    #[test]
    fn test_empty_sequence() {
        let mut p = WindowedPager::<u8>::new(Vec::new(), 6).unwrap();
        assert!(p.visible().is_empty());
        assert!(!p.advance());
        assert_eq!(p.max_cursor(), 0);
    }

    #[test]
    fn test_clamp_policy_stops_at_ends() {
        let mut p = letters().with_wrap(Wrap::Clamp);
        assert!(!p.retreat());
        for _ in 0..10 {
            step(&mut p);
        }
        assert_eq!(p.cursor(), 4);
        assert!(!p.advance());
        assert!(!p.in_transition());
    }

    #[test]
    fn test_can_flags_track_cursor() {
        let mut p = letters();
        assert!(p.can_advance());
        assert!(!p.can_retreat());
        step(&mut p);
        assert!(p.can_advance());
        assert!(p.can_retreat());
    }

    #[test]
    fn test_shrinking_clamps_cursor() {
        let mut p = letters();
        for _ in 0..4 {
            step(&mut p);
        }
        p.set_items(vec!['x', 'y']);
        assert_eq!(p.cursor(), 0);
        assert_eq!(p.visible(), &['x', 'y']);

        p.set_items("ABCDEFG".chars().collect());
        assert_eq!(p.cursor(), 0);
    }

    #[test]
    fn test_growing_keeps_cursor() {
        let mut p = letters();
        step(&mut p);
        step(&mut p);
        p.set_items("ABCDEFGHIJ".chars().collect());
        assert_eq!(p.cursor(), 2);
        assert_eq!(p.max_cursor(), 7);
    }
}
