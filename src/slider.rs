//! A horizontally paged row of cards, driven by a [`WindowedPager`].
//!
//! The slider shows a heading, a window of cards and a pair of arrow
//! indicators. Left/right keys move the window one card at a time with
//! wraparound. Every move starts a transition which ends when the slider
//! receives its own [`TransitionEndMsg`], scheduled through a bubbletea tick
//! after [`Model::transition_duration`]. Key presses arriving before that are
//! dropped, so holding a key cannot outrun the animation.
//!
//! # Example
//!
//! ```rust
//! use bubbletea_carousel::slider::{Item, Model};
//! use std::fmt;
//!
//! #[derive(Clone)]
//! struct Film(u64, &'static str);
//!
//! impl fmt::Display for Film {
//!     fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
//!         write!(f, "{}", self.1)
//!     }
//! }
//!
//! impl Item for Film {
//!     fn key(&self) -> u64 {
//!         self.0
//!     }
//! }
//!
//! let films = vec![Film(1, "Alien"), Film(2, "Brazil"), Film(3, "Cube"), Film(4, "Dune")];
//! let mut slider = Model::new("Popular", 3)?.with_ranking(true);
//! slider.set_items(films);
//!
//! let cmd = slider.next();
//! assert!(cmd.is_some()); // completes the transition later
//! assert_eq!(slider.cursor(), 1);
//! assert!(slider.next().is_none()); // still animating
//! # Ok::<(), bubbletea_carousel::Error>(())
//! ```

use crate::error::Result;
use crate::key::{self, KeyMap as KeyMapTrait};
use crate::pager::{WindowedPager, Wrap};
use bubbletea_rs::{tick as bubbletea_tick, Cmd, KeyMsg, Msg};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use std::fmt::Display;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::trace;
use unicode_width::UnicodeWidthChar;

/// Number of cards visible at once unless configured otherwise.
pub const DEFAULT_WINDOW_SIZE: usize = 6;

/// Default width of a card in columns.
pub const DEFAULT_CARD_WIDTH: usize = 18;

/// Default length of a window transition.
pub const DEFAULT_TRANSITION: Duration = Duration::from_secs(1);

static LAST_ID: AtomicU64 = AtomicU64::new(0);

fn next_id() -> u64 {
    LAST_ID.fetch_add(1, Ordering::SeqCst) + 1
}

/// Items that can be shown on a slider card.
///
/// The card text comes from `Display`; `key` identifies the item across
/// refreshes and is what the host uses to look the item up again.
pub trait Item: Display + Clone {
    /// Stable identifier of the item.
    fn key(&self) -> u64;
}

/// Sent when a slider's transition has finished playing.
#[derive(Debug, Clone)]
pub struct TransitionEndMsg {
    /// Id of the slider that started the transition.
    pub id: u64,
    tag: u64,
}

/// Key bindings for paging a slider.
#[derive(Debug, Clone)]
pub struct SliderKeyMap {
    /// Move the window one card back.
    pub prev: key::Binding,
    /// Move the window one card forward.
    pub next: key::Binding,
}

impl Default for SliderKeyMap {
    fn default() -> Self {
        Self {
            prev: key::new_binding(vec![
                key::with_keys_str(&["left", "h"]),
                key::with_help("←/h", "prev"),
            ]),
            next: key::new_binding(vec![
                key::with_keys_str(&["right", "l"]),
                key::with_help("→/l", "next"),
            ]),
        }
    }
}

impl KeyMapTrait for SliderKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.prev, &self.next]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.prev, &self.next]]
    }
}

/// Styles used when rendering a slider.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Row heading.
    pub heading: Style,
    /// Card title text.
    pub card: Style,
    /// Ranking number on a card.
    pub rank: Style,
    /// Arrow indicator when paging that way stays inside the sequence.
    pub arrow: Style,
    /// Arrow indicator when paging that way would wrap.
    pub arrow_disabled: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        Self {
            heading: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#1A1A1A",
                Dark: "#FFFDF5",
            }),
            card: Style::new().foreground(AdaptiveColor {
                Light: "#333333",
                Dark: "#DDDDDD",
            }),
            rank: Style::new().bold(true).foreground(AdaptiveColor {
                Light: "#E50914",
                Dark: "#E50914",
            }),
            arrow: Style::new().foreground(AdaptiveColor {
                Light: "#1A1A1A",
                Dark: "#FFFFFF",
            }),
            arrow_disabled: Style::new().foreground(AdaptiveColor {
                Light: "#DDDADA",
                Dark: "#3C3C3C",
            }),
        }
    }
}

/// A titled row of cards paged through a fixed-size window.
#[derive(Debug, Clone)]
pub struct Model<I: Item> {
    pager: WindowedPager<I>,
    id: u64,
    tag: u64,

    /// Text shown above the cards.
    pub heading: String,
    /// Whether cards show their 1-based position in the whole row.
    pub show_ranking: bool,
    /// Width of each card in columns.
    pub card_width: usize,
    /// Columns between cards.
    pub gap: usize,
    /// How long a window change takes before the next one is accepted.
    pub transition_duration: Duration,
    /// Key bindings.
    pub keymap: SliderKeyMap,
    /// Rendering styles.
    pub styles: Styles,
}

impl<I: Item> Model<I> {
    /// Creates an empty slider showing `window_size` cards at a time.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::Error::InvalidConfiguration`] when `window_size` is zero.
    pub fn new(heading: impl Into<String>, window_size: usize) -> Result<Self> {
        Ok(Self {
            pager: WindowedPager::new(Vec::new(), window_size)?,
            id: next_id(),
            tag: 0,
            heading: heading.into(),
            show_ranking: false,
            card_width: DEFAULT_CARD_WIDTH,
            gap: 2,
            transition_duration: DEFAULT_TRANSITION,
            keymap: SliderKeyMap::default(),
            styles: Styles::default(),
        })
    }

    /// Turns ranking numbers on or off (builder pattern).
    pub fn with_ranking(mut self, show: bool) -> Self {
        self.show_ranking = show;
        self
    }

    /// Sets the paging policy (builder pattern).
    pub fn with_wrap(mut self, wrap: Wrap) -> Self {
        self.pager.set_wrap(wrap);
        self
    }

    /// Sets the card width; values below 3 are raised to 3 (builder pattern).
    pub fn with_card_width(mut self, width: usize) -> Self {
        self.card_width = width.max(3);
        self
    }

    /// Sets the transition length (builder pattern).
    ///
    /// With a zero duration moves complete immediately and no command is
    /// returned.
    pub fn with_transition_duration(mut self, duration: Duration) -> Self {
        self.transition_duration = duration;
        self
    }

    /// Unique id used to route [`TransitionEndMsg`]s.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// Replaces the row's items, clamping the window if the row shrank.
    pub fn set_items(&mut self, items: Vec<I>) {
        self.pager.set_items(items);
    }

    /// All items in the row.
    pub fn items(&self) -> &[I] {
        self.pager.items()
    }

    /// The items currently on screen.
    pub fn visible(&self) -> &[I] {
        self.pager.visible()
    }

    /// The leftmost visible item.
    pub fn selected(&self) -> Option<&I> {
        self.pager.visible().first()
    }

    /// Start index of the visible window.
    pub fn cursor(&self) -> usize {
        self.pager.cursor()
    }

    /// The underlying pager.
    pub fn pager(&self) -> &WindowedPager<I> {
        &self.pager
    }

    /// Whether a window change is still playing.
    pub fn in_transition(&self) -> bool {
        self.pager.in_transition()
    }

    /// Moves the window forward and returns the command that ends the transition.
    ///
    /// Returns `None` when the move was ignored or completed immediately.
    pub fn next(&mut self) -> Option<Cmd> {
        if self.pager.advance() {
            self.start_transition()
        } else {
            None
        }
    }

    /// Moves the window back. See [`next`](Self::next).
    pub fn prev(&mut self) -> Option<Cmd> {
        if self.pager.retreat() {
            self.start_transition()
        } else {
            None
        }
    }

    fn start_transition(&mut self) -> Option<Cmd> {
        self.tag = self.tag.wrapping_add(1);
        if self.transition_duration.is_zero() {
            self.pager.complete_transition();
            return None;
        }
        let id = self.id;
        let tag = self.tag;
        Some(bubbletea_tick(self.transition_duration, move |_| {
            Box::new(TransitionEndMsg { id, tag }) as Msg
        }))
    }

    #[cfg(test)]
    pub(crate) fn pending_end_msg(&self) -> TransitionEndMsg {
        TransitionEndMsg {
            id: self.id,
            tag: self.tag,
        }
    }

    /// Handles paging keys and this slider's transition messages.
    ///
    /// Forward every message here. Paging keys return the command that will
    /// deliver the matching [`TransitionEndMsg`]; feeding that message back in
    /// ends the transition. Messages for other sliders, and end messages left
    /// over from earlier transitions, are ignored.
    ///
    /// # Arguments
    ///
    /// * `msg` - Any message; only `KeyMsg` and `TransitionEndMsg` are acted on
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_carousel::catalog::{MediaKind, Title};
    /// use bubbletea_carousel::slider::Model;
    /// use bubbletea_rs::{KeyMsg, Msg};
    /// use crossterm::event::{KeyCode, KeyModifiers};
    ///
    /// let mut slider = Model::new("Trending", 2)?;
    /// slider.set_items((1..=5).map(|i| Title::new(i, MediaKind::Tv, format!("Show {}", i))).collect());
    ///
    /// let right = Box::new(KeyMsg { key: KeyCode::Right, modifiers: KeyModifiers::NONE }) as Msg;
    /// let cmd = slider.update(&right);
    /// assert!(cmd.is_some());
    /// assert_eq!(slider.cursor(), 1);
    ///
    /// // ignored until the transition ends
    /// assert!(slider.update(&right).is_none());
    /// assert_eq!(slider.cursor(), 1);
    /// # Ok::<(), bubbletea_carousel::Error>(())
    /// ```
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if let Some(end) = msg.downcast_ref::<TransitionEndMsg>() {
            if end.id != self.id {
                return None;
            }
            if end.tag != self.tag {
                trace!(slider = self.id, tag = end.tag, "stale transition end");
                return None;
            }
            self.pager.complete_transition();
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.next.matches(key_msg) {
                return self.next();
            } else if self.keymap.prev.matches(key_msg) {
                return self.prev();
            }
        }
        None
    }

    /// Renders the heading and the visible cards.
    pub fn view(&self) -> String {
        let heading = self.styles.heading.clone().inline(true).render(&self.heading);

        let visible = self.pager.visible();
        if visible.is_empty() {
            return heading;
        }

        let left = if self.pager.can_retreat() {
            self.styles.arrow.clone().inline(true).render("‹ ")
        } else {
            self.styles.arrow_disabled.clone().inline(true).render("‹ ")
        };
        let right = if self.pager.can_advance() {
            self.styles.arrow.clone().inline(true).render(" ›")
        } else {
            self.styles.arrow_disabled.clone().inline(true).render(" ›")
        };

        let gap = " ".repeat(self.gap);
        let mut cards = Vec::with_capacity(visible.len() * 2);
        for (i, item) in visible.iter().enumerate() {
            if i > 0 {
                cards.push(gap.clone());
            }
            cards.push(self.render_card(self.pager.cursor() + i, item));
        }

        let mut parts: Vec<&str> = Vec::with_capacity(cards.len() + 2);
        parts.push(left.as_str());
        parts.extend(cards.iter().map(String::as_str));
        parts.push(right.as_str());

        format!(
            "{}\n{}",
            heading,
            lipgloss::join_horizontal(lipgloss::TOP, &parts)
        )
    }

    fn render_card(&self, absolute: usize, item: &I) -> String {
        let title = fit(&item.to_string(), self.card_width);
        let title = self.styles.card.clone().inline(true).render(&title);
        if self.show_ranking {
            let rank = fit(&(absolute + 1).to_string(), self.card_width);
            let rank = self.styles.rank.clone().inline(true).render(&rank);
            format!("{}\n{}", rank, title)
        } else {
            title
        }
    }
}

/// Truncates `s` to `width` columns with an ellipsis and pads it to exactly `width`.
fn fit(s: &str, width: usize) -> String {
    let total: usize = s.chars().map(|c| c.width().unwrap_or(0)).sum();
    let mut out = String::new();
    let mut used = 0;
    if total <= width {
        out.push_str(s);
        used = total;
    } else {
        for c in s.chars() {
            let w = c.width().unwrap_or(0);
            if used + w + 1 > width {
                break;
            }
            out.push(c);
            used += w;
        }
        out.push('…');
        used += 1;
    }
    out.push_str(&" ".repeat(width.saturating_sub(used)));
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::{KeyCode, KeyModifiers};
    use std::fmt;

    #[derive(Debug, Clone, PartialEq)]
    struct Card(u64, String);

    impl fmt::Display for Card {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.1)
        }
    }

    impl Item for Card {
        fn key(&self) -> u64 {
            self.0
        }
    }

    fn cards(n: u64) -> Vec<Card> {
        (0..n)
            .map(|i| Card(i, format!("Title {}", i)))
            .collect()
    }

    fn slider(n: u64, window: usize) -> Model<Card> {
        let mut s = Model::new("Row", window).unwrap();
        s.set_items(cards(n));
        s
    }

    fn key_msg(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg
    }

    #[test]
    fn test_zero_window_fails() {
        assert!(Model::<Card>::new("Row", 0).is_err());
    }

    #[test]
    fn test_ids_are_unique() {
        let a = slider(3, 2);
        let b = slider(3, 2);
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_right_key_moves_and_blocks_until_end_msg() {
        let mut s = slider(10, 3);
        assert!(s.update(&key_msg(KeyCode::Right)).is_some());
        assert_eq!(s.cursor(), 1);

        assert!(s.update(&key_msg(KeyCode::Char('l'))).is_none());
        assert_eq!(s.cursor(), 1);

        let end = Box::new(s.pending_end_msg()) as Msg;
        s.update(&end);
        assert!(!s.in_transition());

        s.update(&key_msg(KeyCode::Char('l')));
        assert_eq!(s.cursor(), 2);
    }

    #[test]
    fn test_left_key_wraps_to_last_window() {
        let mut s = slider(10, 3);
        s.update(&key_msg(KeyCode::Left));
        assert_eq!(s.cursor(), 7);
        assert_eq!(s.selected().map(|c| c.key()), Some(7));
    }

    #[tokio::test]
    async fn test_tick_command_delivers_end_msg() {
        let mut s = slider(10, 3).with_transition_duration(Duration::from_millis(5));
        let cmd = s.next().expect("move should schedule the end of the transition");
        assert!(s.in_transition());

        let msg = cmd.await.expect("tick should produce a message");
        let end = msg
            .downcast_ref::<TransitionEndMsg>()
            .expect("tick should produce a TransitionEndMsg");
        assert_eq!(end.id, s.id());

        assert!(s.update(&msg).is_none());
        assert!(!s.in_transition());
        assert!(s.next().is_some());
        assert_eq!(s.cursor(), 2);
    }

    #[test]
    fn test_stale_end_msg_is_ignored() {
        let mut s = slider(10, 3).with_transition_duration(Duration::from_millis(5));
        s.next();
        let stale = s.pending_end_msg();
        s.update(&(Box::new(stale.clone()) as Msg));
        s.next();
        assert!(s.in_transition());

        s.update(&(Box::new(stale) as Msg));
        assert!(s.in_transition());

        s.update(&(Box::new(s.pending_end_msg()) as Msg));
        assert!(!s.in_transition());
    }

    #[test]
    fn test_end_msg_for_other_slider_is_ignored() {
        let mut a = slider(10, 3);
        let b = slider(10, 3);
        a.next();
        let foreign = TransitionEndMsg {
            id: b.id(),
            tag: a.pending_end_msg().tag,
        };
        a.update(&(Box::new(foreign) as Msg));
        assert!(a.in_transition());
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let mut s = slider(10, 3).with_transition_duration(Duration::ZERO);
        assert!(s.next().is_none());
        assert!(s.next().is_none());
        assert_eq!(s.cursor(), 2);
        assert!(!s.in_transition());
    }

    #[test]
    fn test_short_row_does_not_page() {
        let mut s = slider(2, 6);
        assert!(s.next().is_none());
        assert!(s.prev().is_none());
        assert_eq!(s.visible().len(), 2);
    }

    #[test]
    fn test_view_shows_heading_and_visible_titles() {
        let s = slider(5, 2);
        let view = lipgloss::strip_ansi(&s.view());
        assert!(view.starts_with("Row"));
        assert!(view.contains("Title 0"));
        assert!(view.contains("Title 1"));
        assert!(!view.contains("Title 2"));
        assert!(view.contains('‹'));
        assert!(view.contains('›'));
    }

    #[test]
    fn test_view_ranking_uses_absolute_position() {
        let mut s = slider(5, 2)
            .with_ranking(true)
            .with_transition_duration(Duration::ZERO);
        s.next();
        s.next();
        let view = lipgloss::strip_ansi(&s.view());
        assert!(view.contains('3'));
        assert!(view.contains('4'));
        assert!(view.contains("Title 2"));
    }

    #[test]
    fn test_view_of_empty_row_is_heading_only() {
        let s = Model::<Card>::new("Empty", 3).unwrap();
        assert_eq!(lipgloss::strip_ansi(&s.view()), "Empty");
    }

    #[test]
    fn test_fit_truncates_and_pads() {
        assert_eq!(fit("abc", 5), "abc  ");
        assert_eq!(fit("abcdefgh", 5), "abcd…");
        assert_eq!(fit("", 3), "   ");
        assert_eq!(fit("영화제목", 5), "영화…");
    }
}
