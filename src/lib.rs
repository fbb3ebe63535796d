#![warn(missing_docs)]

//! # bubbletea-carousel
//!
//! Carousel sliders and catalog browsing components for [bubbletea-rs](https://github.com/joshka/bubbletea-rs)
//! terminal applications.
//!
//! ## Overview
//!
//! The building block is [`pager::WindowedPager`], a fixed-size window over an
//! ordered sequence that pages one item at a time with wraparound and ignores
//! moves while a transition is still playing. On top of it sit bubbletea
//! components following the Elm Architecture (`update()` / `view()`):
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`Slider`] | A titled row of cards paged with ←/→ |
//! | [`Detail`] | Bordered panel with a title's genres and overview |
//! | [`Browse`] | Featured banner plus one slider per catalog category |
//! | [`HelpModel`] | One-line key binding footer |
//!
//! ## Integration with bubbletea-rs
//!
//! ```rust
//! use bubbletea_carousel::prelude::*;
//! use bubbletea_rs::{Cmd, Model, Msg};
//!
//! struct App {
//!     page: Browse,
//! }
//!
//! impl Model for App {
//!     fn init() -> (Self, Option<Cmd>) {
//!         let page = Browse::new(PageKind::Movies, DEFAULT_WINDOW_SIZE)
//!             .expect("window size is positive");
//!         (Self { page }, None)
//!     }
//!
//!     fn update(&mut self, msg: Msg) -> Option<Cmd> {
//!         self.page.update(&msg)
//!     }
//!
//!     fn view(&self) -> String {
//!         self.page.view()
//!     }
//! }
//! ```
//!
//! ## Transitions
//!
//! Every move of a slider returns a command that delivers a
//! [`slider::TransitionEndMsg`] once the transition has played. Forward all
//! messages to the component and it clears its own transition; until then
//! further paging keys are ignored.

pub mod browse;
pub mod catalog;
pub mod detail;
pub mod error;
pub mod help;
pub mod key;
pub mod pager;
pub mod slider;

use bubbletea_rs::Cmd;

/// Components that can take and release keyboard focus.
///
/// A blurred component still processes its own timer messages but ignores
/// key presses.
///
/// ```rust
/// use bubbletea_carousel::prelude::*;
///
/// let mut page = Browse::new(PageKind::Tv, 4).unwrap();
/// assert!(page.focused());
/// page.blur();
/// assert!(!page.focused());
/// page.focus();
/// assert!(page.focused());
/// ```
pub trait Component {
    /// Gives the component focus, optionally returning a command to run.
    fn focus(&mut self) -> Option<Cmd>;

    /// Takes focus away from the component.
    fn blur(&mut self);

    /// Whether the component currently has focus.
    fn focused(&self) -> bool;
}

pub use browse::Model as Browse;
pub use detail::Model as Detail;
pub use error::{Error, Result};
pub use help::Model as HelpModel;
pub use key::{new_binding, with_disabled, with_help, with_keys_str, Binding, KeyMap, KeyPress};
pub use pager::{WindowedPager, Wrap};
pub use slider::Model as Slider;

/// Commonly used types in one import.
///
/// ```rust
/// use bubbletea_carousel::prelude::*;
///
/// let pager = WindowedPager::new(vec![1, 2, 3], 2).unwrap();
/// assert!(pager.can_advance());
/// ```
pub mod prelude {
    pub use crate::browse::{Model as Browse, PageKind};
    pub use crate::catalog::{
        merge_genres, Category, Genre, GenreIndex, MediaKind, MovieCategory, Title, TvCategory,
    };
    pub use crate::detail::Model as Detail;
    pub use crate::error::{Error, Result};
    pub use crate::help::Model as HelpModel;
    pub use crate::key::{Binding, KeyMap};
    pub use crate::pager::{WindowedPager, Wrap};
    pub use crate::slider::{
        Item as SliderItem, Model as Slider, TransitionEndMsg, DEFAULT_WINDOW_SIZE,
    };
    pub use crate::Component;
}
