//! Catalog page: a featured banner above one slider per category.
//!
//! The page starts in a loading state and fills in as the host delivers each
//! row with [`Model::set_row`]. Up/down move focus between rows, left/right
//! page the focused row, enter opens the detail panel for the focused row's
//! leftmost card and esc closes it again.
//!
//! Delivering the featured row (Popular for movies, Trending for TV) picks a
//! random title from it for the banner. Call [`Model::feature`] to pick again
//! with your own random source.
//!
//! ```rust
//! use bubbletea_carousel::browse::{Model, PageKind};
//! use bubbletea_carousel::catalog::{MediaKind, MovieCategory, Title};
//!
//! let mut page = Model::new(PageKind::Movies, 6)?;
//! assert!(page.is_loading());
//!
//! for category in MovieCategory::ALL {
//!     let row = (1..=10)
//!         .map(|i| Title::new(i, MediaKind::Movie, format!("Movie {}", i)))
//!         .collect();
//!     page.set_row(category, row);
//! }
//! assert!(!page.is_loading());
//!
//! page.open_selected();
//! assert!(page.detail().is_open());
//! # Ok::<(), bubbletea_carousel::Error>(())
//! ```

use crate::catalog::{
    feature_random, find_title, merge_genres, Category, Genre, GenreIndex, MovieCategory, Title,
    TvCategory,
};
use crate::detail;
use crate::error::Result;
use crate::help;
use crate::key::{self, KeyMap as KeyMapTrait};
use crate::slider::{self, TransitionEndMsg};
use crate::Component;
use bubbletea_rs::{Cmd, KeyMsg, Msg};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use rand::Rng;
use tracing::{debug, warn};

/// Which catalog a page shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    /// The movie page.
    Movies,
    /// The TV page.
    Tv,
}

impl PageKind {
    /// The page's rows in display order.
    pub fn categories(self) -> Vec<Category> {
        match self {
            PageKind::Movies => MovieCategory::ALL.into_iter().map(Category::from).collect(),
            PageKind::Tv => TvCategory::ALL.into_iter().map(Category::from).collect(),
        }
    }

    /// The row the featured banner is drawn from.
    pub fn featured_category(self) -> Category {
        match self {
            PageKind::Movies => Category::Movie(MovieCategory::Popular),
            PageKind::Tv => Category::Tv(TvCategory::Trending),
        }
    }
}

/// Key bindings of the page itself; paging keys belong to the sliders.
#[derive(Debug, Clone)]
pub struct BrowseKeyMap {
    /// Focus the row above.
    pub up: key::Binding,
    /// Focus the row below.
    pub down: key::Binding,
    /// Open the detail panel.
    pub open: key::Binding,
}

impl Default for BrowseKeyMap {
    fn default() -> Self {
        Self {
            up: key::new_binding(vec![
                key::with_keys_str(&["up", "k"]),
                key::with_help("↑/k", "up"),
            ]),
            down: key::new_binding(vec![
                key::with_keys_str(&["down", "j"]),
                key::with_help("↓/j", "down"),
            ]),
            open: key::new_binding(vec![
                key::with_keys_str(&["enter"]),
                key::with_help("enter", "details"),
            ]),
        }
    }
}

impl KeyMapTrait for BrowseKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.up, &self.down, &self.open]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.up, &self.down], vec![&self.open]]
    }
}

/// Styles of the page chrome.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Featured title banner.
    pub banner: Style,
    /// Backdrop image URL under the banner.
    pub banner_caption: Style,
    /// Loading message.
    pub loading: Style,
    /// Marker in front of the focused row.
    pub focus_marker: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            banner: Style::new()
                .bold(true)
                .foreground(Color::from("#FFFDF5"))
                .padding(1, 0, 1, 2),
            banner_caption: Style::new()
                .foreground(Color::from("#777777"))
                .padding_left(2),
            loading: Style::new().foreground(Color::from("#AAAAAA")).padding_left(2),
            focus_marker: Style::new().foreground(Color::from("#E50914")),
        }
    }
}

#[derive(Debug, Clone)]
struct Row {
    category: Category,
    slider: slider::Model<Title>,
    loaded: bool,
}

/// A catalog page.
#[derive(Debug, Clone)]
pub struct Model {
    kind: PageKind,
    rows: Vec<Row>,
    focus: usize,
    focused: bool,
    featured: Option<Title>,
    detail: detail::Model,

    /// Key bindings.
    pub keymap: BrowseKeyMap,
    /// Help footer.
    pub help: help::Model,
    /// Rendering styles.
    pub styles: Styles,
}

impl Model {
    /// Creates a page whose sliders show `window_size` cards at a time.
    ///
    /// The page starts focused so it reacts to keys without further setup.
    ///
    /// # Errors
    ///
    /// Fails with [`crate::Error::InvalidConfiguration`] when `window_size` is zero.
    pub fn new(kind: PageKind, window_size: usize) -> Result<Self> {
        let rows = kind
            .categories()
            .into_iter()
            .map(|category| {
                Ok(Row {
                    category,
                    slider: slider::Model::new(category.heading(), window_size)?
                        .with_ranking(category.ranked()),
                    loaded: false,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            kind,
            rows,
            focus: 0,
            focused: true,
            featured: None,
            detail: detail::Model::new(),
            keymap: BrowseKeyMap::default(),
            help: help::Model::new(),
            styles: Styles::default(),
        })
    }

    /// The page kind.
    pub fn kind(&self) -> PageKind {
        self.kind
    }

    /// Delivers the titles of one row.
    ///
    /// When `category` is the page's featured row a featured title is picked
    /// from `items` and moved to the front of the row.
    ///
    /// Returns `false` if `category` is not shown on this page.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use bubbletea_carousel::browse::{Model, PageKind};
    /// use bubbletea_carousel::catalog::{MediaKind, MovieCategory, Title, TvCategory};
    ///
    /// let mut page = Model::new(PageKind::Tv, 4)?;
    /// let shows: Vec<Title> = (1..=5)
    ///     .map(|i| Title::new(i, MediaKind::Tv, format!("Show {}", i)))
    ///     .collect();
    ///
    /// assert!(!page.set_row(MovieCategory::Upcoming, shows.clone()));
    /// assert!(page.featured().is_none());
    ///
    /// assert!(page.set_row(TvCategory::Trending, shows));
    /// let featured = page.featured().cloned().unwrap();
    /// assert_eq!(page.row(TvCategory::Trending).unwrap().items()[0], featured);
    /// # Ok::<(), bubbletea_carousel::Error>(())
    /// ```
    pub fn set_row(&mut self, category: impl Into<Category>, items: Vec<Title>) -> bool {
        let category = category.into();
        match self.rows.iter_mut().find(|r| r.category == category) {
            Some(row) => {
                debug!(?category, count = items.len(), "row loaded");
                row.slider.set_items(items);
                row.loaded = true;
            }
            None => {
                warn!(?category, page = ?self.kind, "row not on this page");
                return false;
            }
        }
        if category == self.kind.featured_category() {
            self.feature(&mut rand::rng());
        }
        true
    }

    /// Merges the movie and TV genre lists for the detail panel.
    pub fn set_genres(&mut self, movie: Vec<Genre>, tv: Vec<Genre>) {
        self.detail
            .set_genres(GenreIndex::new(merge_genres(movie, tv)));
    }

    /// Whether some row has not been delivered yet.
    pub fn is_loading(&self) -> bool {
        self.rows.iter().any(|r| !r.loaded)
    }

    /// Picks a random featured title and moves it to the front of its row.
    pub fn feature<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Option<&Title> {
        let category = self.kind.featured_category();
        let row = self.rows.iter_mut().find(|r| r.category == category)?;
        let mut items = row.slider.items().to_vec();
        self.featured = feature_random(&mut items, rng);
        row.slider.set_items(items);
        self.featured.as_ref()
    }

    /// The featured title, once picked.
    pub fn featured(&self) -> Option<&Title> {
        self.featured.as_ref()
    }

    /// Index of the focused row.
    pub fn focused_row(&self) -> usize {
        self.focus
    }

    /// The slider showing `category`.
    pub fn row(&self, category: impl Into<Category>) -> Option<&slider::Model<Title>> {
        let category = category.into();
        self.rows
            .iter()
            .find(|r| r.category == category)
            .map(|r| &r.slider)
    }

    /// The detail panel.
    pub fn detail(&self) -> &detail::Model {
        &self.detail
    }

    /// Opens the detail panel for the focused row's leftmost visible title.
    pub fn open_selected(&mut self) -> bool {
        let selected = self
            .rows
            .get(self.focus)
            .and_then(|r| r.slider.selected())
            .cloned();
        match selected {
            Some(title) => {
                self.detail.open(title);
                true
            }
            None => false,
        }
    }

    /// Opens the detail panel for the title with `id` in any row.
    pub fn open_by_id(&mut self, id: u64) -> bool {
        let found = find_title(self.rows.iter().map(|r| r.slider.items()), id).cloned();
        match found {
            Some(title) => {
                self.detail.open(title);
                true
            }
            None => false,
        }
    }

    /// Closes the detail panel.
    pub fn close_detail(&mut self) {
        self.detail.close();
    }

    /// Routes a message to the page.
    ///
    /// Transition messages always reach the sliders; keys are handled only
    /// while the page is focused, and go to the detail panel while it is open.
    pub fn update(&mut self, msg: &Msg) -> Option<Cmd> {
        if msg.downcast_ref::<TransitionEndMsg>().is_some() {
            for row in &mut self.rows {
                row.slider.update(msg);
            }
            return None;
        }

        if !self.focused {
            return None;
        }

        if self.detail.is_open() {
            self.detail.update(msg);
            return None;
        }

        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.up.matches(key_msg) {
                self.focus = self.focus.saturating_sub(1);
                return None;
            } else if self.keymap.down.matches(key_msg) {
                self.focus = (self.focus + 1).min(self.rows.len().saturating_sub(1));
                return None;
            } else if self.keymap.open.matches(key_msg) {
                self.open_selected();
                return None;
            }
        }

        self.rows.get_mut(self.focus)?.slider.update(msg)
    }

    /// Renders the page.
    pub fn view(&self) -> String {
        if self.is_loading() {
            return self.styles.loading.render("Loading...");
        }

        if self.detail.is_open() {
            return format!(
                "{}\n{}",
                self.detail.view(),
                self.help.view(&self.detail.keymap)
            );
        }

        let mut sections = Vec::with_capacity(self.rows.len() + 2);
        if let Some(featured) = &self.featured {
            sections.push(self.styles.banner.render(&featured.name));
            let backdrop = featured.backdrop_url(None);
            if !backdrop.is_empty() {
                sections.push(self.styles.banner_caption.render(&backdrop));
            }
        }

        for (i, row) in self.rows.iter().enumerate() {
            let marker = if i == self.focus { "▌ " } else { "  " };
            let marker = self.styles.focus_marker.clone().inline(true).render(marker);
            let body = row.slider.view();
            sections.push(lipgloss::join_horizontal(
                lipgloss::TOP,
                &[marker.as_str(), body.as_str()],
            ));
        }

        sections.push(self.help.short_help_view(self.footer_bindings()));
        sections.join("\n\n")
    }

    fn footer_bindings(&self) -> Vec<&key::Binding> {
        let mut bindings = vec![&self.keymap.up, &self.keymap.down];
        if let Some(row) = self.rows.get(self.focus) {
            bindings.extend(row.slider.keymap.short_help());
        }
        bindings.push(&self.keymap.open);
        bindings
    }
}

impl Component for Model {
    fn focus(&mut self) -> Option<Cmd> {
        self.focused = true;
        None
    }

    fn blur(&mut self) {
        self.focused = false;
    }

    fn focused(&self) -> bool {
        self.focused
    }
}
