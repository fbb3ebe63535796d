//! Detail panel for a single title.
//!
//! Shows the title's name, its genres and its overview in a bordered box.
//! The panel is closed until [`Model::open`] is called and closes again on
//! esc or `q`.

use crate::catalog::{GenreIndex, Title};
use crate::key::{self, KeyMap as KeyMapTrait};
use bubbletea_rs::{KeyMsg, Msg};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;
use tracing::debug;
use unicode_width::UnicodeWidthStr;

/// Key bindings of the detail panel.
#[derive(Debug, Clone)]
pub struct DetailKeyMap {
    /// Close the panel.
    pub close: key::Binding,
}

impl Default for DetailKeyMap {
    fn default() -> Self {
        Self {
            close: key::new_binding(vec![
                key::with_keys_str(&["esc", "q"]),
                key::with_help("esc", "close"),
            ]),
        }
    }
}

impl KeyMapTrait for DetailKeyMap {
    fn short_help(&self) -> Vec<&key::Binding> {
        vec![&self.close]
    }

    fn full_help(&self) -> Vec<Vec<&key::Binding>> {
        vec![vec![&self.close]]
    }
}

/// Styles of the detail panel.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Outer box.
    pub frame: Style,
    /// Title line.
    pub title: Style,
    /// Genre line.
    pub genres: Style,
    /// Overview text.
    pub overview: Style,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            frame: Style::new()
                .border_style(lipgloss::normal_border())
                .border_foreground(Color::from("#E50914"))
                .padding(1, 2, 1, 2),
            title: Style::new().bold(true).foreground(Color::from("#FFFDF5")),
            genres: Style::new().foreground(Color::from("#AAAAAA")),
            overview: Style::new().foreground(Color::from("#DDDDDD")),
        }
    }
}

/// The detail panel.
#[derive(Debug, Clone)]
pub struct Model {
    title: Option<Title>,
    genres: GenreIndex,

    /// Text width inside the frame.
    pub width: usize,
    /// Key bindings.
    pub keymap: DetailKeyMap,
    /// Rendering styles.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            title: None,
            genres: GenreIndex::default(),
            width: 60,
            keymap: DetailKeyMap::default(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a closed panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the text width; values below 10 are raised to 10 (builder pattern).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width.max(10);
        self
    }

    /// Replaces the genre names used for the genre line.
    pub fn set_genres(&mut self, genres: GenreIndex) {
        self.genres = genres;
    }

    /// The genre names in use.
    pub fn genres(&self) -> &GenreIndex {
        &self.genres
    }

    /// Opens the panel on `title`.
    pub fn open(&mut self, title: Title) {
        debug!(id = title.id, "opening detail");
        self.title = Some(title);
    }

    /// Closes the panel.
    pub fn close(&mut self) {
        self.title = None;
    }

    /// Whether the panel is showing a title.
    pub fn is_open(&self) -> bool {
        self.title.is_some()
    }

    /// The title being shown.
    pub fn title(&self) -> Option<&Title> {
        self.title.as_ref()
    }

    /// Closes the panel on its close binding.
    pub fn update(&mut self, msg: &Msg) {
        if !self.is_open() {
            return;
        }
        if let Some(key_msg) = msg.downcast_ref::<KeyMsg>() {
            if self.keymap.close.matches(key_msg) {
                self.close();
            }
        }
    }

    /// Renders the panel, or an empty string when closed.
    pub fn view(&self) -> String {
        let Some(title) = &self.title else {
            return String::new();
        };

        let mut lines = vec![self.styles.title.clone().inline(true).render(&title.name)];
        let label = self.genres.label(&title.genre_ids);
        if !label.is_empty() {
            lines.push(self.styles.genres.clone().inline(true).render(&label));
        }
        if !title.overview.is_empty() {
            lines.push(String::new());
            for line in wrap(&title.overview, self.width) {
                lines.push(self.styles.overview.clone().inline(true).render(&line));
            }
        }

        self.styles.frame.render(&lines.join("\n"))
    }
}

/// Greedy word wrap to `width` columns. Words wider than a line get a line of their own.
fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.width() + 1 + word.width() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Genre, MediaKind};
    use crossterm::event::{KeyCode, KeyModifiers};

    fn sample() -> Title {
        Title::new(603, MediaKind::Movie, "The Matrix")
            .with_genres(vec![28, 878])
            .with_overview("A hacker learns the truth about his reality.")
    }

    fn key_msg(code: KeyCode) -> Msg {
        Box::new(KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }) as Msg
    }

    #[test]
    fn test_closed_panel_renders_nothing() {
        let m = Model::new();
        assert!(!m.is_open());
        assert_eq!(m.view(), "");
    }

    #[test]
    fn test_view_shows_name_genres_and_overview() {
        let mut m = Model::new();
        m.set_genres(GenreIndex::new(vec![
            Genre::new(28, "Action"),
            Genre::new(878, "Science Fiction"),
        ]));
        m.open(sample());

        let view = lipgloss::strip_ansi(&m.view());
        assert!(view.contains("The Matrix"));
        assert!(view.contains("Action | Science Fiction"));
        assert!(view.contains("A hacker learns"));
    }

    #[test]
    fn test_esc_closes() {
        let mut m = Model::new();
        m.open(sample());
        m.update(&key_msg(KeyCode::Enter));
        assert!(m.is_open());
        m.update(&key_msg(KeyCode::Esc));
        assert!(!m.is_open());
        assert!(m.title().is_none());
    }

    #[test]
    fn test_wrap() {
        assert_eq!(wrap("one two three", 7), vec!["one two", "three"]);
        assert_eq!(wrap("supercalifragilistic is long", 5), vec![
            "supercalifragilistic",
            "is",
            "long"
        ]);
        assert!(wrap("   ", 5).is_empty());
    }
}
