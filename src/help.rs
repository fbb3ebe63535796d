//! One-line help footer for a component's key bindings.
//!
//! ```rust
//! use bubbletea_carousel::help::Model;
//! use bubbletea_carousel::slider::SliderKeyMap;
//!
//! let help = Model::new();
//! let line = help.view(&SliderKeyMap::default());
//! assert!(lipgloss_extras::lipgloss::strip_ansi(&line).contains("←/h prev"));
//! ```

use crate::key::{self, KeyMap};
use lipgloss_extras::lipgloss;
use lipgloss_extras::prelude::*;

/// Styles for the help footer.
#[derive(Debug, Clone)]
pub struct Styles {
    /// Key label.
    pub key: Style,
    /// Binding description.
    pub desc: Style,
    /// Separator between bindings and the truncation ellipsis.
    pub separator: Style,
}

impl Default for Styles {
    fn default() -> Self {
        use lipgloss::AdaptiveColor;

        Self {
            key: Style::new().foreground(AdaptiveColor {
                Light: "#909090",
                Dark: "#626262",
            }),
            desc: Style::new().foreground(AdaptiveColor {
                Light: "#B2B2B2",
                Dark: "#4A4A4A",
            }),
            separator: Style::new().foreground(AdaptiveColor {
                Light: "#DDDADA",
                Dark: "#3C3C3C",
            }),
        }
    }
}

/// Renders key bindings as `key desc • key desc`.
#[derive(Debug, Clone)]
pub struct Model {
    /// Maximum width in columns; 0 means unlimited.
    pub width: usize,
    /// Separator between bindings.
    pub separator: String,
    /// Shown when bindings are cut off.
    pub ellipsis: String,
    /// Rendering styles.
    pub styles: Styles,
}

impl Default for Model {
    fn default() -> Self {
        Self {
            width: 0,
            separator: " • ".to_string(),
            ellipsis: "…".to_string(),
            styles: Styles::default(),
        }
    }
}

impl Model {
    /// Creates a help footer with default styles and no width limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Limits the rendered width (builder pattern).
    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Renders the short help of `keymap`.
    pub fn view<K: KeyMap>(&self, keymap: &K) -> String {
        self.short_help_view(keymap.short_help())
    }

    /// Renders `bindings` on one line, skipping disabled ones.
    ///
    /// When the line would exceed [`width`](Self::width) the remaining
    /// bindings are replaced by the ellipsis.
    pub fn short_help_view(&self, bindings: Vec<&key::Binding>) -> String {
        let separator = self.styles.separator.clone().inline(true).render(&self.separator);
        let mut out = String::new();
        let mut total_width = 0;

        for kb in bindings.iter().filter(|b| b.enabled()) {
            let sep = if total_width > 0 { separator.as_str() } else { "" };
            let help = kb.help();
            let item = format!(
                "{}{} {}",
                sep,
                self.styles.key.clone().inline(true).render(&help.key),
                self.styles.desc.clone().inline(true).render(&help.desc)
            );
            let item_width = lipgloss::width_visible(&item);

            if self.width > 0 && total_width + item_width > self.width {
                let tail = format!(
                    " {}",
                    self.styles.separator.clone().inline(true).render(&self.ellipsis)
                );
                if total_width + lipgloss::width_visible(&tail) < self.width {
                    out.push_str(&tail);
                }
                break;
            }

            total_width += item_width;
            out.push_str(&item);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::{new_binding, with_disabled, with_help, with_keys_str};

    fn bindings() -> Vec<key::Binding> {
        vec![
            new_binding(vec![with_keys_str(&["left"]), with_help("←", "prev")]),
            new_binding(vec![
                with_keys_str(&["x"]),
                with_help("x", "hidden"),
                with_disabled(),
            ]),
            new_binding(vec![with_keys_str(&["right"]), with_help("→", "next")]),
        ]
    }

    #[test]
    fn test_short_help_skips_disabled() {
        let b = bindings();
        let help = Model::new();
        let out = lipgloss::strip_ansi(&help.short_help_view(b.iter().collect()));
        assert_eq!(out, "← prev • → next");
    }

    #[test]
    fn test_short_help_truncates_to_width() {
        let b = bindings();
        let help = Model::new().with_width(10);
        let out = lipgloss::strip_ansi(&help.short_help_view(b.iter().collect()));
        assert_eq!(out, "← prev …");
    }

    #[test]
    fn test_ellipsis_dropped_when_it_would_fill_the_width() {
        let b = bindings();
        let help = Model::new().with_width(8);
        let out = lipgloss::strip_ansi(&help.short_help_view(b.iter().collect()));
        assert_eq!(out, "← prev");
    }

    #[test]
    fn test_empty_bindings() {
        assert_eq!(Model::new().short_help_view(Vec::new()), "");
    }
}
