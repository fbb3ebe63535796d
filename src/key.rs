//! Type-safe key bindings shared by all components.
//!
//! A [`Binding`] groups one or more key presses under a single action and carries
//! the help text shown in the footer. Bindings are usually built with the
//! functional-option helpers:
//!
//! ```rust
//! use bubbletea_carousel::key::{new_binding, with_help, with_keys_str};
//!
//! let next = new_binding(vec![
//!     with_keys_str(&["right", "l"]),
//!     with_help("→/l", "next"),
//! ]);
//! assert_eq!(next.keys().len(), 2);
//! assert_eq!(next.help().desc, "next");
//! ```

use bubbletea_rs::KeyMsg;
use crossterm::event::{KeyCode, KeyModifiers};

/// A single key press: a key code plus the modifiers held with it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPress {
    /// The key itself.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
}

impl From<KeyCode> for KeyPress {
    fn from(code: KeyCode) -> Self {
        Self {
            code,
            modifiers: KeyModifiers::NONE,
        }
    }
}

impl From<(KeyCode, KeyModifiers)> for KeyPress {
    fn from((code, modifiers): (KeyCode, KeyModifiers)) -> Self {
        Self { code, modifiers }
    }
}

impl KeyPress {
    /// Parses a key description such as `"left"`, `"pgdown"`, `"l"` or `"ctrl+c"`.
    ///
    /// Returns `None` for names that do not correspond to a key.
    ///
    /// ```rust
    /// use bubbletea_carousel::key::KeyPress;
    /// use crossterm::event::{KeyCode, KeyModifiers};
    ///
    /// let kp = KeyPress::parse("ctrl+n").unwrap();
    /// assert_eq!(kp.code, KeyCode::Char('n'));
    /// assert_eq!(kp.modifiers, KeyModifiers::CONTROL);
    /// assert!(KeyPress::parse("hyper+zz").is_none());
    /// ```
    pub fn parse(s: &str) -> Option<Self> {
        let mut modifiers = KeyModifiers::NONE;
        let mut rest = s;
        loop {
            if let Some(r) = rest.strip_prefix("ctrl+") {
                modifiers |= KeyModifiers::CONTROL;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("alt+") {
                modifiers |= KeyModifiers::ALT;
                rest = r;
            } else if let Some(r) = rest.strip_prefix("shift+") {
                modifiers |= KeyModifiers::SHIFT;
                rest = r;
            } else {
                break;
            }
        }

        let code = match rest {
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "pgup" => KeyCode::PageUp,
            "pgdown" => KeyCode::PageDown,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "enter" => KeyCode::Enter,
            "esc" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "backspace" => KeyCode::Backspace,
            "delete" => KeyCode::Delete,
            "space" => KeyCode::Char(' '),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };
        Some(Self { code, modifiers })
    }
}

/// Help text attached to a binding.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Help {
    /// Short key label, e.g. `"←/h"`.
    pub key: String,
    /// What the binding does.
    pub desc: String,
}

/// A set of key presses bound to one action.
#[derive(Debug, Clone, Default)]
pub struct Binding {
    keys: Vec<KeyPress>,
    help: Help,
    disabled: bool,
}

impl Binding {
    /// Creates a binding from key codes or `(code, modifiers)` pairs.
    ///
    /// ```rust
    /// use bubbletea_carousel::key::Binding;
    /// use crossterm::event::{KeyCode, KeyModifiers};
    ///
    /// let quit = Binding::new(vec![(KeyCode::Char('c'), KeyModifiers::CONTROL)])
    ///     .with_help("ctrl+c", "quit");
    /// assert!(quit.enabled());
    /// ```
    pub fn new<K: Into<KeyPress>>(keys: Vec<K>) -> Self {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
            help: Help::default(),
            disabled: false,
        }
    }

    /// Sets the help text (builder pattern).
    pub fn with_help(mut self, key: impl Into<String>, desc: impl Into<String>) -> Self {
        self.help = Help {
            key: key.into(),
            desc: desc.into(),
        };
        self
    }

    /// Returns the key presses of this binding.
    pub fn keys(&self) -> &[KeyPress] {
        &self.keys
    }

    /// Returns the help text.
    pub fn help(&self) -> &Help {
        &self.help
    }

    /// Whether the binding is active. Bindings without keys are never active.
    pub fn enabled(&self) -> bool {
        !self.disabled && !self.keys.is_empty()
    }

    /// Enables or disables the binding.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.disabled = !enabled;
    }

    /// Reports whether `msg` is one of this binding's key presses.
    pub fn matches(&self, msg: &KeyMsg) -> bool {
        self.enabled()
            && self
                .keys
                .iter()
                .any(|kp| kp.code == msg.key && kp.modifiers == msg.modifiers)
    }
}

/// A functional option applied by [`new_binding`].
pub type BindingOpt = Box<dyn FnOnce(&mut Binding)>;

/// Builds a binding from a list of options.
pub fn new_binding(opts: Vec<BindingOpt>) -> Binding {
    let mut binding = Binding::default();
    for opt in opts {
        opt(&mut binding);
    }
    binding
}

/// Option setting the binding's keys from their string names.
///
/// Unknown names are skipped.
pub fn with_keys_str(keys: &[&str]) -> BindingOpt {
    let parsed: Vec<KeyPress> = keys.iter().filter_map(|k| KeyPress::parse(k)).collect();
    Box::new(move |b: &mut Binding| b.keys = parsed)
}

/// Option setting the binding's help text.
pub fn with_help(key: &str, desc: &str) -> BindingOpt {
    let help = Help {
        key: key.to_string(),
        desc: desc.to_string(),
    };
    Box::new(move |b: &mut Binding| b.help = help)
}

/// Option starting the binding in the disabled state.
pub fn with_disabled() -> BindingOpt {
    Box::new(|b: &mut Binding| b.disabled = true)
}

/// Reports whether `msg` matches any of `bindings`.
pub fn matches(msg: &KeyMsg, bindings: &[&Binding]) -> bool {
    bindings.iter().any(|b| b.matches(msg))
}

/// Bindings a component exposes to the help view.
pub trait KeyMap {
    /// Bindings for the one-line help.
    fn short_help(&self) -> Vec<&Binding>;
    /// Bindings grouped into columns for the expanded help.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyMsg {
        KeyMsg {
            key: code,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_parse_named_keys() {
        assert_eq!(KeyPress::parse("left").unwrap().code, KeyCode::Left);
        assert_eq!(KeyPress::parse("pgdown").unwrap().code, KeyCode::PageDown);
        assert_eq!(KeyPress::parse("space").unwrap().code, KeyCode::Char(' '));
        assert_eq!(KeyPress::parse("q").unwrap().code, KeyCode::Char('q'));
        assert!(KeyPress::parse("").is_none());
        assert!(KeyPress::parse("left2").is_none());
    }

    #[test]
    fn test_parse_modifiers() {
        let kp = KeyPress::parse("ctrl+alt+x").unwrap();
        assert_eq!(kp.code, KeyCode::Char('x'));
        assert_eq!(kp.modifiers, KeyModifiers::CONTROL | KeyModifiers::ALT);
    }

    #[test]
    fn test_binding_matches() {
        let b = new_binding(vec![with_keys_str(&["right", "l"]), with_help("→/l", "next")]);
        assert!(b.matches(&key(KeyCode::Right)));
        assert!(b.matches(&key(KeyCode::Char('l'))));
        assert!(!b.matches(&key(KeyCode::Left)));
        assert!(!b.matches(&KeyMsg {
            key: KeyCode::Char('l'),
            modifiers: KeyModifiers::CONTROL,
        }));
    }

    #[test]
    fn test_disabled_binding_never_matches() {
        let mut b = new_binding(vec![with_keys_str(&["enter"]), with_disabled()]);
        assert!(!b.enabled());
        assert!(!b.matches(&key(KeyCode::Enter)));

        b.set_enabled(true);
        assert!(b.matches(&key(KeyCode::Enter)));
    }

    #[test]
    fn test_empty_binding_is_disabled() {
        let b = Binding::default();
        assert!(!b.enabled());
    }

    #[test]
    fn test_matches_any() {
        let a = Binding::new(vec![KeyCode::Esc]);
        let b = Binding::new(vec![KeyCode::Char('q')]);
        assert!(matches(&key(KeyCode::Char('q')), &[&a, &b]));
        assert!(!matches(&key(KeyCode::Enter), &[&a, &b]));
    }
}
