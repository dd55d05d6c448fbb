//! Toolbar commands and keybindings.
//!
//! Platform-agnostic definitions for editor operations. `EditorCommand` is a
//! semantic formatting operation applied to whatever is selected in the
//! editable region; `KeyCombo` is the platform-neutral form of a keydown
//! that the keybinding table maps onto commands.

use std::collections::HashMap;

use smol_str::SmolStr;

/// Formatting and history commands offered by the toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    Bold,
    Italic,
    Underline,
    UnorderedList,
    OrderedList,
    AlignLeft,
    AlignCenter,
    AlignRight,
    BlockQuote,
    Undo,
    Redo,
    /// Prompts for a URL before anything is applied.
    CreateLink,
}

impl EditorCommand {
    /// Toolbar order.
    pub const TOOLBAR: [EditorCommand; 12] = [
        EditorCommand::Bold,
        EditorCommand::Italic,
        EditorCommand::Underline,
        EditorCommand::UnorderedList,
        EditorCommand::OrderedList,
        EditorCommand::AlignLeft,
        EditorCommand::AlignCenter,
        EditorCommand::AlignRight,
        EditorCommand::BlockQuote,
        EditorCommand::CreateLink,
        EditorCommand::Undo,
        EditorCommand::Redo,
    ];

    /// Name of the native rich-text command.
    pub fn native_name(self) -> &'static str {
        match self {
            EditorCommand::Bold => "bold",
            EditorCommand::Italic => "italic",
            EditorCommand::Underline => "underline",
            EditorCommand::UnorderedList => "insertUnorderedList",
            EditorCommand::OrderedList => "insertOrderedList",
            EditorCommand::AlignLeft => "justifyLeft",
            EditorCommand::AlignCenter => "justifyCenter",
            EditorCommand::AlignRight => "justifyRight",
            EditorCommand::BlockQuote => "formatBlock",
            EditorCommand::Undo => "undo",
            EditorCommand::Redo => "redo",
            EditorCommand::CreateLink => "createLink",
        }
    }

    /// Value passed along when the caller supplies none.
    pub fn default_value(self) -> Option<&'static str> {
        match self {
            EditorCommand::BlockQuote => Some("blockquote"),
            _ => None,
        }
    }

    /// Short toolbar label.
    pub fn label(self) -> &'static str {
        match self {
            EditorCommand::Bold => "B",
            EditorCommand::Italic => "I",
            EditorCommand::Underline => "U",
            EditorCommand::UnorderedList => "•",
            EditorCommand::OrderedList => "1.",
            EditorCommand::AlignLeft => "⇤",
            EditorCommand::AlignCenter => "↔",
            EditorCommand::AlignRight => "⇥",
            EditorCommand::BlockQuote => "❝",
            EditorCommand::Undo => "↶",
            EditorCommand::Redo => "↷",
            EditorCommand::CreateLink => "🔗",
        }
    }

    /// Tooltip text.
    pub fn title(self) -> &'static str {
        match self {
            EditorCommand::Bold => "Bold (Ctrl+B)",
            EditorCommand::Italic => "Italic (Ctrl+I)",
            EditorCommand::Underline => "Underline (Ctrl+U)",
            EditorCommand::UnorderedList => "Bullet List",
            EditorCommand::OrderedList => "Numbered List",
            EditorCommand::AlignLeft => "Align Left",
            EditorCommand::AlignCenter => "Align Center",
            EditorCommand::AlignRight => "Align Right",
            EditorCommand::BlockQuote => "Quote",
            EditorCommand::Undo => "Undo (Ctrl+Z)",
            EditorCommand::Redo => "Redo (Ctrl+Shift+Z)",
            EditorCommand::CreateLink => "Link",
        }
    }
}

/// Key values for keyboard input.
///
/// Only the keys the editor cares about get their own variant. Platform code
/// converts native key events to this enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Key {
    /// A character key.
    Character(SmolStr),

    /// Unknown/unidentified key.
    Unidentified,

    Backspace,
    Delete,
    Enter,
    Tab,
    Escape,

    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,

    Alt,
    Control,
    Meta,
    Shift,
}

impl Key {
    /// Create a character key.
    pub fn character(s: impl Into<SmolStr>) -> Self {
        Self::Character(s.into())
    }

    /// Parse a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Backspace" => Key::Backspace,
            "Delete" => Key::Delete,
            "Enter" => Key::Enter,
            "Tab" => Key::Tab,
            "Escape" => Key::Escape,
            "ArrowLeft" => Key::ArrowLeft,
            "ArrowRight" => Key::ArrowRight,
            "ArrowUp" => Key::ArrowUp,
            "ArrowDown" => Key::ArrowDown,
            "Alt" => Key::Alt,
            "Control" => Key::Control,
            "Meta" => Key::Meta,
            "Shift" => Key::Shift,
            s if s.chars().count() == 1 => Key::character(s),
            _ => Key::Unidentified,
        }
    }

    /// Check if this is a modifier key.
    pub fn is_modifier(&self) -> bool {
        matches!(self, Self::Alt | Self::Control | Self::Meta | Self::Shift)
    }

    /// Character keys compare case-insensitively; Shift+Z arrives as "Z".
    fn normalized(&self) -> Self {
        match self {
            Key::Character(s) => Key::Character(s.to_lowercase().into()),
            other => other.clone(),
        }
    }
}

/// Modifier key state for a key combination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const CTRL: Self = Self {
        ctrl: true,
        alt: false,
        shift: false,
        meta: false,
    };

    pub const META: Self = Self {
        ctrl: false,
        alt: false,
        shift: false,
        meta: true,
    };

    pub const CTRL_SHIFT: Self = Self {
        ctrl: true,
        alt: false,
        shift: true,
        meta: false,
    };

    pub const META_SHIFT: Self = Self {
        ctrl: false,
        alt: false,
        shift: true,
        meta: true,
    };

    /// Get the primary modifier for the platform (Cmd on Mac, Ctrl elsewhere).
    pub fn primary(is_mac: bool) -> Self {
        if is_mac { Self::META } else { Self::CTRL }
    }

    /// Get the primary modifier + Shift for the platform.
    pub fn primary_shift(is_mac: bool) -> Self {
        if is_mac {
            Self::META_SHIFT
        } else {
            Self::CTRL_SHIFT
        }
    }
}

/// A key combination for triggering a command.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyCombo {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn with_modifiers(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }

    pub fn primary(key: Key, is_mac: bool) -> Self {
        Self {
            key,
            modifiers: Modifiers::primary(is_mac),
        }
    }

    pub fn primary_shift(key: Key, is_mac: bool) -> Self {
        Self {
            key,
            modifiers: Modifiers::primary_shift(is_mac),
        }
    }
}

/// Result of handling a keydown event.
#[derive(Debug, Clone, PartialEq)]
pub enum KeydownResult {
    /// Event was handled, prevent default.
    Handled,
    /// Event was not a keybinding, let the platform handle it.
    NotHandled,
}

/// Shortcut table.
#[derive(Debug, Clone, Default)]
pub struct KeybindingConfig {
    bindings: HashMap<KeyCombo, EditorCommand>,
}

impl KeybindingConfig {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Primary+B/I/U, primary+Z for undo and primary+Shift+Z for redo.
    pub fn default_for_platform(is_mac: bool) -> Self {
        let mut config = Self::empty();
        config.bind(KeyCombo::primary(Key::character("b"), is_mac), EditorCommand::Bold);
        config.bind(KeyCombo::primary(Key::character("i"), is_mac), EditorCommand::Italic);
        config.bind(
            KeyCombo::primary(Key::character("u"), is_mac),
            EditorCommand::Underline,
        );
        config.bind(KeyCombo::primary(Key::character("z"), is_mac), EditorCommand::Undo);
        config.bind(
            KeyCombo::primary_shift(Key::character("z"), is_mac),
            EditorCommand::Redo,
        );
        config
    }

    pub fn bind(&mut self, combo: KeyCombo, command: EditorCommand) {
        let combo = KeyCombo::with_modifiers(combo.key.normalized(), combo.modifiers);
        self.bindings.insert(combo, command);
    }

    pub fn lookup(&self, combo: &KeyCombo) -> Option<EditorCommand> {
        if combo.key.is_modifier() {
            return None;
        }
        let normalized = KeyCombo::with_modifiers(combo.key.normalized(), combo.modifiers);
        self.bindings.get(&normalized).copied()
    }
}
