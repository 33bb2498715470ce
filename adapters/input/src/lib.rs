#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Input-dispatch layer translating raw device state into tile actions.
//!
//! Hosts record which buttons and keys went down this frame and which are
//! held, then ask a [`KeyBindings`] table to distill that into the
//! [`TileInput`] consumed by the hovered tile. Bindings default to mouse
//! buttons for the three clicks, `U` as the unit modifier and `Space` for team
//! swaps, and can be overridden from a TOML file.

use std::{
    collections::{HashMap, HashSet},
    fmt, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tactics_tile::TileInput;
use thiserror::Error;
use tracing::debug;

const SUPPORTED_BINDINGS_VERSION: u32 = 1;

/// Named keyboard keys that can be bound.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Key {
    /// A letter or digit key, stored upper-case.
    Character(char),
    /// Space bar.
    Space,
    /// Enter or return.
    Enter,
    /// Tab.
    Tab,
    /// Left shift.
    LeftShift,
    /// Left control.
    LeftControl,
    /// Left alt.
    LeftAlt,
}

/// Physical source a binding listens to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum InputSource {
    /// Left mouse button.
    MouseLeft,
    /// Right mouse button.
    MouseRight,
    /// Middle mouse button.
    MouseMiddle,
    /// Keyboard key.
    Key(Key),
}

impl InputSource {
    /// Parses a binding name such as `MouseLeft`, `Space` or `U`.
    pub fn parse(name: &str) -> Result<Self, BindingsError> {
        let source = match name {
            "MouseLeft" => Self::MouseLeft,
            "MouseRight" => Self::MouseRight,
            "MouseMiddle" => Self::MouseMiddle,
            "Space" => Self::Key(Key::Space),
            "Enter" => Self::Key(Key::Enter),
            "Tab" => Self::Key(Key::Tab),
            "LeftShift" => Self::Key(Key::LeftShift),
            "LeftControl" => Self::Key(Key::LeftControl),
            "LeftAlt" => Self::Key(Key::LeftAlt),
            other => {
                let mut chars = other.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) if c.is_ascii_alphanumeric() => {
                        Self::Key(Key::Character(c.to_ascii_uppercase()))
                    }
                    _ => return Err(BindingsError::UnknownInput(other.to_owned())),
                }
            }
        };
        Ok(source)
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MouseLeft => f.write_str("MouseLeft"),
            Self::MouseRight => f.write_str("MouseRight"),
            Self::MouseMiddle => f.write_str("MouseMiddle"),
            Self::Key(Key::Character(c)) => write!(f, "{c}"),
            Self::Key(key) => write!(f, "{key:?}"),
        }
    }
}

/// Device state sampled for a single frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FrameState {
    pressed: HashSet<InputSource>,
    held: HashSet<InputSource>,
}

impl FrameState {
    /// Creates an empty frame.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks the source as having gone down this frame. Pressed sources count as held.
    #[must_use]
    pub fn press(mut self, source: InputSource) -> Self {
        let _ = self.pressed.insert(source);
        let _ = self.held.insert(source);
        self
    }

    /// Marks the source as held without a new press this frame.
    #[must_use]
    pub fn hold(mut self, source: InputSource) -> Self {
        let _ = self.held.insert(source);
        self
    }

    /// Whether the source went down this frame.
    #[must_use]
    pub fn was_pressed(&self, source: InputSource) -> bool {
        self.pressed.contains(&source)
    }

    /// Whether the source is down this frame.
    #[must_use]
    pub fn is_held(&self, source: InputSource) -> bool {
        self.held.contains(&source)
    }
}

/// Actions a tile responds to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileAction {
    /// Primary click.
    Primary,
    /// Secondary click.
    Secondary,
    /// Tertiary click.
    Tertiary,
    /// Held modifier that turns a primary click into unit placement.
    UnitModifier,
    /// Swap the occupant's team.
    TeamSwap,
}

impl TileAction {
    /// Every action, in configuration order.
    pub const ALL: [TileAction; 5] = [
        TileAction::Primary,
        TileAction::Secondary,
        TileAction::Tertiary,
        TileAction::UnitModifier,
        TileAction::TeamSwap,
    ];

    /// Name used for the action in bindings files.
    #[must_use]
    pub const fn config_name(self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Tertiary => "tertiary",
            Self::UnitModifier => "unit_modifier",
            Self::TeamSwap => "team_swap",
        }
    }

    fn from_config_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.config_name() == name)
    }
}

/// Mapping from tile actions to the physical inputs that trigger them.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyBindings {
    primary: InputSource,
    secondary: InputSource,
    tertiary: InputSource,
    unit_modifier: InputSource,
    team_swap: InputSource,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            primary: InputSource::MouseLeft,
            secondary: InputSource::MouseRight,
            tertiary: InputSource::MouseMiddle,
            unit_modifier: InputSource::Key(Key::Character('U')),
            team_swap: InputSource::Key(Key::Space),
        }
    }
}

impl KeyBindings {
    /// Returns the source bound to the action.
    #[must_use]
    pub const fn source(&self, action: TileAction) -> InputSource {
        match action {
            TileAction::Primary => self.primary,
            TileAction::Secondary => self.secondary,
            TileAction::Tertiary => self.tertiary,
            TileAction::UnitModifier => self.unit_modifier,
            TileAction::TeamSwap => self.team_swap,
        }
    }

    /// Returns a copy with the action rebound.
    #[must_use]
    pub fn with(mut self, action: TileAction, source: InputSource) -> Self {
        let slot = match action {
            TileAction::Primary => &mut self.primary,
            TileAction::Secondary => &mut self.secondary,
            TileAction::Tertiary => &mut self.tertiary,
            TileAction::UnitModifier => &mut self.unit_modifier,
            TileAction::TeamSwap => &mut self.team_swap,
        };
        *slot = source;
        self
    }

    /// Distills a frame into the input seen by the hovered tile.
    #[must_use]
    pub fn translate(&self, frame: &FrameState) -> TileInput {
        TileInput {
            primary_pressed: frame.was_pressed(self.primary),
            secondary_pressed: frame.was_pressed(self.secondary),
            tertiary_pressed: frame.was_pressed(self.tertiary),
            unit_modifier_held: frame.is_held(self.unit_modifier),
            team_swap_pressed: frame.was_pressed(self.team_swap),
        }
    }

    /// Loads bindings from the file at the provided path.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, BindingsError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| BindingsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let bindings = Self::from_toml_str(&contents)?;
        debug!(path = %path.display(), "loaded key bindings");
        Ok(bindings)
    }

    /// Parses bindings from TOML contents.
    pub fn from_toml_str(contents: &str) -> Result<Self, BindingsError> {
        let manifest: BindingsManifest = toml::from_str(contents)?;
        if manifest.version != SUPPORTED_BINDINGS_VERSION {
            return Err(BindingsError::UnsupportedVersion(manifest.version));
        }

        let mut resolved = HashMap::with_capacity(manifest.bindings.len());
        for (name, input) in manifest.bindings {
            let action = TileAction::from_config_name(&name)
                .ok_or_else(|| BindingsError::UnknownAction(name.clone()))?;
            let _ = resolved.insert(action, InputSource::parse(&input)?);
        }

        let mut bindings = Self::default();
        for action in TileAction::ALL {
            let Some(source) = resolved.remove(&action) else {
                return Err(BindingsError::MissingAction(action.config_name()));
            };
            bindings = bindings.with(action, source);
        }
        Ok(bindings)
    }
}

#[derive(Debug, Deserialize)]
struct BindingsManifest {
    version: u32,
    bindings: HashMap<String, String>,
}

/// Errors raised while loading key bindings.
#[derive(Debug, Error)]
pub enum BindingsError {
    /// The bindings file could not be read.
    #[error("failed to read key bindings at {}", .path.display())]
    Io {
        /// Path that failed to load.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The contents were not valid TOML for a bindings file.
    #[error("failed to parse key bindings toml")]
    Toml(#[from] toml::de::Error),
    /// The file declared a version this build does not understand.
    #[error(
        "unsupported key bindings version {0}; expected {expected}",
        expected = SUPPORTED_BINDINGS_VERSION
    )]
    UnsupportedVersion(u32),
    /// An entry named an action that does not exist.
    #[error("unknown tile action `{0}`")]
    UnknownAction(String),
    /// An entry named an input that cannot be bound.
    #[error("unknown input `{0}`")]
    UnknownInput(String),
    /// An action had no binding.
    #[error("key bindings missing entry for `{0}`")]
    MissingAction(&'static str),
}
