//! Option set and mode decoding
//!
//! Callers describe the wanted output shape either with a letter string
//! (one letter per option) or with the legacy numeric code used by older
//! front ends. Both decode into the same [`Options`] record.
//!
//! Letters:
//!
//! | Letter | Option                                  |
//! |--------|-----------------------------------------|
//! | `M`    | keep morphology                         |
//! | `S`    | show spaces                             |
//! | `T`    | show terminators                        |
//! | `C`    | show word classes (selmaho)             |
//! | `R`    | raw output, do not trim the tree        |
//! | `N`    | show main node labels                   |
//! | `J`    | JSON output                             |
//! | `!`    | no `name:value` leaf prefixes           |
//!
//! Legacy codes are in `0..=31`: bit 8 shows spaces, bit 16 keeps morphology
//! and the low three bits select one of eight presets (see [`legacy_letters`]).

use crate::postproc::error::{PostprocError, Result};
use std::fmt;
use std::str::FromStr;

/// The eight display options of one postprocessing run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Options {
    pub keep_morphology: bool,
    pub show_spaces: bool,
    pub show_terminators: bool,
    pub show_selmaho: bool,
    pub trim: bool,
    pub show_node_labels: bool,
    pub json_format: bool,
    pub no_leaf_prefix: bool,
}

/// Letters accepted in a mode string, in documentation order
pub const MODE_LETTERS: &[(char, &str)] = &[
    ('M', "Keep morphology"),
    ('S', "Show spaces"),
    ('T', "Show terminators"),
    ('C', "Show word classes (selmaho)"),
    ('R', "Raw output, do not trim the parse tree"),
    ('N', "Show main node labels"),
    ('J', "JSON output"),
    ('!', "Do not prefix leaves with their node name"),
];

/// One row of the legacy preset table, selected by `code % 8`
#[derive(Debug, Clone, Copy)]
struct LegacyPreset {
    json: bool,
    raw: bool,
    selmaho: bool,
    labels: bool,
    terminators: bool,
}

const fn preset(json: bool, raw: bool, selmaho: bool, labels: bool, terminators: bool) -> LegacyPreset {
    LegacyPreset {
        json,
        raw,
        selmaho,
        labels,
        terminators,
    }
}

const LEGACY_PRESETS: [LegacyPreset; 8] = [
    preset(true, true, false, false, true),
    preset(false, true, false, false, true),
    preset(false, false, false, false, true),
    preset(false, false, true, false, true),
    preset(false, false, true, true, true),
    preset(false, false, false, false, false),
    preset(false, false, true, false, false),
    preset(false, false, true, true, false),
];

const LEGACY_SPACES_BIT: u8 = 8;
const LEGACY_MORPHOLOGY_BIT: u8 = 16;
const LEGACY_MAX: u8 = 31;

impl Options {
    /// Decode a letter string such as `"CTN"`. Repeated letters are harmless.
    pub fn from_letters(letters: &str) -> Result<Self> {
        if let Some(unknown) = letters
            .chars()
            .find(|c| !MODE_LETTERS.iter().any(|(letter, _)| letter == c))
        {
            return Err(PostprocError::InvalidOption(format!(
                "unknown mode letter '{unknown}' in \"{letters}\""
            )));
        }
        let has = |letter: char| letters.contains(letter);
        Ok(Options {
            keep_morphology: has('M'),
            show_spaces: has('S'),
            show_terminators: has('T'),
            show_selmaho: has('C'),
            trim: !has('R'),
            show_node_labels: has('N'),
            json_format: has('J'),
            no_leaf_prefix: has('!'),
        })
    }

    /// Decode a legacy numeric code in `0..=31`.
    pub fn from_legacy(code: i64) -> Result<Self> {
        let code = u8::try_from(code)
            .ok()
            .filter(|code| *code <= LEGACY_MAX)
            .ok_or_else(|| {
                PostprocError::InvalidOption(format!(
                    "legacy mode {code} is outside 0..={LEGACY_MAX}"
                ))
            })?;
        let preset = LEGACY_PRESETS[usize::from(code % 8)];
        Ok(Options {
            keep_morphology: code & LEGACY_MORPHOLOGY_BIT != 0,
            show_spaces: code & LEGACY_SPACES_BIT != 0,
            show_terminators: preset.terminators,
            show_selmaho: preset.selmaho,
            trim: !preset.raw,
            show_node_labels: preset.labels,
            json_format: preset.json,
            no_leaf_prefix: false,
        })
    }

    /// Whether remaining `name`/`value` pairs collapse to `name:value` strings
    pub fn prefix_leaf_labels(&self) -> bool {
        (self.show_node_labels || self.show_selmaho) && !self.no_leaf_prefix
    }

    /// Canonical letter string for these options
    pub fn to_letters(&self) -> String {
        let mut letters = String::new();
        for (flag, letter) in [
            (self.keep_morphology, 'M'),
            (self.show_spaces, 'S'),
            (self.show_terminators, 'T'),
            (self.show_selmaho, 'C'),
            (!self.trim, 'R'),
            (self.show_node_labels, 'N'),
            (self.json_format, 'J'),
            (self.no_leaf_prefix, '!'),
        ] {
            if flag {
                letters.push(letter);
            }
        }
        letters
    }
}

/// The letter string a legacy code stands for
pub fn legacy_letters(code: u8) -> String {
    let mut mode = String::new();
    if code & LEGACY_SPACES_BIT != 0 {
        mode.push('S');
    }
    if code & LEGACY_MORPHOLOGY_BIT != 0 {
        mode.push('M');
    }
    let preset = code % 8;
    if preset == 0 {
        mode.push('J');
    }
    if preset <= 1 {
        mode.push('R');
    }
    if preset > 2 && preset != 5 {
        mode.push('C');
    }
    if preset == 4 || preset == 7 {
        mode.push('N');
    }
    if preset < 5 {
        mode.push('T');
    }
    mode
}

/// A mode as supplied by a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Letters(String),
    Legacy(i64),
}

impl Mode {
    pub fn decode(&self) -> Result<Options> {
        match self {
            Mode::Letters(letters) => Options::from_letters(letters),
            Mode::Legacy(code) => Options::from_legacy(*code),
        }
    }
}

impl Default for Mode {
    fn default() -> Self {
        Mode::Letters(String::new())
    }
}

impl FromStr for Mode {
    type Err = PostprocError;

    /// All-digit strings are legacy codes, anything else is a letter string.
    fn from_str(s: &str) -> Result<Self> {
        if !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()) {
            s.parse::<i64>()
                .map(Mode::Legacy)
                .map_err(|e| PostprocError::InvalidOption(format!("legacy mode {s}: {e}")))
        } else {
            Ok(Mode::Letters(s.to_string()))
        }
    }
}

impl From<&str> for Mode {
    fn from(letters: &str) -> Self {
        Mode::Letters(letters.to_string())
    }
}

impl From<i64> for Mode {
    fn from(code: i64) -> Self {
        Mode::Legacy(code)
    }
}

impl From<i32> for Mode {
    fn from(code: i32) -> Self {
        Mode::Legacy(i64::from(code))
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Mode::Letters(letters) => write!(f, "{letters}"),
            Mode::Legacy(code) => write!(f, "{code}"),
        }
    }
}
