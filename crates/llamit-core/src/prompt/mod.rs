//! Prompt formatting: pick a commit message style and wrap the diff in it.

mod templates;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Commit message style requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptFormat {
    #[default]
    Conventional,
    Angular,
    Gitmoji,
    Karma,
    Semantic,
    Google,
    /// User-supplied instructions; falls back to conventional when empty.
    Custom,
}

impl PromptFormat {
    pub const ALL: [PromptFormat; 7] = [
        PromptFormat::Conventional,
        PromptFormat::Angular,
        PromptFormat::Gitmoji,
        PromptFormat::Karma,
        PromptFormat::Semantic,
        PromptFormat::Google,
        PromptFormat::Custom,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PromptFormat::Conventional => "conventional",
            PromptFormat::Angular => "angular",
            PromptFormat::Gitmoji => "gitmoji",
            PromptFormat::Karma => "karma",
            PromptFormat::Semantic => "semantic",
            PromptFormat::Google => "google",
            PromptFormat::Custom => "custom",
        }
    }

    /// Parse a format name, falling back to conventional for unknown names.
    pub fn from_name_or_default(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::warn!("unknown format {:?}, using conventional", name);
            PromptFormat::Conventional
        })
    }
}

impl fmt::Display for PromptFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown format {0:?} (expected one of conventional, angular, gitmoji, karma, semantic, google, custom)")]
pub struct UnknownFormat(pub String);

impl FromStr for PromptFormat {
    type Err = UnknownFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        PromptFormat::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownFormat(s.to_string()))
    }
}

/// Instruction block for `format`. `custom` is only consulted for
/// `PromptFormat::Custom`.
pub fn instructions(format: PromptFormat, custom: Option<&str>) -> &str {
    match format {
        PromptFormat::Conventional => templates::CONVENTIONAL,
        PromptFormat::Angular => templates::ANGULAR,
        PromptFormat::Gitmoji => templates::GITMOJI,
        PromptFormat::Karma => templates::KARMA,
        PromptFormat::Semantic => templates::SEMANTIC,
        PromptFormat::Google => templates::GOOGLE,
        PromptFormat::Custom => match custom.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => {
                tracing::debug!("custom format without a template, using conventional");
                templates::CONVENTIONAL
            }
        },
    }
}

/// Full prompt: instructions, then the diff.
pub fn render(format: PromptFormat, custom: Option<&str>, diff: &str) -> String {
    let head = instructions(format, custom);
    let mut prompt = String::with_capacity(head.len() + templates::DIFF_HEADER.len() + diff.len());
    prompt.push_str(head);
    prompt.push_str(templates::DIFF_HEADER);
    prompt.push_str(diff);
    prompt
}
