//! Display-name → topical category.
//!
//! Case-insensitive substring match against ordered keyword groups; the
//! first group with a hit wins. Name-based only, so it is a heuristic: short
//! keywords such as "ai" or "art" match inside unrelated words.

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Crypto,
    Tech,
    Finance,
    Entertainment,
    General,
}

/// Keyword groups in match order. `General` has no keywords.
const KEYWORD_GROUPS: &[(Category, &[&str])] = &[
    (Category::Crypto, &["crypto", "btc", "eth", "nft"]),
    (Category::Tech, &["tech", "ai", "startup"]),
    (Category::Finance, &["trading", "finance", "invest"]),
    (Category::Entertainment, &["gaming", "art", "music"]),
];

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Crypto => "crypto",
            Self::Tech => "tech",
            Self::Finance => "finance",
            Self::Entertainment => "entertainment",
            Self::General => "general",
        }
    }

    pub fn all() -> &'static [Category] {
        &[
            Self::Crypto,
            Self::Tech,
            Self::Finance,
            Self::Entertainment,
            Self::General,
        ]
    }

    pub fn keywords(&self) -> &'static [&'static str] {
        KEYWORD_GROUPS
            .iter()
            .find(|(category, _)| category == self)
            .map(|(_, keywords)| *keywords)
            .unwrap_or(&[])
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

pub fn categorize(display_name: &str) -> Category {
    let name = display_name.to_lowercase();
    KEYWORD_GROUPS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| name.contains(kw)))
        .map(|(category, _)| *category)
        .unwrap_or(Category::General)
}
