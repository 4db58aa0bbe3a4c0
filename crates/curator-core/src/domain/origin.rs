//! Origin classes: how a subscription source was discovered.
//!
//! Each class carries a fixed failure tolerance (`expire`): the number of
//! consecutive failed cycles a record of that class survives before it is
//! dropped from the catalog.

use std::fmt;

/// Source class of a catalog record.
///
/// Records keep the raw tag string on disk; this enum is the parsed view used
/// for policy decisions. Unknown tags fall into `Unclassified` rather than
/// failing, so hand-written catalogs keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    /// Added for a single run; never expired by error count.
    Temporary,

    /// Operated by the catalog owner; never expired by error count.
    Owned,

    Page,
    Telegram,
    Github,
    Repo,
    Google,
    Yandex,
    Twitter,
    Remain,

    /// Empty or unrecognized tag.
    Unclassified,
}

impl Origin {
    pub const ALL: [Origin; 11] = [
        Origin::Temporary,
        Origin::Owned,
        Origin::Page,
        Origin::Telegram,
        Origin::Github,
        Origin::Repo,
        Origin::Google,
        Origin::Yandex,
        Origin::Twitter,
        Origin::Remain,
        Origin::Unclassified,
    ];

    /// Parse a persisted tag. Matching is case-insensitive and never fails.
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .filter(|origin| *origin != Origin::Unclassified)
            .find(|origin| origin.name().eq_ignore_ascii_case(tag))
            .unwrap_or(Origin::Unclassified)
    }

    /// Canonical tag as written in the catalog file.
    pub fn name(self) -> &'static str {
        match self {
            Origin::Temporary => "TEMPORARY",
            Origin::Owned => "OWNED",
            Origin::Page => "PAGE",
            Origin::Telegram => "TELEGRAM",
            Origin::Github => "GITHUB",
            Origin::Repo => "REPO",
            Origin::Google => "GOOGLE",
            Origin::Yandex => "YANDEX",
            Origin::Twitter => "TWITTER",
            Origin::Remain => "REMAIN",
            Origin::Unclassified => "UNCLASSIFIED",
        }
    }

    /// Consecutive-failure threshold. A record survives while `errors < expire`.
    pub fn expire(self) -> u32 {
        match self {
            Origin::Temporary | Origin::Owned => 0,
            Origin::Google | Origin::Yandex => 2,
            Origin::Page | Origin::Telegram | Origin::Twitter | Origin::Remain => 3,
            Origin::Unclassified => 3,
            Origin::Github | Origin::Repo => 5,
        }
    }

    /// Exempt classes skip the error-count check entirely.
    pub fn is_exempt(self) -> bool {
        matches!(self, Origin::Temporary | Origin::Owned)
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
