use std::fmt;

use crate::model::palette::{Rgb, TAB_BLUE, TAB_GREEN, TAB_GREY, TAB_PURPLE, TAB_RED};

/// Annotation sources compared in the pairwise-error figure. Declaration order
/// fixes both the file iteration order and the box groups on the x axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub enum Source {
    #[serde(rename = "automatic")]
    Automatic,
    #[serde(rename = "SP")]
    Sp,
    #[serde(rename = "NK")]
    Nk,
    #[serde(rename = "DLP")]
    Dlp,
    #[serde(rename = "MI")]
    Mi,
}

impl Source {
    pub const ALL: [Source; 5] = [
        Source::Automatic,
        Source::Sp,
        Source::Nk,
        Source::Dlp,
        Source::Mi,
    ];

    pub fn index(self) -> usize {
        match self {
            Source::Automatic => 0,
            Source::Sp => 1,
            Source::Nk => 2,
            Source::Dlp => 3,
            Source::Mi => 4,
        }
    }

    /// Token used in `compare-<a>-<b>.csv` file names.
    pub fn token(self) -> &'static str {
        match self {
            Source::Automatic => "automatic",
            Source::Sp => "SP",
            Source::Nk => "NK",
            Source::Dlp => "DLP",
            Source::Mi => "MI",
        }
    }

    pub fn category_label(self) -> &'static str {
        match self {
            Source::Automatic => "STIM",
            Source::Sp => "Human #1",
            Source::Nk => "Human #2",
            Source::Dlp => "Human #3",
            Source::Mi => "Human #4",
        }
    }

    pub fn color(self) -> Rgb {
        match self {
            Source::Automatic => TAB_GREY,
            Source::Sp => TAB_BLUE,
            Source::Nk => TAB_GREEN,
            Source::Dlp => TAB_RED,
            Source::Mi => TAB_PURPLE,
        }
    }

    /// All sources except `self`, in declaration order.
    pub fn others(self) -> impl Iterator<Item = Source> {
        Source::ALL.into_iter().filter(move |s| *s != self)
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/sources.rs"]
mod tests;
