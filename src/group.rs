//! Classification of source files into language groups by extension.
//!
//! The table is checked in order: C/C++-like, then JS-like, and anything
//! else falls through to [`FileGroup::Etc`].

use serde::Serialize;

/// A language group for source files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FileGroup {
    C,
    Js,
    Etc,
}

impl FileGroup {
    /// All groups, in classification order.
    pub const ALL: [FileGroup; 3] = [FileGroup::C, FileGroup::Js, FileGroup::Etc];

    pub fn as_str(&self) -> &'static str {
        match self {
            FileGroup::C => "c",
            FileGroup::Js => "js",
            FileGroup::Etc => "etc",
        }
    }

    /// Human-readable title used in summaries.
    pub fn title(&self) -> &'static str {
        match self {
            FileGroup::C => "C/C++ coverage",
            FileGroup::Js => "JS coverage",
            FileGroup::Etc => "Etc. coverage",
        }
    }

    /// Extensions that belong to this group. `Etc` has none; it is the
    /// fallback.
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            FileGroup::C => &["cpp", "h", "c", "cc", "hh", "tcc"],
            FileGroup::Js => &["js", "jsm"],
            FileGroup::Etc => &[],
        }
    }

    /// Classify a file name. Returns the group and whether the extension was
    /// recognized (`false` means the file fell through to `Etc`).
    pub fn classify(name: &str) -> (FileGroup, bool) {
        let ext = extension(name);
        for group in [FileGroup::C, FileGroup::Js] {
            if group.extensions().contains(&ext) {
                return (group, true);
            }
        }
        (FileGroup::Etc, false)
    }
}

/// The substring after the final `.` of `name`, or the whole name when it
/// has no `.`.
pub fn extension(name: &str) -> &str {
    name.rsplit('.').next().unwrap_or(name)
}
