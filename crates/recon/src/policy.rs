//! Merge policy: the set of choices that decide what a report row contains.
//!
//! Every option is an enum whose variant order is the integer wire index the
//! shell exchanges with the engine. `ALL` is the mapping table; never reorder it.

use serde::{Deserialize, Serialize};

/// Name of the synthetic column listing which shared fields differed.
pub const DIFFERENT_FIELDS: &str = "different_fields";
/// Placeholder written for "show nothing".
pub const NOTHING: &str = " ";
pub const DASH: &str = "-";
pub const ABSENT: &str = "absent";
pub const MATCH: &str = "match";
pub const DIFFERENT: &str = "different";
/// Textual rendering of a missing value inside a joined cell.
pub const MISSING: &str = "None";

/// Shared behaviour of the enumerated policy options.
pub trait PolicyOption: Copy + Eq + Sized + 'static {
    /// Variants in wire-index order.
    const ALL: &'static [Self];

    /// Stable snake_case name used in config files and on the command line.
    fn name(self) -> &'static str;

    /// Human-readable label, as shown in a chooser.
    fn label(self) -> &'static str;

    fn index(self) -> usize {
        Self::ALL.iter().position(|v| *v == self).unwrap_or(0)
    }

    fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.name() == name)
    }

    /// Parse either a wire index (`"2"`) or a name (`"first_only"`).
    fn parse(input: &str) -> Option<Self> {
        match input.trim().parse::<usize>() {
            Ok(index) => Self::from_index(index),
            Err(_) => Self::from_name(input.trim()),
        }
    }
}

// ---------------------------------------------------------------------------
// Items
// ---------------------------------------------------------------------------

/// Which keys are eligible for the report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Items {
    /// Keys present in both datasets.
    #[default]
    Both,
    /// Keys present in either dataset.
    Either,
    FirstOnly,
    SecondOnly,
}

impl PolicyOption for Items {
    const ALL: &'static [Self] = &[Self::Both, Self::Either, Self::FirstOnly, Self::SecondOnly];

    fn name(self) -> &'static str {
        match self {
            Self::Both => "both",
            Self::Either => "either",
            Self::FirstOnly => "first_only",
            Self::SecondOnly => "second_only",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Both => "First file and Second file",
            Self::Either => "First file or Second file",
            Self::FirstOnly => "only First file",
            Self::SecondOnly => "only Second file",
        }
    }
}

// ---------------------------------------------------------------------------
// Values different
// ---------------------------------------------------------------------------

/// What to show when a shared field carries two different values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuesDifferent {
    #[default]
    Join,
    First,
    Second,
    Blank,
    Different,
    DropRow,
}

impl PolicyOption for ValuesDifferent {
    const ALL: &'static [Self] = &[
        Self::Join,
        Self::First,
        Self::Second,
        Self::Blank,
        Self::Different,
        Self::DropRow,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::First => "first",
            Self::Second => "second",
            Self::Blank => "blank",
            Self::Different => "different",
            Self::DropRow => "drop_row",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Join => "Show both values with delimiter",
            Self::First => "Show first value",
            Self::Second => "Show second value",
            Self::Blank => "Show nothing",
            Self::Different => "Show inscription \"different\"",
            Self::DropRow => "Do not show this Item",
        }
    }
}

// ---------------------------------------------------------------------------
// Delimiter
// ---------------------------------------------------------------------------

/// Separator placed between two joined values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Delimiter {
    #[default]
    SpacedSlash,
    Slash,
    SpacedPipe,
    Pipe,
    Space,
    Newline,
}

impl Delimiter {
    pub fn separator(self) -> &'static str {
        match self {
            Self::SpacedSlash => "   /   ",
            Self::Slash => " / ",
            Self::SpacedPipe => "   |   ",
            Self::Pipe => " | ",
            Self::Space => " ",
            Self::Newline => "\n",
        }
    }
}

impl PolicyOption for Delimiter {
    const ALL: &'static [Self] = &[
        Self::SpacedSlash,
        Self::Slash,
        Self::SpacedPipe,
        Self::Pipe,
        Self::Space,
        Self::Newline,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::SpacedSlash => "spaced_slash",
            Self::Slash => "slash",
            Self::SpacedPipe => "spaced_pipe",
            Self::Pipe => "pipe",
            Self::Space => "space",
            Self::Newline => "newline",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::SpacedSlash => "   /   ",
            Self::Slash => " / ",
            Self::SpacedPipe => "   |   ",
            Self::Pipe => " | ",
            Self::Space => " ",
            Self::Newline => "new line (\\n)",
        }
    }
}

// ---------------------------------------------------------------------------
// Values match
// ---------------------------------------------------------------------------

/// What to show when a shared field carries the same value on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValuesMatch {
    #[default]
    Blank,
    Value,
    Match,
}

impl PolicyOption for ValuesMatch {
    const ALL: &'static [Self] = &[Self::Blank, Self::Value, Self::Match];

    fn name(self) -> &'static str {
        match self {
            Self::Blank => "blank",
            Self::Value => "value",
            Self::Match => "match",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Blank => "Show nothing",
            Self::Value => "Show value",
            Self::Match => "Show inscription \"match\"",
        }
    }
}

// ---------------------------------------------------------------------------
// Absent
// ---------------------------------------------------------------------------

/// What to show when both records exist but one of them lacks the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Absent {
    /// Join both sides, rendering the missing one as `None`.
    #[default]
    Join,
    /// Concatenate both sides with missing coerced to empty text (no delimiter).
    Concat,
    Dash,
    Absent,
    DropRow,
    Blank,
}

impl PolicyOption for Absent {
    const ALL: &'static [Self] = &[
        Self::Join,
        Self::Concat,
        Self::Dash,
        Self::Absent,
        Self::DropRow,
        Self::Blank,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Join => "join",
            Self::Concat => "concat",
            Self::Dash => "dash",
            Self::Absent => "absent",
            Self::DropRow => "drop_row",
            Self::Blank => "blank",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Join => "Show one of value with \"None\"",
            Self::Concat => "Show one of value",
            Self::Dash => "Show sign \"-\"",
            Self::Absent => "Show inscription \"absent\"",
            Self::DropRow => "Do not show this Item",
            Self::Blank => "Show nothing",
        }
    }
}

// ---------------------------------------------------------------------------
// Columns
// ---------------------------------------------------------------------------

/// Which field set becomes the report schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Columns {
    #[default]
    Intersection,
    Union,
    SymmetricDifference,
    FirstOnly,
    SecondOnly,
}

impl PolicyOption for Columns {
    const ALL: &'static [Self] = &[
        Self::Intersection,
        Self::Union,
        Self::SymmetricDifference,
        Self::FirstOnly,
        Self::SecondOnly,
    ];

    fn name(self) -> &'static str {
        match self {
            Self::Intersection => "intersection",
            Self::Union => "union",
            Self::SymmetricDifference => "symmetric_difference",
            Self::FirstOnly => "first_only",
            Self::SecondOnly => "second_only",
        }
    }

    fn label(self) -> &'static str {
        match self {
            Self::Intersection => "First file and Second file",
            Self::Union => "First file or Second file",
            Self::SymmetricDifference => "if column is in one if file and it is absent in other",
            Self::FirstOnly => "only First file",
            Self::SecondOnly => "only Second file",
        }
    }
}

// ---------------------------------------------------------------------------
// Policy
// ---------------------------------------------------------------------------

/// Full set of merge choices for one report.
///
/// Snapshots are plain values: cloning a `Policy` shares nothing with the
/// original, which is what lets [`History`](crate::history::History) restore
/// earlier settings safely.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Policy {
    pub items: Items,
    #[serde(rename = "different_fields")]
    pub include_different_fields_column: bool,
    pub values_different: ValuesDifferent,
    pub delimiter: Delimiter,
    pub values_match: ValuesMatch,
    pub absent: Absent,
    pub columns: Columns,
    /// Field lists of the first and second dataset, each starting with its key.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fields: Option<[Vec<String>; 2]>,
}

impl Policy {
    pub fn with_fields(mut self, first: Vec<String>, second: Vec<String>) -> Self {
        self.fields = Some([first, second]);
        self
    }
}
