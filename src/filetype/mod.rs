//! Content classification for directory entries.
//!
//! # Kinds
//! The type letter alone selects the [`ContentKind`]. Unknown letters are
//! legal and fall back to [`ContentKind::Unclassified`]; classification
//! never fails.
//!
//! # Hints
//! Binary files carry no graphics flag, so the byte length is used to guess
//! whether a `B` file is a screen dump. The ranges are approximate (a
//! hi-res screen may have up to 8 spare bytes at its end). A [`FilterHint`]
//! is advice for picking a content decoder, never proof of structure.

use std::ops::RangeInclusive;

use serde::Serialize;

use crate::entry::DirectoryEntry;

/// Byte lengths treated as a hi-res screen (8 KiB minus slack).
pub const HIRES_SIZE_RANGE:        RangeInclusive<u16> = 8185..=8192;
/// Byte lengths treated as a double hi-res screen (16 KiB minus slack).
pub const DOUBLE_HIRES_SIZE_RANGE: RangeInclusive<u16> = 16377..=16384;

// ── ContentKind ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ContentKind {
    AppleSoftProgram,
    IntegerBasicProgram,
    TextDocument,
    BinaryOrGraphics,
    Unclassified,
}

impl ContentKind {
    pub fn from_marker(marker: char) -> Self {
        match marker {
            'A' => ContentKind::AppleSoftProgram,
            'I' => ContentKind::IntegerBasicProgram,
            'T' => ContentKind::TextDocument,
            'B' => ContentKind::BinaryOrGraphics,
            _   => ContentKind::Unclassified,
        }
    }

    /// Canonical type letter, if the kind has one.
    pub fn marker(self) -> Option<char> {
        match self {
            ContentKind::AppleSoftProgram    => Some('A'),
            ContentKind::IntegerBasicProgram => Some('I'),
            ContentKind::TextDocument        => Some('T'),
            ContentKind::BinaryOrGraphics    => Some('B'),
            ContentKind::Unclassified        => None,
        }
    }

    /// Human-readable name (diagnostics only).
    pub fn name(self) -> &'static str {
        match self {
            ContentKind::AppleSoftProgram    => "Applesoft BASIC",
            ContentKind::IntegerBasicProgram => "Integer BASIC",
            ContentKind::TextDocument        => "text",
            ContentKind::BinaryOrGraphics    => "binary",
            ContentKind::Unclassified        => "unclassified",
        }
    }
}

// ── FilterHint ────────────────────────────────────────────────────────────────

/// Suggested decoder for turning stored bytes into something displayable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FilterHint {
    ApplesoftListing,
    IntegerBasicListing,
    Text,
    HiResColor,
    DoubleHiResColor,
    GenericBinary,
}

impl FilterHint {
    pub fn label(self) -> &'static str {
        match self {
            FilterHint::ApplesoftListing    => "applesoft listing",
            FilterHint::IntegerBasicListing => "integer basic listing",
            FilterHint::Text                => "text",
            FilterHint::HiResColor          => "color hi-res graphics",
            FilterHint::DoubleHiResColor    => "double hi-res color graphics",
            FilterHint::GenericBinary       => "generic binary",
        }
    }

    pub fn is_graphics(self) -> bool {
        matches!(self, FilterHint::HiResColor | FilterHint::DoubleHiResColor)
    }

    fn for_binary(byte_length: u16) -> Self {
        if HIRES_SIZE_RANGE.contains(&byte_length) {
            FilterHint::HiResColor
        } else if DOUBLE_HIRES_SIZE_RANGE.contains(&byte_length) {
            FilterHint::DoubleHiResColor
        } else {
            FilterHint::GenericBinary
        }
    }
}

impl std::fmt::Display for FilterHint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Classify an entry and suggest a decoder for its content.
pub fn classify(entry: &DirectoryEntry) -> (ContentKind, FilterHint) {
    let kind = ContentKind::from_marker(entry.filetype());
    let hint = match kind {
        ContentKind::AppleSoftProgram    => FilterHint::ApplesoftListing,
        ContentKind::IntegerBasicProgram => FilterHint::IntegerBasicListing,
        ContentKind::TextDocument        => FilterHint::Text,
        ContentKind::BinaryOrGraphics    => FilterHint::for_binary(entry.byte_length),
        ContentKind::Unclassified        => FilterHint::GenericBinary,
    };
    (kind, hint)
}
