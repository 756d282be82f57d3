//! Field type dispatch.
//!
//! The `/FT` name and `/Ff` bits are inspected once and condensed into a
//! [`FieldKind`], which the appearance renderer matches on.

use super::field_flags::{AnnotationFlags, FieldFlags};

/// The `/FT` field type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldType {
    /// Text field (Tx)
    Text,
    /// Button field (Btn): checkbox, radio button or push button
    Button,
    /// Choice field (Ch): list box or combo box
    Choice,
    /// Signature field (Sig)
    Signature,
}

impl FieldType {
    /// `/FT` name.
    pub fn name(&self) -> &'static str {
        match self {
            FieldType::Text => "Tx",
            FieldType::Button => "Btn",
            FieldType::Choice => "Ch",
            FieldType::Signature => "Sig",
        }
    }

    /// Parse an `/FT` name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "Tx" => Some(FieldType::Text),
            "Btn" => Some(FieldType::Button),
            "Ch" => Some(FieldType::Choice),
            "Sig" => Some(FieldType::Signature),
            _ => None,
        }
    }
}

/// Symbol drawn in the on-state of a checkbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum CheckSymbol {
    /// Check mark
    #[default]
    Check,
    /// Filled circle
    Circle,
    /// Diagonal cross
    Cross,
    /// Filled diamond
    Diamond,
    /// Filled square
    Square,
    /// Filled star
    Star,
}

impl CheckSymbol {
    /// ZapfDingbats character code for the symbol.
    pub fn code(&self) -> char {
        match self {
            CheckSymbol::Check => '4',
            CheckSymbol::Circle => 'l',
            CheckSymbol::Cross => '8',
            CheckSymbol::Diamond => 'u',
            CheckSymbol::Square => 'n',
            CheckSymbol::Star => 'H',
        }
    }

    /// Symbol for an existing `/MK /CA` caption.
    pub fn from_code(code: &str) -> Option<Self> {
        let mut chars = code.chars();
        let symbol = match (chars.next()?, chars.next()) {
            ('4', None) => CheckSymbol::Check,
            ('l', None) => CheckSymbol::Circle,
            ('8', None) => CheckSymbol::Cross,
            ('u', None) => CheckSymbol::Diamond,
            ('n', None) => CheckSymbol::Square,
            ('H', None) => CheckSymbol::Star,
            _ => return None,
        };
        Some(symbol)
    }
}

/// Which appearance a field gets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Single-line text
    PlainText,
    /// Multi-line text
    MultilineText,
    /// Text spread over `max_len` equal cells
    CombText {
        /// Number of cells
        max_len: u32,
    },
    /// List box or combo box
    Choice {
        /// Combo box rather than list box
        combo: bool,
    },
    /// Two-state checkbox
    Checkbox(CheckSymbol),
    /// Radio button group
    RadioButton,
    /// Push button
    PushButton,
    /// Signature field
    Signature,
}

impl FieldKind {
    /// Decide the kind from type, flags and `/MaxLen`.
    ///
    /// A comb flag without a positive `max_len` yields plain text.
    pub fn classify(
        field_type: FieldType,
        flags: FieldFlags,
        max_len: Option<u32>,
        symbol: CheckSymbol,
    ) -> Self {
        match field_type {
            FieldType::Text => {
                if flags.contains(FieldFlags::MULTILINE) {
                    FieldKind::MultilineText
                } else if flags.contains(FieldFlags::COMB) {
                    match max_len {
                        Some(max_len) if max_len > 0 => FieldKind::CombText { max_len },
                        _ => FieldKind::PlainText,
                    }
                } else {
                    FieldKind::PlainText
                }
            },
            FieldType::Choice => FieldKind::Choice {
                combo: flags.contains(FieldFlags::COMBO),
            },
            FieldType::Button => {
                if flags.contains(FieldFlags::PUSH_BUTTON) {
                    FieldKind::PushButton
                } else if flags.contains(FieldFlags::RADIO) {
                    FieldKind::RadioButton
                } else {
                    FieldKind::Checkbox(symbol)
                }
            },
            FieldType::Signature => FieldKind::Signature,
        }
    }

    /// Whether the field carries a `/DA` string.
    pub fn uses_default_appearance(&self) -> bool {
        !matches!(
            self,
            FieldKind::Checkbox(_) | FieldKind::RadioButton | FieldKind::Signature
        )
    }

    /// Checkbox or radio button: appearances keyed by state name.
    pub fn is_toggle(&self) -> bool {
        matches!(self, FieldKind::Checkbox(_) | FieldKind::RadioButton)
    }
}

/// Whether a widget is shown on screen and in print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Shown and printed
    Visible,
    /// Neither shown nor printed
    Hidden,
    /// Shown but not printed
    VisibleButDoesNotPrint,
    /// Printed but not shown
    HiddenButPrintable,
}

impl Visibility {
    /// The `/F` flags for this visibility, or `None` to leave `/F` as is.
    pub fn annotation_flags(&self) -> Option<AnnotationFlags> {
        match self {
            Visibility::Visible => Some(AnnotationFlags::PRINT),
            Visibility::Hidden => Some(AnnotationFlags::PRINT | AnnotationFlags::HIDDEN),
            Visibility::HiddenButPrintable => {
                Some(AnnotationFlags::PRINT | AnnotationFlags::NO_VIEW)
            },
            Visibility::VisibleButDoesNotPrint => None,
        }
    }
}

/// Appearance freshness of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    /// Attached to a document; no appearance generated yet
    Bound,
    /// Changed since the last appearance generation
    Dirty,
    /// Appearance up to date
    Clean,
}
