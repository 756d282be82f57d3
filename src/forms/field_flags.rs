//! Field and annotation flags.
//!
//! Implements field flags per ISO 32000-1:2008 Section 12.7.3 (Field Flags)
//! and annotation flags per Section 12.5.3.
//!
//! `/Ff` is a single integer whose bits mean different things depending on
//! the field type; all of them live in one [`FieldFlags`] set, grouped by
//! the type they apply to.

use bitflags::bitflags;

bitflags! {
    /// Field flags (`/Ff`).
    ///
    /// Per PDF spec Tables 221, 226, 228 and 230.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u32 {
        // --- Common flags (bits 1-3) ---
        /// Bit 1: Field is read-only; user cannot change the value
        const READ_ONLY = 1 << 0;
        /// Bit 2: Field is required; must have a value before submit
        const REQUIRED = 1 << 1;
        /// Bit 3: Field should not be exported by submit-form action
        const NO_EXPORT = 1 << 2;

        // --- Text fields (Tx) ---
        /// Bit 13: Text may include multiple lines
        const MULTILINE = 1 << 12;
        /// Bit 14: Text should be displayed as asterisks
        const PASSWORD = 1 << 13;
        /// Bit 21: File path should be submitted as field value
        const FILE_SELECT = 1 << 20;
        /// Bit 24: Text should not scroll beyond visible area
        const DO_NOT_SCROLL = 1 << 23;
        /// Bit 25: Field is divided into `/MaxLen` equally spaced positions
        const COMB = 1 << 24;
        /// Bit 26: Field contains rich text
        const RICH_TEXT = 1 << 25;

        // --- Button fields (Btn) ---
        /// Bit 15: At least one radio button in the group must be on
        const NO_TOGGLE_TO_OFF = 1 << 14;
        /// Bit 16: Radio button (checkbox when neither this nor PUSH_BUTTON)
        const RADIO = 1 << 15;
        /// Bit 17: Push button; retains no value
        const PUSH_BUTTON = 1 << 16;
        /// Bit 26: Radio buttons with the same on-state turn on together
        const RADIOS_IN_UNISON = 1 << 25;

        // --- Choice fields (Ch) ---
        /// Bit 18: Combo box (drop-down); list box otherwise
        const COMBO = 1 << 17;
        /// Bit 19: Combo box accepts custom text
        const EDIT = 1 << 18;
        /// Bit 20: Options should be sorted alphabetically
        const SORT = 1 << 19;
        /// Bit 22: List box allows multiple selections
        const MULTI_SELECT = 1 << 21;
        /// Bit 23: Text should not be spell-checked
        const DO_NOT_SPELL_CHECK = 1 << 22;
        /// Bit 27: Value is committed as soon as the selection changes
        const COMMIT_ON_SEL_CHANGE = 1 << 26;
    }
}

impl FieldFlags {
    /// Flags from an `/Ff` integer; unknown bits are kept.
    pub fn from_ff(value: i64) -> Self {
        Self::from_bits_retain(value as u32)
    }
}

bitflags! {
    /// Annotation flags (`/F`).
    ///
    /// Per PDF spec Table 165.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct AnnotationFlags: u32 {
        /// Bit 1: Do not render unknown annotation types
        const INVISIBLE = 1 << 0;
        /// Bit 2: Neither display nor print
        const HIDDEN = 1 << 1;
        /// Bit 3: Print when the page is printed
        const PRINT = 1 << 2;
        /// Bit 4: Do not scale with page zoom
        const NO_ZOOM = 1 << 3;
        /// Bit 5: Do not rotate with the page
        const NO_ROTATE = 1 << 4;
        /// Bit 6: Do not display on screen (may still print)
        const NO_VIEW = 1 << 5;
        /// Bit 7: Do not allow interaction
        const READ_ONLY = 1 << 6;
        /// Bit 8: Do not allow deletion or property changes
        const LOCKED = 1 << 7;
    }
}

/// Text justification (`/Q`).
///
/// Per PDF spec Section 12.7.3.3 (Variable Text).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Justification {
    /// Left-aligned (Q=0)
    #[default]
    Left,
    /// Centered (Q=1)
    Center,
    /// Right-aligned (Q=2)
    Right,
}

impl Justification {
    /// Get the PDF Q value for this alignment.
    pub fn q_value(&self) -> i64 {
        match self {
            Self::Left => 0,
            Self::Center => 1,
            Self::Right => 2,
        }
    }

    /// Alignment for a `/Q` value; anything unknown is left.
    pub fn from_q(q: i64) -> Self {
        match q {
            1 => Self::Center,
            2 => Self::Right,
            _ => Self::Left,
        }
    }
}
