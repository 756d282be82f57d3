//! PDF/A conformance levels as they affect form appearances.

use serde::{Deserialize, Serialize};
use std::fmt;

/// PDF/A conformance level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PdfALevel {
    /// PDF/A-1a: Full conformance with logical structure
    A1a,
    /// PDF/A-1b: Basic conformance (visual preservation)
    A1b,
    /// PDF/A-2a: PDF 1.7 based, full conformance
    A2a,
    /// PDF/A-2b: PDF 1.7 based, basic conformance
    A2b,
    /// PDF/A-2u: PDF/A-2b plus Unicode mapping
    A2u,
    /// PDF/A-3a: PDF/A-2a plus embedded files
    A3a,
    /// PDF/A-3b: PDF/A-2b plus embedded files
    A3b,
    /// PDF/A-3u: PDF/A-3b plus Unicode mapping
    A3u,
}

impl PdfALevel {
    /// Get the PDF/A part (1, 2, or 3).
    pub fn part(&self) -> PdfAPart {
        match self {
            PdfALevel::A1a | PdfALevel::A1b => PdfAPart::Part1,
            PdfALevel::A2a | PdfALevel::A2b | PdfALevel::A2u => PdfAPart::Part2,
            PdfALevel::A3a | PdfALevel::A3b | PdfALevel::A3u => PdfAPart::Part3,
        }
    }

    /// Get the conformance level letter.
    pub fn conformance(&self) -> char {
        match self {
            PdfALevel::A1a | PdfALevel::A2a | PdfALevel::A3a => 'A',
            PdfALevel::A1b | PdfALevel::A2b | PdfALevel::A3b => 'B',
            PdfALevel::A2u | PdfALevel::A3u => 'U',
        }
    }

    /// Whether every appearance state must carry its own `/Resources`,
    /// even when it draws nothing that needs one.
    ///
    /// Required from PDF/A-2 on.
    pub fn requires_state_resources(&self) -> bool {
        !matches!(self.part(), PdfAPart::Part1)
    }

    /// Parse a short name such as `"2b"` or `"PDF/A-3u"`.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_oxide_forms::compliance::PdfALevel;
    ///
    /// assert_eq!(PdfALevel::from_name("PDF/A-2b"), Some(PdfALevel::A2b));
    /// assert_eq!(PdfALevel::from_name("1A"), Some(PdfALevel::A1a));
    /// assert_eq!(PdfALevel::from_name("4f"), None);
    /// ```
    pub fn from_name(name: &str) -> Option<Self> {
        let short = name.trim().trim_start_matches("PDF/A-").to_ascii_lowercase();
        match short.as_str() {
            "1a" => Some(PdfALevel::A1a),
            "1b" => Some(PdfALevel::A1b),
            "2a" => Some(PdfALevel::A2a),
            "2b" => Some(PdfALevel::A2b),
            "2u" => Some(PdfALevel::A2u),
            "3a" => Some(PdfALevel::A3a),
            "3b" => Some(PdfALevel::A3b),
            "3u" => Some(PdfALevel::A3u),
            _ => None,
        }
    }
}

impl fmt::Display for PdfALevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let part = match self.part() {
            PdfAPart::Part1 => 1,
            PdfAPart::Part2 => 2,
            PdfAPart::Part3 => 3,
        };
        write!(f, "PDF/A-{}{}", part, self.conformance().to_ascii_lowercase())
    }
}

/// PDF/A part (version).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PdfAPart {
    /// PDF/A-1 (based on PDF 1.4)
    Part1,
    /// PDF/A-2 (based on PDF 1.7)
    Part2,
    /// PDF/A-3 (based on PDF 1.7, with embedded files)
    Part3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_part_and_conformance() {
        assert_eq!(PdfALevel::A1b.part(), PdfAPart::Part1);
        assert_eq!(PdfALevel::A3u.part(), PdfAPart::Part3);
        assert_eq!(PdfALevel::A2u.conformance(), 'U');
    }

    #[test]
    fn test_state_resources_from_part_two() {
        assert!(!PdfALevel::A1a.requires_state_resources());
        assert!(PdfALevel::A2b.requires_state_resources());
        assert!(PdfALevel::A3a.requires_state_resources());
    }

    #[test]
    fn test_display() {
        assert_eq!(PdfALevel::A2b.to_string(), "PDF/A-2b");
        assert_eq!(PdfALevel::A1a.to_string(), "PDF/A-1a");
    }
}
