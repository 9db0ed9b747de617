//! Character classification
//!
//! Decides whether a single code point is allowed in source code and review
//! metadata. The decision is an ordered rule table; the first rule that
//! matches wins:
//!
//! 1. space, tab, line feed and carriage return are allowed
//! 2. any other whitespace (NBSP, thin spaces, U+2028...) is forbidden
//! 3. variation selectors (U+FE00..U+FE0F, U+E0100..U+E01EF) are forbidden
//! 4. general category Cc / Cf is forbidden
//! 5. general category Cs / Co is forbidden
//! 6. noncharacters (U+FDD0..U+FDEF, U+xxFFFE, U+xxFFFF) are forbidden
//! 7. U+034F COMBINING GRAPHEME JOINER is forbidden
//! 8. everything else is allowed
//!
//! Only the grapheme joiner is singled out among combining marks; other
//! combining marks stay allowed.

use unicode_general_category::{get_general_category, GeneralCategory};

/// Whitespace that is expected in source files.
const ALLOWED_WHITESPACE: [char; 4] = [' ', '\t', '\n', '\r'];

/// Variation Selectors (VS1..VS16) and Variation Selectors Supplement (VS17..VS256).
const VARIATION_SELECTOR_RANGES: [(u32, u32); 2] = [(0xFE00, 0xFE0F), (0xE0100, 0xE01EF)];

const COMBINING_GRAPHEME_JOINER: u32 = 0x034F;

/// Name used when the character database has no name for a code point.
pub const UNKNOWN_NAME: &str = "UNKNOWN";

/// Why a character was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Reason {
    /// Whitespace other than space, tab, LF and CR
    WeirdWhitespace,
    /// Emoji / glyph variant selector
    VariationSelector,
    /// Control (Cc) or format (Cf) character
    ControlOrFormat,
    /// Surrogate (Cs) or private use (Co)
    SurrogateOrPrivateUse,
    /// Permanently reserved noncharacter
    Noncharacter,
    /// Invisible mark outside the format category
    InvisibleMark,
}

/// Outcome of the rule table for one code point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Allowed,
    Forbidden(Reason),
}

impl Verdict {
    pub fn is_forbidden(&self) -> bool {
        matches!(self, Self::Forbidden(_))
    }
}

/// Full classification of a code point
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub codepoint: u32,
    pub verdict: Verdict,
    /// General category abbreviation, e.g. "Cf"
    pub category: &'static str,
    /// Character name, or [`UNKNOWN_NAME`]
    pub name: String,
}

impl Classification {
    pub fn is_forbidden(&self) -> bool {
        self.verdict.is_forbidden()
    }
}

/// Classify an arbitrary code point.
///
/// Total over `u32`: surrogate code points (which are not valid `char`s)
/// classify as forbidden `Cs`, and values past U+10FFFF as forbidden `Cn`.
pub fn classify(codepoint: u32) -> Classification {
    match char::from_u32(codepoint) {
        Some(ch) => classify_char(ch),
        None => {
            let category = if (0xD800..=0xDFFF).contains(&codepoint) {
                "Cs"
            } else {
                "Cn"
            };
            let reason = if category == "Cs" {
                Reason::SurrogateOrPrivateUse
            } else {
                Reason::Noncharacter
            };
            Classification {
                codepoint,
                verdict: Verdict::Forbidden(reason),
                category,
                name: UNKNOWN_NAME.to_string(),
            }
        }
    }
}

/// Classify a scalar value, including category and display name.
pub fn classify_char(ch: char) -> Classification {
    Classification {
        codepoint: ch as u32,
        verdict: verdict(ch),
        category: category_abbr(ch),
        name: display_name(ch),
    }
}

/// Apply the rule table without looking up the character name.
pub fn verdict(ch: char) -> Verdict {
    if ALLOWED_WHITESPACE.contains(&ch) {
        return Verdict::Allowed;
    }

    if ch.is_whitespace() {
        return Verdict::Forbidden(Reason::WeirdWhitespace);
    }

    let codepoint = ch as u32;
    if is_variation_selector(codepoint) {
        return Verdict::Forbidden(Reason::VariationSelector);
    }

    match get_general_category(ch) {
        GeneralCategory::Control | GeneralCategory::Format => {
            return Verdict::Forbidden(Reason::ControlOrFormat);
        }
        GeneralCategory::Surrogate | GeneralCategory::PrivateUse => {
            return Verdict::Forbidden(Reason::SurrogateOrPrivateUse);
        }
        _ => {}
    }

    if is_noncharacter(codepoint) {
        return Verdict::Forbidden(Reason::Noncharacter);
    }

    if codepoint == COMBINING_GRAPHEME_JOINER {
        return Verdict::Forbidden(Reason::InvisibleMark);
    }

    Verdict::Allowed
}

/// Shortcut for `verdict(ch).is_forbidden()`
pub fn is_forbidden(ch: char) -> bool {
    verdict(ch).is_forbidden()
}

fn is_variation_selector(codepoint: u32) -> bool {
    VARIATION_SELECTOR_RANGES
        .iter()
        .any(|&(start, end)| (start..=end).contains(&codepoint))
}

fn is_noncharacter(codepoint: u32) -> bool {
    (0xFDD0..=0xFDEF).contains(&codepoint) || matches!(codepoint & 0xFFFF, 0xFFFE | 0xFFFF)
}

/// Character name from the Unicode database, or "UNKNOWN".
pub fn display_name(ch: char) -> String {
    unicode_names2::name(ch)
        .map(|n| n.to_string())
        .unwrap_or_else(|| UNKNOWN_NAME.to_string())
}

/// Two-letter general category abbreviation.
pub fn category_abbr(ch: char) -> &'static str {
    match get_general_category(ch) {
        GeneralCategory::UppercaseLetter => "Lu",
        GeneralCategory::LowercaseLetter => "Ll",
        GeneralCategory::TitlecaseLetter => "Lt",
        GeneralCategory::ModifierLetter => "Lm",
        GeneralCategory::OtherLetter => "Lo",
        GeneralCategory::NonspacingMark => "Mn",
        GeneralCategory::SpacingMark => "Mc",
        GeneralCategory::EnclosingMark => "Me",
        GeneralCategory::DecimalNumber => "Nd",
        GeneralCategory::LetterNumber => "Nl",
        GeneralCategory::OtherNumber => "No",
        GeneralCategory::ConnectorPunctuation => "Pc",
        GeneralCategory::DashPunctuation => "Pd",
        GeneralCategory::OpenPunctuation => "Ps",
        GeneralCategory::ClosePunctuation => "Pe",
        GeneralCategory::InitialPunctuation => "Pi",
        GeneralCategory::FinalPunctuation => "Pf",
        GeneralCategory::OtherPunctuation => "Po",
        GeneralCategory::MathSymbol => "Sm",
        GeneralCategory::CurrencySymbol => "Sc",
        GeneralCategory::ModifierSymbol => "Sk",
        GeneralCategory::OtherSymbol => "So",
        GeneralCategory::SpaceSeparator => "Zs",
        GeneralCategory::LineSeparator => "Zl",
        GeneralCategory::ParagraphSeparator => "Zp",
        GeneralCategory::Control => "Cc",
        GeneralCategory::Format => "Cf",
        GeneralCategory::Surrogate => "Cs",
        GeneralCategory::PrivateUse => "Co",
        GeneralCategory::Unassigned => "Cn",
        #[allow(unreachable_patterns)]
        _ => "Cn",
    }
}
