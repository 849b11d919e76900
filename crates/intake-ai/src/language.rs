//! Supported languages, text direction, and locale-aware text helpers.

use serde::{Deserialize, Serialize};

/// Languages the intake flow can present and generate text in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportedLang {
    En,
    Ar,
}

/// Layout direction derived from the active language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl SupportedLang {
    pub const fn code(self) -> &'static str {
        match self {
            SupportedLang::En => "en",
            SupportedLang::Ar => "ar",
        }
    }

    pub const fn direction(self) -> TextDirection {
        match self {
            SupportedLang::En => TextDirection::Ltr,
            SupportedLang::Ar => TextDirection::Rtl,
        }
    }

    pub const fn is_rtl(self) -> bool {
        matches!(self.direction(), TextDirection::Rtl)
    }

    /// Parse a language tag, falling back to English for anything unknown.
    pub fn parse_or_default(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "ar" => SupportedLang::Ar,
            _ => SupportedLang::En,
        }
    }
}

impl Default for SupportedLang {
    fn default() -> Self {
        SupportedLang::En
    }
}

/// Whether the text contains Arabic-script code points (base, supplement, or
/// extended-A blocks).
pub fn is_arabic_text(text: &str) -> bool {
    text.chars().any(|c| {
        matches!(c,
            '\u{0600}'..='\u{06FF}' | '\u{0750}'..='\u{077F}' | '\u{08A0}'..='\u{08FF}')
    })
}

/// Whether the text's script mismatches the target language badly enough to
/// warrant translation. Texts shorter than two characters are left alone.
pub fn needs_translation(text: &str, target: SupportedLang) -> bool {
    if text.trim().len() < 2 {
        return false;
    }
    let has_arabic = is_arabic_text(text);
    match target {
        SupportedLang::Ar => !has_arabic,
        SupportedLang::En => has_arabic,
    }
}

const ARABIC_ZERO: u32 = 0x0660;
// U+066C ARABIC THOUSANDS SEPARATOR
const ARABIC_GROUP_SEPARATOR: char = '\u{066C}';

/// Format a whole USD amount the way the browser's locale formatter renders
/// it with fraction digits suppressed: `$1,234` for English, Arabic-Indic
/// digits with the Arabic grouping mark and a trailing currency code for
/// Arabic. Negative and non-finite inputs clamp to zero.
pub fn format_currency(amount: f64, lang: SupportedLang) -> String {
    let whole = if amount.is_finite() && amount > 0.0 {
        amount.round() as u64
    } else {
        0
    };

    match lang {
        SupportedLang::En => format!("${}", group_digits(whole, ',')),
        SupportedLang::Ar => {
            let grouped = group_digits(whole, ARABIC_GROUP_SEPARATOR);
            let eastern: String = grouped
                .chars()
                .map(|c| match c.to_digit(10) {
                    Some(d) => char::from_u32(ARABIC_ZERO + d).unwrap_or(c),
                    None => c,
                })
                .collect();
            format!("{eastern} US$")
        }
    }
}

fn group_digits(value: u64, separator: char) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_arabic_script() {
        assert!(is_arabic_text("أحتاج إلى مساعدة"));
        assert!(!is_arabic_text("I need assistance"));
        assert!(is_arabic_text("mixed نص text"));
    }

    #[test]
    fn needs_translation_respects_target() {
        assert!(needs_translation("I need assistance", SupportedLang::Ar));
        assert!(!needs_translation("أحتاج إلى مساعدة", SupportedLang::Ar));
        assert!(needs_translation("أحتاج إلى مساعدة", SupportedLang::En));
        assert!(!needs_translation(" a ", SupportedLang::Ar));
        assert!(!needs_translation("", SupportedLang::En));
    }

    #[test]
    fn formats_english_currency_with_grouping() {
        assert_eq!(format_currency(500.0, SupportedLang::En), "$500");
        assert_eq!(format_currency(1234.0, SupportedLang::En), "$1,234");
        assert_eq!(format_currency(1234567.0, SupportedLang::En), "$1,234,567");
        assert_eq!(format_currency(-3.0, SupportedLang::En), "$0");
    }

    #[test]
    fn formats_arabic_currency_with_eastern_digits() {
        let formatted = format_currency(500.0, SupportedLang::Ar);
        assert_eq!(formatted, "\u{0665}\u{0660}\u{0660} US$");
        assert!(format_currency(1234.0, SupportedLang::Ar).contains('\u{066C}'));
    }
}
