//! Clean-up for free text that shelters type into listings.

use regex::Regex;
use std::sync::LazyLock;

/// Longest description kept, in characters.
pub const MAX_DESCRIPTION_CHARS: usize = 500;

const ELLIPSIS: &str = "...";

static NAME_DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*[*\-|]+\s*").expect("valid name delimiter pattern"));

static WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));

static HOLIDAY_BANNER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\*\*Home for the Holidays.*?\*\*").expect("valid banner pattern")
});

/// Drops promotional text that shelters append to a pet's name.
///
/// Everything from the first run of `*`, `-` or `|` onwards is removed.
///
/// # Examples
///
/// ```
/// use cuties::clean::clean_name;
///
/// assert_eq!(clean_name("Doli ***Home for the Holidays 1/2 price!"), "Doli");
/// assert_eq!(clean_name("Kathy"), "Kathy");
/// ```
pub fn clean_name(name: &str) -> String {
    NAME_DELIMITER
        .split(name)
        .next()
        .unwrap_or_default()
        .trim()
        .to_string()
}

/// Decodes HTML entities, collapses whitespace, removes holiday banners and
/// caps the result at [`MAX_DESCRIPTION_CHARS`] characters.
pub fn clean_description(description: &str) -> String {
    let text = html_escape::decode_html_entities(description);
    let text = WHITESPACE.replace_all(&text, " ");
    let text = HOLIDAY_BANNER.replace_all(&text, "");
    let text = text.trim();

    if text.chars().count() > MAX_DESCRIPTION_CHARS {
        let kept: String = text
            .chars()
            .take(MAX_DESCRIPTION_CHARS - ELLIPSIS.len())
            .collect();
        format!("{}{}", kept, ELLIPSIS)
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_name_drops_promotions() {
        assert_eq!(clean_name("Doli ***Home for the Holidays 1/2 price!"), "Doli");
        assert_eq!(clean_name("Biscuit | Bonded pair"), "Biscuit");
        assert_eq!(clean_name("  Kathy "), "Kathy");
        assert_eq!(clean_name("Peanut Butter"), "Peanut Butter");
    }

    #[test]
    fn test_clean_description_decodes_and_collapses() {
        assert_eq!(
            clean_description("Loves&nbsp;naps &amp;\n\n  treats.  "),
            "Loves naps & treats."
        );
    }

    #[test]
    fn test_clean_description_removes_holiday_banner() {
        assert_eq!(
            clean_description("**HOME FOR THE HOLIDAYS: half price!** Sweet boy."),
            "Sweet boy."
        );
    }

    #[test]
    fn test_clean_description_truncates() {
        let long = "a".repeat(600);
        let cleaned = clean_description(&long);
        assert_eq!(cleaned.chars().count(), MAX_DESCRIPTION_CHARS);
        assert!(cleaned.ends_with("..."));

        let exact = "b".repeat(MAX_DESCRIPTION_CHARS);
        assert_eq!(clean_description(&exact), exact);
    }

    #[test]
    fn test_clean_empty() {
        assert_eq!(clean_name(""), "");
        assert_eq!(clean_description(""), "");
    }
}
