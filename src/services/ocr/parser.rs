use regex::{Captures, Regex};
use std::sync::LazyLock;
use tracing::debug;

/// Retail/unit vocabulary found on shelf tags.
/// Matched case-insensitively as whole words, so "g" does not hit "Great".
const NOISE_KEYWORDS: &[&str] = &[
    "retail price",
    "unit price",
    "per ounce",
    "price",
    "oz",
    "ounce",
    "g",
    "kg",
    "lb",
    "ct",
    "pk",
    "barcode",
    "upc",
];

static NOISE_KEYWORD_RE: LazyLock<Regex> = LazyLock::new(|| {
    let alternation = NOISE_KEYWORDS
        .iter()
        .map(|k| regex::escape(k).replace(' ', r"\s+"))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"(?i)\b(?:{})\b", alternation)).expect("noise keyword pattern")
});

// Currency symbol anywhere, or an amount like "4.99" not embedded in a longer
// number. Letters may touch it ("1.99ea", "Sale4.99").
static MONEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{Sc}|(?:^|\D)\d+\.\d{2}(?:\D|$)").expect("money pattern")
});

static BARCODE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d{8,13}").expect("barcode pattern"));

// Longest unit spellings first so "ounces" is not cut to "ounce" + "s"
static UNIT_QUANTITY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b\d+(?:[.,]\d+)?\s*(?:ounces|ounce|oz|kg|lbs|lb|ct|pk|g)\b")
        .expect("unit quantity pattern")
});

// Symbol-led amounts, or any maximal number run; runs are only stripped when
// they are two-decimal amounts (see `clean_line`)
static CURRENCY_AMOUNT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\p{Sc}\s*\d+(?:[.,]\d+)?|\d+(?:\.\d+)?").expect("currency amount pattern")
});

/// Split raw OCR output into trimmed, non-empty lines.
/// Handles both "\n" and "\r\n" line endings.
pub fn scan_lines(raw: &str) -> impl Iterator<Item = &str> {
    raw.lines().map(str::trim).filter(|line| !line.is_empty())
}

/// Line looks like price tag, unit or barcode noise
pub fn is_noise(line: &str) -> bool {
    NOISE_KEYWORD_RE.is_match(line) || MONEY_RE.is_match(line) || BARCODE_RE.is_match(line)
}

/// Line has strictly more letters than digits
pub fn is_text_heavy(line: &str) -> bool {
    let letters = letter_count(line);
    let digits = line.chars().filter(|c| c.is_numeric()).count();
    letters > digits
}

pub fn letter_count(line: &str) -> usize {
    line.chars().filter(|c| c.is_alphabetic()).count()
}

/// Number run like "4.99" with exactly two fractional digits
fn is_decimal_amount(run: &str) -> bool {
    match run.split_once('.') {
        Some((whole, frac)) => {
            !whole.is_empty()
                && frac.len() == 2
                && whole.chars().chain(frac.chars()).all(|c| c.is_ascii_digit())
        }
        None => false,
    }
}

/// Strip quantities, prices and stray symbols from a candidate line.
/// Returns an empty string when nothing is left.
pub fn clean_line(line: &str) -> String {
    let without_units = UNIT_QUANTITY_RE.replace_all(line, " ");
    // Lines with amounts are already dropped by `is_noise` inside
    // `extract_name`; this pass only matters for direct callers.
    let without_money = CURRENCY_AMOUNT_RE.replace_all(&without_units, |caps: &Captures| {
        let found = &caps[0];
        let symbol_led = !found.starts_with(|c: char| c.is_ascii_digit());
        if symbol_led || is_decimal_amount(found) {
            " ".to_string()
        } else {
            found.to_string()
        }
    });

    let symbols_blanked: String = without_money
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c.is_whitespace() || matches!(c, '&' | '-' | '\'' | '/') {
                c
            } else {
                ' '
            }
        })
        .collect();

    symbols_blanked.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Upper-case the first letter of every word, leave the rest untouched
pub fn title_case(line: &str) -> String {
    line.split(' ')
        .map(|word| {
            let mut out = String::with_capacity(word.len());
            let mut capitalized = false;
            for c in word.chars() {
                if !capitalized && c.is_alphabetic() {
                    out.extend(c.to_uppercase());
                    capitalized = true;
                } else {
                    out.push(c);
                }
            }
            out
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Extract the most plausible product name from raw OCR text.
///
/// Noise lines (prices, units, barcodes, numeric-heavy lines) are dropped,
/// the rest are cleaned and the line with the most letters wins. On a tie
/// the earliest line is kept. Returns an empty string when nothing qualifies.
///
/// Example: "Retail Price $4.99\nGreat Value Peanut Butter\n12345678"
/// yields "Great Value Peanut Butter".
pub fn extract_name(raw: &str) -> String {
    let candidates = scan_lines(raw)
        .filter(|line| {
            let keep = !is_noise(line) && is_text_heavy(line);
            if !keep {
                debug!(line, "Rejected OCR line");
            }
            keep
        })
        .map(clean_line)
        .filter(|line| !line.is_empty());

    let mut best: Option<(usize, String)> = None;
    for line in candidates {
        let letters = letter_count(&line);
        if best.as_ref().map_or(true, |(top, _)| letters > *top) {
            best = Some((letters, line));
        }
    }

    match best {
        Some((_, line)) => {
            let name = title_case(&line);
            debug!(%name, "Extracted product name");
            name
        }
        None => String::new(),
    }
}

/// Product name for a scan: the extracted name, or the trimmed raw text
/// when extraction finds nothing
pub fn product_name(raw: &str) -> String {
    let name = extract_name(raw);
    if name.is_empty() {
        raw.trim().to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============================================================
    // Line splitting
    // ============================================================

    #[test]
    fn test_scan_lines_trims_and_skips_blank() {
        let lines: Vec<&str> = scan_lines("  Milk \r\n\r\n\n  Eggs\n   ").collect();
        assert_eq!(lines, vec!["Milk", "Eggs"]);
    }

    #[test]
    fn test_scan_lines_empty_input() {
        assert_eq!(scan_lines("").count(), 0);
    }

    // ============================================================
    // Noise filters
    // ============================================================

    #[test]
    fn test_is_noise_keywords_case_insensitive() {
        assert!(is_noise("RETAIL PRICE"), "Retail price label is noise");
        assert!(is_noise("Unit  Price per lb"), "Unit price label is noise");
        assert!(is_noise("16 OZ"), "Unit line is noise");
        assert!(is_noise("UPC"), "Barcode caption is noise");
        assert!(is_noise("500 g"), "Gram unit is noise");
    }

    #[test]
    fn test_is_noise_keywords_need_whole_words() {
        assert!(!is_noise("Great Value"), "'g' must not match inside words");
        assert!(!is_noise("Kellogg's Frosted Flakes"));
        assert!(!is_noise("Pringles Original"));
    }

    #[test]
    fn test_is_noise_money() {
        assert!(is_noise("$4.99"));
        assert!(is_noise("Sale 2 for 5.00"));
        assert!(is_noise("€ Special"));
        assert!(!is_noise("Version 2.5 Cookies"), "One fractional digit is not money");
        assert!(!is_noise("Pack 12.345 Mix"), "Three fractional digits is not money");
    }

    #[test]
    fn test_is_noise_money_touching_letters() {
        assert!(is_noise("Apples 4.99ea"), "Letter suffix after price");
        assert!(is_noise("Sale4.99 Cookies"), "Letter prefix before price");
        assert!(is_noise("Ground Beef 4.99lb"));
        assert!(is_noise("1.99"));
    }

    #[test]
    fn test_is_noise_barcode() {
        assert!(is_noise("12345678"));
        assert!(is_noise("Item 0123456789012"));
        assert!(!is_noise("Item 1234567"), "Seven digits is not a barcode");
    }

    #[test]
    fn test_is_text_heavy() {
        assert!(is_text_heavy("Peanut Butter"));
        assert!(!is_text_heavy("12345"), "Pure digits are rejected");
        assert!(!is_text_heavy("A1 B2"), "Equal counts are rejected");
        assert!(!is_text_heavy("---"), "No letters at all is rejected");
    }

    // ============================================================
    // Cleaning and title case
    // ============================================================

    #[test]
    fn test_clean_line_removes_unit_quantities() {
        assert_eq!(clean_line("Dove Beauty Bar 4oz"), "Dove Beauty Bar");
        assert_eq!(clean_line("Rice 2.5kg Bag"), "Rice Bag");
        assert_eq!(clean_line("Almonds 16ounces"), "Almonds");
    }

    #[test]
    fn test_clean_line_removes_currency_amounts() {
        assert_eq!(clean_line("Bread $2 Loaf"), "Bread Loaf");
        assert_eq!(clean_line("Bread 3.49"), "Bread");
        assert_eq!(clean_line("Apples 1.99ea"), "Apples ea");
        assert_eq!(clean_line("Sale4.99 Cookies"), "Sale Cookies");
        assert_eq!(clean_line("Pack 12.345 Mix 7"), "Pack 12.345 Mix 7");
    }

    #[test]
    fn test_clean_line_keeps_allowed_punctuation() {
        assert_eq!(
            clean_line("Ben & Jerry's *Chunky  Monkey*"),
            "Ben & Jerry's Chunky Monkey"
        );
        assert_eq!(clean_line("Salt/Pepper - Grinder!"), "Salt/Pepper - Grinder");
    }

    #[test]
    fn test_clean_line_symbols_only() {
        assert_eq!(clean_line("***"), "");
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("great value peanut butter"), "Great Value Peanut Butter");
        assert_eq!(title_case("café au lait"), "Café Au Lait");
        assert_eq!(title_case("'original' chips"), "'Original' Chips");
        assert_eq!(title_case("GREAT value"), "GREAT Value");
    }

    // ============================================================
    // Name extraction
    // ============================================================

    #[test]
    fn test_extract_name_price_tag() {
        let raw = "Retail Price $4.99\nGreat Value Peanut Butter\n12345678";
        assert_eq!(extract_name(raw), "Great Value Peanut Butter");
    }

    #[test]
    fn test_extract_name_empty_input() {
        assert_eq!(extract_name(""), "");
        assert_eq!(extract_name("  \n \r\n"), "");
    }

    #[test]
    fn test_extract_name_no_letters() {
        assert_eq!(extract_name("12345\n$3.50\n0.99\n-- // --"), "");
    }

    #[test]
    fn test_extract_name_most_letters_wins() {
        let raw = "Soap\nDove Beauty Bar\nBar";
        assert_eq!(extract_name(raw), "Dove Beauty Bar");
    }

    #[test]
    fn test_extract_name_tie_keeps_first() {
        let raw = "apple juice\norange soda";
        assert_eq!(extract_name(raw), "Apple Juice");
    }

    #[test]
    fn test_extract_name_drops_price_touching_unit() {
        let raw = "Bananas\nOrganic Fuji Apples 1.99ea";
        assert_eq!(extract_name(raw), "Bananas");
    }

    #[test]
    fn test_extract_name_never_joins_lines() {
        assert_eq!(extract_name("Peanut\nButter"), "Peanut");
    }

    #[test]
    fn test_extract_name_crlf() {
        let raw = "Great Value\r\npeanut butter creamy\r\n";
        assert_eq!(extract_name(raw), "Peanut Butter Creamy");
    }

    #[test]
    fn test_extract_name_letter_count_ignores_symbols() {
        // "A-B-C-D-E" has 5 letters, "Fig Jam" has 6
        let raw = "A-B-C-D-E\nFig Jam";
        assert_eq!(extract_name(raw), "Fig Jam");
    }

    #[test]
    fn test_extract_name_is_cleaned_input_line() {
        let inputs = [
            "Unit Price 0.25 per ounce\nOreo cookies 14.3oz family size\n044000032029",
            "CT 12\nTide Pods #Spring Meadow\nUPC 037000930",
            "tissue\nKleenex (ultra soft)",
        ];

        for raw in inputs {
            let name = extract_name(raw);
            assert!(!name.is_empty(), "Expected a name for {:?}", raw);
            let matches_a_line = scan_lines(raw)
                .map(|line| title_case(&clean_line(line)))
                .any(|candidate| candidate == name);
            assert!(matches_a_line, "{:?} is not derived from {:?}", name, raw);
        }
    }

    #[test]
    fn test_product_name_falls_back_to_raw() {
        assert_eq!(product_name("  12345  \n"), "12345");
        assert_eq!(product_name("$4.99"), "$4.99");
        assert_eq!(product_name("lucky charms"), "Lucky Charms");
        assert_eq!(product_name(""), "");
    }
}
