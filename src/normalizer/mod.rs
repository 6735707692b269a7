mod types;

pub use types::*;

use once_cell::sync::Lazy;
use regex::Regex;

/// Words kept verbatim inside a title instead of being capitalized,
/// unless they appear in first position.
const CONNECTOR_WORDS: &[&str] = &[
    "of", "and", "the", "in", "on", "at", "by", "for", "with", "a", "an",
];

// Trailing dotted suffix, e.g. ".pdf"
static EXTENSION_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.\w+$").unwrap());

// Stem grammar: title, optional standalone lot before the amount, amount
// (optional sign, optional currency marker, digits with grouping separators
// and fractional part), optional lot after the amount, optional counter.
// Examples: "bank of cleveland $526", "smiths hardware -450.5 (2)",
// "joe's garage L3 1200"
static STEM_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<title>.*?)(?:(?:^|\s)(?P<lot_pre>L\d+)\s+)?(?P<amount>-?\$?\d[\d,.]*)(?:\s*(?P<lot>L\d+))?(?:\s*\((?P<counter>\d+)\))?$",
    )
    .unwrap()
});

/// Normalize a receipt filename into canonical
/// `Title Amount [Lot] [(Counter)]Extension` form.
///
/// Returns the input unchanged when no amount token is recognized or the
/// amount's numeric part does not parse; callers compare output to input to
/// decide whether to act.
pub fn normalize_filename(filename: &str) -> String {
    match tokenize(filename) {
        Ok(tokens) => format_tokens(&tokens).unwrap_or_else(|| filename.to_string()),
        Err(_) => filename.to_string(),
    }
}

/// Split a filename into its token fields.
pub fn tokenize(filename: &str) -> Result<FilenameTokens, TokenizeError> {
    let (stem, extension) = match EXTENSION_REGEX.find(filename) {
        Some(m) => (&filename[..m.start()], &filename[m.start()..]),
        None => (filename, ""),
    };

    try_tokenize(stem, extension).ok_or_else(|| TokenizeError::NoAmount(filename.to_string()))
}

fn try_tokenize(stem: &str, extension: &str) -> Option<FilenameTokens> {
    let captures = STEM_REGEX.captures(stem)?;

    let mut title = captures.name("title")?.as_str().trim().to_string();
    let amount = captures.name("amount")?.as_str().to_string();
    let lot_pre = captures.name("lot_pre").map(|m| m.as_str().to_string());
    let lot_post = captures.name("lot").map(|m| m.as_str().to_string());

    // A lot on both sides of the amount: the trailing one is the lot, the
    // leading code stays part of the title.
    let lot = match (lot_pre, lot_post) {
        (Some(pre), Some(post)) => {
            if title.is_empty() {
                title = pre;
            } else {
                title = format!("{} {}", title, pre);
            }
            Some(post)
        }
        (pre, post) => post.or(pre),
    };

    let counter = captures.name("counter").map(|m| m.as_str().to_string());

    Some(FilenameTokens {
        title,
        amount,
        lot,
        counter,
        extension: extension.to_string(),
    })
}

/// Reassemble tokens into the canonical filename.
///
/// Returns `None` when the amount token cannot be read as a number, which the
/// public entry point treats as a no-op.
fn format_tokens(tokens: &FilenameTokens) -> Option<String> {
    let title = format_title(&tokens.title);
    let amount = format_amount(&tokens.amount)?;

    let mut parts: Vec<String> = Vec::new();
    if !title.is_empty() {
        parts.push(title);
    }
    parts.push(amount);
    if let Some(lot) = &tokens.lot {
        parts.push(lot.clone());
    }
    if let Some(counter) = &tokens.counter {
        parts.push(format!("({})", counter));
    }

    Some(format!("{}{}", parts.join(" "), tokens.extension))
}

/// Strip apostrophes and title-case each word, preserving the rest of each
/// word's casing. Connector words keep their original form except in first
/// position.
fn format_title(title: &str) -> String {
    let stripped = title.replace('\'', "");

    stripped
        .split_whitespace()
        .enumerate()
        .map(|(i, word)| {
            if i != 0 && CONNECTOR_WORDS.contains(&word.to_lowercase().as_str()) {
                word.to_string()
            } else {
                capitalize_first(word)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize_first(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Canonicalize a monetary token: currency marker, thousands grouping, two
/// fractional digits. Negative amounts render as "-$" with no space.
fn format_amount(token: &str) -> Option<String> {
    let numeric: String = token.chars().filter(|c| *c != '$' && *c != ',').collect();
    let value: f64 = numeric.parse().ok()?;

    let formatted = format_currency(value.abs());
    if value.is_sign_negative() {
        Some(format!("-${}", formatted))
    } else {
        Some(format!("${}", formatted))
    }
}

fn format_currency(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{}.{}", grouped, frac_part)
}

#[cfg(test)]
mod tests {
    use super::*;

    // ============ Tokenizer Tests ============

    #[test]
    fn test_tokenize_simple() {
        let tokens = tokenize("bank of cleveland $526.pdf").unwrap();

        assert_eq!(tokens.title, "bank of cleveland");
        assert_eq!(tokens.amount, "$526");
        assert!(tokens.lot.is_none());
        assert!(tokens.counter.is_none());
        assert_eq!(tokens.extension, ".pdf");
    }

    #[test]
    fn test_tokenize_negative_with_counter() {
        let tokens = tokenize("smiths hardware -450.5 (2).pdf").unwrap();

        assert_eq!(tokens.title, "smiths hardware");
        assert_eq!(tokens.amount, "-450.5");
        assert_eq!(tokens.counter, Some("2".to_string()));
    }

    #[test]
    fn test_tokenize_lot_after_amount() {
        let tokens = tokenize("acme supply 1200 L7.pdf").unwrap();

        assert_eq!(tokens.title, "acme supply");
        assert_eq!(tokens.amount, "1200");
        assert_eq!(tokens.lot, Some("L7".to_string()));
    }

    #[test]
    fn test_tokenize_lot_before_amount() {
        let tokens = tokenize("joe's garage L3 1200.pdf").unwrap();

        assert_eq!(tokens.title, "joe's garage");
        assert_eq!(tokens.amount, "1200");
        assert_eq!(tokens.lot, Some("L3".to_string()));
    }

    #[test]
    fn test_tokenize_lot_on_both_sides() {
        // Trailing lot wins; leading code stays in the title
        let tokens = tokenize("bank L3 100 L4.pdf").unwrap();

        assert_eq!(tokens.title, "bank L3");
        assert_eq!(tokens.amount, "100");
        assert_eq!(tokens.lot, Some("L4".to_string()));
    }

    #[test]
    fn test_tokenize_grouped_amount() {
        let tokens = tokenize("cleveland plywood $1,023.76.pdf").unwrap();

        assert_eq!(tokens.amount, "$1,023.76");
    }

    #[test]
    fn test_tokenize_no_amount() {
        let result = tokenize("notes.txt");
        assert!(matches!(result, Err(TokenizeError::NoAmount(_))));
    }

    #[test]
    fn test_tokenize_no_extension() {
        let tokens = tokenize("corner store 12").unwrap();

        assert_eq!(tokens.title, "corner store");
        assert_eq!(tokens.amount, "12");
        assert_eq!(tokens.extension, "");
    }

    #[test]
    fn test_tokenize_empty_title() {
        let tokens = tokenize("$526.00.pdf").unwrap();

        assert_eq!(tokens.title, "");
        assert_eq!(tokens.amount, "$526.00");
    }

    #[test]
    fn test_tokenize_digits_inside_title() {
        // Digits followed by more title text belong to the title, not the amount
        let tokens = tokenize("highway 61 diner 45.00.pdf").unwrap();

        assert_eq!(tokens.title, "highway 61 diner");
        assert_eq!(tokens.amount, "45.00");
    }

    #[test]
    fn test_tokenize_lot_requires_word_boundary() {
        // "AL5" is a title word, not a lot identifier
        let tokens = tokenize("AL5 200.pdf").unwrap();

        assert_eq!(tokens.title, "AL5");
        assert_eq!(tokens.amount, "200");
        assert!(tokens.lot.is_none());
    }

    // ============ Formatting Tests ============

    #[test]
    fn test_normalize_adds_marker_and_decimals() {
        assert_eq!(
            normalize_filename("bank of cleveland $526.pdf"),
            "Bank of Cleveland $526.00.pdf"
        );
    }

    #[test]
    fn test_normalize_negative_amount() {
        assert_eq!(
            normalize_filename("smiths hardware -450.5 (2).pdf"),
            "Smiths Hardware -$450.50 (2).pdf"
        );
    }

    #[test]
    fn test_normalize_connector_words_stay_lowercase() {
        assert_eq!(
            normalize_filename("bank of america 100.pdf"),
            "Bank of America $100.00.pdf"
        );
    }

    #[test]
    fn test_normalize_connector_first_word_capitalized() {
        assert_eq!(
            normalize_filename("the home depot 89.99.pdf"),
            "The Home Depot $89.99.pdf"
        );
    }

    #[test]
    fn test_normalize_strips_apostrophes_and_keeps_lot() {
        assert_eq!(
            normalize_filename("joe's garage L3 1200.pdf"),
            "Joes Garage $1,200.00 L3.pdf"
        );
    }

    #[test]
    fn test_normalize_thousands_grouping() {
        assert_eq!(
            normalize_filename("lumber yard 1023456.7.pdf"),
            "Lumber Yard $1,023,456.70.pdf"
        );
    }

    #[test]
    fn test_normalize_removes_grouping_before_parse() {
        assert_eq!(
            normalize_filename("cleveland plywood 1,023.76.pdf"),
            "Cleveland Plywood $1,023.76.pdf"
        );
    }

    #[test]
    fn test_normalize_preserves_inner_casing() {
        assert_eq!(
            normalize_filename("GasNGo 15.25.pdf"),
            "GasNGo $15.25.pdf"
        );
    }

    #[test]
    fn test_normalize_no_title() {
        // No leading separator when the title is absent
        assert_eq!(normalize_filename("$526.pdf"), "$526.00.pdf");
    }

    #[test]
    fn test_normalize_negative_marker_order() {
        // "-$" with no space, regardless of how the input spelled it
        assert_eq!(
            normalize_filename("refund depot -$12.pdf"),
            "Refund Depot -$12.00.pdf"
        );
    }

    // ============ No-op Cases ============

    #[test]
    fn test_no_digits_returns_input_unchanged() {
        assert_eq!(normalize_filename("notes.txt"), "notes.txt");
        assert_eq!(normalize_filename("receipt scan.pdf"), "receipt scan.pdf");
        assert_eq!(normalize_filename(".gitignore"), ".gitignore");
        assert_eq!(normalize_filename(""), "");
    }

    #[test]
    fn test_unparseable_amount_returns_input_unchanged() {
        // Amount token matches but is not a readable number
        assert_eq!(
            normalize_filename("shop 1.2.3.4 receipt 5..6.pdf"),
            "shop 1.2.3.4 receipt 5..6.pdf"
        );
    }

    // ============ Invariants ============

    #[test]
    fn test_idempotence() {
        let inputs = [
            "bank of cleveland $526.pdf",
            "smiths hardware -450.5 (2).pdf",
            "joe's garage L3 1200.pdf",
            "bank of america 100.pdf",
            "cleveland plywood 1,023.76.pdf",
            "bank L3 100 L4.pdf",
            "$526.pdf",
            "highway 61 diner 45.00.pdf",
        ];

        for input in inputs {
            let once = normalize_filename(input);
            let twice = normalize_filename(&once);
            assert_eq!(once, twice, "not idempotent for {:?}", input);
        }
    }

    #[test]
    fn test_extension_preserved() {
        assert!(normalize_filename("store 12.PDF").ends_with(".PDF"));
        assert!(normalize_filename("store 12.jpeg").ends_with(".jpeg"));
        assert!(normalize_filename("store 12.tar").ends_with(".tar"));
    }

    #[test]
    fn test_exactly_one_amount_token() {
        let name = normalize_filename("deli 5 10.pdf");
        // Only the final digit run is the amount; earlier digits stay in the title
        assert_eq!(name, "Deli 5 $10.00.pdf");
    }
}
