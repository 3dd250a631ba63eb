//! Currency-aware price detection.
//!
//! Patterns are tried in a fixed order and the first one that matches wins:
//! symbol-prefixed forms, symbol-suffixed forms, ISO-code forms, then a bare
//! decimal amount.

use std::ops::Range;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::core::model::{CurrencyPosition, PriceInfo, TextFragment};

const AMOUNT: &str = r"\d+(?:[,.]\d{3})*(?:[.,]\d{1,2})?";
const WHOLE_AMOUNT: &str = r"\d+(?:,\d{3})*";

struct PricePattern {
    regex: Regex,
    position: CurrencyPosition,
}

impl PricePattern {
    fn new(pattern: &str, position: CurrencyPosition) -> Self {
        Self {
            regex: Regex::new(pattern).expect("price pattern is a valid literal"),
            position,
        }
    }
}

static PRICE_PATTERNS: Lazy<Vec<PricePattern>> = Lazy::new(|| {
    use CurrencyPosition::{None as Bare, Prefix, Suffix};
    vec![
        // USD / EUR / GBP, symbol first
        PricePattern::new(&format!(r"(?P<sym>\$)\s?(?P<amount>{AMOUNT})"), Prefix),
        PricePattern::new(&format!(r"(?P<sym>€)\s?(?P<amount>{AMOUNT})"), Prefix),
        PricePattern::new(&format!(r"(?P<sym>£)\s?(?P<amount>{AMOUNT})"), Prefix),
        // JPY / CNY carry no minor unit
        PricePattern::new(&format!(r"(?P<sym>[¥￥])\s?(?P<amount>{WHOLE_AMOUNT})"), Prefix),
        // symbol last
        PricePattern::new(&format!(r"(?P<amount>{AMOUNT})\s?(?P<sym>\$)"), Suffix),
        PricePattern::new(&format!(r"(?P<amount>{AMOUNT})\s?(?P<sym>€)"), Suffix),
        PricePattern::new(&format!(r"(?P<amount>{AMOUNT})\s?(?P<sym>£)"), Suffix),
        PricePattern::new(
            &format!(r"(?P<amount>{WHOLE_AMOUNT})\s?(?P<sym>[¥￥円元])"),
            Suffix,
        ),
        // ISO codes
        PricePattern::new(
            &format!(r"\b(?P<sym>USD|EUR|GBP|JPY|CNY|RMB)\s?(?P<amount>{AMOUNT})"),
            Prefix,
        ),
        PricePattern::new(
            &format!(r"(?P<amount>{AMOUNT})\s?(?P<sym>USD|EUR|GBP|JPY|CNY|RMB)\b"),
            Suffix,
        ),
        // generic decimal amount
        PricePattern::new(r"\b(?P<amount>\d{1,4}[.,]\d{2})\b", Bare),
    ]
});

/// A price found inside a string.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceMatch {
    pub amount: String,
    pub value: f64,
    pub currency: Option<String>,
    pub position: CurrencyPosition,
    /// Byte range of the whole match in the searched text.
    pub range: Range<usize>,
    pub matched_text: String,
}

impl PriceMatch {
    pub fn into_price_info(self, fragment: &TextFragment) -> PriceInfo {
        PriceInfo {
            amount: self.amount,
            value: self.value,
            currency: self.currency,
            position: self.position,
            bbox: fragment.bbox,
            confidence: fragment.confidence,
            original_text: self.matched_text,
        }
    }
}

/// First price in `text` according to pattern priority.
pub fn detect_price(text: &str) -> Option<PriceMatch> {
    PRICE_PATTERNS
        .iter()
        .find_map(|pattern| first_match(pattern, text))
}

/// Every non-overlapping price in `text`, left to right.
pub fn find_prices(text: &str) -> Vec<PriceMatch> {
    let mut found = Vec::new();
    let mut offset = 0;
    while offset < text.len() {
        let rest = &text[offset..];
        let Some(mut m) = detect_price(rest) else {
            break;
        };
        // a later pattern may have matched further left than an earlier one
        let leftmost = PRICE_PATTERNS
            .iter()
            .filter_map(|pattern| first_match(pattern, rest))
            .min_by_key(|candidate| candidate.range.start);
        if let Some(left) = leftmost {
            if left.range.start < m.range.start {
                m = left;
            }
        }
        let advance = m.range.end;
        m.range = (m.range.start + offset)..(m.range.end + offset);
        found.push(m);
        offset += advance.max(1);
    }
    found
}

pub fn contains_price(text: &str) -> bool {
    detect_price(text).is_some()
}

/// Removes every detected price from `text`.
pub fn strip_prices(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut cursor = 0;
    for m in find_prices(text) {
        out.push_str(&text[cursor..m.range.start]);
        out.push(' ');
        cursor = m.range.end;
    }
    out.push_str(&text[cursor..]);
    out
}

/// Price info for every fragment that carries a price.
pub fn detect_fragment_prices(fragments: &[TextFragment]) -> Vec<PriceInfo> {
    fragments
        .iter()
        .filter_map(|fragment| detect_price(&fragment.text).map(|m| m.into_price_info(fragment)))
        .collect()
}

/// Parses printed amounts such as `12.99`, `7,50` or `1,250.00`.
///
/// A trailing separator followed by one or two digits is the decimal mark;
/// every other separator groups thousands.
pub fn parse_amount(amount: &str) -> Option<f64> {
    let last_sep = amount.rfind([',', '.']);
    let normalized = match last_sep {
        Some(idx) if amount.len() - idx - 1 <= 2 => {
            let (whole, frac) = amount.split_at(idx);
            let whole: String = whole.chars().filter(|c| c.is_ascii_digit()).collect();
            format!("{whole}.{}", &frac[1..])
        }
        _ => amount.chars().filter(|c| c.is_ascii_digit()).collect(),
    };
    normalized.parse::<f64>().ok()
}

fn first_match(pattern: &PricePattern, text: &str) -> Option<PriceMatch> {
    pattern.regex.captures_iter(text).find_map(|caps| {
        let whole = caps.get(0)?;
        let amount = caps.name("amount")?;
        let symbol = caps.name("sym");

        // `5 $3` must not read the suffix of one amount as the prefix of another
        if pattern.position == CurrencyPosition::Prefix
            && text[..whole.start()]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_digit())
        {
            return None;
        }
        // bare amounts that belong to a longer number are not prices
        if pattern.position == CurrencyPosition::Suffix
            && text[..whole.start()]
                .chars()
                .next_back()
                .is_some_and(|c| c.is_ascii_digit() || c == '.' || c == ',')
        {
            return None;
        }

        Some(PriceMatch {
            amount: amount.as_str().to_string(),
            value: parse_amount(amount.as_str())?,
            currency: symbol.map(|s| s.as_str().to_string()),
            position: if symbol.is_some() {
                pattern.position
            } else {
                CurrencyPosition::None
            },
            range: whole.range(),
            matched_text: whole.as_str().to_string(),
        })
    })
}
