use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<email>[\w.-]+@[\w.-]+\.\w+)").unwrap());
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?P<phone>(?:\+?1[-.\s]?)?\(?\d{3}\)?[-.\s]?\d{3}[-.\s]?\d{4})").unwrap()
});

/// Two-letter US region codes accepted as a state (50 states + DC).
pub const REGION_CODES: &[&str] = &[
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "FL", "GA", "HI", "ID", "IL", "IN", "IA", "KS",
    "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH", "NJ", "NM", "NY",
    "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT", "VT", "VA", "WA", "WV",
    "WI", "WY", "DC",
];

const PHONE_DIGITS: usize = 10;

/// Structured view of a free-text person description.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub city: Option<String>,
    pub state: Option<String>,
    pub emails: Vec<String>,
    pub phones: Vec<String>,
    pub raw: String,
}

impl Identity {
    /// First and last name tokens. A single-token name yields an empty last name.
    pub fn first_last(&self) -> (&str, &str) {
        let tokens: Vec<&str> = self.name.split_whitespace().collect();
        match tokens.as_slice() {
            [] => ("", ""),
            [only] => (only, ""),
            [first, .., last] => (first, last),
        }
    }
}

pub fn is_region_code(token: &str) -> bool {
    REGION_CODES.contains(&token)
}

/// Parse free text like `"Jane A. Doe, Austin, TX, jane@x.com"` into an [`Identity`].
///
/// Emails and phone numbers are pulled out first; only the residual text is split on commas
/// for name and city/state detection.
pub fn parse(text: &str) -> Identity {
    let emails: Vec<String> = EMAIL_RE
        .captures_iter(text)
        .map(|c| c["email"].to_string())
        .collect();
    let phone_matches: Vec<&str> = PHONE_RE
        .captures_iter(text)
        .filter_map(|c| c.name("phone"))
        .map(|m| m.as_str())
        .collect();
    let phones: Vec<String> = phone_matches.iter().map(|p| normalize_phone(p)).collect();

    let mut residual = text.to_string();
    for found in emails.iter().map(String::as_str).chain(phone_matches.iter().copied()) {
        residual = residual.replace(found, " ");
    }

    let segments: Vec<&str> = residual
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect();

    let name_idx = segments
        .iter()
        .position(|seg| (2..=4).contains(&seg.split_whitespace().count()))
        .or((!segments.is_empty()).then_some(0));
    let name = name_idx.map(|i| title_case(segments[i])).unwrap_or_default();

    // "Austin, TX": a bare state code takes its city from the previous non-name segment,
    // unless that segment looks like a street address.
    let (city, state) = segments
        .iter()
        .enumerate()
        .skip(1)
        .find_map(|(i, seg)| city_state(seg).map(|(city, code)| (i, city, code)))
        .map_or((None, None), |(i, city, code)| {
            let city = city.or_else(|| {
                let prev = segments[i - 1];
                (i > 1 && Some(i - 1) != name_idx && !prev.chars().any(|c| c.is_ascii_digit()))
                    .then(|| prev.to_string())
            });
            (city, Some(code))
        });

    Identity {
        name,
        city,
        state,
        emails,
        phones,
        raw: text.to_string(),
    }
}

/// Strip non-digits and keep the trailing ten.
pub fn normalize_phone(raw: &str) -> String {
    let digits: Vec<char> = raw.chars().filter(char::is_ascii_digit).collect();
    let start = digits.len().saturating_sub(PHONE_DIGITS);
    digits[start..].iter().collect()
}

/// `"Round Rock TX"` → `(Some("Round Rock"), "TX")`. `None` when the last token is not a region code.
fn city_state(segment: &str) -> Option<(Option<String>, String)> {
    let flat = segment.replace('.', " ");
    let tokens: Vec<&str> = flat.split_whitespace().collect();
    let (last, rest) = tokens.split_last()?;
    let code = last.to_uppercase();
    if !is_region_code(&code) {
        return None;
    }
    let city = Some(rest.join(" ")).filter(|c| !c.is_empty());
    Some((city, code))
}

fn title_case(segment: &str) -> String {
    segment
        .split_whitespace()
        .map(|word| {
            if word.chars().all(char::is_alphabetic) {
                let mut chars = word.chars();
                match chars.next() {
                    Some(first) => first
                        .to_uppercase()
                        .chain(chars.flat_map(char::to_lowercase))
                        .collect(),
                    None => String::new(),
                }
            } else {
                word.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
