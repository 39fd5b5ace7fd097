use crate::identity::Identity;

/// Weight per name token found in the link.
pub const NAME_TOKEN_WEIGHT: f64 = 0.15;
pub const CITY_WEIGHT: f64 = 0.15;
pub const STATE_WEIGHT: f64 = 0.10;
/// Weight per email whose local part appears.
pub const EMAIL_WEIGHT: f64 = 0.20;
/// Weight per phone whose last four digits appear.
pub const PHONE_WEIGHT: f64 = 0.20;
pub const MAX_SCORE: f64 = 1.0;

const PHONE_SUFFIX_LEN: usize = 4;

/// Relevance of one link to the identity, with the fragments that matched.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkScore {
    pub score: f64,
    pub matched: Vec<String>,
}

/// Case-insensitive substring scoring of `text` + `url` against the identity.
///
/// Matched fields are reported in evaluation order: name tokens, city, state, emails, phones.
pub fn score(text: &str, url: &str, identity: &Identity) -> LinkScore {
    let hay = format!("{} {}", text, url).to_lowercase();
    let mut total: f64 = 0.0;
    let mut matched = Vec::new();

    for token in identity.name.to_lowercase().split_whitespace() {
        if hay.contains(token) {
            total += NAME_TOKEN_WEIGHT;
            matched.push(token.to_string());
        }
    }

    if let Some(city) = identity.city.as_deref().filter(|c| !c.is_empty()) {
        if hay.contains(&city.to_lowercase()) {
            total += CITY_WEIGHT;
            matched.push(city.to_string());
        }
    }

    if let Some(state) = identity.state.as_deref().filter(|s| !s.is_empty()) {
        if hay.contains(&state.to_lowercase()) {
            total += STATE_WEIGHT;
            matched.push(state.to_string());
        }
    }

    for email in &identity.emails {
        let local = email.split('@').next().unwrap_or_default().to_lowercase();
        if hay.contains(&local) {
            total += EMAIL_WEIGHT;
            matched.push(email.clone());
        }
    }

    for phone in &identity.phones {
        let last4 = phone_suffix(phone);
        if !last4.is_empty() && hay.contains(last4) {
            total += PHONE_WEIGHT;
            matched.push(format!("*{}", last4));
        }
    }

    LinkScore {
        score: total.min(MAX_SCORE),
        matched,
    }
}

fn phone_suffix(phone: &str) -> &str {
    // phones are normalized to ASCII digits
    &phone[phone.len().saturating_sub(PHONE_SUFFIX_LEN)..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::parse;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn name_city_state_reaches_threshold() {
        let id = parse("John Smith, Austin, TX");
        let s = score("John Smith Austin TX", "https://example.com/p/1", &id);
        assert!(s.score >= 0.40 - 1e-9);
        assert!(approx(s.score, 0.55));
        assert_eq!(s.matched, vec!["john", "smith", "Austin", "TX"]);
    }

    #[test]
    fn url_counts_as_haystack() {
        let id = parse("Jane Doe");
        let s = score("", "https://www.spokeo.com/Jane-Doe", &id);
        assert!(approx(s.score, 0.30));
        assert_eq!(s.matched, vec!["jane", "doe"]);
    }

    #[test]
    fn email_local_part_and_masked_phone() {
        let id = parse("John Smith, jsmith@example.com, (512) 555-0199");
        let s = score("jsmith profile, ends 0199", "https://x.com/", &id);
        assert_eq!(s.matched, vec!["smith", "jsmith@example.com", "*0199"]);
        assert!(approx(s.score, 0.15 + 0.20 + 0.20));
    }

    #[test]
    fn score_is_capped() {
        let id = Identity {
            name: "a b c d".into(),
            city: Some("x".into()),
            state: Some("TX".into()),
            emails: vec!["a@q.io".into(), "b@q.io".into()],
            phones: vec!["1234567890".into()],
            raw: String::new(),
        };
        let s = score("a b c d x tx 7890", "", &id);
        assert!(approx(s.score, MAX_SCORE));
        assert_eq!(s.matched.len(), 9);
    }

    #[test]
    fn nothing_matches() {
        let id = parse("Jane Doe, Austin, TX");
        let s = score("Home", "https://site.org/about", &id);
        assert!(approx(s.score, 0.0));
        assert!(s.matched.is_empty());
    }

    #[test]
    fn empty_identity_scores_zero() {
        let s = score("anything", "https://a.b/", &Identity::default());
        assert!(approx(s.score, 0.0));
    }

    #[test]
    fn score_stays_in_bounds() {
        let id = parse("Al Al Al Al, Al Al, AL, al@al.al, 555 555 5555");
        for (text, url) in [("al al al", "al"), ("", ""), ("5555 al", "https://al.al/5555")] {
            let s = score(text, url, &id);
            assert!((0.0..=MAX_SCORE).contains(&s.score));
        }
    }
}
