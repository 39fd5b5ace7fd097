//! Site catalog: search URL templates, site groups and opt-out endpoints.

use crate::identity::Identity;

pub const SITE_GROUPS: &[(&str, &[&str])] = &[
    (
        "peoplecore",
        &[
            "whitepages",
            "spokeo",
            "beenverified",
            "intelius",
            "truthfinder",
            "fastpeoplesearch",
            "truepeoplesearch",
            "radaris",
            "nuwber",
        ],
    ),
    ("google", &["google_site_whitepages", "google_site_spokeo"]),
    ("startpage", &["startpage_site_whitepages", "startpage_site_spokeo"]),
    (
        "brokers_plus",
        &[
            "peoplecore",
            "freebackgroundcheck",
            "infotracer",
            "recordsfinder",
            "affordablebackground",
            "govarrestssearch",
            "idstrong",
            "reversephonecheck",
            "searchquarry",
            "texaswarrants",
            "usrecords",
            "uswarrants",
        ],
    ),
    (
        "more_people",
        &[
            "peoplefinders",
            "ussearch",
            "peoplelooker",
            "addresses",
            "neighborwho",
            "peekyou",
            "thatsthem",
            "cocofinder",
            "clustrmaps",
        ],
    ),
];

pub const OPT_OUT_LINKS: &[(&str, &str)] = &[
    ("whitepages", "https://www.whitepages.com/suppression_requests"),
    ("spokeo", "https://www.spokeo.com/opt_out/new"),
    ("beenverified", "https://www.beenverified.com/app/optout/search"),
    ("intelius", "https://suppression.peopleconnect.us/login"),
    ("truthfinder", "https://www.truthfinder.com/opt-out/"),
    ("fastpeoplesearch", "https://www.fastpeoplesearch.com/removal"),
    ("truepeoplesearch", "https://www.truepeoplesearch.com/removal"),
    ("radaris", "https://radaris.com/control/privacy"),
    ("nuwber", "https://nuwber.com/removal"),
    ("mylife", "https://www.mylife.com/privacy-policy"),
    ("freebackgroundcheck", "https://freebackgroundcheck.org/opt-out/"),
    ("infotracer", "https://infotracer.com/optout/"),
    ("recordsfinder", "https://recordsfinder.com/opt-out/"),
    ("affordablebackground", "https://affordablebackgroundchecks.com/remove/"),
    ("govarrestssearch", "https://govarrestssearch.org/optout/"),
    ("idstrong", "https://www.idstrong.com/opt-out/"),
    ("reversephonecheck", "https://www.reversephonecheck.com/optout.php"),
    ("searchquarry", "https://www.searchquarry.com/opt-out-of-search-quarry/"),
    ("texaswarrants", "https://texaswarrants.org/remove/"),
    ("usrecords", "https://usrecords.net/remove/"),
    ("uswarrants", "https://uswarrants.org/remove/"),
    ("peoplefinders", "https://www.peoplefinders.com/opt-out"),
    ("ussearch", "https://suppression.peopleconnect.us/login"),
    ("peoplelooker", "https://www.peoplelooker.com/opt-out/"),
    ("addresses", "https://www.addresses.com/optout"),
    ("neighborwho", "https://www.neighborwho.com/do-not-sell-my-information/"),
    ("peekyou", "https://www.peekyou.com/about/contact/optout/"),
    ("thatsthem", "https://thatsthem.com/optout"),
    ("cocofinder", "https://cocofinder.com/remove-my-info"),
    ("clustrmaps", "https://clustrmaps.com/bl/opt-out"),
];

/// A site key and the search URL generated for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchUrl {
    pub site: String,
    pub url: String,
}

/// Form-style encoding: spaces become `+`.
fn enc(s: &str) -> String {
    urlencoding::encode(s).replace("%20", "+")
}

/// Every catalog entry expanded for `identity`, in catalog order.
pub fn search_urls(identity: &Identity) -> Vec<SearchUrl> {
    let (first, last) = identity.first_last();
    let (first, last) = (enc(first), enc(last));
    let name = enc(&identity.name);
    let city_raw = identity.city.as_deref().unwrap_or("");
    let state_raw = identity.state.as_deref().unwrap_or("");
    let city = enc(city_raw);
    let state = enc(state_raw);
    let loc = enc(format!("{} {}", city_raw, state_raw).trim());
    let q = format!("{name}+{city}+{state}");

    let mut out: Vec<(String, String)> = vec![
        ("whitepages".into(), format!("https://www.whitepages.com/name/{name}/{state}/{city}")),
        ("spokeo".into(), format!("https://www.spokeo.com/{first}-{last}/{state}/{city}")),
        (
            "beenverified".into(),
            format!(
                "https://www.beenverified.com/people/{first}-{last}/{}",
                enc(&state_raw.to_lowercase())
            ),
        ),
        ("intelius".into(), format!("https://www.intelius.com/people-search/{first}-{last}/{state}")),
        ("truthfinder".into(), format!("https://www.truthfinder.com/people/{first}-{last}/{state}/")),
        (
            "fastpeoplesearch".into(),
            format!("https://www.fastpeoplesearch.com/name/{first}-{last}_{city}-{state}"),
        ),
        (
            "truepeoplesearch".into(),
            format!("https://www.truepeoplesearch.com/results?name={name}&citystatezip={loc}"),
        ),
        (
            "radaris".into(),
            format!("https://radaris.com/ng/results?ff={first}&fl={last}&fc={city}&fs={state}"),
        ),
        ("nuwber".into(), format!("https://nuwber.com/search?name={name}&location={loc}")),
        (
            "google_site_whitepages".into(),
            format!("https://www.google.com/search?q=site:whitepages.com+{q}"),
        ),
        (
            "google_site_spokeo".into(),
            format!("https://www.google.com/search?q=site:spokeo.com+{q}"),
        ),
        (
            "startpage_site_whitepages".into(),
            format!("https://www.startpage.com/do/search?q=site%3Awhitepages.com+{q}"),
        ),
        (
            "startpage_site_spokeo".into(),
            format!("https://www.startpage.com/do/search?q=site%3Aspokeo.com+{q}"),
        ),
        ("freebackgroundcheck".into(), format!("https://freebackgroundcheck.org/name-search/?q={q}")),
        ("infotracer".into(), format!("https://infotracer.com/search/?q={q}")),
        (
            "recordsfinder".into(),
            format!("https://recordsfinder.com/people/?name={name}&location={loc}"),
        ),
        ("affordablebackground".into(), format!("https://affordablebackgroundchecks.com/search/?q={q}")),
        ("govarrestssearch".into(), format!("https://govarrestssearch.org/search/?q={q}")),
        ("idstrong".into(), format!("https://www.idstrong.com/people-search/?q={q}")),
        (
            "reversephonecheck".into(),
            format!(
                "https://www.reversephonecheck.com/results.php?reporttype=1&fn={first}&ln={last}&city={city}&state={state}"
            ),
        ),
        (
            "searchquarry".into(),
            format!("https://www.searchquarry.com/names/?fn={first}&ln={last}&state={state}"),
        ),
        ("texaswarrants".into(), format!("https://texaswarrants.org/search/?q={q}")),
        ("usrecords".into(), format!("https://usrecords.net/search/?q={q}")),
        ("uswarrants".into(), format!("https://uswarrants.org/search/?q={q}")),
        (
            "peoplefinders".into(),
            format!("https://www.peoplefinders.com/people/{first}-{last}?citystatezip={loc}"),
        ),
        ("ussearch".into(), format!("https://www.ussearch.com/people-search/{first}-{last}/{state}")),
        ("peoplelooker".into(), format!("https://www.peoplelooker.com/people/{first}-{last}/{state}/")),
        (
            "addresses".into(),
            format!("https://www.addresses.com/people/{first}+{last}?state={state}&city={city}"),
        ),
        (
            "neighborwho".into(),
            format!("https://www.neighborwho.com/people-search/{first}-{last}/{state}/?city={city}"),
        ),
        ("peekyou".into(), format!("https://www.peekyou.com/{first}_{last}")),
        (
            "thatsthem".into(),
            format!("https://thatsthem.com/name/{first}-{last}?state={state}&city={city}"),
        ),
        ("cocofinder".into(), format!("https://cocofinder.com/name?q={q}")),
        ("clustrmaps".into(), format!("https://clustrmaps.com/person/{first}-{last}/{state}")),
    ];

    for (i, phone) in identity.phones.iter().enumerate() {
        out.push((
            format!("google_phone_{}", i + 1),
            format!("https://www.google.com/search?q={}", enc(phone)),
        ));
    }
    for (i, email) in identity.emails.iter().enumerate() {
        out.push((
            format!("google_email_{}", i + 1),
            format!("https://www.google.com/search?q=%22{}%22", enc(email)),
        ));
    }

    out.into_iter()
        .map(|(site, url)| SearchUrl { site, url })
        .collect()
}

fn group(key: &str) -> Option<&'static [&'static str]> {
    SITE_GROUPS
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, members)| *members)
}

/// `"peoplecore,spokeo"` → site keys, with groups expanded one level deep. `"all"` stays `["all"]`.
pub fn expand_sites(arg: &str) -> Vec<String> {
    if arg == "all" {
        return vec!["all".to_string()];
    }
    let mut expanded = Vec::new();
    for key in arg.split(',').map(|s| s.trim().to_lowercase()).filter(|s| !s.is_empty()) {
        match group(&key) {
            Some(members) => {
                for member in members {
                    match group(member) {
                        Some(nested) => expanded.extend(nested.iter().map(|s| s.to_string())),
                        None => expanded.push(member.to_string()),
                    }
                }
            }
            None => expanded.push(key),
        }
    }
    expanded
}

/// Catalog entries whose key was asked for, in catalog order. `"all"` selects everything.
pub fn select(catalog: &[SearchUrl], wanted: &[String]) -> Vec<SearchUrl> {
    let all = wanted.iter().any(|w| w == "all");
    catalog
        .iter()
        .filter(|entry| all || wanted.contains(&entry.site))
        .cloned()
        .collect()
}

pub fn opt_out_url(site: &str) -> Option<&'static str> {
    OPT_OUT_LINKS
        .iter()
        .find(|(key, _)| *key == site)
        .map(|(_, url)| *url)
}

/// Search-engine entries that never hit a broker domain directly.
pub fn is_discovery(site: &str) -> bool {
    site.starts_with("google_") || site.starts_with("startpage_")
}

/// Force the `google` and `startpage` groups into a `--sites` argument.
pub fn safe_discovery_sites(arg: &str) -> String {
    if arg == "all" {
        return "google,startpage".to_string();
    }
    let mut groups: Vec<&str> = arg.split(',').map(str::trim).filter(|s| !s.is_empty()).collect();
    if !groups.contains(&"google") {
        groups.insert(0, "google");
    }
    if !groups.contains(&"startpage") {
        groups.insert(1, "startpage");
    }
    groups.join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::parse;

    fn url_for<'a>(urls: &'a [SearchUrl], site: &str) -> &'a str {
        &urls.iter().find(|u| u.site == site).unwrap().url
    }

    #[test]
    fn templates_use_identity_fields() {
        let urls = search_urls(&parse("Jane A. Doe, Round Rock, TX"));
        assert_eq!(
            url_for(&urls, "whitepages"),
            "https://www.whitepages.com/name/Jane+A.+Doe/TX/Round+Rock"
        );
        assert_eq!(url_for(&urls, "spokeo"), "https://www.spokeo.com/Jane-Doe/TX/Round+Rock");
        assert_eq!(url_for(&urls, "beenverified"), "https://www.beenverified.com/people/Jane-Doe/tx");
        assert_eq!(
            url_for(&urls, "nuwber"),
            "https://nuwber.com/search?name=Jane+A.+Doe&location=Round+Rock+TX"
        );
        assert_eq!(urls.len(), 33);
    }

    #[test]
    fn phones_and_emails_get_google_entries() {
        let urls = search_urls(&parse("John Smith, js@example.com, 512-555-0199"));
        assert_eq!(url_for(&urls, "google_phone_1"), "https://www.google.com/search?q=5125550199");
        assert_eq!(
            url_for(&urls, "google_email_1"),
            "https://www.google.com/search?q=%22js%40example.com%22"
        );
    }

    #[test]
    fn groups_expand_with_nesting() {
        let sites = expand_sites("brokers_plus");
        assert_eq!(sites[0], "whitepages");
        assert_eq!(sites.len(), 9 + 11);
        assert!(sites.contains(&"uswarrants".to_string()));
        assert_eq!(expand_sites(" Spokeo , ,google"), vec!["spokeo", "google_site_whitepages", "google_site_spokeo"]);
        assert_eq!(expand_sites("all"), vec!["all"]);
    }

    #[test]
    fn select_keeps_catalog_order() {
        let catalog = search_urls(&parse("Jane Doe"));
        let picked = select(&catalog, &expand_sites("nuwber,spokeo,unknown"));
        let keys: Vec<&str> = picked.iter().map(|p| p.site.as_str()).collect();
        assert_eq!(keys, vec!["spokeo", "nuwber"]);
        assert_eq!(select(&catalog, &expand_sites("all")).len(), catalog.len());
    }

    #[test]
    fn opt_out_lookup() {
        assert_eq!(opt_out_url("spokeo"), Some("https://www.spokeo.com/opt_out/new"));
        assert_eq!(opt_out_url("google_site_spokeo"), None);
    }

    #[test]
    fn safe_discovery_coercion() {
        assert_eq!(safe_discovery_sites("all"), "google,startpage");
        assert_eq!(safe_discovery_sites("peoplecore"), "google,startpage,peoplecore");
        assert_eq!(safe_discovery_sites("startpage,spokeo"), "google,startpage,spokeo");
        assert!(is_discovery("google_phone_1"));
        assert!(!is_discovery("spokeo"));
    }
}
