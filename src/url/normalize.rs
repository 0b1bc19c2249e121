use url::Url;

/// Characters stripped from the end of a raw href after cleaning
const TRAILING_ARTIFACTS: &[char] = &['"', '\'', '>'];

/// Normalizes a URL for deduplication
///
/// # Normalization Steps
///
/// 1. Parse the URL
/// 2. Resolve the path to its normal form (dot segments removed, scheme and
///    host lowercased, default port dropped)
/// 3. Remove the fragment (everything after #)
///
/// Query strings and trailing slashes are left untouched, so `/a` and `/a/`
/// remain distinct. Malformed input is returned unchanged: one bad URL
/// never fails the crawl.
///
/// # Examples
///
/// ```
/// use depth_crawler::url::normalize;
///
/// assert_eq!(normalize("https://a.com/x/../p#frag"), "https://a.com/p");
/// assert_eq!(normalize("not a url"), "not a url");
/// ```
pub fn normalize(url_str: &str) -> String {
    match Url::parse(url_str) {
        Ok(mut url) => {
            url.set_fragment(None);
            url.to_string()
        }
        Err(_) => url_str.to_string(),
    }
}

/// Returns true iff the URL's scheme is `http` or `https` (case-insensitive)
///
/// ```
/// use depth_crawler::url::is_fetchable;
///
/// assert!(is_fetchable("HTTPS://X"));
/// assert!(!is_fetchable("ftp://x"));
/// ```
pub fn is_fetchable(url: &str) -> bool {
    match url.split_once(':') {
        Some((scheme, _)) => {
            scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https")
        }
        None => false,
    }
}

/// Resolves a possibly-relative href against a base URL
///
/// Returns the normalized absolute URL, or `None` if either side fails to
/// parse. Malformed hrefs are common in the wild and are dropped silently.
pub fn resolve(base_url: &str, href: &str) -> Option<String> {
    let base = Url::parse(base_url).ok()?;
    let resolved = base.join(href).ok()?;
    Some(normalize(resolved.as_str()))
}

/// Defensively trims a raw anchor attribute value
///
/// - strips one pair of surrounding quote characters
/// - keeps only the first whitespace-separated token, discarding trailing
///   attributes captured by sloppy markup (`/page target="_blank"`)
/// - strips trailing stray quote and angle-bracket characters
///
/// Returns `None` if nothing is left.
pub fn clean_raw_href(href: &str) -> Option<String> {
    let mut s = href.trim();
    if s.is_empty() {
        return None;
    }

    let quoted = s.len() >= 2
        && ((s.starts_with('"') && s.ends_with('"'))
            || (s.starts_with('\'') && s.ends_with('\'')));
    if quoted {
        s = s[1..s.len() - 1].trim();
    }

    s = s.split_whitespace().next().unwrap_or("");
    s = s.trim_end_matches(TRAILING_ARTIFACTS);

    if s.is_empty() {
        None
    } else {
        Some(s.to_string())
    }
}
