use url::Url;

/// Ensures a URL carries an explicit scheme, defaulting to https
pub fn normalize(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Extracts the network location (host[:port]) of a URL
///
/// The URL is normalized first, so scheme-less input like `acme.com` still
/// yields a domain. Input that cannot be parsed yields an empty string.
pub fn base_domain(url: &str) -> String {
    match Url::parse(&normalize(url)) {
        Ok(parsed) => {
            let host = parsed.host_str().unwrap_or_default();
            match parsed.port() {
                Some(port) => format!("{}:{}", host, port),
                None => host.to_string(),
            }
        }
        Err(_) => String::new(),
    }
}

/// Checks that a URL has both a scheme and a network location
pub fn is_valid(url: &str) -> bool {
    Url::parse(url).map(|parsed| parsed.has_host()).unwrap_or(false)
}

/// Compares the network locations of two URLs
///
/// Exact string equality on host[:port]: no www-stripping and no subdomain
/// folding, so `www.acme.com` and `acme.com` count as different domains.
pub fn same_domain(url_a: &str, url_b: &str) -> bool {
    base_domain(url_a) == base_domain(url_b)
}

/// Resolves a possibly-relative URL against a base URL
///
/// Returns an empty string when resolution fails; callers treat empty as
/// "skip this link".
pub fn resolve(base: &str, relative: &str) -> String {
    match Url::parse(base).and_then(|b| b.join(relative)) {
        Ok(resolved) => resolved.to_string(),
        Err(e) => {
            ::log::debug!("Could not resolve {} against {}: {}", relative, base, e);
            String::new()
        }
    }
}

/// Drops the query and fragment components, keeping scheme, host and path
///
/// Unparseable input is returned unchanged.
pub fn strip_volatile(url: &str) -> String {
    match Url::parse(url) {
        Ok(mut parsed) => {
            parsed.set_query(None);
            parsed.set_fragment(None);
            parsed.to_string()
        }
        Err(_) => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_scheme() {
        assert_eq!(normalize("acme.com"), "https://acme.com");
        assert_eq!(normalize("acme.com/partners"), "https://acme.com/partners");

        // Existing schemes are left alone
        assert_eq!(normalize("http://acme.com"), "http://acme.com");
        assert_eq!(normalize("https://acme.com"), "https://acme.com");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for input in ["acme.com", "https://acme.com/partners?x=1", "http://a.b.c"] {
            let once = normalize(input);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_base_domain() {
        assert_eq!(base_domain("https://acme.com/partners"), "acme.com");
        assert_eq!(base_domain("acme.com"), "acme.com");
        assert_eq!(base_domain("https://acme.com:8080/x"), "acme.com:8080");
        assert_eq!(base_domain("not a url at all"), "");
    }

    #[test]
    fn test_base_domain_has_no_scheme_or_path() {
        for input in ["acme.com/a/b", "https://www.acme.com/partners?q=1#top"] {
            let domain = base_domain(&normalize(input));
            assert!(!domain.contains("://"));
            assert!(!domain.contains('/'));
        }
    }

    #[test]
    fn test_is_valid() {
        assert!(is_valid("https://acme.com"));
        assert!(is_valid("http://acme.com/partners"));

        // Missing scheme or host
        assert!(!is_valid("acme.com"));
        assert!(!is_valid("https://"));
        assert!(!is_valid("mailto:sales@acme.com"));
    }

    #[test]
    fn test_same_domain_is_reflexive_and_symmetric() {
        let a = "https://acme.com/partners";
        let b = "https://acme.com/pricing";
        assert!(same_domain(a, a));
        assert!(same_domain(a, b));
        assert!(same_domain(b, a));
        assert!(!same_domain(a, "https://globex.com"));
        assert!(!same_domain("https://globex.com", a));
    }

    #[test]
    fn test_same_domain_does_not_fold_www() {
        // Exact netloc comparison: www is a different domain
        assert!(!same_domain("https://www.acme.com", "https://acme.com"));
    }

    #[test]
    fn test_resolve() {
        assert_eq!(
            resolve("https://acme.com/about", "/partners"),
            "https://acme.com/partners"
        );
        assert_eq!(
            resolve("https://acme.com/docs/", "guide.html"),
            "https://acme.com/docs/guide.html"
        );
        // Absolute links pass through
        assert_eq!(
            resolve("https://acme.com", "https://globex.com/p"),
            "https://globex.com/p"
        );
        // Unresolvable input signals "skip" with an empty string
        assert_eq!(resolve("not a url", "/partners"), "");
    }

    #[test]
    fn test_strip_volatile() {
        assert_eq!(
            strip_volatile("https://acme.com/partners?utm=x#apply"),
            "https://acme.com/partners"
        );
        assert_eq!(
            strip_volatile("https://acme.com/partners"),
            "https://acme.com/partners"
        );
        assert_eq!(strip_volatile("not a url"), "not a url");
    }
}
