// src/crawl/scope.rs
// =============================================================================
// Decides which links the crawler is allowed to follow.
//
// A listing page links to more than its own contents: the parent directory,
// the site root, column sort links, sometimes other parts of the site. We only
// keep links that point strictly BELOW the directory being listed, on the
// same scheme/host/port. That single rule also stops the crawler from
// climbing back up to an ancestor, which is what would otherwise loop forever.
//
// Example with the page https://example.com/pub/:
//   https://example.com/pub/docs/      -> kept (child directory)
//   https://example.com/pub/readme.txt -> kept (file in this directory)
//   https://example.com/pub/           -> dropped (the page itself)
//   https://example.com/               -> dropped (parent)
//   https://example.com/other/         -> dropped (outside the prefix)
//   https://mirror.example.com/pub/x   -> dropped (other host)
// =============================================================================

use url::Url;

use super::CrawlError;

/// Parses and tidies the --url argument
///
/// - Only http and https are accepted
/// - The fragment is dropped
/// - "https://example.com/pub" becomes "https://example.com/pub/" so that
///   relative links resolve inside the directory; a last segment with a dot
///   ("index.html") is left alone
pub fn normalize_root(input: &str) -> Result<Url, CrawlError> {
    let mut url = Url::parse(input.trim()).map_err(|source| CrawlError::InvalidRootUrl {
        url: input.to_string(),
        source,
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(CrawlError::UnsupportedScheme(url.scheme().to_string()));
    }

    url.set_fragment(None);

    let last_segment = url.path().rsplit('/').next().unwrap_or("");
    if !url.path().ends_with('/') && !last_segment.contains('.') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }

    Ok(url)
}

/// The directory a page lives in: everything up to the last "/"
///
/// "https://h/pub/" stays as is, "https://h/pub/index.html" becomes "https://h/pub/"
pub fn directory_of(url: &Url) -> Url {
    let mut dir = url.clone();
    dir.set_query(None);
    dir.set_fragment(None);

    if !dir.path().ends_with('/') {
        let path = match dir.path().rfind('/') {
            Some(index) => dir.path()[..=index].to_string(),
            None => "/".to_string(),
        };
        dir.set_path(&path);
    }

    dir
}

/// True when `candidate` sits strictly below the directory `dir`
pub fn is_below(dir: &Url, candidate: &Url) -> bool {
    same_origin(dir, candidate)
        && candidate.path().starts_with(dir.path())
        && candidate.path().len() > dir.path().len()
}

fn same_origin(a: &Url, b: &Url) -> bool {
    a.scheme() == b.scheme()
        && a.host_str() == b.host_str()
        && a.port_or_known_default() == b.port_or_known_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn test_normalize_adds_trailing_slash() {
        let root = normalize_root("https://example.com/pub").unwrap();
        assert_eq!(root.as_str(), "https://example.com/pub/");
    }

    #[test]
    fn test_normalize_keeps_file_like_root() {
        let root = normalize_root("https://example.com/pub/index.html#top").unwrap();
        assert_eq!(root.as_str(), "https://example.com/pub/index.html");
    }

    #[test]
    fn test_normalize_rejects_garbage() {
        assert!(matches!(
            normalize_root("not a url"),
            Err(CrawlError::InvalidRootUrl { .. })
        ));
        assert!(matches!(
            normalize_root("ftp://example.com/pub/"),
            Err(CrawlError::UnsupportedScheme(scheme)) if scheme == "ftp"
        ));
    }

    #[test]
    fn test_directory_of() {
        assert_eq!(
            directory_of(&url("https://example.com/pub/index.html")).as_str(),
            "https://example.com/pub/"
        );
        assert_eq!(
            directory_of(&url("https://example.com/pub/?C=N;O=D")).as_str(),
            "https://example.com/pub/"
        );
    }

    #[test]
    fn test_is_below() {
        let dir = url("https://example.com/pub/");
        assert!(is_below(&dir, &url("https://example.com/pub/docs/")));
        assert!(is_below(&dir, &url("https://example.com/pub/readme.txt")));
        assert!(is_below(&dir, &url("https://example.com:443/pub/readme.txt")));

        assert!(!is_below(&dir, &url("https://example.com/pub/")));
        assert!(!is_below(&dir, &url("https://example.com/")));
        assert!(!is_below(&dir, &url("https://example.com/public/")));
        assert!(!is_below(&dir, &url("https://example.com/other/")));
        assert!(!is_below(&dir, &url("http://example.com/pub/docs/")));
        assert!(!is_below(&dir, &url("https://mirror.example.com/pub/docs/")));
    }
}
