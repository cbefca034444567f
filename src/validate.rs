use std::path::Path;

use url::Url;

use crate::constants::ALLOWED_IMAGE_EXTENSIONS;

/// Syntactic check only: the candidate must carry both a scheme and a
/// network location. Reachability is the downloader's problem.
pub fn is_valid_url(candidate: &str) -> bool {
    // A network location only exists after "//". The WHATWG parser would
    // repair "http:/host" into "http://host", so guard for the literal
    // separator before parsing.
    if !candidate.contains("://") {
        return false;
    }

    match Url::parse(candidate) {
        Ok(url) => url.has_host(),
        Err(_) => false,
    }
}

/// Case-insensitive allow-list on the save name's extension. This filters
/// the requested file name only; it never inspects content bytes.
pub fn has_allowed_extension(filename: &str) -> bool {
    Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ALLOWED_IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_with_scheme_and_host_is_valid() {
        assert!(is_valid_url("https://ai.example.dev"));
        assert!(is_valid_url("http://example.com/cat.jpg?size=large"));
    }

    #[test]
    fn bare_hostname_is_rejected() {
        assert!(!is_valid_url("example.com"));
        assert!(!is_valid_url("not-a-url"));
    }

    #[test]
    fn scheme_without_host_is_rejected() {
        assert!(!is_valid_url("http://"));
        assert!(!is_valid_url("https://"));
    }

    #[test]
    fn single_slash_scheme_is_rejected() {
        assert!(!is_valid_url("ftp:/bad"));
        assert!(!is_valid_url("http:/example.com/cat.jpg"));
    }

    #[test]
    fn allowed_extensions_match_case_insensitively() {
        assert!(has_allowed_extension("photo.jpg"));
        assert!(has_allowed_extension("photo.jpeg"));
        assert!(has_allowed_extension("image.PNG"));
        assert!(has_allowed_extension("animation.Gif"));
    }

    #[test]
    fn other_extensions_are_rejected() {
        assert!(!has_allowed_extension("document.pdf"));
        assert!(!has_allowed_extension("archive.tar.gz"));
        assert!(!has_allowed_extension("script.jpg.exe"));
    }

    #[test]
    fn missing_extension_is_rejected() {
        assert!(!has_allowed_extension("noextension"));
        assert!(!has_allowed_extension(".hidden"));
        assert!(!has_allowed_extension(""));
    }
}
