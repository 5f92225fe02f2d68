use crate::command::normalize_class;
use std::path::Path;
use url::Url;

/// Lowercase extension of `path` without the dot. `None` when there is none
/// (including dotfiles such as `.bashrc`).
pub fn extension_of(path: &str) -> Option<String> {
    let ext = Path::new(path).extension()?;
    normalize_class(&ext.to_string_lossy())
}

/// Lowercase host of `input`. `None` when it does not parse as a URL or has no host.
pub fn domain_of(input: &str) -> Option<String> {
    let url = Url::parse(input.trim()).ok()?;
    normalize_class(url.host_str()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_lowercased_without_dot() {
        assert_eq!(extension_of("/sdcard/Notes/todo.MD").as_deref(), Some("md"));
        assert_eq!(extension_of("archive.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of("Makefile"), None);
        assert_eq!(extension_of("/home/u/.bashrc"), None);
    }

    #[test]
    fn domain_is_the_url_host() {
        assert_eq!(
            domain_of("https://YouTu.be/dQw4w9WgXcQ?t=1").as_deref(),
            Some("youtu.be")
        );
        assert_eq!(
            domain_of("http://www.youtube.com:8080/watch?v=x").as_deref(),
            Some("www.youtube.com")
        );
    }

    #[test]
    fn unparseable_or_hostless_input_has_no_domain() {
        assert_eq!(domain_of("just some shared text"), None);
        assert_eq!(domain_of("mailto:someone@example.org"), None);
        assert_eq!(domain_of(""), None);
    }
}
