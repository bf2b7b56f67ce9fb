use regex::Regex;

use crate::error::{Error, Result};

/// Turns whatever the user pasted - profile URL, share link path, raw handle -
/// into a canonical handle with no scheme, domain, or `@` prefix.
pub struct ProfileParser {
    patterns: Vec<Regex>,
}

impl ProfileParser {
    pub fn new() -> Self {
        let mut patterns = Vec::new();

        // Ordered: most specific URL shape first, bare @token last.
        // `@` is excluded from the handle class so "@@bob" yields "bob".
        for pattern in [
            r"tiktok\.com/@([^/@?]+)", // profile path: tiktok.com/@handle
            r"tiktok\.com/([^/@?]+)",  // bare path segment after the domain
            r"@([^/@?]+)",             // @handle token anywhere
        ] {
            if let Ok(regex) = Regex::new(pattern) {
                patterns.push(regex);
            }
        }

        Self { patterns }
    }

    /// Extract the handle, or fail with `InvalidProfile` if nothing usable
    /// can be derived.
    pub fn normalize(&self, input: &str) -> Result<String> {
        let input = input.trim();
        if input.is_empty() {
            return Err(Error::InvalidProfile(input.to_string()));
        }

        for pattern in &self.patterns {
            if let Some(caps) = pattern.captures(input) {
                if let Some(handle) = caps.get(1) {
                    return Ok(handle.as_str().to_string());
                }
            }
        }

        // Not URL-shaped at all: treat it as a handle with stray @s
        if !input.starts_with("http") {
            let handle = input.replace('@', "");
            if !handle.is_empty() {
                return Ok(handle);
            }
        }

        Err(Error::InvalidProfile(input.to_string()))
    }
}

impl Default for ProfileParser {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_url_shapes() {
        let parser = ProfileParser::new();

        assert_eq!(
            parser.normalize("https://tiktok.com/@jane_doe?x=1").unwrap(),
            "jane_doe"
        );
        assert_eq!(
            parser.normalize("https://www.tiktok.com/@jane_doe/video/123").unwrap(),
            "jane_doe"
        );
        assert_eq!(
            parser.normalize("tiktok.com/jane_doe").unwrap(),
            "jane_doe"
        );
        assert_eq!(parser.normalize("@jane_doe").unwrap(), "jane_doe");
    }

    #[test]
    fn test_bare_handle_strips_at_signs() {
        let parser = ProfileParser::new();

        assert_eq!(parser.normalize("jane_doe").unwrap(), "jane_doe");
        assert_eq!(parser.normalize("@@bob").unwrap(), "bob");
    }

    #[test]
    fn test_empty_input_is_rejected() {
        let parser = ProfileParser::new();

        assert!(matches!(
            parser.normalize(""),
            Err(Error::InvalidProfile(_))
        ));
        assert!(matches!(
            parser.normalize("   "),
            Err(Error::InvalidProfile(_))
        ));
    }

    #[test]
    fn test_unrecognized_url_is_rejected() {
        let parser = ProfileParser::new();

        // URL-shaped but no handle anywhere in it
        assert!(matches!(
            parser.normalize("https://example.com/watch?v=1"),
            Err(Error::InvalidProfile(_))
        ));
    }
}
