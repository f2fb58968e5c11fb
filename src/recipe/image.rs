use crate::utils::error::{PrecioLuzError, Result};
use std::fmt;
use std::str::FromStr;

const MAX_TAG_LEN: usize = 128;

/// An image reference of the form `[registry/]repository:tag`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BaseImage {
    repository: String,
    tag: String,
}

impl BaseImage {
    pub fn new(repository: impl Into<String>, tag: impl Into<String>) -> Result<Self> {
        let image = Self {
            repository: repository.into(),
            tag: tag.into(),
        };
        image.validate()?;
        Ok(image)
    }

    pub fn repository(&self) -> &str {
        &self.repository
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// Python interpreter version implied by an official `python` image tag,
    /// e.g. `3.13` for `python:3.13-slim`.
    pub fn python_version(&self) -> Option<&str> {
        let name = self.repository.rsplit('/').next()?;
        if name != "python" {
            return None;
        }
        let version = self.tag.split('-').next()?;
        let looks_like_version = !version.is_empty()
            && version.split('.').all(|part| {
                !part.is_empty() && part.chars().all(|c| c.is_ascii_digit())
            });
        looks_like_version.then_some(version)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| PrecioLuzError::RecipeError {
            message: format!("base image '{}': {}", self, reason),
        };

        if self.repository.is_empty() {
            return Err(invalid("repository is empty"));
        }
        if self.repository.chars().any(|c| c.is_whitespace() || c.is_ascii_uppercase()) {
            return Err(invalid("repository must be lowercase with no whitespace"));
        }
        if self.repository.starts_with('/') || self.repository.ends_with('/') {
            return Err(invalid("repository has an empty path component"));
        }
        if self.tag.is_empty() {
            return Err(invalid("tag is empty"));
        }
        if self.tag.len() > MAX_TAG_LEN {
            return Err(invalid("tag is longer than 128 characters"));
        }
        if self.tag.starts_with(['.', '-'])
            || !self
                .tag
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        {
            return Err(invalid("tag may only contain letters, digits, '_', '.' and '-'"));
        }
        Ok(())
    }
}

impl fmt::Display for BaseImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.repository, self.tag)
    }
}

impl FromStr for BaseImage {
    type Err = PrecioLuzError;

    fn from_str(s: &str) -> Result<Self> {
        // a ':' before the last '/' belongs to a registry port, not a tag
        let name_start = s.rfind('/').map(|i| i + 1).unwrap_or(0);
        match s[name_start..].rfind(':') {
            Some(i) => BaseImage::new(&s[..name_start + i], &s[name_start + i + 1..]),
            None => Err(PrecioLuzError::RecipeError {
                message: format!("base image '{}' must be pinned to a tag", s),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_references() {
        let image: BaseImage = "ghcr.io/home-assistant/home-assistant:2026.2.2"
            .parse()
            .unwrap();
        assert_eq!(image.repository(), "ghcr.io/home-assistant/home-assistant");
        assert_eq!(image.tag(), "2026.2.2");

        let image: BaseImage = "localhost:5000/tools/python:3.13-slim".parse().unwrap();
        assert_eq!(image.repository(), "localhost:5000/tools/python");
        assert_eq!(image.python_version(), Some("3.13"));
    }

    #[test]
    fn test_unresolvable_references() {
        assert!("python".parse::<BaseImage>().is_err());
        assert!("python:".parse::<BaseImage>().is_err());
        assert!(":3.13".parse::<BaseImage>().is_err());
        assert!("Python:3.13".parse::<BaseImage>().is_err());
        assert!("python:3.13 slim".parse::<BaseImage>().is_err());
        assert!("localhost:5000/python".parse::<BaseImage>().is_err());
    }

    #[test]
    fn test_python_version() {
        let slim: BaseImage = "python:3.13-slim".parse().unwrap();
        assert_eq!(slim.python_version(), Some("3.13"));

        let plain: BaseImage = "python:3.12".parse().unwrap();
        assert_eq!(plain.python_version(), Some("3.12"));

        let ha: BaseImage = "ghcr.io/home-assistant/home-assistant:stable"
            .parse()
            .unwrap();
        assert_eq!(ha.python_version(), None);

        let latest: BaseImage = "python:latest".parse().unwrap();
        assert_eq!(latest.python_version(), None);
    }
}
