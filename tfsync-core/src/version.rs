use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize, Serializer};

/// A `MAJOR.MINOR.PATCH[-PRE]` version, as used by Terraform releases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub struct Version {
    major: u32,
    minor: u32,
    patch: u32,
    pre: Option<String>,
}

impl TryFrom<String> for Version {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl Serialize for Version {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl Version {
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            pre: None,
        }
    }

    /// Whether this is a pre-release such as `0.13.0-beta2`.
    pub fn is_prerelease(&self) -> bool {
        self.pre.is_some()
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(pre) = &self.pre {
            write!(f, "-{}", pre)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (core, pre) = match s.split_once('-') {
            Some((_, "")) => return Err(format!("invalid version '{}', empty pre-release", s)),
            Some((core, pre)) => (core, Some(pre.to_string())),
            None => (s, None),
        };
        let parts: Vec<&str> = core.split('.').collect();
        if parts.len() != 3 {
            return Err(format!("invalid version '{}', expected 'X.Y.Z'", s));
        }
        Ok(Self {
            major: parts[0].parse().map_err(|_| "invalid major")?,
            minor: parts[1].parse().map_err(|_| "invalid minor")?,
            patch: parts[2].parse().map_err(|_| "invalid patch")?,
            pre,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Version::new(1, 2, 3).to_string(), "1.2.3");
        assert_eq!(Version::default().to_string(), "0.0.0");
        let beta: Version = "0.13.0-beta2".parse().unwrap();
        assert_eq!(beta.to_string(), "0.13.0-beta2");
    }

    #[test]
    fn test_from_str() {
        assert_eq!("1.2.3".parse::<Version>().unwrap(), Version::new(1, 2, 3));
        assert_eq!(
            "10.20.30".parse::<Version>().unwrap(),
            Version::new(10, 20, 30)
        );

        let beta: Version = "0.13.0-beta2".parse().unwrap();
        assert_ne!(beta, Version::new(0, 13, 0));
        assert!(beta.is_prerelease());
        assert!(!Version::new(0, 13, 0).is_prerelease());
    }

    #[test]
    fn test_from_str_invalid() {
        assert!("1.2".parse::<Version>().is_err());
        assert!("1.2.3.4".parse::<Version>().is_err());
        assert!("a.b.c".parse::<Version>().is_err());
        assert!("1.2.3-".parse::<Version>().is_err());
        assert!("".parse::<Version>().is_err());
    }

    #[test]
    fn test_serialize() {
        #[derive(Serialize)]
        struct Config {
            version: Version,
        }
        let config = Config {
            version: Version::new(1, 2, 3),
        };
        let toml = toml::to_string(&config).unwrap();
        assert_eq!(toml.trim(), r#"version = "1.2.3""#);
    }

    #[test]
    fn test_deserialize() {
        #[derive(Deserialize)]
        struct Config {
            version: Version,
        }
        let config: Config = toml::from_str(r#"version = "0.13.0-beta2""#).unwrap();
        assert!(config.version.is_prerelease());
        assert_eq!(config.version.to_string(), "0.13.0-beta2");
    }
}
