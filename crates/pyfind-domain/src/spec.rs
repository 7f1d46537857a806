use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Generic command name every CPython-compatible distribution ships.
pub const GENERIC_ALIAS: &str = "python";

const CPYTHON: &str = "CPython";

/// A parsed interpreter request such as `3.11`, `pypy3`, `python3.12-64`, or
/// `/usr/bin/python3`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PythonSpec {
    pub raw: String,
    pub implementation: Option<String>,
    pub major: Option<u64>,
    pub minor: Option<u64>,
    pub micro: Option<u64>,
    pub architecture: Option<u8>,
    pub path: Option<PathBuf>,
}

impl PythonSpec {
    /// Parses a raw request. Never fails: input outside the grammar degrades
    /// to a spec with every field left as a wildcard.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut spec = Self::wildcard(raw);
        if Path::new(raw).is_absolute() {
            spec.path = Some(PathBuf::from(raw));
            return spec;
        }
        match parse_identifier(raw) {
            Ok(parsed) => {
                spec.implementation = parsed.implementation;
                spec.major = parsed.major;
                spec.minor = parsed.minor;
                spec.micro = parsed.micro;
                spec.architecture = parsed.architecture;
            }
            Err(reason) => {
                tracing::debug!(spec = raw, reason, "unparseable spec; matching any");
            }
        }
        spec
    }

    fn wildcard(raw: &str) -> Self {
        Self {
            raw: raw.to_string(),
            implementation: None,
            major: None,
            minor: None,
            micro: None,
            architecture: None,
            path: None,
        }
    }

    #[must_use]
    pub fn is_abs(&self) -> bool {
        self.path.is_some()
    }

    /// Requested version components up to the first wildcard.
    #[must_use]
    pub fn version_prefix(&self) -> Vec<u64> {
        [self.major, self.minor, self.micro]
            .into_iter()
            .map_while(std::convert::identity)
            .collect()
    }

    /// Bare executable names worth looking up on `PATH`, most specific first.
    ///
    /// Names derived from the requested implementation carry `true` (finding
    /// one already implies the right interpreter family); the generic
    /// `python` alias carries `false`.
    #[must_use]
    pub fn generate_names(&self, case_sensitive: bool) -> NameCandidates {
        let mut aliases: Vec<(String, bool)> = Vec::new();
        if let Some(implementation) = &self.implementation {
            aliases.push((implementation.clone(), true));
            if case_sensitive {
                for variant in [
                    implementation.to_ascii_lowercase(),
                    implementation.to_ascii_uppercase(),
                ] {
                    if !aliases.iter().any(|(name, _)| *name == variant) {
                        aliases.push((variant, true));
                    }
                }
            }
        }
        match aliases.iter_mut().find(|(name, _)| name == GENERIC_ALIAS) {
            Some(existing) => existing.1 = false,
            None => aliases.push((GENERIC_ALIAS.to_string(), false)),
        }
        let version = self.version_prefix();
        NameCandidates {
            remaining: version.len(),
            version,
            aliases,
            alias: 0,
        }
    }
}

impl fmt::Display for PythonSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Lazy `(name, strict_implementation_match)` sequence produced by
/// [`PythonSpec::generate_names`]. Clone it to restart.
#[derive(Clone, Debug)]
pub struct NameCandidates {
    aliases: Vec<(String, bool)>,
    version: Vec<u64>,
    alias: usize,
    remaining: usize,
}

impl Iterator for NameCandidates {
    type Item = (String, bool);

    fn next(&mut self) -> Option<Self::Item> {
        let (alias, strict) = self.aliases.get(self.alias)?;
        let suffix = self.version[..self.remaining]
            .iter()
            .map(u64::to_string)
            .collect::<Vec<_>>()
            .join(".");
        let item = (format!("{alias}{suffix}"), *strict);
        if self.remaining == 0 {
            self.alias += 1;
            self.remaining = self.version.len();
        } else {
            self.remaining -= 1;
        }
        Some(item)
    }
}

#[derive(Debug, Default)]
struct Identifier {
    implementation: Option<String>,
    major: Option<u64>,
    minor: Option<u64>,
    micro: Option<u64>,
    architecture: Option<u8>,
}

// Grammar: [letters][digits and dots][-32|-64]
fn parse_identifier(raw: &str) -> Result<Identifier, &'static str> {
    let (body, architecture) = match raw.rsplit_once('-') {
        Some((body, "32")) => (body, Some(32)),
        Some((body, "64")) => (body, Some(64)),
        Some(_) => return Err("architecture suffix must be -32 or -64"),
        None => (raw, None),
    };
    let split = body
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(body.len());
    let (name, version) = body.split_at(split);
    if !version.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return Err("version may only contain digits and dots");
    }

    let mut parsed = Identifier {
        implementation: match name {
            "" => None,
            "py" | "python" => Some(CPYTHON.to_string()),
            other => Some(other.to_string()),
        },
        architecture,
        ..Identifier::default()
    };

    let parts = version
        .split('.')
        .filter(|part| !part.is_empty())
        .map(str::parse::<u64>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|_| "version component out of range")?;
    match parts.as_slice() {
        [] => {}
        // `311` means 3.11: the first digit is the major version
        [single] => {
            let digits = single.to_string();
            parsed.major = Some(u64::from(digits.as_bytes()[0] - b'0'));
            if *single > 9 {
                parsed.minor = Some(
                    digits[1..]
                        .parse()
                        .map_err(|_| "version component out of range")?,
                );
            }
        }
        [major, minor] => {
            parsed.major = Some(*major);
            parsed.minor = Some(*minor);
        }
        [major, minor, micro] => {
            parsed.major = Some(*major);
            parsed.minor = Some(*minor);
            parsed.micro = Some(*micro);
        }
        _ => return Err("at most three version components are supported"),
    }
    Ok(parsed)
}
