use std::path::PathBuf;

use pyfind_domain::PythonSpec;

/// One interpreter registered with the host's launcher, plus the version and
/// architecture its registration tag advertises.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LauncherEntry {
    pub tag: String,
    pub path: PathBuf,
    advertised: PythonSpec,
}

impl LauncherEntry {
    #[must_use]
    pub fn new(tag: &str, path: PathBuf) -> Self {
        // Tags look like `3.12`, `3.10-32`, or `ContinuumAnalytics/Anaconda39-64`.
        let local = tag.rsplit('/').next().unwrap_or(tag);
        Self {
            tag: tag.to_string(),
            path,
            advertised: PythonSpec::parse(local),
        }
    }

    /// Cheap pre-check on registration metadata so clearly unsuitable
    /// installations are never executed.
    #[must_use]
    pub fn could_satisfy(&self, spec: &PythonSpec) -> bool {
        if let Some(path) = &spec.path {
            return self.path == *path;
        }
        if let (Some(requested), Some(advertised)) =
            (spec.architecture, self.advertised.architecture)
        {
            if requested != advertised {
                return false;
            }
        }
        [
            (spec.major, self.advertised.major),
            (spec.minor, self.advertised.minor),
            (spec.micro, self.advertised.micro),
        ]
        .into_iter()
        .all(|pair| match pair {
            (Some(requested), Some(advertised)) => requested == advertised,
            _ => true,
        })
    }
}

/// A system-level registry of installed interpreters, such as the Windows
/// `py` launcher.
pub trait PlatformLauncher: Send + Sync {
    /// Whether this host has a launcher at all. When false the launcher
    /// stage is skipped outright.
    fn is_available(&self) -> bool;

    fn entries(&self) -> Vec<LauncherEntry>;
}

/// Stand-in for hosts without a launcher registry.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoLauncher;

impl PlatformLauncher for NoLauncher {
    fn is_available(&self) -> bool {
        false
    }

    fn entries(&self) -> Vec<LauncherEntry> {
        Vec::new()
    }
}

/// The Windows `py` launcher, queried through `py -0p`.
#[derive(Debug, Clone)]
pub struct PyLauncher {
    exe: PathBuf,
}

impl PyLauncher {
    #[must_use]
    pub fn new(exe: PathBuf) -> Self {
        Self { exe }
    }
}

impl PlatformLauncher for PyLauncher {
    fn is_available(&self) -> bool {
        true
    }

    fn entries(&self) -> Vec<LauncherEntry> {
        let output = match std::process::Command::new(&self.exe)
            .arg("-0p")
            .stdin(std::process::Stdio::null())
            .output()
        {
            Ok(output) if output.status.success() => output,
            Ok(output) => {
                tracing::debug!(
                    code = output.status.code().unwrap_or(-1),
                    launcher = %self.exe.display(),
                    "launcher listing failed"
                );
                return Vec::new();
            }
            Err(err) => {
                tracing::debug!(
                    %err,
                    launcher = %self.exe.display(),
                    "launcher could not be started"
                );
                return Vec::new();
            }
        };
        parse_launcher_listing(&String::from_utf8_lossy(&output.stdout))
    }
}

/// Picks the launcher for this host once, at startup.
#[cfg(windows)]
pub fn host_launcher() -> Box<dyn PlatformLauncher> {
    match which::which("py") {
        Ok(exe) => Box::new(PyLauncher::new(exe)),
        Err(_) => Box::new(NoLauncher),
    }
}

/// Picks the launcher for this host once, at startup.
#[cfg(not(windows))]
pub fn host_launcher() -> Box<dyn PlatformLauncher> {
    Box::new(NoLauncher)
}

/// Parses `py -0p` output. Both the current form (` -V:3.12 *  C:\..\python.exe`)
/// and the legacy form (` -3.9-64  C:\..\python.exe *`) are understood; other
/// lines are ignored.
pub fn parse_launcher_listing(stdout: &str) -> Vec<LauncherEntry> {
    stdout
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            let rest = line.strip_prefix('-')?;
            let rest = rest.strip_prefix("V:").unwrap_or(rest);
            let (tag, path) = rest.split_once(char::is_whitespace)?;
            let path = path
                .trim()
                .trim_start_matches('*')
                .trim_end_matches('*')
                .trim();
            if tag.is_empty() || path.is_empty() {
                return None;
            }
            Some(LauncherEntry::new(tag, PathBuf::from(path)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MODERN: &str = " -V:3.12 *        C:\\Users\\dev\\AppData\\Local\\Programs\\Python\\Python312\\python.exe
 -V:3.10-32       C:\\Program Files (x86)\\Python310-32\\python.exe
 -V:ContinuumAnalytics/Anaconda39-64 C:\\Anaconda3\\python.exe
";

    const LEGACY: &str = "Installed Pythons found by py Launcher for Windows
 -3.9-64        C:\\Python39\\python.exe *
 -2.7-32        C:\\Python27\\python.exe
";

    #[test]
    fn parses_modern_listing_with_spaces_in_paths() {
        let entries = parse_launcher_listing(MODERN);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].tag, "3.12");
        let first = entries[0].path.to_string_lossy();
        assert!(first.ends_with("Python312\\python.exe"), "{first}");
        assert_eq!(
            entries[1].path,
            PathBuf::from("C:\\Program Files (x86)\\Python310-32\\python.exe")
        );
        assert_eq!(entries[2].tag, "ContinuumAnalytics/Anaconda39-64");
    }

    #[test]
    fn parses_legacy_listing_and_strips_default_marker() {
        let entries = parse_launcher_listing(LEGACY);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].tag, "3.9-64");
        assert_eq!(entries[0].path, PathBuf::from("C:\\Python39\\python.exe"));
    }

    #[test]
    fn prefilter_uses_advertised_version_and_architecture() {
        let entries = parse_launcher_listing(MODERN);
        let spec = PythonSpec::parse("3.10");
        let eligible: Vec<_> = entries
            .iter()
            .filter(|entry| entry.could_satisfy(&spec))
            .map(|entry| entry.tag.as_str())
            .collect();
        assert_eq!(eligible, vec!["3.10-32"]);

        let spec = PythonSpec::parse("3-64");
        let eligible: Vec<_> = entries
            .iter()
            .filter(|entry| entry.could_satisfy(&spec))
            .map(|entry| entry.tag.as_str())
            .collect();
        assert_eq!(eligible, vec!["3.12", "ContinuumAnalytics/Anaconda39-64"]);
    }

    #[test]
    fn null_launcher_is_unavailable() {
        assert!(!NoLauncher.is_available());
        assert!(NoLauncher.entries().is_empty());
    }
}
