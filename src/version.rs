//! Ordering of release version strings.

use std::cmp::Ordering;

use semver::Prerelease;

/// Removes every leading 'v' from a tag or version ("v2.3.0" -> "2.3.0").
pub fn strip_v_prefix(version: &str) -> &str {
    version.trim().trim_start_matches('v')
}

/// Returns true if `candidate` is a later version than `current`.
pub fn is_newer(candidate: &str, current: &str) -> bool {
    compare_versions(candidate, current) == Ordering::Greater
}

/// Compares two version strings.
///
/// Both sides reduce to the same key: the dot-separated numeric core, where missing or
/// trailing zero segments don't count ("1.2" == "1.2.0" == "1.2.0.0"), followed by the
/// prerelease after '-' under semver precedence ("1.0.0-beta.2" < "1.0.0"). Build
/// metadata after '+' is ignored.
pub fn compare_versions(a: &str, b: &str) -> Ordering {
    VersionKey::parse(a).cmp(&VersionKey::parse(b))
}

#[derive(Debug, PartialEq, Eq, PartialOrd, Ord)]
struct VersionKey {
    core: Vec<u64>,
    // `Prerelease::EMPTY` sorts above every non-empty prerelease.
    pre: Prerelease,
}

impl VersionKey {
    fn parse(version: &str) -> Self {
        let version = strip_v_prefix(version);
        let version = version.split('+').next().unwrap_or(version);
        let (core, pre) = version.split_once('-').unwrap_or((version, ""));

        let mut core: Vec<u64> = core.split('.').map(leading_number).collect();
        while core.last() == Some(&0) {
            core.pop();
        }

        Self {
            core,
            pre: parse_prerelease(pre),
        }
    }
}

fn leading_number(segment: &str) -> u64 {
    let digits: String = segment.chars().take_while(char::is_ascii_digit).collect();
    digits.parse().unwrap_or(0)
}

/// Parses a prerelease, coercing tags semver would reject ("RC_1", "beta..01") into a
/// valid one: other characters become '-', empty identifiers are dropped, numeric
/// identifiers lose leading zeros.
fn parse_prerelease(pre: &str) -> Prerelease {
    if let Ok(parsed) = Prerelease::new(pre) {
        return parsed;
    }

    let identifiers: Vec<String> = pre
        .split('.')
        .filter(|ident| !ident.is_empty())
        .map(|ident| {
            let ident: String = ident
                .chars()
                .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
                .collect();
            if ident.chars().all(|c| c.is_ascii_digit()) {
                let trimmed = ident.trim_start_matches('0');
                if trimmed.is_empty() { "0".to_string() } else { trimmed.to_string() }
            } else {
                ident
            }
        })
        .collect();

    Prerelease::new(&identifiers.join(".")).unwrap_or(Prerelease::EMPTY)
}
