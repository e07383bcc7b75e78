// OS compatibility matching between a candidate build and the local platform

/// Distribution names that ship binary-compatible builds and are treated as
/// one family.
const RHEL_FAMILY: &[&str] = &["almalinux", "centos", "rhel", "rocky"];

/// Splits an OS token like `ubuntu22.04` into `("ubuntu", "22.04")`.
/// The version part may be empty (`macos` -> `("macos", "")`).
///
/// Returns `None` when the token does not follow the
/// lowercase-name-plus-dotted-version shape.
pub fn split_os_name_and_version(token: &str) -> Option<(&str, &str)> {
    let version_start = token
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(token.len());
    let (name, version) = token.split_at(version_start);
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_lowercase()) {
        return None;
    }
    if !version.chars().all(|c| c.is_ascii_digit() || c == '.') {
        return None;
    }
    Some((name, version))
}

fn family(name: &str) -> &str {
    if RHEL_FAMILY.contains(&name) {
        "rhel"
    } else {
        name
    }
}

/// Check whether a build targeting `candidate` can serve a host running
/// `requested`.
///
/// Names must belong to the same family (RHEL derivatives alias to one
/// family). Versions match when equal or when one is a dot-boundary prefix of
/// the other: `8` satisfies `8.6` and `22.04` satisfies `22.04.1`, but
/// `22.04` does not satisfy `22.10`. An empty version is a wildcard.
pub fn is_compatible_os(candidate: &str, requested: &str) -> bool {
    let (Some((candidate_name, candidate_version)), Some((requested_name, requested_version))) = (
        split_os_name_and_version(candidate),
        split_os_name_and_version(requested),
    ) else {
        return false;
    };
    if family(candidate_name) != family(requested_name) {
        return false;
    }
    versions_match(candidate_version, requested_version)
}

fn versions_match(a: &str, b: &str) -> bool {
    if a.is_empty() || b.is_empty() || a == b {
        return true;
    }
    boundary_prefix(a, b) || boundary_prefix(b, a)
}

/// True when `longer` continues `shorter` at a dot boundary, so `1.2` is not
/// treated as a prefix of `1.20`.
fn boundary_prefix(shorter: &str, longer: &str) -> bool {
    longer.starts_with(shorter) && longer[shorter.len()..].starts_with('.')
}
