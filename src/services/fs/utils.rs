//! Platform probes and path helpers shared by the entity types.

use std::fs;
use std::path::{Path, PathBuf};

use rand::seq::SliceRandom;

use crate::core::config::{NameConfig, DEFAULT_NAME_ALPHABET, DEFAULT_NAME_LENGTH};
use crate::core::errors::{Error, Result};

/// Whether the host follows POSIX conventions (paths, ownership, user database).
pub fn is_posix_compliant() -> bool {
    cfg!(unix)
}

/// Whether the process runs with root privileges.
///
/// Uses the effective user id so setuid execution is reported correctly. A uid
/// other than 0 still counts as root when the user database names it `root`.
#[cfg(unix)]
pub fn is_running_as_root_user() -> Result<bool> {
    use nix::unistd::{geteuid, User};

    let euid = geteuid();
    if euid.is_root() {
        return Ok(true);
    }
    let user = User::from_uid(euid)?;
    Ok(user.is_some_and(|u| u.name.eq_ignore_ascii_case("root")))
}

#[cfg(not(unix))]
pub fn is_running_as_root_user() -> Result<bool> {
    Err(Error::NotSupported("root user detection"))
}

/// Lexically normalizes `path` without touching the filesystem.
///
/// On POSIX hosts every run of `/` or `\` becomes a single `/` before `.` and
/// `..` segments are resolved, so `//a\\b\\c` yields `/a/b/c`. Elsewhere the
/// platform's own component rules apply.
pub fn normalize_path(path: &str) -> String {
    // Only ASCII separators are rewritten, so UTF-8 input stays UTF-8.
    normalize_os_path(Path::new(path))
        .to_string_lossy()
        .into_owned()
}

/// [`normalize_path`] for arbitrary platform paths, including names that are
/// not valid UTF-8.
#[cfg(unix)]
pub fn normalize_os_path(path: &Path) -> PathBuf {
    use std::ffi::OsString;
    use std::os::unix::ffi::{OsStrExt, OsStringExt};

    let bytes: Vec<u8> = path
        .as_os_str()
        .as_bytes()
        .iter()
        .map(|b| if *b == b'\\' { b'/' } else { *b })
        .collect();
    let rooted = bytes.first() == Some(&b'/');
    let mut parts: Vec<&[u8]> = Vec::new();

    for segment in bytes.split(|b| *b == b'/') {
        match segment {
            b"" | b"." => {}
            b".." => {
                if parts.last().is_some_and(|last| *last != b"..") {
                    parts.pop();
                } else if !rooted {
                    parts.push(b"..");
                }
            }
            name => parts.push(name),
        }
    }

    let mut out = Vec::with_capacity(bytes.len());
    if rooted {
        out.push(b'/');
    }
    out.extend_from_slice(&parts.join(&b'/'));
    if out.is_empty() {
        out.push(b'.');
    }
    PathBuf::from(OsString::from_vec(out))
}

#[cfg(not(unix))]
pub fn normalize_os_path(path: &Path) -> PathBuf {
    use std::path::Component;

    let mut out = PathBuf::new();
    let mut depth = 0usize;

    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(std::path::MAIN_SEPARATOR_STR),
            Component::CurDir => {}
            Component::ParentDir => {
                if depth > 0 {
                    out.pop();
                    depth -= 1;
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(name) => {
                out.push(name);
                depth += 1;
            }
        }
    }

    if out.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        out
    }
}

/// Makes `path` absolute against the working directory, then normalizes it.
pub(crate) fn resolve_path(path: &Path) -> Result<PathBuf> {
    let absolute = std::path::absolute(path)?;
    Ok(normalize_os_path(&absolute))
}

/// Parent of `path`, or `path` itself when it has none (the root).
pub(crate) fn parent_of(path: &Path) -> PathBuf {
    path.parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| path.to_path_buf())
}

/// Walks `levels` parents up from `path`; `0` is treated as `1`.
pub(crate) fn ancestor_of(path: &Path, levels: i32) -> Result<PathBuf> {
    if levels < 0 {
        return Err(Error::InvalidValue(format!(
            "levels should be 0 or more, got {levels}"
        )));
    }

    let mut current = path.to_path_buf();
    for _ in 0..levels.max(1) {
        current = parent_of(&current);
    }
    Ok(current)
}

/// Returns a 32 character name of lowercase letters and digits that does not
/// yet exist inside `directory`.
///
/// The check is not atomic with the caller's later use of the name, so a
/// concurrent writer can still claim it first.
pub fn generate_random_name(directory: impl AsRef<Path>) -> String {
    let alphabet: Vec<char> = DEFAULT_NAME_ALPHABET.chars().collect();
    draw_unique_name(directory.as_ref(), DEFAULT_NAME_LENGTH, &alphabet)
}

/// Like [`generate_random_name`] with a caller-chosen length and alphabet.
pub fn generate_random_name_with(
    directory: impl AsRef<Path>,
    config: &NameConfig,
) -> Result<String> {
    if config.length == 0 {
        return Err(Error::InvalidValue("name length must be at least 1".into()));
    }
    let mut alphabet: Vec<char> = config.alphabet.chars().collect();
    alphabet.sort_unstable();
    alphabet.dedup();
    if alphabet.is_empty() {
        return Err(Error::InvalidValue("name alphabet is empty".into()));
    }
    if alphabet.iter().any(|c| *c == '/' || *c == '\\') {
        return Err(Error::InvalidValue(
            "name alphabet must not contain path separators".into(),
        ));
    }
    Ok(draw_unique_name(directory.as_ref(), config.length, &alphabet))
}

fn draw_unique_name(directory: &Path, length: usize, alphabet: &[char]) -> String {
    let mut rng = rand::thread_rng();
    loop {
        let name: String = (0..length)
            .filter_map(|_| alphabet.choose(&mut rng))
            .collect();
        if fs::symlink_metadata(directory.join(&name)).is_err() {
            return name;
        }
        tracing::trace!(name = %name, directory = %directory.display(), "random name collision");
    }
}
