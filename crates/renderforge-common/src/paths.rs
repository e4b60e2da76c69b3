//! Path helpers for submission-time paths.
//!
//! Paths arrive from artists' workstations and may use either `/` or `\` as
//! separator. Everything here works on the text, never on the local file
//! system, and always joins with `/` because workers stage files under a
//! forward-slash storage root.

const SEPARATORS: &[char] = &['/', '\\'];

/// Split a path into its non-empty segments, accepting both separators.
///
/// # Examples
///
/// ```
/// use renderforge_common::paths::segments;
///
/// assert_eq!(segments(r"C:\jobs\shotA\scene.blend"), ["C:", "jobs", "shotA", "scene.blend"]);
/// assert_eq!(segments("/jobs//shotA/"), ["jobs", "shotA"]);
/// ```
pub fn segments(path: &str) -> Vec<&str> {
    path.split(SEPARATORS).filter(|s| !s.is_empty()).collect()
}

/// Final segment of a path, or the empty string when there is none.
///
/// ```
/// use renderforge_common::paths::basename;
///
/// assert_eq!(basename("/render/shot/######"), "######");
/// assert_eq!(basename(r"C:\jobs\scene.blend"), "scene.blend");
/// ```
pub fn basename(path: &str) -> &str {
    segments(path).last().copied().unwrap_or("")
}

/// Everything before the final `/` or `\`, or the empty string.
pub fn dirname(path: &str) -> &str {
    match path.rfind(SEPARATORS) {
        Some(0) => &path[..1],
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// The last `n` directory names the file at `path` lives in.
///
/// ```
/// use renderforge_common::paths::last_n_dir_parts;
///
/// assert_eq!(last_n_dir_parts("/projects/film/shot_010/anim.blend", 2), ["film", "shot_010"]);
/// assert!(last_n_dir_parts("/projects/film/anim.blend", 0).is_empty());
/// ```
pub fn last_n_dir_parts(path: &str, n: usize) -> Vec<&str> {
    let segs = segments(path);
    let dirs = &segs[..segs.len().saturating_sub(1)];
    dirs[dirs.len().saturating_sub(n)..].to_vec()
}

/// Join path parts with `/`, skipping empty parts.
///
/// A trailing separator on a part is not doubled.
///
/// ```
/// use renderforge_common::paths::join;
///
/// assert_eq!(join(["{clientStoragePath}", "{jobSubPath}", "startup_script.py"]),
///            "{clientStoragePath}/{jobSubPath}/startup_script.py");
/// assert_eq!(join(["/renders/", "", "job"]), "/renders/job");
/// ```
pub fn join<'a>(parts: impl IntoIterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for part in parts.into_iter().filter(|p| !p.is_empty()) {
        if !out.is_empty() && !out.ends_with(SEPARATORS) {
            out.push('/');
        }
        out.push_str(part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segments_mixed_separators() {
        assert_eq!(
            segments(r"D:\work/shots\010/scene.blend"),
            vec!["D:", "work", "shots", "010", "scene.blend"]
        );
        assert!(segments("").is_empty());
    }

    #[test]
    fn test_basename() {
        assert_eq!(basename("scene.blend"), "scene.blend");
        assert_eq!(basename(""), "");
    }

    #[test]
    fn test_dirname() {
        assert_eq!(dirname("/render/job/######"), "/render/job");
        assert_eq!(dirname(r"C:\render\######"), r"C:\render");
        assert_eq!(dirname("/######"), "/");
        assert_eq!(dirname("######"), "");
    }

    #[test]
    fn test_last_n_dir_parts_more_than_available() {
        assert_eq!(last_n_dir_parts("/a/b/file.blend", 32), vec!["a", "b"]);
        assert!(last_n_dir_parts("file.blend", 3).is_empty());
    }

    #[test]
    fn test_join() {
        assert_eq!(join(["a", "b", "c"]), "a/b/c");
        assert_eq!(join(["/root", "x"]), "/root/x");
        assert_eq!(join(Vec::<&str>::new()), "");
    }
}
