//! Relative path computation between locations in the page hierarchy.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left as-is in a path segment: A-Z a-z 0-9 - . _ ~
const SEGMENT_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Compute the relative link from a page in directory `from` to the file
/// `leaf` in directory `to`.
///
/// Both locations are sequences of directory segments from the site root,
/// not including the file itself. The result unwinds `from` up to the
/// deepest common ancestor with `..` segments, then descends into the rest
/// of `to` and ends with `leaf`. Each segment and the leaf are
/// percent-encoded and joined with `/`, so the result can be used directly as
/// an `href` even when a name contains `#`, `?`, `%` or spaces.
///
/// The common ancestor is the longest index-aligned shared prefix, so the
/// path is always minimal: no `..` is ever followed by a descent into the
/// directory it just left.
///
/// # Examples
///
/// ```
/// use codex_site::relative_path;
///
/// assert_eq!(relative_path(&["docs"], &["docs"], "setup.htm"), "setup.htm");
/// assert_eq!(relative_path(&["docs"], &["api"], "overview.htm"), "../api/overview.htm");
/// assert_eq!(relative_path(&["a", "b"], &["a"], "c.htm"), "../c.htm");
/// ```
pub fn relative_path<F, T>(from: &[F], to: &[T], leaf: &str) -> String
where
    F: AsRef<str>,
    T: AsRef<str>,
{
    let common = from
        .iter()
        .zip(to)
        .take_while(|&(a, b)| a.as_ref() == b.as_ref())
        .count();

    let ups = from.len() - common;
    let mut segments: Vec<String> = Vec::with_capacity(ups + to.len() - common + 1);
    segments.extend(std::iter::repeat_n("..".to_owned(), ups));
    segments.extend(to[common..].iter().map(|segment| encode_segment(segment.as_ref())));
    segments.push(encode_segment(leaf));
    segments.join("/")
}

fn encode_segment(segment: &str) -> String {
    utf8_percent_encode(segment, SEGMENT_ENCODE_SET).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Resolve `relative` against directory `base`, collapsing `..` segments.
    ///
    /// Returns `None` if the path escapes above the root.
    fn resolve(base: &[String], relative: &str) -> Option<Vec<String>> {
        let mut stack = base.to_vec();
        for segment in relative.split('/') {
            match segment {
                ".." => {
                    stack.pop()?;
                }
                "." | "" => {}
                other => stack.push(other.to_owned()),
            }
        }
        Some(stack)
    }

    #[test]
    fn test_same_category() {
        assert_eq!(relative_path(&["docs"], &["docs"], "setup.htm"), "setup.htm");
    }

    #[test]
    fn test_different_category() {
        assert_eq!(
            relative_path(&["docs"], &["api"], "overview.htm"),
            "../api/overview.htm"
        );
    }

    #[test]
    fn test_self_link() {
        assert_eq!(relative_path(&["docs"], &["docs"], "intro.htm"), "intro.htm");
    }

    #[test]
    fn test_disjoint_deep_paths_unwind_fully() {
        assert_eq!(
            relative_path(&["a", "b", "c"], &["x", "y"], "p.htm"),
            "../../../x/y/p.htm"
        );
    }

    #[test]
    fn test_trailing_match_is_not_a_common_ancestor() {
        assert_eq!(relative_path(&["a", "x"], &["b", "x"], "p.htm"), "../../b/x/p.htm");
    }

    #[test]
    fn test_shallow_to_deep() {
        assert_eq!(relative_path(&["a"], &["a", "b", "c"], "p.htm"), "b/c/p.htm");
    }

    #[test]
    fn test_deep_to_shallow() {
        assert_eq!(relative_path(&["a", "b", "c"], &["a"], "p.htm"), "../../p.htm");
    }

    #[test]
    fn test_root_locations() {
        let root: [&str; 0] = [];
        assert_eq!(relative_path(&root, &root, "index.htm"), "index.htm");
        assert_eq!(relative_path(&root, &["docs"], "intro.htm"), "docs/intro.htm");
        assert_eq!(relative_path(&["docs"], &root, "index.htm"), "../index.htm");
    }

    #[test]
    fn test_segments_are_percent_encoded() {
        assert_eq!(relative_path(&["docs"], &["C#"], "linq.htm"), "../C%23/linq.htm");
        assert_eq!(relative_path(&["docs"], &["docs"], "50%.htm"), "50%25.htm");
        assert_eq!(
            relative_path(&["docs"], &["q&a"], "why?.htm"),
            "../q%26a/why%3F.htm"
        );
    }

    #[test]
    fn test_unicode_and_spaces_are_percent_encoded() {
        assert_eq!(
            relative_path(&["docs"], &["my notes"], "caf\u{e9}.htm"),
            "../my%20notes/caf%C3%A9.htm"
        );
    }

    #[test]
    fn test_common_prefix_compares_raw_names() {
        assert_eq!(relative_path(&["C#"], &["C#"], "linq.htm"), "linq.htm");
    }

    #[test]
    fn test_owned_segments() {
        let from = vec!["docs".to_owned()];
        let to = vec!["api".to_owned()];
        assert_eq!(relative_path(&from, &to, "overview.htm"), "../api/overview.htm");
    }

    fn location() -> impl Strategy<Value = Vec<String>> {
        prop::collection::vec(prop::sample::select(vec!["a", "b", "c"]), 0..5)
            .prop_map(|segments| segments.into_iter().map(str::to_owned).collect())
    }

    proptest! {
        #[test]
        fn prop_resolves_to_target(from in location(), to in location()) {
            let result = relative_path(&from, &to, "page.htm");

            let mut expected = to.clone();
            expected.push("page.htm".to_owned());
            prop_assert_eq!(resolve(&from, &result), Some(expected));
        }

        #[test]
        fn prop_no_redundant_round_trip(from in location(), to in location()) {
            let result = relative_path(&from, &to, "page.htm");
            let segments: Vec<&str> = result.split('/').collect();

            // Walk the path, tracking the directory each `..` leaves.
            let mut dir = from.clone();
            let mut left: Option<String> = None;
            for segment in segments {
                if segment == ".." {
                    left = dir.pop();
                } else {
                    prop_assert_ne!(left.as_deref(), Some(segment));
                    left = None;
                    dir.push(segment.to_owned());
                }
            }
        }

        #[test]
        fn prop_up_count_matches_depth_difference(from in location(), to in location()) {
            let result = relative_path(&from, &to, "page.htm");
            let common = from.iter().zip(&to).take_while(|(a, b)| a == b).count();
            let ups = result.split('/').filter(|s| *s == "..").count();
            prop_assert_eq!(ups, from.len() - common);
        }
    }
}
