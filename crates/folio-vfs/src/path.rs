//! Path resolution over segment lists.

use crate::node::FsNode;

/// Resolve `input` against the current folder into a normalized segment list.
///
/// A leading `/` (or `~` / `~/`) starts at the root; anything else starts
/// from a copy of `current`. Empty and `.` segments are dropped, `..` pops
/// one segment and clamps at the root. Nothing is checked for existence.
pub fn resolve(input: &str, current: &[String]) -> Vec<String> {
    let (mut segments, rest) = if input == "~" {
        (Vec::new(), "")
    } else if let Some(rest) = input.strip_prefix("~/") {
        (Vec::new(), rest)
    } else if input.starts_with('/') {
        (Vec::new(), input)
    } else {
        (current.to_vec(), input)
    };

    for component in rest.split('/') {
        match component {
            "" | "." => {},
            ".." => {
                segments.pop();
            },
            other => segments.push(other.to_string()),
        }
    }
    segments
}

/// Walk the tree from `root`. Returns `None` as soon as a segment is missing
/// or an intermediate node is a file.
pub fn lookup<'a, S: AsRef<str>>(segments: &[S], root: &'a FsNode) -> Option<&'a FsNode> {
    let mut node = root;
    for segment in segments {
        node = node.children()?.get(segment.as_ref())?;
    }
    Some(node)
}

/// Absolute display form: `/` for the root, `/a/b` otherwise.
pub fn display<S: AsRef<str>>(segments: &[S]) -> String {
    if segments.is_empty() {
        return "/".to_string();
    }
    let mut out = String::new();
    for segment in segments {
        out.push('/');
        out.push_str(segment.as_ref());
    }
    out
}

/// Prompt form: `~` for the root, `~/a/b` otherwise.
pub fn prompt_path<S: AsRef<str>>(segments: &[S]) -> String {
    if segments.is_empty() {
        "~".to_string()
    } else {
        format!("~{}", display(segments))
    }
}

/// Split a segment list into its parent and final name.
pub fn split_last(segments: &[String]) -> Option<(&[String], &str)> {
    segments
        .split_last()
        .map(|(name, parent)| (parent, name.as_str()))
}
