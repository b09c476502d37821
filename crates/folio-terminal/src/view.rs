//! Read-only view route: render a persisted file by path.

use folio_platform::Storage;

use crate::persist::load_filesystem_from;

/// Raw content of the file at `segments` in the persisted filesystem.
///
/// `None` when nothing is persisted, the stored tree is corrupt, or the path
/// is missing or names a folder.
pub fn render_view<S: AsRef<str>>(storage: &dyn Storage, segments: &[S]) -> Option<String> {
    let tree = load_filesystem_from(storage)?;
    tree.lookup(segments)?.content().map(str::to_string)
}

/// Split a route such as `/view/projekte/a.md` or `projekte/a.md` into
/// segments, dropping empty parts and a leading `view`.
pub fn route_segments(route: &str) -> Vec<String> {
    let mut parts: Vec<&str> = route.split('/').filter(|s| !s.is_empty()).collect();
    if parts.first() == Some(&"view") {
        parts.remove(0);
    }
    parts.into_iter().map(str::to_string).collect()
}
