use std::path::{Component, Path, PathBuf};

/// Renders a path for error messages and logs.
///
/// Existing paths are canonicalized. Paths that do not exist yet, such as a
/// tree root that was never generated, are made absolute and have `.` and
/// `..` resolved lexically.
pub fn best_effort_path_display(path: &Path) -> String {
    let resolved = path.canonicalize().unwrap_or_else(|_| {
        let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
        resolve_dots(&absolute)
    });
    resolved.display().to_string()
}

fn resolve_dots(path: &Path) -> PathBuf {
    path.components()
        .fold(Vec::new(), |mut kept, component| {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    if matches!(kept.last(), Some(Component::Normal(_))) {
                        kept.pop();
                    }
                }
                other => kept.push(other),
            }
            kept
        })
        .into_iter()
        .collect()
}

/// Joins the normal components of a relative path with `/`, regardless of the
/// platform separator. Returns `None` for paths that escape their base
/// (`..`), are absolute, or are not valid UTF-8.
pub fn to_slash_path(path: &Path) -> Option<String> {
    let mut parts = Vec::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => parts.push(part.to_str()?),
            Component::CurDir => {}
            Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
        }
    }
    Some(parts.join("/"))
}

pub trait PathDisplayExt {
    fn best_effort_path_display(&self) -> String;
}

impl<P: AsRef<Path> + ?Sized> PathDisplayExt for P {
    fn best_effort_path_display(&self) -> String {
        best_effort_path_display(self.as_ref())
    }
}
