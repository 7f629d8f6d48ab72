mod path_ext;

pub use path_ext::{PathDisplayExt, best_effort_path_display, to_slash_path};
