use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Directory constants
// ---------------------------------------------------------------------------

pub const DEPLOY_DIR: &str = ".deploy";
pub const CONFIG_FILE: &str = ".deploy/config.yaml";

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

pub fn config_path(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}

pub fn deploy_dir(root: &Path) -> PathBuf {
    root.join(DEPLOY_DIR)
}

/// Resolve a program name the way a shell would for a command word:
/// anything containing a path separator is taken relative to `root`,
/// bare names are left for `PATH` lookup.
pub fn resolve_program(root: &Path, program: &str) -> Option<PathBuf> {
    if program.contains('/') {
        Some(root.join(program))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_path_is_under_deploy_dir() {
        let root = Path::new("/work/room");
        assert_eq!(
            config_path(root),
            PathBuf::from("/work/room/.deploy/config.yaml")
        );
        assert!(config_path(root).starts_with(deploy_dir(root)));
    }

    #[test]
    fn relative_programs_resolve_against_root() {
        let root = Path::new("/work/room");
        assert_eq!(
            resolve_program(root, "./build.sh"),
            Some(PathBuf::from("/work/room/./build.sh"))
        );
        assert_eq!(resolve_program(root, "near"), None);
    }
}
