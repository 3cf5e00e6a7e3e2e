use deploy_core::paths;
use std::path::{Path, PathBuf};

/// Resolve the project root the steps run in.
///
/// Priority:
/// 1. `--root` flag / `DEPLOY_ROOT` env var (passed in as `explicit`)
/// 2. Walk upward from `cwd` looking for `.deploy/`
/// 3. Walk upward from `cwd` looking for `.git/`
/// 4. Fall back to `cwd`
///
/// The result is always absolute: steps run with the root as their working
/// directory, so a relative root would be applied twice.
pub fn resolve_root(explicit: Option<&Path>) -> PathBuf {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    resolve_root_from(explicit, &cwd)
}

fn resolve_root_from(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    match explicit {
        Some(p) => cwd.join(p),
        None => find_root_from(cwd),
    }
}

fn find_root_from(start: &Path) -> PathBuf {
    for marker in [paths::DEPLOY_DIR, ".git"] {
        if let Some(dir) = start.ancestors().find(|d| d.join(marker).is_dir()) {
            return dir.to_path_buf();
        }
    }
    start.to_path_buf()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn explicit_root_wins() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root(Some(dir.path()));
        assert_eq!(result, dir.path());
    }

    #[test]
    fn relative_explicit_root_is_anchored_to_cwd() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root_from(Some(Path::new("proj")), dir.path());
        assert!(result.is_absolute());
        assert_eq!(result, dir.path().join("proj"));
    }

    #[test]
    fn absolute_explicit_root_ignores_cwd() {
        let dir = TempDir::new().unwrap();
        let result = resolve_root_from(Some(dir.path()), Path::new("/elsewhere"));
        assert_eq!(result, dir.path());
    }

    #[test]
    fn finds_deploy_dir_above_start() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".deploy")).unwrap();
        let subdir = dir.path().join("src/deep");
        std::fs::create_dir_all(&subdir).unwrap();
        assert_eq!(find_root_from(&subdir), dir.path());
    }

    #[test]
    fn deploy_dir_beats_git_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let contract = dir.path().join("contract");
        std::fs::create_dir_all(contract.join(".deploy")).unwrap();
        let src = contract.join("src");
        std::fs::create_dir_all(&src).unwrap();
        assert_eq!(find_root_from(&src), contract);
    }

    #[test]
    fn falls_back_to_git_root() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        let src = dir.path().join("src");
        std::fs::create_dir_all(&src).unwrap();
        assert_eq!(find_root_from(&src), dir.path());
    }
}
