use std::path::{Component, Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{RelayError, RelayResult};

/// How user-supplied names are allowed to land relative to the root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathPolicy {
    /// Names are used as given, `..` may leave the root.
    #[default]
    Trusted,
    /// Anything that resolves outside the root is rejected.
    Confined,
}

impl std::str::FromStr for PathPolicy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "trusted" => Ok(PathPolicy::Trusted),
            "confined" => Ok(PathPolicy::Confined),
            other => Err(format!("unknown path policy `{other}`")),
        }
    }
}

/// Joins `name` onto `root` lexically: a leading `/` stays under the root,
/// `.` is dropped and `..` pops one component.
pub fn join_lexical(root: &Path, name: &str) -> PathBuf {
    let mut resolved = root.to_path_buf();
    for component in Path::new(name).components() {
        match component {
            Component::Prefix(_) | Component::RootDir | Component::CurDir => {}
            Component::ParentDir => {
                resolved.pop();
            }
            Component::Normal(part) => resolved.push(part),
        }
    }
    resolved
}

#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    policy: PathPolicy,
}

impl PathResolver {
    pub fn new(root: impl Into<PathBuf>, policy: PathPolicy) -> Self {
        Self {
            root: root.into(),
            policy,
        }
    }

    pub fn resolve(&self, name: &str) -> RelayResult<PathBuf> {
        let resolved = join_lexical(&self.root, name);
        if self.policy == PathPolicy::Confined && !resolved.starts_with(&self.root) {
            return Err(RelayError::PathEscapesRoot(name.to_string()));
        }
        Ok(resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_keeps_absolute_names_under_root() {
        let root = Path::new("/srv/chat");
        assert_eq!(join_lexical(root, "/etc/hosts"), PathBuf::from("/srv/chat/etc/hosts"));
        assert_eq!(join_lexical(root, "./a/./b.txt"), PathBuf::from("/srv/chat/a/b.txt"));
    }

    #[test]
    fn parent_components_pop_lexically() {
        let root = Path::new("/srv/chat");
        assert_eq!(join_lexical(root, "missing/../b.txt"), PathBuf::from("/srv/chat/b.txt"));
        assert_eq!(join_lexical(root, "../outside.txt"), PathBuf::from("/srv/outside.txt"));
    }

    #[test]
    fn trusted_policy_allows_traversal() {
        let resolver = PathResolver::new("/srv/chat", PathPolicy::Trusted);
        assert_eq!(
            resolver.resolve("../../x").unwrap(),
            PathBuf::from("/x")
        );
    }

    #[test]
    fn confined_policy_rejects_traversal() {
        let resolver = PathResolver::new("/srv/chat", PathPolicy::Confined);
        assert!(matches!(
            resolver.resolve("../x"),
            Err(RelayError::PathEscapesRoot(name)) if name == "../x"
        ));
        assert!(resolver.resolve("sub/../x").is_ok());
    }

    #[test]
    fn policy_parses_from_env_strings() {
        assert_eq!("Confined".parse::<PathPolicy>(), Ok(PathPolicy::Confined));
        assert_eq!(" trusted ".parse::<PathPolicy>(), Ok(PathPolicy::Trusted));
        assert!("open".parse::<PathPolicy>().is_err());
    }
}
