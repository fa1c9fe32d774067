use std::path::Path;

use tokio::fs;

use crate::error::RelayResult;

use super::paths::PathResolver;

pub const PLACEHOLDER_CONTENT: &str = "<!-- Created by chat command -->";

/// Executes file commands against the working root.
///
/// Every operation returns `Ok` with the text to send back, including when a
/// precondition is not met ("does not exist", "already exists"). `Err` is
/// reserved for OS failures and path policy rejections. Existence checks and
/// the following operation are not atomic.
#[derive(Debug, Clone)]
pub struct FileExecutor {
    resolver: PathResolver,
}

impl FileExecutor {
    pub fn new(resolver: PathResolver) -> Self {
        Self { resolver }
    }

    pub async fn create_file(&self, name: &str) -> RelayResult<String> {
        let path = self.resolver.resolve(name)?;
        ensure_parent(&path).await?;
        if exists(&path).await {
            return Ok(format!("File '{name}' already exists."));
        }
        fs::write(&path, PLACEHOLDER_CONTENT).await?;
        Ok(format!("File '{name}' created successfully."))
    }

    pub async fn write_file(&self, name: &str, content: &str) -> RelayResult<String> {
        let path = self.resolver.resolve(name)?;
        ensure_parent(&path).await?;
        fs::write(&path, content).await?;
        Ok(format!("Content written to file '{name}' successfully."))
    }

    pub async fn read_file(&self, name: &str) -> RelayResult<String> {
        let path = self.resolver.resolve(name)?;
        if !exists(&path).await {
            return Ok(missing_file(name));
        }
        let bytes = fs::read(&path).await?;
        let content = String::from_utf8_lossy(&bytes);
        Ok(format!("Content of file '{name}':\n{content}"))
    }

    pub async fn list_folder(&self, folder: &str) -> RelayResult<String> {
        let path = self.resolver.resolve(folder)?;
        let is_dir = match fs::symlink_metadata(&path).await {
            Ok(meta) => meta.is_dir(),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => false,
            Err(err) => return Err(err.into()),
        };
        if !is_dir {
            return Ok(format!("Folder '{folder}' does not exist."));
        }

        let mut entries = fs::read_dir(&path).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort();
        Ok(format!("Files in folder '{folder}':\n{}", names.join("\n")))
    }

    pub async fn delete_file(&self, name: &str) -> RelayResult<String> {
        let path = self.resolver.resolve(name)?;
        if !exists(&path).await {
            return Ok(missing_file(name));
        }
        fs::remove_file(&path).await?;
        Ok(format!("File '{name}' deleted successfully."))
    }

    pub async fn clear_file(&self, name: &str) -> RelayResult<String> {
        let path = self.resolver.resolve(name)?;
        if !exists(&path).await {
            return Ok(missing_file(name));
        }
        fs::write(&path, "").await?;
        Ok(format!("File '{name}' cleared successfully."))
    }

    pub async fn rename_file(&self, old_name: &str, new_name: &str) -> RelayResult<String> {
        let old_path = self.resolver.resolve(old_name)?;
        let new_path = self.resolver.resolve(new_name)?;
        if !exists(&old_path).await {
            return Ok(missing_file(old_name));
        }
        fs::rename(&old_path, &new_path).await?;
        Ok(format!(
            "File '{old_name}' renamed to '{new_name}' successfully."
        ))
    }

    pub async fn move_file(&self, old_name: &str, new_location: &str) -> RelayResult<String> {
        let old_path = self.resolver.resolve(old_name)?;
        let new_path = self.resolver.resolve(new_location)?;
        if !exists(&old_path).await {
            return Ok(missing_file(old_name));
        }
        ensure_parent(&new_path).await?;
        fs::rename(&old_path, &new_path).await?;
        Ok(format!(
            "File '{old_name}' moved to '{new_location}' successfully."
        ))
    }
}

fn missing_file(name: &str) -> String {
    format!("File '{name}' does not exist.")
}

/// A failed check (permission denied, a file used as a directory) counts as
/// missing, so the caller replies "does not exist" instead of an error.
async fn exists(path: &Path) -> bool {
    match fs::try_exists(path).await {
        Ok(found) => found,
        Err(err) => {
            log::debug!("Existence check failed for {}: {err}", path.display());
            false
        }
    }
}

async fn ensure_parent(path: &Path) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    Ok(())
}
