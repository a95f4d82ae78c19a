use crate::commands::Out;
use crate::{Config, Result};
use anyhow::Context;
use std::path::Path;

/// Creates the home directory and an initial `config.json` with default settings.
///
/// # Arguments
/// - `home` - The directory that will hold the configuration, e.g. `$HOME/txn-tracker`
///
/// # Errors
/// - Returns an error if a config file already exists or any file operations fail.
pub async fn init(home: &Path) -> Result<Out<()>> {
    let config = Config::create(home)
        .await
        .context("Unable to create the home directory and config")?;
    Ok(format!(
        "Created {} in {}",
        config.config_path().display(),
        config.root().display()
    )
    .into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_init() {
        let dir = TempDir::new().unwrap();
        let home = dir.path().join("home");
        let out = init(&home).await.unwrap();
        assert!(home.join("config.json").is_file());
        let root = home.canonicalize().unwrap();
        assert!(out.message().starts_with("Created "));
        assert!(out.message().ends_with(&format!(" in {}", root.display())));
        assert!(init(&home).await.is_err());
    }
}
