use std::path::{Path, PathBuf};
use tokio::fs;

use crate::config::CACHE_ENCODING;
use crate::parse::RawPage;

/// The last fetched results page, kept as utf-8 text on disk.
#[derive(Debug, Clone)]
pub struct PageCache(PathBuf);

impl PageCache {
    pub fn new(p: impl AsRef<Path>) -> Self {
        Self(p.as_ref().to_owned())
    }

    #[cfg(test)]
    pub fn path(&self) -> &Path {
        &self.0
    }

    /// Reads the snapshot as raw bytes. A file that isn't utf-8 fails when it's parsed.
    pub async fn load(&self) -> crate::Result<RawPage> {
        let bytes = fs::read(&self.0).await?;
        log::info!("loaded cached page from {}", self.0.display());
        Ok(RawPage::new(bytes, CACHE_ENCODING))
    }

    /// Overwrites any previous snapshot.
    pub async fn save(&self, page: &RawPage) -> crate::Result<()> {
        let text = page.decode()?;
        fs::write(&self.0, text.as_bytes()).await?;
        log::info!("saved page snapshot to {}", self.0.display());
        Ok(())
    }
}
