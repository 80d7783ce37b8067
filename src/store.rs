use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};

use crate::model::{BackendConfig, ConsoleConfig};

const STORE_DIR: &str = ".realmdeck";

/// Local console state: a `.realmdeck/config.json` discovered upward from the
/// working directory. Holds the backend connection only; everything else the
/// console shows is owned by the backend.
#[derive(Clone)]
pub struct ConsoleStore {
    root: PathBuf,
}

impl ConsoleStore {
    pub fn deck_dir(root: &Path) -> PathBuf {
        root.join(STORE_DIR)
    }

    pub fn open(console_root: &Path) -> Result<Self> {
        let root = Self::deck_dir(console_root);
        if !root.is_dir() {
            return Err(anyhow!(
                "No {} directory found at {} (run `realmdeck init`)",
                STORE_DIR,
                root.display()
            ));
        }
        Ok(Self { root })
    }

    pub fn init(console_root: &Path, force: bool) -> Result<Self> {
        let root = Self::deck_dir(console_root);
        if root.exists() && !force {
            return Err(anyhow!(
                "{} already exists at {} (use --force to re-init)",
                STORE_DIR,
                root.display()
            ));
        }

        fs::create_dir_all(&root).context("create console dir")?;

        let cfg = ConsoleConfig {
            version: 1,
            backend: None,
        };
        let bytes = serde_json::to_vec_pretty(&cfg).context("serialize console config")?;
        write_atomic(&root.join("config.json"), &bytes).context("write config.json")?;

        Ok(Self { root })
    }

    pub fn discover(start: &Path) -> Result<Self> {
        let start = start
            .canonicalize()
            .with_context(|| format!("canonicalize {}", start.display()))?;
        for dir in start.ancestors() {
            if Self::deck_dir(dir).is_dir() {
                return Self::open(dir);
            }
        }
        Err(anyhow!(
            "No {} directory found (run `realmdeck init`)",
            STORE_DIR
        ))
    }

    pub fn read_config(&self) -> Result<ConsoleConfig> {
        let bytes = fs::read(self.root.join("config.json")).context("read config.json")?;
        serde_json::from_slice(&bytes).context("parse config.json")
    }

    pub fn write_config(&self, cfg: &ConsoleConfig) -> Result<()> {
        let bytes = serde_json::to_vec_pretty(cfg).context("serialize console config")?;
        write_atomic(&self.root.join("config.json"), &bytes).context("write config.json")?;
        Ok(())
    }

    pub fn set_backend(&self, backend: BackendConfig) -> Result<()> {
        let mut cfg = self.read_config()?;
        cfg.backend = Some(backend);
        self.write_config(&cfg)
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
