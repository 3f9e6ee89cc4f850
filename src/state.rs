//! Theme session: resolves the starting parameters and persists every change.
//!
//! Load order is config defaults, then the saved state file, then the share
//! query, each decoded on top of the previous result. A query string always
//! wins over saved state. Every change rewrites the state file and yields a
//! fresh share link.

use crate::codec::{self, FlatRecord};
use crate::compiler::{self, Palette};
use crate::config::Config;
use crate::params::ThemeParameters;
use crate::tokens::{PropertyMap, RootAttributes};
use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Read the persisted flat record. Absent or corrupt files count as "no
/// saved state".
pub fn load_state(path: &Path) -> Option<FlatRecord> {
    let contents = match fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) => {
            tracing::debug!("No saved state at {:?}: {}", path, e);
            return None;
        }
    };

    match serde_json::from_str::<BTreeMap<String, String>>(&contents) {
        Ok(map) => Some(FlatRecord::from_map(&map)),
        Err(e) => {
            tracing::warn!("Ignoring corrupt saved state {:?}: {}", path, e);
            None
        }
    }
}

/// Write `params` as a JSON object of short keys.
pub fn save_state(path: &Path, params: &ThemeParameters) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&codec::encode(params).to_map())
        .context("Failed to serialize theme state")?;
    fs::write(path, json).with_context(|| format!("Failed to write {:?}", path))?;
    tracing::debug!("Saved theme state to {:?}", path);
    Ok(())
}

/// Starting parameters from defaults, saved state and an optional query.
pub fn resolve_initial(
    defaults: &ThemeParameters,
    saved: Option<&FlatRecord>,
    query: Option<&FlatRecord>,
) -> ThemeParameters {
    let mut params = *defaults;
    if let Some(saved) = saved {
        params = codec::decode(saved, &params);
    }
    if let Some(query) = query.filter(|q| !q.is_empty()) {
        params = codec::decode(query, &params);
    }
    params.sanitized()
}

/// Current theme plus where its state is written
#[derive(Debug, Clone)]
pub struct ThemeSession {
    params: ThemeParameters,
    state_path: Option<PathBuf>,
    base_path: String,
}

impl ThemeSession {
    /// Open a session for `dir`. Pass `persist = false` to never touch the
    /// state file.
    pub fn open(config: &Config, dir: &Path, query: Option<&str>, persist: bool) -> Self {
        let state_path = Config::state_path(dir);
        let saved = load_state(&state_path);
        let query = query.map(FlatRecord::parse_query);
        let params = resolve_initial(&config.defaults, saved.as_ref(), query.as_ref());
        tracing::info!(
            "Session opened (saved state: {}, query: {})",
            saved.is_some(),
            query.as_ref().is_some_and(|q| !q.is_empty())
        );

        Self {
            params,
            state_path: persist.then_some(state_path),
            base_path: config.share.base_path.clone(),
        }
    }

    pub fn params(&self) -> &ThemeParameters {
        &self.params
    }

    /// Replace the parameters and persist them. A failed write is logged and
    /// reported, the in-memory parameters are updated regardless.
    pub fn set(&mut self, params: ThemeParameters) -> Result<()> {
        self.params = params.sanitized();
        self.persist()
    }

    pub fn persist(&self) -> Result<()> {
        match &self.state_path {
            Some(path) => save_state(path, &self.params),
            None => Ok(()),
        }
    }

    pub fn compile(&self) -> PropertyMap {
        compiler::compile(&self.params)
    }

    pub fn palette(&self) -> Palette {
        compiler::derive_palette(&self.params)
    }

    pub fn attributes(&self) -> RootAttributes {
        RootAttributes::from_params(&self.params)
    }

    pub fn share_link(&self) -> String {
        codec::share_link(&self.base_path, &self.params)
    }
}
