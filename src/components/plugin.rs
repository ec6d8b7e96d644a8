//! Analyzer components loaded from shared libraries.
//!
//! A plugin library exports [`MANIFEST_SYMBOL`] as
//! `extern "C" fn() -> *const PluginManifest`. Each manifest entry describes
//! one text-report component: `analyze` receives the tracks as a
//! streaming-history JSON array (NUL-terminated UTF-8) and returns a
//! NUL-terminated report that the host hands back to `free_text`.

use std::ffi::{CStr, CString, c_char};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use libloading::Library;
use thiserror::Error;

use crate::library::{HistoryEntry, Track};

use super::report::Report;
use super::{AnalysisError, Component, ComponentError};

pub const MANIFEST_SYMBOL: &[u8] = b"spotify_analyzer_components\0";

pub type ManifestFn = unsafe extern "C" fn() -> *const PluginManifest;
pub type AnalyzeFn = unsafe extern "C" fn(tracks_json: *const c_char) -> *mut c_char;
pub type FreeTextFn = unsafe extern "C" fn(text: *mut c_char);

#[repr(C)]
pub struct PluginComponent {
    pub name: *const c_char,
    pub width: u16,
    pub height: u16,
    pub analyze: AnalyzeFn,
    pub free_text: FreeTextFn,
}

#[repr(C)]
pub struct PluginManifest {
    pub count: usize,
    pub components: *const PluginComponent,
}

#[derive(Debug, Error)]
pub enum PluginError {
    #[error(transparent)]
    Library(#[from] libloading::Error),

    #[error("manifest is missing")]
    NullManifest,

    #[error("manifest lists {0} components but no table")]
    NullTable(usize),
}

/// Whether `path` has the platform's shared-library extension.
pub fn is_plugin_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == std::env::consts::DLL_EXTENSION)
}

/// One manifest entry of a loaded library. Cheap to clone; keeps the library
/// mapped for as long as any handle or component built from it lives.
#[derive(Clone)]
pub struct PluginHandle {
    pub name: String,
    pub path: PathBuf,
    index: usize,
    manifest: ManifestFn,
    library: Arc<Library>,
}

/// Read the manifest table.
///
/// # Safety
/// `manifest` must come from a library that is still loaded and follow the
/// plugin ABI described in the module docs.
unsafe fn manifest_entries<'a>(manifest: ManifestFn) -> Result<&'a [PluginComponent], PluginError> {
    let raw = unsafe { manifest() };
    if raw.is_null() {
        return Err(PluginError::NullManifest);
    }
    let manifest = unsafe { &*raw };
    if manifest.count == 0 {
        return Ok(&[]);
    }
    if manifest.components.is_null() {
        return Err(PluginError::NullTable(manifest.count));
    }
    Ok(unsafe { std::slice::from_raw_parts(manifest.components, manifest.count) })
}

fn entry_name(entry: &PluginComponent) -> Option<String> {
    if entry.name.is_null() {
        return None;
    }
    let name = unsafe { CStr::from_ptr(entry.name) }.to_str().ok()?.trim();
    (!name.is_empty()).then(|| name.to_string())
}

fn open_library(path: &Path) -> Result<Vec<PluginHandle>, PluginError> {
    let library = unsafe { Library::new(path) }?;
    let manifest: ManifestFn = unsafe { *library.get::<ManifestFn>(MANIFEST_SYMBOL)? };
    let library = Arc::new(library);

    let entries = unsafe { manifest_entries(manifest) }?;
    let mut handles = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match entry_name(entry) {
            Some(name) => handles.push(PluginHandle {
                name,
                path: path.to_path_buf(),
                index,
                manifest,
                library: Arc::clone(&library),
            }),
            None => {
                tracing::warn!("skipping unnamed component #{index} in {}", path.display());
            }
        }
    }
    Ok(handles)
}

/// Load every plugin library directly inside `dir`.
///
/// Returns the usable components and one message per library that failed.
pub fn load_plugin_dir(dir: &Path) -> (Vec<PluginHandle>, Vec<String>) {
    let mut handles = Vec::new();
    let mut errors = Vec::new();

    let entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(err) => {
            errors.push(format!("{}: {err}", dir.display()));
            return (handles, errors);
        }
    };

    let mut paths: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| path.is_file() && is_plugin_file(path))
        .collect();
    paths.sort();

    for path in paths {
        match open_library(&path) {
            Ok(found) => {
                tracing::info!(
                    "loaded {} component(s) from {}",
                    found.len(),
                    path.display()
                );
                handles.extend(found);
            }
            Err(err) => {
                tracing::error!("error loading module {}: {err}", path.display());
                errors.push(format!("{}: {err}", path.display()));
            }
        }
    }

    (handles, errors)
}

impl PluginHandle {
    /// Build a component from this entry, re-checking the manifest.
    pub fn instantiate(&self) -> Result<DynamicComponent, ComponentError> {
        let unusable = |reason: String| ComponentError::Plugin {
            name: self.name.clone(),
            reason: format!("{} ({reason})", self.path.display()),
        };

        let entries =
            unsafe { manifest_entries(self.manifest) }.map_err(|err| unusable(err.to_string()))?;
        let entry = entries
            .get(self.index)
            .ok_or_else(|| unusable(format!("entry #{} disappeared", self.index)))?;
        if entry_name(entry).as_deref() != Some(self.name.as_str()) {
            return Err(unusable(format!("entry #{} was renamed", self.index)));
        }

        Ok(DynamicComponent {
            name: self.name.clone(),
            size: (entry.width, entry.height),
            analyze: entry.analyze,
            free_text: entry.free_text,
            _library: Arc::clone(&self.library),
        })
    }
}

pub struct DynamicComponent {
    name: String,
    size: (u16, u16),
    analyze: AnalyzeFn,
    free_text: FreeTextFn,
    _library: Arc<Library>,
}

impl Component for DynamicComponent {
    fn name(&self) -> &str {
        &self.name
    }

    fn size(&self) -> (u16, u16) {
        match self.size {
            (0, _) | (_, 0) => super::DEFAULT_SIZE,
            size => size,
        }
    }

    fn analyze(
        &self,
        tracks: &[Track],
        _options: &[super::OptionValue],
    ) -> Result<Report, AnalysisError> {
        let entries: Vec<HistoryEntry> = tracks.iter().map(Track::to_entry).collect();
        let json =
            serde_json::to_string(&entries).map_err(|err| AnalysisError::Plugin(err.to_string()))?;
        let json = CString::new(json).map_err(|err| AnalysisError::Plugin(err.to_string()))?;

        let raw = unsafe { (self.analyze)(json.as_ptr()) };
        if raw.is_null() {
            return Err(AnalysisError::Plugin(format!(
                "{} returned no report",
                self.name
            )));
        }
        let text = unsafe { CStr::from_ptr(raw) }.to_string_lossy().into_owned();
        unsafe { (self.free_text)(raw) };

        Ok(Report::Text(text))
    }
}
