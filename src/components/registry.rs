use std::collections::BTreeMap;
use std::path::Path;

use crate::config::Settings;

use super::builtin::{
    ArtistsPlot, MonthlyListens, PeakArtistsPlot, TopArtistsByDuration, TopArtistsByListens,
    TotalTracks, WeeklyColorMesh,
};
use super::plugin::load_plugin_dir;
use super::{Component, ComponentError};

pub type ComponentFactory = Box<dyn Fn() -> Result<Box<dyn Component>, ComponentError>>;

/// Display name -> constructor, listed in name order.
#[derive(Default)]
pub struct ComponentRegistry {
    factories: BTreeMap<String, ComponentFactory>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in component.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register_default::<ArtistsPlot>();
        registry.register_default::<MonthlyListens>();
        registry.register_default::<PeakArtistsPlot>();
        registry.register_default::<TopArtistsByDuration>();
        registry.register_default::<TopArtistsByListens>();
        registry.register_default::<TotalTracks>();
        registry.register_default::<WeeklyColorMesh>();
        registry
    }

    /// Built-ins plus the plugins found in `component_directory`, if set,
    /// along with the plugin load errors.
    pub fn from_settings(settings: &Settings) -> (Self, Vec<String>) {
        let mut registry = Self::with_builtins();
        let errors = match &settings.component_directory {
            Some(dir) => registry.load_plugins(dir),
            None => Vec::new(),
        };
        (registry, errors)
    }

    /// Add or replace the constructor registered under `name`.
    pub fn register(&mut self, name: impl Into<String>, factory: ComponentFactory) {
        self.factories.insert(name.into(), factory);
    }

    pub fn register_default<C>(&mut self)
    where
        C: Component + Default + 'static,
    {
        let name = C::default().name().to_string();
        self.register(
            name,
            Box::new(|| -> Result<Box<dyn Component>, ComponentError> {
                Ok(Box::new(C::default()))
            }),
        );
    }

    /// Register every component exported by the libraries in `dir`.
    ///
    /// Returns one message per library that could not be loaded.
    pub fn load_plugins(&mut self, dir: &Path) -> Vec<String> {
        let (handles, errors) = load_plugin_dir(dir);
        for handle in handles {
            let name = handle.name.clone();
            self.register(
                name,
                Box::new(move || {
                    handle
                        .instantiate()
                        .map(|component| Box::new(component) as Box<dyn Component>)
                }),
            );
        }
        errors
    }

    pub fn names(&self) -> Vec<String> {
        self.factories.keys().cloned().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Component>, ComponentError> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| ComponentError::Unknown(name.to_string()))?;
        factory()
    }
}
