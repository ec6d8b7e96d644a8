//! Application model: `App` coordinates the loaded tracks, the active
//! component, its options, the filters and the popups drawn over the UI.

use std::path::{Path, PathBuf};

use tracing::{error, info, warn};

use crate::components::{
    AnalysisError, Component, ComponentRegistry, DEFAULT_SIZE, OptionValue, Report,
};
use crate::filters::{DateRangeFilter, TimeZoneFilter, parse_time_zone};
use crate::library::{Track, load_tracks};

use super::options::OptionState;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PopupKind {
    Warning,
    Error,
}

/// Message shown over the UI until the next key press.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Popup {
    pub kind: PopupKind,
    pub message: String,
}

/// Filter fields below the component options.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FilterField {
    Start,
    End,
    TimeZone,
}

impl FilterField {
    pub const ALL: [FilterField; 3] = [Self::Start, Self::End, Self::TimeZone];

    pub fn label(self) -> &'static str {
        match self {
            Self::Start => "From",
            Self::End => "To",
            Self::TimeZone => "Time zone",
        }
    }
}

/// Text typed into the filter fields; blank means "no filter".
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Filters {
    pub start: String,
    pub end: String,
    pub time_zone: String,
}

impl Filters {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Start => &self.start,
            FilterField::End => &self.end,
            FilterField::TimeZone => &self.time_zone,
        }
    }

    fn set(&mut self, field: FilterField, text: &str) {
        let text = text.trim().to_string();
        match field {
            FilterField::Start => self.start = text,
            FilterField::End => self.end = text,
            FilterField::TimeZone => self.time_zone = text,
        }
    }

    /// Apply the date range, then the time zone.
    pub fn apply(&self, tracks: &[Track]) -> Result<Vec<Track>, AnalysisError> {
        let range = DateRangeFilter::from_text(&self.start, &self.end)?;
        let mut tracks = if range.is_open() {
            tracks.to_vec()
        } else {
            range.apply(tracks)
        };
        if !self.time_zone.trim().is_empty() {
            let tz = parse_time_zone(&self.time_zone)?;
            tracks = TimeZoneFilter { tz }.apply(&tracks);
        }
        Ok(tracks)
    }
}

/// A sidebar field that can hold focus.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Field {
    Option(usize),
    Filter(FilterField),
}

/// What the text being typed will be written to.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EditTarget {
    Field(Field),
    LoadPath,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Editing {
    pub target: EditTarget,
    pub buffer: String,
}

/// The main application model.
pub struct App {
    registry: ComponentRegistry,
    /// Registered component names, sorted.
    pub names: Vec<String>,
    pub selected: usize,
    component: Option<Box<dyn Component>>,
    pub options: Vec<OptionState>,
    pub filters: Filters,

    tracks: Option<Vec<Track>>,
    pub loaded_dir: Option<PathBuf>,

    pub report: Option<Report>,
    pub report_scroll: u16,

    pub focus: usize,
    pub editing: Option<Editing>,
    pub popup: Option<Popup>,
}

impl App {
    /// Create a new `App` showing the first component that can be built.
    pub fn new(registry: ComponentRegistry) -> Self {
        let names = registry.names();
        let mut app = Self {
            registry,
            names,
            selected: 0,
            component: None,
            options: Vec::new(),
            filters: Filters::default(),
            tracks: None,
            loaded_dir: None,
            report: None,
            report_scroll: 0,
            focus: 0,
            editing: None,
            popup: None,
        };
        for index in 0..app.names.len() {
            app.select(index);
            if app.component.is_some() {
                break;
            }
        }
        app
    }

    pub fn component(&self) -> Option<&dyn Component> {
        self.component.as_deref()
    }

    pub fn component_name(&self) -> Option<&str> {
        self.component.as_ref().map(|c| c.name())
    }

    /// Preferred report size of the active component.
    pub fn component_size(&self) -> (u16, u16) {
        self.component.as_ref().map_or(DEFAULT_SIZE, |c| c.size())
    }

    pub fn tracks(&self) -> Option<&[Track]> {
        self.tracks.as_deref()
    }

    pub fn has_tracks(&self) -> bool {
        self.tracks.is_some()
    }

    pub fn show_warning(&mut self, message: impl Into<String>) {
        self.popup = Some(Popup {
            kind: PopupKind::Warning,
            message: message.into(),
        });
    }

    pub fn show_error(&mut self, message: impl Into<String>) {
        self.popup = Some(Popup {
            kind: PopupKind::Error,
            message: message.into(),
        });
    }

    pub fn dismiss_popup(&mut self) {
        self.popup = None;
    }

    /// Switch to the component at `index`.
    ///
    /// If it cannot be constructed the previous choice stays active and an
    /// error popup is shown.
    pub fn select(&mut self, index: usize) {
        let Some(name) = self.names.get(index).cloned() else {
            return;
        };
        let component = match self.registry.create(&name) {
            Ok(component) => component,
            Err(err) => {
                error!("cannot create component {name:?}: {err}");
                self.show_error(format!("Error creating analyzer: {err}"));
                return;
            }
        };

        self.selected = index;
        self.options = component
            .options()
            .iter()
            .map(OptionState::from_spec)
            .collect();
        if let Some(tracks) = &self.tracks {
            for option in &mut self.options {
                option.set_tracks(tracks);
            }
        }
        self.component = Some(component);
        self.report = None;
        self.report_scroll = 0;
        self.focus = 0;
        self.editing = None;

        if self.has_tracks() {
            self.analyze();
        }
    }

    pub fn select_next(&mut self) {
        if !self.names.is_empty() {
            self.select((self.selected + 1) % self.names.len());
        }
    }

    pub fn select_prev(&mut self) {
        if !self.names.is_empty() {
            let len = self.names.len();
            self.select((self.selected + len - 1) % len);
        }
    }

    /// Load every streaming-history file under `dir` and re-run the analysis.
    pub fn load(&mut self, dir: &Path) {
        info!("loading streaming history from {}", dir.display());
        let result = load_tracks(dir);
        self.loaded_dir = Some(dir.to_path_buf());
        self.set_tracks(result.tracks);

        if !result.errors.is_empty() {
            warn!("failed to load {:?}", result.errors);
            self.show_warning(format!("Error loading tracks files: {:?}", result.errors));
        }
    }

    /// Replace the loaded tracks, refresh the options that depend on them and
    /// re-run the analysis.
    pub fn set_tracks(&mut self, tracks: Vec<Track>) {
        for option in &mut self.options {
            option.set_tracks(&tracks);
        }
        self.tracks = Some(tracks);
        self.analyze();
    }

    /// Loaded tracks after the filters.
    pub fn filtered_tracks(&self) -> Result<Vec<Track>, AnalysisError> {
        self.filters.apply(self.tracks.as_deref().unwrap_or_default())
    }

    pub fn option_values(&self) -> Result<Vec<OptionValue>, AnalysisError> {
        self.options.iter().map(OptionState::value).collect()
    }

    /// Run the active component. Failures leave the previous report in place.
    pub fn analyze(&mut self) {
        let Some(component) = &self.component else {
            return;
        };
        if self.tracks.is_none() {
            self.show_warning("No streaming history loaded (press o to load a folder)");
            return;
        }

        let result = self.filtered_tracks().and_then(|tracks| {
            let values = self.option_values()?;
            component.analyze(&tracks, &values)
        });
        match result {
            Ok(report) => {
                self.report = Some(report);
                self.report_scroll = 0;
            }
            Err(err) => {
                error!("{} failed: {err}", component.name());
                self.show_error(format!("Error analyzing data: {err}"));
            }
        }
    }

    /// Every focusable sidebar field, in display order.
    pub fn fields(&self) -> Vec<Field> {
        (0..self.options.len())
            .map(Field::Option)
            .chain(FilterField::ALL.into_iter().map(Field::Filter))
            .collect()
    }

    pub fn focused(&self) -> Option<Field> {
        self.fields().get(self.focus).copied()
    }

    pub fn focus_next(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + 1) % len;
    }

    pub fn focus_prev(&mut self) {
        let len = self.fields().len();
        self.focus = (self.focus + len - 1) % len;
    }

    fn focused_option(&mut self) -> Option<&mut OptionState> {
        match self.focused()? {
            Field::Option(index) => self.options.get_mut(index),
            Field::Filter(_) => None,
        }
    }

    /// Start typing into the focused field, if it takes text.
    pub fn begin_edit(&mut self) {
        let Some(field) = self.focused() else {
            return;
        };
        let buffer = match field {
            Field::Option(index) => match self.options.get(index) {
                Some(option) if option.is_text() => option.edit_text(),
                _ => return,
            },
            Field::Filter(filter) => self.filters.get(filter).to_string(),
        };
        self.editing = Some(Editing {
            target: EditTarget::Field(field),
            buffer,
        });
    }

    /// Start typing the folder to load.
    pub fn begin_load_prompt(&mut self) {
        let buffer = self
            .loaded_dir
            .as_ref()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();
        self.editing = Some(Editing {
            target: EditTarget::LoadPath,
            buffer,
        });
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(editing) = &mut self.editing {
            editing.buffer.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(editing) = &mut self.editing {
            editing.buffer.pop();
        }
    }

    pub fn cancel_edit(&mut self) {
        self.editing = None;
    }

    /// Write the typed text to its target.
    pub fn commit_edit(&mut self) {
        let Some(Editing { target, buffer }) = self.editing.take() else {
            return;
        };
        match target {
            EditTarget::LoadPath => {
                let path = buffer.trim();
                if !path.is_empty() {
                    self.load(Path::new(path));
                }
            }
            EditTarget::Field(Field::Filter(filter)) => self.filters.set(filter, &buffer),
            EditTarget::Field(Field::Option(index)) => {
                if let Some(option) = self.options.get_mut(index) {
                    option.commit_text(&buffer);
                }
            }
        }
    }

    pub fn toggle_focused(&mut self) {
        if let Some(option) = self.focused_option() {
            option.toggle();
        }
    }

    pub fn adjust_focused(&mut self, delta: i64) {
        if let Some(option) = self.focused_option() {
            option.adjust(delta);
        }
    }

    pub fn add_top_artists(&mut self) {
        if let Some(OptionState::Artists(chooser)) = self.focused_option() {
            chooser.add_top();
        }
    }

    pub fn remove_last_artist(&mut self) {
        if let Some(OptionState::Artists(chooser)) = self.focused_option() {
            chooser.remove_last();
        }
    }

    pub fn scroll_report(&mut self, delta: i16) {
        self.report_scroll = self.report_scroll.saturating_add_signed(delta);
    }
}
