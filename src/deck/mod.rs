// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-jThinker-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jThinker and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The deck of open diagrams.
//!
//! A [`Deck`] owns an ordered list of tabs. Each tab either hosts a [`DiagramPane`] or is a
//! placeholder (the startup tab). At most one tab is selected; every change of the selected tab
//! is reported once to the callback given to [`Deck::new`].

mod pane;

use std::fmt;
use std::path::Path;

use log::{debug, error};

use crate::model::DiagramType;
use crate::store::{load_diagram, LoadError, WriteDurability};

pub use pane::{DiagramPane, FileChooser, PaneId, SaveChoice, SavePrompt};

/// Title of the placeholder tab shown on startup.
pub const DEFAULT_PANE_TITLE: &str = "jThinker";

type ChangeCallback = Box<dyn FnMut(Option<&DiagramPane>)>;

#[derive(Debug)]
pub enum TabContent {
    Diagram(DiagramPane),
    Placeholder,
}

#[derive(Debug)]
pub struct Tab {
    id: PaneId,
    title: String,
    content: TabContent,
}

impl Tab {
    pub fn id(&self) -> PaneId {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &TabContent {
        &self.content
    }

    pub fn diagram(&self) -> Option<&DiagramPane> {
        match &self.content {
            TabContent::Diagram(pane) => Some(pane),
            TabContent::Placeholder => None,
        }
    }

    fn diagram_mut(&mut self) -> Option<&mut DiagramPane> {
        match &mut self.content {
            TabContent::Diagram(pane) => Some(pane),
            TabContent::Placeholder => None,
        }
    }
}

pub struct Deck {
    tabs: Vec<Tab>,
    selected: Option<usize>,
    durability: WriteDurability,
    on_change: ChangeCallback,
}

impl fmt::Debug for Deck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deck")
            .field("tabs", &self.tabs)
            .field("selected", &self.selected)
            .field("durability", &self.durability)
            .finish_non_exhaustive()
    }
}

impl Deck {
    /// Creates an empty deck. `on_change` receives the newly selected pane (or `None` for a
    /// placeholder/empty deck) each time the selected tab changes. It must not panic.
    pub fn new(on_change: impl FnMut(Option<&DiagramPane>) + 'static) -> Self {
        Self {
            tabs: Vec::new(),
            selected: None,
            durability: WriteDurability::default(),
            on_change: Box::new(on_change),
        }
    }

    pub fn detached() -> Self {
        Self::new(|_| {})
    }

    pub fn with_durability(mut self, durability: WriteDurability) -> Self {
        self.durability = durability;
        self
    }

    pub fn durability(&self) -> WriteDurability {
        self.durability
    }

    pub fn tabs(&self) -> &[Tab] {
        &self.tabs
    }

    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn title_at(&self, index: usize) -> Option<&str> {
        self.tabs.get(index).map(Tab::title)
    }

    /// Opens an empty diagram of `diagram_type` in a new, selected tab.
    pub fn add_blank(&mut self, diagram_type: DiagramType) -> PaneId {
        let id = PaneId::next();
        let pane = DiagramPane::blank(id, diagram_type);
        self.push_selected(Tab {
            id,
            title: diagram_type.title().to_owned(),
            content: TabContent::Diagram(pane),
        })
    }

    /// Opens the diagram stored at `path` in a new, selected tab titled by the path.
    ///
    /// On failure the deck is left untouched.
    pub fn add_from_file(&mut self, path: impl AsRef<Path>) -> Result<PaneId, LoadError> {
        let path = path.as_ref();
        let diagram = load_diagram(path)?;
        let id = PaneId::next();
        let pane = DiagramPane::loaded(id, diagram, path.to_path_buf());
        Ok(self.push_selected(Tab {
            id,
            title: path.display().to_string(),
            content: TabContent::Diagram(pane),
        }))
    }

    /// Asks `chooser` for a file and opens it. Load failures are logged, not returned.
    pub fn load_new(&mut self, chooser: &mut dyn FileChooser) -> Option<PaneId> {
        let path = chooser.choose_load()?;
        match self.add_from_file(&path) {
            Ok(id) => Some(id),
            Err(err) => {
                error!(
                    path = err.path().display().to_string(),
                    error = err.to_string();
                    "Unable to open"
                );
                None
            }
        }
    }

    /// Appends the placeholder tab. It only becomes selected when the deck was empty.
    pub fn add_default_pane(&mut self) -> PaneId {
        let id = PaneId::next();
        self.tabs.push(Tab {
            id,
            title: DEFAULT_PANE_TITLE.to_owned(),
            content: TabContent::Placeholder,
        });
        debug!(pane = id.get(); "Added placeholder tab");
        if self.selected.is_none() {
            self.selected = Some(self.tabs.len() - 1);
            self.notify();
        }
        id
    }

    pub fn current_diagram(&self) -> Option<&DiagramPane> {
        self.diagram_at(self.selected?)
    }

    pub fn current_diagram_mut(&mut self) -> Option<&mut DiagramPane> {
        let idx = self.selected?;
        self.tabs.get_mut(idx).and_then(Tab::diagram_mut)
    }

    /// Panes in tab order; placeholder tabs are skipped.
    pub fn all_diagrams(&self) -> Vec<&DiagramPane> {
        self.tabs.iter().filter_map(Tab::diagram).collect()
    }

    pub fn diagram_at(&self, index: usize) -> Option<&DiagramPane> {
        self.tabs.get(index).and_then(Tab::diagram)
    }

    pub fn diagram_mut(&mut self, id: PaneId) -> Option<&mut DiagramPane> {
        self.tabs
            .iter_mut()
            .find(|tab| tab.id == id)
            .and_then(Tab::diagram_mut)
    }

    pub fn index_of(&self, id: PaneId) -> Option<usize> {
        self.tabs.iter().position(|tab| tab.id == id)
    }

    /// Selects the tab at `index`. Returns `false` when there is no such tab.
    pub fn select(&mut self, index: usize) -> bool {
        if index >= self.tabs.len() {
            return false;
        }
        if self.selected != Some(index) {
            self.selected = Some(index);
            debug!(index = index; "Selected tab");
            self.notify();
        }
        true
    }

    pub fn select_next(&mut self) {
        if let Some(idx) = self.selected {
            self.select((idx + 1) % self.tabs.len());
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(idx) = self.selected {
            let len = self.tabs.len();
            self.select((idx + len - 1) % len);
        }
    }

    /// Clears the unsaved-changes obstruction of every pane, in tab order.
    ///
    /// Saved panes are skipped; unsaved ones go through the save prompt. Stops at the first
    /// cancellation and returns `false`. Tabs are never removed here; closing them is up to
    /// the caller once this returns `true`.
    pub fn close_all(&mut self, prompt: &mut dyn SavePrompt) -> bool {
        let durability = self.durability;
        for pane in self.tabs.iter_mut().filter_map(Tab::diagram_mut) {
            if pane.is_saved() {
                continue;
            }
            if !pane.confirm_discard_or_save(prompt, durability) {
                debug!(pane = pane.id().get(); "Close all cancelled");
                return false;
            }
        }
        true
    }

    /// Closes the tab at `index`, resolving unsaved changes first.
    ///
    /// Returns `false` when there is no such tab or the user cancelled.
    pub fn close_tab(&mut self, index: usize, prompt: &mut dyn SavePrompt) -> bool {
        let durability = self.durability;
        let Some(tab) = self.tabs.get_mut(index) else {
            return false;
        };
        if let Some(pane) = tab.diagram_mut() {
            if !pane.is_saved() && !pane.confirm_discard_or_save(prompt, durability) {
                return false;
            }
        }

        let tab = self.remove_tab(index);
        debug!(pane = tab.id.get(), title = tab.title.as_str(); "Closed tab");
        true
    }

    /// Saves the selected pane, asking for a path when it has no file yet.
    ///
    /// A save to a new path retitles the tab after that path.
    pub fn save_current(&mut self, prompt: &mut dyn SavePrompt) -> bool {
        let durability = self.durability;
        let Some(tab) = self.selected.and_then(|idx| self.tabs.get_mut(idx)) else {
            return false;
        };
        let TabContent::Diagram(pane) = &mut tab.content else {
            return false;
        };

        let previous = pane.file().map(Path::to_path_buf);
        if !pane.save_with(prompt, durability) {
            return false;
        }
        if let Some(file) = pane.file() {
            if previous.as_deref() != Some(file) {
                tab.title = file.display().to_string();
            }
        }
        true
    }

    fn push_selected(&mut self, tab: Tab) -> PaneId {
        let id = tab.id;
        debug!(pane = id.get(), title = tab.title.as_str(); "Added diagram tab");
        self.tabs.push(tab);
        self.selected = Some(self.tabs.len() - 1);
        self.notify();
        id
    }

    // Mirrors the tabbed-container convention: the selection shifts left when a tab before it
    // goes away, and clamps to the new last tab when the selected last tab goes away.
    fn remove_tab(&mut self, index: usize) -> Tab {
        let before = self.selected_tab_id();
        let tab = self.tabs.remove(index);
        self.selected = match self.selected {
            _ if self.tabs.is_empty() => None,
            Some(selected) if selected > index => Some(selected - 1),
            Some(selected) if selected >= self.tabs.len() => Some(self.tabs.len() - 1),
            other => other,
        };
        if self.selected_tab_id() != before {
            self.notify();
        }
        tab
    }

    fn selected_tab_id(&self) -> Option<PaneId> {
        self.selected
            .and_then(|idx| self.tabs.get(idx))
            .map(Tab::id)
    }

    fn notify(&mut self) {
        let pane = self
            .selected
            .and_then(|idx| self.tabs.get(idx))
            .and_then(Tab::diagram);
        (self.on_change)(pane);
    }
}
