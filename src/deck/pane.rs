// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-jThinker-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jThinker and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, error};

use crate::model::{Diagram, DiagramError, DiagramType};
use crate::store::{save_diagram, SaveError, WriteDurability};

static NEXT_PANE_ID: AtomicU64 = AtomicU64::new(1);

/// Identity of a tab. Unique across every deck in the process and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PaneId(u64);

impl PaneId {
    pub(crate) fn next() -> Self {
        Self(NEXT_PANE_ID.fetch_add(1, Ordering::Relaxed))
    }

    pub fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for PaneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "pane-{}", self.0)
    }
}

/// Answer to "save changes before closing?".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveChoice {
    Save,
    Discard,
    Cancel,
}

/// Modal questions asked while resolving unsaved changes.
pub trait SavePrompt {
    fn ask_save(&mut self, pane: &DiagramPane) -> SaveChoice;

    /// Picks a destination for a pane without a file. `None` cancels the save.
    fn choose_save_path(&mut self, pane: &DiagramPane) -> Option<PathBuf>;
}

/// Picks a diagram file to open. `None` means the user backed out.
pub trait FileChooser {
    fn choose_load(&mut self) -> Option<PathBuf>;
}

/// One open diagram together with its file binding and saved state.
#[derive(Debug, Clone)]
pub struct DiagramPane {
    id: PaneId,
    diagram: Diagram,
    file: Option<PathBuf>,
    saved: bool,
    rev: u64,
}

impl DiagramPane {
    pub(crate) fn blank(id: PaneId, diagram_type: DiagramType) -> Self {
        Self {
            id,
            diagram: Diagram::new(diagram_type),
            file: None,
            saved: true,
            rev: 0,
        }
    }

    pub(crate) fn loaded(id: PaneId, diagram: Diagram, file: PathBuf) -> Self {
        Self {
            id,
            diagram,
            file: Some(file),
            saved: true,
            rev: 0,
        }
    }

    pub fn id(&self) -> PaneId {
        self.id
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn diagram_type(&self) -> DiagramType {
        self.diagram.diagram_type()
    }

    pub fn file(&self) -> Option<&Path> {
        self.file.as_deref()
    }

    pub fn is_saved(&self) -> bool {
        self.saved
    }

    /// Number of successful edits since the pane was opened.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    /// The file path when bound, otherwise the diagram type's title.
    pub fn display_name(&self) -> String {
        match &self.file {
            Some(file) => file.display().to_string(),
            None => self.diagram_type().title().to_owned(),
        }
    }

    /// Applies a mutation; a successful one leaves the pane unsaved.
    pub fn edit<R>(
        &mut self,
        mutate: impl FnOnce(&mut Diagram) -> Result<R, DiagramError>,
    ) -> Result<R, DiagramError> {
        let out = mutate(&mut self.diagram)?;
        self.saved = false;
        self.rev = self.rev.saturating_add(1);
        Ok(out)
    }

    pub fn save_to(
        &mut self,
        path: impl Into<PathBuf>,
        durability: WriteDurability,
    ) -> Result<(), SaveError> {
        let path = path.into();
        save_diagram(&path, &self.diagram, durability)?;
        self.file = Some(path);
        self.saved = true;
        Ok(())
    }

    /// Saves to the bound file, or asks for one first.
    ///
    /// Returns `false` when the user gives no path or the write fails; failures are logged.
    pub fn save_with(&mut self, prompt: &mut dyn SavePrompt, durability: WriteDurability) -> bool {
        let path = match &self.file {
            Some(file) => file.clone(),
            None => match prompt.choose_save_path(self) {
                Some(path) => path,
                None => return false,
            },
        };

        match self.save_to(&path, durability) {
            Ok(()) => true,
            Err(err) => {
                error!(pane = self.id.get(), error = err.to_string(); "Unable to save diagram");
                false
            }
        }
    }

    /// Resolves unsaved changes before a close.
    ///
    /// `true` means the pane may be closed: the user discarded the changes or they were saved.
    pub fn confirm_discard_or_save(
        &mut self,
        prompt: &mut dyn SavePrompt,
        durability: WriteDurability,
    ) -> bool {
        let choice = prompt.ask_save(self);
        debug!(pane = self.id.get(), choice:?; "Save prompt answered");
        match choice {
            SaveChoice::Save => self.save_with(prompt, durability),
            SaveChoice::Discard => true,
            SaveChoice::Cancel => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::{DiagramPane, PaneId, SaveChoice, SavePrompt};
    use crate::model::{DiagramError, DiagramType, NodeId, NodeType};
    use crate::store::{load_diagram, WriteDurability};

    struct FixedPrompt {
        choice: SaveChoice,
        path: Option<PathBuf>,
        asked: usize,
    }

    impl SavePrompt for FixedPrompt {
        fn ask_save(&mut self, _pane: &DiagramPane) -> SaveChoice {
            self.asked += 1;
            self.choice
        }

        fn choose_save_path(&mut self, _pane: &DiagramPane) -> Option<PathBuf> {
            self.path.clone()
        }
    }

    fn prompt(choice: SaveChoice, path: Option<PathBuf>) -> FixedPrompt {
        FixedPrompt {
            choice,
            path,
            asked: 0,
        }
    }

    fn dirty_pane() -> DiagramPane {
        let mut pane = DiagramPane::blank(PaneId::next(), DiagramType::CurrentRealityTree);
        pane.edit(|diagram| Ok(diagram.add_node(NodeType::Statement.instantiate("UDE", None))))
            .unwrap();
        pane
    }

    #[test]
    fn pane_ids_are_never_handed_out_twice() {
        let first = PaneId::next();
        let second = PaneId::next();

        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn successful_edit_marks_unsaved_and_bumps_rev() {
        let pane = dirty_pane();

        assert!(!pane.is_saved());
        assert_eq!(pane.rev(), 1);
        assert_eq!(pane.diagram().nodes().len(), 1);
    }

    #[test]
    fn failed_edit_keeps_pane_saved() {
        let mut pane = DiagramPane::blank(PaneId::next(), DiagramType::CurrentRealityTree);
        let ghost = NodeId::new("ghost").unwrap();

        let result = pane.edit(|diagram| diagram.set_content(&ghost, "x"));

        assert_eq!(result, Err(DiagramError::UnknownNode(ghost)));
        assert!(pane.is_saved());
        assert_eq!(pane.rev(), 0);
    }

    #[test]
    fn cancel_keeps_pane_unsaved() {
        let mut pane = dirty_pane();
        let mut prompt = prompt(SaveChoice::Cancel, None);

        assert!(!pane.confirm_discard_or_save(&mut prompt, WriteDurability::BestEffort));
        assert!(!pane.is_saved());
        assert_eq!(prompt.asked, 1);
    }

    #[test]
    fn discard_allows_close_without_writing() {
        let mut pane = dirty_pane();
        let mut prompt = prompt(SaveChoice::Discard, None);

        assert!(pane.confirm_discard_or_save(&mut prompt, WriteDurability::BestEffort));
        assert!(!pane.is_saved());
        assert_eq!(pane.file(), None);
    }

    #[test]
    fn save_without_path_is_treated_as_cancel() {
        let mut pane = dirty_pane();
        let mut prompt = prompt(SaveChoice::Save, None);

        assert!(!pane.confirm_discard_or_save(&mut prompt, WriteDurability::BestEffort));
        assert!(!pane.is_saved());
    }

    #[test]
    fn save_with_chosen_path_binds_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("crt.jthink");
        let mut pane = dirty_pane();
        let mut prompt = prompt(SaveChoice::Save, Some(path.clone()));

        assert!(pane.confirm_discard_or_save(&mut prompt, WriteDurability::BestEffort));
        assert!(pane.is_saved());
        assert_eq!(pane.file(), Some(path.as_path()));
        assert_eq!(pane.display_name(), path.display().to_string());
        assert_eq!(&load_diagram(&path).unwrap(), pane.diagram());
    }

    #[test]
    fn failed_write_reports_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("missing-dir").join("crt.jthink");
        let mut pane = dirty_pane();
        let mut prompt = prompt(SaveChoice::Save, Some(path));

        assert!(!pane.confirm_discard_or_save(&mut prompt, WriteDurability::BestEffort));
        assert!(!pane.is_saved());
        assert_eq!(pane.file(), None);
    }
}
