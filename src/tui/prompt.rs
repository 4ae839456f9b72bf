// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-jThinker-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jThinker and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Modal prompts drawn while a deck operation waits for an answer.

use std::io;
use std::path::PathBuf;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use log::error;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
};

use super::{chrome::centered_rect, TerminalSession};
use crate::deck::{DiagramPane, FileChooser, SaveChoice, SavePrompt};

const PROMPT_COLOR: Color = Color::LightYellow;

/// Answers deck questions with modal dialogs on the live terminal.
///
/// Terminal errors while prompting are logged and treated as a cancellation.
pub struct TerminalPrompt<'a> {
    session: &'a mut TerminalSession,
}

impl<'a> TerminalPrompt<'a> {
    pub(super) fn new(session: &'a mut TerminalSession) -> Self {
        Self { session }
    }

    fn draw_modal(&mut self, title: &str, lines: Vec<Line<'static>>) -> io::Result<()> {
        let title = title.to_owned();
        self.session.draw(|frame| {
            let area = centered_rect(60, 30, frame.size());
            frame.render_widget(Clear, area);
            frame.render_widget(
                Paragraph::new(Text::from(lines))
                    .wrap(Wrap { trim: false })
                    .block(
                        Block::default()
                            .borders(Borders::ALL)
                            .title(title)
                            .border_style(Style::default().fg(PROMPT_COLOR)),
                    ),
                area,
            );
        })
    }

    fn ask_choice(&mut self, pane: &DiagramPane) -> io::Result<SaveChoice> {
        let lines = vec![
            Line::from(format!("{} has unsaved changes.", pane.display_name())),
            Line::from(""),
            Line::from("[y] save   [n] discard   [Esc] cancel"),
        ];
        loop {
            self.draw_modal("Save changes?", lines.clone())?;
            match next_key()?.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => return Ok(SaveChoice::Save),
                KeyCode::Char('n') | KeyCode::Char('N') => return Ok(SaveChoice::Discard),
                KeyCode::Esc | KeyCode::Char('c') => return Ok(SaveChoice::Cancel),
                _ => {}
            }
        }
    }

    /// Reads a path. Empty input and `Esc` both mean "no path".
    fn read_path(&mut self, title: &str, initial: &str) -> io::Result<Option<PathBuf>> {
        let mut input = initial.to_owned();
        loop {
            let lines = vec![
                Line::from(format!("> {input}_")),
                Line::from(""),
                Line::from("[Enter] confirm   [Esc] cancel"),
            ];
            self.draw_modal(title, lines)?;
            if let InputStep::Done(path) = step_path_input(&mut input, next_key()?) {
                return Ok(path);
            }
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum InputStep {
    Editing,
    Done(Option<PathBuf>),
}

/// Applies one key to the path being typed. Control and Alt chords never insert text.
fn step_path_input(input: &mut String, key: KeyEvent) -> InputStep {
    match key.code {
        KeyCode::Enter => {
            let trimmed = input.trim();
            InputStep::Done((!trimmed.is_empty()).then(|| PathBuf::from(trimmed)))
        }
        KeyCode::Esc => InputStep::Done(None),
        KeyCode::Backspace => {
            input.pop();
            InputStep::Editing
        }
        KeyCode::Char(_)
            if key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            InputStep::Editing
        }
        KeyCode::Char(ch) => {
            input.push(ch);
            InputStep::Editing
        }
        _ => InputStep::Editing,
    }
}

impl SavePrompt for TerminalPrompt<'_> {
    fn ask_save(&mut self, pane: &DiagramPane) -> SaveChoice {
        self.ask_choice(pane).unwrap_or_else(|err| {
            error!(error = err.to_string(); "Save prompt failed");
            SaveChoice::Cancel
        })
    }

    fn choose_save_path(&mut self, pane: &DiagramPane) -> Option<PathBuf> {
        let initial = format!("{}.jthink", pane.diagram_type().slug());
        self.read_path("Save diagram as", &initial)
            .unwrap_or_else(|err| {
                error!(error = err.to_string(); "Save path prompt failed");
                None
            })
    }
}

impl FileChooser for TerminalPrompt<'_> {
    fn choose_load(&mut self) -> Option<PathBuf> {
        self.read_path("Open diagram", "").unwrap_or_else(|err| {
            error!(error = err.to_string(); "Open prompt failed");
            None
        })
    }
}

fn next_key() -> io::Result<KeyEvent> {
    loop {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                return Ok(key);
            }
        }
    }
}
