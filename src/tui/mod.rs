// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-jThinker-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of jThinker and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Terminal UI.
//!
//! Hosts a [`Deck`] in a ratatui + crossterm shell: a tab strip, the node list of the selected
//! diagram and a footer with key hints. Save and open questions are asked through modal
//! prompts drawn over the shell.

use std::cell::RefCell;
use std::error::Error;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use log::{error, info, warn};
use ratatui::prelude::*;

use crate::config::AppConfig;
use crate::deck::{Deck, DiagramPane, FileChooser, SavePrompt, DEFAULT_PANE_TITLE};
use crate::model::{DiagramType, NodeData, NodeType, Point};

mod chrome;
mod prompt;

use prompt::TerminalPrompt;

const NODE_GRID_COLUMNS: i32 = 4;
const NODE_GRID_STEP_X: i32 = 160;
const NODE_GRID_STEP_Y: i32 = 90;

/// Runs the interactive terminal UI until the user quits.
pub fn run(mut app: App) -> Result<(), Box<dyn Error>> {
    let mut terminal = TerminalSession::new()?;
    info!(tabs = app.deck.tab_count(); "Terminal UI started");

    while !app.should_quit {
        app.flush_selection_notice();
        terminal.draw(|frame| chrome::draw(frame, &mut app))?;

        if event::poll(Duration::from_millis(250))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    let mut prompt = TerminalPrompt::new(&mut terminal);
                    app.handle_key(key, &mut prompt);
                }
                _ => {}
            }
        }
    }

    info!("Terminal UI stopped");
    Ok(())
}

struct Toast {
    message: String,
    expires_at: Instant,
}

pub struct App {
    deck: Deck,
    next_type: DiagramType,
    selection_notice: Rc<RefCell<Option<String>>>,
    toast: Option<Toast>,
    should_quit: bool,
}

impl App {
    pub fn new(config: &AppConfig) -> Self {
        let selection_notice = Rc::new(RefCell::new(None));
        let deck = Deck::new({
            let notice = selection_notice.clone();
            move |pane: Option<&DiagramPane>| {
                let name = pane
                    .map(DiagramPane::display_name)
                    .unwrap_or_else(|| DEFAULT_PANE_TITLE.to_owned());
                *notice.borrow_mut() = Some(name);
            }
        })
        .with_durability(config.write_durability());

        Self {
            deck,
            next_type: config.default_diagram_type,
            selection_notice,
            toast: None,
            should_quit: false,
        }
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn next_type(&self) -> DiagramType {
        self.next_type
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Opens the startup files. Files that fail to load are logged and skipped; the placeholder
    /// tab is added when nothing opened and `show_placeholder` is set.
    pub fn open_startup(&mut self, files: &[PathBuf], show_placeholder: bool) -> usize {
        let mut opened = 0;
        for path in files {
            match self.deck.add_from_file(path) {
                Ok(_) => opened += 1,
                Err(err) => {
                    error!(path = path.display().to_string(), error = err.to_string(); "Unable to open");
                }
            }
        }
        if opened == 0 && show_placeholder {
            self.deck.add_default_pane();
        }
        self.selection_notice.borrow_mut().take();
        opened
    }

    pub fn handle_key<P>(&mut self, key: KeyEvent, prompt: &mut P)
    where
        P: SavePrompt + FileChooser,
    {
        match key.code {
            KeyCode::Char('q') => {
                if self.deck.close_all(prompt) {
                    self.should_quit = true;
                } else {
                    self.set_toast("Quit cancelled");
                }
            }
            KeyCode::Char('n') => {
                self.deck.add_blank(self.next_type);
            }
            KeyCode::Char('N') => {
                self.next_type = self.next_type.cycle();
                self.set_toast(format!("New diagrams: {}", self.next_type.title()));
            }
            KeyCode::Char('o') => {
                if self.deck.load_new(prompt).is_none() {
                    self.set_toast("No file opened");
                }
            }
            KeyCode::Char('s') => {
                if self.deck.current_diagram().is_none() {
                    self.set_toast("No diagram selected");
                } else if self.deck.save_current(prompt) {
                    self.set_toast("Saved");
                } else {
                    self.set_toast("Not saved");
                }
            }
            KeyCode::Char('w') => {
                if let Some(index) = self.deck.selected_index() {
                    if !self.deck.close_tab(index, prompt) {
                        self.set_toast("Close cancelled");
                    }
                }
            }
            KeyCode::Tab => self.deck.select_next(),
            KeyCode::BackTab => self.deck.select_prev(),
            KeyCode::Char('a') => self.add_node(NodeType::Statement),
            KeyCode::Char('t') => self.add_node(NodeType::Task),
            KeyCode::Char('b') => self.add_node(NodeType::Obstacle),
            KeyCode::Char('e') => self.add_node(NodeType::Ellipse),
            _ => {}
        }
        self.flush_selection_notice();
    }

    fn add_node(&mut self, node_type: NodeType) {
        let Some(pane) = self.deck.current_diagram_mut() else {
            self.set_toast("No diagram selected");
            return;
        };

        let position = next_grid_slot(pane.diagram().nodes().len());
        let data = match node_type {
            NodeType::Ellipse => NodeType::new_ellipse_at(position),
            other => other.instantiate(other.to_string(), Some(position)),
        };
        match pane.edit(|diagram| Ok(diagram.add_node(data))) {
            Ok(node_id) => self.set_toast(format!("Added {node_type} {node_id}")),
            Err(err) => {
                warn!(error = err.to_string(); "Unable to add node");
                self.set_toast(format!("Add failed: {err}"));
            }
        }
    }

    fn flush_selection_notice(&mut self) {
        let notice = self.selection_notice.borrow_mut().take();
        if let Some(name) = notice {
            self.set_toast(format!("Showing {name}"));
        }
    }

    fn set_toast(&mut self, message: impl Into<String>) {
        self.toast = Some(Toast {
            message: message.into(),
            expires_at: Instant::now() + Duration::from_secs(2),
        });
    }

    fn toast_message(&self) -> Option<&str> {
        self.toast.as_ref().map(|toast| toast.message.as_str())
    }
}

fn next_grid_slot(count: usize) -> Point {
    let count = i32::try_from(count).unwrap_or(i32::MAX);
    Point::new(
        (count % NODE_GRID_COLUMNS) * NODE_GRID_STEP_X,
        (count / NODE_GRID_COLUMNS).saturating_mul(NODE_GRID_STEP_Y),
    )
}

fn node_label(data: &NodeData) -> String {
    let position = data
        .position()
        .map(|point| format!(" @{point}"))
        .unwrap_or_default();
    if data.content().is_empty() {
        format!("[{}]{position}", data.node_type().slug())
    } else {
        format!("[{}]{position} {}", data.node_type().slug(), data.content())
    }
}

struct TerminalSession {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
}

impl TerminalSession {
    fn new() -> Result<Self, Box<dyn Error>> {
        enable_raw_mode()?;

        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen).map_err(|err| {
            teardown_terminal();
            err
        })?;

        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend).map_err(|err| {
            teardown_terminal();
            err
        })?;
        terminal.clear().map_err(|err| {
            teardown_terminal();
            err
        })?;

        Ok(Self { terminal })
    }

    fn draw(&mut self, draw_fn: impl FnOnce(&mut Frame<'_>)) -> io::Result<()> {
        self.terminal.draw(draw_fn)?;
        Ok(())
    }
}

impl Drop for TerminalSession {
    fn drop(&mut self) {
        let _ = self.terminal.show_cursor();
        teardown_terminal();
    }
}

fn teardown_terminal() {
    let _ = disable_raw_mode();
    let mut stdout = io::stdout();
    let _ = execute!(stdout, LeaveAlternateScreen);
}
