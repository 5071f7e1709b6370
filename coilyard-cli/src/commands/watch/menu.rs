//! Operator console prompts.
//!
//! This module handles only the terminal prompts. Placement, search and
//! pick-up are applied through [`coilyard::session::YardSession`] by the
//! operator loop.

use console::style;
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use coilyard::source::PendingCoil;

use crate::error::CliError;

/// A menu entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    WaitForArrival,
    PlaceNext,
    PlaceAt,
    Search,
    PickUp,
    Quit,
}

impl Action {
    pub const ALL: [Action; 6] = [
        Action::WaitForArrival,
        Action::PlaceNext,
        Action::PlaceAt,
        Action::Search,
        Action::PickUp,
        Action::Quit,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Action::WaitForArrival => "Wait for the next arrival",
            Action::PlaceNext => "Add coil in the next free slot",
            Action::PlaceAt => "Place coil at row/column/layer",
            Action::Search => "Search coil by ID",
            Action::PickUp => "Pick up coil by ID",
            Action::Quit => "Quit",
        }
    }
}

/// Blocking terminal interaction used by the operator loop.
///
/// Every call may block on stdin, so the loop runs them on the blocking
/// pool.
pub trait OperatorConsole: Send + Sync + 'static {
    /// Main menu selection.
    fn choose(&self) -> Result<Action, CliError>;

    /// Accept or reject an announced coil.
    fn confirm_arrival(&self, pending: &PendingCoil) -> Result<bool, CliError>;

    /// One line of free text, returned as typed.
    fn input(&self, label: &str) -> Result<String, CliError>;
}

/// [`OperatorConsole`] on dialoguer prompts.
pub struct DialoguerConsole;

impl OperatorConsole for DialoguerConsole {
    fn choose(&self) -> Result<Action, CliError> {
        let labels: Vec<&str> = Action::ALL.iter().map(|a| a.label()).collect();

        let selection = Select::with_theme(&ColorfulTheme::default())
            .with_prompt("Yard")
            .items(&labels)
            .default(0)
            .interact()
            .map_err(|e| CliError::Prompt(format!("Selection error: {}", e)))?;

        Action::ALL
            .get(selection)
            .copied()
            .ok_or_else(|| CliError::Prompt(format!("No menu entry {}", selection)))
    }

    fn confirm_arrival(&self, pending: &PendingCoil) -> Result<bool, CliError> {
        println!("{}", style("Arrival").cyan().bold());

        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(prompt_text(pending))
            .default(true)
            .interact()
            .map_err(|e| CliError::Prompt(format!("Confirm error: {}", e)))
    }

    fn input(&self, label: &str) -> Result<String, CliError> {
        Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt(label)
            .interact_text()
            .map_err(|e| CliError::Prompt(format!("Input error: {}", e)))
    }
}

pub fn prompt_text(pending: &PendingCoil) -> String {
    let coil = match pending.id {
        Some(id) => format!("New coil #{}", id),
        None => "New coil".to_string(),
    };
    match pending.slot {
        Some(slot) => format!("{} arrived for {}. Accept?", coil, slot),
        None => format!("{} arrived. Accept into the next free slot?", coil),
    }
}
