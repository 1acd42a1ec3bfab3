//! Interactive prompts.

use anyhow::{Context, Result};
use clima_weather::Selection;
use colored::Colorize;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};

use crate::display;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuOption {
    Search,
    History,
    Exit,
}

const MAIN_MENU: [(MenuOption, &str); 3] = [
    (MenuOption::Search, "1. Search city"),
    (MenuOption::History, "2. History"),
    (MenuOption::Exit, "0. Exit"),
];

/// Show the banner and the main menu.
pub fn main_menu() -> Result<MenuOption> {
    display::clear_screen();
    display::banner();

    let labels: Vec<_> = MAIN_MENU.iter().map(|(_, label)| *label).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Use the arrow keys to choose")
        .items(&labels)
        .default(0)
        .interact()
        .context("Failed to read menu option")?;

    Ok(MAIN_MENU
        .get(index)
        .map(|(option, _)| *option)
        .unwrap_or(MenuOption::Exit))
}

/// Ask for a city name; empty input is rejected by the prompt.
pub fn city_name() -> Result<String> {
    let name: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("City name")
        .validate_with(|input: &String| -> Result<(), &str> {
            if input.trim().is_empty() {
                Err("Enter a value")
            } else {
                Ok(())
            }
        })
        .interact_text()
        .context("Failed to read city name")?;

    Ok(name.trim().to_string())
}

/// Let the user pick one of `entries` (`(id, name)` pairs) or cancel.
pub fn choose(title: &str, entries: &[(&str, &str)]) -> Result<Selection> {
    display::clear_screen();
    display::list_title(title);

    let items = display::choice_items(entries.iter().map(|(_, name)| *name));
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Choose one".yellow().to_string())
        .items(&items)
        .default(0)
        .interact()
        .context("Failed to read selection")?;

    let ids: Vec<&str> = entries.iter().map(|(id, _)| *id).collect();
    Ok(selection_for(index, &ids))
}

/// Map a pick-list index to a selection. The trailing entry is the cancel
/// option.
pub fn selection_for(index: usize, ids: &[&str]) -> Selection {
    match ids.get(index) {
        Some(id) => Selection::City((*id).to_string()),
        None => Selection::Cancel,
    }
}

/// Wait for ENTER.
pub fn pause(message: &str) -> Result<()> {
    let _: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(format!("{} {} to continue", message, "ENTER".green()))
        .allow_empty(true)
        .interact_text()
        .context("Failed to read input")?;
    Ok(())
}
