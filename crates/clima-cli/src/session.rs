use anyhow::{anyhow, Result};
use clima_core::AppError;
use clima_weather::WeatherLookup;
use colored::Colorize;

use crate::display;
use crate::menu::{self, MenuOption};

/// The interactive loop. Lookup failures are shown and the loop goes on;
/// only terminal I/O failures end it.
pub struct Session {
    lookup: WeatherLookup,
}

impl Session {
    pub fn new(lookup: WeatherLookup) -> Self {
        Self { lookup }
    }

    pub async fn run(&mut self) -> Result<()> {
        loop {
            let option = menu::main_menu()?;
            tracing::debug!(?option, "Menu option selected");

            let outcome = match option {
                MenuOption::Search => self.search().await,
                MenuOption::History => self.show_history(),
                MenuOption::Exit => break,
            };

            if let Err(e) = outcome {
                let err = e.downcast::<AppError>()?;
                tracing::info!("Action failed: {}", err);
                menu::pause(&err.to_string().red().to_string())?;
            }

            println!();
            menu::pause("Main menu.")?;
        }

        tracing::info!("Session ended");
        Ok(())
    }

    async fn search(&mut self) -> Result<()> {
        let name = menu::city_name()?;
        let candidates = self.lookup.find_cities(&name).await.map_err(AppError::from)?;

        let entries: Vec<_> = candidates
            .iter()
            .map(|c| (c.id.as_str(), c.name.as_str()))
            .collect();
        let selection = menu::choose("Cities found", &entries)?;

        let result = self
            .lookup
            .resolve(&candidates, &selection)
            .await
            .map_err(AppError::from)?;

        if let Some(found) = result {
            display::print_city_info(&found.city.name, &found.weather, self.lookup.units());
        }
        Ok(())
    }

    fn show_history(&self) -> Result<()> {
        let recent = self.lookup.recent_history();
        if recent.is_empty() {
            return Err(AppError::Other(anyhow!("History is empty!")).into());
        }

        let entries: Vec<_> = recent
            .iter()
            .map(|r| (r.id.as_str(), r.name.as_str()))
            .collect();
        let selection = menu::choose("History", &entries)?;

        if let Some(record) = self.lookup.history_entry(&selection).map_err(AppError::from)? {
            display::print_city_info(&record.name, &record.weather, self.lookup.units());
        }
        Ok(())
    }
}
