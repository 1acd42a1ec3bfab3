//! Console output: banner, list entries and the weather info block.

use clima_core::Units;
use clima_weather::WeatherSnapshot;
use colored::Colorize;
use console::Term;

const RULE: &str = "===============================";

pub fn clear_screen() {
    if let Err(e) = Term::stdout().clear_screen() {
        tracing::debug!("Could not clear the screen: {}", e);
    }
}

pub fn banner() {
    println!("{}", RULE.green());
    println!("{}", " Clima - city weather lookup ".black().on_yellow());
    println!("{}", " Search a city, pick a match, get the weather ".black().on_yellow());
    println!("{}\n", RULE.green());
}

/// Header printed above a pick list.
pub fn list_title(title: &str) {
    println!("{}", RULE.green());
    println!("{}", format!("     {}    ", title.to_uppercase()).green());
    println!("{}\n", RULE.green());
}

/// Numbered labels for a pick list, followed by the `0. Cancel` entry.
pub fn choice_items<'a>(names: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    let mut items: Vec<String> = names
        .into_iter()
        .enumerate()
        .map(|(index, name)| format!("{} {}", format!("{}.", index + 1).green(), name))
        .collect();
    items.push(format!("{} {}", "0.".green(), "Cancel".blue()));
    items
}

pub fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Label/value pairs of the info block, temperatures suffixed with the unit.
pub fn info_lines(city: &str, weather: &WeatherSnapshot, units: Units) -> Vec<(&'static str, String)> {
    let degrees = |value: f64| format!("{}{}", value, units.symbol());

    vec![
        ("City", city.to_string()),
        ("Weather", capitalize_first(&weather.description)),
        ("Temperature", degrees(weather.temp)),
        ("Max", degrees(weather.temp_max)),
        ("Min", degrees(weather.temp_min)),
        ("Feels like", degrees(weather.feels_like)),
    ]
}

pub fn print_city_info(city: &str, weather: &WeatherSnapshot, units: Units) {
    clear_screen();
    println!("{}\n", "Information:".blue().on_yellow());
    for (label, value) in info_lines(city, weather, units) {
        println!("\t{} {}", format!("{}:", label).yellow(), value.green());
    }
}
