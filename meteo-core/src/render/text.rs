//! Plain-text serialization for terminal output.

use super::{CurrentCard, Details, ForecastTile, HourRow, Report};

/// The full terminal view: current card, details, hours (if any), forecast.
pub fn report(report: &Report) -> String {
    let mut sections = vec![current(&report.current), details(&report.details)];
    if !report.hours.is_empty() {
        sections.push(hours(&report.hours));
    }
    sections.push(forecast(&report.forecast));
    sections.join("\n")
}

pub fn current(card: &CurrentCard) -> String {
    format!(
        "{}\n{} {}\n{}\n{}\n",
        card.location, card.temperature, card.symbol, card.description, card.coordinates
    )
}

pub fn details(details: &Details) -> String {
    format!(
        "Details\n  Feels like: {}\n  Humidity: {}\n  Wind: {}\n  Precip: {}\n  Daylight: {}\n",
        details.feels_like, details.humidity, details.wind, details.precipitation, details.daylight
    )
}

pub fn forecast(tiles: &[ForecastTile]) -> String {
    let mut out = String::from("Forecast\n");
    for tile in tiles {
        out.push_str(&tile_line(tile));
    }
    out
}

fn tile_line(tile: &ForecastTile) -> String {
    let mut line = format!(
        "  {:<12} {}  {} / {}  Rain: {}",
        tile.date, tile.symbol, tile.high, tile.low, tile.rain
    );
    if let Some(wind) = &tile.wind_max {
        line.push_str(&format!("  Wind max: {wind}"));
    }
    line.push('\n');
    line
}

pub fn hours(rows: &[HourRow]) -> String {
    let mut out = String::from("Next hours\n");
    for row in rows {
        out.push_str(&format!("  {}  {:>4}", row.time, row.temperature));
        if let Some(chance) = &row.precipitation_chance {
            out.push_str(&format!("  Precip chance: {chance}"));
        }
        if let Some(wind) = &row.wind {
            out.push_str(&format!("  Wind: {wind}"));
        }
        out.push('\n');
    }
    out
}
