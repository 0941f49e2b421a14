//! HTML serialization: card fragments and a standalone document, rendered
//! from embedded Tera templates with HTML auto-escaping.

use tera::{Context, Tera};
use tracing::debug;

use crate::{error::RenderError, theme::Theme};

use super::{CurrentCard, Details, ForecastTile, Report};

const CURRENT: &str = "current.html";
const DETAILS: &str = "details.html";
const FORECAST: &str = "forecast.html";
const DOCUMENT: &str = "document.html";

const STYLE: &str = ":root{--bg:#0b1020;--card:#151b2e;--fg:#e6e9f2;--muted:#9aa3b8}\
:root.light{--bg:#f6f7fb;--card:#ffffff;--fg:#111827;--muted:#5b6475}\
body{background:var(--bg);color:var(--fg);font-family:system-ui,sans-serif;margin:2rem}\
.card,.tile{background:var(--card);border-radius:12px;padding:16px;margin-bottom:12px}\
.row{display:flex;gap:8px;flex-wrap:wrap}\
.head{justify-content:space-between;align-items:center}\
.sub{color:var(--muted)}\
.hero-temp{font-size:48px;font-weight:700}\
.badge{border:1px solid var(--muted);border-radius:999px;padding:4px 10px}\
.grid{display:grid;grid-template-columns:repeat(auto-fit,minmax(120px,1fr));gap:12px}";

/// Embedded templates (compile-time).
mod embedded {
    pub const CURRENT: &str = r#"<div class="row head">
  <div>
    <div class="sub">{{ current.location }}</div>
    <div class="hero-temp">{{ current.temperature }} {{ current.symbol }}</div>
    <div class="sub">{{ current.description }}</div>
  </div>
  <div class="badge">{{ current.coordinates }}</div>
</div>
"#;

    pub const DETAILS: &str = r#"<h3 style="margin-top:0">Details</h3>
<div class="row">
  <span class="badge">Feels like: <strong>{{ details.feels_like }}</strong></span>
  <span class="badge">Humidity: <strong>{{ details.humidity }}</strong></span>
  <span class="badge">Wind: <strong>{{ details.wind }}</strong></span>
  <span class="badge">Precip: <strong>{{ details.precipitation }}</strong></span>
  <span class="badge">Daylight: <strong>{{ details.daylight }}</strong></span>
</div>
"#;

    pub const FORECAST: &str = r#"{% for tile in forecast %}<div class="tile">
  <div class="sub">{{ tile.date }}</div>
  <div style="font-size:26px">{{ tile.symbol }}</div>
  <div><strong>{{ tile.high }}</strong> / {{ tile.low }}</div>
  <div class="sub">Rain: {{ tile.rain }}</div>
{% if tile.wind_max %}  <div class="sub">Wind max: {{ tile.wind_max }}</div>
{% endif %}</div>
{% endfor %}"#;

    pub const DOCUMENT: &str = r#"<!doctype html>
<html lang="en"{% if light %} class="light"{% endif %}>
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
<style>{{ style | safe }}</style>
</head>
<body>
<section id="currentCard" class="card">
{% include "current.html" %}</section>
<section id="detailsCard" class="card">
{% include "details.html" %}</section>
<section id="forecast" class="grid">
{% include "forecast.html" %}</section>
</body>
</html>
"#;
}

/// Renders report views through the embedded templates.
#[derive(Debug)]
pub struct HtmlRenderer {
    tera: Tera,
}

impl HtmlRenderer {
    /// Compile the embedded templates. Every interpolated value is escaped.
    pub fn new() -> Result<Self, RenderError> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![".html", ".htm", ".xml"]);

        for (name, source) in [
            (CURRENT, embedded::CURRENT),
            (DETAILS, embedded::DETAILS),
            (FORECAST, embedded::FORECAST),
            (DOCUMENT, embedded::DOCUMENT),
        ] {
            tera.add_raw_template(name, source)
                .map_err(|e| RenderError::Compile(format!("{name}: {e}")))?;
        }
        debug!("compiled html templates");

        Ok(Self { tera })
    }

    pub fn current(&self, card: &CurrentCard) -> Result<String, RenderError> {
        let mut ctx = Context::new();
        ctx.insert("current", card);
        Ok(self.tera.render(CURRENT, &ctx)?)
    }

    pub fn details(&self, details: &Details) -> Result<String, RenderError> {
        let mut ctx = Context::new();
        ctx.insert("details", details);
        Ok(self.tera.render(DETAILS, &ctx)?)
    }

    pub fn forecast(&self, tiles: &[ForecastTile]) -> Result<String, RenderError> {
        let mut ctx = Context::new();
        ctx.insert("forecast", tiles);
        Ok(self.tera.render(FORECAST, &ctx)?)
    }

    /// A complete page. The light theme puts the `light` class on the root element.
    pub fn document(&self, theme: Theme, report: &Report) -> Result<String, RenderError> {
        let mut ctx = Context::from_serialize(report)?;
        ctx.insert("light", &(theme == Theme::Light));
        ctx.insert("style", STYLE);
        Ok(self.tera.render(DOCUMENT, &ctx)?)
    }
}
