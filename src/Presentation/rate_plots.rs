//! # Rate Plots
//!
//! Renders the plot report as SVG pages with `plotters`:
//!
//! | File | Content |
//! |------|---------|
//! | `<prefix>_title.svg` | species, reversible handling, reaction lists, lumps, free text, date |
//! | `<prefix>_loss.svg` | stacked loss rates, one panel per species |
//! | `<prefix>_production.svg` | stacked production rates |
//! | `<prefix>_loss_percent.svg` | stacked percent of the total loss |
//! | `<prefix>_production_percent.svg` | stacked percent of the total production |
//!
//! Layers are drawn in table order (ranked reactions, then `Other`). The y-limit of
//! an absolute panel is the top of the stack without `Other`, so a large remainder
//! does not flatten the named reactions; percent panels always span 0 to 100.
use crate::Rates::analysis::PlotTables;
use crate::Rates::errors::{RateError, RateResult};
use crate::Rates::rate_reader::{ReactionDictionary, Series};
use crate::Rates::ranking::{SeriesKey, ShapedTable};
use crate::settings::AnalysisOptions;
use indexmap::IndexMap;
use log::info;
use plotters::coord::Shift;
use plotters::prelude::*;

/// matplotlib's tab20 palette
const TAB20: [RGBColor; 20] = [
    RGBColor(31, 119, 180),
    RGBColor(174, 199, 232),
    RGBColor(255, 127, 14),
    RGBColor(255, 187, 120),
    RGBColor(44, 160, 44),
    RGBColor(152, 223, 138),
    RGBColor(214, 39, 40),
    RGBColor(255, 152, 150),
    RGBColor(148, 103, 189),
    RGBColor(197, 176, 213),
    RGBColor(140, 86, 75),
    RGBColor(196, 156, 148),
    RGBColor(227, 119, 194),
    RGBColor(247, 182, 210),
    RGBColor(127, 127, 127),
    RGBColor(199, 199, 199),
    RGBColor(188, 189, 34),
    RGBColor(219, 219, 141),
    RGBColor(23, 190, 207),
    RGBColor(158, 218, 229),
];

pub fn layer_color(index: usize) -> RGBColor {
    TAB20[index % TAB20.len()]
}

#[derive(Debug, Clone)]
pub struct RatePlotConfig {
    /// width of every page in pixels
    pub width: u32,
    /// height of one species panel in pixels
    pub panel_height: u32,
    pub background: RGBColor,
}

impl Default for RatePlotConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            panel_height: 500,
            background: WHITE,
        }
    }
}

/// paths of the five report pages
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFiles {
    pub title: String,
    pub loss: String,
    pub production: String,
    pub loss_percent: String,
    pub production_percent: String,
}

impl ReportFiles {
    pub fn with_prefix(prefix: &str) -> Self {
        Self {
            title: format!("{}_title.svg", prefix),
            loss: format!("{}_loss.svg", prefix),
            production: format!("{}_production.svg", prefix),
            loss_percent: format!("{}_loss_percent.svg", prefix),
            production_percent: format!("{}_production_percent.svg", prefix),
        }
    }

    pub fn all(&self) -> [&str; 5] {
        [
            &self.title,
            &self.loss,
            &self.production,
            &self.loss_percent,
            &self.production_percent,
        ]
    }
}

/// text of the title page
#[derive(Debug, Clone, PartialEq)]
pub struct TitlePage {
    pub species: Vec<String>,
    pub drop_reversible: bool,
    pub exclusive: Vec<String>,
    pub removed: Vec<String>,
    pub lump_production: String,
    pub lump_loss: String,
    pub text: String,
    pub date: String,
}

impl TitlePage {
    pub fn new(species: Vec<String>, options: &AnalysisOptions) -> RateResult<Self> {
        let concat = |a: &[String], b: &[String]| a.iter().chain(b).cloned().collect::<Vec<_>>();
        Ok(Self {
            species,
            drop_reversible: options.drop_reversible,
            exclusive: concat(
                &options.exclusive_production_reactions,
                &options.exclusive_loss_reactions,
            ),
            removed: concat(
                &options.remove_production_reactions,
                &options.remove_loss_reactions,
            ),
            lump_production: serde_json::to_string(&options.lump_production_reactions)?,
            lump_loss: serde_json::to_string(&options.lump_loss_reactions)?,
            text: options.title_page_text.clone(),
            date: chrono::Local::now().format("%Y-%m-%d").to_string(),
        })
    }

    pub fn lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("Production and loss rates of: {}", self.species.join(", ")),
            String::new(),
            format!("Reversible reactions removed: {}", self.drop_reversible),
            String::new(),
            format!("Exclusive reactions: {:?}", self.exclusive),
            format!("Removed reactions: {:?}", self.removed),
            String::new(),
            format!("Lumped production reactions: {}", self.lump_production),
            format!("Lumped loss reactions: {}", self.lump_loss),
            String::new(),
        ];
        lines.extend(self.text.lines().map(str::to_string));
        lines.push(String::new());
        lines.push(format!("Plotted on {}", self.date));
        lines
    }
}

fn render_err<E: std::fmt::Display>(e: E) -> RateError {
    RateError::Render(e.to_string())
}

/// `(lower, upper)` boundary of every layer of a stacked plot
pub fn stack_layers(len: usize, series: &IndexMap<SeriesKey, Series>) -> Vec<(Series, Series)> {
    let mut base = vec![0.0; len];
    let mut layers = Vec::with_capacity(series.len());
    for values in series.values() {
        let top: Series = base.iter().zip(values).map(|(b, v)| b + v).collect();
        layers.push((base, top.clone()));
        base = top;
    }
    layers
}

/// upper y-limit of an absolute panel: the highest stack top without `Other`
pub fn y_limit_without_other(len: usize, series: &IndexMap<SeriesKey, Series>) -> f64 {
    let named: IndexMap<SeriesKey, Series> = series
        .iter()
        .filter(|(key, _)| **key != SeriesKey::Other)
        .map(|(key, values)| (key.clone(), values.clone()))
        .collect();
    let top = stack_layers(len, &named)
        .last()
        .map(|(_, top)| top.iter().copied().fold(0.0, f64::max))
        .unwrap_or(0.0);
    if top > 0.0 { top * 1.05 } else { 1.0 }
}

fn draw_stacked_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    y_desc: &str,
    times: &[f64],
    series: &IndexMap<SeriesKey, Series>,
    reactions: &ReactionDictionary,
    percent: bool,
) -> RateResult<()> {
    let t_min = times.first().copied().unwrap_or(0.0);
    let t_max = match times.last().copied() {
        Some(t) if t > t_min => t,
        _ => t_min + 1.0,
    };
    let y_max = if percent {
        100.0
    } else {
        y_limit_without_other(times.len(), series)
    };

    let mut chart = ChartBuilder::on(area)
        .caption(caption, ("sans-serif", 24).into_font())
        .margin(15)
        .x_label_area_size(40)
        .y_label_area_size(80)
        .build_cartesian_2d(t_min..t_max, 0.0..y_max)
        .map_err(render_err)?;
    chart
        .configure_mesh()
        .x_desc("time / s")
        .y_desc(y_desc)
        .y_label_formatter(&|y| {
            if percent {
                format!("{:.0}", y)
            } else {
                format!("{:.1e}", y)
            }
        })
        .draw()
        .map_err(render_err)?;

    for (i, ((lower, upper), key)) in stack_layers(times.len(), series)
        .into_iter()
        .zip(series.keys())
        .enumerate()
    {
        let color = layer_color(i);
        let clip = |y: f64| y.clamp(0.0, y_max);
        let mut points: Vec<(f64, f64)> = times
            .iter()
            .zip(&upper)
            .map(|(t, y)| (*t, clip(*y)))
            .collect();
        points.extend(times.iter().zip(&lower).rev().map(|(t, y)| (*t, clip(*y))));
        chart
            .draw_series(std::iter::once(Polygon::new(points, color.filled())))
            .map_err(render_err)?
            .label(key.label(reactions))
            .legend(move |(x, y)| Rectangle::new([(x, y - 5), (x + 15, y + 5)], color.filled()));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .label_font(("sans-serif", 12))
        .draw()
        .map_err(render_err)?;
    Ok(())
}

/// One page with a stacked panel per species of `table`.
pub fn render_stacked_page(
    table: &ShapedTable,
    reactions: &ReactionDictionary,
    page_title: &str,
    percent: bool,
    output_path: &str,
    config: &RatePlotConfig,
) -> RateResult<()> {
    let n_species = table.species.len().max(1);
    let height = config.panel_height * n_species as u32;
    let root = SVGBackend::new(output_path, (config.width, height)).into_drawing_area();
    root.fill(&config.background).map_err(render_err)?;
    let root = root
        .titled(page_title, ("sans-serif", 30).into_font())
        .map_err(render_err)?;

    if table.species.is_empty() {
        root.draw(&Text::new(
            format!("no {} reactions left to plot", table.direction),
            (40, 40),
            ("sans-serif", 20).into_font(),
        ))
        .map_err(render_err)?;
    } else {
        let panels = root.split_evenly((table.species.len(), 1));
        for (panel, (species, series)) in panels.iter().zip(&table.species) {
            let direction = table.direction.as_str();
            let (caption, y_desc) = if percent {
                (
                    format!("{} {}", species, direction),
                    format!("% of {} {}", species, direction),
                )
            } else {
                (
                    format!("{} {}", species, direction),
                    format!("k[{}] / molecule cm-3 s-1", species),
                )
            };
            draw_stacked_panel(panel, &caption, &y_desc, &table.times, series, reactions, percent)?;
        }
    }
    root.present().map_err(render_err)?;
    Ok(())
}

pub fn render_title_page(page: &TitlePage, output_path: &str, config: &RatePlotConfig) -> RateResult<()> {
    let lines = page.lines();
    let height = (lines.len() as u32 + 4) * 24;
    let root = SVGBackend::new(output_path, (config.width, height)).into_drawing_area();
    root.fill(&config.background).map_err(render_err)?;
    for (i, line) in lines.iter().enumerate() {
        root.draw(&Text::new(
            line.clone(),
            (40, 40 + 24 * i as i32),
            ("sans-serif", 16).into_font(),
        ))
        .map_err(render_err)?;
    }
    root.present().map_err(render_err)?;
    Ok(())
}

/// Writes all five pages and returns their paths.
pub fn render_report(
    tables: &PlotTables,
    production_reactions: &ReactionDictionary,
    loss_reactions: &ReactionDictionary,
    title: &TitlePage,
    prefix: &str,
    config: &RatePlotConfig,
) -> RateResult<ReportFiles> {
    let files = ReportFiles::with_prefix(prefix);
    render_title_page(title, &files.title, config)?;
    render_stacked_page(&tables.loss.rates, loss_reactions, "Loss Reactions", false, &files.loss, config)?;
    render_stacked_page(
        &tables.production.rates,
        production_reactions,
        "Production Reactions",
        false,
        &files.production,
        config,
    )?;
    render_stacked_page(
        &tables.loss.percent,
        loss_reactions,
        "% Loss Reactions",
        true,
        &files.loss_percent,
        config,
    )?;
    render_stacked_page(
        &tables.production.percent,
        production_reactions,
        "% Production Reactions",
        true,
        &files.production_percent,
        config,
    )?;
    info!("Plot report written to {:?}", files.all());
    Ok(files)
}
