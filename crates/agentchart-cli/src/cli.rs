// File: crates/agentchart-cli/src/cli.rs
// Summary: Command-line surface and the fetch-or-load render flow behind it.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use agentchart_core::{AreaChart, ChartConfig, Color, StackedArea};
use agentchart_fetch::{load_default, load_from_file, AgentChartConfig, ChartHandle, ChartRenderer, RenderTarget, RenderedChart};
use agentchart_skia::{theme, RasterOptions};
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;

use crate::input::{load_grouped, load_series};
use crate::output::OutputTarget;

#[derive(Parser)]
#[command(name = "agentchart")]
#[command(about = "Render agent metric time series as area and stacked-area charts")]
#[command(version)]
pub struct Cli {
    /// YAML config file; defaults to `$AGENTCHART_CONFIG`, then built-in settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Single-series area chart
    Area {
        #[command(flatten)]
        chart: ChartArgs,
        /// Fill and line color, `#rgb` or `#rrggbb`
        #[arg(long)]
        fill: Option<String>,
    },
    /// Stacked area chart, one layer per group
    Stacked {
        #[command(flatten)]
        chart: ChartArgs,
        /// Layer colors, comma separated; ignored for memory and load
        #[arg(long, value_delimiter = ',')]
        colors: Vec<String>,
    },
}

#[derive(Args)]
pub struct ChartArgs {
    #[arg(long)]
    pub uid: String,
    #[arg(long)]
    pub datapoint: String,
    #[arg(long)]
    pub width: Option<u32>,
    #[arg(long)]
    pub height: Option<u32>,
    /// Read records from a JSON or CSV file instead of the metrics server
    #[arg(long)]
    pub input: Option<PathBuf>,
    /// SVG output path
    #[arg(long)]
    pub out: PathBuf,
    /// Also rasterize to PNG next to the SVG
    #[arg(long)]
    pub png: bool,
    /// Overrides `server.base_url`
    #[arg(long)]
    pub base_url: Option<String>,
    /// Overrides `server.timeout_ms`
    #[arg(long)]
    pub timeout_ms: Option<u64>,
}

impl ChartArgs {
    fn apply(&self, cfg: &mut AgentChartConfig) -> Result<()> {
        if let Some(url) = &self.base_url {
            cfg.server.base_url = url.clone();
        }
        if let Some(ms) = self.timeout_ms {
            cfg.server.timeout_ms = ms;
        }
        if let Some(w) = self.width {
            cfg.charts.width = w;
        }
        if let Some(h) = self.height {
            cfg.charts.height = h;
        }
        cfg.validate().context("invalid settings after command-line overrides")?;
        Ok(())
    }

    fn chart_config(&self, cfg: &AgentChartConfig) -> ChartConfig {
        ChartConfig::new(&self.uid, &self.datapoint).with_size(cfg.charts.width, cfg.charts.height)
    }

    fn target(&self, cfg: &AgentChartConfig) -> OutputTarget {
        let target = OutputTarget::svg_only(&self.out);
        if self.png {
            target.with_png(RasterOptions { theme: theme::find(&cfg.charts.theme), ..Default::default() })
        } else {
            target
        }
    }
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let mut cfg = match &self.config {
            Some(path) => load_from_file(path).with_context(|| format!("loading config {}", path.display()))?,
            None => load_default().context("loading config named by AGENTCHART_CONFIG")?,
        };

        match self.command {
            Commands::Area { chart, fill } => {
                chart.apply(&mut cfg)?;
                let fill = match fill {
                    Some(s) => parse_color(&s)?,
                    None => cfg.charts.fill_color()?,
                };
                let config = chart.chart_config(&cfg);
                let target = Arc::new(chart.target(&cfg));

                match &chart.input {
                    Some(path) => {
                        let points = load_series(path)?;
                        let scene = AreaChart::new(config, fill).layout(&points)?.scene();
                        append(target.as_ref(), scene)?;
                    }
                    None => {
                        let renderer = ChartRenderer::from_config(&cfg)?;
                        finish(renderer.area_chart(config, target.clone(), fill)).await?;
                    }
                }
                report(&chart.out, target.png_path());
            }
            Commands::Stacked { chart, colors } => {
                chart.apply(&mut cfg)?;
                let colors = if colors.is_empty() {
                    None
                } else {
                    Some(colors.iter().map(|c| parse_color(c)).collect::<Result<Vec<_>>>()?)
                };
                let config = chart.chart_config(&cfg);
                let target = Arc::new(chart.target(&cfg));

                match &chart.input {
                    Some(path) => {
                        let rows = load_grouped(path)?;
                        let scene = StackedArea::new(config, colors)
                            .with_overflow(cfg.charts.palette_overflow)
                            .layout(&rows)?
                            .scene();
                        append(target.as_ref(), scene)?;
                    }
                    None => {
                        let renderer = ChartRenderer::from_config(&cfg)?;
                        finish(renderer.stacked_area(config, target.clone(), colors)).await?;
                    }
                }
                report(&chart.out, target.png_path());
            }
        }
        Ok(())
    }
}

fn parse_color(s: &str) -> Result<Color> {
    Color::parse_hex(s).with_context(|| format!("bad color '{s}'"))
}

fn append(target: &dyn RenderTarget, scene: agentchart_core::Scene) -> Result<()> {
    let svg = agentchart_core::render_svg(&scene);
    target.append(RenderedChart { svg, scene })?;
    Ok(())
}

/// Wait for the render; Ctrl-C cancels it.
async fn finish(handle: ChartHandle) -> Result<()> {
    tokio::select! {
        _ = handle.settled() => {}
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted, cancelling render");
            handle.cancel();
        }
    }
    handle.wait().await.context("render failed")
}

fn report(svg: &Path, png: Option<&Path>) {
    info!(path = %svg.display(), "wrote svg");
    if let Some(p) = png {
        info!(path = %p.display(), "wrote png");
    }
}
