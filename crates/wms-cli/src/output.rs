//! Output formatting for command results.
//!
//! Every result can be rendered as human-readable text or as JSON. The text
//! writers take any [`Write`] sink so they can be tested without a terminal.

use std::io::{self, Write};

use clap::ValueEnum;
use serde::Serialize;

use wms_lib::{AvailableBin, PathResult, RouteResult, RouteStep, WarehouseSummary};

use crate::terminal::{format_distance, ColorPalette};

/// Output format selected with `--format`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text.
    #[default]
    Text,
    /// Pretty-printed JSON.
    Json,
}

/// Result of the `init` command.
#[derive(Debug, Clone, Serialize)]
pub struct InitSummary {
    pub database: String,
    pub warehouses: usize,
    pub bins: usize,
    pub products: usize,
}

#[derive(Serialize)]
struct RouteJson<'a> {
    route: &'a [String],
    total_distance: f64,
    steps: &'a [RouteStep],
    bins_count: usize,
}

#[derive(Serialize)]
struct PathJson<'a> {
    path: &'a [String],
    distance: f64,
    steps: usize,
}

#[derive(Serialize)]
struct AvailableJson<'a> {
    sku: &'a str,
    requested_quantity: i64,
    bins: &'a [AvailableBin],
}

impl OutputFormat {
    pub fn render_route(self, result: &RouteResult) -> io::Result<()> {
        match self {
            OutputFormat::Text => write_route(&mut io::stdout(), result, ColorPalette::detect()),
            OutputFormat::Json => render_json(&RouteJson {
                route: &result.route,
                total_distance: result.total_distance,
                steps: &result.steps,
                bins_count: result.bins_count(),
            }),
        }
    }

    pub fn render_path(self, result: &PathResult) -> io::Result<()> {
        match self {
            OutputFormat::Text => write_path(&mut io::stdout(), result, ColorPalette::detect()),
            OutputFormat::Json => render_json(&PathJson {
                path: &result.path,
                distance: result.distance,
                steps: result.hop_count(),
            }),
        }
    }

    pub fn render_available(
        self,
        sku: &str,
        requested_quantity: i64,
        bins: &[AvailableBin],
    ) -> io::Result<()> {
        match self {
            OutputFormat::Text => write_available(
                &mut io::stdout(),
                sku,
                requested_quantity,
                bins,
                ColorPalette::detect(),
            ),
            OutputFormat::Json => render_json(&AvailableJson {
                sku,
                requested_quantity,
                bins,
            }),
        }
    }

    pub fn render_warehouses(self, warehouses: &[WarehouseSummary]) -> io::Result<()> {
        match self {
            OutputFormat::Text => {
                write_warehouses(&mut io::stdout(), warehouses, ColorPalette::detect())
            }
            OutputFormat::Json => render_json(&warehouses),
        }
    }

    pub fn render_init(self, summary: &InitSummary) -> io::Result<()> {
        match self {
            OutputFormat::Text => {
                let mut stdout = io::stdout();
                writeln!(
                    stdout,
                    "Initialised {} ({} warehouses, {} bins, {} products)",
                    summary.database, summary.warehouses, summary.bins, summary.products
                )
            }
            OutputFormat::Json => render_json(summary),
        }
    }
}

/// Render any serializable value as pretty JSON on stdout.
pub fn render_json<T: Serialize + ?Sized>(value: &T) -> io::Result<()> {
    let mut stdout = io::stdout();
    serde_json::to_writer_pretty(&mut stdout, value).map_err(io::Error::other)?;
    stdout.write_all(b"\n")?;
    Ok(())
}

/// Numbered picking list; each line after the first shows the leg distance.
pub fn write_route<W: Write>(
    out: &mut W,
    result: &RouteResult,
    palette: ColorPalette,
) -> io::Result<()> {
    writeln!(
        out,
        "Picking route ({} bins, total distance {}):",
        result.bins_count(),
        format_distance(result.total_distance)
    )?;

    for (i, code) in result.route.iter().enumerate() {
        write!(
            out,
            "{gray}{:>4}.{reset} {bold}{}{reset}",
            i + 1,
            code,
            gray = palette.gray,
            bold = palette.white_bold,
            reset = palette.reset
        )?;
        // steps[i - 1] is the leg arriving at route[i]
        match i.checked_sub(1).and_then(|leg| result.steps.get(leg)) {
            Some(step) => writeln!(
                out,
                "  {cyan}+{}{reset}",
                format_distance(step.distance),
                cyan = palette.cyan,
                reset = palette.reset
            )?,
            None => writeln!(out)?,
        }
    }
    Ok(())
}

/// Path rendered with `+`/`|`/`-` prefixes for first/middle/last bins.
pub fn write_path<W: Write>(
    out: &mut W,
    result: &PathResult,
    palette: ColorPalette,
) -> io::Result<()> {
    let (Some(start), Some(end)) = (result.path.first(), result.path.last()) else {
        return Ok(());
    };
    writeln!(
        out,
        "Path from {} to {} ({} hops, distance {}{}{}):",
        start,
        end,
        result.hop_count(),
        palette.cyan,
        format_distance(result.distance),
        palette.reset
    )?;

    let len = result.path.len();
    for (i, code) in result.path.iter().enumerate() {
        let prefix = if i == 0 {
            '+'
        } else if i + 1 == len {
            '-'
        } else {
            '|'
        };
        writeln!(
            out,
            "{gray}{prefix}{reset} {bold}{code}{reset}",
            gray = palette.gray,
            bold = palette.white_bold,
            reset = palette.reset
        )?;
    }
    Ok(())
}

pub fn write_available<W: Write>(
    out: &mut W,
    sku: &str,
    requested_quantity: i64,
    bins: &[AvailableBin],
    palette: ColorPalette,
) -> io::Result<()> {
    if bins.is_empty() {
        return writeln!(out, "No bins hold {sku}.");
    }

    writeln!(out, "Bins holding {sku} (requested {requested_quantity}):")?;
    for bin in bins {
        let (color, mark) = if bin.covers_request {
            (palette.green, "covers request")
        } else {
            (palette.yellow, "partial")
        };
        writeln!(
            out,
            "  {gray}{}{reset}  {bold}{}{reset}  qty {:>5}  free {:>7}  {color}{mark}{reset}",
            bin.warehouse_id,
            bin.bin_code,
            bin.quantity,
            format_distance(bin.available_space),
            gray = palette.gray,
            bold = palette.white_bold,
            reset = palette.reset
        )?;
    }
    Ok(())
}

pub fn write_warehouses<W: Write>(
    out: &mut W,
    warehouses: &[WarehouseSummary],
    palette: ColorPalette,
) -> io::Result<()> {
    if warehouses.is_empty() {
        return writeln!(out, "No warehouses found.");
    }

    for warehouse in warehouses {
        write!(
            out,
            "{bold}{}{reset}  {}",
            warehouse.id,
            warehouse.name,
            bold = palette.white_bold,
            reset = palette.reset
        )?;
        match &warehouse.address {
            Some(address) => writeln!(out, "  {}({}){}", palette.gray, address, palette.reset)?,
            None => writeln!(out)?,
        }
    }
    Ok(())
}
