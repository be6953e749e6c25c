// SPDX-License-Identifier: MIT
//
// n-colors — print a palette of maximally distinguishable colors.
//
// The binary wires the workspace together:
//
//   n-color → sRGB / Lab conversions, ANSI swatches
//   n-cycle → strategies, candidate pool, greedy selection engine
//
// Flow:
//
//   args → CyclerConfig (file, then flag overrides) → Cycler
//        → get_range(start, start + count) → formatter → stdout
//
// Logs go to stderr so the palette on stdout stays pipeable.

use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use n_color::{Rgb, ansi};
use n_cycle::{Cycler, CyclerConfig, Network, Strategy};

// ─── Arguments ──────────────────────────────────────────────────────────────

/// Print a sequence of maximally distinguishable colors.
#[derive(Debug, Parser)]
#[command(name = "n-colors", version, about)]
struct Cli {
    /// How many colors to print.
    #[arg(short = 'n', long, default_value_t = 16)]
    count: usize,

    /// Index of the first color.
    #[arg(long, default_value_t = 0)]
    start: usize,

    /// Distance strategy: rgb, lab, cie94, ciede2000, nn.
    #[arg(short, long)]
    strategy: Option<Strategy>,

    /// JSON network parameters (required for `nn`).
    #[arg(long, value_name = "PATH")]
    params: Option<PathBuf>,

    /// Custom seed color, e.g. `#ff8800`. Repeat for more.
    #[arg(long = "seed", value_name = "HEX")]
    seeds: Vec<String>,

    /// Emit black and white instead of reserving them.
    #[arg(long)]
    keep_bw: bool,

    /// Tie-breaking perturbation added to every running minimum.
    #[arg(long)]
    eps: Option<f64>,

    /// JSON engine configuration. Flags override its fields.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = Format::Hex)]
    format: Format,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// `#rrggbb`
    Hex,
    /// Channel floats in [0, 1].
    Rgb,
    /// Channel integers in [0, 255].
    Rgb8,
    /// `[r, g, b, 1.0]` lists, ready to paste into a plotting script.
    Matplotlib,
    /// A colored block and the hex code, for terminals with 24-bit color.
    Swatch,
}

// ─── Setup ──────────────────────────────────────────────────────────────────

fn init_logging(verbose: u8) {
    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr)
        .init();
}

/// The config file (or defaults) with command-line overrides applied.
fn build_config(cli: &Cli) -> Result<CyclerConfig> {
    let mut config = match &cli.config {
        Some(path) => CyclerConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => CyclerConfig::default(),
    };

    if let Some(strategy) = cli.strategy {
        config.strategy = strategy;
    }
    if cli.keep_bw {
        config.remove_bw = false;
    }
    if let Some(eps) = cli.eps {
        config.eps = eps;
    }
    if !cli.seeds.is_empty() {
        config.seed = Some(parse_seeds(&cli.seeds)?);
    }

    config.validate().context("invalid configuration")?;
    Ok(config)
}

fn parse_seeds(seeds: &[String]) -> Result<Vec<Vec<f64>>> {
    seeds
        .iter()
        .map(|s| {
            Rgb::hex(s)
                .map(|c| c.to_array().to_vec())
                .with_context(|| format!("invalid seed color `{s}` (expected #RGB or #RRGGBB)"))
        })
        .collect()
}

fn load_network(cli: &Cli, strategy: Strategy) -> Result<Option<Network>> {
    match (&cli.params, strategy.needs_network()) {
        (Some(path), true) => {
            let network = Network::from_path(path)
                .with_context(|| format!("loading network parameters {}", path.display()))?;
            info!(depth = network.depth(), dim = network.output_dim(), "network loaded");
            Ok(Some(network))
        }
        (None, true) => bail!("strategy `{strategy}` requires --params <PATH>"),
        (Some(path), false) => {
            warn!(path = %path.display(), %strategy, "ignoring --params for a non-learned strategy");
            Ok(None)
        }
        (None, false) => Ok(None),
    }
}

// ─── Output ─────────────────────────────────────────────────────────────────

fn write_color(w: &mut impl Write, color: Rgb, format: Format) -> io::Result<()> {
    match format {
        Format::Hex => writeln!(w, "{}", color.to_hex()),
        Format::Rgb => writeln!(w, "{:.6} {:.6} {:.6}", color.r, color.g, color.b),
        Format::Rgb8 => {
            let (r, g, b) = color.to_rgb8();
            writeln!(w, "{r} {g} {b}")
        }
        Format::Matplotlib => {
            writeln!(w, "[{:.6}, {:.6}, {:.6}, 1.0],", color.r, color.g, color.b)
        }
        Format::Swatch => {
            ansi::labeled_swatch(w, color)?;
            writeln!(w)
        }
    }
}

fn write_palette(w: &mut impl Write, colors: &[Rgb], format: Format) -> io::Result<()> {
    for &color in colors {
        write_color(w, color, format)?;
    }
    w.flush()
}

// ─── Main ───────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = build_config(&cli)?;
    let network = load_network(&cli, config.strategy)?;
    let mut cycler = Cycler::new(&config, network).context("building color cycler")?;

    let Some(stop) = cli.start.checked_add(cli.count) else {
        bail!("--start {} plus --count {} overflows", cli.start, cli.count);
    };
    let colors = cycler.get_range(cli.start, stop, 1)?;
    info!(count = colors.len(), start = cli.start, "palette computed");

    let mut out = BufWriter::new(io::stdout().lock());
    write_palette(&mut out, &colors, cli.format).context("writing palette")?;
    Ok(())
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("n-colors").chain(args.iter().copied())).unwrap()
    }

    fn render(colors: &[Rgb], format: Format) -> String {
        let mut buf = Vec::new();
        write_palette(&mut buf, colors, format).unwrap();
        String::from_utf8(buf).unwrap()
    }

    // ─── Arguments ───────────────────────────────────────────────────────

    #[test]
    fn defaults() {
        let cli = parse(&[]);
        assert_eq!(cli.count, 16);
        assert_eq!(cli.start, 0);
        assert_eq!(cli.format, Format::Hex);
        let config = build_config(&cli).unwrap();
        assert_eq!(config, CyclerConfig::default());
    }

    #[test]
    fn flags_override_config() {
        let cli = parse(&[
            "-s", "lab", "--keep-bw", "--eps", "0", "--seed", "#f80", "--seed", "000000",
        ]);
        let config = build_config(&cli).unwrap();
        assert_eq!(config.strategy, Strategy::Lab);
        assert!(!config.remove_bw);
        assert_eq!(config.eps, 0.0);
        assert_eq!(
            config.seed,
            Some(vec![
                Rgb::hex("#ff8800").unwrap().to_array().to_vec(),
                vec![0.0, 0.0, 0.0],
            ])
        );
    }

    #[test]
    fn strategy_aliases_parse() {
        assert_eq!(parse(&["--strategy", "nn"]).strategy, Some(Strategy::Network));
        assert_eq!(parse(&["-s", "CIEDE2000"]).strategy, Some(Strategy::Ciede2000));
        assert!(Cli::try_parse_from(["n-colors", "-s", "hsv"]).is_err());
    }

    #[test]
    fn bad_seed_is_reported() {
        let cli = parse(&["--seed", "#zzzzzz"]);
        let err = build_config(&cli).unwrap_err();
        assert!(err.to_string().contains("#zzzzzz"));
    }

    #[test]
    fn negative_eps_is_rejected() {
        let cli = parse(&["--eps=-1"]);
        assert!(build_config(&cli).is_err());
    }

    #[test]
    fn learned_strategy_needs_params() {
        let cli = parse(&["-s", "nn"]);
        let err = load_network(&cli, Strategy::Network).unwrap_err();
        assert!(err.to_string().contains("--params"));
        assert!(load_network(&cli, Strategy::Lab).unwrap().is_none());
    }

    #[test]
    fn missing_params_file_is_reported() {
        let cli = parse(&["-s", "nn", "--params", "/nonexistent/params.json"]);
        let err = load_network(&cli, Strategy::Network).unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/params.json"));
    }

    #[test]
    fn params_file_loads_network() {
        let path = std::env::temp_dir().join(format!("n-colors-params-{}.json", std::process::id()));
        std::fs::write(
            &path,
            r#"{ "layers": [ { "weights": [[1, 0, 0], [0, 1, 0]], "bias": [0, 0], "activation": "tanh" } ] }"#,
        )
        .unwrap();
        let cli = parse(&["-s", "nn", "--params", path.to_str().unwrap()]);
        let network = load_network(&cli, Strategy::Network);
        std::fs::remove_file(&path).unwrap();

        let network = network.unwrap().unwrap();
        assert_eq!(network.output_dim(), 2);
        assert_eq!(network.depth(), 1);
    }

    #[test]
    fn out_of_range_start_is_an_error() {
        let cli = parse(&["-s", "rgb", "--start", "2000000", "-n", "1"]);
        let config = build_config(&cli).unwrap();
        let mut cycler = Cycler::new(&config, None).unwrap();
        assert!(cycler.get_range(cli.start, cli.start + cli.count, 1).is_err());
    }

    // ─── Output ──────────────────────────────────────────────────────────

    #[test]
    fn hex_output() {
        assert_eq!(render(&[Rgb::RED, Rgb::from_rgb8(0, 136, 255)], Format::Hex), "#ff0000\n#0088ff\n");
    }

    #[test]
    fn numeric_outputs() {
        let c = Rgb::from_rgb8(255, 0, 51);
        assert_eq!(render(&[c], Format::Rgb), "1.000000 0.000000 0.200000\n");
        assert_eq!(render(&[c], Format::Rgb8), "255 0 51\n");
        assert_eq!(render(&[c], Format::Matplotlib), "[1.000000, 0.000000, 0.200000, 1.0],\n");
    }

    #[test]
    fn swatch_output_is_colored() {
        let out = render(&[Rgb::GREEN], Format::Swatch);
        assert!(out.starts_with("\x1b[48;2;0;255;0m  \x1b[0m"));
        assert!(out.contains("#00ff00"));
        assert!(out.ends_with('\n'));
    }

    #[test]
    fn end_to_end_palette() {
        let cli = parse(&["-n", "3", "-s", "rgb"]);
        let config = build_config(&cli).unwrap();
        let mut cycler = Cycler::new(&config, None).unwrap();
        let colors = cycler.get_range(cli.start, cli.start + cli.count, 1).unwrap();
        assert_eq!(render(&colors, Format::Hex), "#ff0000\n#00ff00\n#0000ff\n");
    }
}
