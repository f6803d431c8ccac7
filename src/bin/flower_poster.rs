use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Args, Parser, Subcommand};
use flower_poster::{PaletteName, RenderConfig, Rgb};

#[derive(Parser, Debug)]
#[command(name = "flower-poster", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a poster and write it as a PNG.
    Render(RenderArgs),
    /// Print the effective config as JSON.
    Config(ConfigArgs),
    /// Print one line per planned flower.
    Plan(ConfigArgs),
}

#[derive(Args, Debug)]
struct RenderArgs {
    #[command(flatten)]
    config: ConfigArgs,

    /// Output PNG path (defaults to flower_poster_seed<seed>.png).
    #[arg(long)]
    out: Option<PathBuf>,

    /// Export density in pixels per inch of the 6x8 inch poster.
    #[arg(long, default_value_t = flower_poster::EXPORT_DPI)]
    dpi: f64,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Base config JSON; flags below override its fields.
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    seed: Option<u64>,

    /// Number of flowers.
    #[arg(long)]
    layers: Option<u32>,

    #[arg(long)]
    petals: Option<u32>,

    #[arg(long)]
    size_min: Option<f64>,

    #[arg(long)]
    size_max: Option<f64>,

    #[arg(long)]
    petal_factor_min: Option<f64>,

    #[arg(long)]
    petal_factor_max: Option<f64>,

    /// Background color as #RRGGBB.
    #[arg(long, value_parser = parse_rgb)]
    bg: Option<Rgb>,

    /// Disable the soft shadow.
    #[arg(long)]
    no_shadow: bool,

    #[arg(long)]
    shadow_ratio: Option<f64>,

    #[arg(long)]
    gradient_steps: Option<u32>,

    #[arg(long)]
    alpha_start: Option<f64>,

    #[arg(long)]
    alpha_step: Option<f64>,

    /// fresh or dreamy.
    #[arg(long, value_parser = parse_palette)]
    palette: Option<PaletteName>,
}

fn parse_rgb(s: &str) -> Result<Rgb, String> {
    Rgb::from_hex(s).map_err(|e| e.to_string())
}

fn parse_palette(s: &str) -> Result<PaletteName, String> {
    s.parse().map_err(|e: flower_poster::PosterError| e.to_string())
}

impl ConfigArgs {
    fn resolve(&self) -> anyhow::Result<RenderConfig> {
        let mut cfg = match &self.config {
            Some(path) => RenderConfig::from_json_file(path)?,
            None => RenderConfig::default(),
        };

        if let Some(v) = self.seed {
            cfg.seed = v;
        }
        if let Some(v) = self.layers {
            cfg.n_layers = v;
        }
        if let Some(v) = self.petals {
            cfg.petals = v;
        }
        if let Some(v) = self.size_min {
            cfg.size_min = v;
        }
        if let Some(v) = self.size_max {
            cfg.size_max = v;
        }
        if let Some(v) = self.petal_factor_min {
            cfg.petal_factor_min = v;
        }
        if let Some(v) = self.petal_factor_max {
            cfg.petal_factor_max = v;
        }
        if let Some(v) = self.bg {
            cfg.bg_color = v;
        }
        if self.no_shadow {
            cfg.with_shadow = false;
        }
        if let Some(v) = self.shadow_ratio {
            cfg.shadow_ratio = v;
        }
        if let Some(v) = self.gradient_steps {
            cfg.gradient_steps = v;
        }
        if let Some(v) = self.alpha_start {
            cfg.alpha_start = v;
        }
        if let Some(v) = self.alpha_step {
            cfg.alpha_step = v;
        }
        if let Some(v) = self.palette {
            cfg.palette_name = v;
        }

        cfg.validate()?;
        Ok(cfg)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Config(args) => cmd_config(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let cfg = args.config.resolve()?;
    let poster = flower_poster::render(&cfg).context("render poster")?;
    let png = poster.export_png(args.dpi).context("export png")?;

    let out = args
        .out
        .unwrap_or_else(|| PathBuf::from(poster.suggested_file_name()));
    flower_poster::write_png(&out, &png)?;

    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let cfg = args.resolve()?;
    println!("{}", cfg.to_json_pretty()?);
    Ok(())
}

fn cmd_plan(args: ConfigArgs) -> anyhow::Result<()> {
    let cfg = args.resolve()?;
    let scene = flower_poster::plan_poster(&cfg, &mut flower_poster::PosterRng::new(cfg.seed));

    println!("palette: {} ({} colors)", cfg.palette_name, scene.palette.len());
    for (i, f) in scene.flowers.iter().enumerate() {
        println!(
            "{i:>3}: center=({:.4}, {:.4}) radius={:.4} factor={:.4} color={}",
            f.center.x,
            f.center.y,
            f.radius,
            f.petal_factor,
            f.color.to_hex()
        );
    }
    Ok(())
}
