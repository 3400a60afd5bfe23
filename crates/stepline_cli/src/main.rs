//! Stepline CLI
//!
//! Drive the step progress widget headlessly: replay progress updates frame
//! by frame, or inspect the computed layout.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use stepline_animation::AnimationScheduler;
use stepline_core::LabelPosition;
use stepline_widgets::{
    EstimatedTextMeasurer, ProgressSequencer, StepperConfig, StepperLayout, StepperSnapshot,
};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod text_art;

use text_art::TextRenderer;

/// Layout units per character column in text frames
const UNITS_PER_COLUMN: f32 = 4.0;

/// Upper bound on frames spent settling one update
const MAX_SETTLE_FRAMES: usize = 100_000;

#[derive(Parser)]
#[command(name = "stepline")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Step progress widget simulator", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply progress values and print every animation frame
    Simulate {
        /// Progress values to apply in order (clamped to 0..=1)
        #[arg(required = true, allow_negative_numbers = true)]
        values: Vec<f32>,

        /// Number of step markers (at least 2)
        #[arg(short, long)]
        markers: Option<usize>,

        /// Stepper config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Frame duration in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: f32,

        /// Container width in layout units
        #[arg(short, long, default_value = "320")]
        width: f32,

        /// Print frames as JSON lines
        #[arg(long)]
        json: bool,

        /// Apply each value one frame after the previous instead of waiting
        /// for the stepper to settle
        #[arg(long)]
        rapid: bool,
    },

    /// Print the computed layout as JSON
    Layout {
        /// Container width in layout units
        #[arg(short, long, default_value = "320")]
        width: f32,

        /// Number of step markers (at least 2)
        #[arg(short, long)]
        markers: Option<usize>,

        /// Stepper config file (TOML)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Lay out without step labels
        #[arg(long)]
        no_labels: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for frames
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Simulate {
            values,
            markers,
            config,
            frame_ms,
            width,
            json,
            rapid,
        } => cmd_simulate(&values, markers, config.as_deref(), frame_ms, width, json, rapid),

        Commands::Layout {
            width,
            markers,
            config,
            no_labels,
        } => cmd_layout(width, markers, config.as_deref(), no_labels),
    }
}

fn load_config(path: Option<&Path>) -> Result<StepperConfig> {
    match path {
        Some(path) => StepperConfig::load(path)
            .with_context(|| format!("Failed to load stepper config from {}", path.display())),
        None => Ok(StepperConfig::new()),
    }
}

/// Build and mount a stepper with the demo labels
fn build_stepper(
    scheduler: &AnimationScheduler,
    config: StepperConfig,
    markers: Option<usize>,
    labels: bool,
) -> ProgressSequencer {
    let mut stepper = ProgressSequencer::new(scheduler.handle(), config);
    if let Some(markers) = markers {
        stepper.set_number_of_markers(markers);
    }

    // The sequencer keeps the describer weakly; it only has to outlive mount
    let describer = Arc::new(|index: usize| Some(format!("Step {}", index + 1)));
    if labels {
        stepper.set_describer(&describer);
    }
    stepper.mount();
    stepper
}

#[derive(Serialize)]
struct Frame<'a> {
    time_ms: f32,
    #[serde(flatten)]
    snapshot: &'a StepperSnapshot,
}

struct Simulation {
    scheduler: AnimationScheduler,
    stepper: ProgressSequencer,
    layout: StepperLayout,
    frame_ms: f32,
    time_ms: f32,
    json: bool,
}

impl Simulation {
    /// Advance one frame and print it; returns true while anything moves
    fn frame(&mut self) -> Result<bool> {
        let active = self.scheduler.advance(self.frame_ms);
        self.time_ms += self.frame_ms;
        self.emit()?;
        Ok(active || self.stepper.is_animating())
    }

    fn settle(&mut self) -> Result<()> {
        let mut frames = 0;
        while self.frame()? {
            frames += 1;
            if frames > MAX_SETTLE_FRAMES {
                anyhow::bail!("Stepper did not settle after {} frames", frames);
            }
        }
        Ok(())
    }

    fn emit(&self) -> Result<()> {
        let snapshot = self.stepper.snapshot();
        if self.json {
            let frame = Frame {
                time_ms: self.time_ms,
                snapshot: &snapshot,
            };
            println!("{}", serde_json::to_string(&frame)?);
        } else {
            let mut renderer = TextRenderer::new(self.layout.size.width, UNITS_PER_COLUMN);
            self.stepper.paint(&self.layout, &mut renderer);
            println!(
                "{:>7.0}ms  {:.3}  {}",
                self.time_ms,
                snapshot.fill_position,
                renderer.row()
            );
        }
        Ok(())
    }

    fn print_labels(&self) {
        if self.json || self.layout.labels.is_empty() {
            return;
        }
        let mut renderer = TextRenderer::new(self.layout.size.width, UNITS_PER_COLUMN);
        self.stepper.paint(&self.layout, &mut renderer);
        // Align with the row printed after the time and position columns
        println!("{:18}{}", "", renderer.labels());
    }
}

fn cmd_simulate(
    values: &[f32],
    markers: Option<usize>,
    config: Option<&Path>,
    frame_ms: f32,
    width: f32,
    json: bool,
    rapid: bool,
) -> Result<()> {
    if frame_ms.is_nan() || frame_ms <= 0.0 {
        anyhow::bail!("Frame duration must be positive, got {}", frame_ms);
    }
    if width.is_nan() || width <= 0.0 {
        anyhow::bail!("Width must be positive, got {}", width);
    }

    let config = load_config(config)?;
    let scheduler = AnimationScheduler::new();
    let stepper = build_stepper(&scheduler, config, markers, true);
    let layout = stepper.layout(width, &EstimatedTextMeasurer);

    info!(
        "Simulating {} markers, {} updates ({})",
        stepper.number_of_markers(),
        values.len(),
        if rapid { "rapid" } else { "settled" }
    );

    let mut simulation = Simulation {
        scheduler,
        stepper,
        layout,
        frame_ms,
        time_ms: 0.0,
        json,
    };

    let labels_above = simulation.stepper.label_position() == LabelPosition::Above;
    if labels_above {
        simulation.print_labels();
    }
    simulation.emit()?;

    for &value in values {
        simulation.stepper.set_progress(value);
        if rapid {
            simulation.frame()?;
        } else {
            simulation.settle()?;
        }
    }
    simulation.settle()?;

    if !labels_above {
        simulation.print_labels();
    }

    info!(
        "Settled at progress {} after {} chains ({:.0} ms)",
        simulation.stepper.progress(),
        simulation.stepper.chains_started(),
        simulation.time_ms
    );
    Ok(())
}

fn cmd_layout(
    width: f32,
    markers: Option<usize>,
    config: Option<&Path>,
    no_labels: bool,
) -> Result<()> {
    if width.is_nan() || width < 0.0 {
        anyhow::bail!("Width must not be negative, got {}", width);
    }

    let config = load_config(config)?;
    let scheduler = AnimationScheduler::new();
    let stepper = build_stepper(&scheduler, config, markers, !no_labels);
    let layout = stepper.layout(width, &EstimatedTextMeasurer);

    println!(
        "{}",
        serde_json::to_string_pretty(&layout).context("Failed to serialize layout")?
    );
    Ok(())
}
