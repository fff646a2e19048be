mod cli;

use chrono::Local;
use clap::Parser;
use esai::assessment::{self, Assessment};
use esai::error::Result;
use esai::scoring::formulas::{Formula, PREPARATION_AUTOMATION, PREPARATION_STEPS, PRINCIPLES};
use esai::scoring::PRESETS;
use esai::types::config::WeightSetting;
use esai::{config, geometry, report, telemetry};
use std::path::Path;

pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const WARNINGS: i32 = 1;
    pub const BLOCKING: i32 = 2;
    pub const RUNTIME_FAILURE: i32 = 3;
}

fn run() -> Result<i32> {
    let cli = cli::Cli::parse();
    telemetry::init(cli.verbose, cli.quiet)?;

    match cli.command {
        cli::Commands::Score(cmd) => {
            let assessment = load(&cmd.path, &cmd.weights)?;
            let output_format = match cmd.format {
                cli::ReportFormat::Json => report::OutputFormat::Json,
                cli::ReportFormat::Md => report::OutputFormat::Md,
            };
            let rendered = report::render(
                &assessment.calculator.report_data(),
                output_format,
                Local::now().date_naive(),
            )?;
            emit(&rendered, cmd.output.as_deref())?;
            Ok(finish(&assessment, cli.quiet))
        }
        cli::Commands::Chart(cmd) => {
            let assessment = load(&cmd.path, &cmd.weights)?;
            let scene = geometry::scene_for(&assessment.calculator, &assessment.scale);
            let rendered = report::svg::to_svg(&scene, &assessment.scale)?;
            emit(&rendered, cmd.output.as_deref())?;
            Ok(finish(&assessment, cli.quiet))
        }
        cli::Commands::Presets => {
            for preset in PRESETS.iter() {
                println!("{}: {}", preset.number, preset.name);
            }
            Ok(exit_code::SUCCESS)
        }
        cli::Commands::Principles => {
            for spec in PRINCIPLES.iter() {
                let id = spec.id();
                println!(
                    "{:>2} [{}] {} (max {}, {})",
                    spec.number,
                    id.dimension().key(),
                    spec.title,
                    spec.max_score,
                    spec.formula.kind()
                );
                match spec.formula {
                    Formula::Choice(options) => {
                        for option in options {
                            println!("     {} = {}", option.key, option.label);
                        }
                    }
                    Formula::Numeric(formula) => println!("     value in {}", formula.unit),
                    Formula::StepsAndAutomation => {
                        for option in PREPARATION_STEPS {
                            println!("     steps = {} ({})", option.key, option.label);
                        }
                        for option in PREPARATION_AUTOMATION {
                            println!("     automation = {} ({})", option.key, option.label);
                        }
                    }
                }
            }
            Ok(exit_code::SUCCESS)
        }
    }
}

fn load(path: &Path, weights: &cli::WeightArgs) -> Result<Assessment> {
    let loaded = config::load_assessment(path)?;
    let requested = match (weights.preset, &weights.weights) {
        (Some(number), _) => Some(WeightSetting::Preset(number)),
        (None, Some(fields)) => Some(WeightSetting::Manual(fields.clone())),
        (None, None) => None,
    };
    assessment::apply(&loaded, requested.as_ref())
}

fn emit(rendered: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => {
            std::fs::write(path, rendered)?;
            println!("written: {}", path.display());
        }
        None => println!("{rendered}"),
    }
    Ok(())
}

fn finish(assessment: &Assessment, quiet: bool) -> i32 {
    if !quiet {
        for notice in &assessment.notices {
            eprintln!("warning: {notice}");
        }
    }
    if let Some(err) = &assessment.weight_error {
        eprintln!("error: {err}; previous weights kept");
        return exit_code::BLOCKING;
    }
    if assessment.has_notices() {
        exit_code::WARNINGS
    } else {
        exit_code::SUCCESS
    }
}

fn main() {
    match run() {
        Ok(code) => {
            if code != 0 {
                std::process::exit(code);
            }
        }
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(exit_code::RUNTIME_FAILURE);
        }
    }
}
