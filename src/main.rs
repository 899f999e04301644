use calcpad::Mode;
use calcpad::core::config::{self, CliOverrides};
use calcpad::core::expr;
use calcpad::core::functions::AngleMode;
use calcpad::core::number::{RESULT_SIGNIFICANT_DIGITS, format_number, round_significant};
use calcpad::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "calcpad", about = "Keypad calculator for the terminal")]
struct Args {
    /// Calculator to open
    #[arg(short, long, value_enum)]
    mode: Option<Mode>,

    /// Use radians for trigonometric functions
    #[arg(short, long)]
    radians: bool,

    /// Evaluate an expression, print the result and exit
    #[arg(short, long, value_name = "EXPR")]
    eval: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let file_config = config::load_config().unwrap_or_else(|e| {
        eprintln!("Warning: {e}, using defaults");
        config::CalcpadConfig::default()
    });
    let config = config::resolve(
        &file_config,
        CliOverrides {
            mode: args.mode,
            angle_mode: args.radians.then_some(AngleMode::Radians),
        },
    );

    // Initialize file logger - writes to calcpad.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("calcpad.log") {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }

    log::info!("calcpad starting up with config: {:?}", config);

    if let Some(input) = args.eval {
        return match expr::evaluate(&input, config.angle_mode) {
            Ok(value) => {
                println!(
                    "{}",
                    format_number(round_significant(value, RESULT_SIGNIFICANT_DIGITS))
                );
                ExitCode::SUCCESS
            }
            Err(e) => {
                log::warn!("--eval {:?} failed: {}", input, e);
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    match tui::run(config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Terminal error: {e}");
            ExitCode::FAILURE
        }
    }
}
