use std::process::ExitCode;

use grantwatch::cli::{USAGE, is_informational, parse_cli_from};
use grantwatch::logging::init_logging;
use grantwatch::review::run_review;
use grantwatch_config::ReviewConfig;

fn main() -> ExitCode {
    let cli = match parse_cli_from(std::env::args_os()) {
        Ok(cli) => cli,
        Err(err) if is_informational(&err) => err.exit(),
        Err(_) => {
            println!("{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    let (config, warnings) = ReviewConfig::from_env();
    init_logging(&config);
    for warning in warnings {
        eprintln!(
            "grantwatch config warning [{}]: {}",
            warning.code, warning.message
        );
    }

    let mut out = std::io::stdout().lock();
    match run_review(&cli.plan, &config, &mut out) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}
