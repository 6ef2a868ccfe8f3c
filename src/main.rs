use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use employee_report::{
    AppError, Cli, ConfigManager, ErrorReporter, Output, VerbosityLevel, pipeline,
};

fn init_tracing(verbosity: VerbosityLevel) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.log_filter()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(atty::is(atty::Stream::Stderr))
        .with_target(false)
        .compact()
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse_args();
    let early_reporter = ErrorReporter::new(cli.verbosity().unwrap_or_default());

    let Some(path) = cli.path.as_deref() else {
        early_reporter.report_usage(&Cli::usage());
        return ExitCode::FAILURE;
    };

    let config = match ConfigManager::load_config(&cli) {
        Ok(config) => config,
        Err(e) => {
            early_reporter.report(&AppError::from(e));
            return ExitCode::FAILURE;
        }
    };

    let verbosity = config.output.verbosity;
    init_tracing(verbosity);
    let reporter = ErrorReporter::with_options(verbosity, config.output.timestamps);

    match pipeline::run(path, &config.input) {
        Ok(report) => {
            let output = Output::new(config.output.report_format(), verbosity)
                .with_colors(config.output.color);
            print!("{}", output.format_report(&report.summary, report.counts));
            ExitCode::SUCCESS
        }
        Err(e) => {
            reporter.report(&e);
            ExitCode::FAILURE
        }
    }
}
