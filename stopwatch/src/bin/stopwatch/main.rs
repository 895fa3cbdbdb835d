mod result;

use std::io::IsTerminal;
use std::io::Write;
use std::time::Duration;

use clap::Parser;
use log::LevelFilter;
use log::debug;
use log::error;
use log::info;
use result::StopwatchResult;
use stopwatch::clock::MonotonicClock;
use stopwatch::rendering::InteractiveRenderer;
use stopwatch::rendering::StreamRenderer;
use stopwatch::scheduler::RefreshOptions;
use stopwatch::scheduler::run_refresh_loop;
use stopwatch::stopwatch::Stopwatch;
use stopwatch::termination::ShutdownEvent;

#[derive(Debug, Parser)]
#[command(
    author,
    version,
    about = "A command-line stopwatch. Renders the elapsed time periodically until interrupted (CTRL+C), \
             then renders the final value and exits."
)]
struct Args {
    /// The time between two renders of the elapsed time, given in seconds as
    /// `<seconds>[.<fraction>]` (for example `0.5`).
    ///
    /// A zero interval renders as fast as the scheduler allows.
    ///
    /// Possible values: non-negative decimal seconds
    #[arg(
        short = 'd',
        long = "interval",
        default_value = "0.1",
        value_parser = parse_interval,
        verbatim_doc_comment
    )]
    interval: Duration,

    /// Suppresses the periodic renders; the elapsed time is still tracked
    /// and reported once when the stopwatch is interrupted.
    ///
    /// Possible values: bool
    #[arg(short = 'q', long = "quiet", verbatim_doc_comment)]
    quiet: bool,

    /// Enables log message output.
    ///
    /// Log messages go to standard error; standard output carries only the
    /// rendered elapsed time.
    ///
    /// Possible values: bool
    #[arg(short = 'v', long = "verbose", verbatim_doc_comment)]
    verbose: bool,
}

/// Parse a refresh interval of the form `<seconds>[.<fraction>]`.
///
/// Fraction digits beyond nanosecond precision are truncated.
fn parse_interval(raw: &str) -> Result<Duration, String> {
    let invalid = || format!("'{raw}' is not a valid interval in seconds");

    let (whole, fraction) = match raw.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (raw, None),
    };

    if whole.is_empty() || !whole.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(invalid());
    }
    let seconds = whole.parse::<u64>().map_err(|_| invalid())?;

    let nanos = match fraction {
        Some(fraction) => {
            if fraction.is_empty() || !fraction.bytes().all(|byte| byte.is_ascii_digit()) {
                return Err(invalid());
            }

            let mut scaled = String::with_capacity(9);
            scaled.extend(fraction.chars().take(9));
            while scaled.len() < 9 {
                scaled.push('0');
            }

            scaled.parse::<u32>().map_err(|_| invalid())?
        }
        None => 0,
    };

    Ok(Duration::new(seconds, nanos))
}

fn configure_logging(verbose: bool) {
    let level_filter = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };

    env_logger::Builder::new()
        .format(|buf, record| writeln!(buf, "{}: {}", record.level(), record.args()))
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();
    info!("Logging successfully configured");
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(error) => {
            // Usage problems, -h and -V included, report to stderr and exit
            // with status 1.
            eprint!("{}", error.render());
            std::process::exit(1);
        }
    };

    configure_logging(args.verbose);

    match run(args) {
        Ok(()) => {}
        Err(e) => {
            error!("Execution failed, error: {e}");
            std::process::exit(1);
        }
    }
}

fn run(args: Args) -> StopwatchResult<()> {
    let clock = MonotonicClock::new()?;
    let mut watch = Stopwatch::new(clock);

    let shutdown = ShutdownEvent::new();
    shutdown.listen_for_interrupt()?;

    let options = RefreshOptions {
        interval: args.interval,
        quiet: args.quiet,
    };

    watch.start()?;
    debug!(
        "Stopwatch started with a refresh interval of {:?}",
        options.interval
    );

    let stdout = std::io::stdout();
    if stdout.is_terminal() {
        run_refresh_loop(
            &watch,
            &shutdown,
            options,
            &mut InteractiveRenderer::new(stdout),
        )?;
    } else {
        run_refresh_loop(&watch, &shutdown, options, &mut StreamRenderer::new(stdout))?;
    }

    debug!("Interrupt received, stopwatch terminated");

    Ok(())
}
