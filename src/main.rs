mod app;
mod calendar;
mod config;
mod help;
mod logging;
mod markers;
mod notice;
mod order;
mod theme;
use crate::app::App;
use crate::calendar::{LocalToday, MonthView, Today, YMD_FMT};
use crate::config::Config;
use crate::order::OrderClient;
use anyhow::Context;
use lexopt::{Arg, Parser, ValueExt};
use ratatui::DefaultTerminal;
use std::path::PathBuf;
use time::Date;
use tracing::{info, warn};

#[derive(Clone, Debug, Default, Eq, PartialEq)]
struct RunOptions {
    date: Option<Date>,
    config: Option<PathBuf>,
    markers: Option<PathBuf>,
    endpoint: Option<String>,
}

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(RunOptions),
    PrintExampleConfig { config: Option<PathBuf> },
    Help,
    Version,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut opts = RunOptions::default();
        let mut print_example = false;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('c') | Arg::Long("config") => {
                    opts.config = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('m') | Arg::Long("markers") => {
                    opts.markers = Some(PathBuf::from(parser.value()?));
                }
                Arg::Short('e') | Arg::Long("endpoint") => {
                    opts.endpoint = Some(parser.value()?.string()?);
                }
                Arg::Long("print-example-config") => print_example = true,
                Arg::Value(value) if opts.date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => opts.date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        if print_example {
            Ok(Command::PrintExampleConfig {
                config: opts.config,
            })
        } else {
            Ok(Command::Run(opts))
        }
    }

    fn run(self) -> anyhow::Result<()> {
        match self {
            Command::Run(opts) => run_calendar(opts),
            Command::PrintExampleConfig { config } => {
                let path = match config {
                    Some(p) => p,
                    None => Config::default_path()?,
                };
                print!("{}", Config::example_config(&path));
                Ok(())
            }
            Command::Help => {
                println!("Usage: ordercal [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Terminal month calendar for ordering on offer days");
                println!();
                println!("Options:");
                println!("  -c, --config FILE         Read configuration from FILE");
                println!("  -m, --markers FILE        Read offer & order days from JSON FILE");
                println!("  -e, --endpoint URL        Send orders to URL");
                println!("      --print-example-config");
                println!("                            Print a commented config file and exit");
                println!("  -h, --help                Display this help message and exit");
                println!("  -V, --version             Show the program version and exit");
                Ok(())
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(())
            }
        }
    }
}

fn run_calendar(opts: RunOptions) -> anyhow::Result<()> {
    let config_path = match opts.config {
        Some(p) => p,
        None => Config::default_path()?,
    };
    let mut config = Config::load(&config_path).with_context(|| {
        format!(
            "load config {}; run `ordercal --print-example-config` for a template",
            config_path.display()
        )
    })?;
    if let Some(endpoint) = opts.endpoint {
        config.order.endpoint = Some(endpoint);
    }
    logging::init(&config.log_file()?, config.log_level())?;
    info!(config = %config_path.display(), "starting ordercal");

    // Must happen before the HTTP client starts its worker thread
    let clock = LocalToday::detect();

    let markers = config.markers(opts.markers.as_deref())?;
    for entry in markers.malformed() {
        warn!(entry, "marker is not a YYYY-MM-DD date and will never match");
    }
    info!(
        offers = markers.offer_count(),
        orders = markers.order_count(),
        "loaded day markers"
    );

    let client = OrderClient::new(config.endpoint()?, config.timeout()?)?;
    info!(endpoint = %client.endpoint(), "orders will be sent to endpoint");

    let view = MonthView::new(opts.date.unwrap_or_else(|| clock.today()));
    with_terminal(|mut terminal| {
        terminal.hide_cursor().context("failed to hide cursor")?;
        App::new(view, markers, client, clock).run(&mut terminal)?;
        Ok(())
    })?;
    info!("exiting");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    Command::from_parser(Parser::from_env())?.run()
}

fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(DefaultTerminal) -> anyhow::Result<T>,
{
    let terminal = ratatui::init();
    let r = func(terminal);
    ratatui::restore();
    r
}
