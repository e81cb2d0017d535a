use anyhow::Context;
use calltrace::analyze::{self, DefinitionFinder};
use calltrace::chain::{Chain, OverflowPolicy};
use calltrace::config::Config;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to a TOML config file (default: ~/.config/calltrace/config.toml)
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Overflow policy of the call chain: checked, wrapping or saturating
    #[clap(long, global = true, env = "CALLTRACE_OVERFLOW")]
    overflow: Option<OverflowPolicy>,

    /// Suppress diagnostic logs
    #[clap(short, long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the layered call chain for a number and print the debug and result lines
    Run {
        #[clap(allow_negative_numbers = true)]
        n: i32,
    },
    /// Print caller/callee pairs reachable from a C function
    Calls {
        /// Function name
        function: String,
        /// Source file with the function definition
        file: PathBuf,
        /// Line of the function definition (1-based)
        #[clap(value_parser = clap::value_parser!(u32).range(1..))]
        line: u32,
        /// Directory searched for callee definitions
        #[clap(long, default_value = ".")]
        root: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("error")).init();

    let args = Args::parse();
    if args.quiet {
        calltrace::log::disable();
    }
    let mut config = Config::load(args.config.as_deref()).context("load configuration")?;
    if let Some(overflow) = args.overflow {
        config.overflow = overflow;
    }

    match args.command {
        Command::Run { n } => {
            Chain::new(config.overflow).run(n)?;
        }
        Command::Calls {
            function,
            file,
            line,
            root,
        } => {
            let finder = DefinitionFinder::new(root, config.extensions);
            analyze::run(
                &function,
                &file,
                line as usize,
                finder,
                std::io::stdout().lock(),
            )
            .with_context(|| format!("analyze calls of `{function}`"))?;
        }
    }

    Ok(())
}
