use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use log::{debug, info, warn};
use treecuts_cli::cli_args::Args;
use treecuts_cli::command_selection::{Palette, TerminalFilter};
use treecuts_cli::{sinks, sources};
use treecuts_core::builder::{BuildOptions, TreeBuilder};
use treecuts_core::config::{self, Settings};
use treecuts_core::error::Result;
use treecuts_core::file_handling;
use treecuts_core::history::History;
use treecuts_core::navigator::{Navigator, NavigatorOptions, FALLBACK_COMMAND};

/// Prefix of the sample group seeded by `--init`
const LOCAL_GROUP_PREFIX: &str = "local-";

/// Logs go to stderr; `RUST_LOG` wins over the configured level.
fn init_logger(settings: &Settings) {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(settings.log_level.as_str()),
    )
    .init();
}

/// Seeds the local content file for `--init`.
fn init_local_content() -> Result<()> {
    let path = config::local_content_path();

    if file_handling::ensure_content_file(Path::new(&path), LOCAL_GROUP_PREFIX)? {
        info!("Created `{path}`, add your own groups and commands to it");
    } else {
        warn!("`{path}` already exists, leaving it untouched");
    }

    Ok(())
}

fn execute(args: &Args) -> Result<()> {
    let data_dir = config::get_data_dir(&args.data_dir);
    let settings = file_handling::load_or_create_settings(Path::new(&config::settings_path(&data_dir)))?;
    init_logger(&settings);
    debug!("Data directory: `{data_dir}`");

    if args.init {
        return init_local_content();
    }

    sources::seed_user_files(&data_dir);
    let document = sources::merge_sources(&sources::source_order(&data_dir, args.extra_sources()))?;

    let flat = args.is_flat();
    let build_options = BuildOptions {
        criteria: args.criteria(),
        flat,
        label_max_size: settings.footer_key_max_size,
    };
    let mut tree = TreeBuilder::new(build_options).build(&document)?;

    let mut filter = TerminalFilter::new(Palette::from_settings(&settings)?, settings.list_height(flat));
    let mut sink = sinks::sink_for(args.copy);
    let history = History::new(Some(PathBuf::from(config::history_path(&data_dir))), settings.history_size);
    let navigator_options = NavigatorOptions {
        match_mode: args.match_mode(settings.fuzzy),
        limit: settings.select_limit.max(1),
        strict: settings.strict,
        seed_query: args.query.clone(),
    };

    let outcome = Navigator::new(&mut tree, &mut filter, sink.as_mut(), history, navigator_options).run()?;
    debug!("Session ended with {outcome:?}");

    Ok(())
}

fn main() -> ExitCode {
    let args = Args::parse();

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            if !args.init {
                // Keep a shell wrapper that evaluates stdout harmless.
                println!("{FALLBACK_COMMAND}");
            }
            ExitCode::from(e.exit_code())
        }
    }
}
