//! `clirk-inspect`: prints how clirk parses its arguments.

use clirk::error::{BoxError, Hint};
use clirk::exit::{self, Cause, Shutdown};
use clirk::utils::plural::parse_count;
use clirk::{ArgsConfig, CliOptions, ClirkContext, UserFacingError, clitch, ui};
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "CLIRK_LOG";

fn main() {
    ui::init_colors();
    init_tracing();

    let shutdown = Shutdown::new();
    let context = match clirk::clirk(&cli_options(), &shutdown) {
        Ok(context) => context,
        Err(e) => shutdown.graceful_exit(e, None),
    };

    shutdown.on_teardown(exit::step(|code, cause| {
        tracing::info!(code, error = cause.is_error(), "clirk-inspect finished");
        Ok(())
    }));

    clitch(&shutdown, || inspect(&context));
}

/// Diagnostics go to stderr and are off unless `CLIRK_LOG` is set.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn cli_options() -> CliOptions {
    CliOptions::new(env!("CARGO_MANIFEST_DIR"), "clirk-inspect", "Argument inspector")
        .icon("🔎")
        .examples([
            "clirk-inspect --pretty build --target x86_64",
            "clirk-inspect --format yaml -- raw args",
        ])
        .usage("Parses the given arguments like any clirk CLI and prints the result.")
        .parameter("ARGS", "Any arguments to inspect.")
        .option("pretty", "Pretty-print JSON output.")
        .option("format", ["Output format.", "One of: json, yaml (default: json)"])
        .option("exit-code", "Exit with the given code after printing.")
        .option("fail", "Fail with the given message after printing.")
        .args(
            ArgsConfig::new()
                .booleans(["pretty"])
                .strings(["format", "exit-code", "fail"])
                .alias("pretty", "p")
                .alias("format", "f"),
        )
}

fn inspect(context: &ClirkContext) -> Result<(), Cause> {
    let args = &context.args;
    let output = match args.value("format").unwrap_or("json") {
        "yaml" | "yml" => serde_yml::to_string(args).map_err(render_error)?,
        "json" if args.is_set("pretty") => serde_json::to_string_pretty(args).map_err(render_error)?,
        "json" => serde_json::to_string(args).map_err(render_error)?,
        other => {
            return Err(UserFacingError::new(format!("Unknown output format \"{}\".", other))
                .with_help_hint()
                .into());
        }
    };
    println!("{}", output.trim_end());

    if let Some(message) = args.value("fail").filter(|message| !message.is_empty()) {
        return Err(UserFacingError::new(message).with_help_hint().into());
    }
    if let Some(code) = args.value("exit-code") {
        let code = i32::try_from(parse_count(code)).unwrap_or(1);
        if code != 0 {
            return Err(Cause::Code(code));
        }
    }
    Ok(())
}

fn render_error(e: impl Into<BoxError>) -> Cause {
    UserFacingError::from_error(e, "Could not render the parsed arguments", Hint::None).into()
}
