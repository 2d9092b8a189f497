// SPDX-FileCopyrightText: © 2026 fnbridge contributors
// SPDX-License-Identifier: MIT

use clap::Parser;

#[derive(Debug, clap::Parser)]
#[command(long_about = None)]
struct Args {
    /// Name of the handler serving the invocations [default: _HANDLER, else echo].
    #[arg(long)]
    handler: Option<String>,
    /// Terminate after this many invocations.
    #[arg(long)]
    max_invocations: Option<usize>,
    /// Export the trace id of each invocation as _X_AMZN_TRACE_ID.
    #[arg(long, default_value_t = true, action = clap::ArgAction::Set)]
    export_trace_id: bool,
    /// Print the available handlers and exit.
    #[arg(long, default_value_t = false)]
    available_handlers: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    if args.available_handlers {
        for name in fnbridge_function::handlers::HANDLER_NAMES {
            println!("{}", name);
        }
        return Ok(());
    }

    let settings = fnbridge_runtime::LoopSettings {
        max_invocations: args.max_invocations,
        export_trace_id: args.export_trace_id,
    };
    let handler_name = args.handler;

    fnbridge_runtime::run_with_init(
        |key| std::env::var(key).ok(),
        |environment| fnbridge_function::handlers::select(handler_name.as_deref(), environment),
        &settings,
    )?;

    Ok(())
}
