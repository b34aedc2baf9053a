mod cli;
mod output;

use clap::Parser;
use cli::{Cli, Command, HeapArgs, StackArgs};
use heapstack::config::{HeapConfig, HeapstackConfig};
use heapstack::script::{self, HeapOp, StackOp};
use heapstack::types::RunReport;
use heapstack::{MaxHeap, StackWithMin};
use output::{JsonRenderer, TerminalRenderer};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let config = match HeapstackConfig::load(cli.config.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let report = match &cli.command {
        Command::Heap(args) => run_heap(args, &config.heap),
        Command::Stack(args) => run_stack(args),
    };

    let report = match report {
        Ok(report) => report,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    if cli.should_output_json() {
        let renderer = JsonRenderer::new();
        if let Err(e) = renderer.render(&report, cli.output.as_deref()) {
            eprintln!("Error writing JSON output: {}", e);
            std::process::exit(3);
        }
    } else {
        let use_color = config.display.use_color
            && !cli.no_color
            && std::io::IsTerminal::is_terminal(&std::io::stdout());
        let renderer = TerminalRenderer::new(use_color);
        renderer.render(&report);
    }

    let exit_code = if report.failed_steps() == 0 { 0 } else { 1 };
    std::process::exit(exit_code);
}

fn run_heap(args: &HeapArgs, base: &HeapConfig) -> Result<RunReport, Box<dyn std::error::Error>> {
    let ops: Vec<HeapOp> = script::parse_ops(&args.ops)?;
    let config = args.heap_config(base);

    let mut heap = MaxHeap::with_mode(
        args.initial_size(),
        config.capacity,
        args.init.clone(),
        config.sift_mode,
    )?;

    log::debug!(
        "running {} heap operations (capacity {}, {} mode)",
        ops.len(),
        config.capacity,
        config.sift_mode
    );
    Ok(script::run_heap(&mut heap, &ops))
}

fn run_stack(args: &StackArgs) -> Result<RunReport, Box<dyn std::error::Error>> {
    let ops: Vec<StackOp> = script::parse_ops(&args.ops)?;

    let mut stack = StackWithMin::new();
    Ok(script::run_stack(&mut stack, &ops))
}
