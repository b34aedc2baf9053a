use clap::{Args, Parser, Subcommand};
use heapstack::config::HeapConfig;
use heapstack::max_heap::SiftMode;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "heapstack")]
#[command(about = "Run scripted operations against a bounded max-heap or a min-stack", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Output JSON to stdout
    #[arg(long, global = true)]
    pub json: bool,

    /// Write JSON output to file
    #[arg(long, value_name = "FILE", global = true)]
    pub output: Option<PathBuf>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Config file (default: ~/.config/heapstack/config.toml)
    #[arg(long, value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Max-heap operations: insert=V extract max remove=I change=I:V
    /// sift-up=I sift-down=I current=I parent=I left=I right=I last snapshot check
    Heap(HeapArgs),

    /// Min-stack operations: push=V pop min peek empty
    Stack(StackArgs),
}

#[derive(Args, Debug)]
pub struct HeapArgs {
    /// Operations to run, in order
    #[arg(value_name = "OP")]
    pub ops: Vec<String>,

    /// Maximum number of elements (overrides config)
    #[arg(long, value_name = "N")]
    pub capacity: Option<usize>,

    /// Sifting behavior: ordered or legacy (overrides config)
    #[arg(long, value_name = "MODE")]
    pub sift: Option<SiftMode>,

    /// Initial backing contents, stored as given (comma-separated)
    #[arg(long, value_name = "VALUES", value_delimiter = ',', allow_hyphen_values = true)]
    pub init: Vec<i64>,

    /// Number of initial contents treated as live (default: all of them)
    #[arg(long, value_name = "N")]
    pub size: Option<usize>,
}

#[derive(Args, Debug)]
pub struct StackArgs {
    /// Operations to run, in order
    #[arg(value_name = "OP")]
    pub ops: Vec<String>,
}

impl Cli {
    pub fn should_output_json(&self) -> bool {
        self.json || self.output.is_some()
    }
}

impl HeapArgs {
    /// Configured heap settings with command-line overrides applied.
    pub fn heap_config(&self, base: &HeapConfig) -> HeapConfig {
        HeapConfig {
            capacity: self.capacity.unwrap_or(base.capacity),
            sift_mode: self.sift.unwrap_or(base.sift_mode),
        }
    }

    pub fn initial_size(&self) -> usize {
        self.size.unwrap_or(self.init.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_heap_command() {
        let cli = Cli::parse_from([
            "heapstack", "heap", "--capacity", "8", "--sift", "legacy", "--init", "9,-2,4",
            "insert=3", "extract", "--json",
        ]);

        assert!(cli.should_output_json());
        match cli.command {
            Command::Heap(args) => {
                assert_eq!(args.ops, vec!["insert=3", "extract"]);
                assert_eq!(args.init, vec![9, -2, 4]);
                assert_eq!(args.initial_size(), 3);

                let config = args.heap_config(&HeapConfig::default());
                assert_eq!(config.capacity, 8);
                assert_eq!(config.sift_mode, SiftMode::Legacy);
            }
            Command::Stack(_) => panic!("expected heap command"),
        }
    }

    #[test]
    fn test_heap_config_falls_back_to_file_values() {
        let cli = Cli::parse_from(["heapstack", "heap", "max"]);
        let base = HeapConfig {
            capacity: 3,
            sift_mode: SiftMode::Legacy,
        };

        match cli.command {
            Command::Heap(args) => {
                assert_eq!(args.heap_config(&base), base);
                assert_eq!(args.initial_size(), 0);
            }
            Command::Stack(_) => panic!("expected heap command"),
        }
    }

    #[test]
    fn test_rejects_unknown_sift_mode() {
        let result = Cli::try_parse_from(["heapstack", "heap", "--sift", "fast"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_stack_command() {
        let cli = Cli::parse_from(["heapstack", "stack", "push=5", "min", "--no-color"]);

        assert!(cli.no_color);
        assert!(!cli.should_output_json());
        match cli.command {
            Command::Stack(args) => assert_eq!(args.ops, vec!["push=5", "min"]),
            Command::Heap(_) => panic!("expected stack command"),
        }
    }
}
