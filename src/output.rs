use colored::*;
use heapstack::types::{FinalState, Outcome, RunReport, Step};
use std::io;

const BOX_TL: &str = "╭";
const BOX_TR: &str = "╮";
const BOX_BL: &str = "╰";
const BOX_BR: &str = "╯";
const BOX_H: &str = "─";
const BOX_V: &str = "│";
const BOX_LT: &str = "├";
const BOX_RT: &str = "┤";

const WIDTH: usize = 62;

pub struct TerminalRenderer {
    use_color: bool,
}

impl TerminalRenderer {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    pub fn render(&self, report: &RunReport) {
        println!();
        self.print_header(report);
        println!();
        self.print_steps(&report.steps);
        println!();
        self.print_final_state(&report.final_state);
        println!();
    }

    fn print_header(&self, report: &RunReport) {
        // Top border
        println!(
            "  {}{}{}",
            self.colorize(BOX_TL, "bright_black", false),
            self.colorize(&BOX_H.repeat(WIDTH), "bright_black", false),
            self.colorize(BOX_TR, "bright_black", false)
        );

        self.print_boxed_line(&format!("  Run: {}", report.structure), "cyan", true);

        // Separator
        println!(
            "  {}{}{}",
            self.colorize(BOX_LT, "bright_black", false),
            self.colorize(&BOX_H.repeat(WIDTH), "bright_black", false),
            self.colorize(BOX_RT, "bright_black", false)
        );

        let failed = report.failed_steps();
        let summary = format!(
            "  Operations: {}  │  Failed: {}",
            report.steps.len(),
            failed
        );
        self.print_boxed_line(&summary, if failed > 0 { "red" } else { "green" }, false);

        if let FinalState::Heap { capacity, mode, .. } = &report.final_state {
            self.print_boxed_line(
                &format!("  Capacity: {}  │  Sift mode: {}", capacity, mode),
                "white",
                false,
            );
        }

        // Bottom border
        println!(
            "  {}{}{}",
            self.colorize(BOX_BL, "bright_black", false),
            self.colorize(&BOX_H.repeat(WIDTH), "bright_black", false),
            self.colorize(BOX_BR, "bright_black", false)
        );
    }

    fn print_boxed_line(&self, text: &str, color: &str, bold: bool) {
        let display = if text.chars().count() > WIDTH - 2 {
            let truncated: String = text.chars().take(WIDTH - 5).collect();
            format!("{}...", truncated)
        } else {
            text.to_string()
        };
        let padding = WIDTH.saturating_sub(display.chars().count());

        println!(
            "  {} {}{} {}",
            self.colorize(BOX_V, "bright_black", false),
            self.colorize(&display, color, bold),
            " ".repeat(padding.saturating_sub(2)),
            self.colorize(BOX_V, "bright_black", false)
        );
    }

    fn print_steps(&self, steps: &[Step]) {
        if steps.is_empty() {
            println!("  No operations given.");
            return;
        }

        let max_op_len = steps.iter().map(|s| s.op.len()).max().unwrap_or(0).max(10);

        // Table header
        println!(
            "  {:>4}  {}  {}",
            self.colorize("#", "bright_black", true),
            self.colorize(
                &format!("{:<width$}", "OPERATION", width = max_op_len),
                "bright_black",
                true
            ),
            self.colorize("RESULT", "bright_black", true),
        );

        println!(
            "  {}",
            self.colorize(&BOX_H.repeat(max_op_len + 30), "bright_black", false)
        );

        for (i, step) in steps.iter().enumerate() {
            let (text, color) = Self::describe(&step.outcome);
            println!(
                "  {:>4}  {}  {}",
                i + 1,
                format!("{:<width$}", step.op, width = max_op_len),
                self.colorize(&text, color, false)
            );
        }
    }

    fn print_final_state(&self, state: &FinalState) {
        println!("  {}", self.colorize("FINAL STATE", "bright_black", true));

        match state {
            FinalState::Heap {
                size,
                storage,
                valid,
                ..
            } => {
                println!("  Size:    {}", self.colorize(&size.to_string(), "cyan", true));
                println!("  Storage: {}", Self::join(storage));
                let (text, color) = if *valid {
                    ("max-heap ordered", "green")
                } else {
                    ("NOT heap ordered", "yellow")
                };
                println!("  Order:   {}", self.colorize(text, color, false));
            }
            FinalState::Stack { len, top, min } => {
                println!("  Depth:   {}", self.colorize(&len.to_string(), "cyan", true));
                println!("  Top:     {}", Self::show(*top));
                println!("  Minimum: {}", self.colorize(&Self::show(*min), "magenta", false));
            }
        }
    }

    fn describe(outcome: &Outcome) -> (String, &'static str) {
        match outcome {
            Outcome::Done => ("ok".to_string(), "green"),
            Outcome::Value { value } => (Self::show(*value), "cyan"),
            Outcome::Flag { value } => (value.to_string(), "blue"),
            Outcome::Snapshot { values } => (Self::join(values), "white"),
            Outcome::Failed { error } => (error.clone(), "red"),
        }
    }

    fn show(value: Option<i64>) -> String {
        value.map_or_else(|| "none".to_string(), |v| v.to_string())
    }

    fn join(values: &[i64]) -> String {
        let parts: Vec<String> = values.iter().map(|v| v.to_string()).collect();
        format!("[{}]", parts.join(", "))
    }

    fn colorize(&self, text: &str, color: &str, bold: bool) -> String {
        if !self.use_color {
            return text.to_string();
        }

        let colored = match color {
            "red" => text.red(),
            "green" => text.green(),
            "yellow" => text.yellow(),
            "blue" => text.blue(),
            "cyan" => text.cyan(),
            "magenta" => text.magenta(),
            "white" => text.white(),
            "bright_black" => text.bright_black(),
            _ => text.normal(),
        };

        if bold {
            colored.bold().to_string()
        } else {
            colored.to_string()
        }
    }
}

pub struct JsonRenderer;

impl JsonRenderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(
        &self,
        report: &RunReport,
        output_file: Option<&std::path::Path>,
    ) -> io::Result<()> {
        let json = serde_json::to_string_pretty(report)?;

        if let Some(path) = output_file {
            std::fs::write(path, json)?;
        } else {
            println!("{}", json);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use heapstack::max_heap::SiftMode;
    use tempfile::NamedTempFile;

    fn sample_report() -> RunReport {
        RunReport {
            structure: "heap".to_string(),
            steps: vec![
                Step {
                    op: "insert=4".to_string(),
                    outcome: Outcome::Done,
                },
                Step {
                    op: "remove=9".to_string(),
                    outcome: Outcome::Failed {
                        error: "Invalid argument: Index 9 is out of bound.".to_string(),
                    },
                },
            ],
            final_state: FinalState::Heap {
                size: 1,
                capacity: 4,
                mode: SiftMode::Ordered,
                storage: vec![4],
                valid: true,
            },
        }
    }

    #[test]
    fn test_describe_outcomes() {
        assert_eq!(
            TerminalRenderer::describe(&Outcome::Value { value: None }).0,
            "none"
        );
        assert_eq!(
            TerminalRenderer::describe(&Outcome::Snapshot {
                values: vec![3, -1]
            })
            .0,
            "[3, -1]"
        );
    }

    #[test]
    fn test_colorize_disabled() {
        let renderer = TerminalRenderer::new(false);
        assert_eq!(renderer.colorize("text", "red", true), "text");
    }

    #[test]
    fn test_json_written_to_file() {
        let file = NamedTempFile::new().unwrap();
        JsonRenderer::new()
            .render(&sample_report(), Some(file.path()))
            .unwrap();

        let written = std::fs::read_to_string(file.path()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&written).unwrap();
        assert_eq!(value["structure"], "heap");
        assert_eq!(value["steps"][0]["outcome"]["status"], "done");
        assert_eq!(value["steps"][1]["outcome"]["status"], "failed");
        assert_eq!(value["final_state"]["kind"], "heap");
        assert_eq!(value["final_state"]["mode"], "ordered");
    }
}
