use clap::{Args, ValueEnum};
use colored::*;
use journey::checkout::{Checkout, Command, Defects, Model};
use journey::{
    unconstrained, unconstrained_property, valid_journey, valid_property, Config, JourneyConfig,
    RecheckData, Seed, ShrinkStrategy, Size, TestResult,
};
use serde::Serialize;
use std::rc::Rc;

/// How journeys are generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Flat command lists, commands with a failing precondition are skipped
    Unconstrained,
    /// Journeys built step by step from the commands the model allows
    Valid,
}

/// How failing unconstrained journeys are shrunk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ShrinkArg {
    /// Drop chunks of commands, then shrink each command
    Structural,
    /// Only try removing one command at a time
    SingleDeletion,
}

impl From<ShrinkArg> for ShrinkStrategy {
    fn from(shrink: ShrinkArg) -> Self {
        match shrink {
            ShrinkArg::Structural => ShrinkStrategy::Structural,
            ShrinkArg::SingleDeletion => ShrinkStrategy::SingleDeletion,
        }
    }
}

/// Options shared by every subcommand.
#[derive(Debug, Clone, Args)]
pub struct Settings {
    /// Journey generation mode
    #[arg(long, value_enum, default_value_t = ModeArg::Unconstrained)]
    pub mode: ModeArg,

    /// Shrink strategy for unconstrained journeys
    #[arg(long, value_enum, default_value_t = ShrinkArg::Structural)]
    pub shrink: ShrinkArg,

    /// Run against a service that keeps lines reduced to zero
    #[arg(long)]
    pub keep_empty_lines: bool,

    /// Run against a service that drops payment details on a new address
    #[arg(long)]
    pub address_resets_payment: bool,

    /// Number of journeys to run
    #[arg(short, long, default_value_t = 100)]
    pub tests: usize,

    /// Fixed seed, random when absent
    #[arg(long)]
    pub seed: Option<u64>,

    /// Shortest unconstrained journey
    #[arg(long, default_value_t = 100)]
    pub min_length: usize,

    /// Longest unconstrained journey
    #[arg(long, default_value_t = 400)]
    pub max_length: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            mode: ModeArg::Unconstrained,
            shrink: ShrinkArg::Structural,
            keep_empty_lines: false,
            address_resets_payment: false,
            tests: 100,
            seed: None,
            min_length: 100,
            max_length: 400,
        }
    }
}

impl Settings {
    pub fn defects(&self) -> Defects {
        let mut defects = Defects::none();
        if self.keep_empty_lines {
            defects = defects.keep_empty_lines();
        }
        if self.address_resets_payment {
            defects = defects.address_resets_payment();
        }
        defects
    }

    pub fn config(&self) -> Config {
        let config = Config::default().with_tests(self.tests);
        match self.seed {
            Some(seed) => config.with_seed(Seed::from_u64(seed)),
            None => config,
        }
    }

    pub fn journey_config(&self) -> JourneyConfig {
        JourneyConfig::default()
            .with_length(self.min_length..=self.max_length)
            .with_shrink(self.shrink.into())
    }

    fn machine(&self) -> Rc<Checkout> {
        Rc::new(Checkout::with_defects(self.defects()))
    }

    /// Flags that select the same property again.
    pub fn reproduce_args(&self) -> Vec<String> {
        let mut args = vec!["--mode".to_string(), value_name(self.mode)];
        if self.mode == ModeArg::Unconstrained {
            args.extend([
                "--shrink".to_string(),
                value_name(self.shrink),
                "--min-length".to_string(),
                self.min_length.to_string(),
                "--max-length".to_string(),
                self.max_length.to_string(),
            ]);
        }
        if self.keep_empty_lines {
            args.push("--keep-empty-lines".to_string());
        }
        if self.address_resets_payment {
            args.push("--address-resets-payment".to_string());
        }
        args
    }
}

fn value_name<V: ValueEnum>(value: V) -> String {
    value
        .to_possible_value()
        .map(|possible| possible.get_name().to_string())
        .unwrap_or_default()
}

/// Run the journey property selected by `settings`.
pub fn check(settings: &Settings) -> anyhow::Result<TestResult> {
    tracing::debug!(mode = ?settings.mode, tests = settings.tests, "checking journeys");
    let config = settings.config();
    let result = match settings.mode {
        ModeArg::Unconstrained => {
            unconstrained_property(settings.machine(), &settings.journey_config())?.run(&config)
        }
        ModeArg::Valid => valid_property(settings.machine()).run(&config),
    };
    Ok(result)
}

/// Replay one failing case from its encoded recheck data.
pub fn recheck(settings: &Settings, encoded: &str) -> anyhow::Result<TestResult> {
    let data: RecheckData = encoded.parse()?;
    tracing::debug!(mode = ?settings.mode, %data, "rechecking journey");
    let result = match settings.mode {
        ModeArg::Unconstrained => {
            unconstrained_property(settings.machine(), &settings.journey_config())?
                .recheck(&data)?
        }
        ModeArg::Valid => valid_property(settings.machine()).recheck(&data)?,
    };
    Ok(result)
}

#[derive(Serialize)]
struct SampleStep {
    model_before: Model,
    command: Command,
}

/// Generate one journey of `size` and render it as JSON.
///
/// Valid journeys carry the model before each step, unconstrained ones are
/// plain command lists.
pub fn sample(settings: &Settings, size: usize) -> anyhow::Result<serde_json::Value> {
    let seed = settings.seed.map(Seed::from_u64).unwrap_or_else(Seed::random);
    let value = match settings.mode {
        ModeArg::Unconstrained => {
            let generator = unconstrained(settings.machine().as_ref(), &settings.journey_config())?;
            serde_json::to_value(generator.generate(Size(size), seed).value)?
        }
        ModeArg::Valid => {
            let journey = valid_journey(settings.machine()).generate(Size(size), seed).value;
            let steps: Vec<SampleStep> = journey
                .steps()
                .map(|step| SampleStep {
                    model_before: step.model_before,
                    command: step.command,
                })
                .collect();
            serde_json::to_value(steps)?
        }
    };
    Ok(value)
}

/// Format header output
pub fn format_header() -> String {
    format!(
        "{}\n{}\n\n",
        "Checkout Journeys".bright_green().bold(),
        "=================".bright_green()
    )
}

/// Format the settings a run uses
pub fn format_config_output(settings: &Settings) -> String {
    let enabled = |on: bool| {
        if on {
            "enabled".bright_red()
        } else {
            "disabled".bright_green()
        }
    };

    let mut output = String::new();
    output.push_str("Configuration:\n");
    output.push_str(&format!("  Mode: {:?}\n", settings.mode));
    output.push_str(&format!("  Shrink strategy: {:?}\n", settings.shrink));
    output.push_str(&format!("  Tests: {}\n", settings.tests));
    if settings.mode == ModeArg::Unconstrained {
        output.push_str(&format!(
            "  Journey length: {}..={}\n",
            settings.min_length, settings.max_length
        ));
    }
    if let Some(seed) = settings.seed {
        output.push_str(&format!("  Seed: {}\n", seed.to_string().bright_yellow()));
    }
    output.push_str(&format!(
        "  Defect keep_empty_lines: {}\n",
        enabled(settings.keep_empty_lines)
    ));
    output.push_str(&format!(
        "  Defect address_resets_payment: {}\n",
        enabled(settings.address_resets_payment)
    ));
    output
}

/// Format the full command that replays a failure, if there is one
pub fn format_recheck_command(settings: &Settings, result: &TestResult) -> Option<String> {
    let data = result.recheck_data()?;
    let command = format!(
        "journey recheck {} {}",
        data,
        settings.reproduce_args().join(" ")
    );
    Some(format!("Reproduce with: {}\n", command.bright_yellow()))
}

/// Format the outcome of a check or recheck
pub fn format_result(result: &TestResult) -> String {
    match result {
        TestResult::Pass { tests_run, .. } => format!(
            "{} {}\n",
            "✓".bright_green(),
            format!("All {tests_run} journeys passed").bright_green().bold()
        ),
        TestResult::Fail { .. } => format!(
            "{} {}\n{}\n",
            "✗".bright_red(),
            "Journey failed".bright_red().bold(),
            result
        ),
    }
}
