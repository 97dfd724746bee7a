use clap::Parser;
use cyclewatch_core::{
    parse_interval, CommandSet, Config, Result, RuntimeSettings, CYCLEWATCH_CYCLE_INTERVAL_VAR,
    CYCLEWATCH_INTERVAL_VAR, DEFAULT_CYCLE_INTERVAL_SECS, DEFAULT_INTERVAL_SECS,
};

#[derive(Debug, Parser)]
#[command(name = "cyclewatch")]
#[command(about = "Run commands periodically and page through their output", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Seconds between runs of the displayed command
    #[arg(
        short = 'n',
        long,
        default_value_t = DEFAULT_INTERVAL_SECS,
        env = CYCLEWATCH_INTERVAL_VAR,
        value_parser = seconds
    )]
    pub interval: f64,

    /// Seconds between automatic switches to the next command
    #[arg(
        short = 'c',
        long,
        default_value_t = DEFAULT_CYCLE_INTERVAL_SECS,
        env = CYCLEWATCH_CYCLE_INTERVAL_VAR,
        value_parser = seconds
    )]
    pub cycle_interval: f64,

    /// Start with automatic cycling enabled
    #[arg(long)]
    pub cycle: bool,

    /// Commands to watch, separated by `&&`
    #[arg(
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true,
        value_name = "COMMAND"
    )]
    pub command: Vec<String>,
}

fn seconds(value: &str) -> std::result::Result<f64, String> {
    parse_interval(value).map_err(|e| e.to_string())
}

impl Cli {
    /// Build the session configuration; fails on malformed commands
    pub fn into_config(self) -> Result<Config> {
        let commands = CommandSet::parse(&self.command)?;
        let runtime_settings = RuntimeSettings {
            interval: self.interval,
            cycle_interval: self.cycle_interval,
            cycle: self.cycle,
            ..RuntimeSettings::default()
        };
        Config::new(commands, runtime_settings)
    }
}
