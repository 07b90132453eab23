use std::fmt;
use std::str::FromStr;

use crate::config::Config;

pub const MIN_RATIO: f64 = 0.1;
pub const MAX_RATIO: f64 = 0.9;

pub fn clamp_ratio(ratio: f64) -> f64 {
    ratio.clamp(MIN_RATIO, MAX_RATIO)
}

/// Split ratios of a single output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ratios {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Ratios {
    pub fn from_config(config: &Config) -> Self {
        Self {
            horizontal: clamp_ratio(config.horizontal_ratio),
            vertical: clamp_ratio(config.vertical_ratio),
        }
    }

    fn get_mut(&mut self, target: Target) -> &mut f64 {
        match target {
            Target::Horizontal => &mut self.horizontal,
            Target::Vertical => &mut self.vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    Horizontal,
    Vertical,
}

impl Target {
    pub fn name(self) -> &'static str {
        match self {
            Target::Horizontal => "horizontal-ratio",
            Target::Vertical => "vertical-ratio",
        }
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Adjustment {
    Absolute(f64),
    Relative(f64),
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum CommandError {
    #[error("missing argument")]
    MissingArgument,
    #[error("too many arguments")]
    TooManyArguments,
    #[error("unknown command: {0}")]
    UnknownCommand(String),
    #[error("malformed value: {0}")]
    MalformedValue(String),
}

/// A user command routed to us by the compositor, e.g. `horizontal-ratio +0.05`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Command {
    pub target: Target,
    pub adjustment: Adjustment,
}

impl Command {
    pub fn parse(input: &str) -> Result<Self, CommandError> {
        let mut tokens = input.split_whitespace();
        let (Some(name), Some(value)) = (tokens.next(), tokens.next()) else {
            return Err(CommandError::MissingArgument);
        };
        if tokens.next().is_some() {
            return Err(CommandError::TooManyArguments);
        }

        let target = match name {
            "horizontal-ratio" => Target::Horizontal,
            "vertical-ratio" => Target::Vertical,
            _ => return Err(CommandError::UnknownCommand(name.to_string())),
        };

        let number = value
            .parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .ok_or_else(|| CommandError::MalformedValue(value.to_string()))?;

        let adjustment = if value.starts_with(|c: char| c == '+' || c == '-') {
            Adjustment::Relative(number)
        } else {
            Adjustment::Absolute(number)
        };

        Ok(Self { target, adjustment })
    }

    /// Apply to `ratios` and return the new value of the targeted ratio.
    pub fn apply(&self, ratios: &mut Ratios) -> f64 {
        let ratio = ratios.get_mut(self.target);
        *ratio = match self.adjustment {
            Adjustment::Absolute(value) => clamp_ratio(value),
            Adjustment::Relative(delta) => clamp_ratio(*ratio + delta),
        };
        *ratio
    }
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Command::parse(s)
    }
}
