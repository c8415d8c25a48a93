use std::fmt::Display;
use std::io::{self, BufRead, Write};

use fault_formation::{Config, MAX_GRID_SIDE, MIN_GRID_SIDE};

/// Answers to the startup questions on the console.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct PromptAnswers {
    pub width: usize,
    pub length: usize,
    pub initial_faults: usize,
}

impl PromptAnswers {
    pub fn from_config(config: &Config) -> Self {
        Self {
            width: config.width,
            length: config.length,
            initial_faults: 0,
        }
    }

    pub fn apply(self, config: Config) -> Config {
        Config {
            width: self.width,
            length: self.length,
            ..config
        }
    }
}

/// Asks for the terrain width, length and number of initial faults.
///
/// Blank answers keep the value from `defaults`. Answers that do not parse,
/// sides outside the supported grid size and negative fault counts are reported
/// on `output` and also replaced by the default.
pub fn prompt_terrain(
    mut input: impl BufRead,
    mut output: impl Write,
    defaults: PromptAnswers,
) -> io::Result<PromptAnswers> {
    let width = ask(&mut input, &mut output, "Terrain width", defaults.width, parse_side)?;
    let length = ask(&mut input, &mut output, "Terrain length", defaults.length, parse_side)?;
    let initial_faults = ask(
        &mut input,
        &mut output,
        "Initial faults",
        defaults.initial_faults,
        |answer| answer.parse().ok(),
    )?;

    Ok(PromptAnswers {
        width,
        length,
        initial_faults,
    })
}

fn parse_side(answer: &str) -> Option<usize> {
    answer
        .parse()
        .ok()
        .filter(|side: &usize| (MIN_GRID_SIDE..=MAX_GRID_SIDE).contains(side))
}

fn ask<T>(
    input: &mut impl BufRead,
    output: &mut impl Write,
    question: &str,
    default: T,
    parse: impl Fn(&str) -> Option<T>,
) -> io::Result<T>
where
    T: Copy + Display,
{
    write!(output, "{question} [{default}]: ")?;
    output.flush()?;

    let mut line = String::new();
    input.read_line(&mut line)?;
    let answer = line.trim();
    if answer.is_empty() {
        return Ok(default);
    }

    match parse(answer) {
        Some(value) => Ok(value),
        None => {
            writeln!(output, "Invalid answer {answer:?}, using {default}.")?;
            Ok(default)
        },
    }
}
