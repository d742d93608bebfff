//! Problem documents: a plain-text description of an equation network.
//!
//! ```text
//! equations
//! isentropic: T2 / T1 = (P2 / P1) ^ ((k - 1) / k)
//! state_1: P1 * v1 = R * T1
//! values
//! T1: 300
//! P1: 100
//! settings
//! max_rewrite_steps: 20
//! loglevel: info
//! unknowns
//! targets: T2, v2
//! ```
//!
//! A section is a title line followed by `key: value` lines. Lines starting with `#` or `//`
//! and blank lines are dropped before parsing. `equations` and `values` are required;
//! `settings` and `unknowns` are optional. Without `unknowns` every quantity that has no
//! number is a target. A title that appears twice has its entries merged in order.
use crate::config::SolverConfig;
use crate::errors::TaskError;
use crate::graph::{ConstraintGraph, Resolutions};
use crate::symbolic::expression::Expression;
use log::info;
use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, line_ending, not_line_ending, space0},
    combinator::{eof, map, opt, recognize},
    multi::{many0, many1},
    sequence::{delimited, pair},
};
use std::fs;
use std::path::Path;
use std::str::FromStr;

pub const EQUATIONS: &str = "equations";
pub const VALUES: &str = "values";
pub const SETTINGS: &str = "settings";
pub const UNKNOWNS: &str = "unknowns";
/// the only key of the `unknowns` section
pub const TARGETS: &str = "targets";

pub type Entry = (String, String);
pub type Section = (String, Vec<Entry>);

/// Parses an identifier: a letter or `_`, then letters, digits and `_`.
pub fn parse_identifier(input: &str) -> IResult<&str, String> {
    let parser = recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ));
    let mut parser = map(parser, String::from);
    parser.parse(input)
}

/// Parses a title line: a lone identifier.
pub fn parse_title(input: &str) -> IResult<&str, String> {
    let (input, _) = space0(input)?;
    let (input, title) = parse_identifier(input)?;
    let (input, _) = space0(input)?;
    let (input, _) = alt((line_ending, eof)).parse(input)?;
    Ok((input, title))
}

/// Parses a `key: value` line. The value is the rest of the line, trimmed.
pub fn parse_entry(input: &str) -> IResult<&str, Entry> {
    let (input, _) = space0(input)?;
    let (input, key) = parse_identifier(input)?;
    let colon_separator = delimited(space0, tag(":"), space0);
    let (input, (_, value)) = (colon_separator, not_line_ending).parse(input)?;
    let (input, _) = opt(line_ending).parse(input)?;
    Ok((input, (key, value.trim().to_string())))
}

/// Parses a title and the entries under it.
pub fn parse_section(input: &str) -> IResult<&str, Section> {
    let (input, title) = parse_title(input)?;
    let (input, entries) = many0(parse_entry).parse(input)?;
    Ok((input, (title, entries)))
}

/// Parses a comment-free document into its sections, in order.
pub fn parse_document(input: &str) -> IResult<&str, Vec<Section>> {
    many1(parse_section).parse(input)
}

/// Drops comment lines (starting with `#` or `//`) and blank lines.
pub fn filter_comments(input: &str) -> String {
    input
        .lines()
        .filter(|line| {
            let trimmed = line.trim();
            !trimmed.is_empty() && !trimmed.starts_with('#') && !trimmed.starts_with("//")
        })
        .collect::<Vec<&str>>()
        .join("\n")
}

/// Sections of a document, repeated titles merged. Anything left unparsed is a syntax error.
pub fn parse_sections(input: &str) -> Result<Vec<Section>, TaskError> {
    let filtered = filter_comments(input);
    let (remaining, sections) = parse_document(&filtered)
        .map_err(|e| TaskError::Syntax(format!("cannot parse document: {:?}", e)))?;
    if !remaining.trim().is_empty() {
        let line = remaining.lines().next().unwrap_or_default();
        return Err(TaskError::Syntax(format!("unexpected line '{}'", line.trim())));
    }
    let mut merged: Vec<Section> = Vec::new();
    for (title, entries) in sections {
        match merged.iter_mut().find(|(t, _)| *t == title) {
            Some((_, existing)) => existing.extend(entries),
            None => merged.push((title, entries)),
        }
    }
    Ok(merged)
}

/// A parsed problem: the graph with its known values, the quantities asked for and the
/// solver settings.
#[derive(Debug, Clone)]
pub struct ProblemTask {
    pub graph: ConstraintGraph,
    /// empty means every unknown quantity
    pub targets: Vec<String>,
    pub config: SolverConfig,
}

impl ProblemTask {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<ProblemTask, TaskError> {
        let text = fs::read_to_string(path)?;
        text.parse()
    }

    /// Resolves the targets and stores every resolved number in the graph.
    pub fn run(&mut self) -> Resolutions {
        let resolutions = if self.targets.is_empty() {
            self.graph.resolve_unknowns()
        } else {
            self.graph.resolve_all(self.targets.as_slice())
        };
        let resolved = resolutions.iter().filter(|(_, r)| r.is_resolved()).count();
        info!("resolved {} of {} quantities", resolved, resolutions.len());
        self.graph.record(&resolutions);
        resolutions
    }
}

impl FromStr for ProblemTask {
    type Err = TaskError;

    fn from_str(document: &str) -> Result<Self, Self::Err> {
        let sections = parse_sections(document)?;
        let section = |title: &str| {
            sections
                .iter()
                .find(|(t, _)| t == title)
                .map(|(_, entries)| entries.as_slice())
        };
        if let Some((title, _)) = sections
            .iter()
            .find(|(t, _)| ![EQUATIONS, VALUES, SETTINGS, UNKNOWNS].contains(&t.as_str()))
        {
            return Err(TaskError::Syntax(format!("unknown section '{}'", title)));
        }

        let mut config = SolverConfig::default();
        for (key, value) in section(SETTINGS).unwrap_or_default() {
            config.set(key, value)?;
        }

        let equations =
            section(EQUATIONS).ok_or_else(|| TaskError::MissingSection(EQUATIONS.to_string()))?;
        let values =
            section(VALUES).ok_or_else(|| TaskError::MissingSection(VALUES.to_string()))?;

        let mut graph = ConstraintGraph::with_config(config.clone());
        for (name, text) in equations {
            let expression = Expression::parse_with_limit(text, config.max_nesting_depth)?;
            graph.add_equation(name, expression)?;
        }
        for (name, text) in values {
            let value = text.parse::<f64>().map_err(|_| TaskError::InvalidValue {
                key: name.clone(),
                value: text.clone(),
            })?;
            graph.set_value(name, value);
        }
        graph.isolated_values();

        let mut targets = Vec::new();
        for (key, value) in section(UNKNOWNS).unwrap_or_default() {
            if key != TARGETS {
                return Err(TaskError::InvalidValue {
                    key: key.clone(),
                    value: value.clone(),
                });
            }
            targets.extend(
                value
                    .split(',')
                    .map(str::trim)
                    .filter(|name| !name.is_empty())
                    .map(str::to_string),
            );
        }

        Ok(ProblemTask {
            graph,
            targets,
            config,
        })
    }
}
