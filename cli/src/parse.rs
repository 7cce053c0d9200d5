//! The text format of the input paths.
//!
//! One command per line, with space separated numbers:
//!
//! ```text
//! # A comment.
//! move 0 0
//! line 10 0
//! quad 15 5 10 10
//! cubic 7 13 3 13 0 10
//! arc 0 5 0 0 90
//! close
//! ```
//!
//! `arc cx cy x y angle` sweeps counter-clockwise around the center, `arcn` clockwise.
//! Angles are in degrees.

use crate::error::CliError;
use pathmesh::math::{point, Angle};
use pathmesh::path::{Path, PathBuilder};
use regex::Regex;

pub fn parse_path(input: &str) -> Result<Path, CliError> {
    let command = Regex::new(r"^(move|line|quad|cubic|arcn|arc|close)((?:\s+\S+)*)$")?;

    let mut builder = PathBuilder::new();
    for (idx, line) in input.lines().enumerate() {
        let line = line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let error = |message: String| CliError::Parse {
            line: idx + 1,
            message,
        };

        let captures = command
            .captures(line)
            .ok_or_else(|| error(format!("unknown command `{}`", line)))?;
        let name = &captures[1];

        let mut args = Vec::new();
        for arg in captures[2].split_whitespace() {
            let value: f32 = arg
                .parse()
                .map_err(|_| error(format!("`{}` is not a number", arg)))?;
            args.push(value);
        }

        let expected = match name {
            "move" | "line" => 2,
            "quad" => 4,
            "cubic" => 6,
            "arc" | "arcn" => 5,
            _ => 0,
        };
        if args.len() != expected {
            return Err(error(format!(
                "`{}` takes {} numbers, got {}",
                name,
                expected,
                args.len()
            )));
        }

        let is_curve = match name {
            "quad" | "cubic" | "arc" | "arcn" => true,
            _ => false,
        };
        if is_curve && builder.current_position().is_none() {
            return Err(error(format!("`{}` needs a current point", name)));
        }

        let a = &args[..];
        match name {
            "move" => builder.move_to(point(a[0], a[1])),
            "line" => builder.line_to(point(a[0], a[1])),
            "quad" => builder.quadratic_bezier_to(point(a[0], a[1]), point(a[2], a[3])),
            "cubic" => builder.cubic_bezier_to(
                point(a[0], a[1]),
                point(a[2], a[3]),
                point(a[4], a[5]),
            ),
            "arc" | "arcn" => builder.arc_to(
                point(a[0], a[1]),
                point(a[2], a[3]),
                Angle::degrees(a[4]),
                name == "arc",
            ),
            _ => builder.close(),
        }
    }

    Ok(builder.build())
}

#[test]
fn parse_commands() {
    let path = parse_path(
        "# square\n\
         move 0 0\n\
         line 1 0\n\
         line 1 1   # trailing comment\n\
         \n\
         line 0 1\n\
         close\n\
         move 5 5\n\
         quad 6 5 6 6\n\
         cubic 6 7 5 7 5 6\n\
         arcn 5 5 4 5 90\n",
    )
    .unwrap();

    assert_eq!(path.sub_paths().len(), 2);
    assert!(path.sub_paths()[0].is_closed());
    assert_eq!(path.sub_paths()[0].glyphs().len(), 4);
    assert!(!path.sub_paths()[1].is_closed());
    assert_eq!(path.sub_paths()[1].last_point(), Some(point(4.0, 5.0)));
}

#[test]
fn parse_errors() {
    match parse_path("move 0 0\nline 1\n") {
        Err(CliError::Parse { line, .. }) => assert_eq!(line, 2),
        other => panic!("unexpected result {:?}", other.map(|_| ())),
    }

    match parse_path("move 0 zero\n") {
        Err(CliError::Parse { line, .. }) => assert_eq!(line, 1),
        other => panic!("unexpected result {:?}", other.map(|_| ())),
    }

    let no_current_point = [
        "quad 1 1 2 0\n",
        "# nothing yet\ncubic 0 1 1 1 1 0\n",
        "close\narc 0 0 1 0 90\n",
    ];
    for input in &no_current_point {
        match parse_path(input) {
            Err(CliError::Parse { line, message }) => {
                assert_eq!(line, input.lines().count());
                assert!(message.contains("current point"), "{}", message);
            }
            other => panic!("unexpected result {:?}", other.map(|_| ())),
        }
    }

    // A point, then a curve.
    let path = parse_path("move 0 0\nquad 1 1 2 0\n").unwrap();
    assert_eq!(path.sub_paths()[0].glyphs().len(), 2);

    assert!(parse_path("curve 1 2\n").is_err());
    assert!(parse_path("closed\n").is_err());
}
