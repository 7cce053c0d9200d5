mod commands;
mod error;
mod flatten;
mod parse;
mod tessellate;

use clap::{App, Arg, ArgMatches, SubCommand};
use crate::commands::*;
use crate::error::CliError;
use pathmesh::path::Path;
use pathmesh::tessellation::{FillOptions, LineCap, LineJoin, StrokeOptions};

use std::fs::File;
use std::io::prelude::*;
use std::io::{stdin, stdout};

fn main() {
    let matches = app().get_matches();

    let verbose = matches.is_present("VERBOSE");
    let mut logger = env_logger::Builder::from_default_env();
    if verbose {
        logger.filter_level(log::LevelFilter::Debug);
    }
    logger.init();

    if let Err(e) = run(&matches, verbose) {
        eprintln!("ERROR: {}", e);
        std::process::exit(1);
    }
}

fn app() -> App<'static, 'static> {
    App::new("pathmesh command-line interface")
        .version("0.1")
        .about("Fills and strokes 2D paths into triangle meshes")
        .arg(
            Arg::with_name("INPUT")
                .help("Sets the input file to use, the standard input by default")
                .short("i")
                .long("input")
                .value_name("FILE")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("OUTPUT")
                .help("Sets the output file to use")
                .value_name("FILE")
                .short("o")
                .long("output")
                .takes_value(true)
                .required(false),
        )
        .arg(
            Arg::with_name("VERBOSE")
                .short("v")
                .long("verbose")
                .help("Logs what the tessellators do"),
        )
        .subcommand(
            SubCommand::with_name("fill")
                .about("Fills a path")
                .arg(count_arg())
                .arg(format_arg())
                .arg(precision_arg()),
        )
        .subcommand(
            SubCommand::with_name("stroke")
                .about("Strokes a path")
                .arg(
                    Arg::with_name("LINE_JOIN")
                        .short("j")
                        .long("join")
                        .help("Line join")
                        .value_name("LINE_JOIN")
                        .takes_value(true)
                        .possible_values(&["bevel", "miter", "round"]),
                )
                .arg(
                    Arg::with_name("LINE_CAP")
                        .short("p")
                        .long("cap")
                        .help("Line cap")
                        .value_name("LINE_CAP")
                        .takes_value(true)
                        .possible_values(&["butt", "round", "square"]),
                )
                .arg(
                    Arg::with_name("LINE_WIDTH")
                        .short("w")
                        .long("width")
                        .help("Line width (1 by default)")
                        .value_name("LINE_WIDTH")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("MITER_CUTOFF")
                        .long("miter-cutoff")
                        .help("Sharpest turn with a miter join, in degrees (120 by default)")
                        .value_name("DEGREES")
                        .takes_value(true),
                )
                .arg(
                    Arg::with_name("CLOSE")
                        .long("close")
                        .help("Closes every sub-path"),
                )
                .arg(count_arg())
                .arg(format_arg())
                .arg(precision_arg()),
        )
        .subcommand(
            SubCommand::with_name("flatten")
                .about("Flattens a path")
                .arg(count_arg()),
        )
}

fn run(matches: &ArgMatches, verbose: bool) -> Result<(), CliError> {
    let mut input = String::new();
    if let Some(input_file) = matches.value_of("INPUT") {
        File::open(input_file)?.read_to_string(&mut input)?;
    } else {
        stdin().read_to_string(&mut input)?;
    }

    let path = parse::parse_path(&input)?;
    log::debug!("parsed {} sub-paths", path.sub_paths().len());

    let output: Box<dyn Write> = match matches.value_of("OUTPUT") {
        Some(output_file) => Box::new(File::create(output_file)?),
        None => Box::new(stdout()),
    };

    if let Some(fill_matches) = matches.subcommand_matches("fill") {
        let cmd = TessellateCmd {
            path,
            fill: Some(FillOptions::default()),
            stroke: None,
            log: verbose,
        };

        let buffers = tessellate::tessellate_path(cmd)?;
        tessellate::write_output(
            buffers,
            fill_matches.is_present("COUNT"),
            fill_matches.value_of("FORMAT"),
            get_precision(fill_matches)?,
            output,
        )?;
    } else if let Some(stroke_matches) = matches.subcommand_matches("stroke") {
        let path = if stroke_matches.is_present("CLOSE") {
            close_sub_paths(&path)
        } else {
            path
        };

        let cmd = TessellateCmd {
            path,
            fill: None,
            stroke: Some(get_stroke_options(stroke_matches)?),
            log: verbose,
        };

        let buffers = tessellate::tessellate_path(cmd)?;
        tessellate::write_output(
            buffers,
            stroke_matches.is_present("COUNT"),
            stroke_matches.value_of("FORMAT"),
            get_precision(stroke_matches)?,
            output,
        )?;
    } else if let Some(flatten_matches) = matches.subcommand_matches("flatten") {
        let cmd = FlattenCmd {
            path,
            output,
            count: flatten_matches.is_present("COUNT"),
        };

        flatten::flatten(cmd)?;
    }

    Ok(())
}

fn count_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("COUNT")
        .short("c")
        .long("count")
        .help("Prints the number of triangles and vertices")
}

fn format_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("FORMAT")
        .long("format")
        .help("Output format, with @vertices, @indices or @triangles sections")
        .value_name("FORMAT")
        .takes_value(true)
}

fn precision_arg<'a, 'b>() -> Arg<'a, 'b> {
    Arg::with_name("PRECISION")
        .long("precision")
        .help("Number of decimals of the output coordinates")
        .value_name("PRECISION")
        .takes_value(true)
}

fn close_sub_paths(path: &Path) -> Path {
    path.sub_paths()
        .iter()
        .cloned()
        .map(|mut sub_path| {
            sub_path.close();
            sub_path
        })
        .collect()
}

fn get_precision(matches: &ArgMatches) -> Result<Option<usize>, CliError> {
    match matches.value_of("PRECISION") {
        Some(value) => Ok(Some(parse_number("--precision", value)?)),
        None => Ok(None),
    }
}

fn get_stroke_options(matches: &ArgMatches) -> Result<StrokeOptions, CliError> {
    let mut options = StrokeOptions::default();

    if let Some(width) = matches.value_of("LINE_WIDTH") {
        options = options.with_line_width(parse_number("--width", width)?);
    }

    if let Some(degrees) = matches.value_of("MITER_CUTOFF") {
        let degrees: f32 = parse_number("--miter-cutoff", degrees)?;
        if !(0.0..=180.0).contains(&degrees) {
            return Err(CliError::Argument(format!(
                "--miter-cutoff {} is not in [0, 180]",
                degrees
            )));
        }
        options = options.with_miter_cutoff(degrees.to_radians().min(std::f32::consts::PI));
    }

    match matches.value_of("LINE_JOIN") {
        Some("bevel") => options = options.with_line_join(LineJoin::Bevel),
        Some("round") => options = options.with_line_join(LineJoin::Round),
        Some("miter") => options = options.with_line_join(LineJoin::Miter),
        _ => {}
    }

    match matches.value_of("LINE_CAP") {
        Some("round") => options = options.with_line_cap(LineCap::Round),
        Some("square") => options = options.with_line_cap(LineCap::Square),
        Some("butt") => options = options.with_line_cap(LineCap::Butt),
        _ => {}
    }

    Ok(options)
}

fn parse_number<T: std::str::FromStr>(name: &str, value: &str) -> Result<T, CliError> {
    value
        .parse()
        .map_err(|_| CliError::Argument(format!("{} expects a number, got `{}`", name, value)))
}

#[test]
fn stroke_arguments() {
    let matches = app().get_matches_from(vec![
        "pathmesh", "stroke", "-w", "2.5", "-j", "round", "-p", "square", "--miter-cutoff", "90",
    ]);
    let stroke_matches = matches.subcommand_matches("stroke").unwrap();
    let options = get_stroke_options(stroke_matches).unwrap();
    assert_eq!(options.line_width, 2.5);
    assert_eq!(options.line_join, LineJoin::Round);
    assert_eq!(options.start_cap, LineCap::Square);
    assert_eq!(options.end_cap, LineCap::Square);
    assert!((options.miter_cutoff - std::f32::consts::FRAC_PI_2).abs() < 1e-6);

    let matches = app().get_matches_from(vec!["pathmesh", "stroke", "--miter-cutoff", "200"]);
    match get_stroke_options(matches.subcommand_matches("stroke").unwrap()) {
        Err(CliError::Argument(_)) => {}
        other => panic!("unexpected result {:?}", other),
    }

    let matches = app().get_matches_from(vec!["pathmesh", "fill", "--precision", "two"]);
    match get_precision(matches.subcommand_matches("fill").unwrap()) {
        Err(CliError::Argument(_)) => {}
        other => panic!("unexpected result {:?}", other),
    }
}
