use crate::commands::TessellateCmd;
use crate::error::CliError;
use pathmesh::math::*;
use pathmesh::tessellation::geometry_builder::*;
use pathmesh::tessellation::{FillTessellator, StrokeTessellator};
use std::io;
use std::io::Write;

mod format;
use self::format::format_output;

pub fn tessellate_path(cmd: TessellateCmd) -> Result<VertexBuffers<Point, u32>, CliError> {
    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();

    if let Some(options) = cmd.fill {
        let mut tessellator = FillTessellator::new();
        tessellator.set_logging(cmd.log);
        tessellator.tessellate_path(
            &cmd.path,
            &options,
            &mut BuffersBuilder::new(&mut buffers, Positions),
        )?;
    }

    if let Some(options) = cmd.stroke {
        let mut tessellator = StrokeTessellator::new();
        tessellator.set_logging(cmd.log);
        tessellator.tessellate_path(
            &cmd.path,
            &options,
            &mut BuffersBuilder::new(&mut buffers, Positions),
        )?;
    }

    Ok(buffers)
}

pub fn write_output(
    buffers: VertexBuffers<Point, u32>,
    count: bool,
    fmt_string: Option<&str>,
    float_precision: Option<usize>,
    mut output: Box<dyn io::Write>,
) -> Result<(), CliError> {
    if count {
        writeln!(&mut *output, "vertices: {}", buffers.vertices.len())?;
        writeln!(&mut *output, "indices: {}", buffers.indices.len())?;
        writeln!(&mut *output, "triangles: {}", buffers.indices.len() / 3)?;

        return Ok(());
    }

    let text = format_output(fmt_string, float_precision, &buffers)?;
    writeln!(&mut *output, "{}", text)?;
    Ok(())
}

#[cfg(test)]
use crate::parse::parse_path;
#[cfg(test)]
use pathmesh::tessellation::{FillOptions, StrokeOptions};

#[test]
fn fill_then_stroke() {
    let path = parse_path("move 0 0\nline 10 0\nline 10 10\nline 0 10\nclose\n").unwrap();
    let buffers = tessellate_path(TessellateCmd {
        path,
        fill: Some(FillOptions::default()),
        stroke: None,
        log: false,
    })
    .unwrap();
    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.indices.len(), 6);

    let path = parse_path("move 0 0\nline 10 0\n").unwrap();
    let buffers = tessellate_path(TessellateCmd {
        path,
        fill: None,
        stroke: Some(StrokeOptions::line_width(2.0)),
        log: false,
    })
    .unwrap();
    assert_eq!(buffers.vertices.len(), 4);
    assert_eq!(buffers.indices.len(), 6);
}

#[test]
fn stroke_a_single_curve() {
    let path = parse_path("move 0 0\ncubic 0 10 10 10 10 0\n").unwrap();
    let buffers = tessellate_path(TessellateCmd {
        path,
        fill: None,
        stroke: Some(StrokeOptions::line_width(1.0)),
        log: false,
    })
    .unwrap();

    assert!(buffers.vertices.len() > 4);
    assert_eq!(buffers.indices.len() % 3, 0);
    assert!(buffers
        .indices
        .iter()
        .all(|&i| (i as usize) < buffers.vertices.len()));
    for p in &buffers.vertices {
        // Half a line width around the curve's hull.
        assert!(p.x >= -0.6 && p.x <= 10.6);
        assert!(p.y >= -0.1 && p.y <= 8.1);
    }
}
