use crate::commands::FlattenCmd;
use crate::error::CliError;
use itertools::Itertools;
use std::io::Write;

pub fn flatten(mut cmd: FlattenCmd) -> Result<(), CliError> {
    if cmd.count {
        let mut num_paths = 0;
        let mut num_vertices = 0;
        for sub_path in cmd.path.sub_paths() {
            num_paths += 1;
            num_vertices += sub_path.flattened().count();
        }

        writeln!(&mut *cmd.output, "vertices: {}", num_vertices)?;
        writeln!(&mut *cmd.output, "paths: {}", num_paths)?;

        return Ok(());
    }

    for sub_path in cmd.path.sub_paths() {
        let points = sub_path
            .flattened()
            .enumerate()
            .map(|(i, p)| format!("{} {} {}", if i == 0 { "M" } else { "L" }, p.x, p.y))
            .join(" ");
        write!(&mut *cmd.output, "{} ", points)?;
        if sub_path.is_closed() {
            write!(&mut *cmd.output, "Z ")?;
        }
    }
    writeln!(&mut *cmd.output)?;

    Ok(())
}
