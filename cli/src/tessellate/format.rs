use crate::error::CliError;
use itertools::{Itertools, Tuples};
use pathmesh::math::Point;
use pathmesh::tessellation::geometry_builder::VertexBuffers;
use regex::Regex;

pub const DEFAULT_FMT: &str = r"vertices: [@vertices{sep=, }{fmt=({position.x}, {position.y})}@]\nindices: [@indices{sep=, }{fmt={index}}@]";

/// Expands a format string where each `@name{sep=..}{fmt=..}@` section is
/// repeated for the vertices, indices or triangles of the output.
pub fn format_output(
    fmt_string: Option<&str>,
    precision: Option<usize>,
    buffers: &VertexBuffers<Point, u32>,
) -> Result<String, CliError> {
    let fmt = fmt_string.unwrap_or(DEFAULT_FMT).split('@');
    let extract = Regex::new(r"^(.*)\{sep=(.+?)\}\{fmt=(.*)\}$")?;

    let mut output = String::with_capacity(buffers.vertices.len() + buffers.indices.len());
    for section in fmt {
        if let Some(capture) = extract.captures(section) {
            let iter_name = &capture[1];
            let sep = &capture[2];
            let pattern = &capture[3];

            match iter_name {
                "vertices" => {
                    output.push_str(&format_iter(buffers.vertices.iter(), sep, pattern, |x| {
                        format_float(x, precision)
                    })?);
                }
                "indices" => {
                    output.push_str(&format_iter(buffers.indices.iter(), sep, pattern, |x| {
                        x.to_string()
                    })?);
                }
                "triangles" => {
                    let triangles: Tuples<_, (_, _, _)> = buffers.indices.iter().tuples();
                    output.push_str(&format_iter(triangles, sep, pattern, |x| x.to_string())?);
                }
                invalid => {
                    return Err(CliError::Format(format!(
                        "`@{}...@` does not name an expansion",
                        invalid
                    )));
                }
            }
        } else {
            output.push_str(section);
        }
    }

    Ok(escape_specials(&output))
}

fn format_iter<M, F, I>(iter: I, sep: &str, pattern: &str, value_fmt: F) -> Result<String, CliError>
where
    M: MatchVariable,
    F: Fn(M::Value) -> String,
    I: Iterator<Item = M>,
{
    let mut fmt_items: Vec<String> = Vec::new();
    let extract = Regex::new(r"(\\\{.*?)*(\{.*?\})(\\\})*")?;

    for item in iter {
        let mut buf = String::from(pattern);
        for var in extract.captures_iter(pattern) {
            let var = &var[2];
            match item.match_var(var) {
                Some(val) => {
                    let value = value_fmt(val);
                    let replace = Regex::new(&regex_escape_brackets(var))?;
                    buf = replace.replace_all(&buf, &value[..]).to_string();
                }
                None => {
                    return Err(CliError::Format(format!("`{}` does not name a variable", var)));
                }
            }
        }
        fmt_items.push(buf)
    }

    Ok(fmt_items.iter().join(sep))
}

fn format_float(value: f32, precision: Option<usize>) -> String {
    match precision {
        Some(p) => format!("{:.*}", p, value),
        None => format!("{}", value),
    }
}

fn regex_escape_brackets(s: &str) -> String {
    let mut buf = String::new();
    for c in s.chars() {
        if c == '{' || c == '}' {
            buf.push('\\');
        }
        buf.push(c)
    }
    buf
}

fn escape_specials(s: &str) -> String {
    s.chars()
        .coalesce(|prev, cur| {
            if prev == '\\' {
                match cur {
                    'n' => Ok('\n'),
                    't' => Ok('\t'),
                    '{' => Ok('{'),
                    '}' => Ok('}'),
                    _ => Err((prev, cur)),
                }
            } else {
                Err((prev, cur))
            }
        })
        .collect::<String>()
}

trait MatchVariable {
    type Value;
    fn match_var(&self, key: &str) -> Option<Self::Value>;
}

impl<'a> MatchVariable for &'a Point {
    type Value = f32;

    fn match_var(&self, key: &str) -> Option<Self::Value> {
        match key {
            "{position.x}" | "{pos.x}" => Some(self.x),
            "{position.y}" | "{pos.y}" => Some(self.y),
            _ => None,
        }
    }
}

impl<'a> MatchVariable for &'a u32 {
    type Value = u32;

    fn match_var(&self, key: &str) -> Option<Self::Value> {
        match key {
            "{index}" | "{i}" => Some(**self),
            _ => None,
        }
    }
}

impl<'a> MatchVariable for (&'a u32, &'a u32, &'a u32) {
    type Value = u32;

    fn match_var(&self, key: &str) -> Option<Self::Value> {
        match key {
            "{index0}" | "{i0}" => Some(*self.0),
            "{index1}" | "{i1}" => Some(*self.1),
            "{index2}" | "{i2}" => Some(*self.2),
            _ => None,
        }
    }
}

#[cfg(test)]
use pathmesh::math::point;

#[test]
fn default_format() {
    let mut buffers: VertexBuffers<Point, u32> = VertexBuffers::new();
    buffers.vertices.extend_from_slice(&[point(0.0, 0.0), point(1.0, 0.0), point(1.0, 1.5)]);
    buffers.indices.extend_from_slice(&[0, 1, 2]);

    assert_eq!(
        format_output(None, None, &buffers).unwrap(),
        "vertices: [(0, 0), (1, 0), (1, 1.5)]\nindices: [0, 1, 2]"
    );
    assert_eq!(
        format_output(Some("@triangles{sep=;}{fmt={i0} {i1} {i2}}@"), None, &buffers).unwrap(),
        "0 1 2"
    );
    assert_eq!(
        format_output(Some("@vertices{sep= }{fmt={pos.y}}@"), Some(2), &buffers).unwrap(),
        "0.00 0.00 1.50"
    );
    assert!(format_output(Some("@normals{sep=,}{fmt={x}}@"), None, &buffers).is_err());
}
