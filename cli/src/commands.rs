use pathmesh::path::Path;
use pathmesh::tessellation::{FillOptions, StrokeOptions};
use std::io;

pub struct TessellateCmd {
    pub path: Path,
    pub fill: Option<FillOptions>,
    pub stroke: Option<StrokeOptions>,
    pub log: bool,
}

pub struct FlattenCmd {
    pub path: Path,
    pub output: Box<dyn io::Write>,
    pub count: bool,
}
