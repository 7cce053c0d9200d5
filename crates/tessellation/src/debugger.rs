//! An optional observer for the tessellators.
//!
//! A tessellator with an installed debugger reports what its algorithms do (sweep
//! vertices, inserted diagonals, stroke outlines, fallbacks and errors) as a stream of
//! messages. Nothing is reported when no debugger is installed.
//!
//! ```
//! # extern crate pathmesh_tessellation as tess;
//! # use tess::debugger::{debugger_channel, PARTITION};
//! # use tess::geometry_builder::NoOutput;
//! # use tess::path::PathBuilder;
//! # use tess::math::point;
//! # use tess::{FillTessellator, FillOptions};
//! let (sender, receiver) = debugger_channel();
//! let mut tessellator = FillTessellator::new();
//! tessellator.install_debugger(Box::new(sender));
//!
//! let mut builder = PathBuilder::new();
//! builder.move_to(point(0.0, 0.0));
//! builder.line_to(point(2.0, 1.0));
//! builder.line_to(point(4.0, 0.0));
//! builder.line_to(point(4.0, 4.0));
//! builder.line_to(point(2.0, 3.0));
//! builder.line_to(point(0.0, 4.0));
//! builder.close();
//! tessellator.tessellate_path(&builder.build(), &FillOptions::default(), &mut NoOutput::new()).unwrap();
//!
//! let trace = receiver.collect_with_filter(PARTITION);
//! assert_eq!(trace.edges().count(), 1);
//! ```

use crate::math::Point;

use std::sync::mpsc::{channel, Receiver, Sender};

/// Vertices visited by the sweep line.
pub const SWEEP: u32 = 1;
/// Diagonals inserted by the monotone partition.
pub const PARTITION: u32 = 2;
/// Triangles emitted by the monotone triangulation.
pub const TRIANGULATION: u32 = 4;
/// Stroke outlines.
pub const STROKE: u32 = 8;
pub const ALL: u32 = u32::MAX;

pub const RED: Color = Color { r: 255, g: 0, b: 0, a: 255 };
pub const GREEN: Color = Color { r: 0, g: 255, b: 0, a: 255 };
pub const BLUE: Color = Color { r: 0, g: 0, b: 255, a: 255 };
pub const BLACK: Color = Color { r: 0, g: 0, b: 0, a: 255 };
pub const WHITE: Color = Color { r: 255, g: 255, b: 255, a: 255 };

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

#[derive(Clone, Debug, PartialEq)]
pub enum DebuggerMsg {
    Point { position: Point, color: Color, flags: u32 },
    Edge { from: Point, to: Point, color: Color, flags: u32 },
    NewFrame { flags: u32 },
    String { string: String, flags: u32 },
    Error { flags: u32 },
}

impl DebuggerMsg {
    pub fn flags(&self) -> u32 {
        match *self {
            DebuggerMsg::Point { flags, .. } => flags,
            DebuggerMsg::Edge { flags, .. } => flags,
            DebuggerMsg::NewFrame { flags, .. } => flags,
            DebuggerMsg::String { flags, .. } => flags,
            DebuggerMsg::Error { flags, .. } => flags,
        }
    }
}

/// The observer interface called by the tessellators.
pub trait Debugger2D {
    fn point(&self, position: &Point, color: Color, flags: u32);
    fn edge(&self, from: &Point, to: &Point, color: Color, flags: u32);
    fn new_frame(&self, flags: u32);
    fn string(&self, string: String, flags: u32);
    fn error(&self, flags: u32);
}

/// A sequence of recorded messages.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trace {
    pub messages: Vec<DebuggerMsg>,
}

impl Trace {
    pub fn new() -> Self {
        Trace {
            messages: Vec::new(),
        }
    }

    pub fn points(&self) -> impl Iterator<Item = Point> + '_ {
        self.messages.iter().filter_map(|msg| match *msg {
            DebuggerMsg::Point { position, .. } => Some(position),
            _ => None,
        })
    }

    pub fn edges(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.messages.iter().filter_map(|msg| match *msg {
            DebuggerMsg::Edge { from, to, .. } => Some((from, to)),
            _ => None,
        })
    }

    pub fn strings(&self) -> impl Iterator<Item = &str> + '_ {
        self.messages.iter().filter_map(|msg| match msg {
            DebuggerMsg::String { string, .. } => Some(string.as_str()),
            _ => None,
        })
    }

    pub fn has_errors(&self) -> bool {
        self.messages
            .iter()
            .any(|msg| matches!(msg, DebuggerMsg::Error { .. }))
    }
}

/// The sending half of a debugger channel, to install in a tessellator.
pub struct SenderDebugger2D {
    tx: Sender<DebuggerMsg>,
}

impl Debugger2D for SenderDebugger2D {
    fn point(&self, position: &Point, color: Color, flags: u32) {
        let _ = self.tx.send(DebuggerMsg::Point {
            position: *position,
            color,
            flags,
        });
    }
    fn edge(&self, from: &Point, to: &Point, color: Color, flags: u32) {
        let _ = self.tx.send(DebuggerMsg::Edge {
            from: *from,
            to: *to,
            color,
            flags,
        });
    }
    fn string(&self, string: String, flags: u32) {
        let _ = self.tx.send(DebuggerMsg::String { string, flags });
    }
    fn new_frame(&self, flags: u32) {
        let _ = self.tx.send(DebuggerMsg::NewFrame { flags });
    }
    fn error(&self, flags: u32) {
        let _ = self.tx.send(DebuggerMsg::Error { flags });
    }
}

/// The receiving half of a debugger channel.
pub struct ReceiverDebugger2D {
    rx: Receiver<DebuggerMsg>,
}

pub fn debugger_channel() -> (SenderDebugger2D, ReceiverDebugger2D) {
    let (tx, rx) = channel();
    (SenderDebugger2D { tx }, ReceiverDebugger2D { rx })
}

impl ReceiverDebugger2D {
    /// Drains every pending message.
    pub fn collect(&self) -> Trace {
        self.collect_with_filter(ALL)
    }

    /// Drains every pending message, keeping the ones matching `flags`.
    pub fn collect_with_filter(&self, flags: u32) -> Trace {
        let mut trace = Trace::new();
        self.write_trace_with_filter(&mut trace, flags);

        trace
    }

    pub fn write_trace_with_filter(&self, trace: &mut Trace, flags: u32) {
        while let Ok(msg) = self.rx.try_recv() {
            if msg.flags() & flags != 0 {
                trace.messages.push(msg);
            }
        }
    }
}

/// Forwards the messages matching a flag mask to another debugger.
pub struct Filter<T> {
    flags: u32,
    dbg: T,
}

impl<T> Filter<T> {
    pub fn new(flags: u32, dbg: T) -> Self {
        Filter { flags, dbg }
    }

    fn filter_out(&self, flags: u32) -> bool {
        self.flags & flags == 0
    }
}

impl<T: Debugger2D> Debugger2D for Filter<T> {
    fn point(&self, position: &Point, color: Color, flags: u32) {
        if !self.filter_out(flags) {
            self.dbg.point(position, color, flags);
        }
    }
    fn edge(&self, from: &Point, to: &Point, color: Color, flags: u32) {
        if !self.filter_out(flags) {
            self.dbg.edge(from, to, color, flags);
        }
    }
    fn string(&self, string: String, flags: u32) {
        if !self.filter_out(flags) {
            self.dbg.string(string, flags);
        }
    }
    fn new_frame(&self, flags: u32) {
        if !self.filter_out(flags) {
            self.dbg.new_frame(flags);
        }
    }
    fn error(&self, flags: u32) {
        if !self.filter_out(flags) {
            self.dbg.error(flags);
        }
    }
}

#[test]
fn filter_drops_other_flags() {
    use crate::math::point;

    let (tx, rx) = debugger_channel();
    let dbg = Filter::new(STROKE, tx);
    dbg.point(&point(1.0, 2.0), RED, STROKE);
    dbg.point(&point(3.0, 4.0), RED, SWEEP);
    dbg.error(SWEEP);
    dbg.string("kept".to_string(), STROKE | SWEEP);

    let trace = rx.collect();
    assert_eq!(trace.points().collect::<Vec<_>>(), vec![point(1.0, 2.0)]);
    assert_eq!(trace.strings().collect::<Vec<_>>(), vec!["kept"]);
    assert!(!trace.has_errors());
    assert!(rx.collect().messages.is_empty());
}
