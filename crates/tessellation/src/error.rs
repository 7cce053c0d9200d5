use core::fmt;

/// The tessellators' result type.
pub type TessellationResult = Result<(), TessellationError>;

/// An error that can happen while writing geometry into a sink.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum GeometryBuilderError {
    InvalidVertex,
    TooManyVertices,
}

impl fmt::Display for GeometryBuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeometryBuilderError::InvalidVertex => write!(f, "Invalid vertex"),
            GeometryBuilderError::TooManyVertices => write!(f, "Too many vertices"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for GeometryBuilderError {}

/// Describes a failure of one of the tessellation algorithms on degenerate input.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum InternalError {
    /// The sweep could not find an edge next to a split, merge or regular vertex.
    MissingHelperEdge,
    /// A polygon produced by the partition still has a split or merge vertex.
    NonMonotonePolygon,
    /// The input has more points than the half-edge network can index.
    TooManyPoints,
    /// The two sides of a stroke could not be walked in lockstep.
    StrokeWalkStalled,
}

impl fmt::Display for InternalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InternalError::MissingHelperEdge => write!(f, "No edge found next to a sweep vertex"),
            InternalError::NonMonotonePolygon => write!(f, "Polygon is not y-monotone"),
            InternalError::TooManyPoints => write!(f, "Too many points"),
            InternalError::StrokeWalkStalled => {
                write!(f, "Stroke outline sides are out of sync")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for InternalError {}

/// The tessellators' error enumeration.
#[derive(Clone, Debug, PartialEq)]
pub enum TessellationError {
    UnsupportedParameter(UnsupportedParameter),
    GeometryBuilder(GeometryBuilderError),
    Internal(InternalError),
}

impl fmt::Display for TessellationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TessellationError::UnsupportedParameter(e) => write!(f, "Unsupported parameter: {}", e),
            TessellationError::GeometryBuilder(e) => write!(f, "Geometry builder error: {}", e),
            TessellationError::Internal(e) => write!(f, "Internal error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for TessellationError {}

impl From<GeometryBuilderError> for TessellationError {
    fn from(value: GeometryBuilderError) -> Self {
        Self::GeometryBuilder(value)
    }
}

impl From<InternalError> for TessellationError {
    fn from(value: InternalError) -> Self {
        Self::Internal(value)
    }
}

impl From<UnsupportedParameter> for TessellationError {
    fn from(value: UnsupportedParameter) -> Self {
        Self::UnsupportedParameter(value)
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum UnsupportedParameter {
    PositionIsNaN,
    LineWidthIsNaN,
    NegativeLineWidth,
}

impl fmt::Display for UnsupportedParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedParameter::PositionIsNaN => write!(f, "Position is not a number"),
            UnsupportedParameter::LineWidthIsNaN => write!(f, "Line width is not a number"),
            UnsupportedParameter::NegativeLineWidth => write!(f, "Line width is negative"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for UnsupportedParameter {}

#[cfg(all(test, feature = "std"))]
#[test]
fn errors_box_into_std_error() {
    let errors: Vec<Box<dyn std::error::Error>> = vec![
        Box::new(TessellationError::from(InternalError::TooManyPoints)),
        Box::new(GeometryBuilderError::TooManyVertices),
        Box::new(UnsupportedParameter::NegativeLineWidth),
    ];

    assert_eq!(errors[2].to_string(), "Line width is negative");
    assert!(errors.iter().all(|e| !e.to_string().is_empty()));
}
