use std::fmt;

/// Reason a URL or template could not be produced
///
/// The `generate*` entry points map every variant to `None`; the
/// `try_generate*` variants hand it back so callers can log or assert on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// No route with this name is registered in the route table
    RouteNotFound {
        /// The requested route name
        route: String,
    },
    /// A required path segment had no matching, non-null property
    MissingRequiredValue {
        /// The route being generated
        route: String,
        /// The segment left unfilled
        segment: String,
    },
    /// A segment value was rejected by the segment's constraint
    ConstraintViolation {
        /// The route being generated
        route: String,
        /// The constrained segment
        segment: String,
        /// The stringified value that failed
        value: String,
    },
    /// The request context or base URI override could not form an absolute URL
    InvalidBaseUri {
        /// The text that failed to parse
        base: String,
        /// Parser message
        reason: String,
    },
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::RouteNotFound { route } => {
                write!(f, "route '{}' is not registered", route)
            }
            GenerationError::MissingRequiredValue { route, segment } => {
                write!(
                    f,
                    "route '{}' requires a value for segment '{}'",
                    route, segment
                )
            }
            GenerationError::ConstraintViolation {
                route,
                segment,
                value,
            } => {
                write!(
                    f,
                    "route '{}': value '{}' does not satisfy the constraint on segment '{}'",
                    route, value, segment
                )
            }
            GenerationError::InvalidBaseUri { base, reason } => {
                write!(f, "invalid base URI '{}': {}", base, reason)
            }
        }
    }
}

impl std::error::Error for GenerationError {}

/// Route registration error
///
/// Returned by [`crate::route::RouteTable`] and the route builders when a
/// pattern, constraint or default cannot be turned into a route descriptor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteConfigError {
    /// Two routes were registered under the same name
    DuplicateRoute {
        /// The duplicated name
        name: String,
    },
    /// Route name was empty
    EmptyRouteName,
    /// The path pattern is malformed (unbalanced braces, empty parameter name, ...)
    InvalidPattern {
        /// The offending pattern
        pattern: String,
        /// What is wrong with it
        reason: String,
    },
    /// A constraint could not be parsed or compiled
    InvalidConstraint {
        /// Segment the constraint is attached to
        segment: String,
        /// The constraint text
        constraint: String,
        /// Parser or regex compiler message
        reason: String,
    },
    /// An optional parameter shares its path segment with other content
    OptionalInComplexSegment {
        /// The offending pattern
        pattern: String,
        /// The optional parameter
        segment: String,
    },
}

impl fmt::Display for RouteConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RouteConfigError::DuplicateRoute { name } => {
                write!(f, "route '{}' is already registered", name)
            }
            RouteConfigError::EmptyRouteName => write!(f, "route name must not be empty"),
            RouteConfigError::InvalidPattern { pattern, reason } => {
                write!(f, "invalid route pattern '{}': {}", pattern, reason)
            }
            RouteConfigError::InvalidConstraint {
                segment,
                constraint,
                reason,
            } => {
                write!(
                    f,
                    "invalid constraint '{}' on segment '{}': {}",
                    constraint, segment, reason
                )
            }
            RouteConfigError::OptionalInComplexSegment { pattern, segment } => {
                write!(
                    f,
                    "optional parameter '{}' in pattern '{}' must occupy a whole path segment",
                    segment, pattern
                )
            }
        }
    }
}

impl std::error::Error for RouteConfigError {}
