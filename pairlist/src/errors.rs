#[non_exhaustive]
#[derive(Debug)]
pub enum Error {
    /// Got an invalid parameter value, either in a function or in the
    /// configuration of a neighbor list or cache
    InvalidParameter(String),
    /// The geometry of a structure can not be used for neighbor search,
    /// typically because of a singular cell with periodic boundary conditions
    Geometry(String),
    /// The cache directories are not in the state required to use them
    CacheState(String),
    /// Failed to compute or store the neighbor list for a given structure
    NeighborSearch {
        /// id of the structure
        structure: u64,
        /// underlying error
        source: Box<Error>,
    },
    /// Error while reading or writing files
    Io(std::io::Error),
    /// Error while serializing/deserializing data
    Json(serde_json::Error),
    /// Error used for failed internal consistency check, i.e. bugs in
    /// pairlist.
    Internal(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::InvalidParameter(e) => write!(f, "invalid parameter: {}", e),
            Error::Geometry(e) => write!(f, "invalid geometry: {}", e),
            Error::CacheState(e) => write!(f, "invalid cache state: {}", e),
            Error::NeighborSearch { structure, source } => {
                write!(f, "neighbor search failed for structure {}: {}", structure, source)
            }
            Error::Io(e) => write!(f, "I/O error: {}", e),
            Error::Json(e) => write!(f, "json error: {}", e),
            Error::Internal(e) => {
                write!(f, "internal pairlist error")?;
                if e.contains("assertion failed") {
                    write!(f, " (this is likely a bug, please report it)")?;
                }
                write!(f, ": {}", e)
            }
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::InvalidParameter(_) |
            Error::Geometry(_) |
            Error::CacheState(_) |
            Error::Internal(_) => None,
            Error::NeighborSearch { source, .. } => Some(&**source),
            Error::Io(e) => Some(e),
            Error::Json(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Error {
        Error::Io(error)
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Error {
        Error::Json(error)
    }
}

impl From<ndarray::ShapeError> for Error {
    fn from(error: ndarray::ShapeError) -> Error {
        Error::Internal(format!("invalid array shape: {}", error))
    }
}

impl From<fs_extra::error::Error> for Error {
    fn from(error: fs_extra::error::Error) -> Error {
        Error::Io(std::io::Error::new(std::io::ErrorKind::Other, error.to_string()))
    }
}
