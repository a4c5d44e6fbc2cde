use std::error;
use std::fmt;

/// Which coordinate space an out-of-bounds index was measured in.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum IndexKind {
    Char,
    Utf16,
    Line,
}

impl fmt::Display for IndexKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IndexKind::Char => write!(f, "char"),
            IndexKind::Utf16 => write!(f, "utf16 code unit"),
            IndexKind::Line => write!(f, "line"),
        }
    }
}

/// The error type returned by the checked entry points of [`Rope`](crate::Rope).
///
/// The direct entry points panic with an equivalent message instead of
/// returning this type.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Error {
    IndexOutOfBounds {
        index: usize,
        bound: usize,
        kind: IndexKind,
    },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Error::IndexOutOfBounds { index, bound, kind } => write!(
                f,
                "{} index {} is out of bounds (max allowed: {})",
                kind, index, bound
            ),
        }
    }
}

impl error::Error for Error {}

pub(crate) fn oob(index: usize, bound: usize, kind: IndexKind) -> Error {
    Error::IndexOutOfBounds { index, bound, kind }
}

/// Validates an inclusive index, as used by operations that accept the
/// one-past-the-end position (`insert`, `split_at`, `line_to_char`,
/// `char_to_utf16_cu`, `utf16_cu_to_char`).
pub(crate) fn check_bound(index: usize, bound: usize, kind: IndexKind) -> Result<(), Error> {
    if index > bound {
        Err(oob(index, bound, kind))
    } else {
        Ok(())
    }
}

/// Validates an exclusive index, as used by operations that dereference
/// a position (`char_at`, `line`).
pub(crate) fn check_bound_exclusive(index: usize, bound: usize, kind: IndexKind) -> Result<(), Error> {
    if index >= bound {
        Err(oob(index, bound, kind))
    } else {
        Ok(())
    }
}
