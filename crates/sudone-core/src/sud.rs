//! The `.sud` binary format: side² little-endian `u32` cell values in
//! row-major order, 0 meaning empty. The block size is supplied out of band.

use std::fmt;
use std::io::{self, Read, Write};

use crate::candidates::MAX_SIDE;
use crate::grid::{CellValues, Grid, GridError};

/// Error reading a `.sud` stream.
#[derive(Debug)]
pub enum ReadError {
    /// A cell value out of range, or a malformed grid.
    InvalidData(GridError),
    /// The stream ended before side² values were read.
    ShortRead,
    /// Underlying I/O failure.
    Io(io::Error),
}

impl fmt::Display for ReadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReadError::InvalidData(err) => write!(f, "invalid grid data: {err}"),
            ReadError::ShortRead => write!(f, "truncated grid data"),
            ReadError::Io(err) => write!(f, "reading grid: {err}"),
        }
    }
}

impl std::error::Error for ReadError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReadError::InvalidData(err) => Some(err),
            ReadError::ShortRead => None,
            ReadError::Io(err) => Some(err),
        }
    }
}

impl From<GridError> for ReadError {
    fn from(err: GridError) -> Self {
        ReadError::InvalidData(err)
    }
}

/// Read a grid of block size `n` from a `.sud` stream.
///
/// Bytes past the expected side² values are left unread.
pub fn read<R: Read>(reader: &mut R, n: usize) -> Result<Grid, ReadError> {
    if n < 2 || n * n > MAX_SIDE {
        return Err(GridError::BadBlockSize { n }.into());
    }
    let side = n * n;

    let mut bytes = vec![0u8; side * side * 4];
    reader.read_exact(&mut bytes).map_err(|err| {
        if err.kind() == io::ErrorKind::UnexpectedEof {
            ReadError::ShortRead
        } else {
            ReadError::Io(err)
        }
    })?;

    let values: Vec<u32> = bytes
        .chunks_exact(4)
        .map(|chunk| u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]))
        .collect();

    Ok(Grid::from_values(n, &values)?)
}

/// Write placed values as a `.sud` stream.
pub fn write<W: Write, G: CellValues>(writer: &mut W, grid: &G) -> io::Result<()> {
    let side = grid.side();
    for row in 0..side {
        for col in 0..side {
            let value = u32::from(grid.value_at(row, col));
            writer.write_all(&value.to_le_bytes())?;
        }
    }
    Ok(())
}
