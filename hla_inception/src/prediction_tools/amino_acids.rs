use crate::errors::{PredError, PredResult};

/// Residue order of every matrix position vector in the reference tables
pub const STANDARD_AMINO_ACIDS: [u8; 20] = *b"ARNDCQEGHILKMFPSTWYV";

/// Ambiguous or non-standard codes; they score zero wherever they land
pub const NON_STANDARD_CODES: [u8; 6] = *b"XJOBZU";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Residue {
    /// Index into a position vector
    Standard(usize),
    NonStandard,
}

/// Maps an amino-acid letter to its index in a matrix position vector
pub fn residue_index(aa: u8) -> Option<usize> {
    match aa {
        b'A' => Some(0),
        b'R' => Some(1),
        b'N' => Some(2),
        b'D' => Some(3),
        b'C' => Some(4),
        b'Q' => Some(5),
        b'E' => Some(6),
        b'G' => Some(7),
        b'H' => Some(8),
        b'I' => Some(9),
        b'L' => Some(10),
        b'K' => Some(11),
        b'M' => Some(12),
        b'F' => Some(13),
        b'P' => Some(14),
        b'S' => Some(15),
        b'T' => Some(16),
        b'W' => Some(17),
        b'Y' => Some(18),
        b'V' => Some(19),
        _ => None,
    }
}

pub fn is_non_standard(aa: u8) -> bool {
    NON_STANDARD_CODES.contains(&aa)
}

/// `None` for anything that is neither a standard nor a known non-standard code.
pub fn classify(aa: u8) -> Option<Residue> {
    match residue_index(aa) {
        Some(idx) => Some(Residue::Standard(idx)),
        None if is_non_standard(aa) => Some(Residue::NonStandard),
        None => None,
    }
}

/// Rejects the first residue that the scoring matrices cannot account for.
///
/// Input is expected to be upper-cased already. `position` in the error is 1-based.
pub fn validate_sequence(sequence_id: &str, sequence: &str) -> PredResult<()> {
    match sequence.bytes().position(|aa| classify(aa).is_none()) {
        None => Ok(()),
        Some(idx) => Err(PredError::InvalidResidue {
            sequence: sequence_id.to_string(),
            position: idx + 1,
            residue: sequence[idx..].chars().next().unwrap_or('?'),
        }),
    }
}
