/// Residues of context reported on each side of a window
pub const FLANK_LEN: usize = 3;

/// Stands in for flank residues that fall outside the protein
pub const FLANK_FILLER: char = '_';

/// One candidate peptide cut out of a protein, with its surroundings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateWindow<'a> {
    pub peptide: &'a str,
    pub length: usize,
    /// 1-based position of the first residue
    pub start: usize,
    /// 1-based position of the last residue
    pub end: usize,
    pub upstream: String,
    pub downstream: String,
    pub protein_id: &'a str,
}

/// Lazily walks every window of each requested length, one length at a time,
/// left to right.
///
/// Lengths longer than the protein yield nothing. Cloning a generator, or
/// building a new one over the same input, replays the same windows.
#[derive(Debug, Clone)]
pub struct WindowGenerator<'a> {
    protein_id: &'a str,
    sequence: &'a str,
    lengths: &'a [usize],
    length_idx: usize,
    offset: usize,
}

impl<'a> WindowGenerator<'a> {
    /// `sequence` must be ASCII (validated residues).
    pub fn new(protein_id: &'a str, sequence: &'a str, lengths: &'a [usize]) -> Self {
        Self {
            protein_id,
            sequence,
            lengths,
            length_idx: 0,
            offset: 0,
        }
    }

    fn window_at(&self, offset: usize, length: usize) -> CandidateWindow<'a> {
        let end = offset + length;
        CandidateWindow {
            peptide: &self.sequence[offset..end],
            length,
            start: offset + 1,
            end,
            upstream: upstream_flank(self.sequence, offset),
            downstream: downstream_flank(self.sequence, end),
            protein_id: self.protein_id,
        }
    }
}

impl<'a> Iterator for WindowGenerator<'a> {
    type Item = CandidateWindow<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&length) = self.lengths.get(self.length_idx) {
            if length > 0 && self.offset + length <= self.sequence.len() {
                let window = self.window_at(self.offset, length);
                self.offset += 1;
                return Some(window);
            }
            self.length_idx += 1;
            self.offset = 0;
        }
        None
    }
}

fn upstream_flank(sequence: &str, start: usize) -> String {
    let from = start.saturating_sub(FLANK_LEN);
    let missing = FLANK_LEN - (start - from);
    let mut flank = String::with_capacity(FLANK_LEN);
    flank.extend(std::iter::repeat(FLANK_FILLER).take(missing));
    flank.push_str(&sequence[from..start]);
    flank
}

fn downstream_flank(sequence: &str, end: usize) -> String {
    let to = (end + FLANK_LEN).min(sequence.len());
    let missing = FLANK_LEN - (to - end);
    let mut flank = String::with_capacity(FLANK_LEN);
    flank.push_str(&sequence[end..to]);
    flank.extend(std::iter::repeat(FLANK_FILLER).take(missing));
    flank
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROTEIN: &str = "MKTAYIAKQRQI";

    #[test]
    fn twelve_residues_give_four_nonamers() {
        let lengths = [9];
        let windows: Vec<_> = WindowGenerator::new("P1", PROTEIN, &lengths).collect();
        assert_eq!(windows.len(), 4);
        let peptides: Vec<&str> = windows.iter().map(|w| w.peptide).collect();
        assert_eq!(peptides, ["MKTAYIAKQ", "KTAYIAKQR", "TAYIAKQRQ", "AYIAKQRQI"]);
        assert_eq!((windows[0].start, windows[0].end), (1, 9));
        assert_eq!((windows[3].start, windows[3].end), (4, 12));
        assert!(windows.iter().all(|w| w.protein_id == "P1" && w.length == 9));
    }

    #[test]
    fn flanks_are_padded_at_the_edges() {
        let lengths = [9];
        let windows: Vec<_> = WindowGenerator::new("P1", PROTEIN, &lengths).collect();
        assert_eq!(windows[0].upstream, "___");
        assert_eq!(windows[0].downstream, "RQI");
        assert_eq!(windows[1].upstream, "__M");
        assert_eq!(windows[2].downstream, "I__");
        assert_eq!(windows[3].upstream, "MKT");
        assert_eq!(windows[3].downstream, "___");
    }

    #[test]
    fn lengths_are_walked_in_request_order() {
        let lengths = [10, 8, 13];
        let windows: Vec<_> = WindowGenerator::new("P1", PROTEIN, &lengths).collect();
        assert_eq!(windows.len(), 3 + 5);
        assert!(windows[..3].iter().all(|w| w.length == 10));
        assert!(windows[3..].iter().all(|w| w.length == 8));
        let starts: Vec<usize> = windows[3..].iter().map(|w| w.start).collect();
        assert_eq!(starts, [1, 2, 3, 4, 5]);
    }

    #[test]
    fn too_long_or_empty_inputs_yield_nothing() {
        let lengths = [15];
        assert_eq!(WindowGenerator::new("P1", PROTEIN, &lengths).count(), 0);
        let lengths = [9];
        assert_eq!(WindowGenerator::new("P1", "", &lengths).count(), 0);
        assert_eq!(WindowGenerator::new("P1", PROTEIN, &[]).count(), 0);
    }

    #[test]
    fn length_equal_to_protein_gives_one_window() {
        let lengths = [PROTEIN.len()];
        let windows: Vec<_> = WindowGenerator::new("P1", PROTEIN, &lengths).collect();
        assert_eq!(windows.len(), 1);
        assert_eq!(windows[0].peptide, PROTEIN);
        assert_eq!((windows[0].start, windows[0].end), (1, 12));
        assert_eq!(windows[0].upstream, "___");
        assert_eq!(windows[0].downstream, "___");
    }

    #[test]
    fn flanks_exclude_the_peptide_itself() {
        let lengths = [9];
        let window = WindowGenerator::new("P1", "ABCDEFGHIJKLMNOP", &lengths)
            .nth(3)
            .unwrap();
        assert_eq!(window.peptide, "DEFGHIJKL");
        assert_eq!(window.upstream, "ABC");
        assert_eq!(window.downstream, "MNO");
    }

    #[test]
    fn generator_is_restartable() {
        let lengths = [8, 9];
        let gen = WindowGenerator::new("P1", PROTEIN, &lengths);
        let first: Vec<_> = gen.clone().collect();
        let second: Vec<_> = gen.collect();
        assert_eq!(first, second);
    }
}
