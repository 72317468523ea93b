//! Translation of chimeric coding sequences and protein metrics.

use log::debug;

/// Average mass of water lost per peptide bond, in daltons.
const WATER_MASS: f64 = 18.0153;

/// Lookup table for translating codons to amino acids.
///
/// Indexed by 6-bit codon encoding: A=0, C=1, G=2, T/U=3.
/// Index = first*16 + second*4 + third.
pub struct CodonTable {
    table: [u8; 64],
}

fn base_to_index(b: u8) -> Option<usize> {
    match b {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' | b'U' | b'u' => Some(3),
        _ => None,
    }
}

impl CodonTable {
    /// Standard genetic code (NCBI translation table 1).
    #[must_use]
    pub fn standard() -> Self {
        #[rustfmt::skip]
        let table: [u8; 64] = [
            b'K', b'N', b'K', b'N',  // AA*
            b'T', b'T', b'T', b'T',  // AC*
            b'R', b'S', b'R', b'S',  // AG*
            b'I', b'I', b'M', b'I',  // AT*
            b'Q', b'H', b'Q', b'H',  // CA*
            b'P', b'P', b'P', b'P',  // CC*
            b'R', b'R', b'R', b'R',  // CG*
            b'L', b'L', b'L', b'L',  // CT*
            b'E', b'D', b'E', b'D',  // GA*
            b'A', b'A', b'A', b'A',  // GC*
            b'G', b'G', b'G', b'G',  // GG*
            b'V', b'V', b'V', b'V',  // GT*
            b'*', b'Y', b'*', b'Y',  // TA*: TAA and TAG stop
            b'S', b'S', b'S', b'S',  // TC*
            b'*', b'C', b'W', b'C',  // TG*: TGA stop
            b'L', b'F', b'L', b'F',  // TT*
        ];
        Self { table }
    }

    /// Translate a single codon (3 bytes) to an amino acid.
    #[must_use]
    pub fn translate_codon(&self, codon: &[u8]) -> u8 {
        if codon.len() < 3 {
            return b'X';
        }
        match (
            base_to_index(codon[0]),
            base_to_index(codon[1]),
            base_to_index(codon[2]),
        ) {
            (Some(a), Some(b), Some(c)) => self.table[a * 16 + b * 4 + c],
            _ => b'X',
        }
    }
}

/// Average mass of a free amino acid, in daltons.
fn residue_mass(aa: u8) -> Option<f64> {
    let mass = match aa.to_ascii_uppercase() {
        b'A' => 89.0932,
        b'C' => 121.1582,
        b'D' => 133.1027,
        b'E' => 147.1293,
        b'F' => 165.1891,
        b'G' => 75.0666,
        b'H' => 155.1546,
        b'I' => 131.1729,
        b'K' => 146.1876,
        b'L' => 131.1729,
        b'M' => 149.2113,
        b'N' => 132.1179,
        b'O' => 255.3134,
        b'P' => 115.1305,
        b'Q' => 146.1445,
        b'R' => 174.201,
        b'S' => 105.0926,
        b'T' => 119.1192,
        b'U' => 168.0532,
        b'V' => 117.1463,
        b'W' => 204.2252,
        b'Y' => 181.1885,
        _ => return None,
    };
    Some(mass)
}

/// Molecular weight of a protein in kilodaltons.
///
/// Residues without a defined mass (`X`) are left out of the sum.
pub fn molecular_weight(protein: &str) -> f64 {
    let mut total = 0.0;
    let mut residues = 0usize;
    for aa in protein.bytes() {
        match residue_mass(aa) {
            Some(mass) => {
                total += mass;
                residues += 1;
            }
            None => debug!("no mass for residue '{}', skipped", aa as char),
        }
    }
    if residues == 0 {
        return 0.0;
    }
    (total - (residues - 1) as f64 * WATER_MASS) / 1000.0
}

/// A translated fusion protein and its metrics.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Translation {
    pub protein: String,
    pub length: usize,
    /// Kilodaltons.
    pub molecular_weight: f64,
    /// Nucleotide index of the junction marker, when one was present.
    pub marker_position: Option<usize>,
}

/// Translate a coding sequence from its first base.
///
/// Translation stops at the first stop codon, which is not emitted. When
/// `marker` is given and present in `cds`, translation also stops at the codon
/// that would contain it. A trailing partial codon is ignored.
pub fn translate(cds: &str, marker: Option<char>) -> Translation {
    let marker_position = marker.and_then(|m| cds.find(m));
    let coding = match marker_position {
        Some(pos) => &cds.as_bytes()[..pos],
        None => cds.as_bytes(),
    };

    let table = CodonTable::standard();
    let mut protein = String::with_capacity(coding.len() / 3);
    for codon in coding.chunks_exact(3) {
        let aa = table.translate_codon(codon);
        if aa == b'*' {
            break;
        }
        protein.push(aa as char);
    }

    Translation {
        length: protein.len(),
        molecular_weight: molecular_weight(&protein),
        protein,
        marker_position,
    }
}
