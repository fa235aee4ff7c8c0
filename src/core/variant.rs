/// Classification of the first sample's genotype call at a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Genotype {
    /// Every allele is the same alternate; `allele` is the GT allele number (1-based)
    HomozygousAlt { allele: usize },
    /// Two or more different alleles were called
    Heterozygous,
    /// No allele was called, at any ploidy or phasing; `.`, `./.` and `.|.`
    /// are all written as a gap
    Missing,
    /// Every allele is the reference allele
    HomozygousReference,
    /// Some, but not all, alleles were called (`./1`)
    PartialCall,
}

impl Genotype {
    /// Classify a genotype from its allele numbers, `None` marking a missing allele.
    pub fn classify(alleles: &[Option<usize>]) -> Self {
        let called: Vec<usize> = alleles.iter().flatten().copied().collect();

        if called.is_empty() {
            return Self::Missing;
        }
        if called.len() < alleles.len() {
            return Self::PartialCall;
        }

        let first = called[0];
        if called.iter().all(|&allele| allele == first) {
            if first == 0 {
                Self::HomozygousReference
            } else {
                Self::HomozygousAlt { allele: first }
            }
        } else {
            Self::Heterozygous
        }
    }
}

/// A decoded variant record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantRecord {
    /// Genome coordinate as written in the variant file
    pub position: u64,

    /// Expected reference allele
    pub reference_bases: String,

    /// Candidate alternate alleles, in file order
    pub alternate_alleles: Vec<String>,

    /// First sample's call
    pub genotype: Genotype,
}

impl VariantRecord {
    pub fn new(
        position: u64,
        reference_bases: impl Into<String>,
        alternate_alleles: Vec<String>,
        genotype: Genotype,
    ) -> Self {
        Self {
            position,
            reference_bases: reference_bases.into(),
            alternate_alleles,
            genotype,
        }
    }

    /// The alternate allele selected by a homozygous-alternate call
    #[must_use]
    pub fn chosen_alternate(&self) -> Option<&str> {
        match self.genotype {
            Genotype::HomozygousAlt { allele } => allele
                .checked_sub(1)
                .and_then(|index| self.alternate_alleles.get(index))
                .map(String::as_str),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_diploid() {
        assert_eq!(
            Genotype::classify(&[Some(1), Some(1)]),
            Genotype::HomozygousAlt { allele: 1 }
        );
        assert_eq!(
            Genotype::classify(&[Some(2), Some(2)]),
            Genotype::HomozygousAlt { allele: 2 }
        );
        assert_eq!(Genotype::classify(&[Some(0), Some(1)]), Genotype::Heterozygous);
        assert_eq!(Genotype::classify(&[Some(1), Some(2)]), Genotype::Heterozygous);
        assert_eq!(
            Genotype::classify(&[Some(0), Some(0)]),
            Genotype::HomozygousReference
        );
        assert_eq!(Genotype::classify(&[None, None]), Genotype::Missing);
        assert_eq!(Genotype::classify(&[None, Some(1)]), Genotype::PartialCall);
    }

    #[test]
    fn test_classify_haploid() {
        assert_eq!(
            Genotype::classify(&[Some(1)]),
            Genotype::HomozygousAlt { allele: 1 }
        );
        assert_eq!(Genotype::classify(&[None]), Genotype::Missing);
        assert_eq!(Genotype::classify(&[]), Genotype::Missing);
    }

    #[test]
    fn test_chosen_alternate() {
        let record = VariantRecord::new(
            10,
            "A",
            vec!["C".to_string(), "T".to_string()],
            Genotype::HomozygousAlt { allele: 2 },
        );
        assert_eq!(record.chosen_alternate(), Some("T"));

        let het = VariantRecord { genotype: Genotype::Heterozygous, ..record.clone() };
        assert_eq!(het.chosen_alternate(), None);

        let out_of_range = VariantRecord {
            genotype: Genotype::HomozygousAlt { allele: 3 },
            ..record
        };
        assert_eq!(out_of_range.chosen_alternate(), None);
    }
}
