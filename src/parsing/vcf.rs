//! Reader for VCF data lines.
//!
//! Each data line is decoded into a [`VariantRecord`] carrying the position,
//! reference allele, alternate alleles and the classified `GT` call of the
//! first sample. Later sample columns are ignored. Header lines (`#`) and
//! blank lines are skipped.
//!
//! Fields are split by hand rather than through a full VCF model, since only
//! five columns are needed.

use std::io::BufRead;
use std::path::Path;

use crate::core::{Genotype, VariantRecord};
use crate::parsing::{open_input, ParseError};

const POS_COLUMN: usize = 1;
const REF_COLUMN: usize = 3;
const ALT_COLUMN: usize = 4;
const FORMAT_COLUMN: usize = 8;
const FIRST_SAMPLE_COLUMN: usize = 9;

const GENOTYPE_KEY: &str = "GT";
const MISSING_VALUE: &str = ".";

/// Streaming iterator over the records of a VCF file.
pub struct VcfReader {
    reader: Box<dyn BufRead>,
    line: String,
    line_number: usize,
}

impl VcfReader {
    /// Open a VCF file, decompressing `.gz` or `.bz2` input.
    ///
    /// # Errors
    ///
    /// Returns `ParseError::Io` if the file cannot be opened.
    pub fn from_path(path: &Path) -> Result<Self, ParseError> {
        Ok(Self::new(open_input(path)?))
    }

    pub fn new(reader: Box<dyn BufRead>) -> Self {
        Self {
            reader,
            line: String::new(),
            line_number: 0,
        }
    }

    /// Read every record, stopping at the first error
    ///
    /// # Errors
    ///
    /// Returns the first `ParseError` met while reading.
    pub fn read_all(self) -> Result<Vec<VariantRecord>, ParseError> {
        self.collect()
    }
}

impl Iterator for VcfReader {
    type Item = Result<VariantRecord, ParseError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line.clear();
            match self.reader.read_line(&mut self.line) {
                Ok(0) => return None,
                Ok(_) => {}
                Err(e) => return Some(Err(e.into())),
            }
            self.line_number += 1;

            let line = self.line.trim_end_matches(['\n', '\r']);
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            return Some(parse_record_line(line).map_err(|message| {
                ParseError::InvalidFormat(format!("VCF line {}: {message}", self.line_number))
            }));
        }
    }
}

/// Decode a single tab-separated VCF data line
pub fn parse_record_line(line: &str) -> Result<VariantRecord, String> {
    let fields: Vec<&str> = line.split('\t').collect();
    if fields.len() <= FIRST_SAMPLE_COLUMN {
        return Err(format!(
            "expected at least {} columns including one sample, found {}",
            FIRST_SAMPLE_COLUMN + 1,
            fields.len()
        ));
    }

    let position: u64 = fields[POS_COLUMN]
        .parse()
        .map_err(|_| format!("invalid POS '{}'", fields[POS_COLUMN]))?;

    let reference_bases = fields[REF_COLUMN].to_string();
    let alternate_alleles: Vec<String> = match fields[ALT_COLUMN] {
        MISSING_VALUE => Vec::new(),
        alts => alts.split(',').map(str::to_string).collect(),
    };

    let gt_index = fields[FORMAT_COLUMN]
        .split(':')
        .position(|key| key == GENOTYPE_KEY)
        .ok_or_else(|| format!("FORMAT '{}' has no GT key", fields[FORMAT_COLUMN]))?;

    // Trailing FORMAT values may be dropped, which leaves GT missing
    let gt = fields[FIRST_SAMPLE_COLUMN]
        .split(':')
        .nth(gt_index)
        .unwrap_or(MISSING_VALUE);

    let genotype = parse_genotype(gt)?;
    if let Genotype::HomozygousAlt { allele } = genotype {
        if allele > alternate_alleles.len() {
            return Err(format!(
                "GT '{gt}' refers to allele {allele} but only {} ALT alleles are listed",
                alternate_alleles.len()
            ));
        }
    }

    Ok(VariantRecord {
        position,
        reference_bases,
        alternate_alleles,
        genotype,
    })
}

/// Classify a `GT` value such as `1/1`, `0|1` or `./.`
pub fn parse_genotype(gt: &str) -> Result<Genotype, String> {
    let alleles = gt
        .split(|c| c == '/' || c == '|')
        .map(|allele| match allele {
            MISSING_VALUE => Ok(None),
            number => number
                .parse::<usize>()
                .map(Some)
                .map_err(|_| format!("invalid GT '{gt}'")),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Genotype::classify(&alleles))
}
