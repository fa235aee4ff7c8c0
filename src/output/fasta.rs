//! FASTA writer.
//!
//! Output is a single header line built from the genome's metadata,
//! followed by the sequence wrapped at a fixed width:
//!
//! ```text
//! >NC_000962.3|Mycobacterium tuberculosis H37Rv|SAMPLE01
//! TTGACCGATGACCCCGGTTCAGGCTTCACCACAGTGTGGAACGCGGTCGTCTCCGAACTTAACGGCGACC
//! ...
//! ```
//!
//! The case of the sequence is chosen at write time; the genome itself
//! always stays lowercase.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use bzip2::write::BzEncoder;
use flate2::write::GzEncoder;
use tracing::info;

use crate::core::Genome;
use crate::output::OutputError;
use crate::utils::validation::{
    validate_compression_level, validate_line_width, validate_wrap_length, Compression,
    ValidationError, DEFAULT_CHARS_PER_LINE, DEFAULT_COMPRESSION_LEVEL,
};

/// Settings for [`write_fasta`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaWriteOptions {
    /// Compression applied to the file; adds a `.gz` or `.bz2` suffix
    pub compression: Compression,

    /// Compression level, 1-9
    pub compression_level: u32,

    /// Appended to the header after a `|`
    pub additional_metadata: Option<String>,

    /// Sequence characters per line, `None` for a single line
    pub chars_per_line: Option<usize>,

    /// Write the sequence in uppercase rather than lowercase
    pub uppercase: bool,
}

impl Default for FastaWriteOptions {
    fn default() -> Self {
        Self {
            compression: Compression::None,
            compression_level: DEFAULT_COMPRESSION_LEVEL,
            additional_metadata: None,
            chars_per_line: Some(DEFAULT_CHARS_PER_LINE),
            uppercase: true,
        }
    }
}

impl FastaWriteOptions {
    #[must_use]
    pub fn with_compression(mut self, compression: Compression, level: u32) -> Self {
        self.compression = compression;
        self.compression_level = level;
        self
    }

    #[must_use]
    pub fn with_chars_per_line(mut self, chars_per_line: Option<usize>) -> Self {
        self.chars_per_line = chars_per_line;
        self
    }

    #[must_use]
    pub fn with_uppercase(mut self, uppercase: bool) -> Self {
        self.uppercase = uppercase;
        self
    }

    #[must_use]
    pub fn with_additional_metadata(mut self, metadata: impl Into<String>) -> Self {
        self.additional_metadata = Some(metadata.into());
        self
    }

    /// Check every setting
    ///
    /// # Errors
    ///
    /// Returns the `ValidationError` for the first invalid setting.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_compression_level(self.compression_level)?;
        validate_line_width(self.chars_per_line)
    }

    /// The path actually written for a requested output path
    pub fn output_path(&self, path: &Path) -> PathBuf {
        match self.compression.suffix() {
            Some(suffix) => {
                let mut name = path.as_os_str().to_owned();
                name.push(suffix);
                PathBuf::from(name)
            }
            None => path.to_path_buf(),
        }
    }
}

/// Break `sequence` into lines of `chars_per_line` characters.
///
/// # Errors
///
/// Returns `ValidationError::InvalidLineWidth` for a width of zero, or
/// `ValidationError::SequenceTooShort` for a sequence under two characters.
pub fn insert_newlines(
    sequence: &str,
    chars_per_line: Option<usize>,
) -> Result<String, ValidationError> {
    let chars = sequence.chars().collect::<Vec<_>>();
    validate_line_width(chars_per_line)?;
    validate_wrap_length(chars.len())?;

    Ok(match chars_per_line {
        Some(width) => chars
            .chunks(width)
            .map(|line| line.iter().collect::<String>())
            .collect::<Vec<_>>()
            .join("\n"),
        None => sequence.to_string(),
    })
}

/// Wrap raw sequence bytes, one symbol per byte.
///
/// # Errors
///
/// Same as [`insert_newlines`].
pub fn wrap_bases(bases: &[u8], chars_per_line: Option<usize>) -> Result<Vec<u8>, ValidationError> {
    validate_line_width(chars_per_line)?;
    validate_wrap_length(bases.len())?;

    Ok(match chars_per_line {
        Some(width) => bases.chunks(width).collect::<Vec<_>>().join(&b'\n'),
        None => bases.to_vec(),
    })
}

/// Build the `>`-prefixed header line, without a line break
pub fn fasta_header(genome: &Genome, additional_metadata: Option<&str>) -> String {
    let mut header = String::from(">");
    header.push_str(&genome.metadata.header_fields().collect::<Vec<_>>().join("|"));
    if let Some(extra) = additional_metadata {
        header.push('|');
        header.push_str(extra);
    }
    header
}

/// Write `genome` as FASTA to any writer, ignoring the compression settings.
///
/// # Errors
///
/// Returns `OutputError::Validation` for an invalid line width or a genome
/// too short to wrap, or `OutputError::Io` if writing fails.
pub fn write_fasta_to<W: Write>(
    genome: &Genome,
    writer: &mut W,
    options: &FastaWriteOptions,
) -> Result<(), OutputError> {
    let mut body = wrap_bases(genome.bases(), options.chars_per_line)?;
    if options.uppercase {
        body.make_ascii_uppercase();
    }

    writeln!(
        writer,
        "{}",
        fasta_header(genome, options.additional_metadata.as_deref())
    )?;
    writer.write_all(&body)?;
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write `genome` as a FASTA file, compressed as `options` asks.
///
/// Settings are validated before the file is created. Returns the path
/// written, which carries a `.gz` or `.bz2` suffix when compressed.
///
/// # Errors
///
/// Returns `OutputError::Validation` for invalid settings, or
/// `OutputError::Io` if the file cannot be written.
pub fn write_fasta(
    genome: &Genome,
    path: &Path,
    options: &FastaWriteOptions,
) -> Result<PathBuf, OutputError> {
    options.validate()?;
    validate_wrap_length(genome.len())?;

    let output_path = options.output_path(path);
    let mut sink = FastaSink::create(&output_path, options)?;
    write_fasta_to(genome, &mut sink, options)?;
    sink.finish()?;

    info!("Wrote {} bases to {}", genome.len(), output_path.display());
    Ok(output_path)
}

/// Plain, gzip or bzip2 file writer
enum FastaSink {
    Plain(BufWriter<File>),
    Gzip(GzEncoder<BufWriter<File>>),
    Bzip2(BzEncoder<BufWriter<File>>),
}

impl FastaSink {
    fn create(path: &Path, options: &FastaWriteOptions) -> io::Result<Self> {
        let file = BufWriter::new(File::create(path)?);
        let level = options.compression_level;
        Ok(match options.compression {
            Compression::None => Self::Plain(file),
            Compression::Gzip => Self::Gzip(GzEncoder::new(file, flate2::Compression::new(level))),
            Compression::Bzip2 => Self::Bzip2(BzEncoder::new(file, bzip2::Compression::new(level))),
        })
    }

    /// Flush all buffered and compressed data to disk
    fn finish(self) -> io::Result<()> {
        let mut file = match self {
            Self::Plain(file) => file,
            Self::Gzip(encoder) => encoder.finish()?,
            Self::Bzip2(encoder) => encoder.finish()?,
        };
        file.flush()
    }
}

impl Write for FastaSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Plain(w) => w.write(buf),
            Self::Gzip(w) => w.write(buf),
            Self::Bzip2(w) => w.write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Plain(w) => w.flush(),
            Self::Gzip(w) => w.flush(),
            Self::Bzip2(w) => w.flush(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GenomeMetadata;
    use crate::parsing::fasta::{parse_fasta_file, parse_fasta_text};
    use std::io::Read;

    fn sample_genome() -> Genome {
        let metadata = GenomeMetadata {
            id: Some("NC_000962.3".to_string()),
            organism: Some("Mycobacterium tuberculosis H37Rv".to_string()),
            name: Some("SAMPLE01".to_string()),
            ..Default::default()
        };
        Genome::from_sequence("acgtn-".repeat(30)).with_metadata(metadata)
    }

    #[test]
    fn test_insert_newlines() {
        assert_eq!(insert_newlines("acgtacgt", Some(3)).unwrap(), "acg\ntac\ngt");
        assert_eq!(insert_newlines("acgtacgt", Some(4)).unwrap(), "acgt\nacgt");
        assert_eq!(insert_newlines("acgtacgt", Some(70)).unwrap(), "acgtacgt");
        assert_eq!(insert_newlines("acgtacgt", None).unwrap(), "acgtacgt");
    }

    #[test]
    fn test_insert_newlines_line_count() {
        let sequence = "a".repeat(141);
        for width in [1, 7, 70, 141, 200] {
            let wrapped = insert_newlines(&sequence, Some(width)).unwrap();
            assert_eq!(wrapped.lines().count(), sequence.len().div_ceil(width));
        }
    }

    #[test]
    fn test_insert_newlines_rejects_bad_input() {
        assert_eq!(
            insert_newlines("acgt", Some(0)),
            Err(ValidationError::InvalidLineWidth)
        );
        assert_eq!(
            insert_newlines("a", Some(70)),
            Err(ValidationError::SequenceTooShort(1))
        );
        assert_eq!(
            insert_newlines("", None),
            Err(ValidationError::SequenceTooShort(0))
        );
    }

    #[test]
    fn test_insert_newlines_counts_characters() {
        assert_eq!(insert_newlines("aéca", Some(2)).unwrap(), "aé\nca");
    }

    #[test]
    fn test_wrap_bases() {
        assert_eq!(wrap_bases(b"acgtacgt", Some(3)).unwrap(), b"acg\ntac\ngt");
        assert_eq!(wrap_bases(b"acgtacgt", None).unwrap(), b"acgtacgt");
        assert_eq!(wrap_bases(b"a", Some(3)), Err(ValidationError::SequenceTooShort(1)));
        assert_eq!(wrap_bases(b"acgt", Some(0)), Err(ValidationError::InvalidLineWidth));
    }

    #[test]
    fn test_write_fasta_to_keeps_stored_bytes() {
        let genome = Genome::from_sequence(b"ac\xe9gtac");
        let mut buffer = Vec::new();
        let options = FastaWriteOptions::default().with_chars_per_line(Some(3));
        write_fasta_to(&genome, &mut buffer, &options).unwrap();

        assert_eq!(buffer, b">\nAC\xe9\nGTA\nC\n");
        let body = buffer[2..].iter().filter(|&&b| b != b'\n').count();
        assert_eq!(body, genome.len());
    }

    #[test]
    fn test_fasta_header() {
        let genome = sample_genome();
        assert_eq!(
            fasta_header(&genome, None),
            ">NC_000962.3|Mycobacterium tuberculosis H37Rv|SAMPLE01"
        );
        assert_eq!(
            fasta_header(&genome, Some("lineage4")),
            ">NC_000962.3|Mycobacterium tuberculosis H37Rv|SAMPLE01|lineage4"
        );

        let bare = Genome::from_sequence("acgt");
        assert_eq!(fasta_header(&bare, None), ">");
    }

    #[test]
    fn test_write_fasta_to_case() {
        let genome = Genome::from_sequence("acgtacgt");
        let mut upper = Vec::new();
        write_fasta_to(&genome, &mut upper, &FastaWriteOptions::default()).unwrap();
        assert_eq!(String::from_utf8(upper).unwrap(), ">\nACGTACGT\n");

        let mut lower = Vec::new();
        let options = FastaWriteOptions::default()
            .with_uppercase(false)
            .with_chars_per_line(Some(3));
        write_fasta_to(&genome, &mut lower, &options).unwrap();
        assert_eq!(String::from_utf8(lower).unwrap(), ">\nacg\ntac\ngt\n");

        // Stored symbols are untouched
        assert_eq!(genome.genome_string(), "acgtacgt");
    }

    #[test]
    fn test_write_fasta_single_line() {
        let genome = sample_genome();
        let mut buffer = Vec::new();
        let options = FastaWriteOptions::default().with_chars_per_line(None);
        write_fasta_to(&genome, &mut buffer, &options).unwrap();

        let text = String::from_utf8(buffer).unwrap();
        assert_eq!(text.lines().count(), 2);
    }

    #[test]
    fn test_write_fasta_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let genome = sample_genome();

        let path = write_fasta(&genome, &dir.path().join("sample.fasta"), &FastaWriteOptions::default())
            .unwrap();
        assert_eq!(path, dir.path().join("sample.fasta"));

        let reloaded = parse_fasta_file(&path).unwrap();
        assert_eq!(reloaded.bases(), genome.bases());
        assert_eq!(reloaded.metadata.id, genome.metadata.id);
        assert_eq!(reloaded.metadata.organism, genome.metadata.organism);
        assert_eq!(reloaded.metadata.name, genome.metadata.name);
    }

    #[test]
    fn test_write_fasta_gzip() {
        let dir = tempfile::tempdir().unwrap();
        let genome = sample_genome();
        let options = FastaWriteOptions::default().with_compression(Compression::Gzip, 9);

        let path = write_fasta(&genome, &dir.path().join("sample.fasta"), &options).unwrap();
        assert_eq!(path, dir.path().join("sample.fasta.gz"));

        let mut text = String::new();
        flate2::read::GzDecoder::new(File::open(&path).unwrap())
            .read_to_string(&mut text)
            .unwrap();
        assert_eq!(parse_fasta_text(&text).unwrap().bases(), genome.bases());
    }

    #[test]
    fn test_write_fasta_bzip2() {
        let dir = tempfile::tempdir().unwrap();
        let genome = sample_genome();
        let options = FastaWriteOptions::default().with_compression(Compression::Bzip2, 1);

        let path = write_fasta(&genome, &dir.path().join("sample.fasta"), &options).unwrap();
        assert_eq!(path, dir.path().join("sample.fasta.bz2"));

        let reloaded = parse_fasta_file(&path).unwrap();
        assert_eq!(reloaded.bases(), genome.bases());
    }

    #[test]
    fn test_write_fasta_invalid_settings_create_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let genome = sample_genome();
        let path = dir.path().join("sample.fasta");

        for options in [
            FastaWriteOptions::default().with_compression(Compression::Gzip, 0),
            FastaWriteOptions::default().with_compression(Compression::Bzip2, 10),
            FastaWriteOptions::default().with_chars_per_line(Some(0)),
        ] {
            let result = write_fasta(&genome, &path, &options);
            assert!(matches!(result, Err(OutputError::Validation(_))));
        }

        let short = Genome::from_sequence("a");
        let result = write_fasta(&short, &path, &FastaWriteOptions::default());
        assert!(matches!(
            result,
            Err(OutputError::Validation(ValidationError::SequenceTooShort(1)))
        ));

        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
