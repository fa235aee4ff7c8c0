use std::path::{Path, PathBuf};

/// Name given to a genome loaded from an annotated GenBank record
pub const REFERENCE_NAME: &str = "Reference";

/// Identity fields attached to a genome.
///
/// None of these take part in mutation or comparison; they are only used for
/// display and for building serialization headers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenomeMetadata {
    /// External identifier (GenBank accession.version or first FASTA header field)
    pub id: Option<String>,

    /// Organism name
    pub organism: Option<String>,

    /// Sample name, or `Reference` for the wildtype genome
    pub name: Option<String>,

    /// Free-text annotation (fourth FASTA header field)
    pub additional_metadata: Option<String>,

    /// Integer suffix of the GenBank VERSION accession
    pub sequence_version: Option<u32>,

    /// GenBank SOURCE line
    pub source: Option<String>,

    /// GenBank lineage, most general first
    pub taxonomy: Vec<String>,

    /// Where the applied variants came from
    pub provenance: Option<VariantProvenance>,
}

impl GenomeMetadata {
    /// Fields written to a FASTA header, in order, skipping those not set
    pub fn header_fields(&self) -> impl Iterator<Item = &str> {
        [&self.id, &self.organism, &self.name]
            .into_iter()
            .filter_map(|field| field.as_deref())
    }
}

/// The variant file a sample genome was built from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantProvenance {
    /// Full path to the VCF file as supplied
    pub vcf_file: PathBuf,

    /// Folder containing the VCF file (empty for a bare file name)
    pub folder: PathBuf,

    /// File stem of the VCF, used as the sample name
    pub sample_name: String,
}

impl VariantProvenance {
    /// Derive provenance from a VCF path.
    ///
    /// A trailing `.gz` or `.bz2` suffix is dropped before taking the stem, so
    /// both `sample.vcf` and `sample.vcf.gz` give the sample name `sample`.
    pub fn from_vcf_path(path: &Path) -> Self {
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let uncompressed = file_name
            .strip_suffix(".gz")
            .or_else(|| file_name.strip_suffix(".bz2"))
            .unwrap_or(&file_name);

        let sample_name = Path::new(uncompressed)
            .file_stem()
            .map(|stem| stem.to_string_lossy().to_string())
            .unwrap_or_else(|| uncompressed.to_string());

        Self {
            vcf_file: path.to_path_buf(),
            folder: path.parent().map(Path::to_path_buf).unwrap_or_default(),
            sample_name,
        }
    }
}
