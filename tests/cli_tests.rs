//! Command-line tests for the vasta binary.

use std::fs;
use std::io::Read;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

const REFERENCE: &str = ">REF001|Test organism|Reference\nACGTACGTACGTACGTACGT\n";

const VCF: &str = "##fileformat=VCFv4.2
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\tFORMAT\tSAMPLE
REF001\t2\t.\tG\tC\t.\tPASS\t.\tGT\t1/1
REF001\t5\t.\tC\tT\t.\tPASS\t.\tGT\t0/1
REF001\t6\t.\tG\tT\t.\tPASS\t.\tGT\t./.
";

fn setup(dir: &Path) {
    fs::write(dir.join("ref.fasta"), REFERENCE).unwrap();
    fs::write(dir.join("SAMPLE01.vcf"), VCF).unwrap();
}

fn vasta() -> Command {
    Command::cargo_bin("vasta").unwrap()
}

fn read_gzip(path: &Path) -> String {
    let mut text = String::new();
    flate2::read::GzDecoder::new(fs::File::open(path).unwrap())
        .read_to_string(&mut text)
        .unwrap();
    text
}

#[test]
fn test_apply_writes_gzipped_fasta() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());

    vasta()
        .arg("apply")
        .arg("--vcf-file")
        .arg(dir.path().join("SAMPLE01.vcf"))
        .arg("--fasta-file")
        .arg(dir.path().join("ref.fasta"))
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample: SAMPLE01"))
        .stdout(predicate::str::contains("SAMPLE01.fasta.gz"));

    let output = dir.path().join("SAMPLE01.fasta.gz");
    assert_eq!(
        read_gzip(&output),
        ">REF001|Test organism|SAMPLE01\nACCTAN-TACGTACGTACGT\n"
    );
}

#[test]
fn test_apply_lowercase_and_width() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());

    vasta()
        .arg("apply")
        .arg("--vcf-file")
        .arg(dir.path().join("SAMPLE01.vcf"))
        .arg("--fasta-file")
        .arg(dir.path().join("ref.fasta"))
        .args(["--chars-per-line", "8", "--lowercase", "--save-array"])
        .assert()
        .success();

    assert_eq!(
        read_gzip(&dir.path().join("SAMPLE01.fasta.gz")),
        ">REF001|Test organism|SAMPLE01\nacctan-t\nacgtacgt\nacgt\n"
    );
    assert!(dir.path().join("SAMPLE01.bin").exists());
}

#[test]
fn test_apply_json_summary() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());

    vasta()
        .args(["--format", "json", "apply", "--vcf-file"])
        .arg(dir.path().join("SAMPLE01.vcf"))
        .arg("--fasta-file")
        .arg(dir.path().join("ref.fasta"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"records\": 3"))
        .stdout(predicate::str::contains("\"heterozygous_sites\": 1"));
}

#[test]
fn test_apply_invalid_compression_level_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());

    vasta()
        .arg("apply")
        .arg("--vcf-file")
        .arg(dir.path().join("SAMPLE01.vcf"))
        .arg("--fasta-file")
        .arg(dir.path().join("ref.fasta"))
        .args(["--compression-level", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Compression level"));

    assert!(!dir.path().join("SAMPLE01.fasta.gz").exists());
}

#[test]
fn test_apply_invalid_compression_mode() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());

    vasta()
        .arg("apply")
        .arg("--vcf-file")
        .arg(dir.path().join("SAMPLE01.vcf"))
        .arg("--fasta-file")
        .arg(dir.path().join("ref.fasta"))
        .args(["--compression", "zip"])
        .assert()
        .failure();
}

#[test]
fn test_apply_zero_width_fails() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());

    vasta()
        .arg("apply")
        .arg("--vcf-file")
        .arg(dir.path().join("SAMPLE01.vcf"))
        .arg("--fasta-file")
        .arg(dir.path().join("ref.fasta"))
        .args(["--chars-per-line", "0"])
        .assert()
        .failure();

    assert!(!dir.path().join("SAMPLE01.fasta.gz").exists());
}

#[test]
fn test_apply_missing_vcf_fails() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());

    vasta()
        .arg("apply")
        .arg("--vcf-file")
        .arg(dir.path().join("MISSING.vcf"))
        .arg("--fasta-file")
        .arg(dir.path().join("ref.fasta"))
        .assert()
        .failure();

    assert!(!dir.path().join("MISSING.fasta.gz").exists());
}

#[test]
fn test_apply_default_reference_missing_fails() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());

    vasta()
        .current_dir(dir.path())
        .args(["apply", "--vcf-file", "SAMPLE01.vcf"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to load reference"));
}

#[test]
fn test_apply_requires_vcf() {
    vasta().arg("apply").assert().failure();
}

#[test]
fn test_compare_json() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());

    vasta()
        .arg("apply")
        .arg("--vcf-file")
        .arg(dir.path().join("SAMPLE01.vcf"))
        .arg("--fasta-file")
        .arg(dir.path().join("ref.fasta"))
        .assert()
        .success();

    vasta()
        .args(["--format", "json", "compare"])
        .arg(dir.path().join("ref.fasta"))
        .arg(dir.path().join("SAMPLE01.fasta.gz"))
        .assert()
        .success()
        .stdout(predicate::str::contains("\"distance\": 3"))
        .stdout(predicate::str::contains("\"position\": 2"));
}

#[test]
fn test_compare_identical_tsv() {
    let dir = tempfile::tempdir().unwrap();
    setup(dir.path());

    vasta()
        .args(["--format", "tsv", "compare"])
        .arg(dir.path().join("ref.fasta"))
        .arg(dir.path().join("ref.fasta"))
        .assert()
        .success()
        .stdout("position\tleft\tright\n");
}
