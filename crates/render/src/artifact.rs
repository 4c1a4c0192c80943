use std::io;
use std::path::{Path, PathBuf};

use revline_core::{AssetKind, YearMonth};

/// A finished, downloadable document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    pub filename: String,
    pub mime_type: &'static str,
    pub bytes: Vec<u8>,
    /// Images left out because they were missing or undecodable.
    pub skipped_assets: Vec<AssetKind>,
}

impl Artifact {
    /// Write into `dir` under the artifact's filename.
    ///
    /// Bytes go to a temporary sibling first, so a failed write never leaves
    /// a truncated document behind.
    pub fn write_to(&self, dir: &Path) -> io::Result<PathBuf> {
        let target = dir.join(&self.filename);
        let partial = dir.join(format!(".{}.partial", self.filename));
        std::fs::write(&partial, &self.bytes)?;
        if let Err(e) = std::fs::rename(&partial, &target) {
            let _ = std::fs::remove_file(&partial);
            return Err(e);
        }
        Ok(target)
    }
}

/// Keep filenames portable: anything but `[A-Za-z0-9._-]` becomes `_`.
fn file_safe(part: &str) -> String {
    part.chars()
        .map(|c| if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') { c } else { '_' })
        .collect()
}

pub fn invoice_stem(invoice_id: &str) -> String {
    format!("invoice-{}", file_safe(invoice_id))
}

pub fn payslip_stem(employee_id: &str, month: YearMonth) -> String {
    format!("payslip-{}-{}", file_safe(employee_id), month)
}

pub fn task_sheet_stem() -> String {
    "tasks".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stems_follow_download_patterns() {
        assert_eq!(invoice_stem("INV1"), "invoice-INV1");
        assert_eq!(
            payslip_stem("7", YearMonth::new(2026, 9).unwrap()),
            "payslip-7-2026-09"
        );
        assert_eq!(task_sheet_stem(), "tasks");
    }

    #[test]
    fn path_separators_never_reach_the_filename() {
        assert_eq!(invoice_stem("../etc/passwd"), "invoice-.._etc_passwd");
    }

    #[test]
    fn write_to_leaves_only_the_final_file() {
        let dir = std::env::temp_dir().join(format!("revline-artifact-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let artifact = Artifact {
            filename: "invoice-T1.pdf".into(),
            mime_type: "application/pdf",
            bytes: b"%PDF-1.3".to_vec(),
            skipped_assets: vec![],
        };
        let path = artifact.write_to(&dir).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.3");
        assert!(!dir.join(".invoice-T1.pdf.partial").exists());
        let _ = std::fs::remove_dir_all(&dir);
    }
}
