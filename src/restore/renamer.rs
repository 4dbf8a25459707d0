use serde::Serialize;
use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::core::error::RestoreError;
use crate::core::types::TypeId;
use crate::detection::resolver::TypeResolver;
use crate::session::Session;
use crate::shell::console::Console;
use crate::utils::validation::base_name;

/// The rename that restoring the selected file would perform
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenamePlan {
    pub from: PathBuf,
    pub to: PathBuf,
    pub type_id: TypeId,
}

impl RenamePlan {
    /// File name the selected file will carry afterwards
    #[must_use]
    pub fn new_name(&self) -> String {
        file_name_of(&self.to)
    }

    /// True when the file already carries the restored name
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

/// Work out the target name for the selected file without touching disk.
///
/// # Errors
///
/// Returns `RestoreError::NotSelected` without a selection,
/// `RestoreError::Io` if the file cannot be read, or
/// `RestoreError::UnknownType` if no signature matches.
pub fn plan_rename(
    session: &Session,
    resolver: &TypeResolver<'_>,
) -> Result<RenamePlan, RestoreError> {
    let from = session.selected()?.to_path_buf();
    let detection = resolver.detect(&from)?;

    let type_id = detection.type_id.ok_or_else(|| {
        warn!("Unknown file type for {}, cannot rename", from.display());
        RestoreError::unknown_type(&detection.prefix)
    })?;

    let to = target_path(&from, &type_id)?;
    Ok(RenamePlan { from, to, type_id })
}

/// Rename the selected file to its base name plus the resolved extension.
///
/// On success the session selection follows the file to its new path, the
/// console is told the new name, and the new name is returned. On any failure
/// the file and the selection are left as they were.
///
/// # Errors
///
/// Returns the errors of [`plan_rename`], or `RestoreError::Rename` if the
/// target exists or the filesystem refuses the rename.
pub fn rename_selected(
    session: &mut Session,
    resolver: &TypeResolver<'_>,
    console: &mut dyn Console,
) -> Result<String, RestoreError> {
    let plan = plan_rename(session, resolver)?;
    let new_name = plan.new_name();

    if plan.is_noop() {
        info!("{} already has the .{} extension", plan.from.display(), plan.type_id);
        console.notify(&format!("file already named: {new_name}"));
        return Ok(new_name);
    }

    move_without_clobber(&plan.from, &plan.to).map_err(|e| {
        warn!("Failed to rename {}: {e}", plan.from.display());
        let reason = if e.kind() == ErrorKind::AlreadyExists {
            "target already exists".to_string()
        } else {
            e.to_string()
        };
        RestoreError::Rename {
            from: plan.from.clone(),
            to: plan.to.clone(),
            reason,
        }
    })?;

    info!("Renamed {} to {}", plan.from.display(), plan.to.display());
    session.replace_selection(plan.to);
    console.notify(&format!("file renamed to: {new_name}"));
    Ok(new_name)
}

/// Move `from` to `to`, failing with `AlreadyExists` if anything is at `to`.
///
/// The new name is created with a hard link, which never replaces an existing
/// entry, and the old name is removed afterwards. Filesystems without hard
/// links fall back to an existence check followed by `rename`.
fn move_without_clobber(from: &Path, to: &Path) -> io::Result<()> {
    match fs::hard_link(from, to) {
        Ok(()) => {
            if let Err(e) = fs::remove_file(from) {
                // Leave the file under its old name only
                if let Err(cleanup) = fs::remove_file(to) {
                    warn!("Could not remove {}: {cleanup}", to.display());
                }
                return Err(e);
            }
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(e),
        Err(e) => {
            debug!("Hard link to {} failed ({e}), renaming instead", to.display());
            if fs::symlink_metadata(to).is_ok() {
                return Err(io::Error::from(ErrorKind::AlreadyExists));
            }
            fs::rename(from, to)
        }
    }
}

/// Sibling path of `from` named `<base>.<type_id>`
fn target_path(from: &Path, type_id: &TypeId) -> Result<PathBuf, RestoreError> {
    let name = from
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            RestoreError::InvalidArgument(format!(
                "{} has no UTF-8 file name",
                from.display()
            ))
        })?;

    let renamed = format!("{}.{}", base_name(name), type_id.extension());
    Ok(from.with_file_name(renamed))
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::container::tests::write_archive;
    use crate::signatures::SignatureTable;
    use tempfile::TempDir;

    fn setup(name: &str, bytes: &[u8]) -> (TempDir, Session) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join(name), bytes).unwrap();
        let mut session = Session::new(dir.path()).unwrap();
        session.select_file(name).unwrap();
        (dir, session)
    }

    fn resolver() -> TypeResolver<'static> {
        TypeResolver::new(SignatureTable::embedded().unwrap())
    }

    #[test]
    fn test_rename_png() {
        let (dir, mut session) = setup("testfile", &[0x89, 0x50, 0x4E, 0x47]);
        let mut console: Vec<String> = Vec::new();

        let name = rename_selected(&mut session, &resolver(), &mut console).unwrap();

        assert_eq!(name, "testfile.png");
        assert!(dir.path().join("testfile.png").exists());
        assert!(!dir.path().join("testfile").exists());
        assert_eq!(session.selected_file_name().unwrap(), "testfile.png");
        assert!(session.selected().unwrap().exists());
        assert_eq!(console, vec!["file renamed to: testfile.png"]);
    }

    #[test]
    fn test_rename_replaces_wrong_extension() {
        let (dir, mut session) = setup("scan.txt", &[0x25, 0x50, 0x44, 0x46, 0x2D, 0x31]);
        let mut console: Vec<String> = Vec::new();

        let name = rename_selected(&mut session, &resolver(), &mut console).unwrap();

        assert_eq!(name, "scan.pdf");
        assert!(dir.path().join("scan.pdf").exists());
        assert!(!dir.path().join("scan.txt").exists());
    }

    #[test]
    fn test_rename_truncates_at_first_dot() {
        let (dir, mut session) = setup("backup.tar.gz", &[0x37, 0x7A, 0xBC, 0xAF, 0x27, 0x1C]);
        let mut console: Vec<String> = Vec::new();

        let name = rename_selected(&mut session, &resolver(), &mut console).unwrap();

        assert_eq!(name, "backup.7z");
        assert!(dir.path().join("backup.7z").exists());
    }

    #[test]
    fn test_rename_docx_container() {
        let dir = TempDir::new().unwrap();
        write_archive(&dir.path().join("letter"), &["word/document.xml"]);
        let mut session = Session::new(dir.path()).unwrap();
        session.select_file("letter").unwrap();
        let mut console: Vec<String> = Vec::new();

        let name = rename_selected(&mut session, &resolver(), &mut console).unwrap();

        assert_eq!(name, "letter.docx");
        assert!(dir.path().join("letter.docx").exists());
    }

    #[test]
    fn test_unknown_type_leaves_file() {
        let (dir, mut session) = setup("blob", &[0x00, 0x01, 0x02, 0x03]);
        let mut console: Vec<String> = Vec::new();

        let result = rename_selected(&mut session, &resolver(), &mut console);

        assert!(matches!(result, Err(RestoreError::UnknownType { .. })));
        assert!(dir.path().join("blob").exists());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
        assert_eq!(session.selected_file_name().unwrap(), "blob");
        assert!(console.is_empty());
    }

    #[test]
    fn test_not_selected() {
        let dir = TempDir::new().unwrap();
        let mut session = Session::new(dir.path()).unwrap();
        let mut console: Vec<String> = Vec::new();

        let result = rename_selected(&mut session, &resolver(), &mut console);
        assert!(matches!(result, Err(RestoreError::NotSelected)));
    }

    #[test]
    fn test_existing_target_is_not_clobbered() {
        let (dir, mut session) = setup("picture", &[0x47, 0x49, 0x46, 0x38, 0x39, 0x61]);
        std::fs::write(dir.path().join("picture.gif"), b"precious").unwrap();
        let mut console: Vec<String> = Vec::new();

        let result = rename_selected(&mut session, &resolver(), &mut console);

        assert!(matches!(result, Err(RestoreError::Rename { .. })));
        assert_eq!(
            std::fs::read(dir.path().join("picture.gif")).unwrap(),
            b"precious"
        );
        assert!(dir.path().join("picture").exists());
        assert_eq!(session.selected_file_name().unwrap(), "picture");
    }

    #[cfg(unix)]
    #[test]
    fn test_dangling_symlink_target_is_not_replaced() {
        let (dir, mut session) = setup("movie", &[0x66, 0x74, 0x79, 0x70]);
        let target = dir.path().join("movie.mp4");
        std::os::unix::fs::symlink(dir.path().join("nowhere"), &target).unwrap();
        let mut console: Vec<String> = Vec::new();

        let result = rename_selected(&mut session, &resolver(), &mut console);

        match result {
            Err(RestoreError::Rename { reason, .. }) => {
                assert_eq!(reason, "target already exists");
            }
            other => panic!("expected rename error, got {other:?}"),
        }
        assert!(std::fs::symlink_metadata(&target)
            .unwrap()
            .file_type()
            .is_symlink());
        assert_eq!(std::fs::read(dir.path().join("movie")).unwrap(), [0x66, 0x74, 0x79, 0x70]);
        assert!(console.is_empty());
    }

    #[test]
    fn test_rename_keeps_content_and_removes_old_name() {
        let bytes = [0x52, 0x61, 0x72, 0x21, 0x1A, 0x07, 0x00];
        let (dir, mut session) = setup("archive", &bytes);
        let mut console: Vec<String> = Vec::new();

        rename_selected(&mut session, &resolver(), &mut console).unwrap();

        assert_eq!(std::fs::read(dir.path().join("archive.rar")).unwrap(), bytes);
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_already_correct_name_is_noop() {
        let (dir, mut session) = setup("logo.png", &[0x89, 0x50, 0x4E, 0x47]);
        let mut console: Vec<String> = Vec::new();

        let name = rename_selected(&mut session, &resolver(), &mut console).unwrap();

        assert_eq!(name, "logo.png");
        assert!(dir.path().join("logo.png").exists());
        assert_eq!(console, vec!["file already named: logo.png"]);
    }

    #[test]
    fn test_plan_does_not_touch_disk() {
        let (dir, session) = setup("clip", &[0x66, 0x74, 0x79, 0x70]);

        let plan = plan_rename(&session, &resolver()).unwrap();

        assert_eq!(plan.type_id, TypeId::new("mp4"));
        assert_eq!(plan.new_name(), "clip.mp4");
        assert!(!plan.is_noop());
        assert!(dir.path().join("clip").exists());
        assert!(!dir.path().join("clip.mp4").exists());
    }

    #[test]
    fn test_hidden_file_keeps_leading_dot() {
        let (dir, mut session) = setup(".avatar", &[0xFF, 0xD8, 0xFF, 0xDB]);
        let mut console: Vec<String> = Vec::new();

        let name = rename_selected(&mut session, &resolver(), &mut console).unwrap();

        assert_eq!(name, ".avatar.jpg");
        assert!(dir.path().join(".avatar.jpg").exists());
    }
}
