//! Filesystem mutations behind the explorer's commands.
//!
//! Every operation takes explicit paths and returns [`FsResult`], so the UI can
//! report the precise failure in its status bar and refresh the listing.

use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;

use walkdir::WalkDir;

use super::error::{FsError, FsResult, IoResultExt};
use crate::models::DirEntry;

/// Validate a user-typed entry name and return it trimmed
///
/// Names must be a single path component: not empty, not `.` or `..`, and free of
/// path separators.
pub fn validate_entry_name(name: &str) -> FsResult<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() || trimmed == "." || trimmed == ".." {
        return Err(FsError::InvalidName(name.to_string()));
    }
    if trimmed.contains('/') || trimmed.contains(std::path::MAIN_SEPARATOR) {
        return Err(FsError::InvalidName(name.to_string()));
    }
    let mut components = Path::new(trimmed).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => Ok(trimmed),
        _ => Err(FsError::InvalidName(name.to_string())),
    }
}

/// Create an empty folder named `name` inside `dir`
pub fn create_folder(dir: &Path, name: &str) -> FsResult<PathBuf> {
    let name = validate_entry_name(name)?;
    let target = dir.join(name);
    fs::create_dir(&target).at(&target)?;
    tracing::info!(path = %target.display(), "created folder");
    Ok(target)
}

/// Create an empty file named `name` inside `dir`
pub fn create_file(dir: &Path, name: &str) -> FsResult<PathBuf> {
    let name = validate_entry_name(name)?;
    let target = dir.join(name);
    // create_new refuses to clobber an existing entry atomically
    fs::OpenOptions::new().write(true).create_new(true).open(&target).at(&target)?;
    tracing::info!(path = %target.display(), "created file");
    Ok(target)
}

/// Rename `path` to `new_name` within the same folder
///
/// Renaming to the current name is a no-op.
pub fn rename_entry(path: &Path, new_name: &str) -> FsResult<PathBuf> {
    let new_name = validate_entry_name(new_name)?;
    let parent = path.parent().ok_or_else(|| FsError::InvalidName(new_name.to_string()))?;
    let target = parent.join(new_name);

    if target == path {
        return Ok(target);
    }
    if path.symlink_metadata().is_err() {
        return Err(FsError::NotFound(path.to_path_buf()));
    }
    if target.exists() {
        return Err(FsError::AlreadyExists(target));
    }

    fs::rename(path, &target).at(path)?;
    tracing::info!(from = %path.display(), to = %target.display(), "renamed");
    Ok(target)
}

/// Delete a file, or a folder with everything inside it
pub fn delete_entry(path: &Path) -> FsResult<()> {
    let metadata = fs::symlink_metadata(path).at(path)?;
    if metadata.is_dir() {
        fs::remove_dir_all(path).at(path)?;
    } else {
        // Files and symlinks (a link to a folder only loses the link)
        fs::remove_file(path).at(path)?;
    }
    tracing::info!(path = %path.display(), "deleted");
    Ok(())
}

/// First free name for a copy of `path`: `"<stem> - Copy<i><.ext>"`
///
/// Returns `path` itself when nothing exists there yet.
pub fn unique_copy_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let parent = path.parent().unwrap_or_else(|| Path::new(""));
    let stem = path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
    let ext = path.extension().map(|e| format!(".{}", e.to_string_lossy())).unwrap_or_default();

    let mut i = 1u64;
    loop {
        let candidate = parent.join(format!("{} - Copy{}{}", stem, i, ext));
        if !candidate.exists() {
            return candidate;
        }
        i += 1;
    }
}

/// Copy `src` (file or folder tree) into `dest_dir`
///
/// Name collisions produce `"<stem> - Copy<i><.ext>"`. Returns the path of the copy.
pub fn paste_entry(src: &Path, dest_dir: &Path) -> FsResult<PathBuf> {
    if !src.exists() {
        return Err(FsError::SourceMissing(src.to_path_buf()));
    }
    let file_name = src.file_name().ok_or_else(|| FsError::SourceMissing(src.to_path_buf()))?;
    let dest = unique_copy_path(&dest_dir.join(file_name));

    if src.is_dir() {
        if is_same_or_descendant(dest_dir, src) {
            return Err(FsError::IntoItself(src.to_path_buf()));
        }
        copy_tree(src, &dest)?;
    } else {
        // fs::copy carries permission bits over
        fs::copy(src, &dest).at(src)?;
    }

    tracing::info!(from = %src.display(), to = %dest.display(), "pasted");
    Ok(dest)
}

/// Recursively copy the folder `src` to the new path `dest`
fn copy_tree(src: &Path, dest: &Path) -> FsResult<()> {
    for entry in WalkDir::new(src).follow_links(false) {
        let entry = entry.map_err(|e| {
            let path = e.path().map(Path::to_path_buf).unwrap_or_else(|| src.to_path_buf());
            match e.into_io_error() {
                Some(io_err) => FsError::from_io(path, io_err),
                None => FsError::Io { path, source: io::Error::other("filesystem loop") },
            }
        })?;

        let relative = entry.path().strip_prefix(src).map_err(|_| FsError::Io {
            path: entry.path().to_path_buf(),
            source: io::Error::other("entry outside source tree"),
        })?;
        let target = dest.join(relative);

        let file_type = entry.file_type();
        if file_type.is_dir() {
            fs::create_dir_all(&target).at(&target)?;
        } else if file_type.is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target).at(entry.path())?;
        }
    }
    Ok(())
}

#[cfg(unix)]
fn copy_symlink(link: &Path, target: &Path) -> FsResult<()> {
    let points_to = fs::read_link(link).at(link)?;
    std::os::unix::fs::symlink(points_to, target).at(target)
}

#[cfg(not(unix))]
fn copy_symlink(link: &Path, target: &Path) -> FsResult<()> {
    // Without portable symlink creation, copy what the link points to
    if link.is_dir() {
        copy_tree(link, target)
    } else {
        fs::copy(link, target).map(|_| ()).at(link)
    }
}

/// Folder a move lands in: the folder under the cursor, otherwise `current_dir`
pub fn drop_target(current_dir: &Path, under_cursor: Option<&DirEntry>) -> PathBuf {
    match under_cursor {
        Some(entry) if entry.is_folder() => entry.path.clone(),
        _ => current_dir.to_path_buf(),
    }
}

/// Outcome of a multi-entry move
#[derive(Debug, Default)]
pub struct MoveReport {
    pub moved: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub failed: Vec<(PathBuf, FsError)>,
}

impl MoveReport {
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Move every source into `target_dir` (the drag and drop operation)
///
/// Each source is handled on its own: a source already in `target_dir` is skipped,
/// and one failure does not stop the remaining moves.
pub fn move_entries(sources: &[PathBuf], target_dir: &Path) -> MoveReport {
    let mut report = MoveReport::default();

    for src in sources {
        match move_entry(src, target_dir) {
            Ok(Some(dest)) => report.moved.push(dest),
            Ok(None) => report.skipped.push(src.clone()),
            Err(e) => {
                tracing::warn!(src = %src.display(), error = %e, "move failed");
                report.failed.push((src.clone(), e));
            }
        }
    }

    report
}

/// Move one entry; `Ok(None)` when it already lives in `target_dir`
fn move_entry(src: &Path, target_dir: &Path) -> FsResult<Option<PathBuf>> {
    if fs::symlink_metadata(src).is_err() {
        return Err(FsError::NotFound(src.to_path_buf()));
    }
    if !target_dir.is_dir() {
        return Err(FsError::NotFound(target_dir.to_path_buf()));
    }
    let file_name = src.file_name().ok_or_else(|| FsError::InvalidName(src.display().to_string()))?;
    let dest = target_dir.join(file_name);

    if same_location(src, &dest) {
        return Ok(None);
    }
    if src.is_dir() && is_same_or_descendant(target_dir, src) {
        return Err(FsError::IntoItself(src.to_path_buf()));
    }
    if dest.exists() {
        return Err(FsError::AlreadyExists(dest));
    }

    match fs::rename(src, &dest) {
        Ok(()) => {}
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => copy_then_remove(src, &dest)?,
        Err(e) => return Err(FsError::from_io(src, e)),
    }

    tracing::info!(from = %src.display(), to = %dest.display(), "moved");
    Ok(Some(dest))
}

/// Move across filesystems: copy `src` to `dest`, then remove `src`
fn copy_then_remove(src: &Path, dest: &Path) -> FsResult<()> {
    copy_then_remove_with(src, dest, |src, dest| {
        if src.is_dir() {
            copy_tree(src, dest)
        } else {
            fs::copy(src, dest).map(|_| ()).at(src)
        }
    })
}

/// A copy that fails partway is removed again, leaving `src` as the only copy
fn copy_then_remove_with(
    src: &Path,
    dest: &Path,
    copy: impl FnOnce(&Path, &Path) -> FsResult<()>,
) -> FsResult<()> {
    if let Err(e) = copy(src, dest) {
        if fs::symlink_metadata(dest).is_ok()
            && let Err(cleanup) = delete_entry(dest)
        {
            tracing::warn!(dest = %dest.display(), error = %cleanup, "partial copy left behind");
        }
        return Err(e);
    }
    delete_entry(src)
}

/// Open a file with the platform's default application
pub fn open_with_system(path: &Path) -> FsResult<()> {
    if !path.exists() {
        return Err(FsError::NotFound(path.to_path_buf()));
    }

    let mut command = system_open_command(path);
    command.stdin(Stdio::null()).stdout(Stdio::null()).stderr(Stdio::null());
    spawn_reaped(&mut command).at(path)?;
    tracing::info!(path = %path.display(), "opened with system handler");
    Ok(())
}

/// Spawn `command` without blocking; a detached thread waits on the child so it
/// does not linger as a zombie
fn spawn_reaped(command: &mut Command) -> io::Result<thread::JoinHandle<Option<ExitStatus>>> {
    let mut child = command.spawn()?;
    Ok(thread::spawn(move || match child.wait() {
        Ok(status) => Some(status),
        Err(e) => {
            tracing::debug!(error = %e, "system opener wait failed");
            None
        }
    }))
}

fn system_open_command(path: &Path) -> Command {
    if cfg!(target_os = "windows") {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg("start").arg("").arg(path);
        cmd
    } else if cfg!(target_os = "macos") {
        let mut cmd = Command::new("open");
        cmd.arg(path);
        cmd
    } else {
        let mut cmd = Command::new("xdg-open");
        cmd.arg(path);
        cmd
    }
}

/// True when `candidate` is `ancestor` or lies below it
fn is_same_or_descendant(candidate: &Path, ancestor: &Path) -> bool {
    let candidate = candidate.canonicalize().unwrap_or_else(|_| candidate.to_path_buf());
    let ancestor = ancestor.canonicalize().unwrap_or_else(|_| ancestor.to_path_buf());
    candidate.starts_with(&ancestor)
}

fn same_location(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;
    use crate::models::EntryKind;

    #[test]
    fn test_validate_entry_name() {
        assert_eq!(validate_entry_name("  notes.txt ").unwrap(), "notes.txt");
        assert!(matches!(validate_entry_name("   "), Err(FsError::InvalidName(_))));
        assert!(matches!(validate_entry_name(".."), Err(FsError::InvalidName(_))));
        assert!(matches!(validate_entry_name("a/b"), Err(FsError::InvalidName(_))));
    }

    #[test]
    fn test_create_folder_and_file() {
        let dir = TempDir::new().unwrap();
        let folder = create_folder(dir.path(), " docs ").unwrap();
        assert!(folder.is_dir());
        assert_eq!(folder, dir.path().join("docs"));

        let file = create_file(dir.path(), "todo.md").unwrap();
        assert!(file.is_file());
        assert_eq!(fs::read_to_string(file).unwrap(), "");
    }

    #[test]
    fn test_create_existing_fails() {
        let dir = TempDir::new().unwrap();
        create_file(dir.path(), "a.txt").unwrap();
        assert!(matches!(create_file(dir.path(), "a.txt"), Err(FsError::AlreadyExists(_))));

        create_folder(dir.path(), "sub").unwrap();
        assert!(matches!(create_folder(dir.path(), "sub"), Err(FsError::AlreadyExists(_))));
    }

    #[test]
    fn test_rename_entry() {
        let dir = TempDir::new().unwrap();
        let original = dir.path().join("old.txt");
        fs::write(&original, "data").unwrap();

        let renamed = rename_entry(&original, "new.txt").unwrap();
        assert!(!original.exists());
        assert_eq!(fs::read_to_string(renamed).unwrap(), "data");
    }

    #[test]
    fn test_rename_onto_existing_fails() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("a"), "a").unwrap();
        fs::write(dir.path().join("b"), "b").unwrap();

        let err = rename_entry(&dir.path().join("a"), "b").unwrap_err();
        assert!(matches!(err, FsError::AlreadyExists(_)));
        assert_eq!(fs::read_to_string(dir.path().join("b")).unwrap(), "b");
    }

    #[test]
    fn test_rename_same_name_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("same");
        fs::write(&path, "x").unwrap();
        assert_eq!(rename_entry(&path, "same").unwrap(), path);
        assert!(path.exists());
    }

    #[test]
    fn test_delete_file_and_folder() {
        let dir = TempDir::new().unwrap();
        let file = dir.path().join("f.txt");
        fs::write(&file, "x").unwrap();
        let folder = dir.path().join("tree");
        fs::create_dir_all(folder.join("deep/er")).unwrap();
        fs::write(folder.join("deep/er/leaf"), "x").unwrap();

        delete_entry(&file).unwrap();
        delete_entry(&folder).unwrap();
        assert!(!file.exists());
        assert!(!folder.exists());
    }

    #[test]
    fn test_delete_missing_is_not_found() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(delete_entry(&dir.path().join("nope")), Err(FsError::NotFound(_))));
    }

    #[test]
    fn test_unique_copy_path_numbering() {
        let dir = TempDir::new().unwrap();
        let original = dir.path().join("report.pdf");
        assert_eq!(unique_copy_path(&original), original);

        fs::write(&original, "x").unwrap();
        assert_eq!(unique_copy_path(&original), dir.path().join("report - Copy1.pdf"));

        fs::write(dir.path().join("report - Copy1.pdf"), "x").unwrap();
        assert_eq!(unique_copy_path(&original), dir.path().join("report - Copy2.pdf"));
    }

    #[test]
    fn test_unique_copy_path_dotfile_and_double_ext() {
        let dir = TempDir::new().unwrap();
        let dotfile = dir.path().join(".bashrc");
        fs::write(&dotfile, "x").unwrap();
        assert_eq!(unique_copy_path(&dotfile), dir.path().join(".bashrc - Copy1"));

        let archive = dir.path().join("backup.tar.gz");
        fs::write(&archive, "x").unwrap();
        assert_eq!(unique_copy_path(&archive), dir.path().join("backup.tar - Copy1.gz"));
    }

    #[test]
    fn test_paste_into_same_folder_makes_copy() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, "hello").unwrap();

        let copy = paste_entry(&src, dir.path()).unwrap();
        assert_eq!(copy, dir.path().join("a - Copy1.txt"));
        assert_eq!(fs::read_to_string(copy).unwrap(), "hello");
    }

    #[test]
    fn test_paste_folder_tree() {
        let src_root = TempDir::new().unwrap();
        let dest_root = TempDir::new().unwrap();
        let src = src_root.path().join("project");
        fs::create_dir_all(src.join("src/bin")).unwrap();
        fs::write(src.join("src/bin/main.rs"), "fn main() {}").unwrap();
        fs::write(src.join("README"), "readme").unwrap();

        let copy = paste_entry(&src, dest_root.path()).unwrap();
        assert_eq!(copy, dest_root.path().join("project"));
        assert_eq!(fs::read_to_string(copy.join("src/bin/main.rs")).unwrap(), "fn main() {}");
        assert_eq!(fs::read_to_string(copy.join("README")).unwrap(), "readme");
    }

    #[test]
    fn test_paste_folder_into_itself_rejected() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("outer");
        fs::create_dir_all(src.join("inner")).unwrap();

        let err = paste_entry(&src, &src.join("inner")).unwrap_err();
        assert!(matches!(err, FsError::IntoItself(_)));
    }

    #[test]
    fn test_paste_missing_source() {
        let dir = TempDir::new().unwrap();
        let err = paste_entry(&dir.path().join("vanished"), dir.path()).unwrap_err();
        assert!(matches!(err, FsError::SourceMissing(_)));
        assert!(err.to_string().contains("Nothing to paste"));
    }

    #[test]
    fn test_drop_target() {
        let folder = DirEntry {
            name: "sub".to_string(),
            path: PathBuf::from("/tmp/x/sub"),
            kind: EntryKind::Folder,
            size: None,
            modified: None,
        };
        let file = DirEntry { kind: EntryKind::File, path: PathBuf::from("/tmp/x/f"), ..folder.clone() };
        let current = Path::new("/tmp/x");

        assert_eq!(drop_target(current, Some(&folder)), PathBuf::from("/tmp/x/sub"));
        assert_eq!(drop_target(current, Some(&file)), PathBuf::from("/tmp/x"));
        assert_eq!(drop_target(current, None), PathBuf::from("/tmp/x"));
    }

    #[test]
    fn test_move_entries_into_folder() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("target");
        fs::create_dir(&target).unwrap();
        let a = dir.path().join("a.txt");
        let b = dir.path().join("b");
        fs::write(&a, "a").unwrap();
        fs::create_dir(&b).unwrap();

        let report = move_entries(&[a.clone(), b.clone()], &target);
        assert!(report.is_clean());
        assert_eq!(report.moved.len(), 2);
        assert!(target.join("a.txt").is_file());
        assert!(target.join("b").is_dir());
        assert!(!a.exists());
    }

    #[test]
    fn test_move_into_same_folder_is_skipped() {
        let dir = TempDir::new().unwrap();
        let a = dir.path().join("a.txt");
        fs::write(&a, "a").unwrap();

        let report = move_entries(std::slice::from_ref(&a), dir.path());
        assert_eq!(report.skipped, vec![a.clone()]);
        assert!(a.exists());
    }

    #[test]
    fn test_move_continues_after_failure() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("t");
        fs::create_dir(&target).unwrap();
        fs::write(target.join("dup.txt"), "old").unwrap();
        let dup = dir.path().join("dup.txt");
        let fine = dir.path().join("fine.txt");
        fs::write(&dup, "new").unwrap();
        fs::write(&fine, "ok").unwrap();

        let report = move_entries(&[dup.clone(), fine], &target);
        assert_eq!(report.failed.len(), 1);
        assert!(matches!(report.failed[0].1, FsError::AlreadyExists(_)));
        assert_eq!(report.moved, vec![target.join("fine.txt")]);
        assert_eq!(fs::read_to_string(target.join("dup.txt")).unwrap(), "old");
        assert!(dup.exists());
    }

    #[test]
    fn test_move_folder_into_descendant_rejected() {
        let dir = TempDir::new().unwrap();
        let outer = dir.path().join("outer");
        fs::create_dir_all(outer.join("child")).unwrap();

        let report = move_entries(std::slice::from_ref(&outer), &outer.join("child"));
        assert!(matches!(report.failed[0].1, FsError::IntoItself(_)));
        assert!(outer.is_dir());
    }

    #[test]
    fn test_open_missing_file() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(open_with_system(&dir.path().join("nope")), Err(FsError::NotFound(_))));
    }

    #[test]
    fn test_copy_then_remove_folder() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("photos");
        fs::create_dir_all(src.join("2024")).unwrap();
        fs::write(src.join("2024").join("beach.jpg"), "jpg").unwrap();
        let dest = dir.path().join("elsewhere").join("photos");
        fs::create_dir(dir.path().join("elsewhere")).unwrap();

        copy_then_remove(&src, &dest).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(dest.join("2024").join("beach.jpg")).unwrap(), "jpg");
    }

    #[test]
    fn test_copy_then_remove_file() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("a.txt");
        fs::write(&src, "data").unwrap();
        let dest = dir.path().join("b.txt");

        copy_then_remove(&src, &dest).unwrap();
        assert!(!src.exists());
        assert_eq!(fs::read_to_string(&dest).unwrap(), "data");
    }

    #[test]
    fn test_copy_then_remove_cleans_partial_copy() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("project");
        fs::create_dir(&src).unwrap();
        fs::write(src.join("one.txt"), "1").unwrap();
        fs::write(src.join("two.txt"), "2").unwrap();
        let dest = dir.path().join("copy");

        // Copies the first file, then fails on the second
        let err = copy_then_remove_with(&src, &dest, |src, dest| {
            fs::create_dir(dest).at(dest)?;
            fs::copy(src.join("one.txt"), dest.join("one.txt")).at(src)?;
            Err(FsError::PermissionDenied(src.join("two.txt")))
        })
        .unwrap_err();

        assert!(matches!(err, FsError::PermissionDenied(_)));
        assert!(!dest.exists());
        assert!(src.join("one.txt").exists());
        assert!(src.join("two.txt").exists());
    }

    #[test]
    fn test_copy_then_remove_failure_before_copy() {
        let dir = TempDir::new().unwrap();
        let src = dir.path().join("gone.txt");
        let dest = dir.path().join("dest.txt");

        let err = copy_then_remove(&src, &dest).unwrap_err();
        assert!(matches!(err, FsError::NotFound(_)));
        assert!(!dest.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_spawned_opener_is_reaped() {
        let mut command = Command::new("sh");
        command.arg("-c").arg("exit 3");

        let reaper = spawn_reaped(&mut command).unwrap();
        let status = reaper.join().unwrap().expect("child should be waited on");
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn test_spawn_missing_program_errors() {
        let mut command = Command::new("filey-no-such-opener-program");
        assert!(spawn_reaped(&mut command).is_err());
    }
}
