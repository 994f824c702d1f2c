use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

// Temporary sibling of the target file. It has to be in
// the same directory or rename() may not be atomic (or
// may not work at all across filesystems). I put the PID
// in there too, even though two writers aren't supported
// anyway.
pub fn temp_path_for(path: &Path) -> PathBuf {
  let file_name = path.file_name()
    .map(|n| n.to_string_lossy().into_owned())
    .unwrap_or_else(|| String::from("comments"));
  path.with_file_name(format!(".{}.tmp.{}", file_name, std::process::id()))
}

// Write everything to the temp file, flush it to disk,
// then rename it over the target. Readers either see
// the old file or the new one, never half of it.
pub fn atomic_write(path: &Path, contents: &[u8]) -> io::Result<()> {
  let tmp_path = temp_path_for(path);
  let written = File::create(&tmp_path)
    .and_then(|mut file| {
      file.write_all(contents)?;
      file.sync_all()
    });
  if let Err(e) = written.and_then(|_| fs::rename(&tmp_path, path)) {
    // Whatever happened, don't leave the temp file around.
    let _ = fs::remove_file(&tmp_path);
    return Err(e);
  }
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn temp_file_is_a_hidden_sibling() {
    let sut = temp_path_for(Path::new("/data/comments.json"));
    assert_eq!(Some(Path::new("/data")), sut.parent());
    assert!(sut.file_name().unwrap().to_string_lossy().starts_with(".comments.json.tmp."));
  }

  #[test]
  fn atomic_write_replaces_content() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("comments.json");
    fs::write(&path, "old content that is longer").unwrap();
    atomic_write(&path, b"new").unwrap();
    assert_eq!("new", fs::read_to_string(&path).unwrap());
    // Only the target should be left in there:
    assert_eq!(1, fs::read_dir(dir.path()).unwrap().count());
  }

  #[test]
  fn atomic_write_fails_in_missing_directory() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nope").join("comments.json");
    assert!(atomic_write(&path, b"[]").is_err());
    assert!(!path.exists());
  }

}
