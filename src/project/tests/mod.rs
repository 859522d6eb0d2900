mod tests_corpus;

use std::fs;
use std::path::Path;

/// Write `content` to `root/relative`, creating parent directories.
pub(super) fn write_file(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent directories");
    }
    fs::write(path, content).expect("write source file");
}
