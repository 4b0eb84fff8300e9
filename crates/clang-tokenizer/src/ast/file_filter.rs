use std::{
    collections::HashMap,
    path::{Path, PathBuf},
};

/// Decides whether a file name refers to a target file: exact string
/// equality first, then canonical path equality. Answers are cached per
/// distinct file name.
pub(crate) struct FileFilter<'a> {
    target: &'a str,
    canonical_target: Option<PathBuf>,
    seen: HashMap<&'a str, bool>,
}

impl<'a> FileFilter<'a> {
    pub(crate) fn new(target: &'a str) -> Self {
        Self {
            target,
            canonical_target: Path::new(target).canonicalize().ok(),
            seen: HashMap::new(),
        }
    }

    pub(crate) fn matches(
        &mut self,
        file: &'a str,
    ) -> bool {
        if file == self.target {
            return true;
        }
        if let Some(&known) = self.seen.get(file) {
            return known;
        }
        let same = self
            .canonical_target
            .as_ref()
            .is_some_and(|target| Path::new(file).canonicalize().is_ok_and(|candidate| &candidate == target));
        self.seen.insert(file, same);
        same
    }
}
