use std::{
    io::{self, Write},
    path::{Path, PathBuf},
};

use tfsync_core::{FileRules, GeneratedFile, WriteResult};
use tracing::{debug, error, info};

use crate::{Error, FileKind, Result, RootModuleInputData};

/// One file of a root module, bound to the input it renders.
struct RootModuleFile<'a> {
    kind: FileKind,
    input: &'a RootModuleInputData,
}

impl GeneratedFile for RootModuleFile<'_> {
    fn path(&self, base: &Path) -> PathBuf {
        base.join(self.kind.filename())
    }

    fn rules(&self) -> FileRules {
        let rules = if self.input.skip_existing {
            FileRules::if_missing()
        } else {
            FileRules::always_overwrite()
        };
        rules.with_mode(self.input.file_perms)
    }

    fn render(&self, w: &mut dyn Write) -> io::Result<()> {
        self.kind.render(w, self.input)
    }
}

/// Normalize `input` and write its root module into `input.path`.
///
/// Files are written in [`FileKind::ALL`] order and the first failure stops
/// the run.
pub fn init_root_module(input: &mut RootModuleInputData) -> Result<()> {
    input.init();
    let input = &*input;

    for kind in FileKind::ALL {
        let filename = kind.filename();
        if !kind.is_required(input) {
            debug!(task = %input.task.name, file = filename, "nothing to write, skipping file");
            continue;
        }

        let file = RootModuleFile { kind, input };
        let path = file.path(&input.path);
        debug!(task = %input.task.name, path = %path.display(), "creating file in root module");

        match file.write(&input.path) {
            Ok(WriteResult::Written) => {}
            Ok(WriteResult::Overwritten) => {
                info!(
                    task = %input.task.name,
                    path = %path.display(),
                    "overwrote file in root module"
                );
            }
            Ok(WriteResult::Skipped) => {
                debug!(
                    task = %input.task.name,
                    path = %path.display(),
                    "file already exists, skipping"
                );
            }
            Err(source) => {
                error!(
                    task = %input.task.name,
                    path = %path.display(),
                    error = %source,
                    "unable to write file"
                );
                return Err(Error::File {
                    task: input.task.name.clone(),
                    file: filename,
                    source,
                });
            }
        }
    }

    Ok(())
}

/// A rendered root module file that has not been written to disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewFile {
    pub kind: FileKind,
    pub content: String,
}

impl PreviewFile {
    pub fn filename(&self) -> &'static str {
        self.kind.filename()
    }
}

/// Normalize `input` and render its root module in memory.
pub fn preview(input: &mut RootModuleInputData) -> Vec<PreviewFile> {
    input.init();
    let input = &*input;

    FileKind::ALL
        .into_iter()
        .filter(|kind| kind.is_required(input))
        .map(|kind| {
            let mut buf = Vec::new();
            // Writing into a Vec does not fail
            let _ = kind.render(&mut buf, input);
            PreviewFile {
                kind,
                content: String::from_utf8_lossy(&buf).into_owned(),
            }
        })
        .collect()
}
