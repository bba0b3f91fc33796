use include_dir::{Dir, DirEntry, include_dir};

use strata_core::{
    application::{ApplicationError, ports::TemplateSource},
    error::StrataResult,
};

static TEMPLATES_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/templates");

/// Templates compiled into the binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplates;

impl EmbeddedTemplates {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateSource for EmbeddedTemplates {
    fn fetch(&self, name: &str) -> StrataResult<Vec<u8>> {
        TEMPLATES_DIR
            .get_file(name)
            .map(|file| file.contents().to_vec())
            .ok_or_else(|| {
                ApplicationError::TemplateNotFound {
                    name: name.to_string(),
                }
                .into()
            })
    }

    fn list(&self) -> StrataResult<Vec<String>> {
        let mut names = Vec::new();
        collect_names(&TEMPLATES_DIR, &mut names);
        names.sort();
        Ok(names)
    }
}

fn collect_names(dir: &'static Dir, names: &mut Vec<String>) {
    for entry in dir.entries() {
        match entry {
            DirEntry::File(file) => {
                names.push(file.path().to_string_lossy().replace('\\', "/"));
            }
            DirEntry::Dir(subdir) => collect_names(subdir, names),
        }
    }
}
