use camino::Utf8Path;
use camino::Utf8PathBuf;
use ignore::overrides::OverrideBuilder;
use ignore::WalkBuilder;

/// File extensions recognized as templates.
pub const TEMPLATE_EXTENSIONS: [&str; 3] = ["tt", "t4", "ttinclude"];

#[must_use]
pub fn is_template_file(path: &Utf8Path) -> bool {
    path.extension().is_some_and(|extension| {
        TEMPLATE_EXTENSIONS
            .iter()
            .any(|known| known.eq_ignore_ascii_case(extension))
    })
}

/// Options for [`walk_template_files`].
#[derive(Clone, Debug, Default)]
pub struct WalkOptions {
    /// Include hidden files and directories.
    pub hidden: bool,
    /// Disable `.gitignore` and `.ignore` handling.
    pub no_ignore: bool,
    /// Gitignore-style globs; a leading `!` excludes.
    pub globs: Vec<String>,
}

/// Collect template files from a mix of file and directory paths.
///
/// Explicit file paths are kept even when their extension is unknown, so a
/// user can check `notes.txt` on purpose. Directories are walked recursively
/// honoring ignore files. The result is sorted and free of duplicates.
#[must_use]
pub fn walk_template_files(paths: &[Utf8PathBuf], options: &WalkOptions) -> Vec<Utf8PathBuf> {
    let mut files = Vec::new();

    for path in paths {
        if path.is_file() {
            files.push(resolve(path));
            continue;
        }
        if !path.is_dir() {
            tracing::warn!(%path, "skipping path that is neither a file nor a directory");
            continue;
        }

        let mut builder = WalkBuilder::new(path.as_std_path());
        builder
            .standard_filters(!options.no_ignore)
            .hidden(!options.hidden);

        if !options.globs.is_empty() {
            let mut overrides = OverrideBuilder::new(path.as_std_path());
            for glob in &options.globs {
                if let Err(error) = overrides.add(glob) {
                    tracing::warn!(%glob, %error, "ignoring invalid glob");
                }
            }
            match overrides.build() {
                Ok(built) => {
                    builder.overrides(built);
                }
                Err(error) => tracing::warn!(%error, "ignoring globs"),
            }
        }

        for entry in builder.build().filter_map(Result::ok) {
            if !entry.file_type().is_some_and(|kind| kind.is_file()) {
                continue;
            }
            let Some(file) = Utf8Path::from_path(entry.path()) else {
                continue;
            };
            if is_template_file(file) {
                files.push(resolve(file));
            }
        }
    }

    files.sort();
    files.dedup();
    files
}

fn resolve(path: &Utf8Path) -> Utf8PathBuf {
    dunce::canonicalize(path.as_std_path())
        .ok()
        .and_then(|canonical| Utf8PathBuf::from_path_buf(canonical).ok())
        .unwrap_or_else(|| path.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(files: &[Utf8PathBuf]) -> Vec<&str> {
        files.iter().filter_map(|path| path.file_name()).collect()
    }

    fn tempdir() -> (tempfile::TempDir, Utf8PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf()).unwrap();
        (dir, path)
    }

    #[test]
    fn test_is_template_file() {
        assert!(is_template_file(Utf8Path::new("a/Model.tt")));
        assert!(is_template_file(Utf8Path::new("Shared.TTInclude")));
        assert!(is_template_file(Utf8Path::new("x.t4")));
        assert!(!is_template_file(Utf8Path::new("Model.cs")));
        assert!(!is_template_file(Utf8Path::new("tt")));
    }

    #[test]
    fn test_walks_directory_for_templates() {
        let (_dir, root) = tempdir();
        std::fs::write(root.join("Model.tt"), "<# #>").unwrap();
        std::fs::write(root.join("Model.cs"), "class C {}").unwrap();
        std::fs::create_dir_all(root.join("nested")).unwrap();
        std::fs::write(root.join("nested/Shared.ttinclude"), "").unwrap();

        let files = walk_template_files(&[root], &WalkOptions::default());
        assert_eq!(names(&files), vec!["Model.tt", "Shared.ttinclude"]);
    }

    #[test]
    fn test_hidden_directories_are_opt_in() {
        let (_dir, root) = tempdir();
        std::fs::create_dir_all(root.join(".cache")).unwrap();
        std::fs::write(root.join(".cache/Old.tt"), "").unwrap();

        assert!(walk_template_files(&[root.clone()], &WalkOptions::default()).is_empty());

        let options = WalkOptions {
            hidden: true,
            ..WalkOptions::default()
        };
        assert_eq!(names(&walk_template_files(&[root], &options)), vec!["Old.tt"]);
    }

    #[test]
    fn test_negated_glob_excludes() {
        let (_dir, root) = tempdir();
        std::fs::write(root.join("Keep.tt"), "").unwrap();
        std::fs::write(root.join("Skip.tt"), "").unwrap();

        let options = WalkOptions {
            globs: vec!["!Skip.tt".to_string()],
            ..WalkOptions::default()
        };
        assert_eq!(names(&walk_template_files(&[root], &options)), vec!["Keep.tt"]);
    }

    #[test]
    fn test_explicit_files_are_kept_and_deduplicated() {
        let (_dir, root) = tempdir();
        std::fs::write(root.join("Model.tt"), "").unwrap();
        std::fs::write(root.join("notes.txt"), "").unwrap();

        let files = walk_template_files(
            &[root.join("notes.txt"), root.join("Model.tt"), root],
            &WalkOptions::default(),
        );
        assert_eq!(names(&files), vec!["Model.tt", "notes.txt"]);
    }
}
