//! `filename` command.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::debug;
use crate::descriptor::{AssetClass, PipelineDescriptor};

/// Print the output filename for `file` as an asset of `class`.
///
/// Relative paths are read from the project root. The file is only read
/// when the template needs a content hash.
pub fn filename(
    descriptor: &PipelineDescriptor,
    root: &Path,
    class: AssetClass,
    file: &Path,
) -> Result<()> {
    println!("{}", render(descriptor, root, class, file)?);
    Ok(())
}

fn render(
    descriptor: &PipelineDescriptor,
    root: &Path,
    class: AssetClass,
    file: &Path,
) -> Result<String> {
    let template = descriptor.output.filenames.get(class);
    let content = if template.is_hashed() {
        let source = root.join(file);
        fs::read(&source).with_context(|| format!("failed to read {}", source.display()))?
    } else {
        Vec::new()
    };

    debug!("filename"; "{} template `{}`", class, template);
    Ok(descriptor.output.filename_for(class, file, &content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PipelineConfig;
    use crate::core::Environment;
    use crate::utils::hash;
    use tempfile::TempDir;

    fn descriptor(root: &Path) -> PipelineDescriptor {
        let env = Environment::from_vars(root.to_path_buf(), Vec::new());
        PipelineDescriptor::from_env(&env, &PipelineConfig::default())
    }

    #[test]
    fn test_hashed_name_reads_file() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("sass")).unwrap();
        fs::write(dir.path().join("sass/app.scss"), "a{}").unwrap();

        let d = descriptor(dir.path());
        let name = render(&d, dir.path(), AssetClass::Stylesheet, Path::new("sass/app.scss")).unwrap();
        assert_eq!(name, format!("css/app.{}.css", hash::fingerprint("a{}", 20)));
    }

    #[test]
    fn test_unhashed_name_skips_read() {
        let dir = TempDir::new().unwrap();
        let d = descriptor(dir.path());
        let name = render(&d, dir.path(), AssetClass::Font, Path::new("fonts/Inter.woff2")).unwrap();
        assert_eq!(name, "fonts/Inter.woff2");
    }

    #[test]
    fn test_missing_file_is_error() {
        let dir = TempDir::new().unwrap();
        let d = descriptor(dir.path());
        let err = render(&d, dir.path(), AssetClass::Stylesheet, Path::new("missing.scss")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
