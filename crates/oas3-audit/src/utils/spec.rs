use std::{
  ffi::OsStr,
  path::{Path, PathBuf},
};

use anyhow::Context;
use fmmap::tokio::{AsyncMmapFile, AsyncMmapFileExt};
use oas3::OpenApiV3Spec;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SpecFormat {
  #[default]
  Json,
  Yaml,
}

impl SpecFormat {
  #[must_use]
  pub fn from_extension(ext: &str) -> Self {
    match ext {
      "yaml" | "yml" => Self::Yaml,
      _ => Self::Json,
    }
  }
}

/// Memory-mapped loader for OpenAPI documents, selected by file extension.
/// Errors carry the input path so a failed audit names the document that
/// broke it.
pub struct SpecLoader {
  file: AsyncMmapFile,
  format: SpecFormat,
  path: PathBuf,
}

impl SpecLoader {
  pub async fn open(path: &Path) -> anyhow::Result<Self> {
    let format = path
      .extension()
      .and_then(OsStr::to_str)
      .map_or(SpecFormat::default(), SpecFormat::from_extension);

    let file = AsyncMmapFile::open(path)
      .await
      .with_context(|| format!("failed to open spec file: {}", path.display()))?;

    Ok(Self {
      file,
      format,
      path: path.to_path_buf(),
    })
  }

  pub fn parse(&self) -> anyhow::Result<oas3::Spec> {
    match self.format {
      SpecFormat::Json => serde_json::from_slice::<OpenApiV3Spec>(self.file.as_slice())
        .with_context(|| format!("invalid OpenAPI JSON in {}", self.path.display())),
      SpecFormat::Yaml => {
        let content = std::str::from_utf8(self.file.as_slice())
          .with_context(|| format!("spec file is not valid UTF-8: {}", self.path.display()))?;
        oas3::from_yaml(content).with_context(|| format!("invalid OpenAPI YAML in {}", self.path.display()))
      }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn scratch_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("oas3-audit-{}-{name}", std::process::id()))
  }

  #[tokio::test]
  async fn test_loads_minimal_json_document() {
    let path = scratch_path("minimal.json");
    tokio::fs::write(
      &path,
      r#"{ "openapi": "3.0.0", "info": { "title": "Minimal", "version": "1.0.0" }, "paths": {} }"#,
    )
    .await
    .unwrap();

    let spec = SpecLoader::open(&path).await.unwrap().parse().unwrap();
    assert_eq!(spec.info.title, "Minimal");

    tokio::fs::remove_file(&path).await.unwrap();
  }

  #[tokio::test]
  async fn test_parse_error_names_the_input_file() {
    let path = scratch_path("broken.json");
    tokio::fs::write(&path, b"{ not json").await.unwrap();

    let error = SpecLoader::open(&path).await.unwrap().parse().unwrap_err();
    assert!(format!("{error:#}").contains(&path.display().to_string()));

    tokio::fs::remove_file(&path).await.unwrap();
  }

  #[test]
  fn test_format_from_extension() {
    assert_eq!(SpecFormat::from_extension("yaml"), SpecFormat::Yaml);
    assert_eq!(SpecFormat::from_extension("yml"), SpecFormat::Yaml);
    assert_eq!(SpecFormat::from_extension("json"), SpecFormat::Json);
    assert_eq!(SpecFormat::from_extension("txt"), SpecFormat::Json);
  }
}
