use http::Method;

/// One segment of a URL template, split on `/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum TemplateSegment {
  Literal(String),
  Parameter(String),
}

/// Splits a URL template into segments, classifying `{name}` placeholders
/// as parameters. Empty segments from leading or doubled slashes are
/// dropped, so `/users/{id}` and `users/{id}` segment identically.
pub(crate) fn split_template(path: &str) -> Vec<TemplateSegment> {
  path
    .split('/')
    .filter(|segment| !segment.is_empty())
    .map(|segment| {
      if segment.starts_with('{') && segment.ends_with('}') && segment.len() > 2 {
        TemplateSegment::Parameter(segment[1..segment.len() - 1].to_string())
      } else {
        TemplateSegment::Literal(segment.to_string())
      }
    })
    .collect()
}

/// Canonical `"METHOD /path"` label used to identify an operation across
/// every analyzer report.
pub(crate) fn operation_label(method: &Method, path: &str) -> String {
  format!("{} {}", method.as_str(), path)
}
