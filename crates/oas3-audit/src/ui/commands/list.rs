use std::path::PathBuf;

use comfy_table::{Attribute, Cell, CellAlignment, ContentArrangement, Row, Table};
use oas3_audit::analyzer::is_secured;
use oas3_audit::utils::spec::SpecLoader;

use crate::ui::{Colors, colors::IntoComfyColor, term_width};

pub async fn list_operations(input: &PathBuf, colors: &Colors) -> anyhow::Result<()> {
  let spec = SpecLoader::open(input).await?.parse()?;

  let mut operations = Vec::new();
  for (path, method, operation) in spec.operations() {
    let secured = is_secured(operation, &spec);
    let scope_count: usize = if operation.security.is_empty() {
      &spec.security
    } else {
      &operation.security
    }
    .iter()
    .map(|requirement| requirement.0.values().map(Vec::len).sum::<usize>())
    .sum();
    operations.push((method.as_str().to_string(), path, secured, scope_count));
  }

  operations.sort_by(|a, b| a.1.cmp(&b.1).then_with(|| a.0.cmp(&b.0)));

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  row.add_cell(Cell::new("METHOD").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("PATH").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("SECURITY").fg(IntoComfyColor::into(colors.label())));
  row.add_cell(Cell::new("SCOPES").fg(IntoComfyColor::into(colors.label())));
  table.set_header(row);

  for (method, path, secured, scope_count) in operations {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(method)
        .fg(IntoComfyColor::into(colors.accent()))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(path).fg(IntoComfyColor::into(colors.primary())));
    let security_cell = if secured {
      Cell::new("secured").fg(IntoComfyColor::into(colors.success()))
    } else {
      Cell::new("public").fg(IntoComfyColor::into(colors.accent()))
    };
    row.add_cell(security_cell);
    row.add_cell(
      Cell::new(scope_count.to_string())
        .fg(IntoComfyColor::into(colors.value()))
        .set_alignment(CellAlignment::Right),
    );
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}
