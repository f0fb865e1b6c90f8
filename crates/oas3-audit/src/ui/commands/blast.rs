use comfy_table::{Attribute, Cell, ContentArrangement, Row, Table};
use oas3_audit::{AuditEngine, utils::spec::SpecLoader};

use crate::ui::{BlastRadiusCommand, Colors, colors::IntoComfyColor, term_width};

pub async fn run_blast_radius(command: BlastRadiusCommand, colors: &Colors) -> anyhow::Result<()> {
  let spec = SpecLoader::open(&command.input).await?.parse()?;
  let engine = AuditEngine::new(spec);
  let report = engine.blast_radius(&command.schema);

  if command.json {
    println!("{}", serde_json::to_string_pretty(&report)?);
    return Ok(());
  }

  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut header = Row::new();
  header.add_cell(Cell::new("BLAST RADIUS").fg(IntoComfyColor::into(colors.label())));
  header.add_cell(Cell::new(&report.target_schema).fg(IntoComfyColor::into(colors.label())));
  table.set_header(header);

  let rows = [
    ("Risk level", report.risk_level.to_string()),
    ("Affected operations", format!("{}/{}", report.affected_operations, report.total_operations)),
    ("Percentage", format!("{:.1}%", report.percentage)),
    ("Direct dependents", join_or_dash(&report.direct_dependents)),
    ("Affected schemas", join_or_dash(&report.all_affected_schemas)),
    ("Affected endpoints", join_or_dash(&report.affected_endpoints)),
  ];

  for (index, (label, value)) in rows.into_iter().enumerate() {
    let mut row = Row::new();
    row.add_cell(Cell::new(label).fg(IntoComfyColor::into(colors.value())));
    let mut cell = Cell::new(value).fg(IntoComfyColor::into(colors.primary()));
    if index == 0 {
      cell = Cell::new(report.risk_level.to_string())
        .fg(IntoComfyColor::into(colors.risk(report.risk_level)))
        .add_attribute(Attribute::Bold);
    }
    row.add_cell(cell);
    table.add_row(row);
  }

  println!("{table}");

  Ok(())
}

fn join_or_dash(values: &[String]) -> String {
  if values.is_empty() {
    "-".to_string()
  } else {
    values.join(", ")
  }
}
