use comfy_table::{Attribute, Cell, ContentArrangement, Row, Table};
use crossterm::style::Stylize;
use oas3_audit::{AuditEngine, AuditReport, utils::spec::SpecLoader};

use super::format_timestamp;
use crate::ui::{AuditCommand, Colors, colors::IntoComfyColor, term_width};

struct AuditLogger<'a> {
  verbose: bool,
  quiet: bool,
  colors: &'a Colors,
}

impl<'a> AuditLogger<'a> {
  fn info(&self, message: &str) {
    if !self.quiet {
      println!("{} {message}", format_timestamp().with(self.colors.timestamp()));
    }
  }

  fn detail(&self, message: &str) {
    if self.verbose && !self.quiet {
      self.info(message);
    }
  }

  fn stat(&self, label: &str, value: String) {
    if !self.quiet {
      println!(
        "            {:<28} {}",
        label.with(self.colors.label()),
        value.with(self.colors.value())
      );
    }
  }
}

pub async fn run_audit(command: AuditCommand, colors: &Colors) -> anyhow::Result<()> {
  let logger = AuditLogger {
    verbose: command.verbose,
    quiet: command.quiet,
    colors,
  };

  logger.info(
    &format!("Loading OpenAPI spec from: {}", command.input.display())
      .with(colors.primary())
      .to_string(),
  );
  let spec = SpecLoader::open(&command.input).await?.parse()?;
  let engine = AuditEngine::new(spec);

  logger.detail("Building reference graph...");
  let report = AuditReport {
    reference_graph: engine.reference_graph(),
    reverse_dependencies: engine.reverse_dependencies(),
    nesting_depths: engine.nesting_depths(),
    taint_findings: engine.taint_findings(),
    authorization: engine.authorization_matrix(),
    similarity: engine.similarity_clusters_with_threshold(command.similarity_threshold),
    zombies: engine.zombie_findings(),
  };

  if let Some(output) = &command.output {
    let json = serde_json::to_string_pretty(&report)?;
    if let Some(parent) = output.parent() {
      tokio::fs::create_dir_all(parent).await?;
    }
    tokio::fs::write(output, json).await?;
    logger.info(
      &format!("Report written to: {}", output.display())
        .with(colors.success())
        .to_string(),
    );
    return Ok(());
  }

  print_summary(&logger, &report);
  print_taint_findings(&report, colors);
  print_zombies(&report, colors);
  print_authorization(&report, colors);
  print_similarity(&report, colors);

  Ok(())
}

fn print_summary(logger: &AuditLogger<'_>, report: &AuditReport) {
  logger.info("Audit complete");
  logger.stat("Graph nodes:", report.reference_graph.node_count().to_string());
  logger.stat("Graph edges:", report.reference_graph.edge_count().to_string());
  logger.stat("Reference cycles:", report.reference_graph.cycles().len().to_string());
  logger.stat("Operations analyzed:", report.nesting_depths.len().to_string());
  logger.stat("Taint findings:", report.taint_findings.len().to_string());
  logger.stat("Shadowed endpoints:", report.zombies.shadowed_endpoints.len().to_string());
  logger.stat(
    "Orphaned operations:",
    report.zombies.orphaned_operations.len().to_string(),
  );
  logger.stat("Similarity clusters:", report.similarity.clusters.len().to_string());
}

fn new_table(headers: &[&str], colors: &Colors) -> Table {
  let mut table = Table::new();
  table
    .load_preset("  ── ──            ")
    .set_content_arrangement(ContentArrangement::Dynamic)
    .set_width(term_width());

  let mut row = Row::new();
  for header in headers {
    row.add_cell(Cell::new(header).fg(IntoComfyColor::into(colors.label())));
  }
  table.set_header(row);
  table
}

fn print_taint_findings(report: &AuditReport, colors: &Colors) {
  if report.taint_findings.is_empty() {
    return;
  }

  let mut table = new_table(&["SEVERITY", "ENDPOINT", "LEAKED DATA"], colors);
  for finding in &report.taint_findings {
    let mut row = Row::new();
    row.add_cell(
      Cell::new(finding.severity.to_string())
        .fg(IntoComfyColor::into(colors.severity(finding.severity)))
        .add_attribute(Attribute::Bold),
    );
    row.add_cell(Cell::new(&finding.endpoint).fg(IntoComfyColor::into(colors.value())));
    row.add_cell(Cell::new(&finding.leaked_data).fg(IntoComfyColor::into(colors.primary())));
    table.add_row(row);
  }
  println!("{table}");
}

fn print_zombies(report: &AuditReport, colors: &Colors) {
  if !report.zombies.shadowed_endpoints.is_empty() {
    let mut table = new_table(&["SHADOWED PATH", "SHADOWED BY", "REASON"], colors);
    for entry in &report.zombies.shadowed_endpoints {
      let mut row = Row::new();
      row.add_cell(Cell::new(&entry.shadowed_path).fg(IntoComfyColor::into(colors.value())));
      row.add_cell(Cell::new(&entry.shadowing_path).fg(IntoComfyColor::into(colors.accent())));
      row.add_cell(Cell::new(&entry.reason).fg(IntoComfyColor::into(colors.primary())));
      table.add_row(row);
    }
    println!("{table}");
  }

  if !report.zombies.orphaned_operations.is_empty() {
    let mut table = new_table(&["ORPHANED OPERATION"], colors);
    for label in &report.zombies.orphaned_operations {
      let mut row = Row::new();
      row.add_cell(Cell::new(label).fg(IntoComfyColor::into(colors.value())));
      table.add_row(row);
    }
    println!("{table}");
  }
}

fn print_authorization(report: &AuditReport, colors: &Colors) {
  if report.authorization.matrix.is_empty() {
    return;
  }

  let mut table = new_table(&["OPERATION", "REQUIRED SCOPES"], colors);
  for (operation, scopes) in &report.authorization.matrix {
    let mut row = Row::new();
    row.add_cell(Cell::new(operation).fg(IntoComfyColor::into(colors.value())));
    let rendered = if scopes.is_empty() {
      "-".to_string()
    } else {
      scopes.join(", ")
    };
    row.add_cell(Cell::new(rendered).fg(IntoComfyColor::into(colors.info())));
    table.add_row(row);
  }
  println!("{table}");
}

fn print_similarity(report: &AuditReport, colors: &Colors) {
  if report.similarity.clusters.is_empty() {
    return;
  }

  let mut table = new_table(&["SIMILAR SCHEMAS"], colors);
  for cluster in &report.similarity.clusters {
    let mut row = Row::new();
    row.add_cell(Cell::new(cluster.schemas.join(", ")).fg(IntoComfyColor::into(colors.value())));
    table.add_row(row);
  }
  println!("{table}");
}
