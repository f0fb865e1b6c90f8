pub(crate) mod paths;
pub(crate) mod refs;
pub mod spec;

pub(crate) use paths::{TemplateSegment, operation_label, split_template};
pub(crate) use refs::{extract_schema_ref_name, parse_schema_ref_path};
