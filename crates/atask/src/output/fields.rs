//! Field registry output formatting.

use atask_query::{FieldSpec, Operator, SpecialValue};
use owo_colors::OwoColorize;
use serde::Serialize;

/// JSON output structure for the fields command.
#[derive(Serialize)]
pub struct FieldsOutput {
    pub fields: Vec<FieldOutput>,
}

/// JSON output structure for a single field.
#[derive(Serialize)]
pub struct FieldOutput {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub kind: &'static str,
    pub operators: Vec<&'static str>,
    pub special_values: Vec<&'static str>,
}

fn operator_names(ops: &[Operator]) -> Vec<&'static str> {
    ops.iter().map(|op| op.as_str()).collect()
}

fn special_names(values: &[SpecialValue]) -> Vec<&'static str> {
    values.iter().map(|v| v.as_str()).collect()
}

/// Formats the field registry as JSON.
pub fn format_fields_json(fields: &[FieldSpec]) -> Result<String, serde_json::Error> {
    let fields = fields
        .iter()
        .map(|spec| FieldOutput {
            name: spec.name,
            aliases: spec.aliases,
            kind: spec.kind.name(),
            operators: operator_names(spec.kind.operators()),
            special_values: special_names(spec.kind.special_values()),
        })
        .collect();

    serde_json::to_string_pretty(&FieldsOutput { fields })
}

/// Formats the field registry as a table.
pub fn format_fields_table(fields: &[FieldSpec], use_colors: bool) -> String {
    let mut output = String::new();

    let header = format!(
        "{:<12} {:<20} {:<13} {:<12} {}",
        "Field", "Aliases", "Kind", "Operators", "Values"
    );
    if use_colors {
        output.push_str(&format!("{}\n", header.dimmed()));
    } else {
        output.push_str(&header);
        output.push('\n');
    }

    for spec in fields {
        let name = format!("{:<12}", spec.name);
        let name = if use_colors {
            name.bold().to_string()
        } else {
            name
        };
        let line = format!(
            "{} {:<20} {:<13} {:<12} {}",
            name,
            spec.aliases.join(","),
            spec.kind.name(),
            operator_names(spec.kind.operators()).join(" "),
            special_names(spec.kind.special_values()).join(", "),
        );
        output.push_str(line.trim_end());
        output.push('\n');
    }

    output
}
