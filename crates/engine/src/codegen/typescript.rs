//! TypeScript client stub generation.
//!
//! One section per endpoint group, in group order: optional request and
//! response declarations inferred from the group's samples, then an async
//! function that calls through the configured client object.

use chrono::SecondsFormat;
use serde_json::Value;

use crate::conf::CodegenConfig;
use crate::logs::capture::Clock;
use crate::parser::model::{EndpointGroup, HttpMethod};

use super::infer::{infer, InferredType};
use super::naming::{function_name, type_name, NameRegistry};

const BANNER: &str =
    "// =============================================================================";
const INDENT: &str = "  ";

/// `[A-Za-z_$][A-Za-z0-9_$]*`
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}

/// Property key as it must appear in a declaration: bare when it is a valid
/// identifier, double-quoted otherwise.
pub fn property_key(name: &str) -> String {
    if is_identifier(name) {
        name.to_string()
    } else {
        format!("\"{}\"", name.replace('\\', "\\\\").replace('"', "\\\""))
    }
}

fn js_single_quoted(s: &str) -> String {
    format!("'{}'", s.replace('\\', "\\\\").replace('\'', "\\'"))
}

/// Render an inferred type. `indent` is the nesting level of the line the
/// type starts on; object members go one level deeper.
pub fn render_type(ty: &InferredType, indent: usize) -> String {
    match ty {
        InferredType::Null => "null".to_string(),
        InferredType::Undefined => "undefined".to_string(),
        InferredType::String => "string".to_string(),
        InferredType::Number => "number".to_string(),
        InferredType::Boolean => "boolean".to_string(),
        InferredType::Array(inner) => format!("{}[]", render_type(inner, indent)),
        InferredType::Object(fields) => {
            let mut out = String::from("{\n");
            for (name, field) in fields {
                out.push_str(&INDENT.repeat(indent + 1));
                out.push_str(&property_key(name));
                out.push_str(": ");
                out.push_str(&render_type(field, indent + 1));
                out.push_str(";\n");
            }
            out.push_str(&INDENT.repeat(indent));
            out.push('}');
            out
        }
        InferredType::UnknownRecord => "Record<string, unknown>".to_string(),
        InferredType::Unknown => "unknown".to_string(),
    }
}

/// Top-level declaration for one sample.
///
/// Objects become interfaces whose members are inferred from depth 0;
/// any other sample becomes a type alias.
pub fn render_declaration(name: &str, sample: &Value) -> String {
    match sample {
        Value::Object(map) if map.is_empty() => {
            format!("export interface {name} {{\n{INDENT}[key: string]: unknown;\n}}")
        }
        Value::Object(map) => {
            let mut out = format!("export interface {name} {{\n");
            for (key, value) in map {
                out.push_str(INDENT);
                out.push_str(&property_key(key));
                out.push_str(": ");
                out.push_str(&render_type(&infer(value, 0), 1));
                out.push_str(";\n");
            }
            out.push('}');
            out
        }
        other => format!("export type {name} = {};", render_type(&infer(other, 0), 0)),
    }
}

pub struct TypeScriptGenerator<'a> {
    config: &'a CodegenConfig,
    clock: &'a dyn Clock,
}

impl<'a> TypeScriptGenerator<'a> {
    pub fn new(config: &'a CodegenConfig, clock: &'a dyn Clock) -> Self {
        Self { config, clock }
    }

    pub fn render(&self, groups: &[EndpointGroup]) -> String {
        let mut types = NameRegistry::new();
        let mut functions = NameRegistry::new();

        let mut out = format!(
            "// Auto-generated TypeScript API Client\n\
             // Generated on {}\n\
             // Total endpoints: {}\n\
             \n\
             import {{ {} }} from {};\n\n",
            self.clock.now().to_rfc3339_opts(SecondsFormat::Millis, true),
            groups.len(),
            self.config.client_ident,
            js_single_quoted(&self.config.client_import),
        );

        for group in groups {
            let type_base = types.unique(&type_name(&group.endpoint));
            let fn_name = functions.unique(&function_name(group.method, &group.endpoint));
            out.push_str(&self.render_section(group, &type_base, &fn_name));
        }

        tracing::debug!(endpoints = groups.len(), bytes = out.len(), "codegen: rendered client stub");
        out
    }

    fn render_section(&self, group: &EndpointGroup, type_base: &str, fn_name: &str) -> String {
        let mut out = String::new();
        out.push_str(BANNER);
        out.push('\n');
        out.push_str(&format!("// {} {}\n", group.method, group.endpoint));
        out.push_str(&format!("// Called {} time(s)\n", group.call_count()));
        out.push_str(BANNER);
        out.push_str("\n\n");

        let request_type = format!("{type_base}Request");
        let response_type = format!("{type_base}Response");

        if let Some(sample) = &group.sample_request {
            out.push_str(&render_declaration(&request_type, sample));
            out.push_str("\n\n");
        }
        if let Some(sample) = &group.sample_response {
            out.push_str(&render_declaration(&response_type, sample));
            out.push_str("\n\n");
        }

        let takes_body = !matches!(group.method, HttpMethod::Get | HttpMethod::Delete)
            && group.sample_request.is_some();
        let returns = group.sample_response.is_some();

        let params = if takes_body {
            format!("data: {request_type}")
        } else {
            String::new()
        };
        let return_type = if returns { response_type.as_str() } else { "void" };

        out.push_str(&format!(
            "export async function {fn_name}({params}): Promise<{return_type}> {{\n"
        ));
        let call = format!("{}.{}", self.config.client_ident, self.config.request_method);
        if returns {
            out.push_str(&format!("{INDENT}const response = await {call}({{\n"));
        } else {
            out.push_str(&format!("{INDENT}await {call}({{\n"));
        }
        out.push_str(&format!("{INDENT}{INDENT}method: '{}',\n", group.method));
        out.push_str(&format!("{INDENT}{INDENT}url: {},\n", js_single_quoted(&group.endpoint)));
        if takes_body {
            out.push_str(&format!("{INDENT}{INDENT}data,\n"));
        }
        out.push_str(&format!("{INDENT}}});\n"));
        if returns {
            out.push_str(&format!("{INDENT}return response as {response_type};\n"));
        }
        out.push_str("}\n\n");
        out
    }
}
