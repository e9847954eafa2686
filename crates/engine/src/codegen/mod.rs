//! Codegen module — type inference and client-code renderers.
//!
//! Renderers are pure functions of the endpoint groups they are given; they
//! never mutate the analysis.

pub mod curl;
pub mod infer;
pub mod naming;
pub mod typescript;

pub use curl::{curl_command, curl_for_call, curl_for_group, escape_single_quoted};
pub use infer::{infer, InferredType, OBJECT_DEPTH_CUTOFF};
pub use naming::{function_name, type_name, NameRegistry};
pub use typescript::TypeScriptGenerator;
