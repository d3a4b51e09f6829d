//! Query processing API
//!
//! Runs a query through a processing stage (tokens or AST) and renders the
//! result in one of several formats. A processing spec is written as
//! `<stage>-<format>`, e.g. `token-simple` or `ast-json`.
//!
//! ```rust
//! use srql::processor::{process_query, ProcessingSpec};
//!
//! let spec = ProcessingSpec::from_string("ast-canonical").unwrap();
//! let out = process_query("show devices limit 5", &spec).unwrap();
//! assert_eq!(out, "SHOW devices LIMIT 5");
//! ```

use crate::ast::Query;
use crate::diagnostics::{Diagnostic, RenderOptions};
use crate::lexer::{tokenize, Token};
use srql_config::{AstFormat, DiagnosticsConfig, SrqlConfig};
use thiserror::Error;
use tracing::{debug, trace};

/// Default cap on query length, matching the embedded config
pub const DEFAULT_MAX_QUERY_BYTES: usize = 16 * 1024;

/// What data to extract from a query
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProcessingStage {
    Token,
    Ast,
}

/// How to print it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// One token per line (token stage only)
    Simple,
    Json,
    Yaml,
    /// Rust `{:#?}` dump (AST stage only)
    Debug,
    /// Re-printed SRQL (AST stage only)
    Canonical,
}

impl OutputFormat {
    fn name(self) -> &'static str {
        match self {
            OutputFormat::Simple => "simple",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
            OutputFormat::Debug => "debug",
            OutputFormat::Canonical => "canonical",
        }
    }
}

impl From<AstFormat> for OutputFormat {
    fn from(format: AstFormat) -> Self {
        match format {
            AstFormat::Debug => OutputFormat::Debug,
            AstFormat::Json => OutputFormat::Json,
            AstFormat::Yaml => OutputFormat::Yaml,
            AstFormat::Canonical => OutputFormat::Canonical,
        }
    }
}

/// A complete processing specification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingSpec {
    pub stage: ProcessingStage,
    pub format: OutputFormat,
}

impl ProcessingSpec {
    pub fn new(stage: ProcessingStage, format: OutputFormat) -> Self {
        Self { stage, format }
    }

    /// Parse a spec string like "token-simple" or "ast-yaml"
    pub fn from_string(spec: &str) -> Result<Self, ProcessingError> {
        let Some((stage, format)) = spec.split_once('-') else {
            return Err(ProcessingError::InvalidFormat(spec.to_string()));
        };

        let stage = match stage {
            "token" => ProcessingStage::Token,
            "ast" => ProcessingStage::Ast,
            other => return Err(ProcessingError::InvalidStage(other.to_string())),
        };

        let format = match format {
            "simple" => OutputFormat::Simple,
            "json" => OutputFormat::Json,
            "yaml" => OutputFormat::Yaml,
            "debug" => OutputFormat::Debug,
            "canonical" => OutputFormat::Canonical,
            other => return Err(ProcessingError::InvalidFormatType(other.to_string())),
        };

        match (stage, format) {
            (ProcessingStage::Ast, OutputFormat::Simple) => Err(ProcessingError::InvalidFormatType(
                "format 'simple' only works with the token stage".to_string(),
            )),
            (ProcessingStage::Token, OutputFormat::Debug | OutputFormat::Canonical) => {
                Err(ProcessingError::InvalidFormatType(format!(
                    "format '{}' only works with the ast stage",
                    format.name()
                )))
            }
            _ => Ok(ProcessingSpec { stage, format }),
        }
    }

    /// Get all available processing specifications
    pub fn available_specs() -> Vec<ProcessingSpec> {
        use OutputFormat::*;
        let token = [Simple, Json, Yaml]
            .into_iter()
            .map(|format| ProcessingSpec::new(ProcessingStage::Token, format));
        let ast = [Debug, Json, Yaml, Canonical]
            .into_iter()
            .map(|format| ProcessingSpec::new(ProcessingStage::Ast, format));
        token.chain(ast).collect()
    }

    /// The spec string accepted by [`ProcessingSpec::from_string`]
    pub fn name(&self) -> String {
        let stage = match self.stage {
            ProcessingStage::Token => "token",
            ProcessingStage::Ast => "ast",
        };
        format!("{}-{}", stage, self.format.name())
    }
}

/// Get all available format strings
pub fn available_formats() -> Vec<String> {
    ProcessingSpec::available_specs()
        .iter()
        .map(ProcessingSpec::name)
        .collect()
}

/// Errors that can occur during processing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProcessingError {
    #[error("invalid format: {0} (expected <stage>-<format>)")]
    InvalidFormat(String),
    #[error("invalid stage: {0}")]
    InvalidStage(String),
    #[error("invalid format type: {0}")]
    InvalidFormatType(String),
    #[error("query is {len} bytes, the limit is {max}")]
    QueryTooLong { len: usize, max: usize },
    #[error(transparent)]
    Diagnostic(#[from] Diagnostic),
    #[error("serialization failed: {0}")]
    Serialization(String),
}

impl From<&DiagnosticsConfig> for RenderOptions {
    fn from(config: &DiagnosticsConfig) -> Self {
        RenderOptions {
            show_snippet: config.show_snippet,
            max_expected: config.max_expected,
            suggest_keywords: config.suggest_keywords,
        }
    }
}

/// Runs queries through a stage with the limits and rendering settings of
/// one configuration.
#[derive(Debug, Clone)]
pub struct QueryProcessor {
    max_query_bytes: usize,
    pretty: bool,
    render: RenderOptions,
}

impl Default for QueryProcessor {
    fn default() -> Self {
        Self {
            max_query_bytes: DEFAULT_MAX_QUERY_BYTES,
            pretty: true,
            render: RenderOptions::default(),
        }
    }
}

impl QueryProcessor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &SrqlConfig) -> Self {
        Self {
            max_query_bytes: config.limits.max_query_bytes,
            pretty: config.output.pretty,
            render: RenderOptions::from(&config.diagnostics),
        }
    }

    pub fn with_max_query_bytes(mut self, max: usize) -> Self {
        self.max_query_bytes = max;
        self
    }

    pub fn with_pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn render_options(&self) -> &RenderOptions {
        &self.render
    }

    fn check_length(&self, source: &str) -> Result<(), ProcessingError> {
        if source.len() > self.max_query_bytes {
            debug!(
                len = source.len(),
                max = self.max_query_bytes,
                "rejecting oversize query"
            );
            return Err(ProcessingError::QueryTooLong {
                len: source.len(),
                max: self.max_query_bytes,
            });
        }
        Ok(())
    }

    /// Parse `source` after applying the length limit.
    pub fn parse(&self, source: &str) -> Result<Query, ProcessingError> {
        self.check_length(source)?;
        let result = crate::parse(source);
        match &result {
            Ok(query) => debug!(kind = %query.kind(), "parsed query"),
            Err(diagnostic) => debug!(
                kind = %diagnostic.kind,
                line = diagnostic.position.line,
                column = diagnostic.position.column,
                "query rejected"
            ),
        }
        Ok(result?)
    }

    /// Process a query according to the given specification
    pub fn process(&self, source: &str, spec: &ProcessingSpec) -> Result<String, ProcessingError> {
        debug!(spec = %spec.name(), len = source.len(), "processing query");
        match spec.stage {
            ProcessingStage::Token => {
                self.check_length(source)?;
                let tokens = tokenize(source)?;
                trace!(count = tokens.len(), "tokenized");
                self.format_tokens(&tokens, spec.format)
            }
            ProcessingStage::Ast => {
                let query = self.parse(source)?;
                self.format_query(&query, spec.format)
            }
        }
    }

    /// Human-readable report for a failed `process`/`parse` call
    pub fn describe_error(&self, source: &str, error: &ProcessingError) -> String {
        match error {
            ProcessingError::Diagnostic(diagnostic) => diagnostic.render(source, &self.render),
            other => format!("error: {}", other),
        }
    }

    fn format_tokens(
        &self,
        tokens: &[Token<'_>],
        format: OutputFormat,
    ) -> Result<String, ProcessingError> {
        match format {
            OutputFormat::Simple => Ok(tokens
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Json => self.to_json(tokens),
            OutputFormat::Yaml => to_yaml(tokens),
            other => Err(ProcessingError::InvalidFormatType(format!(
                "format '{}' only works with the ast stage",
                other.name()
            ))),
        }
    }

    fn format_query(&self, query: &Query, format: OutputFormat) -> Result<String, ProcessingError> {
        match format {
            OutputFormat::Debug if self.pretty => Ok(format!("{:#?}", query)),
            OutputFormat::Debug => Ok(format!("{:?}", query)),
            OutputFormat::Canonical => Ok(query.to_string()),
            OutputFormat::Json => self.to_json(query),
            OutputFormat::Yaml => to_yaml(query),
            OutputFormat::Simple => Err(ProcessingError::InvalidFormatType(
                "format 'simple' only works with the token stage".to_string(),
            )),
        }
    }

    fn to_json<T: serde::Serialize + ?Sized>(&self, value: &T) -> Result<String, ProcessingError> {
        let json = if self.pretty {
            serde_json::to_string_pretty(value)
        } else {
            serde_json::to_string(value)
        };
        json.map_err(|e| ProcessingError::Serialization(e.to_string()))
    }
}

fn to_yaml<T: serde::Serialize + ?Sized>(value: &T) -> Result<String, ProcessingError> {
    serde_yaml::to_string(value).map_err(|e| ProcessingError::Serialization(e.to_string()))
}

/// Process a query with the default limits and rendering
pub fn process_query(source: &str, spec: &ProcessingSpec) -> Result<String, ProcessingError> {
    QueryProcessor::default().process(source, spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::DiagnosticKind;

    #[test]
    fn test_spec_from_string() {
        assert_eq!(
            ProcessingSpec::from_string("token-simple").unwrap(),
            ProcessingSpec::new(ProcessingStage::Token, OutputFormat::Simple)
        );
        assert_eq!(
            ProcessingSpec::from_string("ast-canonical").unwrap(),
            ProcessingSpec::new(ProcessingStage::Ast, OutputFormat::Canonical)
        );
    }

    #[test]
    fn test_spec_errors() {
        assert_eq!(
            ProcessingSpec::from_string("token"),
            Err(ProcessingError::InvalidFormat("token".to_string()))
        );
        assert_eq!(
            ProcessingSpec::from_string("tree-json"),
            Err(ProcessingError::InvalidStage("tree".to_string()))
        );
        assert_eq!(
            ProcessingSpec::from_string("ast-xml"),
            Err(ProcessingError::InvalidFormatType("xml".to_string()))
        );
        assert!(matches!(
            ProcessingSpec::from_string("token-canonical"),
            Err(ProcessingError::InvalidFormatType(_))
        ));
        assert!(matches!(
            ProcessingSpec::from_string("ast-simple"),
            Err(ProcessingError::InvalidFormatType(_))
        ));
    }

    #[test]
    fn test_every_available_spec_parses_back() {
        for name in available_formats() {
            let spec = ProcessingSpec::from_string(&name).unwrap();
            assert_eq!(spec.name(), name);
        }
        assert_eq!(available_formats().len(), 7);
    }

    #[test]
    fn test_token_simple() {
        let spec = ProcessingSpec::from_string("token-simple").unwrap();
        let out = process_query("COUNT logs", &spec).unwrap();
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(
            lines,
            vec!["1:1 COUNT `COUNT`", "1:7 logs `logs`", "1:11 end of input"]
        );
    }

    #[test]
    fn test_ast_json_is_valid_json() {
        let spec = ProcessingSpec::from_string("ast-json").unwrap();
        let out = process_query("FIND devices LIMIT 3", &spec).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["find"]["limit"], serde_json::json!(3));
        assert_eq!(value["find"]["entity"], serde_json::json!("devices"));
    }

    #[test]
    fn test_query_too_long() {
        let processor = QueryProcessor::new().with_max_query_bytes(8);
        let spec = ProcessingSpec::from_string("ast-debug").unwrap();
        assert_eq!(
            processor.process("SHOW devices", &spec),
            Err(ProcessingError::QueryTooLong { len: 12, max: 8 })
        );
    }

    #[test]
    fn test_diagnostic_passes_through() {
        let spec = ProcessingSpec::from_string("ast-canonical").unwrap();
        let err = process_query("SHOW", &spec).unwrap_err();
        match &err {
            ProcessingError::Diagnostic(diagnostic) => {
                assert_eq!(diagnostic.kind, DiagnosticKind::UnexpectedEndOfInput)
            }
            other => panic!("unexpected error {:?}", other),
        }
        let report = QueryProcessor::new().describe_error("SHOW", &err);
        assert!(report.starts_with("error: unexpected end of input"));
    }
}
