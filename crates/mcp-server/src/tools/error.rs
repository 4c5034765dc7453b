use crate::config::ACCESS_TOKEN_ENV;
use hostex_client::HostexError;
use hostex_protocol::{ErrorEnvelope, FailureKind, FieldViolation};
use rmcp::model::{CallToolResult, Content};
use rmcp::ErrorData as McpError;
use serde_json::json;

const MAX_MESSAGE_CHARS: usize = 900;

#[derive(Debug, thiserror::Error)]
pub enum ToolFailure {
    #[error("unknown tool '{name}'")]
    UnknownTool { name: String },
    #[error("invalid arguments for tool '{tool}' ({} problem(s))", .violations.len())]
    InvalidArguments {
        tool: String,
        violations: Vec<FieldViolation>,
    },
    #[error(
        "accessToken is required. Please configure your Hostex API access token (HOSTEX_ACCESS_TOKEN)."
    )]
    MissingCredential,
    #[error(transparent)]
    Backend(#[from] HostexError),
}

impl ToolFailure {
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::UnknownTool { .. } => FailureKind::UnknownTool,
            Self::InvalidArguments { .. } => FailureKind::InvalidArguments,
            Self::MissingCredential => FailureKind::MissingCredential,
            Self::Backend(_) => FailureKind::BackendFailure,
        }
    }

    pub fn envelope(&self, tool: &str) -> ErrorEnvelope {
        let mut envelope = ErrorEnvelope::new(self.kind(), self.to_string());
        envelope.tool = Some(tool.to_string());
        match self {
            Self::UnknownTool { .. } => {
                envelope.tool = None;
                envelope.hint =
                    Some("Call tools/list to see the available tool names.".to_string());
            }
            Self::InvalidArguments { violations, .. } => {
                envelope.violations = violations.clone();
            }
            Self::MissingCredential => {
                envelope.hint = Some(format!(
                    "Set {ACCESS_TOKEN_ENV} in the server environment and restart the server."
                ));
            }
            Self::Backend(err) => {
                let info = err.info();
                if info.transient {
                    envelope.hint = Some("The failure looks temporary; retry later.".to_string());
                }
                envelope.backend = Some(info);
            }
        }
        envelope
    }

    /// Protocol-level rejections (unknown tool, bad arguments) become JSON-RPC errors; failures
    /// of an accepted call become an error tool result so the client can show them.
    pub fn into_mcp_result(self, tool: &str) -> Result<CallToolResult, McpError> {
        let envelope = self.envelope(tool);
        match self.kind() {
            FailureKind::UnknownTool | FailureKind::InvalidArguments => {
                Err(McpError::invalid_params(
                    truncate(render_message(&envelope)),
                    Some(json!({ "error": envelope })),
                ))
            }
            FailureKind::MissingCredential | FailureKind::BackendFailure => {
                let mut result =
                    CallToolResult::error(vec![Content::text(render_text(&envelope))]);
                result.structured_content = Some(json!({ "error": envelope }));
                Ok(result)
            }
        }
    }
}

fn render_message(envelope: &ErrorEnvelope) -> String {
    let mut message = envelope.message.clone();
    for violation in &envelope.violations {
        message.push_str(&format!(
            "; {}: expected {} ({})",
            violation.field, violation.expected, violation.reason
        ));
    }
    if let Some(hint) = envelope.hint.as_deref() {
        message.push_str(" Hint: ");
        message.push_str(hint);
    }
    message
}

fn render_text(envelope: &ErrorEnvelope) -> String {
    let mut lines = vec![format!("error: {}", envelope.kind), envelope.message.clone()];
    if let Some(backend) = envelope.backend.as_ref() {
        let mut parts = Vec::new();
        if let Some(status) = backend.status {
            parts.push(format!("status={status}"));
        }
        if let Some(code) = backend.code {
            parts.push(format!("code={code}"));
        }
        if let Some(request_id) = backend.request_id.as_deref() {
            parts.push(format!("request_id={request_id}"));
        }
        parts.push(format!("transient={}", backend.transient));
        lines.push(format!("backend: {}", parts.join(" ")));
    }
    if let Some(hint) = envelope.hint.as_deref() {
        lines.push(format!("hint: {hint}"));
    }
    lines.join("\n")
}

fn truncate(mut message: String) -> String {
    if message.chars().count() > MAX_MESSAGE_CHARS {
        message = message.chars().take(MAX_MESSAGE_CHARS).collect();
        message.push('…');
    }
    message
}
