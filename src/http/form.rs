//! Server-rendered HTML form front-end.
//!
//! A single page with address / ABI / function / argument fields and two
//! submit buttons, one per path (read call, write submission). The page
//! re-renders with a flash-style message after each submission.

use axum::extract::State;
use axum::response::Html;
use axum::Form;
use serde::Deserialize;
use serde_json::Value;

use crate::contract::ContractBinding;
use crate::http::server::AppState;

#[derive(Debug, Deserialize)]
pub struct ContractForm {
    pub address: String,
    pub abi: String,
    pub function: String,
    #[serde(default)]
    pub args: String,
    pub action: String,
}

/// GET /
pub async fn show_form() -> Html<String> {
    Html(render_page(None))
}

/// POST /
pub async fn submit_form(
    State(state): State<AppState>,
    Form(form): Form<ContractForm>,
) -> Html<String> {
    let args = parse_args(&form.args);

    let message = match ContractBinding::resolve(&form.address, &form.abi) {
        Err(e) => ("danger", format!("Error resolving contract: {}", e)),
        Ok(binding) => match form.action.as_str() {
            "call" => match state.reader.read(&binding, &form.function, &args).await {
                Ok(result) => (
                    "success",
                    format!("Result: {}", Value::Array(result)),
                ),
                Err(e) => ("danger", format!("Error calling function: {}", e)),
            },
            "send" => match state.writer.execute(&binding, &form.function, &args).await {
                Ok(hash) => ("success", format!("Transaction sent with hash: {}", hash)),
                Err(e) => ("danger", format!("Error sending transaction: {}", e)),
            },
            other => ("danger", format!("Unknown action: {}", other)),
        },
    };

    Html(render_page(Some(message)))
}

/// Comma-separated form arguments become string values; the binding
/// coerces them against the ABI types.
fn parse_args(raw: &str) -> Vec<Value> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(',')
        .map(|part| Value::String(part.trim().to_string()))
        .collect()
}

fn render_page(message: Option<(&str, String)>) -> String {
    let flash = match message {
        Some((class, text)) => format!(
            r#"<div class="flash {}">{}</div>"#,
            class,
            escape_html(&text)
        ),
        None => String::new(),
    };

    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <title>Contract Gateway</title>
  <style>
    body {{ font-family: sans-serif; max-width: 40em; margin: 2em auto; }}
    label {{ display: block; margin-top: 1em; }}
    input, textarea {{ width: 100%; }}
    .flash {{ padding: 0.5em; margin-bottom: 1em; }}
    .success {{ background: #d4edda; }}
    .danger {{ background: #f8d7da; }}
  </style>
</head>
<body>
  <h1>Contract Gateway</h1>
  {flash}
  <form method="post" action="/">
    <label>Contract Address <input name="address" required></label>
    <label>ABI <textarea name="abi" rows="6" required></textarea></label>
    <label>Function Name <input name="function" required></label>
    <label>Arguments (comma-separated) <input name="args"></label>
    <button type="submit" name="action" value="call">Call Function</button>
    <button type="submit" name="action" value="send">Send Transaction</button>
  </form>
</body>
</html>"#
    )
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
