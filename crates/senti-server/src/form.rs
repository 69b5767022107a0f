//! Generated web form and its interface descriptor.

use axum::Json;
use axum::response::Html;
use serde::Serialize;

pub const TITLE: &str = "Sentiment API";

/// One input or output field of the interface.
#[derive(Debug, Clone, Serialize)]
pub struct Component {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lines: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
pub struct InterfaceConfig {
    pub title: &'static str,
    pub inputs: Vec<Component>,
    pub outputs: Vec<Component>,
    pub allow_flagging: &'static str,
    pub enable_queue: bool,
    pub api_endpoints: Vec<&'static str>,
}

impl InterfaceConfig {
    pub fn sentiment() -> Self {
        Self {
            title: TITLE,
            inputs: vec![Component {
                kind: "textbox",
                label: "Enter text",
                lines: Some(3),
            }],
            outputs: vec![
                Component {
                    kind: "text",
                    label: "label",
                    lines: None,
                },
                Component {
                    kind: "number",
                    label: "score",
                    lines: None,
                },
                Component {
                    kind: "text",
                    label: "normalized_label",
                    lines: None,
                },
            ],
            allow_flagging: "never",
            enable_queue: false,
            api_endpoints: crate::PREDICT_ROUTES.to_vec(),
        }
    }
}

pub async fn config() -> Json<InterfaceConfig> {
    Json(InterfaceConfig::sentiment())
}

pub async fn index() -> Html<&'static str> {
    Html(INDEX_HTML)
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Sentiment API</title>
<style>
  body { font-family: system-ui, sans-serif; max-width: 42rem; margin: 2rem auto; padding: 0 1rem; }
  label { display: block; font-weight: 600; margin-top: 1rem; }
  textarea, output { display: block; width: 100%; box-sizing: border-box; padding: .5rem;
    border: 1px solid #ccc; border-radius: 4px; min-height: 2.2rem; font: inherit; }
  button { margin-top: 1rem; padding: .5rem 1.5rem; font: inherit; }
  .error { color: #b00020; }
</style>
</head>
<body>
<h1>Sentiment API</h1>
<form id="form">
  <label for="text">Enter text</label>
  <textarea id="text" name="text" rows="3"></textarea>
  <button type="submit">Submit</button>
  <button type="reset">Clear</button>
</form>
<label for="label">label</label>
<output id="label"></output>
<label for="score">score</label>
<output id="score"></output>
<label for="normalized_label">normalized_label</label>
<output id="normalized_label"></output>
<p id="error" class="error"></p>
<script>
  const form = document.getElementById("form");
  const out = (id, v) => { document.getElementById(id).textContent = v; };
  form.addEventListener("reset", () => {
    ["label", "score", "normalized_label", "error"].forEach((id) => out(id, ""));
  });
  form.addEventListener("submit", async (ev) => {
    ev.preventDefault();
    out("error", "");
    try {
      const resp = await fetch("api/predict", {
        method: "POST",
        headers: { "Content-Type": "application/json" },
        body: JSON.stringify({ data: [document.getElementById("text").value] }),
      });
      const body = await resp.json();
      if (!resp.ok) throw new Error(body.error || resp.statusText);
      const [label, score, normalized] = body.data;
      out("label", label);
      out("score", score);
      out("normalized_label", normalized);
    } catch (e) {
      out("error", e.message);
    }
  });
</script>
</body>
</html>
"#;
