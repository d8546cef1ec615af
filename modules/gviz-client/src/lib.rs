pub mod error;

pub use error::{GvizError, Result};

use std::collections::HashMap;
use std::time::Duration;

use serde_json::Value;

const RESPONSE_PREFIX: &str = "google.visualization.Query.setResponse(";
const RESPONSE_SUFFIX: &str = ");";

/// One sheet row, keyed by column label. Cell values are stringified
/// (the sheet stores tweet ids as numbers or text depending on how the
/// moderator pasted them).
pub type SheetRow = HashMap<String, String>;

pub struct GvizClient {
    client: reqwest::Client,
    sheet_id: String,
}

impl GvizClient {
    pub fn new(sheet_id: &str) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            sheet_id: sheet_id.to_string(),
        }
    }

    /// Fetch all rows of the sheet via the gviz JSON endpoint.
    pub async fn rows(&self) -> Result<Vec<SheetRow>> {
        let url = format!(
            "https://docs.google.com/spreadsheets/d/{}/gviz/tq?tqx=out:json",
            self.sheet_id
        );

        let resp = self.client.get(&url).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let message = resp.text().await.unwrap_or_default();
            return Err(GvizError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body = resp.text().await?;
        let rows = parse_gviz(&body)?;
        tracing::debug!(count = rows.len(), "Fetched sheet rows");
        Ok(rows)
    }
}

/// Strip the `google.visualization.Query.setResponse(...);` wrapper and zip
/// column labels with row cells into string maps.
pub fn parse_gviz(body: &str) -> Result<Vec<SheetRow>> {
    let start = body
        .find(RESPONSE_PREFIX)
        .ok_or_else(|| GvizError::Malformed("missing setResponse wrapper".to_string()))?
        + RESPONSE_PREFIX.len();
    let end = body
        .rfind(RESPONSE_SUFFIX)
        .ok_or_else(|| GvizError::Malformed("missing closing `);`".to_string()))?;
    if end <= start {
        return Err(GvizError::Malformed("empty wrapper body".to_string()));
    }

    let data: Value = serde_json::from_str(&body[start..end])
        .map_err(|e| GvizError::Malformed(e.to_string()))?;

    let table = &data["table"];
    let cols: Vec<String> = table["cols"]
        .as_array()
        .map(|cols| {
            cols.iter()
                .map(|c| c["label"].as_str().unwrap_or_default().to_string())
                .collect()
        })
        .unwrap_or_default();

    let mut rows = Vec::new();
    for row in table["rows"].as_array().map(Vec::as_slice).unwrap_or(&[]) {
        let cells = row["c"].as_array().map(Vec::as_slice).unwrap_or(&[]);
        let mut map = SheetRow::new();
        for (label, cell) in cols.iter().zip(cells) {
            map.insert(label.clone(), stringify_cell(&cell["v"]));
        }
        rows.push(map);
    }
    Ok(rows)
}

fn stringify_cell(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        Value::Number(n) => {
            // Sheets hands numeric cells back as floats; render integral
            // values without the trailing `.0` so ids stay comparable.
            if let Some(f) = n.as_f64() {
                if f.fract() == 0.0 && f.abs() < 1e15 {
                    return format!("{}", f as i64);
                }
            }
            n.to_string()
        }
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}
