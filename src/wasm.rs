//! WASM bindings for the spiderfy-core library.
//!
//! All functions exposed to JavaScript via wasm-bindgen are defined here.

use std::cmp::Ordering;

use serde_json::to_string;
use tracing::error;
use wasm_bindgen::prelude::*;

use crate::error::InputError;
use crate::input::MapInput;
use crate::output::MapOutput;
use crate::ranking::RankingKey;
use crate::build_map;

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = console, js_name = error)]
    pub fn console_error(s: &str);
}

fn report_error(msg: &str) {
    error!("{}", msg);
    #[cfg(target_arch = "wasm32")]
    console_error(msg);
}

/// Parse a JSON input document and build the render-ready scene.
pub fn compile_map(input: &str) -> Result<MapOutput, InputError> {
    let (records, regions, cfg) = MapInput::from_json(input)?.into_parts()?;
    let layout = build_map(records, &regions, &cfg)?;
    Ok(MapOutput::from_layout(&layout, &cfg))
}

/// Build the map scene and return it as JSON. Failures come back as an
/// `{"error": {...}}` document.
#[wasm_bindgen]
pub fn layout_map(input: &str) -> String {
    let output = match compile_map(input) {
        Ok(output) => output,
        Err(e) => {
            report_error(&format!("Error building map: {}", e));
            MapOutput::from_error(&e)
        }
    };
    to_string(&output).unwrap_or_else(|_| "{\"error\": {\"message\": \"Serialization error\"}}".to_string())
}

/// Compare two ranking strings: -1, 0 or 1, usable as a JS sort comparator.
#[wasm_bindgen]
pub fn compare_ranking(a: &str, b: &str) -> i32 {
    match RankingKey::parse(a).cmp(&RankingKey::parse(b)) {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Parsed ranking key as a JSON `[primary, secondary]` array.
#[wasm_bindgen]
pub fn ranking_key(text: &str) -> String {
    let key = RankingKey::parse(text);
    format!("[{},{}]", key.primary, key.secondary)
}
