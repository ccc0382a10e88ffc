// Library root
// -----------
// The binary (`main.rs`) is a thin shell over these modules so that the
// command flows, view models and stores can be tested without a terminal.
//
// Module responsibilities:
// - `config`: environment and `.env` lookups, endpoint selection.
// - `api`: blocking HTTP calls to the analyst node and scenario engine.
// - `json`, `analyst`, `scenario`: total view models over upstream JSON.
// - `progression`: ranks and point awards.
// - `store`: points, session and history files under the home directory.
// - `format`, `layout`, `render`: plain-text console output.
// - `ui`: prompts, spinner and styled headings.
// - `commands`, `cli`: the four commands and argument dispatch.
pub mod analyst;
pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod format;
pub mod json;
pub mod layout;
pub mod progression;
pub mod render;
pub mod scenario;
pub mod store;
pub mod ui;
