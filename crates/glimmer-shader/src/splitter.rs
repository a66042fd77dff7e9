use std::fs;
use std::path::Path;

use crate::error::SourceError;
use crate::source::{ShaderSource, Stage};

/// Case-sensitive token that makes a line a section marker.
pub const MARKER: &str = "#shader";

/// A marker line that named neither stage.
///
/// Lines after such a marker are discarded until the next valid marker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoredMarker {
    /// 1-based line number.
    pub line: usize,
    pub text: String,
}

/// Split result plus the marker lines that selected no stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SplitReport {
    pub source: ShaderSource,
    pub ignored_markers: Vec<IgnoredMarker>,
}

/// Splits shader text into its vertex and fragment blocks.
pub fn parse_str(text: &str) -> ShaderSource {
    parse_str_with_report(text).source
}

/// Like [`parse_str`], also reporting marker lines that named no stage.
pub fn parse_str_with_report(text: &str) -> SplitReport {
    let mut report = SplitReport::default();
    let mut current: Option<Stage> = None;

    // Each line keeps its own terminator, `\r` included.
    for (index, line) in text.split_inclusive('\n').enumerate() {
        if line.contains(MARKER) {
            current = marker_stage(line);
            if current.is_none() {
                report.ignored_markers.push(IgnoredMarker {
                    line: index + 1,
                    text: line.trim_end_matches(['\r', '\n']).to_string(),
                });
            }
            continue;
        }

        if let Some(stage) = current {
            let block = report.source.stage_mut(stage);
            block.push_str(line);
            if !line.ends_with('\n') {
                block.push('\n');
            }
        }
    }

    report
}

/// Reads and splits a shader file.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ShaderSource, SourceError> {
    parse_file_with_report(path).map(|report| report.source)
}

/// Reads and splits a shader file, reporting marker lines that named no stage.
pub fn parse_file_with_report(path: impl AsRef<Path>) -> Result<SplitReport, SourceError> {
    let path = path.as_ref();
    let text = fs::read_to_string(path).map_err(|e| SourceError::new(path, e))?;
    Ok(parse_str_with_report(&text))
}

fn marker_stage(line: &str) -> Option<Stage> {
    // Vertex wins when a marker line names both keywords.
    [Stage::Vertex, Stage::Fragment]
        .into_iter()
        .find(|stage| line.contains(stage.keyword()))
}
