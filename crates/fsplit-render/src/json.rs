use fsplit_core::{Exclusion, SplitReport};
use serde::Serialize;
use std::io::Write;

/// Writes a split report as a single JSON document.
pub struct JsonWriter {
    pretty: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Report {
    package_dir: String,
    generated: Vec<String>,
    rewritten: Vec<String>,
    skipped: Vec<Skipped>,
}

#[derive(Serialize)]
#[serde(rename_all = "PascalCase")]
struct Skipped {
    path: String,
    reason: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    functions: Option<usize>,
}

impl Default for JsonWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl JsonWriter {
    pub fn new() -> Self {
        Self { pretty: false }
    }

    pub fn pretty(mut self, pretty: bool) -> Self {
        self.pretty = pretty;
        self
    }

    pub fn render(&self, report: &SplitReport) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, report)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn write_to(&self, writer: &mut dyn Write, report: &SplitReport) -> anyhow::Result<()> {
        let display = |p: &std::path::PathBuf| p.display().to_string();
        let doc = Report {
            package_dir: report.package_dir.display().to_string(),
            generated: report.generated.iter().map(display).collect(),
            rewritten: report.rewritten.iter().map(display).collect(),
            skipped: report
                .skipped
                .iter()
                .map(|s| Skipped {
                    path: s.path.display().to_string(),
                    reason: s.reason.as_str(),
                    functions: match s.reason {
                        Exclusion::TooFewFunctions(n) => Some(n),
                        _ => None,
                    },
                })
                .collect(),
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &doc)?;
        } else {
            serde_json::to_writer(&mut *writer, &doc)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}
