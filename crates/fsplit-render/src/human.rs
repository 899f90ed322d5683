use fsplit_core::SplitReport;
use std::io::Write;

/// Writes a split report as plain text: one line per file, then a summary.
pub struct HumanWriter {
    list_files: bool,
}

impl Default for HumanWriter {
    fn default() -> Self {
        Self::new()
    }
}

impl HumanWriter {
    pub fn new() -> Self {
        Self { list_files: true }
    }

    pub fn list_files(mut self, list_files: bool) -> Self {
        self.list_files = list_files;
        self
    }

    pub fn render(&self, report: &SplitReport) -> anyhow::Result<String> {
        let mut buf = Vec::new();
        self.write_to(&mut buf, report)?;
        Ok(String::from_utf8(buf)?)
    }

    pub fn write_to(&self, writer: &mut dyn Write, report: &SplitReport) -> anyhow::Result<()> {
        if self.list_files {
            for path in &report.generated {
                writeln!(writer, "  created    {}", path.display())?;
            }
            for path in &report.rewritten {
                writeln!(writer, "  rewritten  {}", path.display())?;
            }
            for skipped in &report.skipped {
                writeln!(
                    writer,
                    "  skipped    {} ({})",
                    skipped.path.display(),
                    skipped.reason
                )?;
            }
        }

        writeln!(
            writer,
            "{} function {} written, {} original{} rewritten, {} {} skipped",
            report.generated.len(),
            plural(report.generated.len(), "file", "files"),
            report.rewritten.len(),
            if report.rewritten.len() == 1 { "" } else { "s" },
            report.skipped.len(),
            plural(report.skipped.len(), "file", "files"),
        )?;
        Ok(())
    }
}

fn plural(n: usize, one: &'static str, many: &'static str) -> &'static str {
    if n == 1 { one } else { many }
}
