//! Activity log transcripts

use scandeck_core::{render_transcript, LogEntry, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::debug;

/// Suggested download name for log transcripts
pub const TRANSCRIPT_FILE: &str = "scan_log.txt";

/// Write a transcript of `entries` to `path`
pub fn write_log_transcript<'a, I, P>(entries: I, path: P) -> Result<()>
where
    I: IntoIterator<Item = &'a LogEntry>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let text = render_transcript(entries);
    let mut writer = BufWriter::new(File::create(path)?);
    writer.write_all(text.as_bytes())?;
    writer.flush()?;
    debug!(path = %path.display(), bytes = text.len(), "log transcript written");
    Ok(())
}
