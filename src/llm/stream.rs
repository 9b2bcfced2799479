use anyhow::Result;
use std::io::{BufRead, Write};

/// Read a streaming response line-by-line, echoing chunks to `sink` as they
/// arrive and returning the full text.
pub fn read_stream_to_string<R, W, F>(reader: R, sink: &mut W, mut parse_line: F) -> Result<String>
where
    R: BufRead,
    W: Write,
    F: FnMut(&str) -> Result<Option<String>>,
{
    let mut out = String::new();

    for line in reader.lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(chunk) = parse_line(line)? {
            out.push_str(&chunk);
            write!(sink, "{}", chunk)?;
            sink.flush()?;
        }
    }

    writeln!(sink)?;
    Ok(out)
}
