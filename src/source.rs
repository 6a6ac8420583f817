//! Line sources: the child's output streams, drained line by line into the colorizer.

use std::io::Write;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};

use crate::colorize::{Colorizer, StreamKind};

/// Something that produces lines until it runs dry.
///
/// Implementors hand every completed line to the sink as soon as it is read.
#[async_trait::async_trait]
pub trait LineSource<W: Write + Send + Sync + 'static> {
    async fn pump(self, sink: Colorizer<W>) -> Result<()>;
}

/// One captured stream of the child process.
pub struct ChildStream<R> {
    pub reader: R,
    pub kind: StreamKind,
}

#[async_trait::async_trait]
impl<R, W> LineSource<W> for ChildStream<R>
where
    R: AsyncRead + Unpin + Send + 'static,
    W: Write + Send + Sync + 'static,
{
    async fn pump(self, sink: Colorizer<W>) -> Result<()> {
        let mut reader = BufReader::new(self.reader);
        let mut buf = Vec::new();
        loop {
            buf.clear();
            if reader.read_until(b'\n', &mut buf).await? == 0 {
                break; // EOF
            }
            if buf.ends_with(b"\n") { buf.pop(); }
            if buf.ends_with(b"\r") { buf.pop(); }
            let line = String::from_utf8_lossy(&buf);
            sink.on_line(self.kind, &line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::terminal::tests::{colored, SharedBuf};
    use crate::terminal::TerminalWriter;
    use crossterm::style::Color;
    use std::sync::Arc;

    fn sink() -> (Colorizer<SharedBuf>, SharedBuf) {
        let buf = SharedBuf::default();
        (Colorizer::new(Arc::new(TerminalWriter::new(buf.clone()))), buf)
    }

    #[tokio::test]
    async fn splits_and_strips_line_endings() {
        let (colorizer, buf) = sink();
        let input: &[u8] = b"first\r\nsecond\n\nlast without newline";
        ChildStream { reader: input, kind: StreamKind::Stdout }.pump(colorizer).await.unwrap();
        assert_eq!(buf.contents(), "first\nsecond\nlast without newline\n");
    }

    #[tokio::test]
    async fn stderr_stream_lines_are_red() {
        let (colorizer, buf) = sink();
        let input: &[u8] = b"adb: device offline\n";
        ChildStream { reader: input, kind: StreamKind::Stderr }.pump(colorizer).await.unwrap();
        assert_eq!(buf.contents(), colored("adb: device offline", Color::Red));
    }

    #[tokio::test]
    async fn invalid_utf8_is_replaced_not_fatal() {
        let (colorizer, buf) = sink();
        let input: &[u8] = b"bad \xff byte\n";
        ChildStream { reader: input, kind: StreamKind::Stdout }.pump(colorizer).await.unwrap();
        assert_eq!(buf.contents(), "bad \u{fffd} byte\n");
    }
}
