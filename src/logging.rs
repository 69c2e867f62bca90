use std::borrow::Cow;
use std::io::{self, Write};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::{LogFormat, LoggingSettings};

/// Replace newlines inside a formatted event so it stays on one line
///
/// A single trailing newline terminates the event and is kept as is.
pub fn escape_newlines(buf: &[u8]) -> Cow<'_, [u8]> {
    let (body, terminated) = match buf.split_last() {
        Some((b'\n', body)) => (body, true),
        _ => (buf, false),
    };

    if !body.contains(&b'\n') {
        return Cow::Borrowed(buf);
    }

    let mut escaped = Vec::with_capacity(buf.len() + 8);
    for &byte in body {
        if byte == b'\n' {
            escaped.extend_from_slice(b"\\n");
        } else {
            escaped.push(byte);
        }
    }
    if terminated {
        escaped.push(b'\n');
    }
    Cow::Owned(escaped)
}

/// Writer that escapes interior newlines of each event it is handed
pub struct EscapingWriter<W> {
    inner: W,
}

impl<W: Write> Write for EscapingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.inner.write_all(&escape_newlines(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

/// [`MakeWriter`] wrapping every writer in an [`EscapingWriter`]
pub struct Escaping<M>(pub M);

impl<'a, M: MakeWriter<'a>> MakeWriter<'a> for Escaping<M> {
    type Writer = EscapingWriter<M::Writer>;

    fn make_writer(&'a self) -> Self::Writer {
        EscapingWriter {
            inner: self.0.make_writer(),
        }
    }
}

/// Install the global subscriber
///
/// `RUST_LOG`, when set, takes precedence over the configured level.
pub fn init(settings: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.level));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_level(true)
        .with_writer(Escaping(io::stdout));

    match settings.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Text => builder.init(),
    }
}
