//! Concurrent draining of process output pipes
//!
//! Both pipes are read by their own future. Lines are funnelled through one
//! unbounded channel to a single consumer, which hands them to the
//! [`LineHandler`] and appends them to the captured output. Nothing ever
//! waits on the consumer, so a process writing heavily to one stream can't
//! stall the reader of the other.

use async_channel::Sender;
use futures_lite::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tracing::{trace, warn};

use crate::event::{LineEvent, LineHandler, LogSource};

/// Drain both pipes to end-of-stream, delivering every complete line exactly once.
///
/// Returns the captured output: every line, newline-terminated, in delivery
/// order. The pipes are dropped (closed) before this returns, whatever the
/// reason a drain loop stopped.
pub async fn drain_pipes<O, E>(
    stdout: Option<O>,
    stderr: Option<E>,
    handler: &mut dyn LineHandler,
) -> String
where
    O: AsyncRead + Unpin,
    E: AsyncRead + Unpin,
{
    let (sender, receiver) = async_channel::unbounded::<LineEvent>();

    let stdout_lines = pump(stdout, LogSource::Stdout, sender.clone());
    let stderr_lines = pump(stderr, LogSource::Stderr, sender);

    // The channel closes once both pumps have dropped their senders.
    let deliver = async {
        let mut captured = String::new();
        while let Ok(event) = receiver.recv().await {
            captured.push_str(&event.line);
            captured.push('\n');
            handler.on_line(event);
        }
        captured
    };

    let ((), (), captured) = futures::join!(stdout_lines, stderr_lines, deliver);
    captured
}

/// Read one pipe line by line until EOF or a read error.
async fn pump<R>(pipe: Option<R>, source: LogSource, sender: Sender<LineEvent>)
where
    R: AsyncRead + Unpin,
{
    let Some(pipe) = pipe else {
        return;
    };

    let mut reader = BufReader::new(pipe);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {
                let line = String::from_utf8_lossy(trim_line_ending(&buf)).into_owned();
                if sender.send(LineEvent::new(source, line)).await.is_err() {
                    break;
                }
            }
            Err(e) => {
                warn!("Error reading {} pipe: {}", source, e);
                break;
            }
        }
    }

    trace!("{} pipe closed", source);
}

fn trim_line_ending(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}
