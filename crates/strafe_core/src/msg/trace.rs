//! Background message trace.
//!
//! The engine loop can tap its message traffic into a file without paying
//! file-write latency on the tick: producers push formatted records into a
//! channel and a single consumer thread drains and writes them. Dropping
//! the trace closes the channel, which is the shutdown signal; the writer
//! is joined before drop completes so no records are lost.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;
use std::sync::mpsc;
use std::thread;

use crate::msg::{join_args, Message};

/// Off-thread writer for message records.
pub struct MessageTrace {
    sender: Option<mpsc::Sender<String>>,
    worker: Option<thread::JoinHandle<()>>,
}

impl MessageTrace {
    /// Open `path` for writing and start the consumer thread.
    pub fn create(path: impl AsRef<Path>) -> io::Result<Self> {
        let file = File::create(path.as_ref())?;
        let (sender, receiver) = mpsc::channel::<String>();

        let worker = thread::Builder::new()
            .name("msg-trace".to_string())
            .spawn(move || {
                let mut out = BufWriter::new(file);
                while let Ok(line) = receiver.recv() {
                    if let Err(err) = writeln!(out, "{line}") {
                        tracing::warn!(%err, "message trace write failed; stopping");
                        return;
                    }
                }
                if let Err(err) = out.flush() {
                    tracing::warn!(%err, "message trace flush failed");
                }
            })?;

        tracing::debug!(path = %path.as_ref().display(), "message trace started");
        Ok(Self {
            sender: Some(sender),
            worker: Some(worker),
        })
    }

    /// Record one message as seen at `tick`. Never blocks on the file.
    pub fn record(&self, tick: u64, msg: &Message) {
        if let Some(sender) = &self.sender {
            let line = format!(
                "{tick}\t{}\t{}\t{}\t{}\t{}",
                msg.system(),
                msg.to(),
                msg.from(),
                msg.cmd(),
                join_args(msg.args()),
            );
            // The receiver only disconnects on writer failure; records sent
            // after that are dropped, matching the writer giving up.
            let _ = sender.send(line);
        }
    }

    /// Signal the writer and wait for it to finish.
    pub fn shutdown(mut self) {
        self.close();
    }

    fn close(&mut self) {
        self.sender.take();
        if let Some(worker) = self.worker.take() {
            if worker.join().is_err() {
                tracing::warn!("message trace writer panicked");
            }
        }
    }
}

impl Drop for MessageTrace {
    fn drop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::msg::target;

    fn temp_path(tag: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("strafe-trace-{}-{tag}.log", std::process::id()))
    }

    #[test]
    fn records_are_written_and_joined_on_shutdown() {
        let path = temp_path("basic");
        let trace = MessageTrace::create(&path).unwrap();
        trace.record(3, &Message::to_system(target::SPAWNER, "new", "asteroid;1;2"));
        trace.record(4, &Message::to_entity("player_1", "", "hit", ""));
        trace.shutdown();

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "3\tspawner\t\t\tnew\tasteroid;1;2");
        assert_eq!(lines[1], "4\tentities\tplayer_1\t\thit\t");

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn drop_flushes_without_explicit_shutdown() {
        let path = temp_path("drop");
        {
            let trace = MessageTrace::create(&path).unwrap();
            trace.record(0, &Message::to_system(target::SYSTEM, "exit", ""));
        }
        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.contains("exit"));

        std::fs::remove_file(&path).ok();
    }
}
