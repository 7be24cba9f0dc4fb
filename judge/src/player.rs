use std::io::{BufRead, BufReader, Write};
use std::path::Path;
use std::process::{ChildStdin, ChildStdout, Command, Stdio};

use blokk::{Move, StateMsg};
use tracing::trace;

use crate::recording::Recorder;

/// One bot subprocess, talked to over piped stdin/stdout.
pub struct Player {
    pub name: String,
    stdin: ChildStdin,
    stdout: BufReader<ChildStdout>,
    // A re-usable buffer for IO.
    // Should always be empty before and after request_move().
    buf: String,
}

impl Player {
    pub fn spawn(executable_path: &Path) -> anyhow::Result<Self> {
        let name = executable_path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_else(|| String::from("bot"));
        let child_proc = Command::new(executable_path)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        Ok(Self {
            name,
            stdin: child_proc.stdin.expect("Could not access stdin"),
            stdout: BufReader::new(child_proc.stdout.expect("Could not access stdout")),
            buf: String::new(),
        })
    }

    /// Sends a record that expects no answer (the setup message).
    pub fn send(&mut self, recorder: &mut Option<Recorder>, msg: &StateMsg) -> anyhow::Result<()> {
        let mut msg_json = serde_json::to_string(msg)?;
        trace!(name: "Sending record", player = &self.name, record = %msg_json);
        if let Some(recorder) = recorder {
            recorder.store_exchange(&self.name, msg_json.clone(), None)?;
        }
        msg_json.push('\n');
        self.stdin.write_all(msg_json.as_bytes())?;
        self.stdin.flush()?;
        Ok(())
    }

    /// Sends a turn record and reads the answering move line. Lines on the
    /// DEBUG side-channel are logged and skipped.
    pub fn request_move(
        &mut self,
        recorder: &mut Option<Recorder>,
        msg: &StateMsg,
    ) -> anyhow::Result<Move> {
        let msg_json = serde_json::to_string(msg)?;
        trace!(name: "Sending record", player = &self.name, record = %msg_json);
        self.stdin.write_all(msg_json.as_bytes())?;
        self.stdin.write_all(b"\n")?;
        self.stdin.flush()?;

        loop {
            self.buf.clear();
            let num_bytes_read = self.stdout.read_line(&mut self.buf)?;
            if num_bytes_read == 0 {
                anyhow::bail!("Bot '{}' exited without answering", self.name);
            }
            let line = self.buf.trim_end();
            if let Some(message) = line.strip_prefix("DEBUG") {
                trace!(player = &self.name, message = message.trim_start());
                continue;
            }
            trace!(name: "Received move", player = &self.name, line);
            let mv = parse_move_line(line).ok_or_else(|| {
                anyhow::anyhow!("Malformed move line '{}' from bot '{}'", line, self.name)
            })?;
            if let Some(recorder) = recorder {
                recorder.store_exchange(&self.name, msg_json, Some(String::from(line)))?;
            }
            return Ok(mv);
        }
    }
}

fn parse_move_line(line: &str) -> Option<Move> {
    let mut parts = line.split_whitespace();
    let block = parts.next()?.parse().ok()?;
    let rotations = parts.next()?.parse().ok()?;
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    if parts.next().is_some() {
        return None;
    }
    Some(Move {
        block,
        rotations,
        x,
        y,
    })
}
