use blokk::{Board, Move, SnapshotError, StateMsg};

/// A trait to simplify writing bots.
pub trait Bot {
    /// Called once when the setup record assigns this bot its player id.
    fn setup(&mut self, number: i8);
    /// Called whenever a turn record demands a move. The board may be
    /// mutated freely (search strategies apply and undo candidates in
    /// place); a fresh board is built from the next state record anyway.
    fn choose(&mut self, board: &mut Board) -> Move;

    fn run(&mut self) -> anyhow::Result<()> {
        // Communication happens through stdin/stdout.
        // Stderr can be used for logging.
        let mut stdin = std::io::stdin().lock();
        let mut stdout = std::io::stdout().lock();
        let mut buf = String::new();

        loop {
            // Read the next line into buf
            buf.clear(); // because stdin.read_line() appends to the buffer
            use std::io::BufRead;
            let num_bytes_read = stdin.read_line(&mut buf)?;
            if num_bytes_read == 0 {
                // 0 bytes read means EOF - the referee has exited.
                break Ok(());
            }

            let msg = serde_json::from_str::<StateMsg>(buf.trim_end())?;

            if let Some(error) = &msg.error {
                send_debug(&mut stdout, &format!("Error: {}", error))?;
            }
            if let Some(number) = msg.number {
                self.setup(number);
            }
            if msg.move_required == Some(1) {
                let snapshot = msg
                    .board
                    .as_ref()
                    .ok_or(SnapshotError::MissingField("board"))?;
                let blocks = msg
                    .blocks
                    .as_ref()
                    .ok_or(SnapshotError::MissingField("blocks"))?;
                let to_move = msg.turn.ok_or(SnapshotError::MissingField("turn"))?;
                let mut board = Board::from_snapshot(snapshot, blocks, to_move)?;

                let mv = self.choose(&mut board);
                use std::io::Write;
                writeln!(stdout, "{}", mv)?;
                stdout.flush()?;
            }
        }
    }
}

/// Writes one line on the wire's debug side-channel. The referee ignores
/// these; they carry no correctness contract.
pub fn send_debug(out: &mut impl std::io::Write, message: &str) -> std::io::Result<()> {
    writeln!(out, "DEBUG {}", message)?;
    out.flush()
}
