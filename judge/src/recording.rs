use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;

use serde::Serialize;
use serde_json::value::RawValue;

/// Stores every wire exchange of a game and writes them out as one JSON
/// file per game.
pub struct Recorder {
    num: usize,
    directory: PathBuf,
    exchanges: Vec<Exchange>,
}

#[derive(Serialize)]
struct Exchange {
    player: String,
    /// The record sent to the bot, embedded verbatim (it is already JSON).
    record: Box<RawValue>,
    /// The move line the bot answered with; `None` for the setup record,
    /// which expects no answer.
    response: Option<String>,
}

impl Recorder {
    pub fn new(directory: PathBuf) -> anyhow::Result<Self> {
        if !directory.is_dir() {
            anyhow::bail!("Directory '{}' does not exist", directory.display());
        }
        Ok(Self {
            num: 1,
            directory,
            exchanges: Vec::new(),
        })
    }

    pub fn store_exchange(
        &mut self,
        player: &str,
        record: String,
        response: Option<String>,
    ) -> anyhow::Result<()> {
        self.exchanges.push(Exchange {
            player: String::from(player),
            record: RawValue::from_string(record)?,
            response,
        });
        Ok(())
    }

    pub fn write_game_recording(&mut self) -> anyhow::Result<()> {
        let filepath = self.directory.join(format!("game_{:0>6}.json", self.num));
        let writer = BufWriter::new(File::create(filepath)?);
        serde_json::to_writer_pretty(writer, &std::mem::take(&mut self.exchanges))?;
        self.num += 1;
        Ok(())
    }
}
