// 💾 Result Emitter - Relations → JSON document

use crate::error::Result;
use crate::families::Relations;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::info;

/// Serialize relations to any writer (2-space indent when `pretty`)
pub fn write_relations<W: Write>(writer: W, relations: &Relations, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(writer, relations)?;
    } else {
        serde_json::to_writer(writer, relations)?;
    }
    Ok(())
}

/// Write relations to `path`, replacing any existing file
pub fn save_relations(path: &Path, relations: &Relations, pretty: bool) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    write_relations(&mut writer, relations, pretty)?;
    writer.flush()?;

    info!(path = %path.display(), families = relations.families.len(), "wrote relations");
    Ok(())
}
