use crate::domain::charity::Charity;
use crate::error::Result;
use std::io::Write;

/// Writes the final `id,name,total` report, sorted by id for stable output.
pub struct CharityWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CharityWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_charities(&mut self, mut charities: Vec<Charity>) -> Result<()> {
        charities.sort_by_key(|charity| charity.id);
        for charity in charities {
            self.writer.serialize(charity)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
