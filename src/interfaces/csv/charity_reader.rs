use crate::domain::charity::Charity;
use crate::error::DonationError;
use std::io::Read;

/// Reads the administrative charity seed file: `id, name` with an optional
/// `total` column for pre-existing balances.
pub struct CharityReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CharityReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn charities(self) -> impl Iterator<Item = Result<Charity, DonationError>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(DonationError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::charity::MinorUnits;

    #[test]
    fn test_seed_without_totals() {
        let data = "id, name\n1, Children\n2, Elderly";
        let reader = CharityReader::new(data.as_bytes());
        let charities: Vec<_> = reader.charities().map(|c| c.unwrap()).collect();

        assert_eq!(charities.len(), 2);
        assert_eq!(charities[0].name, "Children");
        assert_eq!(charities[0].total, MinorUnits::ZERO);
    }

    #[test]
    fn test_seed_with_totals() {
        let data = "id, name, total\n1, Children, 10000";
        let reader = CharityReader::new(data.as_bytes());
        let charity = reader.charities().next().unwrap().unwrap();
        assert_eq!(charity.total, MinorUnits::new(10_000));
    }
}
