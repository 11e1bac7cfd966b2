use crate::domain::donation::DonationRequest;
use crate::error::DonationError;
use std::io::Read;

/// Streams donation requests from CSV input with `amount, token, charity`
/// columns. Malformed rows surface as per-row errors so a batch run can
/// report and skip them without aborting.
pub struct DonationReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> DonationReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    pub fn requests(self) -> impl Iterator<Item = Result<DonationRequest, DonationError>> {
        self.reader
            .into_deserialize()
            .map(|result| result.map_err(DonationError::from))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::donation::CharitySelection;

    #[test]
    fn test_reader_valid_stream() {
        let data = "amount, token, charity\n100, tokn_X, 1\n25.50, tokn_Y, random";
        let reader = DonationReader::new(data.as_bytes());
        let results: Vec<Result<DonationRequest, DonationError>> = reader.requests().collect();

        assert_eq!(results.len(), 2);
        let first = results[0].as_ref().unwrap();
        assert_eq!(first.amount, "100");
        assert_eq!(first.charity, CharitySelection::Id(1));
        let second = results[1].as_ref().unwrap();
        assert_eq!(second.charity, CharitySelection::Random);
    }

    #[test]
    fn test_reader_malformed_selector() {
        let data = "amount, token, charity\n100, tokn_X, nowhere\n50, tokn_Y, 2";
        let reader = DonationReader::new(data.as_bytes());
        let results: Vec<Result<DonationRequest, DonationError>> = reader.requests().collect();

        assert!(results[0].is_err());
        assert!(results[1].is_ok());
    }

    #[test]
    fn test_reader_keeps_empty_token() {
        // Token presence is the engine's call, not the reader's.
        let data = "amount, token, charity\n100, , 1";
        let reader = DonationReader::new(data.as_bytes());
        let request = reader.requests().next().unwrap().unwrap();
        assert_eq!(request.token, "");
    }
}
