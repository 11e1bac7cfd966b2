pub mod charity_reader;
pub mod charity_writer;
pub mod donation_reader;
