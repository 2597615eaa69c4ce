use snafu::Snafu;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
#[snafu(visibility(pub(crate)))]
pub enum Error {
    #[snafu(display("Invalid line range: last line {last} is before start line {start}"))]
    InvalidRange { start: u32, last: u32 },

    #[snafu(display("Index {index} out of range for coverage set of length {len}"))]
    IndexOutOfRange { index: usize, len: usize },

    #[snafu(display("Malformed line range: {input:?}"))]
    ParseRange { input: String },
}
