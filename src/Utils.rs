/// whitespace-delimited model output files: header plus numbered data rows
pub mod load_from_file;
/// terminal and optional file logging for the binary
pub mod logger;
