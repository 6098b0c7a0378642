mod data;
mod file_dates;
mod types;

pub use data::load_data_files;
pub use file_dates::add_file_dates;
pub use types::Collections;
