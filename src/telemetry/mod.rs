pub mod reader;
pub mod sample;
pub mod table;

pub use reader::{load_log, read_log, save_log, write_log};
pub use sample::{Channel, Sample};
pub use table::SampleTable;
