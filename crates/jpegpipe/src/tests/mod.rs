mod options;
pub(crate) mod utils;
