pub mod results;
pub mod upload;

pub use results::{Clipboard, ResultsView};
pub use upload::UploadForm;
