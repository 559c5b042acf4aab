pub mod display;
pub mod error;
pub mod preview;
pub mod session;
pub mod view;

pub use error::SessionError;
pub use session::{PredictJob, PreviewJob, PreviewTicket, RequestTicket, UploadSession};
