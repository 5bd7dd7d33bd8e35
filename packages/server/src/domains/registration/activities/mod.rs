// Registration activities - plain async functions over ServerDeps

pub mod check_email;
pub mod submit;
pub mod upload;

pub use check_email::email_exists;
pub use submit::{submit_registration, Attachments, RegistrationReceipt, SubmitError};
pub use upload::upload_attachment;
