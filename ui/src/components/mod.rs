pub mod form_field;
pub mod image_upload_field;
pub mod layout;
pub mod toast;

pub use form_field::FormField;
pub use image_upload_field::ImageUploadField;
pub use toast::ToastContainer;
