pub mod not_found;
pub mod renthouse_editor;
pub mod renthouses;

pub use not_found::NotFoundPage;
pub use renthouse_editor::RenthouseEditorPage;
pub use renthouses::RenthousesPage;
