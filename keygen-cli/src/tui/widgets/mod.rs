pub mod popup;
pub mod spinner;
pub mod word_entry;

pub use popup::{Popup, PopupType};
pub use spinner::Spinner;
pub use word_entry::WordEntry;
