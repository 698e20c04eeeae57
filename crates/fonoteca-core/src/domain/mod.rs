pub mod genre;
pub mod record;
pub mod song;

pub use genre::Genre;
pub use record::Record;
pub use song::Song;
