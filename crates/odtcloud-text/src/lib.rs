//! Text processing for odtcloud
//!
//! - [`stopwords`]: remove default and custom stopwords from extracted text
//! - [`frequency`]: count words into normalized weights for the cloud renderer
//!
//! ```
//! use odtcloud_text::filter_text;
//!
//! assert_eq!(filter_text("the Quick Brown fox", [] as [&str; 0]), "Quick Brown fox");
//! assert_eq!(filter_text("Go Go Go!", ["go"]), "Go!");
//! ```

pub mod frequency;
pub mod stopwords;

pub use frequency::{FrequencyOptions, WordFrequencies};
pub use stopwords::{filter_text, StopwordSet, DEFAULT_STOPWORDS};
