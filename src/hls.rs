pub mod attributes;
pub mod classifier;
pub mod master;
pub mod media;
pub mod resolve;
pub mod stream_info;

pub use classifier::{LineClassifier, LineType};
pub use master::{MasterPlaylist, Variant, VariantLocation, parse_master};
pub use media::{MediaPlaylist, Segment, parse_media};
pub use resolve::{resolve, resolve_against};
pub use stream_info::{MediaInfo, StreamInfo};
