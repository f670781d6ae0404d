mod ytmusic;

pub use ytmusic::*;
