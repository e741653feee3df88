//! Media processing actions built on the external transcoder.

mod sticker;

pub use sticker::{
    sticker_args, sticker_filter, StickerTranscoder, CANVAS_SIZE, FRAME_RATE, MAX_DURATION,
    OUTPUT_EXTENSION, OUTPUT_SIZE, QUALITY,
};
