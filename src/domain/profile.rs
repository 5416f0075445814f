//! Encoding parameters handed to the transcoder.

/// Fixed, process-wide encoding configuration.
///
/// Built once at startup and never derived from the input media.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodingProfile {
    /// Width and height are divided by this (1 = original size, 2 = half)
    pub scale_divisor: u32,

    /// Constant rate factor, lower is higher quality
    pub crf: u32,

    /// Encoder speed preset
    pub preset: String,

    pub video_codec: String,

    /// PCM audio keeps the output editable in DaVinci Resolve
    pub audio_codec: String,

    pub audio_sample_rate: u32,

    pub audio_channels: u32,

    /// Move the moov atom to the front for progressive playback
    pub faststart: bool,
}

impl Default for EncodingProfile {
    fn default() -> Self {
        Self {
            scale_divisor: 2,
            crf: 18,
            preset: "slow".to_string(),
            video_codec: "libx264".to_string(),
            audio_codec: "pcm_s16le".to_string(),
            audio_sample_rate: 48_000,
            audio_channels: 2,
            faststart: true,
        }
    }
}

impl EncodingProfile {
    /// Video filter expression scaling both dimensions by the divisor
    pub fn scale_filter(&self) -> String {
        format!("scale=iw/{0}:ih/{0}", self.scale_divisor)
    }
}
