//! Looping background music.
//!
//! Playback is fire-and-forget: once started nothing in the game waits on
//! it, and any failure to start is logged and otherwise ignored. Real output
//! needs the `audio` cargo feature.

use std::path::Path;

use tracing::{info, warn};

use crate::error::ResourceError;

/// Keeps the output stream alive; dropping it stops the music.
pub struct BackgroundMusic {
    #[cfg(feature = "audio")]
    _stream: rodio::OutputStream,
    #[cfg(feature = "audio")]
    _sink: rodio::Sink,
}

impl BackgroundMusic {
    /// Start looping `path`, or log why not and return `None`.
    pub fn start(path: &Path, volume: f32) -> Option<Self> {
        match Self::play_looping(path, volume) {
            Ok(music) => {
                info!(path = %path.display(), volume, "background music started");
                Some(music)
            }
            Err(e) => {
                warn!("could not load music: {e}");
                None
            }
        }
    }

    #[cfg(feature = "audio")]
    pub fn play_looping(path: &Path, volume: f32) -> Result<Self, ResourceError> {
        use std::fs::File;
        use std::io::BufReader;

        use rodio::{Decoder, OutputStream, Sink};

        let file = File::open(path).map_err(|e| ResourceError::read(path, e))?;
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| ResourceError::Audio(e.to_string()))?;
        let source = Decoder::new_looped(BufReader::new(file))
            .map_err(|e| ResourceError::Audio(e.to_string()))?;
        let sink = Sink::try_new(&handle).map_err(|e| ResourceError::Audio(e.to_string()))?;
        sink.set_volume(volume);
        sink.append(source);

        Ok(Self {
            _stream: stream,
            _sink: sink,
        })
    }

    #[cfg(not(feature = "audio"))]
    pub fn play_looping(path: &Path, _volume: f32) -> Result<Self, ResourceError> {
        std::fs::metadata(path).map_err(|e| ResourceError::read(path, e))?;
        Err(ResourceError::Audio(
            "built without the `audio` feature".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_not_fatal() {
        assert!(BackgroundMusic::start(Path::new("/nonexistent/audiogame.mp3"), 0.25).is_none());
    }

    #[test]
    fn missing_file_reports_a_read_error() {
        let err = BackgroundMusic::play_looping(Path::new("/nonexistent/audiogame.mp3"), 0.25)
            .err()
            .unwrap();
        assert!(matches!(err, ResourceError::Read { .. }));
    }
}
