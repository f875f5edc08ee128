//! Jumping the page's player to a note's timestamp.
//!
//! Pages can embed several players (previews, ads, picture-in-picture). The
//! one with the largest rendered area is taken to be the video the user is
//! watching.

use crate::messages::{JumpResponse, JumpToTime};
use tracing::{debug, warn};

/// A playable element in the host page.
pub trait MediaElement {
    /// Rendered width × height in CSS pixels
    fn rendered_area(&self) -> f64;

    fn set_current_time(&mut self, seconds: f64);

    /// Resume playback. Hosts may refuse (autoplay policy), hence the Result.
    fn play(&mut self) -> Result<(), String>;
}

/// Read access to the media elements of one page.
pub trait MediaHost {
    fn media_elements(&mut self) -> Vec<&mut dyn MediaElement>;
}

/// Seek the largest media element to `seconds` and resume it. Returns
/// `false` when the page has no media element.
pub fn seek_to<H: MediaHost + ?Sized>(host: &mut H, seconds: u64) -> bool {
    let mut elements = host.media_elements();
    if elements.is_empty() {
        debug!(seconds, "no media element to seek");
        return false;
    }

    // First element wins on equal area
    let mut best = 0;
    for (i, el) in elements.iter().enumerate().skip(1) {
        if el.rendered_area() > elements[best].rendered_area() {
            best = i;
        }
    }

    let target = &mut elements[best];
    target.set_current_time(seconds as f64);
    if let Err(e) = target.play() {
        warn!(seconds, error = %e, "seeked but playback did not resume");
    }
    true
}

/// Answer a `jumpToTime` message against the given page.
pub fn handle_jump<H: MediaHost + ?Sized>(host: &mut H, message: &JumpToTime) -> JumpResponse {
    JumpResponse {
        success: seek_to(host, message.timestamp),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct FakeVideo {
        width: f64,
        height: f64,
        position: Option<f64>,
        playing: bool,
        blocks_autoplay: bool,
    }

    impl FakeVideo {
        fn sized(width: f64, height: f64) -> Self {
            Self {
                width,
                height,
                ..Default::default()
            }
        }
    }

    impl MediaElement for FakeVideo {
        fn rendered_area(&self) -> f64 {
            self.width * self.height
        }

        fn set_current_time(&mut self, seconds: f64) {
            self.position = Some(seconds);
        }

        fn play(&mut self) -> Result<(), String> {
            if self.blocks_autoplay {
                return Err("NotAllowedError".to_string());
            }
            self.playing = true;
            Ok(())
        }
    }

    struct FakePage {
        videos: Vec<FakeVideo>,
    }

    impl MediaHost for FakePage {
        fn media_elements(&mut self) -> Vec<&mut dyn MediaElement> {
            self.videos
                .iter_mut()
                .map(|v| v as &mut dyn MediaElement)
                .collect()
        }
    }

    #[test]
    fn test_seeks_largest_element() {
        let mut page = FakePage {
            videos: vec![FakeVideo::sized(320.0, 180.0), FakeVideo::sized(1280.0, 720.0)],
        };
        assert!(seek_to(&mut page, 95));

        assert_eq!(page.videos[0].position, None);
        assert!(!page.videos[0].playing);
        assert_eq!(page.videos[1].position, Some(95.0));
        assert!(page.videos[1].playing);
    }

    #[test]
    fn test_equal_area_takes_first() {
        let mut page = FakePage {
            videos: vec![FakeVideo::sized(640.0, 360.0), FakeVideo::sized(360.0, 640.0)],
        };
        assert!(seek_to(&mut page, 1));
        assert_eq!(page.videos[0].position, Some(1.0));
        assert_eq!(page.videos[1].position, None);
    }

    #[test]
    fn test_no_media_element() {
        let mut page = FakePage { videos: vec![] };
        assert!(!seek_to(&mut page, 10));
        let response = handle_jump(&mut page, &JumpToTime { timestamp: 10 });
        assert!(!response.success);
    }

    #[test]
    fn test_blocked_playback_still_counts_as_seek() {
        let mut video = FakeVideo::sized(640.0, 360.0);
        video.blocks_autoplay = true;
        let mut page = FakePage { videos: vec![video] };

        let response = handle_jump(&mut page, &JumpToTime { timestamp: 3661 });
        assert!(response.success);
        assert_eq!(page.videos[0].position, Some(3661.0));
        assert!(!page.videos[0].playing);
    }
}
