//! The session controller.
//!
//! A [`Session`] owns the one live image: the full-resolution source of the
//! latest successful upload and the fixed-width preview derived from it.
//! Every adjustment is rendered from that preview and published to the
//! target slot; the preview itself is only ever replaced by a new upload.
//!
//! # States
//!
//! ```text
//!            load ok                      shutdown
//!   Empty ───────────▶ Ready ──┐  ...  ───────────▶ Closed
//!     │                  ▲     │ load ok / apply
//!     │ apply: no-op     └─────┘
//! ```
//!
//! # Ordering
//!
//! Every upload and every dispatched adjustment takes a ticket from a
//! monotonically increasing counter. A render is published only if nothing
//! with a later ticket has been published yet, so when renders finish out of
//! order the most recently dispatched one is what stays on screen.

use std::sync::Arc;

use crate::adjustments::Adjustment;
use crate::buffer::PixelBuffer;
use crate::config::SessionConfig;
use crate::controls::ControlEvent;
use crate::decode::{decode_image, parse_data_url, resize_to_width, ImageFormat};
use crate::encode::{EncodeError, EncodedPayload};
use crate::publish::{Publisher, Slot};
use crate::Error;

/// Observable state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No image loaded yet. Adjustments are no-ops.
    Empty,
    /// A source image and its preview are loaded.
    Ready,
    /// Shut down. Every further event is ignored.
    Closed,
}

/// What the host should do after an event was handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// Release listeners and stop.
    Shutdown,
}

/// Result of handing a finished render back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// Written to the target slot.
    Published,
    /// A later-dispatched render or upload already published; dropped.
    Superseded,
    /// The session shut down while the render was in flight; dropped.
    SessionClosed,
}

struct Loaded {
    source: PixelBuffer,
    preview: Arc<PixelBuffer>,
}

/// A single adjustment render, detached from the session.
///
/// Holds its own reference to the preview as it was at dispatch time, so it
/// can run on another thread while the session keeps handling events.
#[derive(Debug, Clone)]
pub struct RenderJob {
    ticket: u64,
    baseline: Arc<PixelBuffer>,
    adjustment: Adjustment,
    quality: u8,
}

impl RenderJob {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    /// The preview this job renders from.
    pub fn baseline(&self) -> &PixelBuffer {
        &self.baseline
    }

    /// Apply the adjustment and encode the result.
    pub fn run(self) -> RenderOutcome {
        let adjusted = self.adjustment.apply(&self.baseline);
        RenderOutcome {
            ticket: self.ticket,
            adjustment: self.adjustment,
            result: EncodedPayload::jpeg(&adjusted, self.quality),
        }
    }
}

/// A finished [`RenderJob`], waiting to be published.
#[derive(Debug)]
pub struct RenderOutcome {
    ticket: u64,
    adjustment: Adjustment,
    result: Result<EncodedPayload, EncodeError>,
}

impl RenderOutcome {
    pub fn ticket(&self) -> u64 {
        self.ticket
    }

    pub fn result(&self) -> Result<&EncodedPayload, &EncodeError> {
        self.result.as_ref()
    }
}

pub struct Session<P: Publisher> {
    config: SessionConfig,
    publisher: P,
    loaded: Option<Loaded>,
    closed: bool,
    next_ticket: u64,
    last_published: Option<u64>,
}

impl<P: Publisher> Session<P> {
    /// Start an empty session.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the configuration is invalid.
    pub fn new(config: SessionConfig, publisher: P) -> Result<Self, Error> {
        config.validate()?;
        Ok(Self {
            config,
            publisher,
            loaded: None,
            closed: false,
            next_ticket: 0,
            last_published: None,
        })
    }

    pub fn state(&self) -> SessionState {
        match (self.closed, &self.loaded) {
            (true, _) => SessionState::Closed,
            (false, None) => SessionState::Empty,
            (false, Some(_)) => SessionState::Ready,
        }
    }

    /// The full-resolution image of the latest successful upload.
    pub fn source(&self) -> Option<&PixelBuffer> {
        self.loaded.as_ref().map(|l| &l.source)
    }

    /// The baseline every adjustment renders from.
    pub fn preview(&self) -> Option<&PixelBuffer> {
        self.loaded.as_ref().map(|l| l.preview.as_ref())
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn publisher_mut(&mut self) -> &mut P {
        &mut self.publisher
    }

    /// Route one control event to its transition.
    ///
    /// Failures have already been logged and shown in the status slot when
    /// this returns.
    pub fn handle(&mut self, event: ControlEvent) -> Flow {
        if self.closed {
            return Flow::Shutdown;
        }
        match event {
            ControlEvent::Upload(data_url) => {
                let _ = self.load_data_url(&data_url);
                Flow::Continue
            }
            ControlEvent::Adjust(adjustment) => {
                let _ = self.apply(adjustment);
                Flow::Continue
            }
            ControlEvent::Close => {
                self.shutdown();
                Flow::Shutdown
            }
        }
    }

    /// Load an upload in `<prefix><base64>` form.
    ///
    /// On success the source and preview are replaced together and the
    /// preview render goes to both slots. On failure nothing changes and the
    /// error is shown in the status slot before being returned.
    pub fn load_data_url(&mut self, data_url: &str) -> Result<(), Error> {
        if self.closed {
            return Ok(());
        }
        let result =
            parse_data_url(data_url).and_then(|(format, bytes)| self.replace_image(&bytes, format));
        self.surface(result)
    }

    /// Load raw container bytes of a known format. See [`Self::load_data_url`].
    pub fn load_image(&mut self, bytes: &[u8], format: ImageFormat) -> Result<(), Error> {
        if self.closed {
            return Ok(());
        }
        let result = self.replace_image(bytes, format);
        self.surface(result)
    }

    /// Render one adjustment from the preview and publish it to the target
    /// slot.
    ///
    /// Returns `Ok(false)` without publishing anything if no image is loaded
    /// or the session is closed.
    pub fn apply(&mut self, adjustment: Adjustment) -> Result<bool, Error> {
        let Some(job) = self.dispatch(adjustment) else {
            return Ok(false);
        };
        let completion = self.complete(job.run())?;
        Ok(completion == Completion::Published)
    }

    /// Take a ticket and snapshot the preview for an adjustment render.
    ///
    /// Returns `None` if no image is loaded or the session is closed.
    pub fn dispatch(&mut self, adjustment: Adjustment) -> Option<RenderJob> {
        if self.closed {
            return None;
        }
        let baseline = Arc::clone(&self.loaded.as_ref()?.preview);
        let ticket = self.take_ticket();
        log::debug!("dispatch #{} {:?}", ticket, adjustment);
        Some(RenderJob {
            ticket,
            baseline,
            adjustment,
            quality: self.config.jpeg_quality,
        })
    }

    /// Publish a finished render unless something dispatched after it has
    /// already been published.
    ///
    /// An encode failure is shown in the status slot and returned; it does
    /// not block an earlier render that is still in flight from publishing.
    pub fn complete(&mut self, outcome: RenderOutcome) -> Result<Completion, Error> {
        if self.closed {
            return Ok(Completion::SessionClosed);
        }
        if self.last_published.is_some_and(|last| outcome.ticket < last) {
            log::debug!(
                "dropping superseded render #{} {:?}",
                outcome.ticket,
                outcome.adjustment
            );
            return Ok(Completion::Superseded);
        }

        let payload = self.surface(outcome.result.map_err(Error::from))?;
        self.publisher.publish(Slot::Target, &payload);
        self.last_published = Some(outcome.ticket);
        Ok(Completion::Published)
    }

    /// End the session and release both buffers.
    pub fn shutdown(&mut self) {
        if self.closed {
            return;
        }
        log::info!("Shutting down session");
        self.closed = true;
        self.loaded = None;
    }

    fn replace_image(&mut self, bytes: &[u8], format: ImageFormat) -> Result<(), Error> {
        let source = decode_image(bytes, format)?;
        let preview = resize_to_width(&source, self.config.preview_width)?;
        let payload = EncodedPayload::jpeg(&preview, self.config.jpeg_quality)?;

        log::info!(
            "loaded {:?} {}x{}, preview {}x{}",
            format,
            source.width(),
            source.height(),
            preview.width(),
            preview.height()
        );

        let ticket = self.take_ticket();
        self.loaded = Some(Loaded {
            source,
            preview: Arc::new(preview),
        });
        self.publisher.publish(Slot::Preview, &payload);
        self.publisher.publish(Slot::Target, &payload);
        self.last_published = Some(ticket);
        Ok(())
    }

    fn take_ticket(&mut self) -> u64 {
        let ticket = self.next_ticket;
        self.next_ticket += 1;
        ticket
    }

    fn surface<T>(&mut self, result: Result<T, Error>) -> Result<T, Error> {
        if let Err(e) = &result {
            log::warn!("{}", e);
            self.publisher.status(&e.to_string());
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode::{to_data_url, DecodeError};
    use crate::encode::JPEG_QUALITY;
    use crate::publish::MemoryPublisher;

    fn png_data_url(width: u32, height: u32) -> String {
        let img = image::RgbaImage::from_fn(width, height, |x, y| {
            image::Rgba([(x * 7 % 256) as u8, (y * 13 % 256) as u8, 90, 255])
        });
        let mut bytes = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
            .unwrap();
        to_data_url(ImageFormat::Png, &bytes)
    }

    fn session() -> Session<MemoryPublisher> {
        Session::new(SessionConfig::default(), MemoryPublisher::new()).unwrap()
    }

    fn ready_session() -> Session<MemoryPublisher> {
        let mut s = session();
        s.load_data_url(&png_data_url(40, 30)).unwrap();
        s
    }

    fn target(s: &Session<MemoryPublisher>) -> Vec<u8> {
        s.publisher().target().unwrap().bytes().to_vec()
    }

    #[test]
    fn test_new_session_is_empty() {
        let s = session();
        assert_eq!(s.state(), SessionState::Empty);
        assert!(s.source().is_none());
        assert!(s.preview().is_none());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = SessionConfig {
            preview_width: 0,
            ..SessionConfig::default()
        };
        assert!(matches!(
            Session::new(config, MemoryPublisher::new()),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_publishes_both_slots() {
        let s = ready_session();
        assert_eq!(s.state(), SessionState::Ready);
        assert_eq!(s.source().unwrap().dimensions(), (40, 30));
        assert_eq!(s.preview().unwrap().dimensions(), (300, 225));

        let publisher = s.publisher();
        assert_eq!(publisher.history(), &[Slot::Preview, Slot::Target]);
        assert_eq!(publisher.preview(), publisher.target());
        assert_eq!(publisher.preview().unwrap().format(), ImageFormat::Jpeg);
        assert!(publisher.last_status().is_none());
    }

    #[test]
    fn test_apply_on_empty_is_noop() {
        let mut s = session();
        assert!(!s.apply(Adjustment::Brightness(10.0)).unwrap());
        assert_eq!(s.publisher().publish_count(), 0);
        assert!(s.publisher().last_status().is_none());
        assert!(s.dispatch(Adjustment::Hue(10)).is_none());
    }

    #[test]
    fn test_apply_publishes_target_only() {
        let mut s = ready_session();
        let preview_before = s.publisher().preview().cloned();

        assert!(s.apply(Adjustment::Contrast(0.5)).unwrap());
        assert_eq!(s.publisher().history().last(), Some(&Slot::Target));
        assert_eq!(s.publisher().preview().cloned(), preview_before);
        assert_ne!(s.publisher().target().cloned(), preview_before);
    }

    #[test]
    fn test_apply_never_replaces_preview() {
        let mut s = ready_session();
        let baseline = s.preview().unwrap().clone();
        s.apply(Adjustment::Brightness(80.0)).unwrap();
        s.apply(Adjustment::Saturation(-1.0)).unwrap();
        assert_eq!(s.preview().unwrap(), &baseline);
    }

    #[test]
    fn test_repeated_adjustment_is_identical() {
        let mut s = ready_session();
        s.apply(Adjustment::Hue(45)).unwrap();
        let first = target(&s);
        s.apply(Adjustment::Hue(45)).unwrap();
        assert_eq!(target(&s), first);
    }

    #[test]
    fn test_adjustments_do_not_accumulate() {
        let mut a = ready_session();
        a.apply(Adjustment::Brightness(20.0)).unwrap();
        a.apply(Adjustment::Brightness(-20.0)).unwrap();

        let mut b = ready_session();
        b.apply(Adjustment::Brightness(-20.0)).unwrap();

        assert_eq!(target(&a), target(&b));
    }

    #[test]
    fn test_brightness_back_to_zero_matches_preview() {
        let mut s = ready_session();
        s.apply(Adjustment::Brightness(20.0)).unwrap();
        s.apply(Adjustment::Brightness(0.0)).unwrap();
        assert_eq!(
            s.publisher().target(),
            s.publisher().preview(),
            "zero brightness renders the untouched baseline"
        );
    }

    #[test]
    fn test_unsupported_format_keeps_state() {
        let mut s = ready_session();
        let source = s.source().unwrap().clone();
        let published = s.publisher().publish_count();

        let err = s.load_data_url("data:image/gif;base64,R0lGODlhAQABAAAAACw=");
        assert!(matches!(err, Err(Error::UnsupportedFormat)));
        assert_eq!(s.state(), SessionState::Ready);
        assert_eq!(s.source().unwrap(), &source);
        assert_eq!(s.publisher().publish_count(), published);
        assert_eq!(s.publisher().last_status(), Some("unrecognized image format"));
    }

    #[test]
    fn test_corrupt_upload_keeps_empty() {
        let mut s = session();
        let url = to_data_url(ImageFormat::Jpeg, b"not a jpeg");
        assert!(matches!(s.load_data_url(&url), Err(Error::Decode(_))));
        assert_eq!(s.state(), SessionState::Empty);
        assert!(s.publisher().last_status().is_some());
    }

    #[test]
    fn test_oversized_preview_rejected_before_resize() {
        let mut s = ready_session();
        let source = s.source().unwrap().clone();
        let published = s.publisher().publish_count();

        // 1x1000 at width 300 would need a 300x300000 preview.
        let err = s.load_data_url(&png_data_url(1, 1_000));
        assert!(matches!(
            err,
            Err(Error::Decode(DecodeError::InvalidDimensions { .. }))
        ));
        assert_eq!(s.state(), SessionState::Ready);
        assert_eq!(s.source().unwrap(), &source);
        assert_eq!(s.publisher().publish_count(), published);
        assert_eq!(
            s.publisher().last_status(),
            Some("Invalid dimensions: 300x300000")
        );
    }

    #[test]
    fn test_out_of_order_completion_last_dispatch_wins() {
        let mut s = ready_session();
        let early = s.dispatch(Adjustment::Brightness(60.0)).unwrap();
        let late = s.dispatch(Adjustment::Brightness(-60.0)).unwrap();
        assert!(late.ticket() > early.ticket());

        let late_outcome = late.run();
        let expected = late_outcome.result().unwrap().clone();
        assert_eq!(s.complete(late_outcome).unwrap(), Completion::Published);
        assert_eq!(s.complete(early.run()).unwrap(), Completion::Superseded);
        assert_eq!(s.publisher().target(), Some(&expected));
    }

    #[test]
    fn test_in_order_completion_publishes_both() {
        let mut s = ready_session();
        let first = s.dispatch(Adjustment::Hue(10)).unwrap();
        let second = s.dispatch(Adjustment::Hue(20)).unwrap();
        assert_eq!(s.complete(first.run()).unwrap(), Completion::Published);
        assert_eq!(s.complete(second.run()).unwrap(), Completion::Published);
    }

    #[test]
    fn test_render_dispatched_before_upload_is_superseded() {
        let mut s = ready_session();
        let stale = s.dispatch(Adjustment::Contrast(1.0)).unwrap();
        s.load_data_url(&png_data_url(10, 20)).unwrap();
        let fresh_target = s.publisher().target().cloned();

        assert_eq!(s.complete(stale.run()).unwrap(), Completion::Superseded);
        assert_eq!(s.publisher().target().cloned(), fresh_target);
    }

    #[test]
    fn test_job_keeps_its_snapshot() {
        let mut s = ready_session();
        let job = s.dispatch(Adjustment::Saturation(0.2)).unwrap();
        let snapshot = job.baseline().clone();
        s.load_data_url(&png_data_url(8, 8)).unwrap();
        assert_eq!(job.baseline(), &snapshot);
        assert_ne!(s.preview().unwrap(), &snapshot);
    }

    #[test]
    fn test_jobs_run_on_worker_threads() {
        let mut s = ready_session();
        let jobs: Vec<RenderJob> = (0..4)
            .map(|i| s.dispatch(Adjustment::Hue(i * 30)).unwrap())
            .collect();
        let last_ticket = jobs.last().unwrap().ticket();

        let handles: Vec<_> = jobs
            .into_iter()
            .map(|job| std::thread::spawn(move || job.run()))
            .collect();
        let mut outcomes: Vec<RenderOutcome> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();

        // Hand results back newest first, the worst case for ordering.
        outcomes.sort_by_key(|o| std::cmp::Reverse(o.ticket()));
        let expected = outcomes[0].result().unwrap().clone();
        for outcome in outcomes {
            let ticket = outcome.ticket();
            let completion = s.complete(outcome).unwrap();
            if ticket == last_ticket {
                assert_eq!(completion, Completion::Published);
            } else {
                assert_eq!(completion, Completion::Superseded);
            }
        }
        assert_eq!(s.publisher().target(), Some(&expected));
    }

    #[test]
    fn test_handle_routes_events() {
        let mut s = session();
        assert_eq!(
            s.handle(ControlEvent::Adjust(Adjustment::Hue(5))),
            Flow::Continue
        );
        assert_eq!(s.publisher().publish_count(), 0);

        assert_eq!(s.handle(ControlEvent::Upload(png_data_url(4, 4))), Flow::Continue);
        assert_eq!(s.state(), SessionState::Ready);

        assert_eq!(
            s.handle(ControlEvent::Adjust(Adjustment::Hue(5))),
            Flow::Continue
        );
        assert_eq!(s.publisher().publish_count(), 3);

        assert_eq!(s.handle(ControlEvent::Close), Flow::Shutdown);
        assert_eq!(s.state(), SessionState::Closed);
    }

    #[test]
    fn test_shutdown_releases_and_ignores_events() {
        let mut s = ready_session();
        let job = s.dispatch(Adjustment::Brightness(5.0)).unwrap();
        s.shutdown();

        assert_eq!(s.state(), SessionState::Closed);
        assert!(s.source().is_none());
        assert!(s.preview().is_none());

        let published = s.publisher().publish_count();
        assert_eq!(s.complete(job.run()).unwrap(), Completion::SessionClosed);
        assert!(!s.apply(Adjustment::Brightness(5.0)).unwrap());
        assert!(s.load_data_url(&png_data_url(4, 4)).is_ok());
        assert_eq!(s.state(), SessionState::Closed);
        assert_eq!(s.handle(ControlEvent::Close), Flow::Shutdown);
        assert_eq!(s.publisher().publish_count(), published);
    }

    #[test]
    fn test_load_raw_bytes() {
        let mut s = session();
        let img = PixelBuffer::filled(600, 200, [10, 20, 30, 255]).unwrap();
        let jpeg = crate::encode::encode_jpeg(&img, JPEG_QUALITY).unwrap();
        s.load_image(&jpeg, ImageFormat::Jpeg).unwrap();
        assert_eq!(s.preview().unwrap().dimensions(), (300, 100));
    }
}
