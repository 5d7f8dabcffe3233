//! Controls, the events they emit, and the table of listeners bound to them.
//!
//! The host attaches one listener per control when the session starts. The
//! [`HandlerRegistry`] owns those listeners and detaches every one of them
//! exactly once, either through [`HandlerRegistry::release`] or on drop.

use crate::adjustments::{Adjustment, AdjustmentKind};

/// The user-facing controls the session listens to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    Upload,
    Brightness,
    Contrast,
    Hue,
    Saturation,
    Close,
}

impl ControlId {
    pub const ALL: [ControlId; 6] = [
        ControlId::Upload,
        ControlId::Brightness,
        ControlId::Contrast,
        ControlId::Hue,
        ControlId::Saturation,
        ControlId::Close,
    ];

    /// DOM event that fires for this control.
    pub fn event_type(self) -> &'static str {
        match self {
            ControlId::Close => "click",
            _ => "change",
        }
    }

    /// The transform a slider drives, if this control is a slider.
    pub fn adjustment_kind(self) -> Option<AdjustmentKind> {
        match self {
            ControlId::Brightness => Some(AdjustmentKind::Brightness),
            ControlId::Contrast => Some(AdjustmentKind::Contrast),
            ControlId::Hue => Some(AdjustmentKind::Hue),
            ControlId::Saturation => Some(AdjustmentKind::Saturation),
            ControlId::Upload | ControlId::Close => None,
        }
    }
}

/// One event from the control surface, carrying the control's value at the
/// moment it fired.
#[derive(Debug, Clone, PartialEq)]
pub enum ControlEvent {
    /// A file was read as a `<prefix><base64>` data URL.
    Upload(String),
    /// A slider moved.
    Adjust(Adjustment),
    /// The close trigger.
    Close,
}

impl ControlEvent {
    pub fn control(&self) -> ControlId {
        match self {
            ControlEvent::Upload(_) => ControlId::Upload,
            ControlEvent::Adjust(adj) => match adj.kind() {
                AdjustmentKind::Brightness => ControlId::Brightness,
                AdjustmentKind::Contrast => ControlId::Contrast,
                AdjustmentKind::Hue => ControlId::Hue,
                AdjustmentKind::Saturation => ControlId::Saturation,
            },
            ControlEvent::Close => ControlId::Close,
        }
    }

    /// Build a slider event from the raw control value.
    ///
    /// Hue is read as whole degrees; the others as floats. Returns `None` for
    /// non-slider controls or an unparseable value.
    pub fn from_slider(control: ControlId, raw: &str) -> Option<ControlEvent> {
        let raw = raw.trim();
        let adjustment = match control.adjustment_kind()? {
            AdjustmentKind::Brightness => Adjustment::Brightness(raw.parse().ok()?),
            AdjustmentKind::Contrast => Adjustment::Contrast(raw.parse().ok()?),
            AdjustmentKind::Hue => Adjustment::Hue(parse_degrees(raw)?),
            AdjustmentKind::Saturation => Adjustment::Saturation(raw.parse().ok()?),
        };
        Some(ControlEvent::Adjust(adjustment))
    }
}

/// Range inputs may report "30" or "30.0"; both mean 30 degrees.
fn parse_degrees(raw: &str) -> Option<i32> {
    raw.parse::<i32>().ok().or_else(|| {
        let v = raw.parse::<f64>().ok()?;
        if v.is_finite() && v.abs() <= i32::MAX as f64 {
            Some(v.round() as i32)
        } else {
            None
        }
    })
}

/// Something listeners can be attached to, such as a DOM document.
pub trait ListenerHost {
    /// Whatever must be kept alive while the listener is attached.
    type Handle;
    type Error: std::fmt::Display;

    fn attach(&mut self, control: ControlId) -> Result<Self::Handle, Self::Error>;

    fn detach(&mut self, control: ControlId, handle: Self::Handle);
}

/// The table of attached listeners, keyed by control.
pub struct HandlerRegistry<H: ListenerHost> {
    host: H,
    handles: Vec<(ControlId, H::Handle)>,
}

impl<H: ListenerHost> HandlerRegistry<H> {
    /// Attach a listener for each control. Duplicates are attached once.
    ///
    /// If any attach fails, the listeners attached so far are detached
    /// before the error is returned.
    pub fn register(host: H, controls: &[ControlId]) -> Result<Self, H::Error> {
        let mut registry = Self {
            host,
            handles: Vec::with_capacity(controls.len()),
        };
        for &control in controls {
            if registry.is_registered(control) {
                continue;
            }
            let handle = registry.host.attach(control)?;
            registry.handles.push((control, handle));
        }
        log::debug!("registered {} control handlers", registry.handles.len());
        Ok(registry)
    }

    pub fn is_registered(&self, control: ControlId) -> bool {
        self.handles.iter().any(|(id, _)| *id == control)
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Detach everything now.
    pub fn release(self) {
        drop(self);
    }

    fn detach_all(&mut self) {
        let count = self.handles.len();
        while let Some((control, handle)) = self.handles.pop() {
            self.host.detach(control, handle);
        }
        if count > 0 {
            log::debug!("released {} control handlers", count);
        }
    }
}

impl<H: ListenerHost> Drop for HandlerRegistry<H> {
    fn drop(&mut self) {
        self.detach_all();
    }
}
