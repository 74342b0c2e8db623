//! Which finger a swipe belongs to.

/// Identity of one touch point.
type TouchKey = (egui::TouchDeviceId, egui::TouchId);

/// Follows the first finger down until it lifts; other fingers are ignored
/// for the duration, so a second touch cannot restart a swipe in progress.
#[derive(Debug, Clone, Default)]
pub struct TouchState {
    active: Option<TouchKey>,
}

impl TouchState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the gesture for this touch. False if another finger owns it.
    pub fn begin(&mut self, device: egui::TouchDeviceId, id: egui::TouchId) -> bool {
        match self.active {
            Some(active) => active == (device, id),
            None => {
                self.active = Some((device, id));
                true
            }
        }
    }

    pub fn owns(&self, device: egui::TouchDeviceId, id: egui::TouchId) -> bool {
        self.active == Some((device, id))
    }

    /// Releases the gesture if this touch owns it.
    pub fn end(&mut self, device: egui::TouchDeviceId, id: egui::TouchId) -> bool {
        if self.owns(device, id) {
            self.active = None;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DEVICE: egui::TouchDeviceId = egui::TouchDeviceId(0);

    #[test]
    fn test_second_finger_is_ignored() {
        let mut touch = TouchState::new();
        assert!(touch.begin(DEVICE, egui::TouchId(1)));
        assert!(!touch.begin(DEVICE, egui::TouchId(2)));
        assert!(!touch.end(DEVICE, egui::TouchId(2)));
        assert!(touch.owns(DEVICE, egui::TouchId(1)));

        assert!(touch.end(DEVICE, egui::TouchId(1)));
        assert!(!touch.owns(DEVICE, egui::TouchId(1)));
        assert!(touch.begin(DEVICE, egui::TouchId(2)));
    }
}
