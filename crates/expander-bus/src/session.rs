use embassy_time::Duration;

use crate::bus::ExpanderBus;
use crate::descriptor::DeviceDescriptor;
use crate::error::BusError;

/// RAII guard for one device attached to the bus.
///
/// Opening the session attaches the device. Dropping it detaches the device,
/// including when a read failed or the transaction future was dropped while
/// suspended.
pub struct DeviceSession<'a, B: ExpanderBus> {
    bus: &'a mut B,
    slot: Option<B::Slot>,
}

impl<'a, B: ExpanderBus> DeviceSession<'a, B> {
    /// Attach `device`. Nothing needs releasing if this fails.
    pub fn open(
        bus: &'a mut B,
        device: &DeviceDescriptor,
    ) -> Result<Self, BusError> {
        let slot = bus.attach(device)?;
        Ok(Self { bus, slot: Some(slot) })
    }

    /// Read exactly `buffer.len()` bytes from the attached device.
    pub async fn receive(
        &mut self,
        buffer: &mut [u8],
        timeout: Duration,
    ) -> Result<(), BusError> {
        // `slot` is only taken in `drop`.
        let slot = self.slot.as_ref().ok_or(BusError::AttachFailed)?;
        self.bus.receive(slot, buffer, timeout).await
    }
}

impl<B: ExpanderBus> Drop for DeviceSession<'_, B> {
    fn drop(&mut self) {
        if let Some(slot) = self.slot.take() {
            self.bus.detach(slot);
        }
    }
}
